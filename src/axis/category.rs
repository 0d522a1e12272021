//! Category axis: one bin per discrete value, no ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis with one bin per discrete integer value.
///
/// Categories are unordered and carry no under/overflow bins: a value
/// outside the set maps to `n`, which lies outside every physical bin,
/// so such samples are silently dropped on fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    values: Vec<i64>,
    label: Option<String>,
}

impl CategoryAxis {
    /// Create an axis from distinct category values.
    pub fn new(values: impl Into<Vec<i64>>) -> Result<Self> {
        let axis = Self {
            values: values.into(),
            label: None,
        };
        axis.validate()?;
        Ok(axis)
    }

    /// Attach a human-readable label. Labels take part in equality.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.values.is_empty() {
            return Err(Error::EmptyCategories);
        }
        for (i, v) in self.values.iter().enumerate() {
            if self.values[..i].contains(v) {
                return Err(Error::DuplicateCategory(*v));
            }
        }
        Ok(())
    }

    /// Number of categories.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.values.len()
    }

    /// Optional label.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The category values in insertion order.
    #[inline]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The category at bin `index`.
    #[inline]
    pub fn value(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Map an exact category value to its bin index; misses return `n`.
    #[inline]
    pub fn index_of(&self, value: i64) -> i32 {
        self.values
            .iter()
            .position(|v| *v == value)
            .unwrap_or(self.values.len()) as i32
    }

    /// Map a value to a bin index.
    ///
    /// Only values that are exactly a category match; everything else
    /// (including NaN and fractional values) returns `n`.
    #[inline]
    pub fn index(&self, x: f64) -> i32 {
        let n = self.values.len() as i32;
        if !x.is_finite() || x.fract() != 0.0 {
            return n;
        }
        self.values
            .iter()
            .position(|v| *v as f64 == x)
            .map_or(n, |i| i as i32)
    }

    /// Iterate over the category values.
    pub fn iter_values(&self) -> impl Iterator<Item = i64> + '_ {
        self.values.iter().copied()
    }
}

impl fmt::Display for CategoryAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        if let Some(label) = &self.label {
            write!(f, ", label=\"{label}\"")?;
        }
        write!(f, ")")
    }
}
