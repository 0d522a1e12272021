//! Integer axis: one bin per integer in `[lo, hi)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BinInterval;
use crate::error::{Error, Result};

/// Sentinel edge reported for the underflow bin.
const UNDER_SENTINEL: f64 = (i32::MIN + 1) as f64;
/// Sentinel edge reported for the overflow bin.
const OVER_SENTINEL: f64 = i32::MAX as f64;

/// Axis with unit-width bins `[lo, lo+1), …, [hi-1, hi)`.
///
/// # Example
///
/// ```
/// use ndhist::IntegerAxis;
///
/// let a = IntegerAxis::new(-1, 3).unwrap();
/// assert_eq!(a.num_bins(), 4);
/// assert_eq!(a.index(-1.0), 0);
/// assert_eq!(a.index(3.0), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerAxis {
    lo: i32,
    hi: i32,
    uoflow: bool,
    label: Option<String>,
}

impl IntegerAxis {
    /// Create an axis with one bin per integer in `[lo, hi)`.
    pub fn new(lo: i32, hi: i32) -> Result<Self> {
        let axis = Self {
            lo,
            hi,
            uoflow: true,
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

    /// Enable or disable the two phantom under/overflow bins.
    pub fn with_uoflow(mut self, uoflow: bool) -> Self {
        self.uoflow = uoflow;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.lo >= self.hi {
            return Err(Error::InvalidBounds {
                lo: self.lo as f64,
                hi: self.hi as f64,
            });
        }
        Ok(())
    }

    /// Number of real bins.
    #[inline]
    pub fn num_bins(&self) -> usize {
        (self.hi - self.lo) as usize
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn lo(&self) -> i32 {
        self.lo
    }

    /// Upper bound (exclusive).
    #[inline]
    pub fn hi(&self) -> i32 {
        self.hi
    }

    /// Whether the phantom under/overflow bins exist.
    #[inline]
    pub fn uoflow(&self) -> bool {
        self.uoflow
    }

    /// Optional label.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Map a value to a signed bin index in `[-1, n]`. NaN maps to `-1`.
    #[inline]
    pub fn index(&self, x: f64) -> i32 {
        if x.is_nan() {
            return -1;
        }
        let z = x.floor();
        if z < self.lo as f64 {
            -1
        } else if z >= self.hi as f64 {
            self.num_bins() as i32
        } else {
            (z as i64 - self.lo as i64) as i32
        }
    }

    /// Edge interval of a bin, including the phantom bins at `-1` and `n`.
    ///
    /// The phantom edges report the integer sentinels `-2^31 + 1` and
    /// `2^31 - 1` instead of infinities.
    pub fn bin(&self, index: i32) -> Option<BinInterval> {
        let n = self.num_bins() as i32;
        match index {
            -1 => Some(BinInterval::new(UNDER_SENTINEL, self.lo as f64)),
            i if i == n => Some(BinInterval::new(self.hi as f64, OVER_SENTINEL)),
            i if (0..n).contains(&i) => {
                let lo = (self.lo + i) as f64;
                Some(BinInterval::new(lo, lo + 1.0))
            }
            _ => None,
        }
    }

    /// All `n + 1` bin edges.
    pub fn edges(&self) -> Vec<f64> {
        (self.lo..=self.hi).map(|i| i as f64).collect()
    }

    /// Iterate over the real bins as edge intervals.
    pub fn iter_bins(&self) -> impl Iterator<Item = BinInterval> + '_ {
        (self.lo..self.hi).map(|i| BinInterval::new(i as f64, (i + 1) as f64))
    }
}

impl fmt::Display for IntegerAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "integer({}, {}", self.lo, self.hi)?;
        if let Some(label) = &self.label {
            write!(f, ", label=\"{label}\"")?;
        }
        if !self.uoflow {
            write!(f, ", uoflow=false")?;
        }
        write!(f, ")")
    }
}
