//! Regular axis: equally spaced bins in a transformed coordinate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BinInterval, Transform};
use crate::error::{Error, Result};

/// Axis with `n` bins equally spaced between `lo` and `hi` in a
/// transformed coordinate.
///
/// Two phantom bins capture underflow (index `-1`) and overflow (index
/// `n`) unless disabled with [`with_uoflow`](Self::with_uoflow).
///
/// # Example
///
/// ```
/// use ndhist::RegularAxis;
///
/// let a = RegularAxis::new(4, 1.0, 2.0).unwrap();
/// assert_eq!(a.index(1.25), 1);
/// assert_eq!(a.index(0.99), -1);
/// assert_eq!(a.index(2.0), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularAxis {
    bins: u32,
    lo: f64,
    hi: f64,
    transform: Transform,
    uoflow: bool,
    label: Option<String>,
}

impl RegularAxis {
    /// Create an axis with `bins` equal-width bins on `[lo, hi)`.
    pub fn new(bins: u32, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(bins, lo, hi, Transform::Identity)
    }

    /// Create an axis with bins equally spaced in `ln(x)`.
    pub fn log(bins: u32, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(bins, lo, hi, Transform::Log)
    }

    /// Create an axis with bins equally spaced in `sqrt(x)`.
    pub fn sqrt(bins: u32, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(bins, lo, hi, Transform::Sqrt)
    }

    /// Create an axis with bins equally spaced in `cos(x)`.
    pub fn cos(bins: u32, lo: f64, hi: f64) -> Result<Self> {
        Self::with_transform(bins, lo, hi, Transform::Cos)
    }

    /// Create an axis with bins equally spaced in `x^exponent`.
    pub fn pow(bins: u32, lo: f64, hi: f64, exponent: f64) -> Result<Self> {
        if !exponent.is_finite() || exponent == 0.0 {
            return Err(Error::InvalidExponent(exponent));
        }
        Self::with_transform(bins, lo, hi, Transform::Pow { exponent })
    }

    fn with_transform(bins: u32, lo: f64, hi: f64, transform: Transform) -> Result<Self> {
        let axis = Self {
            bins,
            lo,
            hi,
            transform,
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
        if self.bins == 0 {
            return Err(Error::EmptyAxis);
        }
        if !self.lo.is_finite() || !self.hi.is_finite() || self.lo >= self.hi {
            return Err(Error::InvalidBounds {
                lo: self.lo,
                hi: self.hi,
            });
        }
        if let Transform::Pow { exponent } = self.transform {
            if !exponent.is_finite() || exponent == 0.0 {
                return Err(Error::InvalidExponent(exponent));
            }
        }
        let ta = self.transform.forward(self.lo);
        let tb = self.transform.forward(self.hi);
        if !ta.is_finite() || !tb.is_finite() || ta == tb {
            return Err(Error::InvalidTransform {
                transform: self.transform.repr_name(),
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(())
    }

    /// Number of real bins.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.bins as usize
    }

    /// Lower bound of the axis.
    #[inline]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound of the axis.
    #[inline]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// The coordinate transform.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
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

    /// Map a value to a signed bin index in `[-1, n]`.
    ///
    /// NaN and values the transform cannot represent map to `-1`.
    #[inline]
    pub fn index(&self, x: f64) -> i32 {
        let n = self.bins as f64;
        let ta = self.transform.forward(self.lo);
        let tb = self.transform.forward(self.hi);
        let z = (self.transform.forward(x) - ta) * n / (tb - ta);
        if z.is_nan() || z < 0.0 {
            -1
        } else if z >= n {
            self.bins as i32
        } else {
            z as i32
        }
    }

    /// Edge `i` in `0..=n`, exact at both axis bounds.
    pub fn edge(&self, i: u32) -> f64 {
        if i == 0 {
            self.lo
        } else if i == self.bins {
            self.hi
        } else {
            let ta = self.transform.forward(self.lo);
            let tb = self.transform.forward(self.hi);
            self.transform
                .inverse(ta + (tb - ta) * i as f64 / self.bins as f64)
        }
    }

    /// Edge interval of a bin, including the phantom bins at `-1` and `n`.
    pub fn bin(&self, index: i32) -> Option<BinInterval> {
        let n = self.bins as i32;
        match index {
            -1 => Some(BinInterval::new(f64::NEG_INFINITY, self.lo)),
            i if i == n => Some(BinInterval::new(self.hi, f64::INFINITY)),
            i if (0..n).contains(&i) => Some(BinInterval::new(
                self.edge(i as u32),
                self.edge(i as u32 + 1),
            )),
            _ => None,
        }
    }

    /// All `n + 1` bin edges.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.bins).map(|i| self.edge(i)).collect()
    }

    /// Iterate over the real bins as edge intervals.
    pub fn iter_bins(&self) -> impl Iterator<Item = BinInterval> + '_ {
        (0..self.bins).map(|i| BinInterval::new(self.edge(i), self.edge(i + 1)))
    }
}

impl fmt::Display for RegularAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}, {}",
            self.transform.repr_name(),
            self.bins,
            self.lo,
            self.hi
        )?;
        if let Transform::Pow { exponent } = self.transform {
            write!(f, ", {exponent}")?;
        }
        if let Some(label) = &self.label {
            write!(f, ", label=\"{label}\"")?;
        }
        if !self.uoflow {
            write!(f, ", uoflow=false")?;
        }
        write!(f, ")")
    }
}
