//! The histogram facade: axes + storage + index arithmetic.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign};

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::indexing::{GridLayout, MAX_AXES};
use crate::storage::{Storage, StorageState, StorageView};

// ============================================================================
// Column
// ============================================================================

/// One coordinate column of a batch fill.
///
/// A scalar broadcasts against the batch length; slices must all share
/// one length.
#[derive(Debug, Clone, Copy)]
pub enum Column<'a> {
    /// A single value repeated for every sample in the batch.
    Scalar(f64),
    /// One value per sample.
    Slice(&'a [f64]),
}

impl Column<'_> {
    #[inline]
    fn get(&self, i: usize) -> f64 {
        match self {
            Self::Scalar(v) => *v,
            Self::Slice(s) => s[i],
        }
    }
}

impl From<f64> for Column<'_> {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl<'a> From<&'a [f64]> for Column<'a> {
    fn from(s: &'a [f64]) -> Self {
        Self::Slice(s)
    }
}

impl<'a> From<&'a Vec<f64>> for Column<'a> {
    fn from(s: &'a Vec<f64>) -> Self {
        Self::Slice(s)
    }
}

// ============================================================================
// Histogram
// ============================================================================

/// N-dimensional histogram over a fixed tuple of axes.
///
/// Filling maps a sample tuple through every axis to a flat cell and
/// increments it. Cells start as `u8` counters and widen automatically;
/// the first weighted fill (or a scale) converts the storage to
/// `(Σw, Σw²)` pairs, irreversibly.
///
/// Samples that miss the physical range of any axis are silently
/// dropped; reads with out-of-range indices are errors.
///
/// # Example
///
/// ```
/// use ndhist::{Histogram, IntegerAxis};
///
/// let mut h = Histogram::new(vec![IntegerAxis::new(0, 3).unwrap().into()]).unwrap();
/// h.fill(&[1.0]).unwrap();
/// h.fill(&[1.0]).unwrap();
/// assert_eq!(h.value(&[1]).unwrap(), 2.0);
/// assert_eq!(h.sum(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Histogram {
    axes: Vec<Axis>,
    layout: GridLayout,
    storage: Storage,
}

impl Histogram {
    /// Create a histogram over the given axes.
    ///
    /// An empty axis list gives the zero-dimensional histogram with a
    /// single cell. At most [`MAX_AXES`] axes are supported.
    pub fn new(axes: Vec<Axis>) -> Result<Self> {
        if axes.len() > MAX_AXES {
            return Err(Error::TooManyAxes {
                max: MAX_AXES,
                got: axes.len(),
            });
        }
        let layout = GridLayout::from_axes(&axes);
        let storage = Storage::new(layout.len());
        Ok(Self {
            axes,
            layout,
            storage,
        })
    }

    /// Rebuild a histogram from deserialized parts, re-validating the
    /// axes and the cell count.
    pub(crate) fn from_parts(axes: Vec<Axis>, storage: Storage) -> Result<Self> {
        if axes.len() > MAX_AXES {
            return Err(Error::TooManyAxes {
                max: MAX_AXES,
                got: axes.len(),
            });
        }
        for axis in &axes {
            axis.validate()?;
        }
        let layout = GridLayout::from_axes(&axes);
        if storage.len() != layout.len() {
            return Err(Error::LengthMismatch {
                expected: layout.len(),
                got: storage.len(),
            });
        }
        Ok(Self {
            axes,
            layout,
            storage,
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Number of axes.
    #[inline]
    pub fn dim(&self) -> usize {
        self.axes.len()
    }

    /// All axes in order.
    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis by signed position; negative indices count from the back.
    pub fn axis(&self, index: isize) -> Result<&Axis> {
        let dim = self.dim() as isize;
        if index < -dim || index >= dim {
            return Err(Error::AxisOutOfRange {
                dim: self.dim(),
                index,
            });
        }
        let i = if index < 0 { index + dim } else { index };
        Ok(&self.axes[i as usize])
    }

    /// Physical cells per axis (`n + 2·uoflow` each).
    pub fn shape(&self) -> Vec<usize> {
        self.layout.extents()
    }

    /// Total number of physical cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.layout.len()
    }

    /// Current storage state, including the counter width.
    #[inline]
    pub fn state(&self) -> StorageState {
        self.storage.state()
    }

    /// Borrowed, typed view of the backing cell array.
    ///
    /// The view reflects the current storage state; it cannot outlive
    /// the next mutation (which may promote the buffer). Use
    /// [`values`](Self::values) for a stable snapshot.
    #[inline]
    pub fn view(&self) -> StorageView<'_> {
        self.storage.view()
    }

    /// Stable snapshot of all cell values, phantom cells included.
    pub fn values(&self) -> Vec<f64> {
        self.storage.values()
    }

    /// Stable snapshot of all cell variances, phantom cells included.
    pub fn variances(&self) -> Vec<f64> {
        self.storage.variances()
    }

    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    // ------------------------------------------------------------------------
    // Filling
    // ------------------------------------------------------------------------

    /// Map a sample to its cell; `Ok(None)` means the sample misses the
    /// physical range of some axis and is dropped.
    fn sample_offset(&self, sample: &[f64]) -> Result<Option<usize>> {
        if sample.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                got: sample.len(),
            });
        }
        let mut indices = [0i32; MAX_AXES];
        for (d, (axis, &x)) in self.axes.iter().zip(sample).enumerate() {
            indices[d] = axis.index(x);
        }
        Ok(self.layout.fill_offset(&indices[..self.dim()]))
    }

    /// Count one sample.
    ///
    /// The sample length must equal [`dim`](Self::dim). Samples outside
    /// the axes' physical range are dropped silently.
    pub fn fill(&mut self, sample: &[f64]) -> Result<()> {
        if let Some(offset) = self.sample_offset(sample)? {
            self.storage.inc(offset);
        }
        Ok(())
    }

    /// Count one sample with a weight.
    ///
    /// The first weighted fill converts the storage to weighted state,
    /// irreversibly. A zero weight still converts and contributes zero
    /// to both planes.
    pub fn fill_weight(&mut self, sample: &[f64], weight: f64) -> Result<()> {
        if let Some(offset) = self.sample_offset(sample)? {
            self.storage.fill_weight(offset, weight);
        }
        Ok(())
    }

    /// Count one sample `count` times. Count storage stays count
    /// storage.
    pub fn fill_count(&mut self, sample: &[f64], count: u64) -> Result<()> {
        if let Some(offset) = self.sample_offset(sample)? {
            self.storage.add_count(offset, count);
        }
        Ok(())
    }

    fn batch_len(columns: &[Column<'_>], extra: Option<usize>) -> Result<usize> {
        let mut len: Option<usize> = None;
        let lens = columns
            .iter()
            .filter_map(|c| match c {
                Column::Slice(s) => Some(s.len()),
                Column::Scalar(_) => None,
            })
            .chain(extra);
        for l in lens {
            match len {
                None => len = Some(l),
                Some(expected) if expected != l => {
                    return Err(Error::LengthMismatch { expected, got: l })
                }
                Some(_) => {}
            }
        }
        Ok(len.unwrap_or(1))
    }

    /// Count a batch of samples given as per-axis columns.
    ///
    /// Scalar columns broadcast; slice columns must share one length.
    /// Samples that miss the domain are dropped without aborting the
    /// batch.
    pub fn fill_batch(&mut self, columns: &[Column<'_>]) -> Result<()> {
        let n = Self::batch_len(columns, None)?;
        self.fill_batch_impl(columns, n, |storage, offset, _| storage.inc(offset))
    }

    /// Count a batch of samples with one weight per sample.
    pub fn fill_batch_weight(&mut self, columns: &[Column<'_>], weights: &[f64]) -> Result<()> {
        let n = Self::batch_len(columns, Some(weights.len()))?;
        self.fill_batch_impl(columns, n, |storage, offset, i| {
            storage.fill_weight(offset, weights[i])
        })
    }

    /// Count a batch of samples with one integer multiplier per sample.
    pub fn fill_batch_count(&mut self, columns: &[Column<'_>], counts: &[u64]) -> Result<()> {
        let n = Self::batch_len(columns, Some(counts.len()))?;
        self.fill_batch_impl(columns, n, |storage, offset, i| {
            storage.add_count(offset, counts[i])
        })
    }

    fn fill_batch_impl<F>(&mut self, columns: &[Column<'_>], n: usize, mut apply: F) -> Result<()>
    where
        F: FnMut(&mut Storage, usize, usize),
    {
        if columns.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                got: columns.len(),
            });
        }
        let mut sample = [0.0f64; MAX_AXES];
        for i in 0..n {
            for (d, c) in columns.iter().enumerate() {
                sample[d] = c.get(i);
            }
            if let Some(offset) = self.sample_offset(&sample[..self.dim()])? {
                apply(&mut self.storage, offset, i);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    /// Cell value at signed per-axis bin indices.
    ///
    /// `-1` and `n` address the under/overflow bins of axes that have
    /// them; anything else out of range is an error, as is a wrong
    /// number of indices.
    pub fn value(&self, indices: &[i32]) -> Result<f64> {
        let offset = self.layout.read_offset(indices)?;
        Ok(self.storage.value(offset))
    }

    /// Cell variance at signed per-axis bin indices.
    ///
    /// Equals the value while the storage holds plain counts.
    pub fn variance(&self, indices: &[i32]) -> Result<f64> {
        let offset = self.layout.read_offset(indices)?;
        Ok(self.storage.variance(offset))
    }

    /// Total of all real-bin values, excluding under/overflow cells.
    pub fn sum(&self) -> f64 {
        (0..self.layout.len())
            .filter(|&offset| self.layout.is_real_cell(offset))
            .map(|offset| self.storage.value(offset))
            .sum()
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    /// Cell-wise addition of a histogram with identical axes.
    ///
    /// Counts plus counts stays counts (promoting as needed); if either
    /// side is weighted the result is weighted.
    pub fn add(&mut self, other: &Histogram) -> Result<()> {
        if self.axes != other.axes {
            return Err(Error::AxesMismatch);
        }
        self.storage.merge(&other.storage);
        Ok(())
    }

    /// Scale all cells by a non-negative factor.
    ///
    /// Scaling count storage by exactly 1 is the identity; any other
    /// factor converts to weighted storage and multiplies values by
    /// `factor` and variances by `factor²`.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::InvalidScale(factor));
        }
        if factor == 1.0 && matches!(self.storage, Storage::Counts(_)) {
            return Ok(());
        }
        self.storage.scale(factor);
        Ok(())
    }

    /// Project onto a subset of axes, summing over the dropped ones.
    ///
    /// `keep` must be non-empty, strictly increasing, and in range. The
    /// dropped axes are summed over all their physical columns,
    /// including under/overflow. Storage state is preserved; counts
    /// re-tier to the smallest width that fits the sums.
    pub fn reduce_to(&self, keep: &[usize]) -> Result<Histogram> {
        let valid = !keep.is_empty()
            && keep.windows(2).all(|w| w[0] < w[1])
            && keep.iter().all(|&i| i < self.dim());
        if !valid {
            return Err(Error::InvalidSelection);
        }
        let axes: Vec<Axis> = keep.iter().map(|&i| self.axes[i].clone()).collect();
        let out_layout = GridLayout::from_axes(&axes);
        let mut coords = Vec::with_capacity(self.dim());
        let storage = self.storage.reduce(out_layout.len(), |offset| {
            self.layout.coords(offset, &mut coords);
            out_layout.offset_of(keep.iter().map(|&i| coords[i]))
        });
        Ok(Self {
            axes,
            layout: out_layout,
            storage,
        })
    }
}

impl PartialEq for Histogram {
    /// Histograms are equal when their axes match and every cell agrees
    /// in both value and variance. Count and weighted storage compare
    /// equal when both planes coincide.
    fn eq(&self, other: &Self) -> bool {
        self.axes == other.axes && self.storage.contents_eq(&other.storage)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "histogram(")?;
        for (i, axis) in self.axes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{axis}")?;
        }
        write!(f, ")")
    }
}

impl AddAssign<&Histogram> for Histogram {
    /// # Panics
    ///
    /// Panics when the axes differ; use [`Histogram::add`] to handle
    /// the error.
    fn add_assign(&mut self, rhs: &Histogram) {
        if let Err(e) = self.add(rhs) {
            panic!("{e}");
        }
    }
}

impl Add<&Histogram> for &Histogram {
    type Output = Histogram;

    /// # Panics
    ///
    /// Panics when the axes differ; use [`Histogram::add`] to handle
    /// the error.
    fn add(self, rhs: &Histogram) -> Histogram {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl MulAssign<f64> for Histogram {
    /// # Panics
    ///
    /// Panics on a negative or non-finite factor; use
    /// [`Histogram::scale`] to handle the error.
    fn mul_assign(&mut self, factor: f64) {
        if let Err(e) = self.scale(factor) {
            panic!("{e}");
        }
    }
}

impl Mul<f64> for &Histogram {
    type Output = Histogram;

    /// # Panics
    ///
    /// Panics on a negative or non-finite factor; use
    /// [`Histogram::scale`] to handle the error.
    fn mul(self, factor: f64) -> Histogram {
        let mut out = self.clone();
        out *= factor;
        out
    }
}

impl Mul<&Histogram> for f64 {
    type Output = Histogram;

    /// # Panics
    ///
    /// Panics on a negative or non-finite factor; use
    /// [`Histogram::scale`] to handle the error.
    fn mul(self, hist: &Histogram) -> Histogram {
        hist * self
    }
}
