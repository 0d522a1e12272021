//! `ndarray` views of histogram contents and axis edges.

use ndarray::{Array1, ArrayD, ArrayViewD, IxDyn};

use crate::axis::Axis;
use crate::histogram::Histogram;
use crate::storage::{CountBuffer, Storage};

/// Borrowed, typed `ndarray` view of count storage.
///
/// The variant matches the current counter width. Arbitrary-precision
/// and weighted storage have no primitive element type; use
/// [`Histogram::to_array`] for those.
#[derive(Debug)]
pub enum CountsView<'a> {
    /// 8-bit counters.
    U8(ArrayViewD<'a, u8>),
    /// 16-bit counters.
    U16(ArrayViewD<'a, u16>),
    /// 32-bit counters.
    U32(ArrayViewD<'a, u32>),
    /// 64-bit counters.
    U64(ArrayViewD<'a, u64>),
}

impl Histogram {
    /// Copy the cell contents into an owned array.
    ///
    /// Count storage yields values with shape equal to
    /// [`shape`](Self::shape) (under/overflow columns included).
    /// Weighted storage gains a leading axis of length 2: plane 0 holds
    /// values, plane 1 variances.
    pub fn to_array(&self) -> ArrayD<f64> {
        match self.storage() {
            Storage::Counts(_) => ArrayD::from_shape_vec(IxDyn(&self.shape()), self.values())
                .expect("cell count matches the axis extents"),
            Storage::Weighted(b) => {
                let mut shape = vec![2];
                shape.extend(self.shape());
                let mut data = b.sumw().to_vec();
                data.extend_from_slice(b.sumw2());
                ArrayD::from_shape_vec(IxDyn(&shape), data)
                    .expect("cell count matches the axis extents")
            }
        }
    }

    /// Zero-copy typed view of count storage.
    ///
    /// Returns `None` once the storage is arbitrary-precision or
    /// weighted. The view borrows the histogram, so it cannot observe a
    /// later promotion.
    pub fn counts_view(&self) -> Option<CountsView<'_>> {
        let shape = IxDyn(&self.shape());
        match self.storage() {
            Storage::Counts(CountBuffer::U8(b)) => {
                ArrayViewD::from_shape(shape, b.as_slice()).ok().map(CountsView::U8)
            }
            Storage::Counts(CountBuffer::U16(b)) => {
                ArrayViewD::from_shape(shape, b.as_slice()).ok().map(CountsView::U16)
            }
            Storage::Counts(CountBuffer::U32(b)) => {
                ArrayViewD::from_shape(shape, b.as_slice()).ok().map(CountsView::U32)
            }
            Storage::Counts(CountBuffer::U64(b)) => {
                ArrayViewD::from_shape(shape, b.as_slice()).ok().map(CountsView::U64)
            }
            Storage::Counts(CountBuffer::Big(_)) | Storage::Weighted(_) => None,
        }
    }
}

impl Axis {
    /// Bin edges as an owned `ndarray` vector.
    ///
    /// Interval axes yield `n + 1` edges; category axes yield their `n`
    /// values.
    pub fn edges_array(&self) -> Array1<f64> {
        Array1::from(self.edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::IntegerAxis;

    fn flat_axis(lo: i32, hi: i32) -> Axis {
        IntegerAxis::new(lo, hi).unwrap().with_uoflow(false).into()
    }

    #[test]
    fn counts_array_has_the_physical_shape() {
        let mut h = Histogram::new(vec![flat_axis(0, 2), flat_axis(0, 4)]).unwrap();
        h.fill(&[0.0, 1.0]).unwrap();
        h.fill(&[1.0, 3.0]).unwrap();

        let arr = h.to_array();
        assert_eq!(arr.shape(), &[2, 4]);
        assert_eq!(arr[[0, 1]], 1.0);
        assert_eq!(arr[[1, 3]], 1.0);
        assert_eq!(arr.sum(), 2.0);

        match h.counts_view().unwrap() {
            CountsView::U8(v) => {
                assert_eq!(v.shape(), &[2, 4]);
                assert_eq!(v[[0, 1]], 1);
            }
            _ => panic!("fresh histograms use 8-bit counters"),
        }
    }

    #[test]
    fn weighted_array_gains_a_plane_axis() {
        let mut h = Histogram::new(vec![flat_axis(0, 3)]).unwrap();
        h.fill_weight(&[1.0], 3.0).unwrap();
        assert!(h.counts_view().is_none());

        let arr = h.to_array();
        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr[[0, 1]], 3.0);
        assert_eq!(arr[[1, 1]], 9.0);
    }

    #[test]
    fn axis_edges_are_arrays() {
        let a: Axis = IntegerAxis::new(0, 2).unwrap().into();
        assert_eq!(a.edges_array().to_vec(), vec![0.0, 1.0, 2.0]);
    }
}
