//! Linearization of per-axis bin indices into flat storage offsets.

use crate::axis::Axis;
use crate::error::{Error, Result};

/// Maximum number of axes a histogram may have.
pub const MAX_AXES: usize = 32;

/// Per-axis geometry: real bin count, phantom shift, and stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisGeom {
    bins: usize,
    /// 1 when the axis has under/overflow bins, else 0. The underflow
    /// bin occupies physical column 0, so a signed index maps to the
    /// physical column `index + shift`.
    shift: usize,
    stride: usize,
}

impl AxisGeom {
    #[inline]
    fn extent(&self) -> usize {
        self.bins + 2 * self.shift
    }
}

/// Row-major cell layout over a product of axes (last axis fastest).
///
/// All accesses — fill, read, iteration, and reduction — go through the
/// same mapping, so a cell has exactly one physical offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GridLayout {
    geoms: Vec<AxisGeom>,
    len: usize,
}

impl GridLayout {
    /// Build the layout for an axis tuple. A zero-axis layout has one
    /// cell.
    pub fn from_axes(axes: &[Axis]) -> Self {
        let mut geoms: Vec<AxisGeom> = axes
            .iter()
            .map(|a| AxisGeom {
                bins: a.num_bins(),
                shift: usize::from(a.uoflow()),
                stride: 0,
            })
            .collect();
        let mut stride = 1;
        for g in geoms.iter_mut().rev() {
            g.stride = stride;
            stride *= g.extent();
        }
        Self { geoms, len: stride }
    }

    /// Total number of physical cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Physical extent of each axis.
    pub fn extents(&self) -> Vec<usize> {
        self.geoms.iter().map(|g| g.extent()).collect()
    }

    /// Offset for a fill: `None` drops the sample.
    ///
    /// Each `indices[d]` is the signed bin index the axis produced; a
    /// sample is dropped when any axis maps it outside its physical
    /// columns (underflow or overflow without the phantom bins).
    #[inline]
    pub fn fill_offset(&self, indices: &[i32]) -> Option<usize> {
        debug_assert_eq!(indices.len(), self.geoms.len());
        let mut offset = 0;
        for (g, &idx) in self.geoms.iter().zip(indices) {
            let col = idx as isize + g.shift as isize;
            if col < 0 || col as usize >= g.extent() {
                return None;
            }
            offset += col as usize * g.stride;
        }
        Some(offset)
    }

    /// Offset for a read: out-of-range indices are errors.
    ///
    /// `-1` addresses the underflow bin and `n` the overflow bin, only
    /// on axes that have them.
    pub fn read_offset(&self, indices: &[i32]) -> Result<usize> {
        if indices.len() != self.geoms.len() {
            return Err(Error::DimensionMismatch {
                expected: self.geoms.len(),
                got: indices.len(),
            });
        }
        let mut offset = 0;
        for (axis, (g, &idx)) in self.geoms.iter().zip(indices).enumerate() {
            let col = idx as isize + g.shift as isize;
            if col < 0 || col as usize >= g.extent() {
                return Err(Error::IndexOutOfRange { axis, index: idx });
            }
            offset += col as usize * g.stride;
        }
        Ok(offset)
    }

    /// Offset of a cell given its physical per-axis columns.
    #[inline]
    pub fn offset_of<I: IntoIterator<Item = usize>>(&self, cols: I) -> usize {
        self.geoms
            .iter()
            .zip(cols)
            .map(|(g, col)| g.stride * col)
            .sum()
    }

    /// Decompose a flat offset into physical per-axis columns.
    pub fn coords(&self, offset: usize, out: &mut Vec<usize>) {
        debug_assert!(offset < self.len);
        out.clear();
        for g in &self.geoms {
            out.push(offset / g.stride % g.extent());
        }
    }

    /// Whether a flat offset addresses a cell with no phantom column.
    pub fn is_real_cell(&self, offset: usize) -> bool {
        self.geoms.iter().all(|g| {
            let col = offset / g.stride % g.extent();
            col >= g.shift && col < g.shift + g.bins
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::IntegerAxis;

    fn axes_2d() -> Vec<Axis> {
        vec![
            IntegerAxis::new(0, 2).unwrap().into(),
            IntegerAxis::new(0, 3).unwrap().with_uoflow(false).into(),
        ]
    }

    #[test]
    fn strides_run_last_axis_fastest() {
        let layout = GridLayout::from_axes(&axes_2d());
        // extents: (2 + 2) * 3
        assert_eq!(layout.len(), 12);
        assert_eq!(layout.extents(), vec![4, 3]);

        // consecutive second-axis bins are adjacent
        let a = layout.read_offset(&[0, 0]).unwrap();
        let b = layout.read_offset(&[0, 1]).unwrap();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn zero_axes_have_one_cell() {
        let layout = GridLayout::from_axes(&[]);
        assert_eq!(layout.len(), 1);
        assert_eq!(layout.read_offset(&[]).unwrap(), 0);
        assert!(layout.is_real_cell(0));
    }

    #[test]
    fn fill_drops_what_reads_reject() {
        let layout = GridLayout::from_axes(&axes_2d());
        // second axis has no phantom bins
        assert_eq!(layout.fill_offset(&[0, 3]), None);
        assert_eq!(layout.fill_offset(&[0, -1]), None);
        assert!(matches!(
            layout.read_offset(&[0, 3]),
            Err(Error::IndexOutOfRange { axis: 1, index: 3 })
        ));
        // first axis has them
        assert!(layout.fill_offset(&[-1, 0]).is_some());
        assert!(layout.fill_offset(&[2, 0]).is_some());
        assert_eq!(layout.fill_offset(&[3, 0]), None);
    }

    #[test]
    fn real_cells_exclude_phantom_columns() {
        let layout = GridLayout::from_axes(&axes_2d());
        let under = layout.read_offset(&[-1, 0]).unwrap();
        let real = layout.read_offset(&[0, 0]).unwrap();
        let over = layout.read_offset(&[2, 0]).unwrap();
        assert!(!layout.is_real_cell(under));
        assert!(layout.is_real_cell(real));
        assert!(!layout.is_real_cell(over));
    }

    #[test]
    fn coords_round_trip_offsets() {
        let layout = GridLayout::from_axes(&axes_2d());
        let mut coords = Vec::new();
        for offset in 0..layout.len() {
            layout.coords(offset, &mut coords);
            let rebuilt: usize = coords
                .iter()
                .zip(layout.extents())
                .rev()
                .fold((0, 1), |(acc, stride), (&c, e)| {
                    (acc + c * stride, stride * e)
                })
                .0;
            assert_eq!(rebuilt, offset);
        }
    }
}
