//! Borrowed, typed views into histogram storage.

use num_bigint::BigUint;

/// Zero-copy view of the storage backing array.
///
/// The variant reflects the storage state at the time of the call; any
/// later mutation may promote the buffer and allocate a new backing
/// array, which is why the view borrows the storage. For a snapshot
/// that survives mutation, use the copying accessors instead.
#[derive(Debug, Clone, Copy)]
pub enum StorageView<'a> {
    /// 8-bit counters.
    U8(&'a [u8]),
    /// 16-bit counters.
    U16(&'a [u16]),
    /// 32-bit counters.
    U32(&'a [u32]),
    /// 64-bit counters.
    U64(&'a [u64]),
    /// Arbitrary-precision counters.
    Big(&'a [BigUint]),
    /// Weighted planes: values and variances.
    Weighted {
        /// The `Σw` plane.
        sumw: &'a [f64],
        /// The `Σw²` plane.
        sumw2: &'a [f64],
    },
}

impl StorageView<'_> {
    /// Number of cells visible through the view.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(b) => b.len(),
            Self::U16(b) => b.len(),
            Self::U32(b) => b.len(),
            Self::U64(b) => b.len(),
            Self::Big(b) => b.len(),
            Self::Weighted { sumw, .. } => sumw.len(),
        }
    }

    /// Whether the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the view is over weighted storage.
    #[inline]
    pub fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted { .. })
    }
}
