//! Integer counter buffer with automatic width promotion.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Backing width of a counter buffer.
///
/// Widths are ordered: promotion only ever moves to a wider tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountWidth {
    /// 8-bit counters (up to 255 per cell).
    U8,
    /// 16-bit counters.
    U16,
    /// 32-bit counters.
    U32,
    /// 64-bit counters.
    U64,
    /// Arbitrary-precision counters.
    Big,
}

impl CountWidth {
    /// Largest count this width can hold, `None` for the unbounded tier.
    #[inline]
    pub const fn max_value(self) -> Option<u64> {
        match self {
            Self::U8 => Some(u8::MAX as u64),
            Self::U16 => Some(u16::MAX as u64),
            Self::U32 => Some(u32::MAX as u64),
            Self::U64 => Some(u64::MAX),
            Self::Big => None,
        }
    }

    /// Smallest width able to hold `count`.
    #[inline]
    pub fn for_count(count: u128) -> Self {
        if count <= u8::MAX as u128 {
            Self::U8
        } else if count <= u16::MAX as u128 {
            Self::U16
        } else if count <= u32::MAX as u128 {
            Self::U32
        } else if count <= u64::MAX as u128 {
            Self::U64
        } else {
            Self::Big
        }
    }
}

/// Flat buffer of unsigned counters at one of five widths.
///
/// Buffers start at the narrowest width. An addition that would not fit
/// the current width promotes the entire buffer to the next tier before
/// completing; `u64` overflow promotes into arbitrary precision, so
/// counts never saturate.
#[derive(Debug, Clone, PartialEq)]
pub enum CountBuffer {
    /// 8-bit counters.
    U8(Vec<u8>),
    /// 16-bit counters.
    U16(Vec<u16>),
    /// 32-bit counters.
    U32(Vec<u32>),
    /// 64-bit counters.
    U64(Vec<u64>),
    /// Arbitrary-precision counters.
    Big(Vec<BigUint>),
}

impl CountBuffer {
    /// Create a zeroed buffer at the narrowest width.
    pub fn new(len: usize) -> Self {
        Self::U8(vec![0; len])
    }

    /// Rebuild a buffer at the smallest width that fits `totals`.
    pub(crate) fn from_totals(totals: &[u128]) -> Self {
        let max = totals.iter().copied().max().unwrap_or(0);
        match CountWidth::for_count(max) {
            CountWidth::U8 => Self::U8(totals.iter().map(|t| *t as u8).collect()),
            CountWidth::U16 => Self::U16(totals.iter().map(|t| *t as u16).collect()),
            CountWidth::U32 => Self::U32(totals.iter().map(|t| *t as u32).collect()),
            CountWidth::U64 => Self::U64(totals.iter().map(|t| *t as u64).collect()),
            CountWidth::Big => Self::Big(totals.iter().map(|t| BigUint::from(*t)).collect()),
        }
    }

    /// Wrap arbitrary-precision totals without narrowing.
    pub(crate) fn from_big(cells: Vec<BigUint>) -> Self {
        Self::Big(cells)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(b) => b.len(),
            Self::U16(b) => b.len(),
            Self::U32(b) => b.len(),
            Self::U64(b) => b.len(),
            Self::Big(b) => b.len(),
        }
    }

    /// Whether the buffer has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current backing width.
    #[inline]
    pub fn width(&self) -> CountWidth {
        match self {
            Self::U8(_) => CountWidth::U8,
            Self::U16(_) => CountWidth::U16,
            Self::U32(_) => CountWidth::U32,
            Self::U64(_) => CountWidth::U64,
            Self::Big(_) => CountWidth::Big,
        }
    }

    /// Read a cell as a real number.
    ///
    /// Arbitrary-precision counts round to the nearest representable
    /// `f64`.
    #[inline]
    pub fn value(&self, offset: usize) -> f64 {
        match self {
            Self::U8(b) => b[offset] as f64,
            Self::U16(b) => b[offset] as f64,
            Self::U32(b) => b[offset] as f64,
            Self::U64(b) => b[offset] as f64,
            Self::Big(b) => b[offset].to_f64().unwrap_or(f64::INFINITY),
        }
    }

    /// Cell value for the bounded tiers; arbitrary-precision cells are
    /// clamped. Callers route `Big` buffers through [`CountBuffer::Big`]
    /// directly.
    #[inline]
    pub(crate) fn small(&self, offset: usize) -> u64 {
        match self {
            Self::U8(b) => b[offset] as u64,
            Self::U16(b) => b[offset] as u64,
            Self::U32(b) => b[offset] as u64,
            Self::U64(b) => b[offset],
            Self::Big(b) => b[offset].to_u64().unwrap_or(u64::MAX),
        }
    }

    /// Add `k` to one cell, promoting the whole buffer as needed.
    pub fn add(&mut self, offset: usize, k: u64) {
        loop {
            match self {
                Self::U8(b) => {
                    let sum = b[offset] as u128 + k as u128;
                    if sum <= u8::MAX as u128 {
                        b[offset] = sum as u8;
                        return;
                    }
                }
                Self::U16(b) => {
                    let sum = b[offset] as u128 + k as u128;
                    if sum <= u16::MAX as u128 {
                        b[offset] = sum as u16;
                        return;
                    }
                }
                Self::U32(b) => {
                    let sum = b[offset] as u128 + k as u128;
                    if sum <= u32::MAX as u128 {
                        b[offset] = sum as u32;
                        return;
                    }
                }
                Self::U64(b) => {
                    if let Some(sum) = b[offset].checked_add(k) {
                        b[offset] = sum;
                        return;
                    }
                }
                Self::Big(b) => {
                    b[offset] += k;
                    return;
                }
            }
            self.widen();
        }
    }

    /// Cell-wise addition, promoting as needed.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        if let Self::Big(cells) = other {
            self.widen_to_big();
            if let Self::Big(own) = self {
                for (o, c) in own.iter_mut().zip(cells) {
                    *o += c;
                }
            }
            return;
        }
        for i in 0..other.len() {
            let k = other.small(i);
            if k > 0 {
                self.add(i, k);
            }
        }
    }

    /// Exact cell-wise comparison across widths.
    pub(crate) fn cells_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (self, other) {
            (Self::Big(a), Self::Big(b)) => a == b,
            (Self::Big(a), b) => a
                .iter()
                .enumerate()
                .all(|(i, c)| *c == BigUint::from(b.small(i))),
            (a, Self::Big(b)) => b
                .iter()
                .enumerate()
                .all(|(i, c)| *c == BigUint::from(a.small(i))),
            (a, b) => (0..a.len()).all(|i| a.small(i) == b.small(i)),
        }
    }

    /// Promote one tier up.
    fn widen(&mut self) {
        let old = std::mem::replace(self, Self::U8(Vec::new()));
        *self = match old {
            Self::U8(b) => Self::U16(b.into_iter().map(u16::from).collect()),
            Self::U16(b) => Self::U32(b.into_iter().map(u32::from).collect()),
            Self::U32(b) => Self::U64(b.into_iter().map(u64::from).collect()),
            Self::U64(b) => Self::Big(b.into_iter().map(BigUint::from).collect()),
            big @ Self::Big(_) => big,
        };
    }

    fn widen_to_big(&mut self) {
        while !matches!(self, Self::Big(_)) {
            self.widen();
        }
    }
}
