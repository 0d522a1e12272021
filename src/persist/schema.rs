//! Stable serialization schema for histograms.
//!
//! Schema types are separate from the runtime types so the on-disk
//! format can evolve independently and deserialized data is validated
//! before it becomes a live histogram.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::Error;
use crate::histogram::Histogram;
use crate::storage::{CountBuffer, Storage, WeightedBuffer};

/// Storage cells tagged by state.
///
/// Arbitrary-precision cells are stored as little-endian magnitude
/// bytes, which keeps the format free of any bignum library detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageSchema {
    /// 8-bit counters.
    U8 {
        /// Raw cells.
        cells: Vec<u8>,
    },
    /// 16-bit counters.
    U16 {
        /// Raw cells.
        cells: Vec<u16>,
    },
    /// 32-bit counters.
    U32 {
        /// Raw cells.
        cells: Vec<u32>,
    },
    /// 64-bit counters.
    U64 {
        /// Raw cells.
        cells: Vec<u64>,
    },
    /// Arbitrary-precision counters as little-endian magnitude bytes.
    Big {
        /// Raw cells.
        cells: Vec<Vec<u8>>,
    },
    /// Weighted planes.
    Weighted {
        /// The `Σw` plane.
        sumw: Vec<f64>,
        /// The `Σw²` plane.
        sumw2: Vec<f64>,
    },
}

/// Complete logical state of a histogram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramSchema {
    /// Axes in order, tagged by kind.
    pub axes: Vec<Axis>,
    /// Cell storage tagged by state.
    pub storage: StorageSchema,
}

impl From<&Histogram> for HistogramSchema {
    fn from(hist: &Histogram) -> Self {
        let storage = match hist.storage() {
            Storage::Counts(CountBuffer::U8(b)) => StorageSchema::U8 { cells: b.clone() },
            Storage::Counts(CountBuffer::U16(b)) => StorageSchema::U16 { cells: b.clone() },
            Storage::Counts(CountBuffer::U32(b)) => StorageSchema::U32 { cells: b.clone() },
            Storage::Counts(CountBuffer::U64(b)) => StorageSchema::U64 { cells: b.clone() },
            Storage::Counts(CountBuffer::Big(b)) => StorageSchema::Big {
                cells: b.iter().map(BigUint::to_bytes_le).collect(),
            },
            Storage::Weighted(b) => StorageSchema::Weighted {
                sumw: b.sumw().to_vec(),
                sumw2: b.sumw2().to_vec(),
            },
        };
        Self {
            axes: hist.axes().to_vec(),
            storage,
        }
    }
}

impl HistogramSchema {
    /// Validate the schema and rebuild the runtime histogram.
    pub fn into_histogram(self) -> Result<Histogram, Error> {
        let storage = match self.storage {
            StorageSchema::U8 { cells } => Storage::Counts(CountBuffer::U8(cells)),
            StorageSchema::U16 { cells } => Storage::Counts(CountBuffer::U16(cells)),
            StorageSchema::U32 { cells } => Storage::Counts(CountBuffer::U32(cells)),
            StorageSchema::U64 { cells } => Storage::Counts(CountBuffer::U64(cells)),
            StorageSchema::Big { cells } => Storage::Counts(CountBuffer::from_big(
                cells
                    .iter()
                    .map(|bytes| BigUint::from_bytes_le(bytes))
                    .collect(),
            )),
            StorageSchema::Weighted { sumw, sumw2 } => {
                if sumw.len() != sumw2.len() {
                    return Err(Error::LengthMismatch {
                        expected: sumw.len(),
                        got: sumw2.len(),
                    });
                }
                Storage::Weighted(WeightedBuffer::from_planes(sumw, sumw2))
            }
        };
        Histogram::from_parts(self.axes, storage)
    }
}
