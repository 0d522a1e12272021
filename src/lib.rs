//! ndhist: N-dimensional histograms for Rust.
//!
//! A histogram is a fixed tuple of axes plus a flat cell array. Each
//! axis maps a scalar to a signed bin index; the index engine folds the
//! per-axis indices into one storage offset. Cells start as 8-bit
//! counters and widen automatically up to arbitrary precision; weighted
//! fills switch the storage to `(Σw, Σw²)` accumulators.
//!
//! # Key Types
//!
//! - [`Histogram`] - fill, read, combine, and reduce
//! - [`Axis`] and its kinds ([`RegularAxis`], [`CircularAxis`],
//!   [`VariableAxis`], [`IntegerAxis`], [`CategoryAxis`])
//! - [`StorageState`] / [`StorageView`] - observe the adaptive storage
//! - [`persist`] - binary and JSON round-trips
//!
//! # Example
//!
//! ```
//! use ndhist::{Histogram, IntegerAxis, RegularAxis};
//!
//! let mut h = Histogram::new(vec![
//!     IntegerAxis::new(0, 2).unwrap().into(),
//!     RegularAxis::new(4, -2.0, 2.0).unwrap().into(),
//! ])
//! .unwrap();
//!
//! h.fill(&[0.0, -1.5]).unwrap();
//! h.fill_weight(&[1.0, 0.5], 2.0).unwrap();
//!
//! assert_eq!(h.value(&[0, 0]).unwrap(), 1.0);
//! assert_eq!(h.value(&[1, 2]).unwrap(), 2.0);
//! assert_eq!(h.variance(&[1, 2]).unwrap(), 4.0);
//! ```

pub mod axis;
pub mod error;
pub mod histogram;
mod indexing;
pub mod persist;
pub mod storage;

#[cfg(feature = "ndarray")]
mod interop;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use axis::{
    Axis, BinInterval, CategoryAxis, CircularAxis, IntegerAxis, RegularAxis, Transform,
    VariableAxis,
};
pub use error::{Error, Result};
pub use histogram::{Column, Histogram};
pub use indexing::MAX_AXES;
pub use storage::{CountBuffer, CountWidth, Storage, StorageState, StorageView, WeightedBuffer};

#[cfg(feature = "ndarray")]
pub use interop::CountsView;
