//! Shared error type for axis construction and histogram operations.

use thiserror::Error;

/// Errors produced by axis constructors and histogram operations.
///
/// Serialization has its own error types in [`crate::persist`].
#[derive(Debug, Error)]
pub enum Error {
    /// An axis was asked for zero bins.
    #[error("axis needs at least one bin")]
    EmptyAxis,

    /// Axis bounds are reversed, equal, or not finite.
    #[error("invalid axis bounds: lo={lo}, hi={hi} (need finite lo < hi)")]
    InvalidBounds { lo: f64, hi: f64 },

    /// A transform maps the axis bounds onto a degenerate or non-finite range.
    #[error("transform {transform} is undefined or degenerate on [{lo}, {hi}]")]
    InvalidTransform {
        transform: &'static str,
        lo: f64,
        hi: f64,
    },

    /// A power transform was given a non-finite or zero exponent.
    #[error("invalid power transform exponent: {0}")]
    InvalidExponent(f64),

    /// A variable axis needs at least two edges.
    #[error("variable axis needs at least two edges, got {0}")]
    TooFewEdges(usize),

    /// Variable axis edges must be finite and strictly monotonic.
    #[error("variable axis edges must be finite and strictly monotonic")]
    NonMonotonicEdges,

    /// A category axis was given no values.
    #[error("category axis needs at least one value")]
    EmptyCategories,

    /// A category axis was given the same value twice.
    #[error("duplicate category value: {0}")]
    DuplicateCategory(i64),

    /// Too many axes for one histogram.
    #[error("too many axes: {got} exceeds the maximum of {max}")]
    TooManyAxes { max: usize, got: usize },

    /// The number of sample coordinates does not match the histogram
    /// dimension.
    #[error("dimension mismatch: histogram has {expected} axes, got {got} coordinates")]
    DimensionMismatch { expected: usize, got: usize },

    /// A read used a bin index outside the physical range of an axis.
    #[error("bin index {index} is out of range for axis {axis}")]
    IndexOutOfRange { axis: usize, index: i32 },

    /// An axis lookup was outside `[-dim, dim)`.
    #[error("axis index {index} is out of range for a {dim}-dimensional histogram")]
    AxisOutOfRange { dim: usize, index: isize },

    /// Two histograms with different axes cannot be combined.
    #[error("histograms have incompatible axes")]
    AxesMismatch,

    /// Batch columns or weights disagree on the number of samples.
    #[error("length mismatch: expected {expected} samples, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Scale factors must be non-negative.
    #[error("scale factor must be non-negative, got {0}")]
    InvalidScale(f64),

    /// An axis selection for reduction was empty, unordered, or repeated.
    #[error("axis selection must be non-empty, strictly increasing, and in range")]
    InvalidSelection,
}

/// Result type alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
