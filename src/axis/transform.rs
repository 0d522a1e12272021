//! Coordinate transforms for regular axes.

use serde::{Deserialize, Serialize};

/// Monotonic coordinate transform applied by a regular axis.
///
/// Bins are equally spaced in the transformed coordinate. `Log`, `Sqrt`
/// and `Cos` are partial: inputs outside their domain map to NaN and the
/// axis treats the sample as underflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// No transform; bins are equally spaced in the input coordinate.
    Identity,
    /// Natural logarithm; bins are equally spaced in `ln(x)`.
    Log,
    /// Square root; bins are equally spaced in `sqrt(x)`.
    Sqrt,
    /// Cosine; bins are equally spaced in `cos(x)`.
    Cos,
    /// Power; bins are equally spaced in `x^exponent`.
    Pow { exponent: f64 },
}

impl Transform {
    /// Map an input value into the transformed coordinate.
    #[inline]
    pub fn forward(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Log => x.ln(),
            Self::Sqrt => x.sqrt(),
            Self::Cos => x.cos(),
            Self::Pow { exponent } => x.powf(exponent),
        }
    }

    /// Map a transformed coordinate back into the input space.
    #[inline]
    pub fn inverse(self, t: f64) -> f64 {
        match self {
            Self::Identity => t,
            Self::Log => t.exp(),
            Self::Sqrt => t * t,
            Self::Cos => t.acos(),
            Self::Pow { exponent } => t.powf(1.0 / exponent),
        }
    }

    /// Constructor-style name used by the reproducible text form.
    pub(crate) fn repr_name(self) -> &'static str {
        match self {
            Self::Identity => "regular",
            Self::Log => "regular_log",
            Self::Sqrt => "regular_sqrt",
            Self::Cos => "regular_cos",
            Self::Pow { .. } => "regular_pow",
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::Identity
    }
}
