//! Response curves: shaped mappings from a normalized input to a factor.

use serde::{Deserialize, Serialize};

/// Maps a normalized input in [0, 1] to a factor in [0, 1].
///
/// Every variant clamps its output, so a badly-parameterized curve can
/// distort a score but never push it negative or past the consideration's
/// weight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum ResponseCurve {
    /// `slope * x + intercept`.
    Linear { slope: f32, intercept: f32 },

    /// `x ^ exponent`.  An exponent of 2 is the classic quadratic.
    Power { exponent: f32 },

    /// `1 / (1 + e^(-steepness * (x - midpoint)))`.
    Logistic { steepness: f32, midpoint: f32 },

    /// `1 - x`.
    Inverse,

    /// 1 at or above `threshold`, else 0.
    Step { threshold: f32 },
}

impl ResponseCurve {
    pub const QUADRATIC: ResponseCurve = ResponseCurve::Power { exponent: 2.0 };

    pub fn evaluate(self, x: f32) -> f32 {
        let y = match self {
            ResponseCurve::Linear { slope, intercept } => slope * x + intercept,
            ResponseCurve::Power { exponent } => x.max(0.0).powf(exponent),
            ResponseCurve::Logistic { steepness, midpoint } => {
                1.0 / (1.0 + (-steepness * (x - midpoint)).exp())
            }
            ResponseCurve::Inverse => 1.0 - x,
            ResponseCurve::Step { threshold } => {
                if x >= threshold { 1.0 } else { 0.0 }
            }
        };
        if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) }
    }

    /// Build a curve from a name and up to two numeric parameters, as found
    /// in flat files.  An empty name means "no curve".
    ///
    /// | Name        | `a`                 | `b`                 |
    /// |-------------|---------------------|---------------------|
    /// | `linear`    | slope (1.0)         | intercept (0.0)     |
    /// | `quadratic` | —                   | —                   |
    /// | `power`     | exponent (required) | —                   |
    /// | `logistic`  | steepness (10.0)    | midpoint (0.5)      |
    /// | `inverse`   | —                   | —                   |
    /// | `step`      | threshold (0.5)     | —                   |
    pub fn from_parts(name: &str, a: Option<f32>, b: Option<f32>) -> Result<Option<Self>, String> {
        let curve = match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "identity" => return Ok(None),
            "linear" => ResponseCurve::Linear {
                slope:     a.unwrap_or(1.0),
                intercept: b.unwrap_or(0.0),
            },
            "quadratic" => ResponseCurve::QUADRATIC,
            "power" => ResponseCurve::Power {
                exponent: a.ok_or("power curve needs an exponent")?,
            },
            "logistic" => ResponseCurve::Logistic {
                steepness: a.unwrap_or(10.0),
                midpoint:  b.unwrap_or(0.5),
            },
            "inverse" => ResponseCurve::Inverse,
            "step" => ResponseCurve::Step { threshold: a.unwrap_or(0.5) },
            other => return Err(format!("unknown response curve {other:?}")),
        };
        Ok(Some(curve))
    }
}
