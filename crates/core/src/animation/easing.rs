use serde::{Deserialize, Serialize};

/// Curve applied to the normalised progress of a fixed-duration transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Quadratic ease-in-out; the default for timed transitions
    #[default]
    EaseInOutQuad,
    /// Cubic ease-in-out; used for the pie reveal
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` to eased progress. Input is clamped to `0..=1`
    /// and both ends are fixed points.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
