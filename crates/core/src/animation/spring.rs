use serde::{Deserialize, Serialize};

/// Damped harmonic oscillator parameters.
///
/// The defaults (damping 15, stiffness 70, mass 1) are slightly
/// under-damped: a bar overshoots its target a little and settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,

    /// Below this distance from the target (and the speed threshold) the
    /// spring is considered settled
    pub rest_displacement_threshold: f64,

    /// Below this speed (and the displacement threshold) the spring is
    /// considered settled, in units per second
    pub rest_speed_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 15.0,
            stiffness: 70.0,
            mass: 1.0,
            rest_displacement_threshold: 0.01,
            rest_speed_threshold: 2.0,
        }
    }
}

/// Displacement from the target and velocity at a sampled time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub displacement: f64,
    pub velocity: f64,
}

impl SpringConfig {
    /// Damping ratio ζ. Below 1 the spring overshoots.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency ω₀ in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    fn is_degenerate(&self) -> bool {
        !(self.stiffness.is_finite()
            && self.mass.is_finite()
            && self.damping.is_finite()
            && self.stiffness > 0.0
            && self.mass > 0.0
            && self.damping >= 0.0)
    }

    /// Closed-form solution of `m·x'' + c·x' + k·x = 0` at `t` seconds,
    /// starting `x0` away from the target with velocity `v0`.
    ///
    /// Evaluated directly from elapsed time so the result does not depend on
    /// how often it is sampled. Degenerate parameters settle immediately.
    #[must_use]
    pub fn state_at(&self, x0: f64, v0: f64, t: f64) -> SpringState {
        if self.is_degenerate() {
            return SpringState {
                displacement: 0.0,
                velocity: 0.0,
            };
        }
        let t = t.max(0.0);
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            // critically damped
            let b = v0 + w0 * x0;
            let env = (-w0 * t).exp();
            SpringState {
                displacement: (x0 + b * t) * env,
                velocity: (b - w0 * (x0 + b * t)) * env,
            }
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let a = x0;
            let b = (v0 + zeta * w0 * x0) / wd;
            let env = (-zeta * w0 * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let x = env * (a * cos + b * sin);
            SpringState {
                displacement: x,
                velocity: -zeta * w0 * x + env * (-a * wd * sin + b * wd * cos),
            }
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            SpringState {
                displacement: c1 * e1 + c2 * e2,
                velocity: c1 * r1 * e1 + c2 * r2 * e2,
            }
        }
    }

    #[must_use]
    pub fn is_at_rest(&self, state: SpringState) -> bool {
        state.displacement.abs() < self.rest_displacement_threshold
            && state.velocity.abs() < self.rest_speed_threshold
    }
}
