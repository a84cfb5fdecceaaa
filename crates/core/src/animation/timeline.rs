use std::time::{Duration, Instant};

use super::easing::Easing;
use super::spring::SpringConfig;

/// How a value travels from its start to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    /// Reaches the target after exactly `duration`, shaped by `easing`
    Timing { duration: Duration, easing: Easing },
    /// Follows a damped spring released from rest; may overshoot
    Spring(SpringConfig),
}

impl Curve {
    pub fn timing(duration_ms: u64, easing: Easing) -> Self {
        Curve::Timing {
            duration: Duration::from_millis(duration_ms),
            easing,
        }
    }
}

/// A single scalar transition, evaluated from wall-clock time.
///
/// `Animation` is `Copy` and holds no handles: "publishing" an animation is
/// publishing this value, and any reader can sample it at any instant.
/// Starting a new transition replaces the descriptor wholesale; there is no
/// blending between an old and a new transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: f64,
    to: f64,
    curve: Curve,
    started_at: Option<Instant>,
    delay: Duration,
}

impl Animation {
    /// A value at rest; sampling always returns `value`.
    pub fn fixed(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            curve: Curve::timing(0, Easing::Linear),
            started_at: None,
            delay: Duration::ZERO,
        }
    }

    /// A transition from `from` to `to` beginning at `now`.
    pub fn start(from: f64, to: f64, curve: Curve, now: Instant) -> Self {
        Self {
            from,
            to,
            curve,
            started_at: Some(now),
            delay: Duration::ZERO,
        }
    }

    /// Hold at the start value for `delay` before moving.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn from_value(&self) -> f64 {
        self.from
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Time spent moving at `now`; zero while still inside the delay.
    fn elapsed(&self, now: Instant) -> Option<Duration> {
        let started_at = self.started_at?;
        Some(now.saturating_duration_since(started_at).saturating_sub(self.delay))
    }

    /// The value at `now`.
    #[must_use]
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(elapsed) = self.elapsed(now) else {
            return self.to;
        };
        match self.curve {
            Curve::Timing { duration, easing } => {
                if duration.is_zero() {
                    return if self.is_delayed(now) {
                        self.from
                    } else {
                        self.to
                    };
                }
                let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                if t >= 1.0 {
                    self.to
                } else {
                    self.from + (self.to - self.from) * easing.apply(t)
                }
            }
            Curve::Spring(spring) => {
                let state = spring.state_at(self.from - self.to, 0.0, elapsed.as_secs_f64());
                if spring.is_at_rest(state) {
                    self.to
                } else {
                    self.to + state.displacement
                }
            }
        }
    }

    /// Normalised progress at `now`: 0 at the start value, 1 at the target.
    /// Springs may report values above 1 while overshooting.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f64 {
        let span = self.to - self.from;
        if span.abs() < f64::EPSILON {
            return if self.is_finished(now) { 1.0 } else { 0.0 };
        }
        (self.value_at(now) - self.from) / span
    }

    fn is_delayed(&self, now: Instant) -> bool {
        match self.started_at {
            Some(started_at) => now.saturating_duration_since(started_at) < self.delay,
            None => false,
        }
    }

    /// Whether the value has reached (and, for springs, settled at) its target.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        let Some(elapsed) = self.elapsed(now) else {
            return true;
        };
        if self.is_delayed(now) {
            return false;
        }
        match self.curve {
            Curve::Timing { duration, .. } => elapsed >= duration,
            Curve::Spring(spring) => {
                spring.is_at_rest(spring.state_at(self.from - self.to, 0.0, elapsed.as_secs_f64()))
            }
        }
    }

    /// Re-run from an explicit start value. The value at `now` is `from`,
    /// whatever the previous transition was doing.
    pub fn restart(&mut self, from: f64, to: f64, now: Instant) {
        self.from = from;
        self.to = to;
        self.started_at = Some(now);
    }

    /// Head for a new target starting from wherever the value is at `now`.
    /// Progress resets to zero; the value does not jump.
    pub fn retarget(&mut self, to: f64, now: Instant) {
        let current = self.value_at(now);
        self.restart(current, to, now);
    }

    /// Snap to `value` and stop.
    pub fn set_immediately(&mut self, value: f64) {
        self.from = value;
        self.to = value;
        self.started_at = None;
    }
}
