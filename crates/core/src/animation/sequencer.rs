use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::watch;

use super::timeline::{Animation, Curve};

/// Default delay between consecutive items starting.
pub const DEFAULT_STAGGER_MS: u64 = 100;

/// Per-item start offsets: item `n` waits `n * per_item` before moving, so
/// a collection reveals left-to-right (or clockwise) instead of all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    pub per_item: Duration,
}

impl Default for Stagger {
    fn default() -> Self {
        Self::from_millis(DEFAULT_STAGGER_MS)
    }
}

impl Stagger {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            per_item: Duration::from_millis(ms),
        }
    }

    #[must_use]
    pub fn delay_for(&self, index: usize) -> Duration {
        self.per_item
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

/// A published set of per-item animations, one per bar or slice.
pub type Track = Arc<[Animation]>;

/// Drives one animated scalar per item of a collection.
///
/// Each trigger builds a fresh set of transitions, all starting from the
/// same rest value, staggered by index, and publishes it as one immutable
/// snapshot. Subscribers sample the latest snapshot at render time.
#[derive(Debug)]
pub struct Sequencer {
    rest_value: f64,
    curve: Curve,
    stagger: Stagger,
    tx: watch::Sender<Track>,
}

impl Sequencer {
    pub fn new(rest_value: f64, curve: Curve, stagger: Stagger) -> Self {
        let (tx, _rx) = watch::channel(Track::from(Vec::new()));
        Self {
            rest_value,
            curve,
            stagger,
            tx,
        }
    }

    /// Start (or re-start) every item toward its target. Items already in
    /// flight are reset to the rest value first; nothing cross-fades.
    pub fn trigger(&self, targets: &[f64], now: Instant) -> Track {
        let track: Track = targets
            .iter()
            .enumerate()
            .map(|(i, &target)| {
                Animation::start(self.rest_value, target, self.curve, now)
                    .with_delay(self.stagger.delay_for(i))
            })
            .collect();
        debug!(
            "sequencer: triggered {} item(s), stagger {:?}",
            track.len(),
            self.stagger.per_item
        );
        self.tx.send_replace(track.clone());
        track
    }

    /// Hold every item at its target with no transition.
    pub fn settle(&self, targets: &[f64]) -> Track {
        let track: Track = targets.iter().map(|&t| Animation::fixed(t)).collect();
        self.tx.send_replace(track.clone());
        track
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn current(&self) -> Track {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Track> {
        self.tx.subscribe()
    }

    /// Sample every item at `now`.
    #[must_use]
    pub fn values_at(&self, now: Instant) -> Vec<f64> {
        self.current().iter().map(|a| a.value_at(now)).collect()
    }

    /// True once every item has reached its target.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.current().iter().all(|a| a.is_finished(now))
    }

    #[must_use]
    pub fn stagger(&self) -> Stagger {
        self.stagger
    }
}
