use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace};
use tokio::sync::{mpsc, watch};

use super::gesture::GestureEvent;
use crate::animation::easing::Easing;
use crate::animation::timeline::{Animation, Curve};
use crate::models::config::LineChartStyle;
use crate::models::data_point::{finite_or_zero, DataPoint};
use crate::models::geometry::ChartPoint;
use crate::models::selection::SelectionState;

/// A published, immutable selection. Replaced wholesale on every change.
pub type SelectionSnapshot = Arc<SelectionState>;

/// Called with the new point on every selection change, and with `None`
/// when the gesture ends.
pub type PointSelectedCallback = Box<dyn FnMut(Option<&DataPoint>) + Send>;

/// The series a tracker resolves gestures against: the data and its
/// on-screen projection, index for index.
#[derive(Debug, Clone)]
pub struct TrackedSeries {
    pub data: Arc<[DataPoint]>,
    pub points: Arc<[ChartPoint]>,
}

/// Indicator scale while idle; it grows to 1 when a touch starts.
const IDLE_INDICATOR_SCALE: f64 = 0.5;

/// Index of the point horizontally closest to `x`.
///
/// Plain linear scan: series are bounded by the visible period (a few hundred
/// points at most). On ties the earlier point wins.
#[must_use]
pub fn nearest_index(points: &[ChartPoint], x: f64) -> Option<usize> {
    let x = finite_or_zero(x);
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        let distance = (x - point.x).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// The point horizontally closest to `x`, see [`nearest_index`].
#[must_use]
pub fn nearest_point(points: &[ChartPoint], x: f64) -> Option<&ChartPoint> {
    nearest_index(points, x).map(|i| &points[i])
}

/// Timings for the floating scrub indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorTiming {
    /// Curve the indicator follows toward a newly selected point
    pub settle: Curve,
    /// Curve for fading/scaling in and out
    pub fade: Curve,
}

impl IndicatorTiming {
    pub fn from_style(style: &LineChartStyle) -> Self {
        Self {
            settle: Curve::timing(style.pointer_settle_ms, Easing::EaseInOutQuad),
            fade: Curve::timing(style.indicator_fade_ms, Easing::EaseInOutQuad),
        }
    }
}

impl Default for IndicatorTiming {
    fn default() -> Self {
        Self::from_style(&LineChartStyle::default())
    }
}

/// Animated position, opacity and scale of the scrub indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorMotion {
    pub x: Animation,
    pub y: Animation,
    pub opacity: Animation,
    pub scale: Animation,
}

impl Default for IndicatorMotion {
    fn default() -> Self {
        Self {
            x: Animation::fixed(0.0),
            y: Animation::fixed(0.0),
            opacity: Animation::fixed(0.0),
            scale: Animation::fixed(IDLE_INDICATOR_SCALE),
        }
    }
}

/// The indicator sampled at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSample {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl IndicatorMotion {
    #[must_use]
    pub fn sample(&self, now: Instant) -> IndicatorSample {
        IndicatorSample {
            x: self.x.value_at(now),
            y: self.y.value_at(now),
            opacity: self.opacity.value_at(now).clamp(0.0, 1.0),
            scale: self.scale.value_at(now),
        }
    }
}

/// Turns a pointer stream into a nearest-point selection.
///
/// The tracker owns the only writers of the selection and indicator
/// channels. It can be driven inline with [`TouchTracker::handle`] or moved
/// onto its own task with [`TouchTracker::run`]; readers hold
/// `watch::Receiver`s and always see a complete snapshot.
pub struct TouchTracker {
    data: Arc<[DataPoint]>,
    points: Arc<[ChartPoint]>,
    series_rx: watch::Receiver<TrackedSeries>,
    timing: IndicatorTiming,
    selection_tx: watch::Sender<SelectionSnapshot>,
    indicator_tx: watch::Sender<IndicatorMotion>,
    on_point_selected: Option<PointSelectedCallback>,
    active: bool,
}

impl std::fmt::Debug for TouchTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchTracker")
            .field("points", &self.points.len())
            .field("active", &self.active)
            .field("selection", &*self.selection_tx.borrow())
            .field("has_callback", &self.on_point_selected.is_some())
            .finish()
    }
}

impl TouchTracker {
    /// `points` must be the projection of `data`, index for index.
    pub fn new(
        data: Arc<[DataPoint]>,
        points: Arc<[ChartPoint]>,
        timing: IndicatorTiming,
    ) -> Self {
        let (_, series_rx) = watch::channel(TrackedSeries { data, points });
        Self::with_series_feed(series_rx, timing)
    }

    /// Track whatever series is published on `series_rx`. A newly published
    /// series is picked up before the next gesture is handled.
    pub fn with_series_feed(
        mut series_rx: watch::Receiver<TrackedSeries>,
        timing: IndicatorTiming,
    ) -> Self {
        let TrackedSeries { data, points } = series_rx.borrow_and_update().clone();
        let (selection_tx, _) = watch::channel(Arc::new(SelectionState::cleared()));
        let (indicator_tx, _) = watch::channel(IndicatorMotion::default());
        Self {
            data,
            points,
            series_rx,
            timing,
            selection_tx,
            indicator_tx,
            on_point_selected: None,
            active: false,
        }
    }

    #[must_use]
    pub fn with_callback(
        mut self,
        callback: impl FnMut(Option<&DataPoint>) + Send + 'static,
    ) -> Self {
        self.on_point_selected = Some(Box::new(callback));
        self
    }

    pub fn set_callback(&mut self, callback: Option<PointSelectedCallback>) {
        self.on_point_selected = callback;
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionSnapshot> {
        self.selection_tx.subscribe()
    }

    pub fn subscribe_indicator(&self) -> watch::Receiver<IndicatorMotion> {
        self.indicator_tx.subscribe()
    }

    #[must_use]
    pub fn selection(&self) -> SelectionSnapshot {
        self.selection_tx.borrow().clone()
    }

    #[must_use]
    pub fn indicator(&self) -> IndicatorMotion {
        *self.indicator_tx.borrow()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Swap in a new series. Any selection is dropped without a callback:
    /// the old point no longer exists.
    pub fn replace_series(&mut self, data: Arc<[DataPoint]>, points: Arc<[ChartPoint]>) {
        self.data = data;
        self.points = points;
        self.active = false;
        self.selection_tx
            .send_replace(Arc::new(SelectionState::cleared()));
        self.indicator_tx.send_replace(IndicatorMotion::default());
    }

    /// Re-seat on the latest published series if it changed since the last
    /// call. Returns whether a new series was picked up.
    pub fn sync_series(&mut self) -> bool {
        if !matches!(self.series_rx.has_changed(), Ok(true)) {
            return false;
        }
        let TrackedSeries { data, points } = self.series_rx.borrow_and_update().clone();
        debug!("touch: series replaced, {} point(s)", points.len());
        self.replace_series(data, points);
        true
    }

    /// Process one gesture message. Returns whether the selection changed.
    pub fn handle(&mut self, event: GestureEvent, now: Instant) -> bool {
        self.sync_series();
        match event {
            GestureEvent::Begin { x, .. } => {
                let was_active = self.active;
                self.active = true;
                self.select_nearest(x, now, !was_active)
            }
            GestureEvent::Move { x, .. } => {
                if !self.active {
                    // a move without a begin still starts tracking
                    self.active = true;
                    return self.select_nearest(x, now, true);
                }
                self.select_nearest(x, now, false)
            }
            GestureEvent::End => self.end(now),
        }
    }

    fn select_nearest(&mut self, x: f64, now: Instant, entering: bool) -> bool {
        let Some(index) = nearest_index(&self.points, x) else {
            trace!("touch: no points to select at x={x}");
            return false;
        };
        let point = &self.points[index];
        let (px, py) = (point.x, point.y);

        let mut motion = self.indicator();
        if entering {
            motion.x.set_immediately(px);
            motion.y.set_immediately(py);
            motion.opacity = Animation::start(motion.opacity.value_at(now), 1.0, self.timing.fade, now);
            motion.scale = Animation::start(motion.scale.value_at(now), 1.0, self.timing.fade, now);
        } else if motion.x.target() != px || motion.y.target() != py {
            motion.x = Animation::start(motion.x.value_at(now), px, self.timing.settle, now);
            motion.y = Animation::start(motion.y.value_at(now), py, self.timing.settle, now);
        }
        self.indicator_tx.send_replace(motion);

        if self.selection_tx.borrow().index == Some(index) {
            return false;
        }

        let Some(data_point) = self.data.get(index).cloned() else {
            return false;
        };
        debug!("touch: selected point {index} ({}) at x={px:.1}", data_point.date);
        let snapshot = Arc::new(SelectionState::selected(data_point, index, px, py));
        self.selection_tx.send_replace(snapshot.clone());
        if let Some(callback) = self.on_point_selected.as_mut() {
            callback(snapshot.nearest_point.as_ref());
        }
        true
    }

    fn end(&mut self, now: Instant) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;

        let mut motion = self.indicator();
        motion.opacity = Animation::start(motion.opacity.value_at(now), 0.0, self.timing.fade, now);
        motion.scale = Animation::start(
            motion.scale.value_at(now),
            IDLE_INDICATOR_SCALE,
            self.timing.fade,
            now,
        );
        self.indicator_tx.send_replace(motion);

        debug!("touch: gesture ended, selection cleared");
        let previous = self
            .selection_tx
            .send_replace(Arc::new(SelectionState::cleared()));
        if let Some(callback) = self.on_point_selected.as_mut() {
            callback(None);
        }
        previous.is_active()
    }

    /// Drain gesture messages until every sender is dropped, stamping each
    /// with the time it is received. Hands the tracker back at the end.
    pub async fn run(mut self, mut events: mpsc::Receiver<GestureEvent>) -> Self {
        while let Some(event) = events.recv().await {
            self.handle(event, Instant::now());
        }
        debug!("touch: input stream closed");
        self
    }
}
