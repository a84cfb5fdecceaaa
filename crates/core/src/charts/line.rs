use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::models::config::LineChartStyle;
use crate::models::data_point::DataPoint;
use crate::models::geometry::{ChartPoint, ComputedPath};
use crate::models::selection::SelectionState;
use crate::services::geometry::build_line_path;
use crate::touch::gesture::GestureEvent;
use crate::touch::tracker::{
    IndicatorMotion, IndicatorSample, IndicatorTiming, SelectionSnapshot, TouchTracker,
    TrackedSeries,
};

/// Vertical guide line drawn through the selected point.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
    pub width: f64,
    pub opacity: f64,
}

/// Round marker floating over the selected point.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub opacity: f64,
    pub scale: f64,
    pub color: String,
}

/// Everything needed to draw the line chart for one frame.
#[derive(Debug, Clone)]
pub struct LineChartFrame {
    pub width: f64,
    pub height: f64,
    pub stroke_svg: String,
    pub fill_svg: String,
    pub line_color: String,
    pub stroke_width: f64,
    pub gradient_colors: Vec<String>,
    pub guide: GuideLine,
    pub indicator: IndicatorFrame,
    pub selection: SelectionSnapshot,
}

/// NAV line chart with touch scrubbing.
///
/// Geometry is rebuilt only when the data or style is replaced. The touch
/// tracker may be taken out and driven from an input task; the chart keeps
/// its receivers and renders from whatever was last published. Rebuilt
/// geometry is published to the tracker, wherever it runs, and a selection
/// made against an older series reads as cleared until the tracker catches up.
#[derive(Debug)]
pub struct LineChart {
    data: Arc<[DataPoint]>,
    style: LineChartStyle,
    geometry: ComputedPath,
    tracker: Option<TouchTracker>,
    series_tx: watch::Sender<TrackedSeries>,
    selection_rx: watch::Receiver<SelectionSnapshot>,
    indicator_rx: watch::Receiver<IndicatorMotion>,
}

impl LineChart {
    pub fn new(data: Vec<DataPoint>, style: LineChartStyle) -> Self {
        let style = sanitize(style);
        let data: Arc<[DataPoint]> = data.into();
        let geometry = build_line_path(&data, &style.chart);
        let points: Arc<[ChartPoint]> = geometry.points.clone().into();
        let (series_tx, series_rx) = watch::channel(TrackedSeries {
            data: data.clone(),
            points,
        });
        let tracker =
            TouchTracker::with_series_feed(series_rx, IndicatorTiming::from_style(&style));
        let selection_rx = tracker.subscribe();
        let indicator_rx = tracker.subscribe_indicator();
        Self {
            data,
            style,
            geometry,
            tracker: Some(tracker),
            series_tx,
            selection_rx,
            indicator_rx,
        }
    }

    /// Register the selection callback.
    #[must_use]
    pub fn on_point_selected(
        mut self,
        callback: impl FnMut(Option<&DataPoint>) + Send + 'static,
    ) -> Self {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.set_callback(Some(Box::new(callback)));
        }
        self
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    #[must_use]
    pub fn style(&self) -> &LineChartStyle {
        &self.style
    }

    #[must_use]
    pub fn geometry(&self) -> &ComputedPath {
        &self.geometry
    }

    /// Replace the series. Geometry is rebuilt and any selection dropped.
    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data.into();
        self.rebuild();
    }

    /// Replace the style. Geometry is rebuilt and any selection dropped.
    pub fn set_style(&mut self, style: LineChartStyle) {
        self.style = sanitize(style);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.geometry = build_line_path(&self.data, &self.style.chart);
        let points: Arc<[ChartPoint]> = self.geometry.points.clone().into();
        self.series_tx.send_replace(TrackedSeries {
            data: self.data.clone(),
            points,
        });
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.sync_series();
        }
    }

    /// Whether `selection` was made against the series currently drawn.
    fn is_current(&self, selection: &SelectionState) -> bool {
        match (selection.index, selection.nearest_point.as_ref()) {
            (Some(i), Some(point)) => {
                self.data.get(i) == Some(point)
                    && self.geometry.points.get(i).map(|p| (p.x, p.y))
                        == Some((selection.screen_x, selection.screen_y))
            }
            _ => true,
        }
    }

    /// Feed a gesture message to the tracker, if the chart still owns it.
    /// Returns whether the selection changed.
    pub fn handle_gesture(&mut self, event: GestureEvent, now: Instant) -> bool {
        match self.tracker.as_mut() {
            Some(tracker) => tracker.handle(event, now),
            None => false,
        }
    }

    /// Move the tracker out, e.g. onto a dedicated input task. The chart
    /// keeps rendering from the tracker's published snapshots.
    pub fn take_tracker(&mut self) -> Option<TouchTracker> {
        self.tracker.take()
    }

    /// The latest published selection, or a cleared one if it belongs to a
    /// series that has since been replaced.
    #[must_use]
    pub fn selection(&self) -> SelectionSnapshot {
        let snapshot = self.selection_rx.borrow().clone();
        if self.is_current(&snapshot) {
            snapshot
        } else {
            Arc::new(SelectionState::cleared())
        }
    }

    /// The selected point, or the most recent one when nothing is selected.
    #[must_use]
    pub fn display_point(&self) -> Option<DataPoint> {
        self.selection()
            .nearest_point
            .clone()
            .or_else(|| self.data.last().cloned())
    }

    /// Describe the chart at `now`. `None` for an empty series.
    #[must_use]
    pub fn render(&self, now: Instant) -> Option<LineChartFrame> {
        if self.geometry.is_empty() {
            return None;
        }
        let chart = &self.style.chart;
        let published = self.selection_rx.borrow().clone();
        let (selection, motion) = if self.is_current(&published) {
            (published, *self.indicator_rx.borrow())
        } else {
            (
                Arc::new(SelectionState::cleared()),
                IndicatorMotion::default(),
            )
        };
        let IndicatorSample {
            x,
            y,
            opacity,
            scale,
        } = motion.sample(now);
        let color = chart.primary_color().to_string();

        Some(LineChartFrame {
            width: chart.width,
            height: chart.height,
            stroke_svg: self.geometry.stroke_svg(),
            fill_svg: self.geometry.fill_svg(),
            line_color: color.clone(),
            stroke_width: chart.stroke_width,
            gradient_colors: self.style.gradient_colors.clone(),
            guide: GuideLine {
                x,
                top: 0.0,
                bottom: chart.height,
                width: self.style.guide_line_width,
                opacity,
            },
            indicator: IndicatorFrame {
                center_x: x,
                center_y: y,
                radius: self.style.indicator_radius,
                opacity,
                scale,
                color,
            },
            selection,
        })
    }
}

fn sanitize(mut style: LineChartStyle) -> LineChartStyle {
    style.chart = style.chart.sanitized();
    style
}
