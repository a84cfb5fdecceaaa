use chrono::NaiveDate;
use kurbo::{BezPath, Shape};
use serde::{Deserialize, Serialize};

/// Accuracy used when measuring path arc length.
const LENGTH_ACCURACY: f64 = 1e-3;

/// A data point projected into screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Position of the source point in the input sequence
    pub index: usize,

    pub x: f64,
    pub y: f64,

    /// The source value and date, kept so a hit can be mapped back
    pub value: f64,
    pub date: NaiveDate,
}

impl ChartPoint {
    #[must_use]
    pub fn position(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

/// The drawable projection of a line series: screen points, the smoothed
/// stroke through them, and the closed area under the stroke.
///
/// Never mutated once built; a new input produces a new value.
#[derive(Debug, Clone, Default)]
pub struct ComputedPath {
    pub points: Vec<ChartPoint>,
    pub stroke: BezPath,
    pub fill: BezPath,
}

impl ComputedPath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Arc length of the stroke. Zero for empty and single-point series.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.stroke.perimeter(LENGTH_ACCURACY)
    }

    /// SVG path data for the stroke (empty string for an empty series).
    #[must_use]
    pub fn stroke_svg(&self) -> String {
        self.stroke.to_svg()
    }

    /// SVG path data for the area fill (empty string for an empty series).
    #[must_use]
    pub fn fill_svg(&self) -> String {
        self.fill.to_svg()
    }

    #[must_use]
    pub fn last_point(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}

/// One wedge of a pie/donut chart. Angles are in degrees, measured
/// clockwise in screen space with 0° at 3 o'clock; the first slice starts
/// at -90° (12 o'clock).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    pub label: String,

    /// Share of the total in `0.0..=100.0`
    pub percentage_of_total: f64,

    /// The raw input value
    pub value: f64,
}

impl Slice {
    /// Angular extent in degrees.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Percentage with one decimal, e.g. `"26.3"`.
    #[must_use]
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage_of_total)
    }

    /// Legend row text, e.g. `"Materials: 26.3%"`.
    #[must_use]
    pub fn legend_text(&self) -> String {
        format!("{}: {}%", self.label, self.percentage_label())
    }
}

/// Static layout of one bar before animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub label: String,
    pub value: f64,

    /// Target height as a fraction of the plot height, `0.0..`
    pub height_fraction: f64,
}

/// A y-axis tick: its value in data units and the rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// All bars plus the rounded axis they are scaled against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarLayout {
    pub bars: Vec<BarGeometry>,

    /// Maximum value rounded up to the next multiple of five
    pub rounded_max: f64,

    /// Ticks from the top of the axis (rounded max) down to zero
    pub ticks: Vec<AxisTick>,
}
