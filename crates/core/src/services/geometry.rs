//! Pure mapping from data sequences to screen-space geometry.
//!
//! Every function here is total: empty input gives empty output, a zero
//! total gives no slices, and non-finite values are read as zero.

use kurbo::{Arc, BezPath, Point, Vec2};
use log::{debug, trace};

use crate::models::config::{ChartConfig, PieChartStyle};
use crate::models::data_point::{finite_or_zero, AllocationEntry, DataPoint, PeriodReturn};
use crate::models::geometry::{AxisTick, BarGeometry, BarLayout, ChartPoint, ComputedPath, Slice};

/// Angle (degrees) at which the first slice starts: 12 o'clock.
pub const PIE_START_ANGLE: f64 = -90.0;

/// Flattening tolerance when arcs are approximated by cubic segments.
const ARC_TOLERANCE: f64 = 0.1;

/// Axis ticks as fractions of the rounded maximum, top to bottom.
const AXIS_TICK_FRACTIONS: [f64; 5] = [1.0, 0.75, 0.5, 0.25, 0.0];

// ── Line chart ──────────────────────────────────────────────────────

/// Project `data` into the padded drawing rectangle of `config`.
///
/// Values are normalised with `(v - min) / (max - min || 1)`, so a series of
/// equal values lies flat along the bottom of the plot instead of dividing by
/// zero. Points are spaced evenly by index across the inner width.
pub fn line_points(data: &[DataPoint], config: &ChartConfig) -> Vec<ChartPoint> {
    if data.is_empty() {
        return Vec::new();
    }

    let (min, max) = data
        .iter()
        .map(DataPoint::finite_value)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let inner_width = config.inner_width();
    let inner_height = config.inner_height();
    let steps = if data.len() > 1 { (data.len() - 1) as f64 } else { 1.0 };

    data.iter()
        .enumerate()
        .map(|(index, point)| {
            let value = point.finite_value();
            ChartPoint {
                index,
                x: config.padding + (index as f64 / steps) * inner_width,
                y: config.padding + inner_height - ((value - min) / range) * inner_height,
                value,
                date: point.date,
            }
        })
        .collect()
}

/// Smoothed stroke through `points`.
///
/// Each pair of neighbours is joined by a cubic whose control points sit at
/// one third and two thirds of the horizontal gap, at the height of the
/// nearer endpoint. The curve stays within the vertical range of its two
/// endpoints, so it never overshoots the data.
pub fn smooth_stroke(points: &[ChartPoint]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.position());

    for pair in points.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        let dx = curr.x - prev.x;
        path.curve_to(
            Point::new(prev.x + dx / 3.0, prev.y),
            Point::new(prev.x + 2.0 * dx / 3.0, curr.y),
            curr.position(),
        );
    }
    path
}

/// Close `stroke` down to `baseline` under the last and first points.
pub fn area_fill(stroke: &BezPath, points: &[ChartPoint], baseline: f64) -> BezPath {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return BezPath::new();
    };
    let mut fill = stroke.clone();
    fill.line_to(Point::new(last.x, baseline));
    fill.line_to(Point::new(first.x, baseline));
    fill.close_path();
    fill
}

/// Build the stroke and area paths for a NAV series.
///
/// Empty input yields an empty path; a single point yields a zero-length
/// stroke (a lone move-to) that renders as a point marker.
pub fn build_line_path(data: &[DataPoint], config: &ChartConfig) -> ComputedPath {
    if data.is_empty() {
        debug!("line geometry: empty series, nothing to draw");
        return ComputedPath::default();
    }
    let points = line_points(data, config);
    let stroke = smooth_stroke(&points);
    let fill = area_fill(&stroke, &points, config.height);
    trace!("line geometry: {} point(s) projected", points.len());
    ComputedPath {
        points,
        stroke,
        fill,
    }
}

// ── Pie / donut chart ───────────────────────────────────────────────

/// Turn ordered `{name, value}` pairs into contiguous slices.
///
/// Slice `i` sweeps `360 * value / total` degrees and starts where slice
/// `i - 1` ended; the first starts at 12 o'clock. Negative and non-finite
/// values count as zero. A zero total yields no slices at all.
pub fn build_slices(entries: &[AllocationEntry], style: &PieChartStyle) -> Vec<Slice> {
    let values: Vec<f64> = entries
        .iter()
        .map(|e| finite_or_zero(e.value).max(0.0))
        .collect();
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        debug!(
            "pie geometry: total of {} entries is {total}, no slices",
            entries.len()
        );
        return Vec::new();
    }

    let mut running = 0.0;
    entries
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (entry, value))| {
            let start_angle = PIE_START_ANGLE + 360.0 * running / total;
            running += value;
            let end_angle = PIE_START_ANGLE + 360.0 * running / total;
            let label = if entry.name.trim().is_empty() {
                format!("Item {}", index + 1)
            } else {
                entry.name.clone()
            };
            Slice {
                start_angle,
                end_angle,
                color: style.color_at(index).to_string(),
                label,
                percentage_of_total: value / total * 100.0,
                value,
            }
        })
        .collect()
}

fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::from_angle(angle) * radius
}

fn circular_arc(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Arc {
    Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle,
        x_rotation: 0.0,
    }
}

/// Annular wedge between `start_deg` and `end_deg`.
///
/// Outer arc first, then a straight edge in to the inner radius, the inner
/// arc traversed backwards, and close. An `inner_radius` of zero collapses
/// the inner arc into the centre, giving a filled pie slice.
pub fn slice_path(
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    start_deg: f64,
    end_deg: f64,
) -> BezPath {
    let start = start_deg.to_radians();
    let sweep = (end_deg - start_deg).to_radians();
    let outer_radius = finite_or_zero(outer_radius).max(0.0);
    let inner_radius = finite_or_zero(inner_radius).clamp(0.0, outer_radius);

    let mut path = BezPath::new();
    path.move_to(point_on_circle(center, outer_radius, start));
    path.extend(circular_arc(center, outer_radius, start, sweep).append_iter(ARC_TOLERANCE));
    if inner_radius > 0.0 {
        path.line_to(point_on_circle(center, inner_radius, start + sweep));
        path.extend(
            circular_arc(center, inner_radius, start + sweep, -sweep).append_iter(ARC_TOLERANCE),
        );
    } else {
        path.line_to(center);
    }
    path.close_path();
    path
}

// ── Bar chart ───────────────────────────────────────────────────────

/// Round up to the next multiple of five (23 → 25, 25 → 25).
#[must_use]
pub fn ceil_to_nearest_5(value: f64) -> f64 {
    (finite_or_zero(value) / 5.0).ceil() * 5.0
}

/// Axis ticks for a rounded maximum, top to bottom, labelled in whole
/// percent ("25%", "19%", "13%", "6%", "0%").
pub fn axis_ticks(rounded_max: f64) -> Vec<AxisTick> {
    AXIS_TICK_FRACTIONS
        .iter()
        .map(|fraction| {
            let value = rounded_max * fraction;
            AxisTick {
                value,
                label: format!("{}%", value.round() as i64),
            }
        })
        .collect()
}

/// Scale every bar against the maximum rounded up to a multiple of five.
///
/// A non-positive rounded maximum leaves every bar at zero height; negative
/// values never draw below the baseline.
pub fn build_bar_layout(data: &[PeriodReturn]) -> BarLayout {
    if data.is_empty() {
        debug!("bar geometry: no bars");
        return BarLayout::default();
    }

    let max = data
        .iter()
        .map(|d| finite_or_zero(d.value))
        .fold(f64::NEG_INFINITY, f64::max);
    let rounded_max = ceil_to_nearest_5(max);

    let bars = data
        .iter()
        .map(|d| {
            let value = finite_or_zero(d.value);
            let height_fraction = if rounded_max > 0.0 {
                (value / rounded_max).max(0.0)
            } else {
                0.0
            };
            BarGeometry {
                label: d.label.clone(),
                value,
                height_fraction,
            }
        })
        .collect();

    BarLayout {
        bars,
        rounded_max,
        ticks: axis_ticks(rounded_max),
    }
}
