// ═══════════════════════════════════════════════════════════════════
// Geometry Tests — line paths, pie slices, bar layout
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use kurbo::{PathEl, Point, Shape};

use fund_charts_core::models::config::{ChartConfig, PieChartStyle, DEFAULT_SLICE_PALETTE};
use fund_charts_core::models::data_point::{AllocationEntry, DataPoint, PeriodReturn};
use fund_charts_core::services::geometry::{
    axis_ticks, build_bar_layout, build_line_path, build_slices, ceil_to_nearest_5, line_points,
    slice_path, PIE_START_ANGLE,
};

const EPS: f64 = 1e-9;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn series(values: &[f64]) -> Vec<DataPoint> {
    let start = d(2025, 1, 1);
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| DataPoint::new(v, start + chrono::Days::new(i as u64)))
        .collect()
}

fn config() -> ChartConfig {
    ChartConfig {
        width: 220.0,
        height: 120.0,
        padding: 10.0,
        ..ChartConfig::default()
    }
}

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

// ═══════════════════════════════════════════════════════════════════
//  Line path
// ═══════════════════════════════════════════════════════════════════

mod line_path {
    use super::*;

    #[test]
    fn point_count_matches_input_length() {
        for n in 1..=60 {
            let values: Vec<f64> = (0..n).map(|i| ((i * 37) % 11) as f64 + 0.5).collect();
            let path = build_line_path(&series(&values), &config());
            assert_eq!(path.len(), n, "n = {n}");
        }
    }

    #[test]
    fn empty_series_yields_empty_path() {
        let path = build_line_path(&[], &config());
        assert!(path.is_empty());
        assert!(path.stroke.elements().is_empty());
        assert!(path.fill.elements().is_empty());
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn single_point_is_zero_length_marker() {
        let path = build_line_path(&series(&[42.0]), &config());
        assert_eq!(path.len(), 1);
        assert_eq!(path.stroke.elements().len(), 1);
        assert!(matches!(path.stroke.elements()[0], PathEl::MoveTo(_)));
        assert_eq!(path.length(), 0.0);
        assert_eq!(path.points[0].x, 10.0);
    }

    #[test]
    fn extremes_map_to_padded_edges() {
        let points = line_points(&series(&[5.0, 15.0, 10.0]), &config());
        // min at the bottom of the inner rect, max at the top
        assert!((points[0].y - 110.0).abs() < EPS);
        assert!((points[1].y - 10.0).abs() < EPS);
        assert!((points[2].y - 60.0).abs() < EPS);
        // evenly spaced by index across the inner width
        assert!((points[0].x - 10.0).abs() < EPS);
        assert!((points[1].x - 110.0).abs() < EPS);
        assert!((points[2].x - 210.0).abs() < EPS);
    }

    #[test]
    fn equal_values_draw_a_flat_line() {
        let points = line_points(&series(&[7.0, 7.0, 7.0, 7.0]), &config());
        let y0 = points[0].y;
        assert!(y0.is_finite());
        assert!(points.iter().all(|p| (p.y - y0).abs() < EPS));
    }

    #[test]
    fn non_finite_values_read_as_zero() {
        let points = line_points(&series(&[f64::NAN, 10.0, f64::INFINITY]), &config());
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(points[0].value, 0.0);
        assert_eq!(points[2].value, 0.0);
        assert!((points[0].y - points[2].y).abs() < EPS);
    }

    #[test]
    fn points_keep_source_index_and_date() {
        let data = series(&[1.0, 2.0, 3.0]);
        let points = line_points(&data, &config());
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.index, i);
            assert_eq!(p.date, data[i].date);
        }
    }

    #[test]
    fn control_points_sit_at_thirds_and_endpoint_heights() {
        let path = build_line_path(&series(&[5.0, 15.0, 10.0]), &config());
        let els = path.stroke.elements();
        assert_eq!(els.len(), 3);
        let (p0, p1) = (path.points[0].position(), path.points[1].position());
        let PathEl::CurveTo(c1, c2, end) = els[1] else {
            panic!("expected a cubic segment");
        };
        let dx = p1.x - p0.x;
        assert!(approx(c1, Point::new(p0.x + dx / 3.0, p0.y)));
        assert!(approx(c2, Point::new(p0.x + 2.0 * dx / 3.0, p1.y)));
        assert!(approx(end, p1));
    }

    #[test]
    fn curve_does_not_overshoot_the_data_range() {
        let path = build_line_path(&series(&[5.0, 15.0, 5.0, 15.0, 9.0]), &config());
        let bbox = path.stroke.bounding_box();
        assert!(bbox.y0 >= 10.0 - 1e-6);
        assert!(bbox.y1 <= 110.0 + 1e-6);
    }

    #[test]
    fn fill_closes_down_to_the_bottom_edge() {
        let path = build_line_path(&series(&[3.0, 9.0, 4.0, 8.0]), &config());
        let els = path.fill.elements();
        let n = els.len();
        let first = path.points.first().unwrap();
        let last = path.points.last().unwrap();
        assert_eq!(els[n - 1], PathEl::ClosePath);
        assert_eq!(els[n - 2], PathEl::LineTo(Point::new(first.x, 120.0)));
        assert_eq!(els[n - 3], PathEl::LineTo(Point::new(last.x, 120.0)));
        // stroke is a prefix of the fill
        assert_eq!(&els[..path.stroke.elements().len()], path.stroke.elements());
    }

    #[test]
    fn svg_output_starts_with_move() {
        let path = build_line_path(&series(&[1.0, 2.0]), &config());
        assert!(path.stroke_svg().starts_with('M'));
        assert!(path.fill_svg().ends_with('Z'));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Pie slices
// ═══════════════════════════════════════════════════════════════════

mod slices {
    use super::*;

    fn entries(values: &[f64]) -> Vec<AllocationEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| AllocationEntry::new(format!("S{i}"), v))
            .collect()
    }

    #[test]
    fn sweeps_sum_to_full_circle() {
        let values = [26.31, 18.24, 11.51, 10.69, 9.92, 5.0, 3.18, 2.51, 2.03, 1.53];
        let slices = build_slices(&entries(&values), &PieChartStyle::default());
        let total: f64 = values.iter().sum();
        let sum: f64 = slices.iter().map(|s| s.sweep()).sum();
        assert!((sum - 360.0).abs() < 1e-9);
        for (slice, v) in slices.iter().zip(values) {
            assert!((slice.sweep() - 360.0 * v / total).abs() < 1e-9);
        }
    }

    #[test]
    fn slices_are_contiguous_from_twelve_oclock() {
        let slices = build_slices(&entries(&[1.0, 2.0, 3.0]), &PieChartStyle::default());
        assert_eq!(slices[0].start_angle, PIE_START_ANGLE);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert!((slices[2].end_angle - 270.0).abs() < EPS);
    }

    #[test]
    fn zero_total_yields_no_slices() {
        assert!(build_slices(&entries(&[0.0, 0.0]), &PieChartStyle::default()).is_empty());
        assert!(build_slices(&[], &PieChartStyle::default()).is_empty());
    }

    #[test]
    fn nan_and_negative_entries_carry_no_weight() {
        let slices = build_slices(&entries(&[f64::NAN, 50.0, -10.0, 50.0]), &PieChartStyle::default());
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].sweep(), 0.0);
        assert_eq!(slices[2].sweep(), 0.0);
        assert!((slices[1].sweep() - 180.0).abs() < EPS);
        assert!(slices.iter().all(|s| s.start_angle.is_finite() && s.end_angle.is_finite()));
    }

    #[test]
    fn percentages_and_labels() {
        let input = vec![
            AllocationEntry::new("Equity", 75.0),
            AllocationEntry::new("", 25.0),
        ];
        let slices = build_slices(&input, &PieChartStyle::default());
        assert_eq!(slices[0].percentage_label(), "75.0");
        assert_eq!(slices[0].legend_text(), "Equity: 75.0%");
        assert_eq!(slices[1].label, "Item 2");
        assert_eq!(slices[1].percentage_label(), "25.0");
    }

    #[test]
    fn colours_cycle_through_the_palette() {
        let values = vec![1.0; 14];
        let slices = build_slices(&entries(&values), &PieChartStyle::default());
        assert_eq!(slices[0].color, DEFAULT_SLICE_PALETTE[0]);
        assert_eq!(slices[12].color, DEFAULT_SLICE_PALETTE[0]);
        assert_eq!(slices[13].color, DEFAULT_SLICE_PALETTE[1]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Slice paths
// ═══════════════════════════════════════════════════════════════════

mod slice_paths {
    use super::*;

    const CENTER: Point = Point::new(100.0, 100.0);

    #[test]
    fn wedge_starts_on_the_outer_arc() {
        let path = slice_path(CENTER, 99.0, 60.0, -90.0, 0.0);
        let PathEl::MoveTo(start) = path.elements()[0] else {
            panic!("expected move-to");
        };
        assert!(approx(start, Point::new(100.0, 1.0)));
        assert_eq!(*path.elements().last().unwrap(), PathEl::ClosePath);
    }

    #[test]
    fn donut_wedge_has_an_inner_edge() {
        let path = slice_path(CENTER, 99.0, 60.0, -90.0, 0.0);
        // straight edge inward lands on the inner circle at the end angle
        let inner_end = path.elements().iter().find_map(|el| match el {
            PathEl::LineTo(p) => Some(*p),
            _ => None,
        });
        assert!(approx(inner_end.unwrap(), Point::new(160.0, 100.0)));
    }

    #[test]
    fn zero_inner_radius_is_a_filled_pie_slice() {
        let path = slice_path(CENTER, 99.0, 0.0, -90.0, 0.0);
        assert!(path.elements().contains(&PathEl::LineTo(CENTER)));
    }

    #[test]
    fn full_circle_spans_the_outer_diameter() {
        let path = slice_path(CENTER, 99.0, 60.0, -90.0, 270.0);
        let bbox = path.bounding_box();
        assert!((bbox.x0 - 1.0).abs() < 0.5);
        assert!((bbox.x1 - 199.0).abs() < 0.5);
        assert!((bbox.y0 - 1.0).abs() < 0.5);
        assert!((bbox.y1 - 199.0).abs() < 0.5);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Bar layout
// ═══════════════════════════════════════════════════════════════════

mod bars {
    use super::*;

    fn returns(values: &[f64]) -> Vec<PeriodReturn> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| PeriodReturn::new(format!("P{i}"), v))
            .collect()
    }

    #[test]
    fn ceil_to_five() {
        assert_eq!(ceil_to_nearest_5(23.0), 25.0);
        assert_eq!(ceil_to_nearest_5(25.0), 25.0);
        assert_eq!(ceil_to_nearest_5(0.1), 5.0);
        assert_eq!(ceil_to_nearest_5(0.0), 0.0);
        assert_eq!(ceil_to_nearest_5(f64::NAN), 0.0);
    }

    #[test]
    fn max_23_rounds_axis_to_25() {
        let layout = build_bar_layout(&returns(&[23.0, 10.0, 5.0, 15.0, 20.0]));
        assert_eq!(layout.rounded_max, 25.0);
        assert_eq!(layout.bars.len(), 5);
        assert!((layout.bars[0].height_fraction - 0.92).abs() < EPS);
        assert!((layout.bars[2].height_fraction - 0.2).abs() < EPS);
    }

    #[test]
    fn axis_labels_are_rounded_quarters() {
        let labels: Vec<String> = axis_ticks(25.0).into_iter().map(|t| t.label).collect();
        assert_eq!(labels, ["25%", "19%", "13%", "6%", "0%"]);
    }

    #[test]
    fn empty_input_has_no_bars() {
        let layout = build_bar_layout(&[]);
        assert!(layout.bars.is_empty());
        assert!(layout.ticks.is_empty());
    }

    #[test]
    fn non_positive_maximum_gives_flat_bars() {
        let layout = build_bar_layout(&returns(&[0.0, 0.0]));
        assert!(layout.bars.iter().all(|b| b.height_fraction == 0.0));

        let layout = build_bar_layout(&returns(&[-3.0, -12.0]));
        assert!(layout.bars.iter().all(|b| b.height_fraction == 0.0));
    }

    #[test]
    fn negative_bars_clamp_to_baseline() {
        let layout = build_bar_layout(&returns(&[-4.0, 8.0]));
        assert_eq!(layout.rounded_max, 10.0);
        assert_eq!(layout.bars[0].height_fraction, 0.0);
        assert!((layout.bars[1].height_fraction - 0.8).abs() < EPS);
    }
}
