use std::time::Instant;

use kurbo::Point;

use crate::animation::sequencer::{Sequencer, Stagger};
use crate::animation::timeline::Curve;
use crate::models::config::PieChartStyle;
use crate::models::data_point::AllocationEntry;
use crate::models::geometry::Slice;
use crate::services::geometry::{build_slices, slice_path};

/// One slice as drawn at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceFrame {
    pub path_svg: String,
    pub color: String,
    pub label: String,
    pub percentage_label: String,

    /// End angle reached by the reveal so far, in degrees
    pub revealed_end_angle: f64,
}

/// Everything needed to draw the pie chart for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartFrame {
    pub size: f64,
    pub slices: Vec<SliceFrame>,

    /// `"{label}: {pct}%"` rows; empty unless the style shows labels
    pub legend: Vec<String>,
}

/// Allocation pie/donut chart with a clockwise staggered reveal.
#[derive(Debug)]
pub struct PieChart {
    slices: Vec<Slice>,
    style: PieChartStyle,
    reveal: Sequencer,
}

impl PieChart {
    /// Build the chart and start the reveal at `now`.
    pub fn new(entries: &[AllocationEntry], style: PieChartStyle, now: Instant) -> Self {
        let style = style.sanitized();
        let reveal = Sequencer::new(
            0.0,
            Curve::timing(style.animation.duration_ms, style.animation.easing),
            Stagger::from_millis(style.animation.stagger_ms),
        );
        let mut chart = Self {
            slices: build_slices(entries, &style),
            style,
            reveal,
        };
        chart.restart(now);
        chart
    }

    #[must_use]
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Replace the entries and re-run the reveal.
    pub fn set_data(&mut self, entries: &[AllocationEntry], now: Instant) {
        self.slices = build_slices(entries, &self.style);
        self.restart(now);
    }

    /// Collapse every slice and reveal again.
    pub fn restart(&mut self, now: Instant) {
        self.reveal.trigger(&vec![1.0; self.slices.len()], now);
    }

    #[must_use]
    pub fn center(&self) -> Point {
        let r = self.style.size / 2.0;
        Point::new(r, r)
    }

    /// Describe the chart at `now`.
    #[must_use]
    pub fn render(&self, now: Instant) -> PieChartFrame {
        let progress = self.reveal.values_at(now);
        let center = self.center();
        let (outer, inner) = (self.style.outer_radius(), self.style.inner_radius());

        let slices = self
            .slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let p = progress.get(i).copied().unwrap_or(1.0).clamp(0.0, 1.0);
                let end = slice.start_angle + slice.sweep() * p;
                SliceFrame {
                    path_svg: slice_path(center, outer, inner, slice.start_angle, end).to_svg(),
                    color: slice.color.clone(),
                    label: slice.label.clone(),
                    percentage_label: slice.percentage_label(),
                    revealed_end_angle: end,
                }
            })
            .collect();

        let legend = if self.style.show_labels {
            self.slices.iter().map(Slice::legend_text).collect()
        } else {
            Vec::new()
        };

        PieChartFrame {
            size: self.style.size,
            slices,
            legend,
        }
    }
}
