use std::time::Instant;

use crate::animation::sequencer::{Sequencer, Stagger};
use crate::animation::timeline::Curve;
use crate::models::config::BarChartStyle;
use crate::models::data_point::PeriodReturn;
use crate::models::geometry::{AxisTick, BarLayout};
use crate::services::geometry::build_bar_layout;

/// One bar as it should be drawn at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BarFrame {
    pub label: String,

    /// Value text drawn above the bar, e.g. `"12.5%"`
    pub value_label: String,

    /// Left edge of the bar
    pub x: f64,
    pub width: f64,

    /// Animated height as a percentage of the plot height (may briefly
    /// exceed the target while the spring overshoots)
    pub height_pct: f64,

    /// Height in pixels, never below the style's minimum bar height
    pub height_px: f64,

    pub opacity: f64,
    pub color: String,
}

/// Everything needed to draw the bar chart for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartFrame {
    pub bars: Vec<BarFrame>,
    pub ticks: Vec<AxisTick>,
}

/// Period-returns bar chart.
///
/// Bars grow on a spring from zero and fade in on a timed curve, each
/// staggered by its index. New data or a new animation key re-runs both
/// from zero.
#[derive(Debug)]
pub struct BarChart {
    layout: BarLayout,
    style: BarChartStyle,
    animation_key: String,
    heights: Sequencer,
    opacities: Sequencer,
}

impl BarChart {
    /// Build the chart and start its entry animation at `now`.
    pub fn new(data: &[PeriodReturn], style: BarChartStyle, now: Instant) -> Self {
        let mut style = style;
        style.chart = style.chart.sanitized();
        let stagger = Stagger::from_millis(style.animation.stagger_ms);
        let heights = Sequencer::new(0.0, Curve::Spring(style.animation.spring), stagger);
        let opacities = Sequencer::new(
            0.0,
            Curve::timing(style.animation.duration_ms, style.animation.easing),
            stagger,
        );
        let mut chart = Self {
            layout: build_bar_layout(data),
            style,
            animation_key: String::from("default"),
            heights,
            opacities,
        };
        chart.restart(now);
        chart
    }

    #[must_use]
    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    #[must_use]
    pub fn rounded_max(&self) -> f64 {
        self.layout.rounded_max
    }

    #[must_use]
    pub fn animation_key(&self) -> &str {
        &self.animation_key
    }

    #[must_use]
    pub fn heights(&self) -> &Sequencer {
        &self.heights
    }

    /// Replace the data and re-run the entry animation.
    pub fn set_data(&mut self, data: &[PeriodReturn], now: Instant) {
        self.layout = build_bar_layout(data);
        self.restart(now);
    }

    /// Switch animation key (e.g. the lump-sum/SIP tab). A different key
    /// re-runs the entry animation; the same key is a no-op.
    pub fn set_animation_key(&mut self, key: impl Into<String>, now: Instant) {
        let key = key.into();
        if key != self.animation_key {
            self.animation_key = key;
            self.restart(now);
        }
    }

    /// Reset every bar to zero and animate again.
    pub fn restart(&mut self, now: Instant) {
        let targets: Vec<f64> = self
            .layout
            .bars
            .iter()
            .map(|b| b.height_fraction * 100.0)
            .collect();
        self.heights.trigger(&targets, now);
        self.opacities.trigger(&vec![1.0; targets.len()], now);
    }

    /// Describe the chart at `now`.
    #[must_use]
    pub fn render(&self, now: Instant) -> BarChartFrame {
        let chart = &self.style.chart;
        let count = self.layout.bars.len();
        let slot = if count > 0 {
            chart.inner_width() / count as f64
        } else {
            0.0
        };
        let plot_height = chart.inner_height();
        let heights = self.heights.values_at(now);
        let opacities = self.opacities.values_at(now);

        let bars = self
            .layout
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let height_pct = heights.get(i).copied().unwrap_or(0.0).max(0.0);
                let center = chart.padding + slot * (i as f64 + 0.5);
                BarFrame {
                    label: bar.label.clone(),
                    value_label: format!("{}%", bar.value),
                    x: center - self.style.bar_width / 2.0,
                    width: self.style.bar_width,
                    height_pct,
                    height_px: (height_pct / 100.0 * plot_height).max(self.style.min_bar_height),
                    opacity: opacities.get(i).copied().unwrap_or(1.0).clamp(0.0, 1.0),
                    color: chart.primary_color().to_string(),
                }
            })
            .collect();

        BarChartFrame {
            bars,
            ticks: self.layout.ticks.clone(),
        }
    }
}
