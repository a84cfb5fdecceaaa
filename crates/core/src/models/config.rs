use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::animation::easing::Easing;
use crate::animation::spring::SpringConfig;
use crate::errors::ChartError;

/// Default stroke colour of the NAV line.
pub const DEFAULT_LINE_COLOR: &str = "#6fa287";

/// Colours assigned to allocation slices, in order, cycling when exhausted.
pub const DEFAULT_SLICE_PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#4c4ce3", "#c2b638", "#29c3e6", "#151757",
    "#891b1b", "#b72782", "#2ec620", "#9cd60b",
];

/// Geometry inputs shared by every chart type.
///
/// Read-only for one render pass. Charts rebuild all derived geometry when
/// they are handed a new config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total drawing width in pixels
    pub width: f64,

    /// Total drawing height in pixels
    pub height: f64,

    /// Inset applied on every side of the plotting rectangle
    pub padding: f64,

    /// Stroke width for lines and slice outlines
    pub stroke_width: f64,

    /// Series colours; the first one is the primary colour
    pub colors: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 330.0,
            height: 200.0,
            padding: 10.0,
            stroke_width: 2.5,
            colors: vec![DEFAULT_LINE_COLOR.to_string()],
        }
    }
}

impl ChartConfig {
    /// Width available for plotting once padding is removed (never negative).
    #[must_use]
    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding * 2.0).max(0.0)
    }

    /// Height available for plotting once padding is removed (never negative).
    #[must_use]
    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding * 2.0).max(0.0)
    }

    /// First configured colour, falling back to the default line colour.
    #[must_use]
    pub fn primary_color(&self) -> &str {
        self.colors
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LINE_COLOR)
    }

    /// Colour for the item at `index`, cycling through the configured list.
    #[must_use]
    pub fn color_at(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            DEFAULT_LINE_COLOR
        } else {
            &self.colors[index % self.colors.len()]
        }
    }

    /// Replace non-finite or negative dimensions with the defaults so that
    /// geometry built from this config is always drawable.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
        Self {
            width: pick(self.width, defaults.width),
            height: pick(self.height, defaults.height),
            padding: pick(self.padding, defaults.padding),
            stroke_width: pick(self.stroke_width, defaults.stroke_width),
            colors: self.colors.clone(),
        }
    }

    fn validate(&self) -> Result<(), ChartError> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("stroke_width", self.stroke_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Timing parameters for a collection of animated items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of fixed-time transitions in milliseconds
    pub duration_ms: u64,

    /// Delay between consecutive items starting, in milliseconds
    pub stagger_ms: u64,

    /// Curve used by fixed-time transitions
    pub easing: Easing,

    /// Parameters for spring-driven values
    pub spring: SpringConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            stagger_ms: 100,
            easing: Easing::EaseInOutQuad,
            spring: SpringConfig::default(),
        }
    }
}

/// Style options for the NAV line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartStyle {
    pub chart: ChartConfig,

    /// Top-to-bottom gradient stops for the area under the line
    pub gradient_colors: Vec<String>,

    /// How long the scrub indicator takes to settle on a new point
    pub pointer_settle_ms: u64,

    /// Fade/scale time of the indicator when a touch starts or ends
    pub indicator_fade_ms: u64,

    /// Radius of the round scrub indicator
    pub indicator_radius: f64,

    /// Width of the vertical guide line under the indicator
    pub guide_line_width: f64,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            gradient_colors: vec!["#6fa28740".to_string(), "#6fa28710".to_string()],
            pointer_settle_ms: 200,
            indicator_fade_ms: 150,
            indicator_radius: 8.0,
            guide_line_width: 1.5,
        }
    }
}

/// Style options for the period-returns bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartStyle {
    pub chart: ChartConfig,

    /// Width of every bar in pixels
    pub bar_width: f64,

    /// Bars never render shorter than this, so zero values stay visible
    pub min_bar_height: f64,

    /// Fade-in timing and per-bar stagger; the spring drives bar height
    pub animation: AnimationConfig,
}

impl Default for BarChartStyle {
    fn default() -> Self {
        Self {
            chart: ChartConfig {
                height: 250.0,
                ..ChartConfig::default()
            },
            bar_width: 28.0,
            min_bar_height: 2.0,
            animation: AnimationConfig::default(),
        }
    }
}

/// Style options for the allocation pie/donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartStyle {
    /// Diameter of the chart in pixels
    pub size: f64,

    /// Inner radius as a fraction of the outer radius; 0 draws a filled pie
    pub inner_radius_ratio: f64,

    /// Outline width; the outer radius is inset by half of it
    pub stroke_width: f64,

    /// Slice colours, cycled by slice index
    pub colors: Vec<String>,

    /// Whether the legend rows should be shown
    pub show_labels: bool,

    /// Reveal timing and per-slice stagger
    pub animation: AnimationConfig,
}

impl Default for PieChartStyle {
    fn default() -> Self {
        Self {
            size: 200.0,
            inner_radius_ratio: 0.6,
            stroke_width: 2.0,
            colors: DEFAULT_SLICE_PALETTE.iter().map(|c| c.to_string()).collect(),
            show_labels: false,
            animation: AnimationConfig {
                duration_ms: 1000,
                easing: Easing::EaseInOutCubic,
                ..AnimationConfig::default()
            },
        }
    }
}

impl PieChartStyle {
    /// Fall back to the defaults for a non-finite or negative size or
    /// stroke width, and for an inner radius ratio outside `0..=1`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let pick = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
        let inner_radius_ratio = if (0.0..=1.0).contains(&self.inner_radius_ratio) {
            self.inner_radius_ratio
        } else {
            defaults.inner_radius_ratio
        };
        Self {
            size: pick(self.size, defaults.size),
            stroke_width: pick(self.stroke_width, defaults.stroke_width),
            inner_radius_ratio,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        (self.size / 2.0 - self.stroke_width / 2.0).max(0.0)
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        (self.size / 2.0 * self.inner_radius_ratio.clamp(0.0, 1.0)).max(0.0)
    }

    #[must_use]
    pub fn color_at(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            DEFAULT_SLICE_PALETTE[index % DEFAULT_SLICE_PALETTE.len()]
        } else {
            &self.colors[index % self.colors.len()]
        }
    }
}

/// JSON loading for style structs. Missing fields take their defaults;
/// present-but-invalid dimensions are rejected.
pub trait StyleConfig: Sized + Serialize + DeserializeOwned {
    fn validate(&self) -> Result<(), ChartError>;

    fn from_json(json: &str) -> Result<Self, ChartError> {
        let style: Self = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl StyleConfig for ChartConfig {
    fn validate(&self) -> Result<(), ChartError> {
        ChartConfig::validate(self)
    }
}

impl StyleConfig for LineChartStyle {
    fn validate(&self) -> Result<(), ChartError> {
        self.chart.validate()
    }
}

impl StyleConfig for BarChartStyle {
    fn validate(&self) -> Result<(), ChartError> {
        self.chart.validate()?;
        if !self.bar_width.is_finite() || self.bar_width < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "bar_width must be a non-negative number, got {}",
                self.bar_width
            )));
        }
        Ok(())
    }
}

impl StyleConfig for PieChartStyle {
    fn validate(&self) -> Result<(), ChartError> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "size must be a non-negative number, got {}",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.inner_radius_ratio) {
            return Err(ChartError::InvalidConfig(format!(
                "inner_radius_ratio must be within 0..=1, got {}",
                self.inner_radius_ratio
            )));
        }
        Ok(())
    }
}
