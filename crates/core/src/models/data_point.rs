use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label format used for NAV points on the scrub readout ("07 Mar").
pub const NAV_LABEL_FORMAT: &str = "%d %b";

/// A single dated value on a line chart (one NAV observation).
///
/// Sequences of these are expected in ascending date order. Nothing in the
/// core re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// The value plotted on the y-axis (NAV per unit)
    pub value: f64,

    /// Date of the observation (daily granularity)
    pub date: NaiveDate,

    /// Optional short display label
    #[serde(default)]
    pub label: Option<String>,
}

impl DataPoint {
    pub fn new(value: f64, date: NaiveDate) -> Self {
        Self {
            value,
            date,
            label: None,
        }
    }

    pub fn with_label(value: f64, date: NaiveDate, label: impl Into<String>) -> Self {
        Self {
            value,
            date,
            label: Some(label.into()),
        }
    }

    /// Build a NAV point labelled with its day and month ("07 Mar").
    pub fn from_nav(nav: f64, date: NaiveDate) -> Self {
        Self::with_label(nav, date, date.format(NAV_LABEL_FORMAT).to_string())
    }

    /// The value with `NaN`/infinite readings treated as zero.
    #[must_use]
    pub fn finite_value(&self) -> f64 {
        finite_or_zero(self.value)
    }
}

/// One named share of a whole, e.g. an asset class or a sector weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub name: String,
    pub value: f64,
}

impl AllocationEntry {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Which breakdown an allocation chart shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationKind {
    /// Asset classes (equity, cash, ...)
    #[default]
    Asset,
    /// Industry sectors
    Sector,
}

/// A labelled return figure for one bar, e.g. ("1Y", 14.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReturn {
    pub label: String,
    pub value: f64,
}

impl PeriodReturn {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Treat `NaN` and infinities as zero. Callers are expected to pre-validate,
/// this only keeps bad readings from poisoning derived geometry.
#[inline]
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
