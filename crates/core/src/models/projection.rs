use serde::{Deserialize, Serialize};

use crate::errors::ChartError;

/// How money goes into the fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentMode {
    /// A single one-time investment
    LumpSum,
    /// A fixed amount every month (SIP)
    Periodic,
}

impl std::fmt::Display for InvestmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentMode::LumpSum => write!(f, "lumpsum"),
            InvestmentMode::Periodic => write!(f, "periodic"),
        }
    }
}

impl std::str::FromStr for InvestmentMode {
    type Err = ChartError;

    /// Accepts `lumpsum`/`lump-sum` and `periodic`/`sip`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lumpsum" | "lump-sum" | "lump_sum" => Ok(InvestmentMode::LumpSum),
            "periodic" | "sip" => Ok(InvestmentMode::Periodic),
            _ => Err(ChartError::UnknownInvestmentMode(s.to_string())),
        }
    }
}

/// Inputs to a compound-growth projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub mode: InvestmentMode,

    /// Lump-sum amount, or the per-month installment for periodic mode
    pub amount: f64,

    /// Horizon in months
    pub periods_count: u32,

    /// Annual return as a fraction (0.12 for 12 %)
    pub annual_return_rate: f64,
}

impl ProjectionInput {
    pub fn lump_sum(amount: f64, months: u32, annual_return_rate: f64) -> Self {
        Self {
            mode: InvestmentMode::LumpSum,
            amount,
            periods_count: months,
            annual_return_rate,
        }
    }

    pub fn periodic(amount: f64, months: u32, annual_return_rate: f64) -> Self {
        Self {
            mode: InvestmentMode::Periodic,
            amount,
            periods_count: months,
            annual_return_rate,
        }
    }
}

/// Outcome of a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Sum of everything put in
    pub total_invested: f64,

    /// Value at the horizon
    pub projected_value: f64,

    /// projected_value - total_invested
    pub gain_amount: f64,

    /// Gain over invested as a percentage, two decimals ("12.00")
    pub gain_percentage: String,
}

impl ProjectionResult {
    /// Invested total rounded to whole currency units for display.
    #[must_use]
    pub fn rounded_invested(&self) -> i64 {
        self.total_invested.round() as i64
    }

    /// Projected value rounded to whole currency units for display.
    #[must_use]
    pub fn rounded_projected(&self) -> i64 {
        self.projected_value.round() as i64
    }
}

/// Fund-level inputs the calculator reads from the scheme record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeParameters {
    pub min_sip_amount: f64,
    pub min_lumpsum_amount: f64,

    /// Trailing one-year return in percent (14.5 for 14.5 %), if published
    #[serde(default)]
    pub one_year_return_pct: Option<f64>,
}

/// Bounds and step of the amount slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}
