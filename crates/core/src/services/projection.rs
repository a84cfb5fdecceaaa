//! Compound-growth projection for lump-sum and periodic (SIP) investing.

use log::debug;

use crate::models::data_point::finite_or_zero;
use crate::models::projection::{
    AmountRange, InvestmentMode, ProjectionInput, ProjectionResult, SchemeParameters,
};

/// Annual return assumed when a scheme publishes none (12 %).
pub const DEFAULT_ANNUAL_RETURN_PCT: f64 = 12.0;

/// Upper bound of the amount slider.
pub const MAX_INVESTMENT_AMOUNT: f64 = 100_000.0;

/// Granularity of the amount slider.
pub const AMOUNT_STEP: f64 = 500.0;

/// Effective monthly rate equivalent to an annual rate:
/// `(1 + r)^(1/12) - 1`.
#[must_use]
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + finite_or_zero(annual_rate)).powf(1.0 / 12.0) - 1.0
}

/// Annual rate as a fraction from an optional percentage figure.
#[must_use]
pub fn annual_rate_from_percent(pct: Option<f64>) -> f64 {
    pct.filter(|p| p.is_finite())
        .unwrap_or(DEFAULT_ANNUAL_RETURN_PCT)
        / 100.0
}

/// Gain over invested in percent, formatted with two decimals. Reports
/// `"0.00"` when nothing was invested.
#[must_use]
pub fn format_gain_percentage(invested: f64, projected: f64) -> String {
    if invested == 0.0 || !invested.is_finite() || !projected.is_finite() {
        return "0.00".to_string();
    }
    let pct = (projected - invested) / invested * 100.0;
    // avoid printing "-0.00"
    let pct = if pct.abs() < 0.005 { 0.0 } else { pct };
    format!("{pct:.2}")
}

/// Project `input` to its horizon.
///
/// * Lump-sum: `amount * (1 + m)^months`.
/// * Periodic: `Σ_{i=0}^{months-1} amount * (1 + m)^(months - i)`, summed
///   term by term. Every installment, including the last one, compounds for
///   at least one month.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let amount = finite_or_zero(input.amount);
    let months = input.periods_count;
    let growth = 1.0 + monthly_rate(input.annual_return_rate);

    let (total_invested, projected_value) = match input.mode {
        InvestmentMode::LumpSum => (amount, amount * growth.powf(f64::from(months))),
        InvestmentMode::Periodic => {
            let invested = amount * f64::from(months);
            let projected = (0..months)
                .map(|i| amount * growth.powf(f64::from(months - i)))
                .sum();
            (invested, projected)
        }
    };

    debug!(
        "projection: {} {amount} over {months} month(s) -> invested {total_invested:.2}, value {projected_value:.2}",
        input.mode
    );

    ProjectionResult {
        total_invested,
        projected_value,
        gain_amount: projected_value - total_invested,
        gain_percentage: format_gain_percentage(total_invested, projected_value),
    }
}

/// Starting amount for a mode: the scheme's minimum for that mode.
#[must_use]
pub fn default_amount(mode: InvestmentMode, params: &SchemeParameters) -> f64 {
    match mode {
        InvestmentMode::Periodic => params.min_sip_amount,
        InvestmentMode::LumpSum => params.min_lumpsum_amount,
    }
}

/// Slider bounds for a mode.
#[must_use]
pub fn amount_range(mode: InvestmentMode, params: &SchemeParameters) -> AmountRange {
    let min = finite_or_zero(default_amount(mode, params)).max(0.0);
    AmountRange {
        min,
        max: MAX_INVESTMENT_AMOUNT.max(min),
        step: AMOUNT_STEP,
    }
}

impl AmountRange {
    /// Clamp into range and snap to the nearest step above the minimum.
    #[must_use]
    pub fn snap(&self, amount: f64) -> f64 {
        let amount = finite_or_zero(amount).clamp(self.min, self.max);
        if self.step <= 0.0 {
            return amount;
        }
        let steps = ((amount - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }
}
