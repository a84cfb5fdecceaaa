pub mod animation;
pub mod charts;
pub mod errors;
pub mod models;
pub mod services;
pub mod touch;

use std::time::Instant;

use chrono::NaiveDate;
use charts::{bar::BarChart, line::LineChart, pie::PieChart};
use models::{
    config::{BarChartStyle, LineChartStyle, PieChartStyle},
    data_point::{AllocationEntry, AllocationKind, DataPoint, PeriodReturn},
    period::Period,
    projection::{AmountRange, InvestmentMode, ProjectionInput, ProjectionResult, SchemeParameters},
};
use services::{nav_series, projection};

/// Main entry point for the fund-charts core library.
///
/// Holds one scheme's in-memory data (NAV history, allocation breakdowns,
/// period returns, calculator parameters) and hands out configured charts
/// and projections. It owns no rendering state itself: every chart it builds
/// is independent.
#[must_use]
#[derive(Clone)]
pub struct FundCharts {
    nav_history: Vec<DataPoint>,
    asset_allocation: Vec<AllocationEntry>,
    sector_allocation: Vec<AllocationEntry>,
    lumpsum_returns: Vec<PeriodReturn>,
    sip_returns: Vec<PeriodReturn>,
    params: SchemeParameters,
}

impl std::fmt::Debug for FundCharts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundCharts")
            .field("nav_points", &self.nav_history.len())
            .field("asset_entries", &self.asset_allocation.len())
            .field("sector_entries", &self.sector_allocation.len())
            .field("lumpsum_returns", &self.lumpsum_returns.len())
            .field("sip_returns", &self.sip_returns.len())
            .field("params", &self.params)
            .finish()
    }
}

impl FundCharts {
    /// Create an empty scheme with the given calculator parameters.
    pub fn new(params: SchemeParameters) -> Self {
        Self {
            nav_history: Vec::new(),
            asset_allocation: Vec::new(),
            sector_allocation: Vec::new(),
            lumpsum_returns: Vec::new(),
            sip_returns: Vec::new(),
            params,
        }
    }

    // ── Data ────────────────────────────────────────────────────────

    /// NAV history, oldest first.
    pub fn with_nav_history(mut self, nav_history: Vec<DataPoint>) -> Self {
        self.nav_history = nav_history;
        self
    }

    pub fn with_allocation(mut self, kind: AllocationKind, entries: Vec<AllocationEntry>) -> Self {
        match kind {
            AllocationKind::Asset => self.asset_allocation = entries,
            AllocationKind::Sector => self.sector_allocation = entries,
        }
        self
    }

    pub fn with_returns(mut self, mode: InvestmentMode, returns: Vec<PeriodReturn>) -> Self {
        match mode {
            InvestmentMode::LumpSum => self.lumpsum_returns = returns,
            InvestmentMode::Periodic => self.sip_returns = returns,
        }
        self
    }

    #[must_use]
    pub fn params(&self) -> &SchemeParameters {
        &self.params
    }

    #[must_use]
    pub fn nav_history(&self) -> &[DataPoint] {
        &self.nav_history
    }

    #[must_use]
    pub fn allocation(&self, kind: AllocationKind) -> &[AllocationEntry] {
        match kind {
            AllocationKind::Asset => &self.asset_allocation,
            AllocationKind::Sector => &self.sector_allocation,
        }
    }

    #[must_use]
    pub fn returns(&self, mode: InvestmentMode) -> &[PeriodReturn] {
        match mode {
            InvestmentMode::LumpSum => &self.lumpsum_returns,
            InvestmentMode::Periodic => &self.sip_returns,
        }
    }

    // ── NAV history ─────────────────────────────────────────────────

    /// NAV points inside the look-back window ending at `today`.
    #[must_use]
    pub fn nav_window(&self, period: Period, today: NaiveDate) -> Vec<DataPoint> {
        nav_series::filter_by_period(&self.nav_history, period, today)
    }

    /// Return over the look-back window, formatted with two decimals.
    #[must_use]
    pub fn period_return(&self, period: Period, today: NaiveDate) -> String {
        nav_series::period_return(&self.nav_window(period, today))
    }

    /// Line chart of the NAV window ending at `today`.
    pub fn nav_chart(&self, period: Period, today: NaiveDate, style: LineChartStyle) -> LineChart {
        LineChart::new(self.nav_window(period, today), style)
    }

    // ── Allocation / returns charts ─────────────────────────────────

    pub fn allocation_chart(
        &self,
        kind: AllocationKind,
        style: PieChartStyle,
        now: Instant,
    ) -> PieChart {
        PieChart::new(self.allocation(kind), style, now)
    }

    /// Bar chart of lump-sum or SIP returns; the mode doubles as the
    /// animation key so switching tabs re-runs the entry animation.
    pub fn returns_chart(&self, mode: InvestmentMode, style: BarChartStyle, now: Instant) -> BarChart {
        let mut chart = BarChart::new(self.returns(mode), style, now);
        chart.set_animation_key(mode.to_string(), now);
        chart
    }

    // ── Return calculator ───────────────────────────────────────────

    /// Annual return used by the calculator: the scheme's one-year return,
    /// or 12 % when it has none.
    #[must_use]
    pub fn annual_return_rate(&self) -> f64 {
        projection::annual_rate_from_percent(self.params.one_year_return_pct)
    }

    #[must_use]
    pub fn default_amount(&self, mode: InvestmentMode) -> f64 {
        projection::default_amount(mode, &self.params)
    }

    #[must_use]
    pub fn amount_range(&self, mode: InvestmentMode) -> AmountRange {
        projection::amount_range(mode, &self.params)
    }

    /// Project `amount` (snapped to the slider range) over `horizon`.
    pub fn project(&self, mode: InvestmentMode, amount: f64, horizon: Period) -> ProjectionResult {
        let amount = self.amount_range(mode).snap(amount);
        projection::project(&ProjectionInput {
            mode,
            amount,
            periods_count: horizon.months(),
            annual_return_rate: self.annual_return_rate(),
        })
    }
}
