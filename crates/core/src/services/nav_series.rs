//! NAV history helpers used around the line chart: look-back filtering,
//! the period return figure and the readout fallback.

use chrono::{Months, NaiveDate};
use log::debug;

use crate::models::data_point::DataPoint;
use crate::models::period::Period;
use crate::models::selection::SelectionState;

/// Points dated strictly after `today - period`.
///
/// A cutoff that falls outside chrono's date range keeps the whole series.
pub fn filter_by_period(data: &[DataPoint], period: Period, today: NaiveDate) -> Vec<DataPoint> {
    let Some(cutoff) = today.checked_sub_months(Months::new(period.months())) else {
        return data.to_vec();
    };
    let filtered: Vec<DataPoint> = data.iter().filter(|p| p.date > cutoff).cloned().collect();
    debug!(
        "nav series: {period} window after {cutoff} keeps {} of {} point(s)",
        filtered.len(),
        data.len()
    );
    filtered
}

/// Return from the first to the last point in percent, two decimals.
///
/// Fewer than two points, or a zero first value, report `"0.00"`.
#[must_use]
pub fn period_return(data: &[DataPoint]) -> String {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return "0.00".to_string();
    };
    let base = first.finite_value();
    if data.len() < 2 || base == 0.0 {
        return "0.00".to_string();
    }
    let pct = (last.finite_value() - base) / base * 100.0;
    let pct = if pct.abs() < 0.005 { 0.0 } else { pct };
    format!("{pct:.2}")
}

/// Whether a formatted return should be shown as a gain (zero counts).
#[must_use]
pub fn is_non_negative(formatted_return: &str) -> bool {
    formatted_return
        .parse::<f64>()
        .map(|v| v >= 0.0)
        .unwrap_or(true)
}

/// The point the readout shows: the selection while scrubbing, otherwise
/// the most recent point.
#[must_use]
pub fn current_point<'a>(
    selection: &'a SelectionState,
    data: &'a [DataPoint],
) -> Option<&'a DataPoint> {
    selection.nearest_point.as_ref().or_else(|| data.last())
}
