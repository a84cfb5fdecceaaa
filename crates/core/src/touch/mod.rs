//! Single-pointer scrubbing over a line chart.

pub mod gesture;
pub mod tracker;
