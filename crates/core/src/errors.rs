use thiserror::Error;

/// Unified error type for the fund-charts-core library.
///
/// Geometry, animation, touch tracking and projection are total and never
/// return this type. Only the boundary surfaces do: parsing user-facing
/// labels and loading style configuration.
#[derive(Debug, Error)]
pub enum ChartError {
    // ── Parsing ─────────────────────────────────────────────────────
    #[error("Unknown investment mode: {0}")]
    UnknownInvestmentMode(String),

    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            ChartError::Deserialization(e.to_string())
        } else {
            ChartError::Serialization(e.to_string())
        }
    }
}
