use serde::{Deserialize, Serialize};

use super::data_point::DataPoint;

/// The point currently under the user's finger, if any.
///
/// Only the touch tracker produces these. Readers receive whole snapshots,
/// never a half-updated value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    /// The selected data point; `None` while no gesture is active
    pub nearest_point: Option<DataPoint>,

    /// Index of the selected point in the chart's series
    pub index: Option<usize>,

    /// Exact screen coordinates of the selected point
    pub screen_x: f64,
    pub screen_y: f64,
}

impl SelectionState {
    /// The idle state published at gesture end and before any touch.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn selected(point: DataPoint, index: usize, screen_x: f64, screen_y: f64) -> Self {
        Self {
            nearest_point: Some(point),
            index: Some(index),
            screen_x,
            screen_y,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.nearest_point.is_some()
    }
}
