use serde::{Deserialize, Serialize};

/// One message of a single-finger pan gesture, in chart-local pixels.
///
/// A gesture is `Begin`, any number of `Move`s, then `End`. `End` carries no
/// position and always clears the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum GestureEvent {
    Begin { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    End,
}

impl GestureEvent {
    /// Horizontal pointer position, if the message carries one.
    #[must_use]
    pub fn x(&self) -> Option<f64> {
        match self {
            GestureEvent::Begin { x, .. } | GestureEvent::Move { x, .. } => Some(*x),
            GestureEvent::End => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GestureEvent::End)
    }
}
