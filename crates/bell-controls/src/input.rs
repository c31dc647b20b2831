//! Normalized touch events.
//!
//! Platform touch events (DOM `touchstart`/`touchmove`/… on the web) are
//! translated into `TouchEvent`s before they reach the router. The same
//! enum serializes to JSON, so recorded sessions can be replayed.

use crate::controls::ControlKind;
use bell_core::{TouchList, TouchPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TouchEvent {
    /// A touch started on a named control.
    Begin {
        control: ControlKind,
        touch: TouchPoint,
    },

    /// Touches moved. Carries every touch still in contact, not only the
    /// ones that moved.
    Move { touches: TouchList },

    /// A touch lifted.
    End { touch: TouchPoint },

    /// The platform cancelled a touch (palm rejection, system gesture, …).
    Cancel { touch: TouchPoint },

    /// Touches on the game canvas or a cutscene surface, for free aiming
    /// or ship dragging.
    Free { touches: TouchList },

    /// A touch lifted on a non-interactive cutscene surface.
    OverlayTap { touch: TouchPoint, now: f64 },

    /// One display frame.
    Tick { now: f64 },
}

impl TouchEvent {
    pub fn begin(control: ControlKind, id: i32, x: f64, y: f64) -> Self {
        Self::Begin {
            control,
            touch: TouchPoint::new(id, x, y),
        }
    }

    pub fn moved(touches: &[TouchPoint]) -> Self {
        Self::Move {
            touches: TouchList::from_slice(touches),
        }
    }

    pub fn end(id: i32, x: f64, y: f64) -> Self {
        Self::End {
            touch: TouchPoint::new(id, x, y),
        }
    }

    pub fn cancel(id: i32, x: f64, y: f64) -> Self {
        Self::Cancel {
            touch: TouchPoint::new(id, x, y),
        }
    }

    pub fn free(touches: &[TouchPoint]) -> Self {
        Self::Free {
            touches: TouchList::from_slice(touches),
        }
    }

    /// Parse a recorded session: a JSON array of events.
    pub fn parse_script(json: &str) -> Result<Vec<TouchEvent>, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid touch script: {e}"))
    }
}
