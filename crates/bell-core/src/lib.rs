pub mod aim;
pub mod config;
pub mod geometry;
pub mod host;
pub mod keys;
pub mod phase;
pub mod state;
pub mod stick;
pub mod touch;

pub use aim::{AimParams, aim_displacement, relative_aim, step_toward};
pub use config::ControlsConfig;
pub use geometry::{Playfield, rect_contains};
pub use host::GameHost;
pub use keys::{Direction, DirectionFlags, Key};
pub use phase::{ControlMode, ControlVisibility, GamePhase};
pub use state::InputState;
pub use touch::{TouchId, TouchList, TouchPoint, find_touch};

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Vec2};
