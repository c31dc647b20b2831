//! The contract between the touch router and the game core.
//!
//! The game core owns the logical input state (keys, cursor, primary
//! action) and the ship; the router only reads phase and geometry and
//! writes input through these methods.

use crate::geometry::Playfield;
use crate::keys::Key;
use crate::phase::GamePhase;
use kurbo::Point;

pub trait GameHost {
    // ── Read ──

    fn phase(&self) -> GamePhase;

    fn playfield(&self) -> Playfield;

    /// Current ship position in playfield coordinates, if a ship exists.
    fn player_position(&self) -> Option<Point>;

    /// Current logical cursor (crosshair) in playfield coordinates.
    fn cursor(&self) -> Point;

    /// The player's aim sensitivity setting, overriding the configured
    /// one when present.
    fn aim_sensitivity(&self) -> Option<f64> {
        None
    }

    // ── Write ──

    fn set_key(&mut self, key: Key, pressed: bool);

    fn set_cursor(&mut self, pos: Point);

    /// Press or release the primary action (mouse button).
    fn set_primary_action(&mut self, held: bool);

    /// Periodic keep-alive while the fire button stays held.
    fn repeat_primary_action(&mut self) {
        self.set_primary_action(true);
    }

    fn set_player_position(&mut self, pos: Point);

    fn toggle_pause(&mut self);

    fn skip_cutscene(&mut self);

    /// Mobile browsers only allow audio after a user gesture; called once
    /// on the first touch the router accepts.
    fn unlock_audio(&mut self) {}
}
