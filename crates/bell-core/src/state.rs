//! In-memory `GameHost`.
//!
//! Holds the logical input state a native game loop (or a test) reads
//! back after feeding touches through the router.

use crate::geometry::Playfield;
use crate::host::GameHost;
use crate::keys::{Direction, Key};
use crate::phase::GamePhase;
use kurbo::Point;

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub phase: GamePhase,
    pub playfield: Playfield,
    pub player: Option<Point>,
    pub cursor: Point,
    pub primary_action: bool,
    pub aim_sensitivity: Option<f64>,
    keys: [bool; 8],
    /// Counters for the imperative triggers.
    pub action_repeats: u32,
    pub pause_toggles: u32,
    pub skips: u32,
    pub audio_unlocks: u32,
}

impl InputState {
    pub fn new(phase: GamePhase, playfield: Playfield) -> Self {
        Self {
            phase,
            playfield,
            ..Self::default()
        }
    }

    /// A playing session with the cursor centered.
    pub fn playing(playfield: Playfield) -> Self {
        Self {
            cursor: Point::new(playfield.width / 2.0, playfield.height / 2.0),
            ..Self::new(GamePhase::Playing, playfield)
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys[key.index()]
    }

    /// True only if both keys bound to `dir` are down.
    pub fn direction(&self, dir: Direction) -> bool {
        dir.keys().iter().all(|k| self.is_pressed(*k))
    }

    pub fn pressed_keys(&self) -> Vec<Key> {
        Key::ALL
            .into_iter()
            .filter(|k| self.is_pressed(*k))
            .collect()
    }
}

impl GameHost for InputState {
    fn phase(&self) -> GamePhase {
        self.phase.clone()
    }

    fn playfield(&self) -> Playfield {
        self.playfield
    }

    fn player_position(&self) -> Option<Point> {
        self.player
    }

    fn cursor(&self) -> Point {
        self.cursor
    }

    fn aim_sensitivity(&self) -> Option<f64> {
        self.aim_sensitivity
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        self.keys[key.index()] = pressed;
    }

    fn set_cursor(&mut self, pos: Point) {
        self.cursor = pos;
    }

    fn set_primary_action(&mut self, held: bool) {
        self.primary_action = held;
    }

    fn repeat_primary_action(&mut self) {
        self.primary_action = true;
        self.action_repeats += 1;
    }

    fn set_player_position(&mut self, pos: Point) {
        self.player = Some(pos);
    }

    fn toggle_pause(&mut self) {
        self.pause_toggles += 1;
    }

    fn skip_cutscene(&mut self) {
        self.skips += 1;
    }

    fn unlock_audio(&mut self) {
        self.audio_unlocks += 1;
    }
}
