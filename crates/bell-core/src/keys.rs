//! Movement keys and directional flags.
//!
//! The game core reads keyboard state by `KeyboardEvent.code`. Each
//! direction is bound to two codes (arrow key + WASD), and the joystick
//! drives both so the core cannot tell touch from keyboard.

use crate::host::GameHost;

/// A movement key code understood by the game core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    KeyA,
    ArrowRight,
    KeyD,
    ArrowUp,
    KeyW,
    ArrowDown,
    KeyS,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::ArrowLeft,
        Key::KeyA,
        Key::ArrowRight,
        Key::KeyD,
        Key::ArrowUp,
        Key::KeyW,
        Key::ArrowDown,
        Key::KeyS,
    ];

    /// The `KeyboardEvent.code` string.
    pub fn code(self) -> &'static str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::KeyA => "KeyA",
            Key::ArrowRight => "ArrowRight",
            Key::KeyD => "KeyD",
            Key::ArrowUp => "ArrowUp",
            Key::KeyW => "KeyW",
            Key::ArrowDown => "ArrowDown",
            Key::KeyS => "KeyS",
        }
    }

    /// Dense index into an 8-slot key table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn keys(self) -> [Key; 2] {
        match self {
            Direction::Left => [Key::ArrowLeft, Key::KeyA],
            Direction::Right => [Key::ArrowRight, Key::KeyD],
            Direction::Up => [Key::ArrowUp, Key::KeyW],
            Direction::Down => [Key::ArrowDown, Key::KeyS],
        }
    }
}

/// Pressed state of the four directions. Opposing flags are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionFlags {
    pub const NONE: DirectionFlags = DirectionFlags {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Derive flags from stick axes in `[-1, 1]`.
    ///
    /// An axis counts as pressed only when `|axis| > dead_zone`; its sign
    /// picks the direction, so left/right and up/down stay exclusive.
    /// Screen y grows downward, so positive y is `down`.
    pub fn from_axes(x: f64, y: f64, dead_zone: f64) -> Self {
        let horizontal = x.abs() > dead_zone;
        let vertical = y.abs() > dead_zone;
        Self {
            left: horizontal && x < 0.0,
            right: horizontal && x > 0.0,
            up: vertical && y < 0.0,
            down: vertical && y > 0.0,
        }
    }

    pub fn is_pressed(&self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Write all eight key flags to the host, released ones included.
    pub fn apply<H: GameHost + ?Sized>(&self, host: &mut H) {
        for dir in Direction::ALL {
            let pressed = self.is_pressed(dir);
            for key in dir.keys() {
                host.set_key(key, pressed);
            }
        }
    }
}
