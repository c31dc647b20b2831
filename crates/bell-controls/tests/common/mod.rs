//! Shared setup for router integration tests.
//!
//! Screen layout (client px, canvas at the origin, 800×600):
//!
//! ```text
//! joystick base   (25, 25)  150×150  → center (100, 100), travel 45
//! aim pad         (600, 250) 100×100
//! fire button     (650, 450) 100×100
//! pause button    (740, 10)  40×40
//! ```

#![allow(dead_code)]

use bell_controls::{ControlKind, ControlLayout, TouchRouter};
use bell_core::geometry::client_rect;
use bell_core::{GamePhase, InputState, Playfield, Point};

pub const PLAYFIELD: Playfield = Playfield {
    width: 800.0,
    height: 600.0,
};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn layout() -> ControlLayout {
    let mut layout = ControlLayout::new();
    layout.set_rect(
        ControlKind::Joystick,
        Some(client_rect(25.0, 25.0, 150.0, 150.0)),
    );
    layout.set_rect(
        ControlKind::AimPad,
        Some(client_rect(600.0, 250.0, 100.0, 100.0)),
    );
    layout.set_rect(
        ControlKind::FireButton,
        Some(client_rect(650.0, 450.0, 100.0, 100.0)),
    );
    layout.set_rect(
        ControlKind::PauseButton,
        Some(client_rect(740.0, 10.0, 40.0, 40.0)),
    );
    layout.canvas = Some(client_rect(0.0, 0.0, 800.0, 600.0));
    layout
}

pub fn router() -> TouchRouter {
    init_logs();
    let mut router = TouchRouter::default();
    router.layout = layout();
    router
}

pub fn playing() -> InputState {
    let mut host = InputState::playing(PLAYFIELD);
    host.cursor = Point::new(400.0, 300.0);
    host
}

pub fn intro(step: u32) -> InputState {
    let mut host = InputState::new(
        GamePhase::Cutscene {
            id: "willsWayIntro".to_string(),
            step,
        },
        PLAYFIELD,
    );
    host.player = Some(Point::new(100.0, 300.0));
    host
}

pub fn assert_close(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-6 && (actual.y - expected.y).abs() < 1e-6,
        "expected {expected:?}, got {actual:?}"
    );
}
