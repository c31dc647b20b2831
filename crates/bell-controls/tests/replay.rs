//! Integration tests: recorded touch sessions.
//!
//! Each fixture is a JSON array of `TouchEvent`s as a platform adapter
//! would emit them; replaying one must leave the host in a known state.

mod common;

use bell_controls::{ControlKind, TouchEvent, TouchRouter};
use bell_core::{ControlsConfig, Direction, Point, TouchPoint};
use common::*;
use pretty_assertions::assert_eq;

fn script(json: &str) -> Vec<TouchEvent> {
    TouchEvent::parse_script(json).expect("fixture parses")
}

// ─── Sessions ────────────────────────────────────────────────────────────

#[test]
fn two_thumbs_session() {
    let mut router = router();
    let mut host = playing();

    router.replay(&script(include_str!("fixtures/two_thumbs.json")), &mut host);

    // Stick still held up-right, fire lifted after two repeats
    assert!(host.direction(Direction::Right));
    assert!(host.direction(Direction::Up));
    assert!(!host.direction(Direction::Left) && !host.direction(Direction::Down));
    assert!(!host.primary_action);
    assert_eq!(host.action_repeats, 2);
    assert_eq!(host.audio_unlocks, 1);
    assert!(router.is_active(ControlKind::Joystick));
    assert!(!router.is_active(ControlKind::FireButton));
}

#[test]
fn fire_cancel_session() {
    let mut router = router();
    let mut host = playing();

    router.replay(&script(include_str!("fixtures/fire_cancel.json")), &mut host);

    assert!(!host.primary_action);
    assert_eq!(host.action_repeats, 1, "only the repeat before the cancel");
}

#[test]
fn aim_and_pause_session() {
    let mut router = router();
    let mut host = playing();

    router.replay(
        &script(include_str!("fixtures/aim_and_pause.json")),
        &mut host,
    );

    // Aim pad nudge, then a free-aim nudge from where the pad left off
    assert_close(host.cursor, Point::new(400.96, 299.52));
    assert_eq!(host.pause_toggles, 1);
    for kind in ControlKind::ALL {
        assert!(!router.is_active(kind), "{kind:?} still claimed");
    }
}

// ─── Configuration ───────────────────────────────────────────────────────

#[test]
fn custom_config_changes_timing_and_dead_zone() {
    init_logs();
    let config = ControlsConfig::from_json(include_str!("fixtures/slow_repeat.json"))
        .expect("fixture config is valid");
    assert_eq!(config.fire.repeat_interval_ms, 200.0);
    // Untouched sections keep their defaults
    assert_eq!(config.aim, ControlsConfig::default().aim);

    let mut router = TouchRouter::new(config);
    router.layout = layout();
    let mut host = playing();

    let events = vec![
        TouchEvent::begin(ControlKind::Joystick, 1, 100.0, 100.0),
        TouchEvent::moved(&[TouchPoint::new(1, 120.0, 100.0)]),
    ];
    router.replay(&events, &mut host);
    assert!(host.pressed_keys().is_empty(), "0.44 is inside a 0.5 dead zone");

    router.dispatch(&TouchEvent::moved(&[TouchPoint::new(1, 130.0, 100.0)]), &mut host);
    assert!(host.direction(Direction::Right));

    router.dispatch(&TouchEvent::begin(ControlKind::FireButton, 2, 700.0, 500.0), &mut host);
    for now in [0.0, 50.0, 100.0, 150.0, 200.0] {
        router.dispatch(&TouchEvent::Tick { now }, &mut host);
    }
    assert_eq!(host.action_repeats, 1);
}

#[test]
fn invalid_config_is_rejected() {
    let err = ControlsConfig::from_json(r#"{ "ship": { "speed": -5 } }"#).unwrap_err();
    assert!(err.contains("ship.speed"), "{err}");

    let err = ControlsConfig::from_json("{ not json").unwrap_err();
    assert!(err.starts_with("invalid controls config"), "{err}");
}

#[test]
fn release_all_clears_every_output() {
    let mut router = router();
    let mut host = playing();

    router.replay(
        &[
            TouchEvent::begin(ControlKind::Joystick, 1, 150.0, 100.0),
            TouchEvent::begin(ControlKind::FireButton, 2, 700.0, 500.0),
            TouchEvent::begin(ControlKind::PauseButton, 3, 760.0, 30.0),
        ],
        &mut host,
    );
    router.release_all(&mut host);

    assert!(host.pressed_keys().is_empty());
    assert!(!host.primary_action);
    assert_eq!(host.pause_toggles, 0, "lost touches don't toggle pause");
}
