//! Integration tests: cutscenes, the interactive intro and mode changes.

mod common;

use bell_controls::ControlKind;
use bell_core::geometry::client_rect;
use bell_core::{ControlVisibility, Direction, GamePhase, Point, TouchId, TouchPoint};
use common::*;
use pretty_assertions::assert_eq;

fn touch(id: i32, x: f64, y: f64) -> TouchPoint {
    TouchPoint::new(id, x, y)
}

fn boss_cutscene() -> GamePhase {
    GamePhase::Cutscene {
        id: "bossArrival".to_string(),
        step: 0,
    }
}

// ─── Ship drag ───────────────────────────────────────────────────────────

#[test]
fn intro_touch_targets_playfield_coordinates() {
    let mut router = router();
    router.layout.canvas = Some(client_rect(50.0, 20.0, 800.0, 600.0));
    let mut host = intro(0);

    let routed = router.route_free_touch(&[touch(1, 450.0, 320.0)], &mut host);
    assert_eq!(routed, Some(ControlKind::CutsceneDrag));
    assert_eq!(host.cursor, Point::new(400.0, 300.0));
    // The ship only moves on frames
    assert_eq!(host.player, Some(Point::new(100.0, 300.0)));
}

#[test]
fn drag_follows_canvas_measured_after_claim() {
    let mut router = router();
    router.layout.canvas = None;
    let mut host = intro(0);

    router.route_free_touch(&[touch(1, 450.0, 320.0)], &mut host);
    assert_eq!(host.cursor, Point::new(450.0, 320.0));

    // The page measured the canvas at (50, 20) mid-drag
    router.layout.canvas = Some(client_rect(50.0, 20.0, 800.0, 600.0));
    router.on_touch_move(&[touch(1, 450.0, 320.0)], &mut host);
    assert_eq!(host.cursor, Point::new(400.0, 300.0));

    router.tick(0.0, &mut host);
    router.tick(100.0, &mut host);
    assert_close(host.player.unwrap(), Point::new(130.0, 300.0));
}

#[test]
fn ship_moves_at_capped_speed_and_arrives() {
    let mut router = router();
    let mut host = intro(1);

    router.route_free_touch(&[touch(1, 400.0, 300.0)], &mut host);
    router.tick(0.0, &mut host);
    assert_eq!(host.player, Some(Point::new(100.0, 300.0)));

    router.tick(100.0, &mut host);
    assert_close(host.player.unwrap(), Point::new(130.0, 300.0));

    // A long stall still moves at most one capped step
    router.tick(900.0, &mut host);
    assert_close(host.player.unwrap(), Point::new(160.0, 300.0));

    for i in 1..=20 {
        router.tick(900.0 + 100.0 * i as f64, &mut host);
    }
    assert_close(host.player.unwrap(), Point::new(400.0, 300.0));
}

#[test]
fn ship_snaps_when_close() {
    let mut router = router();
    let mut host = intro(0);
    host.player = Some(Point::new(398.5, 300.0));

    router.route_free_touch(&[touch(1, 400.0, 300.0)], &mut host);
    router.tick(0.0, &mut host);
    assert_eq!(host.player, Some(Point::new(400.0, 300.0)));
}

#[test]
fn ship_stops_following_after_release() {
    let mut router = router();
    let mut host = intro(0);

    router.route_free_touch(&[touch(1, 400.0, 300.0)], &mut host);
    router.tick(0.0, &mut host);
    router.tick(100.0, &mut host);
    router.on_touch_end(touch(1, 400.0, 300.0), &mut host);
    let stopped = host.player;

    router.tick(200.0, &mut host);
    router.tick(300.0, &mut host);
    assert_eq!(host.player, stopped);
}

#[test]
fn intro_stick_claims_without_moving() {
    let mut router = router();
    let mut host = intro(0);

    assert!(router.on_touch_begin(touch(1, 150.0, 100.0), ControlKind::Joystick, &mut host));
    router.tick(0.0, &mut host);
    assert!(host.pressed_keys().is_empty());
}

#[test]
fn intro_fire_holds_primary_action() {
    let mut router = router();
    let mut host = intro(0);

    router.on_touch_begin(touch(2, 700.0, 500.0), ControlKind::FireButton, &mut host);
    assert!(host.primary_action);
}

// ─── Double-tap skip ─────────────────────────────────────────────────────

#[test]
fn double_tap_skips_cutscene() {
    let mut router = router();
    let mut host = playing();
    host.phase = boss_cutscene();

    assert!(!router.on_overlay_tap(touch(1, 300.0, 300.0), 1000.0, &mut host));
    assert!(router.on_overlay_tap(touch(2, 310.0, 290.0), 1200.0, &mut host));
    assert_eq!(host.skips, 1);
}

#[test]
fn slow_second_tap_does_not_skip() {
    let mut router = router();
    let mut host = playing();
    host.phase = boss_cutscene();

    router.on_overlay_tap(touch(1, 300.0, 300.0), 1000.0, &mut host);
    router.on_overlay_tap(touch(2, 300.0, 300.0), 1400.0, &mut host);
    assert_eq!(host.skips, 0);
}

#[test]
fn taps_outside_cutscenes_do_nothing() {
    let mut router = router();
    let mut host = playing();

    router.on_overlay_tap(touch(1, 300.0, 300.0), 1000.0, &mut host);
    assert!(!router.on_overlay_tap(touch(2, 300.0, 300.0), 1100.0, &mut host));
    assert_eq!(host.skips, 0);
}

#[test]
fn first_tap_does_not_carry_across_cutscenes() {
    let mut router = router();
    let mut host = playing();
    host.phase = boss_cutscene();

    router.on_overlay_tap(touch(1, 300.0, 300.0), 1000.0, &mut host);
    // Back to play for a moment, then another cutscene
    host.phase = GamePhase::Playing;
    router.tick(1050.0, &mut host);
    host.phase = boss_cutscene();
    assert!(!router.on_overlay_tap(touch(2, 300.0, 300.0), 1100.0, &mut host));
}

// ─── Mode changes ────────────────────────────────────────────────────────

#[test]
fn leaving_the_intro_releases_ship_drag() {
    let mut router = router();
    let mut host = intro(1);

    router.route_free_touch(&[touch(1, 400.0, 300.0)], &mut host);
    assert!(router.is_active(ControlKind::CutsceneDrag));

    host.phase = GamePhase::Playing;
    router.tick(0.0, &mut host);
    assert!(!router.is_active(ControlKind::CutsceneDrag));
    assert_eq!(router.claimed_by(TouchId(1)), None);
}

#[test]
fn pausing_drops_stick_keys_and_resuming_restores_them() {
    let mut router = router();
    let mut host = playing();

    router.on_touch_begin(touch(1, 150.0, 100.0), ControlKind::Joystick, &mut host);
    assert!(host.direction(Direction::Right));

    host.phase = GamePhase::Other;
    router.tick(0.0, &mut host);
    assert!(host.pressed_keys().is_empty());
    assert!(router.is_active(ControlKind::Joystick), "finger still down");

    host.phase = GamePhase::Playing;
    router.tick(100.0, &mut host);
    assert!(host.direction(Direction::Right));
}

#[test]
fn cutscene_start_releases_primary_action() {
    let mut router = router();
    let mut host = playing();

    router.on_touch_begin(touch(2, 700.0, 500.0), ControlKind::FireButton, &mut host);
    host.phase = boss_cutscene();
    router.tick(0.0, &mut host);
    router.tick(100.0, &mut host);
    assert!(!host.primary_action);
    assert_eq!(host.action_repeats, 0);
}

#[test]
fn visibility_follows_phase() {
    let router = router();
    let mut host = playing();
    assert_eq!(
        router.visibility(&host),
        ControlVisibility {
            joystick: true,
            aim_pad: true,
            fire: true,
            pause: true,
        }
    );

    host.phase = GamePhase::Cutscene {
        id: "willsWayIntro".to_string(),
        step: 1,
    };
    assert_eq!(
        router.visibility(&host),
        ControlVisibility {
            joystick: false,
            aim_pad: false,
            fire: true,
            pause: true,
        }
    );

    for phase in [GamePhase::Preloading, GamePhase::Other, boss_cutscene()] {
        host.phase = phase;
        assert_eq!(router.visibility(&host), ControlVisibility::default());
    }
}
