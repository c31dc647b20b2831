//! Relative aiming and ship-follow math.
//!
//! Aiming is relative: the cursor moves from where it was when the drag
//! started, by an amount that grows with drag distance:
//!
//! ```text
//! distance  = |touch - anchor_touch|            (no movement if <= dead_zone)
//! falloff   = min(1, distance / falloff_distance)
//! cursor    = anchor_cursor + dir * sensitivity * falloff * frame_seconds
//! ```
//!
//! The aim pad and free-touch aiming share this formula so both feel the
//! same; they differ only in `falloff`.

use crate::geometry::Playfield;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimParams {
    pub dead_zone: f64,
    pub sensitivity: f64,
    pub falloff: f64,
    pub frame_seconds: f64,
}

/// Cursor displacement for a drag vector, or `None` inside the dead zone.
pub fn aim_displacement(drag: Vec2, params: &AimParams) -> Option<Vec2> {
    let distance = drag.hypot();
    if distance <= params.dead_zone || distance == 0.0 {
        return None;
    }
    let dir = drag / distance;
    let falloff = if params.falloff > 0.0 {
        (distance / params.falloff).min(1.0)
    } else {
        1.0
    };
    Some(dir * (params.sensitivity * falloff * params.frame_seconds))
}

/// New cursor position for a relative drag, clamped to the playfield.
pub fn relative_aim(
    anchor_touch: Point,
    touch: Point,
    anchor_cursor: Point,
    params: &AimParams,
    playfield: Playfield,
) -> Option<Point> {
    aim_displacement(touch - anchor_touch, params).map(|d| playfield.clamp(anchor_cursor + d))
}

/// Move `current` toward `target` by at most `max_step`.
///
/// Snaps when within `snap` of the target, and never overshoots on either
/// axis.
pub fn step_toward(current: Point, target: Point, max_step: f64, snap: f64) -> Point {
    let delta = target - current;
    let distance = delta.hypot();
    if distance <= snap || distance == 0.0 {
        return target;
    }
    let step = delta * (max_step / distance);
    let x = if step.x.abs() > delta.x.abs() {
        target.x
    } else {
        current.x + step.x
    };
    let y = if step.y.abs() > delta.y.abs() {
        target.y
    } else {
        current.y + step.y
    };
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: AimParams = AimParams {
        dead_zone: 5.0,
        sensitivity: 600.0,
        falloff: 100.0,
        frame_seconds: 0.016,
    };

    #[test]
    fn drag_inside_dead_zone_does_nothing() {
        assert_eq!(aim_displacement(Vec2::new(3.0, 4.0), &PAD), None);
        assert_eq!(aim_displacement(Vec2::ZERO, &PAD), None);
    }

    #[test]
    fn small_drag_moves_a_small_step() {
        // |(10, 5)| ≈ 11.18 → falloff 0.1118 → |Δ| ≈ 1.073
        let d = aim_displacement(Vec2::new(10.0, 5.0), &PAD).unwrap();
        assert!((d.hypot() - 600.0 * 0.016 * (125f64.sqrt() / 100.0)).abs() < 1e-9);
        assert!(d.x > 0.0 && d.y > 0.0);
        assert!((d.x / d.y - 2.0).abs() < 1e-9, "direction preserved");
    }

    #[test]
    fn displacement_grows_then_saturates() {
        let mut last = 0.0;
        for distance in [6.0, 20.0, 50.0, 99.0, 100.0] {
            let step = aim_displacement(Vec2::new(distance, 0.0), &PAD)
                .unwrap()
                .hypot();
            assert!(step > last, "step at {distance} should exceed {last}");
            last = step;
        }
        let capped = 600.0 * 0.016;
        for distance in [100.0, 150.0, 1000.0] {
            let step = aim_displacement(Vec2::new(0.0, distance), &PAD)
                .unwrap()
                .hypot();
            assert!((step - capped).abs() < 1e-9);
        }
    }

    #[test]
    fn relative_aim_clamps_to_playfield() {
        let field = Playfield::new(800.0, 600.0);
        let p = relative_aim(
            Point::new(0.0, 0.0),
            Point::new(500.0, 0.0),
            Point::new(799.0, 10.0),
            &PAD,
            field,
        )
        .unwrap();
        assert_eq!(p, Point::new(800.0, 10.0));
    }

    #[test]
    fn step_toward_snaps_when_close() {
        let p = step_toward(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 30.0, 2.0);
        assert_eq!(p, Point::new(1.0, 1.0));
    }

    #[test]
    fn step_toward_moves_at_most_max_step() {
        let p = step_toward(Point::new(0.0, 0.0), Point::new(300.0, 0.0), 30.0, 2.0);
        assert!((p.x - 30.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn step_toward_never_overshoots() {
        let p = step_toward(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 30.0, 2.0);
        assert_eq!(p, Point::new(10.0, 0.0));
    }
}
