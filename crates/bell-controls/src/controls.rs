//! Virtual controls and their claim state.
//!
//! Each control holds at most one touch identifier at a time. A control is
//! active exactly while it holds a claim, so the activation flag can never
//! disagree with the claimed identifier.
//!
//! | Control | Claimed by | Drives |
//! |---------|-----------|--------|
//! | Joystick | touch on the stick base | directional keys |
//! | AimPad | touch on the aim button | cursor (relative) |
//! | FireButton | touch on the fire button | primary action |
//! | PauseButton | touch on the pause button | pause toggle on release |
//! | FreeAim | free canvas touch, gameplay | cursor (relative) |
//! | CutsceneDrag | free touch, interactive intro | ship target + cursor |

use bell_core::aim::{AimParams, relative_aim};
use bell_core::config::JoystickConfig;
use bell_core::stick::{axes, clamp_offset};
use bell_core::{DirectionFlags, Playfield, Point, Rect, TouchId, Vec2};
use serde::{Deserialize, Serialize};

/// The named virtual controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Joystick,
    AimPad,
    FireButton,
    PauseButton,
    FreeAim,
    CutsceneDrag,
}

impl ControlKind {
    pub const ALL: [ControlKind; 6] = [
        ControlKind::Joystick,
        ControlKind::AimPad,
        ControlKind::FireButton,
        ControlKind::PauseButton,
        ControlKind::FreeAim,
        ControlKind::CutsceneDrag,
    ];

    /// Controls with an on-screen element (and so a screen rect).
    pub const BUTTONS: [ControlKind; 4] = [
        ControlKind::Joystick,
        ControlKind::AimPad,
        ControlKind::FireButton,
        ControlKind::PauseButton,
    ];

    pub fn has_element(self) -> bool {
        Self::BUTTONS.contains(&self)
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlKind::Joystick => "joystick",
            ControlKind::AimPad => "aim_pad",
            ControlKind::FireButton => "fire_button",
            ControlKind::PauseButton => "pause_button",
            ControlKind::FreeAim => "free_aim",
            ControlKind::CutsceneDrag => "cutscene_drag",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Exclusive association of one touch with one control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Claim(Option<TouchId>);

impl Claim {
    pub fn id(&self) -> Option<TouchId> {
        self.0
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn holds(&self, id: TouchId) -> bool {
        self.0 == Some(id)
    }

    /// Claim `id` if free. Returns `false` if already claimed.
    pub fn take(&mut self, id: TouchId) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(id);
        true
    }

    pub fn release(&mut self) -> Option<TouchId> {
        self.0.take()
    }
}

// ─── Joystick ────────────────────────────────────────────────────────────

pub struct Joystick {
    pub claim: Claim,
    pub center: Point,
    pub max_radius: f64,
    /// Clamped offset of the thumb from `center`.
    pub offset: Vec2,
    /// Flags last written to the host.
    pub applied: DirectionFlags,
    /// Timestamp of the last per-frame re-derivation.
    pub last_update_ms: Option<f64>,
}

impl Joystick {
    pub fn new(max_radius: f64) -> Self {
        Self {
            claim: Claim::default(),
            center: Point::ORIGIN,
            max_radius,
            offset: Vec2::ZERO,
            applied: DirectionFlags::NONE,
            last_update_ms: None,
        }
    }

    /// Claim the stick and re-measure it from the base's screen rect.
    pub fn press(&mut self, id: TouchId, base: Rect, config: &JoystickConfig) -> bool {
        if !self.claim.take(id) {
            return false;
        }
        self.center = base.center();
        let radius = base.width() / 2.0;
        self.max_radius = if radius > 0.0 {
            radius * config.radius_fraction
        } else {
            config.max_radius
        };
        self.offset = Vec2::ZERO;
        self.last_update_ms = None;
        true
    }

    pub fn drag(&mut self, pos: Point) {
        self.offset = clamp_offset(pos - self.center, self.max_radius);
    }

    pub fn axes(&self) -> Vec2 {
        axes(self.offset, self.max_radius)
    }

    pub fn flags(&self, dead_zone: f64) -> DirectionFlags {
        let a = self.axes();
        DirectionFlags::from_axes(a.x, a.y, dead_zone)
    }

    pub fn release(&mut self) -> Option<TouchId> {
        self.offset = Vec2::ZERO;
        self.last_update_ms = None;
        self.claim.release()
    }
}

// ─── Relative aim (aim pad, free aim) ────────────────────────────────────

pub struct RelativeAim {
    pub claim: Claim,
    /// Touch position at claim time.
    pub anchor_touch: Point,
    /// Cursor position at claim time.
    pub anchor_cursor: Point,
    pub params: AimParams,
}

impl RelativeAim {
    pub fn new(params: AimParams) -> Self {
        Self {
            claim: Claim::default(),
            anchor_touch: Point::ORIGIN,
            anchor_cursor: Point::ORIGIN,
            params,
        }
    }

    pub fn press(&mut self, id: TouchId, touch: Point, cursor: Point) -> bool {
        if !self.claim.take(id) {
            return false;
        }
        self.anchor_touch = touch;
        self.anchor_cursor = cursor;
        true
    }

    /// Cursor for the current touch position, `None` inside the dead zone.
    ///
    /// A positive `sensitivity` (the player's setting) replaces the
    /// configured one.
    pub fn aim(
        &self,
        touch: Point,
        playfield: Playfield,
        sensitivity: Option<f64>,
    ) -> Option<Point> {
        let params = match sensitivity {
            Some(s) if s.is_finite() && s > 0.0 => AimParams {
                sensitivity: s,
                ..self.params
            },
            _ => self.params,
        };
        relative_aim(self.anchor_touch, touch, self.anchor_cursor, &params, playfield)
    }

    pub fn release(&mut self) -> Option<TouchId> {
        self.anchor_touch = Point::ORIGIN;
        self.anchor_cursor = Point::ORIGIN;
        self.claim.release()
    }
}

// ─── Fire button ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FireButton {
    pub claim: Claim,
    /// Whether the primary action is currently held on the host.
    pub held: bool,
    pub last_pulse_ms: Option<f64>,
}

impl FireButton {
    pub fn release(&mut self) -> Option<TouchId> {
        self.held = false;
        self.last_pulse_ms = None;
        self.claim.release()
    }
}

// ─── Cutscene ship drag ──────────────────────────────────────────────────

#[derive(Default)]
pub struct ShipDrag {
    pub claim: Claim,
    /// Where the ship should go, in playfield coordinates.
    pub target: Option<Point>,
    pub last_step_ms: Option<f64>,
}

impl ShipDrag {
    pub fn release(&mut self) -> Option<TouchId> {
        self.target = None;
        self.last_step_ms = None;
        self.claim.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bell_core::geometry::client_rect;

    #[test]
    fn claim_is_exclusive() {
        let mut claim = Claim::default();
        assert!(claim.take(TouchId(1)));
        assert!(!claim.take(TouchId(2)));
        assert!(claim.holds(TouchId(1)));
        assert_eq!(claim.release(), Some(TouchId(1)));
        assert!(!claim.is_active());
    }

    #[test]
    fn joystick_measures_from_base() {
        let mut stick = Joystick::new(45.0);
        // 150px base centered on (100, 100): radius 75, travel 45
        assert!(stick.press(
            TouchId(0),
            client_rect(25.0, 25.0, 150.0, 150.0),
            &JoystickConfig::default()
        ));
        assert_eq!(stick.center, Point::new(100.0, 100.0));
        assert!((stick.max_radius - 45.0).abs() < 1e-9);
    }

    #[test]
    fn joystick_falls_back_to_configured_radius() {
        let mut stick = Joystick::new(10.0);
        stick.press(
            TouchId(0),
            client_rect(50.0, 50.0, 0.0, 0.0),
            &JoystickConfig::default(),
        );
        assert_eq!(stick.max_radius, 45.0);
    }

    #[test]
    fn joystick_release_recenters() {
        let mut stick = Joystick::new(45.0);
        stick.press(
            TouchId(0),
            client_rect(25.0, 25.0, 150.0, 150.0),
            &JoystickConfig::default(),
        );
        stick.drag(Point::new(200.0, 100.0));
        assert!((stick.offset.x - 45.0).abs() < 1e-9);
        stick.release();
        assert_eq!(stick.offset, Vec2::ZERO);
        assert_eq!(stick.flags(0.15), DirectionFlags::NONE);
    }

    #[test]
    fn control_names_round_trip() {
        for kind in ControlKind::ALL {
            assert_eq!(ControlKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ControlKind::from_name("steering_wheel"), None);
    }
}
