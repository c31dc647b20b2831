//! Screen rectangles of the on-screen controls and open overlays.
//!
//! Rects are in client coordinates, as measured from the page. A control
//! whose element is missing simply has no rect: it can't be claimed and
//! doesn't block free touches.

use crate::controls::ControlKind;
use bell_core::{Playfield, Point, Rect, rect_contains};

#[derive(Debug, Clone, Default)]
pub struct ControlLayout {
    joystick: Option<Rect>,
    aim_pad: Option<Rect>,
    fire: Option<Rect>,
    pause: Option<Rect>,
    /// Game canvas in client coordinates; its origin maps to playfield (0, 0).
    pub canvas: Option<Rect>,
    /// Open overlay panels (settings, shop, …) keyed by element id.
    overlays: Vec<(String, Rect)>,
}

impl ControlLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(&self, kind: ControlKind) -> Option<Rect> {
        match kind {
            ControlKind::Joystick => self.joystick,
            ControlKind::AimPad => self.aim_pad,
            ControlKind::FireButton => self.fire,
            ControlKind::PauseButton => self.pause,
            ControlKind::FreeAim | ControlKind::CutsceneDrag => None,
        }
    }

    /// Set or clear a control's rect. Free-touch controls have no element
    /// and are ignored.
    pub fn set_rect(&mut self, kind: ControlKind, rect: Option<Rect>) {
        let slot = match kind {
            ControlKind::Joystick => &mut self.joystick,
            ControlKind::AimPad => &mut self.aim_pad,
            ControlKind::FireButton => &mut self.fire,
            ControlKind::PauseButton => &mut self.pause,
            ControlKind::FreeAim | ControlKind::CutsceneDrag => return,
        };
        *slot = rect;
    }

    /// Open (`Some`) or close (`None`) an overlay panel.
    pub fn set_overlay(&mut self, id: &str, rect: Option<Rect>) {
        self.overlays.retain(|(existing, _)| existing != id);
        if let Some(rect) = rect {
            self.overlays.push((id.to_string(), rect));
        }
    }

    pub fn open_overlays(&self) -> impl Iterator<Item = &str> {
        self.overlays.iter().map(|(id, _)| id.as_str())
    }

    /// The named control whose rect contains `p`, if any.
    pub fn hit_control(&self, p: Point) -> Option<ControlKind> {
        ControlKind::BUTTONS
            .into_iter()
            .find(|kind| self.rect(*kind).is_some_and(|r| rect_contains(&r, p)))
    }

    /// Whether `p` lands on a control or an open overlay, i.e. is not
    /// available for free aiming.
    pub fn blocks(&self, p: Point) -> bool {
        self.hit_control(p).is_some() || self.overlays.iter().any(|(_, r)| rect_contains(r, p))
    }

    /// Convert a client point to playfield coordinates, clamped.
    pub fn to_playfield(&self, p: Point, playfield: Playfield) -> Point {
        let origin = self.canvas.map(|c| c.origin()).unwrap_or(Point::ORIGIN);
        playfield.clamp(Point::new(p.x - origin.x, p.y - origin.y))
    }
}
