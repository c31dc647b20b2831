//! Touch input router.
//!
//! Owns every virtual control and turns live touches into writes on the
//! [`GameHost`]. Two event sources drive it: platform touch events
//! (`on_touch_*`, `route_free_touch`, `on_overlay_tap`) and the display
//! frame (`tick`).
//!
//! ## Ownership of host state
//!
//! | Host field | Written by |
//! |------------|-----------|
//! | directional keys | joystick |
//! | cursor | aim pad, else free aim, else cutscene drag |
//! | primary action | fire button |
//! | player position | cutscene drag (per frame) |
//!
//! Any release (end, cancel, or a touch that vanished from the live list)
//! resets what the control wrote, so nothing stays pressed.

use crate::controls::{Claim, ControlKind, FireButton, Joystick, RelativeAim, ShipDrag};
use crate::gesture::DoubleTapDetector;
use crate::input::TouchEvent;
use crate::layout::ControlLayout;
use bell_core::aim::step_toward;
use bell_core::{
    ControlMode, ControlVisibility, ControlsConfig, DirectionFlags, GameHost, TouchId, TouchPoint,
    Vec2, find_touch,
};

/// Why a claim ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    End,
    Cancel,
    /// The touch disappeared from the live list, or the mode changed.
    Lost,
}

pub struct TouchRouter {
    config: ControlsConfig,
    pub layout: ControlLayout,
    joystick: Joystick,
    aim_pad: RelativeAim,
    fire: FireButton,
    pause: Claim,
    free_aim: RelativeAim,
    ship: ShipDrag,
    double_tap: DoubleTapDetector,
    audio_unlocked: bool,
    /// Mode seen on the previous event or frame.
    mode: Option<ControlMode>,
}

impl Default for TouchRouter {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}

impl TouchRouter {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            joystick: Joystick::new(config.joystick.max_radius),
            aim_pad: RelativeAim::new(config.aim.pad_params()),
            free_aim: RelativeAim::new(config.aim.free_params()),
            fire: FireButton::default(),
            pause: Claim::default(),
            ship: ShipDrag::default(),
            double_tap: DoubleTapDetector::new(),
            layout: ControlLayout::new(),
            audio_unlocked: false,
            mode: None,
            config,
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn mode(&self) -> Option<ControlMode> {
        self.mode
    }

    pub fn claim(&self, kind: ControlKind) -> Claim {
        match kind {
            ControlKind::Joystick => self.joystick.claim,
            ControlKind::AimPad => self.aim_pad.claim,
            ControlKind::FireButton => self.fire.claim,
            ControlKind::PauseButton => self.pause,
            ControlKind::FreeAim => self.free_aim.claim,
            ControlKind::CutsceneDrag => self.ship.claim,
        }
    }

    pub fn is_active(&self, kind: ControlKind) -> bool {
        self.claim(kind).is_active()
    }

    /// The control holding `id`, if any.
    pub fn claimed_by(&self, id: TouchId) -> Option<ControlKind> {
        ControlKind::ALL
            .into_iter()
            .find(|kind| self.claim(*kind).holds(id))
    }

    /// Stick thumb offset from the base center, for drawing the handle.
    pub fn joystick_offset(&self) -> Vec2 {
        self.joystick.offset
    }

    /// Which controls should be shown right now.
    pub fn visibility<H: GameHost + ?Sized>(&self, host: &H) -> ControlVisibility {
        ControlVisibility::for_mode(ControlMode::resolve(&host.phase(), &self.config.intro))
    }

    // ─── Touch events ────────────────────────────────────────────────────

    /// A touch started on `target`. Returns `true` if the control claimed it.
    ///
    /// No-op if the control already holds a claim, the control has no
    /// on-screen element, or the current mode doesn't accept the control.
    /// A touch id that begins again while still claimed lost its end
    /// event; its old control is released first.
    pub fn on_touch_begin<H: GameHost + ?Sized>(
        &mut self,
        point: TouchPoint,
        target: ControlKind,
        host: &mut H,
    ) -> bool {
        if let Some(owner) = self.claimed_by(point.id) {
            log::debug!("{} began again while held by {}", point.id, owner.name());
            self.release(owner, Release::Lost, host);
        }
        let mode = self.observe_mode(host);
        let rect = self.layout.rect(target);
        if target.has_element() && rect.is_none() {
            log::debug!("{} has no element, ignoring {}", target.name(), point.id);
            return false;
        }

        let claimed = match target {
            ControlKind::Joystick => {
                let pressed = match rect {
                    Some(base) => self.joystick.press(point.id, base, &self.config.joystick),
                    None => false,
                };
                if pressed {
                    self.joystick.drag(point.pos());
                    if mode == ControlMode::Gameplay {
                        self.apply_stick(host);
                    }
                }
                pressed
            }
            ControlKind::AimPad => {
                mode == ControlMode::Gameplay
                    && self.aim_pad.press(point.id, point.pos(), host.cursor())
            }
            ControlKind::FireButton => {
                let claimed = self.fire.claim.take(point.id);
                if claimed && mode.allows_fire() {
                    host.set_primary_action(true);
                    self.fire.held = true;
                    self.fire.last_pulse_ms = None;
                }
                claimed
            }
            ControlKind::PauseButton => self.pause.take(point.id),
            ControlKind::FreeAim => {
                mode == ControlMode::Gameplay
                    && !self.aim_pad.claim.is_active()
                    && self.free_aim.press(point.id, point.pos(), host.cursor())
            }
            ControlKind::CutsceneDrag => {
                let claimed =
                    mode == ControlMode::InteractiveIntro && self.ship.claim.take(point.id);
                if claimed {
                    self.drag_ship(point, host);
                }
                claimed
            }
        };

        if claimed {
            log::debug!("{} claimed {}", target.name(), point.id);
            if !self.audio_unlocked {
                self.audio_unlocked = true;
                host.unlock_audio();
            }
        }
        claimed
    }

    /// Touches moved. `points` must be every touch still in contact; a
    /// claimed touch missing from it is treated as ended.
    pub fn on_touch_move<H: GameHost + ?Sized>(
        &mut self,
        points: &[TouchPoint],
        host: &mut H,
    ) -> bool {
        let mode = self.observe_mode(host);
        self.release_stale(points, host);

        let mut handled = false;
        if let Some(t) = self.claimed_touch(ControlKind::Joystick, points) {
            self.joystick.drag(t.pos());
            if mode == ControlMode::Gameplay {
                self.apply_stick(host);
            }
            handled = true;
        }
        if let Some(t) = self.claimed_touch(ControlKind::AimPad, points) {
            let sensitivity = host.aim_sensitivity();
            if mode == ControlMode::Gameplay
                && let Some(cursor) = self.aim_pad.aim(t.pos(), host.playfield(), sensitivity)
            {
                host.set_cursor(cursor);
            }
            handled = true;
        }
        for kind in [ControlKind::FreeAim, ControlKind::CutsceneDrag] {
            if let Some(t) = self.claimed_touch(kind, points) {
                self.follow_free(kind, t, host);
                handled = true;
            }
        }
        handled
    }

    pub fn on_touch_end<H: GameHost + ?Sized>(&mut self, point: TouchPoint, host: &mut H) -> bool {
        self.end_touch(point.id, Release::End, host)
    }

    /// Handled exactly like an end, except the pause button does not toggle.
    pub fn on_touch_cancel<H: GameHost + ?Sized>(
        &mut self,
        point: TouchPoint,
        host: &mut H,
    ) -> bool {
        self.end_touch(point.id, Release::Cancel, host)
    }

    /// Route touches on the open playfield to free aiming (gameplay) or
    /// ship dragging (interactive intro).
    ///
    /// Touches held by a named control, or lying on a control or an open
    /// overlay, are skipped; the first remaining touch is used. While the
    /// aim pad holds the cursor, free aiming stays off.
    pub fn route_free_touch<H: GameHost + ?Sized>(
        &mut self,
        points: &[TouchPoint],
        host: &mut H,
    ) -> Option<ControlKind> {
        let kind = match self.observe_mode(host) {
            ControlMode::Gameplay => ControlKind::FreeAim,
            ControlMode::InteractiveIntro => ControlKind::CutsceneDrag,
            ControlMode::Hidden | ControlMode::Cutscene => return None,
        };
        if kind == ControlKind::FreeAim && self.aim_pad.claim.is_active() {
            return None;
        }

        // Keep following the touch we already track
        if let Some(t) = self.claimed_touch(kind, points) {
            self.follow_free(kind, t, host);
            return Some(kind);
        }
        if self.claim(kind).is_active() {
            self.release(kind, Release::Lost, host);
        }

        let candidate = points
            .iter()
            .find(|t| self.claimed_by(t.id).is_none() && !self.layout.blocks(t.pos()))
            .copied()?;
        self.on_touch_begin(candidate, kind, host).then_some(kind)
    }

    /// A touch lifted on a non-interactive cutscene surface. Returns `true`
    /// when it completed a double tap and the cutscene was skipped.
    pub fn on_overlay_tap<H: GameHost + ?Sized>(
        &mut self,
        point: TouchPoint,
        now_ms: f64,
        host: &mut H,
    ) -> bool {
        if !self.observe_mode(host).is_cutscene() {
            return false;
        }
        if self
            .double_tap
            .register(point.pos(), now_ms, &self.config.double_tap)
        {
            log::info!("double tap, skipping cutscene");
            host.skip_cutscene();
            return true;
        }
        false
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Per-frame update: re-derive stick keys (rate limited), keep the fire
    /// button's action alive, and move the dragged ship.
    pub fn tick<H: GameHost + ?Sized>(&mut self, now_ms: f64, host: &mut H) {
        let mode = self.observe_mode(host);

        if mode == ControlMode::Gameplay && self.joystick.claim.is_active() {
            let interval = self.config.joystick.update_interval_ms;
            let due = self
                .joystick
                .last_update_ms
                .is_none_or(|last| now_ms - last >= interval);
            if due {
                self.apply_stick(host);
                self.joystick.last_update_ms = Some(now_ms);
            }
        }

        if self.fire.held {
            match self.fire.last_pulse_ms {
                None => self.fire.last_pulse_ms = Some(now_ms),
                Some(last) if now_ms - last >= self.config.fire.repeat_interval_ms => {
                    host.repeat_primary_action();
                    self.fire.last_pulse_ms = Some(now_ms);
                }
                Some(_) => {}
            }
        }

        if mode == ControlMode::InteractiveIntro {
            self.step_ship(now_ms, host);
        }
    }

    /// Apply one normalized event.
    pub fn dispatch<H: GameHost + ?Sized>(&mut self, event: &TouchEvent, host: &mut H) -> bool {
        match event {
            TouchEvent::Begin { control, touch } => self.on_touch_begin(*touch, *control, host),
            TouchEvent::Move { touches } => self.on_touch_move(touches, host),
            TouchEvent::End { touch } => self.on_touch_end(*touch, host),
            TouchEvent::Cancel { touch } => self.on_touch_cancel(*touch, host),
            TouchEvent::Free { touches } => self.route_free_touch(touches, host).is_some(),
            TouchEvent::OverlayTap { touch, now } => self.on_overlay_tap(*touch, *now, host),
            TouchEvent::Tick { now } => {
                self.tick(*now, host);
                true
            }
        }
    }

    pub fn replay<H: GameHost + ?Sized>(&mut self, events: &[TouchEvent], host: &mut H) {
        for event in events {
            self.dispatch(event, host);
        }
    }

    /// Drop every claim, e.g. when the page loses focus mid-gesture.
    pub fn release_all<H: GameHost + ?Sized>(&mut self, host: &mut H) {
        for kind in ControlKind::ALL {
            if self.claim(kind).is_active() {
                self.release(kind, Release::Lost, host);
            }
        }
        self.double_tap.reset();
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn observe_mode<H: GameHost + ?Sized>(&mut self, host: &mut H) -> ControlMode {
        let mode = ControlMode::resolve(&host.phase(), &self.config.intro);
        if self.mode != Some(mode) {
            log::debug!("control mode {:?} -> {mode:?}", self.mode);
            self.mode = Some(mode);
            self.enter_mode(mode, host);
        }
        mode
    }

    /// Drop whatever the new mode doesn't allow. Claims on the stick and
    /// fire button survive (the finger is still there), but their output is
    /// released.
    fn enter_mode<H: GameHost + ?Sized>(&mut self, mode: ControlMode, host: &mut H) {
        if mode != ControlMode::Gameplay {
            if self.joystick.applied.any() {
                DirectionFlags::NONE.apply(host);
                self.joystick.applied = DirectionFlags::NONE;
            }
            for kind in [ControlKind::AimPad, ControlKind::FreeAim] {
                if self.claim(kind).is_active() {
                    self.release(kind, Release::Lost, host);
                }
            }
        }
        if mode != ControlMode::InteractiveIntro && self.ship.claim.is_active() {
            self.release(ControlKind::CutsceneDrag, Release::Lost, host);
        }
        if !mode.allows_fire() && self.fire.held {
            host.set_primary_action(false);
            self.fire.held = false;
            self.fire.last_pulse_ms = None;
        }
        if !mode.is_cutscene() {
            self.double_tap.reset();
        }
    }

    fn claimed_touch(&self, kind: ControlKind, points: &[TouchPoint]) -> Option<TouchPoint> {
        self.claim(kind)
            .id()
            .and_then(|id| find_touch(points, id))
            .copied()
    }

    fn release_stale<H: GameHost + ?Sized>(&mut self, points: &[TouchPoint], host: &mut H) {
        for kind in ControlKind::ALL {
            if let Some(id) = self.claim(kind).id()
                && find_touch(points, id).is_none()
            {
                log::debug!("{} lost {} without an end event", kind.name(), id);
                self.release(kind, Release::Lost, host);
            }
        }
    }

    fn end_touch<H: GameHost + ?Sized>(&mut self, id: TouchId, cause: Release, host: &mut H) -> bool {
        match self.claimed_by(id) {
            Some(kind) => {
                self.release(kind, cause, host);
                true
            }
            None => false,
        }
    }

    fn release<H: GameHost + ?Sized>(&mut self, kind: ControlKind, cause: Release, host: &mut H) {
        let released = match kind {
            ControlKind::Joystick => {
                let id = self.joystick.release();
                DirectionFlags::NONE.apply(host);
                self.joystick.applied = DirectionFlags::NONE;
                id
            }
            ControlKind::AimPad => self.aim_pad.release(),
            ControlKind::FireButton => {
                let id = self.fire.release();
                host.set_primary_action(false);
                id
            }
            ControlKind::PauseButton => {
                let id = self.pause.release();
                if cause == Release::End && id.is_some() {
                    log::info!("pause toggled");
                    host.toggle_pause();
                }
                id
            }
            ControlKind::FreeAim => self.free_aim.release(),
            ControlKind::CutsceneDrag => self.ship.release(),
        };
        if let Some(id) = released {
            log::debug!("{} released {} ({cause:?})", kind.name(), id);
        }
    }

    fn apply_stick<H: GameHost + ?Sized>(&mut self, host: &mut H) {
        let flags = self.joystick.flags(self.config.joystick.axis_dead_zone);
        if flags != self.joystick.applied {
            log::trace!("stick {:?} -> {flags:?}", self.joystick.offset);
        }
        flags.apply(host);
        self.joystick.applied = flags;
    }

    fn follow_free<H: GameHost + ?Sized>(&mut self, kind: ControlKind, t: TouchPoint, host: &mut H) {
        match kind {
            ControlKind::FreeAim => {
                let sensitivity = host.aim_sensitivity();
                if !self.aim_pad.claim.is_active()
                    && let Some(cursor) = self.free_aim.aim(t.pos(), host.playfield(), sensitivity)
                {
                    host.set_cursor(cursor);
                }
            }
            ControlKind::CutsceneDrag => self.drag_ship(t, host),
            _ => {}
        }
    }

    fn drag_ship<H: GameHost + ?Sized>(&mut self, t: TouchPoint, host: &mut H) {
        let target = self.layout.to_playfield(t.pos(), host.playfield());
        self.ship.target = Some(target);
        host.set_cursor(target);
    }

    fn step_ship<H: GameHost + ?Sized>(&mut self, now_ms: f64, host: &mut H) {
        if !self.ship.claim.is_active() {
            return;
        }
        let (Some(target), Some(player)) = (self.ship.target, host.player_position()) else {
            return;
        };
        let ship = &self.config.ship;
        let dt = self.ship.last_step_ms.map_or(0.0, |last| {
            ((now_ms - last) / 1000.0).max(0.0).min(ship.max_step_seconds)
        });
        self.ship.last_step_ms = Some(now_ms);

        let next = step_toward(player, target, ship.speed * dt, ship.snap_distance);
        let playfield = host.playfield();
        host.set_player_position(playfield.clamp(next));
        host.set_cursor(target);
    }
}
