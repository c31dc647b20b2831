//! WASM bridge for Beyond Bell touch controls.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards its DOM
//! touch events and animation frames to a `TouchControls` instance, which
//! routes them to the JavaScript `game` object.

mod dom;
mod host;

use bell_controls::{ControlKind, TouchRouter};
use bell_core::geometry::client_rect;
use bell_core::{ControlVisibility, ControlsConfig};
use dom::TapSurface;
use host::JsGameHost;
use log::LevelFilter;
use serde::Serialize;
use std::str::FromStr;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, TouchEvent};

/// Touch controls for one game session.
///
/// Every handler is a no-op until `attach_game` has been called.
#[wasm_bindgen]
pub struct TouchControls {
    router: TouchRouter,
    game: Option<JsGameHost>,
    preloading: bool,
}

#[wasm_bindgen]
impl TouchControls {
    /// Create the controls. `config_json` overrides the defaults; an
    /// invalid config is logged and the defaults are used.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        console_setup();

        let config = match config_json.as_deref().map(ControlsConfig::from_json) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log::warn!("{err}; using default controls config");
                ControlsConfig::default()
            }
            None => ControlsConfig::default(),
        };

        let mut controls = Self {
            router: TouchRouter::new(config),
            game: None,
            preloading: true,
        };
        controls.measure();
        controls
    }

    /// Hand over the game object once it exists.
    pub fn attach_game(&mut self, game: JsValue) {
        let mut host = JsGameHost::new(game);
        host.preloading = self.preloading;
        self.game = Some(host);
        self.measure();
        log::info!("touch controls attached to game");
    }

    /// Mirror the preload overlay; controls stay hidden while it is up.
    pub fn set_preloading(&mut self, preloading: bool) {
        self.preloading = preloading;
        if let Some(host) = self.game.as_mut() {
            host.preloading = preloading;
        }
    }

    /// Change the console log level ("error" … "trace").
    pub fn set_log_level(&self, level: &str) -> bool {
        match parse_level(level) {
            Ok(filter) => {
                log::set_max_level(filter);
                true
            }
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Re-read the on-screen rects of the controls and the game canvas.
    pub fn measure(&mut self) {
        for kind in ControlKind::BUTTONS {
            self.measure_control(kind);
        }
        self.measure_canvas();
        self.refresh_overlays();
    }

    /// Override a control's rect in client pixels.
    pub fn set_control_rect(&mut self, name: &str, left: f64, top: f64, width: f64, height: f64) {
        match ControlKind::from_name(name) {
            Some(kind) => self
                .router
                .layout
                .set_rect(kind, Some(client_rect(left, top, width, height))),
            None => log::warn!("unknown control {name:?}"),
        }
    }

    /// Mark a UI panel (by element id) as open or closed for free-touch
    /// exclusion.
    pub fn set_overlay_open(&mut self, id: &str, open: bool) {
        let rect = if open {
            dom::document().and_then(|doc| dom::rect_by_id(&doc, id))
        } else {
            None
        };
        if open && rect.is_none() {
            log::warn!("overlay #{id} not found");
        }
        self.router.layout.set_overlay(id, rect);
    }

    // ─── Touch handlers ──────────────────────────────────────────────────

    /// `touchstart` on a control element. Returns `true` if claimed.
    pub fn control_touch_start(&mut self, control: &str, event: &TouchEvent) -> bool {
        let Some(kind) = ControlKind::from_name(control) else {
            log::warn!("unknown control {control:?}");
            return false;
        };
        let Some(touch) = event.changed_touches().item(0) else {
            return false;
        };
        // The stick is re-measured on every press
        self.measure_control(kind);
        let Some(host) = self.game.as_mut() else {
            return false;
        };
        let claimed = self
            .router
            .on_touch_begin(dom::read_touch(&touch), kind, host);
        if claimed {
            event.prevent_default();
        }
        claimed
    }

    /// `touchmove` anywhere on the page.
    pub fn touch_move(&mut self, event: &TouchEvent) -> bool {
        if self.router.is_active(ControlKind::CutsceneDrag) {
            self.measure_canvas();
        }
        let Some(host) = self.game.as_mut() else {
            return false;
        };
        let live = dom::read_touches(&event.touches());
        let handled = self.router.on_touch_move(&live, host);
        if handled {
            event.prevent_default();
        }
        handled
    }

    pub fn touch_end(&mut self, event: &TouchEvent) -> bool {
        self.end_changed(event, false)
    }

    pub fn touch_cancel(&mut self, event: &TouchEvent) -> bool {
        self.end_changed(event, true)
    }

    /// `touchstart`/`touchmove` on the game canvas or a cutscene surface.
    pub fn canvas_touch(&mut self, event: &TouchEvent) -> bool {
        if self.game.is_none() {
            return false;
        }
        // The canvas may have scrolled or resized since attach
        self.measure_canvas();
        self.refresh_overlays();
        let Some(host) = self.game.as_mut() else {
            return false;
        };
        let live = dom::read_touches(&event.touches());
        match self.router.route_free_touch(&live, host) {
            Some(kind) => {
                log::trace!("free touch routed to {}", kind.name());
                event.prevent_default();
                true
            }
            None => false,
        }
    }

    /// `touchend` on the cutscene overlay; a double tap skips. Taps on the
    /// skip button or caption are left alone.
    pub fn overlay_touch_end(&mut self, event: &TouchEvent, now: f64) -> bool {
        self.skip_tap(event, now, TapSurface::Overlay)
    }

    /// `touchend` on the game canvas; a double tap skips while the cutscene
    /// overlay is under the finger.
    pub fn canvas_touch_end(&mut self, event: &TouchEvent, now: f64) -> bool {
        self.skip_tap(event, now, TapSurface::Canvas)
    }

    /// Drop every claim, e.g. on `blur` or `visibilitychange`.
    pub fn release_all(&mut self) {
        if let Some(host) = self.game.as_mut() {
            self.router.release_all(host);
        }
    }

    // ─── Frame ───────────────────────────────────────────────────────────

    /// Call once per animation frame with `performance.now()`.
    pub fn tick(&mut self, now: f64) {
        let visibility = match self.game.as_mut() {
            Some(host) => {
                self.router.tick(now, host);
                self.router.visibility(&*host)
            }
            None => ControlVisibility::default(),
        };
        self.apply_visibility(visibility);
        self.draw_handle();
    }

    /// Router state as JSON, for debugging overlays.
    pub fn status_json(&self) -> String {
        let status = Status {
            attached: self.game.is_some(),
            preloading: self.preloading,
            claims: ControlKind::ALL
                .into_iter()
                .filter_map(|kind| Some((kind, self.router.claim(kind).id()?.0)))
                .collect(),
            joystick_offset: [
                self.router.joystick_offset().x,
                self.router.joystick_offset().y,
            ],
        };
        serde_json::to_string(&status).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }
}

// ─── Internals ───────────────────────────────────────────────────────────

impl TouchControls {
    fn measure_canvas(&mut self) {
        if let Some(canvas) = self.game.as_ref().and_then(JsGameHost::canvas_element) {
            self.router.layout.canvas = Some(dom::element_rect(&canvas));
        }
    }

    fn skip_tap(&mut self, event: &TouchEvent, now: f64, surface: TapSurface) -> bool {
        let Some(touch) = event.changed_touches().item(0) else {
            return false;
        };
        let point = dom::read_touch(&touch);
        if !is_skip_surface(point.x, point.y, surface) {
            return false;
        }
        let Some(host) = self.game.as_mut() else {
            return false;
        };
        let skipped = self.router.on_overlay_tap(point, now, host);
        if skipped {
            event.prevent_default();
            event.stop_propagation();
        }
        skipped
    }

    fn measure_control(&mut self, kind: ControlKind) {
        let Some(id) = dom::hit_element_id(kind) else {
            return;
        };
        let rect = dom::document().and_then(|doc| dom::rect_by_id(&doc, id));
        if rect.is_none() && self.router.layout.rect(kind).is_none() {
            log::warn!("control element #{id} not found");
        }
        if rect.is_some() {
            self.router.layout.set_rect(kind, rect);
        }
    }

    fn refresh_overlays(&mut self) {
        let Some(doc) = dom::document() else {
            return;
        };
        for id in dom::UI_PANELS {
            let rect = doc
                .get_element_by_id(id)
                .filter(dom::is_panel_open)
                .map(|el| dom::element_rect(&el));
            self.router.layout.set_overlay(id, rect);
        }
    }

    fn end_changed(&mut self, event: &TouchEvent, cancelled: bool) -> bool {
        let Some(host) = self.game.as_mut() else {
            return false;
        };
        let mut handled = false;
        for touch in dom::read_touches(&event.changed_touches()) {
            handled |= if cancelled {
                self.router.on_touch_cancel(touch, host)
            } else {
                self.router.on_touch_end(touch, host)
            };
        }
        if handled {
            event.prevent_default();
        }
        handled
    }

    fn apply_visibility(&self, visibility: ControlVisibility) {
        let Some(doc) = dom::document() else {
            return;
        };
        let shown = [
            (ControlKind::Joystick, visibility.joystick),
            (ControlKind::AimPad, visibility.aim_pad),
            (ControlKind::FireButton, visibility.fire),
            (ControlKind::PauseButton, visibility.pause),
        ];
        for (kind, show) in shown {
            if let Some(el) = dom::visibility_element_id(kind).and_then(|id| doc.get_element_by_id(id))
            {
                dom::set_active(&el, show);
            }
        }
    }

    fn draw_handle(&self) {
        let handle = dom::document()
            .and_then(|doc| doc.get_element_by_id(dom::JOYSTICK_HANDLE))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(handle) = handle {
            dom::move_handle(&handle, self.router.joystick_offset());
        }
    }
}

#[derive(Serialize)]
struct Status {
    attached: bool,
    preloading: bool,
    claims: Vec<(ControlKind, i32)>,
    joystick_offset: [f64; 2],
}

/// Whether a tap at client `(x, y)` counts toward a double-tap skip on
/// `surface`.
fn is_skip_surface(x: f64, y: f64, surface: TapSurface) -> bool {
    let Some(target) = dom::document().and_then(|doc| doc.element_from_point(x as f32, y as f32))
    else {
        return false;
    };
    let exempt = target
        .closest(dom::CUTSCENE_TAP_EXEMPT)
        .ok()
        .flatten()
        .is_some();
    let on_overlay = target
        .closest(dom::CUTSCENE_OVERLAY)
        .ok()
        .flatten()
        .is_some();
    surface.accepts(on_overlay, exempt)
}

/// Install the panic hook and console logger (once).
fn console_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SETUP: Once = Once::new();
        SETUP.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Bell controls WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
            let _ = console_log::init_with_level(log::Level::Info);
        });
    }
}

/// Parse a level name ("warn", "debug", …), case-insensitive.
fn parse_level(name: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(name.trim()).map_err(|_| format!("unknown log level: {name:?}"))
}

// ─── Standalone functions ────────────────────────────────────────────────

/// Validate a controls config. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    let result = match ControlsConfig::from_json(json) {
        Ok(_) => serde_json::json!({ "ok": true }),
        Err(e) => serde_json::json!({ "ok": false, "error": e }),
    };
    result.to_string()
}

/// The default controls config as pretty JSON, as a starting point for
/// overrides.
#[wasm_bindgen]
pub fn default_config_json() -> String {
    serde_json::to_string_pretty(&ControlsConfig::default()).unwrap_or_default()
}
