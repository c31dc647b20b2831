//! `GameHost` over the page's JavaScript `game` object.
//!
//! Fields are read and written through `js_sys::Reflect`; a missing field
//! reads as absent and a missing method is skipped, so a partially built
//! game object never throws into the router.

use bell_core::{GameHost, GamePhase, Key, Playfield, Point};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

pub struct JsGameHost {
    game: JsValue,
    /// Set while the preload overlay is up; the phase then reads as
    /// preloading regardless of `gameState`.
    pub preloading: bool,
}

impl JsGameHost {
    pub fn new(game: JsValue) -> Self {
        Self {
            game,
            preloading: false,
        }
    }

    /// The game's `<canvas>`, for mapping client coordinates.
    pub fn canvas_element(&self) -> Option<Element> {
        get(&self.game, "canvas")?.dyn_into::<Element>().ok()
    }
}

impl GameHost for JsGameHost {
    fn phase(&self) -> GamePhase {
        if self.preloading {
            return GamePhase::Preloading;
        }
        let state = get(&self.game, "gameState").and_then(|v| v.as_string());
        let cutscene = get(&self.game, "cutsceneId").and_then(|v| v.as_string());
        let step = get_f64(&self.game, "cutscenePhase");
        parse_phase(state.as_deref(), cutscene.as_deref(), step)
    }

    fn playfield(&self) -> Playfield {
        let Some(canvas) = get(&self.game, "canvas") else {
            return Playfield::default();
        };
        match (get_f64(&canvas, "width"), get_f64(&canvas, "height")) {
            (Some(w), Some(h)) => Playfield::new(w, h),
            _ => Playfield::default(),
        }
    }

    fn player_position(&self) -> Option<Point> {
        read_point(&get(&self.game, "player")?)
    }

    fn cursor(&self) -> Point {
        get(&self.game, "mouse")
            .and_then(|mouse| read_point(&mouse))
            .unwrap_or(Point::ORIGIN)
    }

    fn aim_sensitivity(&self) -> Option<f64> {
        get(&self.game, "settings")
            .and_then(|settings| get_f64(&settings, "gamepadSensitivity"))
            .filter(|s| s.is_finite() && *s > 0.0)
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        if let Some(keys) = get(&self.game, "keys") {
            set(&keys, key.code(), JsValue::from_bool(pressed));
        }
    }

    fn set_cursor(&mut self, pos: Point) {
        if let Some(mouse) = get(&self.game, "mouse") {
            write_point(&mouse, pos);
        }
    }

    fn set_primary_action(&mut self, held: bool) {
        set(&self.game, "mouseDown", JsValue::from_bool(held));
    }

    fn set_player_position(&mut self, pos: Point) {
        if let Some(player) = get(&self.game, "player") {
            write_point(&player, pos);
        }
    }

    fn toggle_pause(&mut self) {
        call(&self.game, "togglePause");
    }

    fn skip_cutscene(&mut self) {
        call(&self.game, "skipCutscene");
    }

    fn unlock_audio(&mut self) {
        let Some(audio) = get(&self.game, "audio") else {
            return;
        };
        if method(&audio, "init").is_none() {
            return;
        }
        call(&audio, "init");

        if let Some(pending) = get(&audio, "pendingMusic") {
            play_quietly(&pending);
            set(&audio, "pendingMusic", JsValue::NULL);
        }

        let state = get(&self.game, "gameState").and_then(|v| v.as_string());
        let music = get(&audio, "currentMusic").and_then(|v| v.as_string());
        let start = should_start_main_music(
            state.as_deref(),
            truthy(&self.game, "cutsceneId"),
            truthy(&self.game, "isPaused"),
            music.as_deref(),
            truthy(&audio, "currentMusicElement"),
        );
        if start && let Some(func) = method(&self.game, "startMainMusicIfAllowed") {
            let options = Object::new();
            set(&options, "fadeIn", JsValue::TRUE);
            if let Err(err) = func.call1(&self.game, &options) {
                log::warn!("startMainMusicIfAllowed() threw: {err:?}");
            }
        }
    }
}

/// Whether unlocking audio should also start the main theme: only in
/// live gameplay, and only when no other track is set or the main one
/// was queued without an element.
pub fn should_start_main_music(
    state: Option<&str>,
    in_cutscene: bool,
    paused: bool,
    current_music: Option<&str>,
    has_music_element: bool,
) -> bool {
    if state != Some("playing") || in_cutscene || paused {
        return false;
    }
    match current_music {
        None | Some("") => true,
        Some("main") => !has_music_element,
        Some(_) => false,
    }
}

/// Map the game's `gameState` / `cutsceneId` / `cutscenePhase` fields.
///
/// A cutscene without a usable step number gets `u32::MAX`, which no
/// interactive step matches.
pub fn parse_phase(state: Option<&str>, cutscene: Option<&str>, step: Option<f64>) -> GamePhase {
    match state {
        Some("playing") => GamePhase::Playing,
        Some("cutscene") => GamePhase::Cutscene {
            id: cutscene.unwrap_or_default().to_string(),
            step: step
                .filter(|s| s.is_finite() && *s >= 0.0 && s.fract() == 0.0)
                .map_or(u32::MAX, |s| s as u32),
        },
        _ => GamePhase::Other,
    }
}

// ─── Reflect helpers ─────────────────────────────────────────────────────

fn get(obj: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn get_f64(obj: &JsValue, key: &str) -> Option<f64> {
    get(obj, key)?.as_f64()
}

fn set(obj: &JsValue, key: &str, value: JsValue) {
    if Reflect::set(obj, &JsValue::from_str(key), &value).is_err() {
        log::warn!("could not set game field {key}");
    }
}

fn truthy(obj: &JsValue, key: &str) -> bool {
    get(obj, key).is_some_and(|v| v.is_truthy())
}

fn method(obj: &JsValue, name: &str) -> Option<Function> {
    get(obj, name)?.dyn_into::<Function>().ok()
}

/// Call `obj[name]()` if it is a function.
fn call(obj: &JsValue, name: &str) {
    let Some(func) = method(obj, name) else {
        log::warn!("game has no {name}()");
        return;
    };
    if let Err(err) = func.call0(obj) {
        log::warn!("{name}() threw: {err:?}");
    }
}

/// `element.play()`, swallowing the autoplay rejection.
fn play_quietly(element: &JsValue) {
    let Some(play) = method(element, "play") else {
        return;
    };
    match play.call0(element) {
        Ok(result) => {
            if let Ok(promise) = result.dyn_into::<Promise>() {
                let ignore = Closure::<dyn FnMut(JsValue)>::new(|err: JsValue| {
                    log::debug!("pending music blocked: {err:?}");
                });
                let _ = promise.catch(&ignore);
                ignore.forget();
            }
        }
        Err(err) => log::debug!("pending music play() threw: {err:?}"),
    }
}

fn read_point(obj: &JsValue) -> Option<Point> {
    Some(Point::new(get_f64(obj, "x")?, get_f64(obj, "y")?))
}

fn write_point(obj: &JsValue, p: Point) {
    set(obj, "x", JsValue::from_f64(p.x));
    set(obj, "y", JsValue::from_f64(p.y));
}
