//! Page elements the controls live in, and reading DOM touches.

use bell_controls::ControlKind;
use bell_core::geometry::client_rect;
use bell_core::{Rect, TouchList, TouchPoint, Vec2};
use web_sys::{Document, Element, HtmlElement};

/// Joystick thumb; translated by the stick offset.
pub const JOYSTICK_HANDLE: &str = "joystickHandle";
pub const CUTSCENE_OVERLAY: &str = "#cutsceneOverlay";
/// Parts of the cutscene overlay that keep their own tap behavior.
pub const CUTSCENE_TAP_EXEMPT: &str = "#cutsceneSkip, .cutscene-text";

/// Where a cutscene double tap was heard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapSurface {
    /// The overlay's own `touchend`; its skip button and caption keep
    /// their taps.
    Overlay,
    /// The canvas `touchend`; only needs the overlay under the finger.
    Canvas,
}

impl TapSurface {
    pub fn accepts(self, on_overlay: bool, on_exempt: bool) -> bool {
        match self {
            Self::Overlay => on_overlay && !on_exempt,
            Self::Canvas => on_overlay,
        }
    }
}

/// Panels that swallow free touches while shown.
pub const UI_PANELS: [&str; 7] = [
    "ui",
    "instructions",
    "settingsUI",
    "craftingUI",
    "shopUI",
    "inventoryUI",
    "tutorialUI",
];

/// Element whose rect is hit-tested and measured for `kind`.
pub fn hit_element_id(kind: ControlKind) -> Option<&'static str> {
    match kind {
        ControlKind::Joystick => Some("joystickBase"),
        ControlKind::AimPad => Some("mobileAimButton"),
        ControlKind::FireButton => Some("mobileShootButton"),
        ControlKind::PauseButton => Some("mobilePauseButton"),
        ControlKind::FreeAim | ControlKind::CutsceneDrag => None,
    }
}

/// Element whose `active` class shows or hides `kind`.
pub fn visibility_element_id(kind: ControlKind) -> Option<&'static str> {
    match kind {
        ControlKind::Joystick => Some("mobileJoystick"),
        other => hit_element_id(other),
    }
}

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn element_rect(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    client_rect(r.left(), r.top(), r.width(), r.height())
}

pub fn rect_by_id(doc: &Document, id: &str) -> Option<Rect> {
    doc.get_element_by_id(id).map(|el| element_rect(&el))
}

/// A panel counts as open while it carries `paused` or `active`.
pub fn is_panel_open(element: &Element) -> bool {
    let classes = element.class_list();
    classes.contains("paused") || classes.contains("active")
}

pub fn set_active(element: &Element, active: bool) {
    let classes = element.class_list();
    let result = if active {
        classes.add_1("active")
    } else {
        classes.remove_1("active")
    };
    if let Err(err) = result {
        log::warn!("could not toggle class on #{}: {err:?}", element.id());
    }
}

pub fn read_touch(touch: &web_sys::Touch) -> TouchPoint {
    TouchPoint::new(
        touch.identifier(),
        f64::from(touch.client_x()),
        f64::from(touch.client_y()),
    )
}

pub fn read_touches(list: &web_sys::TouchList) -> TouchList {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| read_touch(&t))
        .collect()
}

/// CSS transform that centers the handle and shifts it by `offset`.
pub fn handle_transform(offset: Vec2) -> String {
    format!(
        "translate(calc(-50% + {}px), calc(-50% + {}px))",
        offset.x, offset.y
    )
}

pub fn move_handle(handle: &HtmlElement, offset: Vec2) {
    if let Err(err) = handle
        .style()
        .set_property("transform", &handle_transform(offset))
    {
        log::warn!("could not move joystick handle: {err:?}");
    }
}
