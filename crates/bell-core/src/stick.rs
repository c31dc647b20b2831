//! Virtual joystick math.

use kurbo::Vec2;

/// Limit a stick offset to `max_radius`, keeping its direction.
pub fn clamp_offset(offset: Vec2, max_radius: f64) -> Vec2 {
    let length = offset.hypot();
    if length > max_radius && length > 0.0 {
        offset * (max_radius / length)
    } else {
        offset
    }
}

/// Stick axes in `[-1, 1]` for an already clamped offset.
pub fn axes(offset: Vec2, max_radius: f64) -> Vec2 {
    if max_radius <= 0.0 {
        return Vec2::ZERO;
    }
    offset / max_radius
}
