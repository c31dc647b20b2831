//! Screen and playfield geometry.
//!
//! Touches arrive in client (screen) coordinates; the game core works in
//! playfield (canvas) coordinates. Both use `kurbo` points and rects.

use kurbo::{Point, Rect};

/// The playfield (canvas) dimensions in game pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Playfield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a point into `[0, width] × [0, height]`.
    ///
    /// Never panics, even on a zero-sized or unmeasured playfield.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.max(0.0).min(self.width),
            p.y.max(0.0).min(self.height),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Inclusive hit test: points on any edge count as inside.
///
/// `kurbo::Rect::contains` excludes the max edges; DOM client rects are
/// tested inclusively.
pub fn rect_contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Build a rect from DOM-style `left, top, width, height`.
pub fn client_rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::from_origin_size((left, top), (width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_inside_points() {
        let field = Playfield::new(800.0, 600.0);
        assert_eq!(field.clamp(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    }

    #[test]
    fn clamp_pulls_outside_points_to_edges() {
        let field = Playfield::new(800.0, 600.0);
        assert_eq!(field.clamp(Point::new(-5.0, 900.0)), Point::new(0.0, 600.0));
        assert_eq!(field.clamp(Point::new(1e9, -1e9)), Point::new(800.0, 0.0));
    }

    #[test]
    fn clamp_on_empty_playfield_collapses_to_origin() {
        let field = Playfield::new(0.0, 0.0);
        assert_eq!(field.clamp(Point::new(42.0, 7.0)), Point::ORIGIN);
    }

    #[test]
    fn rect_contains_is_inclusive() {
        let r = client_rect(10.0, 10.0, 20.0, 20.0);
        assert!(rect_contains(&r, Point::new(10.0, 10.0)));
        assert!(rect_contains(&r, Point::new(30.0, 30.0)));
        assert!(!rect_contains(&r, Point::new(30.1, 30.0)));
        assert!(!rect_contains(&r, Point::new(9.9, 15.0)));
    }
}
