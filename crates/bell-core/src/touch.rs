//! Touch points as delivered by the platform.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Platform touch identifier (`Touch.identifier` on the web).
///
/// Only unique among touches that are currently in contact; the platform
/// may reuse an identifier once its contact has ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TouchId(pub i32);

impl fmt::Debug for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One contact point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: TouchId,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self {
            id: TouchId(id),
            x,
            y,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The live touches of one platform event. Rarely more than four fingers.
pub type TouchList = SmallVec<[TouchPoint; 4]>;

/// Look up a touch by identifier.
pub fn find_touch(points: &[TouchPoint], id: TouchId) -> Option<&TouchPoint> {
    points.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_touch_matches_identifier_not_position() {
        let points = [TouchPoint::new(3, 1.0, 1.0), TouchPoint::new(7, 2.0, 2.0)];
        assert_eq!(find_touch(&points, TouchId(7)).map(|t| t.x), Some(2.0));
        assert!(find_touch(&points, TouchId(1)).is_none());
    }

    #[test]
    fn touch_point_json_shape() {
        let json = serde_json::to_string(&TouchPoint::new(2, 10.0, 20.5)).unwrap();
        assert_eq!(json, r#"{"id":2,"x":10.0,"y":20.5}"#);
    }
}
