//! Double-tap detection for skipping cutscenes.

use bell_core::Point;
use bell_core::config::DoubleTapConfig;

/// Remembers the previous tap and reports when a second tap lands close
/// enough in time and space.
#[derive(Debug, Clone, Default)]
pub struct DoubleTapDetector {
    last: Option<(f64, Point)>,
}

impl DoubleTapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tap at `pos` and time `now_ms`.
    ///
    /// Returns `true` when this tap completes a double tap; the detector
    /// then resets, so a third tap starts a new pair.
    pub fn register(&mut self, pos: Point, now_ms: f64, config: &DoubleTapConfig) -> bool {
        if let Some((time, prev)) = self.last
            && now_ms - time < config.max_delay_ms
            && (pos.x - prev.x).abs() < config.max_distance
            && (pos.y - prev.y).abs() < config.max_distance
        {
            self.last = None;
            return true;
        }
        self.last = Some((now_ms, pos));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
