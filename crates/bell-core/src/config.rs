//! Tunable control parameters.
//!
//! Every field has a default matching the shipped game feel, so a config
//! JSON only needs to list what it overrides:
//!
//! ```json
//! { "aim": { "sensitivity": 900 }, "double_tap": { "max_delay_ms": 250 } }
//! ```

use crate::aim::AimParams;
use serde::{Deserialize, Serialize};

/// All router settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub joystick: JoystickConfig,
    pub aim: AimConfig,
    pub fire: FireConfig,
    pub ship: ShipConfig,
    pub double_tap: DoubleTapConfig,
    pub intro: IntroConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    /// Max stick travel in px when the base has not been measured.
    pub max_radius: f64,
    /// Max travel as a fraction of the measured base radius.
    pub radius_fraction: f64,
    /// Axis magnitude (0..1) a direction must exceed to press.
    pub axis_dead_zone: f64,
    /// Minimum time between per-frame key re-derivations.
    pub update_interval_ms: f64,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            max_radius: 45.0,
            radius_fraction: 0.6,
            axis_dead_zone: 0.15,
            update_interval_ms: 16.0,
        }
    }
}

/// Shared by the aim pad and free-touch aiming; only the falloff differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    pub dead_zone_px: f64,
    pub sensitivity: f64,
    /// Frame time the per-move displacement is scaled by.
    pub frame_seconds: f64,
    /// Drag distance at which the aim pad reaches full speed.
    pub pad_falloff: f64,
    /// Drag distance at which free-touch aiming reaches full speed.
    pub free_falloff: f64,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            dead_zone_px: 5.0,
            sensitivity: 600.0,
            frame_seconds: 0.016,
            pad_falloff: 100.0,
            free_falloff: 200.0,
        }
    }
}

impl AimConfig {
    pub fn pad_params(&self) -> AimParams {
        self.params(self.pad_falloff)
    }

    pub fn free_params(&self) -> AimParams {
        self.params(self.free_falloff)
    }

    fn params(&self, falloff: f64) -> AimParams {
        AimParams {
            dead_zone: self.dead_zone_px,
            sensitivity: self.sensitivity,
            falloff,
            frame_seconds: self.frame_seconds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub repeat_interval_ms: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            repeat_interval_ms: 50.0,
        }
    }
}

/// Ship-follows-touch smoothing during the interactive intro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Pixels per second.
    pub speed: f64,
    pub snap_distance: f64,
    /// Upper bound on one frame's time step.
    pub max_step_seconds: f64,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: 300.0,
            snap_distance: 2.0,
            max_step_seconds: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleTapConfig {
    pub max_delay_ms: f64,
    /// Per-axis distance between the two taps.
    pub max_distance: f64,
}

impl Default for DoubleTapConfig {
    fn default() -> Self {
        Self {
            max_delay_ms: 300.0,
            max_distance: 50.0,
        }
    }
}

/// Which cutscene steps hand the ship to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub cutscene_id: String,
    pub interactive_steps: Vec<u32>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            cutscene_id: "willsWayIntro".to_string(),
            interactive_steps: vec![0, 1],
        }
    }
}

impl ControlsConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: ControlsConfig = serde_json::from_str(json).map_err(|e| {
            log::debug!("controls config rejected at {}:{}", e.line(), e.column());
            format!("invalid controls config: {e}")
        })?;
        if let Err(err) = config.validate() {
            log::debug!("controls config failed validation: {err}");
            return Err(err);
        }
        log::trace!("controls config loaded: {config:?}");
        Ok(config)
    }

    /// Reject values that would make the math degenerate.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("joystick.max_radius", self.joystick.max_radius),
            ("joystick.radius_fraction", self.joystick.radius_fraction),
            ("aim.sensitivity", self.aim.sensitivity),
            ("aim.frame_seconds", self.aim.frame_seconds),
            ("aim.pad_falloff", self.aim.pad_falloff),
            ("aim.free_falloff", self.aim.free_falloff),
            ("fire.repeat_interval_ms", self.fire.repeat_interval_ms),
            ("ship.speed", self.ship.speed),
            ("ship.max_step_seconds", self.ship.max_step_seconds),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }

        let non_negative = [
            ("joystick.axis_dead_zone", self.joystick.axis_dead_zone),
            ("joystick.update_interval_ms", self.joystick.update_interval_ms),
            ("aim.dead_zone_px", self.aim.dead_zone_px),
            ("ship.snap_distance", self.ship.snap_distance),
            ("double_tap.max_delay_ms", self.double_tap.max_delay_ms),
            ("double_tap.max_distance", self.double_tap.max_distance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must be zero or more, got {value}"));
            }
        }

        if self.joystick.axis_dead_zone >= 1.0 {
            return Err(format!(
                "joystick.axis_dead_zone must be below 1.0, got {}",
                self.joystick.axis_dead_zone
            ));
        }
        Ok(())
    }
}
