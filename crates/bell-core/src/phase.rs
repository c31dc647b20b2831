//! Game phases and the control mode derived from them.

use crate::config::IntroConfig;
use serde::{Deserialize, Serialize};

/// What the game core reports it is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GamePhase {
    /// Assets still loading; no ship on screen.
    #[default]
    Preloading,
    Playing,
    /// A cutscene, identified by id, at sub-phase `step`.
    Cutscene { id: String, step: u32 },
    /// Paused, menus, game over.
    Other,
}

/// How touches are interpreted in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Hidden,
    /// Ordinary play: stick moves, aim pad and free touches aim.
    Gameplay,
    /// The interactive steps of the intro: free touches drag the ship.
    InteractiveIntro,
    /// Any other cutscene: only the double-tap skip applies.
    Cutscene,
}

impl ControlMode {
    pub fn resolve(phase: &GamePhase, intro: &IntroConfig) -> Self {
        match phase {
            GamePhase::Playing => ControlMode::Gameplay,
            GamePhase::Cutscene { id, step } => {
                if *id == intro.cutscene_id && intro.interactive_steps.contains(step) {
                    ControlMode::InteractiveIntro
                } else {
                    ControlMode::Cutscene
                }
            }
            GamePhase::Preloading | GamePhase::Other => ControlMode::Hidden,
        }
    }

    /// Whether the fire button may hold the primary action.
    pub fn allows_fire(self) -> bool {
        matches!(self, ControlMode::Gameplay | ControlMode::InteractiveIntro)
    }

    pub fn is_cutscene(self) -> bool {
        matches!(self, ControlMode::InteractiveIntro | ControlMode::Cutscene)
    }
}

/// Which on-screen controls are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlVisibility {
    pub joystick: bool,
    pub aim_pad: bool,
    pub fire: bool,
    pub pause: bool,
}

impl ControlVisibility {
    pub fn for_mode(mode: ControlMode) -> Self {
        match mode {
            ControlMode::Gameplay => Self {
                joystick: true,
                aim_pad: true,
                fire: true,
                pause: true,
            },
            // Logo pages with ships: shoot and pause only
            ControlMode::InteractiveIntro => Self {
                joystick: false,
                aim_pad: false,
                fire: true,
                pause: true,
            },
            ControlMode::Hidden | ControlMode::Cutscene => Self::default(),
        }
    }
}
