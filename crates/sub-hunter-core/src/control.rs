//! Pilot controls.
//!
//! A [`ControlCommand`] is what the input collaborator produces from key
//! events. Commands other than [`ControlCommand::FireTorpedo`] only touch the
//! player's own components and are applied by [`apply_to_player`]; firing
//! needs the arena and is handled by the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::entity::PlayerComponents;

/// Discrete pilot input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlCommand {
    /// Start turning to port.
    TurnLeft,
    /// Start turning to starboard.
    TurnRight,
    /// Stop turning.
    StopTurn,
    /// Emit a sonar pulse.
    Ping,
    /// Raise the throttle one step.
    IncreaseThrust,
    /// Lower the throttle one step.
    DecreaseThrust,
    /// Launch a torpedo if one is loaded.
    FireTorpedo,
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TurnLeft => "turn left",
            Self::TurnRight => "turn right",
            Self::StopTurn => "stop turn",
            Self::Ping => "ping",
            Self::IncreaseThrust => "increase thrust",
            Self::DecreaseThrust => "decrease thrust",
            Self::FireTorpedo => "fire torpedo",
        };
        f.write_str(name)
    }
}

/// Applies a non-firing command to the player's components.
///
/// Returns false for [`ControlCommand::FireTorpedo`], which is not handled
/// here.
pub fn apply_to_player(
    player: &mut PlayerComponents,
    command: ControlCommand,
    config: &SimConfig,
) -> bool {
    let throttle = &config.throttle;
    match command {
        ControlCommand::TurnLeft => player.submarine.change_angle = -config.turn_rate,
        ControlCommand::TurnRight => player.submarine.change_angle = config.turn_rate,
        ControlCommand::StopTurn => player.submarine.change_angle = 0.0,
        ControlCommand::Ping => player.ping_time = 1,
        ControlCommand::IncreaseThrust => {
            player.throttle = (player.throttle + throttle.step).min(throttle.max);
        }
        ControlCommand::DecreaseThrust => {
            player.throttle = (player.throttle - throttle.step).max(throttle.min);
        }
        ControlCommand::FireTorpedo => return false,
    }
    true
}

/// HUD label for a throttle level. Unknown levels read `"ERROR"`.
#[must_use]
pub const fn speed_label(level: i32) -> &'static str {
    match level {
        -10 => "Astern Slow",
        0 => "All Stop",
        10 => "Ahead Slow",
        20 => "Ahead Standard",
        30 => "Ahead Flank",
        _ => "ERROR",
    }
}
