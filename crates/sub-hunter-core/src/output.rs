//! Outputs returned by entity behaviors.
//!
//! Behaviors never touch the arena directly. They return [`Output`]s:
//! - [`Command`]: structural changes applied by the resolvers (spawn,
//!   despawn, detonate)
//! - [`Event`]: notifications forwarded to the presentation layer
//!
//! Events that have an audible counterpart map to an [`AudioCue`].
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::output::{AudioCue, Event, Output, OutputKind};
//! use sub_hunter_core::entity::EntityId;
//!
//! let event = Event::ContactPinged { enemy: EntityId::new(2) };
//! assert_eq!(event.cue(), Some(AudioCue::Ping));
//!
//! let output = Output::Event(event);
//! assert_eq!(output.kind(), OutputKind::Event);
//! ```

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntityInner, Kinematics};

// =============================================================================
// Commands
// =============================================================================

/// Request to create a new entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Initial motion state
    pub kinematics: Kinematics,
    /// Kind-specific components
    pub inner: EntityInner,
}

impl SpawnRequest {
    /// Creates a spawn request.
    #[must_use]
    pub fn new(kinematics: Kinematics, inner: EntityInner) -> Self {
        Self { kinematics, inner }
    }
}

/// Structural changes to the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Two explosive entities came within detonation range.
    Detonate {
        /// Entity whose scan found the contact
        source: EntityId,
        /// Entity it collided with
        other: EntityId,
        /// Where the explosion marker goes
        at: Vec2,
    },
    /// Remove an entity at the end of the tick.
    Despawn {
        /// Entity to remove
        target: EntityId,
    },
    /// Create a new entity.
    Spawn(SpawnRequest),
}

// =============================================================================
// Events
// =============================================================================

/// Sounds the presentation layer should play. Fire and forget.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// A detonation
    Explosion,
    /// A contact returned a sonar echo
    Ping,
    /// A torpedo left its tube
    TorpedoLaunch,
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explosion => write!(f, "explosion"),
            Self::Ping => write!(f, "ping"),
            Self::TorpedoLaunch => write!(f, "torpedo launch"),
        }
    }
}

/// Things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Two entities blew each other up.
    Detonation {
        /// Entity whose scan found the contact
        source: EntityId,
        /// Entity it collided with
        other: EntityId,
        /// Explosion position
        at: Vec2,
        /// The spawned explosion marker
        explosion: EntityId,
    },
    /// A submarine fired a torpedo.
    TorpedoLaunched {
        /// Firing submarine
        source: EntityId,
        /// The new torpedo
        torpedo: EntityId,
    },
    /// An enemy was revealed by the sonar pulse.
    ContactPinged {
        /// The revealed enemy
        enemy: EntityId,
    },
    /// An enemy picked a new patrol waypoint.
    WaypointChanged {
        /// The enemy
        enemy: EntityId,
        /// Its new waypoint
        target: Vec2,
    },
    /// The player's destruction sequence finished; the session should close.
    GameOver {
        /// The destroyed player
        player: EntityId,
    },
}

impl Event {
    /// Returns the sound associated with this event, if any.
    #[must_use]
    pub const fn cue(&self) -> Option<AudioCue> {
        match self {
            Self::Detonation { .. } => Some(AudioCue::Explosion),
            Self::TorpedoLaunched { .. } => Some(AudioCue::TorpedoLaunch),
            Self::ContactPinged { .. } => Some(AudioCue::Ping),
            Self::WaypointChanged { .. } | Self::GameOver { .. } => None,
        }
    }

    /// Returns true for the terminal close signal.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver { .. })
    }
}

// =============================================================================
// Output
// =============================================================================

/// Output category, used to route outputs to resolvers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// [`Command`] outputs
    Command,
    /// [`Event`] outputs
    Event,
}

/// A single behavior output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Structural change request
    Command(Command),
    /// Notification
    Event(Event),
}

impl Output {
    /// Returns the category of this output.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Command(_) => OutputKind::Command,
            Self::Event(_) => OutputKind::Event,
        }
    }

    /// Returns the command, if this is one.
    #[must_use]
    pub const fn as_command(&self) -> Option<&Command> {
        match self {
            Self::Command(c) => Some(c),
            Self::Event(_) => None,
        }
    }

    /// Returns the event, if this is one.
    #[must_use]
    pub const fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(e) => Some(e),
            Self::Command(_) => None,
        }
    }
}

impl From<Command> for Output {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Event> for Output {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}
