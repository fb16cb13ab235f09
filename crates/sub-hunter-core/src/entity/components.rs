//! Component structs for each entity kind.
//!
//! Every entity carries one [`Kinematics`] block. The kind-specific state
//! lives in the `*Components` structs stored in
//! [`EntityInner`](super::EntityInner).

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::math::FULL_TURN;

// =============================================================================
// Flags
// =============================================================================

bitflags! {
    /// Detonation-related flags.
    ///
    /// `EXPLODED` is terminal: once set it is never cleared.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct EntityFlags: u8 {
        /// Can trigger and be triggered by proximity detonation.
        const EXPLOSIVE = 1 << 0;
        /// Has detonated; excluded from further detonation.
        const EXPLODED = 1 << 1;
    }
}

impl Default for EntityFlags {
    fn default() -> Self {
        Self::EXPLOSIVE
    }
}

// =============================================================================
// Kinematics
// =============================================================================

/// Shared motion state of every entity.
///
/// Position is in the unbounded world frame. Heading is in degrees clockwise
/// from "up" and stays within `(0, 360]` once steered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// World position.
    pub position: Vec2,
    /// Speed along the heading; negative is astern.
    pub speed: f32,
    /// Compass heading in degrees.
    pub heading: f32,
    /// Last computed acceleration (`thrust / 10 - speed * drag`).
    pub acceleration: f32,
    /// Drive term set by the pilot or AI.
    pub thrust: f32,
    /// Detonation flags.
    pub flags: EntityFlags,
}

impl Kinematics {
    /// Creates explosive kinematics at `position` with the given speed and heading.
    #[must_use]
    pub fn new(position: Vec2, speed: f32, heading: f32) -> Self {
        Self {
            position,
            speed,
            heading,
            acceleration: 0.0,
            thrust: 0.0,
            flags: EntityFlags::EXPLOSIVE,
        }
    }

    /// Creates stationary, non-explosive kinematics (trail markers).
    #[must_use]
    pub fn stationary(position: Vec2) -> Self {
        Self {
            flags: EntityFlags::empty(),
            ..Self::new(position, 0.0, FULL_TURN)
        }
    }

    /// Sets the thrust, builder style.
    #[must_use]
    pub fn with_thrust(mut self, thrust: f32) -> Self {
        self.thrust = thrust;
        self
    }

    /// Sets or clears the explosive flag, builder style.
    #[must_use]
    pub fn with_explosive(mut self, explosive: bool) -> Self {
        self.flags.set(EntityFlags::EXPLOSIVE, explosive);
        self
    }

    /// Returns true if this entity can take part in a detonation.
    #[must_use]
    pub fn is_explosive(&self) -> bool {
        self.flags.contains(EntityFlags::EXPLOSIVE)
    }

    /// Returns true once the entity has detonated.
    #[must_use]
    pub fn is_exploded(&self) -> bool {
        self.flags.contains(EntityFlags::EXPLODED)
    }

    /// Returns true if this entity may detonate right now.
    #[must_use]
    pub fn is_live_explosive(&self) -> bool {
        self.is_explosive() && !self.is_exploded()
    }

    /// Arms or disarms the entity.
    pub fn set_explosive(&mut self, explosive: bool) {
        self.flags.set(EntityFlags::EXPLOSIVE, explosive);
    }

    /// Marks the entity as exploded and stops it.
    ///
    /// Returns `false` if it had already exploded.
    pub fn detonate(&mut self) -> bool {
        self.speed = 0.0;
        if self.is_exploded() {
            return false;
        }
        self.flags.insert(EntityFlags::EXPLODED);
        true
    }
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, FULL_TURN)
    }
}

// =============================================================================
// Submarines
// =============================================================================

/// Steering and weapon state shared by the player and enemies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmarineState {
    /// Seconds until the next torpedo can be fired; never negative.
    pub torpedo_time: f32,
    /// Degrees applied to the heading each tick.
    pub change_angle: f32,
}

impl SubmarineState {
    /// Returns true when a torpedo can be fired.
    #[must_use]
    pub fn torpedo_ready(&self) -> bool {
        self.torpedo_time == 0.0
    }
}

/// Components for the player's submarine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerComponents {
    /// Steering and torpedo state.
    pub submarine: SubmarineState,
    /// Discrete throttle level set by the controls.
    pub throttle: i32,
    /// Sonar pulse phase: 0 when idle.
    pub ping_time: u32,
    /// Handles of this ship's trail markers, oldest first.
    pub trails: Vec<EntityId>,
    /// Seconds since destruction; `None` while intact.
    pub explosion_time: Option<f32>,
    /// Whether the close signal has already been raised.
    pub game_over: bool,
}

impl PlayerComponents {
    /// Returns true while a sonar pulse is expanding.
    #[must_use]
    pub fn is_pinging(&self) -> bool {
        self.ping_time > 0
    }
}

/// Enemy behavior states.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Wander between random waypoints.
    #[default]
    Patrol,
}

/// Components for an enemy submarine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyComponents {
    /// Steering and torpedo state.
    pub submarine: SubmarineState,
    /// Current patrol waypoint.
    pub target: Vec2,
    /// Heading toward the waypoint.
    pub target_heading: f32,
    /// Behavior state.
    pub state: EnemyState,
    /// Revealed by the current sonar pulse.
    pub pinged: bool,
    /// Display jitter for the unrevealed blur.
    pub offset: Vec2,
}

// =============================================================================
// Transient entities
// =============================================================================

/// Components for a torpedo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorpedoComponents {
    /// Seconds since launch.
    pub age: f32,
    /// Age at which the torpedo is removed.
    pub lifetime: f32,
    /// Age after which the torpedo is armed.
    pub fuse_length: f32,
}

impl TorpedoComponents {
    /// Creates a freshly launched torpedo.
    #[must_use]
    pub fn new(lifetime: f32, fuse_length: f32) -> Self {
        Self {
            age: 0.0,
            lifetime,
            fuse_length,
        }
    }

    /// Returns true once the fuse has burned down.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.age > self.fuse_length
    }

    /// Returns true once the torpedo has outlived its lifetime.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.age > self.lifetime
    }
}

impl Default for TorpedoComponents {
    fn default() -> Self {
        Self::new(7.0, 1.0)
    }
}

/// Components for a wake marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailComponents {
    /// Ship that dropped the marker. Lookup only.
    pub parent: EntityId,
    /// Seconds since the marker was dropped.
    pub age: f32,
}

impl TrailComponents {
    /// Creates a new marker for `parent`.
    #[must_use]
    pub fn new(parent: EntityId) -> Self {
        Self { parent, age: 0.0 }
    }
}

/// Components for an explosion marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplosionComponents {
    /// Seconds since the detonation.
    pub age: f32,
}
