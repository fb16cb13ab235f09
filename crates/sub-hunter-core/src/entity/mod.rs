//! Entity types for the simulation.
//!
//! - [`EntityId`]: Stable handle into the [`Arena`](crate::arena::Arena)
//! - [`EntityTag`]: Kind classification used for behavior dispatch
//! - [`EntityInner`]: Kind-specific component storage
//! - [`Entity`]: Shared [`Kinematics`] plus the inner components
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::entity::{Entity, EntityId, EntityInner, EntityTag, Kinematics};
//! use sub_hunter_core::entity::components::TorpedoComponents;
//! use glam::Vec2;
//!
//! let torpedo = Entity::new(
//!     EntityId::new(7),
//!     Kinematics::new(Vec2::ZERO, 40.0, 90.0).with_explosive(false),
//!     EntityInner::Torpedo(TorpedoComponents::default()),
//! );
//!
//! assert_eq!(torpedo.tag(), EntityTag::Torpedo);
//! assert!(!torpedo.kinematics().is_explosive());
//! ```

pub mod components;

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use components::{
    EnemyComponents, EnemyState, EntityFlags, ExplosionComponents, Kinematics, PlayerComponents,
    SubmarineState, TorpedoComponents, TrailComponents,
};

/// Unique identifier for an entity.
///
/// IDs are assigned monotonically by the arena and never reused, so a stale
/// handle can only ever miss, never alias a newer entity.
///
/// # Example
///
/// ```
/// use sub_hunter_core::entity::EntityId;
///
/// let id1 = EntityId::new(1);
/// let id2 = EntityId::new(2);
///
/// assert!(id1 < id2);
/// assert_eq!(id1.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Entity kind, used to select the behavior that updates an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    /// The pilot's submarine
    Player,
    /// A patrolling enemy submarine
    Enemy,
    /// A timed-fuse torpedo
    Torpedo,
    /// A fading wake marker
    Trail,
    /// A transient explosion marker
    Explosion,
}

impl EntityTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Player,
        Self::Enemy,
        Self::Torpedo,
        Self::Trail,
        Self::Explosion,
    ];

    /// Returns true for kinds that steer and fire torpedoes.
    #[must_use]
    pub const fn is_submarine(self) -> bool {
        matches!(self, Self::Player | Self::Enemy)
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Enemy => write!(f, "Enemy"),
            Self::Torpedo => write!(f, "Torpedo"),
            Self::Trail => write!(f, "Trail"),
            Self::Explosion => write!(f, "Explosion"),
        }
    }
}

/// Kind-specific component storage.
///
/// The variant is the single source of truth for an entity's [`EntityTag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityInner {
    /// Player submarine components
    Player(PlayerComponents),
    /// Enemy submarine components
    Enemy(EnemyComponents),
    /// Torpedo components
    Torpedo(TorpedoComponents),
    /// Trail marker components
    Trail(TrailComponents),
    /// Explosion marker components
    Explosion(ExplosionComponents),
}

impl EntityInner {
    /// Returns the corresponding `EntityTag` for this inner storage.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Player(_) => EntityTag::Player,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Torpedo(_) => EntityTag::Torpedo,
            Self::Trail(_) => EntityTag::Trail,
            Self::Explosion(_) => EntityTag::Explosion,
        }
    }

    /// Returns the shared submarine state for players and enemies.
    #[must_use]
    pub const fn submarine(&self) -> Option<&SubmarineState> {
        match self {
            Self::Player(c) => Some(&c.submarine),
            Self::Enemy(c) => Some(&c.submarine),
            _ => None,
        }
    }

    /// Mutable variant of [`EntityInner::submarine`].
    #[must_use]
    pub fn submarine_mut(&mut self) -> Option<&mut SubmarineState> {
        match self {
            Self::Player(c) => Some(&mut c.submarine),
            Self::Enemy(c) => Some(&mut c.submarine),
            _ => None,
        }
    }

    /// Returns the age of transient entities.
    #[must_use]
    pub const fn age(&self) -> Option<f32> {
        match self {
            Self::Torpedo(c) => Some(c.age),
            Self::Trail(c) => Some(c.age),
            Self::Explosion(c) => Some(c.age),
            Self::Player(_) | Self::Enemy(_) => None,
        }
    }
}

/// A complete entity: identity, motion, and kind-specific state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
    kinematics: Kinematics,
    inner: EntityInner,
}

impl Entity {
    /// Creates a new entity.
    #[must_use]
    pub const fn new(id: EntityId, kinematics: Kinematics, inner: EntityInner) -> Self {
        Self {
            id,
            kinematics,
            inner,
        }
    }

    /// Returns the entity's unique identifier.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's kind.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.inner.tag()
    }

    /// Returns the shared motion state.
    #[must_use]
    pub const fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Returns the shared motion state mutably.
    #[must_use]
    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    /// Returns the world position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    /// Returns the kind-specific components.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns the kind-specific components mutably.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Splits the entity into its motion and kind-specific parts.
    pub fn parts_mut(&mut self) -> (&mut Kinematics, &mut EntityInner) {
        (&mut self.kinematics, &mut self.inner)
    }

    /// Returns the player components if this is the player.
    #[must_use]
    pub const fn as_player(&self) -> Option<&PlayerComponents> {
        match &self.inner {
            EntityInner::Player(c) => Some(c),
            _ => None,
        }
    }

    /// Returns mutable player components if this is the player.
    #[must_use]
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        match &mut self.inner {
            EntityInner::Player(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the enemy components if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyComponents> {
        match &self.inner {
            EntityInner::Enemy(c) => Some(c),
            _ => None,
        }
    }

    /// Returns mutable enemy components if this is an enemy.
    #[must_use]
    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyComponents> {
        match &mut self.inner {
            EntityInner::Enemy(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the torpedo components if this is a torpedo.
    #[must_use]
    pub const fn as_torpedo(&self) -> Option<&TorpedoComponents> {
        match &self.inner {
            EntityInner::Torpedo(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the trail components if this is a trail marker.
    #[must_use]
    pub const fn as_trail(&self) -> Option<&TrailComponents> {
        match &self.inner {
            EntityInner::Trail(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the explosion components if this is an explosion marker.
    #[must_use]
    pub const fn as_explosion(&self) -> Option<&ExplosionComponents> {
        match &self.inner {
            EntityInner::Explosion(c) => Some(c),
            _ => None,
        }
    }
}
