//! Arena module: the sole owner of every simulated entity.
//!
//! The Arena provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - Entity lifecycle management (spawn, mark for removal, compact)
//! - Tick tracking
//!
//! # Removal
//!
//! Entities are never structurally removed while a tick is running. A
//! destroyed entity is *marked* with [`Arena::mark_for_removal`]; marked
//! entities are invisible to the live iterators and are dropped by
//! [`Arena::compact`] once every entity has been updated. Marking an entity
//! twice, or marking one that no longer exists, is a no-op that returns
//! `false`.
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::arena::Arena;
//! use sub_hunter_core::entity::{EntityInner, Kinematics, ExplosionComponents};
//! use glam::Vec2;
//!
//! let mut arena = Arena::new();
//! let id = arena.spawn(
//!     Kinematics::new(Vec2::ZERO, 0.0, 360.0),
//!     EntityInner::Explosion(ExplosionComponents::default()),
//! );
//!
//! assert!(arena.mark_for_removal(id));
//! assert!(!arena.mark_for_removal(id));
//! assert!(!arena.is_live(id));
//!
//! let removed = arena.compact();
//! assert_eq!(removed.len(), 1);
//! assert!(arena.get(id).is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::{Entity, EntityId, EntityInner, EntityTag, Kinematics};

/// Container for all simulation entities.
///
/// Iteration is always in ascending [`EntityId`] order. IDs are assigned
/// monotonically, so newer entities iterate after older ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arena {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Entities destroyed this tick, awaiting compaction.
    pending_removal: BTreeSet<EntityId>,
    /// Current simulation tick.
    tick: u64,
}

impl Arena {
    /// Creates a new empty arena at tick 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a new entity and returns its ID.
    pub fn spawn(&mut self, kinematics: Kinematics, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        self.entities.insert(id, Entity::new(id, kinematics, inner));
        id
    }

    /// Returns an entity by ID, including entities marked for removal.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns a mutable entity by ID, including entities marked for removal.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns a live (present and not marked) entity by ID.
    #[must_use]
    pub fn get_live(&self, id: EntityId) -> Option<&Entity> {
        if self.pending_removal.contains(&id) {
            return None;
        }
        self.entities.get(&id)
    }

    /// Returns true if the entity exists and is not marked for removal.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.get_live(id).is_some()
    }

    /// Temporarily removes an entity so it can be updated in isolation.
    ///
    /// The caller must hand it back with [`Arena::restore`].
    pub fn take(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Returns an entity previously obtained from [`Arena::take`].
    pub fn restore(&mut self, entity: Entity) {
        self.entities.insert(entity.id(), entity);
    }

    /// Marks an entity for removal at the end of the tick.
    ///
    /// Returns `false` if the entity is absent or already marked.
    pub fn mark_for_removal(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            trace!(entity = %id, "removal of absent entity ignored");
            return false;
        }
        if !self.pending_removal.insert(id) {
            trace!(entity = %id, "entity already marked for removal");
            return false;
        }
        true
    }

    /// Returns true if the entity is awaiting compaction.
    #[must_use]
    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removal.contains(&id)
    }

    /// Drops every marked entity and returns them in ID order.
    pub fn compact(&mut self) -> Vec<Entity> {
        let pending = std::mem::take(&mut self.pending_removal);
        pending
            .into_iter()
            .filter_map(|id| self.entities.remove(&id))
            .collect()
    }

    /// Returns an iterator over all entity IDs in sorted order.
    pub fn entity_ids_sorted(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Returns an iterator over all entities in sorted order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Returns an iterator over mutable entities in sorted order.
    pub fn entities_sorted_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.values_mut()
    }

    /// Returns an iterator over live entities in sorted order.
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .values()
            .filter(move |e| !self.pending_removal.contains(&e.id()))
    }

    /// Returns the IDs of live entities of the given kind.
    pub fn ids_with_tag(&self, tag: EntityTag) -> impl Iterator<Item = EntityId> + '_ {
        self.live_entities()
            .filter(move |e| e.tag() == tag)
            .map(Entity::id)
    }

    /// Returns the number of stored entities, including marked ones.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of live entities of the given kind.
    #[must_use]
    pub fn count_tag(&self, tag: EntityTag) -> usize {
        self.ids_with_tag(tag).count()
    }

    /// Returns true if the arena holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns the current simulation tick.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the simulation tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }
}
