//! Read-only view of the arena handed to a behavior during its update.
//!
//! The entity being updated is taken out of the arena for the duration of
//! its update, so it never appears in its own view. Entities marked for
//! removal earlier in the tick are hidden as well.

use crate::arena::Arena;
use crate::entity::{Entity, EntityId, EntityTag};

/// Read-only access to every other live entity.
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    arena: &'a Arena,
    tick: u64,
}

impl<'a> WorldView<'a> {
    /// Creates a view over `arena` for the given tick.
    #[must_use]
    pub fn new(arena: &'a Arena, tick: u64) -> Self {
        Self { arena, tick }
    }

    /// Returns the tick being simulated.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns a live entity by ID.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&'a Entity> {
        self.arena.get_live(id)
    }

    /// Iterates every live entity visible to the caller, in ID order.
    pub fn others(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        self.arena.live_entities()
    }

    /// Returns the first live entity of the given kind.
    #[must_use]
    pub fn first_of(&self, tag: EntityTag) -> Option<&'a Entity> {
        self.others().find(|e| e.tag() == tag)
    }
}
