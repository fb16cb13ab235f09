//! Behavior system: per-kind update logic.
//!
//! Each entity kind has one [`Behavior`] that advances it by one tick. A
//! behavior receives exclusive access to its own entity and a read-only
//! [`WorldView`] of everything else, and returns [`Output`]s describing
//! structural changes (spawns, removals, detonations) and events.
//!
//! # Registry
//!
//! The [`BehaviorRegistry`] maps each [`EntityTag`] to its behavior.
//! [`BehaviorRegistry::default_bundles`] registers the stock behaviors from
//! [`crate::behaviors`].
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::behavior::{Behavior, BehaviorRegistry, TickContext};
//! use sub_hunter_core::entity::{Entity, EntityTag};
//! use sub_hunter_core::output::Output;
//! use std::sync::Arc;
//!
//! struct Frozen;
//!
//! impl Behavior for Frozen {
//!     fn name(&self) -> &'static str {
//!         "frozen"
//!     }
//!
//!     fn update(&self, _entity: &mut Entity, _ctx: &mut TickContext<'_>) -> Vec<Output> {
//!         vec![]
//!     }
//! }
//!
//! let mut registry = BehaviorRegistry::default_bundles();
//! registry.register(EntityTag::Enemy, Arc::new(Frozen));
//! assert_eq!(registry.behavior_for(EntityTag::Enemy).map(|b| b.name()), Some("frozen"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;

use crate::behaviors::{
    EnemyBehavior, ExplosionBehavior, PlayerBehavior, TorpedoBehavior, TrailBehavior,
};
use crate::config::SimConfig;
use crate::entity::{Entity, EntityTag};
use crate::output::Output;
use crate::world_view::WorldView;

/// Everything a behavior may consult while updating one entity.
pub struct TickContext<'a> {
    /// Seconds covered by this tick.
    pub dt: f32,
    /// Simulation constants.
    pub config: &'a SimConfig,
    /// Every other live entity.
    pub view: WorldView<'a>,
    /// Seeded random source.
    pub rng: &'a mut dyn RngCore,
}

impl fmt::Debug for TickContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickContext")
            .field("dt", &self.dt)
            .field("tick", &self.view.tick())
            .finish_non_exhaustive()
    }
}

/// Per-kind update logic.
pub trait Behavior: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Advances `entity` by one tick.
    ///
    /// The entity is not part of `ctx.view`. Mutations to other entities
    /// must be expressed as returned outputs.
    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output>;
}

/// Maps entity kinds to their behaviors.
#[derive(Default)]
pub struct BehaviorRegistry {
    behaviors: HashMap<EntityTag, Arc<dyn Behavior>>,
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .behaviors
            .iter()
            .map(|(tag, b)| format!("{tag}={}", b.name()))
            .collect();
        names.sort();
        f.debug_struct("BehaviorRegistry")
            .field("behaviors", &names)
            .finish()
    }
}

impl BehaviorRegistry {
    /// Creates an empty registry. Unregistered kinds are never updated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the stock behavior for every kind.
    #[must_use]
    pub fn default_bundles() -> Self {
        let mut registry = Self::new();
        registry.register(EntityTag::Player, Arc::new(PlayerBehavior));
        registry.register(EntityTag::Enemy, Arc::new(EnemyBehavior));
        registry.register(EntityTag::Torpedo, Arc::new(TorpedoBehavior));
        registry.register(EntityTag::Trail, Arc::new(TrailBehavior));
        registry.register(EntityTag::Explosion, Arc::new(ExplosionBehavior));
        registry
    }

    /// Registers `behavior` for `tag`, replacing any previous one.
    pub fn register(&mut self, tag: EntityTag, behavior: Arc<dyn Behavior>) {
        self.behaviors.insert(tag, behavior);
    }

    /// Returns the behavior for `tag`, if any.
    #[must_use]
    pub fn behavior_for(&self, tag: EntityTag) -> Option<&Arc<dyn Behavior>> {
        self.behaviors.get(&tag)
    }

    /// Returns the number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Returns true if no behavior is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}
