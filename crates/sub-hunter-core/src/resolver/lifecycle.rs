//! Lifecycle resolver: entity creation and removal.
//!
//! Spawned trail markers are linked into their parent ship's trail list.
//! Despawns only mark; the end-of-tick [`compact`] drops marked entities and
//! unlinks removed trail markers from their parents.

use tracing::trace;

use crate::arena::Arena;
use crate::entity::{Entity, EntityInner};
use crate::output::{Command, Event, Output, OutputKind};

use super::Resolver;

/// Resolver for [`Command::Spawn`] and [`Command::Despawn`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LifecycleResolver;

impl Resolver for LifecycleResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Command]
    }

    fn resolve(&self, outputs: &[&Output], arena: &mut Arena, _events: &mut Vec<Event>) {
        for output in outputs {
            match output.as_command() {
                Some(Command::Spawn(request)) => {
                    let parent = match &request.inner {
                        EntityInner::Trail(trail) => Some(trail.parent),
                        _ => None,
                    };
                    let id = arena.spawn(request.kinematics.clone(), request.inner.clone());
                    trace!(entity = %id, tag = %request.inner.tag(), "spawned");
                    if let Some(parent) = parent {
                        match arena.get_mut(parent).and_then(Entity::as_player_mut) {
                            Some(ship) => ship.trails.push(id),
                            None => trace!(trail = %id, %parent, "trail parent missing"),
                        }
                    }
                }
                Some(Command::Despawn { target }) => {
                    arena.mark_for_removal(*target);
                }
                Some(Command::Detonate { .. }) | None => {}
            }
        }
    }
}

/// Drops every marked entity and unlinks removed trail markers.
///
/// Returns the removed entities in ID order.
pub fn compact(arena: &mut Arena) -> Vec<Entity> {
    let removed = arena.compact();
    for entity in &removed {
        let Some(trail) = entity.as_trail() else {
            continue;
        };
        if let Some(ship) = arena.get_mut(trail.parent).and_then(Entity::as_player_mut) {
            ship.trails.retain(|id| *id != entity.id());
        }
    }
    removed
}
