//! Wake marker behavior.
//!
//! Markers never move. They age every tick and ask to be removed once they
//! reach the trail's maximum age; the lifecycle resolver then unlinks them
//! from their parent ship. A destroyed player's wake is frozen in place for
//! the game-over screen.

use crate::behavior::{Behavior, TickContext};
use crate::entity::{Entity, EntityInner};
use crate::output::{Command, Output};

/// Behavior for [`EntityTag::Trail`](crate::entity::EntityTag::Trail).
#[derive(Debug, Default, Clone, Copy)]
pub struct TrailBehavior;

impl Behavior for TrailBehavior {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output> {
        let id = entity.id();
        let EntityInner::Trail(trail) = entity.inner_mut() else {
            return Vec::new();
        };
        let parent_destroyed = ctx
            .view
            .get(trail.parent)
            .and_then(Entity::as_player)
            .is_some_and(|p| p.explosion_time.is_some());
        if parent_destroyed {
            return Vec::new();
        }
        trail.age += ctx.dt;
        if trail.age >= ctx.config.trail.max_age {
            vec![Command::Despawn { target: id }.into()]
        } else {
            Vec::new()
        }
    }
}
