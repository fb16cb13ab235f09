//! Explosion marker behavior: grow for a few seconds, then disappear.
//!
//! Markers are spawned already exploded, so they never take part in a
//! detonation themselves.

use crate::behavior::{Behavior, TickContext};
use crate::entity::{Entity, EntityInner};
use crate::output::{Command, Output};

/// Behavior for [`EntityTag::Explosion`](crate::entity::EntityTag::Explosion).
#[derive(Debug, Default, Clone, Copy)]
pub struct ExplosionBehavior;

impl Behavior for ExplosionBehavior {
    fn name(&self) -> &'static str {
        "explosion"
    }

    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output> {
        let id = entity.id();
        let EntityInner::Explosion(explosion) = entity.inner_mut() else {
            return Vec::new();
        };
        if explosion.age > ctx.config.explosion_lifetime {
            return vec![Command::Despawn { target: id }.into()];
        }
        explosion.age += ctx.dt;
        Vec::new()
    }
}
