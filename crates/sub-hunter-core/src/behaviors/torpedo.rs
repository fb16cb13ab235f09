//! Torpedo behavior: run straight, arm after the fuse, expire after the lifetime.

use tracing::trace;

use crate::behavior::{Behavior, TickContext};
use crate::behaviors::kinematics;
use crate::entity::{Entity, EntityInner};
use crate::output::{Command, Output};

/// Behavior for [`EntityTag::Torpedo`](crate::entity::EntityTag::Torpedo).
#[derive(Debug, Default, Clone, Copy)]
pub struct TorpedoBehavior;

impl Behavior for TorpedoBehavior {
    fn name(&self) -> &'static str {
        "torpedo"
    }

    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output> {
        let id = entity.id();
        let (motion, inner) = entity.parts_mut();
        let EntityInner::Torpedo(torpedo) = inner else {
            return Vec::new();
        };

        let mut outputs = kinematics::advance(id, motion, ctx);
        torpedo.age += ctx.dt;
        if !motion.is_explosive() && torpedo.is_armed() {
            trace!(torpedo = %id, "armed");
            motion.set_explosive(true);
        }
        if torpedo.is_expired() {
            trace!(torpedo = %id, age = torpedo.age, "expired");
            outputs.push(Command::Despawn { target: id }.into());
        }
        outputs
    }
}
