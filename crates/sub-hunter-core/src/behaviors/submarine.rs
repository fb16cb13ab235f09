//! Logic shared by the player and enemy submarines.

use crate::behavior::TickContext;
use crate::behaviors::kinematics;
use crate::config::TorpedoConfig;
use crate::entity::{EntityId, EntityInner, Kinematics, SubmarineState, TorpedoComponents};
use crate::math::steer_heading;
use crate::output::{Output, SpawnRequest};

/// Runs motion, steering and torpedo cooldown for one tick.
pub fn update(
    id: EntityId,
    kinematics: &mut Kinematics,
    submarine: &mut SubmarineState,
    ctx: &TickContext<'_>,
) -> Vec<Output> {
    let outputs = kinematics::advance(id, kinematics, ctx);
    kinematics.heading = steer_heading(kinematics.heading, submarine.change_angle);
    submarine.torpedo_time = cool_down(submarine.torpedo_time, ctx.dt);
    outputs
}

/// Decrements a cooldown timer, clamping at zero.
#[must_use]
pub fn cool_down(remaining: f32, dt: f32) -> f32 {
    (remaining - dt).max(0.0)
}

/// Launches a torpedo if the tube is loaded and restarts the cooldown.
///
/// The torpedo starts at the submarine's position and heading, unarmed,
/// moving at the submarine's speed plus the launch bonus.
pub fn fire_torpedo(
    kinematics: &Kinematics,
    submarine: &mut SubmarineState,
    config: &TorpedoConfig,
) -> Option<SpawnRequest> {
    if !submarine.torpedo_ready() {
        return None;
    }
    submarine.torpedo_time = config.cooldown;
    let torpedo = Kinematics::new(
        kinematics.position,
        kinematics.speed + config.launch_speed_bonus,
        kinematics.heading,
    )
    .with_thrust(config.thrust)
    .with_explosive(false);
    Some(SpawnRequest::new(
        torpedo,
        EntityInner::Torpedo(TorpedoComponents::new(config.lifetime, config.fuse_length)),
    ))
}
