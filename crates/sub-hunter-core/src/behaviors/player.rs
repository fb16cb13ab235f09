//! Player submarine behavior.
//!
//! While intact the player:
//! - converts its throttle level into thrust and runs the shared submarine
//!   update (motion, detonation scan, steering, cooldown)
//! - drops a wake marker while moving ahead, at most one per trail spacing
//!   and never more than the trail cap
//! - advances an active sonar pulse, resetting it to idle past the last phase
//!
//! Once destroyed, the player only counts down to the close signal and
//! emits [`Event::GameOver`] exactly once.

use tracing::{debug, info};

use crate::behavior::{Behavior, TickContext};
use crate::behaviors::submarine;
use crate::config::PingConfig;
use crate::entity::{Entity, EntityId, EntityInner, Kinematics, PlayerComponents, TrailComponents};
use crate::output::{Command, Event, Output, SpawnRequest};

/// Throttle levels per unit of thrust.
pub const THROTTLE_PER_THRUST: f32 = 10.0;

/// Converts a throttle level to kinematic thrust.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn throttle_thrust(level: i32) -> f32 {
    level as f32 / THROTTLE_PER_THRUST
}

/// Advances a sonar pulse phase by one tick.
#[must_use]
pub fn advance_ping(phase: u32, config: &PingConfig) -> u32 {
    match phase {
        0 => 0,
        p if p < config.max_phase => p + 1,
        _ => 0,
    }
}

/// Behavior for [`EntityTag::Player`](crate::entity::EntityTag::Player).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerBehavior;

impl Behavior for PlayerBehavior {
    fn name(&self) -> &'static str {
        "player"
    }

    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output> {
        let id = entity.id();
        let (kinematics, inner) = entity.parts_mut();
        let EntityInner::Player(player) = inner else {
            return Vec::new();
        };

        if let Some(elapsed) = player.explosion_time.as_mut() {
            *elapsed += ctx.dt;
            if *elapsed > ctx.config.game_over_delay && !player.game_over {
                player.game_over = true;
                info!(player = %id, "game over");
                return vec![Event::GameOver { player: id }.into()];
            }
            return Vec::new();
        }

        kinematics.thrust = throttle_thrust(player.throttle);
        let mut outputs = submarine::update(id, kinematics, &mut player.submarine, ctx);

        if let Some(request) = drop_trail(id, kinematics, player, ctx) {
            outputs.push(Command::Spawn(request).into());
        }
        player.ping_time = advance_ping(player.ping_time, &ctx.config.ping);
        outputs
    }
}

fn drop_trail(
    id: EntityId,
    kinematics: &Kinematics,
    player: &PlayerComponents,
    ctx: &TickContext<'_>,
) -> Option<SpawnRequest> {
    if kinematics.speed <= 0.0 || player.trails.len() >= ctx.config.trail.max_count {
        return None;
    }
    // The newest marker updates after its parent, so its age lags one tick.
    let newest_age = player
        .trails
        .last()
        .and_then(|trail| ctx.view.get(*trail))
        .and_then(Entity::as_trail)
        .map(|trail| trail.age);
    if newest_age.is_some_and(|age| age + ctx.dt <= ctx.config.trail.spacing()) {
        return None;
    }
    debug!(player = %id, position = ?kinematics.position, "dropping trail marker");
    Some(SpawnRequest::new(
        Kinematics::stationary(kinematics.position),
        EntityInner::Trail(TrailComponents::new(id)),
    ))
}
