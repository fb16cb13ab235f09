//! Active sonar: revealing enemies with the player's expanding pulse.
//!
//! Contacts are revealed by a sweep that runs after every entity has been
//! updated. An enemy is revealed when it lies within both the pulse's
//! detection radius and the scope radius. A newly revealed enemy gets a
//! fresh display jitter and raises [`Event::ContactPinged`]. Revealed flags
//! are cleared at the start of a tick whenever the pulse is idle or has
//! just been triggered.
//!
//! After the player has been destroyed every enemy is forced visible.

use glam::Vec2;
use rand::{Rng, RngCore};
use tracing::trace;

use crate::arena::Arena;
use crate::config::SimConfig;
use crate::entity::{Entity, EntityId};
use crate::math::distance;
use crate::output::Event;

/// Speed at which an unrevealed contact's blur vanishes and its jitter stops.
pub const CONTACT_SPEED_CEILING: f32 = 40.0;

/// Jitter is drawn in units of this many world units.
pub const JITTER_SCALE: f32 = 3.0;

/// Draws a random display offset for an unrevealed contact.
///
/// Slower contacts jitter more. Each axis is an integer in
/// `[-(40 - speed), 40 - speed]` scaled by three; at or above the speed
/// ceiling there is no jitter.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn jitter_offset(rng: &mut dyn RngCore, speed: f32) -> Vec2 {
    let span = (CONTACT_SPEED_CEILING as i32 - speed as i32).max(0);
    let x: i32 = rng.gen_range(-span..=span);
    let y: i32 = rng.gen_range(-span..=span);
    Vec2::new(x as f32, y as f32) * JITTER_SCALE
}

/// Clears every enemy's revealed flag if the player's pulse is idle or new.
pub fn reset_contacts(arena: &mut Arena, player: EntityId) {
    let idle = arena
        .get(player)
        .and_then(Entity::as_player)
        .is_some_and(|p| p.ping_time <= 1);
    if !idle {
        return;
    }
    for entity in arena.entities_sorted_mut() {
        if let Some(enemy) = entity.as_enemy_mut() {
            enemy.pinged = false;
        }
    }
}

/// Reveals enemies touched by the pulse and returns the resulting events.
pub fn sweep(
    arena: &mut Arena,
    player: EntityId,
    config: &SimConfig,
    rng: &mut dyn RngCore,
) -> Vec<Event> {
    let Some(ship) = arena.get_live(player) else {
        return Vec::new();
    };
    let Some(components) = ship.as_player() else {
        return Vec::new();
    };
    let origin = ship.position();
    let destroyed = components.explosion_time.is_some();
    let reach = config.ping.detection_radius(components.ping_time);

    let mut events = Vec::new();
    let live: Vec<EntityId> = arena.live_entities().map(Entity::id).collect();
    for id in live {
        let Some(entity) = arena.get_mut(id) else {
            continue;
        };
        let range = distance(origin, entity.position());
        let speed = entity.kinematics().speed;
        let Some(enemy) = entity.as_enemy_mut() else {
            continue;
        };
        if destroyed {
            enemy.pinged = true;
            continue;
        }
        if enemy.pinged || range > reach || range >= config.scope_radius {
            continue;
        }
        enemy.pinged = true;
        enemy.offset = jitter_offset(rng, speed);
        trace!(enemy = %id, range, "contact pinged");
        events.push(Event::ContactPinged { enemy: id });
    }
    events
}
