//! Scenario setup and state accessors shared by the simulation tests.

use glam::Vec2;

use crate::arena::Arena;
use crate::entity::{EnemyComponents, Entity, EntityId, EntityInner, PlayerComponents};
use crate::math::bearing;
use crate::output::Event;
use crate::simulation::{Simulation, TickReport};

// =============================================================================
// Setup
// =============================================================================

/// Creates an empty simulation with a player at the origin facing north.
pub fn sim_with_player(seed: u64) -> (Simulation, EntityId) {
    let mut sim = Simulation::new(seed);
    let player = sim.spawn_player(Vec2::ZERO, 360.0);
    (sim, player)
}

/// Spawns an enemy that neither moves nor turns.
pub fn spawn_parked_enemy(sim: &mut Simulation, position: Vec2) -> EntityId {
    let id = sim.spawn_enemy(position, 0.0, 90.0);
    park(sim.arena_mut(), id);
    id
}

/// Removes an entity's drive and points an enemy at a distant waypoint so
/// it neither moves, turns, nor replans.
pub fn park(arena: &mut Arena, id: EntityId) {
    let Some(entity) = arena.get_mut(id) else {
        return;
    };
    let (kinematics, inner) = entity.parts_mut();
    kinematics.thrust = 0.0;
    kinematics.speed = 0.0;
    if let EntityInner::Enemy(enemy) = inner {
        enemy.target = kinematics.position + Vec2::new(10_000.0, 0.0);
        enemy.target_heading = bearing(kinematics.position, enemy.target);
        kinematics.heading = enemy.target_heading;
        enemy.submarine.change_angle = 0.0;
    }
}

/// Runs `ticks` steps of `dt` and returns every report.
pub fn run(sim: &mut Simulation, ticks: usize, dt: f32) -> Vec<TickReport> {
    (0..ticks).map(|_| sim.step(dt)).collect()
}

// =============================================================================
// Accessors
// =============================================================================

/// Returns the player's components. Panics if the entity is not a player.
pub fn player_state(arena: &Arena, id: EntityId) -> &PlayerComponents {
    arena
        .get(id)
        .and_then(Entity::as_player)
        .expect("player entity")
}

/// Returns an enemy's components. Panics if the entity is not an enemy.
pub fn enemy_state(arena: &Arena, id: EntityId) -> &EnemyComponents {
    arena
        .get(id)
        .and_then(Entity::as_enemy)
        .expect("enemy entity")
}

/// Collects the events of several reports in order.
pub fn all_events(reports: &[TickReport]) -> Vec<Event> {
    reports.iter().flat_map(|r| r.events.iter().cloned()).collect()
}
