//! Enemy submarine behavior.
//!
//! Enemies patrol between random waypoints. Each tick an enemy:
//!
//! 1. steers toward its waypoint: when within one turn step of the target
//!    heading it snaps onto the exact bearing and stops turning, otherwise
//!    it turns by the patrol turn rate in the direction of the target
//!    heading (plain numeric comparison, no shortest-arc logic)
//! 2. runs the shared submarine update
//! 3. on reaching its waypoint, picks a new one along with a fresh thrust

use glam::Vec2;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::behavior::{Behavior, TickContext};
use crate::behaviors::submarine;
use crate::config::{PatrolConfig, SimConfig};
use crate::entity::{EnemyComponents, EnemyState, Entity, EntityInner, Kinematics};
use crate::math::{bearing, distance};
use crate::output::{Event, Output, SpawnRequest};
use crate::sonar::jitter_offset;

/// A freshly chosen patrol leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Destination.
    pub target: Vec2,
    /// Bearing from the current position to the destination.
    pub heading: f32,
    /// Thrust for the leg.
    pub thrust: f32,
}

/// Picks a random waypoint with integer coordinates inside the patrol box.
#[allow(clippy::cast_precision_loss)]
pub fn pick_waypoint(rng: &mut dyn RngCore, from: Vec2, config: &PatrolConfig) -> Waypoint {
    let radius = config.radius;
    let x: i32 = rng.gen_range(-radius..=radius);
    let y: i32 = rng.gen_range(-radius..=radius);
    let thrust: i32 = rng.gen_range(config.thrust.clone());
    let target = Vec2::new(x as f32, y as f32);
    Waypoint {
        target,
        heading: bearing(from, target),
        thrust: thrust as f32,
    }
}

/// Builds a new patrolling enemy with a random first waypoint and jitter.
pub fn spawn_request(
    position: Vec2,
    speed: f32,
    heading: f32,
    config: &SimConfig,
    rng: &mut dyn RngCore,
) -> SpawnRequest {
    let waypoint = pick_waypoint(rng, position, &config.patrol);
    let offset = jitter_offset(rng, speed);
    SpawnRequest::new(
        Kinematics::new(position, speed, heading).with_thrust(waypoint.thrust),
        EntityInner::Enemy(EnemyComponents {
            target: waypoint.target,
            target_heading: waypoint.heading,
            state: EnemyState::Patrol,
            offset,
            ..EnemyComponents::default()
        }),
    )
}

/// Updates the turn command toward the target heading.
///
/// Snapping rewrites both the target heading and the current heading.
pub fn steer_toward_target(kinematics: &mut Kinematics, enemy: &mut EnemyComponents, turn_rate: f32) {
    if (kinematics.heading - enemy.target_heading).abs() < turn_rate {
        enemy.submarine.change_angle = 0.0;
        enemy.target_heading = bearing(kinematics.position, enemy.target);
        kinematics.heading = enemy.target_heading;
    } else if kinematics.heading > enemy.target_heading {
        enemy.submarine.change_angle = -turn_rate;
    } else {
        enemy.submarine.change_angle = turn_rate;
    }
}

/// Behavior for [`EntityTag::Enemy`](crate::entity::EntityTag::Enemy).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnemyBehavior;

impl Behavior for EnemyBehavior {
    fn name(&self) -> &'static str {
        "enemy"
    }

    fn update(&self, entity: &mut Entity, ctx: &mut TickContext<'_>) -> Vec<Output> {
        let id = entity.id();
        let (kinematics, inner) = entity.parts_mut();
        let EntityInner::Enemy(enemy) = inner else {
            return Vec::new();
        };

        let config = ctx.config;
        let patrol = &config.patrol;
        steer_toward_target(kinematics, enemy, patrol.turn_rate);
        let mut outputs = submarine::update(id, kinematics, &mut enemy.submarine, ctx);

        match enemy.state {
            EnemyState::Patrol => {
                if distance(kinematics.position, enemy.target) < patrol.arrival_radius {
                    let waypoint = pick_waypoint(ctx.rng, kinematics.position, patrol);
                    enemy.target = waypoint.target;
                    enemy.target_heading = waypoint.heading;
                    kinematics.thrust = waypoint.thrust;
                    debug!(enemy = %id, target = ?waypoint.target, thrust = waypoint.thrust, "new waypoint");
                    outputs.push(
                        Event::WaypointChanged {
                            enemy: id,
                            target: waypoint.target,
                        }
                        .into(),
                    );
                }
            }
        }
        outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::entity::EntityId;
    use crate::world_view::WorldView;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(arena: &mut Arena, id: EntityId, rng: &mut ChaCha8Rng) -> Vec<Output> {
        let config = SimConfig::default();
        let mut entity = arena.take(id).unwrap();
        let outputs = {
            let mut ctx = TickContext {
                dt: 1.0 / 60.0,
                config: &config,
                view: WorldView::new(arena, 0),
                rng,
            };
            EnemyBehavior.update(&mut entity, &mut ctx)
        };
        arena.restore(entity);
        outputs
    }

    fn spawn(arena: &mut Arena, heading: f32, enemy: EnemyComponents) -> EntityId {
        arena.spawn(
            Kinematics::new(Vec2::ZERO, 0.0, heading),
            EntityInner::Enemy(enemy),
        )
    }

    #[test]
    fn waypoints_are_integer_points_in_the_box() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = PatrolConfig::default();
        for _ in 0..200 {
            let w = pick_waypoint(&mut rng, Vec2::ZERO, &config);
            assert!(w.target.x.abs() <= 500.0 && w.target.y.abs() <= 500.0);
            assert_eq!(w.target.x.fract(), 0.0);
            assert_eq!(w.target.y.fract(), 0.0);
            assert!(w.thrust == 1.0 || w.thrust == 2.0);
        }
    }

    #[test]
    fn spawn_request_is_patrolling_and_explosive() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let request = spawn_request(
            Vec2::new(200.0, 300.0),
            10.0,
            270.0,
            &SimConfig::default(),
            &mut rng,
        );
        assert!(request.kinematics.is_explosive());
        assert_eq!(request.kinematics.speed, 10.0);
        assert_eq!(request.kinematics.heading, 270.0);
        let EntityInner::Enemy(enemy) = request.inner else {
            panic!("expected enemy");
        };
        assert_eq!(enemy.state, EnemyState::Patrol);
        assert!(!enemy.pinged);
        assert!(enemy.offset.x.abs() <= 90.0 && enemy.offset.y.abs() <= 90.0);
    }

    #[test]
    fn turns_down_toward_lower_target_heading() {
        let mut arena = Arena::new();
        let id = spawn(
            &mut arena,
            360.0,
            EnemyComponents {
                target: Vec2::new(400.0, 0.0),
                target_heading: 90.0,
                ..EnemyComponents::default()
            },
        );
        let outputs = run(&mut arena, id, &mut ChaCha8Rng::seed_from_u64(0));
        assert!(outputs.is_empty());
        let e = arena.get(id).unwrap();
        assert_eq!(e.kinematics().heading, 355.0);
        assert_eq!(e.as_enemy().unwrap().submarine.change_angle, -5.0);
    }

    #[test]
    fn turns_up_toward_higher_target_heading() {
        let mut arena = Arena::new();
        let id = spawn(
            &mut arena,
            90.0,
            EnemyComponents {
                target: Vec2::new(0.0, -400.0),
                target_heading: 180.0,
                ..EnemyComponents::default()
            },
        );
        run(&mut arena, id, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(arena.get(id).unwrap().kinematics().heading, 95.0);
    }

    #[test]
    fn snaps_onto_bearing_when_close() {
        let mut arena = Arena::new();
        let id = spawn(
            &mut arena,
            88.0,
            EnemyComponents {
                target: Vec2::new(400.0, 0.0),
                target_heading: 90.0,
                ..EnemyComponents::default()
            },
        );
        run(&mut arena, id, &mut ChaCha8Rng::seed_from_u64(0));
        let e = arena.get(id).unwrap();
        assert!((e.kinematics().heading - 90.0).abs() < 1e-3);
        assert_eq!(e.as_enemy().unwrap().submarine.change_angle, 0.0);
    }

    #[test]
    fn replans_on_arrival() {
        let mut arena = Arena::new();
        let id = arena.spawn(
            Kinematics::new(Vec2::new(0.5, 0.5), 0.0, 360.0),
            EntityInner::Enemy(EnemyComponents {
                target: Vec2::new(3.0, 3.0),
                target_heading: 45.0,
                ..EnemyComponents::default()
            }),
        );
        let outputs = run(&mut arena, id, &mut ChaCha8Rng::seed_from_u64(5));

        let e = arena.get(id).unwrap();
        let enemy = e.as_enemy().unwrap();
        assert_ne!(enemy.target, Vec2::new(3.0, 3.0));
        assert!(enemy.target.x.abs() <= 500.0 && enemy.target.y.abs() <= 500.0);
        let thrust = e.kinematics().thrust;
        assert!(thrust == 1.0 || thrust == 2.0);
        assert_eq!(
            outputs,
            vec![Output::Event(Event::WaypointChanged {
                enemy: id,
                target: enemy.target
            })]
        );
    }
}
