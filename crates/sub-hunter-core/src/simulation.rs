//! Simulation driver: the per-tick update loop.
//!
//! One call to [`Simulation::step`] runs a complete tick:
//!
//! 1. **RESET**: clear sonar contacts if the player's pulse is idle or new
//! 2. **UPDATE**: for every entity in ID order (snapshot taken at tick
//!    start), take it out of the arena, run its behavior against a read-only
//!    view of the rest, put it back, and immediately resolve its outputs
//! 3. **SWEEP**: reveal enemies touched by the sonar pulse
//! 4. **COMPACT**: drop entities marked for removal, advance the tick
//!
//! Resolving right after each entity means a detonation is visible to every
//! entity updated later in the same tick, so a colliding pair produces
//! exactly one explosion. Entities marked earlier in the tick are skipped;
//! entities spawned during the tick first update on the next one.
//!
//! # Determinism
//!
//! All randomness comes from one `ChaCha8Rng` seeded at construction, and
//! entities are iterated in ID order. The same seed and the same control
//! inputs at the same ticks reproduce the same run.
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::control::ControlCommand;
//! use sub_hunter_core::simulation::Simulation;
//!
//! let mut sim = Simulation::standard_scenario(42);
//! sim.apply_control(ControlCommand::IncreaseThrust).unwrap();
//! let events = sim.apply_control(ControlCommand::FireTorpedo).unwrap();
//! assert_eq!(events.len(), 1);
//!
//! for _ in 0..60 {
//!     sim.step_fixed();
//! }
//! assert_eq!(sim.tick(), 60);
//! assert!(!sim.is_game_over());
//! ```

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, debug_span, info};

use crate::arena::Arena;
use crate::behavior::{BehaviorRegistry, TickContext};
use crate::behaviors::{enemy, submarine};
use crate::config::SimConfig;
use crate::control::{apply_to_player, ControlCommand};
use crate::entity::{Entity, EntityId, EntityInner, Kinematics, PlayerComponents};
use crate::error::{ConfigError, SimError};
use crate::output::{AudioCue, Event};
use crate::resolver::{self, Resolver};
use crate::scope::Frame;
use crate::sonar;
use crate::world_view::WorldView;

/// Enemy start positions in the standard scenario.
pub const STANDARD_ENEMIES: [Vec2; 2] = [Vec2::new(200.0, 300.0), Vec2::new(175.0, 350.0)];
/// Enemy start speed in the standard scenario.
pub const STANDARD_ENEMY_SPEED: f32 = 10.0;
/// Enemy start heading in the standard scenario.
pub const STANDARD_ENEMY_HEADING: f32 = 270.0;

// =============================================================================
// TickReport
// =============================================================================

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// The tick that was simulated.
    pub tick: u64,
    /// Events in the order they occurred.
    pub events: Vec<Event>,
    /// Entities removed at the end of the tick.
    pub removed: Vec<Entity>,
    /// True on the tick the game-over signal was raised.
    pub game_over: bool,
}

impl TickReport {
    /// Sounds to play for this tick, in event order.
    pub fn cues(&self) -> impl Iterator<Item = AudioCue> + '_ {
        self.events.iter().filter_map(Event::cue)
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Owns the arena and runs the update loop.
pub struct Simulation {
    arena: Arena,
    behaviors: BehaviorRegistry,
    resolvers: Vec<Box<dyn Resolver>>,
    config: SimConfig,
    rng: ChaCha8Rng,
    seed: u64,
    player: Option<EntityId>,
    /// Events raised between ticks, reported with the next tick.
    pending: Vec<Event>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("arena", &self.arena)
            .field("behaviors", &self.behaviors)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("seed", &self.seed)
            .field("player", &self.player)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates an empty simulation with the default configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use sub_hunter_core::simulation::Simulation;
    ///
    /// let sim = Simulation::new(12345);
    /// assert_eq!(sim.tick(), 0);
    /// assert_eq!(sim.seed(), 12345);
    /// assert!(sim.player_id().is_none());
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            arena: Arena::new(),
            behaviors: BehaviorRegistry::default_bundles(),
            resolvers: resolver::default_resolvers(),
            config: SimConfig::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            player: None,
            pending: Vec::new(),
        }
    }

    /// Creates an empty simulation with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found by [`SimConfig::validate`].
    pub fn with_config(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(seed)
        })
    }

    /// Creates the classic opening: the player at the origin facing north,
    /// two enemies to the north-east heading west.
    #[must_use]
    pub fn standard_scenario(seed: u64) -> Self {
        let mut sim = Self::new(seed);
        sim.populate_standard();
        sim
    }

    /// Spawns the standard scenario's entities into this simulation.
    pub fn populate_standard(&mut self) {
        self.spawn_player(Vec2::ZERO, 360.0);
        for position in STANDARD_ENEMIES {
            self.spawn_enemy(position, STANDARD_ENEMY_SPEED, STANDARD_ENEMY_HEADING);
        }
    }

    /// Spawns the player's submarine at rest. It becomes the target of
    /// control commands and the centre of the scope.
    pub fn spawn_player(&mut self, position: Vec2, heading: f32) -> EntityId {
        let id = self.arena.spawn(
            Kinematics::new(position, 0.0, heading),
            EntityInner::Player(PlayerComponents::default()),
        );
        if let Some(previous) = self.player.replace(id) {
            debug!(%previous, player = %id, "player replaced");
        }
        debug!(player = %id, ?position, "player spawned");
        id
    }

    /// Spawns a patrolling enemy with a random first waypoint.
    pub fn spawn_enemy(&mut self, position: Vec2, speed: f32, heading: f32) -> EntityId {
        let request = enemy::spawn_request(position, speed, heading, &self.config, &mut self.rng);
        let id = self.arena.spawn(request.kinematics, request.inner);
        debug!(enemy = %id, ?position, speed, heading, "enemy spawned");
        id
    }

    /// Applies a pilot command to the player.
    ///
    /// Commands sent after the player has been destroyed are ignored.
    /// Returns the events the command caused (a torpedo launch).
    ///
    /// # Errors
    ///
    /// [`SimError::NoPlayer`] if no player has been spawned, or
    /// [`SimError::UnknownEntity`] if it has since been removed.
    pub fn apply_control(&mut self, command: ControlCommand) -> Result<Vec<Event>, SimError> {
        let id = self.player.ok_or(SimError::NoPlayer)?;
        let entity = self.arena.get_mut(id).ok_or(SimError::UnknownEntity(id))?;
        if entity.kinematics().is_exploded() {
            debug!(%command, "control ignored after destruction");
            return Ok(Vec::new());
        }
        let tag = entity.tag();
        let player = entity
            .as_player_mut()
            .ok_or(SimError::NotASubmarine { id, tag })?;
        if apply_to_player(player, command, &self.config) {
            return Ok(Vec::new());
        }

        Ok(self
            .launch(id)?
            .map(|torpedo| Event::TorpedoLaunched { source: id, torpedo })
            .into_iter()
            .collect())
    }

    /// Fires a torpedo from any submarine.
    ///
    /// Returns `Ok(None)` while the tube is reloading. A successful launch
    /// is reported as [`Event::TorpedoLaunched`] at the head of the next
    /// [`TickReport`], so its cue plays whoever fired.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownEntity`] if `shooter` is not live, or
    /// [`SimError::NotASubmarine`] if it cannot fire.
    pub fn fire_torpedo(&mut self, shooter: EntityId) -> Result<Option<EntityId>, SimError> {
        let launched = self.launch(shooter)?;
        if let Some(torpedo) = launched {
            self.pending.push(Event::TorpedoLaunched {
                source: shooter,
                torpedo,
            });
        }
        Ok(launched)
    }

    fn launch(&mut self, shooter: EntityId) -> Result<Option<EntityId>, SimError> {
        if !self.arena.is_live(shooter) {
            return Err(SimError::UnknownEntity(shooter));
        }
        let entity = self
            .arena
            .get_mut(shooter)
            .ok_or(SimError::UnknownEntity(shooter))?;
        let tag = entity.tag();
        let (kinematics, inner) = entity.parts_mut();
        let submarine_state = inner
            .submarine_mut()
            .ok_or(SimError::NotASubmarine { id: shooter, tag })?;

        let Some(request) =
            submarine::fire_torpedo(kinematics, submarine_state, &self.config.torpedo)
        else {
            debug!(%shooter, "torpedo still loading");
            return Ok(None);
        };
        let torpedo = self.arena.spawn(request.kinematics, request.inner);
        debug!(%shooter, %torpedo, "torpedo launched");
        Ok(Some(torpedo))
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> TickReport {
        let tick = self.arena.current_tick();
        let span = debug_span!("tick", tick, dt);
        let _entered = span.enter();

        if let Some(player) = self.player {
            sonar::reset_contacts(&mut self.arena, player);
        }

        let mut events = std::mem::take(&mut self.pending);
        let ids: Vec<EntityId> = self.arena.entity_ids_sorted().collect();
        for id in ids {
            if !self.arena.is_live(id) {
                continue;
            }
            let Some(mut entity) = self.arena.take(id) else {
                continue;
            };
            let outputs = match self.behaviors.behavior_for(entity.tag()) {
                Some(behavior) => {
                    let mut ctx = TickContext {
                        dt,
                        config: &self.config,
                        view: WorldView::new(&self.arena, tick),
                        rng: &mut self.rng,
                    };
                    behavior.update(&mut entity, &mut ctx)
                }
                None => Vec::new(),
            };
            self.arena.restore(entity);
            resolver::apply(&self.resolvers, &outputs, &mut self.arena, &mut events);
        }

        if let Some(player) = self.player {
            events.extend(sonar::sweep(
                &mut self.arena,
                player,
                &self.config,
                &mut self.rng,
            ));
        }

        let removed = resolver::compact(&mut self.arena);
        self.arena.advance_tick();

        let game_over = events.iter().any(Event::is_game_over);
        if game_over {
            info!(tick, "session over");
        }
        debug!(events = events.len(), removed = removed.len(), "tick complete");
        TickReport {
            tick,
            events,
            removed,
            game_over,
        }
    }

    /// Advances the simulation by the configured fixed timestep.
    pub fn step_fixed(&mut self) -> TickReport {
        self.step(self.config.fixed_dt)
    }

    /// Captures the scope as seen from the player.
    #[must_use]
    pub fn frame(&self) -> Option<Frame> {
        Frame::capture(&self.arena, self.player?, &self.config)
    }

    /// Returns the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns the arena mutably, for setting up scenarios.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Returns the player's entity, if spawned.
    #[must_use]
    pub fn player(&self) -> Option<&Entity> {
        self.arena.get(self.player?)
    }

    /// Returns the player's ID, if spawned.
    #[must_use]
    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// Returns true once the game-over signal has been raised.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.player()
            .and_then(Entity::as_player)
            .is_some_and(|p| p.game_over)
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.arena.current_tick()
    }

    /// Returns the seed the random source was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the behavior registry for customization.
    pub fn behaviors_mut(&mut self) -> &mut BehaviorRegistry {
        &mut self.behaviors
    }

    /// Appends a resolver after the stock ones.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::entity::EntityTag;
    use crate::output::Output;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    mod basic_tests {
        use super::*;

        #[test]
        fn step_advances_tick() {
            let mut sim = Simulation::new(1);
            let report = sim.step(0.1);
            assert_eq!(report.tick, 0);
            assert_eq!(sim.tick(), 1);
            assert!(report.events.is_empty());
        }

        #[test]
        fn standard_scenario_layout() {
            let sim = Simulation::standard_scenario(3);
            let arena = sim.arena();
            assert_eq!(arena.count_tag(EntityTag::Player), 1);
            assert_eq!(arena.count_tag(EntityTag::Enemy), 2);
            let enemies: Vec<_> = arena
                .live_entities()
                .filter(|e| e.tag() == EntityTag::Enemy)
                .map(|e| (e.position(), e.kinematics().speed, e.kinematics().heading))
                .collect();
            assert_eq!(
                enemies,
                vec![
                    (Vec2::new(200.0, 300.0), 10.0, 270.0),
                    (Vec2::new(175.0, 350.0), 10.0, 270.0),
                ]
            );
            assert_eq!(sim.player().map(Entity::position), Some(Vec2::ZERO));
        }

        #[test]
        fn invalid_config_is_rejected() {
            let mut config = SimConfig::default();
            config.scope_radius = 0.0;
            assert!(Simulation::with_config(config, 1).is_err());
        }

        #[test]
        fn fixed_step_uses_config() {
            let mut config = SimConfig::default();
            config.fixed_dt = 0.5;
            let mut sim = Simulation::with_config(config, 1).unwrap();
            let player = sim.spawn_player(Vec2::ZERO, 360.0);
            sim.apply_control(ControlCommand::FireTorpedo).unwrap();
            sim.step_fixed();
            let cooldown = sim
                .arena()
                .get(player)
                .and_then(Entity::as_player)
                .map(|p| p.submarine.torpedo_time);
            assert_eq!(cooldown, Some(4.5));
        }
    }

    mod control_tests {
        use super::*;

        #[test]
        fn controls_need_a_player() {
            let mut sim = Simulation::new(1);
            assert_eq!(
                sim.apply_control(ControlCommand::Ping),
                Err(SimError::NoPlayer)
            );
        }

        #[test]
        fn fire_reports_launch_once_per_cooldown() {
            let mut sim = Simulation::new(1);
            let player = sim.spawn_player(Vec2::ZERO, 360.0);

            let events = sim.apply_control(ControlCommand::FireTorpedo).unwrap();
            let torpedo = sim.arena().ids_with_tag(EntityTag::Torpedo).next().unwrap();
            assert_eq!(
                events,
                vec![Event::TorpedoLaunched {
                    source: player,
                    torpedo
                }]
            );
            assert!(sim
                .apply_control(ControlCommand::FireTorpedo)
                .unwrap()
                .is_empty());
            assert_eq!(sim.arena().count_tag(EntityTag::Torpedo), 1);
        }

        #[test]
        fn non_submarines_cannot_fire() {
            let mut sim = Simulation::new(1);
            sim.spawn_player(Vec2::ZERO, 360.0);
            sim.apply_control(ControlCommand::FireTorpedo).unwrap();
            let torpedo = sim.arena().ids_with_tag(EntityTag::Torpedo).next().unwrap();
            assert_eq!(
                sim.fire_torpedo(torpedo),
                Err(SimError::NotASubmarine {
                    id: torpedo,
                    tag: EntityTag::Torpedo
                })
            );
            assert_eq!(
                sim.fire_torpedo(EntityId::new(99)),
                Err(SimError::UnknownEntity(EntityId::new(99)))
            );
        }

        #[test]
        fn enemies_can_fire() {
            let mut sim = Simulation::new(1);
            let enemy = sim.spawn_enemy(Vec2::new(100.0, 0.0), 10.0, 270.0);
            let torpedo = sim.fire_torpedo(enemy).unwrap().unwrap();
            let t = sim.arena().get(torpedo).unwrap();
            assert_eq!(t.kinematics().speed, 50.0);
            assert_eq!(t.kinematics().heading, 270.0);
        }

        #[test]
        fn enemy_launch_is_heard_on_the_next_tick() {
            let mut sim = Simulation::new(1);
            let enemy = sim.spawn_enemy(Vec2::new(100.0, 0.0), 10.0, 270.0);
            let torpedo = sim.fire_torpedo(enemy).unwrap().unwrap();
            assert_eq!(sim.fire_torpedo(enemy), Ok(None));

            let report = sim.step(0.1);
            assert_eq!(
                report.events.first(),
                Some(&Event::TorpedoLaunched {
                    source: enemy,
                    torpedo
                })
            );
            assert_eq!(
                report.cues().collect::<Vec<_>>(),
                vec![AudioCue::TorpedoLaunch]
            );
            assert_eq!(sim.step(0.1).cues().count(), 0);
        }

        #[test]
        fn player_fire_control_is_not_reported_twice() {
            let mut sim = Simulation::new(1);
            sim.spawn_player(Vec2::ZERO, 360.0);
            assert_eq!(
                sim.apply_control(ControlCommand::FireTorpedo).unwrap().len(),
                1
            );
            assert!(sim.step(0.1).events.is_empty());
        }

        #[test]
        fn controls_are_ignored_after_destruction() {
            let mut sim = Simulation::new(1);
            let player = sim.spawn_player(Vec2::ZERO, 360.0);
            if let Some(e) = sim.arena_mut().get_mut(player) {
                e.kinematics_mut().detonate();
            }
            let events = sim.apply_control(ControlCommand::FireTorpedo).unwrap();
            assert!(events.is_empty());
            sim.apply_control(ControlCommand::IncreaseThrust).unwrap();
            assert_eq!(
                sim.player().and_then(Entity::as_player).map(|p| p.throttle),
                Some(0)
            );
        }
    }

    mod registry_tests {
        use super::*;

        struct Counting(Arc<AtomicUsize>);

        impl Behavior for Counting {
            fn name(&self) -> &'static str {
                "counting"
            }

            fn update(&self, _entity: &mut Entity, _ctx: &mut TickContext<'_>) -> Vec<Output> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Vec::new()
            }
        }

        #[test]
        fn custom_behavior_replaces_stock() {
            let counter = Arc::new(AtomicUsize::new(0));
            let mut sim = Simulation::standard_scenario(9);
            sim.behaviors_mut()
                .register(EntityTag::Enemy, Arc::new(Counting(Arc::clone(&counter))));
            for _ in 0..3 {
                sim.step(0.1);
            }
            assert_eq!(counter.load(Ordering::SeqCst), 6);
        }

        struct DespawnTally(Arc<AtomicUsize>);

        impl Resolver for DespawnTally {
            fn handles(&self) -> &[crate::output::OutputKind] {
                &[crate::output::OutputKind::Command]
            }

            fn resolve(&self, outputs: &[&Output], _arena: &mut Arena, _events: &mut Vec<Event>) {
                let despawns = outputs
                    .iter()
                    .filter(|o| matches!(o, Output::Command(crate::output::Command::Despawn { .. })))
                    .count();
                self.0.fetch_add(despawns, Ordering::SeqCst);
            }
        }

        #[test]
        fn added_resolver_sees_commands_after_stock_chain() {
            let counter = Arc::new(AtomicUsize::new(0));
            let mut sim = Simulation::new(4);
            sim.add_resolver(Box::new(DespawnTally(Arc::clone(&counter))));
            sim.spawn_player(Vec2::ZERO, 360.0);
            sim.apply_control(ControlCommand::FireTorpedo).unwrap();

            for _ in 0..80 {
                sim.step(0.1);
            }
            assert_eq!(sim.arena().count_tag(EntityTag::Torpedo), 0);
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }

        #[test]
        fn unregistered_kinds_are_frozen() {
            let mut sim = Simulation::new(2);
            *sim.behaviors_mut() = BehaviorRegistry::new();
            let enemy = sim.spawn_enemy(Vec2::ZERO, 10.0, 90.0);
            sim.step(1.0);
            assert_eq!(sim.arena().get(enemy).map(Entity::position), Some(Vec2::ZERO));
        }
    }
}
