//! Tunable simulation constants.
//!
//! [`SimConfig`] gathers every number the simulation depends on. The defaults
//! reproduce the classic game; a JSON file may override any subset of fields.
//!
//! # Example
//!
//! ```
//! use sub_hunter_core::config::SimConfig;
//!
//! let config = SimConfig::from_json(r#"{ "torpedo": { "lifetime": 9.0 } }"#).unwrap();
//! assert_eq!(config.torpedo.lifetime, 9.0);
//! assert_eq!(config.torpedo.fuse_length, 1.0);
//! assert_eq!(config.detonation_radius, 20.0);
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default fixed timestep (1/60 second).
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

// =============================================================================
// Sections
// =============================================================================

/// Torpedo launch and fuse parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorpedoConfig {
    /// Seconds between launches.
    pub cooldown: f32,
    /// Added to the firing submarine's speed at launch.
    pub launch_speed_bonus: f32,
    /// Age after which the torpedo becomes explosive.
    pub fuse_length: f32,
    /// Age after which the torpedo is removed.
    pub lifetime: f32,
    /// Drive thrust while running.
    pub thrust: f32,
}

impl Default for TorpedoConfig {
    fn default() -> Self {
        Self {
            cooldown: 5.0,
            launch_speed_bonus: 40.0,
            fuse_length: 1.0,
            lifetime: 7.0,
            thrust: 3.0,
        }
    }
}

/// Wake trail parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Age at which a trail marker is removed.
    pub max_age: f32,
    /// Maximum number of markers per ship.
    pub max_count: usize,
}

impl TrailConfig {
    /// Minimum age of the newest marker before another is dropped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn spacing(&self) -> f32 {
        self.max_age / self.max_count as f32
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_age: 5.0,
            max_count: 10,
        }
    }
}

/// Active sonar pulse parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PingConfig {
    /// Phase at which the pulse ends and resets to idle.
    pub max_phase: u32,
    /// Ring radius growth per phase.
    pub radius_per_phase: f32,
    /// Extra detection reach beyond the drawn ring.
    pub detection_margin: f32,
}

impl PingConfig {
    /// Radius of the drawn ring for a pulse phase.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ring_radius(&self, phase: u32) -> f32 {
        phase as f32 * self.radius_per_phase
    }

    /// Radius within which contacts are revealed for a pulse phase.
    #[must_use]
    pub fn detection_radius(&self, phase: u32) -> f32 {
        self.ring_radius(phase) + self.detection_margin
    }
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            max_phase: 58,
            radius_per_phase: 5.0,
            detection_margin: 10.0,
        }
    }
}

/// Enemy patrol behavior parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Waypoints are drawn from `[-radius, radius]` on both axes.
    pub radius: i32,
    /// Distance at which a waypoint counts as reached.
    pub arrival_radius: f32,
    /// Thrust is re-rolled from this range on every replan.
    pub thrust: RangeInclusive<i32>,
    /// Degrees turned per tick while steering toward the waypoint.
    pub turn_rate: f32,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            radius: 500,
            arrival_radius: 10.0,
            thrust: 1..=2,
            turn_rate: 5.0,
        }
    }
}

/// Player throttle levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Change per thrust command.
    pub step: i32,
    /// Lowest level (full astern).
    pub min: i32,
    /// Highest level (flank).
    pub max: i32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            step: 10,
            min: -10,
            max: 30,
        }
    }
}

// =============================================================================
// SimConfig
// =============================================================================

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Speed-proportional drag applied every tick.
    pub drag_coefficient: f32,
    /// Two explosive entities closer than this detonate.
    pub detonation_radius: f32,
    /// Age at which an explosion marker is removed.
    pub explosion_lifetime: f32,
    /// Seconds between the player's destruction and the close signal.
    pub game_over_delay: f32,
    /// Radius of the sonar display around the player.
    pub scope_radius: f32,
    /// Degrees per tick applied by the turn controls.
    pub turn_rate: f32,
    /// Timestep used by [`Simulation::step_fixed`](crate::simulation::Simulation::step_fixed).
    pub fixed_dt: f32,
    /// Torpedo parameters.
    pub torpedo: TorpedoConfig,
    /// Trail parameters.
    pub trail: TrailConfig,
    /// Sonar pulse parameters.
    pub ping: PingConfig,
    /// Enemy patrol parameters.
    pub patrol: PatrolConfig,
    /// Player throttle parameters.
    pub throttle: ThrottleConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            drag_coefficient: 0.01,
            detonation_radius: 20.0,
            explosion_lifetime: 3.0,
            game_over_delay: 3.0,
            scope_radius: 290.0,
            turn_rate: 5.0,
            fixed_dt: DEFAULT_DT,
            torpedo: TorpedoConfig::default(),
            trail: TrailConfig::default(),
            ping: PingConfig::default(),
            patrol: PatrolConfig::default(),
            throttle: ThrottleConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`SimConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable by the simulation.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("detonation_radius", self.detonation_radius)?;
        positive("explosion_lifetime", self.explosion_lifetime)?;
        positive("game_over_delay", self.game_over_delay)?;
        positive("turn_rate", self.turn_rate)?;
        positive("scope_radius", self.scope_radius)?;
        positive("fixed_dt", self.fixed_dt)?;
        positive("torpedo.lifetime", self.torpedo.lifetime)?;
        positive("trail.max_age", self.trail.max_age)?;
        positive("ping.radius_per_phase", self.ping.radius_per_phase)?;
        positive("patrol.arrival_radius", self.patrol.arrival_radius)?;
        positive("patrol.turn_rate", self.patrol.turn_rate)?;

        if !(0.0..1.0).contains(&self.drag_coefficient) {
            return Err(ConfigError::OutOfRange {
                field: "drag_coefficient",
                value: self.drag_coefficient,
            });
        }
        if self.torpedo.fuse_length < 0.0 || self.torpedo.fuse_length >= self.torpedo.lifetime {
            return Err(ConfigError::OutOfRange {
                field: "torpedo.fuse_length",
                value: self.torpedo.fuse_length,
            });
        }
        if self.torpedo.cooldown < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "torpedo.cooldown",
                value: self.torpedo.cooldown,
            });
        }
        if self.trail.max_count == 0 {
            return Err(ConfigError::Empty("trail.max_count"));
        }
        if self.ping.max_phase == 0 {
            return Err(ConfigError::Empty("ping.max_phase"));
        }
        if self.patrol.radius <= 0 {
            return Err(ConfigError::Empty("patrol.radius"));
        }
        if self.patrol.thrust.is_empty() {
            return Err(ConfigError::InvertedRange {
                field: "patrol.thrust",
                min: *self.patrol.thrust.start(),
                max: *self.patrol.thrust.end(),
            });
        }
        if self.throttle.step <= 0 {
            return Err(ConfigError::ZeroStep {
                field: "throttle.step",
                value: self.throttle.step,
            });
        }
        if self.throttle.min > self.throttle.max {
            return Err(ConfigError::InvertedRange {
                field: "throttle",
                min: self.throttle.min,
                max: self.throttle.max,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
