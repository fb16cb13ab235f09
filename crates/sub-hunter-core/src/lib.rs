//! # Sub Hunter Core
//!
//! Simulation core for a top-down submarine sonar combat game.
//!
//! The player's submarine hunts patrolling enemy submarines that are only
//! shown at their true position while touched by an active sonar pulse.
//! Torpedoes arm after a fuse delay, any two explosive entities that come
//! close enough detonate, and the session ends a few seconds after the
//! player is destroyed.
//!
//! ## Architecture
//!
//! - **Entities** ([`entity`]): one kinematic block plus a tagged variant per
//!   kind, stored in an [`arena::Arena`] with stable IDs
//! - **Behaviors** ([`behavior`], [`behaviors`]): per-kind update logic that
//!   reads a [`world_view::WorldView`] and returns [`output::Output`]s
//! - **Resolvers** ([`resolver`]): apply commands (detonations, spawns,
//!   despawns) to the arena and collect events
//! - **Sonar** ([`sonar`]) and **scope** ([`scope`]): contact reveal and the
//!   draw list handed to a presentation surface
//!
//! ## Usage
//!
//! ```
//! use sub_hunter_core::{ControlCommand, Simulation};
//!
//! let mut sim = Simulation::standard_scenario(7);
//! sim.apply_control(ControlCommand::Ping).unwrap();
//! let report = sim.step_fixed();
//! assert_eq!(report.tick, 0);
//! assert!(sim.frame().is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod behavior;
pub mod behaviors;
pub mod config;
pub mod control;
pub mod entity;
pub mod error;
pub mod math;
pub mod output;
pub mod resolver;
pub mod scope;
pub mod simulation;
pub mod sonar;
pub mod world_view;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use config::SimConfig;
pub use control::ControlCommand;
pub use entity::{Entity, EntityId, EntityTag};
pub use error::{ConfigError, SimError, SurfaceError};
pub use output::{AudioCue, Event};
pub use scope::{Frame, PresentationSurface};
pub use simulation::{Simulation, TickReport};
