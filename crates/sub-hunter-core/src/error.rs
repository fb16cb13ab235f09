//! Error types for the simulation core.
//!
//! Most recoverable conditions inside a tick (double removal, stale trail
//! parents) never surface as errors; they are handled where they occur. The
//! types here cover the API boundary.

use thiserror::Error;

use crate::entity::{EntityId, EntityTag};

/// Invalid [`SimConfig`](crate::config::SimConfig) values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text was not valid JSON for `SimConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Offending field path
        field: &'static str,
        /// Supplied value
        value: f32,
    },

    /// A value fell outside its allowed interval.
    #[error("{field} is out of range: {value}")]
    OutOfRange {
        /// Offending field path
        field: &'static str,
        /// Supplied value
        value: f32,
    },

    /// A count or extent that must be non-zero was zero.
    #[error("{0} must be non-zero")]
    Empty(&'static str),

    /// A range whose lower bound exceeds its upper bound.
    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        /// Offending field path
        field: &'static str,
        /// Lower bound
        min: i32,
        /// Upper bound
        max: i32,
    },

    /// A level step that would never change the level.
    #[error("{field} must be at least 1, got {value}")]
    ZeroStep {
        /// Offending field path
        field: &'static str,
        /// Supplied step
        value: i32,
    },
}

/// Errors returned by [`Simulation`](crate::simulation::Simulation) operations.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// A control command arrived before a player was spawned.
    #[error("no player submarine in the arena")]
    NoPlayer,

    /// The referenced entity is not live.
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    /// The referenced entity cannot perform submarine actions.
    #[error("entity {id} is a {tag}, not a submarine")]
    NotASubmarine {
        /// Entity that was addressed
        id: EntityId,
        /// Its actual kind
        tag: EntityTag,
    },
}

/// Failure reported by a [`PresentationSurface`](crate::scope::PresentationSurface).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface could not draw a primitive.
    #[error("draw failed: {0}")]
    Draw(String),

    /// The surface has already been closed.
    #[error("surface is closed")]
    Closed,
}
