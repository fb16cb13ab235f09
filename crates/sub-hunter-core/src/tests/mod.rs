//! Whole-simulation tests.
//!
//! - `scenarios.rs`: end-to-end gameplay scenarios driven through
//!   [`Simulation`](crate::simulation::Simulation)
//! - `determinism.rs`: same seed and inputs give the same run
//! - `helpers.rs`: scenario setup and state accessors

mod helpers;
