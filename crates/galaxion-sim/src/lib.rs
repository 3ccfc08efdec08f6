//! Simulation engine for GALAXION.
//!
//! Owns the hecs entity store behind a deferred-mutation entity manager,
//! runs the per-tick systems and enemy wave orchestration, and produces
//! `GameSnapshot`s for the renderer and scoring collaborators.

pub mod enemy_manager;
pub mod engine;
pub mod entity_manager;
pub mod scoring;
pub mod systems;
pub mod world_setup;

pub use engine::{GameManager, SimConfig};
pub use galaxion_core as core;
