//! Enemy choreography for GALAXION.
//!
//! Formation motion, squad spawn sequencing, and attack-run planning.
//! No entity-store dependency: everything here operates on plain data and
//! is driven by the sim crate once per tick.

pub mod attack;
pub mod formation;
pub mod profiles;
pub mod squad;

pub use galaxion_core as core;

#[cfg(test)]
mod tests;
