//! Core types and definitions for the GALAXION simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, paths, collision boxes, commands, events, wave descriptors,
//! state snapshots, and constants. It has no dependency on the entity store
//! or any runtime framework.

pub mod collision;
pub mod commands;
pub mod components;
pub mod constants;
pub mod emitter;
pub mod enums;
pub mod events;
pub mod path;
pub mod state;
pub mod types;
pub mod wave;

#[cfg(test)]
mod tests;
