//! Per-tick systems. Each is a free function over the hecs world, run by
//! the game manager in a fixed order.

pub mod cleanup;
pub mod collision;
pub mod enemy;
pub mod movement;
pub mod ship;
pub mod snapshot;
