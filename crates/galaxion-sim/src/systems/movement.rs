//! Movement system.
//!
//! Entities with a Path follow it at their Velocity's speed; the rest move
//! freely along their Velocity. Also keeps the renderer's facing flag in
//! step with horizontal motion.

use hecs::World;

use galaxion_core::components::{Transform, Velocity};
use galaxion_core::path::Path;
use galaxion_core::types::Vector2Ext;

/// Advance every moving entity by `dt_ms`.
pub fn run(world: &mut World, dt_ms: f32) {
    for (_entity, (transform, velocity, path)) in
        world.query_mut::<(&mut Transform, &Velocity, Option<&mut Path>)>()
    {
        let before = transform.position;
        match path {
            Some(path) => follow_path(transform, path, velocity.speed() * dt_ms),
            None => transform.position += velocity.displacement(dt_ms),
        }
        let dx = transform.position.x - before.x;
        if dx < 0.0 {
            transform.flipped = true;
        } else if dx > 0.0 {
            transform.flipped = false;
        }
    }
}

/// Spend a distance `budget` walking `path` from the current position.
///
/// Waypoints that the budget reaches are snapped to and passed (firing
/// their triggers); the remainder carries on toward the next one. Running
/// out of waypoints reports End once and leaves the entity where it is.
pub fn follow_path(transform: &mut Transform, path: &mut Path, mut budget: f32) {
    while let Some(target) = path.current_point() {
        let (next, left) = transform.position.step_toward(target, budget);
        transform.position = next;
        if next != target {
            break;
        }
        budget = left;
        path.advance();
    }
}
