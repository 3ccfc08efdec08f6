//! Attack-run planning.
//!
//! Pure functions that pick the waypoints of an improvised dive. The sim
//! crate turns them into a Path on the diving enemy.

use rand::Rng;

use galaxion_core::constants::*;
use galaxion_core::path::Path;
use galaxion_core::types::Vector2;

/// Enemy sprites are this wide; used to keep dive points on the field.
const ENEMY_WIDTH: f32 = 32.0;

/// Waypoint index that fires at the player (end of the opening curl).
pub const CURL_TRIGGER: usize = 1;

/// Random horizontal offset of a dive target from the player.
pub fn dive_spread(rng: &mut impl Rng) -> f32 {
    rng.gen_range(-ATTACK_SPREAD..=ATTACK_SPREAD)
}

fn clamp_x(x: f32) -> f32 {
    x.clamp(0.0, WORLD_WIDTH - ENEMY_WIDTH)
}

/// Opening curl: a short swing up and toward the nearer side edge.
pub fn curl_point(start: Vector2) -> Vector2 {
    let side = if start.x + ENEMY_WIDTH * 0.5 < WORLD_WIDTH * 0.5 {
        -1.0
    } else {
        1.0
    };
    Vector2::new(
        clamp_x(start.x + side * ATTACK_CURL.0),
        start.y - ATTACK_CURL.1,
    )
}

/// Path for a fresh attack run from `start`.
///
/// With a player the dive aims at the player's position plus a random
/// spread; without one it drops straight down off the field.
pub fn plan_attack_run(start: Vector2, player: Option<Vector2>, rng: &mut impl Rng) -> Path {
    let curl = curl_point(start);
    let dive = match player {
        Some(target) => Vector2::new(clamp_x(target.x + dive_spread(rng)), target.y),
        None => Vector2::new(curl.x, WORLD_HEIGHT + OFFSCREEN_MARGIN * 2.0),
    };
    Path::new(vec![start, curl, dive], [CURL_TRIGGER])
}

/// Next improvised waypoint for a run that reached the end of its path
/// while the player is still around: keep pressing down toward them.
pub fn continuation_point(current: Vector2, player: Vector2, rng: &mut impl Rng) -> Vector2 {
    Vector2::new(
        clamp_x(player.x + dive_spread(rng)),
        current.y + ATTACK_STEP_Y,
    )
}

/// True once an attack-running enemy has dropped below the field.
pub fn is_below_field(position: Vector2) -> bool {
    position.y > WORLD_HEIGHT + OFFSCREEN_MARGIN
}

/// Re-entry point above the top edge for an enemy that dove off the bottom.
pub fn wrap_to_top(position: Vector2) -> Vector2 {
    Vector2::new(position.x, -OFFSCREEN_MARGIN)
}
