//! Simulation constants and tuning parameters.
//!
//! Distances are play-field pixels, times are milliseconds, speeds are
//! pixels per millisecond.

/// Nominal tick rate (Hz) for drivers that run a fixed-step loop.
pub const TICK_RATE: u32 = 60;

/// Nominal milliseconds per tick.
pub const TICK_MS: f32 = 1000.0 / TICK_RATE as f32;

// --- Play field ---

pub const WORLD_WIDTH: f32 = 480.0;
pub const WORLD_HEIGHT: f32 = 640.0;

/// How far past an edge an entity may travel before it counts as off-field.
pub const OFFSCREEN_MARGIN: f32 = 32.0;

// --- Ship ---

pub const SHIP_SPEED: f32 = 0.25;
pub const SHIP_SPRITE_SIZE: (f32, f32) = (32.0, 32.0);
pub const SHIP_HITBOX: (f32, f32) = (20.0, 24.0);
/// Vertical position of the ship's sprite origin.
pub const SHIP_Y: f32 = WORLD_HEIGHT - 64.0;
/// Player shots allowed on screen at once.
pub const MAX_PLAYER_SHOTS: usize = 2;
pub const DEFAULT_LIVES: u32 = 3;
pub const RESPAWN_DELAY_MS: f32 = 2000.0;

// --- Projectiles ---

pub const PLAYER_SHOT_SPEED: f32 = 0.6;
pub const ENEMY_SHOT_SPEED: f32 = 0.3;
pub const SHOT_SPRITE_SIZE: (f32, f32) = (4.0, 12.0);
pub const SHOT_HITBOX: (f32, f32) = (4.0, 10.0);

// --- Enemies ---

pub const ENEMY_SPEED: f32 = 0.2;
pub const EXPLOSION_LIFETIME_MS: f32 = 400.0;
pub const EXPLOSION_SPRITE_SIZE: (f32, f32) = (32.0, 32.0);

// --- Scoring ---

/// Awarded on top of the base value for the last enemy of a wave.
pub const LAST_ENEMY_BONUS: u32 = 1000;

// --- Wave orchestration ---

/// Gap between consecutive enemies of one squad.
pub const SPAWN_INTERVAL_MS: f32 = 150.0;
/// Gap between the end of one squad and the start of the next.
pub const SQUAD_GAP_MS: f32 = 1000.0;

// --- Formation ---

pub const DEFAULT_SWAY_DISTANCE: f32 = 24.0;
pub const DEFAULT_SWAY_DURATION_MS: f32 = 1800.0;
pub const DEFAULT_SWAY_CYCLES: u32 = 4;
/// Scale applied about the layout centroid to produce the spread layout.
pub const SPREAD_FACTOR: f32 = 1.25;

// --- Attack runs ---

pub const ATTACK_INTERVAL_MS: f32 = 3000.0;
/// Enemies launched per scheduling round.
pub const ATTACK_BURST: usize = 2;
pub const ATTACK_BURST_GAP_MS: f32 = 400.0;
/// Max random horizontal offset of a dive target from the player.
pub const ATTACK_SPREAD: f32 = 60.0;
/// Outward/upward swing of the opening curl.
pub const ATTACK_CURL: (f32, f32) = (48.0, 40.0);
/// Vertical distance of each improvised continuation waypoint.
pub const ATTACK_STEP_Y: f32 = 120.0;
/// An attack run that loses its target within this distance of its launch
/// point heads back to formation instead of flying on.
pub const ATTACK_RETURN_DISTANCE: f32 = 96.0;
