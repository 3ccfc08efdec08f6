//! Entity components.
//!
//! Components are plain data. Behaviour lives in the sim crate's systems;
//! the exceptions are [`Path`](crate::path::Path) and
//! [`CollisionBox`](crate::collision::CollisionBox), which own their small
//! algorithms and live in their own modules.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyPhase, EnemyType};
use crate::types::{Vector2, Vector2Ext};

/// World position of an entity. Every entity has exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector2,
    /// Facing flag for the renderer (true = facing left).
    pub flipped: bool,
}

impl Transform {
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            flipped: false,
        }
    }
}

/// Speed plus unit direction. Ignored for motion while a Path is attached,
/// but its speed still sets the path-following budget.
///
/// Read-only once built: change movement by inserting a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    speed: f32,
    direction: Vector2,
}

impl Velocity {
    /// `direction` is normalized; a zero direction means "no free motion".
    pub fn new(speed: f32, direction: Vector2) -> Self {
        Self {
            speed,
            direction: direction.normalized(),
        }
    }

    /// Speed only, for path-driven entities.
    pub fn still(speed: f32) -> Self {
        Self::new(speed, Vector2::ZERO)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn direction(&self) -> Vector2 {
        self.direction
    }

    /// Displacement over `dt_ms`.
    pub fn displacement(&self, dt_ms: f32) -> Vector2 {
        self.direction * self.speed * dt_ms
    }
}

/// Index into the current wave's formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSlot(pub usize);

/// Enemy behaviour state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub enemy_type: EnemyType,
    pub phase: EnemyPhase,
    /// Live position of this enemy's formation slot, refreshed once per tick
    /// by the enemy manager. `None` for one-shot path enemies.
    pub formation_position: Option<Vector2>,
    /// Set the first time the enemy settles into formation.
    pub has_entered_formation: bool,
    /// Where the current attack run started.
    pub attack_origin: Option<Vector2>,
}

impl Enemy {
    pub fn entering(enemy_type: EnemyType, formation_position: Option<Vector2>) -> Self {
        Self {
            enemy_type,
            phase: EnemyPhase::Entering,
            formation_position,
            has_entered_formation: false,
            attack_origin: None,
        }
    }

    /// True while flying a path (entry, attack run, return), which is what
    /// makes a kill worth the in-flight value.
    pub fn is_airborne(&self) -> bool {
        self.phase != EnemyPhase::InFormation
    }
}

/// Remaining lifetime of a short-lived effect entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_ms: f32,
}

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// Marks a projectile. Its side comes from its collision box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile;

/// Marks an explosion effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion;

/// Attached when an entity's removal has been queued. Behaviour systems
/// skip doomed entities for the rest of the tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Doomed;
