//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Visual and scoring category of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnemyType {
    #[default]
    Bee,
    Butterfly,
    Boss,
}

/// Enemy behaviour phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Following a scripted entry path.
    #[default]
    Entering,
    /// Parked on its live formation slot.
    InFormation,
    /// Diving at the player along an improvised path.
    AttackRun,
    /// Chasing its (moving) formation slot.
    ReturningToFormation,
}

/// Outcome of a collision between two entities, by role combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Player ship hit by a hostile entity or hostile projectile.
    PlayerDeath,
    /// Hostile entity hit by a friendly projectile.
    EnemyDeath,
}

/// Coarse entity category, used for collision roles and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Enemy,
    Projectile,
    Explosion,
}

/// Session phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session running (menu / attract screen).
    #[default]
    Idle,
    Playing,
    GameOver,
}
