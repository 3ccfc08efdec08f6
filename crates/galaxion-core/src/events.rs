//! Events emitted by the simulation for scoring, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{CollisionKind, EnemyType};
use crate::types::EntityId;

/// Gameplay events, collected per tick into the snapshot and broadcast
/// through the game manager's notification emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A classified collision between two entities.
    Collision {
        kind: CollisionKind,
        a: EntityId,
        b: EntityId,
    },
    /// The player fired.
    ShotFired { id: EntityId },
    /// An enemy fired at the player.
    EnemyFired { id: EntityId },
    /// An enemy was shot down.
    EnemyDestroyed {
        id: EntityId,
        enemy_type: EnemyType,
        points: u32,
        last_of_wave: bool,
    },
    /// An enemy settled into its formation slot.
    EnteredFormation { id: EntityId },
    /// An enemy started an attack run.
    AttackRun { id: EntityId },
    /// The ship was destroyed.
    PlayerDestroyed { lives_remaining: u32 },
    /// A new ship entered play.
    PlayerSpawned { id: EntityId },
    WaveStarted { wave: u32 },
    WaveCleared { wave: u32 },
    /// The last life was lost.
    GameOver { final_score: u32 },
}

/// Admission and eviction notifications from the entity manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityEvent {
    Added(EntityId),
    Removed(EntityId),
}
