//! State snapshot and render views: what the rendering and scoring
//! collaborators see after each tick.

use serde::{Deserialize, Serialize};

use crate::collision::Bounds;
use crate::enums::{EnemyPhase, EnemyType, EntityKind, GamePhase};
use crate::events::GameEvent;
use crate::types::{EntityId, SimTime, Vector2};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub paused: bool,
    pub wave: u32,
    pub score: ScoreView,
    pub entities: Vec<EntityView>,
    pub events: Vec<GameEvent>,
}

/// One admitted entity, as much as a renderer needs to pick a visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vector2,
    pub flipped: bool,
    /// Collision bounds, for debug overlays and sprite alignment.
    pub bounds: Option<Bounds>,
    pub enemy_type: Option<EnemyType>,
    pub enemy_phase: Option<EnemyPhase>,
    /// Hostile side (enemies and their shots).
    pub hostile: bool,
}

/// Running score for display and persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub shots_fired: u32,
    pub enemies_hit: u32,
    pub lives: u32,
    /// enemies_hit / shots_fired, 0 when nothing was fired.
    pub hit_ratio: f32,
}

/// Sink the rendering collaborator implements; called once per admitted
/// entity per frame.
pub trait RenderTarget {
    fn draw(&mut self, view: &EntityView, dt_ms: f32);
}

impl RenderTarget for Vec<EntityView> {
    fn draw(&mut self, view: &EntityView, _dt_ms: f32) {
        self.push(view.clone());
    }
}
