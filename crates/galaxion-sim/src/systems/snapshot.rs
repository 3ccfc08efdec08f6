//! Snapshot system: builds render views and the per-tick GameSnapshot.
//!
//! Read-only; never modifies the world.

use hecs::{Entity, World};

use galaxion_core::collision::CollisionBox;
use galaxion_core::components::*;
use galaxion_core::enums::{EntityKind, GamePhase};
use galaxion_core::events::GameEvent;
use galaxion_core::state::{EntityView, GameSnapshot};
use galaxion_core::types::{EntityId, SimTime};

use crate::entity_manager::EntityManager;
use crate::scoring::ScoreState;

/// Render view of one admitted entity. `None` if the entity has no
/// Transform or no recognisable kind.
pub fn entity_view(world: &World, id: EntityId, entity: Entity) -> Option<EntityView> {
    let entity_ref = world.entity(entity).ok()?;
    let transform = *entity_ref.get::<&Transform>()?;
    let hitbox = entity_ref.get::<&CollisionBox>().map(|b| *b);
    let enemy = entity_ref.get::<&Enemy>();

    let kind = if entity_ref.has::<Ship>() {
        EntityKind::Ship
    } else if enemy.is_some() {
        EntityKind::Enemy
    } else if entity_ref.has::<Projectile>() {
        EntityKind::Projectile
    } else if entity_ref.has::<Explosion>() {
        EntityKind::Explosion
    } else {
        return None;
    };

    Some(EntityView {
        id,
        kind,
        position: transform.position,
        flipped: transform.flipped,
        bounds: hitbox.map(|b| b.bounds(&transform)),
        enemy_type: enemy.as_ref().map(|e| e.enemy_type),
        enemy_phase: enemy.as_ref().map(|e| e.phase),
        hostile: hitbox.is_some_and(|b| !b.is_friendly),
    })
}

/// Build a complete GameSnapshot from the admitted entities.
pub fn build_snapshot(
    entities: &EntityManager,
    time: &SimTime,
    phase: GamePhase,
    paused: bool,
    wave: u32,
    score: &ScoreState,
    events: Vec<GameEvent>,
) -> GameSnapshot {
    let world = entities.world();
    GameSnapshot {
        time: *time,
        phase,
        paused,
        wave,
        score: score.view(),
        entities: entities
            .entries()
            .filter_map(|(id, entity)| entity_view(world, id, entity))
            .collect(),
        events,
    }
}
