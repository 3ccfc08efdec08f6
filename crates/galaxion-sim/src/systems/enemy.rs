//! Enemy behaviour system.
//!
//! Drives each enemy through its lifecycle: entry path, formation, attack
//! run, and the flight back to its slot. Path events drained from each
//! enemy's Path decide the transitions; structural changes (swapping or
//! dropping the Path) are buffered and applied after the query.

use hecs::{Entity, World};
use rand::Rng;

use galaxion_choreo::attack::{continuation_point, is_below_field, plan_attack_run, wrap_to_top};
use galaxion_core::collision::CollisionBox;
use galaxion_core::components::{Doomed, Enemy, Transform, Velocity};
use galaxion_core::constants::ATTACK_RETURN_DISTANCE;
use galaxion_core::enums::EnemyPhase;
use galaxion_core::events::GameEvent;
use galaxion_core::path::{Path, PathEvent};
use galaxion_core::types::{EntityId, Vector2, Vector2Ext};

use crate::entity_manager::EntityQueue;
use crate::world_setup;

/// Where the player currently is, as enemies see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTarget {
    /// Ship Transform position; dive paths aim here.
    pub position: Vector2,
    /// Hitbox centre; shots aim here.
    pub center: Vector2,
}

enum Change {
    SetPath(Path),
    ClearPath,
    /// Leave the path and fly straight on.
    FlyOn(Velocity),
    Destroy(EntityId),
}

/// Head back to the formation slot, or leave play if there is none.
fn return_to_slot(enemy: &mut Enemy, from: Vector2, id: EntityId) -> Change {
    match enemy.formation_position {
        Some(slot) => {
            enemy.phase = EnemyPhase::ReturningToFormation;
            Change::SetPath(Path::between(from, slot))
        }
        None => Change::Destroy(id),
    }
}

/// Run one tick of enemy behaviour. Shots fired and formation arrivals are
/// reported through `events`.
pub fn run(
    world: &mut World,
    queue: &mut EntityQueue,
    player: Option<PlayerTarget>,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let mut changes: Vec<(Entity, Change)> = Vec::new();
    let mut shots: Vec<(EntityId, Vector2)> = Vec::new();

    for (entity, (id, enemy, transform, velocity, mut path, hitbox)) in world.query_mut::<(
        &EntityId,
        &mut Enemy,
        &mut Transform,
        &Velocity,
        Option<&mut Path>,
        &CollisionBox,
    )>() {
        let path_events = path
            .as_deref_mut()
            .map(Path::take_events)
            .unwrap_or_default();
        for event in path_events {
            match event {
                PathEvent::Trigger(_) => {
                    if player.is_some() {
                        shots.push((*id, hitbox.center(transform)));
                    }
                }
                PathEvent::End => match enemy.phase {
                    EnemyPhase::Entering => {
                        changes.push((entity, return_to_slot(enemy, transform.position, *id)));
                    }
                    EnemyPhase::AttackRun => match player {
                        Some(target) => {
                            if let Some(path) = path.as_deref_mut() {
                                let next =
                                    continuation_point(transform.position, target.position, rng);
                                path.add_point(next, false);
                            }
                        }
                        None => {
                            let origin = enemy.attack_origin.unwrap_or(transform.position);
                            let near = origin.distance(transform.position) < ATTACK_RETURN_DISTANCE;
                            if near && enemy.formation_position.is_some() {
                                changes.push((entity, return_to_slot(enemy, transform.position, *id)));
                            } else {
                                let heading = path
                                    .as_deref()
                                    .and_then(Path::final_heading)
                                    .filter(|h| *h != Vector2::ZERO)
                                    .unwrap_or(Vector2::Y);
                                let fly_on = Velocity::new(velocity.speed(), heading);
                                changes.push((entity, Change::FlyOn(fly_on)));
                            }
                        }
                    },
                    EnemyPhase::ReturningToFormation => {
                        enemy.phase = EnemyPhase::InFormation;
                        enemy.has_entered_formation = true;
                        enemy.attack_origin = None;
                        changes.push((entity, Change::ClearPath));
                        events.push(GameEvent::EnteredFormation { id: *id });
                    }
                    EnemyPhase::InFormation => {}
                },
            }
        }

        match enemy.phase {
            EnemyPhase::InFormation => {
                if let Some(slot) = enemy.formation_position {
                    transform.position = slot;
                }
            }
            EnemyPhase::ReturningToFormation => {
                if let (Some(path), Some(slot)) = (path, enemy.formation_position) {
                    path.set_destination(transform.position, slot);
                }
            }
            EnemyPhase::AttackRun => {
                if is_below_field(transform.position) {
                    transform.position = wrap_to_top(transform.position);
                    changes.push((entity, return_to_slot(enemy, transform.position, *id)));
                }
            }
            EnemyPhase::Entering => {}
        }
    }

    for (entity, change) in changes {
        match change {
            Change::SetPath(path) => {
                let _ = world.insert_one(entity, path);
            }
            Change::ClearPath => {
                let _ = world.remove_one::<Path>(entity);
                if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
                    *velocity = Velocity::still(velocity.speed());
                }
            }
            Change::FlyOn(velocity) => {
                let _ = world.remove_one::<Path>(entity);
                let _ = world.insert_one(entity, velocity);
            }
            Change::Destroy(id) => {
                queue.remove(id);
                let _ = world.insert_one(entity, Doomed);
            }
        }
    }

    if let Some(target) = player {
        for (id, origin) in shots {
            let direction = origin.direction_to(target.center);
            queue.add(world_setup::projectile(origin, direction, false));
            events.push(GameEvent::EnemyFired { id });
        }
    }
}

/// Send an in-formation enemy on an attack run. Returns false (and does
/// nothing) if the enemy is gone, doomed, or not sitting in formation.
pub fn launch_attack_run(
    world: &mut World,
    entity: Entity,
    player: Option<PlayerTarget>,
    rng: &mut impl Rng,
) -> bool {
    if world.get::<&Doomed>(entity).is_ok() {
        return false;
    }
    let start = match (world.get::<&mut Enemy>(entity), world.get::<&Transform>(entity)) {
        (Ok(mut enemy), Ok(transform)) if enemy.phase == EnemyPhase::InFormation => {
            enemy.phase = EnemyPhase::AttackRun;
            enemy.attack_origin = Some(transform.position);
            transform.position
        }
        _ => return false,
    };
    let path = plan_attack_run(start, player.map(|p| p.position), rng);
    world.insert_one(entity, path).is_ok()
}
