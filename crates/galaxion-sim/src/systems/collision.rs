//! Collision detection and classification.
//!
//! Every unordered pair of admitted entities with collision boxes is
//! tested; boxes on the same side never collide. Overlapping pairs are
//! classified by what hit what. Dispatching the reactions is the game
//! manager's job.

use hecs::{Entity, World};

use galaxion_core::collision::CollisionBox;
use galaxion_core::components::{Doomed, Enemy, Projectile, Ship, Transform};
use galaxion_core::enums::CollisionKind;
use galaxion_core::types::EntityId;

/// What an entity is, for classification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Ship,
    Enemy,
    PlayerShot,
    EnemyShot,
    Other,
}

/// A classified overlap between two admitted entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub kind: CollisionKind,
    pub a: (EntityId, Entity),
    pub b: (EntityId, Entity),
}

pub fn role(world: &World, entity: Entity) -> Role {
    let Ok(entity_ref) = world.entity(entity) else {
        return Role::Other;
    };
    if entity_ref.has::<Ship>() {
        Role::Ship
    } else if entity_ref.has::<Enemy>() {
        Role::Enemy
    } else if entity_ref.has::<Projectile>() {
        match entity_ref.get::<&CollisionBox>() {
            Some(hitbox) if hitbox.is_friendly => Role::PlayerShot,
            Some(_) => Role::EnemyShot,
            None => Role::Other,
        }
    } else {
        Role::Other
    }
}

/// Kind of collision between two roles, in either order.
///
/// The ship touching anything hostile is a player death; a player shot
/// touching an enemy is an enemy death.
pub fn classify(a: Role, b: Role) -> Option<CollisionKind> {
    match (a, b) {
        (Role::Ship, Role::Enemy | Role::EnemyShot) | (Role::Enemy | Role::EnemyShot, Role::Ship) => {
            Some(CollisionKind::PlayerDeath)
        }
        (Role::PlayerShot, Role::Enemy) | (Role::Enemy, Role::PlayerShot) => {
            Some(CollisionKind::EnemyDeath)
        }
        _ => None,
    }
}

/// Find every classified overlap among `entries`, in entry order.
/// Entities already doomed this tick take no part.
pub fn detect(world: &World, entries: &[(EntityId, Entity)]) -> Vec<Contact> {
    let candidates: Vec<(EntityId, Entity, Transform, CollisionBox, Role)> = entries
        .iter()
        .filter_map(|&(id, entity)| {
            let entity_ref = world.entity(entity).ok()?;
            if entity_ref.has::<Doomed>() {
                return None;
            }
            let transform = *entity_ref.get::<&Transform>()?;
            let hitbox = *entity_ref.get::<&CollisionBox>()?;
            Some((id, entity, transform, hitbox, role(world, entity)))
        })
        .collect();

    let mut contacts = Vec::new();
    for (i, a) in candidates.iter().enumerate() {
        for b in &candidates[i + 1..] {
            if !a.3.detect_collision(&a.2, &b.3, &b.2) {
                continue;
            }
            if let Some(kind) = classify(a.4, b.4) {
                contacts.push(Contact {
                    kind,
                    a: (a.0, a.1),
                    b: (b.0, b.1),
                });
            }
        }
    }
    contacts
}
