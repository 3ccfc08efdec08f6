//! Entity spawn factories.
//!
//! Each factory returns an `EntityBuilder` with the full component bundle
//! for one kind of entity; the caller queues it on the entity manager.

use hecs::EntityBuilder;

use galaxion_choreo::profiles::get_profile;
use galaxion_choreo::squad::SpawnRecord;
use galaxion_core::collision::CollisionBox;
use galaxion_core::components::*;
use galaxion_core::constants::*;
use galaxion_core::types::Vector2;

/// Where a fresh ship appears: bottom centre.
pub fn ship_spawn_point() -> Vector2 {
    Vector2::new((WORLD_WIDTH - SHIP_SPRITE_SIZE.0) * 0.5, SHIP_Y)
}

pub fn ship(position: Vector2) -> EntityBuilder {
    let mut builder = EntityBuilder::new();
    builder
        .add(Ship)
        .add(Transform::at(position))
        .add(Velocity::still(SHIP_SPEED))
        .add(CollisionBox::for_sprite(SHIP_SPRITE_SIZE, SHIP_HITBOX, true));
    builder
}

/// An enemy at the start of its entry path.
///
/// `formation_position` is the slot's current position, or `None` for a
/// one-shot enemy that never joins the formation.
pub fn enemy(record: &SpawnRecord, formation_position: Option<Vector2>) -> EntityBuilder {
    let profile = get_profile(record.enemy_type);
    let mut builder = EntityBuilder::new();
    builder
        .add(Enemy::entering(record.enemy_type, formation_position))
        .add(Transform::at(record.spawn_point()))
        .add(Velocity::still(ENEMY_SPEED))
        .add(record.entry_path())
        .add(CollisionBox::for_sprite(
            profile.sprite_size,
            profile.hitbox,
            false,
        ));
    if let (Some(slot), Some(_)) = (record.formation_slot, formation_position) {
        builder.add(FormationSlot(slot));
    }
    builder
}

/// A shot whose centre starts at `center`, travelling along `direction`.
/// Friendly shots are the player's.
pub fn projectile(center: Vector2, direction: Vector2, friendly: bool) -> EntityBuilder {
    let speed = if friendly {
        PLAYER_SHOT_SPEED
    } else {
        ENEMY_SHOT_SPEED
    };
    let top_left = center - Vector2::new(SHOT_SPRITE_SIZE.0, SHOT_SPRITE_SIZE.1) * 0.5;
    let mut builder = EntityBuilder::new();
    builder
        .add(Projectile)
        .add(Transform::at(top_left))
        .add(Velocity::new(speed, direction))
        .add(CollisionBox::for_sprite(
            SHOT_SPRITE_SIZE,
            SHOT_HITBOX,
            friendly,
        ));
    builder
}

/// Short-lived explosion effect centred on `center`.
pub fn explosion(center: Vector2) -> EntityBuilder {
    let top_left = center - Vector2::new(EXPLOSION_SPRITE_SIZE.0, EXPLOSION_SPRITE_SIZE.1) * 0.5;
    let mut builder = EntityBuilder::new();
    builder
        .add(Explosion)
        .add(Transform::at(top_left))
        .add(Lifetime {
            remaining_ms: EXPLOSION_LIFETIME_MS,
        });
    builder
}
