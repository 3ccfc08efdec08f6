//! Cleanup system: queues removal of projectiles that left the field and
//! effects whose lifetime ran out.

use hecs::{Entity, World};

use galaxion_core::components::{Doomed, Lifetime, Projectile, Transform};
use galaxion_core::constants::{OFFSCREEN_MARGIN, WORLD_HEIGHT, WORLD_WIDTH};
use galaxion_core::types::Vector2;

use crate::entity_manager::{queue_removal, EntityQueue};

fn off_field(position: Vector2) -> bool {
    position.x < -OFFSCREEN_MARGIN
        || position.x > WORLD_WIDTH + OFFSCREEN_MARGIN
        || position.y < -OFFSCREEN_MARGIN
        || position.y > WORLD_HEIGHT + OFFSCREEN_MARGIN
}

/// Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(world: &mut World, queue: &mut EntityQueue, dt_ms: f32, buffer: &mut Vec<Entity>) {
    buffer.clear();

    for (entity, (_projectile, transform, doomed)) in
        world.query_mut::<(&Projectile, &Transform, Option<&Doomed>)>()
    {
        if doomed.is_none() && off_field(transform.position) {
            buffer.push(entity);
        }
    }

    for (entity, (lifetime, doomed)) in world.query_mut::<(&mut Lifetime, Option<&Doomed>)>() {
        if doomed.is_some() {
            continue;
        }
        lifetime.remaining_ms -= dt_ms;
        if lifetime.remaining_ms <= 0.0 {
            buffer.push(entity);
        }
    }

    for entity in buffer.drain(..) {
        queue_removal(world, queue, entity);
    }
}

#[cfg(test)]
mod tests {
    use hecs::EntityBuilder;

    use galaxion_core::types::EntityId;

    use super::*;
    use crate::world_setup;

    fn spawn(world: &mut World, n: u64, mut builder: EntityBuilder) -> (EntityId, Entity) {
        let id = EntityId(n);
        builder.add(id);
        (id, world.spawn(builder.build()))
    }

    #[test]
    fn off_field_shots_are_removed() {
        let mut world = World::new();
        let mut queue = EntityQueue::default();
        let (gone, _) = spawn(
            &mut world,
            1,
            world_setup::projectile(Vector2::new(100.0, -60.0), Vector2::NEG_Y, true),
        );
        let (kept, _) = spawn(
            &mut world,
            2,
            world_setup::projectile(Vector2::new(100.0, 100.0), Vector2::NEG_Y, true),
        );
        run(&mut world, &mut queue, 16.0, &mut Vec::new());
        assert!(queue.is_pending_removal(gone));
        assert!(!queue.is_pending_removal(kept));
    }

    #[test]
    fn explosions_expire() {
        let mut world = World::new();
        let mut queue = EntityQueue::default();
        let (id, entity) = spawn(&mut world, 1, world_setup::explosion(Vector2::ZERO));
        let mut buffer = Vec::new();
        run(&mut world, &mut queue, 300.0, &mut buffer);
        assert!(!queue.is_pending_removal(id));
        run(&mut world, &mut queue, 100.0, &mut buffer);
        assert!(queue.is_pending_removal(id));
        assert!(world.get::<&Doomed>(entity).is_ok());
    }
}
