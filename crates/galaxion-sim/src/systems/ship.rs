//! Player ship: control input, field clamping and firing.

use hecs::World;

use galaxion_core::collision::CollisionBox;
use galaxion_core::commands::{Control, InputFrame};
use galaxion_core::components::{Doomed, Projectile, Ship, Transform, Velocity};
use galaxion_core::constants::{MAX_PLAYER_SHOTS, SHIP_SPEED, SHIP_SPRITE_SIZE, WORLD_WIDTH};
use galaxion_core::events::GameEvent;
use galaxion_core::types::{EntityId, Vector2};

use crate::entity_manager::EntityQueue;
use crate::scoring::ScoreState;
use crate::world_setup;

/// Apply one frame of input to the ship.
///
/// Held left/right set the ship's velocity (both or neither stop it). A
/// fresh fire press launches a shot from the nose unless the player
/// already has `MAX_PLAYER_SHOTS` in flight.
pub fn process_inputs(
    world: &mut World,
    queue: &mut EntityQueue,
    input: &InputFrame,
    score: &mut ScoreState,
    events: &mut Vec<GameEvent>,
) {
    let mut muzzle: Option<Vector2> = None;

    for (_entity, (_ship, transform, velocity, hitbox, doomed)) in world.query_mut::<(
        &Ship,
        &Transform,
        &mut Velocity,
        &CollisionBox,
        Option<&Doomed>,
    )>() {
        if doomed.is_some() {
            continue;
        }
        let mut dx = 0.0;
        if input.is_control_down(Control::MoveLeft) {
            dx -= 1.0;
        }
        if input.is_control_down(Control::MoveRight) {
            dx += 1.0;
        }
        *velocity = Velocity::new(SHIP_SPEED, Vector2::new(dx, 0.0));

        if input.went_down(Control::Fire) {
            let center = hitbox.center(transform);
            muzzle = Some(Vector2::new(center.x, transform.position.y));
        }
    }

    let Some(muzzle) = muzzle else {
        return;
    };
    if live_player_shots(world) >= MAX_PLAYER_SHOTS {
        return;
    }
    let id = queue.add(world_setup::projectile(muzzle, Vector2::NEG_Y, true));
    score.shots_fired += 1;
    events.push(GameEvent::ShotFired { id });
}

/// Player shots still in play.
pub fn live_player_shots(world: &World) -> usize {
    world
        .query::<(&Projectile, &CollisionBox, Option<&Doomed>)>()
        .iter()
        .filter(|(_, (_, hitbox, doomed))| hitbox.is_friendly && doomed.is_none())
        .count()
}

/// Keep the ship's sprite inside the field horizontally.
pub fn confine(world: &mut World) {
    let max_x = WORLD_WIDTH - SHIP_SPRITE_SIZE.0;
    for (_entity, (_ship, transform)) in world.query_mut::<(&Ship, &mut Transform)>() {
        transform.position.x = transform.position.x.clamp(0.0, max_x);
    }
}

/// The ship's identity and current target data, if one is in play.
pub fn find(world: &World) -> Option<(EntityId, Vector2, Vector2)> {
    let mut query = world.query::<(&EntityId, &Ship, &Transform, &CollisionBox, Option<&Doomed>)>();
    let found = query
        .iter()
        .find(|(_, (_, _, _, _, doomed))| doomed.is_none())
        .map(|(_, (id, _, transform, hitbox, _))| {
            (*id, transform.position, hitbox.center(transform))
        });
    found
}
