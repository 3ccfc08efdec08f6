//! Attract-mode input source.
//!
//! Steers the ship under the horizontally nearest enemy and taps fire on
//! a fixed cadence. Works purely from snapshots, the same view a player
//! would have.

use galaxion_core::commands::{Control, ControlEdge, InputFrame};
use galaxion_core::constants::SHIP_SPRITE_SIZE;
use galaxion_core::enums::EntityKind;
use galaxion_core::state::{EntityView, GameSnapshot};

/// Horizontal slack before the ship bothers moving.
const DEADZONE: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    fire_every: u32,
    since_fire: u32,
    fire_held: bool,
}

impl Autopilot {
    pub fn new(fire_every: u32) -> Self {
        Self {
            fire_every: fire_every.max(2),
            since_fire: 0,
            fire_held: false,
        }
    }

    /// Input for the next tick, given the latest snapshot.
    pub fn next_frame(&mut self, snapshot: &GameSnapshot) -> InputFrame {
        let mut frame = InputFrame::new();

        if self.fire_held {
            frame.edges.push(ControlEdge::Up(Control::Fire));
            self.fire_held = false;
        }

        let Some(ship_x) = ship_center_x(&snapshot.entities) else {
            return frame;
        };

        if let Some(target_x) = nearest_enemy_x(&snapshot.entities, ship_x) {
            let dx = target_x - ship_x;
            if dx < -DEADZONE {
                frame = frame.with_held(Control::MoveLeft);
            } else if dx > DEADZONE {
                frame = frame.with_held(Control::MoveRight);
            }
        }

        self.since_fire += 1;
        if self.since_fire >= self.fire_every {
            self.since_fire = 0;
            self.fire_held = true;
            frame = frame.with_held(Control::Fire);
            frame.edges.push(ControlEdge::Down(Control::Fire));
        }
        frame
    }
}

fn center_x(view: &EntityView) -> f32 {
    match &view.bounds {
        Some(bounds) => bounds.center().x,
        None => view.position.x,
    }
}

fn ship_center_x(entities: &[EntityView]) -> Option<f32> {
    entities
        .iter()
        .find(|view| view.kind == EntityKind::Ship)
        .map(|view| view.position.x + SHIP_SPRITE_SIZE.0 * 0.5)
}

fn nearest_enemy_x(entities: &[EntityView], from: f32) -> Option<f32> {
    entities
        .iter()
        .filter(|view| view.kind == EntityKind::Enemy)
        .map(center_x)
        .min_by(|a, b| (a - from).abs().total_cmp(&(b - from).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxion_core::types::{EntityId, Vector2};

    fn view(id: u64, kind: EntityKind, x: f32) -> EntityView {
        EntityView {
            id: EntityId(id),
            kind,
            position: Vector2::new(x, 100.0),
            flipped: false,
            bounds: None,
            enemy_type: None,
            enemy_phase: None,
            hostile: kind == EntityKind::Enemy,
        }
    }

    fn snapshot(entities: Vec<EntityView>) -> GameSnapshot {
        GameSnapshot {
            entities,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn steers_toward_nearest_enemy() {
        let mut pilot = Autopilot::new(10);
        let snap = snapshot(vec![
            view(1, EntityKind::Ship, 200.0),
            view(2, EntityKind::Enemy, 100.0),
            view(3, EntityKind::Enemy, 300.0),
            view(4, EntityKind::Enemy, 190.0),
        ]);
        let frame = pilot.next_frame(&snap);
        // Ship center is 216, nearest enemy sits at 190.
        assert!(frame.is_control_down(Control::MoveLeft));
        assert!(!frame.is_control_down(Control::MoveRight));
    }

    #[test]
    fn holds_still_inside_deadzone() {
        let mut pilot = Autopilot::new(10);
        let snap = snapshot(vec![
            view(1, EntityKind::Ship, 200.0),
            view(2, EntityKind::Enemy, 214.0),
        ]);
        let frame = pilot.next_frame(&snap);
        assert!(frame.held.is_empty());
    }

    #[test]
    fn fires_on_cadence_and_releases() {
        let mut pilot = Autopilot::new(3);
        let snap = snapshot(vec![view(1, EntityKind::Ship, 200.0)]);
        let frames: Vec<InputFrame> = (0..4).map(|_| pilot.next_frame(&snap)).collect();
        assert!(!frames[0].went_down(Control::Fire));
        assert!(!frames[1].went_down(Control::Fire));
        assert!(frames[2].went_down(Control::Fire));
        assert!(frames[3].edges.contains(&ControlEdge::Up(Control::Fire)));
    }

    #[test]
    fn idle_without_ship() {
        let mut pilot = Autopilot::new(2);
        let snap = snapshot(vec![view(2, EntityKind::Enemy, 100.0)]);
        for _ in 0..4 {
            let frame = pilot.next_frame(&snap);
            assert!(frame.held.is_empty());
            assert!(frame.edges.is_empty());
        }
    }
}
