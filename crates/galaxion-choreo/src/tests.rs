#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use galaxion_core::constants::*;
    use galaxion_core::enums::EnemyType;
    use galaxion_core::path::PathEvent;
    use galaxion_core::types::Vector2;
    use galaxion_core::wave::{
        default_campaign, SpawnAssignment, SquadDescriptor, SquadPath, SwaySettings,
        WaveDescriptor,
    };

    use crate::attack::{self, plan_attack_run, CURL_TRIGGER};
    use crate::formation::{EnemyFormation, FormationMotion};
    use crate::profiles::points_for;
    use crate::squad::{squad_cursors, SquadCursor};

    fn sway(distance: f32, duration_ms: f32, cycles: u32) -> SwaySettings {
        SwaySettings {
            distance,
            duration_ms,
            cycles,
        }
    }

    fn two_slot_layout() -> Vec<Vector2> {
        vec![Vector2::new(100.0, 80.0), Vector2::new(140.0, 80.0)]
    }

    fn approx_vec(a: Vector2, b: Vector2) {
        assert!(a.abs_diff_eq(b, 1e-3), "{a:?} != {b:?}");
    }

    // ---- Formation ----

    #[test]
    fn test_formation_starts_at_base() {
        let formation = EnemyFormation::new(&two_slot_layout(), &sway(20.0, 1000.0, 2));
        assert_eq!(formation.size(), 2);
        approx_vec(formation.position(0).unwrap(), Vector2::new(100.0, 80.0));
        approx_vec(formation.position(1).unwrap(), Vector2::new(140.0, 80.0));
        assert!(formation.position(2).is_none());
    }

    #[test]
    fn test_formation_interpolates_linearly() {
        let mut formation = EnemyFormation::new(&two_slot_layout(), &sway(20.0, 1000.0, 2));
        formation.update(250.0);
        approx_vec(formation.position(0).unwrap(), Vector2::new(105.0, 80.0));
        formation.update(250.0);
        assert_relative_eq!(formation.progress(), 0.5);
        approx_vec(formation.position(1).unwrap(), Vector2::new(150.0, 80.0));
    }

    #[test]
    fn test_formation_reaches_destination_at_duration() {
        let mut formation = EnemyFormation::new(&two_slot_layout(), &sway(20.0, 1000.0, 2));
        formation.update(1000.0);
        // The leg completed and swapped: the live position is the old
        // destination, now the base of the return leg.
        approx_vec(formation.position(0).unwrap(), Vector2::new(120.0, 80.0));
        assert_eq!(formation.cycles_remaining(), 1);
        assert_eq!(formation.motion(), FormationMotion::Sway);

        formation.update(500.0);
        approx_vec(formation.position(0).unwrap(), Vector2::new(110.0, 80.0));
    }

    #[test]
    fn test_formation_slots_move_in_lockstep() {
        let mut formation = EnemyFormation::new(&two_slot_layout(), &sway(20.0, 1000.0, 2));
        for _ in 0..37 {
            formation.update(16.0);
            let p = formation.positions();
            assert_relative_eq!(p[1].x - p[0].x, 40.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_formation_spreads_after_cycles() {
        let layout = two_slot_layout();
        let mut formation = EnemyFormation::new(&layout, &sway(20.0, 1000.0, 1));
        formation.update(1000.0); // first leg, one swap
        formation.update(1000.0); // back leg, cycles exhausted
        assert_eq!(formation.motion(), FormationMotion::Spreading);

        // Spread starts from where the formation is and takes half as long.
        approx_vec(formation.position(0).unwrap(), Vector2::new(100.0, 80.0));
        formation.update(500.0);
        assert_eq!(formation.motion(), FormationMotion::Settled);

        let spread = formation.spread_positions().to_vec();
        approx_vec(formation.position(0).unwrap(), spread[0]);
        // Centroid is (120, 80); slots sit 20 * SPREAD_FACTOR either side.
        assert_relative_eq!(spread[0].x, 120.0 - 20.0 * SPREAD_FACTOR, epsilon = 1e-3);
        assert_relative_eq!(spread[1].x, 120.0 + 20.0 * SPREAD_FACTOR, epsilon = 1e-3);

        formation.update(1000.0);
        approx_vec(formation.position(1).unwrap(), spread[1]);
    }

    #[test]
    fn test_transition_to_center_chains_into_spread() {
        let mut formation = EnemyFormation::new(&two_slot_layout(), &sway(20.0, 1000.0, 5));
        formation.update(200.0); // slot 0 at x = 104
        formation.transition_to_center();
        assert_eq!(formation.motion(), FormationMotion::Centering);
        approx_vec(formation.position(0).unwrap(), Vector2::new(104.0, 80.0));

        formation.update(500.0);
        // Arrived at the sway midpoint and began spreading from there.
        assert_eq!(formation.motion(), FormationMotion::Spreading);
        approx_vec(formation.position(0).unwrap(), Vector2::new(110.0, 80.0));

        formation.update(500.0);
        assert_eq!(formation.motion(), FormationMotion::Settled);
        approx_vec(
            formation.position(0).unwrap(),
            formation.spread_positions()[0],
        );
    }

    // ---- Squads ----

    fn squad_path(points: usize, slots: &[Option<usize>]) -> SquadPath {
        SquadPath {
            points: (0..points).map(|i| Vector2::new(i as f32, 0.0)).collect(),
            triggers: vec![],
            enemies: slots
                .iter()
                .map(|&formation_slot| SpawnAssignment {
                    enemy_type: EnemyType::Bee,
                    formation_slot,
                })
                .collect(),
        }
    }

    #[test]
    fn test_single_squad_yields_in_order() {
        let squad = SquadDescriptor::Single(squad_path(2, &[Some(0), Some(1), None]));
        let mut cursor = SquadCursor::new(&squad);
        assert_eq!(cursor.remaining(), 3);

        let slots: Vec<Option<usize>> = cursor
            .by_ref()
            .map(|group| {
                assert_eq!(group.len(), 1);
                group[0].formation_slot
            })
            .collect();
        assert_eq!(slots, vec![Some(0), Some(1), None]);
        assert!(cursor.is_exhausted());
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_mirrored_squad_advances_in_lockstep() {
        let squad = SquadDescriptor::Mirrored {
            left: squad_path(3, &[Some(0), Some(1)]),
            right: squad_path(2, &[Some(2), Some(3), Some(4)]),
        };
        let groups: Vec<Vec<Option<usize>>> = SquadCursor::new(&squad)
            .map(|g| g.into_iter().map(|r| r.formation_slot).collect())
            .collect();
        assert_eq!(
            groups,
            vec![
                vec![Some(0), Some(2)],
                vec![Some(1), Some(3)],
                vec![Some(4)],
            ]
        );
    }

    #[test]
    fn test_spawn_record_entry_path() {
        let mut path_def = squad_path(3, &[Some(0)]);
        path_def.triggers = vec![1];
        let squad = SquadDescriptor::Single(path_def);
        let record = SquadCursor::new(&squad).next().unwrap().remove(0);
        assert_eq!(record.spawn_point(), Vector2::new(0.0, 0.0));

        let mut path = record.entry_path();
        assert_eq!(path.len(), 3);
        path.advance();
        path.advance();
        assert_eq!(path.take_events(), vec![PathEvent::Trigger(1)]);
    }

    #[test]
    fn test_squad_cursors_cover_wave() {
        let wave: WaveDescriptor = default_campaign().remove(0);
        let cursors = squad_cursors(&wave);
        assert_eq!(cursors.len(), wave.squads.len());
        let total: usize = cursors.iter().map(SquadCursor::remaining).sum();
        assert_eq!(total, wave.enemy_count());
    }

    // ---- Attack runs ----

    #[test]
    fn test_attack_run_aims_near_player() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let start = Vector2::new(100.0, 100.0);
        let player = Vector2::new(240.0, SHIP_Y);
        for _ in 0..50 {
            let path = plan_attack_run(start, Some(player), &mut rng);
            assert_eq!(path.len(), 3);
            assert!(path.is_trigger(CURL_TRIGGER));
            let dive = path.destination().unwrap();
            assert_relative_eq!(dive.y, SHIP_Y);
            assert!((dive.x - player.x).abs() <= ATTACK_SPREAD + 1e-3);
        }
    }

    #[test]
    fn test_attack_run_curls_toward_near_edge() {
        let left = attack::curl_point(Vector2::new(100.0, 100.0));
        assert!(left.x < 100.0 && left.y < 100.0);
        let right = attack::curl_point(Vector2::new(360.0, 100.0));
        assert!(right.x > 360.0);
    }

    #[test]
    fn test_attack_run_without_player_drops_off_field() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = plan_attack_run(Vector2::new(200.0, 100.0), None, &mut rng);
        let dive = path.destination().unwrap();
        assert!(attack::is_below_field(dive));
    }

    #[test]
    fn test_continuation_moves_down() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let next = attack::continuation_point(
            Vector2::new(200.0, 300.0),
            Vector2::new(240.0, SHIP_Y),
            &mut rng,
        );
        assert_relative_eq!(next.y, 300.0 + ATTACK_STEP_Y);
        assert_eq!(attack::wrap_to_top(next).y, -OFFSCREEN_MARGIN);
    }

    // ---- Profiles ----

    #[test]
    fn test_airborne_kills_are_worth_more() {
        for t in [EnemyType::Bee, EnemyType::Butterfly, EnemyType::Boss] {
            assert!(points_for(t, true) > points_for(t, false));
        }
        assert_eq!(points_for(EnemyType::Boss, true), 400);
    }
}
