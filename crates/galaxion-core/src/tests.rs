#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use crate::commands::{Control, ControlEdge, InputFrame, SessionCommand};
    use crate::components::Velocity;
    use crate::emitter::{EventEmitter, ListenerId};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::GameSnapshot;
    use crate::types::{EntityId, Vector2, Vector2Ext};
    use crate::wave::{default_campaign, parse_campaign, SquadDescriptor, WaveDescriptor, WaveError};

    // ---- Vector2 ----

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
        assert_eq!(Vector2::ZERO.direction_to(Vector2::ZERO), Vector2::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = Vector2::new(3.0, 4.0).normalized();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_step_toward_partial_and_exact() {
        let from = Vector2::new(0.0, 0.0);
        let to = Vector2::new(10.0, 0.0);

        let (p, left) = from.step_toward(to, 4.0);
        assert_eq!(p, Vector2::new(4.0, 0.0));
        assert_eq!(left, 0.0);

        let (p, left) = from.step_toward(to, 15.0);
        assert_eq!(p, to);
        assert_relative_eq!(left, 5.0);
    }

    #[test]
    fn test_velocity_normalizes_direction() {
        let v = Velocity::new(2.0, Vector2::new(0.0, 5.0));
        assert_eq!(v.direction(), Vector2::new(0.0, 1.0));
        assert_eq!(v.displacement(10.0), Vector2::new(0.0, 20.0));
        assert_eq!(Velocity::still(1.0).displacement(10.0), Vector2::ZERO);
    }

    // ---- EventEmitter ----

    #[test]
    fn test_emitter_delivers_in_subscription_order() {
        let emitter = EventEmitter::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a", "b"] {
            let log = Rc::clone(&log);
            emitter.subscribe(move |n: &u32| log.borrow_mut().push(format!("{tag}{n}")));
        }
        emitter.emit(&1);
        emitter.emit(&2);
        assert_eq!(*log.borrow(), vec!["a1", "b1", "a2", "b2"]);
    }

    #[test]
    fn test_emitter_self_unsubscribe_during_emit() {
        let emitter = Rc::new(EventEmitter::<()>::new());
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let id = {
            let emitter_ref = Rc::downgrade(&emitter);
            let calls = Rc::clone(&calls);
            let own_id = Rc::clone(&own_id);
            emitter.subscribe(move |_| {
                calls.set(calls.get() + 1);
                if let (Some(em), Some(id)) = (emitter_ref.upgrade(), own_id.get()) {
                    em.unsubscribe(id);
                }
            })
        };
        own_id.set(Some(id));

        let later_calls = Rc::new(Cell::new(0));
        {
            let later_calls = Rc::clone(&later_calls);
            emitter.subscribe(move |_| later_calls.set(later_calls.get() + 1));
        }

        emitter.emit(&());
        emitter.emit(&());
        assert_eq!(calls.get(), 1, "self-removing listener runs once");
        assert_eq!(later_calls.get(), 2, "other listeners are unaffected");
        assert_eq!(emitter.listener_count(), 1);
    }

    #[test]
    fn test_emitter_subscribe_during_emit_applies_next_time() {
        let emitter = Rc::new(EventEmitter::<()>::new());
        let added_calls = Rc::new(Cell::new(0));
        {
            let emitter_ref = Rc::downgrade(&emitter);
            let added_calls = Rc::clone(&added_calls);
            emitter.subscribe(move |_| {
                if let Some(em) = emitter_ref.upgrade() {
                    let added_calls = Rc::clone(&added_calls);
                    em.subscribe(move |_| added_calls.set(added_calls.get() + 1));
                }
            });
        }
        emitter.emit(&());
        assert_eq!(added_calls.get(), 0);
        emitter.emit(&());
        assert_eq!(added_calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_is_false() {
        let emitter = EventEmitter::<u8>::new();
        let id = emitter.subscribe(|_| {});
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
    }

    // ---- Input ----

    #[test]
    fn test_input_frame_queries() {
        let frame = InputFrame::pressed(Control::Fire).with_held(Control::MoveLeft);
        assert!(frame.is_control_down(Control::Fire));
        assert!(frame.is_control_down(Control::MoveLeft));
        assert!(!frame.is_control_down(Control::MoveRight));
        assert!(frame.went_down(Control::Fire));
        assert!(!frame.went_down(Control::MoveLeft));
        assert_eq!(frame.edges, vec![ControlEdge::Down(Control::Fire)]);
    }

    // ---- Serde ----

    #[test]
    fn test_enemy_type_serde_names() {
        assert_eq!(serde_json::to_string(&EnemyType::Butterfly).unwrap(), "\"butterfly\"");
        let back: EnemyType = serde_json::from_str("\"boss\"").unwrap();
        assert_eq!(back, EnemyType::Boss);
    }

    #[test]
    fn test_session_command_serde() {
        for cmd in [
            SessionCommand::NewGame,
            SessionCommand::Quit,
            SessionCommand::Pause,
            SessionCommand::Resume,
        ] {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: SessionCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(cmd, back);
        }
    }

    #[test]
    fn test_game_event_tagged() {
        let event = GameEvent::GameOver { final_score: 1234 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"GameOver\""), "{json}");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let json = serde_json::to_string(&GameSnapshot::default()).unwrap();
        assert!(json.contains("\"phase\":\"Idle\""));
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(7).to_string(), "E7");
    }

    // ---- Wave descriptors ----

    const WAVE_JSON: &str = r#"{
        "formation": [{"x": 10, "y": 20}, {"x": 40, "y": 20}, {"x": 70, "y": 20}],
        "sway": {"distance": 16, "durationMs": 1000, "cycles": 2},
        "path2": {
            "points": [{"x": 0, "y": 0}, {"x": 50, "y": 50}],
            "enemies": [{"enemyType": "boss", "formationSlot": null}]
        },
        "path1L": {
            "points": [{"x": 0, "y": 0}, {"x": 10, "y": 100}, {"x": 10, "y": 20}],
            "triggers": [1],
            "enemies": [{"enemyType": "bee", "formationSlot": 0}]
        },
        "path1R": {
            "points": [{"x": 80, "y": 0}, {"x": 70, "y": 100}],
            "enemies": [
                {"enemyType": "butterfly", "formationSlot": 1},
                {"enemyType": "butterfly", "formationSlot": 2}
            ]
        }
    }"#;

    #[test]
    fn test_parse_wave_descriptor() {
        let wave = WaveDescriptor::from_json(WAVE_JSON).unwrap();
        assert_eq!(wave.slot_count(), 3);
        assert_eq!(wave.sway.cycles, 2);
        assert_relative_eq!(wave.sway.duration_ms, 1000.0);
        assert_eq!(wave.squads.len(), 2);
        assert_eq!(wave.enemy_count(), 4);

        match &wave.squads[0] {
            SquadDescriptor::Mirrored { left, right } => {
                assert_eq!(left.triggers, vec![1]);
                assert_eq!(left.points[1], Vector2::new(10.0, 100.0));
                assert_eq!(right.enemies.len(), 2);
                assert_eq!(right.enemies[1].formation_slot, Some(2));
            }
            other => panic!("expected mirrored squad first, got {other:?}"),
        }
        match &wave.squads[1] {
            SquadDescriptor::Single(path) => {
                assert_eq!(path.enemies[0].enemy_type, EnemyType::Boss);
                assert_eq!(path.enemies[0].formation_slot, None);
            }
            other => panic!("expected single squad second, got {other:?}"),
        }
    }

    #[test]
    fn test_sway_defaults_when_absent() {
        let json = r#"{"formation": [{"x": 0, "y": 0}]}"#;
        let wave = WaveDescriptor::from_json(json).unwrap();
        assert_eq!(wave.sway, crate::wave::SwaySettings::default());
        assert!(wave.squads.is_empty());
    }

    #[test]
    fn test_wave_errors() {
        let unpaired = r#"{"formation": [{"x": 0, "y": 0}],
            "path1L": {"points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}], "enemies": []}}"#;
        assert!(matches!(
            WaveDescriptor::from_json(unpaired),
            Err(WaveError::MissingRight(1))
        ));

        let bad_key = r#"{"formation": [{"x": 0, "y": 0}], "route1": {}}"#;
        assert!(matches!(
            WaveDescriptor::from_json(bad_key),
            Err(WaveError::UnknownKey(k)) if k == "route1"
        ));

        let bad_slot = r#"{"formation": [{"x": 0, "y": 0}],
            "path1": {"points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}],
                      "enemies": [{"enemyType": "bee", "formationSlot": 3}]}}"#;
        assert!(matches!(
            WaveDescriptor::from_json(bad_slot),
            Err(WaveError::SlotOutOfRange { slot: 3, slots: 1, .. })
        ));

        let bad_trigger = r#"{"formation": [{"x": 0, "y": 0}],
            "path1": {"points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}], "triggers": [2], "enemies": []}}"#;
        assert!(matches!(
            WaveDescriptor::from_json(bad_trigger),
            Err(WaveError::TriggerOutOfRange { index: 2, .. })
        ));

        let short = r#"{"formation": [{"x": 0, "y": 0}],
            "path1": {"points": [{"x": 0, "y": 0}], "enemies": []}}"#;
        assert!(matches!(
            WaveDescriptor::from_json(short),
            Err(WaveError::TooFewPoints { .. })
        ));

        assert!(matches!(
            WaveDescriptor::from_json(r#"{"formation": []}"#),
            Err(WaveError::EmptyFormation)
        ));
        assert!(matches!(
            WaveDescriptor::from_json("not json"),
            Err(WaveError::Json(_))
        ));
    }

    #[test]
    fn test_parse_campaign_array() {
        let json = format!("[{WAVE_JSON}, {WAVE_JSON}]");
        let waves = parse_campaign(&json).unwrap();
        assert_eq!(waves.len(), 2);
    }

    #[test]
    fn test_default_campaign_is_consistent() {
        let waves = default_campaign();
        assert_eq!(waves.len(), 2);
        for wave in &waves {
            assert_eq!(wave.slot_count(), 22);
            let mut slots: Vec<usize> = wave
                .squads
                .iter()
                .flat_map(|squad| match squad {
                    SquadDescriptor::Single(p) => p.enemies.clone(),
                    SquadDescriptor::Mirrored { left, right } => {
                        [left.enemies.clone(), right.enemies.clone()].concat()
                    }
                })
                .filter_map(|a| a.formation_slot)
                .collect();
            slots.sort_unstable();
            slots.dedup();
            assert_eq!(slots, (0..22).collect::<Vec<_>>(), "every slot filled once");
        }
        assert_eq!(waves[1].enemy_count(), waves[0].enemy_count() + 3);
    }
}
