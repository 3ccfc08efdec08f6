//! Enemy wave orchestration.
//!
//! Walks each wave through its phases: squads spawn one group at a time,
//! each squad waits for the previous one to settle into formation, and once
//! every squad is in the formation tightens up and the attack scheduler
//! starts sending enemies on dives. A cleared wave is followed by the next
//! one (the campaign loops).

use std::collections::{BTreeSet, VecDeque};

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use galaxion_choreo::formation::EnemyFormation;
use galaxion_choreo::squad::{squad_cursors, SpawnRecord, SquadCursor};
use galaxion_core::components::{Doomed, Enemy, FormationSlot};
use galaxion_core::constants::*;
use galaxion_core::enums::EnemyPhase;
use galaxion_core::events::GameEvent;
use galaxion_core::types::EntityId;
use galaxion_core::wave::{default_campaign, WaveDescriptor};

use crate::entity_manager::EntityManager;
use crate::systems::enemy::{launch_attack_run, PlayerTarget};
use crate::world_setup;

/// Where the current wave is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavePhase {
    /// No wave started yet.
    #[default]
    Idle,
    /// Spawning the active squad.
    Spawning,
    /// Active squad fully spawned; waiting for it to reach formation.
    AwaitingFormation,
    /// Pause before the next squad.
    SquadGap,
    /// Every squad is in; enemies dive at intervals.
    Attacking,
    /// No enemies left. The next wave starts on the following update.
    Cleared,
}

pub struct EnemyManager {
    campaign: Vec<WaveDescriptor>,
    /// Number of waves started so far (the current wave's 1-based number).
    wave: u32,
    phase: WavePhase,
    formation: Option<EnemyFormation>,
    squads: VecDeque<SquadCursor>,
    active: Option<SquadCursor>,
    /// Spawn interval or squad gap countdown, depending on phase.
    timer_ms: f32,
    /// Live enemies of this wave.
    enemies: BTreeSet<EntityId>,
    /// Enemies of the latest squad that have not yet settled.
    squad_pending: BTreeSet<EntityId>,
    attack_timer_ms: f32,
    burst_timer_ms: f32,
    attack_queue: VecDeque<EntityId>,
}

impl EnemyManager {
    /// An empty campaign falls back to the built-in one.
    pub fn new(campaign: Vec<WaveDescriptor>) -> Self {
        let campaign = if campaign.is_empty() {
            warn!("Empty campaign, using the built-in waves");
            default_campaign()
        } else {
            campaign
        };
        Self {
            campaign,
            wave: 0,
            phase: WavePhase::Idle,
            formation: None,
            squads: VecDeque::new(),
            active: None,
            timer_ms: 0.0,
            enemies: BTreeSet::new(),
            squad_pending: BTreeSet::new(),
            attack_timer_ms: ATTACK_INTERVAL_MS,
            burst_timer_ms: 0.0,
            attack_queue: VecDeque::new(),
        }
    }

    /// Back to before the first wave.
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.campaign));
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn formation(&self) -> Option<&EnemyFormation> {
        self.formation.as_ref()
    }

    /// Live enemies of the current wave, including ones queued but not yet
    /// admitted.
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// True when nothing more will spawn this wave.
    pub fn spawning_done(&self) -> bool {
        self.squads.is_empty() && self.active.as_ref().map_or(true, SquadCursor::is_exhausted)
    }

    /// Whether destroying `id` would clear the wave.
    pub fn is_last_enemy(&self, id: EntityId) -> bool {
        self.spawning_done() && self.enemies.len() == 1 && self.enemies.contains(&id)
    }

    /// An enemy reached its slot.
    pub fn on_entered_formation(&mut self, id: EntityId) {
        self.squad_pending.remove(&id);
    }

    /// Stop tracking an enemy (destroyed or removed). Idempotent.
    pub fn forget(&mut self, id: EntityId) {
        self.enemies.remove(&id);
        self.squad_pending.remove(&id);
        self.attack_queue.retain(|queued| *queued != id);
    }

    /// Run one tick of wave orchestration, after the entity update pass.
    pub fn update(
        &mut self,
        dt_ms: f32,
        entities: &mut EntityManager,
        player: Option<PlayerTarget>,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        if matches!(self.phase, WavePhase::Idle | WavePhase::Cleared) {
            self.start_wave(events);
        }

        if let Some(formation) = self.formation.as_mut() {
            formation.update(dt_ms);
        }

        match self.phase {
            WavePhase::Spawning => self.spawn_due(dt_ms, entities),
            WavePhase::AwaitingFormation => {
                if self.squad_pending.is_empty() {
                    self.phase = WavePhase::SquadGap;
                    self.timer_ms = SQUAD_GAP_MS;
                }
            }
            WavePhase::SquadGap => {
                self.timer_ms -= dt_ms;
                if self.timer_ms <= 0.0 {
                    self.next_squad();
                }
            }
            WavePhase::Attacking => self.schedule_attacks(dt_ms, entities, player, rng, events),
            WavePhase::Idle | WavePhase::Cleared => {}
        }

        self.refresh_formation_positions(entities);

        if self.phase != WavePhase::Cleared && self.spawning_done() && self.enemies.is_empty() {
            self.phase = WavePhase::Cleared;
            events.push(GameEvent::WaveCleared { wave: self.wave });
            info!("Wave {} cleared", self.wave);
        }
    }

    fn start_wave(&mut self, events: &mut Vec<GameEvent>) {
        let index = self.wave as usize % self.campaign.len();
        let descriptor = &self.campaign[index];
        self.wave += 1;
        self.formation = Some(EnemyFormation::new(&descriptor.formation, &descriptor.sway));
        self.squads = squad_cursors(descriptor);
        self.active = None;
        self.squad_pending.clear();
        self.attack_queue.clear();
        self.attack_timer_ms = ATTACK_INTERVAL_MS;
        self.burst_timer_ms = 0.0;

        info!(
            "Wave {} started: {} squads, {} enemies",
            self.wave,
            descriptor.squads.len(),
            descriptor.enemy_count()
        );
        events.push(GameEvent::WaveStarted { wave: self.wave });
        self.next_squad();
    }

    /// Activate the next squad, or start attacking when none remain.
    fn next_squad(&mut self) {
        match self.squads.pop_front() {
            Some(cursor) => {
                debug!("Squad of {} starting", cursor.remaining());
                self.active = Some(cursor);
                self.phase = WavePhase::Spawning;
                self.timer_ms = 0.0;
            }
            None => {
                self.active = None;
                if let Some(formation) = self.formation.as_mut() {
                    formation.transition_to_center();
                }
                self.phase = WavePhase::Attacking;
                self.attack_timer_ms = ATTACK_INTERVAL_MS;
                debug!("Wave {}: all squads in, attacks begin", self.wave);
            }
        }
    }

    fn spawn_due(&mut self, dt_ms: f32, entities: &mut EntityManager) {
        self.timer_ms -= dt_ms;
        while self.timer_ms <= 0.0 {
            let (group, exhausted) = match self.active.as_mut() {
                Some(cursor) => (cursor.next(), cursor.is_exhausted()),
                None => (None, true),
            };
            if let Some(group) = group {
                for record in &group {
                    self.spawn_enemy(record, entities);
                }
                self.timer_ms += SPAWN_INTERVAL_MS;
            }
            if exhausted {
                self.phase = WavePhase::AwaitingFormation;
                break;
            }
        }
    }

    fn spawn_enemy(&mut self, record: &SpawnRecord, entities: &mut EntityManager) {
        let slot_position = record
            .formation_slot
            .and_then(|slot| self.formation.as_ref()?.position(slot));
        let id = entities.add(world_setup::enemy(record, slot_position));
        self.enemies.insert(id);
        self.squad_pending.insert(id);
    }

    /// Push each slot's live position to its enemy, for use on the next
    /// tick.
    fn refresh_formation_positions(&self, entities: &EntityManager) {
        let Some(formation) = self.formation.as_ref() else {
            return;
        };
        let world = entities.world();
        for &id in &self.enemies {
            let Some(entity) = entities.get(id) else {
                continue;
            };
            let Ok(slot) = world.get::<&FormationSlot>(entity) else {
                continue;
            };
            if let Ok(mut enemy) = world.get::<&mut Enemy>(entity) {
                enemy.formation_position = formation.position(slot.0);
            }
        }
    }

    /// Enemies currently sitting in formation and free to attack.
    pub fn in_formation(&self, entities: &EntityManager) -> Vec<EntityId> {
        let world = entities.world();
        self.enemies
            .iter()
            .copied()
            .filter(|&id| {
                let Some(entity) = entities.get(id) else {
                    return false;
                };
                let available = world.get::<&Doomed>(entity).is_err();
                available
                    && world
                        .get::<&Enemy>(entity)
                        .is_ok_and(|enemy| enemy.phase == EnemyPhase::InFormation)
            })
            .collect()
    }

    fn schedule_attacks(
        &mut self,
        dt_ms: f32,
        entities: &mut EntityManager,
        player: Option<PlayerTarget>,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.attack_queue.is_empty() {
            self.burst_timer_ms -= dt_ms;
            if self.burst_timer_ms <= 0.0 {
                if let Some(id) = self.attack_queue.pop_front() {
                    self.launch(id, entities, player, rng, events);
                }
                self.burst_timer_ms = ATTACK_BURST_GAP_MS;
            }
            return;
        }

        self.attack_timer_ms -= dt_ms;
        if self.attack_timer_ms > 0.0 {
            return;
        }
        self.attack_timer_ms = ATTACK_INTERVAL_MS;

        let candidates = self.in_formation(entities);
        self.attack_queue = candidates.choose_multiple(rng, ATTACK_BURST).copied().collect();
        if let Some(id) = self.attack_queue.pop_front() {
            self.launch(id, entities, player, rng, events);
        }
        self.burst_timer_ms = ATTACK_BURST_GAP_MS;
    }

    fn launch(
        &mut self,
        id: EntityId,
        entities: &mut EntityManager,
        player: Option<PlayerTarget>,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(entity) = entities.get(id) else {
            return;
        };
        if launch_attack_run(entities.world_mut(), entity, player, rng) {
            debug!("{id} starts an attack run");
            events.push(GameEvent::AttackRun { id });
        } else {
            debug!("{id} no longer in formation, attack skipped");
        }
    }
}
