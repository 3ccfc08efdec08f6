//! Game manager: the session object.
//!
//! `GameManager` owns the entity manager, the enemy manager, score and
//! lives, processes session commands, runs the per-tick systems in their
//! fixed order, and produces `GameSnapshot`s. Completely headless, so a
//! given seed and input stream always plays out the same way.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use galaxion_choreo::profiles::points_for;
use galaxion_core::collision::CollisionBox;
use galaxion_core::commands::{InputFrame, SessionCommand};
use galaxion_core::components::{Enemy, Ship, Transform};
use galaxion_core::constants::{DEFAULT_LIVES, LAST_ENEMY_BONUS, RESPAWN_DELAY_MS};
use galaxion_core::emitter::EventEmitter;
use galaxion_core::enums::{CollisionKind, GamePhase};
use galaxion_core::events::GameEvent;
use galaxion_core::state::{GameSnapshot, RenderTarget};
use galaxion_core::types::{EntityId, SimTime};
use galaxion_core::wave::{default_campaign, WaveDescriptor};

use crate::enemy_manager::EnemyManager;
use crate::entity_manager::{EntityHooks, EntityManager, EntityQueue};
use crate::scoring::ScoreState;
use crate::systems;
use crate::systems::collision::{Contact, Role};
use crate::systems::enemy::PlayerTarget;
use crate::world_setup;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same game.
    pub seed: u64,
    /// Lives at the start of each game.
    pub lives: u32,
    /// Campaign waves, played in order and then repeated.
    pub waves: Vec<WaveDescriptor>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            lives: DEFAULT_LIVES,
            waves: default_campaign(),
        }
    }
}

/// State the per-entity hooks need, split out so it can be borrowed
/// alongside the entity manager.
struct SessionState {
    enemies: EnemyManager,
    score: ScoreState,
    rng: ChaCha8Rng,
    events: Vec<GameEvent>,
    cleanup_buffer: Vec<Entity>,
}

struct TickHooks<'a> {
    state: &'a mut SessionState,
    input: &'a InputFrame,
    player: Option<PlayerTarget>,
}

impl EntityHooks for TickHooks<'_> {
    fn initialize(&mut self, world: &mut World, entity: Entity, id: EntityId) {
        if world.get::<&Ship>(entity).is_ok() {
            debug!("Ship {id} in play");
            self.state.events.push(GameEvent::PlayerSpawned { id });
        }
    }

    fn update(&mut self, world: &mut World, queue: &mut EntityQueue, dt_ms: f32) {
        systems::movement::run(world, dt_ms);
        systems::ship::confine(world);

        let state = &mut *self.state;
        let first_new = state.events.len();
        systems::enemy::run(world, queue, self.player, &mut state.rng, &mut state.events);
        for event in &state.events[first_new..] {
            if let GameEvent::EnteredFormation { id } = event {
                state.enemies.on_entered_formation(*id);
            }
        }

        systems::cleanup::run(world, queue, dt_ms, &mut state.cleanup_buffer);
    }

    fn process_inputs(&mut self, world: &mut World, queue: &mut EntityQueue, _dt_ms: f32) {
        let state = &mut *self.state;
        systems::ship::process_inputs(world, queue, self.input, &mut state.score, &mut state.events);
    }

    fn dispose(&mut self, _world: &World, _entity: Entity, id: EntityId) {
        self.state.enemies.forget(id);
    }
}

/// The game session. Owns the entity store and all session state.
pub struct GameManager {
    entities: EntityManager,
    state: SessionState,
    time: SimTime,
    phase: GamePhase,
    paused: bool,
    seed: u64,
    starting_lives: u32,
    respawn_timer_ms: Option<f32>,
    command_queue: VecDeque<SessionCommand>,
    notifications: EventEmitter<GameEvent>,
}

impl GameManager {
    pub fn new(config: SimConfig) -> Self {
        Self {
            entities: EntityManager::new(),
            state: SessionState {
                enemies: EnemyManager::new(config.waves),
                score: ScoreState::with_lives(config.lives),
                rng: ChaCha8Rng::seed_from_u64(config.seed),
                events: Vec::new(),
                cleanup_buffer: Vec::new(),
            },
            time: SimTime::default(),
            phase: GamePhase::Idle,
            paused: false,
            seed: config.seed,
            starting_lives: config.lives,
            respawn_timer_ms: None,
            command_queue: VecDeque::new(),
            notifications: EventEmitter::new(),
        }
    }

    /// Queue a session command for the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the game by `dt_ms` with this frame's input and return the
    /// resulting snapshot.
    ///
    /// Commands are handled even while paused or idle; gameplay only
    /// advances while `Playing` and not paused.
    pub fn tick(&mut self, dt_ms: f32, input: &InputFrame) -> GameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing && !self.paused {
            self.run_systems(dt_ms, input);
            self.time.advance(dt_ms);
        }

        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            self.notifications.emit(event);
        }
        systems::snapshot::build_snapshot(
            &self.entities,
            &self.time,
            self.phase,
            self.paused,
            self.state.enemies.wave(),
            &self.state.score,
            events,
        )
    }

    /// Start a fresh game: new ship, first wave, full lives.
    pub fn set_default_state(&mut self) {
        self.on_quit();
        self.state.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.state.score = ScoreState::with_lives(self.starting_lives);
        self.entities.add(world_setup::ship(world_setup::ship_spawn_point()));
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.paused = false;
        info!("New game: seed {}, {} lives", self.seed, self.starting_lives);
    }

    /// Tear down every entity and return to idle.
    pub fn on_quit(&mut self) {
        let input = InputFrame::default();
        let mut hooks = TickHooks {
            state: &mut self.state,
            input: &input,
            player: None,
        };
        self.entities.clear(&mut hooks);
        self.state.enemies.reset();
        self.respawn_timer_ms = None;
        self.phase = GamePhase::Idle;
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Draw every admitted entity. Works while paused.
    pub fn render(&self, target: &mut impl RenderTarget, dt_ms: f32) {
        self.entities.render(target, dt_ms);
    }

    /// Gameplay events, broadcast at the end of each tick.
    pub fn notifications(&self) -> &EventEmitter<GameEvent> {
        &self.notifications
    }

    pub fn score(&self) -> &ScoreState {
        &self.state.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn wave(&self) -> u32 {
        self.state.enemies.wave()
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn enemy_manager(&self) -> &EnemyManager {
        &self.state.enemies
    }

    /// Mutable access to the entity store (for tests staging collisions).
    #[cfg(test)]
    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::NewGame => self.set_default_state(),
            SessionCommand::Quit => self.on_quit(),
            SessionCommand::Pause => self.set_paused(true),
            SessionCommand::Resume => self.set_paused(false),
        }
    }

    /// The ship as enemies see it, if one is in play.
    fn player_target(&self) -> Option<PlayerTarget> {
        systems::ship::find(self.entities.world())
            .map(|(_, position, center)| PlayerTarget { position, center })
    }

    /// Run one gameplay tick in order.
    fn run_systems(&mut self, dt_ms: f32, input: &InputFrame) {
        // 1. Ship controls
        let player = self.player_target();
        self.entities.process_inputs(
            dt_ms,
            &mut TickHooks {
                state: &mut self.state,
                input,
                player,
            },
        );

        // 2. Collisions among entities admitted at the start of the tick
        let entries: Vec<(EntityId, Entity)> = self.entities.entries().collect();
        let contacts = systems::collision::detect(self.entities.world(), &entries);
        self.dispatch(&contacts);

        // 3. Entity admission, update pass, eviction
        let player = self.player_target();
        self.entities.update(
            dt_ms,
            &mut TickHooks {
                state: &mut self.state,
                input,
                player,
            },
        );

        // 4. Wave orchestration and formation
        let player = self.player_target();
        let state = &mut self.state;
        state.enemies.update(
            dt_ms,
            &mut self.entities,
            player,
            &mut state.rng,
            &mut state.events,
        );

        // 5. Respawn
        self.tick_respawn(dt_ms);
    }

    /// Deliver every contact to both entities. Removal is deferred, so an
    /// entity hit by one contact still takes part in the rest; a ship or
    /// enemy already on its way out is not destroyed a second time.
    fn dispatch(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            let (a, b) = (contact.a, contact.b);
            self.state.events.push(GameEvent::Collision {
                kind: contact.kind,
                a: a.0,
                b: b.0,
            });
            for (id, entity) in [a, b] {
                self.on_collision(id, entity, contact.kind);
            }
        }
    }

    /// One entity's reaction to a classified collision.
    fn on_collision(&mut self, id: EntityId, entity: Entity, kind: CollisionKind) {
        let role = systems::collision::role(self.entities.world(), entity);
        let removing = self.entities.queue().is_pending_removal(id);
        match (role, kind) {
            (Role::PlayerShot | Role::EnemyShot, _) => self.entities.remove(id),
            (Role::Ship, CollisionKind::PlayerDeath) if !removing => {
                self.entities.remove(id);
                self.player_destroyed();
            }
            (Role::Enemy, CollisionKind::EnemyDeath) if !removing => {
                self.destroy_enemy(id, entity);
            }
            _ => {}
        }
    }

    fn destroy_enemy(&mut self, id: EntityId, entity: Entity) {
        let world = self.entities.world();
        let (enemy_type, airborne, center) = match (
            world.get::<&Enemy>(entity),
            world.get::<&Transform>(entity),
            world.get::<&CollisionBox>(entity),
        ) {
            (Ok(enemy), Ok(transform), Ok(hitbox)) => (
                enemy.enemy_type,
                enemy.is_airborne(),
                hitbox.center(&transform),
            ),
            _ => return,
        };

        let last_of_wave = self.state.enemies.is_last_enemy(id);
        let mut points = points_for(enemy_type, airborne);
        if last_of_wave {
            points += LAST_ENEMY_BONUS;
        }
        self.state.score.record_kill(points);
        self.state.enemies.forget(id);

        self.entities.add(world_setup::explosion(center));
        self.entities.remove(id);
        debug!("{id} ({enemy_type:?}) destroyed for {points} points");
        self.state.events.push(GameEvent::EnemyDestroyed {
            id,
            enemy_type,
            points,
            last_of_wave,
        });
    }

    fn player_destroyed(&mut self) {
        let lives_remaining = self.state.score.lose_life();
        info!("Ship destroyed, {lives_remaining} lives left");
        self.state
            .events
            .push(GameEvent::PlayerDestroyed { lives_remaining });

        if lives_remaining > 0 {
            self.respawn_timer_ms = Some(RESPAWN_DELAY_MS);
        } else {
            let final_score = self.state.score.score;
            info!("Game over, final score {final_score}");
            self.phase = GamePhase::GameOver;
            self.state.events.push(GameEvent::GameOver { final_score });
        }
    }

    fn tick_respawn(&mut self, dt_ms: f32) {
        let Some(remaining) = self.respawn_timer_ms.as_mut() else {
            return;
        };
        *remaining -= dt_ms;
        if *remaining > 0.0 {
            return;
        }
        self.respawn_timer_ms = None;
        self.entities.add(world_setup::ship(world_setup::ship_spawn_point()));
    }
}
