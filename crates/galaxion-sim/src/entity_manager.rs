//! Entity manager: the authoritative entity collection.
//!
//! Additions and removals are queued and applied inside [`EntityManager::update`],
//! so nothing iterating the admitted set ever sees it change underneath it.
//! An entity queued for addition is invisible (to `entries`, collision
//! detection and updates) until the next update pass admits it.

use std::collections::BTreeMap;

use hecs::{Entity, EntityBuilder, World};

use galaxion_core::components::Doomed;
use galaxion_core::emitter::EventEmitter;
use galaxion_core::events::EntityEvent;
use galaxion_core::state::RenderTarget;
use galaxion_core::types::EntityId;

use crate::systems::snapshot;

/// Per-entity lifecycle hooks, supplied by whoever owns the session.
///
/// `update` and `process_inputs` are bulk passes over the admitted world;
/// they may queue additions and removals but never touch the admitted set
/// directly.
pub trait EntityHooks {
    /// Called once when an entity is admitted.
    fn initialize(&mut self, _world: &mut World, _entity: Entity, _id: EntityId) {}

    fn update(&mut self, world: &mut World, queue: &mut EntityQueue, dt_ms: f32);

    fn process_inputs(&mut self, _world: &mut World, _queue: &mut EntityQueue, _dt_ms: f32) {}

    /// Called once when an entity is evicted, before it is despawned.
    fn dispose(&mut self, _world: &World, _entity: Entity, _id: EntityId) {}
}

/// Pending additions and removals.
#[derive(Default)]
pub struct EntityQueue {
    next_id: u64,
    adds: Vec<(EntityId, EntityBuilder)>,
    removes: Vec<EntityId>,
}

impl EntityQueue {
    /// Queue an entity for admission and return its identity.
    pub fn add(&mut self, mut builder: EntityBuilder) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        builder.add(id);
        self.adds.push((id, builder));
        id
    }

    pub fn remove(&mut self, id: EntityId) {
        if !self.removes.contains(&id) {
            self.removes.push(id);
        }
    }

    pub fn is_pending_add(&self, id: EntityId) -> bool {
        self.adds.iter().any(|(pending, _)| *pending == id)
    }

    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.removes.contains(&id)
    }

    pub fn pending_adds(&self) -> usize {
        self.adds.len()
    }
}

/// Queue an admitted entity for removal and tag it [`Doomed`].
pub fn queue_removal(world: &mut World, queue: &mut EntityQueue, entity: Entity) {
    let id = match world.get::<&EntityId>(entity) {
        Ok(id) => *id,
        Err(_) => return,
    };
    queue.remove(id);
    let _ = world.insert_one(entity, Doomed);
}

pub struct EntityManager {
    world: World,
    /// Admitted entities, ordered by identity for deterministic iteration.
    admitted: BTreeMap<EntityId, Entity>,
    queue: EntityQueue,
    events: EventEmitter<EntityEvent>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            admitted: BTreeMap::new(),
            queue: EntityQueue::default(),
            events: EventEmitter::new(),
        }
    }

    /// Queue an entity for admission on the next update pass.
    pub fn add(&mut self, builder: EntityBuilder) -> EntityId {
        self.queue.add(builder)
    }

    /// Queue an entity for removal at the end of the next update pass.
    pub fn remove(&mut self, id: EntityId) {
        self.queue.remove(id);
        if let Some(&entity) = self.admitted.get(&id) {
            let _ = self.world.insert_one(entity, Doomed);
        }
    }

    /// The admitted entity with this identity, if any.
    pub fn get(&self, id: EntityId) -> Option<Entity> {
        self.admitted.get(&id).copied()
    }

    /// Admitted entities only; queued additions are excluded.
    pub fn entries(&self) -> impl Iterator<Item = (EntityId, Entity)> + '_ {
        self.admitted.iter().map(|(&id, &entity)| (id, entity))
    }

    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn queue(&self) -> &EntityQueue {
        &self.queue
    }

    /// Admission/eviction notifications.
    pub fn events(&self) -> &EventEmitter<EntityEvent> {
        &self.events
    }

    /// Admit queued entities, run the update pass, then evict queued
    /// removals.
    ///
    /// Entities admitted here are updated in this same pass. A removal
    /// queued for an entity still waiting for admission carries over to the
    /// next pass, so an entity is never dropped without being admitted.
    pub fn update(&mut self, dt_ms: f32, hooks: &mut impl EntityHooks) {
        for (id, mut builder) in std::mem::take(&mut self.queue.adds) {
            let entity = self.world.spawn(builder.build());
            self.admitted.insert(id, entity);
            hooks.initialize(&mut self.world, entity, id);
            self.events.emit(&EntityEvent::Added(id));
        }

        hooks.update(&mut self.world, &mut self.queue, dt_ms);

        for id in std::mem::take(&mut self.queue.removes) {
            match self.admitted.remove(&id) {
                Some(entity) => {
                    self.events.emit(&EntityEvent::Removed(id));
                    hooks.dispose(&self.world, entity, id);
                    let _ = self.world.despawn(entity);
                }
                None if self.queue.is_pending_add(id) => self.queue.removes.push(id),
                None => {}
            }
        }
    }

    /// Input pass; may queue additions and removals.
    pub fn process_inputs(&mut self, dt_ms: f32, hooks: &mut impl EntityHooks) {
        hooks.process_inputs(&mut self.world, &mut self.queue, dt_ms);
    }

    /// Read-only render pass over admitted entities.
    pub fn render(&self, target: &mut impl RenderTarget, dt_ms: f32) {
        for (&id, &entity) in &self.admitted {
            if let Some(view) = snapshot::entity_view(&self.world, id, entity) {
                target.draw(&view, dt_ms);
            }
        }
    }

    /// Dispose of everything immediately and drop all queued work.
    pub fn clear(&mut self, hooks: &mut impl EntityHooks) {
        for (id, entity) in std::mem::take(&mut self.admitted) {
            self.events.emit(&EntityEvent::Removed(id));
            hooks.dispose(&self.world, entity, id);
        }
        self.world.clear();
        self.queue.adds.clear();
        self.queue.removes.clear();
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
