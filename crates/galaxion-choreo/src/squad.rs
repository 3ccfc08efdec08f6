//! Squad spawn sequencing.
//!
//! Each squad of a wave becomes a [`SquadCursor`]: an iterator that yields
//! the next group of enemies to spawn. A single squad yields one record per
//! step; a mirrored squad yields its left and right records together, so
//! both halves advance in lockstep.

use std::collections::VecDeque;

use galaxion_core::enums::EnemyType;
use galaxion_core::path::Path;
use galaxion_core::types::Vector2;
use galaxion_core::wave::{SquadDescriptor, SquadPath, WaveDescriptor};

/// Everything needed to spawn one enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRecord {
    pub enemy_type: EnemyType,
    pub formation_slot: Option<usize>,
    pub entry_points: Vec<Vector2>,
    pub triggers: Vec<usize>,
}

impl SpawnRecord {
    /// Entry path for this enemy, starting at its spawn point.
    pub fn entry_path(&self) -> Path {
        Path::new(self.entry_points.clone(), self.triggers.iter().copied())
    }

    pub fn spawn_point(&self) -> Vector2 {
        self.entry_points.first().copied().unwrap_or(Vector2::ZERO)
    }
}

#[derive(Debug, Clone)]
struct Lane {
    path: SquadPath,
    next: usize,
}

impl Lane {
    fn new(path: &SquadPath) -> Self {
        Self {
            path: path.clone(),
            next: 0,
        }
    }

    fn pull(&mut self) -> Option<SpawnRecord> {
        let assignment = self.path.enemies.get(self.next)?;
        self.next += 1;
        Some(SpawnRecord {
            enemy_type: assignment.enemy_type,
            formation_slot: assignment.formation_slot,
            entry_points: self.path.points.clone(),
            triggers: self.path.triggers.clone(),
        })
    }

    fn remaining(&self) -> usize {
        self.path.enemies.len().saturating_sub(self.next)
    }
}

/// Lazy spawn sequence for one squad.
#[derive(Debug, Clone)]
pub struct SquadCursor {
    lanes: Vec<Lane>,
}

impl SquadCursor {
    pub fn new(squad: &SquadDescriptor) -> Self {
        let lanes = match squad {
            SquadDescriptor::Single(path) => vec![Lane::new(path)],
            SquadDescriptor::Mirrored { left, right } => vec![Lane::new(left), Lane::new(right)],
        };
        Self { lanes }
    }

    /// Enemies not yet yielded.
    pub fn remaining(&self) -> usize {
        self.lanes.iter().map(Lane::remaining).sum()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Iterator for SquadCursor {
    type Item = Vec<SpawnRecord>;

    /// The next spawn group, or `None` once every lane is exhausted. A
    /// mirrored squad whose halves differ in length keeps yielding from the
    /// longer half alone.
    fn next(&mut self) -> Option<Self::Item> {
        let group: Vec<SpawnRecord> = self.lanes.iter_mut().filter_map(Lane::pull).collect();
        if group.is_empty() {
            None
        } else {
            Some(group)
        }
    }
}

/// One cursor per squad, in spawn order.
pub fn squad_cursors(wave: &WaveDescriptor) -> VecDeque<SquadCursor> {
    wave.squads.iter().map(SquadCursor::new).collect()
}
