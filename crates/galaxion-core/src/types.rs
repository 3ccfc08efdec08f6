//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in play-field space (pixels, y grows downward).
///
/// A plain `Copy` value: every operation returns a new vector.
pub type Vector2 = glam::Vec2;

/// Extra vector operations the simulation leans on.
pub trait Vector2Ext: Sized {
    /// Euclidean length.
    fn magnitude(self) -> f32;

    /// Unit vector in the same direction. The zero vector maps to itself.
    fn normalized(self) -> Self;

    /// Unit vector pointing from `self` toward `target` (zero if coincident).
    fn direction_to(self, target: Self) -> Self;

    /// Move toward `target` by at most `budget`.
    ///
    /// Returns the new point and the unused part of the budget. When the
    /// budget covers the whole distance the result is exactly `target`.
    fn step_toward(self, target: Self, budget: f32) -> (Self, f32);
}

impl Vector2Ext for Vector2 {
    fn magnitude(self) -> f32 {
        self.length()
    }

    fn normalized(self) -> Self {
        self.normalize_or_zero()
    }

    fn direction_to(self, target: Self) -> Self {
        (target - self).normalize_or_zero()
    }

    fn step_toward(self, target: Self, budget: f32) -> (Self, f32) {
        let distance = self.distance(target);
        if budget >= distance {
            (target, budget - distance)
        } else {
            (self + self.direction_to(target) * budget, 0.0)
        }
    }
}

/// Identity of a simulation entity. Allocated from a monotonic counter and
/// never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of gameplay ticks run (paused ticks are not counted).
    pub tick: u64,
    /// Elapsed gameplay time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f32) {
        self.tick += 1;
        self.elapsed_ms += f64::from(dt_ms);
    }
}
