//! Score tracking.
//!
//! Kept on the game manager, not as ECS entities.

use galaxion_core::state::ScoreView;

/// Running score state for the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreState {
    pub score: u32,
    pub shots_fired: u32,
    pub enemies_hit: u32,
    pub lives: u32,
}

impl ScoreState {
    pub fn with_lives(lives: u32) -> Self {
        Self {
            lives,
            ..Self::default()
        }
    }

    /// Credit a kill worth `points`.
    pub fn record_kill(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.enemies_hit += 1;
    }

    /// Take a life; returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Fraction of player shots that hit, 0 when nothing was fired.
    pub fn hit_ratio(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.enemies_hit as f32 / self.shots_fired as f32
        }
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            shots_fired: self.shots_fired,
            enemies_hit: self.enemies_hit,
            lives: self.lives,
            hit_ratio: self.hit_ratio(),
        }
    }
}
