//! Formation motion.
//!
//! Every slot interpolates linearly from a base waypoint to a destination
//! waypoint; all slots share one elapsed/duration clock, so the whole
//! formation moves in lockstep. While squads arrive the formation sways
//! side to side, then it opens out into a wider spread layout.

use galaxion_core::constants::SPREAD_FACTOR;
use galaxion_core::types::Vector2;
use galaxion_core::wave::SwaySettings;

/// What the shared clock is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationMotion {
    /// Swinging between base and destination.
    Sway,
    /// Closing in on the midpoint of each slot's sway, then spreading.
    Centering,
    /// Opening out to the spread layout.
    Spreading,
    /// Holding the spread layout.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SlotTrack {
    base: Vector2,
    destination: Vector2,
}

#[derive(Debug, Clone)]
pub struct EnemyFormation {
    slots: Vec<SlotTrack>,
    spread: Vec<Vector2>,
    elapsed_ms: f32,
    duration_ms: f32,
    sway_duration_ms: f32,
    cycles_remaining: u32,
    motion: FormationMotion,
}

impl EnemyFormation {
    /// Build a formation from an authored slot layout.
    pub fn new(layout: &[Vector2], sway: &SwaySettings) -> Self {
        let offset = Vector2::new(sway.distance, 0.0);
        let slots = layout
            .iter()
            .map(|&base| SlotTrack {
                base,
                destination: base + offset,
            })
            .collect();
        Self {
            slots,
            spread: spread_layout(layout),
            elapsed_ms: 0.0,
            duration_ms: sway.duration_ms,
            sway_duration_ms: sway.duration_ms,
            cycles_remaining: sway.cycles,
            motion: FormationMotion::Sway,
        }
    }

    /// Number of slots. Fixed for the formation's lifetime.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn motion(&self) -> FormationMotion {
        self.motion
    }

    pub fn cycles_remaining(&self) -> u32 {
        self.cycles_remaining
    }

    /// Interpolation parameter in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    /// Live position of `slot`, or `None` if out of range.
    pub fn position(&self, slot: usize) -> Option<Vector2> {
        let t = self.progress();
        self.slots
            .get(slot)
            .map(|track| track.base.lerp(track.destination, t))
    }

    pub fn positions(&self) -> Vec<Vector2> {
        let t = self.progress();
        self.slots
            .iter()
            .map(|track| track.base.lerp(track.destination, t))
            .collect()
    }

    /// The layout the formation opens out to.
    pub fn spread_positions(&self) -> &[Vector2] {
        &self.spread
    }

    /// Advance the shared clock by `dt_ms`.
    pub fn update(&mut self, dt_ms: f32) {
        if self.motion == FormationMotion::Settled {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        if self.elapsed_ms < self.duration_ms {
            return;
        }

        match self.motion {
            FormationMotion::Sway if self.cycles_remaining > 0 => {
                self.cycles_remaining -= 1;
                for track in &mut self.slots {
                    std::mem::swap(&mut track.base, &mut track.destination);
                }
                self.elapsed_ms = 0.0;
            }
            FormationMotion::Sway | FormationMotion::Centering => self.begin_spread(),
            FormationMotion::Spreading => self.motion = FormationMotion::Settled,
            FormationMotion::Settled => {}
        }
    }

    /// Head for the midpoint of every slot's sway at double speed; on
    /// arrival the formation spreads. No-op once the sway is over.
    pub fn transition_to_center(&mut self) {
        if self.motion != FormationMotion::Sway {
            return;
        }
        let live = self.positions();
        for (track, current) in self.slots.iter_mut().zip(live) {
            let midpoint = (track.base + track.destination) * 0.5;
            track.base = current;
            track.destination = midpoint;
        }
        self.restart(FormationMotion::Centering);
    }

    fn begin_spread(&mut self) {
        let live = self.positions();
        for ((track, current), &target) in self.slots.iter_mut().zip(live).zip(&self.spread) {
            track.base = current;
            track.destination = target;
        }
        self.restart(FormationMotion::Spreading);
    }

    fn restart(&mut self, motion: FormationMotion) {
        self.cycles_remaining = 0;
        self.elapsed_ms = 0.0;
        self.duration_ms = self.sway_duration_ms * 0.5;
        self.motion = motion;
    }
}

/// Layout scaled about its centroid by [`SPREAD_FACTOR`].
fn spread_layout(layout: &[Vector2]) -> Vec<Vector2> {
    if layout.is_empty() {
        return Vec::new();
    }
    let centroid = layout.iter().copied().sum::<Vector2>() / layout.len() as f32;
    layout
        .iter()
        .map(|&p| centroid + (p - centroid) * SPREAD_FACTOR)
        .collect()
}
