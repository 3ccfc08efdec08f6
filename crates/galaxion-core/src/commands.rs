//! Inputs to the simulation: per-tick control state from the input
//! collaborator and session commands from the menu collaborator.

use serde::{Deserialize, Serialize};

/// Named boolean controls the input layer reduces device events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Fire,
}

/// Edge-triggered control notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEdge {
    Down(Control),
    Up(Control),
}

/// Control state delivered once per tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Controls held down this tick.
    pub held: Vec<Control>,
    /// Edges observed since the previous tick, in arrival order.
    pub edges: Vec<ControlEdge>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame where `control` goes down this tick and stays held.
    pub fn pressed(control: Control) -> Self {
        Self {
            held: vec![control],
            edges: vec![ControlEdge::Down(control)],
        }
    }

    pub fn is_control_down(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// True if `control` had a down-edge this tick.
    pub fn went_down(&self, control: Control) -> bool {
        self.edges.contains(&ControlEdge::Down(control))
    }

    pub fn with_held(mut self, control: Control) -> Self {
        if !self.held.contains(&control) {
            self.held.push(control);
        }
        self
    }
}

/// Commands from the menu / attract-mode collaborator.
///
/// Queued and applied at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Build a fresh ship and first wave.
    NewGame,
    /// Tear down every entity.
    Quit,
    Pause,
    Resume,
}
