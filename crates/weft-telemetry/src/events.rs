//! Simulation event types.
//!
//! Lightweight value types emitted around each tick. They carry just
//! enough data for monitoring a run and do not borrow simulation state.

use serde::{Deserialize, Serialize};

/// A simulation event, tagged with the tick it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Tick number (0 before the first tick).
    pub tick: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A tick is about to run.
    TickBegin {
        /// Simulated time before the tick (seconds).
        sim_time: f64,
    },

    /// A tick completed.
    TickEnd {
        /// Wall-clock time spent in the tick (seconds).
        wall_time: f64,
        /// Largest vertex speed after the tick.
        max_speed: f32,
        /// Vertices whose velocity was clamped.
        clamped_vertices: u32,
    },

    /// Energy at the current state.
    Energy {
        kinetic: f64,
        /// Elastic energy stored in the springs.
        spring: f64,
        gravitational: f64,
    },

    /// Lattice and springs were regenerated.
    Rebuild {
        vertices: u32,
        springs: u32,
        triangles: u32,
    },

    /// Springs skipped during a tick because their endpoints coincided.
    DegenerateSpring {
        count: u32,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given tick.
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Short name of the payload variant.
    pub fn label(&self) -> &str {
        match &self.kind {
            EventKind::TickBegin { .. } => "tick_begin",
            EventKind::TickEnd { .. } => "tick_end",
            EventKind::Energy { .. } => "energy",
            EventKind::Rebuild { .. } => "rebuild",
            EventKind::DegenerateSpring { .. } => "degenerate_spring",
            EventKind::Custom { label, .. } => label,
        }
    }
}
