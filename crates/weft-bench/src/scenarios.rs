//! Benchmark scenarios: lattice, pinning, and physics for each case.
//!
//! 1. **Hanging cloth**: whole top row pinned, drapes under gravity
//! 2. **Corner pinned**: only the two top corners pinned
//! 3. **Zero gravity**: free sheet released from a uniform stretch

use serde::{Deserialize, Serialize};
use weft_mesh::PinPolicy;
use weft_solver::ClothConfig;
use weft_types::constants::DEFAULT_DT;
use weft_types::{WeftError, WeftResult};

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    HangingCloth,
    CornerPinned,
    ZeroGravity,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::HangingCloth,
            ScenarioKind::CornerPinned,
            ScenarioKind::ZeroGravity,
        ]
    }

    /// Returns the name used on the command line and in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::HangingCloth => "hanging_cloth",
            ScenarioKind::CornerPinned => "corner_pinned",
            ScenarioKind::ZeroGravity => "zero_gravity",
        }
    }

    /// Inverse of [`ScenarioKind::name`].
    pub fn from_name(name: &str) -> WeftResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::all().iter().map(|k| k.name()).collect();
                WeftError::config(format!(
                    "unknown scenario '{name}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub kind: ScenarioKind,
    /// Cloth configuration the state is built from.
    pub config: ClothConfig,
    /// Number of ticks to simulate.
    pub ticks: u32,
    /// Frame delta per tick (seconds).
    pub dt: f32,
    /// Uniform scale applied about the cloth centre before the first tick.
    /// `1.0` starts at rest length.
    pub initial_stretch: f32,
}

impl Scenario {
    /// A 10×10 cloth at 20×20 vertices with its top row pinned, hanging
    /// for 4 seconds at 60 fps.
    pub fn hanging_cloth() -> Self {
        Self {
            kind: ScenarioKind::HangingCloth,
            config: ClothConfig {
                pinning: PinPolicy::TopRow,
                ..ClothConfig::default().with_grid(20, 20, [10.0, 10.0])
            },
            ticks: 240,
            dt: DEFAULT_DT,
            initial_stretch: 1.0,
        }
    }

    /// The default 16×16 cloth held by its two top corners.
    pub fn corner_pinned() -> Self {
        Self {
            kind: ScenarioKind::CornerPinned,
            config: ClothConfig::default(),
            ticks: 240,
            dt: DEFAULT_DT,
            initial_stretch: 1.0,
        }
    }

    /// An unpinned, weightless sheet released from a 20% stretch. Only the
    /// springs act, so energy should decay under damping.
    pub fn zero_gravity() -> Self {
        Self {
            kind: ScenarioKind::ZeroGravity,
            config: ClothConfig {
                pinning: PinPolicy::None,
                gravity: [0.0; 3],
                ..ClothConfig::default().with_grid(12, 12, [6.0, 6.0])
            },
            ticks: 180,
            dt: DEFAULT_DT,
            initial_stretch: 1.2,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::HangingCloth => Self::hanging_cloth(),
            ScenarioKind::CornerPinned => Self::corner_pinned(),
            ScenarioKind::ZeroGravity => Self::zero_gravity(),
        }
    }

    /// Builder-style tick count override.
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }
}
