//! Cloth configuration.
//!
//! Lattice dimensions, spring constants, and integration parameters.
//! Loaded from TOML by the CLI; every key has a default so partial
//! files are accepted.

use serde::{Deserialize, Serialize};
use weft_math::Vec3;
use weft_mesh::PinPolicy;
use weft_types::constants;
use weft_types::{WeftError, WeftResult};

/// How velocities and positions are advanced each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// Second-order position update with velocity averaged between the
    /// accelerations at the old and new positions (velocity Verlet).
    #[default]
    AveragedVerlet,
    /// The historical update: `x += v*dt' + 0.5*v*dt'^2`,
    /// `v += (v + F)/2 * dt'`. Gains energy over long runs.
    Legacy,
}

/// Configuration for a cloth simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    /// Vertices per row. Zero (with any rows) builds the fallback quad.
    pub columns: i32,

    /// Number of vertex rows.
    pub rows: i32,

    /// Cloth extent [width, height] in the XY plane.
    pub cloth_size: [f32; 2],

    /// Spring stiffness (Ks) for structural springs.
    pub stiffness: f32,

    /// Along-axis spring damping (Kd).
    pub damping: f32,

    /// Per-vertex mass.
    pub mass: f32,

    /// Multiplier turning the frame delta into the integration step.
    pub step_time_scale: f32,

    /// Constant external acceleration [gx, gy, gz].
    pub gravity: [f32; 3],

    /// Speed above which the pre-step velocity is clamped.
    pub velocity_clamp_threshold: f32,

    /// Maximum speed after clamping.
    pub velocity_clamp_target: f32,

    /// Which vertices are anchored.
    pub pinning: PinPolicy,

    /// Integration scheme.
    pub scheme: IntegrationScheme,

    /// Add bending springs spanning two cells.
    pub bending_springs: bool,

    /// RGBA8 color written to every vertex.
    pub color: [u8; 4],
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 16,
            cloth_size: [10.0, 10.0],
            stiffness: constants::DEFAULT_STIFFNESS,
            damping: constants::DEFAULT_DAMPING,
            mass: constants::DEFAULT_MASS,
            step_time_scale: constants::DEFAULT_STEP_TIME_SCALE,
            gravity: constants::DEFAULT_GRAVITY,
            velocity_clamp_threshold: constants::DEFAULT_VELOCITY_CLAMP_THRESHOLD,
            velocity_clamp_target: constants::DEFAULT_VELOCITY_CLAMP_TARGET,
            pinning: PinPolicy::TopCorners,
            scheme: IntegrationScheme::AveragedVerlet,
            bending_springs: false,
            color: [255, 255, 255, 255],
        }
    }
}

impl ClothConfig {
    /// The pairwise-spring era parameters: Ks = 17 and the legacy update rule.
    pub fn legacy() -> Self {
        Self {
            stiffness: constants::LEGACY_STIFFNESS,
            scheme: IntegrationScheme::Legacy,
            ..Default::default()
        }
    }

    /// A stiffer, heavily damped sheet with bending springs and the whole
    /// top row pinned.
    pub fn stiff() -> Self {
        Self {
            stiffness: 40.0,
            damping: 2.0,
            bending_springs: true,
            pinning: PinPolicy::TopRow,
            ..Default::default()
        }
    }

    /// Builder-style lattice size override.
    pub fn with_grid(mut self, columns: i32, rows: i32, cloth_size: [f32; 2]) -> Self {
        self.columns = columns;
        self.rows = rows;
        self.cloth_size = cloth_size;
        self
    }

    /// Gravity as a vector.
    #[inline]
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from(self.gravity)
    }

    /// Checks the lattice fields: non-negative counts and a finite,
    /// non-negative extent.
    pub fn validate_grid(columns: i32, rows: i32, cloth_size: [f32; 2]) -> WeftResult<()> {
        if columns < 0 {
            return Err(WeftError::config(format!(
                "columns must be >= 0 (got {columns})"
            )));
        }
        if rows < 0 {
            return Err(WeftError::config(format!("rows must be >= 0 (got {rows})")));
        }
        if cloth_size.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(WeftError::config(format!(
                "cloth_size must be finite and non-negative (got {cloth_size:?})"
            )));
        }
        Ok(())
    }

    /// Validates every field. Called before any state is rebuilt.
    pub fn validate(&self) -> WeftResult<()> {
        Self::validate_grid(self.columns, self.rows, self.cloth_size)?;

        let non_negative = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("step_time_scale", self.step_time_scale),
            ("velocity_clamp_threshold", self.velocity_clamp_threshold),
            ("velocity_clamp_target", self.velocity_clamp_target),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(WeftError::config(format!(
                    "{name} must be finite and >= 0 (got {value})"
                )));
            }
        }

        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(WeftError::config(format!(
                "mass must be finite and > 0 (got {})",
                self.mass
            )));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(WeftError::config(format!(
                "gravity must be finite (got {:?})",
                self.gravity
            )));
        }
        Ok(())
    }
}
