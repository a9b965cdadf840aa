//! Force evaluation and time integration.
//!
//! Every step is two-phase. Phase one reads the current positions and
//! velocities and evaluates each spring once, then gathers an averaged
//! spring force per vertex into a scratch buffer. Phase two writes new
//! positions and velocities into separate buffers which are swapped in at
//! the end. No vertex ever sees another vertex's updated state within the
//! same evaluation, so the result does not depend on spring order.
//!
//! Per free vertex:
//! 1. Clamp the pre-step velocity (`|v| > threshold` → at most `target`).
//! 2. `F = Σ spring forces / active springs`.
//! 3. Advance with `h = step_time_scale * dt` under the configured
//!    [`IntegrationScheme`].
//!
//! Pinned vertices are copied through untouched.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use weft_math::{clamp_speed, Vec3};
use weft_types::{VertexId, WeftError, WeftResult};

use crate::config::{ClothConfig, IntegrationScheme};
use crate::springs::SpringNetwork;
use crate::state::VertexBuffers;

/// Physical parameters fixed at integrator construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegratorParams {
    /// Per-vertex mass.
    pub mass: f32,
    /// Multiplier turning `dt` into the integration step `h`.
    pub step_time_scale: f32,
    /// Constant external acceleration.
    pub gravity: Vec3,
    /// Speed above which the pre-step velocity is clamped.
    pub velocity_clamp_threshold: f32,
    /// Maximum speed after clamping.
    pub velocity_clamp_target: f32,
    /// Update rule.
    pub scheme: IntegrationScheme,
}

impl IntegratorParams {
    /// Extracts the integration parameters from a cloth configuration.
    pub fn from_config(config: &ClothConfig) -> Self {
        Self {
            mass: config.mass,
            step_time_scale: config.step_time_scale,
            gravity: config.gravity_vec(),
            velocity_clamp_threshold: config.velocity_clamp_threshold,
            velocity_clamp_target: config.velocity_clamp_target,
            scheme: config.scheme,
        }
    }
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self::from_config(&ClothConfig::default())
    }
}

/// Diagnostics for one integration step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Tick number after this step (filled in by the owning state).
    pub tick: u64,
    /// Springs skipped because their endpoints coincided.
    pub degenerate_springs: u32,
    /// Free vertices whose pre-step velocity was clamped.
    pub clamped_vertices: u32,
    /// Largest speed after the step.
    pub max_speed: f32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Mass-spring integrator with reusable scratch buffers.
#[derive(Debug, Clone, Default)]
pub struct Integrator {
    params: IntegratorParams,
    /// Force on endpoint `a` of each spring; `None` for skipped springs.
    spring_forces: Vec<Option<Vec3>>,
    /// Averaged spring force per vertex.
    forces: Vec<Vec3>,
    /// Clamped start-of-step velocities.
    start_velocities: Vec<Vec3>,
    /// Start-of-step accelerations (averaged-Verlet only).
    accelerations: Vec<Vec3>,
    next_positions: Vec<Vec3>,
    next_velocities: Vec<Vec3>,
}

impl Integrator {
    /// Creates an integrator with the given parameters.
    pub fn new(params: IntegratorParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Current parameters.
    pub fn params(&self) -> &IntegratorParams {
        &self.params
    }

    /// Averaged spring force per vertex for the given state, without
    /// external forces. Pinned vertices report zero.
    pub fn evaluate_forces(&mut self, vertices: &VertexBuffers, springs: &SpringNetwork) -> &[Vec3] {
        gather_forces(
            springs,
            &vertices.positions,
            &vertices.velocities,
            &vertices.pinned,
            &mut self.spring_forces,
            &mut self.forces,
        );
        &self.forces
    }

    /// Advances `vertices` by one step of `dt` seconds.
    ///
    /// # Errors
    /// [`WeftError::InvalidConfiguration`] for a negative or non-finite
    /// `dt`, [`WeftError::InvalidMesh`] when `springs` was built for a
    /// different vertex count. Nothing is mutated on error.
    pub fn step(
        &mut self,
        vertices: &mut VertexBuffers,
        springs: &SpringNetwork,
        dt: f32,
    ) -> WeftResult<StepReport> {
        let start = Instant::now();

        if !dt.is_finite() || dt < 0.0 {
            return Err(WeftError::config(format!(
                "dt must be finite and >= 0 (got {dt})"
            )));
        }
        let n = vertices.len();
        if springs.vertex_count() != n {
            return Err(WeftError::InvalidMesh(format!(
                "Spring network covers {} vertices, state has {}",
                springs.vertex_count(),
                n
            )));
        }

        let p = self.params;
        let h = p.step_time_scale * dt;

        // 1. Clamp existing velocities before any force is applied
        let mut clamped_vertices = 0u32;
        self.start_velocities.clear();
        for (v, &pinned) in vertices.velocities.iter().zip(&vertices.pinned) {
            if pinned {
                self.start_velocities.push(*v);
                continue;
            }
            let (v, clamped) =
                clamp_speed(*v, p.velocity_clamp_threshold, p.velocity_clamp_target);
            clamped_vertices += clamped as u32;
            self.start_velocities.push(v);
        }

        // 2. Spring forces from the start-of-step snapshot
        let mut degenerate_springs = gather_forces(
            springs,
            &vertices.positions,
            &self.start_velocities,
            &vertices.pinned,
            &mut self.spring_forces,
            &mut self.forces,
        );

        // 3. Write the next state into scratch buffers
        self.next_positions.clear();
        self.next_velocities.clear();

        match p.scheme {
            IntegrationScheme::AveragedVerlet => {
                self.accelerations.clear();
                for i in 0..n {
                    let x = vertices.positions[i];
                    if vertices.pinned[i] {
                        self.next_positions.push(x);
                        self.next_velocities.push(vertices.velocities[i]);
                        self.accelerations.push(Vec3::ZERO);
                        continue;
                    }
                    let v = self.start_velocities[i];
                    let a = self.forces[i] / p.mass + p.gravity;
                    self.next_positions.push(x + v * h + 0.5 * a * h * h);
                    // Predicted velocity for the damping term of the second evaluation
                    self.next_velocities.push(v + a * h);
                    self.accelerations.push(a);
                }

                let second = gather_forces(
                    springs,
                    &self.next_positions,
                    &self.next_velocities,
                    &vertices.pinned,
                    &mut self.spring_forces,
                    &mut self.forces,
                );
                degenerate_springs = degenerate_springs.max(second);

                for i in 0..n {
                    if vertices.pinned[i] {
                        continue;
                    }
                    let a_next = self.forces[i] / p.mass + p.gravity;
                    self.next_velocities[i] =
                        self.start_velocities[i] + 0.5 * (self.accelerations[i] + a_next) * h;
                }
            }
            IntegrationScheme::Legacy => {
                let external = p.gravity * p.mass * dt;
                for i in 0..n {
                    let x = vertices.positions[i];
                    if vertices.pinned[i] {
                        self.next_positions.push(x);
                        self.next_velocities.push(vertices.velocities[i]);
                        continue;
                    }
                    let v = self.start_velocities[i];
                    let net = self.forces[i] + external;
                    self.next_positions.push(x + v * h + 0.5 * v * h * h);
                    self.next_velocities.push(v + (v + net) * 0.5 * h);
                }
            }
        }

        // 4. Swap the new state in
        std::mem::swap(&mut vertices.positions, &mut self.next_positions);
        std::mem::swap(&mut vertices.velocities, &mut self.next_velocities);

        let max_speed = vertices
            .velocities
            .iter()
            .map(|v| v.length())
            .fold(0.0f32, f32::max);

        Ok(StepReport {
            tick: 0,
            degenerate_springs,
            clamped_vertices,
            max_speed,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }
}

/// Evaluates every spring once, then averages the incident contributions
/// per free vertex into `forces`. Returns the number of skipped springs.
fn gather_forces(
    springs: &SpringNetwork,
    positions: &[Vec3],
    velocities: &[Vec3],
    pinned: &[bool],
    spring_forces: &mut Vec<Option<Vec3>>,
    forces: &mut Vec<Vec3>,
) -> u32 {
    let mut degenerate = 0u32;
    spring_forces.clear();
    for spring in springs.springs() {
        match spring.force_on_a(positions, velocities) {
            Ok(f) => spring_forces.push(Some(f)),
            Err(err) => {
                tracing::warn!(%err, "skipping spring contribution this step");
                degenerate += 1;
                spring_forces.push(None);
            }
        }
    }

    forces.clear();
    forces.resize(positions.len(), Vec3::ZERO);
    for (i, force) in forces.iter_mut().enumerate() {
        if pinned[i] {
            continue;
        }
        let v = VertexId(i as u32);
        let mut sum = Vec3::ZERO;
        let mut active = 0u32;
        for &id in springs.incident(v) {
            if let Some(f) = spring_forces[id.index()] {
                let (_, sign) = springs.get(id).other(v);
                sum += sign * f;
                active += 1;
            }
        }
        if active > 0 {
            *force = sum / active as f32;
        }
    }
    degenerate
}
