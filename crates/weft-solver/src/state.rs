//! Cloth state: lattice, per-vertex buffers, and springs.
//!
//! This is the only mutable simulation object. Topology (grid, indices,
//! springs) is replaced wholesale by [`ClothState::rebuild`]; positions
//! and velocities change every [`ClothState::tick`].

use weft_math::{Vec2, Vec3};
use weft_mesh::grid::build_grid;
use weft_mesh::normals::vertex_normals;
use weft_mesh::{ClothMesh, Grid};
use weft_types::{WeftError, WeftResult};

use crate::config::ClothConfig;
use crate::integrator::{Integrator, IntegratorParams, StepReport};
use crate::snapshot::{ClothSnapshot, SnapshotVertex};
use crate::springs::{SpringNetwork, SpringParams};

/// Per-vertex kinematic buffers. All three have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub pinned: Vec<bool>,
}

impl VertexBuffers {
    /// Buffers at rest: given positions, zero velocity.
    pub fn at_rest(positions: Vec<Vec3>, pinned: Vec<bool>) -> Self {
        let n = positions.len();
        Self {
            positions,
            velocities: vec![Vec3::ZERO; n],
            pinned,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Owns everything the kernel simulates.
///
/// ```text
/// let mut cloth = ClothState::new(ClothConfig::default())?;
/// loop {
///     cloth.tick(dt)?;
///     renderer.push(cloth.snapshot());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ClothState {
    config: ClothConfig,
    grid: Grid,
    /// Build-time buffers; supplies colors and indices.
    mesh: ClothMesh,
    vertices: VertexBuffers,
    springs: SpringNetwork,
    integrator: Integrator,
    tick: u64,
    sim_time: f64,
}

/// Everything a build produces, assembled before any state is replaced.
struct Assembly {
    grid: Grid,
    mesh: ClothMesh,
    vertices: VertexBuffers,
    springs: SpringNetwork,
}

impl ClothState {
    /// Validates `config` and builds the lattice and springs.
    pub fn new(config: ClothConfig) -> WeftResult<Self> {
        config.validate()?;
        let assembly = Self::assemble(&config)?;
        let integrator = Integrator::new(IntegratorParams::from_config(&config));
        Ok(Self {
            grid: assembly.grid,
            mesh: assembly.mesh,
            vertices: assembly.vertices,
            springs: assembly.springs,
            integrator,
            config,
            tick: 0,
            sim_time: 0.0,
        })
    }

    fn assemble(config: &ClothConfig) -> WeftResult<Assembly> {
        // Counts were validated non-negative by the caller.
        let build = build_grid(
            config.columns as usize,
            config.rows as usize,
            Vec2::from(config.cloth_size),
            &config.pinning,
            config.color,
        )?;
        let positions = build.mesh.positions();
        let springs = SpringNetwork::build(
            &build.grid,
            &positions,
            &SpringParams {
                stiffness: config.stiffness,
                damping: config.damping,
                bending: config.bending_springs,
            },
        );

        tracing::debug!(
            columns = build.grid.columns,
            rows = build.grid.rows,
            degenerate = build.grid.degenerate,
            vertices = positions.len(),
            springs = springs.len(),
            triangles = build.mesh.triangle_count(),
            "rebuilt cloth"
        );

        Ok(Assembly {
            grid: build.grid,
            vertices: VertexBuffers::at_rest(positions, build.pinned),
            mesh: build.mesh,
            springs,
        })
    }

    fn commit(&mut self, config: ClothConfig, assembly: Assembly) {
        self.integrator = Integrator::new(IntegratorParams::from_config(&config));
        self.config = config;
        self.grid = assembly.grid;
        self.mesh = assembly.mesh;
        self.vertices = assembly.vertices;
        self.springs = assembly.springs;
        self.tick = 0;
        self.sim_time = 0.0;
    }

    /// Regenerates lattice and springs for new dimensions and resets all
    /// velocities to zero.
    ///
    /// # Errors
    /// [`WeftError::InvalidConfiguration`] for negative counts or size; the
    /// current state is left untouched.
    pub fn rebuild(&mut self, columns: i32, rows: i32, cloth_size: [f32; 2]) -> WeftResult<()> {
        let config = self.config.clone().with_grid(columns, rows, cloth_size);
        self.reconfigure(config)
    }

    /// Replaces the whole configuration and rebuilds.
    ///
    /// # Errors
    /// Any validation failure; the current state is left untouched.
    pub fn reconfigure(&mut self, config: ClothConfig) -> WeftResult<()> {
        config.validate()?;
        let assembly = Self::assemble(&config)?;
        self.commit(config, assembly);
        Ok(())
    }

    /// Runs the integrator once.
    pub fn tick(&mut self, dt: f32) -> WeftResult<StepReport> {
        let mut report = self.integrator.step(&mut self.vertices, &self.springs, dt)?;
        self.tick += 1;
        self.sim_time += dt as f64;
        report.tick = self.tick;

        tracing::trace!(
            tick = self.tick,
            max_speed = report.max_speed,
            clamped = report.clamped_vertices,
            degenerate = report.degenerate_springs,
            "tick"
        );
        Ok(report)
    }

    // ─── Snapshots ────────────────────────────────────────────

    /// Independent copy of the render buffers.
    pub fn snapshot(&self) -> ClothSnapshot {
        ClothSnapshot {
            tick: self.tick,
            sim_time: self.sim_time,
            vertices: self.vertex_snapshot(),
            indices: self.mesh.indices.clone(),
        }
    }

    /// Positions, normals, and colors, row-major.
    pub fn vertex_snapshot(&self) -> Vec<SnapshotVertex> {
        let normals = vertex_normals(&self.vertices.positions, &self.mesh.indices);
        self.vertices
            .positions
            .iter()
            .zip(&normals)
            .zip(&self.mesh.colors)
            .map(|((p, n), &color)| SnapshotVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color,
            })
            .collect()
    }

    /// Triangles as index triples.
    pub fn index_snapshot(&self) -> Vec<[u32; 3]> {
        (0..self.mesh.triangle_count())
            .map(|t| self.mesh.triangle(t))
            .collect()
    }

    // ─── Accessors ────────────────────────────────────────────

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn springs(&self) -> &SpringNetwork {
        &self.springs
    }

    pub fn vertices(&self) -> &VertexBuffers {
        &self.vertices
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.vertices.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.vertices.velocities
    }

    pub fn indices(&self) -> &[u32] {
        &self.mesh.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// False for indices past the end.
    #[inline]
    pub fn is_pinned(&self, i: usize) -> bool {
        self.vertices.pinned.get(i).copied().unwrap_or(false)
    }

    /// Ticks completed since the last rebuild.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated seconds since the last rebuild.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    // ─── Mutation (scenarios and tests) ───────────────────────

    fn check_index(&self, i: usize) -> WeftResult<()> {
        if i >= self.vertex_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Vertex {} is out of range (vertex count: {})",
                i,
                self.vertex_count()
            )));
        }
        Ok(())
    }

    /// Moves a vertex. Springs keep their build-time rest lengths.
    pub fn set_position(&mut self, i: usize, position: Vec3) -> WeftResult<()> {
        self.check_index(i)?;
        self.vertices.positions[i] = position;
        Ok(())
    }

    pub fn set_velocity(&mut self, i: usize, velocity: Vec3) -> WeftResult<()> {
        self.check_index(i)?;
        self.vertices.velocities[i] = velocity;
        Ok(())
    }

    /// Pins or releases a vertex. Pinning zeroes its velocity.
    pub fn set_pinned(&mut self, i: usize, pinned: bool) -> WeftResult<()> {
        self.check_index(i)?;
        self.vertices.pinned[i] = pinned;
        if pinned {
            self.vertices.velocities[i] = Vec3::ZERO;
        }
        Ok(())
    }

    // ─── Diagnostics ──────────────────────────────────────────

    /// Averaged spring force per vertex at the current state.
    pub fn spring_forces(&mut self) -> Vec<Vec3> {
        self.integrator
            .evaluate_forces(&self.vertices, &self.springs)
            .to_vec()
    }

    /// `0.5 * m * |v|^2` summed over free vertices.
    pub fn kinetic_energy(&self) -> f64 {
        let m = self.config.mass as f64;
        self.free_vertices()
            .map(|i| 0.5 * m * self.vertices.velocities[i].length_squared() as f64)
            .sum()
    }

    /// Elastic energy stored in the springs.
    pub fn spring_potential_energy(&self) -> f64 {
        self.springs.potential_energy(&self.vertices.positions)
    }

    /// `-m * g · x` summed over free vertices.
    pub fn gravitational_potential_energy(&self) -> f64 {
        let m = self.config.mass as f64;
        let g = self.config.gravity_vec();
        self.free_vertices()
            .map(|i| -m * g.dot(self.vertices.positions[i]) as f64)
            .sum()
    }

    /// Kinetic plus both potentials.
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.spring_potential_energy() + self.gravitational_potential_energy()
    }

    fn free_vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertex_count()).filter(|&i| !self.vertices.pinned[i])
    }
}
