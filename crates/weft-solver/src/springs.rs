//! Spring network construction and per-spring force evaluation.
//!
//! Springs connect lattice vertices by index. Walking the vertices in
//! row-major order, vertex `N` owns:
//!
//! ```text
//!   N ──────── N+1          structural (right)
//!   │ ╲      ╱
//!   │   ╲  ╱                shear (down-right, down-left)
//!   │   ╱  ╲
//!   N+c      N+c+1          structural (down)
//! ```
//!
//! Optional bending springs skip one vertex: `N → N+2` and `N → N+2c`.
//! An incidence table (vertex → touching springs) is built alongside so
//! the integrator can gather forces per vertex.

use serde::{Deserialize, Serialize};
use weft_math::{split_direction, Vec3};
use weft_mesh::Grid;
use weft_types::constants::{BENDING_STIFFNESS_FACTOR, EPSILON, SHEAR_STIFFNESS_FACTOR};
use weft_types::{SpringId, VertexId, WeftError, WeftResult};

/// Spring family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpringKind {
    /// Axis-aligned neighbours.
    Structural,
    /// Diagonal neighbours.
    Shear,
    /// Axis-aligned vertices two cells apart.
    Bending,
}

/// Base spring constants copied into every spring at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Structural stiffness (Ks).
    pub stiffness: f32,
    /// Along-axis damping (Kd).
    pub damping: f32,
    /// Whether to add bending springs.
    pub bending: bool,
}

/// A damped Hookean spring between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub kind: SpringKind,
    pub a: VertexId,
    pub b: VertexId,
    /// Length at which the spring exerts no elastic force.
    pub rest_length: f32,
    /// Hooke constant (Ks).
    pub stiffness: f32,
    /// Along-axis damping constant (Kd).
    pub damping: f32,
}

impl Spring {
    /// Force acting on endpoint `a`; endpoint `b` receives the negation.
    ///
    /// `Ks * (|d| - rest) * dir + Kd * ((v_b - v_a) · dir) * dir`, with `dir`
    /// the unit vector from `a` to `b`. A stretched spring pulls `a` toward
    /// `b`; a compressed one pushes it away.
    ///
    /// # Errors
    /// [`WeftError::DegenerateSpring`] when the endpoints coincide.
    pub fn force_on_a(&self, positions: &[Vec3], velocities: &[Vec3]) -> WeftResult<Vec3> {
        let (ia, ib) = (self.a.index(), self.b.index());
        let (dir, distance) =
            split_direction(positions[ib] - positions[ia]).ok_or(WeftError::DegenerateSpring {
                a: self.a.0,
                b: self.b.0,
            })?;

        let elastic = self.stiffness * (distance - self.rest_length);
        let closing = (velocities[ib] - velocities[ia]).dot(dir);
        Ok((elastic + self.damping * closing) * dir)
    }

    /// Elastic potential `0.5 * Ks * (|d| - rest)^2`.
    pub fn potential_energy(&self, positions: &[Vec3]) -> f64 {
        let distance = positions[self.b.index()].distance(positions[self.a.index()]);
        let stretch = (distance - self.rest_length) as f64;
        0.5 * self.stiffness as f64 * stretch * stretch
    }

    /// Relative extension `(|d| - rest) / rest`; zero for a zero-length spring.
    pub fn strain(&self, positions: &[Vec3]) -> f32 {
        if self.rest_length < EPSILON {
            return 0.0;
        }
        let distance = positions[self.b.index()].distance(positions[self.a.index()]);
        (distance - self.rest_length) / self.rest_length
    }

    /// The endpoint opposite `v`, with the sign its force carries for `v`
    /// (`+1` when `v` is `a`, `-1` when `v` is `b`).
    #[inline]
    pub fn other(&self, v: VertexId) -> (VertexId, f32) {
        if v == self.a {
            (self.b, 1.0)
        } else {
            (self.a, -1.0)
        }
    }
}

/// All springs of a lattice plus a vertex → spring incidence table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpringNetwork {
    springs: Vec<Spring>,
    incidence: Vec<Vec<SpringId>>,
}

impl SpringNetwork {
    /// Derives springs from the lattice and its build-time positions.
    ///
    /// Rest lengths are the construction-time endpoint distances, so an
    /// undeformed lattice is force-free. Shear springs take
    /// `SHEAR_STIFFNESS_FACTOR × Ks`; bending springs take
    /// `BENDING_STIFFNESS_FACTOR × Ks`. The fallback quad gets no springs.
    pub fn build(grid: &Grid, positions: &[Vec3], params: &SpringParams) -> Self {
        let count = positions.len();
        let mut network = Self {
            springs: Vec::new(),
            incidence: vec![Vec::new(); count],
        };
        if grid.degenerate {
            return network;
        }

        let columns = grid.columns;
        let shear_ks = params.stiffness * SHEAR_STIFFNESS_FACTOR;
        let bending_ks = params.stiffness * BENDING_STIFFNESS_FACTOR;

        for n in 0..count {
            let last_column = grid.is_last_column(n);
            let first_column = grid.is_first_column(n);
            let down = n + columns;

            if !last_column {
                network.push(SpringKind::Structural, n, n + 1, params.stiffness, params, positions);
            }
            if down < count {
                network.push(SpringKind::Structural, n, down, params.stiffness, params, positions);
            }
            if !last_column && down + 1 < count {
                network.push(SpringKind::Shear, n, down + 1, shear_ks, params, positions);
            }
            if !first_column && down - 1 < count {
                network.push(SpringKind::Shear, n, down - 1, shear_ks, params, positions);
            }

            if params.bending {
                let (column, _) = grid.coords(n);
                if column + 2 < columns {
                    network.push(SpringKind::Bending, n, n + 2, bending_ks, params, positions);
                }
                if n + 2 * columns < count {
                    network.push(SpringKind::Bending, n, n + 2 * columns, bending_ks, params, positions);
                }
            }
        }

        tracing::debug!(
            vertices = count,
            springs = network.springs.len(),
            "built spring network"
        );
        network
    }

    fn push(
        &mut self,
        kind: SpringKind,
        a: usize,
        b: usize,
        stiffness: f32,
        params: &SpringParams,
        positions: &[Vec3],
    ) {
        let id = SpringId(self.springs.len() as u32);
        self.springs.push(Spring {
            kind,
            a: VertexId(a as u32),
            b: VertexId(b as u32),
            rest_length: positions[a].distance(positions[b]),
            stiffness,
            damping: params.damping,
        });
        self.incidence[a].push(id);
        self.incidence[b].push(id);
    }

    /// Builds a network from explicit springs over `vertex_count` vertices.
    ///
    /// # Errors
    /// [`WeftError::InvalidMesh`] if a spring references a missing vertex,
    /// connects a vertex to itself, or has a non-positive rest length.
    pub fn from_springs(vertex_count: usize, springs: Vec<Spring>) -> WeftResult<Self> {
        let mut incidence = vec![Vec::new(); vertex_count];
        for (i, s) in springs.iter().enumerate() {
            if s.a.index() >= vertex_count || s.b.index() >= vertex_count {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} references vertex out of range ({}, {}; vertex count: {})",
                    i, s.a.0, s.b.0, vertex_count
                )));
            }
            if s.a == s.b {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} connects vertex {} to itself",
                    i, s.a.0
                )));
            }
            if s.rest_length.is_nan() || s.rest_length <= 0.0 {
                return Err(WeftError::InvalidMesh(format!(
                    "Spring {} has non-positive rest length {}",
                    i, s.rest_length
                )));
            }
            incidence[s.a.index()].push(SpringId(i as u32));
            incidence[s.b.index()].push(SpringId(i as u32));
        }
        Ok(Self { springs, incidence })
    }

    /// All springs in build order.
    #[inline]
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    /// Number of springs.
    #[inline]
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    /// True when there are no springs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    /// Number of vertices the incidence table covers.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    /// Springs touching vertex `v`.
    #[inline]
    pub fn incident(&self, v: VertexId) -> &[SpringId] {
        &self.incidence[v.index()]
    }

    /// Returns spring `id`.
    #[inline]
    pub fn get(&self, id: SpringId) -> &Spring {
        &self.springs[id.index()]
    }

    /// Number of springs of `kind`.
    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }

    /// Scales stiffness and rest length of every spring of `kind`.
    pub fn scale_params(&mut self, kind: SpringKind, stiffness_percent: f32, rest_percent: f32) {
        for s in self.springs.iter_mut().filter(|s| s.kind == kind) {
            s.stiffness *= stiffness_percent;
            s.rest_length *= rest_percent;
        }
    }

    /// Total elastic potential energy of the network.
    pub fn potential_energy(&self, positions: &[Vec3]) -> f64 {
        self.springs.iter().map(|s| s.potential_energy(positions)).sum()
    }

    /// Largest absolute relative extension over all springs.
    pub fn max_strain(&self, positions: &[Vec3]) -> f32 {
        self.springs
            .iter()
            .map(|s| s.strain(positions).abs())
            .fold(0.0, f32::max)
    }
}
