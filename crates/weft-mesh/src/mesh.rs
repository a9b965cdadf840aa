//! Cloth mesh buffers with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! This is the shape the render collaborator uploads, so the lattice
//! builder writes it directly.

use serde::{Deserialize, Serialize};
use weft_math::Vec3;
use weft_types::{WeftError, WeftResult};

/// RGBA8 vertex color. Opaque to the kernel; passed through to the renderer.
pub type Color = [u8; 4];

/// A triangle mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClothMesh {
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,
    pub pos_z: Vec<f32>,

    /// Per-vertex render color.
    pub colors: Vec<Color>,

    /// Flat triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl ClothMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Appends a vertex.
    pub fn push_vertex(&mut self, position: Vec3, color: Color) {
        self.pos_x.push(position.x);
        self.pos_y.push(position.y);
        self.pos_z.push(position.z);
        self.colors.push(color);
    }

    /// Appends one triangle.
    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Collects positions into an array-of-structs `Vec<Vec3>`.
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.vertex_count()).map(|i| self.position(i)).collect()
    }

    /// Overwrites positions from an array-of-structs slice.
    pub fn set_positions(&mut self, positions: &[Vec3]) -> WeftResult<()> {
        if positions.len() != self.vertex_count() {
            return Err(WeftError::InvalidMesh(format!(
                "Position count ({}) != vertex count ({})",
                positions.len(),
                self.vertex_count()
            )));
        }
        for (i, p) in positions.iter().enumerate() {
            self.pos_x[i] = p.x;
            self.pos_y[i] = p.y;
            self.pos_z[i] = p.z;
        }
        Ok(())
    }

    /// Empty buffers sized for a lattice.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            colors: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Checks that every channel has one entry per vertex and that the
    /// index buffer holds whole, in-range, non-repeating triangles.
    pub fn validate(&self) -> WeftResult<()> {
        let n = self.vertex_count();
        let channels = [
            ("pos_y", self.pos_y.len()),
            ("pos_z", self.pos_z.len()),
            ("colors", self.colors.len()),
        ];
        if let Some((name, len)) = channels.iter().find(|(_, len)| *len != n) {
            return Err(WeftError::InvalidMesh(format!(
                "{name} has {len} entries for {n} vertices"
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(WeftError::InvalidMesh(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&idx| idx as usize >= n) {
            return Err(WeftError::InvalidMesh(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        if let Some(t) = (0..self.triangle_count()).find(|&t| {
            let [a, b, c] = self.triangle(t);
            a == b || b == c || a == c
        }) {
            return Err(WeftError::InvalidMesh(format!(
                "triangle {t} repeats a vertex: {:?}",
                self.triangle(t)
            )));
        }
        Ok(())
    }
}
