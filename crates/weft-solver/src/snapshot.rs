//! Render-boundary snapshots.
//!
//! A snapshot is an independently owned copy of the vertex and index
//! buffers. The renderer consumes it on its own thread, so nothing in
//! here borrows from the live simulation state.

use serde::{Deserialize, Serialize};
use weft_math::Vec3;

/// One vertex as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
}

/// Vertex and index buffers at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothSnapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    /// Simulated time in seconds (sum of raw `dt`).
    pub sim_time: f64,
    /// Vertex buffer, row-major.
    pub vertices: Vec<SnapshotVertex>,
    /// Flat triangle index buffer.
    pub indices: Vec<u32>,
}

impl ClothSnapshot {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index buffer as triangles.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect()
    }

    /// Positions as vectors.
    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .collect()
    }

    /// Positions interleaved as `[x0, y0, z0, x1, ...]`.
    pub fn interleaved_positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }
}
