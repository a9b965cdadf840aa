//! Cloth lattice generation.
//!
//! Builds the row-major vertex lattice, its triangle index buffer, and the
//! pin mask from a `(columns, rows)` vertex count and a cloth extent.
//!
//! Vertex `(x, y)` lives at index `y * columns + x` and is placed at
//! `(cell.x * x, cell.y * y, 0)` where `cell = size / (columns, rows)`.

use serde::{Deserialize, Serialize};
use weft_math::{Vec2, Vec3};
use weft_types::{VertexId, WeftError, WeftResult};

use crate::mesh::{ClothMesh, Color};

/// Lattice dimensions.
///
/// `columns` and `rows` count vertices, not cells. A degenerate grid is the
/// flat fallback quad built when `columns * rows == 0`; it reports itself as
/// a 2×2 lattice spanning the full cloth size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Vertices per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
    /// Spacing between adjacent vertices along X and Y.
    pub cell_size: Vec2,
    /// True when this is the single-quad fallback.
    pub degenerate: bool,
}

impl Grid {
    /// Total vertex count (`columns * rows`).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Row-major index of the vertex at `(column, row)`.
    #[inline]
    pub fn index(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }

    /// Inverse of [`Grid::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// True when `index` sits in the last column (its right neighbour would wrap).
    #[inline]
    pub fn is_last_column(&self, index: usize) -> bool {
        (index + 1) % self.columns == 0
    }

    /// True when `index` sits in the first column.
    #[inline]
    pub fn is_first_column(&self, index: usize) -> bool {
        index % self.columns == 0
    }

    /// Static lattice position of `(column, row)`.
    #[inline]
    pub fn rest_position(&self, column: usize, row: usize) -> Vec3 {
        Vec3::new(
            self.cell_size.x * column as f32,
            self.cell_size.y * row as f32,
            0.0,
        )
    }
}

/// Which vertices are anchored after a build.
///
/// The fallback quad built for an empty lattice ignores the policy and pins
/// all four corners; `Explicit` indices are still checked against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPolicy {
    /// First and last vertex of row 0.
    #[default]
    TopCorners,
    /// Every vertex of row 0.
    TopRow,
    /// Nothing pinned; the cloth free-falls.
    None,
    /// An explicit set of vertex indices.
    Explicit(Vec<u32>),
}

impl PinPolicy {
    /// Resolves the policy against a grid into a per-vertex mask.
    pub fn resolve(&self, grid: &Grid) -> WeftResult<Vec<bool>> {
        let n = grid.vertex_count();
        let mut pinned = vec![false; n];
        if n == 0 {
            return Ok(pinned);
        }

        match self {
            PinPolicy::TopCorners => {
                pinned[0] = true;
                pinned[grid.columns - 1] = true;
            }
            PinPolicy::TopRow => {
                for item in pinned.iter_mut().take(grid.columns) {
                    *item = true;
                }
            }
            PinPolicy::None => {}
            PinPolicy::Explicit(indices) => {
                for &idx in indices {
                    let slot = pinned.get_mut(idx as usize).ok_or_else(|| {
                        WeftError::config(format!(
                            "pinned vertex {} is out of range (vertex count: {})",
                            idx, n
                        ))
                    })?;
                    *slot = true;
                }
            }
        }

        Ok(pinned)
    }
}

/// Output of [`build_grid`].
#[derive(Debug, Clone)]
pub struct GridBuild {
    /// Lattice dimensions actually built.
    pub grid: Grid,
    /// Vertex and index buffers.
    pub mesh: ClothMesh,
    /// Per-vertex pin mask.
    pub pinned: Vec<bool>,
}

impl GridBuild {
    /// Indices of pinned vertices, ascending.
    pub fn pinned_ids(&self) -> Vec<VertexId> {
        self.pinned
            .iter()
            .enumerate()
            .filter(|(_, p)| **p)
            .map(|(i, _)| VertexId(i as u32))
            .collect()
    }
}

/// Builds the cloth lattice.
///
/// `columns * rows == 0` is not an error: it yields the legacy flat quad
/// (4 vertices, 2 triangles, every vertex pinned) so an empty grid still
/// renders something.
///
/// # Errors
/// [`WeftError::InvalidConfiguration`] when `size` is negative or not
/// finite, or when an explicit pin index is out of range. A zero extent is
/// accepted; springs along that axis start out degenerate and are skipped
/// by the integrator.
///
/// # Example
/// ```
/// use weft_math::Vec2;
/// use weft_mesh::grid::{build_grid, PinPolicy};
/// let build = build_grid(3, 3, Vec2::new(3.0, 3.0), &PinPolicy::TopCorners, [255; 4]).unwrap();
/// assert_eq!(build.mesh.vertex_count(), 9);
/// assert_eq!(build.mesh.triangle_count(), 8);
/// ```
pub fn build_grid(
    columns: usize,
    rows: usize,
    size: Vec2,
    pinning: &PinPolicy,
    color: Color,
) -> WeftResult<GridBuild> {
    if !size.is_finite() || size.x < 0.0 || size.y < 0.0 {
        return Err(WeftError::config(format!(
            "cloth size must be finite and non-negative (got [{}, {}])",
            size.x, size.y
        )));
    }

    if columns * rows == 0 {
        tracing::debug!(columns, rows, "empty lattice, building fallback quad");
        return fallback_quad(size, pinning, color);
    }

    let grid = Grid {
        columns,
        rows,
        cell_size: size / Vec2::new(columns as f32, rows as f32),
        degenerate: false,
    };
    let pinned = pinning.resolve(&grid)?;

    let vertex_count = grid.vertex_count();
    let tri_count = 2 * (columns - 1) * (rows - 1);
    let mut mesh = ClothMesh::with_capacity(vertex_count, tri_count);

    for row in 0..rows {
        for column in 0..columns {
            mesh.push_vertex(grid.rest_position(column, row), color);
        }
    }

    // Each vertex below the first row closes the cell above-right of it.
    // Both triangles wind counter-clockwise seen from +Z.
    let c = columns as u32;
    for i in columns..vertex_count {
        if grid.is_last_column(i) {
            continue;
        }
        let current = i as u32;
        let up = current - c;
        let up_right = up + 1;
        let right = current + 1;
        mesh.push_triangle(current, up, up_right);
        mesh.push_triangle(up_right, right, current);
    }

    Ok(GridBuild { grid, mesh, pinned })
}

/// The single-quad fallback mesh, in its legacy index order.
///
/// Every corner is pinned whatever the policy says; the policy is still
/// resolved against the quad so bad explicit indices are reported.
fn fallback_quad(size: Vec2, pinning: &PinPolicy, color: Color) -> WeftResult<GridBuild> {
    let grid = Grid {
        columns: 2,
        rows: 2,
        cell_size: size,
        degenerate: true,
    };
    pinning.resolve(&grid)?;

    let mut mesh = ClothMesh::with_capacity(4, 2);
    mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), color);
    mesh.push_vertex(Vec3::new(size.x, 0.0, 0.0), color);
    mesh.push_vertex(Vec3::new(0.0, size.y, 0.0), color);
    mesh.push_vertex(Vec3::new(size.x, size.y, 0.0), color);
    mesh.push_triangle(0, 2, 1);
    mesh.push_triangle(1, 2, 3);

    Ok(GridBuild {
        grid,
        mesh,
        pinned: vec![true; 4],
    })
}
