//! Vertex normal computation from triangle mesh data.
//!
//! Normals are not stored on the mesh; snapshots derive them from the
//! current positions. A flat lattice yields `+Z` everywhere.

use weft_math::Vec3;

/// Area-weighted vertex normals for `positions` triangulated by `indices`.
///
/// Each triangle's face normal (weighted by its area) is accumulated at its
/// three vertices and the sums are normalized. Vertices touched by no
/// triangle, or whose accumulated normal vanishes, get `+Z`.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let a = tri[0] as usize;
        let b = tri[1] as usize;
        let c = tri[2] as usize;

        // Magnitude = 2 × triangle area
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);

        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }

    for n in &mut normals {
        *n = n.try_normalize().unwrap_or(Vec3::Z);
    }
    normals
}
