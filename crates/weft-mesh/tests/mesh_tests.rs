//! Integration tests for weft-mesh.

use weft_math::{Vec2, Vec3};
use weft_mesh::grid::{build_grid, PinPolicy};
use weft_mesh::normals::vertex_normals;
use weft_mesh::ClothMesh;

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn lattice(columns: usize, rows: usize) -> weft_mesh::GridBuild {
    build_grid(columns, rows, Vec2::new(10.0, 10.0), &PinPolicy::TopCorners, WHITE).unwrap()
}

// ─── Lattice Tests ────────────────────────────────────────────

#[test]
fn vertex_and_index_counts() {
    for (c, r) in [(1, 1), (1, 5), (5, 1), (2, 2), (3, 7), (16, 16)] {
        let build = lattice(c, r);
        assert_eq!(build.mesh.vertex_count(), c * r, "{c}x{r}");
        assert_eq!(build.mesh.indices.len(), 6 * (c - 1) * (r - 1), "{c}x{r}");
        assert_eq!(build.grid.vertex_count(), c * r);
    }
}

#[test]
fn rest_positions_follow_cell_size() {
    let build = build_grid(4, 5, Vec2::new(8.0, 10.0), &PinPolicy::None, WHITE).unwrap();
    let cell = build.grid.cell_size;
    assert_eq!(cell, Vec2::new(2.0, 2.0));
    for row in 0..5 {
        for col in 0..4 {
            let i = build.grid.index(col, row);
            assert_eq!(
                build.mesh.position(i),
                Vec3::new(cell.x * col as f32, cell.y * row as f32, 0.0)
            );
        }
    }
}

#[test]
fn triangles_never_wrap_rows() {
    let build = lattice(4, 4);
    let grid = build.grid;
    for t in 0..build.mesh.triangle_count() {
        let cols: Vec<usize> = build
            .mesh
            .triangle(t)
            .iter()
            .map(|&v| grid.coords(v as usize).0)
            .collect();
        let min = *cols.iter().min().unwrap();
        let max = *cols.iter().max().unwrap();
        assert!(max - min <= 1, "triangle {t} spans columns {cols:?}");
    }
}

#[test]
fn triangles_wind_counter_clockwise() {
    let build = lattice(5, 4);
    for t in 0..build.mesh.triangle_count() {
        let [a, b, c] = build.mesh.triangle(t);
        let pa = build.mesh.position(a as usize);
        let pb = build.mesh.position(b as usize);
        let pc = build.mesh.position(c as usize);
        let n = (pb - pa).cross(pc - pa);
        assert!(n.z > 0.0, "triangle {t} winds clockwise");
    }
}

#[test]
fn first_cell_triangles() {
    let build = lattice(3, 2);
    // Vertex 3 is (0, 1): it closes the cell spanned by 0, 1, 3, 4.
    assert_eq!(build.mesh.triangle(0), [3, 0, 1]);
    assert_eq!(build.mesh.triangle(1), [1, 4, 3]);
}

#[test]
fn lattice_validates() {
    assert!(lattice(6, 3).mesh.validate().is_ok());
}

// ─── Fallback Tests ───────────────────────────────────────────

#[test]
fn zero_columns_builds_fallback_quad() {
    let build = build_grid(0, 5, Vec2::new(4.0, 2.0), &PinPolicy::TopCorners, WHITE).unwrap();
    assert!(build.grid.degenerate);
    assert_eq!(build.mesh.vertex_count(), 4);
    assert_eq!(build.mesh.triangle_count(), 2);
    assert_eq!(build.mesh.indices, vec![0, 2, 1, 1, 2, 3]);
    assert_eq!(build.mesh.position(3), Vec3::new(4.0, 2.0, 0.0));
    assert!(build.pinned.iter().all(|&p| p));
}

#[test]
fn fallback_quad_pins_every_corner_and_checks_explicit_pins() {
    let build = build_grid(0, 0, Vec2::ONE, &PinPolicy::Explicit(vec![1]), WHITE).unwrap();
    assert!(build.pinned.iter().all(|&p| p));

    let err = build_grid(0, 0, Vec2::ONE, &PinPolicy::Explicit(vec![4]), WHITE).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn zero_rows_builds_fallback_quad() {
    let build = build_grid(7, 0, Vec2::new(1.0, 1.0), &PinPolicy::None, WHITE).unwrap();
    assert_eq!(build.mesh.vertex_count(), 4);
    assert_eq!(build.mesh.triangle_count(), 2);
}

#[test]
fn negative_size_is_rejected() {
    let err = build_grid(2, 2, Vec2::new(-1.0, 1.0), &PinPolicy::None, WHITE).unwrap_err();
    assert!(err.to_string().contains("cloth size"));
}

#[test]
fn zero_width_strip_is_accepted() {
    // A single column sits at x = 0 whatever the width is.
    let build = build_grid(1, 4, Vec2::new(0.0, 4.0), &PinPolicy::TopCorners, WHITE).unwrap();
    assert_eq!(build.mesh.vertex_count(), 4);
    assert_eq!(build.mesh.triangle_count(), 0);
    assert_eq!(build.mesh.position(3), Vec3::new(0.0, 3.0, 0.0));
    assert_eq!(build.pinned_ids().len(), 1);
}

#[test]
fn zero_extent_lattice_collapses() {
    let build = build_grid(3, 3, Vec2::ZERO, &PinPolicy::None, WHITE).unwrap();
    assert_eq!(build.grid.cell_size, Vec2::ZERO);
    assert!(build.mesh.positions().iter().all(|p| *p == Vec3::ZERO));
    assert!(build.mesh.validate().is_ok());
}

// ─── Pinning Tests ────────────────────────────────────────────

#[test]
fn top_corners_pins_row_zero_ends() {
    let build = lattice(5, 4);
    let ids: Vec<u32> = build.pinned_ids().iter().map(|v| v.0).collect();
    assert_eq!(ids, vec![0, 4]);
}

#[test]
fn top_row_pins_entire_first_row() {
    let build = build_grid(5, 4, Vec2::ONE, &PinPolicy::TopRow, WHITE).unwrap();
    assert_eq!(build.pinned.iter().filter(|&&p| p).count(), 5);
    assert!(build.pinned[..5].iter().all(|&p| p));
}

#[test]
fn explicit_pins_and_out_of_range() {
    let policy = PinPolicy::Explicit(vec![2, 7]);
    let build = build_grid(3, 3, Vec2::ONE, &policy, WHITE).unwrap();
    assert!(build.pinned[2] && build.pinned[7]);
    assert_eq!(build.pinned.iter().filter(|&&p| p).count(), 2);

    let bad = PinPolicy::Explicit(vec![9]);
    assert!(build_grid(3, 3, Vec2::ONE, &bad, WHITE).is_err());
}

#[test]
fn pin_policy_serialization() {
    let policy = PinPolicy::Explicit(vec![1, 2]);
    let json = serde_json::to_string(&policy).unwrap();
    let recovered: PinPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, policy);

    let corners: PinPolicy = serde_json::from_str("\"top_corners\"").unwrap();
    assert_eq!(corners, PinPolicy::TopCorners);
}

// ─── Mesh / Normal Tests ──────────────────────────────────────

#[test]
fn color_passes_through() {
    let red = [255, 0, 0, 255];
    let build = build_grid(2, 2, Vec2::ONE, &PinPolicy::None, red).unwrap();
    assert!(build.mesh.colors.iter().all(|&c| c == red));
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = lattice(2, 2).mesh;
    mesh.indices[0] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_color_mismatch() {
    let mut mesh = lattice(2, 2).mesh;
    mesh.colors.pop();
    assert!(mesh.validate().is_err());
}

#[test]
fn flat_lattice_normals_face_up() {
    let mesh = lattice(4, 4).mesh;
    let normals = vertex_normals(&mesh.positions(), &mesh.indices);
    assert_eq!(normals.len(), 16);
    for n in normals {
        assert!((n - Vec3::Z).length() < 1e-6);
    }
}

#[test]
fn normals_follow_tilted_surface() {
    // Single triangle in the XZ plane, wound so its normal is -Y.
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Z];
    let normals = vertex_normals(&positions, &[0, 1, 2]);
    for n in normals {
        assert!((n - Vec3::NEG_Y).length() < 1e-6);
    }
}

#[test]
fn set_positions_checks_length() {
    let mut mesh: ClothMesh = lattice(2, 2).mesh;
    assert!(mesh.set_positions(&[Vec3::ZERO]).is_err());
    let moved = vec![Vec3::ONE; 4];
    mesh.set_positions(&moved).unwrap();
    assert_eq!(mesh.position(2), Vec3::ONE);
}
