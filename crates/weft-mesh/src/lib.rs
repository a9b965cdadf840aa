//! # weft-mesh
//!
//! Cloth lattice generation with Structure-of-Arrays (SoA) vertex buffers.
//!
//! ## Key Types
//!
//! - [`ClothMesh`]: Flat vertex (position, color) and index buffers.
//! - [`Grid`]: Lattice dimensions and cell size; row-major vertex addressing.
//! - [`build_grid`]: Builds the lattice, its triangulation, and the pin mask.
//! - [`PinPolicy`]: Which vertices are anchored after a build.

pub mod grid;
pub mod mesh;
pub mod normals;

pub use grid::{build_grid, Grid, GridBuild, PinPolicy};
pub use mesh::ClothMesh;
