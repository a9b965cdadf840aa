//! # weft-solver
//!
//! Spring construction, time integration, and simulation state.
//!
//! ## Key Types
//!
//! - [`ClothState`]: Owns the lattice, vertex buffers, and springs; ticks and snapshots
//! - [`SpringNetwork`]: Structural/shear/bending springs keyed by vertex index
//! - [`Integrator`]: Two-phase neighbour-averaged force model and integration
//! - [`ClothConfig`]: Every tunable physical and topological parameter

pub mod config;
pub mod integrator;
pub mod snapshot;
pub mod springs;
pub mod state;

pub use config::{ClothConfig, IntegrationScheme};
pub use integrator::{Integrator, IntegratorParams, StepReport};
pub use snapshot::{ClothSnapshot, SnapshotVertex};
pub use springs::{Spring, SpringKind, SpringNetwork, SpringParams};
pub use state::{ClothState, VertexBuffers};
