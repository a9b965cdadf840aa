//! # weft-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Weft cloth simulation kernel.
//!
//! This crate has no domain logic. It defines the vocabulary
//! that all other Weft crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{WeftError, WeftResult};
pub use ids::{SpringId, VertexId};
