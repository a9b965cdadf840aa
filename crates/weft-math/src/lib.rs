//! # weft-math
//!
//! Linear algebra primitives for the Weft cloth kernel.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec2`, `Vec3`)
//! - Safe direction extraction and speed clamping used by the integrator

pub mod vector;

// Re-export glam types as the canonical math types for Weft.
pub use glam::{Vec2, Vec3};

pub use vector::{clamp_speed, split_direction};
