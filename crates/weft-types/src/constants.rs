//! Physical constants and simulation defaults.

/// Default spring stiffness (Ks).
pub const DEFAULT_STIFFNESS: f32 = 16.0;

/// Spring stiffness used by the legacy pairwise spring model.
pub const LEGACY_STIFFNESS: f32 = 17.0;

/// Default along-axis spring damping (Kd).
pub const DEFAULT_DAMPING: f32 = 0.5;

/// Default per-vertex mass.
pub const DEFAULT_MASS: f32 = 1.0;

/// Multiplier applied to the frame delta before integration.
pub const DEFAULT_STEP_TIME_SCALE: f32 = 2.0;

/// Default downward acceleration along -Z (the lattice lies in the XY plane).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, 0.0, -0.98];

/// Speed above which the velocity clamp engages.
pub const DEFAULT_VELOCITY_CLAMP_THRESHOLD: f32 = 10.0;

/// Maximum speed a clamped velocity is rescaled to.
pub const DEFAULT_VELOCITY_CLAMP_TARGET: f32 = 500.0;

/// Stiffness multiplier for diagonal (shear) springs.
pub const SHEAR_STIFFNESS_FACTOR: f32 = 0.7;

/// Stiffness multiplier for bending springs.
pub const BENDING_STIFFNESS_FACTOR: f32 = 0.5;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Spring endpoints closer than this are treated as coincident.
pub const EPSILON: f32 = 1.0e-6;
