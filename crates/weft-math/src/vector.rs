//! Small vector helpers shared by the spring and integration code.

use glam::Vec3;
use weft_types::constants::EPSILON;

/// Splits `delta` into a unit direction and its length.
///
/// Returns `None` when the length is below [`EPSILON`]; callers decide
/// what a missing direction means for them.
#[inline]
pub fn split_direction(delta: Vec3) -> Option<(Vec3, f32)> {
    let length = delta.length();
    if length < EPSILON || !length.is_finite() {
        return None;
    }
    Some((delta / length, length))
}

/// Clamps a velocity whose magnitude exceeds `threshold` to at most `target`.
///
/// Returns the (possibly rescaled) velocity and whether the clamp engaged.
/// Velocities at or below `threshold` pass through untouched.
#[inline]
pub fn clamp_speed(velocity: Vec3, threshold: f32, target: f32) -> (Vec3, bool) {
    if velocity.length() > threshold {
        (velocity.clamp_length_max(target), true)
    } else {
        (velocity, false)
    }
}
