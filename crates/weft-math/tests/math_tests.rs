//! Integration tests for weft-math.

use weft_math::{clamp_speed, split_direction, Vec3};

// ─── Direction Tests ──────────────────────────────────────────

#[test]
fn split_direction_unit_axis() {
    let (dir, len) = split_direction(Vec3::new(0.0, 3.0, 0.0)).unwrap();
    assert!((len - 3.0).abs() < 1e-6);
    assert!((dir - Vec3::Y).length() < 1e-6);
}

#[test]
fn split_direction_diagonal() {
    let (dir, len) = split_direction(Vec3::new(1.0, 1.0, 0.0)).unwrap();
    assert!((len - std::f32::consts::SQRT_2).abs() < 1e-6);
    assert!((dir.length() - 1.0).abs() < 1e-6);
}

#[test]
fn split_direction_rejects_coincident() {
    assert!(split_direction(Vec3::ZERO).is_none());
    assert!(split_direction(Vec3::splat(1.0e-9)).is_none());
}

// ─── Clamp Tests ──────────────────────────────────────────────

#[test]
fn clamp_below_threshold_is_identity() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    let (out, clamped) = clamp_speed(v, 10.0, 2.0);
    assert_eq!(out, v);
    assert!(!clamped);
}

#[test]
fn clamp_above_threshold_rescales() {
    let v = Vec3::new(30.0, 40.0, 0.0);
    let (out, clamped) = clamp_speed(v, 10.0, 5.0);
    assert!(clamped);
    assert!((out.length() - 5.0).abs() < 1e-5);
    // Direction preserved
    assert!((out.normalize() - v.normalize()).length() < 1e-6);
}

#[test]
fn clamp_target_above_speed_keeps_speed() {
    let v = Vec3::new(0.0, 0.0, -20.0);
    let (out, clamped) = clamp_speed(v, 10.0, 500.0);
    assert!(clamped);
    assert_eq!(out, v);
}
