use std::f64::consts::{PI, TAU};

use super::Vector2;

/// 2D cross product `a.x * b.y - a.y * b.x`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed angle from `a` to `b` in `(-PI, PI]`, counter-clockwise positive.
#[must_use]
pub fn signed_angle(a: &Vector2, b: &Vector2) -> f64 {
    cross_2d(a, b).atan2(a.dot(b))
}

/// Clockwise angle from `a` to `b` in `[0, TAU)`.
#[must_use]
pub fn clockwise_angle(a: &Vector2, b: &Vector2) -> f64 {
    normalize_angle(-signed_angle(a, b))
}

/// Wraps an angle into `[0, TAU)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Polar angle of a vector in `(-PI, PI]`.
#[must_use]
pub fn polar_angle(v: &Vector2) -> f64 {
    let angle = v.y.atan2(v.x);
    if angle <= -PI {
        PI
    } else {
        angle
    }
}
