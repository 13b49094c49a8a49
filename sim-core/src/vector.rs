//! Plain 2-D vector helpers used by the force model and the engine.
//!
//! Every function takes its inputs by value and returns a fresh [`Vec2`];
//! nothing here mutates caller state. Angle queries on a zero-length vector
//! are a caller error and yield NaN.

use glam::Vec2;
use std::f32::consts::PI;

/// Length of `v`.
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Cosine of the angle `v` makes with the x-axis.
#[inline]
pub fn cosine_theta(v: Vec2) -> f32 {
    v.x / magnitude(v)
}

/// Sine of the angle `v` makes with the x-axis.
#[inline]
pub fn sine_theta(v: Vec2) -> f32 {
    v.y / magnitude(v)
}

/// Angle of `v` computed as `atan(y / x)`, so it lies in `(-π/2, π/2)`.
#[inline]
pub fn theta(v: Vec2) -> f32 {
    (v.y / v.x).atan()
}

/// Slope of the line through `(x1, y1)` and `(x2, y2)`.
///
/// Infinite (or NaN) when `x1 == x2`.
#[inline]
pub fn slope(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (y2 - y1) / (x2 - x1)
}

/// Distance between the points `(x1, y1)` and `(x2, y2)`.
#[inline]
pub fn euclidean_distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Distance between two position vectors.
#[inline]
pub fn euclidean_distance_between(a: Vec2, b: Vec2) -> f32 {
    euclidean_distance(a.x, a.y, b.x, b.y)
}

/// Direction of travel from `(x1, y1)` towards `(x2, y2)`.
///
/// Returns `atan(slope)` when the target is to the right and
/// `atan(slope) + π` otherwise, so the result lies in `(-π/2, 3π/2)`.
pub fn euclidean_direction(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let m = slope(x1, y1, x2, y2);
    if x2 > x1 { m.atan() } else { m.atan() + PI }
}

/// Direction of travel from point `a` towards point `b`.
#[inline]
pub fn euclidean_direction_between(a: Vec2, b: Vec2) -> f32 {
    euclidean_direction(a.x, a.y, b.x, b.y)
}

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x + b.x, a.y + b.y)
}

#[inline]
pub fn multiply_scalar(v: Vec2, k: f32) -> Vec2 {
    Vec2::new(v.x * k, v.y * k)
}

/// `v` scaled to unit length. NaN components for a zero vector.
#[inline]
pub fn unit_vector(v: Vec2) -> Vec2 {
    let m = magnitude(v);
    Vec2::new(v.x / m, v.y / m)
}

/// Vector of length `magnitude` pointing along `angle` (radians).
#[inline]
pub fn in_direction(magnitude: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

#[inline]
pub fn dot_product(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    const EPS: f32 = 1e-5;

    #[test]
    fn magnitude_of_3_4_is_5() {
        assert_eq!(magnitude(Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(magnitude(Vec2::ZERO), 0.0);
    }

    #[test]
    fn cosine_and_sine_match_components() {
        let v = Vec2::new(3.0, -4.0);
        assert!((cosine_theta(v) - 0.6).abs() < EPS);
        assert!((sine_theta(v) + 0.8).abs() < EPS);
    }

    #[test]
    fn theta_uses_plain_arctangent() {
        assert!((theta(Vec2::new(1.0, 1.0)) - FRAC_PI_4).abs() < EPS);
        // atan(y/x) folds the left half-plane onto the right one.
        assert!((theta(Vec2::new(-1.0, -1.0)) - FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn distance_entry_points_agree() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(euclidean_distance(1.0, 2.0, 4.0, 6.0), 5.0);
        assert_eq!(euclidean_distance_between(a, b), 5.0);
        assert_eq!(euclidean_distance_between(b, a), 5.0);
    }

    #[test]
    fn direction_covers_both_half_planes() {
        let right = euclidean_direction(0.0, 0.0, 1.0, 1.0);
        assert!((right - FRAC_PI_4).abs() < EPS);

        let left = euclidean_direction_between(Vec2::ZERO, Vec2::new(-1.0, -1.0));
        assert!((left - (FRAC_PI_4 + PI)).abs() < EPS);
    }

    #[test]
    fn slope_is_infinite_on_vertical_line() {
        assert_eq!(slope(0.0, 0.0, 2.0, 4.0), 2.0);
        assert!(slope(1.0, 0.0, 1.0, 3.0).is_infinite());
    }

    #[test]
    fn arithmetic_helpers_return_new_values() {
        let a = Vec2::new(1.0, -2.0);
        let b = Vec2::new(0.5, 4.0);
        assert_eq!(add(a, b), Vec2::new(1.5, 2.0));
        assert_eq!(multiply_scalar(a, -3.0), Vec2::new(-3.0, 6.0));
        assert_eq!(dot_product(a, b), 0.5 - 8.0);
        // inputs are untouched
        assert_eq!(a, Vec2::new(1.0, -2.0));
    }

    #[test]
    fn unit_vector_and_in_direction_are_consistent() {
        let u = unit_vector(Vec2::new(0.0, -7.0));
        assert!((u - Vec2::new(0.0, -1.0)).length() < EPS);

        let v = in_direction(2.0, PI / 2.0);
        assert!((v - Vec2::new(0.0, 2.0)).length() < EPS);
    }
}
