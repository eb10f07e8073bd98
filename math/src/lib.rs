//! Small float geometry helpers shared by the map, gameplay and raycasting
//! crates.

mod angle;
mod intercept;

pub use angle::*;
use glam::Vec2;
pub use intercept::*;

/// Default relative tolerance used by `nearly_equal`
pub const REL_EPSILON: f32 = 128.0 * f32::EPSILON;
/// Absolute tolerance for the orientation predicate. Map coordinates are whole
/// cells, so anything this close to zero is a rounding artifact.
pub const COLLINEAR_EPSILON: f32 = 1.0e-6;

/// Relative + absolute float comparison with the default tolerances.
#[inline]
pub fn nearly_equal(a: f32, b: f32) -> bool {
    nearly_equal_eps(a, b, REL_EPSILON, f32::MIN_POSITIVE)
}

/// `a` and `b` are equal if their difference is below `epsilon` scaled by
/// their magnitude, or below `abs_th` when both are close to zero.
#[inline]
pub fn nearly_equal_eps(a: f32, b: f32, epsilon: f32, abs_th: f32) -> bool {
    debug_assert!(epsilon >= f32::EPSILON && epsilon < 1.0);
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    let norm = (a.abs() + b.abs()).min(f32::MAX);
    diff < abs_th.max(epsilon * norm)
}

/// Rotate `v` by the angle whose sine and cosine are given
#[inline]
pub fn rotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Signed distance of `point` from the infinite line through `l1`-`l2`.
/// Positive on the side the line's left-hand normal faces when walking from
/// `l1` to `l2` in a y-down frame.
#[inline]
pub fn distance_from_line(l1: Vec2, l2: Vec2, point: Vec2) -> f32 {
    let line = l2 - l1;
    line.perp_dot(l1 - point) / line.length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn near_equality() {
        assert!(nearly_equal(1.0, 1.0 + f32::EPSILON));
        assert!(!nearly_equal(1.0, 1.001));
        assert!(nearly_equal(0.0, 0.0));
        assert!(nearly_equal_eps(1.0e-7, 0.0, REL_EPSILON, COLLINEAR_EPSILON));
        assert!(!nearly_equal_eps(1.0e-3, 0.0, REL_EPSILON, COLLINEAR_EPSILON));
    }

    #[test]
    fn rotate_quarter_turns() {
        let v = Vec2::new(1.0, 0.0);
        let (s, c) = FRAC_PI_2.sin_cos();
        let r = rotate(v, s, c);
        assert!((r - Vec2::new(0.0, 1.0)).length() < 1e-6);
        let (s, c) = (-FRAC_PI_2).sin_cos();
        let r = rotate(v, s, c);
        assert!((r - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn distance_in_front_of_plane() {
        // Viewer at origin looking down +x: plane runs from (0,-1) to (0,1)
        let d = distance_from_line(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0), Vec2::new(3.0, 7.0));
        assert!((d - 3.0).abs() < 1e-6);
        let d = distance_from_line(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0), Vec2::new(-2.0, 0.0));
        assert!((d + 2.0).abs() < 1e-6);
    }
}
