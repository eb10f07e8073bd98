use glam::Vec2;

use crate::{COLLINEAR_EPSILON, nearly_equal, nearly_equal_eps};

/// Turn direction of the ordered triple `(p, q, r)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Cross-product sign of `(q - p) x (r - q)`. Values within
/// `COLLINEAR_EPSILON` of zero count as collinear.
#[inline]
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if nearly_equal_eps(val, 0.0, COLLINEAR_EPSILON, COLLINEAR_EPSILON) {
        return Orientation::Collinear;
    }
    if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Given collinear `p`, `q`, `r`, true if `q` lies on the segment `p`-`r`.
/// Bounds are compared with `nearly_equal` so axis aligned segments sharing an
/// x or y coordinate are not missed.
#[inline]
fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    let within = |v: f32, a: f32, b: f32| {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        (v > lo || nearly_equal(v, lo)) && (v < hi || nearly_equal(v, hi))
    };
    within(q.x, p.x, r.x) && within(q.y, p.y, r.y)
}

/// True if segment `a`-`b` touches segment `c`-`d`
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Orientation::Collinear && on_segment(a, c, b))
        || (o2 == Orientation::Collinear && on_segment(a, d, b))
        || (o3 == Orientation::Collinear && on_segment(c, a, d))
        || (o4 == Orientation::Collinear && on_segment(c, b, d))
}

/// Point where the infinite lines through `a`-`b` and `c`-`d` cross. `None`
/// for parallel (or coincident) lines.
pub fn line_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = a1 * a.x + b1 * a.y;

    let a2 = d.y - c.y;
    let b2 = c.x - d.x;
    let c2 = a2 * c.x + b2 * c.y;

    let determinant = a1 * b2 - a2 * b1;
    if nearly_equal(determinant, 0.0) {
        return None;
    }
    Some(Vec2::new(
        (b2 * c1 - b1 * c2) / determinant,
        (a1 * c2 - a2 * c1) / determinant,
    ))
}

/// Crossing point of the two segments, if they cross. Parallel segments
/// never produce a point, even when collinear and overlapping.
#[inline]
pub fn segment_intersection(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Option<Vec2> {
    if !segments_intersect(a, b, c, d) {
        return None;
    }
    line_intersection(a, b, c, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_diagonals() {
        let p = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((p - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn parallel_segments_miss() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        let c = Vec2::new(0.0, 1.0);
        let d = Vec2::new(1.0, 1.0);
        assert!(!segments_intersect(a, b, c, d));
        assert!(segment_intersection(a, b, c, d).is_none());
    }

    #[test]
    fn collinear_overlap_has_no_point() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        let c = Vec2::new(1.0, 0.0);
        let d = Vec2::new(2.0, 0.0);
        assert!(segments_intersect(a, b, c, d));
        assert!(segment_intersection(a, b, c, d).is_none());
    }

    #[test]
    fn touching_endpoint_on_axis_aligned_edge() {
        // Probe ends exactly on a vertical wall edge
        let p = segment_intersection(
            Vec2::new(0.5, 0.5),
            Vec2::new(2.0, 0.5),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
        )
        .unwrap();
        assert!((p - Vec2::new(2.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn disjoint_segments_miss() {
        assert!(
            segment_intersection(
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 5.0),
            )
            .is_none()
        );
    }

    #[test]
    fn orientation_signs() {
        let p = Vec2::ZERO;
        let q = Vec2::new(1.0, 0.0);
        assert_eq!(orientation(p, q, Vec2::new(2.0, 0.0)), Orientation::Collinear);
        assert_eq!(
            orientation(p, q, Vec2::new(1.0, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(orientation(p, q, Vec2::new(1.0, -1.0)), Orientation::Clockwise);
    }
}
