use glam::DVec2;

/// The turn `p -> q -> r` makes. `Collinear` propagates through callers: it
/// is treated as neither a strict clockwise nor counter-clockwise turn, so
/// predicate loops terminate on it rather than looping forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Sign of the 2D cross product of `(p - q)` and `(p - r)`.
pub fn orientation(p: DVec2, q: DVec2, r: DVec2) -> Orientation {
    let v1 = p - q;
    let v2 = p - r;
    let d = v1.x * v2.y - v1.y * v2.x;
    if d < 0.0 {
        Orientation::Clockwise
    } else if d > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// `true` iff `d` lies strictly inside the circumcircle of the
/// counter-clockwise triangle `a, b, c`. Returns `false` on the cocircular
/// boundary.
pub fn in_circle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> bool {
    let adx = a.x - d.x;
    let ady = a.y - d.y;
    let bdx = b.x - d.x;
    let bdy = b.y - d.y;
    let cdx = c.x - d.x;
    let cdy = c.y - d.y;

    let ap = adx * adx + ady * ady;
    let bp = bdx * bdx + bdy * bdy;
    let cp = cdx * cdx + cdy * cdy;

    let det =
        adx * (bdy * cp - bp * cdy) - ady * (bdx * cp - bp * cdx) + ap * (bdx * cdy - bdy * cdx);
    det > 0.0
}

/// `in_circle`, normalized for the orientation of `a, b, c`: if `o` is
/// counter-clockwise this is exactly `in_circle`; otherwise `b` and `c` are
/// swapped so the triangle passed to `in_circle` is always wound
/// counter-clockwise.
pub fn in_circle_oriented(a: DVec2, b: DVec2, c: DVec2, d: DVec2, o: Orientation) -> bool {
    if o == Orientation::CounterClockwise {
        in_circle(a, b, c, d)
    } else {
        in_circle(a, c, b, d)
    }
}

/// Cosine between `(p - anchor)` and `reference`, used to rank seam
/// candidates by angular proximity to the base edge. Larger is "more
/// aligned with `reference`".
pub fn angular_rank(p: DVec2, reference: DVec2, anchor: DVec2) -> f64 {
    let v = p - anchor;
    v.dot(reference) / (v.length() * reference.length())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_detects_all_three_cases() {
        let a = DVec2::new(0.0, 0.0);
        let b = DVec2::new(1.0, 0.0);
        assert_eq!(
            orientation(a, b, DVec2::new(0.0, 1.0)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(a, b, DVec2::new(0.0, -1.0)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(a, b, DVec2::new(2.0, 0.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn in_circle_center_point_is_inside() {
        let a = DVec2::new(1.0, 0.0);
        let b = DVec2::new(0.0, 1.0);
        let c = DVec2::new(-1.0, 0.0);
        assert!(in_circle(a, b, c, DVec2::new(0.0, 0.0)));
        assert!(!in_circle(a, b, c, DVec2::new(0.0, -1.0)));
    }

    #[test]
    fn in_circle_rejects_exact_cocircular_point() {
        // Four points on the unit circle: the fourth is on the boundary,
        // never strictly inside.
        let a = DVec2::new(1.0, 0.0);
        let b = DVec2::new(0.0, 1.0);
        let c = DVec2::new(-1.0, 0.0);
        let d = DVec2::new(0.0, -1.0);
        assert!(!in_circle(a, b, c, d));
    }

    #[test]
    fn in_circle_oriented_swaps_on_clockwise() {
        let a = DVec2::new(1.0, 0.0);
        let b = DVec2::new(-1.0, 0.0);
        let c = DVec2::new(0.0, 1.0);
        let d = DVec2::new(0.0, 0.0);
        // a, c, b is the counter-clockwise winding of this triangle.
        assert_eq!(
            in_circle_oriented(a, b, c, d, Orientation::Clockwise),
            in_circle(a, c, b, d)
        );
    }
}
