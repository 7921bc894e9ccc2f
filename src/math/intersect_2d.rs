use super::{Point2, Point3};

/// Bounded segment-segment intersection in the XY plane.
///
/// Solves `a1 + t * (a2 - a1) = b1 + s * (b2 - b1)` and returns
/// `(intersection_point, t, s)` with both parameters in `[0, 1]`.
///
/// Parallel segments (zero determinant) yield `None`, including collinear
/// overlapping ones: overlap is not reported.
#[must_use]
pub fn intersect_segments_2d(
    a1: &Point2,
    a2: &Point2,
    b1: &Point2,
    b2: &Point2,
) -> Option<(Point2, f64, f64)> {
    let s1 = a2 - a1;
    let s2 = b2 - b1;

    let div = s1.x * s2.y - s2.x * s1.y;
    if div == 0.0 {
        return None;
    }
    let inv = 1.0 / div;

    let dx = a1.x - b1.x;
    let dy = a1.y - b1.y;
    let s = (-s1.y * dx + s1.x * dy) * inv;
    if !(0.0..=1.0).contains(&s) {
        return None;
    }
    let t = (s2.x * dy - s2.y * dx) * inv;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some((Point2::new(a1.x + t * s1.x, a1.y + t * s1.y), t, s))
}

/// Segment-segment intersection of 3D segments, solved in the XY plane.
///
/// The returned `z` is the mean of both segments' heights at their respective
/// intersection parameters.
#[must_use]
pub fn intersect_segments(
    a1: &Point3,
    a2: &Point3,
    b1: &Point3,
    b2: &Point3,
) -> Option<(Point3, f64, f64)> {
    let (pt, t, s) = intersect_segments_2d(&a1.xy(), &a2.xy(), &b1.xy(), &b2.xy())?;
    let ha = a1.z * (1.0 - t) + a2.z * t;
    let hb = b1.z * (1.0 - s) + b2.z * s;
    Some((Point3::new(pt.x, pt.y, (ha + hb) / 2.0), t, s))
}
