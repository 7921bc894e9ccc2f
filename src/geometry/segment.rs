use crate::math::{intersect_segments, Point3, Vector3};

/// A line segment from `a` to `b` with its squared length precomputed.
///
/// A zero-length segment is allowed; its distance queries degrade to the
/// distance from `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    a: Point3,
    b: Point3,
    ab: Vector3,
    len2: f64,
    inv_len2: f64,
}

impl LineSegment {
    /// Creates a new segment between two points.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        let ab = b - a;
        let len2 = ab.norm_squared();
        Self {
            a,
            b,
            ab,
            len2,
            inv_len2: 1.0 / len2,
        }
    }

    #[must_use]
    pub fn a(&self) -> &Point3 {
        &self.a
    }

    #[must_use]
    pub fn b(&self) -> &Point3 {
        &self.b
    }

    /// Vector from `a` to `b`.
    #[must_use]
    pub fn ab(&self) -> &Vector3 {
        &self.ab
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.len2.sqrt()
    }

    #[must_use]
    pub fn length2(&self) -> f64 {
        self.len2
    }

    /// Squared distance from `p` to the closest point of the segment.
    #[must_use]
    pub fn distance2(&self, p: &Point3) -> f64 {
        let ap = p - self.a;
        let dot = ap.dot(&self.ab);
        if dot <= 0.0 {
            return ap.norm_squared();
        } else if dot >= self.len2 {
            return (p - self.b).norm_squared();
        }
        // Foot of the perpendicular: a + (dot / |ab|^2) * ab.
        (self.a + self.ab * (dot * self.inv_len2) - p).norm_squared()
    }

    /// Distance from `p` to the closest point of the segment.
    #[must_use]
    pub fn distance(&self, p: &Point3) -> f64 {
        self.distance2(p).sqrt()
    }

    /// Intersects with `other` in the XY plane; see [`intersect_segments`].
    #[must_use]
    pub fn intersects(&self, other: &LineSegment) -> Option<(Point3, f64, f64)> {
        intersect_segments(&self.a, &self.b, &other.a, &other.b)
    }
}
