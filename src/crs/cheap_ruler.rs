//! Flat-earth approximation of geodesic measurements.
//!
//! Distances are computed in a local linear approximation whose scale factors
//! depend only on the reference latitude. Accurate to well under a percent for
//! spans up to a few hundred kilometers, and much faster than ellipsoidal
//! formulas.

use crate::math::{Point3, Vector3};

/// Distance unit produced by a [`CheapRuler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    Kilometers,
    Miles,
    NauticalMiles,
    #[default]
    Meters,
    Metres,
    Yards,
    Feet,
    Inches,
}

impl Unit {
    /// Number of this unit in one kilometer.
    #[must_use]
    pub fn per_kilometer(self) -> f64 {
        match self {
            Unit::Kilometers => 1.0,
            Unit::Miles => 1000.0 / 1609.344,
            Unit::NauticalMiles => 1000.0 / 1852.0,
            Unit::Meters | Unit::Metres => 1000.0,
            Unit::Yards => 1000.0 / 0.9144,
            Unit::Feet => 1000.0 / 0.3048,
            Unit::Inches => 1000.0 / 0.0254,
        }
    }
}

/// Result of [`CheapRuler::point_on_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOnLine {
    /// Closest point on the line.
    pub point: Point3,
    /// Index of the segment holding the closest point.
    pub index: usize,
    /// Parameter along that segment, clamped to `[0, 1]`.
    pub t: f64,
}

/// Per-latitude scale factors for fast approximate geodesy on WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheapRuler {
    k: Vector3,
}

impl CheapRuler {
    /// Equatorial radius in kilometers.
    pub const RE: f64 = 6378.137;
    /// Flattening.
    pub const FE: f64 = 1.0 / 298.257_223_563;
    /// First eccentricity squared.
    pub const E2: f64 = Self::FE * (2.0 - Self::FE);
    /// Degrees to radians.
    pub const RAD: f64 = std::f64::consts::PI / 180.0;

    /// Creates a ruler for the given reference latitude (degrees).
    #[must_use]
    pub fn new(latitude: f64, unit: Unit) -> Self {
        Self {
            k: Self::k_for(latitude, unit),
        }
    }

    /// Scale factors `(kx, ky, kz)`: units per degree of longitude, units per
    /// degree of latitude, and units per meter of altitude.
    #[must_use]
    pub fn k_for(latitude: f64, unit: Unit) -> Vector3 {
        let m = Self::RAD * Self::RE * unit.per_kilometer();
        let coslat = (latitude * Self::RAD).cos();
        let w2 = 1.0 / (1.0 - Self::E2 * (1.0 - coslat * coslat));
        let w = w2.sqrt();
        Vector3::new(
            m * w * coslat,
            m * w * w2 * (1.0 - Self::E2),
            unit.per_kilometer() / 1000.0,
        )
    }

    /// Scale factors of this ruler.
    #[must_use]
    pub fn k(&self) -> Vector3 {
        self.k
    }

    /// Approximate 3D distance between two `(lon, lat, alt)` points.
    #[must_use]
    pub fn distance(&self, a: &Point3, b: &Point3) -> f64 {
        self.delta(a, b).norm()
    }

    /// Bearing from `a` to `b` in degrees, clockwise from north.
    #[must_use]
    pub fn bearing(&self, a: &Point3, b: &Point3) -> f64 {
        let d = self.delta(b, a);
        d.x.atan2(d.y) / Self::RAD
    }

    /// Point reached by travelling `dist` along `bearing` (degrees) from `p`.
    /// Altitude is carried over unchanged.
    #[must_use]
    pub fn destination(&self, p: &Point3, dist: f64, bearing: f64) -> Point3 {
        let a = bearing * Self::RAD;
        self.offset(p, a.sin() * dist, a.cos() * dist)
    }

    /// Offsets `p` by `dx` east and `dy` north.
    #[must_use]
    pub fn offset(&self, p: &Point3, dx: f64, dy: f64) -> Point3 {
        Point3::new(p.x + dx / self.k.x, p.y + dy / self.k.y, p.z)
    }

    /// Sum of segment distances along `line`.
    #[must_use]
    pub fn line_distance(&self, line: &[Point3]) -> f64 {
        line.windows(2).map(|w| self.distance(&w[0], &w[1])).sum()
    }

    /// Area of a polygon given as rings; the first ring is the outer
    /// boundary, the rest are holes.
    #[must_use]
    pub fn area(&self, rings: &[Vec<Point3>]) -> f64 {
        let mut sum = 0.0;
        for (i, ring) in rings.iter().enumerate() {
            let n = ring.len();
            if n == 0 {
                continue;
            }
            let mut ring_sum = 0.0;
            let mut k = n - 1;
            for j in 0..n {
                ring_sum += wrap(ring[j].x - ring[k].x) * (ring[j].y + ring[k].y);
                k = j;
            }
            sum += if i == 0 { ring_sum } else { -ring_sum };
        }
        (sum.abs() / 2.0) * self.k.x * self.k.y
    }

    /// Closest point on `line` to `p`, measured in the horizontal plane.
    ///
    /// Returns `None` for a line with fewer than two points.
    #[must_use]
    pub fn point_on_line(&self, line: &[Point3], p: &Point3) -> Option<PointOnLine> {
        let mut best: Option<(f64, PointOnLine)> = None;
        for (i, w) in line.windows(2).enumerate() {
            let mut x = w[0].x;
            let mut y = w[0].y;
            let mut z = w[0].z;
            let dx = wrap(w[1].x - x) * self.k.x;
            let dy = (w[1].y - y) * self.k.y;
            let mut t = 0.0;
            if dx != 0.0 || dy != 0.0 {
                t = (wrap(p.x - x) * self.k.x * dx + (p.y - y) * self.k.y * dy)
                    / (dx * dx + dy * dy);
                if t > 1.0 {
                    x = w[1].x;
                    y = w[1].y;
                    z = w[1].z;
                } else if t > 0.0 {
                    x += dx / self.k.x * t;
                    y += dy / self.k.y * t;
                    z += (w[1].z - w[0].z) * t;
                }
            }
            let ex = wrap(p.x - x) * self.k.x;
            let ey = (p.y - y) * self.k.y;
            let sq_dist = ex * ex + ey * ey;
            if best.as_ref().is_none_or(|(d, _)| sq_dist < *d) {
                best = Some((
                    sq_dist,
                    PointOnLine {
                        point: Point3::new(x, y, z),
                        index: i,
                        t: t.clamp(0.0, 1.0),
                    },
                ));
            }
        }
        best.map(|(_, hit)| hit)
    }

    fn delta(&self, a: &Point3, b: &Point3) -> Vector3 {
        Vector3::new(
            wrap(a.x - b.x) * self.k.x,
            (a.y - b.y) * self.k.y,
            (a.z - b.z) * self.k.z,
        )
    }
}

/// Scale factors in meters for the given latitude.
#[must_use]
pub fn cheap_ruler_k(latitude: f64) -> Vector3 {
    CheapRuler::k_for(latitude, Unit::Meters)
}

/// Wraps a longitude difference into `[-180, 180]`. Values already in range,
/// and non-finite values, are returned unchanged.
fn wrap(deg: f64) -> f64 {
    if !deg.is_finite() || (-180.0..=180.0).contains(&deg) {
        return deg;
    }
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    // Positive odd multiples of 180 land on -180; keep them on +180.
    if wrapped == -180.0 && deg > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn k_at_equator() {
        let k = cheap_ruler_k(0.0);
        // One degree of longitude at the equator is about 111.32 km.
        assert!((k.x - 111_319.49).abs() < 1.0, "kx={}", k.x);
        assert!((k.y - 110_574.27).abs() < 1.0, "ky={}", k.y);
        assert_relative_eq!(k.z, 1.0);
    }

    #[test]
    fn k_shrinks_with_latitude() {
        let k0 = cheap_ruler_k(0.0);
        let k60 = cheap_ruler_k(60.0);
        assert!(k60.x < k0.x * 0.51);
        assert!(k60.y > k0.y);
    }

    #[test]
    fn unit_scaling() {
        let km = CheapRuler::k_for(45.0, Unit::Kilometers);
        let m = CheapRuler::k_for(45.0, Unit::Meters);
        assert_relative_eq!(km.x * 1000.0, m.x, max_relative = 1e-12);
        assert_relative_eq!(
            CheapRuler::k_for(45.0, Unit::Metres).y,
            m.y,
            max_relative = 1e-12
        );
    }

    #[test]
    fn distance_and_bearing() {
        let ruler = CheapRuler::new(45.0, Unit::Meters);
        let a = Point3::new(120.0, 45.0, 0.0);
        let north = Point3::new(120.0, 45.001, 0.0);
        let east = Point3::new(120.001, 45.0, 0.0);
        assert_relative_eq!(ruler.distance(&a, &north), ruler.k().y * 0.001, max_relative = 1e-9);
        assert_relative_eq!(ruler.bearing(&a, &north), 0.0, epsilon = 1e-9);
        assert_relative_eq!(ruler.bearing(&a, &east), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn destination_inverts_bearing_and_distance() {
        let ruler = CheapRuler::new(30.0, Unit::Meters);
        let p = Point3::new(10.0, 30.0, 5.0);
        let q = ruler.destination(&p, 1000.0, 30.0);
        assert_relative_eq!(ruler.distance(&p, &q), 1000.0, max_relative = 1e-9);
        assert_relative_eq!(ruler.bearing(&p, &q), 30.0, epsilon = 1e-9);
        assert_relative_eq!(q.z, 5.0);
    }

    #[test]
    fn distance_wraps_antimeridian() {
        let ruler = CheapRuler::new(0.0, Unit::Meters);
        let a = Point3::new(179.9995, 0.0, 0.0);
        let b = Point3::new(-179.9995, 0.0, 0.0);
        assert_relative_eq!(ruler.distance(&a, &b), ruler.k().x * 0.001, max_relative = 1e-6);
    }

    #[test]
    fn square_area() {
        let ruler = CheapRuler::new(0.0, Unit::Meters);
        let ring = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.01, 0.0, 0.0),
            Point3::new(0.01, 0.01, 0.0),
            Point3::new(0.0, 0.01, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ];
        let expected = 0.01 * ruler.k().x * 0.01 * ruler.k().y;
        assert_relative_eq!(ruler.area(&[ring]), expected, max_relative = 1e-9);
    }

    #[test]
    fn point_on_line_projects_onto_segment() {
        let ruler = CheapRuler::new(0.0, Unit::Meters);
        let line = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.01, 0.0, 10.0)];
        let hit = ruler
            .point_on_line(&line, &Point3::new(0.005, 0.001, 0.0))
            .unwrap();
        assert_eq!(hit.index, 0);
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-9);
        assert_relative_eq!(hit.point.x, 0.005, epsilon = 1e-12);
        assert_relative_eq!(hit.point.z, 5.0, epsilon = 1e-6);
        assert!(ruler.point_on_line(&line[..1], &line[0]).is_none());
    }

    #[test]
    fn wrap_longitude_differences() {
        assert_eq!(wrap(0.0), 0.0);
        assert_eq!(wrap(180.0), 180.0);
        assert_eq!(wrap(-180.0), -180.0);
        assert_eq!(wrap(190.0), -170.0);
        assert_eq!(wrap(-190.0), 170.0);
        assert_eq!(wrap(540.0), 180.0);
        assert_eq!(wrap(-540.0), -180.0);
        assert_eq!(wrap(720.0), 0.0);
        assert_eq!(wrap(f64::INFINITY), f64::INFINITY);
        assert!(wrap(f64::NAN).is_nan());
        let huge = wrap(1e20);
        assert!((-180.0..=180.0).contains(&huge), "wrapped={huge}");
    }

    #[test]
    fn extreme_longitudes_terminate() {
        let ruler = CheapRuler::new(0.0, Unit::Meters);
        let origin = Point3::new(0.0, 0.0, 0.0);
        let d = ruler.distance(&Point3::new(1e20, 0.0, 0.0), &origin);
        assert!(d.is_finite() && d <= 180.0 * ruler.k().x, "d={d}");
        let far = Point3::new(f64::INFINITY, 0.0, 0.0);
        assert!(ruler.distance(&origin, &far).is_infinite());
        assert_relative_eq!(ruler.bearing(&origin, &far), 90.0, epsilon = 1e-9);
        let line = [origin, Point3::new(1e20, 0.0, 0.0)];
        assert!(ruler.point_on_line(&line, &origin).is_some());
    }
}
