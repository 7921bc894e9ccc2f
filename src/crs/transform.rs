use crate::error::{InputError, Result};
use crate::math::{ensure_finite, transform_point, Matrix3, Matrix4, Point3, Vector3};

use super::cheap_ruler::cheap_ruler_k;
use super::EnuMethod;

/// Default chunk size for [`apply_transform_inplace`].
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257_223_563,
    };

    #[must_use]
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    #[must_use]
    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - 1.0 / self.inv_flattening)
    }

    /// First eccentricity squared.
    #[must_use]
    pub fn e2(&self) -> f64 {
        let f = 1.0 / self.inv_flattening;
        f * (2.0 - f)
    }

    /// Second eccentricity squared.
    #[must_use]
    pub fn ep2(&self) -> f64 {
        let a = self.semimajor;
        let b = self.semiminor();
        (a * a - b * b) / (b * b)
    }

    fn lla_to_ecef(&self, lla: &Point3) -> Point3 {
        let (sin_lon, cos_lon) = lla.x.to_radians().sin_cos();
        let (sin_lat, cos_lat) = lla.y.to_radians().sin_cos();
        let e2 = self.e2();
        let n = self.semimajor / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        Point3::new(
            (n + lla.z) * cos_lat * cos_lon,
            (n + lla.z) * cos_lat * sin_lon,
            (n * (1.0 - e2) + lla.z) * sin_lat,
        )
    }

    // Bowring's closed form; height uses the projection onto the normal so it
    // stays well conditioned at the poles.
    fn ecef_to_lla(&self, ecef: &Point3) -> Point3 {
        let a = self.semimajor;
        let b = self.semiminor();
        let e2 = self.e2();
        let p = ecef.x.hypot(ecef.y);
        let theta = (ecef.z * a).atan2(p * b);
        let (sin_t, cos_t) = theta.sin_cos();
        let lon = ecef.y.atan2(ecef.x);
        let lat = (ecef.z + self.ep2() * b * sin_t.powi(3)).atan2(p - e2 * a * cos_t.powi(3));
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let alt = p * cos_lat + ecef.z * sin_lat - a * a / n;
        Point3::new(lon.to_degrees(), lat.to_degrees(), alt)
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

fn ensure_batch(points: &[Point3]) -> Result<()> {
    if points.is_empty() {
        return Err(InputError::EmptyBatch.into());
    }
    ensure_finite(points)
}

/// Converts one geodetic `(lon, lat, alt)` point to ECEF.
///
/// # Errors
///
/// Returns `InputError::NonFinite` for NaN or infinite input.
pub fn lla2ecef(lon: f64, lat: f64, alt: f64) -> Result<Point3> {
    let lla = Point3::new(lon, lat, alt);
    ensure_finite(std::slice::from_ref(&lla))?;
    Ok(Datum::WGS84.lla_to_ecef(&lla))
}

/// Converts a batch of geodetic points to ECEF.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn lla2ecef_batch(llas: &[Point3]) -> Result<Vec<Point3>> {
    ensure_batch(llas)?;
    Ok(llas.iter().map(|p| Datum::WGS84.lla_to_ecef(p)).collect())
}

/// Converts one ECEF point to geodetic `(lon, lat, alt)`.
///
/// # Errors
///
/// Returns `InputError::NonFinite` for NaN or infinite input.
pub fn ecef2lla(x: f64, y: f64, z: f64) -> Result<Point3> {
    let ecef = Point3::new(x, y, z);
    ensure_finite(std::slice::from_ref(&ecef))?;
    Ok(Datum::WGS84.ecef_to_lla(&ecef))
}

/// Converts a batch of ECEF points to geodetic coordinates.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn ecef2lla_batch(ecefs: &[Point3]) -> Result<Vec<Point3>> {
    ensure_batch(ecefs)?;
    Ok(ecefs.iter().map(|p| Datum::WGS84.ecef_to_lla(p)).collect())
}

/// Converts geodetic points to East-North-Up meters around `anchor`, which
/// defaults to the first point.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates (including
/// the anchor).
pub fn lla2enu(llas: &[Point3], anchor: Option<&Point3>, method: EnuMethod) -> Result<Vec<Point3>> {
    ensure_batch(llas)?;
    let anchor = *anchor.unwrap_or(&llas[0]);
    ensure_finite(std::slice::from_ref(&anchor))?;
    match method {
        EnuMethod::CheapRuler => {
            let k = cheap_ruler_k(anchor.y);
            Ok(llas
                .iter()
                .map(|p| Point3::from((p - anchor).component_mul(&k)))
                .collect())
        }
        EnuMethod::Exact => ecef2enu(&lla2ecef_batch(llas)?, Some(&anchor), EnuMethod::Exact),
    }
}

/// Converts East-North-Up meters around `anchor` back to geodetic points.
/// Exact inverse of [`lla2enu`] for the same anchor and method.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn enu2lla(enus: &[Point3], anchor: &Point3, method: EnuMethod) -> Result<Vec<Point3>> {
    ensure_batch(enus)?;
    ensure_finite(std::slice::from_ref(anchor))?;
    match method {
        EnuMethod::CheapRuler => {
            let k = cheap_ruler_k(anchor.y);
            Ok(enus
                .iter()
                .map(|p| anchor + p.coords.component_div(&k))
                .collect())
        }
        EnuMethod::Exact => ecef2lla_batch(&enu2ecef(enus, anchor, EnuMethod::Exact)?),
    }
}

/// Converts East-North-Up meters around `anchor` to ECEF.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn enu2ecef(enus: &[Point3], anchor: &Point3, method: EnuMethod) -> Result<Vec<Point3>> {
    match method {
        EnuMethod::CheapRuler => lla2ecef_batch(&enu2lla(enus, anchor, EnuMethod::CheapRuler)?),
        EnuMethod::Exact => {
            ensure_finite(std::slice::from_ref(anchor))?;
            apply_transform(&t_ecef_enu_at(anchor), enus)
        }
    }
}

/// Converts ECEF points to East-North-Up meters around `anchor`, which
/// defaults to the geodetic position of the first point.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn ecef2enu(ecefs: &[Point3], anchor: Option<&Point3>, method: EnuMethod) -> Result<Vec<Point3>> {
    ensure_batch(ecefs)?;
    let anchor = match anchor {
        Some(anchor) => *anchor,
        None => Datum::WGS84.ecef_to_lla(&ecefs[0]),
    };
    match method {
        EnuMethod::CheapRuler => lla2enu(&ecef2lla_batch(ecefs)?, Some(&anchor), EnuMethod::CheapRuler),
        EnuMethod::Exact => {
            ensure_finite(std::slice::from_ref(&anchor))?;
            apply_transform(&t_enu_ecef_at(&anchor), ecefs)
        }
    }
}

/// Rotation taking ENU axes at `(lon, lat)` to ECEF axes. Columns are the
/// east, north and up unit vectors expressed in ECEF.
#[must_use]
pub fn r_ecef_enu(lon: f64, lat: f64) -> Matrix3 {
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
    Matrix3::from_columns(&[east, north, up])
}

/// Homogeneous transform taking ENU coordinates at `(lon, lat, alt)` to ECEF.
#[must_use]
pub fn t_ecef_enu(lon: f64, lat: f64, alt: f64) -> Matrix4 {
    let mut t = Matrix4::identity();
    t.fixed_view_mut::<3, 3>(0, 0).copy_from(&r_ecef_enu(lon, lat));
    let origin = Datum::WGS84.lla_to_ecef(&Point3::new(lon, lat, alt));
    t.fixed_view_mut::<3, 1>(0, 3).copy_from(&origin.coords);
    t
}

/// [`t_ecef_enu`] for a `(lon, lat, alt)` point.
#[must_use]
pub fn t_ecef_enu_at(lla: &Point3) -> Matrix4 {
    t_ecef_enu(lla.x, lla.y, lla.z)
}

// Rigid inverse of `t_ecef_enu_at`: [R^T, -R^T t].
fn t_enu_ecef_at(lla: &Point3) -> Matrix4 {
    let r_t = r_ecef_enu(lla.x, lla.y).transpose();
    let origin = Datum::WGS84.lla_to_ecef(lla);
    let mut t = Matrix4::identity();
    t.fixed_view_mut::<3, 3>(0, 0).copy_from(&r_t);
    t.fixed_view_mut::<3, 1>(0, 3).copy_from(&(-(r_t * origin.coords)));
    t
}

/// Applies a homogeneous transform to every point.
///
/// # Errors
///
/// Returns an error for an empty batch or non-finite coordinates.
pub fn apply_transform(t: &Matrix4, points: &[Point3]) -> Result<Vec<Point3>> {
    let mut out = points.to_vec();
    apply_transform_inplace(t, &mut out, DEFAULT_BATCH_SIZE)?;
    Ok(out)
}

/// Applies a homogeneous transform to every point in place, walking the
/// buffer `batch_size` points at a time. The chunk size does not affect the
/// result.
///
/// # Errors
///
/// Returns an error for an empty batch, non-finite coordinates, or a zero
/// `batch_size`.
pub fn apply_transform_inplace(t: &Matrix4, points: &mut [Point3], batch_size: usize) -> Result<()> {
    if batch_size == 0 {
        return Err(InputError::ParameterOutOfRange {
            parameter: "batch_size",
            value: 0.0,
        }
        .into());
    }
    ensure_batch(points)?;
    for chunk in points.chunks_mut(batch_size) {
        for p in chunk.iter_mut() {
            *p = transform_point(t, p);
        }
    }
    Ok(())
}
