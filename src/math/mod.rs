pub mod intersect_2d;
pub mod sequence;

pub use intersect_2d::{intersect_segments, intersect_segments_2d};
pub use sequence::{arange, mask_to_indexes, select_by_mask};

use crate::error::{InputError, Result};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 rotation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Fails with [`InputError::NonFinite`] on the first point carrying a NaN or
/// infinite component.
///
/// # Errors
///
/// Returns an error naming the index of the offending point.
pub fn ensure_finite(points: &[Point3]) -> Result<()> {
    match points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        Some(index) => Err(InputError::NonFinite { index }.into()),
        None => Ok(()),
    }
}

/// Fails with [`InputError::TooFewPoints`] when `points` has fewer than
/// `required` entries.
///
/// # Errors
///
/// Returns an error carrying the required and actual counts.
pub fn ensure_min_points(points: &[Point3], required: usize) -> Result<()> {
    if points.len() < required {
        return Err(InputError::TooFewPoints {
            required,
            actual: points.len(),
        }
        .into());
    }
    Ok(())
}

/// Fails with [`InputError::ParameterOutOfRange`] for a NaN or infinite
/// scalar argument.
///
/// # Errors
///
/// Returns an error naming the parameter.
pub fn ensure_finite_value(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::ParameterOutOfRange { parameter, value }.into())
    }
}

/// Normalizes `v`, returning `None` for a zero (or non-finite) length.
#[must_use]
pub fn try_normalize(v: &Vector3) -> Option<Vector3> {
    let len = v.norm();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}
