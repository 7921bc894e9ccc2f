use crate::crs::{CoordinateMode, LocalView};
use crate::error::{InputError, Result};
use crate::geometry::LineSegment;
use crate::math::{ensure_finite, mask_to_indexes, select_by_mask, Point2, Point3};

/// Douglas-Peucker simplification of an open polyline.
///
/// A point is dropped when it lies within `epsilon` of the chord joining the
/// nearest kept points on either side. Endpoints are always kept. Geodetic
/// input is simplified in a local ENU frame anchored at the first point, so
/// `epsilon` is in meters.
///
/// # Algorithm
///
/// 1. Keep both ends of the range `[i, j]`.
/// 2. Find the interior point farthest from segment `(i, j)`.
/// 3. If it is within `epsilon`, drop every interior point; otherwise keep it
///    and repeat on `[i, k]` and `[k, j]`.
///
/// The recursive and explicit-stack variants mark the same points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DouglasPeucker {
    epsilon: f64,
    mode: CoordinateMode,
    recursive: bool,
}

impl Default for DouglasPeucker {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            mode: CoordinateMode::Planar,
            recursive: true,
        }
    }
}

impl DouglasPeucker {
    /// Creates a planar, recursive simplifier with tolerance `epsilon`.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Default::default()
        }
    }

    /// Replaces the coordinate mode.
    #[must_use]
    pub fn with_mode(mut self, mode: CoordinateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Chooses between the recursive and the explicit-stack variant.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    #[must_use]
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Marks the points to keep.
    ///
    /// # Errors
    ///
    /// - `InputError::ParameterOutOfRange` for a negative or NaN epsilon
    /// - `InputError::NonFinite` for non-finite coordinates
    pub fn mask(&self, points: &[Point3]) -> Result<Vec<bool>> {
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(InputError::ParameterOutOfRange {
                parameter: "epsilon",
                value: self.epsilon,
            }
            .into());
        }
        if points.is_empty() {
            return Ok(Vec::new());
        }
        ensure_finite(points)?;

        let view = LocalView::anchored_at_first(points, self.mode)?;
        let coords = view.points();
        let epsilon2 = self.epsilon * self.epsilon;
        let mut mask = vec![false; coords.len()];
        let last = coords.len() - 1;
        if self.recursive {
            mark_recursive(coords, &mut mask, 0, last, epsilon2);
        } else {
            mark_with_stack(coords, &mut mask, last, epsilon2);
        }

        tracing::debug!(
            input = points.len(),
            kept = mask.iter().filter(|keep| **keep).count(),
            epsilon = self.epsilon,
            mode = ?self.mode,
            "douglas-peucker simplified polyline"
        );
        Ok(mask)
    }

    /// Indexes of the kept points, ascending.
    ///
    /// # Errors
    ///
    /// See [`Self::mask`].
    pub fn indexes(&self, points: &[Point3]) -> Result<Vec<usize>> {
        Ok(mask_to_indexes(&self.mask(points)?))
    }

    /// The kept points, in order.
    ///
    /// # Errors
    ///
    /// See [`Self::mask`].
    pub fn simplify(&self, points: &[Point3]) -> Result<Vec<Point3>> {
        Ok(select_by_mask(points, &self.mask(points)?))
    }

    /// [`Self::mask`] for 2D points, taken at `z = 0`.
    ///
    /// # Errors
    ///
    /// See [`Self::mask`].
    pub fn mask_2d(&self, points: &[Point2]) -> Result<Vec<bool>> {
        let lifted: Vec<Point3> = points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();
        self.mask(&lifted)
    }

    /// [`Self::indexes`] for 2D points.
    ///
    /// # Errors
    ///
    /// See [`Self::mask`].
    pub fn indexes_2d(&self, points: &[Point2]) -> Result<Vec<usize>> {
        Ok(mask_to_indexes(&self.mask_2d(points)?))
    }

    /// [`Self::simplify`] for 2D points.
    ///
    /// # Errors
    ///
    /// See [`Self::mask`].
    pub fn simplify_2d(&self, points: &[Point2]) -> Result<Vec<Point2>> {
        Ok(select_by_mask(points, &self.mask_2d(points)?))
    }
}

/// Keep-mask of a Douglas-Peucker pass with tolerance `epsilon`.
///
/// # Errors
///
/// See [`DouglasPeucker::mask`].
pub fn douglas_simplify_mask(
    points: &[Point3],
    epsilon: f64,
    mode: CoordinateMode,
) -> Result<Vec<bool>> {
    DouglasPeucker::new(epsilon).with_mode(mode).mask(points)
}

/// Indexes kept by a Douglas-Peucker pass with tolerance `epsilon`.
///
/// # Errors
///
/// See [`DouglasPeucker::mask`].
pub fn douglas_simplify_indexes(
    points: &[Point3],
    epsilon: f64,
    mode: CoordinateMode,
) -> Result<Vec<usize>> {
    DouglasPeucker::new(epsilon).with_mode(mode).indexes(points)
}

/// Points kept by a Douglas-Peucker pass with tolerance `epsilon`.
///
/// # Errors
///
/// See [`DouglasPeucker::mask`].
pub fn douglas_simplify(
    points: &[Point3],
    epsilon: f64,
    mode: CoordinateMode,
) -> Result<Vec<Point3>> {
    DouglasPeucker::new(epsilon).with_mode(mode).simplify(points)
}

/// Interior point of `[i, j]` farthest from segment `(i, j)` and its squared
/// distance. Ties keep the lowest index; `(i, 0.0)` when nothing deviates.
fn farthest(coords: &[Point3], i: usize, j: usize) -> (usize, f64) {
    let chord = LineSegment::new(coords[i], coords[j]);
    let mut max_dist2 = 0.0;
    let mut max_index = i;
    for (k, p) in coords.iter().enumerate().take(j).skip(i + 1) {
        let dist2 = chord.distance2(p);
        if dist2 > max_dist2 {
            max_dist2 = dist2;
            max_index = k;
        }
    }
    (max_index, max_dist2)
}

fn mark_recursive(coords: &[Point3], mask: &mut [bool], i: usize, j: usize, epsilon2: f64) {
    mask[i] = true;
    mask[j] = true;
    if j - i <= 1 {
        return;
    }
    let (k, dist2) = farthest(coords, i, j);
    if dist2 <= epsilon2 {
        return;
    }
    mark_recursive(coords, mask, i, k, epsilon2);
    mark_recursive(coords, mask, k, j, epsilon2);
}

fn mark_with_stack(coords: &[Point3], mask: &mut [bool], last: usize, epsilon2: f64) {
    let mut stack = vec![(0, last)];
    while let Some((i, j)) = stack.pop() {
        mask[i] = true;
        mask[j] = true;
        if j - i <= 1 {
            continue;
        }
        let (k, dist2) = farthest(coords, i, j);
        if dist2 > epsilon2 {
            stack.push((k, j));
            stack.push((i, k));
        }
    }
}
