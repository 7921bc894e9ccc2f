use crate::crs::{cheap_ruler_k, t_ecef_enu_at, CoordinateMode};
use crate::error::{GeometryError, InputError, Result, RulerError};
use crate::math::{
    arange, ensure_finite, ensure_finite_value, ensure_min_points, try_normalize, Matrix4, Point3,
    Vector3,
};
use crate::operations::measure::{self, LineProjection};

/// Half width used by [`PolylineRuler::scanline`] callers that have no
/// preference.
pub const DEFAULT_SCANLINE_HALF_WIDTH: f64 = 5.0;

/// Positions and directions sampled along a polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arrows {
    /// Arc lengths that were sampled.
    pub ranges: Vec<f64>,
    /// Point at each arc length.
    pub positions: Vec<Point3>,
    /// Unit tangent at each arc length.
    pub directions: Vec<Vector3>,
}

/// Arc-length parametrization of an immutable polyline.
///
/// Cumulative ranges and per-point directions are computed once on
/// construction; every query afterwards only reads them, so a ruler can be
/// shared between threads.
///
/// A polyline whose segments all vanish in the XY plane has no direction.
/// Such a ruler still answers range and position queries, while direction
/// queries fail with [`GeometryError::Collapsed`].
#[derive(Debug, Clone)]
pub struct PolylineRuler {
    polyline: Vec<Point3>,
    mode: CoordinateMode,
    k: Vector3,
    ranges: Vec<f64>,
    dirs: Option<Vec<Vector3>>,
}

impl PolylineRuler {
    /// Creates a ruler over `polyline`.
    ///
    /// # Errors
    ///
    /// Returns an error for fewer than two points or non-finite coordinates.
    pub fn new(polyline: Vec<Point3>, mode: CoordinateMode) -> Result<Self> {
        ensure_min_points(&polyline, 2)?;
        ensure_finite(&polyline)?;
        let k = match mode {
            CoordinateMode::Planar => Vector3::repeat(1.0),
            CoordinateMode::Wgs84 => cheap_ruler_k(polyline[0].y),
        };
        let ranges = measure::ranges(&polyline, mode)?;
        let dirs = match measure::dirs(&polyline, mode) {
            Ok(dirs) => Some(dirs),
            Err(RulerError::Geometry(GeometryError::Collapsed)) => {
                tracing::debug!(points = polyline.len(), "polyline collapsed under plane-xy");
                None
            }
            Err(err) => return Err(err),
        };
        tracing::debug!(
            points = polyline.len(),
            ?mode,
            length = ranges[ranges.len() - 1],
            "built polyline ruler"
        );
        Ok(Self {
            polyline,
            mode,
            k,
            ranges,
            dirs,
        })
    }

    /// The points of the polyline.
    #[must_use]
    pub fn polyline(&self) -> &[Point3] {
        &self.polyline
    }

    /// Number of points.
    #[must_use]
    pub fn n(&self) -> usize {
        self.polyline.len()
    }

    #[must_use]
    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    #[must_use]
    pub fn is_wgs84(&self) -> bool {
        self.mode.is_wgs84()
    }

    /// Per-axis scale factors at the first point's latitude in geodetic mode,
    /// ones in planar mode.
    #[must_use]
    pub fn k(&self) -> Vector3 {
        self.k
    }

    /// Cumulative arc length at every point.
    #[must_use]
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Arc length at point `point_index`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::IndexOutOfRange` for an index past the last point.
    pub fn range(&self, point_index: usize) -> Result<f64> {
        self.ranges
            .get(point_index)
            .copied()
            .ok_or_else(|| index_error(point_index, self.n()))
    }

    /// Arc length at parameter `t` of segment `segment_index`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::IndexOutOfRange` for an index past the last segment.
    pub fn range_at(&self, segment_index: usize, t: f64) -> Result<f64> {
        self.check_segment(segment_index)?;
        let r0 = self.ranges[segment_index];
        let r1 = self.ranges[segment_index + 1];
        Ok(r0 * (1.0 - t) + r1 * t)
    }

    /// Total length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.ranges[self.ranges.len() - 1]
    }

    /// Index of the segment holding arc length `range`, clamped to the first
    /// and last segment.
    #[must_use]
    pub fn segment_index(&self, range: f64) -> usize {
        let upper = self.ranges.partition_point(|&r| r <= range);
        upper.saturating_sub(1).min(self.n() - 2)
    }

    /// Segment index and parameter for arc length `range`. Outside the line
    /// the parameter extends past `[0, 1]` on the boundary segment.
    #[must_use]
    pub fn segment_index_t(&self, range: f64) -> (usize, f64) {
        let i = self.segment_index(range);
        let seg = self.ranges[i + 1] - self.ranges[i];
        let t = if seg > 0.0 {
            (range - self.ranges[i]) / seg
        } else {
            0.0
        };
        (i, t)
    }

    /// Unit direction at every point.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Collapsed` if the polyline has no direction.
    pub fn dirs(&self) -> Result<&[Vector3]> {
        self.dirs
            .as_deref()
            .ok_or_else(|| GeometryError::Collapsed.into())
    }

    /// Direction leaving point `point_index`.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or a collapsed polyline.
    pub fn dir_at_index(&self, point_index: usize) -> Result<Vector3> {
        self.dirs()?
            .get(point_index)
            .copied()
            .ok_or_else(|| index_error(point_index, self.n()))
    }

    /// Tangent at arc length `range`.
    ///
    /// On an interior vertex with `smooth_joint`, the tangent is the
    /// normalized sum of the incoming and outgoing directions.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range or a collapsed polyline.
    pub fn dir(&self, range: f64, smooth_joint: bool) -> Result<Vector3> {
        ensure_finite_value("range", range)?;
        let dirs = self.dirs()?;
        if range <= 0.0 {
            return Ok(dirs[0]);
        }
        let n = self.n();
        // ranges[0] == 0 < range, so at least one entry precedes `range`.
        let i = (self.ranges.partition_point(|&r| r < range) - 1).min(n - 1);
        if smooth_joint && i + 1 < n && self.ranges[i + 1] == range {
            if let Some(dir) = try_normalize(&(dirs[i] + dirs[i + 1])) {
                return Ok(dir);
            }
        }
        Ok(dirs[i])
    }

    /// Point at arc length `range`. Ranges outside `[0, length]` are
    /// extrapolated along the first or last segment instead of clamped.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range.
    pub fn extended_along(&self, range: f64) -> Result<Point3> {
        ensure_finite_value("range", range)?;
        let n = self.n();
        let (i, t) = if range <= 0.0 {
            (0, ratio(range, self.ranges[1]))
        } else if range >= self.length() {
            let i = n - 2;
            (i, ratio(range - self.ranges[i], self.ranges[i + 1] - self.ranges[i]))
        } else {
            let i = self.ranges.partition_point(|&r| r < range) - 1;
            (i, ratio(range - self.ranges[i], self.ranges[i + 1] - self.ranges[i]))
        };
        self.at_segment(i, t)
    }

    /// Point at arc length `range`, located through [`Self::segment_index_t`].
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range.
    pub fn at(&self, range: f64) -> Result<Point3> {
        ensure_finite_value("range", range)?;
        let (i, t) = self.segment_index_t(range);
        self.at_segment(i, t)
    }

    /// Point `point_index` of the polyline.
    ///
    /// # Errors
    ///
    /// Returns `InputError::IndexOutOfRange` for an index past the last point.
    pub fn at_index(&self, point_index: usize) -> Result<Point3> {
        self.polyline
            .get(point_index)
            .copied()
            .ok_or_else(|| index_error(point_index, self.n()))
    }

    /// Point at parameter `t` of segment `segment_index`.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or non-finite `t`.
    pub fn at_segment(&self, segment_index: usize, t: f64) -> Result<Point3> {
        self.check_segment(segment_index)?;
        measure::interpolate(
            &self.polyline[segment_index],
            &self.polyline[segment_index + 1],
            t,
            self.mode,
        )
    }

    /// Position and tangent at arc length `range`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range or a collapsed polyline.
    pub fn arrow(&self, range: f64, smooth_joint: bool) -> Result<(Point3, Vector3)> {
        Ok((self.extended_along(range)?, self.dir(range, smooth_joint)?))
    }

    /// Position at parameter `t` of segment `segment_index`, with that
    /// segment's direction.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index or a collapsed polyline.
    pub fn arrow_at_segment(&self, segment_index: usize, t: f64) -> Result<(Point3, Vector3)> {
        let pos = self.at_segment(segment_index, t)?;
        Ok((pos, self.dir_at_index(segment_index)?))
    }

    /// Arrows at each of `ranges`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range or a collapsed polyline.
    pub fn arrows(&self, ranges: &[f64], smooth_joint: bool) -> Result<Arrows> {
        let mut arrows = Arrows {
            ranges: ranges.to_vec(),
            positions: Vec::with_capacity(ranges.len()),
            directions: Vec::with_capacity(ranges.len()),
        };
        for &range in ranges {
            let (pos, dir) = self.arrow(range, smooth_joint)?;
            arrows.positions.push(pos);
            arrows.directions.push(dir);
        }
        Ok(arrows)
    }

    /// Arrows every `step` from the start, optionally closing with one at the
    /// exact end of the line.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive step or a collapsed polyline.
    pub fn arrows_by_step(&self, step: f64, with_last: bool, smooth_joint: bool) -> Result<Arrows> {
        self.arrows(&arange(0.0, self.length(), step, with_last)?, smooth_joint)
    }

    /// Cross section at arc length `range`: the points `min` and `max` units
    /// along the left-hand normal. In geodetic mode the offsets are in meters.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite input, a collapsed polyline, or a
    /// vertical tangent.
    pub fn scanline(
        &self,
        range: f64,
        min: f64,
        max: f64,
        smooth_joint: bool,
    ) -> Result<(Point3, Point3)> {
        ensure_finite_value("min", min)?;
        ensure_finite_value("max", max)?;
        let pos = self.extended_along(range)?;
        let dir = self.dir(range, smooth_joint)?;
        let mut left =
            try_normalize(&Vector3::new(-dir.y, dir.x, 0.0)).ok_or(GeometryError::ZeroVector)?;
        if self.is_wgs84() {
            left.component_div_assign(&self.k);
        }
        Ok((pos + left * min, pos + left * max))
    }

    /// Frenet-like frame at arc length `range`: x forward, y left, z up.
    ///
    /// In planar mode the translation is the position on the line. In
    /// geodetic mode the frame is composed with the ENU-to-ECEF transform at
    /// that position, so it maps local coordinates to ECEF.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite range, a collapsed polyline, or a
    /// vertical tangent.
    pub fn local_frame(&self, range: f64, smooth_joint: bool) -> Result<Matrix4> {
        let x = self.dir(range, smooth_joint)?;
        let y = try_normalize(&Vector3::z().cross(&x)).ok_or(GeometryError::ZeroVector)?;
        let z = x.cross(&y);
        let mut t_world_local = Matrix4::identity();
        t_world_local.fixed_view_mut::<3, 1>(0, 0).copy_from(&x);
        t_world_local.fixed_view_mut::<3, 1>(0, 1).copy_from(&y);
        t_world_local.fixed_view_mut::<3, 1>(0, 2).copy_from(&z);
        let pos = self.extended_along(range)?;
        match self.mode {
            CoordinateMode::Planar => {
                t_world_local.fixed_view_mut::<3, 1>(0, 3).copy_from(&pos.coords);
                Ok(t_world_local)
            }
            CoordinateMode::Wgs84 => Ok(t_ecef_enu_at(&pos) * t_world_local),
        }
    }

    /// Total length, recomputed from the points.
    ///
    /// # Errors
    ///
    /// Propagates projection errors.
    pub fn line_distance(&self) -> Result<f64> {
        measure::line_distance(&self.polyline, self.mode)
    }

    /// Point at arc length `dist`, clamped to the ends.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite distance.
    pub fn along(&self, dist: f64) -> Result<Point3> {
        measure::along(&self.polyline, dist, self.mode)
    }

    /// Closest point on the polyline to `p`.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite point.
    pub fn point_on_line(&self, p: &Point3) -> Result<LineProjection> {
        measure::point_on_line(&self.polyline, p, self.mode)
    }

    /// Part of the polyline between the projections of `start` and `stop`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite points.
    pub fn line_slice(&self, start: &Point3, stop: &Point3) -> Result<Vec<Point3>> {
        measure::line_slice(start, stop, &self.polyline, self.mode)
    }

    /// Part of the polyline between arc lengths `start` and `stop`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite bounds.
    pub fn line_slice_along(&self, start: f64, stop: f64) -> Result<Vec<Point3>> {
        measure::line_slice_along(start, stop, &self.polyline, self.mode)
    }

    fn check_segment(&self, segment_index: usize) -> Result<()> {
        if segment_index + 1 < self.n() {
            Ok(())
        } else {
            Err(index_error(segment_index, self.n() - 1))
        }
    }
}

fn index_error(index: usize, len: usize) -> RulerError {
    InputError::IndexOutOfRange { index, len }.into()
}

// Zero-length boundary segments stay on their start point instead of
// producing NaN.
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}
