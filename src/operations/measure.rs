//! Distance, projection and slicing queries over raw point sequences.
//!
//! Every function takes a [`CoordinateMode`]. In geodetic mode the inputs are
//! projected into a local ENU frame, the planar algorithm runs there, and any
//! point results are unprojected through the same frame. The frame anchor is
//! fixed per function:
//!
//! | function | anchor |
//! |---|---|
//! | [`ranges`], [`dirs`], [`line_distance`], [`along`], [`point_on_line`], [`line_slice_along`] | `line[0]` |
//! | [`square_distance`], [`distance`] | `b` |
//! | [`point_to_segment_distance`] | `p` |
//! | [`line_slice`] | `start` |
//! | [`interpolate`] | `a` |

use crate::crs::{CoordinateMode, LocalView};
use crate::error::{GeometryError, Result};
use crate::geometry::LineSegment;
use crate::math::{
    ensure_finite, ensure_finite_value, ensure_min_points, try_normalize, Point3, Vector3,
};

/// Closest point on a polyline, as returned by [`point_on_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    /// Closest point on the line.
    pub point: Point3,
    /// Index of the segment holding the closest point.
    pub index: usize,
    /// Parameter along that segment, clamped to `[0, 1]`.
    pub t: f64,
}

fn ensure_line(line: &[Point3]) -> Result<()> {
    ensure_min_points(line, 2)?;
    ensure_finite(line)
}

/// Squared distance between two points.
///
/// # Errors
///
/// Returns an error for non-finite coordinates.
pub fn square_distance(a: &Point3, b: &Point3, mode: CoordinateMode) -> Result<f64> {
    ensure_finite(&[*a, *b])?;
    let view = LocalView::new(std::slice::from_ref(a), b, mode)?;
    let a = view.points()[0];
    match mode {
        CoordinateMode::Planar => Ok((a - b).norm_squared()),
        CoordinateMode::Wgs84 => Ok(a.coords.norm_squared()),
    }
}

/// Distance between two points.
///
/// # Errors
///
/// Returns an error for non-finite coordinates.
pub fn distance(a: &Point3, b: &Point3, mode: CoordinateMode) -> Result<f64> {
    Ok(square_distance(a, b, mode)?.sqrt())
}

/// Cumulative arc length at every point; `ranges[0] == 0`.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite coordinates.
pub fn ranges(line: &[Point3], mode: CoordinateMode) -> Result<Vec<f64>> {
    ensure_line(line)?;
    let view = LocalView::anchored_at_first(line, mode)?;
    Ok(planar_ranges(view.points()))
}

fn planar_ranges(line: &[Point3]) -> Vec<f64> {
    let mut ranges = Vec::with_capacity(line.len());
    let mut acc = 0.0;
    ranges.push(acc);
    for w in line.windows(2) {
        acc += (w[1] - w[0]).norm();
        ranges.push(acc);
    }
    ranges
}

/// Unit direction of every segment, aligned with the points: `dirs[i]` is the
/// direction leaving point `i`, and the last point repeats the direction of
/// the last segment.
///
/// Segments that vanish in the XY plane borrow the direction spanned by the
/// nearest non-degenerate neighbors.
///
/// # Errors
///
/// Returns `GeometryError::Collapsed` when every segment vanishes in the XY
/// plane, or an input error for fewer than two points or non-finite
/// coordinates.
pub fn dirs(line: &[Point3], mode: CoordinateMode) -> Result<Vec<Vector3>> {
    ensure_line(line)?;
    let view = LocalView::anchored_at_first(line, mode)?;
    planar_dirs(view.points())
}

fn planar_dirs(line: &[Point3]) -> Result<Vec<Vector3>> {
    let n = line.len();
    let deltas: Vec<Vector3> = line.windows(2).map(|w| w[1] - w[0]).collect();
    let flat: Vec<bool> = deltas.iter().map(|d| d.xy().norm() == 0.0).collect();
    if flat.iter().all(|&f| f) {
        return Err(GeometryError::Collapsed.into());
    }

    let mut dirs = Vec::with_capacity(n);
    for (i, delta) in deltas.iter().enumerate() {
        if !flat[i] {
            dirs.push(delta / delta.norm());
            continue;
        }
        let right = (i + 1..n - 1).find(|&r| !flat[r]);
        let left = (0..i).rev().find(|&l| !flat[l]);
        let span = if right == Some(i + 1) {
            line[i + 2] - line[i]
        } else {
            // Start of the nearest usable segment on the left, or the first
            // point when everything to the left vanishes too.
            let end = right.map_or(n - 1, |r| r + 1);
            line[end] - line[left.unwrap_or(0)]
        };
        // A line that doubles back onto itself spans nothing; fall back to
        // the nearest usable segment.
        let dir = try_normalize(&span)
            .or_else(|| left.or(right).and_then(|s| try_normalize(&deltas[s])))
            .ok_or(GeometryError::ZeroVector)?;
        dirs.push(dir);
    }
    dirs.push(dirs[n - 2]);
    Ok(dirs)
}

/// Total length of a polyline.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite coordinates.
pub fn line_distance(line: &[Point3], mode: CoordinateMode) -> Result<f64> {
    ensure_line(line)?;
    let view = LocalView::anchored_at_first(line, mode)?;
    Ok(view.points().windows(2).map(|w| (w[1] - w[0]).norm()).sum())
}

/// Point at arc length `dist`, clamped to the ends of the line.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite input.
pub fn along(line: &[Point3], dist: f64, mode: CoordinateMode) -> Result<Point3> {
    ensure_line(line)?;
    ensure_finite_value("dist", dist)?;
    if dist <= 0.0 {
        return Ok(line[0]);
    }
    let view = LocalView::anchored_at_first(line, mode)?;
    view.unproject_point(&planar_along(view.points(), dist))
}

fn planar_along(line: &[Point3], dist: f64) -> Point3 {
    let mut sum = 0.0;
    for w in line.windows(2) {
        let d = (w[1] - w[0]).norm();
        sum += d;
        if sum > dist {
            return lerp(&w[0], &w[1], (dist - (sum - d)) / d);
        }
    }
    line[line.len() - 1]
}

/// Distance from `p` to the segment `a`-`b`.
///
/// # Errors
///
/// Returns an error for non-finite coordinates.
pub fn point_to_segment_distance(
    p: &Point3,
    a: &Point3,
    b: &Point3,
    mode: CoordinateMode,
) -> Result<f64> {
    let pts = [*p, *a, *b];
    ensure_finite(&pts)?;
    let view = LocalView::new(&pts, p, mode)?;
    let local = view.points();
    Ok(LineSegment::new(local[1], local[2]).distance(&local[0]))
}

/// Closest point on `line` to `p`.
///
/// Ties between segments resolve to the lowest segment index.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite coordinates.
pub fn point_on_line(line: &[Point3], p: &Point3, mode: CoordinateMode) -> Result<LineProjection> {
    ensure_line(line)?;
    ensure_finite(std::slice::from_ref(p))?;
    let view = LocalView::anchored_at_first(line, mode)?;
    let mut hit = planar_point_on_line(view.points(), &view.project_point(p)?);
    hit.point = view.unproject_point(&hit.point)?;
    Ok(hit)
}

fn planar_point_on_line(line: &[Point3], p: &Point3) -> LineProjection {
    let mut min_dist = f64::INFINITY;
    let mut best = LineProjection {
        point: line[0],
        index: 0,
        t: 0.0,
    };
    for (i, w) in line.windows(2).enumerate() {
        let ab = w[1] - w[0];
        let mut t = 0.0;
        let mut pp = w[0];
        if ab != Vector3::zeros() {
            t = ab.dot(&(p - w[0])) / ab.norm_squared();
            if t > 1.0 {
                pp = w[1];
            } else if t > 0.0 {
                pp += ab * t;
            }
        }
        let sq_dist = (pp - p).norm_squared();
        if sq_dist < min_dist {
            min_dist = sq_dist;
            best = LineProjection {
                point: pp,
                index: i,
                t,
            };
        }
    }
    best.t = best.t.clamp(0.0, 1.0);
    best
}

/// Part of `line` between the projections of `start` and `stop`.
///
/// The projections are reordered along the line when `stop` comes first, and
/// no vertex is repeated where a boundary falls on an existing vertex.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite coordinates.
pub fn line_slice(
    start: &Point3,
    stop: &Point3,
    line: &[Point3],
    mode: CoordinateMode,
) -> Result<Vec<Point3>> {
    ensure_line(line)?;
    ensure_finite(&[*start, *stop])?;
    let view = LocalView::new(line, start, mode)?;
    let slice = planar_line_slice(
        &view.project_point(start)?,
        &view.project_point(stop)?,
        view.points(),
    );
    view.unproject(slice)
}

fn planar_line_slice(start: &Point3, stop: &Point3, line: &[Point3]) -> Vec<Point3> {
    let mut p1 = planar_point_on_line(line, start);
    let mut p2 = planar_point_on_line(line, stop);
    if p1.index > p2.index || (p1.index == p2.index && p1.t > p2.t) {
        std::mem::swap(&mut p1, &mut p2);
    }

    let mut slice = vec![p1.point];
    let l = p1.index + 1;
    let r = p2.index;
    if line[l] != slice[0] && l <= r {
        slice.push(line[l]);
    }
    for vertex in line.iter().take(r + 1).skip(l + 1) {
        slice.push(*vertex);
    }
    if line[r] != p2.point {
        slice.push(p2.point);
    }
    slice
}

/// Part of `line` between arc lengths `start` and `stop`.
///
/// `stop` is expected to be reachable walking forward from `start`. A
/// `start` past the end of the line yields an empty slice.
///
/// # Errors
///
/// Returns an error for fewer than two points or non-finite input.
pub fn line_slice_along(
    start: f64,
    stop: f64,
    line: &[Point3],
    mode: CoordinateMode,
) -> Result<Vec<Point3>> {
    ensure_line(line)?;
    ensure_finite_value("start", start)?;
    ensure_finite_value("stop", stop)?;
    let view = LocalView::anchored_at_first(line, mode)?;
    view.unproject(planar_line_slice_along(start, stop, view.points()))
}

fn planar_line_slice_along(start: f64, stop: f64, line: &[Point3]) -> Vec<Point3> {
    let mut sum = 0.0;
    let mut slice = Vec::new();
    for w in line.windows(2) {
        let (p0, p1) = (&w[0], &w[1]);
        let d = (p1 - p0).norm();
        sum += d;
        let param = |at: f64| if d > 0.0 { (at - (sum - d)) / d } else { 0.0 };

        if sum > start && slice.is_empty() {
            slice.push(lerp(p0, p1, param(start)));
        }
        if sum >= stop {
            slice.push(lerp(p0, p1, param(stop)));
            return slice;
        }
        if sum > start {
            slice.push(*p1);
        }
    }
    slice
}

/// Linear interpolation between `a` and `b`; `t` outside `[0, 1]`
/// extrapolates. Geodetic points are blended in ENU, not in degrees.
///
/// # Errors
///
/// Returns an error for non-finite input.
pub fn interpolate(a: &Point3, b: &Point3, t: f64, mode: CoordinateMode) -> Result<Point3> {
    ensure_finite_value("t", t)?;
    let pts = [*a, *b];
    ensure_finite(&pts)?;
    let view = LocalView::new(&pts, a, mode)?;
    let local = view.points();
    view.unproject_point(&lerp(&local[0], &local[1], t))
}

fn lerp(a: &Point3, b: &Point3, t: f64) -> Point3 {
    a + (b - a) * t
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{InputError, RulerError};
    use approx::assert_relative_eq;

    const PLANAR: CoordinateMode = CoordinateMode::Planar;
    const WGS84: CoordinateMode = CoordinateMode::Wgs84;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn l_shape() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(3.0, 4.0, 0.0)]
    }

    fn geo_line() -> Vec<Point3> {
        vec![
            p(120.0, 30.0, 0.0),
            p(120.001, 30.0, 0.0),
            p(120.001, 30.001, 5.0),
            p(120.003, 30.002, 5.0),
        ]
    }

    #[test]
    fn ranges_of_l_shape() {
        assert_eq!(ranges(&l_shape(), PLANAR).unwrap(), vec![0.0, 3.0, 7.0]);
        assert_eq!(line_distance(&l_shape(), PLANAR).unwrap(), 7.0);
    }

    #[test]
    fn geodetic_ranges_end_at_line_distance() {
        let r = ranges(&geo_line(), WGS84).unwrap();
        assert_eq!(r[0], 0.0);
        assert!(r.windows(2).all(|w| w[0] <= w[1]));
        assert_relative_eq!(r[3], line_distance(&geo_line(), WGS84).unwrap(), max_relative = 1e-12);
        // 0.001 degree of longitude at 30N is roughly 96 meters.
        assert!((r[1] - 96.4).abs() < 0.5, "r1={}", r[1]);
    }

    #[test]
    fn too_few_points_is_an_error() {
        let err = ranges(&[p(0.0, 0.0, 0.0)], PLANAR).unwrap_err();
        assert_eq!(
            err,
            RulerError::Input(InputError::TooFewPoints {
                required: 2,
                actual: 1
            })
        );
        assert!(line_distance(&[], PLANAR).is_err());
    }

    #[test]
    fn dirs_are_point_aligned() {
        let d = dirs(&l_shape(), PLANAR).unwrap();
        assert_eq!(d, vec![Vector3::x(), Vector3::y(), Vector3::y()]);
    }

    #[test]
    fn dirs_skip_duplicate_vertices() {
        let line = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
        ];
        let d = dirs(&line, PLANAR).unwrap();
        assert_eq!(d.len(), 4);
        assert_eq!(d[0], Vector3::x());
        // Degenerate middle segment uses the span to the next usable vertex.
        assert_eq!(d[1], Vector3::y());
        assert_eq!(d[2], Vector3::y());
        assert_eq!(d[3], Vector3::y());
    }

    #[test]
    fn dirs_with_degenerate_tail_look_left() {
        let line = vec![p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 0.0, 1.0)];
        let d = dirs(&line, PLANAR).unwrap();
        // The vertical tail borrows the span from the last usable segment start.
        let expected = Vector3::new(2.0, 0.0, 1.0).normalize();
        assert!((d[1] - expected).norm() < 1e-12);
        assert!(d.iter().all(|v| (v.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn dirs_with_degenerate_head() {
        let line = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(0.0, 5.0, 0.0)];
        let d = dirs(&line, PLANAR).unwrap();
        assert!(d.iter().all(|v| (v - Vector3::y()).norm() < 1e-12));
    }

    #[test]
    fn dirs_of_line_doubling_back_stay_unit() {
        let line = vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 0.0, 0.0),
        ];
        let d = dirs(&line, PLANAR).unwrap();
        assert_eq!(
            d,
            vec![Vector3::x(), Vector3::x(), -Vector3::x(), -Vector3::x(), -Vector3::x()]
        );
        assert!(d.iter().all(|v| (v.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn collapsed_polyline_is_an_error() {
        let line = vec![p(1.0, 1.0, 0.0), p(1.0, 1.0, 5.0), p(1.0, 1.0, 9.0)];
        assert_eq!(
            dirs(&line, PLANAR).unwrap_err(),
            RulerError::Geometry(GeometryError::Collapsed)
        );
    }

    #[test]
    fn square_distance_planar_and_geodetic() {
        assert_eq!(square_distance(&p(0.0, 0.0, 0.0), &p(3.0, 4.0, 0.0), PLANAR).unwrap(), 25.0);
        assert_eq!(distance(&p(0.0, 0.0, 0.0), &p(3.0, 4.0, 0.0), PLANAR).unwrap(), 5.0);
        let a = p(120.0, 30.0, 0.0);
        let b = p(120.0, 30.001, 0.0);
        let d = distance(&a, &b, WGS84).unwrap();
        assert!((d - 110.85).abs() < 0.1, "d={d}");
    }

    #[test]
    fn along_clamps_and_interpolates() {
        assert_eq!(along(&l_shape(), -1.0, PLANAR).unwrap(), p(0.0, 0.0, 0.0));
        assert_eq!(along(&l_shape(), 1.5, PLANAR).unwrap(), p(1.5, 0.0, 0.0));
        assert_eq!(along(&l_shape(), 3.0, PLANAR).unwrap(), p(3.0, 0.0, 0.0));
        assert_eq!(along(&l_shape(), 5.0, PLANAR).unwrap(), p(3.0, 2.0, 0.0));
        assert_eq!(along(&l_shape(), 100.0, PLANAR).unwrap(), p(3.0, 4.0, 0.0));
    }

    #[test]
    fn geodetic_along_lands_on_line() {
        let line = geo_line();
        let total = line_distance(&line, WGS84).unwrap();
        let end = along(&line, total * 2.0, WGS84).unwrap();
        assert!((end - line[3]).norm() < 1e-9);
        let mid = along(&line, 50.0, WGS84).unwrap();
        assert_relative_eq!(mid.y, 30.0, epsilon = 1e-12);
        assert!(mid.x > 120.0 && mid.x < 120.001);
    }

    #[test]
    fn point_to_segment_distance_planar() {
        let d = point_to_segment_distance(
            &p(5.0, 4.0, 0.0),
            &p(0.0, 0.0, 0.0),
            &p(10.0, 0.0, 0.0),
            PLANAR,
        )
        .unwrap();
        assert_eq!(d, 4.0);
    }

    #[test]
    fn point_to_segment_distance_geodetic() {
        let a = p(120.0, 30.0, 0.0);
        let b = p(120.002, 30.0, 0.0);
        let q = p(120.001, 30.001, 0.0);
        let d = point_to_segment_distance(&q, &a, &b, WGS84).unwrap();
        assert!((d - 110.85).abs() < 0.1, "d={d}");
    }

    #[test]
    fn point_on_line_picks_nearest_segment() {
        let hit = point_on_line(&l_shape(), &p(4.0, 2.0, 0.0), PLANAR).unwrap();
        assert_eq!(hit.point, p(3.0, 2.0, 0.0));
        assert_eq!(hit.index, 1);
        assert_eq!(hit.t, 0.5);

        let before = point_on_line(&l_shape(), &p(-2.0, 1.0, 0.0), PLANAR).unwrap();
        assert_eq!(before.point, p(0.0, 0.0, 0.0));
        assert_eq!(before.index, 0);
        assert_eq!(before.t, 0.0);
    }

    #[test]
    fn point_on_line_ties_prefer_lowest_index() {
        // (3, 0) is shared by both segments.
        let hit = point_on_line(&l_shape(), &p(4.0, -1.0, 0.0), PLANAR).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.t, 1.0);
    }

    #[test]
    fn point_on_line_is_no_farther_than_any_vertex() {
        let line = geo_line();
        let q = p(120.002, 30.0, 0.0);
        let hit = point_on_line(&line, &q, WGS84).unwrap();
        let d_hit = distance(&hit.point, &q, WGS84).unwrap();
        for v in &line {
            assert!(d_hit <= distance(v, &q, WGS84).unwrap() + 1e-9);
        }
    }

    #[test]
    fn line_slice_between_projections() {
        let slice = line_slice(&p(1.0, 1.0, 0.0), &p(4.0, 2.0, 0.0), &l_shape(), PLANAR).unwrap();
        assert_eq!(slice, vec![p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(3.0, 2.0, 0.0)]);
    }

    #[test]
    fn line_slice_swaps_reversed_bounds() {
        let forward = line_slice(&p(1.0, 1.0, 0.0), &p(4.0, 2.0, 0.0), &l_shape(), PLANAR).unwrap();
        let reversed = line_slice(&p(4.0, 2.0, 0.0), &p(1.0, 1.0, 0.0), &l_shape(), PLANAR).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn line_slice_does_not_duplicate_vertices() {
        let slice = line_slice(&p(3.0, -1.0, 0.0), &p(4.0, 4.0, 0.0), &l_shape(), PLANAR).unwrap();
        assert_eq!(slice, vec![p(3.0, 0.0, 0.0), p(3.0, 4.0, 0.0)]);
    }

    #[test]
    fn line_slice_within_one_segment() {
        let slice = line_slice(&p(1.5, 1.0, 0.0), &p(0.75, -1.0, 0.0), &l_shape(), PLANAR).unwrap();
        assert_eq!(slice, vec![p(0.75, 0.0, 0.0), p(1.5, 0.0, 0.0)]);
    }

    #[test]
    fn line_slice_along_by_arc_length() {
        let slice = line_slice_along(1.0, 5.0, &l_shape(), PLANAR).unwrap();
        assert_eq!(slice, vec![p(1.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(3.0, 2.0, 0.0)]);
    }

    #[test]
    fn line_slice_along_past_end_is_empty() {
        assert!(line_slice_along(10.0, 20.0, &l_shape(), PLANAR).unwrap().is_empty());
        let line = geo_line();
        let beyond = line_distance(&line, WGS84).unwrap() + 10.0;
        assert!(line_slice_along(beyond, beyond + 10.0, &line, WGS84).unwrap().is_empty());
    }

    #[test]
    fn geodetic_line_slice_anchored_at_start() {
        let line = geo_line();
        let start = p(120.0005, 30.0001, 0.0);
        let stop = p(120.002, 30.0016, 5.0);
        let slice = line_slice(&start, &stop, &line, WGS84).unwrap();
        assert_eq!(slice.len(), 4);
        // Interior vertices come back as the original coordinates.
        assert!((slice[1] - line[1]).norm() < 1e-9);
        assert!((slice[2] - line[2]).norm() < 1e-9);
        // Both ends lie on the line.
        for end in [slice[0], slice[3]] {
            let hit = point_on_line(&line, &end, WGS84).unwrap();
            assert!(distance(&hit.point, &end, WGS84).unwrap() < 1e-6, "{end}");
        }
        assert!((slice[0].y - 30.0).abs() < 1e-9);
        assert!((slice[0].x - 120.0005).abs() < 1e-9);
    }

    #[test]
    fn geodetic_line_slice_along_keeps_vertices() {
        let line = geo_line();
        let r = ranges(&line, WGS84).unwrap();
        let slice = line_slice_along(10.0, r[2] + 10.0, &line, WGS84).unwrap();
        assert_eq!(slice.len(), 4);
        assert!((slice[1] - line[1]).norm() < 1e-9);
        assert!((slice[2] - line[2]).norm() < 1e-9);
    }

    #[test]
    fn interpolate_endpoints() {
        let a = p(120.0, 30.0, 10.0);
        let b = p(120.01, 30.02, 20.0);
        for mode in [PLANAR, WGS84] {
            let at0 = interpolate(&a, &b, 0.0, mode).unwrap();
            let at1 = interpolate(&a, &b, 1.0, mode).unwrap();
            assert!((at0 - a).norm() < 1e-9, "{mode:?}");
            assert!((at1 - b).norm() < 1e-9, "{mode:?}");
        }
        let mid = interpolate(&a, &b, 0.5, PLANAR).unwrap();
        assert!((mid - p(120.005, 30.01, 15.0)).norm() < 1e-9);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut line = l_shape();
        line[1].y = f64::NAN;
        assert_eq!(
            ranges(&line, PLANAR).unwrap_err(),
            RulerError::Input(InputError::NonFinite { index: 1 })
        );
        assert!(along(&l_shape(), f64::NAN, PLANAR).is_err());
        assert!(interpolate(&line[0], &line[2], f64::INFINITY, PLANAR).is_err());
    }
}
