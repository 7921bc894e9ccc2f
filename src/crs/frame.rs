use std::borrow::Cow;

use crate::error::Result;
use crate::math::Point3;

use super::transform::{enu2lla, lla2enu};
use super::{CoordinateMode, EnuMethod};

/// A local East-North-Up tangent plane anchored at a fixed geodetic point.
///
/// Geodetic queries project their inputs through one frame, run the planar
/// algorithm, and unproject the results through the same frame. Keeping the
/// anchor in one value makes it impossible to unproject with a different
/// anchor than the one used to project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuFrame {
    anchor: Point3,
    method: EnuMethod,
}

impl EnuFrame {
    /// Creates a cheap-ruler frame anchored at `anchor` (`lon, lat, alt`).
    #[must_use]
    pub fn new(anchor: Point3) -> Self {
        Self {
            anchor,
            method: EnuMethod::default(),
        }
    }

    /// Replaces the conversion method.
    #[must_use]
    pub fn with_method(mut self, method: EnuMethod) -> Self {
        self.method = method;
        self
    }

    /// Anchor of the frame.
    #[must_use]
    pub fn anchor(&self) -> &Point3 {
        &self.anchor
    }

    /// Conversion method of the frame.
    #[must_use]
    pub fn method(&self) -> EnuMethod {
        self.method
    }

    /// Projects geodetic points into the frame.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty batch or non-finite coordinates.
    pub fn project(&self, llas: &[Point3]) -> Result<Vec<Point3>> {
        tracing::trace!(anchor = ?self.anchor, count = llas.len(), "projecting to enu");
        lla2enu(llas, Some(&self.anchor), self.method)
    }

    /// Projects a single geodetic point into the frame.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite coordinates.
    pub fn project_point(&self, lla: &Point3) -> Result<Point3> {
        Ok(self.project(std::slice::from_ref(lla))?[0])
    }

    /// Unprojects frame coordinates back to geodetic points.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty batch or non-finite coordinates.
    pub fn unproject(&self, enus: &[Point3]) -> Result<Vec<Point3>> {
        enu2lla(enus, &self.anchor, self.method)
    }

    /// Unprojects a single frame point back to a geodetic point.
    ///
    /// # Errors
    ///
    /// Returns an error for non-finite coordinates.
    pub fn unproject_point(&self, enu: &Point3) -> Result<Point3> {
        Ok(self.unproject(std::slice::from_ref(enu))?[0])
    }
}

/// A point sequence viewed in a planar working frame.
///
/// In planar mode the input is borrowed as is. In geodetic mode it is
/// projected into an [`EnuFrame`] at the given anchor, and every result must
/// be brought back through [`LocalView::unproject_point`] or
/// [`LocalView::unproject`].
#[derive(Debug, Clone)]
pub(crate) struct LocalView<'a> {
    frame: Option<EnuFrame>,
    points: Cow<'a, [Point3]>,
}

impl<'a> LocalView<'a> {
    pub(crate) fn new(points: &'a [Point3], anchor: &Point3, mode: CoordinateMode) -> Result<Self> {
        match mode {
            CoordinateMode::Planar => Ok(Self {
                frame: None,
                points: Cow::Borrowed(points),
            }),
            CoordinateMode::Wgs84 => {
                let frame = EnuFrame::new(*anchor);
                let projected = frame.project(points)?;
                Ok(Self {
                    frame: Some(frame),
                    points: Cow::Owned(projected),
                })
            }
        }
    }

    /// View anchored at the first point.
    pub(crate) fn anchored_at_first(points: &'a [Point3], mode: CoordinateMode) -> Result<Self> {
        let anchor = points.first().copied().unwrap_or_else(Point3::origin);
        Self::new(points, &anchor, mode)
    }

    pub(crate) fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Brings an extra input point into the working frame.
    pub(crate) fn project_point(&self, p: &Point3) -> Result<Point3> {
        match &self.frame {
            None => Ok(*p),
            Some(frame) => frame.project_point(p),
        }
    }

    pub(crate) fn unproject_point(&self, p: &Point3) -> Result<Point3> {
        match &self.frame {
            None => Ok(*p),
            Some(frame) => frame.unproject_point(p),
        }
    }

    pub(crate) fn unproject(&self, points: Vec<Point3>) -> Result<Vec<Point3>> {
        match &self.frame {
            Some(frame) if !points.is_empty() => frame.unproject(&points),
            _ => Ok(points),
        }
    }
}
