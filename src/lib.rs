pub mod crs;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use crs::{CheapRuler, CoordinateMode, EnuFrame, EnuMethod, Unit};
pub use error::{GeometryError, InputError, Result, RulerError};
pub use geometry::{Arrows, LineSegment, PolylineRuler};
pub use math::{Point2, Point3, Vector3};
pub use operations::{DouglasPeucker, LineProjection};
