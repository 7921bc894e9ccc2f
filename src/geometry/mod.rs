mod polyline_ruler;
mod segment;

pub use polyline_ruler::{Arrows, PolylineRuler, DEFAULT_SCANLINE_HALF_WIDTH};
pub use segment::LineSegment;
