pub mod measure;
pub mod simplify;

pub use measure::{
    along, dirs, distance, interpolate, line_distance, line_slice, line_slice_along,
    point_on_line, point_to_segment_distance, ranges, square_distance, LineProjection,
};
pub use simplify::{douglas_simplify, douglas_simplify_indexes, douglas_simplify_mask, DouglasPeucker};
