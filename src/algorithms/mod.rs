mod point_in_polygon;
mod simplify;
mod validation;

pub use point_in_polygon::point_in_polygon;
pub(crate) use point_in_polygon::locate_in_ring;
pub use simplify::Simplify;
