mod coordinate;
mod coordinate_buffer;
mod crs;
mod dimension;
mod geometry;
mod geometry_collection;
mod intersection_matrix;
mod line_string;
mod linear_ring;
mod multi;
mod point;
mod polygon;
mod precision;
mod rectangle;
mod seg_rtree;

pub mod algorithms;
pub mod errors;
pub mod relate;
pub(crate) mod utils;
pub mod wkt;

pub use crate::algorithms::{point_in_polygon, Simplify};
pub use crate::relate::Relate;
pub use crate::seg_rtree::SegRTree;
pub use crate::wkt::{WktReader, WktWriter};
pub use coordinate::{Coordinate, CoordinateKind};
pub use coordinate_buffer::CoordinateBuffer;
pub use crs::CoordinateReferenceSystem;
pub use dimension::Dimension;
pub use errors::{MatrixError, Position, ValidationError, WktError};
pub use geometry::{CoordinateSequence, Curve, Geometry, GeometryType};
pub use geometry_collection::GeometryCollection;
pub use intersection_matrix::{IntersectionMatrix, Location};
pub use line_string::LineString;
pub use linear_ring::LinearRing;
pub use multi::{Multi, MultiLineString, MultiMember, MultiPoint, MultiPolygon};
pub use point::Point;
pub use polygon::Polygon;
pub use precision::Precision;
pub use rectangle::{HasBounds, Rectangle};
