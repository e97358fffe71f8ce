use crate::geometry::spatial_dimension_of;
use crate::{
    Coordinate, CoordinateBuffer, CoordinateReferenceSystem, CoordinateSequence, Curve,
    Dimension, Geometry, GeometryType, HasBounds, LinearRing, MultiPoint, Point, Precision,
    Rectangle,
};

/// An ordered sequence of coordinates joined by straight segments.
#[derive(Debug, Clone, Default)]
pub struct LineString {
    coords: CoordinateBuffer,
    crs: CoordinateReferenceSystem,
}

impl PartialEq for LineString {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl LineString {
    pub fn new<I, C>(coords: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        LineString::with_precision(coords, Precision::Floating, CoordinateReferenceSystem::Cartesian)
    }

    pub fn with_precision<I, C>(coords: I, precision: Precision, crs: CoordinateReferenceSystem) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        LineString {
            coords: CoordinateBuffer::from_coordinates(coords, precision),
            crs,
        }
    }

    pub fn empty() -> Self {
        LineString::default()
    }

    /// Wraps an existing buffer without copying it.
    pub fn from_buffer(coords: CoordinateBuffer, crs: CoordinateReferenceSystem) -> Self {
        LineString { coords, crs }
    }

    pub fn into_buffer(self) -> CoordinateBuffer {
        self.coords
    }
}

impl From<LinearRing> for LineString {
    fn from(ring: LinearRing) -> Self {
        let crs = ring.crs();
        LineString::from_buffer(ring.into_buffer(), crs)
    }
}

impl CoordinateSequence for LineString {
    fn coordinates(&self) -> &CoordinateBuffer {
        &self.coords
    }

    fn coordinates_mut(&mut self) -> &mut CoordinateBuffer {
        &mut self.coords
    }
}

impl Curve for LineString {}

impl HasBounds for LineString {
    fn bounds(&self) -> Rectangle {
        Rectangle::of_coordinates(&self.coords)
    }
}

/// The endpoints of an open curve, nothing for a closed or empty one.
pub(crate) fn curve_boundary<T: Curve>(
    curve: &T,
    precision: Precision,
    crs: CoordinateReferenceSystem,
) -> Geometry {
    let mut points = Vec::new();
    if !curve.is_closed() {
        if let (Some(first), Some(last)) = (curve.first(), curve.last()) {
            points.push(Point::with_precision(*first, precision, crs));
            points.push(Point::with_precision(*last, precision, crs));
        }
    }
    MultiPoint::with_precision(points, precision, crs).into()
}

impl GeometryType for LineString {
    fn dimension(&self) -> Dimension {
        if self.coords.is_empty() {
            Dimension::Empty
        } else {
            Dimension::One
        }
    }

    fn spatial_dimension(&self) -> usize {
        spatial_dimension_of(&self.coords)
    }

    fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    fn precision(&self) -> Precision {
        self.coords.precision()
    }

    fn crs(&self) -> CoordinateReferenceSystem {
        self.crs
    }

    fn boundary(&self) -> Geometry {
        curve_boundary(self, self.precision(), self.crs)
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        LineString {
            coords: self.coords.converted(precision),
            crs,
        }
    }
}
