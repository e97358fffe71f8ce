use crate::geometry::spatial_dimension_of;
use crate::line_string::curve_boundary;
use crate::{
    Coordinate, CoordinateBuffer, CoordinateReferenceSystem, CoordinateSequence, Curve,
    Dimension, Geometry, GeometryType, HasBounds, LineString, Precision, Rectangle,
};

/// A line string meant to be closed. Closure is not enforced: an open ring
/// is representable, reports `is_closed() == false` and has zero area.
#[derive(Debug, Clone, Default)]
pub struct LinearRing {
    coords: CoordinateBuffer,
    crs: CoordinateReferenceSystem,
}

impl PartialEq for LinearRing {
    fn eq(&self, other: &Self) -> bool {
        self.coords == other.coords
    }
}

impl LinearRing {
    pub fn new<I, C>(coords: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        LinearRing::with_precision(coords, Precision::Floating, CoordinateReferenceSystem::Cartesian)
    }

    pub fn with_precision<I, C>(coords: I, precision: Precision, crs: CoordinateReferenceSystem) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        LinearRing {
            coords: CoordinateBuffer::from_coordinates(coords, precision),
            crs,
        }
    }

    pub fn empty() -> Self {
        LinearRing::default()
    }

    /// Wraps an existing buffer without copying it.
    pub fn from_buffer(coords: CoordinateBuffer, crs: CoordinateReferenceSystem) -> Self {
        LinearRing { coords, crs }
    }

    pub fn into_buffer(self) -> CoordinateBuffer {
        self.coords
    }

    /// The enclosed planar area. Zero unless the ring is closed and has at
    /// least 4 coordinates.
    pub fn area(&self) -> f64 {
        if self.len() < 4 || !self.is_closed() {
            return 0.;
        }
        self.signed_area().abs()
    }

    /// Shoelace sum over x and y; positive for counter-clockwise rings.
    pub(crate) fn signed_area(&self) -> f64 {
        self.as_slice()
            .windows(2)
            .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
            .sum::<f64>()
            / 2.
    }
}

impl From<LineString> for LinearRing {
    fn from(line: LineString) -> Self {
        let crs = line.crs();
        LinearRing::from_buffer(line.into_buffer(), crs)
    }
}

impl CoordinateSequence for LinearRing {
    fn coordinates(&self) -> &CoordinateBuffer {
        &self.coords
    }

    fn coordinates_mut(&mut self) -> &mut CoordinateBuffer {
        &mut self.coords
    }
}

impl Curve for LinearRing {}

impl HasBounds for LinearRing {
    fn bounds(&self) -> Rectangle {
        Rectangle::of_coordinates(&self.coords)
    }
}

impl GeometryType for LinearRing {
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
        LinearRing {
            coords: self.coords.converted(precision),
            crs,
        }
    }
}
