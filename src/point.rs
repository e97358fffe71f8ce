use crate::{
    Coordinate, CoordinateReferenceSystem, Dimension, Geometry, GeometryType, HasBounds,
    MultiPoint, Precision, Rectangle,
};

/// A single position, or the empty point.
#[derive(Debug, Clone, Default)]
pub struct Point {
    coord: Option<Coordinate>,
    precision: Precision,
    crs: CoordinateReferenceSystem,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Point {
    pub fn new<C: Into<Coordinate>>(coord: C) -> Self {
        Point::with_precision(coord, Precision::Floating, CoordinateReferenceSystem::Cartesian)
    }

    pub fn with_precision<C: Into<Coordinate>>(
        coord: C,
        precision: Precision,
        crs: CoordinateReferenceSystem,
    ) -> Self {
        Point {
            coord: Some(precision.convert_coordinate(coord.into())),
            precision,
            crs,
        }
    }

    pub fn empty() -> Self {
        Point::default()
    }

    pub fn empty_with(precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        Point {
            coord: None,
            precision,
            crs,
        }
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coord
    }

    pub fn x(&self) -> Option<f64> {
        self.coord.map(|c| c.x)
    }

    pub fn y(&self) -> Option<f64> {
        self.coord.map(|c| c.y)
    }
}

impl From<Coordinate> for Point {
    fn from(coord: Coordinate) -> Self {
        Point::new(coord)
    }
}

impl HasBounds for Point {
    fn bounds(&self) -> Rectangle {
        match self.coord {
            Some(c) => Rectangle::new(c, c),
            None => Rectangle::new_empty(),
        }
    }
}

impl GeometryType for Point {
    fn dimension(&self) -> Dimension {
        if self.coord.is_some() {
            Dimension::Zero
        } else {
            Dimension::Empty
        }
    }

    fn spatial_dimension(&self) -> usize {
        self.coord.map_or(3, |c| c.spatial_dimension())
    }

    fn is_empty(&self) -> bool {
        self.coord.is_none()
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn crs(&self) -> CoordinateReferenceSystem {
        self.crs
    }

    fn boundary(&self) -> Geometry {
        MultiPoint::with_precision(vec![], self.precision, self.crs).into()
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        match self.coord {
            Some(c) => Point::with_precision(c, precision, crs),
            None => Point::empty_with(precision, crs),
        }
    }
}
