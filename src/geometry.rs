use crate::{
    Coordinate, CoordinateBuffer, CoordinateReferenceSystem, Dimension, GeometryCollection,
    HasBounds, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
    Precision, Rectangle,
};
use std::slice;

/// Operations shared by every geometry kind.
pub trait GeometryType: HasBounds + Clone + PartialEq {
    /// Topological dimension of the point set.
    fn dimension(&self) -> Dimension;

    /// 3 if every coordinate carries z, otherwise 2. Empty geometries
    /// report 3, the identity of the minimum taken over members.
    fn spatial_dimension(&self) -> usize;

    fn is_empty(&self) -> bool;

    fn precision(&self) -> Precision;

    fn crs(&self) -> CoordinateReferenceSystem;

    /// The closure of the combinatorial boundary.
    fn boundary(&self) -> Geometry;

    /// A copy with every coordinate passed through `precision`, tagged
    /// with `crs`.
    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self;

    /// Same kind and the same coordinates in the same order.
    fn equals_exact(&self, other: &Self) -> bool {
        self == other
    }
}

/// Ordered coordinate access for the linear geometry kinds.
///
/// Every mutation goes through the copy-on-write buffer, so clones of a
/// geometry never observe each other's writes.
pub trait CoordinateSequence {
    fn coordinates(&self) -> &CoordinateBuffer;

    fn coordinates_mut(&mut self) -> &mut CoordinateBuffer;

    fn len(&self) -> usize {
        self.coordinates().len()
    }

    fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coordinates().get(index)
    }

    fn first(&self) -> Option<&Coordinate> {
        self.coordinates().first()
    }

    fn last(&self) -> Option<&Coordinate> {
        self.coordinates().last()
    }

    fn iter(&self) -> slice::Iter<'_, Coordinate> {
        self.coordinates().iter()
    }

    fn as_slice(&self) -> &[Coordinate] {
        self.coordinates().as_slice()
    }

    fn append<C: Into<Coordinate>>(&mut self, coord: C) {
        self.coordinates_mut().append(coord);
    }

    fn append_all<I, C>(&mut self, coords: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Coordinate>,
    {
        self.coordinates_mut().append_all(coords);
    }

    /// Panics unless `index <= len()`.
    fn insert<C: Into<Coordinate>>(&mut self, index: usize, coord: C) {
        self.coordinates_mut().insert(index, coord);
    }

    /// Panics unless `index < len()`.
    fn remove(&mut self, index: usize) -> Coordinate {
        self.coordinates_mut().remove(index)
    }

    /// Panics when empty.
    fn remove_last(&mut self) -> Coordinate {
        self.coordinates_mut().remove_last()
    }

    /// Panics unless `index < len()`.
    fn set<C: Into<Coordinate>>(&mut self, index: usize, coord: C) {
        self.coordinates_mut().set(index, coord);
    }

    fn reserve_capacity(&mut self, capacity: usize) {
        self.coordinates_mut().reserve_capacity(capacity);
    }

    fn remove_all(&mut self, keep_capacity: bool) {
        self.coordinates_mut().remove_all(keep_capacity);
    }
}

/// A one-dimensional geometry made of straight segments.
pub trait Curve: CoordinateSequence {
    /// Sum of the planar lengths of the segments.
    fn length(&self) -> f64 {
        self.as_slice()
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

pub(crate) fn spatial_dimension_of<'a, I>(coords: I) -> usize
where
    I: IntoIterator<Item = &'a Coordinate>,
{
    coords
        .into_iter()
        .map(Coordinate::spatial_dimension)
        .min()
        .unwrap_or(3)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($geometry:expr, $inner:ident => $body:expr) => {
        match $geometry {
            Geometry::Point($inner) => $body,
            Geometry::LineString($inner) => $body,
            Geometry::LinearRing($inner) => $body,
            Geometry::Polygon($inner) => $body,
            Geometry::MultiPoint($inner) => $body,
            Geometry::MultiLineString($inner) => $body,
            Geometry::MultiPolygon($inner) => $body,
            Geometry::GeometryCollection($inner) => $body,
        }
    };
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Every coordinate of the geometry in storage order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut coords = Vec::new();
        self.collect_coordinates(&mut coords);
        coords
    }

    fn collect_coordinates(&self, coords: &mut Vec<Coordinate>) {
        match self {
            Geometry::Point(p) => coords.extend(p.coordinate()),
            Geometry::LineString(ls) => coords.extend(ls.iter().copied()),
            Geometry::LinearRing(lr) => coords.extend(lr.iter().copied()),
            Geometry::Polygon(p) => {
                for ring in p.rings() {
                    coords.extend(ring.iter().copied());
                }
            }
            Geometry::MultiPoint(mp) => coords.extend(mp.iter().filter_map(Point::coordinate)),
            Geometry::MultiLineString(mls) => {
                for ls in mls.iter() {
                    coords.extend(ls.iter().copied());
                }
            }
            Geometry::MultiPolygon(mp) => {
                for polygon in mp.iter() {
                    for ring in polygon.rings() {
                        coords.extend(ring.iter().copied());
                    }
                }
            }
            Geometry::GeometryCollection(gc) => {
                for geometry in gc.iter() {
                    geometry.collect_coordinates(coords);
                }
            }
        }
    }
}

impl HasBounds for Geometry {
    fn bounds(&self) -> Rectangle {
        dispatch!(self, g => g.bounds())
    }
}

impl GeometryType for Geometry {
    fn dimension(&self) -> Dimension {
        dispatch!(self, g => g.dimension())
    }

    fn spatial_dimension(&self) -> usize {
        dispatch!(self, g => g.spatial_dimension())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, g => g.is_empty())
    }

    fn precision(&self) -> Precision {
        dispatch!(self, g => g.precision())
    }

    fn crs(&self) -> CoordinateReferenceSystem {
        dispatch!(self, g => g.crs())
    }

    fn boundary(&self) -> Geometry {
        dispatch!(self, g => g.boundary())
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        dispatch!(self, g => g.converted(precision, crs).into())
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for Geometry {
                fn from(geometry: $kind) -> Self {
                    Geometry::$kind(geometry)
                }
            }
        )*
    };
}

impl_from_kind!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
