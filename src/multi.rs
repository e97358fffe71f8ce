use crate::{
    Coordinate, CoordinateReferenceSystem, CoordinateSequence, Curve, Dimension, Geometry,
    GeometryType, HasBounds, LineString, Point, Polygon, Precision, Rectangle,
};
use std::collections::hash_map::{Entry, HashMap};
use std::ops::Index;
use std::slice;

/// An ordered, homogeneous sequence of geometries of kind `T`.
///
/// Members are converted to the collection's precision and reference
/// system when they are added.
#[derive(Debug, Clone, Default)]
pub struct Multi<T> {
    elements: Vec<T>,
    precision: Precision,
    crs: CoordinateReferenceSystem,
}

pub type MultiPoint = Multi<Point>;
pub type MultiLineString = Multi<LineString>;
pub type MultiPolygon = Multi<Polygon>;

impl<T: PartialEq> PartialEq for Multi<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

/// The member kinds of a `Multi`, each with its own boundary rule.
pub trait MultiMember: GeometryType {
    fn multi_boundary(multi: &Multi<Self>) -> Geometry;
}

impl<T: GeometryType> Multi<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Multi::with_precision(elements, Precision::Floating, CoordinateReferenceSystem::Cartesian)
    }

    pub fn with_precision(
        elements: Vec<T>,
        precision: Precision,
        crs: CoordinateReferenceSystem,
    ) -> Self {
        let elements = elements
            .into_iter()
            .map(|e| {
                if e.precision() == precision && e.crs() == crs {
                    e
                } else {
                    e.converted(precision, crs)
                }
            })
            .collect();
        Multi {
            elements,
            precision,
            crs,
        }
    }

    pub fn push(&mut self, element: T) {
        self.elements.push(element.converted(self.precision, self.crs));
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }
}

impl<T> Index<usize> for Multi<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<'a, T> IntoIterator for &'a Multi<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: HasBounds> HasBounds for Multi<T> {
    fn bounds(&self) -> Rectangle {
        self.elements.iter().fold(Rectangle::new_empty(), |mut r, e| {
            r.expand(e.bounds());
            r
        })
    }
}

impl<T: MultiMember> GeometryType for Multi<T> {
    fn dimension(&self) -> Dimension {
        self.elements
            .iter()
            .map(GeometryType::dimension)
            .max()
            .unwrap_or(Dimension::Empty)
    }

    fn spatial_dimension(&self) -> usize {
        self.elements
            .iter()
            .map(GeometryType::spatial_dimension)
            .min()
            .unwrap_or(3)
    }

    /// True when there are no members, even if the members are empty.
    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn crs(&self) -> CoordinateReferenceSystem {
        self.crs
    }

    fn boundary(&self) -> Geometry {
        T::multi_boundary(self)
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        Multi {
            elements: self
                .elements
                .iter()
                .map(|e| e.converted(precision, crs))
                .collect(),
            precision,
            crs,
        }
    }
}

impl MultiMember for Point {
    fn multi_boundary(multi: &Multi<Self>) -> Geometry {
        MultiPoint::with_precision(vec![], multi.precision, multi.crs).into()
    }
}

impl MultiMember for LineString {
    /// Endpoints shared by an even number of members cancel out.
    fn multi_boundary(multi: &Multi<Self>) -> Geometry {
        let endpoints = multi
            .elements
            .iter()
            .filter_map(|line| Some((*line.first()?, *line.last()?)))
            .flat_map(|(first, last)| vec![first, last]);
        let points = mod_two_points(endpoints)
            .into_iter()
            .map(|c| Point::with_precision(c, multi.precision, multi.crs))
            .collect();
        MultiPoint::with_precision(points, multi.precision, multi.crs).into()
    }
}

impl MultiMember for Polygon {
    fn multi_boundary(multi: &Multi<Self>) -> Geometry {
        let lines = multi
            .elements
            .iter()
            .flat_map(|polygon| polygon.rings())
            .filter(|ring| !ring.is_empty())
            .cloned()
            .map(LineString::from)
            .collect();
        MultiLineString::with_precision(lines, multi.precision, multi.crs).into()
    }
}

/// The coordinates that occur an odd number of times, in order of first
/// occurrence.
pub(crate) fn mod_two_points<I>(coords: I) -> Vec<Coordinate>
where
    I: IntoIterator<Item = Coordinate>,
{
    let mut counted: Vec<(Coordinate, usize)> = Vec::new();
    let mut slots: HashMap<CoordinateKey, usize> = HashMap::new();
    for coord in coords {
        match slots.entry(CoordinateKey::of(coord)) {
            Entry::Occupied(slot) => counted[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(counted.len());
                counted.push((coord, 1));
            }
        }
    }
    counted
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(c, _)| c)
        .collect()
}

/// Bit patterns of every ordinate, with -0.0 folded into 0.0 so keys agree
/// with coordinate equality.
#[derive(PartialEq, Eq, Hash)]
struct CoordinateKey([u64; 2], Option<u64>, Option<u64>);

impl CoordinateKey {
    fn of(coord: Coordinate) -> Self {
        let bits = |v: f64| (v + 0.).to_bits();
        CoordinateKey(
            [bits(coord.x), bits(coord.y)],
            coord.z.map(bits),
            coord.m.map(bits),
        )
    }
}

impl Multi<LineString> {
    /// Sum of the member lengths.
    pub fn length(&self) -> f64 {
        self.elements.iter().map(Curve::length).sum()
    }

    /// True when there is at least one member and every member is closed.
    pub fn is_closed(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(Curve::is_closed)
    }
}

impl Multi<Polygon> {
    pub fn area(&self) -> f64 {
        self.elements.iter().map(Polygon::area).sum()
    }
}
