use crate::{
    CoordinateReferenceSystem, Dimension, Geometry, GeometryType, HasBounds, Precision, Rectangle,
};
use std::ops::Index;
use std::slice;

/// An ordered sequence of geometries of any kind.
#[derive(Debug, Clone, Default)]
pub struct GeometryCollection {
    elements: Vec<Geometry>,
    precision: Precision,
    crs: CoordinateReferenceSystem,
}

impl PartialEq for GeometryCollection {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl GeometryCollection {
    pub fn new(elements: Vec<Geometry>) -> Self {
        GeometryCollection::with_precision(
            elements,
            Precision::Floating,
            CoordinateReferenceSystem::Cartesian,
        )
    }

    pub fn with_precision(
        elements: Vec<Geometry>,
        precision: Precision,
        crs: CoordinateReferenceSystem,
    ) -> Self {
        let mut collection = GeometryCollection {
            elements: Vec::with_capacity(elements.len()),
            precision,
            crs,
        };
        for element in elements {
            collection.push(element);
        }
        collection
    }

    /// Appends a member, converting it to the collection's precision.
    pub fn push(&mut self, element: Geometry) {
        let element = if element.precision() == self.precision && element.crs() == self.crs {
            element
        } else {
            element.converted(self.precision, self.crs)
        };
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn get(&self, index: usize) -> Option<&Geometry> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Geometry> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Geometry] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Geometry> {
        self.elements
    }
}

impl Index<usize> for GeometryCollection {
    type Output = Geometry;

    fn index(&self, index: usize) -> &Geometry {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a GeometryCollection {
    type Item = &'a Geometry;
    type IntoIter = slice::Iter<'a, Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl HasBounds for GeometryCollection {
    fn bounds(&self) -> Rectangle {
        self.elements.iter().fold(Rectangle::new_empty(), |mut r, e| {
            r.expand(e.bounds());
            r
        })
    }
}

impl GeometryType for GeometryCollection {
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
        GeometryCollection::with_precision(vec![], self.precision, self.crs).into()
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        GeometryCollection {
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
