use crate::{
    CoordinateReferenceSystem, Dimension, Geometry, GeometryType, HasBounds, LineString,
    LinearRing, MultiLineString, Precision, Rectangle,
};
use std::iter;

/// A surface bounded by one outer ring (the shell) with zero or more
/// inner rings (holes). Hole placement is only checked by `validate`.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    shell: LinearRing,
    holes: Vec<LinearRing>,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.shell == other.shell && self.holes == other.holes
    }
}

impl Polygon {
    /// Holes are converted to the shell's precision and reference system.
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Self {
        let precision = shell.precision();
        let crs = shell.crs();
        Polygon {
            shell,
            holes: holes
                .iter()
                .map(|hole| hole.converted(precision, crs))
                .collect(),
        }
    }

    pub fn with_precision(
        shell: LinearRing,
        holes: Vec<LinearRing>,
        precision: Precision,
        crs: CoordinateReferenceSystem,
    ) -> Self {
        Polygon::new(shell.converted(precision, crs), holes)
    }

    pub fn empty() -> Self {
        Polygon::default()
    }

    pub fn empty_with(precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        Polygon::new(LinearRing::empty().converted(precision, crs), vec![])
    }

    pub fn shell(&self) -> &LinearRing {
        &self.shell
    }

    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }

    /// The shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        iter::once(&self.shell).chain(self.holes.iter())
    }

    pub fn add_hole(&mut self, hole: LinearRing) {
        self.holes.push(hole.converted(self.precision(), self.crs()));
    }

    /// Shell area minus the area of every hole.
    pub fn area(&self) -> f64 {
        self.shell.area() - self.holes.iter().map(LinearRing::area).sum::<f64>()
    }
}

impl HasBounds for Polygon {
    fn bounds(&self) -> Rectangle {
        self.shell.bounds()
    }
}

impl GeometryType for Polygon {
    fn dimension(&self) -> Dimension {
        if self.is_empty() {
            Dimension::Empty
        } else {
            Dimension::Two
        }
    }

    fn spatial_dimension(&self) -> usize {
        self.rings()
            .map(GeometryType::spatial_dimension)
            .min()
            .unwrap_or(3)
    }

    fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    fn precision(&self) -> Precision {
        self.shell.precision()
    }

    fn crs(&self) -> CoordinateReferenceSystem {
        self.shell.crs()
    }

    fn boundary(&self) -> Geometry {
        let lines = self
            .rings()
            .filter(|ring| !ring.is_empty())
            .cloned()
            .map(LineString::from)
            .collect();
        MultiLineString::with_precision(lines, self.precision(), self.crs()).into()
    }

    fn converted(&self, precision: Precision, crs: CoordinateReferenceSystem) -> Self {
        Polygon {
            shell: self.shell.converted(precision, crs),
            holes: self
                .holes
                .iter()
                .map(|hole| hole.converted(precision, crs))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, CoordinateSequence};
    use approx::assert_relative_eq;

    fn ring(coords: Vec<(f64, f64)>) -> LinearRing {
        LinearRing::new(coords)
    }

    fn square_with_hole() -> Polygon {
        Polygon::new(
            ring(vec![(0., 0.), (0., 10.), (10., 10.), (10., 0.), (0., 0.)]),
            vec![ring(vec![(2., 2.), (4., 2.), (4., 4.), (2., 4.), (2., 2.)])],
        )
    }

    #[test]
    fn test_area_subtracts_holes() {
        assert_relative_eq!(square_with_hole().area(), 96.);
        assert_eq!(Polygon::empty().area(), 0.);
    }

    #[test]
    fn test_bounds_come_from_shell() {
        let mut polygon = square_with_hole();
        // A hole outside the shell is invalid but does not change the bounds.
        polygon.add_hole(ring(vec![(20., 20.), (21., 20.), (21., 21.), (20., 20.)]));
        assert_eq!(
            polygon.bounds(),
            Rectangle::new((0., 0.).into(), (10., 10.).into())
        );
    }

    #[test]
    fn test_holes_take_shell_precision() {
        let shell = LinearRing::with_precision(
            vec![(0., 0.), (0., 10.), (10., 10.), (10., 0.), (0., 0.)],
            Precision::fixed(1.),
            CoordinateReferenceSystem::Cartesian,
        );
        let polygon = Polygon::new(
            shell,
            vec![ring(vec![(2.2, 2.2), (4.4, 2.2), (4.4, 4.4), (2.2, 2.2)])],
        );
        assert_eq!(polygon.holes()[0].precision(), Precision::fixed(1.));
        assert_eq!(polygon.holes()[0].get(1), Some(&Coordinate::new(4., 2.)));
    }

    #[test]
    fn test_boundary_is_rings() {
        let boundary = square_with_hole().boundary();
        assert_eq!(boundary.type_name(), "MultiLineString");
        assert_eq!(boundary.dimension(), Dimension::One);
        assert_eq!(boundary.coordinates().len(), 10);
        assert!(Polygon::empty().boundary().is_empty());
    }

    #[test]
    fn test_rings_order() {
        let polygon = square_with_hole();
        let firsts: Vec<Coordinate> = polygon.rings().map(|r| r.as_slice()[0]).collect();
        assert_eq!(firsts, vec![Coordinate::new(0., 0.), Coordinate::new(2., 2.)]);
    }
}
