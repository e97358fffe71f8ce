use crate::utils::perpendicular_distance;
use crate::{
    Coordinate, CoordinateBuffer, CoordinateSequence, Geometry, GeometryCollection, GeometryType,
    LineString, LinearRing, Multi, MultiMember, Point, Polygon,
};
use log::trace;

/// Douglas-Peucker line simplification.
pub trait Simplify {
    /// Removes vertices lying within `tolerance` of the simplified path.
    /// The first and last coordinates always survive, so rings stay closed.
    fn simplify(&self, tolerance: f64) -> Self;
}

/// Indices of the coordinates kept by Douglas-Peucker, in order.
fn douglas_peucker(coords: &[Coordinate], tolerance: f64) -> Vec<usize> {
    let count = coords.len();
    if count <= 2 {
        return (0..count).collect();
    }
    let mut keep = vec![false; count];
    keep[0] = true;
    keep[count - 1] = true;

    // Stack entries: (first, last) of a range whose ends are kept.
    let mut stack = vec![(0, count - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let start = coords[first].xy();
        let end = coords[last].xy();
        let mut farthest = first;
        let mut max_distance = 0.;
        for (index, coord) in coords.iter().enumerate().take(last).skip(first + 1) {
            let distance = perpendicular_distance(coord.xy(), start, end);
            if distance > max_distance {
                max_distance = distance;
                farthest = index;
            }
        }
        if max_distance > tolerance {
            keep[farthest] = true;
            stack.push((farthest, last));
            stack.push((first, farthest));
        }
    }

    let kept: Vec<usize> = (0..count).filter(|&i| keep[i]).collect();
    trace!("Simplified {} coordinates to {}", count, kept.len());
    kept
}

fn simplify_sequence<T: CoordinateSequence + GeometryType>(
    sequence: &T,
    tolerance: f64,
) -> CoordinateBuffer {
    let coords = sequence.as_slice();
    CoordinateBuffer::from_coordinates(
        douglas_peucker(coords, tolerance)
            .into_iter()
            .map(|i| coords[i]),
        sequence.precision(),
    )
}

impl Simplify for Point {
    fn simplify(&self, _tolerance: f64) -> Self {
        self.clone()
    }
}

impl Simplify for LineString {
    fn simplify(&self, tolerance: f64) -> Self {
        if self.len() <= 2 {
            return self.clone();
        }
        LineString::from_buffer(simplify_sequence(self, tolerance), self.crs())
    }
}

impl Simplify for LinearRing {
    /// A ring that collapses below four coordinates is returned as such.
    fn simplify(&self, tolerance: f64) -> Self {
        if self.len() <= 2 {
            return self.clone();
        }
        LinearRing::from_buffer(simplify_sequence(self, tolerance), self.crs())
    }
}

impl Simplify for Polygon {
    fn simplify(&self, tolerance: f64) -> Self {
        Polygon::new(
            self.shell().simplify(tolerance),
            self.holes()
                .iter()
                .map(|hole| hole.simplify(tolerance))
                .collect(),
        )
    }
}

impl<T: MultiMember + Simplify> Simplify for Multi<T> {
    fn simplify(&self, tolerance: f64) -> Self {
        Multi::with_precision(
            self.iter().map(|e| e.simplify(tolerance)).collect(),
            self.precision(),
            self.crs(),
        )
    }
}

impl Simplify for GeometryCollection {
    fn simplify(&self, tolerance: f64) -> Self {
        GeometryCollection::with_precision(
            self.iter().map(|e| e.simplify(tolerance)).collect(),
            self.precision(),
            self.crs(),
        )
    }
}

impl Simplify for Geometry {
    fn simplify(&self, tolerance: f64) -> Self {
        match self {
            Geometry::Point(g) => g.simplify(tolerance).into(),
            Geometry::LineString(g) => g.simplify(tolerance).into(),
            Geometry::LinearRing(g) => g.simplify(tolerance).into(),
            Geometry::Polygon(g) => g.simplify(tolerance).into(),
            Geometry::MultiPoint(g) => g.simplify(tolerance).into(),
            Geometry::MultiLineString(g) => g.simplify(tolerance).into(),
            Geometry::MultiPolygon(g) => g.simplify(tolerance).into(),
            Geometry::GeometryCollection(g) => g.simplify(tolerance).into(),
        }
    }
}
