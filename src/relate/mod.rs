//! DE-9IM relate computation and the spatial predicates derived from it.
//!
//! Both operands are decomposed into points, line edges and area rings.
//! Every vertex and every edge-edge intersection becomes a node, each edge
//! is split at the nodes lying on it, and the matrix is filled by locating
//! nodes (dimension 0), sub-edge midpoints (dimension 1) and points just
//! off either side of ring sub-edges (dimension 2) in both operands.

mod topology;

pub use topology::{Components, TopologyBuilder};

use self::topology::{Edge, EdgeKind, Topology};
use crate::utils::intersect_segments;
use crate::{Coordinate, Dimension, GeometryType, IntersectionMatrix, Location, Rectangle};
use log::{debug, trace};
use std::cmp::Ordering;

/// Relative tolerance for deciding a computed point lies on an edge.
const RELATIVE_TOLERANCE: f64 = 1e-10;

/// Distance of area samples from their ring, relative to sub-edge length.
const SAMPLE_OFFSET: f64 = 1e-6;

const PARAMETER_EPSILON: f64 = 1e-12;

/// Topological relationships between geometries.
///
/// Predicates with an empty operand are false, except `disjoint`, so that
/// `disjoint` is always the negation of `intersects`.
pub trait Relate: GeometryType + Components {
    /// The full intersection matrix of `self` (A) against `other` (B).
    fn relate<G: Relate>(&self, other: &G) -> IntersectionMatrix {
        compute(&Topology::new(self), &Topology::new(other)).matrix
    }

    /// Tests the intersection matrix against a DE-9IM pattern such as
    /// `T*F**F***`.
    fn relate_pattern<G: Relate>(&self, other: &G, pattern: &str) -> bool {
        self.relate(other).matches(pattern)
    }

    fn disjoint<G: Relate>(&self, other: &G) -> bool {
        match relation(self, other) {
            Some(r) => r.matrix.is_disjoint(),
            None => true,
        }
    }

    fn intersects<G: Relate>(&self, other: &G) -> bool {
        !self.disjoint(other)
    }

    /// Topological equality: the same point set, whatever the vertices.
    fn equals_topo<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_equals())
    }

    fn touches<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_touches(r.dimension_a, r.dimension_b))
    }

    fn crosses<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_crosses(r.dimension_a, r.dimension_b))
    }

    fn within<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_within())
    }

    fn contains<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_contains())
    }

    fn overlaps<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_overlaps(r.dimension_a, r.dimension_b))
    }

    fn covers<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_covers())
    }

    fn covered_by<G: Relate>(&self, other: &G) -> bool {
        relation(self, other).map_or(false, |r| r.matrix.is_covered_by())
    }
}

impl<T: GeometryType + Components> Relate for T {}

struct Relation {
    matrix: IntersectionMatrix,
    dimension_a: Dimension,
    dimension_b: Dimension,
}

/// The relation of two operands, or `None` when either is empty.
fn relation<A: Relate, B: Relate>(a: &A, b: &B) -> Option<Relation> {
    let topology_a = Topology::new(a);
    let topology_b = Topology::new(b);
    if topology_a.is_empty() || topology_b.is_empty() {
        return None;
    }
    Some(compute(&topology_a, &topology_b))
}

fn compute(a: &Topology, b: &Topology) -> Relation {
    let mut matrix = IntersectionMatrix::new();
    matrix.set(Location::Exterior, Location::Exterior, Dimension::Two);

    if a.is_empty() || b.is_empty() || !a.bounds().intersects(b.bounds()) {
        debug!(
            "Relate short-circuit: empty operand or disjoint bounds ({:?}, {:?})",
            a.bounds(),
            b.bounds()
        );
        matrix.set(Location::Interior, Location::Exterior, a.dimension());
        matrix.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
        matrix.set(Location::Exterior, Location::Interior, b.dimension());
        matrix.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    } else {
        let mut computer = RelateComputer::new(a, b, matrix);
        computer.compute();
        matrix = computer.matrix;
    }

    Relation {
        matrix,
        dimension_a: a.dimension(),
        dimension_b: b.dimension(),
    }
}

fn tolerance_for(a: Rectangle, b: Rectangle) -> f64 {
    let scale = [a.x_min, a.y_min, a.x_max, a.y_max, b.x_min, b.y_min, b.x_max, b.y_max]
        .iter()
        .fold(1f64, |scale, v| scale.max(v.abs()));
    scale * RELATIVE_TOLERANCE
}

struct RelateComputer<'a> {
    a: &'a Topology,
    b: &'a Topology,
    tolerance: f64,
    matrix: IntersectionMatrix,
}

impl<'a> RelateComputer<'a> {
    fn new(a: &'a Topology, b: &'a Topology, matrix: IntersectionMatrix) -> Self {
        RelateComputer {
            a,
            b,
            tolerance: tolerance_for(a.bounds(), b.bounds()),
            matrix,
        }
    }

    fn compute(&mut self) {
        let mut splits_a: Vec<Vec<Coordinate>> = vec![Vec::new(); self.a.edges().len()];
        let mut splits_b: Vec<Vec<Coordinate>> = vec![Vec::new(); self.b.edges().len()];
        let mut nodes: Vec<Coordinate> = Vec::new();

        for (index_a, index_b) in self.a.rtree().query_other_intersections(self.b.rtree()) {
            let edge_a = self.a.edges()[index_a];
            let edge_b = self.b.edges()[index_b];
            if let Some((start, end)) =
                intersect_segments(edge_a.start, edge_a.end, edge_b.start, edge_b.end)
            {
                let points = if start == end {
                    vec![start]
                } else {
                    vec![start, end]
                };
                for point in points {
                    splits_a[index_a].push(point);
                    splits_b[index_b].push(point);
                    nodes.push(point);
                }
            }
        }

        // Isolated points of one operand split the edges of the other.
        for &point in self.b.points() {
            for index in self.a.edges_near(point, self.tolerance) {
                splits_a[index].push(point);
            }
        }
        for &point in self.a.points() {
            for index in self.b.edges_near(point, self.tolerance) {
                splits_b[index].push(point);
            }
        }

        trace!(
            "Relate noding: {} intersection nodes, {} + {} edges",
            nodes.len(),
            splits_a.len(),
            splits_b.len()
        );

        let (a, b) = (self.a, self.b);
        for &node in nodes.iter().chain(a.nodes()).chain(b.nodes()) {
            self.add(node, Dimension::Zero);
        }

        let mut sub_edges = 0;
        for (edge, splits) in a.edges().iter().zip(&splits_a) {
            sub_edges += self.classify_edge(edge, splits);
        }
        for (edge, splits) in b.edges().iter().zip(&splits_b) {
            sub_edges += self.classify_edge(edge, splits);
        }
        trace!("Relate classified {} sub-edges", sub_edges);
    }

    fn add(&mut self, point: Coordinate, dimension: Dimension) {
        let location_a = self.a.locate(point, self.tolerance);
        let location_b = self.b.locate(point, self.tolerance);
        self.matrix.set_at_least(location_a, location_b, dimension);
    }

    /// Splits the edge at `splits` and classifies every piece. Returns the
    /// number of pieces.
    fn classify_edge(&mut self, edge: &Edge, splits: &[Coordinate]) -> usize {
        let direction = edge.end - edge.start;
        let length_sq = direction.dot(direction);
        let mut parameters: Vec<f64> = splits
            .iter()
            .map(|p| ((*p - edge.start).dot(direction) / length_sq).max(0.).min(1.))
            .chain(vec![0., 1.])
            .collect();
        parameters.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
        parameters.dedup_by(|x, y| (*x - *y).abs() <= PARAMETER_EPSILON);

        let length = length_sq.sqrt();
        let normal = Coordinate::new(-direction.y / length, direction.x / length);
        let mut pieces = 0;
        for pair in parameters.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            let middle = edge.start + direction * ((t0 + t1) / 2.);
            self.add(middle, Dimension::One);
            pieces += 1;

            if edge.kind == EdgeKind::Ring {
                let offset = ((t1 - t0) * length * SAMPLE_OFFSET).max(self.tolerance * 16.);
                for &side in &[1., -1.] {
                    self.add_area_sample(middle + normal * (offset * side));
                }
            }
        }
        pieces
    }

    /// Samples just off a ring contribute dimension 2 unless they landed on
    /// a boundary of either operand.
    fn add_area_sample(&mut self, point: Coordinate) {
        let location_a = self.a.locate_in_areas(point, self.tolerance);
        let location_b = self.b.locate_in_areas(point, self.tolerance);
        if location_a != Location::Boundary && location_b != Location::Boundary {
            self.matrix
                .set_at_least(location_a, location_b, Dimension::Two);
        }
    }
}
