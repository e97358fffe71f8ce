use crate::algorithms::locate_in_ring;
use crate::multi::mod_two_points;
use crate::utils::{point_segment_distance_sq, rectangles_from_coordinates};
use crate::{
    Coordinate, CoordinateSequence, Dimension, Geometry, GeometryCollection, LineString,
    LinearRing, Location, Multi, Point, Polygon, Rectangle, SegRTree,
};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum EdgeKind {
    Line,
    Ring,
}

/// A non-degenerate segment of a line or of an area's ring.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Edge {
    pub start: Coordinate,
    pub end: Coordinate,
    pub kind: EdgeKind,
}

struct Ring {
    coords: Vec<Coordinate>,
    rtree: SegRTree,
}

/// A polygon as a shell followed by its holes.
struct Area {
    rings: Vec<Ring>,
    bounds: Rectangle,
}

impl Area {
    fn locate(&self, point: Coordinate, tolerance: f64) -> Location {
        let mut rings = self.rings.iter();
        match rings.next() {
            Some(shell) => match locate_in_ring(point, &shell.coords, &shell.rtree, tolerance) {
                Location::Interior => {}
                location => return location,
            },
            None => return Location::Exterior,
        }
        for hole in rings {
            match locate_in_ring(point, &hole.coords, &hole.rtree, tolerance) {
                Location::Exterior => {}
                Location::Interior => return Location::Exterior,
                Location::Boundary => return Location::Boundary,
            }
        }
        Location::Interior
    }
}

/// Decomposition of a geometry into the point, line and area pieces the
/// relate computation works on.
pub trait Components {
    fn add_components(&self, builder: &mut TopologyBuilder);
}

#[derive(Default)]
pub struct TopologyBuilder {
    points: Vec<Coordinate>,
    vertices: Vec<Coordinate>,
    edges: Vec<Edge>,
    areas: Vec<Area>,
    line_endpoints: Vec<Coordinate>,
}

impl TopologyBuilder {
    fn add_point(&mut self, point: Coordinate) {
        self.points.push(point.xy());
    }

    /// A line without any non-degenerate segment is treated as a point.
    fn add_line(&mut self, coords: &[Coordinate]) {
        let coords: Vec<Coordinate> = coords.iter().map(Coordinate::xy).collect();
        let first_edge = self.edges.len();
        self.push_edges(&coords, EdgeKind::Line);
        if self.edges.len() == first_edge {
            if let Some(&point) = coords.first() {
                self.add_point(point);
            }
            return;
        }
        self.vertices.extend_from_slice(&coords);
        self.line_endpoints.push(coords[0]);
        self.line_endpoints.push(coords[coords.len() - 1]);
    }

    /// Polygons whose shell encloses no area contribute their rings as lines,
    /// and so do individual holes that enclose no area.
    fn add_polygon(&mut self, polygon: &Polygon) {
        if polygon.shell().area() == 0. {
            for ring in polygon.rings() {
                self.add_line(ring.as_slice());
            }
            return;
        }
        let mut rings = Vec::with_capacity(polygon.holes().len() + 1);
        for ring in polygon.rings() {
            if ring.area() == 0. {
                self.add_line(ring.as_slice());
                continue;
            }
            let coords: Vec<Coordinate> = ring.iter().map(Coordinate::xy).collect();
            self.push_edges(&coords, EdgeKind::Ring);
            self.vertices.extend_from_slice(&coords);
            let rtree = SegRTree::new_loaded(16, &rectangles_from_coordinates(&coords));
            rings.push(Ring { coords, rtree });
        }
        let bounds = rings
            .first()
            .map_or_else(Rectangle::new_empty, |shell| Rectangle::of_coordinates(&shell.coords));
        self.areas.push(Area { rings, bounds });
    }

    fn push_edges(&mut self, coords: &[Coordinate], kind: EdgeKind) {
        self.edges.extend(
            coords
                .windows(2)
                .filter(|pair| pair[0] != pair[1])
                .map(|pair| Edge {
                    start: pair[0],
                    end: pair[1],
                    kind,
                }),
        );
    }

    pub(crate) fn build(self) -> Topology {
        let line_boundary = mod_two_points(self.line_endpoints);
        let rects: Vec<Rectangle> = self
            .edges
            .iter()
            .map(|edge| Rectangle::new(edge.start, edge.end))
            .collect();
        let rtree = SegRTree::new_loaded(16, &rects);
        let area_bounds: Vec<Rectangle> = self.areas.iter().map(|area| area.bounds).collect();
        let bounds = Rectangle::of_coordinates(self.points.iter().chain(self.vertices.iter()));
        let dimension = if !self.areas.is_empty() {
            Dimension::Two
        } else if !self.edges.is_empty() {
            Dimension::One
        } else if !self.points.is_empty() {
            Dimension::Zero
        } else {
            Dimension::Empty
        };
        Topology {
            points: PointIndex::new(self.points),
            vertices: self.vertices,
            edges: self.edges,
            areas: self.areas,
            area_rtree: SegRTree::new_loaded(16, &area_bounds),
            line_boundary: PointIndex::new(line_boundary),
            rtree,
            bounds,
            dimension,
        }
    }
}

/// The located pieces of one relate operand.
pub(crate) struct Topology {
    points: PointIndex,
    vertices: Vec<Coordinate>,
    edges: Vec<Edge>,
    areas: Vec<Area>,
    /// Shell envelopes of `areas`, by index.
    area_rtree: SegRTree,
    line_boundary: PointIndex,
    rtree: SegRTree,
    bounds: Rectangle,
    dimension: Dimension,
}

impl Topology {
    pub fn new<G: Components>(geometry: &G) -> Self {
        let mut builder = TopologyBuilder::default();
        geometry.add_components(&mut builder);
        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.dimension == Dimension::Empty
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Dimension of the boundary: the rings of areas, else the odd
    /// endpoints of lines.
    pub fn boundary_dimension(&self) -> Dimension {
        if !self.areas.is_empty() {
            Dimension::One
        } else if !self.line_boundary.coords.is_empty() {
            Dimension::Zero
        } else {
            Dimension::Empty
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn rtree(&self) -> &SegRTree {
        &self.rtree
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points.coords
    }

    /// Isolated points followed by every line and ring vertex.
    pub fn nodes(&self) -> impl Iterator<Item = &Coordinate> {
        self.points.coords.iter().chain(self.vertices.iter())
    }

    /// Areas whose shell envelope lies within `tolerance` of `point`.
    fn areas_near(&self, point: Coordinate, tolerance: f64) -> impl Iterator<Item = &Area> {
        let probe = Rectangle::new(point, point).buffered(tolerance);
        self.area_rtree
            .query_rect(probe)
            .into_iter()
            .map(move |i| &self.areas[i])
    }

    /// Indices of edges passing within `tolerance` of `point`.
    pub fn edges_near(&self, point: Coordinate, tolerance: f64) -> Vec<usize> {
        let probe = Rectangle::new(point, point).buffered(tolerance);
        self.rtree
            .query_rect(probe)
            .into_iter()
            .filter(|&i| {
                let edge = self.edges[i];
                point_segment_distance_sq(point, edge.start, edge.end) <= tolerance * tolerance
            })
            .collect()
    }

    /// Locates a point against the whole geometry. An area interior wins
    /// over everything else, then any boundary, then line and point
    /// interiors.
    pub fn locate(&self, point: Coordinate, tolerance: f64) -> Location {
        let mut on_boundary = false;
        for area in self.areas_near(point, tolerance) {
            match area.locate(point, tolerance) {
                Location::Interior => return Location::Interior,
                Location::Boundary => on_boundary = true,
                Location::Exterior => {}
            }
        }
        if on_boundary || self.line_boundary.contains_near(point, tolerance) {
            return Location::Boundary;
        }
        let on_line = self
            .edges_near(point, tolerance)
            .into_iter()
            .any(|i| self.edges[i].kind == EdgeKind::Line);
        if on_line || self.points.contains_near(point, tolerance) {
            return Location::Interior;
        }
        Location::Exterior
    }

    /// Locates a point against the areas only; lines and points have no
    /// extent there.
    pub fn locate_in_areas(&self, point: Coordinate, tolerance: f64) -> Location {
        let mut location = Location::Exterior;
        for area in self.areas_near(point, tolerance) {
            match area.locate(point, tolerance) {
                Location::Interior => return Location::Interior,
                Location::Boundary => location = Location::Boundary,
                Location::Exterior => {}
            }
        }
        location
    }
}

/// Points packed into an R-tree of degenerate rectangles.
struct PointIndex {
    coords: Vec<Coordinate>,
    rtree: SegRTree,
}

impl PointIndex {
    fn new(coords: Vec<Coordinate>) -> Self {
        let rects: Vec<Rectangle> = coords.iter().map(|&c| Rectangle::new(c, c)).collect();
        PointIndex {
            rtree: SegRTree::new_loaded(16, &rects),
            coords,
        }
    }

    fn contains_near(&self, point: Coordinate, tolerance: f64) -> bool {
        let probe = Rectangle::new(point, point).buffered(tolerance);
        let tolerance_sq = tolerance * tolerance;
        self.rtree.query_rect(probe).into_iter().any(|i| {
            let d = self.coords[i] - point;
            d.dot(d) <= tolerance_sq
        })
    }
}

impl Components for Point {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        if let Some(coord) = self.coordinate() {
            builder.add_point(coord);
        }
    }
}

impl Components for LineString {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        builder.add_line(self.as_slice());
    }
}

impl Components for LinearRing {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        builder.add_line(self.as_slice());
    }
}

impl Components for Polygon {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        builder.add_polygon(self);
    }
}

impl<T: Components> Components for Multi<T> {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        for element in self {
            element.add_components(builder);
        }
    }
}

impl Components for GeometryCollection {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        for element in self {
            element.add_components(builder);
        }
    }
}

impl Components for Geometry {
    fn add_components(&self, builder: &mut TopologyBuilder) {
        match self {
            Geometry::Point(g) => g.add_components(builder),
            Geometry::LineString(g) => g.add_components(builder),
            Geometry::LinearRing(g) => g.add_components(builder),
            Geometry::Polygon(g) => g.add_components(builder),
            Geometry::MultiPoint(g) => g.add_components(builder),
            Geometry::MultiLineString(g) => g.add_components(builder),
            Geometry::MultiPolygon(g) => g.add_components(builder),
            Geometry::GeometryCollection(g) => g.add_components(builder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MultiLineString, MultiPoint, MultiPolygon};

    const TOLERANCE: f64 = 1e-10;

    fn unit_squares(count: usize) -> MultiPolygon {
        Multi::new(
            (0..count)
                .map(|i| {
                    let x = 2. * i as f64;
                    Polygon::new(
                        LinearRing::new(vec![(x, 0.), (x, 1.), (x + 1., 1.), (x + 1., 0.), (x, 0.)]),
                        vec![],
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_locate_among_many_areas() {
        let topology = Topology::new(&unit_squares(2_000));
        assert_eq!(topology.dimension(), Dimension::Two);
        let locate = |x, y| topology.locate(Coordinate::new(x, y), TOLERANCE);
        assert_eq!(locate(1000.5, 0.5), Location::Interior);
        assert_eq!(locate(1000., 0.5), Location::Boundary);
        assert_eq!(locate(1001.5, 0.5), Location::Exterior);
        assert_eq!(locate(3998.5, 0.5), Location::Interior);
        assert_eq!(locate(-1., 0.5), Location::Exterior);
        assert_eq!(
            topology.locate_in_areas(Coordinate::new(1001., 1.), TOLERANCE),
            Location::Boundary
        );
    }

    #[test]
    fn test_locate_on_many_lines() {
        let lines = MultiLineString::new(
            (0..20_000)
                .map(|i| LineString::new(vec![(i as f64, 0.), (i as f64 + 1., 0.)]))
                .collect(),
        );
        let topology = Topology::new(&lines);
        assert_eq!(topology.boundary_dimension(), Dimension::Zero);
        let locate = |x, y| topology.locate(Coordinate::new(x, y), TOLERANCE);
        assert_eq!(locate(0., 0.), Location::Boundary);
        assert_eq!(locate(20_000., 0.), Location::Boundary);
        assert_eq!(locate(1., 0.), Location::Interior);
        assert_eq!(locate(12_345.5, 0.), Location::Interior);
        assert_eq!(locate(0.5, 1.), Location::Exterior);
    }

    #[test]
    fn test_locate_isolated_points() {
        let points = MultiPoint::new(
            (0..10_000)
                .map(|i| Point::new((i as f64, -(i as f64))))
                .collect(),
        );
        let topology = Topology::new(&points);
        assert_eq!(topology.points().len(), 10_000);
        let locate = |x, y| topology.locate(Coordinate::new(x, y), TOLERANCE);
        assert_eq!(locate(9_999., -9_999.), Location::Interior);
        assert_eq!(locate(42., -42.), Location::Interior);
        assert_eq!(locate(42., 42.), Location::Exterior);
        assert_eq!(locate(0.5, -0.5), Location::Exterior);
    }
}
