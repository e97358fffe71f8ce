use super::point_in_polygon::locate_in_ring;
use crate::errors::ValidationError;
use crate::errors::ValidationError::*;
use crate::utils::{intersect_segments, rectangles_from_coordinates};
use crate::{
    Coordinate, CoordinateSequence, GeometryType, HasBounds, LineString, LinearRing,
    Location, Polygon, SegRTree,
};
use log::debug;

/// A ring's planar coordinates with their segment index.
struct IndexedPath {
    coords: Vec<Coordinate>,
    rtree: SegRTree,
}

impl IndexedPath {
    fn new<T: CoordinateSequence>(path: &T) -> Self {
        let coords: Vec<Coordinate> = path.iter().map(Coordinate::xy).collect();
        let rtree = SegRTree::new_loaded(16, &rectangles_from_coordinates(&coords));
        IndexedPath { coords, rtree }
    }

    fn locate(&self, point: Coordinate) -> Location {
        locate_in_ring(point, &self.coords, &self.rtree, 0.)
    }
}

fn validate_path(coords: &[Coordinate], rtree: &SegRTree) -> Result<(), ValidationError> {
    if coords.len() == 1 {
        return Err(SinglePathCoordinate);
    }
    for (index, range) in coords.windows(2).enumerate() {
        if range[0] == range[1] {
            return Err(DegenerateSegment {
                index,
                position: range[0],
            });
        }
    }

    for (index_a, index_b) in rtree.query_self_intersections() {
        check_intersection(index_a, index_b, coords)?;
    }
    Ok(())
}

fn check_intersection(
    index: usize,
    other_index: usize,
    coords: &[Coordinate],
) -> Result<(), ValidationError> {
    let first_index = index.min(other_index);
    let second_index = index.max(other_index);
    let first_start = coords[first_index];
    let first_end = coords[first_index + 1];
    let second_start = coords[second_index];
    let second_end = coords[second_index + 1];
    let (isxn_start, isxn_end) =
        match intersect_segments(first_start, first_end, second_start, second_end) {
            None => return Ok(()),
            Some(isxn) => isxn,
        };
    if isxn_start != isxn_end {
        return Err(OverlappingSegments {
            first_index,
            second_index,
            start: isxn_start,
            end: isxn_end,
        });
    }
    // Neighbouring segments share a vertex, and so do the first and last
    // segments of a closed path.
    let allowed = if first_index + 1 == second_index {
        isxn_start == second_start
    } else if first_index == 0 && second_index == coords.len() - 2 {
        isxn_start == first_start && isxn_start == second_end
    } else {
        false
    };
    if allowed {
        Ok(())
    } else {
        Err(SelfIntersection {
            first_index,
            second_index,
            position: isxn_start,
        })
    }
}

fn validate_ring_path(path: &IndexedPath) -> Result<(), ValidationError> {
    let count = path.coords.len();
    if count == 0 {
        return Ok(());
    }
    if path.coords.first() != path.coords.last() {
        return Err(NotARing);
    }
    if count < 4 {
        return Err(TooFewRingCoordinates { count });
    }
    validate_path(&path.coords, &path.rtree)
}

impl LineString {
    /// Checks that the path is simple: no repeated consecutive coordinates
    /// and no crossings or overlaps between its segments.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let path = IndexedPath::new(self);
        validate_path(&path.coords, &path.rtree).map_err(|e| {
            debug!("Invalid line string: {}", e);
            e
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl LinearRing {
    /// The line string checks, plus closure and at least 4 coordinates.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_ring_path(&IndexedPath::new(self)).map_err(|e| {
            debug!("Invalid linear ring: {}", e);
            e
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl Polygon {
    /// Checks every ring, then the placement of the holes: inside the
    /// shell, not nested in each other, and touching any other ring in at
    /// most one point.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_rings().map_err(|e| {
            debug!("Invalid polygon: {}", e);
            e
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate_rings(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Ok(());
        }
        let rings: Vec<IndexedPath> = self.rings().map(IndexedPath::new).collect();
        for (index, ring) in rings.iter().enumerate() {
            validate_ring_path(ring).map_err(|e| InvalidRing {
                ring: index,
                source: Box::new(e),
            })?;
        }

        let shell = &rings[0];
        let shell_bounds = self.shell().bounds();
        for (i, hole) in rings.iter().enumerate().skip(1) {
            if hole.coords.is_empty() {
                continue;
            }
            let hole_bounds = self.holes()[i - 1].bounds();
            if shell_bounds == hole_bounds || !shell_bounds.contains_rect(hole_bounds) {
                return Err(HoleOutsideShell { hole: i });
            }

            let touch = find_intersecting_point(0, shell, i, hole)?;
            if shell.locate(find_nonequal_point(&hole.coords, touch)) != Location::Interior {
                return Err(HoleOutsideShell { hole: i });
            }

            for (j, other) in rings.iter().enumerate().take(i).skip(1) {
                if other.coords.is_empty() || !hole.rtree.envelope().intersects(other.rtree.envelope()) {
                    continue;
                }
                let touch = find_intersecting_point(i, hole, j, other)?;
                if other.locate(find_nonequal_point(&hole.coords, touch)) == Location::Interior {
                    return Err(NestedHoles { hole: i, other: j });
                }
                if hole.locate(find_nonequal_point(&other.coords, touch)) == Location::Interior {
                    return Err(NestedHoles { hole: j, other: i });
                }
            }
        }
        Ok(())
    }
}

/// Find 0 or 1 points where two rings meet. Two or more points, or a shared
/// segment, make the polygon invalid.
fn find_intersecting_point(
    index_a: usize,
    ring_a: &IndexedPath,
    index_b: usize,
    ring_b: &IndexedPath,
) -> Result<Option<Coordinate>, ValidationError> {
    let mut final_intersection = None;
    for (seg_a, seg_b) in ring_a.rtree.query_other_intersections(&ring_b.rtree) {
        let start_a = ring_a.coords[seg_a];
        let end_a = ring_a.coords[seg_a + 1];
        let start_b = ring_b.coords[seg_b];
        let end_b = ring_b.coords[seg_b + 1];

        let (isxn_start, isxn_end) = match intersect_segments(start_a, end_a, start_b, end_b) {
            None => continue,
            Some(isxn) => isxn,
        };
        if isxn_start != isxn_end {
            return Err(OverlappingSegments {
                first_index: seg_a,
                second_index: seg_b,
                start: isxn_start,
                end: isxn_end,
            });
        }
        match final_intersection {
            None => final_intersection = Some(isxn_start),
            // A vertex contact is reported once for each segment touching it.
            Some(p) if p == isxn_start => {}
            Some(_) => {
                return Err(MultipleIntersections {
                    first_ring: index_a,
                    second_ring: index_b,
                })
            }
        }
    }
    Ok(final_intersection)
}

/// A vertex of a valid ring that is not `needle`. Valid rings have at least
/// three distinct vertices, so one always exists.
fn find_nonequal_point(coords: &[Coordinate], needle: Option<Coordinate>) -> Coordinate {
    coords
        .iter()
        .copied()
        .find(|&coord| needle != Some(coord))
        .unwrap_or(coords[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: Vec<(f64, f64)>) -> LinearRing {
        LinearRing::new(coords)
    }

    fn square(x: f64, y: f64, size: f64) -> LinearRing {
        ring(vec![
            (x, y),
            (x + size, y),
            (x + size, y + size),
            (x, y + size),
            (x, y),
        ])
    }

    #[test]
    fn test_valid_line_strings() {
        assert!(LineString::empty().is_valid());
        assert!(LineString::new(vec![(0., 0.), (1., 1.)]).is_valid());
        assert!(LineString::new(vec![(0., 0.), (1., 1.), (2., 0.), (3., 1.)]).is_valid());
        assert!(LineString::new(vec![(0., 0.), (1., 0.), (1., 1.), (0., 0.)]).is_valid());
    }

    #[test]
    fn test_single_coordinate() {
        assert_eq!(
            LineString::new(vec![(0., 0.)]).validate(),
            Err(SinglePathCoordinate)
        );
    }

    #[test]
    fn test_degenerate_segment() {
        assert_eq!(
            LineString::new(vec![(0., 0.), (1., 1.), (1., 1.)]).validate(),
            Err(DegenerateSegment {
                index: 1,
                position: Coordinate::new(1., 1.)
            })
        );
    }

    #[test]
    fn test_self_intersection() {
        let bow_tie = LineString::new(vec![(0., 0.), (2., 2.), (2., 0.), (0., 2.)]);
        assert_eq!(
            bow_tie.validate(),
            Err(SelfIntersection {
                first_index: 0,
                second_index: 2,
                position: Coordinate::new(1., 1.)
            })
        );
    }

    #[test]
    fn test_overlap() {
        let doubled_back = LineString::new(vec![(0., 0.), (2., 0.), (1., 0.)]);
        assert_eq!(
            doubled_back.validate(),
            Err(OverlappingSegments {
                first_index: 0,
                second_index: 1,
                start: Coordinate::new(1., 0.),
                end: Coordinate::new(2., 0.)
            })
        );
    }

    #[test]
    fn test_ring_rules() {
        assert!(square(0., 0., 1.).is_valid());
        assert!(LinearRing::empty().is_valid());
        assert_eq!(
            ring(vec![(0., 0.), (1., 0.), (1., 1.)]).validate(),
            Err(NotARing)
        );
        assert_eq!(
            ring(vec![(0., 0.), (1., 0.), (0., 0.)]).validate(),
            Err(TooFewRingCoordinates { count: 3 })
        );
    }

    #[test]
    fn test_polygon_with_holes() {
        let polygon = Polygon::new(
            square(0., 0., 10.),
            vec![square(1., 1., 2.), square(5., 5., 2.)],
        );
        assert_eq!(polygon.validate(), Ok(()));
        assert!(Polygon::empty().is_valid());
    }

    #[test]
    fn test_hole_touching_shell_once() {
        let polygon = Polygon::new(
            square(0., 0., 10.),
            vec![ring(vec![(0., 5.), (3., 4.), (3., 6.), (0., 5.)])],
        );
        assert_eq!(polygon.validate(), Ok(()));
    }

    #[test]
    fn test_hole_outside_shell() {
        let polygon = Polygon::new(square(0., 0., 10.), vec![square(20., 20., 1.)]);
        assert_eq!(polygon.validate(), Err(HoleOutsideShell { hole: 1 }));
    }

    #[test]
    fn test_nested_holes() {
        let polygon = Polygon::new(
            square(0., 0., 10.),
            vec![square(1., 1., 6.), square(2., 2., 1.)],
        );
        assert_eq!(polygon.validate(), Err(NestedHoles { hole: 2, other: 1 }));
    }

    #[test]
    fn test_hole_sharing_two_points() {
        let polygon = Polygon::new(
            square(0., 0., 10.),
            vec![ring(vec![(0., 2.), (5., 5.), (0., 8.), (2., 5.), (0., 2.)])],
        );
        assert_eq!(
            polygon.validate(),
            Err(MultipleIntersections {
                first_ring: 0,
                second_ring: 1
            })
        );
    }

    #[test]
    fn test_invalid_ring_is_reported_with_index() {
        let polygon = Polygon::new(
            square(0., 0., 10.),
            vec![ring(vec![(1., 1.), (2., 1.), (2., 2.)])],
        );
        assert_eq!(
            polygon.validate(),
            Err(InvalidRing {
                ring: 1,
                source: Box::new(NotARing)
            })
        );
    }
}
