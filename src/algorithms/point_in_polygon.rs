use crate::utils::{point_segment_distance_sq, rectangles_from_coordinates, winding_number};
use crate::{Coordinate, CoordinateSequence, Location, Polygon, Rectangle, SegRTree};

/// Locates `point` against a closed ring whose segments are indexed by
/// `rtree`. Points within `tolerance` of a segment are on the boundary.
pub(crate) fn locate_in_ring(
    point: Coordinate,
    coords: &[Coordinate],
    rtree: &SegRTree,
    tolerance: f64,
) -> Location {
    let probe = Rectangle::new(point, point).buffered(tolerance);
    let on_boundary = rtree.query_rect(probe).into_iter().any(|i| {
        point_segment_distance_sq(point, coords[i], coords[i + 1]) <= tolerance * tolerance
    });
    if on_boundary {
        return Location::Boundary;
    }

    let mut wn: i32 = 0;

    // Stack entries: (level, offset)
    let mut stack = vec![(rtree.height(), 0)];
    while let Some((level, offset)) = stack.pop() {
        let rect = rtree.get_rectangle(level, offset);
        if rect.x_min > point.x {
            // The whole run of segments lies to the right of the point, so
            // its crossings net out to those of the chord joining its ends.
            let (low, high) = rtree.get_low_high(level, offset);
            wn += winding_number(point, coords[low], coords[high]);
            continue;
        }
        if !rect.contains(point) {
            continue;
        }
        if level == 0 {
            wn += winding_number(point, coords[offset], coords[offset + 1]);
        } else {
            let child_level = level - 1;
            let first_child_offset = rtree.degree() * offset;
            for child_offset in first_child_offset..(first_child_offset + rtree.degree()) {
                stack.push((child_level, child_offset));
            }
        }
    }

    if wn != 0 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates `point` against a polygon: interior, on one of its rings, or
/// exterior. Open or degenerate rings enclose nothing.
pub fn point_in_polygon(point: Coordinate, polygon: &Polygon) -> Location {
    let point = point.xy();
    let mut rings = polygon.rings().map(|ring| {
        let coords: Vec<Coordinate> = ring.iter().map(Coordinate::xy).collect();
        let rtree = SegRTree::new_loaded(16, &rectangles_from_coordinates(&coords));
        let closed = ring.area() > 0.;
        (coords, rtree, closed)
    });

    let (shell, shell_rtree, shell_closed) = match rings.next() {
        Some(shell) => shell,
        None => return Location::Exterior,
    };
    match locate_in_ring(point, &shell, &shell_rtree, 0.) {
        Location::Interior if shell_closed => {}
        Location::Boundary => return Location::Boundary,
        _ => return Location::Exterior,
    }
    for (hole, hole_rtree, hole_closed) in rings {
        match locate_in_ring(point, &hole, &hole_rtree, 0.) {
            Location::Boundary => return Location::Boundary,
            Location::Interior if hole_closed => return Location::Exterior,
            _ => {}
        }
    }
    Location::Interior
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearRing;

    fn unit_square() -> Polygon {
        Polygon::new(
            LinearRing::new(vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.), (0., 0.)]),
            vec![],
        )
    }

    #[test]
    fn check_containment() {
        let square = unit_square();
        assert_eq!(point_in_polygon((0.5, 0.5).into(), &square), Location::Interior);
        assert_eq!(point_in_polygon((0.0, 0.0).into(), &square), Location::Boundary);
        assert_eq!(point_in_polygon((0.5, 0.0).into(), &square), Location::Boundary);
        assert_eq!(point_in_polygon((0.0, 0.5).into(), &square), Location::Boundary);
        assert_eq!(point_in_polygon((1.1, 0.0).into(), &square), Location::Exterior);
    }

    #[test]
    fn check_holes() {
        let polygon = Polygon::new(
            LinearRing::new(vec![(0., 0.), (0., 10.), (10., 10.), (10., 0.), (0., 0.)]),
            vec![LinearRing::new(vec![(2., 2.), (4., 2.), (4., 4.), (2., 4.), (2., 2.)])],
        );
        assert_eq!(point_in_polygon((3., 3.).into(), &polygon), Location::Exterior);
        assert_eq!(point_in_polygon((4., 3.).into(), &polygon), Location::Boundary);
        assert_eq!(point_in_polygon((5., 5.).into(), &polygon), Location::Interior);
    }

    #[test]
    fn check_large_ring_uses_chord_shortcut() {
        // A 200-gon approximating a circle of radius 10.
        let mut coords: Vec<(f64, f64)> = (0..200)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::PI * 2. / 200.;
                (10. * angle.cos(), 10. * angle.sin())
            })
            .collect();
        coords.push(coords[0]);
        let circle = Polygon::new(LinearRing::new(coords), vec![]);
        assert_eq!(point_in_polygon((0., 0.).into(), &circle), Location::Interior);
        assert_eq!(point_in_polygon((-9.5, 0.1).into(), &circle), Location::Interior);
        assert_eq!(point_in_polygon((10.5, 0.).into(), &circle), Location::Exterior);
        assert_eq!(point_in_polygon((-10.5, 0.).into(), &circle), Location::Exterior);
    }

    #[test]
    fn check_empty_and_open() {
        assert_eq!(
            point_in_polygon((0., 0.).into(), &Polygon::empty()),
            Location::Exterior
        );
        let open = Polygon::new(
            LinearRing::new(vec![(0., 0.), (0., 1.), (1., 1.), (1., 0.)]),
            vec![],
        );
        assert_eq!(point_in_polygon((0.5, 0.5).into(), &open), Location::Exterior);
    }
}
