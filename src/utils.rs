use crate::{Coordinate, Rectangle};

pub(crate) fn rectangles_from_coordinates(coords: &[Coordinate]) -> Vec<Rectangle> {
    coords
        .windows(2)
        .map(|c| Rectangle::new(c[0], c[1]))
        .collect()
}

pub(crate) fn calculate_level_indices(degree: usize, num_items: usize) -> Vec<usize> {
    let mut level_indices: Vec<usize> = vec![0];

    let mut level = 0;
    let mut level_size = num_items;

    while level_size > 1 {
        let level_buffer = if level_size % degree > 0 { 1 } else { 0 };
        // least multiple of degree >= level_size
        let level_capacity = degree * (level_size / degree + level_buffer);
        level_indices.push(level_indices[level] + level_capacity);
        level += 1;
        level_size = level_capacity / degree;
    }
    level_indices
}

/// Contribution of the edge `start -> end` to the winding number of `point`.
pub(crate) fn winding_number(point: Coordinate, start: Coordinate, end: Coordinate) -> i32 {
    // The two halves of the cross-product (= lx - rx)
    let lx = (end.x - start.x) * (point.y - start.y);
    let rx = (end.y - start.y) * (point.x - start.x);

    if start.y <= point.y {
        // Upward crossing
        if end.y > point.y && lx > rx {
            return 1;
        }
    } else {
        // Downward crossing
        if end.y <= point.y && lx < rx {
            return -1;
        }
    }
    0
}

/**
 * Intersect segments A and B, returning the shared piece as a (start, end)
 * pair. A single point of contact has start == end.
 *
 * NB: This does not do an initial check with envelopes; the caller should.
 * Both segments must have non-zero length.
 */
pub(crate) fn intersect_segments(
    start_a: Coordinate,
    end_a: Coordinate,
    start_b: Coordinate,
    end_b: Coordinate,
) -> Option<(Coordinate, Coordinate)> {
    let (start_a, end_a, start_b, end_b) = (start_a.xy(), end_a.xy(), start_b.xy(), end_b.xy());
    if (start_a == start_b && end_a == end_b) || (start_a == end_b && end_a == start_b) {
        return Some((start_a, end_a));
    }

    let da = end_a - start_a;
    let db = end_b - start_b;
    let offset = start_b - start_a;

    let da_x_db = da.cross(db);
    let offset_x_da = offset.cross(da);

    if da_x_db == 0. {
        // Parallel. If the offset is not also parallel, they are disjoint.
        if offset_x_da != 0. {
            return None;
        }
        let da_2 = da.dot(da);
        // Offset, in units of da.
        let t0 = offset.dot(da) / da_2;
        // start_a to end_b, in units of da.
        let t1 = t0 + da.dot(db) / da_2;
        let t_min = t0.min(t1);
        let t_max = t0.max(t1);
        if t_min > 1. || t_max < 0. {
            return None;
        }
        let start = clamp_to_endpoint(start_a + da * t_min.max(0.), &[start_a, end_a, start_b, end_b]);
        let end = clamp_to_endpoint(start_a + da * t_max.min(1.), &[start_a, end_a, start_b, end_b]);
        return Some((start, end));
    }

    let ta = offset.cross(db) / da_x_db;
    let tb = offset_x_da / da_x_db;
    if (0. ..=1.).contains(&ta) && (0. ..=1.).contains(&tb) {
        // Endpoint contacts are reported exactly, not through the parametric form.
        let intersection = if ta == 0. {
            start_a
        } else if ta == 1. {
            end_a
        } else if tb == 0. {
            start_b
        } else if tb == 1. {
            end_b
        } else {
            start_a + da * ta
        };
        return Some((intersection, intersection));
    }
    None
}

fn clamp_to_endpoint(point: Coordinate, endpoints: &[Coordinate]) -> Coordinate {
    endpoints
        .iter()
        .copied()
        .find(|e| approx_eq_coordinates(*e, point))
        .unwrap_or(point)
}

fn approx_eq_coordinates(a: Coordinate, b: Coordinate) -> bool {
    let scale = 1f64.max(a.x.abs()).max(a.y.abs());
    (a.x - b.x).abs() <= scale * 1e-14 && (a.y - b.y).abs() <= scale * 1e-14
}

/// Squared planar distance from `point` to the segment `start -> end`.
pub(crate) fn point_segment_distance_sq(
    point: Coordinate,
    start: Coordinate,
    end: Coordinate,
) -> f64 {
    let d = end - start;
    let offset = point - start;
    let length_sq = d.dot(d);
    if length_sq == 0. {
        return offset.dot(offset);
    }
    let t = (offset.dot(d) / length_sq).max(0.).min(1.);
    let delta = offset - d * t;
    delta.dot(delta)
}

/// Planar distance from `point` to the infinite line through `start` and
/// `end`, or to `start` when the two coincide.
pub(crate) fn perpendicular_distance(point: Coordinate, start: Coordinate, end: Coordinate) -> f64 {
    let d = end - start;
    let length = d.norm();
    if length == 0. {
        return point.distance(&start);
    }
    (d.cross(point - start)).abs() / length
}
