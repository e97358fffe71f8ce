#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use simple_features::{Coordinate, LineString, LinearRing, Polygon, Rectangle};

//// Utility functions

/// A star-shaped ring around `center` whose vertex radii vary randomly
/// between `radius / 2` and `radius`.
pub(crate) fn make_star_ring(center: Coordinate, radius: f64, n: usize, seed: u64) -> LinearRing {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut coords: Vec<Coordinate> = (0..n)
        .map(|i| {
            let angle = 2. * PI * i as f64 / n as f64;
            let r = rng.gen_range(radius / 2., radius);
            Coordinate::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect();
    coords.push(coords[0]);
    LinearRing::new(coords)
}

pub(crate) fn make_star_polygon(center: Coordinate, radius: f64, n: usize, seed: u64) -> Polygon {
    Polygon::new(make_star_ring(center, radius, n, seed), vec![])
}

/// A random walk of `n` steps of at most `step` in each direction.
pub(crate) fn make_random_walk(n: usize, step: f64, seed: u64) -> LineString {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut current = Coordinate::new(0., 0.);
    let mut coords = Vec::with_capacity(n);
    for _i in 0..n {
        coords.push(current);
        current = Coordinate::new(
            current.x + rng.gen_range(-step, step),
            current.y + rng.gen_range(-step, step),
        );
    }
    LineString::new(coords)
}

pub(crate) fn get_random_points(rect: Rectangle, n: usize, seed: u64) -> Vec<Coordinate> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut results = Vec::new();
    for _i in 0..n {
        results.push(Coordinate::new(
            rng.gen_range(rect.x_min, rect.x_max),
            rng.gen_range(rect.y_min, rect.y_max),
        ));
    }

    results
}
