use crate::Coordinate;
use std::fmt;

/// The precision model applied to every coordinate before it is stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Precision {
    /// Coordinates are stored as given.
    Floating,
    /// Each ordinate is rounded to the nearest multiple of `1 / scale`.
    Fixed { scale: f64 },
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Floating
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Floating => write!(f, "Floating"),
            Precision::Fixed { scale } => write!(f, "Fixed(scale: {})", scale),
        }
    }
}

impl Precision {
    /// A fixed precision grid. The sign of `scale` is ignored. A zero or
    /// non-finite scale describes no grid and gives `Floating`.
    pub fn fixed(scale: f64) -> Self {
        let scale = scale.abs();
        if scale > 0. && scale.is_finite() {
            Precision::Fixed { scale }
        } else {
            Precision::Floating
        }
    }

    /// Snaps `value` to the grid. Values the grid cannot represent, and
    /// any value under a degenerate `Fixed` scale, are returned unchanged.
    pub fn convert(&self, value: f64) -> f64 {
        match *self {
            Precision::Floating => value,
            Precision::Fixed { scale } => {
                let snapped = (value * scale).round() / scale;
                if snapped.is_finite() {
                    snapped
                } else {
                    value
                }
            }
        }
    }

    pub fn convert_coordinate(&self, coord: Coordinate) -> Coordinate {
        match self {
            Precision::Floating => coord,
            Precision::Fixed { .. } => Coordinate {
                x: self.convert(coord.x),
                y: self.convert(coord.y),
                z: coord.z.map(|z| self.convert(z)),
                m: coord.m.map(|m| self.convert(m)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floating_is_identity() {
        let c = Coordinate::new_zm(1.000_000_1, -2.5, 3.3, 0.1);
        assert_eq!(Precision::Floating.convert_coordinate(c), c);
        assert_eq!(Precision::default(), Precision::Floating);
    }

    #[test]
    fn test_fixed_rounds_every_ordinate() {
        let p = Precision::fixed(100.);
        let c = p.convert_coordinate(Coordinate::new_zm(1.004, 2.006, -3.006, 4.0001));
        assert_eq!(c, Coordinate::new_zm(1.0, 2.01, -3.01, 4.0));
    }

    #[test]
    fn test_fixed_scale_is_absolute() {
        assert_eq!(Precision::fixed(-10.), Precision::Fixed { scale: 10. });
        assert_eq!(Precision::fixed(1.).convert(-2.5), -3.);
        assert_eq!(Precision::fixed(1.).convert(2.5), 3.);
    }

    #[test]
    fn test_degenerate_scale_is_floating() {
        assert_eq!(Precision::fixed(0.), Precision::Floating);
        assert_eq!(Precision::fixed(-0.), Precision::Floating);
        assert_eq!(Precision::fixed(f64::NAN), Precision::Floating);
        assert_eq!(Precision::fixed(f64::INFINITY), Precision::Floating);
        assert_eq!(Precision::fixed(0.).convert(1.5), 1.5);
    }

    #[test]
    fn test_conversion_stays_finite() {
        assert_eq!(Precision::Fixed { scale: 0. }.convert(1.5), 1.5);
        assert_eq!(Precision::fixed(10.).convert(f64::MAX), f64::MAX);
        assert_eq!(Precision::fixed(10.).convert(-f64::MAX), -f64::MAX);
    }

    #[test]
    fn test_fixed_conversion_is_idempotent() {
        let p = Precision::fixed(1000.);
        for &v in &[0.1234, 17.98765, -0.0005, 123456.7891] {
            let once = p.convert(v);
            assert_eq!(p.convert(once), once);
        }
    }
}
