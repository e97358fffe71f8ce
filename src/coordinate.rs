use std::fmt;
use std::ops::{Add, Mul, Sub};

/// The ordinates a coordinate carries beyond x and y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateKind {
    Xy,
    Xym,
    Xyz,
    Xyzm,
}

impl CoordinateKind {
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => CoordinateKind::Xy,
            (false, true) => CoordinateKind::Xym,
            (true, false) => CoordinateKind::Xyz,
            (true, true) => CoordinateKind::Xyzm,
        }
    }

    pub fn has_z(self) -> bool {
        matches!(self, CoordinateKind::Xyz | CoordinateKind::Xyzm)
    }

    pub fn has_m(self) -> bool {
        matches!(self, CoordinateKind::Xym | CoordinateKind::Xyzm)
    }

    /// Number of ordinates in a tuple of this kind.
    pub fn arity(self) -> usize {
        2 + self.has_z() as usize + self.has_m() as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl From<(f64, f64)> for Coordinate {
    fn from(coord: (f64, f64)) -> Self {
        Coordinate::new(coord.0, coord.1)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from(coord: (f64, f64, f64)) -> Self {
        Coordinate::new_z(coord.0, coord.1, coord.2)
    }
}

impl From<(f64, f64, f64, f64)> for Coordinate {
    fn from(coord: (f64, f64, f64, f64)) -> Self {
        Coordinate::new_zm(coord.0, coord.1, coord.2, coord.3)
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl From<Coordinate> for (f64, f64, Option<f64>, Option<f64>) {
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y, coord.z, coord.m)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}", self.x, self.y)?;
        if let Some(z) = self.z {
            write!(f, ", z: {}", z)?;
        }
        if let Some(m) = self.m {
            write!(f, ", m: {}", m)?;
        }
        write!(f, ")")
    }
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate {
            x,
            y,
            z: None,
            m: None,
        }
    }

    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Coordinate {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    pub fn new_m(x: f64, y: f64, m: f64) -> Self {
        Coordinate {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }

    pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Coordinate {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    pub fn kind(&self) -> CoordinateKind {
        CoordinateKind::from_flags(self.z.is_some(), self.m.is_some())
    }

    /// 3 when the coordinate has a z ordinate, 2 otherwise.
    pub fn spatial_dimension(&self) -> usize {
        if self.z.is_some() {
            3
        } else {
            2
        }
    }

    /// The planar part of this coordinate, with z and m dropped.
    pub fn xy(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// True if x and y are equal, ignoring z and m.
    pub fn xy_eq(&self, other: &Coordinate) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.map_or(true, f64::is_finite)
            && self.m.map_or(true, f64::is_finite)
    }

    /// Planar euclidean distance; z and m are ignored.
    pub fn distance(&self, other: &Coordinate) -> f64 {
        (*other - *self).norm()
    }

    /// Length of the vector (x, y).
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Cross product of the vector self x rhs
    pub fn cross(&self, rhs: Coordinate) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Dot product of the vector self . rhs
    pub fn dot(&self, rhs: Coordinate) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }
}

// Vector arithmetic is planar: results never carry z or m.

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Coordinate::new(self.x * rhs, self.y * rhs)
    }
}
