use crate::Coordinate;

/// An axis-aligned bounding box. The empty rectangle has NaN bounds.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

/// Anything with an axis-aligned bounding box.
pub trait HasBounds {
    fn bounds(&self) -> Rectangle;
}

impl PartialEq for Rectangle {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            other.is_empty()
        } else {
            self.x_min == other.x_min
                && self.y_min == other.y_min
                && self.x_max == other.x_max
                && self.y_max == other.y_max
        }
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Rectangle::new_empty()
    }
}

impl Rectangle {
    pub fn new(p1: Coordinate, p2: Coordinate) -> Self {
        Rectangle {
            x_min: p1.x.min(p2.x),
            y_min: p1.y.min(p2.y),
            x_max: p1.x.max(p2.x),
            y_max: p1.y.max(p2.y),
        }
    }

    pub fn new_empty() -> Self {
        Rectangle {
            x_min: f64::NAN,
            y_min: f64::NAN,
            x_max: f64::NAN,
            y_max: f64::NAN,
        }
    }

    pub fn of(rects: &[Rectangle]) -> Self {
        rects.iter().fold(Rectangle::new_empty(), |mut s, r| {
            s.expand(*r);
            s
        })
    }

    /// The smallest rectangle enclosing every coordinate.
    pub fn of_coordinates<'a, I>(coords: I) -> Self
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        coords.into_iter().fold(Rectangle::new_empty(), |mut s, c| {
            s.expand_to(*c);
            s
        })
    }

    pub fn is_empty(&self) -> bool {
        self.x_min.is_nan() || self.y_min.is_nan() || self.x_max.is_nan() || self.y_max.is_nan()
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(self.x_min, self.y_min)
    }

    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.x_max, self.y_max)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate {
            x: (self.x_max + self.x_min) / 2.,
            y: (self.y_max + self.y_min) / 2.,
            z: None,
            m: None,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn intersects(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_max
            && self.x_max >= other.x_min
            && self.y_min <= other.y_max
            && self.y_max >= other.y_min
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        self.x_min <= point.x
            && point.x <= self.x_max
            && self.y_min <= point.y
            && point.y <= self.y_max
    }

    pub fn contains_rect(&self, other: Rectangle) -> bool {
        self.x_min <= other.x_min
            && self.x_max >= other.x_max
            && self.y_min <= other.y_min
            && self.y_max >= other.y_max
    }

    pub fn expand(&mut self, other: Rectangle) {
        self.x_min = self.x_min.min(other.x_min);
        self.y_min = self.y_min.min(other.y_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_max = self.y_max.max(other.y_max);
    }

    pub fn expand_to(&mut self, point: Coordinate) {
        self.expand(Rectangle::new(point, point));
    }

    /// A copy grown by `margin` on every side.
    pub fn buffered(&self, margin: f64) -> Rectangle {
        Rectangle {
            x_min: self.x_min - margin,
            y_min: self.y_min - margin,
            x_max: self.x_max + margin,
            y_max: self.y_max + margin,
        }
    }
}
