use crate::Coordinate;
use std::fmt;
use thiserror::Error;

/// A 1-based line and column in WKT input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WktError {
    #[error("Unexpected character '{character}' at {position}")]
    UnexpectedCharacter { character: char, position: Position },

    #[error("Unknown keyword '{word}' at {position}")]
    UnknownKeyword { word: String, position: Position },

    #[error("Invalid number '{literal}' at {position}")]
    InvalidNumber { literal: String, position: Position },

    #[error("Expected {expected} but found {found} at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("Coordinate has {found} ordinates, expected {expected} at {position}")]
    InvalidCoordinateArity {
        expected: usize,
        found: usize,
        position: Position,
    },

    #[error("Member declares {found} inside a {declared} collection at {position}")]
    DimensionMismatch {
        declared: String,
        found: String,
        position: Position,
    },

    #[error("Unexpected {found} after end of geometry at {position}")]
    TrailingInput { found: String, position: Position },

    #[error("Collections nested deeper than {limit} at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Path has only 1 coordinate")]
    SinglePathCoordinate,

    #[error("Degenerate segment {index} at {position}")]
    DegenerateSegment { index: usize, position: Coordinate },

    #[error("Overlapping segments {first_index} {second_index} between {start} and {end}")]
    OverlappingSegments {
        first_index: usize,
        second_index: usize,
        start: Coordinate,
        end: Coordinate,
    },

    #[error("Self-intersection for segments {first_index} {second_index} at {position}")]
    SelfIntersection {
        first_index: usize,
        second_index: usize,
        position: Coordinate,
    },

    #[error("Path is not a ring: first and last coordinates are not equal")]
    NotARing,

    #[error("Ring has {count} coordinates, at least 4 are required")]
    TooFewRingCoordinates { count: usize },

    #[error("Ring {ring} is invalid: {source}")]
    InvalidRing {
        ring: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Hole {hole} is not inside the shell")]
    HoleOutsideShell { hole: usize },

    #[error("Hole {hole} is nested inside hole {other}")]
    NestedHoles { hole: usize, other: usize },

    #[error("Rings {first_ring} and {second_ring} meet in more than one point")]
    MultipleIntersections {
        first_ring: usize,
        second_ring: usize,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    #[error("Intersection matrix must have 9 symbols, found {length}")]
    InvalidLength { length: usize },

    #[error("Invalid intersection matrix symbol '{symbol}' at index {index}")]
    InvalidSymbol { symbol: char, index: usize },
}
