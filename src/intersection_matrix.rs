use crate::errors::MatrixError;
use crate::Dimension;
use std::fmt;
use std::str::FromStr;

/// The three point-set classes of a geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    Interior = 0,
    Boundary = 1,
    Exterior = 2,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Interior, Location::Boundary, Location::Exterior];
}

/// A DE-9IM intersection matrix.
///
/// Rows are the interior, boundary and exterior of geometry A, columns the
/// same classes of geometry B. Each cell holds the dimension of the
/// intersection of the two classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct IntersectionMatrix {
    cells: [[Dimension; 3]; 3],
}

impl IntersectionMatrix {
    /// A matrix with every cell empty.
    pub fn new() -> Self {
        IntersectionMatrix::default()
    }

    pub fn get(&self, row: Location, column: Location) -> Dimension {
        self.cells[row as usize][column as usize]
    }

    pub fn set(&mut self, row: Location, column: Location, dimension: Dimension) {
        self.cells[row as usize][column as usize] = dimension;
    }

    /// Raises the cell to `dimension` if it is currently lower.
    pub fn set_at_least(&mut self, row: Location, column: Location, dimension: Dimension) {
        let cell = &mut self.cells[row as usize][column as usize];
        if dimension > *cell {
            *cell = dimension;
        }
    }

    /// The matrix with A and B swapped.
    pub fn transposed(&self) -> IntersectionMatrix {
        let mut cells = self.cells;
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.cells[j][i];
            }
        }
        IntersectionMatrix { cells }
    }

    /// Tests the matrix against a nine symbol pattern in row-major order.
    ///
    /// Symbols: `0`, `1`, `2` require that exact dimension, `T` any
    /// non-empty dimension, `F` an empty cell, `*` anything. A pattern of
    /// the wrong length or with any other symbol never matches.
    pub fn matches(&self, pattern: &str) -> bool {
        if pattern.chars().count() != 9 {
            return false;
        }
        pattern
            .chars()
            .zip(self.iter_cells())
            .all(|(symbol, dimension)| match symbol {
                '*' => true,
                'T' | 't' => dimension != Dimension::Empty,
                _ => Dimension::from_symbol(symbol) == Some(dimension),
            })
    }

    pub fn is_disjoint(&self) -> bool {
        self.matches("FF*FF****")
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    pub fn is_equals(&self) -> bool {
        self.matches("T*F**FFF*")
    }

    /// Never true when both operands are puntal.
    pub fn is_touches(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        if dimension_a == Dimension::Zero && dimension_b == Dimension::Zero {
            return false;
        }
        self.matches("FT*******") || self.matches("F**T*****") || self.matches("F***T****")
    }

    pub fn is_crosses(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        if dimension_a == Dimension::One && dimension_b == Dimension::One {
            self.matches("0********")
        } else if dimension_a < dimension_b {
            self.matches("T*T******")
        } else if dimension_a > dimension_b {
            self.matches("T*****T**")
        } else {
            false
        }
    }

    pub fn is_within(&self) -> bool {
        self.matches("T*F**F***")
    }

    pub fn is_contains(&self) -> bool {
        self.matches("T*****FF*")
    }

    /// Only defined for operands of equal dimension.
    pub fn is_overlaps(&self, dimension_a: Dimension, dimension_b: Dimension) -> bool {
        match (dimension_a, dimension_b) {
            (Dimension::Zero, Dimension::Zero) | (Dimension::Two, Dimension::Two) => {
                self.matches("T*T***T**")
            }
            (Dimension::One, Dimension::One) => self.matches("1*T***T**"),
            _ => false,
        }
    }

    pub fn is_covers(&self) -> bool {
        ["T*****FF*", "*T****FF*", "***T**FF*", "****T*FF*"]
            .iter()
            .any(|pattern| self.matches(pattern))
    }

    pub fn is_covered_by(&self) -> bool {
        ["T*F**F***", "*TF**F***", "**FT*F***", "**F*TF***"]
            .iter()
            .any(|pattern| self.matches(pattern))
    }

    fn iter_cells(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dimension in self.iter_cells() {
            write!(f, "{}", dimension.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for IntersectionMatrix {
    type Err = MatrixError;

    /// Parses the nine symbol form written by `Display`, e.g. `212101212`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != 9 {
            return Err(MatrixError::InvalidLength { length });
        }
        let mut matrix = IntersectionMatrix::new();
        for (index, symbol) in s.chars().enumerate() {
            let dimension = Dimension::from_symbol(symbol)
                .ok_or(MatrixError::InvalidSymbol { symbol, index })?;
            matrix.cells[index / 3][index % 3] = dimension;
        }
        Ok(matrix)
    }
}
