use std::fmt;

/// Topological dimension of a point set. `Empty` orders below every other
/// value so that the dimension of a union is the maximum of its parts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Empty,
    Zero,
    One,
    Two,
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Empty
    }
}

impl Dimension {
    /// The DE-9IM symbol for this dimension: `F`, `0`, `1` or `2`.
    pub fn symbol(self) -> char {
        match self {
            Dimension::Empty => 'F',
            Dimension::Zero => '0',
            Dimension::One => '1',
            Dimension::Two => '2',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'F' | 'f' => Some(Dimension::Empty),
            '0' => Some(Dimension::Zero),
            '1' => Some(Dimension::One),
            '2' => Some(Dimension::Two),
            _ => None,
        }
    }

    /// -1 for `Empty`, otherwise the dimension as an integer.
    pub fn value(self) -> i8 {
        match self {
            Dimension::Empty => -1,
            Dimension::Zero => 0,
            Dimension::One => 1,
            Dimension::Two => 2,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Dimension::Empty < Dimension::Zero);
        assert!(Dimension::One < Dimension::Two);
        assert_eq!(
            [Dimension::One, Dimension::Empty, Dimension::Zero]
                .iter()
                .max()
                .copied(),
            Some(Dimension::One)
        );
    }

    #[test]
    fn test_symbols() {
        for &d in &[Dimension::Empty, Dimension::Zero, Dimension::One, Dimension::Two] {
            assert_eq!(Dimension::from_symbol(d.symbol()), Some(d));
        }
        assert_eq!(Dimension::from_symbol('T'), None);
        assert_eq!(Dimension::Empty.value(), -1);
    }
}
