use std::fmt;

/// Tag naming how coordinates are to be interpreted. It never changes how
/// they are stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateReferenceSystem {
    /// Planar x/y coordinates.
    Cartesian,
    /// Longitude/latitude in degrees.
    Geographic,
}

impl Default for CoordinateReferenceSystem {
    fn default() -> Self {
        CoordinateReferenceSystem::Cartesian
    }
}

impl fmt::Display for CoordinateReferenceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateReferenceSystem::Cartesian => write!(f, "Cartesian"),
            CoordinateReferenceSystem::Geographic => write!(f, "Geographic"),
        }
    }
}
