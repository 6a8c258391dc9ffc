#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Topological location of a point relative to a geometry.
///
/// An unknown location is represented with `Option<Location>` (`None`) throughout the graph.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Single character symbol (`i`, `b`, `e`).
    pub fn symbol(loc: Option<Location>) -> char {
        match loc {
            Some(Location::Interior) => 'i',
            Some(Location::Boundary) => 'b',
            Some(Location::Exterior) => 'e',
            None => '-',
        }
    }
}

/// Position relative to a directed edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    /// On the edge itself.
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Opposite side, [Position::On] maps to itself.
    #[inline]
    pub fn opposite(self) -> Position {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
            Position::On => Position::On,
        }
    }
}

/// Topological dimension of a geometry, ordered so that `Empty < Point < Line < Area`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// Dimension of an empty geometry collection.
    Empty,
    Point,
    Line,
    Area,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_opposite() {
        assert_eq!(Position::Left.opposite(), Position::Right);
        assert_eq!(Position::Right.opposite(), Position::Left);
        assert_eq!(Position::On.opposite(), Position::On);
        assert_eq!(Position::Right.index(), 2);
    }

    #[test]
    fn dimension_order() {
        assert!(Dimension::Empty < Dimension::Point);
        assert!(Dimension::Line < Dimension::Area);
        assert_eq!(Dimension::Point.max(Dimension::Area), Dimension::Area);
    }
}
