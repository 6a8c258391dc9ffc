use crate::core::{math::Coord, traits::Real};

/// Failure raised while building or labelling a topology graph.
///
/// Every variant carries the coordinate where the problem was found (widened to `f64`).
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("side location conflict [ ({}, {}) ]", .coord.x, .coord.y)]
    SideLocationConflict { coord: Coord<f64> },

    #[error("no outgoing dirEdge found [ ({}, {}) ]", .coord.x, .coord.y)]
    NoOutgoingDirEdge { coord: Coord<f64> },

    #[error("unable to assign hole to a shell [ ({}, {}) ]", .coord.x, .coord.y)]
    UnassignedHole { coord: Coord<f64> },

    #[error("directed edge visited twice during ring-building [ ({}, {}) ]", .coord.x, .coord.y)]
    RingVisitedTwice { coord: Coord<f64> },

    #[error("found null directed edge [ ({}, {}) ]", .coord.x, .coord.y)]
    NullDirectedEdge { coord: Coord<f64> },

    #[error("found non-noded intersection [ ({}, {}) ]", .coord.x, .coord.y)]
    NonNodedIntersection { coord: Coord<f64> },

    #[error("invalid input geometry, too few points [ ({}, {}) ]", .coord.x, .coord.y)]
    InvalidInput { coord: Coord<f64> },
}

/// Widen a coordinate for storing in a [TopologyError].
#[inline]
pub(crate) fn err_coord<T>(c: Coord<T>) -> Coord<f64>
where
    T: Real,
{
    Coord {
        x: c.x.as_f64(),
        y: c.y.as_f64(),
    }
}

impl TopologyError {
    /// Coordinate where the error was found.
    pub fn coord(&self) -> Coord<f64> {
        match *self {
            TopologyError::SideLocationConflict { coord }
            | TopologyError::NoOutgoingDirEdge { coord }
            | TopologyError::UnassignedHole { coord }
            | TopologyError::RingVisitedTwice { coord }
            | TopologyError::NullDirectedEdge { coord }
            | TopologyError::NonNodedIntersection { coord }
            | TopologyError::InvalidInput { coord } => coord,
        }
    }

    /// `true` for robustness failures which may succeed when the input is conditioned (e.g. by
    /// removing common coordinate bits), `false` for invalid input.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, TopologyError::InvalidInput { .. })
    }
}
