//! Core/common math functions: coordinates, envelopes, robust orientation, segment intersection
//! and point in ring location.
mod coord;
mod envelope;
mod orientation;
mod point_location;
mod ring;
mod segment_intersect;

pub use coord::{coord, Coord, CoordKey};
pub use envelope::*;
pub use orientation::{orientation_index, Orientation};
pub use point_location::*;
pub use ring::*;
pub use segment_intersect::*;
