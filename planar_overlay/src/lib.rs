//! Planar topology graph and boolean overlay of 2D geometries.
//!
//! Input geometries are noded into a planar graph whose nodes, edges and directed edges are
//! labelled with their location (interior, boundary or exterior) relative to each input. The
//! overlay picks the graph components matching the operation from those labels and rebuilds
//! result polygons, lines and points. The same graph machinery checks geometry validity.
//!
//! ```
//! use planar_overlay::{overlay::Overlay, polygon, Geometry};
//!
//! let a = Geometry::Polygon(polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
//! let b = Geometry::Polygon(polygon![(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)]);
//! let result = a.intersection(&b).unwrap();
//! assert_eq!(result.area(), 25.0);
//! assert!(result.is_valid());
//! ```
extern crate static_aabb2d_index;

#[macro_use]
mod macros;

pub mod core;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod overlay;
pub mod valid;

pub use static_aabb2d_index::AABB;

pub use crate::core::math::{coord, Coord};
pub use crate::error::TopologyError;
pub use crate::geometry::{BoundaryNodeRule, Dimension, Geometry, LineString, Location, Polygon};
pub use crate::overlay::{OverlayOpCode, OverlayOptions, OverlayResult};
pub use crate::valid::{IsValidOp, IsValidOptions, TopologyValidationError, ValidationErrorKind};
