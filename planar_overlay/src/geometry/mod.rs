//! Geometry model consumed and produced by the topology graph, plus locators and the boundary
//! node rule.
mod boundary_node_rule;
mod locate;
mod location;
mod model;

pub use boundary_node_rule::BoundaryNodeRule;
pub use locate::{locate_point_in_area, locate_point_in_polygon, PointLocator};
pub use location::{Dimension, Location, Position};
pub use model::{build_geometry, Geometry, LineString, Polygon};
