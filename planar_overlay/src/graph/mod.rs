//! Planar topology graph: labels, edges, directed edges, nodes with their sorted stars, the
//! graph of a single input geometry and the edge rings result areas are built from.
mod depth;
mod directed_edge;
pub mod directed_edge_star;
mod edge;
mod edge_end;
mod edge_end_star;
mod edge_ring;
mod edge_set_intersector;
mod geometry_graph;
mod label;
mod node;
mod planar_graph;
mod quadrant;
mod segment_intersector;

pub use depth::Depth;
pub use directed_edge::DirectedEdge;
pub use edge::{Edge, EdgeIntersection, EdgeIntersectionList};
pub use edge_end::{EdgeEnd, EdgeEndItem};
pub use edge_end_star::EdgeEndStar;
pub use edge_ring::{EdgeRing, RingKind};
pub use edge_set_intersector::{compute_intersections, compute_self_intersections, segment_index};
pub use geometry_graph::GeometryGraph;
pub use label::{Label, TopologyLocation};
pub use node::{Node, NodeMap};
pub use planar_graph::PlanarGraph;
pub use quadrant::Quadrant;
pub use segment_intersector::{EdgeSegment, SegmentIntersector};
