use super::{DirectedEdge, Edge, NodeMap, Quadrant};
use crate::{
    core::{
        math::{orientation_index, Coord, Orientation},
        traits::Real,
    },
    error::TopologyError,
    geometry::Location,
};

/// Planar graph of labelled edges, their directed halves and nodes.
///
/// Edges and directed edges are stored in arenas: the directed edges of edge `i` are `2 * i`
/// (forward) and `2 * i + 1` (reverse), and every cross reference is an index into these
/// vectors.
#[derive(Debug, Clone)]
pub struct PlanarGraph<T = f64> {
    pub edges: Vec<Edge<T>>,
    pub directed_edges: Vec<DirectedEdge<T>>,
    pub nodes: NodeMap<T>,
}

impl<T> Default for PlanarGraph<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PlanarGraph<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            directed_edges: Vec::new(),
            nodes: NodeMap::new(),
        }
    }

    /// Index of the node at `coord`, creating it if needed.
    #[inline]
    pub fn add_node(&mut self, coord: Coord<T>) -> usize {
        self.nodes.add_node(coord)
    }

    /// Add edges with both their directed edges, creating the nodes at their ends.
    pub fn add_edges(&mut self, edges: Vec<Edge<T>>) {
        for edge in edges {
            let edge_index = self.edges.len();
            let fwd_index = self.directed_edges.len();
            let rev_index = fwd_index + 1;

            let mut fwd = DirectedEdge::new(edge_index, &edge, true);
            let mut rev = DirectedEdge::new(edge_index, &edge, false);
            fwd.sym = rev_index;
            rev.sym = fwd_index;

            self.edges.push(edge);
            self.directed_edges.push(fwd);
            self.directed_edges.push(rev);
            self.nodes.add_edge_end(fwd_index, &self.directed_edges);
            self.nodes.add_edge_end(rev_index, &self.directed_edges);
        }

        log::trace!(
            "planar graph has {} edges and {} nodes",
            self.edges.len(),
            self.nodes.len()
        );
    }

    /// Link the result area directed edges at every node into rings.
    pub fn link_result_directed_edges(&mut self) -> Result<(), TopologyError> {
        for i in self.nodes.indexes() {
            self.nodes
                .get_mut(i)
                .star
                .link_result_directed_edges(&mut self.directed_edges)?;
        }
        Ok(())
    }

    /// Link every directed edge at every node, ignoring result status.
    pub fn link_all_directed_edges(&mut self) {
        for i in self.nodes.indexes() {
            self.nodes
                .get(i)
                .star
                .link_all_directed_edges(&mut self.directed_edges);
        }
    }

    /// First directed edge of `edge`.
    pub fn find_edge_end(&self, edge: usize) -> Option<usize> {
        self.directed_edges.iter().position(|de| de.edge() == edge)
    }

    /// Edge starting or ending at `p0` and leaving it in the direction of `p1`.
    pub fn find_edge_in_same_direction(&self, p0: Coord<T>, p1: Coord<T>) -> Option<usize> {
        self.edges.iter().position(|e| {
            let pts = e.coords();
            let n = pts.len();
            match_in_same_direction(p0, p1, pts[0], pts[1])
                || match_in_same_direction(p0, p1, pts[n - 1], pts[n - 2])
        })
    }

    /// Node at `coord` is on the boundary of geometry `geom_index`.
    pub fn is_boundary_node(&self, geom_index: usize, coord: Coord<T>) -> bool {
        self.nodes
            .find(coord)
            .map_or(false, |i| {
                self.nodes.get(i).label.on(geom_index) == Some(Location::Boundary)
            })
    }
}

fn match_in_same_direction<T>(p0: Coord<T>, p1: Coord<T>, ep0: Coord<T>, ep1: Coord<T>) -> bool
where
    T: Real,
{
    p0.equals_2d(&ep0)
        && orientation_index(p0, p1, ep1) == Orientation::Collinear
        && Quadrant::of_segment(p0, p1) == Quadrant::of_segment(ep0, ep1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, graph::Label};

    fn triangle_graph() -> PlanarGraph<f64> {
        let label = Label::new_geom_on(0, Some(Location::Interior));
        let a = coord(0.0, 0.0);
        let b = coord(4.0, 0.0);
        let c = coord(0.0, 4.0);
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![
            Edge::new(vec![a, b], label),
            Edge::new(vec![b, c], label),
            Edge::new(vec![c, a], label),
        ]);
        graph
    }

    #[test]
    fn directed_edges_pair_up() {
        let graph = triangle_graph();
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.directed_edges.len(), 6);
        for (i, de) in graph.directed_edges.iter().enumerate() {
            assert_eq!(graph.directed_edges[de.sym].sym, i);
            assert_eq!(de.edge(), i / 2);
        }
        for node in graph.nodes.iter() {
            assert_eq!(node.star.degree(), 2);
            assert!(node.star.is_edges_sorted(&graph.directed_edges));
        }
    }

    #[test]
    fn link_all_forms_faces() {
        let mut graph = triangle_graph();
        graph.link_all_directed_edges();
        // the reverse edges form the inner face traversed clockwise
        let mut de = 1;
        let mut count = 0;
        loop {
            de = graph.directed_edges[de].next.unwrap();
            count += 1;
            if de == 1 || count > 3 {
                break;
            }
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn find_by_direction() {
        let graph = triangle_graph();
        assert_eq!(
            graph.find_edge_in_same_direction(coord(0.0, 0.0), coord(1.0, 0.0)),
            Some(0)
        );
        assert_eq!(
            graph.find_edge_in_same_direction(coord(0.0, 0.0), coord(0.0, 1.0)),
            Some(2)
        );
        assert_eq!(
            graph.find_edge_in_same_direction(coord(0.0, 0.0), coord(-1.0, 0.0)),
            None
        );
        assert_eq!(graph.find_edge_end(1), Some(2));
        assert!(!graph.is_boundary_node(0, coord(0.0, 0.0)));
    }
}
