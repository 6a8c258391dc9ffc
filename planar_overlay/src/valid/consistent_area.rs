use crate::{
    core::{math::Coord, traits::Real},
    geometry::{BoundaryNodeRule, Location, Position},
    graph::{Edge, EdgeEnd, EdgeEndItem, EdgeIntersection, GeometryGraph, Label, NodeMap},
};

/// Edge ends of a graph sharing origin and direction, labelled together.
///
/// Several ends in one bundle mean two edges overlap along their first segment, which for
/// polygonal input means duplicated rings.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle<T = f64> {
    end: EdgeEnd<T>,
    ends: Vec<EdgeEnd<T>>,
}

impl<T> EdgeEndBundle<T>
where
    T: Real,
{
    pub fn new(e: EdgeEnd<T>) -> Self {
        let end = EdgeEnd::new(e.edge, e.coordinate(), e.directed_coordinate(), e.label);
        Self { end, ends: vec![e] }
    }

    pub fn insert(&mut self, e: EdgeEnd<T>) {
        self.ends.push(e);
    }

    pub fn ends(&self) -> &[EdgeEnd<T>] {
        &self.ends
    }

    fn compute_label_on(&mut self, geom_index: usize, rule: BoundaryNodeRule) {
        let mut boundary_count = 0;
        let mut found_interior = false;
        for e in self.ends.iter() {
            match e.label.on(geom_index) {
                Some(Location::Boundary) => boundary_count += 1,
                Some(Location::Interior) => found_interior = true,
                _ => {}
            }
        }

        let mut loc = None;
        if found_interior {
            loc = Some(Location::Interior);
        }
        if boundary_count > 0 {
            loc = Some(GeometryGraph::<T>::determine_boundary(rule, boundary_count));
        }
        self.end.label.set_on(geom_index, loc);
    }

    /// Interior on a side wins over exterior.
    fn compute_label_side(&mut self, geom_index: usize, side: Position) {
        for e in self.ends.iter() {
            if !e.label.is_area() {
                continue;
            }
            match e.label.location(geom_index, side) {
                Some(Location::Interior) => {
                    self.end
                        .label
                        .set_location(geom_index, side, Some(Location::Interior));
                    return;
                }
                Some(Location::Exterior) => {
                    self.end
                        .label
                        .set_location(geom_index, side, Some(Location::Exterior));
                }
                _ => {}
            }
        }
    }
}

impl<T> EdgeEndItem<T> for EdgeEndBundle<T>
where
    T: Real,
{
    #[inline]
    fn edge_end(&self) -> &EdgeEnd<T> {
        &self.end
    }

    #[inline]
    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T> {
        &mut self.end
    }

    /// Area label if any member end is an area end, with the on and side locations merged
    /// from the members.
    fn compute_label(&mut self, rule: BoundaryNodeRule) {
        let is_area = self.ends.iter().any(|e| e.label.is_area());
        self.end.label = if is_area {
            Label::new_area(None, None, None)
        } else {
            Label::new_on(None)
        };

        for i in 0..2 {
            self.compute_label_on(i, rule);
            if is_area {
                self.compute_label_side(i, Position::Left);
                self.compute_label_side(i, Position::Right);
            }
        }
    }
}

/// Edge ends of `edge` (with index `edge_index`) at each of its intersections, in both
/// directions.
///
/// The endpoints of the edge are added to its intersection list first.
fn compute_edge_ends<T>(edge_index: usize, edge: &mut Edge<T>, out: &mut Vec<EdgeEnd<T>>)
where
    T: Real,
{
    edge.add_endpoint_intersections();
    let eis: Vec<EdgeIntersection<T>> = edge.ei_list.iter().copied().collect();
    for (i, curr) in eis.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| &eis[p]);
        let next = eis.get(i + 1);
        edge_end_for_prev(edge_index, edge, out, curr, prev);
        edge_end_for_next(edge_index, edge, out, curr, next);
    }
}

/// End pointing back along the edge from `curr`, none at the start of the edge.
fn edge_end_for_prev<T>(
    edge_index: usize,
    edge: &Edge<T>,
    out: &mut Vec<EdgeEnd<T>>,
    curr: &EdgeIntersection<T>,
    prev: Option<&EdgeIntersection<T>>,
) where
    T: Real,
{
    let mut i_prev = curr.segment_index;
    if curr.dist == T::zero() {
        if i_prev == 0 {
            return;
        }
        i_prev -= 1;
    }

    let mut p_prev = edge.coord(i_prev);
    // the previous intersection is closer than the previous vertex
    if let Some(prev) = prev {
        if prev.segment_index >= i_prev {
            p_prev = prev.coord;
        }
    }

    out.push(EdgeEnd::new(
        edge_index,
        curr.coord,
        p_prev,
        edge.label.flipped(),
    ));
}

/// End pointing forward along the edge from `curr`, none at the end of the edge.
fn edge_end_for_next<T>(
    edge_index: usize,
    edge: &Edge<T>,
    out: &mut Vec<EdgeEnd<T>>,
    curr: &EdgeIntersection<T>,
    next: Option<&EdgeIntersection<T>>,
) where
    T: Real,
{
    let i_next = curr.segment_index + 1;
    if i_next >= edge.num_points() {
        return;
    }

    let mut p_next = edge.coord(i_next);
    // the next intersection lies on the same segment
    if let Some(next) = next {
        if next.segment_index == curr.segment_index {
            p_next = next.coord;
        }
    }

    out.push(EdgeEnd::new(edge_index, curr.coord, p_next, edge.label));
}

/// Node graph of a single geometry with the edge ends at each node bundled by direction.
#[derive(Debug, Clone)]
struct RelateNodeGraph<T> {
    nodes: NodeMap<T>,
    bundles: Vec<EdgeEndBundle<T>>,
}

impl<T> RelateNodeGraph<T>
where
    T: Real,
{
    fn build(geom_graph: &mut GeometryGraph<'_, T>) -> Self {
        let mut graph = Self {
            nodes: NodeMap::new(),
            bundles: Vec::new(),
        };
        graph.compute_intersection_nodes(geom_graph, 0);
        graph.copy_nodes_and_labels(geom_graph, 0);

        let mut ends = Vec::new();
        for (i, e) in geom_graph.edges.iter_mut().enumerate() {
            compute_edge_ends(i, e, &mut ends);
        }
        for e in ends {
            graph.insert_edge_end(e);
        }

        log::trace!(
            "relate node graph: {} nodes, {} edge end bundles",
            graph.nodes.len(),
            graph.bundles.len()
        );
        graph
    }

    /// Nodes for every intersection found on the edges (the graph must be self noded).
    fn compute_intersection_nodes(&mut self, geom_graph: &GeometryGraph<'_, T>, geom_index: usize) {
        for e in geom_graph.edges.iter() {
            let e_loc = e.label.on(geom_index);
            for ei in e.ei_list.iter() {
                let n = self.nodes.add_node(ei.coord);
                let node = self.nodes.get_mut(n);
                if e_loc == Some(Location::Boundary) {
                    node.set_label_boundary(geom_index);
                } else if node.label.is_null(geom_index) {
                    node.set_label(geom_index, Some(Location::Interior));
                }
            }
        }
    }

    fn copy_nodes_and_labels(&mut self, geom_graph: &GeometryGraph<'_, T>, geom_index: usize) {
        for node in geom_graph.nodes.iter() {
            let n = self.nodes.add_node(node.coordinate());
            self.nodes
                .get_mut(n)
                .set_label(geom_index, node.label.on(geom_index));
        }
    }

    fn insert_edge_end(&mut self, e: EdgeEnd<T>) {
        let n = self.nodes.add_node(e.coordinate());
        match self.nodes.get(n).star.find_same_direction(&e, &self.bundles) {
            Some(b) => self.bundles[b].insert(e),
            None => {
                self.bundles.push(EdgeEndBundle::new(e));
                let id = self.bundles.len() - 1;
                self.nodes.get_mut(n).star.insert(id, &self.bundles);
            }
        }
    }
}

/// Checks that the area edges of a polygonal geometry graph form a consistent topology: no
/// proper self intersections and every node has consistent side labels around it.
///
/// Also detects duplicated rings, which pass the node consistency check.
#[derive(Debug)]
pub struct ConsistentAreaTester<'g, 'a, T = f64> {
    geom_graph: &'g mut GeometryGraph<'a, T>,
    node_graph: Option<RelateNodeGraph<T>>,
    invalid_point: Option<Coord<T>>,
}

impl<'g, 'a, T> ConsistentAreaTester<'g, 'a, T>
where
    T: Real,
{
    pub fn new(geom_graph: &'g mut GeometryGraph<'a, T>) -> Self {
        Self {
            geom_graph,
            node_graph: None,
            invalid_point: None,
        }
    }

    /// Where the last failed check found a problem.
    pub fn invalid_point(&self) -> Option<Coord<T>> {
        self.invalid_point
    }

    /// Self node the graph and check the labels at every node are consistent.
    pub fn is_node_consistent_area(&mut self) -> bool {
        let si = self.geom_graph.compute_self_nodes(true, true);
        if si.has_proper_intersection() {
            self.invalid_point = si.proper_intersection_point();
            return false;
        }

        let mut node_graph = RelateNodeGraph::build(self.geom_graph);
        let rule = self.geom_graph.boundary_node_rule();
        let mut consistent = true;
        for node in node_graph.nodes.iter() {
            if !node
                .star
                .is_area_labels_consistent(&mut node_graph.bundles, rule)
            {
                self.invalid_point = Some(node.coordinate());
                consistent = false;
                break;
            }
        }

        self.node_graph = Some(node_graph);
        consistent
    }

    /// Some node has two edge ends in the same direction, which only happens for duplicated
    /// rings once the area is known to be node consistent.
    pub fn has_duplicate_rings(&mut self) -> bool {
        let Some(node_graph) = self.node_graph.as_ref() else {
            return false;
        };

        for node in node_graph.nodes.iter() {
            for &b in node.star.ids() {
                let bundle = &node_graph.bundles[b];
                if bundle.ends().len() > 1 {
                    self.invalid_point = Some(self.geom_graph.edges[bundle.end.edge].coord(0));
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, geometry::Geometry};

    #[test]
    fn edge_ends_at_intersections() {
        let label = Label::new_geom_on(0, Some(Location::Interior));
        let mut edge = Edge::new(
            vec![coord(0.0, 0.0), coord(4.0, 0.0), coord(4.0, 4.0)],
            label,
        );
        edge.ei_list.add(coord(2.0, 0.0), 0, 2.0);

        let mut ends = Vec::new();
        compute_edge_ends(7, &mut edge, &mut ends);
        let dirs: Vec<_> = ends
            .iter()
            .map(|e| (e.coordinate(), e.directed_coordinate()))
            .collect();
        assert_eq!(
            dirs,
            vec![
                (coord(0.0, 0.0), coord(2.0, 0.0)),
                (coord(2.0, 0.0), coord(0.0, 0.0)),
                (coord(2.0, 0.0), coord(4.0, 0.0)),
                (coord(4.0, 4.0), coord(4.0, 0.0)),
            ]
        );
        assert!(ends.iter().all(|e| e.edge == 7));
    }

    #[test]
    fn bundle_label_prefers_interior_side() {
        let a = EdgeEnd::new(
            0,
            coord(0.0, 0.0),
            coord(1.0, 0.0),
            Label::new_geom_area(
                0,
                Some(Location::Boundary),
                Some(Location::Exterior),
                Some(Location::Interior),
            ),
        );
        let b = EdgeEnd::new(
            1,
            coord(0.0, 0.0),
            coord(2.0, 0.0),
            Label::new_geom_area(
                0,
                Some(Location::Boundary),
                Some(Location::Interior),
                Some(Location::Exterior),
            ),
        );
        let mut bundle = EdgeEndBundle::new(a);
        bundle.insert(b);
        bundle.compute_label(BoundaryNodeRule::Mod2);

        let label = bundle.label();
        assert_eq!(label.on(0), Some(Location::Interior));
        assert_eq!(label.location(0, Position::Left), Some(Location::Interior));
        assert_eq!(label.location(0, Position::Right), Some(Location::Interior));
    }

    #[test]
    fn crossing_ring_is_not_consistent() {
        let geom = Geometry::Polygon(polygon![
            (0.0, 0.0),
            (4.0, 4.0),
            (4.0, 0.0),
            (0.0, 4.0),
            (0.0, 0.0)
        ]);
        let mut gg = GeometryGraph::new(0, &geom, BoundaryNodeRule::Mod2);
        let mut tester = ConsistentAreaTester::new(&mut gg);
        assert!(!tester.is_node_consistent_area());
        assert_eq!(tester.invalid_point(), Some(coord(2.0, 2.0)));
    }

    #[test]
    fn duplicate_rings() {
        let square = || polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)];
        let geom = Geometry::MultiPolygon(vec![square(), square()]);
        let mut gg = GeometryGraph::new(0, &geom, BoundaryNodeRule::Mod2);
        let mut tester = ConsistentAreaTester::new(&mut gg);
        assert!(tester.is_node_consistent_area());
        assert!(tester.has_duplicate_rings());
        assert_eq!(tester.invalid_point(), Some(coord(0.0, 0.0)));
    }
}
