use super::{DirectedEdge, Edge, EdgeEndItem, EdgeEndStar, Label};
use crate::{
    core::{
        math::{Coord, CoordKey},
        traits::Real,
    },
    geometry::Location,
};
use std::collections::BTreeMap;

/// Graph node: a coordinate, its label and the star of edge ends leaving it.
#[derive(Debug, Clone)]
pub struct Node<T = f64> {
    coord: Coord<T>,
    pub label: Label,
    pub star: EdgeEndStar,
}

impl<T> Node<T>
where
    T: Real,
{
    pub fn new(coord: Coord<T>) -> Self {
        Self {
            coord,
            label: Label::new_on(None),
            star: EdgeEndStar::new(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coord<T> {
        self.coord
    }

    /// Node is labelled by a single geometry only.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    /// Set the on location for `geom_index` (used when copying nodes between graphs).
    pub fn set_label(&mut self, geom_index: usize, on: Option<Location>) {
        self.label.set_on(geom_index, on);
    }

    /// Toggle the boundary status for `geom_index` following the mod-2 rule: a node seen on
    /// the boundary twice becomes interior.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let new_loc = match self.label.on(geom_index) {
            Some(Location::Boundary) => Location::Interior,
            Some(Location::Interior) => Location::Boundary,
            _ => Location::Boundary,
        };
        self.label.set_on(geom_index, Some(new_loc));
    }

    /// Fill the unknown on locations of this node's label from `label`.
    pub fn merge_label(&mut self, label: &Label) {
        for i in 0..2 {
            if self.label.on(i).is_none() && !label.is_null(i) {
                self.label.set_on(i, label.on(i));
            }
        }
    }

    /// Any incident edge is part of the result.
    pub fn is_incident_edge_in_result(&self, des: &[DirectedEdge<T>], edges: &[Edge<T>]) -> bool {
        self.star
            .ids()
            .iter()
            .any(|&id| edges[des[id].edge()].is_in_result())
    }
}

/// Nodes of a graph keyed by coordinate, iterated in lexicographic coordinate order.
#[derive(Debug, Clone)]
pub struct NodeMap<T = f64> {
    map: BTreeMap<CoordKey<T>, usize>,
    nodes: Vec<Node<T>>,
}

impl<T> Default for NodeMap<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeMap<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            nodes: Vec::new(),
        }
    }

    /// Index of the node at `coord`, creating it if needed.
    pub fn add_node(&mut self, coord: Coord<T>) -> usize {
        let nodes = &mut self.nodes;
        *self.map.entry(CoordKey(coord)).or_insert_with(|| {
            nodes.push(Node::new(coord));
            nodes.len() - 1
        })
    }

    /// Add a node with the coordinate and label of `node`, merging labels if the node
    /// exists.
    pub fn add_node_merging(&mut self, node: &Node<T>) -> usize {
        let index = self.add_node(node.coordinate());
        self.nodes[index].merge_label(&node.label);
        index
    }

    /// Insert edge end `id` of `items` into the star of the node at its origin.
    pub fn add_edge_end<E>(&mut self, id: usize, items: &[E]) -> usize
    where
        E: EdgeEndItem<T>,
    {
        let index = self.add_node(items[id].coordinate());
        self.nodes[index].star.insert(id, items);
        index
    }

    pub fn find(&self, coord: Coord<T>) -> Option<usize> {
        self.map.get(&CoordKey(coord)).copied()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Node<T> {
        &self.nodes[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut Node<T> {
        &mut self.nodes[index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node indexes in coordinate order.
    pub fn indexes(&self) -> Vec<usize> {
        self.map.values().copied().collect()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> {
        self.map.values().map(move |&i| &self.nodes[i])
    }

    /// Indexes of nodes on the boundary of geometry `geom_index`.
    pub fn boundary_nodes(&self, geom_index: usize) -> Vec<usize> {
        self.map
            .values()
            .copied()
            .filter(|&i| self.nodes[i].label.on(geom_index) == Some(Location::Boundary))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::coord;

    #[test]
    fn nodes_are_unique_and_ordered() {
        let mut map = NodeMap::new();
        let a = map.add_node(coord(1.0, 0.0));
        let b = map.add_node(coord(0.0, 5.0));
        assert_eq!(map.add_node(coord(1.0, 0.0)), a);
        assert_eq!(map.len(), 2);
        assert_eq!(map.indexes(), vec![b, a]);
        assert_eq!(map.find(coord(0.0, 5.0)), Some(b));
        assert_eq!(map.find(coord(0.0, 0.0)), None);
    }

    #[test]
    fn boundary_toggles() {
        let mut node = Node::new(coord(0.0, 0.0));
        node.set_label_boundary(0);
        assert_eq!(node.label.on(0), Some(Location::Boundary));
        node.set_label_boundary(0);
        assert_eq!(node.label.on(0), Some(Location::Interior));
        node.set_label_boundary(0);
        assert_eq!(node.label.on(0), Some(Location::Boundary));
        assert!(node.is_isolated());
    }

    #[test]
    fn merge_keeps_known_locations() {
        let mut map = NodeMap::new();
        let mut n = Node::new(coord(0.0, 0.0));
        n.set_label(0, Some(Location::Boundary));
        let i = map.add_node_merging(&n);

        let mut other = Node::new(coord(0.0, 0.0));
        other.set_label(0, Some(Location::Interior));
        other.set_label(1, Some(Location::Interior));
        map.add_node_merging(&other);

        let node = map.get(i);
        assert_eq!(node.label.on(0), Some(Location::Boundary));
        assert_eq!(node.label.on(1), Some(Location::Interior));
        assert_eq!(map.boundary_nodes(0), vec![i]);
        assert!(!node.is_isolated());
    }
}
