use super::{DirectedEdge, Edge, Label, NodeMap};
use crate::{
    core::{
        math::{is_ccw, is_in_ring, Coord, EnvelopeExt},
        traits::Real,
    },
    error::{err_coord, TopologyError},
    geometry::{LineString, Location, Polygon, Position},
};
use static_aabb2d_index::AABB;

/// How an edge ring follows the directed edge links.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingKind {
    /// Follows `next` links: may pass through a node more than once.
    Maximal,
    /// Follows `next_min` links: passes through each node at most once.
    Minimal,
}

/// Ring of directed edges forming a shell or hole of a result polygon.
///
/// Rings are stored in an arena by the builder using them, `index` is the ring's position in
/// that arena and is what directed edges refer to in `edge_ring`/`min_edge_ring`.
#[derive(Debug, Clone)]
pub struct EdgeRing<T = f64> {
    kind: RingKind,
    index: usize,
    start: usize,
    edges: Vec<usize>,
    pts: Vec<Coord<T>>,
    env: AABB<T>,
    label: Label,
    is_hole: bool,
    max_node_degree: Option<usize>,
    /// Shell containing this ring if it is a hole.
    pub shell: Option<usize>,
    pub holes: Vec<usize>,
}

impl<T> EdgeRing<T>
where
    T: Real,
{
    #[inline]
    fn next_of(kind: RingKind, de: &DirectedEdge<T>) -> Option<usize> {
        match kind {
            RingKind::Maximal => de.next,
            RingKind::Minimal => de.next_min,
        }
    }

    #[inline]
    fn ring_of(kind: RingKind, de: &DirectedEdge<T>) -> Option<usize> {
        match kind {
            RingKind::Maximal => de.edge_ring,
            RingKind::Minimal => de.min_edge_ring,
        }
    }

    #[inline]
    fn set_ring_of(kind: RingKind, de: &mut DirectedEdge<T>, ring: usize) {
        match kind {
            RingKind::Maximal => de.edge_ring = Some(ring),
            RingKind::Minimal => de.min_edge_ring = Some(ring),
        }
    }

    /// Follow the links from directed edge `start` until it is reached again, collecting the
    /// ring's points and assigning `index` to every edge visited.
    pub fn build(
        kind: RingKind,
        index: usize,
        start: usize,
        des: &mut [DirectedEdge<T>],
        edges: &[Edge<T>],
    ) -> Result<Self, TopologyError> {
        let mut ring = Self {
            kind,
            index,
            start,
            edges: Vec::new(),
            pts: Vec::new(),
            env: AABB::null(),
            label: Label::new_on(None),
            is_hole: false,
            max_node_degree: None,
            shell: None,
            holes: Vec::new(),
        };

        let mut de = start;
        let mut is_first_edge = true;
        loop {
            let coord = des[de].end.coordinate();
            if Self::ring_of(kind, &des[de]) == Some(index) {
                return Err(TopologyError::RingVisitedTwice {
                    coord: err_coord(coord),
                });
            }

            ring.edges.push(de);
            let de_label = des[de].end.label;
            debug_assert!(de_label.is_area(), "ring edge without area label");
            ring.merge_label(&de_label);
            ring.add_points(&edges[des[de].edge()], des[de].is_forward(), is_first_edge);
            is_first_edge = false;
            Self::set_ring_of(kind, &mut des[de], index);

            de = Self::next_of(kind, &des[de]).ok_or(TopologyError::NullDirectedEdge {
                coord: err_coord(coord),
            })?;
            if de == start {
                break;
            }
        }

        ring.env = AABB::from_coords(&ring.pts);
        ring.is_hole = is_ccw(&ring.pts);
        Ok(ring)
    }

    /// Take the right side location of each geometry from the first edge that has one.
    fn merge_label(&mut self, de_label: &Label) {
        for i in 0..2 {
            let loc = de_label.location(i, Position::Right);
            if loc.is_some() && self.label.on(i).is_none() {
                self.label.set_on(i, loc);
            }
        }
    }

    fn add_points(&mut self, edge: &Edge<T>, is_forward: bool, is_first_edge: bool) {
        let edge_pts = edge.coords();
        let skip = if is_first_edge { 0 } else { 1 };
        if is_forward {
            self.pts.extend(edge_pts.iter().skip(skip));
        } else {
            self.pts.extend(edge_pts.iter().rev().skip(skip));
        }
    }

    #[inline]
    pub fn kind(&self) -> RingKind {
        self.kind
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Directed edge the ring was started from.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Directed edges in ring order.
    #[inline]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    /// Closed ring coordinates.
    #[inline]
    pub fn coords(&self) -> &[Coord<T>] {
        &self.pts
    }

    #[inline]
    pub fn coordinate(&self, i: usize) -> Coord<T> {
        self.pts[i]
    }

    #[inline]
    pub fn envelope(&self) -> &AABB<T> {
        &self.env
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Counter clockwise rings are holes (result shells are clockwise).
    #[inline]
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// Twice the largest number of this ring's outgoing edges at any of its nodes.
    pub fn max_node_degree(&mut self, des: &[DirectedEdge<T>], nodes: &NodeMap<T>) -> usize {
        if let Some(degree) = self.max_node_degree {
            return degree;
        }

        let degree = self
            .edges
            .iter()
            .filter_map(|&de| nodes.find(des[de].end.coordinate()))
            .map(|n| nodes.get(n).star.outgoing_degree_for_ring(des, self.index))
            .max()
            .unwrap_or(0)
            * 2;
        self.max_node_degree = Some(degree);
        degree
    }

    /// Link the edges of this maximal ring at each of its nodes into minimal rings.
    pub fn link_directed_edges_for_minimal_edge_rings(
        &self,
        des: &mut [DirectedEdge<T>],
        nodes: &mut NodeMap<T>,
    ) {
        debug_assert_eq!(self.kind, RingKind::Maximal);
        for &de in self.edges.iter() {
            if let Some(n) = nodes.find(des[de].end.coordinate()) {
                nodes
                    .get_mut(n)
                    .star
                    .link_minimal_directed_edges(des, self.index);
            }
        }
    }

    /// Build the minimal rings of this maximal ring, numbered from `first_index`.
    ///
    /// [EdgeRing::link_directed_edges_for_minimal_edge_rings] must have been called first.
    pub fn build_minimal_rings(
        &self,
        des: &mut [DirectedEdge<T>],
        edges: &[Edge<T>],
        first_index: usize,
    ) -> Result<Vec<EdgeRing<T>>, TopologyError> {
        let mut rings = Vec::new();
        for &de in self.edges.iter() {
            if des[de].min_edge_ring.is_none() {
                let index = first_index + rings.len();
                rings.push(EdgeRing::build(RingKind::Minimal, index, de, des, edges)?);
            }
        }
        Ok(rings)
    }

    /// Mark the parent edges of this ring as part of the result.
    pub fn set_in_result(&self, des: &[DirectedEdge<T>], edges: &mut [Edge<T>]) {
        for &de in self.edges.iter() {
            edges[des[de].edge()].set_in_result(true);
        }
    }

    /// `p` lies inside this ring and outside all of its holes (`rings` is the ring arena).
    pub fn contains_point(&self, p: Coord<T>, rings: &[EdgeRing<T>]) -> bool {
        if !self.env.contains_coord(p) {
            return false;
        }
        if !is_in_ring(p, &self.pts) {
            return false;
        }
        !self.holes.iter().any(|&h| rings[h].contains_point(p, rings))
    }

    /// Polygon with this ring as shell and its holes as interiors.
    pub fn to_polygon(&self, rings: &[EdgeRing<T>]) -> Polygon<T> {
        Polygon::new(
            LineString::new(self.pts.clone()),
            self.holes
                .iter()
                .map(|&h| LineString::new(rings[h].pts.clone()))
                .collect(),
        )
    }

    /// Assign shell `shell` to hole `hole`.
    pub fn set_shell(rings: &mut [EdgeRing<T>], hole: usize, shell: usize) {
        rings[hole].shell = Some(shell);
        rings[shell].holes.push(hole);
    }

    /// Location of the ring's area relative to geometry `geom_index`, if known.
    #[inline]
    pub fn location(&self, geom_index: usize) -> Option<Location> {
        self.label.on(geom_index)
    }
}
