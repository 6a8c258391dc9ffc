use super::{Edge, EdgeIntersection};
use crate::core::{
    math::{Coord, SegmentIntersection},
    traits::Real,
};

/// Identifies a segment of an edge in one of the (up to two) edge lists being intersected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EdgeSegment {
    /// Which edge list (0 or 1) the edge belongs to.
    pub input: usize,
    pub edge: usize,
    pub segment: usize,
}

impl EdgeSegment {
    #[inline]
    pub fn new(input: usize, edge: usize, segment: usize) -> Self {
        Self {
            input,
            edge,
            segment,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct PendingIntersection<T> {
    input: usize,
    edge: usize,
    ei: EdgeIntersection<T>,
}

/// Computes the intersection of segment pairs and records them on the edges involved.
///
/// Tested pairs only read the edges, the found intersections are kept pending and written to
/// the edges with [SegmentIntersector::apply_to] once scanning is finished.
#[derive(Debug, Clone)]
pub struct SegmentIntersector<T = f64> {
    include_proper: bool,
    record_isolated: bool,
    is_done_when_proper: bool,
    boundary_nodes: Option<[Vec<Coord<T>>; 2]>,
    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_intersection_point: Option<Coord<T>>,
    is_done: bool,
    num_tests: usize,
    pending: Vec<PendingIntersection<T>>,
    non_isolated: Vec<(usize, usize)>,
}

impl<T> SegmentIntersector<T>
where
    T: Real,
{
    /// `include_proper` controls whether proper intersections are added to the edges,
    /// `record_isolated` marks intersecting edges as not isolated.
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        Self {
            include_proper,
            record_isolated,
            is_done_when_proper: false,
            boundary_nodes: None,
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            proper_intersection_point: None,
            is_done: false,
            num_tests: 0,
            pending: Vec::new(),
            non_isolated: Vec::new(),
        }
    }

    /// Stop as soon as a proper intersection is found.
    pub fn set_is_done_when_proper(&mut self, is_done_when_proper: bool) {
        self.is_done_when_proper = is_done_when_proper;
    }

    /// Boundary node coordinates of both inputs, an intersection at one of them is never
    /// treated as proper interior.
    pub fn set_boundary_nodes(&mut self, bdy0: Vec<Coord<T>>, bdy1: Vec<Coord<T>>) {
        self.boundary_nodes = Some([bdy0, bdy1]);
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// A non trivial intersection was found.
    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    #[inline]
    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// A proper intersection not located at a boundary node was found.
    #[inline]
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    /// Last proper intersection point found.
    #[inline]
    pub fn proper_intersection_point(&self) -> Option<Coord<T>> {
        self.proper_intersection_point
    }

    /// Number of segment pairs tested.
    #[inline]
    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    /// Same edge and the only intersection is the vertex shared by consecutive segments (the
    /// first and last segments of a closed edge are consecutive too).
    fn is_trivial_intersection(
        li: &SegmentIntersection<T>,
        e0: &Edge<T>,
        s0: EdgeSegment,
        s1: EdgeSegment,
    ) -> bool {
        if s0.input != s1.input || s0.edge != s1.edge || li.intersection_count() != 1 {
            return false;
        }

        if s0.segment.abs_diff(s1.segment) == 1 {
            return true;
        }

        if e0.is_closed() {
            let last_seg = e0.num_points() - 2;
            if (s0.segment == 0 && s1.segment == last_seg)
                || (s1.segment == 0 && s0.segment == last_seg)
            {
                return true;
            }
        }

        false
    }

    fn is_boundary_point(&self, li: &SegmentIntersection<T>) -> bool {
        match &self.boundary_nodes {
            None => false,
            Some(nodes) => nodes
                .iter()
                .flat_map(|n| n.iter())
                .any(|pt| li.is_intersection(*pt)),
        }
    }

    /// Test segment `s0` of `e0` against segment `s1` of `e1`.
    pub fn add_intersections(&mut self, e0: &Edge<T>, s0: EdgeSegment, e1: &Edge<T>, s1: EdgeSegment) {
        if s0 == s1 {
            return;
        }
        self.num_tests += 1;

        let li = SegmentIntersection::compute(
            e0.coord(s0.segment),
            e0.coord(s0.segment + 1),
            e1.coord(s1.segment),
            e1.coord(s1.segment + 1),
        );

        if !li.has_intersection() {
            return;
        }

        if self.record_isolated {
            self.non_isolated.push((s0.input, s0.edge));
            self.non_isolated.push((s1.input, s1.edge));
        }

        if Self::is_trivial_intersection(&li, e0, s0, s1) {
            return;
        }

        self.has_intersection = true;
        // a proper intersection may be computed exactly at a boundary node, it must then be
        // noded like an improper one
        let is_boundary_pt = self.is_boundary_point(&li);
        let is_not_proper = !li.is_proper() || is_boundary_pt;
        if self.include_proper || is_not_proper {
            for i in 0..li.intersection_count() {
                self.pending.push(PendingIntersection {
                    input: s0.input,
                    edge: s0.edge,
                    ei: e0.intersection_record(&li, s0.segment, 0, i),
                });
                self.pending.push(PendingIntersection {
                    input: s1.input,
                    edge: s1.edge,
                    ei: e1.intersection_record(&li, s1.segment, 1, i),
                });
            }
        }

        if li.is_proper() {
            self.proper_intersection_point = Some(li.intersection(0));
            self.has_proper = true;
            if self.is_done_when_proper {
                self.is_done = true;
            }
            if !is_boundary_pt {
                self.has_proper_interior = true;
            }
        }
    }

    /// Write the pending intersections found on edges of list `input` to `edges`.
    pub fn apply_to(&mut self, input: usize, edges: &mut [Edge<T>]) {
        self.pending.retain(|p| {
            if p.input != input {
                return true;
            }
            edges[p.edge]
                .ei_list
                .add(p.ei.coord, p.ei.segment_index, p.ei.dist);
            false
        });

        self.non_isolated.retain(|&(i, e)| {
            if i != input {
                return true;
            }
            edges[e].set_isolated(false);
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, graph::Label};

    fn edge(pts: &[(f64, f64)]) -> Edge<f64> {
        Edge::new(pts.iter().map(|&(x, y)| coord(x, y)).collect(), Label::default())
    }

    #[test]
    fn proper_crossing_is_recorded() {
        let mut edges = vec![edge(&[(0.0, 0.0), (2.0, 2.0)]), edge(&[(0.0, 2.0), (2.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, true);
        si.add_intersections(
            &edges[0],
            EdgeSegment::new(0, 0, 0),
            &edges[1],
            EdgeSegment::new(0, 1, 0),
        );
        assert!(si.has_intersection());
        assert!(si.has_proper_intersection());
        assert!(si.has_proper_interior_intersection());
        assert_eq!(si.proper_intersection_point(), Some(coord(1.0, 1.0)));

        si.apply_to(0, &mut edges);
        assert!(edges[0].ei_list.is_intersection(coord(1.0, 1.0)));
        assert!(edges[1].ei_list.is_intersection(coord(1.0, 1.0)));
        assert!(!edges[0].is_isolated());
    }

    #[test]
    fn proper_excluded_unless_requested() {
        let mut edges = vec![edge(&[(0.0, 0.0), (2.0, 2.0)]), edge(&[(0.0, 2.0), (2.0, 0.0)])];
        let mut si = SegmentIntersector::new(false, false);
        si.set_is_done_when_proper(true);
        si.add_intersections(
            &edges[0],
            EdgeSegment::new(0, 0, 0),
            &edges[1],
            EdgeSegment::new(0, 1, 0),
        );
        assert!(si.is_done());
        si.apply_to(0, &mut edges);
        assert!(edges[0].ei_list.is_empty());
        assert!(edges[0].is_isolated());
    }

    #[test]
    fn adjacent_segments_are_trivial() {
        let edges = vec![edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])];
        let mut si = SegmentIntersector::new(true, false);
        si.add_intersections(
            &edges[0],
            EdgeSegment::new(0, 0, 0),
            &edges[0],
            EdgeSegment::new(0, 0, 1),
        );
        si.add_intersections(
            &edges[0],
            EdgeSegment::new(0, 0, 0),
            &edges[0],
            EdgeSegment::new(0, 0, 3),
        );
        assert!(!si.has_intersection());
        assert_eq!(si.num_tests(), 2);
    }

    #[test]
    fn boundary_node_is_not_proper_interior() {
        let edges = vec![edge(&[(0.0, 0.0), (2.0, 2.0)]), edge(&[(0.0, 2.0), (2.0, 0.0)])];
        let mut si = SegmentIntersector::new(false, false);
        si.set_boundary_nodes(vec![coord(1.0, 1.0)], Vec::new());
        si.add_intersections(
            &edges[0],
            EdgeSegment::new(0, 0, 0),
            &edges[1],
            EdgeSegment::new(1, 0, 0),
        );
        assert!(si.has_proper_intersection());
        assert!(!si.has_proper_interior_intersection());
    }
}
