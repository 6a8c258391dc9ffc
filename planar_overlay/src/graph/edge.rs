use super::{Depth, Label};
use crate::core::{
    math::{Coord, EnvelopeExt, SegmentIntersection},
    traits::Real,
};
use static_aabb2d_index::AABB;
use std::cmp::Ordering;

/// Point where an edge is intersected, located by segment index and distance along the segment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeIntersection<T = f64> {
    pub coord: Coord<T>,
    /// Index of the segment containing the intersection.
    pub segment_index: usize,
    /// Edge distance of the intersection along its segment.
    pub dist: T,
}

impl<T> EdgeIntersection<T>
where
    T: Real,
{
    pub fn new(coord: Coord<T>, segment_index: usize, dist: T) -> Self {
        Self {
            coord,
            segment_index,
            dist,
        }
    }

    /// Ordering along the edge (segment index then distance).
    pub fn compare(&self, segment_index: usize, dist: T) -> Ordering {
        match self.segment_index.cmp(&segment_index) {
            Ordering::Equal => self.dist.partial_cmp(&dist).unwrap_or(Ordering::Equal),
            ord => ord,
        }
    }

    /// Intersection is at the start or end of the edge.
    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.dist == T::zero())
            || self.segment_index == max_segment_index
    }
}

/// Intersections of an edge kept in order along the edge, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList<T = f64> {
    nodes: Vec<EdgeIntersection<T>>,
}

impl<T> EdgeIntersectionList<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add an intersection, returning the stored record (the existing one if an intersection
    /// with the same position was already added).
    pub fn add(&mut self, coord: Coord<T>, segment_index: usize, dist: T) -> EdgeIntersection<T> {
        match self
            .nodes
            .binary_search_by(|ei| ei.compare(segment_index, dist))
        {
            Ok(i) => self.nodes[i],
            Err(i) => {
                let ei = EdgeIntersection::new(coord, segment_index, dist);
                self.nodes.insert(i, ei);
                ei
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection<T>> {
        self.nodes.iter()
    }

    /// `pt` is one of the intersections.
    pub fn is_intersection(&self, pt: Coord<T>) -> bool {
        self.nodes.iter().any(|ei| ei.coord.equals_2d(&pt))
    }

    /// Add the first and last points of the edge as intersections.
    pub fn add_endpoints(&mut self, pts: &[Coord<T>]) {
        if pts.is_empty() {
            return;
        }
        let max_seg_index = pts.len() - 1;
        self.add(pts[0], 0, T::zero());
        self.add(pts[max_seg_index], max_seg_index, T::zero());
    }

    /// Points of the part of `pts` between two consecutive intersections.
    fn split_points(
        pts: &[Coord<T>],
        ei0: &EdgeIntersection<T>,
        ei1: &EdgeIntersection<T>,
    ) -> Vec<Coord<T>> {
        let last_seg_start_pt = pts[ei1.segment_index];
        // the last intersection is only used if it is not the vertex starting its segment
        let use_int_pt1 = ei1.dist > T::zero() || !ei1.coord.equals_2d(&last_seg_start_pt);

        let mut result = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        result.push(ei0.coord);
        result.extend_from_slice(&pts[ei0.segment_index + 1..=ei1.segment_index]);
        if use_int_pt1 {
            result.push(ei1.coord);
        }
        result
    }
}

/// Edge of a topology graph: a polyline with a label, recorded intersections and side depths.
#[derive(Debug, Clone)]
pub struct Edge<T = f64> {
    pts: Vec<Coord<T>>,
    env: AABB<T>,
    pub label: Label,
    pub ei_list: EdgeIntersectionList<T>,
    pub depth: Depth,
    depth_delta: i32,
    is_isolated: bool,
    in_result: bool,
    covered: Option<bool>,
}

impl<T> Edge<T>
where
    T: Real,
{
    /// Create an edge, `pts` must contain at least 2 points.
    pub fn new(pts: Vec<Coord<T>>, label: Label) -> Self {
        debug_assert!(pts.len() >= 2, "edge requires at least 2 points");
        let env = AABB::from_coords(&pts);
        Self {
            pts,
            env,
            label,
            ei_list: EdgeIntersectionList::new(),
            depth: Depth::new(),
            depth_delta: 0,
            is_isolated: true,
            in_result: false,
            covered: None,
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord<T>] {
        &self.pts
    }

    #[inline]
    pub fn coord(&self, i: usize) -> Coord<T> {
        self.pts[i]
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.pts.len()
    }

    /// Representative coordinate (the first point).
    #[inline]
    pub fn coordinate(&self) -> Coord<T> {
        self.pts[0]
    }

    #[inline]
    pub fn envelope(&self) -> &AABB<T> {
        &self.env
    }

    #[inline]
    pub fn max_segment_index(&self) -> usize {
        self.pts.len() - 1
    }

    pub fn is_closed(&self) -> bool {
        self.pts[0].equals_2d(&self.pts[self.pts.len() - 1])
    }

    /// Area edge which has collapsed to a line going out and back (`A-B-A`).
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.pts.len() == 3 && self.pts[0].equals_2d(&self.pts[2])
    }

    /// Line edge replacing a collapsed edge.
    pub fn collapsed_edge(&self) -> Edge<T> {
        Edge::new(
            vec![self.pts[0], self.pts[1]],
            Label::to_line_label(&self.label),
        )
    }

    #[inline]
    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    #[inline]
    pub fn set_depth_delta(&mut self, depth_delta: i32) {
        self.depth_delta = depth_delta;
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.is_isolated
    }

    #[inline]
    pub fn set_isolated(&mut self, is_isolated: bool) {
        self.is_isolated = is_isolated;
    }

    #[inline]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    #[inline]
    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    /// Edge is covered by a result area (only meaningful if [Edge::is_covered_set]).
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.covered.unwrap_or(false)
    }

    #[inline]
    pub fn is_covered_set(&self) -> bool {
        self.covered.is_some()
    }

    #[inline]
    pub fn set_covered(&mut self, covered: bool) {
        self.covered = Some(covered);
    }

    /// Intersection record for intersection `int_index` of `li` on segment `segment_index` of this
    /// edge, `input_index` is the index of this edge's segment in `li` (0 or 1).
    ///
    /// An intersection at the end vertex of a segment is normalized to the start of the next
    /// segment so that each vertex has a unique position along the edge.
    pub fn intersection_record(
        &self,
        li: &SegmentIntersection<T>,
        segment_index: usize,
        input_index: usize,
        int_index: usize,
    ) -> EdgeIntersection<T> {
        let int_pt = li.intersection(int_index);
        let mut normalized_segment_index = segment_index;
        let mut dist = li.edge_distance(input_index, int_index);

        let next_seg_index = normalized_segment_index + 1;
        if next_seg_index < self.pts.len() && int_pt.equals_2d(&self.pts[next_seg_index]) {
            normalized_segment_index = next_seg_index;
            dist = T::zero();
        }

        EdgeIntersection::new(int_pt, normalized_segment_index, dist)
    }

    /// Record every intersection of `li` on segment `segment_index` of this edge.
    pub fn add_intersections(
        &mut self,
        li: &SegmentIntersection<T>,
        segment_index: usize,
        input_index: usize,
    ) {
        for i in 0..li.intersection_count() {
            let ei = self.intersection_record(li, segment_index, input_index, i);
            self.ei_list.add(ei.coord, ei.segment_index, ei.dist);
        }
    }

    /// Record the first and last points as intersections.
    #[inline]
    pub fn add_endpoint_intersections(&mut self) {
        self.ei_list.add_endpoints(&self.pts);
    }

    /// Split this edge at its recorded intersections (and endpoints), each split edge gets a
    /// copy of this edge's label.
    pub fn split_edges(&mut self) -> Vec<Edge<T>> {
        self.add_endpoint_intersections();

        self.ei_list
            .nodes
            .windows(2)
            .map(|w| {
                let pts = EdgeIntersectionList::split_points(&self.pts, &w[0], &w[1]);
                Edge::new(pts, self.label)
            })
            .collect()
    }

    /// Same points in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge<T>) -> bool {
        self.pts.len() == other.pts.len()
            && self
                .pts
                .iter()
                .zip(other.pts.iter())
                .all(|(a, b)| a.equals_2d(b))
    }

    /// Same points in the same or reverse order.
    pub fn is_equal(&self, other: &Edge<T>) -> bool {
        if self.pts.len() != other.pts.len() {
            return false;
        }

        let n = self.pts.len();
        let mut is_equal_forward = true;
        let mut is_equal_reverse = true;
        for i in 0..n {
            if !self.pts[i].equals_2d(&other.pts[i]) {
                is_equal_forward = false;
            }
            if !self.pts[i].equals_2d(&other.pts[n - 1 - i]) {
                is_equal_reverse = false;
            }
            if !is_equal_forward && !is_equal_reverse {
                return false;
            }
        }
        true
    }
}
