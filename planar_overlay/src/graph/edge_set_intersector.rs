use super::{Edge, EdgeSegment, SegmentIntersector};
use crate::core::{
    math::{build_spatial_index, EnvelopeExt},
    traits::Real,
};
use static_aabb2d_index as aabb_index;
use static_aabb2d_index::{StaticAABB2DIndex, AABB};

/// Spatial index over every segment of `edges`, index item `i` is segment `segs[i]` given as
/// `(edge, segment)`.
pub fn segment_index<T>(edges: &[Edge<T>]) -> (StaticAABB2DIndex<T>, Vec<(usize, usize)>)
where
    T: Real,
{
    let segs: Vec<(usize, usize)> = edges
        .iter()
        .enumerate()
        .flat_map(|(e, edge)| (0..edge.num_points() - 1).map(move |s| (e, s)))
        .collect();

    let index = build_spatial_index(
        segs.iter()
            .map(|&(e, s)| AABB::from_segment(edges[e].coord(s), edges[e].coord(s + 1))),
    );

    (index, segs)
}

/// Compute all intersections between the segments of `edges` and record them on the edges.
///
/// Segments of the same edge are only tested against each other if `test_all_segments` is
/// set. Scanning stops early once `si` reports it is done.
pub fn compute_self_intersections<T>(
    edges: &mut [Edge<T>],
    si: &mut SegmentIntersector<T>,
    test_all_segments: bool,
) where
    T: Real,
{
    if edges.is_empty() {
        return;
    }

    let (index, segs) = segment_index(edges);
    let mut query_stack = Vec::with_capacity(8);
    {
        let edges: &[Edge<T>] = edges;
        for (box_index, aabb) in index.item_boxes().iter().enumerate() {
            let i = index.item_indices()[box_index];
            let (e0, s0) = segs[i];
            let mut query_visitor = |hit: usize| {
                // each pair once
                if hit <= i {
                    return aabb_index::Control::Continue;
                }
                let (e1, s1) = segs[hit];
                if e0 == e1 && !test_all_segments {
                    return aabb_index::Control::Continue;
                }

                si.add_intersections(
                    &edges[e0],
                    EdgeSegment::new(0, e0, s0),
                    &edges[e1],
                    EdgeSegment::new(0, e1, s1),
                );
                if si.is_done() {
                    return aabb_index::Control::Break(());
                }
                aabb_index::Control::Continue
            };

            index.visit_query_with_stack(
                aabb.min_x,
                aabb.min_y,
                aabb.max_x,
                aabb.max_y,
                &mut query_visitor,
                &mut query_stack,
            );

            if si.is_done() {
                break;
            }
        }
    }

    si.apply_to(0, edges);
}

/// Compute all intersections between segments of `edges0` and segments of `edges1` and record
/// them on both lists of edges.
pub fn compute_intersections<T>(
    edges0: &mut [Edge<T>],
    edges1: &mut [Edge<T>],
    si: &mut SegmentIntersector<T>,
) where
    T: Real,
{
    if edges0.is_empty() || edges1.is_empty() {
        return;
    }

    let (index, segs) = segment_index(edges0);
    let mut query_stack = Vec::with_capacity(8);
    {
        let edges0: &[Edge<T>] = edges0;
        'outer: for (e1, edge1) in edges1.iter().enumerate() {
            for s1 in 0..edge1.num_points() - 1 {
                let aabb = AABB::from_segment(edge1.coord(s1), edge1.coord(s1 + 1));
                let mut query_visitor = |hit: usize| {
                    let (e0, s0) = segs[hit];
                    si.add_intersections(
                        &edges0[e0],
                        EdgeSegment::new(0, e0, s0),
                        edge1,
                        EdgeSegment::new(1, e1, s1),
                    );
                    if si.is_done() {
                        return aabb_index::Control::Break(());
                    }
                    aabb_index::Control::Continue
                };

                index.visit_query_with_stack(
                    aabb.min_x,
                    aabb.min_y,
                    aabb.max_x,
                    aabb.max_y,
                    &mut query_visitor,
                    &mut query_stack,
                );

                if si.is_done() {
                    break 'outer;
                }
            }
        }
    }

    si.apply_to(0, edges0);
    si.apply_to(1, edges1);
}
