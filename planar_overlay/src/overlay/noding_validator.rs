use crate::{
    core::{
        math::{Coord, EnvelopeExt, SegmentIntersection},
        traits::Real,
    },
    error::{err_coord, TopologyError},
    graph::{segment_index, Edge},
};
use static_aabb2d_index as aabb_index;

/// Check that `edges` only meet at their endpoints.
///
/// Returns [TopologyError::NonNodedIntersection] with the first offending point otherwise
/// (a crossing or touch in the interior of an edge, or a collinear overlap).
pub fn check_noding<T>(edges: &[Edge<T>]) -> Result<(), TopologyError>
where
    T: Real,
{
    if edges.is_empty() {
        return Ok(());
    }

    let (index, segs) = segment_index(edges);
    let mut query_stack = Vec::with_capacity(8);
    let mut failure = None;

    for (box_index, aabb) in index.item_boxes().iter().enumerate() {
        let i = index.item_indices()[box_index];
        let (e0, s0) = segs[i];
        let mut query_visitor = |hit: usize| {
            if hit <= i {
                return aabb_index::Control::Continue;
            }
            let (e1, s1) = segs[hit];
            if let Some(pt) = non_noded_point(edges, e0, s0, e1, s1) {
                failure = Some(pt);
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

        if let Some(pt) = failure {
            return Err(TopologyError::NonNodedIntersection {
                coord: err_coord(pt),
            });
        }
    }

    Ok(())
}

fn is_endpoint<T>(edge: &Edge<T>, pt: Coord<T>) -> bool
where
    T: Real,
{
    pt.equals_2d(&edge.coord(0)) || pt.equals_2d(&edge.coord(edge.num_points() - 1))
}

fn non_noded_point<T>(edges: &[Edge<T>], e0: usize, s0: usize, e1: usize, s1: usize) -> Option<Coord<T>>
where
    T: Real,
{
    let (edge0, edge1) = (&edges[e0], &edges[e1]);
    if !edge0.envelope().intersects_envelope(edge1.envelope()) {
        return None;
    }

    let li = SegmentIntersection::compute(
        edge0.coord(s0),
        edge0.coord(s0 + 1),
        edge1.coord(s1),
        edge1.coord(s1 + 1),
    );
    if !li.has_intersection() {
        return None;
    }

    // consecutive segments of one edge share their vertex
    if e0 == e1 && li.intersection_count() == 1 && s0.abs_diff(s1) == 1 {
        return None;
    }

    (0..li.intersection_count())
        .map(|k| li.intersection(k))
        .find(|&pt| !(is_endpoint(edge0, pt) && is_endpoint(edge1, pt)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, graph::Label};

    fn edge(pts: &[(f64, f64)]) -> Edge<f64> {
        Edge::new(pts.iter().map(|&(x, y)| coord(x, y)).collect(), Label::default())
    }

    #[test]
    fn edges_meeting_at_endpoints_are_noded() {
        let edges = vec![
            edge(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            edge(&[(1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            edge(&[(1.0, 1.0), (2.0, 2.0)]),
        ];
        assert!(check_noding(&edges).is_ok());
    }

    #[test]
    fn crossing_is_reported() {
        let edges = vec![edge(&[(0.0, 0.0), (2.0, 2.0)]), edge(&[(0.0, 2.0), (2.0, 0.0)])];
        let err = check_noding(&edges).unwrap_err();
        assert_eq!(
            err,
            TopologyError::NonNodedIntersection {
                coord: coord(1.0, 1.0)
            }
        );
    }

    #[test]
    fn touch_at_interior_vertex_is_reported() {
        let edges = vec![
            edge(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]),
            edge(&[(1.0, 1.0), (1.0, 5.0)]),
        ];
        assert!(matches!(
            check_noding(&edges),
            Err(TopologyError::NonNodedIntersection { .. })
        ));
    }
}
