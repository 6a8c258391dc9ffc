use super::is_valid_op::find_point_not_node;
use crate::{
    core::{
        math::{build_spatial_index, is_in_ring, Coord, EnvelopeExt},
        traits::Real,
    },
    geometry::LineString,
    graph::GeometryGraph,
};
use static_aabb2d_index as aabb_index;

/// Finds a ring nested inside another ring of a set, using a spatial index over the ring
/// envelopes to only test rings which may overlap.
///
/// The rings must come from the geometry of the graph and be self noded, so touching rings
/// are recognized by their shared nodes.
#[derive(Debug)]
pub struct NestedRingTester<'g, 'a, T = f64> {
    graph: &'g GeometryGraph<'a, T>,
    rings: Vec<&'a LineString<T>>,
    nested_point: Option<Coord<T>>,
}

impl<'g, 'a, T> NestedRingTester<'g, 'a, T>
where
    T: Real,
{
    pub fn new(graph: &'g GeometryGraph<'a, T>) -> Self {
        Self {
            graph,
            rings: Vec::new(),
            nested_point: None,
        }
    }

    pub fn add(&mut self, ring: &'a LineString<T>) {
        self.rings.push(ring);
    }

    /// Point of the nested ring found by the last [Self::is_non_nested] call.
    pub fn nested_point(&self) -> Option<Coord<T>> {
        self.nested_point
    }

    pub fn is_non_nested(&mut self) -> bool {
        if self.rings.len() < 2 {
            return true;
        }

        let envelopes: Vec<_> = self.rings.iter().map(|r| r.envelope()).collect();
        let index = build_spatial_index(envelopes.iter().cloned());
        let mut query_stack = Vec::with_capacity(8);

        for (i, inner) in self.rings.iter().enumerate() {
            let env = &envelopes[i];
            let mut nested = None;
            let mut query_visitor = |j: usize| {
                if i == j || !env.intersects_envelope(&envelopes[j]) {
                    return aabb_index::Control::Continue;
                }
                let search = self.rings[j];
                // no point of the inner ring is off the search ring
                let Some(inner_pt) = find_point_not_node(inner.coords(), search, self.graph) else {
                    return aabb_index::Control::Continue;
                };
                if is_in_ring(inner_pt, search.coords()) {
                    nested = Some(inner_pt);
                    return aabb_index::Control::Break(());
                }
                aabb_index::Control::Continue
            };

            index.visit_query_with_stack(
                env.min_x,
                env.min_y,
                env.max_x,
                env.max_y,
                &mut query_visitor,
                &mut query_stack,
            );

            if nested.is_some() {
                self.nested_point = nested;
                return false;
            }
        }

        true
    }
}
