use super::{is_label_result_of_op, OverlayOpCode};
use crate::{
    core::{math::Coord, traits::Real},
    geometry::{locate_point_in_polygon, LineString, Location, Polygon},
    graph::PlanarGraph,
};

/// Builds the lines of an overlay result from the line edges of a labelled planar graph, and
/// for intersections the area edges where the inputs only touch.
#[derive(Debug, Clone, Copy)]
pub struct LineBuilder {
    op: OverlayOpCode,
}

impl LineBuilder {
    pub fn new(op: OverlayOpCode) -> Self {
        Self { op }
    }

    /// Result lines of `graph`, `result_polys` are the already built result polygons (line
    /// edges inside them are not part of the result).
    ///
    /// The edges used are marked as in result.
    pub fn build<T>(&self, graph: &mut PlanarGraph<T>, result_polys: &[Polygon<T>]) -> Vec<LineString<T>>
    where
        T: Real,
    {
        self.find_covered_line_edges(graph, result_polys);
        let line_edges = self.collect_lines(graph);

        let lines: Vec<LineString<T>> = line_edges
            .into_iter()
            .map(|e| {
                graph.edges[e].set_in_result(true);
                LineString::new(graph.edges[e].coords().to_vec())
            })
            .collect();

        log::trace!("{:?} result has {} lines", self.op, lines.len());
        lines
    }

    /// Decide for every line edge whether it is covered by the result area: first from the
    /// result area edges around each node, then for edges not touching any result area edge
    /// by locating the edge in the result polygons.
    fn find_covered_line_edges<T>(&self, graph: &mut PlanarGraph<T>, result_polys: &[Polygon<T>])
    where
        T: Real,
    {
        for n in graph.nodes.indexes() {
            graph
                .nodes
                .get(n)
                .star
                .find_covered_line_edges(&graph.directed_edges, &mut graph.edges);
        }

        for de in graph.directed_edges.iter() {
            let e = &mut graph.edges[de.edge()];
            if de.is_line_edge() && !e.is_covered_set() {
                e.set_covered(is_covered_by_area(de.end.coordinate(), result_polys));
            }
        }
    }

    fn collect_lines<T>(&self, graph: &mut PlanarGraph<T>) -> Vec<usize>
    where
        T: Real,
    {
        let mut line_edges = Vec::new();
        for de in 0..graph.directed_edges.len() {
            if self.is_line_result_edge(graph, de) || self.is_boundary_touch_edge(graph, de) {
                let sym = graph.directed_edges[de].sym;
                graph.directed_edges[de].set_visited(true);
                graph.directed_edges[sym].set_visited(true);
                line_edges.push(graph.directed_edges[de].edge());
            }
        }
        line_edges
    }

    /// Line edge in the result which is not covered by the result area.
    fn is_line_result_edge<T>(&self, graph: &PlanarGraph<T>, de: usize) -> bool
    where
        T: Real,
    {
        let d = &graph.directed_edges[de];
        d.is_line_edge()
            && !d.is_visited()
            && is_label_result_of_op(&d.end.label, self.op)
            && !graph.edges[d.edge()].is_covered()
    }

    /// Area edge where the inputs touch without overlapping, only part of an intersection
    /// result.
    fn is_boundary_touch_edge<T>(&self, graph: &PlanarGraph<T>, de: usize) -> bool
    where
        T: Real,
    {
        let d = &graph.directed_edges[de];
        if d.is_line_edge() || d.is_visited() || d.is_interior_area_edge() {
            return false;
        }
        if graph.edges[d.edge()].is_in_result() {
            return false;
        }

        debug_assert!(
            !(d.is_in_result() || graph.directed_edges[d.sym].is_in_result()),
            "directed edge of an edge not in result is in result"
        );

        self.op == OverlayOpCode::Intersection && is_label_result_of_op(&d.end.label, self.op)
    }
}

/// `p` is inside or on the boundary of one of `polys`.
pub(crate) fn is_covered_by_area<T>(p: Coord<T>, polys: &[Polygon<T>]) -> bool
where
    T: Real,
{
    polys
        .iter()
        .any(|poly| locate_point_in_polygon(p, poly) != Location::Exterior)
}
