use super::{is_label_result_of_op, line_builder::is_covered_by_area, OverlayOpCode};
use crate::{
    core::{
        math::{is_on_line, Coord},
        traits::Real,
    },
    geometry::{LineString, Polygon},
    graph::PlanarGraph,
};

/// Builds the points of an overlay result from the nodes of a labelled planar graph which are
/// not already part of a result line or area.
#[derive(Debug, Clone, Copy)]
pub struct PointBuilder {
    op: OverlayOpCode,
}

impl PointBuilder {
    pub fn new(op: OverlayOpCode) -> Self {
        Self { op }
    }

    /// Result points of `graph`, in node (coordinate) order.
    ///
    /// Nodes with an incident result edge are skipped. Only isolated nodes can be in the result
    /// except for intersections, where nodes where the inputs touch are included too.
    pub fn build<T>(
        &self,
        graph: &PlanarGraph<T>,
        result_lines: &[LineString<T>],
        result_polys: &[Polygon<T>],
    ) -> Vec<Coord<T>>
    where
        T: Real,
    {
        let mut points = Vec::new();
        for node in graph.nodes.iter() {
            if node.is_incident_edge_in_result(&graph.directed_edges, &graph.edges) {
                continue;
            }
            if node.star.degree() != 0 && self.op != OverlayOpCode::Intersection {
                continue;
            }
            if !is_label_result_of_op(&node.label, self.op) {
                continue;
            }

            let coord = node.coordinate();
            let is_covered = result_lines.iter().any(|l| is_on_line(coord, l.coords()))
                || is_covered_by_area(coord, result_polys);
            if !is_covered {
                points.push(coord);
            }
        }

        log::trace!("{:?} result has {} points", self.op, points.len());
        points
    }
}
