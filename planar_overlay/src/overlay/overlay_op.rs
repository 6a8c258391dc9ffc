use super::{
    check_noding, empty_result, is_result_of_op, LineBuilder, OverlayOpCode, OverlayOptions,
    OverlayResult, PointBuilder, PolygonBuilder,
};
use crate::{
    core::{math::CoordKey, traits::Real},
    error::{err_coord, TopologyError},
    geometry::{build_geometry, Geometry, PointLocator, Position},
    graph::{Edge, GeometryGraph, PlanarGraph},
};
use std::collections::BTreeMap;

/// Overlay of two geometries.
///
/// Holds the graphs of both inputs and the planar graph the result is extracted from. An
/// instance computes a single operation, use a new one for each operation.
#[derive(Debug, Clone)]
pub struct OverlayOp<'a, T = f64> {
    args: [GeometryGraph<'a, T>; 2],
    graph: PlanarGraph<T>,
    options: OverlayOptions,
}

impl<'a, T> OverlayOp<'a, T>
where
    T: Real,
{
    pub fn new(g0: &'a Geometry<T>, g1: &'a Geometry<T>, options: &OverlayOptions) -> Self {
        let rule = options.boundary_node_rule;
        Self {
            args: [GeometryGraph::new(0, g0, rule), GeometryGraph::new(1, g1, rule)],
            graph: PlanarGraph::new(),
            options: *options,
        }
    }

    /// Input geometry `index` (0 or 1).
    #[inline]
    pub fn arg_geometry(&self, index: usize) -> &'a Geometry<T> {
        self.args[index].geometry()
    }

    /// Graph the result was extracted from.
    #[inline]
    pub fn graph(&self) -> &PlanarGraph<T> {
        &self.graph
    }

    /// Compute `op`, consuming the graph state.
    pub fn result_geometry(mut self, op: OverlayOpCode) -> OverlayResult<T> {
        self.compute_overlay(op)
    }

    fn compute_overlay(&mut self, op: OverlayOpCode) -> OverlayResult<T> {
        for arg in self.args.iter() {
            if arg.has_too_few_points() {
                let coord = arg.invalid_point().unwrap_or_default();
                return Err(TopologyError::InvalidInput {
                    coord: err_coord(coord),
                });
            }
        }

        log::debug!("{:?} overlay: noding inputs", op);
        self.copy_points(0);
        self.copy_points(1);

        let [arg0, arg1] = &mut self.args;
        arg0.compute_self_nodes(false, false);
        arg1.compute_self_nodes(false, false);
        arg0.compute_edge_intersections(arg1, true);

        let mut base_split_edges = Vec::new();
        arg0.compute_split_edges(&mut base_split_edges);
        arg1.compute_split_edges(&mut base_split_edges);
        log::trace!("{} split edges", base_split_edges.len());

        let mut edge_list = UniqueEdgeList::default();
        for e in base_split_edges {
            edge_list.insert_unique_edge(e);
        }
        let mut edges = edge_list.edges;
        compute_labels_from_depths(&mut edges);
        replace_collapsed_edges(&mut edges);

        if self.options.validate_noding {
            check_noding(&edges)?;
        }

        log::debug!("{:?} overlay: labelling {} edges", op, edges.len());
        self.graph.add_edges(edges);
        self.compute_labelling()?;
        self.label_incomplete_nodes();

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        log::debug!("{:?} overlay: building result", op);
        let mut polygon_builder = PolygonBuilder::new();
        polygon_builder.add(&mut self.graph)?;
        let polygons = polygon_builder.polygons();
        let lines = LineBuilder::new(op).build(&mut self.graph, &polygons);
        let points = PointBuilder::new(op).build(&self.graph, &lines, &polygons);

        if points.is_empty() && lines.is_empty() && polygons.is_empty() {
            return Ok(empty_result(
                op,
                self.args[0].geometry(),
                self.args[1].geometry(),
            ));
        }
        Ok(build_geometry(points, lines, polygons))
    }

    /// Copy the nodes of input `arg_index` with their locations into the result graph.
    fn copy_points(&mut self, arg_index: usize) {
        for node in self.args[arg_index].nodes.iter() {
            let n = self.graph.add_node(node.coordinate());
            self.graph
                .nodes
                .get_mut(n)
                .set_label(arg_index, node.label.on(arg_index));
        }
    }

    fn compute_labelling(&mut self) -> Result<(), TopologyError> {
        let geoms = [self.args[0].geometry(), self.args[1].geometry()];
        let rule = self.options.boundary_node_rule;
        let graph = &mut self.graph;
        let indexes = graph.nodes.indexes();

        for &n in indexes.iter() {
            graph.nodes.get_mut(n).star.compute_directed_labelling(
                &mut graph.directed_edges,
                &graph.edges,
                geoms,
                rule,
            )?;
        }

        for &n in indexes.iter() {
            graph
                .nodes
                .get(n)
                .star
                .merge_sym_labels(&mut graph.directed_edges);
        }

        for &n in indexes.iter() {
            let node = graph.nodes.get_mut(n);
            let star_label = *node.star.label();
            node.label.merge(&star_label);
        }

        Ok(())
    }

    /// Locate nodes labelled by only one input in the other input, then fill unknown
    /// locations of the incident edges from the node labels.
    fn label_incomplete_nodes(&mut self) {
        let locator = PointLocator::new(self.options.boundary_node_rule);
        let graph = &mut self.graph;
        for n in graph.nodes.indexes() {
            let node = graph.nodes.get_mut(n);
            if node.is_isolated() {
                let target = if node.label.is_null(0) { 0 } else { 1 };
                let loc = locator.locate(node.coordinate(), self.args[target].geometry());
                node.label.set_on(target, Some(loc));
            }
            let node_label = node.label;
            node.star
                .update_labelling(&mut graph.directed_edges, &node_label);
        }
    }

    /// Mark the directed edges bounding the result area: area edges (not interior to both
    /// inputs) with the result on their right side.
    fn find_result_area_edges(&mut self, op: OverlayOpCode) {
        for de in self.graph.directed_edges.iter_mut() {
            let label = de.end.label;
            if label.is_area()
                && !de.is_interior_area_edge()
                && is_result_of_op(
                    label.location(0, Position::Right),
                    label.location(1, Position::Right),
                    op,
                )
            {
                de.set_in_result(true);
            }
        }
    }

    /// Remove both directed edges of an edge from the result if both are in it (the result
    /// area is on both sides of the edge).
    fn cancel_duplicate_result_edges(&mut self) {
        let des = &mut self.graph.directed_edges;
        for i in 0..des.len() {
            let sym = des[i].sym;
            if des[i].is_in_result() && des[sym].is_in_result() {
                des[i].set_in_result(false);
                des[sym].set_in_result(false);
            }
        }
    }
}

/// Split edges with duplicates merged, equal edges (same points forward or reversed) are found
/// through a map keyed by the points in a canonical direction.
#[derive(Debug)]
struct UniqueEdgeList<T> {
    edges: Vec<Edge<T>>,
    index: BTreeMap<Vec<CoordKey<T>>, usize>,
}

impl<T> Default for UniqueEdgeList<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            index: BTreeMap::new(),
        }
    }
}

impl<T> UniqueEdgeList<T>
where
    T: Real,
{
    /// Points of `e` in the direction which compares smaller point by point with its
    /// reverse.
    fn oriented_key(e: &Edge<T>) -> Vec<CoordKey<T>> {
        let pts = e.coords();
        let n = pts.len();
        let forward = (0..n)
            .map(|i| pts[i].compare(&pts[n - 1 - i]))
            .find(|o| o.is_ne())
            .map_or(true, |o| o.is_lt());

        if forward {
            pts.iter().map(|&c| CoordKey(c)).collect()
        } else {
            pts.iter().rev().map(|&c| CoordKey(c)).collect()
        }
    }

    /// Add `e`, or merge its label and depth into an existing equal edge.
    fn insert_unique_edge(&mut self, e: Edge<T>) {
        let key = Self::oriented_key(&e);
        let Some(&existing_index) = self.index.get(&key) else {
            self.index.insert(key, self.edges.len());
            self.edges.push(e);
            return;
        };

        let existing = &mut self.edges[existing_index];
        let mut label_to_merge = e.label;
        if !existing.is_pointwise_equal(&e) {
            label_to_merge.flip();
        }

        if existing.depth.is_null() {
            let existing_label = existing.label;
            existing.depth.add_label(&existing_label);
        }
        existing.depth.add_label(&label_to_merge);
        existing.label.merge(&label_to_merge);
    }
}

/// Derive the side locations of merged edges from their accumulated depths. Edges with equal
/// depth on both sides of an input have collapsed and become line edges for it.
fn compute_labels_from_depths<T>(edges: &mut [Edge<T>])
where
    T: Real,
{
    for e in edges.iter_mut() {
        if e.depth.is_null() {
            continue;
        }

        e.depth.normalize();
        for i in 0..2 {
            if e.label.is_null(i) || !e.label.is_area() || e.depth.is_null_for(i) {
                continue;
            }

            if e.depth.delta(i) == 0 {
                e.label.to_line(i);
            } else {
                debug_assert!(
                    !e.depth.is_null_at(i, Position::Left),
                    "depth of left side has not been initialized"
                );
                e.label
                    .set_location(i, Position::Left, Some(e.depth.location(i, Position::Left)));
                debug_assert!(
                    !e.depth.is_null_at(i, Position::Right),
                    "depth of right side has not been initialized"
                );
                e.label.set_location(
                    i,
                    Position::Right,
                    Some(e.depth.location(i, Position::Right)),
                );
            }
        }
    }
}

/// Replace area edges collapsed to `A-B-A` by the line edge `A-B`.
fn replace_collapsed_edges<T>(edges: &mut [Edge<T>])
where
    T: Real,
{
    for e in edges.iter_mut() {
        if e.is_collapsed() {
            *e = e.collapsed_edge();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, geometry::Location, graph::Label};

    fn area_edge(pts: &[(f64, f64)], geom_index: usize) -> Edge<f64> {
        Edge::new(
            pts.iter().map(|&(x, y)| coord(x, y)).collect(),
            Label::new_geom_area(
                geom_index,
                Some(Location::Boundary),
                Some(Location::Interior),
                Some(Location::Exterior),
            ),
        )
    }

    #[test]
    fn coincident_edges_are_merged() {
        let mut list = UniqueEdgeList::default();
        list.insert_unique_edge(area_edge(&[(0.0, 0.0), (1.0, 0.0)], 0));
        // same edge from the other input, reversed and with the interior on the same side
        list.insert_unique_edge(area_edge(&[(1.0, 0.0), (0.0, 0.0)], 1));
        list.insert_unique_edge(area_edge(&[(1.0, 0.0), (1.0, 1.0)], 0));
        assert_eq!(list.edges.len(), 2);

        let mut edges = list.edges;
        let label = edges[0].label;
        assert_eq!(label.location(1, Position::Left), Some(Location::Exterior));
        assert_eq!(label.location(1, Position::Right), Some(Location::Interior));

        compute_labels_from_depths(&mut edges);
        // interior on opposite sides: still an area edge for both inputs
        assert!(edges[0].label.is_area_for(0));
        assert!(edges[0].label.is_area_for(1));
        assert!(edges[1].depth.is_null());
    }

    #[test]
    fn collapsed_depths_become_lines() {
        let mut list = UniqueEdgeList::default();
        list.insert_unique_edge(area_edge(&[(0.0, 0.0), (1.0, 0.0)], 0));
        // same input, opposite interior side: the two areas meet along the edge
        list.insert_unique_edge(area_edge(&[(1.0, 0.0), (0.0, 0.0)], 0));
        let mut edges = list.edges;
        assert_eq!(edges.len(), 1);

        compute_labels_from_depths(&mut edges);
        assert!(edges[0].label.is_line(0));
    }

    #[test]
    fn collapsed_edge_replaced() {
        let mut edges = vec![area_edge(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)], 0)];
        replace_collapsed_edges(&mut edges);
        assert_eq!(edges[0].num_points(), 2);
        assert!(edges[0].label.is_line(0));
    }

    #[test]
    fn too_few_points_is_invalid_input() {
        let a = Geometry::LineString(line_string![(1.0, 1.0), (1.0, 1.0)]);
        let b = Geometry::Point(coord(0.0, 0.0));
        let err = OverlayOp::new(&a, &b, &OverlayOptions::new())
            .result_geometry(OverlayOpCode::Union)
            .unwrap_err();
        assert_eq!(
            err,
            TopologyError::InvalidInput {
                coord: coord(1.0, 1.0)
            }
        );
        assert!(!err.is_retryable());
    }
}
