use super::{DirectedEdge, Edge, EdgeEndStar, EdgeEndItem, Label};
use crate::{
    core::traits::Real,
    error::{err_coord, TopologyError},
    geometry::{BoundaryNodeRule, Geometry, Location},
};

/// Operations on a star of [DirectedEdge]s (outgoing directed edges of a planar graph node).
impl EdgeEndStar {
    /// Label of the node derived from its incident edges by
    /// [EdgeEndStar::compute_directed_labelling].
    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// [EdgeEndStar::compute_labelling] followed by computing the node label: a node is in the
    /// interior of a geometry if any incident edge is in its interior or on its boundary.
    pub fn compute_directed_labelling<T>(
        &mut self,
        des: &mut [DirectedEdge<T>],
        edges: &[Edge<T>],
        geoms: [&Geometry<T>; 2],
        rule: BoundaryNodeRule,
    ) -> Result<(), TopologyError>
    where
        T: Real,
    {
        self.compute_labelling(des, geoms, rule)?;

        self.label = Label::new_on(None);
        for &id in self.ends.iter() {
            let edge_label = &edges[des[id].edge()].label;
            for i in 0..2 {
                if matches!(
                    edge_label.on(i),
                    Some(Location::Interior) | Some(Location::Boundary)
                ) {
                    self.label.set_on(i, Some(Location::Interior));
                }
            }
        }

        Ok(())
    }

    /// Merge the label of each directed edge with the label of its sym.
    pub fn merge_sym_labels<T>(&self, des: &mut [DirectedEdge<T>])
    where
        T: Real,
    {
        for &id in self.ends.iter() {
            let sym_label = des[des[id].sym].end.label;
            des[id].end.label.merge(&sym_label);
        }
    }

    /// Fill unknown locations of the incident edge labels with the node's locations.
    pub fn update_labelling<T>(&self, des: &mut [DirectedEdge<T>], node_label: &Label)
    where
        T: Real,
    {
        for &id in self.ends.iter() {
            let label = &mut des[id].end.label;
            label.set_all_locations_if_null(0, node_label.on(0));
            label.set_all_locations_if_null(1, node_label.on(1));
        }
    }

    /// Directed edges where either the edge or its sym is in the result, in star order.
    ///
    /// Computed on first use, in-result flags must not change afterwards.
    pub fn result_area_edges<T>(&mut self, des: &[DirectedEdge<T>]) -> Vec<usize>
    where
        T: Real,
    {
        let ends = &self.ends;
        self.result_area_edges
            .get_or_insert_with(|| {
                ends.iter()
                    .copied()
                    .filter(|&id| des[id].is_in_result() || des[des[id].sym].is_in_result())
                    .collect()
            })
            .clone()
    }

    /// Link each incoming result edge to the next outgoing result edge counter clockwise.
    ///
    /// Fails with [TopologyError::NoOutgoingDirEdge] if an incoming result edge has no
    /// outgoing result edge to link to.
    pub fn link_result_directed_edges<T>(
        &mut self,
        des: &mut [DirectedEdge<T>],
    ) -> Result<(), TopologyError>
    where
        T: Real,
    {
        let result_edges = self.result_area_edges(des);

        let mut first_out = None;
        let mut incoming = None;
        for &next_out in result_edges.iter() {
            let next_in = des[next_out].sym;
            if !des[next_out].label().is_area() {
                continue;
            }

            if first_out.is_none() && des[next_out].is_in_result() {
                first_out = Some(next_out);
            }

            match incoming {
                None => {
                    if des[next_in].is_in_result() {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if des[next_out].is_in_result() {
                        des[inc].next = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let Some(first_out) = first_out else {
                return Err(TopologyError::NoOutgoingDirEdge {
                    coord: err_coord(des[inc].end.directed_coordinate()),
                });
            };
            des[inc].next = Some(first_out);
        }

        Ok(())
    }

    /// Link the directed edges of maximal ring `ring` at this node into minimal rings, taking
    /// the next outgoing edge clockwise for each incoming edge.
    pub fn link_minimal_directed_edges<T>(&mut self, des: &mut [DirectedEdge<T>], ring: usize)
    where
        T: Real,
    {
        let result_edges = self.result_area_edges(des);

        let mut first_out = None;
        let mut incoming = None;
        for &next_out in result_edges.iter().rev() {
            let next_in = des[next_out].sym;

            if first_out.is_none() && des[next_out].edge_ring == Some(ring) {
                first_out = Some(next_out);
            }

            match incoming {
                None => {
                    if des[next_in].edge_ring == Some(ring) {
                        incoming = Some(next_in);
                    }
                }
                Some(inc) => {
                    if des[next_out].edge_ring == Some(ring) {
                        des[inc].next_min = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        // an unmatched incoming edge is left unlinked and reported when its ring is walked
        if let (Some(inc), Some(first_out)) = (incoming, first_out) {
            des[inc].next_min = Some(first_out);
        }
    }

    /// Link every incoming edge to the outgoing edge following its sym counter clockwise,
    /// regardless of result status.
    pub fn link_all_directed_edges<T>(&self, des: &mut [DirectedEdge<T>])
    where
        T: Real,
    {
        let mut prev_out = None;
        let mut first_in = None;
        for &next_out in self.ends.iter().rev() {
            let next_in = des[next_out].sym;
            if first_in.is_none() {
                first_in = Some(next_in);
            }
            if let Some(prev_out) = prev_out {
                des[next_in].next = Some(prev_out);
            }
            prev_out = Some(next_out);
        }

        if let Some(first_in) = first_in {
            des[first_in].next = prev_out;
        }
    }

    /// Mark the line edges at this node as covered when they lie inside the result area.
    ///
    /// Does nothing if no area edge at this node is in the result.
    pub fn find_covered_line_edges<T>(&self, des: &[DirectedEdge<T>], edges: &mut [Edge<T>])
    where
        T: Real,
    {
        let mut start_loc = None;
        for &next_out in self.ends.iter() {
            let next_in = des[next_out].sym;
            if !des[next_out].is_line_edge() {
                if des[next_out].is_in_result() {
                    start_loc = Some(Location::Interior);
                    break;
                }
                if des[next_in].is_in_result() {
                    start_loc = Some(Location::Exterior);
                    break;
                }
            }
        }

        let Some(mut curr_loc) = start_loc else {
            return;
        };

        for &next_out in self.ends.iter() {
            let next_in = des[next_out].sym;
            if des[next_out].is_line_edge() {
                edges[des[next_out].edge()].set_covered(curr_loc == Location::Interior);
            } else {
                if des[next_out].is_in_result() {
                    curr_loc = Location::Exterior;
                }
                if des[next_in].is_in_result() {
                    curr_loc = Location::Interior;
                }
            }
        }
    }

    /// Directed edge with the rightmost direction at this node.
    ///
    /// Returns `None` for an empty star, or if the only candidates are two horizontal edges.
    pub fn rightmost_edge<T>(&self, des: &[DirectedEdge<T>]) -> Option<usize>
    where
        T: Real,
    {
        let (&de0, &de_last) = (self.ends.first()?, self.ends.last()?);
        if self.ends.len() == 1 {
            return Some(de0);
        }

        let north0 = des[de0].end.quadrant().is_northern();
        let north_last = des[de_last].end.quadrant().is_northern();
        if north0 && north_last {
            Some(de0)
        } else if !north0 && !north_last {
            Some(de_last)
        } else if des[de0].end.dy() != T::zero() {
            Some(de0)
        } else if des[de_last].end.dy() != T::zero() {
            Some(de_last)
        } else {
            None
        }
    }

    /// Number of outgoing directed edges in the result.
    pub fn outgoing_degree<T>(&self, des: &[DirectedEdge<T>]) -> usize
    where
        T: Real,
    {
        self.ends
            .iter()
            .filter(|&&id| des[id].is_in_result())
            .count()
    }

    /// Number of outgoing directed edges belonging to maximal ring `ring`.
    pub fn outgoing_degree_for_ring<T>(&self, des: &[DirectedEdge<T>], ring: usize) -> usize
    where
        T: Real,
    {
        self.ends
            .iter()
            .filter(|&&id| des[id].edge_ring == Some(ring))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::coord;

    fn area_label() -> Label {
        Label::new_geom_area(
            0,
            Some(Location::Boundary),
            Some(Location::Interior),
            Some(Location::Exterior),
        )
    }

    /// Four edges leaving the origin (east, north, west, south) with directed edges 2i / 2i+1.
    fn cross(label: Label) -> (Vec<Edge<f64>>, Vec<DirectedEdge<f64>>, EdgeEndStar) {
        let edges: Vec<Edge<f64>> = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]
            .iter()
            .map(|&(x, y)| Edge::new(vec![coord(0.0, 0.0), coord(x, y)], label))
            .collect();
        let mut des = Vec::new();
        for (i, e) in edges.iter().enumerate() {
            let mut fwd = DirectedEdge::new(i, e, true);
            let mut rev = DirectedEdge::new(i, e, false);
            fwd.sym = 2 * i + 1;
            rev.sym = 2 * i;
            des.push(fwd);
            des.push(rev);
        }
        let mut star = EdgeEndStar::new();
        for i in 0..edges.len() {
            star.insert(2 * i, &des);
        }
        (edges, des, star)
    }

    #[test]
    fn link_all_turns_counter_clockwise() {
        let (_, mut des, star) = cross(area_label());
        star.link_all_directed_edges(&mut des);
        // incoming from north continues west, incoming from south continues east
        assert_eq!(des[3].next, Some(4));
        assert_eq!(des[7].next, Some(0));
        assert_eq!(des[1].next, Some(2));
        assert_eq!(des[5].next, Some(6));
    }

    #[test]
    fn link_result_edges() {
        let (_, mut des, mut star) = cross(area_label());
        // path coming in from the west and leaving north
        des[5].set_in_result(true);
        des[2].set_in_result(true);
        star.link_result_directed_edges(&mut des).unwrap();
        assert_eq!(des[5].next, Some(2));
        assert_eq!(star.outgoing_degree(&des), 1);
        assert_eq!(star.result_area_edges(&des), vec![2, 4]);
    }

    #[test]
    fn incoming_without_outgoing_fails() {
        let (_, mut des, mut star) = cross(area_label());
        des[5].set_in_result(true);
        let err = star.link_result_directed_edges(&mut des).unwrap_err();
        assert!(matches!(err, TopologyError::NoOutgoingDirEdge { .. }));
    }

    #[test]
    fn node_label_from_edges() {
        let (edges, mut des, mut star) = cross(area_label());
        let empty = Geometry::<f64>::GeometryCollection(Vec::new());
        star.compute_directed_labelling(&mut des, &edges, [&empty, &empty], BoundaryNodeRule::Mod2)
            .unwrap_err();
        // conflicting sides, the node label is left untouched
        assert_eq!(star.label().on(0), None);

        let mut lines = cross(Label::new_geom_on(1, Some(Location::Interior)));
        lines
            .2
            .compute_directed_labelling(&mut lines.1, &lines.0, [&empty, &empty], BoundaryNodeRule::Mod2)
            .unwrap();
        assert_eq!(lines.2.label().on(1), Some(Location::Interior));
        assert_eq!(lines.2.label().on(0), None);
        assert_eq!(lines.1[0].label().on(0), Some(Location::Exterior));
    }

    #[test]
    fn covered_line_edges() {
        let mut edges: Vec<Edge<f64>> = Vec::new();
        let area = area_label();
        let line = Label::new_geom_on(1, Some(Location::Interior));
        for (x, y, label) in [(1.0, 0.0, area), (0.0, 1.0, line), (-1.0, 0.0, area)] {
            edges.push(Edge::new(vec![coord(0.0, 0.0), coord(x, y)], label));
        }
        let mut des = Vec::new();
        for (i, e) in edges.iter().enumerate() {
            let mut fwd = DirectedEdge::new(i, e, true);
            let mut rev = DirectedEdge::new(i, e, false);
            fwd.sym = 2 * i + 1;
            rev.sym = 2 * i;
            des.push(fwd);
            des.push(rev);
        }
        let mut star = EdgeEndStar::new();
        for i in 0..edges.len() {
            star.insert(2 * i, &des);
        }
        // result boundary comes in along the east edge and leaves west, area above the x axis
        des[1].set_in_result(true);
        des[4].set_in_result(true);
        star.find_covered_line_edges(&des, &mut edges);
        assert!(edges[1].is_covered_set());
        assert!(edges[1].is_covered());
        assert!(!edges[0].is_covered_set());
    }

    #[test]
    fn rightmost() {
        let (_, des, star) = cross(area_label());
        // east (northern) and south (southern): the non horizontal one wins
        assert_eq!(star.rightmost_edge(&des), Some(6));
        assert_eq!(EdgeEndStar::new().rightmost_edge(&des), None);
    }
}
