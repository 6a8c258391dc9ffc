use crate::{
    core::{math::Coord, traits::Real},
    error::{err_coord, TopologyError},
    geometry::{Geometry, LineString, Location, Position},
    graph::{EdgeRing, GeometryGraph, PlanarGraph, RingKind},
};

/// Checks that the interior of a polygonal geometry is connected.
///
/// Holes may touch each other and the shell at single points, but a chain of touching holes
/// joining two points of a shell splits the interior in two. The rings around the interior are
/// rebuilt from the noded edges, then walked from every shell: an interior ring left
/// unvisited is a separate piece of the interior.
#[derive(Debug)]
pub struct ConnectedInteriorTester<'g, 'a, T = f64> {
    geom_graph: &'g mut GeometryGraph<'a, T>,
    disconnected_coord: Option<Coord<T>>,
}

impl<'g, 'a, T> ConnectedInteriorTester<'g, 'a, T>
where
    T: Real,
{
    pub fn new(geom_graph: &'g mut GeometryGraph<'a, T>) -> Self {
        Self {
            geom_graph,
            disconnected_coord: None,
        }
    }

    /// Point on the disconnected part found by [Self::is_interiors_connected].
    pub fn coordinate(&self) -> Option<Coord<T>> {
        self.disconnected_coord
    }

    /// The geometry graph must be self noded (holes touching the shell split its edge).
    pub fn is_interiors_connected(&mut self) -> Result<bool, TopologyError> {
        let mut split_edges = Vec::new();
        self.geom_graph.compute_split_edges(&mut split_edges);

        let mut graph = PlanarGraph::new();
        graph.add_edges(split_edges);
        for de in graph.directed_edges.iter_mut() {
            if de.end.label.location(0, Position::Right) == Some(Location::Interior) {
                de.set_in_result(true);
            }
        }
        graph.link_result_directed_edges()?;

        let rings = build_edge_rings(&mut graph)?;
        visit_shell_interiors(self.geom_graph.geometry(), &mut graph)?;

        if let Some(coord) = unvisited_shell_edge(&graph, &rings) {
            log::trace!("interior disconnected at {:?}", coord);
            self.disconnected_coord = Some(coord);
            return Ok(false);
        }
        Ok(true)
    }
}

/// Minimal rings of every maximal ring formed by the in result directed edges.
fn build_edge_rings<T>(graph: &mut PlanarGraph<T>) -> Result<Vec<EdgeRing<T>>, TopologyError>
where
    T: Real,
{
    let mut max_count = 0;
    let mut rings = Vec::new();
    for de in 0..graph.directed_edges.len() {
        let d = &graph.directed_edges[de];
        if !d.is_in_result() || d.edge_ring.is_some() {
            continue;
        }

        let max_ring = EdgeRing::build(
            RingKind::Maximal,
            max_count,
            de,
            &mut graph.directed_edges,
            &graph.edges,
        )?;
        max_count += 1;
        max_ring.link_directed_edges_for_minimal_edge_rings(&mut graph.directed_edges, &mut graph.nodes);
        let min_rings =
            max_ring.build_minimal_rings(&mut graph.directed_edges, &graph.edges, rings.len())?;
        rings.extend(min_rings);
    }
    Ok(rings)
}

fn visit_shell_interiors<T>(geom: &Geometry<T>, graph: &mut PlanarGraph<T>) -> Result<(), TopologyError>
where
    T: Real,
{
    match geom {
        Geometry::Polygon(poly) => visit_interior_ring(&poly.exterior, graph),
        Geometry::MultiPolygon(polys) => {
            for poly in polys.iter() {
                visit_interior_ring(&poly.exterior, graph)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Mark every directed edge linked to the one along `ring` with the interior on its right.
fn visit_interior_ring<T>(ring: &LineString<T>, graph: &mut PlanarGraph<T>) -> Result<(), TopologyError>
where
    T: Real,
{
    let pts = ring.coords();
    let Some(&pt0) = pts.first() else {
        return Ok(());
    };
    let Some(&pt1) = pts.iter().find(|p| !p.equals_2d(&pt0)) else {
        return Ok(());
    };

    let de = graph
        .find_edge_in_same_direction(pt0, pt1)
        .and_then(|e| graph.find_edge_end(e))
        .ok_or(TopologyError::NullDirectedEdge {
            coord: err_coord(pt0),
        })?;

    let is_interior_right = |d: usize| {
        graph.directed_edges[d].end.label.location(0, Position::Right) == Some(Location::Interior)
    };
    let int_de = if is_interior_right(de) {
        de
    } else {
        let sym = graph.directed_edges[de].sym;
        if !is_interior_right(sym) {
            return Err(TopologyError::NullDirectedEdge {
                coord: err_coord(pt0),
            });
        }
        sym
    };

    visit_linked_directed_edges(int_de, graph)
}

fn visit_linked_directed_edges<T>(start: usize, graph: &mut PlanarGraph<T>) -> Result<(), TopologyError>
where
    T: Real,
{
    let mut de = start;
    loop {
        let d = &mut graph.directed_edges[de];
        d.set_visited(true);
        de = d.next.ok_or(TopologyError::NullDirectedEdge {
            coord: err_coord(d.end.coordinate()),
        })?;
        if de == start {
            return Ok(());
        }
    }
}

/// Origin of an unvisited edge of a ring (not a hole) with the interior on its right.
fn unvisited_shell_edge<T>(graph: &PlanarGraph<T>, rings: &[EdgeRing<T>]) -> Option<Coord<T>>
where
    T: Real,
{
    for ring in rings.iter().filter(|r| !r.is_hole()) {
        let edges = ring.edges();
        let Some(&first) = edges.first() else {
            continue;
        };
        if graph.directed_edges[first].end.label.location(0, Position::Right)
            != Some(Location::Interior)
        {
            continue;
        }

        if let Some(&de) = edges
            .iter()
            .find(|&&de| !graph.directed_edges[de].is_visited())
        {
            return Some(graph.directed_edges[de].end.coordinate());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::coord, geometry::BoundaryNodeRule};

    fn interiors_connected(geom: &Geometry<f64>) -> (bool, Option<Coord<f64>>) {
        let mut gg = GeometryGraph::new(0, geom, BoundaryNodeRule::Mod2);
        gg.compute_self_nodes(true, false);
        let mut tester = ConnectedInteriorTester::new(&mut gg);
        let connected = tester.is_interiors_connected().unwrap();
        (connected, tester.coordinate())
    }

    #[test]
    fn hole_touching_shell_once() {
        let geom = Geometry::Polygon(polygon![
            exterior: [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            interiors: [[(5.0, 0.0), (8.0, 5.0), (2.0, 5.0), (5.0, 0.0)]],
        ]);
        assert_eq!(interiors_connected(&geom), (true, None));
    }

    #[test]
    fn holes_chain_across_polygon() {
        let geom = Geometry::Polygon(polygon![
            exterior: [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            interiors: [
                [(5.0, 0.0), (7.0, 5.0), (3.0, 5.0), (5.0, 0.0)],
                [(5.0, 5.0), (7.0, 8.0), (5.0, 10.0), (3.0, 8.0), (5.0, 5.0)],
            ],
        ]);
        let (connected, coord) = interiors_connected(&geom);
        assert!(!connected);
        assert!(coord.is_some());
    }

    #[test]
    fn figure_eight_shell() {
        let geom = Geometry::Polygon(polygon![
            (0.0, 0.0),
            (2.0, 2.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 2.0),
            (0.0, 4.0),
            (0.0, 0.0)
        ]);
        assert_eq!(interiors_connected(&geom), (false, Some(coord(2.0, 2.0))));
    }
}
