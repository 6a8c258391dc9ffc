use crate::{
    core::{
        math::{is_in_ring, Coord, EnvelopeExt},
        traits::Real,
    },
    error::{err_coord, TopologyError},
    geometry::Polygon,
    graph::{EdgeRing, PlanarGraph, RingKind},
};
use static_aabb2d_index::AABB;

/// Builds the polygons of an overlay result from the result area directed edges of a planar
/// graph.
#[derive(Debug, Clone)]
pub struct PolygonBuilder<T = f64> {
    rings: Vec<EdgeRing<T>>,
    shells: Vec<usize>,
}

impl<T> Default for PolygonBuilder<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PolygonBuilder<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            rings: Vec::new(),
            shells: Vec::new(),
        }
    }

    /// Build the rings formed by the in result directed edges of `graph`, assigning each hole
    /// to a shell.
    ///
    /// Marks the edges used as in result. Fails if the result edges do not link up into rings
    /// or a hole has no containing shell.
    pub fn add(&mut self, graph: &mut PlanarGraph<T>) -> Result<(), TopologyError> {
        graph.link_result_directed_edges()?;
        let max_rings = self.build_maximal_edge_rings(graph)?;
        let mut free_holes = Vec::new();
        let edge_rings = self.build_minimal_edge_rings(&max_rings, &mut free_holes, graph)?;
        self.sort_shells_and_holes(&edge_rings, &mut free_holes);
        self.place_free_holes(&free_holes)?;
        log::trace!(
            "built {} rings from {} maximal rings, {} shells",
            self.rings.len(),
            max_rings.len(),
            self.shells.len()
        );
        Ok(())
    }

    /// One polygon per shell with its holes.
    pub fn polygons(&self) -> Vec<Polygon<T>> {
        self.shells
            .iter()
            .map(|&s| self.rings[s].to_polygon(&self.rings))
            .collect()
    }

    /// `p` is inside one of the built polygons.
    pub fn contains_point(&self, p: Coord<T>) -> bool {
        self.shells
            .iter()
            .any(|&s| self.rings[s].contains_point(p, &self.rings))
    }

    fn build_maximal_edge_rings(
        &mut self,
        graph: &mut PlanarGraph<T>,
    ) -> Result<Vec<usize>, TopologyError> {
        let mut max_rings = Vec::new();
        for de in 0..graph.directed_edges.len() {
            let d = &graph.directed_edges[de];
            if !d.is_in_result() || !d.end.label.is_area() || d.edge_ring.is_some() {
                continue;
            }

            let index = self.rings.len();
            let ring = EdgeRing::build(
                RingKind::Maximal,
                index,
                de,
                &mut graph.directed_edges,
                &graph.edges,
            )?;
            ring.set_in_result(&graph.directed_edges, &mut graph.edges);
            self.rings.push(ring);
            max_rings.push(index);
        }
        Ok(max_rings)
    }

    /// Split maximal rings passing through a node more than once into minimal rings, returns
    /// the rings left as is.
    fn build_minimal_edge_rings(
        &mut self,
        max_rings: &[usize],
        free_holes: &mut Vec<usize>,
        graph: &mut PlanarGraph<T>,
    ) -> Result<Vec<usize>, TopologyError> {
        let mut edge_rings = Vec::new();
        for &er in max_rings.iter() {
            if self.rings[er].max_node_degree(&graph.directed_edges, &graph.nodes) <= 2 {
                edge_rings.push(er);
                continue;
            }

            self.rings[er]
                .link_directed_edges_for_minimal_edge_rings(&mut graph.directed_edges, &mut graph.nodes);
            let first = self.rings.len();
            let min_rings =
                self.rings[er].build_minimal_rings(&mut graph.directed_edges, &graph.edges, first)?;
            self.rings.extend(min_rings);
            let min_rings: Vec<usize> = (first..self.rings.len()).collect();

            match self.find_shell(&min_rings) {
                Some(shell) => {
                    for &r in min_rings.iter() {
                        if self.rings[r].is_hole() {
                            EdgeRing::set_shell(&mut self.rings, r, shell);
                        }
                    }
                    self.shells.push(shell);
                }
                None => free_holes.extend(min_rings),
            }
        }
        Ok(edge_rings)
    }

    /// The single shell among the minimal rings of one maximal ring, if any.
    fn find_shell(&self, min_rings: &[usize]) -> Option<usize> {
        let mut shells = min_rings.iter().copied().filter(|&r| !self.rings[r].is_hole());
        let shell = shells.next();
        assert!(
            shells.next().is_none(),
            "found two shells in minimal edge ring list"
        );
        shell
    }

    fn sort_shells_and_holes(&mut self, edge_rings: &[usize], free_holes: &mut Vec<usize>) {
        for &er in edge_rings.iter() {
            if self.rings[er].is_hole() {
                free_holes.push(er);
            } else {
                self.shells.push(er);
            }
        }
    }

    fn place_free_holes(&mut self, free_holes: &[usize]) -> Result<(), TopologyError> {
        for &hole in free_holes.iter() {
            if self.rings[hole].shell.is_some() {
                continue;
            }
            let shell = self.find_edge_ring_containing(hole).ok_or_else(|| {
                TopologyError::UnassignedHole {
                    coord: err_coord(self.rings[hole].coordinate(0)),
                }
            })?;
            EdgeRing::set_shell(&mut self.rings, hole, shell);
        }
        Ok(())
    }

    /// Smallest shell containing ring `test`.
    ///
    /// Shells whose envelope does not contain the ring's envelope (or equals it) are skipped,
    /// containment is decided with a ring point which is not a vertex of the shell.
    fn find_edge_ring_containing(&self, test: usize) -> Option<usize> {
        let test_ring = &self.rings[test];
        let test_env = test_ring.envelope();

        let mut min_shell: Option<(usize, &AABB<T>)> = None;
        for &s in self.shells.iter() {
            let try_shell = &self.rings[s];
            let try_env = try_shell.envelope();
            if envelopes_equal(try_env, test_env) || !try_env.covers(test_env) {
                continue;
            }

            let Some(test_pt) = point_not_in_list(test_ring.coords(), try_shell.coords()) else {
                continue;
            };
            if !is_in_ring(test_pt, try_shell.coords()) {
                continue;
            }

            match min_shell {
                Some((_, min_env)) if !min_env.covers(try_env) => {}
                _ => min_shell = Some((s, try_env)),
            }
        }

        min_shell.map(|(s, _)| s)
    }
}

fn envelopes_equal<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    a.min_x == b.min_x && a.min_y == b.min_y && a.max_x == b.max_x && a.max_y == b.max_y
}

/// First point of `pts` which is not in `list`.
fn point_not_in_list<T>(pts: &[Coord<T>], list: &[Coord<T>]) -> Option<Coord<T>>
where
    T: Real,
{
    pts.iter()
        .copied()
        .find(|p| !list.iter().any(|q| q.equals_2d(p)))
}
