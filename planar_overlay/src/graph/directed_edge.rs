use super::{Edge, EdgeEnd, EdgeEndItem};
use crate::{
    core::traits::Real,
    geometry::{Location, Position},
};

/// One of the two directed halves of an edge in a planar graph.
///
/// Directed edges live in the graph's directed edge arena and reference each other by index:
/// `sym` is the opposite half, `next`/`next_min` link result rings, `edge_ring`/`min_edge_ring`
/// are the indexes of the rings this edge has been assigned to.
#[derive(Debug, Clone)]
pub struct DirectedEdge<T = f64> {
    pub end: EdgeEnd<T>,
    is_forward: bool,
    in_result: bool,
    visited: bool,
    pub sym: usize,
    pub next: Option<usize>,
    pub next_min: Option<usize>,
    pub edge_ring: Option<usize>,
    pub min_edge_ring: Option<usize>,
    depth: [i32; 3],
}

impl<T> DirectedEdge<T>
where
    T: Real,
{
    /// Directed edge for `edge` (stored at `edge_index`), `sym` must be set by the caller.
    pub fn new(edge_index: usize, edge: &Edge<T>, is_forward: bool) -> Self {
        let (p0, p1) = if is_forward {
            (edge.coord(0), edge.coord(1))
        } else {
            let n = edge.num_points() - 1;
            (edge.coord(n), edge.coord(n - 1))
        };

        let mut label = edge.label;
        if !is_forward {
            label.flip();
        }

        Self {
            end: EdgeEnd::new(edge_index, p0, p1, label),
            is_forward,
            in_result: false,
            visited: false,
            sym: usize::MAX,
            next: None,
            next_min: None,
            edge_ring: None,
            min_edge_ring: None,
            depth: [0, -999, -999],
        }
    }

    /// Depth contribution when crossing from `curr` to `next` location.
    pub fn depth_factor(curr: Location, next: Location) -> i32 {
        match (curr, next) {
            (Location::Exterior, Location::Interior) => 1,
            (Location::Interior, Location::Exterior) => -1,
            _ => 0,
        }
    }

    #[inline]
    pub fn edge(&self) -> usize {
        self.end.edge
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.is_forward
    }

    #[inline]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    #[inline]
    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    #[inline]
    pub fn depth(&self, pos: Position) -> i32 {
        self.depth[pos.index()]
    }

    #[inline]
    pub fn set_depth(&mut self, pos: Position, depth: i32) {
        self.depth[pos.index()] = depth;
    }

    /// Depth delta of the parent edge seen from this direction.
    pub fn depth_delta(&self, edge: &Edge<T>) -> i32 {
        if self.is_forward {
            edge.depth_delta()
        } else {
            -edge.depth_delta()
        }
    }

    /// Set the depth on `pos` and derive the opposite side from the parent edge depth delta.
    pub fn set_edge_depths(&mut self, edge: &Edge<T>, pos: Position, depth: i32) {
        let direction_factor = if pos == Position::Left { -1 } else { 1 };
        let delta = self.depth_delta(edge) * direction_factor;
        self.set_depth(pos, depth);
        self.set_depth(pos.opposite(), depth + delta);
    }

    /// Line edge relative to both geometries (an area side must be exterior on both sides).
    pub fn is_line_edge(&self) -> bool {
        let label = &self.end.label;
        let is_line = label.is_line(0) || label.is_line(1);
        let is_exterior_if_area0 =
            !label.is_area_for(0) || label.all_positions_equal(0, Location::Exterior);
        let is_exterior_if_area1 =
            !label.is_area_for(1) || label.all_positions_equal(1, Location::Exterior);
        is_line && is_exterior_if_area0 && is_exterior_if_area1
    }

    /// Edge with interior on both sides for both geometries (it cannot bound the result area).
    pub fn is_interior_area_edge(&self) -> bool {
        let label = &self.end.label;
        (0..2).all(|i| {
            label.is_area_for(i)
                && label.location(i, Position::Left) == Some(Location::Interior)
                && label.location(i, Position::Right) == Some(Location::Interior)
        })
    }
}

impl<T> EdgeEndItem<T> for DirectedEdge<T>
where
    T: Real,
{
    #[inline]
    fn edge_end(&self) -> &EdgeEnd<T> {
        &self.end
    }

    #[inline]
    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T> {
        &mut self.end
    }
}
