use super::{Label, Quadrant};
use crate::{
    core::{
        math::{orientation_index, Coord, Orientation},
        traits::Real,
    },
    geometry::BoundaryNodeRule,
};
use std::cmp::Ordering;

/// Directed end of an edge leaving a node: origin, a point giving the direction, and a label.
///
/// Edge ends at the same origin are totally ordered by direction, counter clockwise from the
/// positive x axis, using the quadrant and then the robust orientation predicate.
#[derive(Debug, Clone)]
pub struct EdgeEnd<T = f64> {
    /// Index of the parent edge in the edge list owning this end.
    pub edge: usize,
    pub label: Label,
    p0: Coord<T>,
    p1: Coord<T>,
    dx: T,
    dy: T,
    quadrant: Quadrant,
}

impl<T> EdgeEnd<T>
where
    T: Real,
{
    /// Edge end from `p0` in the direction of `p1`.
    ///
    /// # Panics
    ///
    /// Panics if `p0 == p1`.
    pub fn new(edge: usize, p0: Coord<T>, p1: Coord<T>, label: Label) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        Self {
            edge,
            label,
            p0,
            p1,
            dx,
            dy,
            quadrant: Quadrant::of(dx, dy),
        }
    }

    /// Origin.
    #[inline]
    pub fn coordinate(&self) -> Coord<T> {
        self.p0
    }

    #[inline]
    pub fn directed_coordinate(&self) -> Coord<T> {
        self.p1
    }

    #[inline]
    pub fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    #[inline]
    pub fn dx(&self) -> T {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> T {
        self.dy
    }

    /// Angular ordering of this end relative to `other` (which must share the origin).
    ///
    /// Never compares raw angles: ends in different quadrants are ordered by quadrant, ends in
    /// the same quadrant by the orientation of this direction point relative to `other`.
    pub fn compare_direction(&self, other: &EdgeEnd<T>) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }

        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match orientation_index(other.p0, other.p1, self.p1) {
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Clockwise => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        }
    }
}

/// Item stored in an edge end star.
///
/// Lets the star algorithms work over plain [EdgeEnd]s, [super::DirectedEdge]s and edge end
/// bundles alike.
pub trait EdgeEndItem<T>
where
    T: Real,
{
    fn edge_end(&self) -> &EdgeEnd<T>;
    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T>;

    #[inline]
    fn label(&self) -> &Label {
        &self.edge_end().label
    }

    #[inline]
    fn label_mut(&mut self) -> &mut Label {
        &mut self.edge_end_mut().label
    }

    #[inline]
    fn coordinate(&self) -> Coord<T> {
        self.edge_end().coordinate()
    }

    /// Compute the label from member ends (only bundles aggregate several ends).
    #[inline]
    fn compute_label(&mut self, _rule: BoundaryNodeRule) {}
}

impl<T> EdgeEndItem<T> for EdgeEnd<T>
where
    T: Real,
{
    #[inline]
    fn edge_end(&self) -> &EdgeEnd<T> {
        self
    }

    #[inline]
    fn edge_end_mut(&mut self) -> &mut EdgeEnd<T> {
        self
    }
}
