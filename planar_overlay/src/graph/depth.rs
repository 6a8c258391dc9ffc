use super::Label;
use crate::geometry::{Location, Position};

const NULL_DEPTH: i32 = -1;

/// Nesting depth of the sides of an edge relative to both input geometries.
///
/// Used to decide the side locations of edges created by merging coincident area edges. Depth
/// 0 is exterior and anything greater is interior.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Depth {
    depth: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Self::new()
    }
}

impl Depth {
    pub fn new() -> Self {
        Self {
            depth: [[NULL_DEPTH; 3]; 2],
        }
    }

    /// Depth contributed by a side location.
    pub fn depth_at_location(loc: Option<Location>) -> i32 {
        match loc {
            Some(Location::Exterior) => 0,
            Some(Location::Interior) => 1,
            _ => NULL_DEPTH,
        }
    }

    #[inline]
    pub fn get(&self, geom_index: usize, pos: Position) -> i32 {
        self.depth[geom_index][pos.index()]
    }

    #[inline]
    pub fn set(&mut self, geom_index: usize, pos: Position, depth: i32) {
        self.depth[geom_index][pos.index()] = depth;
    }

    /// Location implied by the depth of a side.
    pub fn location(&self, geom_index: usize, pos: Position) -> Location {
        if self.depth[geom_index][pos.index()] <= 0 {
            Location::Exterior
        } else {
            Location::Interior
        }
    }

    /// Increment the depth of a side if `loc` is interior.
    pub fn add_location(&mut self, geom_index: usize, pos: Position, loc: Location) {
        if loc == Location::Interior {
            self.depth[geom_index][pos.index()] += 1;
        }
    }

    pub fn is_null(&self) -> bool {
        self.depth
            .iter()
            .all(|geom| geom.iter().all(|d| *d == NULL_DEPTH))
    }

    pub fn is_null_for(&self, geom_index: usize) -> bool {
        self.depth[geom_index][Position::Left.index()] == NULL_DEPTH
    }

    pub fn is_null_at(&self, geom_index: usize, pos: Position) -> bool {
        self.depth[geom_index][pos.index()] == NULL_DEPTH
    }

    /// Accumulate the side locations of `label`.
    pub fn add_label(&mut self, label: &Label) {
        for i in 0..2 {
            for pos in [Position::Left, Position::Right] {
                let loc = label.location(i, pos);
                if matches!(loc, Some(Location::Exterior) | Some(Location::Interior)) {
                    let d = &mut self.depth[i][pos.index()];
                    if *d == NULL_DEPTH {
                        *d = Self::depth_at_location(loc);
                    } else {
                        *d += Self::depth_at_location(loc);
                    }
                }
            }
        }
    }

    /// Right depth minus left depth.
    #[inline]
    pub fn delta(&self, geom_index: usize) -> i32 {
        self.depth[geom_index][Position::Right.index()]
            - self.depth[geom_index][Position::Left.index()]
    }

    /// Reduce depths to 0 or 1 relative to the shallower side, so that the side locations can be
    /// read back with [Depth::location].
    pub fn normalize(&mut self) {
        for i in 0..2 {
            if self.is_null_for(i) {
                continue;
            }

            let left = self.depth[i][Position::Left.index()];
            let right = self.depth[i][Position::Right.index()];
            let min_depth = left.min(right).max(0);

            for pos in [Position::Left, Position::Right] {
                let d = &mut self.depth[i][pos.index()];
                *d = if *d > min_depth { 1 } else { 0 };
            }
        }
    }
}
