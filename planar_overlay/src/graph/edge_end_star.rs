use super::{EdgeEnd, EdgeEndItem, Label};
use crate::{
    core::{math::Coord, traits::Real},
    error::{err_coord, TopologyError},
    geometry::{locate_point_in_area, BoundaryNodeRule, Geometry, Location, Position},
};
use std::cmp::Ordering;

/// Edge ends incident on a node, kept sorted counter clockwise by direction.
///
/// The star stores ids into an arena owned elsewhere (edge ends, directed edges or edge end
/// bundles), every operation takes that arena as a slice. Ids inserted into a star must not
/// change direction while the star is in use.
#[derive(Debug, Clone, Default)]
pub struct EdgeEndStar {
    pub(crate) ends: Vec<usize>,
    pt_in_area_location: [Option<Location>; 2],
    pub(crate) label: Label,
    pub(crate) result_area_edges: Option<Vec<usize>>,
}

impl EdgeEndStar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert edge end `id`, replacing any end with the same direction.
    pub fn insert<T, E>(&mut self, id: usize, items: &[E])
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        let end = items[id].edge_end();
        match self
            .ends
            .binary_search_by(|&other| items[other].edge_end().compare_direction(end))
        {
            Ok(i) => self.ends[i] = id,
            Err(i) => self.ends.insert(i, id),
        }
        self.result_area_edges = None;
    }

    /// Id of the stored end with the same direction as `end`.
    pub fn find_same_direction<T, E>(&self, end: &EdgeEnd<T>, items: &[E]) -> Option<usize>
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        self.ends
            .binary_search_by(|&other| items[other].edge_end().compare_direction(end))
            .ok()
            .map(|i| self.ends[i])
    }

    /// Ids in counter clockwise order.
    #[inline]
    pub fn ids(&self) -> &[usize] {
        &self.ends
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.ends.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Position of `id` in the sorted order.
    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.ends.iter().position(|&e| e == id)
    }

    /// Origin shared by every end, `None` for an empty star.
    pub fn coordinate<T, E>(&self, items: &[E]) -> Option<Coord<T>>
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        self.ends.first().map(|&id| items[id].coordinate())
    }

    /// Every consecutive pair of stored ends is strictly increasing in direction.
    pub fn is_edges_sorted<T, E>(&self, items: &[E]) -> bool
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        self.ends.windows(2).all(|w| {
            items[w[0]]
                .edge_end()
                .compare_direction(items[w[1]].edge_end())
                == Ordering::Less
        })
    }

    /// Let every end compute its own label (a no-op except for bundles).
    pub fn compute_edge_end_labels<T, E>(&self, items: &mut [E], rule: BoundaryNodeRule)
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        for &id in self.ends.iter() {
            items[id].compute_label(rule);
        }
    }

    /// Complete the labels of the ends around the node.
    ///
    /// Side locations are propagated around the star for each geometry, then any location
    /// still unknown is found by locating the node in the areal parts of `geoms`. Nodes with a
    /// dimensionally collapsed edge (a line edge on the boundary of an area) are taken to be in
    /// the exterior.
    pub fn compute_labelling<T, E>(
        &mut self,
        items: &mut [E],
        geoms: [&Geometry<T>; 2],
        rule: BoundaryNodeRule,
    ) -> Result<(), TopologyError>
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        self.compute_edge_end_labels(items, rule);
        self.propagate_side_labels(items, 0)?;
        self.propagate_side_labels(items, 1)?;

        let mut has_dimensional_collapse_edge = [false; 2];
        for &id in self.ends.iter() {
            let label = items[id].label();
            for (geom_index, has_collapse) in has_dimensional_collapse_edge.iter_mut().enumerate()
            {
                if label.is_line(geom_index) && label.on(geom_index) == Some(Location::Boundary) {
                    *has_collapse = true;
                }
            }
        }

        for i in 0..self.ends.len() {
            let id = self.ends[i];
            for geom_index in 0..2 {
                if !items[id].label().is_any_null(geom_index) {
                    continue;
                }
                let loc = if has_dimensional_collapse_edge[geom_index] {
                    Location::Exterior
                } else {
                    let p = items[id].coordinate();
                    self.location(geom_index, p, geoms)
                };
                items[id]
                    .label_mut()
                    .set_all_locations_if_null(geom_index, Some(loc));
            }
        }

        Ok(())
    }

    /// Location of the node in the area of `geoms[geom_index]`, computed once per star.
    fn location<T>(&mut self, geom_index: usize, p: Coord<T>, geoms: [&Geometry<T>; 2]) -> Location
    where
        T: Real,
    {
        *self.pt_in_area_location[geom_index]
            .get_or_insert_with(|| locate_point_in_area(p, geoms[geom_index]))
    }

    /// Walk the star counter clockwise carrying the current side location of `geom_index`,
    /// filling unknown side and on locations and checking known ones.
    pub fn propagate_side_labels<T, E>(
        &self,
        items: &mut [E],
        geom_index: usize,
    ) -> Result<(), TopologyError>
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        let mut start_loc = None;
        for &id in self.ends.iter() {
            let label = items[id].label();
            if label.is_area_for(geom_index) {
                if let Some(left) = label.location(geom_index, Position::Left) {
                    start_loc = Some(left);
                }
            }
        }

        // no labelled sides found
        let Some(mut curr_loc) = start_loc else {
            return Ok(());
        };

        for &id in self.ends.iter() {
            let coord = items[id].coordinate();
            let label = items[id].label_mut();
            if label.on(geom_index).is_none() {
                label.set_on(geom_index, Some(curr_loc));
            }

            if !label.is_area_for(geom_index) {
                continue;
            }

            let left = label.location(geom_index, Position::Left);
            match label.location(geom_index, Position::Right) {
                Some(right) => {
                    if right != curr_loc {
                        return Err(TopologyError::SideLocationConflict {
                            coord: err_coord(coord),
                        });
                    }
                    let Some(left) = left else {
                        panic!("found single null side at {:?}", coord);
                    };
                    curr_loc = left;
                }
                None => {
                    debug_assert!(left.is_none(), "found single null side at {:?}", coord);
                    label.set_location(geom_index, Position::Right, Some(curr_loc));
                    label.set_location(geom_index, Position::Left, Some(curr_loc));
                }
            }
        }

        Ok(())
    }

    /// Compute the end labels then check the area sides of geometry 0 agree around the node.
    pub fn is_area_labels_consistent<T, E>(&self, items: &mut [E], rule: BoundaryNodeRule) -> bool
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        self.compute_edge_end_labels(items, rule);
        self.check_area_labels_consistent(items, 0)
    }

    /// Each end's right side must equal the left side of the end before it, and no end may
    /// have the same location on both sides.
    pub fn check_area_labels_consistent<T, E>(&self, items: &[E], geom_index: usize) -> bool
    where
        T: Real,
        E: EdgeEndItem<T>,
    {
        let Some(&last) = self.ends.last() else {
            return true;
        };

        let start_loc = items[last].label().location(geom_index, Position::Left);
        assert!(start_loc.is_some(), "found unlabelled area edge");

        let mut curr_loc = start_loc;
        for &id in self.ends.iter() {
            let label = items[id].label();
            debug_assert!(label.is_area_for(geom_index), "found non-area edge");
            let left = label.location(geom_index, Position::Left);
            let right = label.location(geom_index, Position::Right);
            if left == right || right != curr_loc {
                return false;
            }
            curr_loc = left;
        }

        true
    }
}
