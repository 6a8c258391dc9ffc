use crate::geometry::{Location, Position};
use std::fmt;

/// Locations of a graph component relative to one input geometry.
///
/// Line components only carry the [Position::On] location. Area components also carry the
/// locations on the left and right side of the edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TopologyLocation {
    location: [Option<Location>; 3],
    is_area: bool,
}

impl TopologyLocation {
    /// Line location with only the on location set.
    #[inline]
    pub fn new_line(on: Option<Location>) -> Self {
        Self {
            location: [on, None, None],
            is_area: false,
        }
    }

    /// Area location with on, left and right locations.
    #[inline]
    pub fn new_area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            location: [on, left, right],
            is_area: true,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        if self.is_area {
            3
        } else {
            1
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Location> {
        let i = pos.index();
        if i < self.len() {
            self.location[i]
        } else {
            None
        }
    }

    #[inline]
    pub fn on(&self) -> Option<Location> {
        self.location[Position::On.index()]
    }

    #[inline]
    pub fn is_area(&self) -> bool {
        self.is_area
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        !self.is_area
    }

    /// All locations are unknown.
    pub fn is_null(&self) -> bool {
        self.location[..self.len()].iter().all(|l| l.is_none())
    }

    /// Some location is unknown.
    pub fn is_any_null(&self) -> bool {
        self.location[..self.len()].iter().any(|l| l.is_none())
    }

    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.location[pos.index()] == other.location[pos.index()]
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.location[..self.len()].iter().all(|l| *l == Some(loc))
    }

    /// Swap left and right (no op for lines).
    pub fn flip(&mut self) {
        if !self.is_area {
            return;
        }
        self.location.swap(Position::Left.index(), Position::Right.index());
    }

    #[inline]
    pub fn set(&mut self, pos: Position, loc: Option<Location>) {
        self.location[pos.index()] = loc;
    }

    pub fn set_all(&mut self, loc: Option<Location>) {
        let len = self.len();
        for l in self.location[..len].iter_mut() {
            *l = loc;
        }
    }

    pub fn set_all_if_null(&mut self, loc: Option<Location>) {
        let len = self.len();
        for l in self.location[..len].iter_mut() {
            if l.is_none() {
                *l = loc;
            }
        }
    }

    /// Set locations, left and right are ignored for line locations.
    pub fn set_locations(&mut self, on: Option<Location>, left: Option<Location>, right: Option<Location>) {
        self.location[Position::On.index()] = on;
        if self.is_area {
            self.location[Position::Left.index()] = left;
            self.location[Position::Right.index()] = right;
        }
    }

    /// Fill unknown locations from `other`, promoting a line location to an area location if
    /// `other` is an area location.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.is_area && !self.is_area {
            self.is_area = true;
            self.location[Position::Left.index()] = None;
            self.location[Position::Right.index()] = None;
        }

        let other_len = other.len();
        for i in 0..self.len() {
            if self.location[i].is_none() && i < other_len {
                self.location[i] = other.location[i];
            }
        }
    }

    /// Drop the side locations keeping only the on location.
    pub fn to_line(&mut self) {
        self.is_area = false;
        self.location[Position::Left.index()] = None;
        self.location[Position::Right.index()] = None;
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_area {
            write!(
                f,
                "{}{}{}",
                Location::symbol(self.location[1]),
                Location::symbol(self.location[0]),
                Location::symbol(self.location[2])
            )
        } else {
            write!(f, "{}", Location::symbol(self.location[0]))
        }
    }
}

/// Topological relationship of a graph component to the two input geometries (index 0 and 1).
///
/// Labels are plain values: copying a label never aliases, merging is explicit through
/// [Label::merge] or [Label::merged].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// Line label with the same on location for both geometries.
    pub fn new_on(on: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::new_line(on); 2],
        }
    }

    /// Line label with the on location set for `geom_index` only.
    pub fn new_geom_on(geom_index: usize, on: Option<Location>) -> Self {
        let mut label = Self::new_on(None);
        label.elt[geom_index].set(Position::On, on);
        label
    }

    /// Area label with the same locations for both geometries.
    pub fn new_area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self {
            elt: [TopologyLocation::new_area(on, left, right); 2],
        }
    }

    /// Area label with the locations set for `geom_index` only.
    pub fn new_geom_area(
        geom_index: usize,
        on: Option<Location>,
        left: Option<Location>,
        right: Option<Location>,
    ) -> Self {
        let mut label = Self::new_area(None, None, None);
        label.elt[geom_index].set_locations(on, left, right);
        label
    }

    /// Line label keeping the on locations of `label`.
    pub fn to_line_label(label: &Label) -> Self {
        let mut result = Self::new_on(None);
        for i in 0..2 {
            result.set_on(i, label.on(i));
        }
        result
    }

    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    /// Copy with left and right swapped.
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    #[inline]
    pub fn location(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.elt[geom_index].get(pos)
    }

    #[inline]
    pub fn on(&self, geom_index: usize) -> Option<Location> {
        self.elt[geom_index].on()
    }

    #[inline]
    pub fn topology_location(&self, geom_index: usize) -> &TopologyLocation {
        &self.elt[geom_index]
    }

    #[inline]
    pub fn set_location(&mut self, geom_index: usize, pos: Position, loc: Option<Location>) {
        self.elt[geom_index].set(pos, loc);
    }

    #[inline]
    pub fn set_on(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set(Position::On, loc);
    }

    pub fn set_all_locations(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all_if_null(loc);
    }

    /// [Label::set_all_locations_if_null] for both geometries.
    pub fn set_all_locations_if_null_both(&mut self, loc: Option<Location>) {
        self.set_all_locations_if_null(0, loc);
        self.set_all_locations_if_null(1, loc);
    }

    /// Fill unknown locations of this label from `other`.
    pub fn merge(&mut self, other: &Label) {
        for i in 0..2 {
            self.elt[i].merge(&other.elt[i]);
        }
    }

    /// Copy of this label merged with `other`.
    pub fn merged(mut self, other: &Label) -> Self {
        self.merge(other);
        self
    }

    /// Number of geometries this label has a location for.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|e| !e.is_null()).count()
    }

    #[inline]
    pub fn is_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_null()
    }

    #[inline]
    pub fn is_any_null(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_any_null()
    }

    /// Either geometry has area locations.
    #[inline]
    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    #[inline]
    pub fn is_area_for(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_area()
    }

    #[inline]
    pub fn is_line(&self, geom_index: usize) -> bool {
        self.elt[geom_index].is_line()
    }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos)
            && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom_index: usize, loc: Location) -> bool {
        self.elt[geom_index].all_positions_equal(loc)
    }

    /// Convert the locations of `geom_index` to a line location.
    pub fn to_line(&mut self, geom_index: usize) {
        if self.elt[geom_index].is_area() {
            self.elt[geom_index].to_line();
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::*;

    #[test]
    fn flip_swaps_sides() {
        let mut label = Label::new_geom_area(0, Some(Boundary), Some(Exterior), Some(Interior));
        label.flip();
        assert_eq!(label.location(0, Position::Left), Some(Interior));
        assert_eq!(label.location(0, Position::Right), Some(Exterior));
        assert_eq!(label.on(0), Some(Boundary));
        assert_eq!(label.to_string(), "A:ibe B:---");
    }

    #[test]
    fn merge_fills_nulls_and_promotes_to_area() {
        let mut line = Label::new_geom_on(0, Some(Interior));
        let area = Label::new_geom_area(1, Some(Boundary), Some(Interior), Some(Exterior));
        assert_eq!(line.geometry_count(), 1);
        line.merge(&area);
        assert_eq!(line.geometry_count(), 2);
        // an area label promotes every geometry, the new sides of geometry 0 are unknown
        assert!(line.is_area_for(0));
        assert_eq!(line.on(0), Some(Interior));
        assert_eq!(line.location(0, Position::Left), None);
        assert_eq!(line.location(0, Position::Right), None);
        assert!(line.is_area_for(1));
        assert_eq!(line.location(1, Position::Left), Some(Interior));
        // existing locations are never overwritten
        let merged = line.merged(&Label::new_on(Some(Exterior)));
        assert_eq!(merged.on(0), Some(Interior));
    }

    #[test]
    fn null_tests_respect_location_kind() {
        let mut label = Label::new_geom_on(0, Some(Interior));
        assert!(!label.is_any_null(0));
        assert!(label.is_null(1));
        label.set_all_locations_if_null(1, Some(Exterior));
        assert!(!label.is_null(1));
        assert!(label.all_positions_equal(1, Exterior));

        let area = Label::new_geom_area(0, Some(Boundary), None, Some(Interior));
        assert!(area.is_any_null(0));
        assert!(!area.is_null(0));
    }

    #[test]
    fn line_conversions() {
        let mut label = Label::new_area(Some(Boundary), Some(Interior), Some(Exterior));
        let line = Label::to_line_label(&label);
        assert!(line.is_line(0) && line.is_line(1));
        assert_eq!(line.on(1), Some(Boundary));
        assert_eq!(line.location(1, Position::Left), None);

        label.to_line(0);
        assert!(label.is_line(0));
        assert!(label.is_area());
        assert_eq!(label.location(0, Position::Right), None);
    }
}
