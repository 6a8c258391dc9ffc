use super::{BoundaryNodeRule, Geometry, LineString, Location, Polygon};
use crate::core::{
    math::{is_on_line, locate_in_ring, Coord, EnvelopeExt},
    traits::Real,
};

/// Locate `p` relative to the areal parts of `geom`.
///
/// Points and lines are ignored (they have no interior in this sense), so a point on a line is
/// [Location::Exterior]. Returns the first non exterior location found over all polygons.
pub fn locate_point_in_area<T>(p: Coord<T>, geom: &Geometry<T>) -> Location
where
    T: Real,
{
    if geom.is_empty() || !geom.envelope().intersects_coord(p) {
        return Location::Exterior;
    }

    match geom {
        Geometry::Polygon(poly) => locate_point_in_polygon(p, poly),
        Geometry::MultiPolygon(polys) => polys
            .iter()
            .map(|poly| locate_point_in_polygon(p, poly))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::GeometryCollection(geoms) => geoms
            .iter()
            .map(|g| locate_point_in_area(p, g))
            .find(|loc| *loc != Location::Exterior)
            .unwrap_or(Location::Exterior),
        Geometry::Point(_)
        | Geometry::LineString(_)
        | Geometry::LinearRing(_)
        | Geometry::MultiPoint(_)
        | Geometry::MultiLineString(_) => Location::Exterior,
    }
}

/// Locate `p` relative to a single polygon (holes included).
pub fn locate_point_in_polygon<T>(p: Coord<T>, poly: &Polygon<T>) -> Location
where
    T: Real,
{
    if poly.is_empty() {
        return Location::Exterior;
    }

    let shell_loc = locate_in_ring(p, poly.exterior.coords());
    if shell_loc != Location::Interior {
        return shell_loc;
    }

    for hole in poly.interiors.iter() {
        match locate_in_ring(p, hole.coords()) {
            Location::Boundary => return Location::Boundary,
            Location::Interior => return Location::Exterior,
            Location::Exterior => {}
        }
    }

    Location::Interior
}

/// General point locator over every geometry kind.
///
/// Boundaries of linear parts are decided with the configured [BoundaryNodeRule] by counting
/// how many parts place the point on their boundary.
#[derive(Debug, Copy, Clone, Default)]
pub struct PointLocator {
    pub boundary_rule: BoundaryNodeRule,
}

impl PointLocator {
    pub fn new(boundary_rule: BoundaryNodeRule) -> Self {
        Self { boundary_rule }
    }

    /// Location of `p` relative to `geom`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use planar_overlay::core::math::coord;
    /// # use planar_overlay::geometry::*;
    /// let line = Geometry::LineString(LineString(vec![coord(0.0, 0.0), coord(2.0, 0.0)]));
    /// let locator = PointLocator::default();
    /// assert_eq!(locator.locate(coord(0.0, 0.0), &line), Location::Boundary);
    /// assert_eq!(locator.locate(coord(1.0, 0.0), &line), Location::Interior);
    /// assert_eq!(locator.locate(coord(1.0, 1.0), &line), Location::Exterior);
    /// ```
    pub fn locate<T>(&self, p: Coord<T>, geom: &Geometry<T>) -> Location
    where
        T: Real,
    {
        if geom.is_empty() {
            return Location::Exterior;
        }

        match geom {
            Geometry::LineString(ls) | Geometry::LinearRing(ls) => locate_on_line_string(p, ls),
            Geometry::Polygon(poly) => locate_point_in_polygon(p, poly),
            _ => {
                let mut state = LocationState::default();
                state.accumulate(p, geom);
                state.location(self.boundary_rule)
            }
        }
    }

    /// Convenience for `locate(p, geom) != Location::Exterior`.
    pub fn intersects<T>(&self, p: Coord<T>, geom: &Geometry<T>) -> bool
    where
        T: Real,
    {
        self.locate(p, geom) != Location::Exterior
    }
}

#[derive(Debug, Default)]
struct LocationState {
    is_in: bool,
    boundary_count: usize,
}

impl LocationState {
    fn update(&mut self, loc: Location) {
        match loc {
            Location::Interior => self.is_in = true,
            Location::Boundary => self.boundary_count += 1,
            Location::Exterior => {}
        }
    }

    fn accumulate<T>(&mut self, p: Coord<T>, geom: &Geometry<T>)
    where
        T: Real,
    {
        match geom {
            Geometry::Point(c) => {
                if c.equals_2d(&p) {
                    self.is_in = true;
                }
            }
            Geometry::MultiPoint(pts) => {
                if pts.iter().any(|c| c.equals_2d(&p)) {
                    self.is_in = true;
                }
            }
            Geometry::LineString(ls) | Geometry::LinearRing(ls) => {
                self.update(locate_on_line_string(p, ls))
            }
            Geometry::MultiLineString(lines) => {
                for ls in lines {
                    self.update(locate_on_line_string(p, ls));
                }
            }
            Geometry::Polygon(poly) => self.update(locate_point_in_polygon(p, poly)),
            Geometry::MultiPolygon(polys) => {
                for poly in polys {
                    self.update(locate_point_in_polygon(p, poly));
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms {
                    self.accumulate(p, g);
                }
            }
        }
    }

    fn location(&self, rule: BoundaryNodeRule) -> Location {
        if rule.is_in_boundary(self.boundary_count) {
            return Location::Boundary;
        }
        if self.boundary_count > 0 || self.is_in {
            return Location::Interior;
        }
        Location::Exterior
    }
}

fn locate_on_line_string<T>(p: Coord<T>, ls: &LineString<T>) -> Location
where
    T: Real,
{
    if ls.is_empty() || !ls.envelope().intersects_coord(p) {
        return Location::Exterior;
    }

    let coords = ls.coords();
    if !ls.is_closed() && (p.equals_2d(&coords[0]) || p.equals_2d(&coords[coords.len() - 1])) {
        return Location::Boundary;
    }

    if is_on_line(p, coords) {
        return Location::Interior;
    }

    Location::Exterior
}
