use super::Dimension;
use crate::core::{
    math::{signed_area, Coord, EnvelopeExt},
    traits::Real,
};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sequence of coordinates forming a line (or a ring when closed).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString<T = f64>(pub Vec<Coord<T>>);

impl<T> LineString<T>
where
    T: Real,
{
    #[inline]
    pub fn new(coords: Vec<Coord<T>>) -> Self {
        LineString(coords)
    }

    #[inline]
    pub fn coords(&self) -> &[Coord<T>] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First and last coordinates are equal (false for an empty line).
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first.equals_2d(last),
            _ => false,
        }
    }

    pub fn length(&self) -> T {
        self.0
            .windows(2)
            .fold(T::zero(), |acc, w| acc + w[0].distance(w[1]))
    }

    pub fn envelope(&self) -> AABB<T> {
        AABB::from_coords(&self.0)
    }

    /// Area enclosed when treated as a ring, positive if counter clockwise.
    #[inline]
    pub fn signed_area(&self) -> T {
        signed_area(&self.0)
    }
}

/// Polygon with an exterior shell and zero or more interior holes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon<T = f64> {
    pub exterior: LineString<T>,
    pub interiors: Vec<LineString<T>>,
}

impl<T> Polygon<T>
where
    T: Real,
{
    #[inline]
    pub fn new(exterior: LineString<T>, interiors: Vec<LineString<T>>) -> Self {
        Polygon {
            exterior,
            interiors,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// Area of the shell minus the area of the holes.
    pub fn area(&self) -> T {
        let holes = self
            .interiors
            .iter()
            .fold(T::zero(), |acc, h| acc + h.signed_area().abs());
        self.exterior.signed_area().abs() - holes
    }

    /// Iterate over the shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LineString<T>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

/// Closed set of planar geometry kinds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<T = f64> {
    Point(Coord<T>),
    LineString(LineString<T>),
    LinearRing(LineString<T>),
    Polygon(Polygon<T>),
    MultiPoint(Vec<Coord<T>>),
    MultiLineString(Vec<LineString<T>>),
    MultiPolygon(Vec<Polygon<T>>),
    GeometryCollection(Vec<Geometry<T>>),
}

impl<T> Geometry<T>
where
    T: Real,
{
    /// Empty geometry of the given dimension.
    pub fn empty(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Empty => Geometry::GeometryCollection(Vec::new()),
            Dimension::Point => Geometry::MultiPoint(Vec::new()),
            Dimension::Line => Geometry::LineString(LineString::default()),
            Dimension::Area => Geometry::Polygon(Polygon::default()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(ls) | Geometry::LinearRing(ls) => ls.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::MultiLineString(lines) => lines.iter().all(|l| l.is_empty()),
            Geometry::MultiPolygon(polys) => polys.iter().all(|p| p.is_empty()),
            Geometry::GeometryCollection(geoms) => geoms.iter().all(|g| g.is_empty()),
        }
    }

    /// Topological dimension, the largest dimension of any part for collections.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
                Dimension::Line
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Area,
            Geometry::GeometryCollection(geoms) => geoms
                .iter()
                .map(|g| g.dimension())
                .max()
                .unwrap_or(Dimension::Empty),
        }
    }

    /// `true` for polygons and multi polygons.
    #[inline]
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    /// All vertexes in storage order.
    pub fn coords(&self) -> Vec<Coord<T>> {
        let mut result = Vec::new();
        self.visit_coords(&mut |c| result.push(c));
        result
    }

    fn visit_coords<F>(&self, visitor: &mut F)
    where
        F: FnMut(Coord<T>),
    {
        match self {
            Geometry::Point(c) => visitor(*c),
            Geometry::LineString(ls) | Geometry::LinearRing(ls) => {
                ls.0.iter().for_each(|c| visitor(*c))
            }
            Geometry::Polygon(p) => p
                .rings()
                .flat_map(|r| r.0.iter())
                .for_each(|c| visitor(*c)),
            Geometry::MultiPoint(pts) => pts.iter().for_each(|c| visitor(*c)),
            Geometry::MultiLineString(lines) => lines
                .iter()
                .flat_map(|l| l.0.iter())
                .for_each(|c| visitor(*c)),
            Geometry::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|p| p.rings())
                .flat_map(|r| r.0.iter())
                .for_each(|c| visitor(*c)),
            Geometry::GeometryCollection(geoms) => {
                geoms.iter().for_each(|g| g.visit_coords(visitor))
            }
        }
    }

    /// Bounding envelope, null for empty geometries.
    pub fn envelope(&self) -> AABB<T> {
        let mut env = AABB::null();
        self.visit_coords(&mut |c| env.expand_to_include(c));
        env
    }

    /// Number of parts (1 for non collection kinds).
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(pts) => pts.len(),
            Geometry::MultiLineString(lines) => lines.len(),
            Geometry::MultiPolygon(polys) => polys.len(),
            Geometry::GeometryCollection(geoms) => geoms.len(),
            _ => 1,
        }
    }

    /// Part at index `n` as a standalone geometry.
    pub fn geometry_n(&self, n: usize) -> Option<Geometry<T>> {
        match self {
            Geometry::MultiPoint(pts) => pts.get(n).map(|c| Geometry::Point(*c)),
            Geometry::MultiLineString(lines) => {
                lines.get(n).map(|l| Geometry::LineString(l.clone()))
            }
            Geometry::MultiPolygon(polys) => polys.get(n).map(|p| Geometry::Polygon(p.clone())),
            Geometry::GeometryCollection(geoms) => geoms.get(n).cloned(),
            _ if n == 0 => Some(self.clone()),
            _ => None,
        }
    }

    /// Area of all polygonal parts.
    pub fn area(&self) -> T {
        match self {
            Geometry::Polygon(p) => p.area(),
            Geometry::MultiPolygon(polys) => polys.iter().fold(T::zero(), |acc, p| acc + p.area()),
            Geometry::GeometryCollection(geoms) => {
                geoms.iter().fold(T::zero(), |acc, g| acc + g.area())
            }
            _ => T::zero(),
        }
    }

    /// Length of all linear parts and polygon rings.
    pub fn length(&self) -> T {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => T::zero(),
            Geometry::LineString(ls) | Geometry::LinearRing(ls) => ls.length(),
            Geometry::Polygon(p) => p.rings().fold(T::zero(), |acc, r| acc + r.length()),
            Geometry::MultiLineString(lines) => {
                lines.iter().fold(T::zero(), |acc, l| acc + l.length())
            }
            Geometry::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|p| p.rings())
                .fold(T::zero(), |acc, r| acc + r.length()),
            Geometry::GeometryCollection(geoms) => {
                geoms.iter().fold(T::zero(), |acc, g| acc + g.length())
            }
        }
    }

    /// Copy of this geometry with every coordinate transformed by `f`.
    pub fn map_coords<F>(&self, f: &F) -> Geometry<T>
    where
        F: Fn(Coord<T>) -> Coord<T>,
    {
        let map_line = |ls: &LineString<T>| LineString(ls.0.iter().map(|c| f(*c)).collect());
        let map_poly = |p: &Polygon<T>| Polygon {
            exterior: map_line(&p.exterior),
            interiors: p.interiors.iter().map(map_line).collect(),
        };

        match self {
            Geometry::Point(c) => Geometry::Point(f(*c)),
            Geometry::LineString(ls) => Geometry::LineString(map_line(ls)),
            Geometry::LinearRing(ls) => Geometry::LinearRing(map_line(ls)),
            Geometry::Polygon(p) => Geometry::Polygon(map_poly(p)),
            Geometry::MultiPoint(pts) => Geometry::MultiPoint(pts.iter().map(|c| f(*c)).collect()),
            Geometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines.iter().map(map_line).collect())
            }
            Geometry::MultiPolygon(polys) => {
                Geometry::MultiPolygon(polys.iter().map(map_poly).collect())
            }
            Geometry::GeometryCollection(geoms) => {
                Geometry::GeometryCollection(geoms.iter().map(|g| g.map_coords(f)).collect())
            }
        }
    }

    /// Copy of this geometry translated by `(dx, dy)`.
    pub fn translate(&self, dx: T, dy: T) -> Geometry<T> {
        self.map_coords(&|c| Coord::new(c.x + dx, c.y + dy))
    }
}

/// Assemble result parts into a single geometry.
///
/// A single part is returned bare, parts of one kind become the matching multi geometry and
/// mixed kinds become a geometry collection (points first, then lines, then polygons). No parts
/// gives an empty geometry collection.
pub fn build_geometry<T>(
    points: Vec<Coord<T>>,
    mut lines: Vec<LineString<T>>,
    mut polygons: Vec<Polygon<T>>,
) -> Geometry<T>
where
    T: Real,
{
    let kinds = [!points.is_empty(), !lines.is_empty(), !polygons.is_empty()]
        .iter()
        .filter(|&&k| k)
        .count();

    if kinds > 1 {
        let mut parts = Vec::with_capacity(points.len() + lines.len() + polygons.len());
        parts.extend(points.into_iter().map(Geometry::Point));
        parts.extend(lines.into_iter().map(Geometry::LineString));
        parts.extend(polygons.into_iter().map(Geometry::Polygon));
        return Geometry::GeometryCollection(parts);
    }

    if points.len() == 1 {
        return Geometry::Point(points[0]);
    }
    if !points.is_empty() {
        return Geometry::MultiPoint(points);
    }
    if lines.len() == 1 {
        return Geometry::LineString(lines.remove(0));
    }
    if !lines.is_empty() {
        return Geometry::MultiLineString(lines);
    }
    if polygons.len() == 1 {
        return Geometry::Polygon(polygons.remove(0));
    }
    if !polygons.is_empty() {
        return Geometry::MultiPolygon(polygons);
    }

    Geometry::GeometryCollection(Vec::new())
}
