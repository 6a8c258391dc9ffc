use super::{
    ConnectedInteriorTester, ConsistentAreaTester, IsValidOptions, NestedRingTester,
    TopologyValidationError, ValidationErrorKind,
};
use crate::{
    core::{
        math::{is_in_ring, locate_in_ring, Coord},
        traits::Real,
    },
    geometry::{BoundaryNodeRule, Geometry, LineString, Location, Polygon},
    graph::GeometryGraph,
};

type ValidResult = Result<(), TopologyValidationError>;

/// Checks that a geometry is topologically valid.
///
/// Points and lines only need valid coordinates and enough points. Polygonal geometries must
/// have closed rings which do not cross, holes inside their shells and not nested, shells not
/// nested and a connected interior. The first failure found is reported.
#[derive(Debug, Clone, Copy)]
pub struct IsValidOp<'a, T = f64> {
    geom: &'a Geometry<T>,
    options: IsValidOptions,
}

impl<'a, T> IsValidOp<'a, T>
where
    T: Real,
{
    pub fn new(geom: &'a Geometry<T>) -> Self {
        Self::with_options(geom, IsValidOptions::new())
    }

    pub fn with_options(geom: &'a Geometry<T>, options: IsValidOptions) -> Self {
        Self { geom, options }
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    pub fn validation_error(&self) -> Option<TopologyValidationError> {
        let result = self.check_valid(self.geom);
        if let Err(err) = &result {
            log::debug!("geometry is not valid: {err}");
        }
        result.err()
    }

    fn check_valid(&self, geom: &'a Geometry<T>) -> ValidResult {
        if geom.is_empty() {
            return Ok(());
        }

        match geom {
            Geometry::Point(c) => check_invalid_coordinates(std::slice::from_ref(c)),
            Geometry::MultiPoint(cs) => check_invalid_coordinates(cs),
            Geometry::LineString(l) => {
                check_invalid_coordinates(l.coords())?;
                check_too_few_points(&graph_of(geom))
            }
            Geometry::MultiLineString(ls) => {
                for l in ls.iter() {
                    check_invalid_coordinates(l.coords())?;
                }
                check_too_few_points(&graph_of(geom))
            }
            Geometry::LinearRing(ring) => {
                check_invalid_coordinates(ring.coords())?;
                check_closed_ring(ring)?;
                let mut graph = graph_of(geom);
                check_too_few_points(&graph)?;
                graph.compute_self_nodes(true, true);
                // the start point is then the first intersection, as for polygon rings
                for e in graph.edges.iter_mut() {
                    e.add_endpoint_intersections();
                }
                check_no_self_intersecting_rings(&graph)
            }
            Geometry::Polygon(poly) => {
                check_invalid_coordinates_polygon(poly)?;
                check_closed_rings(poly)?;
                let mut graph = graph_of(geom);
                check_too_few_points(&graph)?;
                check_consistent_area(&mut graph)?;
                if !self.options.self_touching_ring_forming_hole_valid {
                    check_no_self_intersecting_rings(&graph)?;
                }
                check_holes_in_shell(poly, &graph)?;
                check_holes_not_nested(poly, &graph)?;
                check_connected_interiors(&mut graph)
            }
            Geometry::MultiPolygon(polys) => {
                for poly in polys.iter() {
                    check_invalid_coordinates_polygon(poly)?;
                    check_closed_rings(poly)?;
                }
                let mut graph = graph_of(geom);
                check_too_few_points(&graph)?;
                check_consistent_area(&mut graph)?;
                if !self.options.self_touching_ring_forming_hole_valid {
                    check_no_self_intersecting_rings(&graph)?;
                }
                for poly in polys.iter() {
                    check_holes_in_shell(poly, &graph)?;
                }
                for poly in polys.iter() {
                    check_holes_not_nested(poly, &graph)?;
                }
                check_shells_not_nested(polys, &graph)?;
                check_connected_interiors(&mut graph)
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms.iter() {
                    self.check_valid(g)?;
                }
                Ok(())
            }
        }
    }
}

fn graph_of<T>(geom: &Geometry<T>) -> GeometryGraph<'_, T>
where
    T: Real,
{
    GeometryGraph::new(0, geom, BoundaryNodeRule::Mod2)
}

fn validation_error<T>(kind: ValidationErrorKind, coord: Coord<T>) -> TopologyValidationError
where
    T: Real,
{
    TopologyValidationError::new(kind, coord)
}

/// First point of `test_coords` which is not a node of the edge built from `search_ring`.
///
/// `None` if every point is a node. The graph must be self noded.
pub(super) fn find_point_not_node<T>(
    test_coords: &[Coord<T>],
    search_ring: &LineString<T>,
    graph: &GeometryGraph<'_, T>,
) -> Option<Coord<T>>
where
    T: Real,
{
    let Some(search_edge) = graph.find_edge(search_ring) else {
        return test_coords.first().copied();
    };
    let ei_list = &graph.edges[search_edge].ei_list;
    test_coords
        .iter()
        .copied()
        .find(|&pt| !ei_list.is_intersection(pt))
}

fn check_invalid_coordinates<T>(coords: &[Coord<T>]) -> ValidResult
where
    T: Real,
{
    match coords.iter().find(|c| !c.is_valid()) {
        Some(&c) => Err(validation_error(ValidationErrorKind::InvalidCoordinate, c)),
        None => Ok(()),
    }
}

fn check_invalid_coordinates_polygon<T>(poly: &Polygon<T>) -> ValidResult
where
    T: Real,
{
    for ring in poly.rings() {
        check_invalid_coordinates(ring.coords())?;
    }
    Ok(())
}

fn check_closed_ring<T>(ring: &LineString<T>) -> ValidResult
where
    T: Real,
{
    if ring.is_empty() || ring.is_closed() {
        return Ok(());
    }
    Err(validation_error(
        ValidationErrorKind::RingNotClosed,
        ring.coords()[0],
    ))
}

fn check_closed_rings<T>(poly: &Polygon<T>) -> ValidResult
where
    T: Real,
{
    for ring in poly.rings() {
        check_closed_ring(ring)?;
    }
    Ok(())
}

fn check_too_few_points<T>(graph: &GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    if !graph.has_too_few_points() {
        return Ok(());
    }
    let pt = graph.invalid_point().unwrap_or_else(Coord::zero);
    Err(validation_error(ValidationErrorKind::TooFewPoints, pt))
}

/// No proper self intersections, consistent labels at every node and no duplicated rings.
///
/// Self nodes the graph, which the remaining checks rely on.
fn check_consistent_area<T>(graph: &mut GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    let mut tester = ConsistentAreaTester::new(graph);
    if !tester.is_node_consistent_area() {
        let pt = tester.invalid_point().unwrap_or_else(Coord::zero);
        return Err(validation_error(ValidationErrorKind::SelfIntersection, pt));
    }
    if tester.has_duplicate_rings() {
        let pt = tester.invalid_point().unwrap_or_else(Coord::zero);
        return Err(validation_error(ValidationErrorKind::DuplicateRings, pt));
    }
    Ok(())
}

/// A ring may only touch itself at its start point: any other intersection recorded on the
/// ring's edge more than once is a self touch.
fn check_no_self_intersecting_rings<T>(graph: &GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    for e in graph.edges.iter() {
        let mut seen: Vec<Coord<T>> = Vec::new();
        for ei in e.ei_list.iter().skip(1) {
            if seen.iter().any(|c| c.equals_2d(&ei.coord)) {
                return Err(validation_error(
                    ValidationErrorKind::RingSelfIntersection,
                    ei.coord,
                ));
            }
            seen.push(ei.coord);
        }
    }
    Ok(())
}

/// Each hole has a point which is not a node of the shell and lies inside it.
fn check_holes_in_shell<T>(poly: &Polygon<T>, graph: &GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    let shell = &poly.exterior;
    let is_shell_empty = shell.is_empty();
    for hole in poly.interiors.iter() {
        if hole.is_empty() {
            continue;
        }

        let hole_pt = if is_shell_empty {
            hole.coords()[0]
        } else {
            match find_point_not_node(hole.coords(), shell, graph) {
                Some(pt) => pt,
                // hole and shell share every vertex, the consistent area check covers this
                None => return Ok(()),
            }
        };

        if is_shell_empty || locate_in_ring(hole_pt, shell.coords()) == Location::Exterior {
            return Err(validation_error(
                ValidationErrorKind::HoleOutsideShell,
                hole_pt,
            ));
        }
    }
    Ok(())
}

fn check_holes_not_nested<'a, T>(poly: &'a Polygon<T>, graph: &GeometryGraph<'a, T>) -> ValidResult
where
    T: Real,
{
    if poly.interiors.is_empty() {
        return Ok(());
    }

    let mut tester = NestedRingTester::new(graph);
    for hole in poly.interiors.iter().filter(|h| !h.is_empty()) {
        tester.add(hole);
    }
    if tester.is_non_nested() {
        return Ok(());
    }
    let pt = tester.nested_point().unwrap_or_else(Coord::zero);
    Err(validation_error(ValidationErrorKind::NestedHoles, pt))
}

/// No shell of a multi polygon lies inside another element, unless inside one of its holes.
fn check_shells_not_nested<T>(polys: &[Polygon<T>], graph: &GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    for (i, p) in polys.iter().enumerate() {
        let shell = &p.exterior;
        if shell.is_empty() {
            continue;
        }
        for (j, other) in polys.iter().enumerate() {
            if i == j || other.exterior.is_empty() {
                continue;
            }
            check_shell_not_nested(shell, other, graph)?;
        }
    }
    Ok(())
}

fn check_shell_not_nested<T>(
    shell: &LineString<T>,
    poly: &Polygon<T>,
    graph: &GeometryGraph<'_, T>,
) -> ValidResult
where
    T: Real,
{
    let poly_shell = &poly.exterior;
    let Some(shell_pt) = find_point_not_node(shell.coords(), poly_shell, graph) else {
        return Ok(());
    };
    if !is_in_ring(shell_pt, poly_shell.coords()) {
        return Ok(());
    }

    if poly.interiors.is_empty() {
        return Err(validation_error(ValidationErrorKind::NestedShells, shell_pt));
    }

    // inside the other shell, valid only if inside one of its holes
    let mut bad_nested_pt = None;
    for hole in poly.interiors.iter() {
        bad_nested_pt = check_shell_inside_hole(shell, hole, graph);
        if bad_nested_pt.is_none() {
            return Ok(());
        }
    }
    let pt = bad_nested_pt.unwrap_or(shell_pt);
    Err(validation_error(ValidationErrorKind::NestedShells, pt))
}

/// `None` if `shell` is inside `hole`, else a point of the shell outside the hole or of the
/// hole inside the shell.
fn check_shell_inside_hole<T>(
    shell: &LineString<T>,
    hole: &LineString<T>,
    graph: &GeometryGraph<'_, T>,
) -> Option<Coord<T>>
where
    T: Real,
{
    if let Some(shell_pt) = find_point_not_node(shell.coords(), hole, graph) {
        if !is_in_ring(shell_pt, hole.coords()) {
            return Some(shell_pt);
        }
    }

    match find_point_not_node(hole.coords(), shell, graph) {
        Some(hole_pt) if is_in_ring(hole_pt, shell.coords()) => Some(hole_pt),
        Some(_) => None,
        // every hole point is a node on the shell: the rings coincide
        None => hole.coords().first().copied(),
    }
}

fn check_connected_interiors<T>(graph: &mut GeometryGraph<'_, T>) -> ValidResult
where
    T: Real,
{
    let mut tester = ConnectedInteriorTester::new(graph);
    match tester.is_interiors_connected() {
        Ok(true) => Ok(()),
        Ok(false) => {
            let pt = tester.coordinate().unwrap_or_else(Coord::zero);
            Err(validation_error(
                ValidationErrorKind::DisconnectedInterior,
                pt,
            ))
        }
        Err(e) => Err(TopologyValidationError {
            kind: ValidationErrorKind::Error,
            coord: e.coord(),
        }),
    }
}
