use super::{
    compute_intersections, compute_self_intersections, Edge, Label, NodeMap, SegmentIntersector,
};
use crate::{
    core::{
        math::{is_ccw, remove_repeated_points, Coord},
        traits::Real,
    },
    geometry::{BoundaryNodeRule, Geometry, LineString, Location, PointLocator, Polygon},
};

/// Topology graph of a single input geometry (input `arg_index` of an operation).
///
/// Holds the labelled edges of the geometry's linear components and rings, and nodes for its
/// points, line endpoints and ring start points. Self intersections and intersections with
/// another graph are added by the `compute_*` methods.
#[derive(Debug, Clone)]
pub struct GeometryGraph<'a, T = f64> {
    arg_index: usize,
    geom: &'a Geometry<T>,
    pub edges: Vec<Edge<T>>,
    pub nodes: NodeMap<T>,
    line_edge_map: Vec<(&'a LineString<T>, usize)>,
    use_boundary_determination_rule: bool,
    boundary_rule: BoundaryNodeRule,
    has_too_few_points: bool,
    invalid_point: Option<Coord<T>>,
}

impl<'a, T> GeometryGraph<'a, T>
where
    T: Real,
{
    pub fn new(arg_index: usize, geom: &'a Geometry<T>, boundary_rule: BoundaryNodeRule) -> Self {
        let mut graph = Self {
            arg_index,
            geom,
            edges: Vec::new(),
            nodes: NodeMap::new(),
            line_edge_map: Vec::new(),
            use_boundary_determination_rule: true,
            boundary_rule,
            has_too_few_points: false,
            invalid_point: None,
        };
        graph.add(geom);
        log::trace!(
            "geometry graph {}: {} edges, {} nodes",
            arg_index,
            graph.edges.len(),
            graph.nodes.len()
        );
        graph
    }

    /// Location of a point on the boundary of a linear geometry touched by `boundary_count`
    /// line endpoints.
    pub fn determine_boundary(rule: BoundaryNodeRule, boundary_count: usize) -> Location {
        if rule.is_in_boundary(boundary_count) {
            Location::Boundary
        } else {
            Location::Interior
        }
    }

    #[inline]
    pub fn geometry(&self) -> &'a Geometry<T> {
        self.geom
    }

    #[inline]
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    #[inline]
    pub fn boundary_node_rule(&self) -> BoundaryNodeRule {
        self.boundary_rule
    }

    /// Some component had too few distinct points to form a valid line or ring.
    #[inline]
    pub fn has_too_few_points(&self) -> bool {
        self.has_too_few_points
    }

    /// First point of the last component found with too few points.
    #[inline]
    pub fn invalid_point(&self) -> Option<Coord<T>> {
        self.invalid_point
    }

    /// Edge built from `line` (a line string or a polygon ring of the input).
    pub fn find_edge(&self, line: &LineString<T>) -> Option<usize> {
        self.line_edge_map
            .iter()
            .find(|(l, _)| std::ptr::eq(*l, line))
            .map(|&(_, e)| e)
    }

    fn add(&mut self, geom: &'a Geometry<T>) {
        if geom.is_empty() {
            return;
        }

        match geom {
            Geometry::Point(p) => self.insert_point(*p, Some(Location::Interior)),
            Geometry::MultiPoint(pts) => {
                for p in pts.iter() {
                    self.insert_point(*p, Some(Location::Interior));
                }
            }
            Geometry::LineString(line) | Geometry::LinearRing(line) => self.add_line_string(line),
            Geometry::MultiLineString(lines) => {
                for line in lines.iter().filter(|l| !l.is_empty()) {
                    self.add_line_string(line);
                }
            }
            Geometry::Polygon(poly) => self.add_polygon(poly),
            Geometry::MultiPolygon(polys) => {
                // boundaries of the elements never cancel out
                self.use_boundary_determination_rule = false;
                for poly in polys.iter().filter(|p| !p.is_empty()) {
                    self.add_polygon(poly);
                }
            }
            Geometry::GeometryCollection(geoms) => {
                for g in geoms.iter() {
                    self.add(g);
                }
            }
        }
    }

    fn add_polygon(&mut self, poly: &'a Polygon<T>) {
        self.add_polygon_ring(&poly.exterior, Location::Exterior, Location::Interior);
        // holes have the interior of the polygon on their opposite side
        for hole in poly.interiors.iter() {
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior);
        }
    }

    /// Add a ring with the locations `cw_left`/`cw_right` as seen when the ring is clockwise.
    fn add_polygon_ring(&mut self, ring: &'a LineString<T>, cw_left: Location, cw_right: Location) {
        if ring.is_empty() {
            return;
        }

        let coords = remove_repeated_points(ring.coords());
        if coords.len() < 4 {
            self.has_too_few_points = true;
            self.invalid_point = Some(coords[0]);
            return;
        }

        let (left, right) = if is_ccw(&coords) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };

        let start = coords[0];
        let label = Label::new_geom_area(
            self.arg_index,
            Some(Location::Boundary),
            Some(left),
            Some(right),
        );
        self.line_edge_map.push((ring, self.edges.len()));
        self.edges.push(Edge::new(coords, label));
        self.insert_point(start, Some(Location::Boundary));
    }

    fn add_line_string(&mut self, line: &'a LineString<T>) {
        let coords = remove_repeated_points(line.coords());
        if coords.len() < 2 {
            self.has_too_few_points = true;
            self.invalid_point = coords.first().copied();
            return;
        }

        let first = coords[0];
        let last = coords[coords.len() - 1];
        let label = Label::new_geom_on(self.arg_index, Some(Location::Interior));
        self.line_edge_map.push((line, self.edges.len()));
        self.edges.push(Edge::new(coords, label));

        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    fn insert_point(&mut self, coord: Coord<T>, on: Option<Location>) {
        let n = self.nodes.add_node(coord);
        self.nodes.get_mut(n).label.set_on(self.arg_index, on);
    }

    /// Count one more line endpoint at `coord` and relocate the node with the boundary rule.
    fn insert_boundary_point(&mut self, coord: Coord<T>) {
        let n = self.nodes.add_node(coord);
        let label = &mut self.nodes.get_mut(n).label;
        let boundary_count = if label.on(self.arg_index) == Some(Location::Boundary) {
            2
        } else {
            1
        };
        let new_loc = Self::determine_boundary(self.boundary_rule, boundary_count);
        label.set_on(self.arg_index, Some(new_loc));
    }

    /// Node at `coord` is on the boundary of this geometry.
    pub fn is_boundary_node(&self, coord: Coord<T>) -> bool {
        self.nodes.find(coord).map_or(false, |n| {
            self.nodes.get(n).label.on(self.arg_index) == Some(Location::Boundary)
        })
    }

    /// Coordinates of the boundary nodes, in coordinate order.
    pub fn boundary_nodes(&self) -> Vec<Coord<T>> {
        self.nodes
            .boundary_nodes(self.arg_index)
            .into_iter()
            .map(|n| self.nodes.get(n).coordinate())
            .collect()
    }

    /// Node every self intersection of the geometry.
    ///
    /// Segments of the same ring are only tested against each other if
    /// `compute_ring_self_nodes` is set (rings of valid polygonal geometries never self
    /// intersect). With `is_done_if_proper` scanning stops at the first proper intersection.
    pub fn compute_self_nodes(
        &mut self,
        compute_ring_self_nodes: bool,
        is_done_if_proper: bool,
    ) -> SegmentIntersector<T> {
        let mut si = SegmentIntersector::new(true, false);
        si.set_is_done_when_proper(is_done_if_proper);

        let is_rings = matches!(
            self.geom,
            Geometry::LinearRing(_) | Geometry::Polygon(_) | Geometry::MultiPolygon(_)
        );
        let compute_all_segments = compute_ring_self_nodes || !is_rings;
        compute_self_intersections(&mut self.edges, &mut si, compute_all_segments);
        self.add_self_intersection_nodes();
        si
    }

    fn add_self_intersection_nodes(&mut self) {
        let mut nodes = Vec::new();
        for e in self.edges.iter() {
            let e_loc = e.label.on(self.arg_index);
            for ei in e.ei_list.iter() {
                nodes.push((ei.coord, e_loc));
            }
        }

        for (coord, loc) in nodes {
            // a node already on the boundary keeps its location
            if self.is_boundary_node(coord) {
                continue;
            }
            if loc == Some(Location::Boundary) && self.use_boundary_determination_rule {
                self.insert_boundary_point(coord);
            } else {
                self.insert_point(coord, loc);
            }
        }
    }

    /// Intersect the edges of this graph with the edges of `other`, recording the
    /// intersections on both. Proper intersections are only recorded if `include_proper`.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_, T>,
        include_proper: bool,
    ) -> SegmentIntersector<T> {
        let mut si = SegmentIntersector::new(include_proper, true);
        si.set_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());
        compute_intersections(&mut self.edges, &mut other.edges, &mut si);
        log::trace!(
            "edge intersections between inputs {} and {}: {} segment pairs tested",
            self.arg_index,
            other.arg_index,
            si.num_tests()
        );
        si
    }

    /// Append the edges split at their recorded intersections to `edge_list`.
    pub fn compute_split_edges(&mut self, edge_list: &mut Vec<Edge<T>>) {
        for e in self.edges.iter_mut() {
            edge_list.extend(e.split_edges());
        }
    }

    /// Location of `p` relative to the input geometry.
    pub fn locate(&self, p: Coord<T>) -> Location {
        PointLocator::new(self.boundary_rule).locate(p, self.geom)
    }
}
