use planar_overlay::{
    core::{
        math::{orientation_index, Coord, Orientation},
        traits::FuzzyEq,
    },
    Geometry, LineString, Polygon, AABB,
};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Distinct vertexes of a closed ring with collinear vertexes dropped (no closing vertex).
pub fn ring_corners(ring: &LineString) -> Vec<Coord> {
    let mut pts: Vec<Coord> = ring.coords().to_vec();
    pts.dedup_by(|a, b| a.equals_2d(b));
    if pts.len() > 1 && pts[0].equals_2d(&pts[pts.len() - 1]) {
        pts.pop();
    }

    // repeat until no collinear vertex is left, removing one can expose another
    loop {
        let n = pts.len();
        if n < 3 {
            return pts;
        }
        let collinear = (0..n).find(|&i| {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            orientation_index(prev, pts[i], next) == Orientation::Collinear
        });
        match collinear {
            Some(i) => {
                pts.remove(i);
            }
            None => return pts,
        }
    }
}

/// Polygonal parts of a geometry.
pub fn polygons_of(geom: &Geometry) -> Vec<Polygon> {
    match geom {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(polys) => polys.clone(),
        Geometry::GeometryCollection(geoms) => geoms.iter().flat_map(polygons_of).collect(),
        _ => Vec::new(),
    }
}

/// Holds a set of properties of a polygon for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct PolygonProperties {
    pub vertex_count: usize,
    pub hole_count: usize,
    pub area: f64,
    pub perimeter: f64,
    pub extents: AABB<f64>,
}

impl PolygonProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-5;

    pub fn new(
        vertex_count: usize,
        hole_count: usize,
        area: f64,
        perimeter: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            hole_count,
            area,
            perimeter,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_polygon(poly: &Polygon) -> Self {
        Self {
            // shell corners only, noding adds collinear vertexes
            vertex_count: ring_corners(&poly.exterior).len(),
            hole_count: poly.interiors.len(),
            area: poly.area(),
            perimeter: poly.rings().map(|r| r.length()).sum(),
            extents: poly.exterior.envelope(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        if self.vertex_count != other.vertex_count {
            return false;
        }
        if self.hole_count != other.hole_count {
            return false;
        }
        if !self.area.fuzzy_eq_eps(other.area, eps) {
            return false;
        }
        if !self.perimeter.fuzzy_eq_eps(other.perimeter, eps) {
            return false;
        }
        aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

pub fn create_property_set(geom: &Geometry) -> Vec<PolygonProperties> {
    polygons_of(geom)
        .iter()
        .map(PolygonProperties::from_polygon)
        .collect()
}

pub fn property_sets_match(
    result_set: &[PolygonProperties],
    expected_set: &[PolygonProperties],
) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // simple N^2 comparisons, result sets are small
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, PolygonProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}
