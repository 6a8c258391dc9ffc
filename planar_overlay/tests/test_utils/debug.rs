use planar_overlay::{Geometry, LineString};

fn ring_str(ring: &LineString) -> String {
    format!(
        "[{}]",
        ring.coords()
            .iter()
            .map(|c| format!("[{}, {}]", c.x, c.y))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Helper function to create a WKT like string from a geometry to be used for debugging.
pub fn to_debug_str(geom: &Geometry) -> String {
    match geom {
        Geometry::Point(c) => format!("POINT [{}, {}]", c.x, c.y),
        Geometry::LineString(ls) => format!("LINESTRING {}", ring_str(ls)),
        Geometry::LinearRing(ls) => format!("LINEARRING {}", ring_str(ls)),
        Geometry::Polygon(p) => format!(
            "POLYGON [{}]",
            p.rings().map(ring_str).collect::<Vec<_>>().join(",\n    ")
        ),
        Geometry::MultiPoint(pts) => format!(
            "MULTIPOINT [{}]",
            pts.iter()
                .map(|c| format!("[{}, {}]", c.x, c.y))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Geometry::MultiLineString(_)
        | Geometry::MultiPolygon(_)
        | Geometry::GeometryCollection(_) => {
            let parts = (0..geom.num_geometries())
                .filter_map(|i| geom.geometry_n(i))
                .map(|g| to_debug_str(&g))
                .collect::<Vec<_>>();
            format!("COLLECTION [\n  {}\n]", parts.join(",\n  "))
        }
    }
}

/// Route `log` output of the crate to the test output (`RUST_LOG=debug` to see it).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
