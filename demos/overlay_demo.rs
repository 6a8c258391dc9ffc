//! Runs every overlay operation on a pair of overlapping polygons and prints a summary of each
//! result. Set `RUST_LOG=debug` to see the overlay stages.
use planar_overlay::{overlay::Overlay, polygon, Geometry, OverlayOpCode, TopologyError};

fn summary(geom: &Geometry) -> String {
    let kind = match geom {
        Geometry::Point(_) => "Point",
        Geometry::LineString(_) => "LineString",
        Geometry::LinearRing(_) => "LinearRing",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
    };
    if geom.is_empty() {
        return format!("{kind} EMPTY");
    }
    let env = geom.envelope();
    format!(
        "{kind} parts={} area={} length={} envelope=({}, {})..({}, {}) valid={}",
        geom.num_geometries(),
        geom.area(),
        geom.length(),
        env.min_x,
        env.min_y,
        env.max_x,
        env.max_y,
        geom.is_valid()
    )
}

fn main() -> Result<(), TopologyError> {
    env_logger::init();

    let a = Geometry::Polygon(polygon![
        exterior: [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        interiors: [[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]],
    ]);
    let b = Geometry::Polygon(polygon![
        (5.0, 5.0),
        (15.0, 5.0),
        (15.0, 15.0),
        (5.0, 15.0),
        (5.0, 5.0)
    ]);

    println!("a: {}", summary(&a));
    println!("b: {}", summary(&b));
    for op in [
        OverlayOpCode::Intersection,
        OverlayOpCode::Union,
        OverlayOpCode::Difference,
        OverlayOpCode::SymDifference,
    ] {
        let result = a.overlay(&b, op)?;
        println!("{:?}: {}", op, summary(&result));
    }

    let bow_tie = Geometry::Polygon(polygon![
        (0.0, 0.0),
        (4.0, 4.0),
        (4.0, 0.0),
        (0.0, 4.0),
        (0.0, 0.0)
    ]);
    match bow_tie.validation_error() {
        Some(err) => println!("bow tie: {err}"),
        None => println!("bow tie: valid"),
    }

    Ok(())
}
