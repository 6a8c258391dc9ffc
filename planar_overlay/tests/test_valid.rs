mod test_utils;

use planar_overlay::{
    core::math::coord, line_string, overlay::Overlay, polygon, Geometry, IsValidOp,
    IsValidOptions, Polygon, TopologyValidationError, ValidationErrorKind,
};
use test_utils::{init_logging, to_debug_str};

fn assert_invalid(geom: &Geometry, kind: ValidationErrorKind, x: f64, y: f64) {
    init_logging();
    let err = geom.validation_error();
    assert_eq!(
        err,
        Some(TopologyValidationError::new(kind, coord(x, y))),
        "geometry:\n{}",
        to_debug_str(geom)
    );
    assert!(!geom.is_valid());
}

fn square(x: f64, y: f64, size: f64) -> Geometry {
    let ring = line_string![
        (x, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
        (x, y)
    ];
    Geometry::Polygon(Polygon::new(ring, Vec::new()))
}

#[test]
fn bow_tie_polygon() {
    let geom = Geometry::Polygon(polygon![
        (0.0, 0.0),
        (4.0, 4.0),
        (4.0, 0.0),
        (0.0, 4.0),
        (0.0, 0.0)
    ]);
    assert_invalid(&geom, ValidationErrorKind::SelfIntersection, 2.0, 2.0);
}

#[test]
fn figure_eight_polygon() {
    let geom = Geometry::Polygon(polygon![
        (0.0, 0.0),
        (2.0, 2.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (2.0, 2.0),
        (0.0, 4.0),
        (0.0, 0.0)
    ]);
    assert_invalid(&geom, ValidationErrorKind::RingSelfIntersection, 2.0, 2.0);

    // the two lobes only share a point, the interior stays disconnected
    let options = IsValidOptions {
        self_touching_ring_forming_hole_valid: true,
    };
    let err = IsValidOp::with_options(&geom, options).validation_error();
    assert_eq!(
        err.map(|e| e.kind),
        Some(ValidationErrorKind::DisconnectedInterior)
    );
}

#[test]
fn simple_polygons_are_valid() {
    assert!(square(0.0, 0.0, 10.0).is_valid());
    let triangle = Geometry::Polygon(polygon![(0.0, 0.0), (4.0, 0.0), (2.0, 3.0), (0.0, 0.0)]);
    assert!(triangle.is_valid());
    // repeated points are collapsed before any check
    let repeated = Geometry::Polygon(polygon![
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 0.0),
        (2.0, 3.0),
        (0.0, 0.0)
    ]);
    assert!(repeated.is_valid());
}

#[test]
fn too_few_points() {
    let geom = Geometry::Polygon(polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 0.0), (0.0, 0.0)]);
    assert_invalid(&geom, ValidationErrorKind::TooFewPoints, 0.0, 0.0);

    let line = Geometry::LineString(line_string![(3.0, 3.0)]);
    assert_invalid(&line, ValidationErrorKind::TooFewPoints, 3.0, 3.0);
}

#[test]
fn nested_holes() {
    let geom = Geometry::Polygon(polygon![
        exterior: [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        interiors: [
            [(1.0, 1.0), (9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)],
            [(3.0, 3.0), (5.0, 3.0), (5.0, 5.0), (3.0, 5.0), (3.0, 3.0)],
        ],
    ]);
    assert_invalid(&geom, ValidationErrorKind::NestedHoles, 3.0, 3.0);
}

#[test]
fn duplicate_rings() {
    let Geometry::Polygon(p) = square(0.0, 0.0, 10.0) else {
        unreachable!()
    };
    let geom = Geometry::MultiPolygon(vec![p.clone(), p]);
    assert_invalid(&geom, ValidationErrorKind::DuplicateRings, 0.0, 0.0);
}

#[test]
fn error_display() {
    let err = TopologyValidationError::new(ValidationErrorKind::SelfIntersection, coord(2.0, 2.5));
    assert_eq!(err.to_string(), "Self-intersection at or near point (2, 2.5)");
    assert_eq!(
        ValidationErrorKind::DisconnectedInterior.message(),
        "Interior is disconnected"
    );
}

#[test]
fn overlay_results_are_valid() {
    let inputs = [
        square(0.0, 0.0, 10.0),
        square(5.0, 5.0, 10.0),
        square(10.0, 0.0, 10.0),
        square(2.0, 2.0, 3.0),
        square(-3.0, 4.0, 20.0),
    ];

    for a in inputs.iter() {
        for b in inputs.iter() {
            for result in [
                a.intersection(b),
                a.union(b),
                a.difference(b),
                a.sym_difference(b),
            ] {
                let result = result.unwrap();
                assert!(
                    result.is_valid(),
                    "{:?}\n{}",
                    result.validation_error(),
                    to_debug_str(&result)
                );
            }
        }
    }
}
