mod test_utils;

use planar_overlay::{
    core::{math::coord, traits::FuzzyEq},
    geometry::locate_point_in_area,
    line_string,
    overlay::{overlay_op_with_options, Overlay},
    polygon, Coord, Dimension, Geometry, Location, OverlayOpCode, OverlayOptions,
};
use proptest::prelude::*;
use test_utils::{
    create_property_set, init_logging, property_sets_match, to_debug_str, PolygonProperties,
};

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Geometry {
    Geometry::Polygon(polygon![
        (min_x, min_y),
        (max_x, min_y),
        (max_x, max_y),
        (min_x, max_y),
        (min_x, min_y)
    ])
}

fn assert_result_properties(result: &Geometry, expected: &[PolygonProperties]) {
    init_logging();
    let result_set = create_property_set(result);
    assert!(
        property_sets_match(&result_set, expected),
        "result geometry:\n{}",
        to_debug_str(result)
    );
    assert!(
        result.is_valid(),
        "invalid result: {:?}\n{}",
        result.validation_error(),
        to_debug_str(result)
    );
}

#[test]
fn overlapping_squares() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 15.0, 15.0);

    let result = a.intersection(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(4, 0, 25.0, 20.0, 5.0, 5.0, 10.0, 10.0)],
    );

    let result = a.union(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(8, 0, 175.0, 60.0, 0.0, 0.0, 15.0, 15.0)],
    );

    let result = a.difference(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(6, 0, 75.0, 40.0, 0.0, 0.0, 10.0, 10.0)],
    );

    let result = b.difference(&a).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(6, 0, 75.0, 40.0, 5.0, 5.0, 15.0, 15.0)],
    );

    let result = a.sym_difference(&b).unwrap();
    assert_eq!(result.num_geometries(), 2);
    assert_result_properties(
        &result,
        &[
            PolygonProperties::new(6, 0, 75.0, 40.0, 0.0, 0.0, 10.0, 10.0),
            PolygonProperties::new(6, 0, 75.0, 40.0, 5.0, 5.0, 15.0, 15.0),
        ],
    );
}

#[test]
fn same_geometry() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let expected = [PolygonProperties::new(4, 0, 100.0, 40.0, 0.0, 0.0, 10.0, 10.0)];

    assert_result_properties(&a.intersection(&a).unwrap(), &expected);
    assert_result_properties(&a.union(&a).unwrap(), &expected);

    for op in [OverlayOpCode::Difference, OverlayOpCode::SymDifference] {
        let result = a.overlay(&a, op).unwrap();
        assert!(result.is_empty(), "{:?}: {}", op, to_debug_str(&result));
        assert_eq!(result.dimension(), Dimension::Area);
    }
}

#[test]
fn disjoint_squares() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 0.0, 30.0, 10.0);

    let result = a.intersection(&b).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.dimension(), Dimension::Area);

    let result = a.union(&b).unwrap();
    assert!(matches!(result, Geometry::MultiPolygon(ref polys) if polys.len() == 2));
    assert_result_properties(
        &result,
        &[
            PolygonProperties::new(4, 0, 100.0, 40.0, 0.0, 0.0, 10.0, 10.0),
            PolygonProperties::new(4, 0, 100.0, 40.0, 20.0, 0.0, 30.0, 10.0),
        ],
    );

    let result = a.difference(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(4, 0, 100.0, 40.0, 0.0, 0.0, 10.0, 10.0)],
    );
}

#[test]
fn adjacent_squares_merge() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(10.0, 0.0, 20.0, 10.0);

    let result = a.union(&b).unwrap();
    assert!(matches!(result, Geometry::Polygon(_)));
    assert_result_properties(
        &result,
        &[PolygonProperties::new(4, 0, 200.0, 60.0, 0.0, 0.0, 20.0, 10.0)],
    );

    // shared edge only, no area in common
    let result = a.intersection(&b).unwrap();
    assert!(result.area().fuzzy_eq_zero());
}

#[test]
fn contained_square_makes_hole() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(2.0, 2.0, 8.0, 8.0);

    let result = a.difference(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(4, 1, 64.0, 64.0, 0.0, 0.0, 10.0, 10.0)],
    );

    let result = a.union(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(4, 0, 100.0, 40.0, 0.0, 0.0, 10.0, 10.0)],
    );

    let result = b.difference(&a).unwrap();
    assert!(result.is_empty());
}

#[test]
fn polygon_with_hole_intersection() {
    let a = Geometry::Polygon(polygon![
        exterior: [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
        interiors: [[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)]],
    ]);
    let b = rect(5.0, 5.0, 15.0, 15.0);

    let result = a.intersection(&b).unwrap();
    assert_result_properties(
        &result,
        &[PolygonProperties::new(6, 0, 16.0, 20.0, 5.0, 5.0, 10.0, 10.0)],
    );
}

#[test]
fn line_with_polygon() {
    let line = Geometry::LineString(line_string![(-5.0, 5.0), (15.0, 5.0)]);
    let square = rect(0.0, 0.0, 10.0, 10.0);

    let result = line.intersection(&square).unwrap();
    assert!(matches!(result, Geometry::LineString(_)), "{}", to_debug_str(&result));
    assert!(result.length().fuzzy_eq(10.0));
    assert!(result.envelope().min_x.fuzzy_eq(0.0));
    assert!(result.envelope().max_x.fuzzy_eq(10.0));

    let result = line.difference(&square).unwrap();
    assert_eq!(result.dimension(), Dimension::Line);
    assert_eq!(result.num_geometries(), 2);
    assert!(result.length().fuzzy_eq(10.0));

    let result = square.difference(&line).unwrap();
    assert!(result.area().fuzzy_eq(100.0));

    let result = line.union(&square).unwrap();
    assert!(matches!(result, Geometry::GeometryCollection(ref parts) if parts.len() == 3));
    assert!(result.area().fuzzy_eq(100.0));
    assert!(result.length().fuzzy_eq(50.0));
}

#[test]
fn crossing_lines() {
    let a = Geometry::LineString(line_string![(0.0, 0.0), (10.0, 10.0)]);
    let b = Geometry::LineString(line_string![(0.0, 10.0), (10.0, 0.0)]);

    let result = a.intersection(&b).unwrap();
    assert_eq!(result, Geometry::Point(coord(5.0, 5.0)));

    let result = a.union(&b).unwrap();
    assert_eq!(result.num_geometries(), 4);
    assert!(result.length().fuzzy_eq(a.length() + b.length()));
}

#[test]
fn points_with_polygon() {
    let square = rect(0.0, 0.0, 10.0, 10.0);
    let inside = Geometry::Point(coord(5.0, 5.0));
    let outside = Geometry::Point(coord(20.0, 20.0));

    assert_eq!(inside.intersection(&square).unwrap(), inside);
    assert!(outside.intersection(&square).unwrap().is_empty());

    let result = inside.difference(&square).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.dimension(), Dimension::Point);

    let result = outside.union(&square).unwrap();
    match result {
        Geometry::GeometryCollection(parts) => {
            assert_eq!(parts.len(), 2);
            assert_eq!(parts[0], outside);
            assert!(parts[1].area().fuzzy_eq(100.0));
        }
        other => panic!("expected collection: {}", to_debug_str(&other)),
    }

    let result = inside.union(&square).unwrap();
    assert!(matches!(result, Geometry::Polygon(_)));
}

#[test]
fn overlay_without_checks() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 15.0, 15.0);
    let options = OverlayOptions {
        validate_noding: false,
        retry_with_common_bits: false,
        ..OverlayOptions::new()
    };
    let result = overlay_op_with_options(&a, &b, OverlayOpCode::Union, &options).unwrap();
    assert!(result.area().fuzzy_eq(175.0));
}

#[test]
fn too_few_points_is_error() {
    let a = Geometry::Polygon(polygon![(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
    let b = rect(0.0, 0.0, 10.0, 10.0);
    assert!(a.union(&b).is_err());
}

fn is_inside(p: Coord, geom: &Geometry) -> bool {
    locate_point_in_area(p, geom) == Location::Interior
}

fn rect_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-100.0..100.0f64, -100.0..100.0f64, 0.5..60.0f64, 0.5..60.0f64)
        .prop_map(|(x, y, w, h)| (x, y, x + w, y + h))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]
    #[test]
    fn rectangle_overlay_laws(
        r1 in rect_strategy(),
        r2 in rect_strategy(),
        samples in prop::collection::vec((-100.0..160.0f64, -100.0..160.0f64), 16),
    ) {
        let a = rect(r1.0, r1.1, r1.2, r1.3);
        let b = rect(r2.0, r2.1, r2.2, r2.3);
        let area_a = a.area();
        let area_b = b.area();
        let eps = 1e-6 * (area_a + area_b);

        let inter = a.intersection(&b).unwrap();
        let union = a.union(&b).unwrap();
        let diff = a.difference(&b).unwrap();
        let sym_diff = a.sym_difference(&b).unwrap();

        let i = inter.area();
        prop_assert!(i <= area_a.min(area_b) + eps);
        prop_assert!(union.area().fuzzy_eq_eps(area_a + area_b - i, eps));
        prop_assert!(diff.area().fuzzy_eq_eps(area_a - i, eps));
        prop_assert!(sym_diff.area().fuzzy_eq_eps(area_a + area_b - 2.0 * i, eps));

        prop_assert!(inter.is_valid());
        prop_assert!(union.is_valid());

        // intersection and symmetric difference partition the union off the input boundaries
        for p in samples.iter().map(|&(x, y)| coord(x, y)) {
            let loc_a = locate_point_in_area(p, &a);
            let loc_b = locate_point_in_area(p, &b);
            if loc_a == Location::Boundary || loc_b == Location::Boundary {
                continue;
            }
            let in_inter = is_inside(p, &inter);
            let in_sym_diff = is_inside(p, &sym_diff);
            prop_assert!(!(in_inter && in_sym_diff));
            prop_assert_eq!(in_inter || in_sym_diff, is_inside(p, &union));
            prop_assert_eq!(in_inter, loc_a == Location::Interior && loc_b == Location::Interior);
            prop_assert_eq!(
                is_inside(p, &diff),
                loc_a == Location::Interior && loc_b == Location::Exterior
            );
        }
    }
}
