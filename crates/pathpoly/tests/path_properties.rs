use pathpoly::geom::{Point, point};
use pathpoly::{ParseError, Polygon, Transform, parse_path};

fn assert_near(actual: Point, expected: Point, tolerance: f64) {
    assert!(
        (actual - expected).length() <= tolerance,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn straight_paths_accumulate_absolute_coordinates() {
    let cases: &[(&str, &[(f64, f64)], bool)] = &[
        ("M 0,0 L 10,0 L 10,10 Z", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], true),
        ("M 1,2 H 5 V 7 h -2 v -3", &[(1.0, 2.0), (5.0, 2.0), (5.0, 7.0), (3.0, 7.0), (3.0, 4.0)], false),
        ("m 1,1 l 1,1 l 1,1 z", &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)], true),
        ("M-1-2L-3.5e1,.5", &[(-1.0, -2.0), (-35.0, 0.5)], false),
    ];
    for (data, expected, closed) in cases {
        let p = parse_path(data).unwrap();
        let expected: Vec<Point> = expected.iter().map(|&(x, y)| point(x, y)).collect();
        assert_eq!(p.vertices(), expected.as_slice(), "{data}");
        assert_eq!(p.is_closed(), *closed, "{data}");
        assert!(!p.has_curves(), "{data}");
    }
}

#[test]
fn line_polygon_round_trips_through_text() {
    let original = Polygon::from_points(
        [
            point(0.0, 0.0),
            point(12.5, -3.0),
            point(1e-3, 4e5),
            point(-7.25, 0.1),
        ],
        true,
    );
    let text = original.to_string();
    assert_eq!(text, "M 0,0 L 12.5,-3 L 0.001,400000 L -7.25,0.1 Z");
    assert_eq!(parse_path(&text).unwrap(), original);
}

#[test]
fn smooth_cubic_reflects_previous_control_point() {
    let p = parse_path("M 0,0 C 10,0 10,10 20,10 S 30,20 40,20").unwrap();
    assert_eq!(p.bezier_starts().collect::<Vec<_>>(), vec![1, 4]);
    assert_eq!(p.vertex(4), Some(point(30.0, 20.0)));
    assert_eq!(p.vertex(5), Some(point(30.0, 20.0)));
    assert_eq!(p.last(), Some(point(40.0, 20.0)));
}

#[test]
fn zero_radius_arc_is_a_straight_segment() {
    let p = parse_path("M 0,0 A 0,5 0 0 1 10,10").unwrap();
    assert_eq!(p.vertices(), &[point(0.0, 0.0), point(10.0, 10.0)]);
    assert!(!p.has_curves());
}

#[test]
fn half_circle_becomes_six_segments_on_the_circle() {
    let center = point(50.0, 0.0);
    let r = 50.0;
    let p = parse_path("M 0,0 A 50,50 0 0 1 100,0").unwrap();
    assert_eq!(p.len(), 1 + 6 * 3);
    assert_eq!(p.bezier_starts().count(), 6);
    assert_eq!(p.last(), Some(point(100.0, 0.0)));

    let control_distance = r / 15f64.to_radians().cos();
    for start in p.bezier_starts() {
        let p0 = p.vertex(start - 1).unwrap();
        let c1 = p.vertex(start).unwrap();
        let p3 = p.vertex(start + 2).unwrap();
        assert!(((p0 - center).length() - r).abs() < 1e-9);
        assert!(((p3 - center).length() - r).abs() < 1e-9);

        // The cubic is an elevated quadratic; recover its control point.
        let q = p0 + (c1 - p0) * 1.5;
        assert!(((q - center).length() - control_distance).abs() < 1e-9);
    }
}

#[test]
fn implicit_repetition_continues_a_line() {
    let p = parse_path("M 0,0 L 1,1 2,2").unwrap();
    assert_eq!(
        p.vertices(),
        &[point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)]
    );
    assert!(!p.has_curves());
}

#[test]
fn implicit_repetition_after_move_is_a_line() {
    let p = parse_path("M 0,0 5,0 5,5").unwrap();
    assert_eq!(p.len(), 3);
    assert_eq!(p.subpath_starts().count(), 0);
}

#[test]
fn identity_transform_preserves_curved_polygon() {
    let p = parse_path("M 0,0 Q 5,10 10,0 A 5,5 0 1 1 20,0 Z").unwrap();
    assert_eq!(p.transform(&Transform::identity()), p);
}

#[test]
fn transform_then_inverse_restores_vertices() {
    let p = parse_path("M 0,0 C 1,2 3,4 5,6 L 7,8").unwrap();
    let t = Transform::rotate(33.0).then(&Transform::translate(4.0, -9.0));
    let inverse = t.inverse().unwrap();
    let back = p.transform(&t).transform(&inverse);
    for (a, b) in back.vertices().iter().zip(p.vertices()) {
        assert_near(*a, *b, 1e-9);
    }
    assert_eq!(
        back.bezier_starts().collect::<Vec<_>>(),
        p.bezier_starts().collect::<Vec<_>>()
    );
}

#[test]
fn errors_carry_input_offsets() {
    let err = parse_path("M 0,0 L 1,1e").unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedCommand { .. }));
    assert_eq!(err.offset(), 11);

    let err = parse_path("M 0,0 L 1,-").unwrap_err();
    assert_eq!(err.to_string(), "malformed number \"-\" at offset 10");
}

#[test]
fn from_str_matches_parse_path() {
    let text = "M 3,4 L 5,6 Z";
    let p: Polygon = text.parse().unwrap();
    assert_eq!(p, parse_path(text).unwrap());
}
