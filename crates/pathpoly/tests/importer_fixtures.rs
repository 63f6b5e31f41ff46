//! Paths exported by common drawing tools, checked against known-good polygons.

use pathpoly::geom::{Point, point, size};
use pathpoly::{Polygon, parse_path, shapes, transform};

fn assert_near(actual: Point, x: f64, y: f64) {
    assert!(
        (actual.x - x).abs() < 1e-4 && (actual.y - y).abs() < 1e-4,
        "expected ({x}, {y}), got {actual:?}"
    );
}

/// Same topology as `expected`, vertices equal within rounding.
fn assert_same_polygon(actual: &Polygon, expected: &str) {
    let expected: Polygon = expected.parse().unwrap();
    assert_eq!(actual.len(), expected.len(), "{actual}");
    assert_eq!(actual.is_closed(), expected.is_closed());
    assert_eq!(
        actual.bezier_starts().collect::<Vec<_>>(),
        expected.bezier_starts().collect::<Vec<_>>()
    );
    assert_eq!(
        actual.subpath_starts().collect::<Vec<_>>(),
        expected.subpath_starts().collect::<Vec<_>>()
    );
    for (a, e) in actual.vertices().iter().zip(expected.vertices()) {
        assert_near(*a, e.x, e.y);
    }
}

#[test]
fn relative_cubic_rounded_rectangle() {
    let p = parse_path(
        "m 40,-40 h 20 c 11.08,0 20,8.92 20,20 V 20 C 80,31.08 71.08,40 60,40 H 40 \
         C 28.92,40 20,31.08 20,20 v -40 c 0,-11.08 8.92,-20 20,-20 z",
    )
    .unwrap();
    assert_same_polygon(
        &p,
        "M 40,-40 L 60,-40 C 71.08,-40 80,-31.08 80,-20 L 80,20 C 80,31.08 71.08,40 60,40 \
         L 40,40 C 28.92,40 20,31.08 20,20 L 20,-20 C 20,-31.08 28.92,-40 40,-40 Z",
    );
}

#[test]
fn two_subpaths_with_explicit_closes() {
    let p = parse_path("M 10,10 V 40 H 40 V 10 Z m 10, 10 h 10 v 10 H 20 v -10 z").unwrap();
    assert_eq!(
        p.to_string(),
        "M 10,10 L 10,40 L 40,40 L 40,10 Z M 20,20 L 30,20 L 30,30 L 20,30 L 20,20 Z"
    );
}

#[test]
fn quarter_arc() {
    let p = parse_path("M 0,0 A 50,50,0,0,0,50,50").unwrap();
    assert_eq!(p.bezier_starts().count(), 3);
    // First segment: quadratic control (0, 13.39746), end (6.69873, 25).
    assert_near(p.vertices()[1], 0.0, 13.39746 * 2.0 / 3.0);
    assert_near(p.vertices()[3], 6.69873, 25.0);
    assert_eq!(p.last(), Some(point(50.0, 50.0)));
}

#[test]
fn arc_with_too_small_radii_is_scaled_up() {
    let p = parse_path("M 0,0 L 40,0 A 10,20,0,1,1,100,0 L 140,0").unwrap();
    assert_eq!(p.bezier_starts().count(), 6);
    let apex = p
        .vertices()
        .iter()
        .map(|v| v.y)
        .fold(f64::INFINITY, f64::min);
    assert!((apex + 60.0).abs() < 1e-9, "apex {apex}");
    assert_near(p.vertices()[10], 70.0, -60.0);
    assert_eq!(p.vertex(19), Some(point(100.0, 0.0)));
    assert_eq!(p.last(), Some(point(140.0, 0.0)));
}

#[test]
fn repeated_arc_arguments() {
    let p = parse_path(
        "M 80,0 A 40,40 0 0 1 58.083689,35.678848 40,40 0 0 1 16.350991,32.26026 L 40,0 Z",
    )
    .unwrap();
    assert!(p.is_closed());
    assert_eq!(p.bezier_starts().count(), 6);
    assert_eq!(p.vertex(9), Some(point(58.083689, 35.678848)));
    assert_eq!(p.vertex(18), Some(point(16.350991, 32.26026)));
    assert_eq!(p.last(), Some(point(40.0, 0.0)));
}

#[test]
fn rotated_arc_path() {
    let t = transform::parse("rotate(-41.594188)").unwrap();
    let p = parse_path(
        "M 4.71136,11.590742 A 15,47.5 0 0 1 -3.5072565,53.959374 \
         15,47.5 0 0 1 -19.157018,49.899801 l 8.868378,-38.309059 z",
    )
    .unwrap()
    .transform(&t);
    assert!(p.is_closed());
    assert_near(p.first().unwrap(), 11.217981, 5.540678);
    assert_near(p.last().unwrap(), 0.0, 15.498432);
    assert!(p.vertices().iter().any(|v| (v.x - 33.19799).abs() < 1e-4 && (v.y - 42.68264).abs() < 1e-4));
}

#[test]
fn compact_relative_curves() {
    let p = parse_path("M80,70c0,0,15,0,30,0c40,0,40,60,5,60c-15,0-35,0-35,0V70z").unwrap();
    assert!(p.is_closed());
    assert_eq!(
        p.vertices(),
        &[
            point(80.0, 70.0),
            point(80.0, 70.0),
            point(95.0, 70.0),
            point(110.0, 70.0),
            point(150.0, 70.0),
            point(150.0, 130.0),
            point(115.0, 130.0),
            point(100.0, 130.0),
            point(80.0, 130.0),
            point(80.0, 130.0),
            point(80.0, 70.0),
        ]
    );
    assert_eq!(p.bezier_starts().collect::<Vec<_>>(), vec![1, 4, 7]);
}

#[test]
fn rotated_rect() {
    let t = transform::parse("rotate(45,100,100)").unwrap();
    let p = shapes::rect(point(50.0, 50.0), size(100.0, 100.0)).transform(&t);
    assert_same_polygon(
        &p,
        "M 100,29.289322 L 170.71068,100 L 100,170.71068 L 29.289322,100 Z",
    );
}

#[test]
fn nested_group_transforms_compose() {
    let outer = transform::parse("rotate(45, 100, 100)").unwrap();
    let inner = transform::parse("translate(10,10)").unwrap();
    let combined = transform::parse("rotate(45, 100, 100) translate(10,10)").unwrap();
    let rect = shapes::rect(point(50.0, 50.0), size(100.0, 100.0));

    let expected = "M 100,43.431458 L 170.71068,114.142136 L 100,184.85281 L 29.289322,114.142136 Z";
    assert_same_polygon(&rect.transform(&inner).transform(&outer), expected);
    assert_same_polygon(&rect.transform(&combined), expected);
}

#[test]
fn rounded_rect_corner() {
    let p = shapes::rounded_rect(point(10.0, 20.0), size(70.0, 80.0), Some(10.0), Some(20.0));
    assert!(p.is_closed());
    assert!(p.to_string().starts_with("M 70,20 C 75.52284"));
    assert_near(p.vertices()[1], 75.52285, 20.0);
    assert_near(p.vertices()[2], 80.0, 28.954305);
    assert_eq!(p.vertex(3), Some(point(80.0, 40.0)));
}
