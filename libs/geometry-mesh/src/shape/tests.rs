//! # Shape Tests

use super::*;
use glam::DVec2;

fn square(min: f64, max: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(min, min),
        DVec2::new(max, min),
        DVec2::new(max, max),
        DVec2::new(min, max),
    ]
}

// =============================================================================
// PATH TESTS
// =============================================================================

#[test]
fn test_path_starts_at_origin() {
    let mut path = Path::new();
    path.quadratic_curve_to(DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0));
    assert_eq!(path.curves()[0].start, DVec2::ZERO);
}

#[test]
fn test_path_curves_are_connected() {
    let mut path = Path::new();
    path.move_to(DVec2::new(1.0, 1.0))
        .quadratic_curve_to(DVec2::new(2.0, 1.0), DVec2::new(3.0, 1.0))
        .quadratic_curve_to(DVec2::new(3.0, 2.0), DVec2::new(3.0, 3.0));
    assert_eq!(path.curve_count(), 2);
    assert_eq!(path.curves()[1].start, DVec2::new(3.0, 1.0));
    assert_eq!(path.current_point(), DVec2::new(3.0, 3.0));
}

#[test]
fn test_path_points_merge_shared_ends() {
    let mut path = Path::new();
    path.move_to(DVec2::ZERO)
        .quadratic_curve_to(DVec2::new(2.0, 0.0), DVec2::new(4.0, 0.0))
        .quadratic_curve_to(DVec2::new(0.0, 4.0), DVec2::ZERO);
    let points = path.points(12);
    // 13 from the first curve, 12 more from the second.
    assert_eq!(points.len(), 25);
    assert_eq!(points[0], DVec2::ZERO);
    assert_eq!(points[24], DVec2::ZERO);
}

#[test]
fn test_empty_path_has_no_points() {
    assert!(Path::new().points(12).is_empty());
}

#[test]
fn test_shape_extract_points() {
    let mut outline = Path::new();
    outline
        .move_to(DVec2::ZERO)
        .quadratic_curve_to(DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0));
    let mut hole = Path::new();
    hole.move_to(DVec2::ONE)
        .quadratic_curve_to(DVec2::new(1.5, 1.0), DVec2::new(1.5, 1.5));
    let mut shape = Shape::new(outline);
    shape.add_hole(hole);

    let points = shape.extract_points(4);
    assert_eq!(points.outline.len(), 5);
    assert_eq!(points.holes.len(), 1);
    assert_eq!(points.holes[0].len(), 5);
}

// =============================================================================
// SHAPE UTILS TESTS
// =============================================================================

#[test]
fn test_area_counter_clockwise_positive() {
    assert_eq!(ShapeUtils::area(&square(0.0, 2.0)), 4.0);
    assert!(!ShapeUtils::is_clockwise(&square(0.0, 2.0)));
}

#[test]
fn test_area_clockwise_negative() {
    let mut points = square(0.0, 2.0);
    points.reverse();
    assert_eq!(ShapeUtils::area(&points), -4.0);
    assert!(ShapeUtils::is_clockwise(&points));
}

#[test]
fn test_area_degenerate() {
    assert_eq!(ShapeUtils::area(&[]), 0.0);
    assert_eq!(ShapeUtils::area(&[DVec2::ONE]), 0.0);
}

#[test]
fn test_remove_duplicate_end_point() {
    let mut points = square(0.0, 1.0);
    points.push(DVec2::ZERO);
    ShapeUtils::remove_duplicate_end_point(&mut points);
    assert_eq!(points.len(), 4);

    // Two points are never shortened.
    let mut pair = vec![DVec2::ZERO, DVec2::ZERO];
    ShapeUtils::remove_duplicate_end_point(&mut pair);
    assert_eq!(pair.len(), 2);
}

#[test]
fn test_triangulate_square_with_hole() {
    let mut contour = square(0.0, 4.0);
    let mut inner = square(1.0, 3.0);
    inner.reverse();
    let mut holes = vec![inner];

    let faces = ShapeUtils::triangulate_shape(&mut contour, &mut holes).unwrap();
    // A quad ring needs 8 triangles.
    assert_eq!(faces.len(), 8);
    assert!(faces.iter().flatten().all(|&i| i < 8));
    // Every hole vertex is used.
    for i in 4..8 {
        assert!(faces.iter().flatten().any(|&v| v == i));
    }
}

#[test]
fn test_triangulate_removes_closing_point() {
    let mut contour = square(0.0, 1.0);
    contour.push(DVec2::ZERO);
    let faces = ShapeUtils::triangulate_shape(&mut contour, &mut []).unwrap();
    assert_eq!(contour.len(), 4);
    assert_eq!(faces.len(), 2);
}
