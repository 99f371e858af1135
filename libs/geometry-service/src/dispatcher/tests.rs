//! Tests for the geometry dispatcher.

use super::*;
use crate::error::{ParamError, PathError, StatusCode};
use crate::protocol::ParamValue;
use config::constants::DEFAULT_CURVE_SEGMENTS;
use geometry_mesh::ShapeUtils;

fn handle(request: GeometryRequest) -> Result<GeometryResponse, ServiceError> {
    GeometryService::new().handle(&request)
}

fn extrude_request() -> GeometryRequest {
    GeometryRequest::new(GeometryKind::Extrude)
        .with_param(
            "points",
            ParamValue::Reals(vec![
                0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 0.0, 0.0, 4.0, 4.0, 0.0, 0.0, 4.0, 0.0, 0.0,
                0.0, 0.0,
            ]),
        )
        .with_param("path_indices", ParamValue::Integers(vec![0]))
}

// =============================================================================
// TABLE
// =============================================================================

#[test]
fn test_every_kind_has_a_descriptor() {
    for kind in GeometryKind::ALL {
        assert_eq!(descriptor(kind).unwrap().kind, kind);
    }
}

#[test]
fn test_schemas_have_unique_names() {
    for d in &DESCRIPTORS {
        for (i, spec) in d.params.iter().enumerate() {
            assert!(
                d.params[i + 1..].iter().all(|other| other.name != spec.name),
                "{:?} declares '{}' twice",
                d.kind,
                spec.name
            );
        }
    }
}

#[test]
fn test_every_primitive_builds_with_defaults() {
    for kind in GeometryKind::ALL {
        if kind == GeometryKind::Extrude {
            continue;
        }
        let response = handle(GeometryRequest::new(kind)).unwrap();
        assert!(!response.position.is_empty(), "{:?}", kind);
        assert_eq!(response.position.len() % 3, 0, "{:?}", kind);
        let vertices = response.position.len() / 3;
        assert_eq!(response.normal.unwrap().len(), vertices * 3, "{:?}", kind);
        assert_eq!(response.uv.unwrap().len(), vertices * 2, "{:?}", kind);
    }
}

// =============================================================================
// DEFAULTING
// =============================================================================

#[test]
fn test_box_defaults_equal_explicit_ones() {
    let implicit = handle(GeometryRequest::new(GeometryKind::Box)).unwrap();
    let explicit = handle(
        GeometryRequest::new(GeometryKind::Box)
            .with_param("width", ParamValue::Real(1.0))
            .with_param("height", ParamValue::Real(1.0))
            .with_param("depth", ParamValue::Real(1.0))
            .with_param("width_segments", ParamValue::Integer(1))
            .with_param("height_segments", ParamValue::Integer(1))
            .with_param("depth_segments", ParamValue::Integer(1)),
    )
    .unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn test_zero_width_falls_back() {
    let implicit = handle(GeometryRequest::new(GeometryKind::Box)).unwrap();
    let zero = handle(
        GeometryRequest::new(GeometryKind::Box).with_param("width", ParamValue::Real(0.0)),
    )
    .unwrap();
    assert_eq!(implicit, zero);
}

#[test]
fn test_nan_falls_back() {
    let implicit = handle(GeometryRequest::new(GeometryKind::Sphere)).unwrap();
    let nan = handle(
        GeometryRequest::new(GeometryKind::Sphere).with_param("radius", ParamValue::Real(f64::NAN)),
    )
    .unwrap();
    assert_eq!(implicit, nan);
}

#[test]
fn test_integer_accepted_for_real() {
    let real = handle(
        GeometryRequest::new(GeometryKind::Plane).with_param("width", ParamValue::Real(3.0)),
    )
    .unwrap();
    let integer = handle(
        GeometryRequest::new(GeometryKind::Plane).with_param("width", ParamValue::Integer(3)),
    )
    .unwrap();
    assert_eq!(real, integer);
}

#[test]
fn test_explicit_parameters_are_used() {
    let response = handle(
        GeometryRequest::new(GeometryKind::Sphere)
            .with_param("width_segments", ParamValue::Integer(16))
            .with_param("height_segments", ParamValue::Integer(12)),
    )
    .unwrap();
    assert_eq!(response.position.len() / 3, 17 * 13);
}

#[test]
fn test_open_ended_cylinder_drops_caps() {
    let closed = handle(GeometryRequest::new(GeometryKind::Cylinder)).unwrap();
    let open = handle(
        GeometryRequest::new(GeometryKind::Cylinder)
            .with_param("open_ended", ParamValue::Boolean(true)),
    )
    .unwrap();
    assert_eq!(closed.position.len() / 3, 18 + 2 * 17);
    assert_eq!(open.position.len() / 3, 18);
}

#[test]
fn test_torus_knot_windings() {
    let default = handle(GeometryRequest::new(GeometryKind::TorusKnot)).unwrap();
    let other = handle(
        GeometryRequest::new(GeometryKind::TorusKnot)
            .with_param("p", ParamValue::Integer(3))
            .with_param("q", ParamValue::Integer(7)),
    )
    .unwrap();
    assert_eq!(default.position.len(), other.position.len());
    assert_ne!(default.position, other.position);
}

// =============================================================================
// WIREFRAME
// =============================================================================

#[test]
fn test_wireframe_flag() {
    let response = handle(GeometryRequest::new(GeometryKind::Plane).with_wireframe(true)).unwrap();
    assert_eq!(response.position.len(), 5 * 6);
    assert!(response.normal.is_none());
    assert!(response.uv.is_none());
    assert!(response.index.is_none());
}

#[test]
fn test_wireframe_false_is_solid() {
    let solid = handle(GeometryRequest::new(GeometryKind::Plane)).unwrap();
    let explicit = handle(GeometryRequest::new(GeometryKind::Plane).with_wireframe(false)).unwrap();
    assert_eq!(solid, explicit);
    assert!(solid.index.is_some());
}

// =============================================================================
// EXTRUDE
// =============================================================================

#[test]
fn test_extrude_end_to_end() {
    let response = handle(extrude_request().with_param("depth", ParamValue::Real(2.0))).unwrap();

    assert!(!response.position.is_empty());
    assert!(response.index.is_none());

    let z: Vec<f32> = response.position.chunks_exact(3).map(|p| p[2]).collect();
    let min = z.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = z.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert_eq!(min, 0.0);
    assert_eq!(max, 2.0);

    let shapes = reconstruct(
        &[
            0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 0.0, 0.0, 4.0, 4.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0,
            0.0,
        ],
        &[0],
    )
    .unwrap();
    let mut contour = shapes[0].extract_points(DEFAULT_CURVE_SEGMENTS).outline;
    contour.reverse();
    let caps = ShapeUtils::triangulate_shape(&mut contour, &mut [])
        .unwrap()
        .len();
    let triangles = response.position.len() / 9;
    assert_eq!(triangles, 2 * caps + 2 * contour.len());
}

#[test]
fn test_extrude_with_bevel_is_thicker() {
    let response = handle(
        extrude_request()
            .with_param("depth", ParamValue::Real(2.0))
            .with_param("bevel_enabled", ParamValue::Boolean(true))
            .with_param("bevel_segments", ParamValue::Integer(2)),
    )
    .unwrap();
    let z: Vec<f32> = response.position.chunks_exact(3).map(|p| p[2]).collect();
    let min = z.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = z.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    assert!(min < 0.0);
    assert!(max > 2.0);
}

#[test]
fn test_extrude_requires_points() {
    let err = handle(GeometryRequest::new(GeometryKind::Extrude)).unwrap_err();
    assert!(matches!(err, ServiceError::Path(PathError::EmptyPoints)));
    assert_eq!(err.status().code, StatusCode::InvalidArgument);
}

#[test]
fn test_extrude_requires_path_indices() {
    let request = GeometryRequest::new(GeometryKind::Extrude)
        .with_param("points", ParamValue::Reals(vec![0.0, 0.0, 0.0]));
    let err = handle(request).unwrap_err();
    assert!(matches!(err, ServiceError::Path(PathError::NoSubpaths)));
}

#[test]
fn test_extrude_misordered_hole_fails_precondition() {
    let square = |x: f64, y: f64, s: f64| -> Vec<f64> {
        [
            (x, y),
            (x + s / 2.0, y),
            (x + s, y),
            (x + s, y + s),
            (x, y + s),
            (x, y),
        ]
        .iter()
        .flat_map(|&(px, py)| [px, py, 0.0])
        .collect()
    };
    let mut points = square(0.0, 0.0, 4.0);
    points.extend(square(10.0, 0.0, 4.0));
    points.extend(square(1.0, 1.0, 1.0));

    let request = GeometryRequest::new(GeometryKind::Extrude)
        .with_param("points", ParamValue::Reals(points))
        .with_param("path_indices", ParamValue::Integers(vec![0, 6, 12]));
    let err = handle(request).unwrap_err();
    assert_eq!(err.status().code, StatusCode::FailedPrecondition);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_unknown_parameter() {
    let err = handle(
        GeometryRequest::new(GeometryKind::Circle).with_param("radius_top", ParamValue::Real(2.0)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Param(ParamError::Unknown { ref name }) if name == "radius_top"
    ));
    assert_eq!(err.status().code, StatusCode::InvalidArgument);
}

#[test]
fn test_type_mismatch() {
    let err = handle(
        GeometryRequest::new(GeometryKind::Box).with_param("width", ParamValue::Boolean(true)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Param(ParamError::TypeMismatch { name: "width", .. })
    ));
}

#[test]
fn test_negative_count_rejected() {
    let err = handle(
        GeometryRequest::new(GeometryKind::Plane)
            .with_param("width_segments", ParamValue::Integer(-2)),
    )
    .unwrap_err();
    assert_eq!(err.status().code, StatusCode::InvalidArgument);
}

#[test]
fn test_oversized_count_rejected() {
    let err = handle(
        GeometryRequest::new(GeometryKind::Plane)
            .with_param("width_segments", ParamValue::Integer(1_000_000)),
    )
    .unwrap_err();
    assert!(matches!(err, ServiceError::Mesh(_)));
    assert_eq!(err.status().code, StatusCode::InvalidArgument);
}

#[test]
fn test_infinite_radius_rejected() {
    let err = handle(
        GeometryRequest::new(GeometryKind::Sphere)
            .with_param("radius", ParamValue::Real(f64::INFINITY)),
    )
    .unwrap_err();
    assert_eq!(err.status().code, StatusCode::InvalidArgument);
}
