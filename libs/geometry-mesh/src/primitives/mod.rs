//! # Primitives
//!
//! Mesh builders for the parametric primitives. Each builder takes a
//! parameter struct whose `Default` carries the service defaults.
//!
//! Builders reject non-finite numbers and segment counts outside
//! `1..=MAX_SEGMENTS`. Sizes may be zero or negative; the resulting mesh
//! is then degenerate or mirrored but still well formed.

pub mod box_geometry;
pub mod circle;
pub mod cylinder;
pub mod plane;
pub mod polyhedron;
pub mod sphere;
pub mod torus_knot;

pub use box_geometry::{create_box, BoxParams};
pub use circle::{create_circle, CircleParams};
pub use cylinder::{create_cone, create_cylinder, ConeParams, CylinderParams};
pub use plane::{create_plane, PlaneParams};
pub use polyhedron::{create_icosahedron, create_tetrahedron, PolyhedronParams};
pub use sphere::{create_sphere, SphereParams};
pub use torus_knot::{create_torus_knot, TorusKnotParams};

use config::constants::MAX_SEGMENTS;

use crate::error::MeshError;

/// Rejects NaN and infinite values.
pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), MeshError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

/// Rejects segment counts of zero or above `MAX_SEGMENTS`.
pub(crate) fn check_segments(name: &'static str, value: u32) -> Result<(), MeshError> {
    if value == 0 {
        return Err(MeshError::invalid_parameter(name, "must be at least 1"));
    }
    if value > MAX_SEGMENTS {
        return Err(MeshError::invalid_parameter(
            name,
            format!("must be at most {}, got {}", MAX_SEGMENTS, value),
        ));
    }
    Ok(())
}
