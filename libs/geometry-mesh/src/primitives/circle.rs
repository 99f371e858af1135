//! # Circle Primitive
//!
//! Flat disc (or sector) in the XY plane, facing +Z.

use config::constants::{DEFAULT_CIRCLE_RADIUS, DEFAULT_CIRCLE_SEGMENTS, FULL_TURN, MIN_CIRCLE_SEGMENTS};
use glam::{DVec2, DVec3};

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_circle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub radius: f64,
    /// Rim segments, raised to at least 3
    pub segments: u32,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CIRCLE_RADIUS,
            segments: DEFAULT_CIRCLE_SEGMENTS as u32,
            theta_start: 0.0,
            theta_length: FULL_TURN,
        }
    }
}

/// Creates a circle mesh as a triangle fan around a center vertex.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_circle, CircleParams};
///
/// let mesh = create_circle(&CircleParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 1 + 9);
/// assert_eq!(mesh.triangle_count(), 8);
/// ```
pub fn create_circle(params: &CircleParams) -> Result<Mesh, MeshError> {
    check_finite("radius", params.radius)?;
    check_finite("theta_start", params.theta_start)?;
    check_finite("theta_length", params.theta_length)?;
    check_segments("segments", params.segments)?;

    let segments = params.segments.max(MIN_CIRCLE_SEGMENTS);
    let radius = params.radius;

    let mut mesh = Mesh::with_capacity(segments as usize + 2);
    mesh.push_vertex(DVec3::ZERO, DVec3::Z, DVec2::splat(0.5));

    for s in 0..=segments {
        let angle = params.theta_start + f64::from(s) / f64::from(segments) * params.theta_length;
        let position = DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);
        let uv = DVec2::new(
            (position.x / radius + 1.0) / 2.0,
            (position.y / radius + 1.0) / 2.0,
        );
        mesh.push_vertex(position, DVec3::Z, uv);
    }

    for i in 1..=segments {
        mesh.push_triangle(i, i + 1, 0);
    }

    mesh.check_limits()?;
    Ok(mesh)
}
