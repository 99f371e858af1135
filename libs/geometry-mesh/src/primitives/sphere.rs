//! # Sphere Primitive
//!
//! UV sphere built from a latitude/longitude grid. Supports partial
//! spheres through the phi (horizontal) and theta (vertical) sweeps.

use config::constants::{
    DEFAULT_SPHERE_HEIGHT_SEGMENTS, DEFAULT_SPHERE_RADIUS, DEFAULT_SPHERE_WIDTH_SEGMENTS,
    FULL_TURN, HALF_TURN, MIN_SPHERE_HEIGHT_SEGMENTS, MIN_SPHERE_WIDTH_SEGMENTS,
};
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_sphere`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f64,
    /// Longitude segments, raised to at least 3
    pub width_segments: u32,
    /// Latitude segments, raised to at least 2
    pub height_segments: u32,
    pub phi_start: f64,
    pub phi_length: f64,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_SPHERE_RADIUS,
            width_segments: DEFAULT_SPHERE_WIDTH_SEGMENTS as u32,
            height_segments: DEFAULT_SPHERE_HEIGHT_SEGMENTS as u32,
            phi_start: 0.0,
            phi_length: FULL_TURN,
            theta_start: 0.0,
            theta_length: HALF_TURN,
        }
    }
}

/// Creates a sphere mesh.
///
/// # Algorithm
///
/// - One vertex row per latitude step, each row closing the seam with a
///   duplicated vertex so UVs stay continuous
/// - Pole rows get their U shifted by half a segment
/// - Triangles touching a closed pole are skipped, leaving a fan
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_sphere, SphereParams};
///
/// let mesh = create_sphere(&SphereParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 9 * 7);
/// ```
pub fn create_sphere(params: &SphereParams) -> Result<Mesh, MeshError> {
    check_finite("radius", params.radius)?;
    check_finite("phi_start", params.phi_start)?;
    check_finite("phi_length", params.phi_length)?;
    check_finite("theta_start", params.theta_start)?;
    check_finite("theta_length", params.theta_length)?;
    check_segments("width_segments", params.width_segments)?;
    check_segments("height_segments", params.height_segments)?;

    let width_segments = params.width_segments.max(MIN_SPHERE_WIDTH_SEGMENTS);
    let height_segments = params.height_segments.max(MIN_SPHERE_HEIGHT_SEGMENTS);
    let radius = params.radius;
    let theta_start = params.theta_start;
    let theta_end = (theta_start + params.theta_length).min(PI);

    let mut mesh = Mesh::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = f64::from(iy) / f64::from(height_segments);

        let u_offset = if iy == 0 && theta_start == 0.0 {
            0.5 / f64::from(width_segments)
        } else if iy == height_segments && theta_end == PI {
            -0.5 / f64::from(width_segments)
        } else {
            0.0
        };

        let theta = theta_start + v * params.theta_length;
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = f64::from(ix) / f64::from(width_segments);
            let phi = params.phi_start + u * params.phi_length;

            let position = DVec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            let normal = position.try_normalize().unwrap_or(DVec3::ZERO);

            row.push(mesh.push_vertex(position, normal, DVec2::new(u + u_offset, 1.0 - v)));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];

            if iy != 0 || theta_start > 0.0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                mesh.push_triangle(b, c, d);
            }
        }
    }

    mesh.check_limits()?;
    Ok(mesh)
}
