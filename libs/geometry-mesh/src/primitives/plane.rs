//! # Plane Primitive
//!
//! Subdivided rectangle in the XY plane, centered on the origin.

use config::constants::{DEFAULT_PLANE_SEGMENTS, DEFAULT_PLANE_SIZE};
use glam::{DVec2, DVec3};

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_plane`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneParams {
    pub width: f64,
    pub height: f64,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLANE_SIZE,
            height: DEFAULT_PLANE_SIZE,
            width_segments: DEFAULT_PLANE_SEGMENTS as u32,
            height_segments: DEFAULT_PLANE_SEGMENTS as u32,
        }
    }
}

/// Creates a plane mesh. Rows run from +Y down to -Y.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_plane, PlaneParams};
///
/// let mesh = create_plane(&PlaneParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
pub fn create_plane(params: &PlaneParams) -> Result<Mesh, MeshError> {
    check_finite("width", params.width)?;
    check_finite("height", params.height)?;
    check_segments("width_segments", params.width_segments)?;
    check_segments("height_segments", params.height_segments)?;

    let grid_x = params.width_segments;
    let grid_y = params.height_segments;
    let grid_x1 = grid_x + 1;
    let segment_width = params.width / f64::from(grid_x);
    let segment_height = params.height / f64::from(grid_y);
    let half_width = params.width / 2.0;
    let half_height = params.height / 2.0;

    let mut mesh = Mesh::with_capacity(((grid_x + 1) * (grid_y + 1)) as usize);

    for iy in 0..=grid_y {
        let y = f64::from(iy) * segment_height - half_height;
        for ix in 0..=grid_x {
            let x = f64::from(ix) * segment_width - half_width;
            mesh.push_vertex(
                DVec3::new(x, -y, 0.0),
                DVec3::Z,
                DVec2::new(
                    f64::from(ix) / f64::from(grid_x),
                    1.0 - f64::from(iy) / f64::from(grid_y),
                ),
            );
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh.check_limits()?;
    Ok(mesh)
}
