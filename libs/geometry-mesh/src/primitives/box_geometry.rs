//! # Box Primitive
//!
//! Axis-aligned box centered at the origin, built from six subdivided
//! planes. Faces do not share vertices, so each face keeps its own normal
//! and UV square.

use config::constants::{DEFAULT_BOX_SEGMENTS, DEFAULT_BOX_SIZE};
use glam::{DVec2, DVec3};

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_box`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    /// Size along X
    pub width: f64,
    /// Size along Y
    pub height: f64,
    /// Size along Z
    pub depth: f64,
    pub width_segments: u32,
    pub height_segments: u32,
    pub depth_segments: u32,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOX_SIZE,
            height: DEFAULT_BOX_SIZE,
            depth: DEFAULT_BOX_SIZE,
            width_segments: DEFAULT_BOX_SEGMENTS as u32,
            height_segments: DEFAULT_BOX_SEGMENTS as u32,
            depth_segments: DEFAULT_BOX_SEGMENTS as u32,
        }
    }
}

/// Creates a box mesh.
///
/// # Arguments
///
/// * `params` - Box dimensions and subdivisions
///
/// # Returns
///
/// An indexed mesh with `(ws+1)(hs+1)` style vertex grids per face.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_box, BoxParams};
///
/// let mesh = create_box(&BoxParams { width: 2.0, ..Default::default() }).unwrap();
/// let (min, max) = mesh.bounding_box();
/// assert_eq!(max.x - min.x, 2.0);
/// ```
pub fn create_box(params: &BoxParams) -> Result<Mesh, MeshError> {
    check_finite("width", params.width)?;
    check_finite("height", params.height)?;
    check_finite("depth", params.depth)?;
    check_segments("width_segments", params.width_segments)?;
    check_segments("height_segments", params.height_segments)?;
    check_segments("depth_segments", params.depth_segments)?;

    let BoxParams {
        width,
        height,
        depth,
        width_segments: ws,
        height_segments: hs,
        depth_segments: ds,
    } = *params;

    let mut mesh = Mesh::new();

    // (u, v, w) axis selection: 0 = x, 1 = y, 2 = z
    build_plane(&mut mesh, [2, 1, 0], -1.0, -1.0, [depth, height, width], ds, hs); // px
    build_plane(&mut mesh, [2, 1, 0], 1.0, -1.0, [depth, height, -width], ds, hs); // nx
    build_plane(&mut mesh, [0, 2, 1], 1.0, 1.0, [width, depth, height], ws, ds); // py
    build_plane(&mut mesh, [0, 2, 1], 1.0, -1.0, [width, depth, -height], ws, ds); // ny
    build_plane(&mut mesh, [0, 1, 2], 1.0, -1.0, [width, height, depth], ws, hs); // pz
    build_plane(&mut mesh, [0, 1, 2], -1.0, -1.0, [width, height, -depth], ws, hs); // nz

    mesh.check_limits()?;
    Ok(mesh)
}

/// Adds one subdivided face.
///
/// `size` is (extent along u, extent along v, signed offset along w).
fn build_plane(
    mesh: &mut Mesh,
    axes: [usize; 3],
    u_dir: f64,
    v_dir: f64,
    size: [f64; 3],
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let [width, height, depth] = size;
    let segment_width = width / f64::from(grid_x);
    let segment_height = height / f64::from(grid_y);
    let half_width = width / 2.0;
    let half_height = height / 2.0;
    let half_depth = depth / 2.0;
    let grid_x1 = grid_x + 1;
    let offset = mesh.vertex_count() as u32;

    for iy in 0..=grid_y {
        let y = f64::from(iy) * segment_height - half_height;
        for ix in 0..=grid_x {
            let x = f64::from(ix) * segment_width - half_width;

            let mut position = [0.0; 3];
            position[u] = x * u_dir;
            position[v] = y * v_dir;
            position[w] = half_depth;

            let mut normal = [0.0; 3];
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            mesh.push_vertex(
                DVec3::from_array(position),
                DVec3::from_array(normal),
                DVec2::new(
                    f64::from(ix) / f64::from(grid_x),
                    1.0 - f64::from(iy) / f64::from(grid_y),
                ),
            );
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = offset + ix + grid_x1 * iy;
            let b = offset + ix + grid_x1 * (iy + 1);
            let c = offset + (ix + 1) + grid_x1 * (iy + 1);
            let d = offset + (ix + 1) + grid_x1 * iy;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }
}
