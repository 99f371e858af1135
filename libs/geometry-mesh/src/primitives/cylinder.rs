//! # Cylinder and Cone Primitives
//!
//! Cylinders centered on the origin along Y, with independent top and
//! bottom radii. A cone is a cylinder whose top radius is zero.

use config::constants::{
    DEFAULT_CYLINDER_HEIGHT, DEFAULT_CYLINDER_HEIGHT_SEGMENTS, DEFAULT_CYLINDER_RADIAL_SEGMENTS,
    DEFAULT_CYLINDER_RADIUS, FULL_TURN,
};
use glam::{DVec2, DVec3};

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_cylinder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius_top: f64,
    pub radius_bottom: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub height_segments: u32,
    /// Skip both caps
    pub open_ended: bool,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self {
            radius_top: DEFAULT_CYLINDER_RADIUS,
            radius_bottom: DEFAULT_CYLINDER_RADIUS,
            height: DEFAULT_CYLINDER_HEIGHT,
            radial_segments: DEFAULT_CYLINDER_RADIAL_SEGMENTS as u32,
            height_segments: DEFAULT_CYLINDER_HEIGHT_SEGMENTS as u32,
            open_ended: false,
            theta_start: 0.0,
            theta_length: FULL_TURN,
        }
    }
}

/// Parameters for [`create_cone`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    /// Base radius
    pub radius: f64,
    pub height: f64,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f64,
    pub theta_length: f64,
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CYLINDER_RADIUS,
            height: DEFAULT_CYLINDER_HEIGHT,
            radial_segments: DEFAULT_CYLINDER_RADIAL_SEGMENTS as u32,
            height_segments: DEFAULT_CYLINDER_HEIGHT_SEGMENTS as u32,
            open_ended: false,
            theta_start: 0.0,
            theta_length: FULL_TURN,
        }
    }
}

impl From<ConeParams> for CylinderParams {
    fn from(cone: ConeParams) -> Self {
        Self {
            radius_top: 0.0,
            radius_bottom: cone.radius,
            height: cone.height,
            radial_segments: cone.radial_segments,
            height_segments: cone.height_segments,
            open_ended: cone.open_ended,
            theta_start: cone.theta_start,
            theta_length: cone.theta_length,
        }
    }
}

/// Creates a cylinder mesh.
///
/// The torso comes first, followed by the top cap and the bottom cap. A cap
/// is only generated when its radius is positive and the cylinder is not
/// open ended.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_cylinder, CylinderParams};
///
/// let mesh = create_cylinder(&CylinderParams::default()).unwrap();
/// // torso 9 * 2, each cap 8 centers + 9 rim vertices
/// assert_eq!(mesh.vertex_count(), 18 + 2 * 17);
/// ```
pub fn create_cylinder(params: &CylinderParams) -> Result<Mesh, MeshError> {
    check_finite("radius_top", params.radius_top)?;
    check_finite("radius_bottom", params.radius_bottom)?;
    check_finite("height", params.height)?;
    check_finite("theta_start", params.theta_start)?;
    check_finite("theta_length", params.theta_length)?;
    check_segments("radial_segments", params.radial_segments)?;
    check_segments("height_segments", params.height_segments)?;

    let mut mesh = Mesh::new();
    generate_torso(&mut mesh, params);

    if !params.open_ended {
        if params.radius_top > 0.0 {
            generate_cap(&mut mesh, params, true);
        }
        if params.radius_bottom > 0.0 {
            generate_cap(&mut mesh, params, false);
        }
    }

    mesh.check_limits()?;
    Ok(mesh)
}

/// Creates a cone mesh: a cylinder with a zero top radius.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_cone, ConeParams};
///
/// let mesh = create_cone(&ConeParams::default()).unwrap();
/// let (_, max) = mesh.bounding_box();
/// assert_eq!(max.y, 0.5);
/// ```
pub fn create_cone(params: &ConeParams) -> Result<Mesh, MeshError> {
    create_cylinder(&CylinderParams::from(*params))
}

fn generate_torso(mesh: &mut Mesh, params: &CylinderParams) {
    let radial = params.radial_segments;
    let rows = params.height_segments;
    let half_height = params.height / 2.0;
    let slope = (params.radius_bottom - params.radius_top) / params.height;

    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows as usize + 1);
    for y in 0..=rows {
        let v = f64::from(y) / f64::from(rows);
        let radius = v * (params.radius_bottom - params.radius_top) + params.radius_top;

        let mut row = Vec::with_capacity(radial as usize + 1);
        for x in 0..=radial {
            let u = f64::from(x) / f64::from(radial);
            let theta = u * params.theta_length + params.theta_start;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let position = DVec3::new(
                radius * sin_theta,
                -v * params.height + half_height,
                radius * cos_theta,
            );
            let normal = DVec3::new(sin_theta, slope, cos_theta)
                .try_normalize()
                .unwrap_or(DVec3::ZERO);

            row.push(mesh.push_vertex(position, normal, DVec2::new(u, 1.0 - v)));
        }
        grid.push(row);
    }

    for x in 0..radial as usize {
        for y in 0..rows as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];

            if params.radius_top > 0.0 || y != 0 {
                mesh.push_triangle(a, b, d);
            }
            if params.radius_bottom > 0.0 || y != rows as usize - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
}

fn generate_cap(mesh: &mut Mesh, params: &CylinderParams, top: bool) {
    let radial = params.radial_segments;
    let (radius, sign) = if top {
        (params.radius_top, 1.0)
    } else {
        (params.radius_bottom, -1.0)
    };
    let y = params.height / 2.0 * sign;
    let normal = DVec3::new(0.0, sign, 0.0);

    // One center vertex per segment so each fan triangle has its own UV.
    let center_start = mesh.vertex_count() as u32;
    for _ in 0..radial {
        mesh.push_vertex(DVec3::new(0.0, y, 0.0), normal, DVec2::splat(0.5));
    }

    let rim_start = mesh.vertex_count() as u32;
    for x in 0..=radial {
        let u = f64::from(x) / f64::from(radial);
        let theta = u * params.theta_length + params.theta_start;
        let (sin_theta, cos_theta) = theta.sin_cos();

        mesh.push_vertex(
            DVec3::new(radius * sin_theta, y, radius * cos_theta),
            normal,
            DVec2::new(cos_theta * 0.5 + 0.5, sin_theta * 0.5 * sign + 0.5),
        );
    }

    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            mesh.push_triangle(i, i + 1, c);
        } else {
            mesh.push_triangle(i + 1, i, c);
        }
    }
}
