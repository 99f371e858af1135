//! # Torus Knot Primitive
//!
//! A tube swept along a (p, q) torus knot curve.

use config::constants::{
    DEFAULT_TORUS_KNOT_P, DEFAULT_TORUS_KNOT_Q, DEFAULT_TORUS_KNOT_RADIAL_SEGMENTS,
    DEFAULT_TORUS_KNOT_RADIUS, DEFAULT_TORUS_KNOT_TUBE, DEFAULT_TORUS_KNOT_TUBULAR_SEGMENTS,
    TORUS_KNOT_TANGENT_STEP,
};
use glam::{DVec2, DVec3};
use std::f64::consts::TAU;

use super::{check_finite, check_segments};
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters for [`create_torus_knot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusKnotParams {
    /// Radius of the underlying torus
    pub radius: f64,
    /// Radius of the tube
    pub tube: f64,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    /// Windings around the axis of rotational symmetry
    pub p: f64,
    /// Windings around the torus' interior circle
    pub q: f64,
}

impl Default for TorusKnotParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_TORUS_KNOT_RADIUS,
            tube: DEFAULT_TORUS_KNOT_TUBE,
            tubular_segments: DEFAULT_TORUS_KNOT_TUBULAR_SEGMENTS as u32,
            radial_segments: DEFAULT_TORUS_KNOT_RADIAL_SEGMENTS as u32,
            p: DEFAULT_TORUS_KNOT_P as f64,
            q: DEFAULT_TORUS_KNOT_Q as f64,
        }
    }
}

/// Creates a torus knot mesh.
///
/// For each step along the curve a local frame is derived from two nearby
/// curve points, and a ring of `radial_segments + 1` vertices is placed
/// around it.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_torus_knot, TorusKnotParams};
///
/// let mesh = create_torus_knot(&TorusKnotParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 65 * 9);
/// assert_eq!(mesh.triangle_count(), 64 * 8 * 2);
/// ```
pub fn create_torus_knot(params: &TorusKnotParams) -> Result<Mesh, MeshError> {
    check_finite("radius", params.radius)?;
    check_finite("tube", params.tube)?;
    check_finite("p", params.p)?;
    check_finite("q", params.q)?;
    check_segments("tubular_segments", params.tubular_segments)?;
    check_segments("radial_segments", params.radial_segments)?;
    if params.p == 0.0 {
        return Err(MeshError::invalid_parameter("p", "must not be zero"));
    }

    let TorusKnotParams {
        radius,
        tube,
        tubular_segments,
        radial_segments,
        p,
        q,
    } = *params;

    let mut mesh =
        Mesh::with_capacity(((tubular_segments + 1) * (radial_segments + 1)) as usize);

    for i in 0..=tubular_segments {
        let u = f64::from(i) / f64::from(tubular_segments) * p * TAU;

        let p1 = position_on_curve(u, p, q, radius);
        let p2 = position_on_curve(u + TORUS_KNOT_TANGENT_STEP, p, q, radius);

        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n);
        let n = b.cross(t);
        let b = b.try_normalize().unwrap_or(DVec3::ZERO);
        let n = n.try_normalize().unwrap_or(DVec3::ZERO);

        for j in 0..=radial_segments {
            let v = f64::from(j) / f64::from(radial_segments) * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + n * cx + b * cy;
            let normal = (position - p1).try_normalize().unwrap_or(DVec3::ZERO);
            let uv = DVec2::new(
                f64::from(i) / f64::from(tubular_segments),
                f64::from(j) / f64::from(radial_segments),
            );
            mesh.push_vertex(position, normal, uv);
        }
    }

    let stride = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh.check_limits()?;
    Ok(mesh)
}

/// Point on the knot curve at parameter `u`.
fn position_on_curve(u: f64, p: f64, q: f64, radius: f64) -> DVec3 {
    let cu = u.cos();
    let su = u.sin();
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();

    DVec3::new(
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}
