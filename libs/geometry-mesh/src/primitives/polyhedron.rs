//! # Polyhedron Primitives
//!
//! Regular polyhedra projected onto a sphere, with optional subdivision.
//!
//! ## Algorithm
//!
//! 1. Split every base face into a `(detail + 1)^2` triangle grid
//! 2. Push each grid vertex onto the sphere of the requested radius
//! 3. Derive UVs from azimuth and inclination, then patch the UV seam and
//!    the poles
//!
//! Output is non-indexed. Without subdivision the normals are flat; with
//! subdivision they point away from the center.

use config::constants::{DEFAULT_POLYHEDRON_DETAIL, DEFAULT_POLYHEDRON_RADIUS, MAX_POLYHEDRON_DETAIL};
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

use super::check_finite;
use crate::error::MeshError;
use crate::mesh::Mesh;

/// Parameters shared by [`create_icosahedron`] and [`create_tetrahedron`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyhedronParams {
    pub radius: f64,
    /// Subdivision level; 0 keeps the base faces
    pub detail: u32,
}

impl Default for PolyhedronParams {
    fn default() -> Self {
        Self {
            radius: DEFAULT_POLYHEDRON_RADIUS,
            detail: DEFAULT_POLYHEDRON_DETAIL as u32,
        }
    }
}

const ICOSAHEDRON_INDICES: [usize; 60] = [
    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1,
    8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
];

const TETRAHEDRON_VERTICES: [[f64; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];

const TETRAHEDRON_INDICES: [usize; 12] = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];

/// Creates an icosahedron mesh (20 base faces).
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_icosahedron, PolyhedronParams};
///
/// let mesh = create_icosahedron(&PolyhedronParams::default()).unwrap();
/// assert_eq!(mesh.vertex_count(), 60);
/// assert!(!mesh.is_indexed());
/// ```
pub fn create_icosahedron(params: &PolyhedronParams) -> Result<Mesh, MeshError> {
    let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];
    create_polyhedron(&vertices, &ICOSAHEDRON_INDICES, params)
}

/// Creates a tetrahedron mesh (4 base faces).
pub fn create_tetrahedron(params: &PolyhedronParams) -> Result<Mesh, MeshError> {
    create_polyhedron(&TETRAHEDRON_VERTICES, &TETRAHEDRON_INDICES, params)
}

/// Builds a spherical polyhedron from base vertices and triangle indices.
fn create_polyhedron(
    vertices: &[[f64; 3]],
    indices: &[usize],
    params: &PolyhedronParams,
) -> Result<Mesh, MeshError> {
    check_finite("radius", params.radius)?;
    if params.detail > MAX_POLYHEDRON_DETAIL {
        return Err(MeshError::invalid_parameter(
            "detail",
            format!("must be at most {}, got {}", MAX_POLYHEDRON_DETAIL, params.detail),
        ));
    }

    let mut points: Vec<DVec3> = Vec::new();
    for face in indices.chunks_exact(3) {
        let a = DVec3::from_array(vertices[face[0]]);
        let b = DVec3::from_array(vertices[face[1]]);
        let c = DVec3::from_array(vertices[face[2]]);
        subdivide_face(&mut points, a, b, c, params.detail);
    }

    for point in &mut points {
        *point = point.try_normalize().unwrap_or(DVec3::ZERO) * params.radius;
    }

    let uvs = generate_uvs(&points);

    let mut mesh = Mesh::with_capacity(points.len());
    for (point, uv) in points.iter().zip(&uvs) {
        mesh.push_position(*point);
        mesh.push_uv(*uv);
    }

    if params.detail == 0 {
        mesh.compute_vertex_normals();
    } else {
        mesh.normals_from_positions();
    }

    mesh.check_limits()?;
    Ok(mesh)
}

/// Emits the triangles of a subdivided face, three vertices each.
fn subdivide_face(out: &mut Vec<DVec3>, a: DVec3, b: DVec3, c: DVec3, detail: u32) {
    let cols = detail as usize + 1;

    // v[i][j]: row i from edge ab towards c, j across the row
    let mut v: Vec<Vec<DVec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f64 / cols as f64;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;

        let row = (0..=rows)
            .map(|j| {
                if j == 0 && i == cols {
                    aj
                } else {
                    aj.lerp(bj, j as f64 / rows as f64)
                }
            })
            .collect();
        v.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[v[i][k + 1], v[i + 1][k], v[i][k]]);
            } else {
                out.extend_from_slice(&[v[i][k + 1], v[i + 1][k + 1], v[i + 1][k]]);
            }
        }
    }
}

fn generate_uvs(points: &[DVec3]) -> Vec<DVec2> {
    let mut uvs: Vec<DVec2> = points
        .iter()
        .map(|p| {
            let u = azimuth(*p) / 2.0 / PI + 0.5;
            let v = inclination(*p) / PI + 0.5;
            DVec2::new(u, 1.0 - v)
        })
        .collect();

    correct_uvs(points, &mut uvs);
    correct_seam(&mut uvs);
    uvs
}

/// Fixes U at the wrap-around and at the poles, per triangle.
fn correct_uvs(points: &[DVec3], uvs: &mut [DVec2]) {
    for (tri, tri_uvs) in points.chunks_exact(3).zip(uvs.chunks_exact_mut(3)) {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let azi = azimuth(centroid);

        for (point, uv) in tri.iter().zip(tri_uvs.iter_mut()) {
            if azi < 0.0 && uv.x == 1.0 {
                uv.x -= 1.0;
            }
            if point.x == 0.0 && point.z == 0.0 {
                uv.x = azi / 2.0 / PI + 0.5;
            }
        }
    }
}

/// Shifts triangles straddling the U seam so they do not span the texture.
fn correct_seam(uvs: &mut [DVec2]) {
    for tri in uvs.chunks_exact_mut(3) {
        let max = tri[0].x.max(tri[1].x).max(tri[2].x);
        let min = tri[0].x.min(tri[1].x).min(tri[2].x);

        if max > 0.9 && min < 0.1 {
            for uv in tri.iter_mut() {
                if uv.x < 0.2 {
                    uv.x += 1.0;
                }
            }
        }
    }
}

#[inline]
fn azimuth(v: DVec3) -> f64 {
    v.z.atan2(-v.x)
}

#[inline]
fn inclination(v: DVec3) -> f64 {
    (-v.y).atan2((v.x * v.x + v.z * v.z).sqrt())
}
