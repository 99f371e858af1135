//! # Mesh Data Structure
//!
//! Flat attribute buffers (position, normal, uv, optional index) in the
//! layout the wire response uses.

use config::constants::MAX_VERTICES;
use glam::{DVec2, DVec3};

use crate::error::MeshError;

/// A triangle mesh stored as flat attribute buffers.
///
/// Builders compute in f64 and store f32, matching what a GPU-facing
/// toolkit keeps in its typed arrays. A mesh is either indexed (triangles
/// reference vertices through `indices`) or non-indexed (every three
/// consecutive vertices form a triangle).
///
/// # Example
///
/// ```rust
/// use geometry_mesh::Mesh;
/// use glam::{DVec2, DVec3};
///
/// let mut mesh = Mesh::new();
/// let a = mesh.push_vertex(DVec3::ZERO, DVec3::Z, DVec2::ZERO);
/// let b = mesh.push_vertex(DVec3::X, DVec3::Z, DVec2::X);
/// let c = mesh.push_vertex(DVec3::Y, DVec3::Z, DVec2::Y);
/// mesh.push_triangle(a, b, c);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions: [x0, y0, z0, x1, y1, z1, ...]
    positions: Vec<f32>,
    /// Vertex normals, same layout as positions
    normals: Option<Vec<f32>>,
    /// Texture coordinates: [u0, v0, u1, v1, ...]
    uvs: Option<Vec<f32>>,
    /// Triangle indices, absent for non-indexed meshes
    indices: Option<Vec<u32>>,
}

/// Owned attribute buffers of a mesh, handed to the response serializer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub position: Vec<f32>,
    pub normal: Option<Vec<f32>>,
    pub uv: Option<Vec<f32>>,
    pub index: Option<Vec<u32>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `vertex_count` vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: None,
            uvs: None,
            indices: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true if triangles are described by an index buffer.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Adds a vertex with normal and uv, returning its index.
    pub fn push_vertex(&mut self, position: DVec3, normal: DVec3, uv: DVec2) -> u32 {
        let index = self.push_position(position);
        push_vec3(self.normals.get_or_insert_with(Vec::new), normal);
        self.push_uv(uv);
        index
    }

    /// Adds a bare position, returning its index.
    ///
    /// Used by non-indexed builders that compute normals afterwards.
    pub fn push_position(&mut self, position: DVec3) -> u32 {
        let index = self.vertex_count() as u32;
        push_vec3(&mut self.positions, position);
        index
    }

    /// Adds a texture coordinate for the most recently added vertex.
    pub fn push_uv(&mut self, uv: DVec2) {
        let uvs = self.uvs.get_or_insert_with(Vec::new);
        uvs.push(uv.x as f32);
        uvs.push(uv.y as f32);
    }

    /// Adds a triangle by vertex indices, making the mesh indexed.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices
            .get_or_insert_with(Vec::new)
            .extend_from_slice(&[a, b, c]);
    }

    /// Returns the position of the vertex at `index`.
    #[inline]
    pub fn position(&self, index: usize) -> DVec3 {
        read_vec3(&self.positions, index)
    }

    /// Returns the flat position buffer.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Returns the flat normal buffer, if present.
    pub fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    /// Returns the flat uv buffer, if present.
    pub fn uvs(&self) -> Option<&[f32]> {
        self.uvs.as_deref()
    }

    /// Returns the index buffer, if present.
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Replaces the uv buffer.
    pub fn set_uvs(&mut self, uvs: Vec<f32>) {
        self.uvs = Some(uvs);
    }

    /// Computes per-vertex normals from the triangles.
    ///
    /// Indexed meshes accumulate the face normal of every triangle sharing a
    /// vertex. Non-indexed meshes get flat normals. Normals are normalized.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![0.0_f32; self.positions.len()];

        match &self.indices {
            Some(indices) => {
                for tri in indices.chunks_exact(3) {
                    let face = self.face_normal(tri[0] as usize, tri[1] as usize, tri[2] as usize);
                    for &vertex in tri {
                        let current = read_vec3(&normals, vertex as usize);
                        write_vec3(&mut normals, vertex as usize, current + face);
                    }
                }
            }
            None => {
                for first in (0..self.vertex_count() / 3).map(|t| t * 3) {
                    let face = self.face_normal(first, first + 1, first + 2);
                    for vertex in first..first + 3 {
                        write_vec3(&mut normals, vertex, face);
                    }
                }
            }
        }

        self.normals = Some(normals);
        self.normalize_normals();
    }

    /// Rescales every normal to unit length. Zero normals stay zero.
    pub fn normalize_normals(&mut self) {
        if let Some(normals) = &mut self.normals {
            for n in normals.chunks_exact_mut(3) {
                let v = DVec3::new(n[0] as f64, n[1] as f64, n[2] as f64);
                let len = v.length();
                let v = if len > 0.0 { v / len } else { v };
                n[0] = v.x as f32;
                n[1] = v.y as f32;
                n[2] = v.z as f32;
            }
        }
    }

    /// Uses the normalized vertex positions as normals.
    ///
    /// Correct for meshes whose vertices lie on a sphere around the origin.
    pub fn normals_from_positions(&mut self) {
        self.normals = Some(self.positions.clone());
        self.normalize_normals();
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.position(0);
        let mut max = min;
        for i in 1..self.vertex_count() {
            let v = self.position(i);
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Rejects meshes above the vertex safety limit.
    pub fn check_limits(&self) -> Result<(), MeshError> {
        let count = self.vertex_count();
        if count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }
        Ok(())
    }

    /// Consumes the mesh and returns its buffers.
    pub fn into_buffers(self) -> MeshBuffers {
        MeshBuffers {
            position: self.positions,
            normal: self.normals,
            uv: self.uvs,
            index: self.indices,
        }
    }

    /// Face normal as `(c - b) x (a - b)`, unnormalized.
    fn face_normal(&self, a: usize, b: usize, c: usize) -> DVec3 {
        let pa = self.position(a);
        let pb = self.position(b);
        let pc = self.position(c);
        (pc - pb).cross(pa - pb)
    }
}

#[inline]
fn push_vec3(buffer: &mut Vec<f32>, v: DVec3) {
    buffer.extend_from_slice(&[v.x as f32, v.y as f32, v.z as f32]);
}

#[inline]
fn read_vec3(buffer: &[f32], index: usize) -> DVec3 {
    let i = index * 3;
    DVec3::new(buffer[i] as f64, buffer[i + 1] as f64, buffer[i + 2] as f64)
}

#[inline]
fn write_vec3(buffer: &mut [f32], index: usize, v: DVec3) {
    let i = index * 3;
    buffer[i] = v.x as f32;
    buffer[i + 1] = v.y as f32;
    buffer[i + 2] = v.z as f32;
}
