//! # Wireframe Edges
//!
//! Derives the unique edge set of a triangle mesh as a line-segment
//! position buffer.

use std::collections::HashSet;

use crate::mesh::Mesh;

type EdgeKey = ([u32; 3], [u32; 3]);

/// Returns the unique edges of `mesh` as a flat position buffer.
///
/// Every edge contributes its two endpoints (six floats). Edges are
/// deduplicated by endpoint positions in either direction, so an edge shared
/// by two triangles, or repeated by a non-indexed mesh, is emitted once.
/// Indexed meshes walk the index buffer; non-indexed meshes take every three
/// consecutive vertices as one triangle.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::{primitives::{create_plane, PlaneParams}, wireframe_positions};
///
/// // A single quad: 4 outline edges plus the shared diagonal.
/// let mesh = create_plane(&PlaneParams::default()).unwrap();
/// assert_eq!(wireframe_positions(&mesh).len(), 5 * 6);
/// ```
pub fn wireframe_positions(mesh: &Mesh) -> Vec<f32> {
    let positions = mesh.positions();
    let mut seen: HashSet<EdgeKey> = HashSet::new();
    let mut out = Vec::new();

    let mut visit_triangle = |tri: [usize; 3]| {
        for j in 0..3 {
            let start = vertex_key(positions, tri[j]);
            let end = vertex_key(positions, tri[(j + 1) % 3]);
            if seen.contains(&(start, end)) || seen.contains(&(end, start)) {
                continue;
            }
            seen.insert((start, end));
            seen.insert((end, start));
            push_vertex(&mut out, positions, tri[j]);
            push_vertex(&mut out, positions, tri[(j + 1) % 3]);
        }
    };

    match mesh.indices() {
        Some(indices) => {
            for tri in indices.chunks_exact(3) {
                visit_triangle([tri[0] as usize, tri[1] as usize, tri[2] as usize]);
            }
        }
        None => {
            for first in (0..mesh.vertex_count() / 3).map(|t| t * 3) {
                visit_triangle([first, first + 1, first + 2]);
            }
        }
    }

    out
}

/// Bit pattern of a vertex, with negative zero folded onto zero.
fn vertex_key(positions: &[f32], index: usize) -> [u32; 3] {
    let i = index * 3;
    [
        canonical_bits(positions[i]),
        canonical_bits(positions[i + 1]),
        canonical_bits(positions[i + 2]),
    ]
}

#[inline]
fn canonical_bits(value: f32) -> u32 {
    if value == 0.0 {
        0.0_f32.to_bits()
    } else {
        value.to_bits()
    }
}

#[inline]
fn push_vertex(out: &mut Vec<f32>, positions: &[f32], index: usize) {
    let i = index * 3;
    out.extend_from_slice(&positions[i..i + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_single_triangle_has_three_edges() {
        let mut mesh = Mesh::new();
        mesh.push_position(DVec3::ZERO);
        mesh.push_position(DVec3::X);
        mesh.push_position(DVec3::Y);
        let lines = wireframe_positions(&mesh);
        assert_eq!(lines.len(), 3 * 6);
    }

    #[test]
    fn test_shared_edge_emitted_once() {
        let mut mesh = Mesh::new();
        mesh.push_position(DVec3::ZERO);
        mesh.push_position(DVec3::X);
        mesh.push_position(DVec3::new(1.0, 1.0, 0.0));
        mesh.push_position(DVec3::Y);
        mesh.push_triangle(0, 1, 2);
        mesh.push_triangle(0, 2, 3);
        assert_eq!(wireframe_positions(&mesh).len(), 5 * 6);
    }

    #[test]
    fn test_duplicate_positions_dedupe_non_indexed() {
        // Same quad as above, but with the diagonal endpoints duplicated.
        let mut mesh = Mesh::new();
        for p in [
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::ZERO,
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::Y,
        ] {
            mesh.push_position(p);
        }
        assert_eq!(wireframe_positions(&mesh).len(), 5 * 6);
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let mut mesh = Mesh::new();
        mesh.push_position(DVec3::ZERO);
        mesh.push_position(DVec3::X);
        mesh.push_position(DVec3::Y);
        mesh.push_position(DVec3::new(-0.0, 0.0, -0.0));
        mesh.push_position(DVec3::Y);
        mesh.push_position(DVec3::NEG_X);
        // Edge (0,0,0)-(0,1,0) appears in both triangles.
        assert_eq!(wireframe_positions(&mesh).len(), 5 * 6);
    }

    #[test]
    fn test_empty_mesh() {
        assert!(wireframe_positions(&Mesh::new()).is_empty());
    }
}
