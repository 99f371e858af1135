//! World-space UV generation for extruded geometry.

use glam::{DVec2, DVec3};

/// UV of a cap vertex: its XY position.
#[inline]
pub(super) fn top_uv(p: DVec3) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// UVs of a side-wall quad `a, b, c, d`.
///
/// U follows whichever of X or Y changes more along the `a-b` edge; V is
/// `1 - z`.
pub(super) fn side_wall_uvs(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> [DVec2; 4] {
    if (a.y - b.y).abs() < (a.x - b.x).abs() {
        [a, b, c, d].map(|p| DVec2::new(p.x, 1.0 - p.z))
    } else {
        [a, b, c, d].map(|p| DVec2::new(p.y, 1.0 - p.z))
    }
}
