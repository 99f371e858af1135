//! # Response Serializer
//!
//! Flattens a constructed mesh into the buffers of a geometry response.

use geometry_mesh::{wireframe_positions, Mesh};

use crate::error::ServiceError;
use crate::protocol::GeometryResponse;

/// Converts a mesh into a response.
///
/// Wireframe responses carry the unique edge segments in `position` and
/// nothing else. Solid responses carry `position`, `normal` and `uv`
/// verbatim, plus `index` when the mesh is indexed.
///
/// # Errors
///
/// A solid mesh without normals or UVs yields
/// [`ServiceError::MissingAttribute`].
///
/// # Example
///
/// ```rust
/// use geometry_mesh::primitives::{create_plane, PlaneParams};
/// use geometry_service::serializer::serialize_mesh;
///
/// let mesh = create_plane(&PlaneParams::default()).unwrap();
/// let response = serialize_mesh(mesh, true).unwrap();
/// assert!(response.normal.is_none());
/// ```
pub fn serialize_mesh(mesh: Mesh, wireframe: bool) -> Result<GeometryResponse, ServiceError> {
    if wireframe {
        return Ok(GeometryResponse {
            position: wireframe_positions(&mesh),
            ..Default::default()
        });
    }

    let buffers = mesh.into_buffers();
    let normal = buffers
        .normal
        .ok_or(ServiceError::MissingAttribute("normal"))?;
    let uv = buffers.uv.ok_or(ServiceError::MissingAttribute("uv"))?;

    Ok(GeometryResponse {
        position: buffers.position,
        normal: Some(normal),
        uv: Some(uv),
        index: buffers.index,
    })
}
