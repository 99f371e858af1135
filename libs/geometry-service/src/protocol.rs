//! # Wire Protocol
//!
//! Message types and framing shared by server and client.
//!
//! ## Framing
//!
//! ```text
//! +----------------------+---------------------------+
//! | length (u32, BE)     | bincode payload           |
//! +----------------------+---------------------------+
//! ```
//!
//! Every [`Request`] is answered by exactly one [`Response`] carrying the
//! same `id`. The message types below are the schema of the service.

use std::collections::BTreeMap;

use config::constants::{FRAME_HEADER_BYTES, MAX_FRAME_BYTES};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ProtocolError, RpcStatus};

// =============================================================================
// GEOMETRY SERVICE
// =============================================================================

/// Geometry kinds served by the geometry service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Box,
    Sphere,
    TorusKnot,
    Icosahedron,
    Tetrahedron,
    Cylinder,
    Cone,
    Circle,
    Plane,
    Extrude,
}

impl GeometryKind {
    /// Every kind, in service declaration order.
    pub const ALL: [GeometryKind; 10] = [
        GeometryKind::Box,
        GeometryKind::Sphere,
        GeometryKind::TorusKnot,
        GeometryKind::Icosahedron,
        GeometryKind::Tetrahedron,
        GeometryKind::Cylinder,
        GeometryKind::Cone,
        GeometryKind::Circle,
        GeometryKind::Plane,
        GeometryKind::Extrude,
    ];
}

/// A parameter value as sent by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Reals(Vec<f64>),
    Integers(Vec<i64>),
}

/// Request for one geometry.
///
/// Every parameter is optional. Absent, zero, false and NaN values fall
/// back to the kind's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub kind: GeometryKind,
    pub params: BTreeMap<String, ParamValue>,
    /// Return edge positions only
    pub wireframe: Option<bool>,
}

impl GeometryRequest {
    /// Creates a request with no parameters.
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            params: BTreeMap::new(),
            wireframe: None,
        }
    }

    /// Sets a parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::protocol::{GeometryKind, GeometryRequest, ParamValue};
    ///
    /// let request = GeometryRequest::new(GeometryKind::Sphere)
    ///     .with_param("radius", ParamValue::Real(2.0))
    ///     .with_wireframe(true);
    /// assert_eq!(request.params.len(), 1);
    /// ```
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Sets the wireframe flag.
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = Some(wireframe);
        self
    }
}

/// Vertex buffers of a generated geometry.
///
/// Wireframe responses carry `position` only. Solid responses always carry
/// `normal` and `uv`, and `index` when the geometry is indexed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryResponse {
    pub position: Vec<f32>,
    pub normal: Option<Vec<f32>>,
    pub uv: Option<Vec<f32>>,
    pub index: Option<Vec<u32>>,
}

// =============================================================================
// MATERIAL SERVICE
// =============================================================================

/// Material kinds served by the material service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Basic,
    Phong,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequest {
    pub kind: MaterialKind,
}

/// Shader sources produced by rendering a material once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub vertex_shader: String,
    pub fragment_shader: String,
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// A call to one of the two services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Call {
    Geometry(GeometryRequest),
    Material(MaterialRequest),
}

/// Successful result of a [`Call`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    Geometry(GeometryResponse),
    Material(MaterialResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Caller-chosen id, echoed in the response
    pub id: u64,
    pub call: Call,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: u64,
    pub result: Result<Reply, RpcStatus>,
}

// =============================================================================
// FRAMING
// =============================================================================

/// Encodes `message` as a complete frame, header included.
///
/// The encoded size is checked against `MAX_FRAME_BYTES` before any
/// payload is allocated.
pub fn encode_frame<T: Serialize>(message: &T) -> Result<Vec<u8>, ProtocolError> {
    let len = bincode::serialized_size(message)? as usize;
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: MAX_FRAME_BYTES,
        });
    }

    let mut frame = Vec::with_capacity(FRAME_HEADER_BYTES + len);
    frame.extend_from_slice(&(len as u32).to_be_bytes());
    bincode::serialize_into(&mut frame, message)?;
    Ok(frame)
}

/// Writes an already encoded frame.
pub async fn write_encoded<W>(writer: &mut W, frame: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Encodes `message` and writes it as one frame.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode_frame(message)?;
    write_encoded(writer, &frame).await
}

/// Reads one frame and decodes it.
///
/// Returns `Ok(None)` when the peer closed the stream cleanly before a new
/// frame started. A stream that ends inside a header or payload is an
/// error.
pub async fn read_frame<R, T>(reader: &mut R) -> Result<Option<T>, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut header = [0u8; FRAME_HEADER_BYTES];
    let mut filled = 0;
    while filled < FRAME_HEADER_BYTES {
        let n = reader.read(&mut header[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("stream ended after {} header bytes", filled),
            )
            .into());
        }
        filled += n;
    }

    let len = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_BYTES {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: MAX_FRAME_BYTES,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await?;
    Ok(Some(bincode::deserialize(&payload)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusCode;

    #[tokio::test]
    async fn test_frame_round_trip() {
        let request = Request {
            id: 7,
            call: Call::Geometry(
                GeometryRequest::new(GeometryKind::Extrude)
                    .with_param("points", ParamValue::Reals(vec![0.0, 1.0, 0.0]))
                    .with_param("path_indices", ParamValue::Integers(vec![0])),
            ),
        };

        let mut buffer = Vec::new();
        write_frame(&mut buffer, &request).await.unwrap();

        let len = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]) as usize;
        assert_eq!(len + FRAME_HEADER_BYTES, buffer.len());

        let decoded: Request = read_frame(&mut buffer.as_slice()).await.unwrap().unwrap();
        assert_eq!(decoded, request);
    }

    #[tokio::test]
    async fn test_error_response_round_trip() {
        let response = Response {
            id: 3,
            result: Err(RpcStatus::new(StatusCode::FailedPrecondition, "misordered")),
        };
        let mut buffer = Vec::new();
        write_frame(&mut buffer, &response).await.unwrap();
        let decoded: Response = read_frame(&mut buffer.as_slice()).await.unwrap().unwrap();
        assert_eq!(decoded, response);
    }

    #[tokio::test]
    async fn test_clean_eof_is_none() {
        let empty: &[u8] = &[];
        let decoded: Option<Request> = read_frame(&mut &*empty).await.unwrap();
        assert!(decoded.is_none());
    }

    #[tokio::test]
    async fn test_oversized_header_rejected() {
        let header = (MAX_FRAME_BYTES as u32 + 1).to_be_bytes();
        let result: Result<Option<Request>, _> = read_frame(&mut &header[..]).await;
        assert!(matches!(result, Err(ProtocolError::FrameTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_truncated_header_is_error() {
        for partial in [&[0u8][..], &[0, 0][..], &[0, 0, 0][..]] {
            let result: Result<Option<Request>, _> = read_frame(&mut &*partial).await;
            match result {
                Err(ProtocolError::Io(e)) => {
                    assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof)
                }
                other => panic!("expected io error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_encode_frame_header_matches_payload() {
        let response = Response {
            id: 9,
            result: Err(RpcStatus::new(StatusCode::Internal, "boom")),
        };
        let frame = encode_frame(&response).unwrap();
        let len = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
        assert_eq!(len, frame.len() - FRAME_HEADER_BYTES);
        assert_eq!(
            bincode::deserialize::<Response>(&frame[FRAME_HEADER_BYTES..]).unwrap(),
            response
        );
    }

    #[tokio::test]
    async fn test_truncated_payload_is_error() {
        let mut buffer = Vec::new();
        write_frame(&mut buffer, &Request {
            id: 1,
            call: Call::Material(MaterialRequest { kind: MaterialKind::Basic }),
        })
        .await
        .unwrap();
        buffer.truncate(buffer.len() - 1);
        let result: Result<Option<Request>, _> = read_frame(&mut buffer.as_slice()).await;
        assert!(matches!(result, Err(ProtocolError::Io(_))));
    }
}
