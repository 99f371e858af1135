//! # Service Errors
//!
//! Error types for every stage of a request, and their mapping onto the
//! wire status returned to callers.

use geometry_mesh::MeshError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// WIRE STATUS
// =============================================================================

/// Failure category reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    /// The request itself is malformed
    InvalidArgument,
    /// The request is well formed but geometrically inconsistent
    FailedPrecondition,
    /// Construction or rendering failed inside the service
    Internal,
    /// The reply does not fit in a single frame
    ResourceExhausted,
}

/// Error status carried in a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct RpcStatus {
    pub code: StatusCode,
    pub message: String,
}

impl RpcStatus {
    /// Creates a status.
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

// =============================================================================
// REQUEST STAGES
// =============================================================================

/// Errors reconstructing shapes from an extrude point stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("point stream is empty")]
    EmptyPoints,

    #[error("no subpath boundaries given")]
    NoSubpaths,

    #[error("point stream length {len} is not a multiple of 3")]
    UngroupedPoints { len: usize },

    #[error("subpath boundary {index} at position {position} is smaller than the one before it")]
    DecreasingBoundary { position: usize, index: u32 },

    #[error("subpath boundary {index} exceeds point count {count}")]
    BoundaryOutOfRange { index: u32, count: usize },

    #[error("subpath {subpath} has {len} points, which is not a whole number of curves")]
    IncompleteCurve { subpath: usize, len: usize },

    /// Two equal boundaries produce a subpath without points
    #[error("subpath {subpath} is empty")]
    EmptySubpath { subpath: usize },

    /// A hole that appears after a different shape than the one containing it
    #[error("subpath {subpath} lies inside shape {shape} but does not directly follow it")]
    MisorderedHole { subpath: usize, shape: usize },
}

impl PathError {
    /// Returns true for well-formed input that cannot describe valid shapes.
    pub fn is_geometric(&self) -> bool {
        matches!(
            self,
            PathError::EmptySubpath { .. } | PathError::MisorderedHole { .. }
        )
    }
}

/// Errors resolving request parameters against a schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown parameter '{name}'")]
    Unknown { name: String },

    #[error("parameter '{name}' expects {expected}")]
    TypeMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("parameter '{name}' {message}")]
    OutOfRange { name: &'static str, message: String },

    /// A builder asked for a parameter its schema does not declare
    #[error("parameter '{name}' is not declared")]
    Undeclared { name: &'static str },
}

/// Errors raised by the material render backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("render context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("unsupported scene: {0}")]
    UnsupportedScene(String),
}

/// Umbrella error for handling one request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// A solid mesh without a required attribute buffer
    #[error("mesh is missing its {0} attribute")]
    MissingAttribute(&'static str),

    #[error("no handler registered for {0}")]
    Unsupported(String),

    #[error("worker task failed: {0}")]
    Task(String),
}

impl ServiceError {
    /// Maps the error onto a wire status.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::error::{ParamError, ServiceError, StatusCode};
    ///
    /// let err = ServiceError::from(ParamError::Unknown { name: "size".into() });
    /// assert_eq!(err.status().code, StatusCode::InvalidArgument);
    /// ```
    pub fn status(&self) -> RpcStatus {
        let code = match self {
            ServiceError::Param(ParamError::Undeclared { .. }) => StatusCode::Internal,
            ServiceError::Param(_) => StatusCode::InvalidArgument,
            ServiceError::Path(e) if e.is_geometric() => StatusCode::FailedPrecondition,
            ServiceError::Path(_) => StatusCode::InvalidArgument,
            ServiceError::Mesh(MeshError::InvalidParameter { .. })
            | ServiceError::Mesh(MeshError::TooManyVertices { .. }) => StatusCode::InvalidArgument,
            ServiceError::Mesh(_) => StatusCode::Internal,
            ServiceError::Render(_) => StatusCode::Internal,
            ServiceError::MissingAttribute(_) => StatusCode::Internal,
            ServiceError::Unsupported(_) => StatusCode::InvalidArgument,
            ServiceError::Task(_) => StatusCode::Internal,
        };
        RpcStatus::new(code, self.to_string())
    }
}

impl From<ServiceError> for RpcStatus {
    fn from(err: ServiceError) -> Self {
        err.status()
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Errors reading or writing frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("frame of {len} bytes exceeds limit of {max}")]
    FrameTooLarge { len: usize, max: usize },
}

/// Errors seen by [`GeometryClient`](crate::client::GeometryClient) callers.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("request failed: {0}")]
    Status(#[from] RpcStatus),

    #[error("connection closed before a response arrived")]
    ConnectionClosed,

    #[error("response id {got} does not match request id {expected}")]
    IdMismatch { expected: u64, got: u64 },

    #[error("response kind does not match the request")]
    UnexpectedReply,
}
