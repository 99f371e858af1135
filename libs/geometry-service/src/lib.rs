//! # Geometry Service
//!
//! Remote procedure service returning procedural geometry buffers and
//! material shader sources.
//!
//! ## Architecture
//!
//! ```text
//! TCP frame ─→ protocol ─→ server ─→ dispatcher ─→ params ─→ geometry-mesh
//!                                        │            (extrude: path)
//!                                        └─→ serializer ─→ response frame
//!                           └─→ material ─→ RenderBackend
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use geometry_service::run_server;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     run_server().await
//! }
//! ```

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod material;
pub mod params;
pub mod path;
pub mod protocol;
pub mod serializer;
pub mod server;

pub use client::GeometryClient;
pub use dispatcher::GeometryService;
pub use error::{RpcStatus, ServiceError, StatusCode};
pub use server::{GeometryServer, ServerConfig, ServiceRouter};

/// Serves on the default address until the listener fails.
pub async fn run_server() -> std::io::Result<()> {
    GeometryServer::bind(&ServerConfig::default())
        .await?
        .serve()
        .await
}
