//! # TCP Server
//!
//! Accepts connections and answers framed requests.
//!
//! ## Connection Model
//!
//! ```text
//! accept ─→ spawn task per connection
//!              │
//!              └─ loop: read frame ─→ spawn_blocking(dispatch) ─→ write frame
//! ```
//!
//! Requests on one connection are answered in arrival order. A failed
//! request produces an error response and the connection stays open; a
//! transport or decoding failure closes the connection.

use std::net::SocketAddr;
use std::sync::Arc;

use std::time::Duration;

use config::constants::{ACCEPT_RETRY_DELAY_MS, DEFAULT_BIND_ADDRESS};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::dispatcher::GeometryService;
use crate::error::{ProtocolError, RpcStatus, ServiceError, StatusCode};
use crate::material::{MaterialService, RenderBackend, StaticShaderBackend};
use crate::protocol::{encode_frame, read_frame, write_encoded, Call, Reply, Request, Response};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on, `host:port`
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Routes each call to the geometry or material service.
#[derive(Debug, Clone, Default)]
pub struct ServiceRouter<B = StaticShaderBackend> {
    geometry: GeometryService,
    material: MaterialService<B>,
}

impl ServiceRouter<StaticShaderBackend> {
    /// Router with the embedded shader backend.
    pub fn new() -> Self {
        Self::with_backend(StaticShaderBackend::new())
    }
}

impl<B: RenderBackend> ServiceRouter<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            geometry: GeometryService::new(),
            material: MaterialService::new(backend),
        }
    }

    /// Handles one call synchronously.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::protocol::{Call, GeometryKind, GeometryRequest, Reply};
    /// use geometry_service::server::ServiceRouter;
    ///
    /// let router = ServiceRouter::new();
    /// let reply = router
    ///     .dispatch(&Call::Geometry(GeometryRequest::new(GeometryKind::Circle)))
    ///     .unwrap();
    /// assert!(matches!(reply, Reply::Geometry(_)));
    /// ```
    pub fn dispatch(&self, call: &Call) -> Result<Reply, ServiceError> {
        match call {
            Call::Geometry(request) => self.geometry.handle(request).map(Reply::Geometry),
            Call::Material(request) => self.material.handle(request).map(Reply::Material),
        }
    }
}

// =============================================================================
// SERVER
// =============================================================================

/// A bound listener ready to serve.
pub struct GeometryServer<B = StaticShaderBackend> {
    listener: TcpListener,
    router: Arc<ServiceRouter<B>>,
}

impl GeometryServer<StaticShaderBackend> {
    /// Binds `config.bind_address` with the default router.
    pub async fn bind(config: &ServerConfig) -> std::io::Result<Self> {
        Self::bind_with(config, ServiceRouter::new()).await
    }
}

impl<B: RenderBackend + 'static> GeometryServer<B> {
    /// Binds `config.bind_address` with a custom router.
    pub async fn bind_with(config: &ServerConfig, router: ServiceRouter<B>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(&config.bind_address).await?;
        Ok(Self {
            listener,
            router: Arc::new(router),
        })
    }

    /// Address actually bound, useful with port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever.
    ///
    /// Failed accepts are logged and retried after a short delay; only
    /// reading the bound address can fail.
    pub async fn serve(self) -> std::io::Result<()> {
        info!(addr = %self.listener.local_addr()?, "geometry server listening");

        loop {
            let Some((stream, peer)) = accepted(self.listener.accept().await) else {
                tokio::time::sleep(Duration::from_millis(ACCEPT_RETRY_DELAY_MS)).await;
                continue;
            };
            let router = Arc::clone(&self.router);
            tokio::spawn(async move {
                debug!(%peer, "connection opened");
                match handle_connection(stream, router).await {
                    Ok(()) => debug!(%peer, "connection closed"),
                    Err(e) => warn!(%peer, error = %e, "connection dropped"),
                }
            });
        }
    }
}

/// Unwraps an accept result, logging the failure instead of propagating
/// it.
fn accepted<S>(result: std::io::Result<(S, SocketAddr)>) -> Option<(S, SocketAddr)> {
    match result {
        Ok(connection) => Some(connection),
        Err(e) => {
            warn!(error = %e, "accept failed");
            None
        }
    }
}

/// Encodes the response to one request.
///
/// A reply too large for one frame is replaced by an error status with the
/// same id, so the caller always gets an answer.
fn encode_response(id: u64, result: Result<Reply, RpcStatus>) -> Result<Vec<u8>, ProtocolError> {
    match encode_frame(&Response { id, result }) {
        Err(ProtocolError::FrameTooLarge { len, max }) => {
            warn!(id, len, max, "response exceeds frame limit");
            let status = RpcStatus::new(
                StatusCode::ResourceExhausted,
                format!("response of {} bytes exceeds frame limit of {}", len, max),
            );
            encode_frame(&Response {
                id,
                result: Err(status),
            })
        }
        other => other,
    }
}

/// Answers requests on one connection until the peer closes it.
async fn handle_connection<B: RenderBackend + 'static>(
    stream: TcpStream,
    router: Arc<ServiceRouter<B>>,
) -> Result<(), ProtocolError> {
    let (mut reader, mut writer) = stream.into_split();

    while let Some(request) = read_frame::<_, Request>(&mut reader).await? {
        let Request { id, call } = request;
        let router = Arc::clone(&router);

        let result = tokio::task::spawn_blocking(move || router.dispatch(&call))
            .await
            .unwrap_or_else(|e| Err(ServiceError::Task(e.to_string())));

        if let Err(e) = &result {
            warn!(id, error = %e, "request failed");
        }

        let frame = encode_response(id, result.map_err(RpcStatus::from))?;
        write_encoded(&mut writer, &frame).await?;
    }

    Ok(())
}
