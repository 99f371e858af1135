//! # Client
//!
//! Async client for the geometry server, one request in flight at a time.

use tokio::net::{TcpStream, ToSocketAddrs};

use crate::error::{ClientError, ProtocolError};
use crate::protocol::{
    read_frame, write_frame, Call, GeometryRequest, GeometryResponse, MaterialKind,
    MaterialRequest, MaterialResponse, Reply, Request, Response,
};

/// Connection to a geometry server.
///
/// # Example
///
/// ```rust,ignore
/// use geometry_service::client::GeometryClient;
/// use geometry_service::protocol::{GeometryKind, GeometryRequest};
///
/// let mut client = GeometryClient::connect("127.0.0.1:50051").await?;
/// let sphere = client.geometry(GeometryRequest::new(GeometryKind::Sphere)).await?;
/// ```
#[derive(Debug)]
pub struct GeometryClient {
    stream: TcpStream,
    next_id: u64,
}

impl GeometryClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await.map_err(ProtocolError::from)?;
        stream.set_nodelay(true).map_err(ProtocolError::from)?;
        Ok(Self { stream, next_id: 1 })
    }

    /// Sends one call and waits for its response.
    pub async fn call(&mut self, call: Call) -> Result<Reply, ClientError> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        write_frame(&mut self.stream, &Request { id, call }).await?;
        let response: Response = read_frame(&mut self.stream)
            .await?
            .ok_or(ClientError::ConnectionClosed)?;

        if response.id != id {
            return Err(ClientError::IdMismatch {
                expected: id,
                got: response.id,
            });
        }
        Ok(response.result?)
    }

    pub async fn geometry(
        &mut self,
        request: GeometryRequest,
    ) -> Result<GeometryResponse, ClientError> {
        match self.call(Call::Geometry(request)).await? {
            Reply::Geometry(response) => Ok(response),
            Reply::Material(_) => Err(ClientError::UnexpectedReply),
        }
    }

    pub async fn material(&mut self, kind: MaterialKind) -> Result<MaterialResponse, ClientError> {
        match self.call(Call::Material(MaterialRequest { kind })).await? {
            Reply::Material(response) => Ok(response),
            Reply::Geometry(_) => Err(ClientError::UnexpectedReply),
        }
    }
}
