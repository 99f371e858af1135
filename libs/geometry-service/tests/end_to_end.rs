//! End-to-end tests over a real TCP connection.

use std::net::SocketAddr;

use geometry_service::client::GeometryClient;
use geometry_service::error::ClientError;
use geometry_service::protocol::{
    write_frame, GeometryKind, GeometryRequest, MaterialKind, ParamValue,
};
use geometry_service::{GeometryServer, GeometryService, ServerConfig, StatusCode};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

async fn spawn_server() -> SocketAddr {
    let config = ServerConfig {
        bind_address: "127.0.0.1:0".to_string(),
    };
    let server = GeometryServer::bind(&config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.serve());
    addr
}

fn square_stream(x: f64, y: f64, size: f64) -> Vec<f64> {
    [
        (x, y),
        (x + size / 2.0, y),
        (x + size, y),
        (x + size, y + size),
        (x, y + size),
        (x, y),
    ]
    .iter()
    .flat_map(|&(px, py)| [px, py, 0.0])
    .collect()
}

fn z_range(position: &[f32]) -> (f32, f32) {
    position
        .chunks_exact(3)
        .map(|p| p[2])
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), z| {
            (lo.min(z), hi.max(z))
        })
}

#[tokio::test]
async fn test_wire_matches_in_process() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let requests = [
        GeometryRequest::new(GeometryKind::Box),
        GeometryRequest::new(GeometryKind::Sphere).with_param("radius", ParamValue::Real(2.5)),
        GeometryRequest::new(GeometryKind::TorusKnot).with_wireframe(true),
        GeometryRequest::new(GeometryKind::Tetrahedron).with_param("detail", ParamValue::Integer(2)),
        GeometryRequest::new(GeometryKind::Extrude)
            .with_param("points", ParamValue::Reals(square_stream(0.0, 0.0, 4.0)))
            .with_param("path_indices", ParamValue::Integers(vec![0])),
    ];

    let local = GeometryService::new();
    for request in requests {
        let remote = client.geometry(request.clone()).await.unwrap();
        assert_eq!(remote, local.handle(&request).unwrap(), "{:?}", request.kind);
    }
}

#[tokio::test]
async fn test_defaults_over_the_wire() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let implicit = client
        .geometry(GeometryRequest::new(GeometryKind::Box))
        .await
        .unwrap();
    let zero_width = client
        .geometry(GeometryRequest::new(GeometryKind::Box).with_param("width", ParamValue::Real(0.0)))
        .await
        .unwrap();
    assert_eq!(implicit, zero_width);
    assert_eq!(implicit.position.len(), 24 * 3);
}

#[tokio::test]
async fn test_extrude_depth_range() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let response = client
        .geometry(
            GeometryRequest::new(GeometryKind::Extrude)
                .with_param(
                    "points",
                    ParamValue::Reals(vec![
                        0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 0.0, 0.0, 4.0, 4.0, 0.0, 0.0, 4.0, 0.0,
                        0.0, 0.0, 0.0,
                    ]),
                )
                .with_param("path_indices", ParamValue::Integers(vec![0]))
                .with_param("depth", ParamValue::Real(2.0))
                .with_param("steps", ParamValue::Integer(1)),
        )
        .await
        .unwrap();

    assert!(!response.position.is_empty());
    assert!(response.index.is_none());
    assert_eq!(response.position.len() % 9, 0);
    assert_eq!(z_range(&response.position), (0.0, 2.0));
}

#[tokio::test]
async fn test_shape_with_hole_over_the_wire() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let mut points = square_stream(0.0, 0.0, 4.0);
    points.extend(square_stream(1.0, 1.0, 1.0));
    let solid = client
        .geometry(
            GeometryRequest::new(GeometryKind::Extrude)
                .with_param("points", ParamValue::Reals(square_stream(0.0, 0.0, 4.0)))
                .with_param("path_indices", ParamValue::Integers(vec![0])),
        )
        .await
        .unwrap();
    let holed = client
        .geometry(
            GeometryRequest::new(GeometryKind::Extrude)
                .with_param("points", ParamValue::Reals(points))
                .with_param("path_indices", ParamValue::Integers(vec![0, 6])),
        )
        .await
        .unwrap();

    // The hole adds inner walls
    assert!(holed.position.len() > solid.position.len());
}

#[tokio::test]
async fn test_wireframe_over_the_wire() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let response = client
        .geometry(GeometryRequest::new(GeometryKind::Plane).with_wireframe(true))
        .await
        .unwrap();
    assert_eq!(response.position.len(), 5 * 6);
    assert!(response.normal.is_none());
    assert!(response.uv.is_none());
    assert!(response.index.is_none());
}

#[tokio::test]
async fn test_errors_keep_connection_open() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let mut points = square_stream(0.0, 0.0, 4.0);
    points.extend(square_stream(10.0, 0.0, 4.0));
    points.extend(square_stream(1.0, 1.0, 1.0));
    let misordered = client
        .geometry(
            GeometryRequest::new(GeometryKind::Extrude)
                .with_param("points", ParamValue::Reals(points))
                .with_param("path_indices", ParamValue::Integers(vec![0, 6, 12])),
        )
        .await
        .unwrap_err();
    match misordered {
        ClientError::Status(status) => assert_eq!(status.code, StatusCode::FailedPrecondition),
        other => panic!("unexpected error {:?}", other),
    }

    let empty_subpath = client
        .geometry(
            GeometryRequest::new(GeometryKind::Extrude)
                .with_param("points", ParamValue::Reals(square_stream(0.0, 0.0, 4.0)))
                .with_param("path_indices", ParamValue::Integers(vec![0, 6])),
        )
        .await
        .unwrap_err();
    match empty_subpath {
        ClientError::Status(status) => assert_eq!(status.code, StatusCode::FailedPrecondition),
        other => panic!("unexpected error {:?}", other),
    }

    let unknown = client
        .geometry(GeometryRequest::new(GeometryKind::Cone).with_param("radius_top", ParamValue::Real(1.0)))
        .await
        .unwrap_err();
    match unknown {
        ClientError::Status(status) => {
            assert_eq!(status.code, StatusCode::InvalidArgument);
            assert!(status.message.contains("radius_top"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    // Same connection still serves
    let ok = client
        .geometry(GeometryRequest::new(GeometryKind::Circle))
        .await
        .unwrap();
    assert_eq!(ok.position.len(), 10 * 3);
}

#[tokio::test]
async fn test_oversized_reply_is_an_error_response() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    // About 2.25M vertices: inside the vertex limit, over the frame limit
    let err = client
        .geometry(
            GeometryRequest::new(GeometryKind::Plane)
                .with_param("width_segments", ParamValue::Integer(1500))
                .with_param("height_segments", ParamValue::Integer(1500)),
        )
        .await
        .unwrap_err();
    match err {
        ClientError::Status(status) => {
            assert_eq!(status.code, StatusCode::ResourceExhausted);
            assert!(status.message.contains("frame limit"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    // Same connection still serves
    let ok = client
        .geometry(GeometryRequest::new(GeometryKind::Circle))
        .await
        .unwrap();
    assert_eq!(ok.position.len(), 10 * 3);
}

#[tokio::test]
async fn test_materials_over_the_wire() {
    let addr = spawn_server().await;
    let mut client = GeometryClient::connect(addr).await.unwrap();

    let basic = client.material(MaterialKind::Basic).await.unwrap();
    assert!(basic.fragment_shader.contains("#define NUM_POINT_LIGHTS 0"));

    for kind in [MaterialKind::Phong, MaterialKind::Standard] {
        let lit = client.material(kind).await.unwrap();
        assert!(lit.vertex_shader.starts_with("#version 300 es"));
        assert!(lit.fragment_shader.contains("#define NUM_POINT_LIGHTS 1"));
        assert!(lit.fragment_shader.contains("#define NUM_HEMI_LIGHTS 1"));
    }
}

#[tokio::test]
async fn test_concurrent_clients() {
    let addr = spawn_server().await;

    let tasks: Vec<_> = (1..=4)
        .map(|i| {
            tokio::spawn(async move {
                let mut client = GeometryClient::connect(addr).await.unwrap();
                client
                    .geometry(
                        GeometryRequest::new(GeometryKind::Sphere)
                            .with_param("width_segments", ParamValue::Integer(8 * i)),
                    )
                    .await
                    .unwrap()
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let response = task.await.unwrap();
        let width = 8 * (i + 1);
        assert_eq!(response.position.len(), (width + 1) * 7 * 3);
    }
}

#[tokio::test]
async fn test_garbage_frame_closes_connection() {
    let addr = spawn_server().await;

    let mut raw = TcpStream::connect(addr).await.unwrap();
    raw.write_all(&[0, 0, 0, 2, 0xff, 0xff]).await.unwrap();

    // Server drops the connection; the reply read sees EOF
    let mut buf = Vec::new();
    let n = tokio::io::AsyncReadExt::read_to_end(&mut raw, &mut buf)
        .await
        .unwrap_or(0);
    assert_eq!(n, 0);

    // Other connections are unaffected
    let mut client = GeometryClient::connect(addr).await.unwrap();
    assert!(client
        .geometry(GeometryRequest::new(GeometryKind::Plane))
        .await
        .is_ok());

    // A well-formed frame on a fresh raw stream still gets an answer
    let mut raw = TcpStream::connect(addr).await.unwrap();
    write_frame(
        &mut raw,
        &geometry_service::protocol::Request {
            id: 42,
            call: geometry_service::protocol::Call::Material(
                geometry_service::protocol::MaterialRequest {
                    kind: MaterialKind::Basic,
                },
            ),
        },
    )
    .await
    .unwrap();
    let response: geometry_service::protocol::Response =
        geometry_service::protocol::read_frame(&mut raw)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(response.id, 42);
    assert!(response.result.is_ok());
}
