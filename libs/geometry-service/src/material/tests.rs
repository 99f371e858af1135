//! Tests for the material service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::error::StatusCode;

/// Backend that records how many contexts are alive.
#[derive(Debug, Default, Clone)]
struct CountingBackend {
    acquired: Arc<AtomicUsize>,
    live: Arc<AtomicUsize>,
    fail_render: bool,
}

struct CountingContext {
    live: Arc<AtomicUsize>,
    fail_render: bool,
}

impl Drop for CountingContext {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RenderBackend for CountingBackend {
    type Context = CountingContext;

    fn acquire(&self) -> Result<CountingContext, RenderError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.live.fetch_add(1, Ordering::SeqCst);
        Ok(CountingContext {
            live: Arc::clone(&self.live),
            fail_render: self.fail_render,
        })
    }
}

impl RenderContext for CountingContext {
    fn render(&mut self, scene: &Scene) -> Result<ShaderProgram, RenderError> {
        if self.fail_render {
            return Err(RenderError::ContextUnavailable("device lost".to_string()));
        }
        Ok(ShaderProgram {
            vertex: format!("{:?}", scene.camera),
            fragment: format!("{}", scene.lights.len()),
        })
    }
}

/// Backend that cannot hand out contexts.
#[derive(Debug)]
struct UnavailableBackend;

impl RenderBackend for UnavailableBackend {
    type Context = CountingContext;

    fn acquire(&self) -> Result<CountingContext, RenderError> {
        Err(RenderError::ContextUnavailable("no adapter".to_string()))
    }
}

// =============================================================================
// SCENE
// =============================================================================

#[test]
fn test_basic_scene() {
    let scene = Scene::for_material(MaterialKind::Basic).unwrap();
    assert!(scene.lights.is_empty());
    assert!(matches!(scene.camera, Camera::Perspective { .. }));
    assert_eq!(scene.mesh.vertex_count(), 24);
}

#[test]
fn test_lit_scenes() {
    for kind in [MaterialKind::Phong, MaterialKind::Standard] {
        let scene = Scene::for_material(kind).unwrap();
        assert_eq!(scene.point_light_count(), 1);
        assert_eq!(scene.hemisphere_light_count(), 1);
        assert!(matches!(scene.camera, Camera::Orthographic { .. }));
    }
}

#[test]
fn test_cameras_on_z_axis() {
    for camera in [Camera::perspective(), Camera::orthographic()] {
        let position = match camera {
            Camera::Perspective { position, .. } | Camera::Orthographic { position, .. } => position,
        };
        assert_eq!(position, DVec3::new(0.0, 0.0, 11.0));
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[test]
fn test_context_released_after_each_call() {
    let backend = CountingBackend::default();
    let service = MaterialService::new(backend.clone());

    for kind in [MaterialKind::Basic, MaterialKind::Phong, MaterialKind::Standard] {
        service.handle(&MaterialRequest { kind }).unwrap();
        assert_eq!(backend.live.load(Ordering::SeqCst), 0);
    }
    assert_eq!(backend.acquired.load(Ordering::SeqCst), 3);
}

#[test]
fn test_context_released_on_failure() {
    let backend = CountingBackend {
        fail_render: true,
        ..Default::default()
    };
    let service = MaterialService::new(backend.clone());

    let err = service
        .handle(&MaterialRequest {
            kind: MaterialKind::Phong,
        })
        .unwrap_err();
    assert_eq!(backend.live.load(Ordering::SeqCst), 0);

    let status = err.status();
    assert_eq!(status.code, StatusCode::Internal);
    assert!(status.message.contains("device lost"));
}

#[test]
fn test_acquire_failure_surfaces_verbatim() {
    let service = MaterialService::new(UnavailableBackend);
    let err = service
        .handle(&MaterialRequest {
            kind: MaterialKind::Basic,
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Render(_)));
    assert!(err.status().message.contains("no adapter"));
}

#[test]
fn test_scene_reaches_backend() {
    let service = MaterialService::new(CountingBackend::default());
    let response = service
        .handle(&MaterialRequest {
            kind: MaterialKind::Standard,
        })
        .unwrap();
    assert!(response.vertex_shader.starts_with("Orthographic"));
    assert_eq!(response.fragment_shader, "2");
}

#[test]
fn test_static_backend_programs_differ() {
    let service = MaterialService::new(StaticShaderBackend::new());
    let phong = service
        .handle(&MaterialRequest {
            kind: MaterialKind::Phong,
        })
        .unwrap();
    let standard = service
        .handle(&MaterialRequest {
            kind: MaterialKind::Standard,
        })
        .unwrap();
    assert_eq!(phong.vertex_shader, standard.vertex_shader);
    assert_ne!(phong.fragment_shader, standard.fragment_shader);
}
