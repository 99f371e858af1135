//! # Material Service
//!
//! Renders a fixed scene once per request and returns the shader program
//! the renderer used for the requested material.
//!
//! The scene is rebuilt for every call and the render context is acquired
//! from the backend inside the call, so nothing is shared between
//! concurrent requests. The context is dropped on every exit path.
//!
//! ## Scene
//!
//! | Material | Camera | Lights |
//! |---|---|---|
//! | basic | perspective | none |
//! | phong | orthographic | one point, one hemisphere |
//! | standard | orthographic | one point, one hemisphere |

mod static_backend;

pub use static_backend::{StaticContext, StaticShaderBackend};

use config::constants::{
    CAMERA_DISTANCE, HEMISPHERE_LIGHT_INTENSITY, ORTHOGRAPHIC_CLIP, ORTHOGRAPHIC_FRUSTUM,
    PERSPECTIVE_CLIP, PERSPECTIVE_FOV_DEGREES, POINT_LIGHT_DISTANCE, POINT_LIGHT_INTENSITY,
};
use geometry_mesh::primitives::{create_box, BoxParams};
use geometry_mesh::Mesh;
use glam::DVec3;
use tracing::{debug, debug_span};

use crate::error::{RenderError, ServiceError};
use crate::protocol::{MaterialKind, MaterialRequest, MaterialResponse};

// =============================================================================
// SCENE
// =============================================================================

/// Camera the scene is rendered through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    Perspective {
        fov_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
        position: DVec3,
    },
    Orthographic {
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
        position: DVec3,
    },
}

impl Camera {
    pub fn perspective() -> Self {
        let (near, far) = PERSPECTIVE_CLIP;
        Camera::Perspective {
            fov_degrees: PERSPECTIVE_FOV_DEGREES,
            aspect: 1.0,
            near,
            far,
            position: DVec3::new(0.0, 0.0, CAMERA_DISTANCE),
        }
    }

    pub fn orthographic() -> Self {
        let [left, right, top, bottom] = ORTHOGRAPHIC_FRUSTUM;
        let (near, far) = ORTHOGRAPHIC_CLIP;
        Camera::Orthographic {
            left,
            right,
            top,
            bottom,
            near,
            far,
            position: DVec3::new(0.0, 0.0, CAMERA_DISTANCE),
        }
    }
}

/// Light source in the scene. Colors are linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point {
        color: DVec3,
        intensity: f64,
        distance: f64,
        position: DVec3,
    },
    Hemisphere {
        sky: DVec3,
        ground: DVec3,
        intensity: f64,
    },
}

/// Everything a backend needs to render one material.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub material: MaterialKind,
    pub mesh: Mesh,
    pub camera: Camera,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Builds the fixed scene for `material`: one unit box, plus a point
    /// and a hemisphere light for lit materials.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::material::Scene;
    /// use geometry_service::protocol::MaterialKind;
    ///
    /// let scene = Scene::for_material(MaterialKind::Phong).unwrap();
    /// assert_eq!(scene.point_light_count(), 1);
    /// assert_eq!(scene.hemisphere_light_count(), 1);
    /// ```
    pub fn for_material(material: MaterialKind) -> Result<Self, ServiceError> {
        let mesh = create_box(&BoxParams::default())?;

        let (camera, lights) = match material {
            MaterialKind::Basic => (Camera::perspective(), Vec::new()),
            MaterialKind::Phong | MaterialKind::Standard => (
                Camera::orthographic(),
                vec![
                    Light::Point {
                        color: DVec3::ONE,
                        intensity: POINT_LIGHT_INTENSITY,
                        distance: POINT_LIGHT_DISTANCE,
                        position: DVec3::ZERO,
                    },
                    Light::Hemisphere {
                        sky: DVec3::ONE,
                        ground: DVec3::ZERO,
                        intensity: HEMISPHERE_LIGHT_INTENSITY,
                    },
                ],
            ),
        };

        Ok(Self {
            material,
            mesh,
            camera,
            lights,
        })
    }

    pub fn point_light_count(&self) -> usize {
        self.lights
            .iter()
            .filter(|l| matches!(l, Light::Point { .. }))
            .count()
    }

    pub fn hemisphere_light_count(&self) -> usize {
        self.lights
            .iter()
            .filter(|l| matches!(l, Light::Hemisphere { .. }))
            .count()
    }
}

// =============================================================================
// BACKEND
// =============================================================================

/// Final shader sources of one rendered program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgram {
    pub vertex: String,
    pub fragment: String,
}

/// Source of render contexts.
pub trait RenderBackend: Send + Sync {
    type Context: RenderContext;

    /// Acquires a context owned by the caller until dropped.
    fn acquire(&self) -> Result<Self::Context, RenderError>;
}

/// A render context held by a single call.
pub trait RenderContext {
    /// Renders `scene` and returns the program used for its material.
    fn render(&mut self, scene: &Scene) -> Result<ShaderProgram, RenderError>;
}

// =============================================================================
// SERVICE
// =============================================================================

/// Material request handler over a render backend.
#[derive(Debug, Clone, Default)]
pub struct MaterialService<B> {
    backend: B,
}

impl<B: RenderBackend> MaterialService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Renders the scene for the requested material once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::material::{MaterialService, StaticShaderBackend};
    /// use geometry_service::protocol::{MaterialKind, MaterialRequest};
    ///
    /// let service = MaterialService::new(StaticShaderBackend::new());
    /// let response = service
    ///     .handle(&MaterialRequest { kind: MaterialKind::Basic })
    ///     .unwrap();
    /// assert!(response.vertex_shader.contains("void main()"));
    /// ```
    pub fn handle(&self, request: &MaterialRequest) -> Result<MaterialResponse, ServiceError> {
        let _span = debug_span!("material", kind = ?request.kind).entered();

        let scene = Scene::for_material(request.kind)?;
        let mut context = self.backend.acquire()?;
        let program = context.render(&scene)?;
        debug!(
            vertex_len = program.vertex.len(),
            fragment_len = program.fragment.len(),
            "program rendered"
        );

        Ok(MaterialResponse {
            vertex_shader: program.vertex,
            fragment_shader: program.fragment,
        })
    }
}

#[cfg(test)]
mod tests;
