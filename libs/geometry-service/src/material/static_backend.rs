//! Render backend serving embedded GLSL programs.
//!
//! Programs are assembled from the shader sources below: a header with the
//! scene's light counts, the shared light code for lit materials, then the
//! material body. No GPU is involved.

use crate::error::RenderError;
use crate::protocol::MaterialKind;

use super::{RenderBackend, RenderContext, Scene, ShaderProgram};

// =============================================================================
// Shader Sources (embedded at compile time)
// =============================================================================

const VERSION: &str = "#version 300 es";

const MESH_VERT: &str = include_str!("shaders/mesh.vert");
const LIGHTS: &str = include_str!("shaders/lights.glsl");

const BASIC_FRAG: &str = include_str!("shaders/basic.frag");
const PHONG_FRAG: &str = include_str!("shaders/phong.frag");
const STANDARD_FRAG: &str = include_str!("shaders/standard.frag");

// =============================================================================
// Backend
// =============================================================================

/// Backend whose contexts return the embedded program for each material.
///
/// # Example
///
/// ```rust
/// use geometry_service::material::{RenderBackend, RenderContext, Scene, StaticShaderBackend};
/// use geometry_service::protocol::MaterialKind;
///
/// let scene = Scene::for_material(MaterialKind::Standard).unwrap();
/// let mut context = StaticShaderBackend::new().acquire().unwrap();
/// let program = context.render(&scene).unwrap();
/// assert!(program.fragment.contains("#define NUM_POINT_LIGHTS 1"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticShaderBackend;

impl StaticShaderBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for StaticShaderBackend {
    type Context = StaticContext;

    fn acquire(&self) -> Result<StaticContext, RenderError> {
        Ok(StaticContext { _private: () })
    }
}

/// Context handed out by [`StaticShaderBackend`].
#[derive(Debug)]
pub struct StaticContext {
    _private: (),
}

impl RenderContext for StaticContext {
    fn render(&mut self, scene: &Scene) -> Result<ShaderProgram, RenderError> {
        if scene.mesh.is_empty() {
            return Err(RenderError::UnsupportedScene(
                "scene has no geometry".to_string(),
            ));
        }

        let lit = !matches!(scene.material, MaterialKind::Basic);
        let header = header(scene);
        let body = match scene.material {
            MaterialKind::Basic => BASIC_FRAG,
            MaterialKind::Phong => PHONG_FRAG,
            MaterialKind::Standard => STANDARD_FRAG,
        };

        let mut fragment = header.clone();
        if lit {
            fragment.push_str(LIGHTS);
            fragment.push('\n');
        }
        fragment.push_str(body);

        Ok(ShaderProgram {
            vertex: header + MESH_VERT,
            fragment,
        })
    }
}

/// Version line and light-count defines shared by both stages.
fn header(scene: &Scene) -> String {
    format!(
        "{}\n#define NUM_POINT_LIGHTS {}\n#define NUM_HEMI_LIGHTS {}\n\n",
        VERSION,
        scene.point_light_count(),
        scene.hemisphere_light_count()
    )
}
