//! # Geometry Dispatcher
//!
//! Routes geometry requests through a static descriptor table.
//!
//! ## Request Flow
//!
//! ```text
//! GeometryRequest ─→ descriptor(kind) ─→ ResolvedParams ─→ build ─→ Mesh
//!                                                                   │
//!                         GeometryResponse ←── serialize_mesh ──────┘
//! ```
//!
//! Each descriptor pairs a parameter schema with a construction callback.
//! Adding a geometry kind means adding one table entry.

#[cfg(test)]
mod tests;

use config::constants::*;
use geometry_mesh::primitives::{
    create_box, create_circle, create_cone, create_cylinder, create_icosahedron, create_plane,
    create_sphere, create_tetrahedron, create_torus_knot, BoxParams, CircleParams, ConeParams,
    CylinderParams, PlaneParams, PolyhedronParams, SphereParams, TorusKnotParams,
};
use geometry_mesh::{extrude_shapes, ExtrudeSettings, Mesh};
use tracing::{debug, debug_span};

use crate::error::ServiceError;
use crate::params::{ParamSpec, ResolvedParams};
use crate::path::reconstruct;
use crate::protocol::{GeometryKind, GeometryRequest, GeometryResponse};
use crate::serializer::serialize_mesh;

/// Builds a mesh from resolved parameters.
pub type BuildFn = fn(&ResolvedParams) -> Result<Mesh, ServiceError>;

/// Schema and construction callback of one geometry kind.
#[derive(Clone, Copy)]
pub struct GeometryDescriptor {
    pub kind: GeometryKind,
    pub params: &'static [ParamSpec],
    pub build: BuildFn,
}

// =============================================================================
// PARAMETER SCHEMAS
// =============================================================================

const BOX_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("width", DEFAULT_BOX_SIZE),
    ParamSpec::real("height", DEFAULT_BOX_SIZE),
    ParamSpec::real("depth", DEFAULT_BOX_SIZE),
    ParamSpec::count("width_segments", DEFAULT_BOX_SEGMENTS),
    ParamSpec::count("height_segments", DEFAULT_BOX_SEGMENTS),
    ParamSpec::count("depth_segments", DEFAULT_BOX_SEGMENTS),
];

const SPHERE_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("radius", DEFAULT_SPHERE_RADIUS),
    ParamSpec::count("width_segments", DEFAULT_SPHERE_WIDTH_SEGMENTS),
    ParamSpec::count("height_segments", DEFAULT_SPHERE_HEIGHT_SEGMENTS),
    ParamSpec::real("phi_start", 0.0),
    ParamSpec::real("phi_length", FULL_TURN),
    ParamSpec::real("theta_start", 0.0),
    ParamSpec::real("theta_length", HALF_TURN),
];

const TORUS_KNOT_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("torus_radius", DEFAULT_TORUS_KNOT_RADIUS),
    ParamSpec::real("tube_radius", DEFAULT_TORUS_KNOT_TUBE),
    ParamSpec::count("tubular_segments", DEFAULT_TORUS_KNOT_TUBULAR_SEGMENTS),
    ParamSpec::count("radial_segments", DEFAULT_TORUS_KNOT_RADIAL_SEGMENTS),
    ParamSpec::integer("p", DEFAULT_TORUS_KNOT_P),
    ParamSpec::integer("q", DEFAULT_TORUS_KNOT_Q),
];

const POLYHEDRON_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("radius", DEFAULT_POLYHEDRON_RADIUS),
    ParamSpec::count("detail", DEFAULT_POLYHEDRON_DETAIL),
];

const CYLINDER_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("radius_top", DEFAULT_CYLINDER_RADIUS),
    ParamSpec::real("radius_bottom", DEFAULT_CYLINDER_RADIUS),
    ParamSpec::real("height", DEFAULT_CYLINDER_HEIGHT),
    ParamSpec::count("radial_segments", DEFAULT_CYLINDER_RADIAL_SEGMENTS),
    ParamSpec::count("height_segments", DEFAULT_CYLINDER_HEIGHT_SEGMENTS),
    ParamSpec::flag("open_ended", false),
    ParamSpec::real("theta_start", 0.0),
    ParamSpec::real("theta_length", FULL_TURN),
];

const CONE_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("radius", DEFAULT_CYLINDER_RADIUS),
    ParamSpec::real("height", DEFAULT_CYLINDER_HEIGHT),
    ParamSpec::count("radial_segments", DEFAULT_CYLINDER_RADIAL_SEGMENTS),
    ParamSpec::count("height_segments", DEFAULT_CYLINDER_HEIGHT_SEGMENTS),
    ParamSpec::flag("open_ended", false),
    ParamSpec::real("theta_start", 0.0),
    ParamSpec::real("theta_length", FULL_TURN),
];

const CIRCLE_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("radius", DEFAULT_CIRCLE_RADIUS),
    ParamSpec::count("segments", DEFAULT_CIRCLE_SEGMENTS),
    ParamSpec::real("theta_start", 0.0),
    ParamSpec::real("theta_length", FULL_TURN),
];

const PLANE_PARAMS: &[ParamSpec] = &[
    ParamSpec::real("width", DEFAULT_PLANE_SIZE),
    ParamSpec::real("height", DEFAULT_PLANE_SIZE),
    ParamSpec::count("width_segments", DEFAULT_PLANE_SEGMENTS),
    ParamSpec::count("height_segments", DEFAULT_PLANE_SEGMENTS),
];

const EXTRUDE_PARAMS: &[ParamSpec] = &[
    ParamSpec::reals("points"),
    ParamSpec::indices("path_indices"),
    ParamSpec::count("steps", DEFAULT_EXTRUDE_STEPS),
    ParamSpec::real("depth", DEFAULT_EXTRUDE_DEPTH),
    ParamSpec::flag("bevel_enabled", DEFAULT_BEVEL_ENABLED),
    ParamSpec::real("bevel_thickness", DEFAULT_BEVEL_THICKNESS),
    ParamSpec::real("bevel_size", DEFAULT_BEVEL_SIZE),
    ParamSpec::real("bevel_offset", DEFAULT_BEVEL_OFFSET),
    ParamSpec::count("bevel_segments", DEFAULT_BEVEL_SEGMENTS),
];

// =============================================================================
// DESCRIPTOR TABLE
// =============================================================================

/// Every served geometry kind.
pub static DESCRIPTORS: [GeometryDescriptor; 10] = [
    GeometryDescriptor {
        kind: GeometryKind::Box,
        params: BOX_PARAMS,
        build: build_box,
    },
    GeometryDescriptor {
        kind: GeometryKind::Sphere,
        params: SPHERE_PARAMS,
        build: build_sphere,
    },
    GeometryDescriptor {
        kind: GeometryKind::TorusKnot,
        params: TORUS_KNOT_PARAMS,
        build: build_torus_knot,
    },
    GeometryDescriptor {
        kind: GeometryKind::Icosahedron,
        params: POLYHEDRON_PARAMS,
        build: build_icosahedron,
    },
    GeometryDescriptor {
        kind: GeometryKind::Tetrahedron,
        params: POLYHEDRON_PARAMS,
        build: build_tetrahedron,
    },
    GeometryDescriptor {
        kind: GeometryKind::Cylinder,
        params: CYLINDER_PARAMS,
        build: build_cylinder,
    },
    GeometryDescriptor {
        kind: GeometryKind::Cone,
        params: CONE_PARAMS,
        build: build_cone,
    },
    GeometryDescriptor {
        kind: GeometryKind::Circle,
        params: CIRCLE_PARAMS,
        build: build_circle,
    },
    GeometryDescriptor {
        kind: GeometryKind::Plane,
        params: PLANE_PARAMS,
        build: build_plane,
    },
    GeometryDescriptor {
        kind: GeometryKind::Extrude,
        params: EXTRUDE_PARAMS,
        build: build_extrude,
    },
];

/// Looks up the descriptor of `kind`.
pub fn descriptor(kind: GeometryKind) -> Result<&'static GeometryDescriptor, ServiceError> {
    DESCRIPTORS
        .iter()
        .find(|d| d.kind == kind)
        .ok_or_else(|| ServiceError::Unsupported(format!("{:?}", kind)))
}

// =============================================================================
// SERVICE
// =============================================================================

/// Stateless geometry request handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryService;

impl GeometryService {
    pub fn new() -> Self {
        Self
    }

    /// Handles one geometry request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_service::dispatcher::GeometryService;
    /// use geometry_service::protocol::{GeometryKind, GeometryRequest};
    ///
    /// let response = GeometryService::new()
    ///     .handle(&GeometryRequest::new(GeometryKind::Box))
    ///     .unwrap();
    /// assert_eq!(response.position.len(), 24 * 3);
    /// assert_eq!(response.index.unwrap().len(), 36);
    /// ```
    pub fn handle(&self, request: &GeometryRequest) -> Result<GeometryResponse, ServiceError> {
        let _span = debug_span!("geometry", kind = ?request.kind).entered();

        let descriptor = descriptor(request.kind)?;
        let params = ResolvedParams::resolve(descriptor.params, &request.params)?;
        let mesh = (descriptor.build)(&params)?;
        mesh.check_limits()?;

        let wireframe = request.wireframe.unwrap_or(false);
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            wireframe,
            "mesh built"
        );
        serialize_mesh(mesh, wireframe)
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

fn build_box(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_box(&BoxParams {
        width: p.real("width")?,
        height: p.real("height")?,
        depth: p.real("depth")?,
        width_segments: p.count("width_segments")?,
        height_segments: p.count("height_segments")?,
        depth_segments: p.count("depth_segments")?,
    })?)
}

fn build_sphere(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_sphere(&SphereParams {
        radius: p.real("radius")?,
        width_segments: p.count("width_segments")?,
        height_segments: p.count("height_segments")?,
        phi_start: p.real("phi_start")?,
        phi_length: p.real("phi_length")?,
        theta_start: p.real("theta_start")?,
        theta_length: p.real("theta_length")?,
    })?)
}

fn build_torus_knot(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_torus_knot(&TorusKnotParams {
        radius: p.real("torus_radius")?,
        tube: p.real("tube_radius")?,
        tubular_segments: p.count("tubular_segments")?,
        radial_segments: p.count("radial_segments")?,
        p: p.integer("p")? as f64,
        q: p.integer("q")? as f64,
    })?)
}

fn polyhedron_params(p: &ResolvedParams) -> Result<PolyhedronParams, ServiceError> {
    Ok(PolyhedronParams {
        radius: p.real("radius")?,
        detail: p.count("detail")?,
    })
}

fn build_icosahedron(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_icosahedron(&polyhedron_params(p)?)?)
}

fn build_tetrahedron(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_tetrahedron(&polyhedron_params(p)?)?)
}

fn build_cylinder(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_cylinder(&CylinderParams {
        radius_top: p.real("radius_top")?,
        radius_bottom: p.real("radius_bottom")?,
        height: p.real("height")?,
        radial_segments: p.count("radial_segments")?,
        height_segments: p.count("height_segments")?,
        open_ended: p.flag("open_ended")?,
        theta_start: p.real("theta_start")?,
        theta_length: p.real("theta_length")?,
    })?)
}

fn build_cone(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_cone(&ConeParams {
        radius: p.real("radius")?,
        height: p.real("height")?,
        radial_segments: p.count("radial_segments")?,
        height_segments: p.count("height_segments")?,
        open_ended: p.flag("open_ended")?,
        theta_start: p.real("theta_start")?,
        theta_length: p.real("theta_length")?,
    })?)
}

fn build_circle(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_circle(&CircleParams {
        radius: p.real("radius")?,
        segments: p.count("segments")?,
        theta_start: p.real("theta_start")?,
        theta_length: p.real("theta_length")?,
    })?)
}

fn build_plane(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    Ok(create_plane(&PlaneParams {
        width: p.real("width")?,
        height: p.real("height")?,
        width_segments: p.count("width_segments")?,
        height_segments: p.count("height_segments")?,
    })?)
}

fn build_extrude(p: &ResolvedParams) -> Result<Mesh, ServiceError> {
    let shapes = reconstruct(p.reals("points")?, p.indices("path_indices")?)?;
    let settings = ExtrudeSettings {
        steps: p.count("steps")?,
        depth: p.real("depth")?,
        bevel_enabled: p.flag("bevel_enabled")?,
        bevel_thickness: p.real("bevel_thickness")?,
        bevel_size: p.real("bevel_size")?,
        bevel_offset: p.real("bevel_offset")?,
        bevel_segments: p.count("bevel_segments")?,
        curve_segments: DEFAULT_CURVE_SEGMENTS,
    };
    debug!(shapes = shapes.len(), ?settings, "extruding");
    Ok(extrude_shapes(&shapes, &settings)?)
}

