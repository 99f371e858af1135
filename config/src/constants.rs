//! # Configuration Constants
//!
//! Centralized constants for the geometry service. All parameter defaults,
//! tessellation settings and transport limits are defined here.
//!
//! ## Categories
//!
//! - **Angles**: Full and half turn in radians
//! - **Primitive Defaults**: One block per geometry kind
//! - **Extrusion Defaults**: Extrude settings and curve tessellation
//! - **Material Scene**: Cameras and lights of the material render scene
//! - **Limits**: Maximum values for safety bounds
//! - **Network**: Bind address and frame limits

use std::f64::consts::{PI, TAU};

// =============================================================================
// ANGLE CONSTANTS
// =============================================================================

/// A full revolution in radians.
///
/// Default sweep for every primitive that takes a `theta_length` or
/// `phi_length` parameter.
pub const FULL_TURN: f64 = TAU;

/// Half a revolution in radians.
///
/// Default polar sweep (`theta_length`) of a sphere.
pub const HALF_TURN: f64 = PI;

// =============================================================================
// BOX DEFAULTS
// =============================================================================

/// Default width, height and depth of a box.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_BOX_SIZE;
///
/// let requested: Option<f64> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_BOX_SIZE), 1.0);
/// ```
pub const DEFAULT_BOX_SIZE: f64 = 1.0;

/// Default segment count along each box axis.
pub const DEFAULT_BOX_SEGMENTS: i64 = 1;

// =============================================================================
// SPHERE DEFAULTS
// =============================================================================

/// Default sphere radius.
pub const DEFAULT_SPHERE_RADIUS: f64 = 1.0;

/// Default number of horizontal (longitude) segments of a sphere.
pub const DEFAULT_SPHERE_WIDTH_SEGMENTS: i64 = 8;

/// Default number of vertical (latitude) segments of a sphere.
pub const DEFAULT_SPHERE_HEIGHT_SEGMENTS: i64 = 6;

/// Minimum number of horizontal segments a sphere is built with.
pub const MIN_SPHERE_WIDTH_SEGMENTS: u32 = 3;

/// Minimum number of vertical segments a sphere is built with.
pub const MIN_SPHERE_HEIGHT_SEGMENTS: u32 = 2;

// =============================================================================
// TORUS KNOT DEFAULTS
// =============================================================================

/// Default radius of the torus the knot winds around.
pub const DEFAULT_TORUS_KNOT_RADIUS: f64 = 1.0;

/// Default radius of the knot's tube.
pub const DEFAULT_TORUS_KNOT_TUBE: f64 = 0.4;

/// Default number of segments along the knot.
pub const DEFAULT_TORUS_KNOT_TUBULAR_SEGMENTS: i64 = 64;

/// Default number of segments around the tube.
pub const DEFAULT_TORUS_KNOT_RADIAL_SEGMENTS: i64 = 8;

/// Default number of windings around the axis of rotational symmetry.
pub const DEFAULT_TORUS_KNOT_P: i64 = 2;

/// Default number of windings around the interior circle of the torus.
pub const DEFAULT_TORUS_KNOT_Q: i64 = 3;

/// Curve parameter offset used to estimate the knot's tangent frame.
pub const TORUS_KNOT_TANGENT_STEP: f64 = 0.01;

// =============================================================================
// POLYHEDRON DEFAULTS
// =============================================================================

/// Default circumradius of icosahedra and tetrahedra.
pub const DEFAULT_POLYHEDRON_RADIUS: f64 = 1.0;

/// Default subdivision level of icosahedra and tetrahedra.
pub const DEFAULT_POLYHEDRON_DETAIL: i64 = 0;

// =============================================================================
// CYLINDER / CONE DEFAULTS
// =============================================================================

/// Default top and bottom radius of a cylinder, and base radius of a cone.
pub const DEFAULT_CYLINDER_RADIUS: f64 = 1.0;

/// Default height of cylinders and cones.
pub const DEFAULT_CYLINDER_HEIGHT: f64 = 1.0;

/// Default number of segments around a cylinder or cone.
pub const DEFAULT_CYLINDER_RADIAL_SEGMENTS: i64 = 8;

/// Default number of rows of faces along a cylinder or cone.
pub const DEFAULT_CYLINDER_HEIGHT_SEGMENTS: i64 = 1;

// =============================================================================
// CIRCLE / PLANE DEFAULTS
// =============================================================================

/// Default circle radius.
pub const DEFAULT_CIRCLE_RADIUS: f64 = 1.0;

/// Default number of circle segments.
pub const DEFAULT_CIRCLE_SEGMENTS: i64 = 8;

/// Minimum number of segments a circle is built with.
pub const MIN_CIRCLE_SEGMENTS: u32 = 3;

/// Default plane width and height.
pub const DEFAULT_PLANE_SIZE: f64 = 1.0;

/// Default number of plane segments along each axis.
pub const DEFAULT_PLANE_SEGMENTS: i64 = 1;

// =============================================================================
// EXTRUSION DEFAULTS
// =============================================================================

/// Default number of subdivisions along the extrusion depth.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EXTRUDE_STEPS;
///
/// let steps: Option<i64> = Some(0);
/// // Zero is treated as "unset" by the service, so it falls back.
/// let resolved = steps.filter(|s| *s != 0).unwrap_or(DEFAULT_EXTRUDE_STEPS);
/// assert_eq!(resolved, 1);
/// ```
pub const DEFAULT_EXTRUDE_STEPS: i64 = 1;

/// Default extrusion depth along +z.
pub const DEFAULT_EXTRUDE_DEPTH: f64 = 1.0;

/// Bevels are disabled unless requested.
pub const DEFAULT_BEVEL_ENABLED: bool = false;

/// Default depth of the bevel into the original shape.
pub const DEFAULT_BEVEL_THICKNESS: f64 = 0.1;

/// Default distance from the shape outline the bevel extends.
pub const DEFAULT_BEVEL_SIZE: f64 = 0.1;

/// Default distance from the outline at which the bevel starts.
pub const DEFAULT_BEVEL_OFFSET: f64 = 0.0;

/// Default number of bevel layers.
pub const DEFAULT_BEVEL_SEGMENTS: i64 = 8;

/// Number of points each curve segment is sampled into before extrusion.
///
/// A quadratic curve sampled with this value contributes
/// `DEFAULT_CURVE_SEGMENTS + 1` points (shared end points are merged).
pub const DEFAULT_CURVE_SEGMENTS: u32 = 12;

/// Tolerance below which two bevel edge directions are treated as collinear.
pub const BEVEL_COLLINEAR_EPSILON: f64 = f64::EPSILON;

// =============================================================================
// MATERIAL SCENE CONSTANTS
// =============================================================================

/// Vertical field of view of the perspective camera, in degrees.
pub const PERSPECTIVE_FOV_DEGREES: f64 = 45.0;

/// Near and far clip planes of the perspective camera.
pub const PERSPECTIVE_CLIP: (f64, f64) = (0.1, 100.0);

/// Left, right, top and bottom planes of the orthographic camera.
pub const ORTHOGRAPHIC_FRUSTUM: [f64; 4] = [-7.1, 7.1, 4.0, -4.0];

/// Near and far clip planes of the orthographic camera.
pub const ORTHOGRAPHIC_CLIP: (f64, f64) = (1.0, 21.0);

/// Distance of both cameras from the origin along +z.
pub const CAMERA_DISTANCE: f64 = 11.0;

/// Intensity of the point light in lit material scenes.
pub const POINT_LIGHT_INTENSITY: f64 = 5.0;

/// Cutoff distance of the point light.
pub const POINT_LIGHT_DISTANCE: f64 = 100.0;

/// Intensity of the hemisphere light in lit material scenes.
pub const HEMISPHERE_LIGHT_INTENSITY: f64 = 1.0;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum segment count accepted for any primitive axis.
///
/// Keeps a single request from allocating an unbounded grid.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_SEGMENTS;
///
/// let requested = 64_u32;
/// assert!(requested <= MAX_SEGMENTS);
/// ```
pub const MAX_SEGMENTS: u32 = 10_000;

/// Maximum polyhedron subdivision level.
///
/// Face count grows with `(detail + 1)^2`.
pub const MAX_POLYHEDRON_DETAIL: u32 = 256;

/// Maximum number of vertices in a single mesh.
///
/// Safety limit to prevent memory exhaustion from extremely complex requests.
pub const MAX_VERTICES: usize = 10_000_000;

// =============================================================================
// NETWORK CONSTANTS
// =============================================================================

/// Address the server binds at startup.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:50051";

/// Pause before accepting again after a failed accept, in milliseconds.
///
/// Keeps the accept loop from spinning while file descriptors are
/// exhausted.
pub const ACCEPT_RETRY_DELAY_MS: u64 = 100;

/// Size of the big-endian length prefix in front of every frame.
pub const FRAME_HEADER_BYTES: usize = 4;

/// Maximum payload size of a single frame (64 MiB).
///
/// Large enough for a finely tessellated torus knot, small enough that a
/// corrupt length prefix cannot trigger a huge allocation.
pub const MAX_FRAME_BYTES: usize = 64 * 1024 * 1024;
