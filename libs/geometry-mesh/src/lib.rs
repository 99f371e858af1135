//! # Geometry Mesh
//!
//! Procedural geometry construction. Builds triangle meshes for the
//! parametric primitives and for extruded 2D shapes, laid out as flat
//! attribute buffers ready to be sent over the wire.
//!
//! ## Architecture
//!
//! ```text
//! primitives (box, sphere, ...) ──┐
//!                                 ├─→ Mesh ─→ wireframe / MeshBuffers
//! shape (Path, Shape) → extrude ──┘
//! ```
//!
//! ## Conventions
//!
//! - Vertices are computed in f64 and stored as f32
//! - Y is up; shapes are extruded along +Z
//! - Front faces are counter-clockwise
//! - Vertex order, UV layout and normals follow the three.js geometry
//!   classes so callers can compare buffers against that toolkit
//!
//! ## Usage
//!
//! ```rust
//! use geometry_mesh::primitives::{create_box, BoxParams};
//!
//! let mesh = create_box(&BoxParams::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), 24);
//! assert_eq!(mesh.triangle_count(), 12);
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod shape;
pub mod wireframe;

pub use error::MeshError;
pub use mesh::{Mesh, MeshBuffers};
pub use ops::extrude::{extrude_shapes, ExtrudeSettings};
pub use shape::{Path, Shape, ShapeUtils};
pub use wireframe::wireframe_positions;
