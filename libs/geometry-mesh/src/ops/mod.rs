//! # Mesh Operations
//!
//! Operations that turn 2D input into meshes.

pub mod extrude;
