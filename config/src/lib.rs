//! # Config Crate
//!
//! Centralized configuration constants for the procedural geometry service.
//! Parameter defaults, tessellation settings, safety limits and network
//! settings are defined here so the mesh builders, the request dispatcher
//! and the server agree on a single set of values.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_BOX_SIZE, DEFAULT_EXTRUDE_DEPTH};
//!
//! let width: Option<f64> = None;
//! assert_eq!(width.unwrap_or(DEFAULT_BOX_SIZE), 1.0);
//! assert_eq!(DEFAULT_EXTRUDE_DEPTH, 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Canonical Defaults**: Geometry defaults match the reference toolkit
//!   the test harness compares against
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
