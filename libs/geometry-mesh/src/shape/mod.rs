//! # 2D Shapes
//!
//! Paths built from curve segments, shapes with holes, and the polygon
//! utilities the extrusion builder relies on.
//!
//! ## Example
//!
//! ```rust
//! use geometry_mesh::{Path, Shape};
//! use glam::DVec2;
//!
//! let mut outline = Path::new();
//! outline.move_to(DVec2::new(0.0, 0.0));
//! outline.quadratic_curve_to(DVec2::new(2.0, 0.0), DVec2::new(4.0, 0.0));
//! outline.quadratic_curve_to(DVec2::new(0.0, 4.0), DVec2::new(0.0, 0.0));
//!
//! let shape = Shape::new(outline);
//! assert_eq!(shape.outline.curve_count(), 2);
//! ```

mod curves;
mod utils;

#[cfg(test)]
mod tests;

pub use curves::QuadraticBezier;
pub use utils::ShapeUtils;

use glam::DVec2;

/// An open sequence of connected curve segments.
///
/// The pen starts at the origin. `move_to` repositions it without drawing;
/// each curve starts where the previous one ended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    curves: Vec<QuadraticBezier>,
    current: DVec2,
}

impl Path {
    /// Creates an empty path with the pen at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the pen to `point`.
    pub fn move_to(&mut self, point: DVec2) -> &mut Self {
        self.current = point;
        self
    }

    /// Appends a quadratic curve from the pen through `control` to `end`.
    pub fn quadratic_curve_to(&mut self, control: DVec2, end: DVec2) -> &mut Self {
        self.curves
            .push(QuadraticBezier::new(self.current, control, end));
        self.current = end;
        self
    }

    /// Returns the curve segments in drawing order.
    pub fn curves(&self) -> &[QuadraticBezier] {
        &self.curves
    }

    /// Returns the number of curve segments.
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Returns the current pen position.
    pub fn current_point(&self) -> DVec2 {
        self.current
    }

    /// Samples the path into a polyline.
    ///
    /// Each curve contributes `divisions + 1` points; a point equal to the one
    /// before it is skipped, so shared segment ends appear once.
    pub fn points(&self, divisions: u32) -> Vec<DVec2> {
        let mut points: Vec<DVec2> = Vec::new();
        for curve in &self.curves {
            for point in curve.sample(divisions) {
                if points.last() == Some(&point) {
                    continue;
                }
                points.push(point);
            }
        }
        points
    }
}

/// A closed outline with zero or more holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    /// Outer boundary
    pub outline: Path,
    /// Regions cut out of the outline
    pub holes: Vec<Path>,
}

/// Sampled outline and holes of a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShapePoints {
    pub outline: Vec<DVec2>,
    pub holes: Vec<Vec<DVec2>>,
}

impl Shape {
    /// Creates a shape without holes.
    pub fn new(outline: Path) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    /// Creates a shape with holes.
    pub fn with_holes(outline: Path, holes: Vec<Path>) -> Self {
        Self { outline, holes }
    }

    /// Adds a hole.
    pub fn add_hole(&mut self, hole: Path) {
        self.holes.push(hole);
    }

    /// Samples outline and holes with `divisions` points per curve.
    pub fn extract_points(&self, divisions: u32) -> ShapePoints {
        ShapePoints {
            outline: self.outline.points(divisions),
            holes: self.holes.iter().map(|h| h.points(divisions)).collect(),
        }
    }
}
