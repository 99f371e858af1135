//! # Curves
//!
//! 2D curve segments a [`Path`](super::Path) is made of.

use glam::DVec2;

/// A quadratic Bezier segment from `start` through control point `control`
/// to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    pub start: DVec2,
    pub control: DVec2,
    pub end: DVec2,
}

impl QuadraticBezier {
    /// Creates a new quadratic segment.
    pub fn new(start: DVec2, control: DVec2, end: DVec2) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let k = 1.0 - t;
        self.start * (k * k) + self.control * (2.0 * k * t) + self.end * (t * t)
    }

    /// Samples `divisions + 1` evenly spaced points, both ends included.
    pub fn sample(&self, divisions: u32) -> Vec<DVec2> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point_at(f64::from(d) / f64::from(divisions)))
            .collect()
    }
}
