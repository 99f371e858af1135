//! # Shape Utilities
//!
//! Polygon area, winding and earcut triangulation.

use glam::DVec2;

use crate::error::MeshError;

/// Stateless helpers on 2D polygons given as point lists.
pub struct ShapeUtils;

impl ShapeUtils {
    /// Signed area of a closed polygon (shoelace formula).
    ///
    /// Positive for counter-clockwise winding.
    pub fn area(contour: &[DVec2]) -> f64 {
        let n = contour.len();
        if n == 0 {
            return 0.0;
        }
        let mut a = 0.0;
        let mut p = n - 1;
        for q in 0..n {
            a += contour[p].x * contour[q].y - contour[q].x * contour[p].y;
            p = q;
        }
        a * 0.5
    }

    /// Returns true if the polygon winds clockwise.
    pub fn is_clockwise(points: &[DVec2]) -> bool {
        Self::area(points) < 0.0
    }

    /// Drops the last point if it repeats the first.
    pub fn remove_duplicate_end_point(points: &mut Vec<DVec2>) {
        let n = points.len();
        if n > 2 && points[n - 1] == points[0] {
            points.pop();
        }
    }

    /// Triangulates a contour with holes.
    ///
    /// Duplicate end points are removed from `contour` and every hole in
    /// place first. Returned faces index into the concatenation of the
    /// contour followed by each hole in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geometry_mesh::ShapeUtils;
    /// use glam::DVec2;
    ///
    /// let mut square = vec![
    ///     DVec2::new(0.0, 0.0),
    ///     DVec2::new(1.0, 0.0),
    ///     DVec2::new(1.0, 1.0),
    ///     DVec2::new(0.0, 1.0),
    /// ];
    /// let faces = ShapeUtils::triangulate_shape(&mut square, &mut []).unwrap();
    /// assert_eq!(faces.len(), 2);
    /// ```
    pub fn triangulate_shape(
        contour: &mut Vec<DVec2>,
        holes: &mut [Vec<DVec2>],
    ) -> Result<Vec<[usize; 3]>, MeshError> {
        Self::remove_duplicate_end_point(contour);
        for hole in holes.iter_mut() {
            Self::remove_duplicate_end_point(hole);
        }

        let total = contour.len() + holes.iter().map(Vec::len).sum::<usize>();
        let mut data = Vec::with_capacity(total * 2);
        let mut hole_indices = Vec::with_capacity(holes.len());

        push_flat(&mut data, contour);
        let mut hole_start = contour.len();
        for hole in holes.iter() {
            hole_indices.push(hole_start);
            hole_start += hole.len();
            push_flat(&mut data, hole);
        }

        let triangles = earcutr::earcut(&data, &hole_indices, 2)
            .map_err(|e| MeshError::triangulation(format!("{:?}", e)))?;

        Ok(triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect())
    }
}

fn push_flat(data: &mut Vec<f64>, points: &[DVec2]) {
    for p in points {
        data.push(p.x);
        data.push(p.y);
    }
}
