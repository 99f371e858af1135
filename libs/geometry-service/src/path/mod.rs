//! # Path Reconstruction
//!
//! Rebuilds extrudable shapes from the flat point stream of an extrude
//! request.
//!
//! ## Pipeline
//!
//! ```text
//! [x, y, w, x, y, w, ...] ──group──→ points
//!                         ──split──→ subpaths (at boundary indices)
//!                         ──classify──→ shapes with holes
//!                         ──curves──→ geometry_mesh::Shape
//! ```
//!
//! A subpath is a hole when its first point lies inside the most recently
//! classified shape; otherwise it starts a new shape. Every subpath is a
//! chain of quadratic curves: `anchor, control, destination` triples.


use geometry_mesh::{Path, Shape};
use glam::DVec2;

use crate::error::PathError;

/// Points of one subpath, tagged with its position in the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    /// Index of the subpath in the boundary list
    pub index: usize,
    pub points: Vec<DVec2>,
}

impl Subpath {
    pub fn new(index: usize, points: Vec<DVec2>) -> Self {
        Self { index, points }
    }
}

/// An outer boundary with the holes cut out of it, as raw points.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescription {
    pub outline: Subpath,
    pub holes: Vec<Subpath>,
}

impl ShapeDescription {
    /// Even-odd containment over the outline and every hole.
    ///
    /// A point inside one of the holes is outside the region.
    pub fn region_contains(&self, point: DVec2) -> bool {
        std::iter::once(&self.outline)
            .chain(&self.holes)
            .filter(|ring| point_in_polygon(point, &ring.points))
            .count()
            % 2
            == 1
    }

    /// Builds the curve-based shape handed to the extrusion builder.
    pub fn to_shape(&self) -> Result<Shape, PathError> {
        let outline = build_curves(&self.outline)?;
        let holes = self
            .holes
            .iter()
            .map(build_curves)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Shape::with_holes(outline, holes))
    }
}

/// Reconstructs shapes from a raw point stream and subpath boundaries.
///
/// # Arguments
///
/// * `points` - Flat stream of `(x, y, w)` triples; `w` is ignored
/// * `path_indices` - Point index at which each subpath starts
///
/// # Errors
///
/// Malformed streams and boundaries are rejected, as are empty subpaths
/// and holes that do not directly follow the shape containing them.
///
/// # Example
///
/// ```rust
/// use geometry_service::path::reconstruct;
///
/// let points = [
///     0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 4.0, 0.0, 0.0,
///     4.0, 4.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0,
/// ];
/// let shapes = reconstruct(&points, &[0]).unwrap();
/// assert_eq!(shapes.len(), 1);
/// assert_eq!(shapes[0].outline.curve_count(), 2);
/// ```
pub fn reconstruct(points: &[f64], path_indices: &[u32]) -> Result<Vec<Shape>, PathError> {
    let grouped = group_points(points)?;
    let subpaths = split_subpaths(&grouped, path_indices)?;
    let descriptions = classify(&subpaths)?;
    descriptions.iter().map(ShapeDescription::to_shape).collect()
}

/// Groups a flat stream into points, one per `(x, y, w)` triple.
pub fn group_points(stream: &[f64]) -> Result<Vec<DVec2>, PathError> {
    if stream.is_empty() {
        return Err(PathError::EmptyPoints);
    }
    if stream.len() % 3 != 0 {
        return Err(PathError::UngroupedPoints { len: stream.len() });
    }
    Ok(stream
        .chunks_exact(3)
        .map(|triple| DVec2::new(triple[0], triple[1]))
        .collect())
}

/// Slices grouped points into subpaths.
///
/// The point count is appended as an implicit final boundary, so the last
/// subpath always runs to the end of the points. Boundaries must be
/// non-decreasing and within the point count.
pub fn split_subpaths<'a>(
    points: &'a [DVec2],
    boundaries: &[u32],
) -> Result<Vec<&'a [DVec2]>, PathError> {
    if boundaries.is_empty() {
        return Err(PathError::NoSubpaths);
    }

    let count = points.len();
    let mut previous = 0usize;
    for (position, &index) in boundaries.iter().enumerate() {
        let start = index as usize;
        if start > count {
            return Err(PathError::BoundaryOutOfRange { index, count });
        }
        if start < previous {
            return Err(PathError::DecreasingBoundary { position, index });
        }
        previous = start;
    }

    let ends = boundaries.iter().skip(1).map(|&i| i as usize).chain(Some(count));
    Ok(boundaries
        .iter()
        .map(|&i| i as usize)
        .zip(ends)
        .map(|(start, end)| &points[start..end])
        .collect())
}

/// Even-odd containment test with a ray cast towards +x.
///
/// Points exactly on an edge may land either side. Polygons with fewer
/// than three vertices contain nothing.
///
/// # Example
///
/// ```rust
/// use geometry_service::path::point_in_polygon;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(4.0, 0.0),
///     DVec2::new(4.0, 4.0),
///     DVec2::new(0.0, 4.0),
/// ];
/// assert!(point_in_polygon(DVec2::new(2.0, 2.0), &square));
/// assert!(!point_in_polygon(DVec2::new(5.0, 5.0), &square));
/// ```
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        // The y test guarantees pj.y != pi.y in the division
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Classifies subpaths in input order into shapes with holes.
pub fn classify(subpaths: &[&[DVec2]]) -> Result<Vec<ShapeDescription>, PathError> {
    let mut shapes: Vec<ShapeDescription> = Vec::new();

    for (subpath, points) in subpaths.iter().enumerate() {
        let anchor = match points.first() {
            Some(p) => *p,
            None => return Err(PathError::EmptySubpath { subpath }),
        };

        if let Some(current) = shapes.last_mut() {
            if point_in_polygon(anchor, &current.outline.points) {
                current.holes.push(Subpath::new(subpath, points.to_vec()));
                continue;
            }
        }

        // Not inside the latest shape. Inside the filled region of an
        // earlier one means the hole was emitted out of order; inside one
        // of its holes is an island and starts a new shape.
        let earlier = shapes.len().saturating_sub(1);
        if let Some(shape) = shapes[..earlier]
            .iter()
            .find(|s| s.region_contains(anchor))
        {
            return Err(PathError::MisorderedHole {
                subpath,
                shape: shape.outline.index,
            });
        }

        shapes.push(ShapeDescription {
            outline: Subpath::new(subpath, points.to_vec()),
            holes: Vec::new(),
        });
    }

    Ok(shapes)
}

/// Turns `anchor, control, destination` triples into a path of quadratic
/// curves.
///
/// The pen moves to the first point once; each triple then contributes a
/// curve through its second point to its third.
fn build_curves(subpath: &Subpath) -> Result<Path, PathError> {
    let points = &subpath.points;
    let subpath = subpath.index;
    if points.is_empty() {
        return Err(PathError::EmptySubpath { subpath });
    }
    if points.len() % 3 != 0 {
        return Err(PathError::IncompleteCurve {
            subpath,
            len: points.len(),
        });
    }

    let mut path = Path::new();
    path.move_to(points[0]);
    for triple in points.chunks_exact(3) {
        path.quadratic_curve_to(triple[1], triple[2]);
    }
    Ok(path)
}
