//! # Shape Extrusion
//!
//! Sweeps 2D shapes with holes along +Z into a closed solid.
//!
//! ## Layout
//!
//! Each shape is sampled into a contour plus holes and laid out as layers
//! of `vlen` vertices (contour first, then each hole):
//!
//! ```text
//! back bevel rings   z = -bevel_thickness .. 0   (bevel_segments layers)
//! back face          z = 0
//! steps              z = depth / steps * s       (steps layers)
//! front bevel rings  z = depth .. depth + bevel_thickness
//! ```
//!
//! Caps are triangulated with earcut on the first and last layer; every
//! consecutive pair of layers is joined by a side wall. The output is
//! non-indexed with flat normals and world-space UVs.

mod bevel;
mod uv;


use config::constants::{
    DEFAULT_BEVEL_ENABLED, DEFAULT_BEVEL_OFFSET, DEFAULT_BEVEL_SEGMENTS, DEFAULT_BEVEL_SIZE,
    DEFAULT_BEVEL_THICKNESS, DEFAULT_CURVE_SEGMENTS, DEFAULT_EXTRUDE_DEPTH, DEFAULT_EXTRUDE_STEPS,
    MAX_SEGMENTS,
};
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

use crate::error::MeshError;
use crate::mesh::Mesh;
use crate::primitives::{check_finite, check_segments};
use crate::shape::{Shape, ShapePoints, ShapeUtils};

use bevel::bevel_vectors;
use uv::{side_wall_uvs, top_uv};

/// Parameters for [`extrude_shapes`].
///
/// # Example
///
/// ```rust
/// use geometry_mesh::ExtrudeSettings;
///
/// let settings = ExtrudeSettings {
///     depth: 2.0,
///     bevel_enabled: true,
///     ..Default::default()
/// };
/// assert_eq!(settings.steps, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudeSettings {
    /// Subdivisions along the depth
    pub steps: u32,
    /// Extrusion distance along +Z
    pub depth: f64,
    pub bevel_enabled: bool,
    /// How far the bevel extends beyond each cap along Z
    pub bevel_thickness: f64,
    /// How far the bevel extends from the outline in XY
    pub bevel_size: f64,
    /// Outline offset at which the bevel starts
    pub bevel_offset: f64,
    pub bevel_segments: u32,
    /// Points each curve is sampled into
    pub curve_segments: u32,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_EXTRUDE_STEPS as u32,
            depth: DEFAULT_EXTRUDE_DEPTH,
            bevel_enabled: DEFAULT_BEVEL_ENABLED,
            bevel_thickness: DEFAULT_BEVEL_THICKNESS,
            bevel_size: DEFAULT_BEVEL_SIZE,
            bevel_offset: DEFAULT_BEVEL_OFFSET,
            bevel_segments: DEFAULT_BEVEL_SEGMENTS as u32,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

impl ExtrudeSettings {
    /// Checks every field is usable.
    pub fn validate(&self) -> Result<(), MeshError> {
        check_segments("steps", self.steps)?;
        check_segments("curve_segments", self.curve_segments)?;
        check_finite("depth", self.depth)?;
        check_finite("bevel_thickness", self.bevel_thickness)?;
        check_finite("bevel_size", self.bevel_size)?;
        check_finite("bevel_offset", self.bevel_offset)?;
        if self.bevel_segments > MAX_SEGMENTS {
            return Err(MeshError::invalid_parameter(
                "bevel_segments",
                format!("must be at most {}, got {}", MAX_SEGMENTS, self.bevel_segments),
            ));
        }
        Ok(())
    }

    /// Settings with every bevel dimension zeroed when bevels are disabled.
    fn effective(&self) -> Self {
        if self.bevel_enabled {
            *self
        } else {
            Self {
                bevel_thickness: 0.0,
                bevel_size: 0.0,
                bevel_offset: 0.0,
                bevel_segments: 0,
                ..*self
            }
        }
    }

    /// Number of side-wall layers between the two caps.
    fn wall_layers(&self) -> usize {
        self.steps as usize + 2 * self.bevel_segments as usize
    }
}

/// Extrudes shapes into one mesh.
///
/// # Arguments
///
/// * `shapes` - Outlines with their holes, any winding
/// * `settings` - Depth, steps and bevel
///
/// # Returns
///
/// A non-indexed mesh with position, normal and uv buffers. Each shape
/// contributes `2 * caps + 2 * wall_layers * (contour + holes)` triangles.
///
/// # Example
///
/// ```rust
/// use geometry_mesh::{extrude_shapes, ExtrudeSettings, Path, Shape};
/// use glam::DVec2;
///
/// let mut outline = Path::new();
/// outline
///     .move_to(DVec2::new(0.0, 0.0))
///     .quadratic_curve_to(DVec2::new(1.0, 0.0), DVec2::new(2.0, 0.0))
///     .quadratic_curve_to(DVec2::new(2.0, 1.0), DVec2::new(2.0, 2.0))
///     .quadratic_curve_to(DVec2::new(1.0, 1.0), DVec2::new(0.0, 0.0));
///
/// let mesh = extrude_shapes(&[Shape::new(outline)], &ExtrudeSettings::default()).unwrap();
/// assert!(!mesh.is_indexed());
/// assert!(mesh.triangle_count() > 0);
/// ```
pub fn extrude_shapes(shapes: &[Shape], settings: &ExtrudeSettings) -> Result<Mesh, MeshError> {
    settings.validate()?;
    if shapes.is_empty() {
        return Err(MeshError::degenerate("no shapes to extrude"));
    }

    let settings = settings.effective();
    let mut out = ExtrudeOutput::default();
    for shape in shapes {
        add_shape(&mut out, shape, &settings)?;
    }

    let mut mesh = Mesh::with_capacity(out.positions.len());
    for position in &out.positions {
        mesh.push_position(*position);
    }
    let mut uvs = Vec::with_capacity(out.uvs.len() * 2);
    for uv in &out.uvs {
        uvs.push(uv.x as f32);
        uvs.push(uv.y as f32);
    }
    mesh.set_uvs(uvs);
    mesh.compute_vertex_normals();

    mesh.check_limits()?;
    Ok(mesh)
}

/// Triangle soup accumulated across shapes.
#[derive(Default)]
struct ExtrudeOutput {
    positions: Vec<DVec3>,
    uvs: Vec<DVec2>,
}

impl ExtrudeOutput {
    /// Adds a cap triangle.
    fn push_face3(&mut self, layers: &[DVec3], a: usize, b: usize, c: usize) {
        for i in [a, b, c] {
            self.positions.push(layers[i]);
            self.uvs.push(top_uv(layers[i]));
        }
    }

    /// Adds a side-wall quad as triangles `a, b, d` and `b, c, d`.
    fn push_face4(&mut self, layers: &[DVec3], a: usize, b: usize, c: usize, d: usize) {
        let [uv_a, uv_b, uv_c, uv_d] = side_wall_uvs(layers[a], layers[b], layers[c], layers[d]);
        self.positions
            .extend_from_slice(&[layers[a], layers[b], layers[d], layers[b], layers[c], layers[d]]);
        self.uvs
            .extend_from_slice(&[uv_a, uv_b, uv_d, uv_b, uv_c, uv_d]);
    }
}

fn add_shape(
    out: &mut ExtrudeOutput,
    shape: &Shape,
    settings: &ExtrudeSettings,
) -> Result<(), MeshError> {
    let ShapePoints {
        outline: mut contour,
        mut holes,
    } = shape.extract_points(settings.curve_segments);

    // Contour clockwise, holes counter-clockwise
    if !ShapeUtils::is_clockwise(&contour) {
        contour.reverse();
        for hole in &mut holes {
            if ShapeUtils::is_clockwise(hole) {
                hole.reverse();
            }
        }
    }

    let faces = ShapeUtils::triangulate_shape(&mut contour, &mut holes)?;

    let vertices: Vec<DVec2> = contour
        .iter()
        .chain(holes.iter().flatten())
        .copied()
        .collect();
    let movements: Vec<DVec2> = std::iter::once(bevel_vectors(&contour))
        .chain(holes.iter().map(|h| bevel_vectors(h)))
        .flatten()
        .collect();
    let vlen = vertices.len();
    let bevel_segments = settings.bevel_segments;

    let mut layers: Vec<DVec3> = Vec::with_capacity(vlen * (settings.wall_layers() + 1));
    let push_layer = |layers: &mut Vec<DVec3>, bs: f64, z: f64, offset: bool| {
        for (vertex, movement) in vertices.iter().zip(&movements) {
            let p = if offset { *vertex + *movement * bs } else { *vertex };
            layers.push(p.extend(z));
        }
    };

    // Back bevel, from the cap towards the back face
    for b in 0..bevel_segments {
        let (z, bs) = bevel_ring(b, settings);
        push_layer(&mut layers, bs, -z, true);
    }

    // Back face and steps
    let bs = settings.bevel_size + settings.bevel_offset;
    for s in 0..=settings.steps {
        let z = settings.depth / f64::from(settings.steps) * f64::from(s);
        push_layer(&mut layers, bs, z, settings.bevel_enabled);
    }

    // Front bevel, from the front face towards the cap
    for b in (0..bevel_segments).rev() {
        let (z, bs) = bevel_ring(b, settings);
        push_layer(&mut layers, bs, settings.depth + z, true);
    }

    // Lids
    let top = vlen * settings.wall_layers();
    for face in &faces {
        out.push_face3(&layers, face[2], face[1], face[0]);
    }
    for face in &faces {
        out.push_face3(&layers, face[0] + top, face[1] + top, face[2] + top);
    }

    // Side walls
    let mut layer_offset = 0;
    for ring_len in std::iter::once(contour.len()).chain(holes.iter().map(Vec::len)) {
        side_walls(out, &layers, ring_len, layer_offset, vlen, settings.wall_layers());
        layer_offset += ring_len;
    }

    Ok(())
}

/// Z offset and outline offset of bevel ring `b`.
fn bevel_ring(b: u32, settings: &ExtrudeSettings) -> (f64, f64) {
    let t = f64::from(b) / f64::from(settings.bevel_segments);
    let z = settings.bevel_thickness * (t * PI / 2.0).cos();
    let bs = settings.bevel_size * (t * PI / 2.0).sin() + settings.bevel_offset;
    (z, bs)
}

fn side_walls(
    out: &mut ExtrudeOutput,
    layers: &[DVec3],
    ring_len: usize,
    layer_offset: usize,
    vlen: usize,
    wall_layers: usize,
) {
    for j in (0..ring_len).rev() {
        let k = if j == 0 { ring_len - 1 } else { j - 1 };
        for s in 0..wall_layers {
            let slen1 = vlen * s;
            let slen2 = vlen * (s + 1);
            let a = layer_offset + j + slen1;
            let b = layer_offset + k + slen1;
            let c = layer_offset + k + slen2;
            let d = layer_offset + j + slen2;
            out.push_face4(layers, a, b, c, d);
        }
    }
}
