//! Solid mesh generation from a relief height field.
//!
//! Extrudes an H x W thickness field (mm) into a closed solid: the top
//! surface follows the field, the bottom is flat at z = 0, and four side
//! walls stitch the two together along the grid boundary.

use nalgebra::Point3;
use tracing::{debug, info};

use relief_field::ScalarField;

use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;

/// Number of vertices emitted for an H x W field.
#[inline]
pub fn solid_vertex_count(height: usize, width: usize) -> usize {
    2 * height * width
}

/// Number of triangles emitted for an H x W field:
/// two caps plus the four boundary walls.
#[inline]
pub fn solid_triangle_count(height: usize, width: usize) -> usize {
    4 * (height - 1) * (width - 1) + 4 * (height - 1) + 4 * (width - 1)
}

/// Build a closed solid from a thickness field and a uniform pixel scale.
///
/// Sample `(i, j)` maps to `(j * scale, i * scale)` in the xy plane; the top
/// vertex carries the field value as z, the bottom vertex sits at z = 0.
/// Bottom-layer indices are offset by `H * W` from the top layer. Every grid
/// cell is split along the same diagonal (from `(i, j+1)` to `(i+1, j)`), and
/// all triangles are wound counter-clockwise when viewed from outside, so
/// normals face away from the interior and the signed volume is positive.
///
/// No vertex deduplication is performed: caps and walls share indices along
/// the boundary, so the result is a closed 2-manifold by construction.
///
/// Fails before any geometry work when the field is smaller than 2 x 2, when
/// `pixel_scale` is not a positive finite number, or when any thickness
/// sample is not a positive finite number.
pub fn solid_from_field(field: &ScalarField, pixel_scale: f64) -> MeshResult<Mesh> {
    let h = field.height();
    let w = field.width();

    if h < 2 || w < 2 {
        return Err(MeshError::InsufficientResolution {
            height: h,
            width: w,
        });
    }
    if !pixel_scale.is_finite() || pixel_scale <= 0.0 {
        return Err(MeshError::invalid_param(
            "pixel_scale",
            pixel_scale,
            "mm-per-pixel scale must be a positive finite number",
        ));
    }
    if let Some(bad) = field.as_slice().iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(MeshError::invalid_param(
            "thickness",
            *bad as f64,
            "every thickness sample must be a positive finite number of millimeters",
        ));
    }

    let mut mesh = Mesh::with_capacity(solid_vertex_count(h, w), solid_triangle_count(h, w));

    // Top layer, then bottom layer, both row-major.
    for i in 0..h {
        let y = i as f64 * pixel_scale;
        for j in 0..w {
            let x = j as f64 * pixel_scale;
            mesh.vertices.push(Point3::new(x, y, field.get(i, j) as f64));
        }
    }
    for i in 0..h {
        let y = i as f64 * pixel_scale;
        for j in 0..w {
            let x = j as f64 * pixel_scale;
            mesh.vertices.push(Point3::new(x, y, 0.0));
        }
    }

    let offset = (h * w) as u32;
    let idx = |i: usize, j: usize| (i * w + j) as u32;
    let top = |k: u32| k;
    let bot = |k: u32| offset + k;

    // Caps. Cell corners: a=(i,j), b=(i,j+1), c=(i+1,j), d=(i+1,j+1); the
    // shared diagonal is b-c in every cell.
    for i in 0..h - 1 {
        for j in 0..w - 1 {
            let a = idx(i, j);
            let b = idx(i, j + 1);
            let c = idx(i + 1, j);
            let d = idx(i + 1, j + 1);

            // Top cap faces +z.
            mesh.faces.push([top(a), top(b), top(c)]);
            mesh.faces.push([top(b), top(d), top(c)]);

            // Bottom cap mirrors the winding to face -z.
            mesh.faces.push([bot(a), bot(c), bot(b)]);
            mesh.faces.push([bot(b), bot(c), bot(d)]);
        }
    }

    // Walls. Each boundary edge pair contributes one outward-facing quad.
    for j in 0..w - 1 {
        // Row 0 wall faces -y.
        let a = idx(0, j);
        let b = idx(0, j + 1);
        mesh.faces.push([top(b), top(a), bot(a)]);
        mesh.faces.push([bot(a), bot(b), top(b)]);
    }
    for j in 0..w - 1 {
        // Row H-1 wall faces +y.
        let a = idx(h - 1, j);
        let b = idx(h - 1, j + 1);
        mesh.faces.push([top(a), top(b), bot(a)]);
        mesh.faces.push([top(b), bot(b), bot(a)]);
    }
    for i in 0..h - 1 {
        // Column 0 wall faces -x.
        let a = idx(i, 0);
        let b = idx(i + 1, 0);
        mesh.faces.push([top(a), top(b), bot(a)]);
        mesh.faces.push([top(b), bot(b), bot(a)]);
    }
    for i in 0..h - 1 {
        // Column W-1 wall faces +x.
        let a = idx(i, w - 1);
        let b = idx(i + 1, w - 1);
        mesh.faces.push([top(b), top(a), bot(a)]);
        mesh.faces.push([bot(a), bot(b), top(b)]);
    }

    debug_assert_eq!(mesh.vertex_count(), solid_vertex_count(h, w));
    debug_assert_eq!(mesh.face_count(), solid_triangle_count(h, w));

    info!(
        rows = h,
        cols = w,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Generated solid mesh"
    );
    debug!(
        footprint_mm = format!(
            "{:.2} x {:.2}",
            (w - 1) as f64 * pixel_scale,
            (h - 1) as f64 * pixel_scale
        ),
        "Solid footprint"
    );

    Ok(mesh)
}
