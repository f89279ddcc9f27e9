//! Mesh validation and reporting.

use nalgebra::Point3;
use tracing::{debug, warn};

use crate::adjacency::EdgeMap;
use crate::types::Mesh;

/// Validation report for a generated solid.
#[derive(Debug, Clone)]
pub struct MeshReport {
    /// Whether the mesh has no boundary edges.
    pub is_watertight: bool,

    /// Whether all edges have at most 2 adjacent faces.
    pub is_manifold: bool,

    /// Number of boundary edges (edges with 1 adjacent face).
    pub boundary_edge_count: usize,

    /// Number of non-manifold edges (edges with >2 adjacent faces).
    pub non_manifold_edge_count: usize,

    /// Total vertex count.
    pub vertex_count: usize,

    /// Total face count.
    pub face_count: usize,

    /// Bounding box as (min_corner, max_corner).
    pub bounds: Option<(Point3<f64>, Point3<f64>)>,

    /// Dimensions (x, y, z) in mm.
    pub dimensions: Option<(f64, f64, f64)>,

    /// Signed volume; negative means the mesh is inside-out.
    pub signed_volume: f64,

    /// Total surface area in mm^2.
    pub surface_area: f64,

    /// Whether normals point inward (negative signed volume).
    pub is_inside_out: bool,
}

impl MeshReport {
    /// Check if the mesh passes basic validity checks.
    pub fn is_valid(&self) -> bool {
        self.vertex_count > 0 && self.face_count > 0
    }

    /// Check if the mesh is suitable for 3D printing: watertight, manifold,
    /// normals outward.
    pub fn is_printable(&self) -> bool {
        self.is_watertight && self.is_manifold && !self.is_inside_out
    }
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Faces: {}", self.face_count)?;

        if let Some((dx, dy, dz)) = &self.dimensions {
            writeln!(f, "  Dimensions: {:.1} x {:.1} x {:.1} mm", dx, dy, dz)?;
        }

        writeln!(f, "  Surface Area: {:.2} mm^2", self.surface_area)?;
        writeln!(f, "  Volume: {:.2} mm^3", self.signed_volume.abs())?;

        writeln!(
            f,
            "  Watertight: {} (boundary edges: {})",
            if self.is_watertight { "yes" } else { "NO" },
            self.boundary_edge_count
        )?;
        writeln!(
            f,
            "  Manifold: {} (non-manifold edges: {})",
            if self.is_manifold { "yes" } else { "NO" },
            self.non_manifold_edge_count
        )?;
        writeln!(
            f,
            "  Orientation: {}",
            if self.is_inside_out {
                "INSIDE-OUT"
            } else {
                "correct"
            }
        )?;
        writeln!(
            f,
            "  Printable: {}",
            if self.is_printable() { "yes" } else { "NO" }
        )?;

        Ok(())
    }
}

/// Validate a mesh and return a report.
pub fn validate_mesh(mesh: &Mesh) -> MeshReport {
    let edges = EdgeMap::build(&mesh.faces);
    let boundary_edge_count = edges.boundary_edge_count();
    let non_manifold_edge_count = edges.non_manifold_edge_count();

    let bounds = mesh.bounds();
    let dimensions = bounds.map(|(min, max)| (max.x - min.x, max.y - min.y, max.z - min.z));

    let signed_volume = mesh.signed_volume();
    let is_inside_out = signed_volume < 0.0;

    let report = MeshReport {
        is_watertight: boundary_edge_count == 0,
        is_manifold: non_manifold_edge_count == 0,
        boundary_edge_count,
        non_manifold_edge_count,
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        bounds,
        dimensions,
        signed_volume,
        surface_area: mesh.surface_area(),
        is_inside_out,
    };

    if !report.is_watertight {
        warn!(
            "Mesh is not watertight: {} boundary edges",
            boundary_edge_count
        );
    }
    if !report.is_manifold {
        warn!(
            "Mesh is not manifold: {} non-manifold edges",
            non_manifold_edge_count
        );
    }
    if report.is_inside_out && report.is_watertight {
        warn!("Mesh appears to be inside-out (negative signed volume)");
    }

    debug!("{}", report);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::solid_from_field;
    use relief_field::ScalarField;

    #[test]
    fn test_generated_solid_is_printable() {
        let field = ScalarField::filled(4, 5, 1.5);
        let mesh = solid_from_field(&field, 0.5).unwrap();
        let report = validate_mesh(&mesh);

        assert!(report.is_valid());
        assert!(report.is_watertight);
        assert!(report.is_manifold);
        assert!(!report.is_inside_out);
        assert!(report.is_printable());

        let (dx, dy, dz) = report.dimensions.unwrap();
        assert!((dx - 2.0).abs() < 1e-9);
        assert!((dy - 1.5).abs() < 1e-9);
        assert!((dz - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_open_mesh_reported() {
        let field = ScalarField::filled(3, 3, 1.0);
        let mut mesh = solid_from_field(&field, 1.0).unwrap();
        mesh.faces.pop();

        let report = validate_mesh(&mesh);
        assert!(!report.is_watertight);
        assert!(report.boundary_edge_count > 0);
        assert!(!report.is_printable());
    }

    #[test]
    fn test_report_display() {
        let field = ScalarField::filled(2, 2, 1.0);
        let mesh = solid_from_field(&field, 1.0).unwrap();
        let text = format!("{}", validate_mesh(&mesh));
        assert!(text.contains("Watertight: yes"));
        assert!(text.contains("Printable: yes"));
    }
}
