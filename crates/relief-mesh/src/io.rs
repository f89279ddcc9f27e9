//! Mesh file export for STL and OBJ formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{MeshError, MeshResult};
use crate::types::Mesh;

/// Supported mesh output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Stl,
    Obj,
}

impl MeshFormat {
    /// Detect format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "obj" => Some(MeshFormat::Obj),
                _ => None,
            })
    }

    /// Detect format, failing with the exporter's error when unsupported.
    ///
    /// Callers that will eventually write a mesh should resolve the format
    /// with this before doing any expensive work.
    pub fn resolve(path: &Path) -> MeshResult<Self> {
        Self::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
            extension: path.extension().and_then(|e| e.to_str()).map(String::from),
        })
    }
}

/// Save a mesh to a file, auto-detecting format from the extension.
pub fn save_mesh(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    match MeshFormat::resolve(path)? {
        MeshFormat::Stl => save_stl(mesh, path),
        MeshFormat::Obj => save_obj(mesh, path),
    }
}

/// Save a mesh to binary STL.
pub fn save_stl(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);

    let triangles: Vec<stl_io::Triangle> = mesh
        .faces
        .iter()
        .map(|&[i0, i1, i2]| {
            let v0 = &mesh.vertices[i0 as usize];
            let v1 = &mesh.vertices[i1 as usize];
            let v2 = &mesh.vertices[i2 as usize];

            stl_io::Triangle {
                normal: stl_io::Normal::new([0.0, 0.0, 0.0]), // Readers recompute
                vertices: [
                    stl_io::Vertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    stl_io::Vertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    stl_io::Vertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| {
        MeshError::io_write(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        )
    })?;

    writer.flush().map_err(|e| MeshError::io_write(path, e))?;

    info!(
        path = %path.display(),
        triangles = mesh.face_count(),
        "Saved STL mesh"
    );
    Ok(())
}

/// Save a mesh to ASCII OBJ.
///
/// OBJ keeps the indexed structure, so vertex order survives a round trip;
/// useful for inspecting the generated layers by index.
pub fn save_obj(mesh: &Mesh, path: &Path) -> MeshResult<()> {
    let file = File::create(path).map_err(|e| MeshError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);

    let io_err = |e: std::io::Error| MeshError::io_write(path, e);

    writeln!(writer, "# relief solid").map_err(io_err)?;
    writeln!(writer, "# vertices: {}", mesh.vertex_count()).map_err(io_err)?;
    writeln!(writer, "# faces: {}", mesh.face_count()).map_err(io_err)?;

    for v in &mesh.vertices {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z).map_err(io_err)?;
    }
    for &[a, b, c] in &mesh.faces {
        // OBJ indices are 1-based.
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1).map_err(io_err)?;
    }

    writer.flush().map_err(io_err)?;

    info!(
        path = %path.display(),
        triangles = mesh.face_count(),
        "Saved OBJ mesh"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::solid_from_field;
    use relief_field::ScalarField;

    fn sample_mesh() -> Mesh {
        solid_from_field(&ScalarField::filled(3, 3, 1.0), 1.0).unwrap()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            MeshFormat::from_path(Path::new("out.stl")),
            Some(MeshFormat::Stl)
        );
        assert_eq!(
            MeshFormat::from_path(Path::new("out.OBJ")),
            Some(MeshFormat::Obj)
        );
        assert_eq!(MeshFormat::from_path(Path::new("out.3mf")), None);
        assert_eq!(MeshFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_resolve_unsupported_is_eager_error() {
        let err = MeshFormat::resolve(Path::new("out.ply")).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { .. }));
        assert_eq!(err.code().as_str(), "SOLID-2001");
    }

    #[test]
    fn test_stl_round_trip_triangle_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.stl");

        let mesh = sample_mesh();
        save_mesh(&mesh, &path).unwrap();

        let file = File::open(&path).unwrap();
        let mut reader = std::io::BufReader::new(file);
        let stl = stl_io::read_stl(&mut reader).unwrap();
        assert_eq!(stl.faces.len(), mesh.face_count());
    }

    #[test]
    fn test_obj_output_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.obj");

        let mesh = sample_mesh();
        save_obj(&mesh, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let v_lines = text.lines().filter(|l| l.starts_with("v ")).count();
        let f_lines = text.lines().filter(|l| l.starts_with("f ")).count();
        assert_eq!(v_lines, mesh.vertex_count());
        assert_eq!(f_lines, mesh.face_count());

        // Indices are 1-based: no face line may reference 0.
        assert!(!text.lines().any(|l| l.starts_with("f ") && l.contains(" 0")));
    }
}
