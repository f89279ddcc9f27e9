//! relief generate - heightmap artifacts plus a printable mesh.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use relief_field::io::{save_field_npy, save_heightmap_png16};
use relief_mesh::{solid_from_field, validate_mesh, MeshFormat};
use serde::Serialize;

use crate::{input, output, Cli, OutputFormat, ReliefOptions};

use super::{heightmap_paths, resolve_out_base, synthesize};

#[derive(Serialize)]
struct GenerateResult {
    input: String,
    heightmap_png: String,
    heightmap_npy: String,
    mesh: String,
    field_rows: usize,
    field_cols: usize,
    pixel_scale_mm: f64,
    thickness_min_mm: f32,
    thickness_max_mm: f32,
    vertices: usize,
    triangles: usize,
    watertight: bool,
    printable: bool,
}

pub fn run(
    input_path: &Path,
    options: &ReliefOptions,
    mesh_out: Option<&Path>,
    cli: &Cli,
) -> Result<()> {
    let out_base = resolve_out_base(input_path, options.out.as_deref(), options.width_mm);
    let (png_path, npy_path) = heightmap_paths(&out_base);
    let mesh_path = match mesh_out {
        Some(p) => p.to_path_buf(),
        None => out_base.with_extension("stl"),
    };

    // Resolve the mesh format up front: an unusable exporter must fail
    // before any pixels are read.
    MeshFormat::resolve(&mesh_path)?;

    let image = input::load_relief_image(input_path, options.width_px)?;
    let (field, scale) = synthesize(&image, options)?;

    let (t_min, t_max) = field.min_max().unwrap_or((0.0, 0.0));
    output::info(
        &format!("thickness range: {:.3} .. {:.3} mm", t_min, t_max),
        cli.format,
        cli.quiet,
    );

    save_heightmap_png16(&field, &png_path)?;
    save_field_npy(&field, &npy_path)?;

    let mesh = solid_from_field(&field, scale)?;
    let report = validate_mesh(&mesh);

    mesh.save(&mesh_path)
        .with_context(|| format!("Failed to save mesh to {:?}", mesh_path))?;

    let result = GenerateResult {
        input: input_path.display().to_string(),
        heightmap_png: png_path.display().to_string(),
        heightmap_npy: npy_path.display().to_string(),
        mesh: mesh_path.display().to_string(),
        field_rows: field.height(),
        field_cols: field.width(),
        pixel_scale_mm: scale,
        thickness_min_mm: t_min,
        thickness_max_mm: t_max,
        vertices: report.vertex_count,
        triangles: report.face_count,
        watertight: report.is_watertight,
        printable: report.is_printable(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!(
                        "saved: {}, {}, {}",
                        png_path.display(),
                        npy_path.display(),
                        mesh_path.display()
                    ),
                    cli.format,
                    cli.quiet,
                );
                println!(
                    "  {}: {} x {} samples at {:.4} mm/px",
                    "Field".cyan(),
                    result.field_cols,
                    result.field_rows,
                    result.pixel_scale_mm
                );
                println!(
                    "  {}: {} vertices, {} triangles, printable: {}",
                    "Mesh".cyan(),
                    result.vertices,
                    result.triangles,
                    if result.printable { "yes" } else { "NO" }
                );
            }
        }
    }

    Ok(())
}
