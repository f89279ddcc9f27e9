//! relief info - compute field and mesh in memory, print statistics.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use relief_mesh::{solid_from_field, validate_mesh};
use serde::Serialize;

use crate::{input, output, Cli, OutputFormat, ReliefOptions};

use super::synthesize;

#[derive(Serialize)]
struct InfoResult {
    input: String,
    field_rows: usize,
    field_cols: usize,
    pixel_scale_mm: f64,
    thickness_min_mm: f32,
    thickness_max_mm: f32,
    vertices: usize,
    triangles: usize,
    dimensions_mm: Option<(f64, f64, f64)>,
    volume_mm3: f64,
    surface_area_mm2: f64,
    watertight: bool,
    manifold: bool,
    printable: bool,
}

pub fn run(input_path: &Path, options: &ReliefOptions, cli: &Cli) -> Result<()> {
    let image = input::load_relief_image(input_path, options.width_px)?;
    let (field, scale) = synthesize(&image, options)?;
    let (t_min, t_max) = field.min_max().unwrap_or((0.0, 0.0));

    let mesh = solid_from_field(&field, scale)?;
    let report = validate_mesh(&mesh);

    let result = InfoResult {
        input: input_path.display().to_string(),
        field_rows: field.height(),
        field_cols: field.width(),
        pixel_scale_mm: scale,
        thickness_min_mm: t_min,
        thickness_max_mm: t_max,
        vertices: report.vertex_count,
        triangles: report.face_count,
        dimensions_mm: report.dimensions,
        volume_mm3: report.signed_volume.abs(),
        surface_area_mm2: report.surface_area,
        watertight: report.is_watertight,
        manifold: report.is_manifold,
        printable: report.is_printable(),
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                println!(
                    "{}: {} x {} samples at {:.4} mm/px",
                    "Field".cyan(),
                    result.field_cols,
                    result.field_rows,
                    result.pixel_scale_mm
                );
                println!(
                    "{}: {:.3} .. {:.3} mm",
                    "Thickness".cyan(),
                    t_min,
                    t_max
                );
                print!("{}", report);
            }
        }
    }

    Ok(())
}
