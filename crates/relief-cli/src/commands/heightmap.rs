//! relief heightmap - 16-bit PNG preview + raw .npy array, no mesh.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use relief_field::io::{save_field_npy, save_heightmap_png16};
use serde::Serialize;

use crate::{input, output, Cli, OutputFormat, ReliefOptions};

use super::{heightmap_paths, resolve_out_base, synthesize};

#[derive(Serialize)]
struct HeightmapResult {
    input: String,
    heightmap_png: String,
    heightmap_npy: String,
    field_rows: usize,
    field_cols: usize,
    pixel_scale_mm: f64,
    thickness_min_mm: f32,
    thickness_max_mm: f32,
}

pub fn run(input_path: &Path, options: &ReliefOptions, cli: &Cli) -> Result<()> {
    let out_base = resolve_out_base(input_path, options.out.as_deref(), options.width_mm);
    let (png_path, npy_path) = heightmap_paths(&out_base);

    let image = input::load_relief_image(input_path, options.width_px)?;
    let (field, scale) = synthesize(&image, options)?;

    save_heightmap_png16(&field, &png_path)?;
    save_field_npy(&field, &npy_path)?;

    let (t_min, t_max) = field.min_max().unwrap_or((0.0, 0.0));

    let result = HeightmapResult {
        input: input_path.display().to_string(),
        heightmap_png: png_path.display().to_string(),
        heightmap_npy: npy_path.display().to_string(),
        field_rows: field.height(),
        field_cols: field.width(),
        pixel_scale_mm: scale,
        thickness_min_mm: t_min,
        thickness_max_mm: t_max,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("saved: {}, {}", png_path.display(), npy_path.display()),
                    cli.format,
                    cli.quiet,
                );
                println!(
                    "  {}: {:.3} .. {:.3} mm",
                    "Thickness range".cyan(),
                    t_min,
                    t_max
                );
            }
        }
    }

    Ok(())
}
