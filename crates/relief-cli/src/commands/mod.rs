//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::RgbImage;
use relief_field::{
    pixel_scale, Orientation, ReliefBuilder, ReliefParams, ScalarField, ToneParams,
};

use crate::ReliefOptions;

pub mod generate;
pub mod heightmap;
pub mod info;

impl ReliefOptions {
    pub fn tone(&self) -> ToneParams {
        ToneParams {
            black_cut: self.black_cut,
            white_cut: self.white_cut,
            tone_gamma: self.tone_gamma,
        }
    }

    pub fn relief(&self) -> ReliefParams {
        ReliefParams::new(self.base_mm, self.relief_mm, self.invert)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation {
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            rot180: self.rot180,
        }
    }
}

/// Run the synthesis pipeline on a resampled image.
/// Returns the thickness field (mm) and the pixel scale (mm/pixel).
pub fn synthesize(image: &RgbImage, options: &ReliefOptions) -> Result<(ScalarField, f64)> {
    let field = ReliefBuilder::new(image)
        .tone(options.tone())
        .relief(options.relief())
        .orientation(options.orientation())
        .build()?;
    let scale = pixel_scale(options.width_mm, options.width_px as usize)?;
    Ok((field, scale))
}

/// Resolve the output base path (no extension).
///
/// Default: `<input_dir>/<input_stem>_W<width-mm>mm`. A relative `--out`
/// resolves under the input's directory; an absolute one is used as-is.
pub fn resolve_out_base(input: &Path, out: Option<&str>, width_mm: f64) -> PathBuf {
    let input_dir = input.parent().unwrap_or_else(|| Path::new("."));

    match out {
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("relief");
            input_dir.join(format!("{}_W{}mm", stem, format_mm(width_mm)))
        }
        Some(out) => {
            let out_path = Path::new(out);
            if out_path.is_absolute() {
                out_path.to_path_buf()
            } else {
                input_dir.join(out_path)
            }
        }
    }
}

/// Format a millimeter value without trailing zeros (100.0 -> "100").
fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Heightmap artifact paths derived from the output base.
pub fn heightmap_paths(out_base: &Path) -> (PathBuf, PathBuf) {
    let name = out_base
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("relief");
    let png = out_base.with_file_name(format!("{}_height_16bit.png", name));
    let npy = out_base.with_file_name(format!("{}_height_mm.npy", name));
    (png, npy)
}
