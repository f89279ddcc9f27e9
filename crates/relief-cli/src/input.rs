//! Image loading and resampling for the relief pipeline.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use image::imageops::FilterType;
use image::RgbImage;
use tracing::{debug, info};

/// Decode an image, convert to RGB8, and resample to the target raster
/// width with Lanczos3, preserving aspect ratio.
pub fn load_relief_image(path: &Path, target_width_px: u32) -> Result<RgbImage> {
    ensure!(target_width_px > 0, "raster width must be at least 1 pixel");

    let img = image::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .to_rgb8();

    let (w, h) = img.dimensions();
    ensure!(w > 0 && h > 0, "image {:?} has no pixels", path);

    info!(path = %path.display(), width = w, height = h, "Loaded image");

    if w == target_width_px {
        return Ok(img);
    }

    let target_h = ((h as f64) * (target_width_px as f64 / w as f64))
        .round()
        .max(1.0) as u32;

    let resized = image::imageops::resize(&img, target_width_px, target_h, FilterType::Lanczos3);

    debug!(
        from = format!("{}x{}", w, h),
        to = format!("{}x{}", target_width_px, target_h),
        "Resampled image (Lanczos3)"
    );

    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_resample_preserves_aspect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");

        let mut img = RgbImage::new(40, 20);
        for p in img.pixels_mut() {
            *p = Rgb([120, 120, 120]);
        }
        img.save(&path).unwrap();

        let out = load_relief_image(&path, 10).unwrap();
        assert_eq!(out.dimensions(), (10, 5));
    }

    #[test]
    fn test_no_resample_at_target_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        RgbImage::new(16, 9).save(&path).unwrap();

        let out = load_relief_image(&path, 16).unwrap();
        assert_eq!(out.dimensions(), (16, 9));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_relief_image(Path::new("/nonexistent/img.png"), 10).is_err());
    }
}
