//! Colorimetric conversion: sRGB pixels to linear-light relative luminance.

use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::field::ScalarField;

/// Rec.709 / sRGB luminance weights for linear RGB.
const LUMA_R: f32 = 0.2126;
const LUMA_G: f32 = 0.7152;
const LUMA_B: f32 = 0.0722;

/// Convert one sRGB-encoded channel value in [0, 1] to linear light.
///
/// Standard piecewise sRGB EOTF: linear below the 0.04045 breakpoint,
/// power curve above it. The two branches agree at the breakpoint to
/// within floating tolerance.
#[inline]
pub fn srgb_to_linear(s: f32) -> f32 {
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute relative luminance (linear light, Rec.709 weights) for every
/// pixel of an sRGB image.
///
/// Output is an H x W field with values in [0, 1]. Rows are independent
/// and computed in parallel.
pub fn luminance_of(image: &RgbImage) -> FieldResult<ScalarField> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(FieldError::EmptyInput {
            width: w,
            height: h,
        });
    }

    let width = w as usize;
    let height = h as usize;
    let mut data = vec![0.0f32; width * height];

    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, out) in out_row.iter_mut().enumerate() {
                let px = image.get_pixel(col as u32, row as u32);
                let r = srgb_to_linear(px[0] as f32 / 255.0);
                let g = srgb_to_linear(px[1] as f32 / 255.0);
                let b = srgb_to_linear(px[2] as f32 / 255.0);
                *out = LUMA_R * r + LUMA_G * g + LUMA_B * b;
            }
        });

    debug!(width, height, "Computed luminance field");

    Ok(ScalarField::from_raw(height, width, data)
        .expect("luminance buffer sized from image dimensions"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!(approx_eq(srgb_to_linear(1.0), 1.0, 1e-6));
    }

    #[test]
    fn test_srgb_continuous_at_breakpoint() {
        let s = 0.04045f32;
        let below = s / 12.92;
        let above = ((s + 0.055) / 1.055).powf(2.4);
        assert!(
            approx_eq(below, above, 1e-5),
            "branches disagree at breakpoint: {} vs {}",
            below,
            above
        );
    }

    #[test]
    fn test_srgb_monotonic() {
        let mut prev = srgb_to_linear(0.0);
        for k in 1..=100 {
            let cur = srgb_to_linear(k as f32 / 100.0);
            assert!(cur >= prev);
            prev = cur;
        }
    }

    #[test]
    fn test_luminance_range_and_weights() {
        let mut img = RgbImage::new(3, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        img.put_pixel(2, 0, Rgb([0, 255, 0]));

        let field = luminance_of(&img).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.height(), 1);

        assert_eq!(field.get(0, 0), 0.0);
        assert!(approx_eq(field.get(0, 1), 1.0, 1e-5));
        // Pure green carries the green weight only.
        assert!(approx_eq(field.get(0, 2), 0.7152, 1e-5));

        for &v in field.as_slice() {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbImage::new(0, 0);
        assert!(matches!(
            luminance_of(&img),
            Err(FieldError::EmptyInput { .. })
        ));
    }
}
