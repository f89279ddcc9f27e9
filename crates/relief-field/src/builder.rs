//! Fluent pipeline for height field synthesis.

use image::RgbImage;

use crate::error::FieldResult;
use crate::field::ScalarField;
use crate::luminance::luminance_of;
use crate::thickness::{thickness_from_relief, Orientation, ReliefParams};
use crate::tone::{tone_map, ToneParams};

/// Builder that runs the full synthesis pipeline on an image:
/// luminance -> tone mapping -> thickness in mm -> orientation.
///
/// # Example
///
/// ```no_run
/// use relief_field::{Orientation, ReliefBuilder, ReliefParams, ToneParams};
///
/// let image = image::open("photo.jpg").unwrap().to_rgb8();
///
/// let thickness = ReliefBuilder::new(&image)
///     .tone(ToneParams { black_cut: 0.02, white_cut: 0.98, tone_gamma: 1.15 })
///     .relief(ReliefParams::new(0.8, 1.5, true))
///     .build()
///     .unwrap();
///
/// let (min, max) = thickness.min_max().unwrap();
/// println!("thickness range: {:.3} .. {:.3} mm", min, max);
/// ```
#[derive(Debug)]
pub struct ReliefBuilder<'a> {
    image: &'a RgbImage,
    tone: ToneParams,
    relief: ReliefParams,
    orientation: Orientation,
}

impl<'a> ReliefBuilder<'a> {
    /// Start a pipeline over a decoded (and already resampled) RGB image.
    ///
    /// Starts neutral: no tone shaping, a flat 1mm slab with no relief, no
    /// orientation change. Callers pick their own physical parameters.
    pub fn new(image: &'a RgbImage) -> Self {
        Self {
            image,
            tone: ToneParams::default(),
            relief: ReliefParams::new(1.0, 0.0, false),
            orientation: Orientation::default(),
        }
    }

    /// Set the tone mapping window and gamma.
    pub fn tone(mut self, tone: ToneParams) -> Self {
        self.tone = tone;
        self
    }

    /// Set the physical relief parameters.
    pub fn relief(mut self, relief: ReliefParams) -> Self {
        self.relief = relief;
        self
    }

    /// Set the orientation transform.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Run the pipeline. Parameters are validated before any array work.
    pub fn build(self) -> FieldResult<ScalarField> {
        // Fail fast on bad parameters, before touching pixels.
        self.tone.validate()?;
        self.relief.validate()?;

        let luminance = luminance_of(self.image)?;
        let shaped = tone_map(&luminance, &self.tone)?;
        thickness_from_relief(&shaped, &self.relief, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_build_uniform_gray() {
        let mut img = RgbImage::new(2, 2);
        for p in img.pixels_mut() {
            *p = Rgb([128, 128, 128]);
        }

        let field = ReliefBuilder::new(&img)
            .relief(ReliefParams::new(1.0, 2.0, false))
            .build()
            .unwrap();

        assert_eq!(field.width(), 2);
        assert_eq!(field.height(), 2);
        let (min, max) = field.min_max().unwrap();
        assert!((max - min).abs() < 1e-6, "uniform image must stay uniform");
        assert!(min >= 1.0 && max <= 3.0);
    }

    #[test]
    fn test_build_rejects_bad_params_before_pixels() {
        let img = RgbImage::new(2, 2);
        let result = ReliefBuilder::new(&img)
            .tone(ToneParams {
                black_cut: 0.9,
                white_cut: 0.1,
                tone_gamma: 1.0,
            })
            .build();
        assert!(result.is_err());
    }
}
