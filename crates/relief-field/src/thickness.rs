//! Thickness field building: relief signal to calibrated millimeters.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{FieldError, FieldResult};
use crate::field::ScalarField;

/// Physical relief parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReliefParams {
    /// Minimum solid thickness in mm, present everywhere. Must be > 0.
    pub base_mm: f64,
    /// Maximum additional thickness in mm driven by the relief signal. Must be >= 0.
    pub relief_mm: f64,
    /// When set, bright areas become thin (backlit transmission mapping);
    /// otherwise bright areas become thick.
    pub invert: bool,
}

impl ReliefParams {
    pub fn new(base_mm: f64, relief_mm: f64, invert: bool) -> Self {
        Self {
            base_mm,
            relief_mm,
            invert,
        }
    }

    /// Validate the parameter domain. Called before any array work.
    pub fn validate(&self) -> FieldResult<()> {
        if !self.base_mm.is_finite() || self.base_mm <= 0.0 {
            return Err(FieldError::invalid_param(
                "base_mm",
                self.base_mm,
                "base thickness must be a positive finite number",
            ));
        }
        if !self.relief_mm.is_finite() || self.relief_mm < 0.0 {
            return Err(FieldError::invalid_param(
                "relief_mm",
                self.relief_mm,
                "relief height must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

/// Geometric orientation of the output field.
///
/// `rot180` is exactly equivalent to `flip_x` + `flip_y` and forces both
/// flags on regardless of their individual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation {
    /// Mirror left-right (reverse column order).
    pub flip_x: bool,
    /// Mirror top-bottom (reverse row order).
    pub flip_y: bool,
    /// Rotate 180 degrees.
    pub rot180: bool,
}

impl Orientation {
    /// Resolve `rot180` into the effective (flip_x, flip_y) pair.
    pub fn resolved(&self) -> (bool, bool) {
        if self.rot180 {
            (true, true)
        } else {
            (self.flip_x, self.flip_y)
        }
    }

    /// True when no transform is applied.
    pub fn is_identity(&self) -> bool {
        self.resolved() == (false, false)
    }
}

/// Convert a normalized relief signal into a thickness field in mm and
/// apply the orientation transform.
///
/// `thickness = base_mm + relief_mm * v`, where `v` is the relief signal or
/// its complement under `invert`. Orientation is applied here, to this
/// field only, so the preview image, the raw array, and the mesh derived
/// from it always agree sample-for-sample.
pub fn thickness_from_relief(
    relief: &ScalarField,
    params: &ReliefParams,
    orientation: Orientation,
) -> FieldResult<ScalarField> {
    params.validate()?;

    let base = params.base_mm as f32;
    let height = params.relief_mm as f32;
    let invert = params.invert;

    let mut out = relief.clone();
    out.as_mut_slice().par_iter_mut().for_each(|v| {
        let signal = if invert { 1.0 - *v } else { *v };
        *v = base + height * signal;
    });

    let (flip_x, flip_y) = orientation.resolved();
    if flip_x {
        out.flip_columns();
    }
    if flip_y {
        out.flip_rows();
    }

    if let Some((min, max)) = out.min_max() {
        info!(
            rows = out.height(),
            cols = out.width(),
            min_mm = format!("{:.3}", min),
            max_mm = format!("{:.3}", max),
            "Built thickness field"
        );
    }
    debug!(flip_x, flip_y, invert, "Thickness field orientation");

    Ok(out)
}

/// Physical size of one sample in mm, from the requested physical width
/// and the raster width.
pub fn pixel_scale(width_mm: f64, width_px: usize) -> FieldResult<f64> {
    if !width_mm.is_finite() || width_mm <= 0.0 {
        return Err(FieldError::invalid_param(
            "width_mm",
            width_mm,
            "physical width must be a positive finite number",
        ));
    }
    if width_px == 0 {
        return Err(FieldError::invalid_param(
            "width_px",
            0.0,
            "raster width must be at least one pixel",
        ));
    }
    Ok(width_mm / width_px as f64)
}
