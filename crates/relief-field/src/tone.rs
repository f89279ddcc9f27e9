//! Tone mapping: clip window + gamma shaping of the luminance field.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::field::ScalarField;

/// Gamma values within this distance of 1.0 skip the power curve entirely.
const GAMMA_NEUTRAL_EPS: f64 = 1e-12;

/// Tone mapping parameters.
///
/// `Default` is the neutral window: no cuts, no shaping. Opinionated
/// defaults belong to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParams {
    /// Luminance at or below this value maps to 0.
    pub black_cut: f64,
    /// Luminance at or above this value maps to 1. Must exceed `black_cut`.
    pub white_cut: f64,
    /// Gamma applied as `v^(1/gamma)`; 1.0 leaves the signal unchanged.
    pub tone_gamma: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            black_cut: 0.0,
            white_cut: 1.0,
            tone_gamma: 1.0,
        }
    }
}

impl ToneParams {
    /// Validate the parameter domain. Called before any array work.
    pub fn validate(&self) -> FieldResult<()> {
        if !(self.white_cut > self.black_cut) {
            return Err(FieldError::ToneWindowEmpty {
                black_cut: self.black_cut,
                white_cut: self.white_cut,
            });
        }
        if !self.tone_gamma.is_finite() || self.tone_gamma <= 0.0 {
            return Err(FieldError::invalid_param(
                "tone_gamma",
                self.tone_gamma,
                "must be a positive finite number",
            ));
        }
        Ok(())
    }

    /// True when the gamma stage is a no-op.
    #[inline]
    pub fn is_gamma_neutral(&self) -> bool {
        (self.tone_gamma - 1.0).abs() < GAMMA_NEUTRAL_EPS
    }
}

/// Rescale luminance into a normalized [0, 1] relief signal.
///
/// Each element is windowed to `(Y - black) / (white - black)`, clipped,
/// then optionally shaped by `v^(1/tone_gamma)`. Monotonic and elementwise;
/// rows are processed in parallel.
pub fn tone_map(luminance: &ScalarField, params: &ToneParams) -> FieldResult<ScalarField> {
    params.validate()?;

    let span = (params.white_cut - params.black_cut) as f32;
    let black = params.black_cut as f32;

    let mut out = luminance.clone();
    if params.is_gamma_neutral() {
        out.as_mut_slice().par_iter_mut().for_each(|v| {
            *v = ((*v - black) / span).clamp(0.0, 1.0);
        });
    } else {
        let exp = (1.0 / params.tone_gamma) as f32;
        out.as_mut_slice().par_iter_mut().for_each(|v| {
            let windowed = ((*v - black) / span).clamp(0.0, 1.0);
            *v = windowed.powf(exp).clamp(0.0, 1.0);
        });
    }

    debug!(
        black_cut = params.black_cut,
        white_cut = params.white_cut,
        tone_gamma = params.tone_gamma,
        "Tone mapped luminance field"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    fn field(values: &[f32]) -> ScalarField {
        ScalarField::from_raw(1, values.len(), values.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_window_rejected() {
        let f = field(&[0.5]);
        let params = ToneParams {
            black_cut: 0.5,
            white_cut: 0.2,
            tone_gamma: 1.0,
        };
        assert!(matches!(
            tone_map(&f, &params),
            Err(FieldError::ToneWindowEmpty { .. })
        ));

        // Equal cuts are just as empty.
        let params = ToneParams {
            black_cut: 0.4,
            white_cut: 0.4,
            tone_gamma: 1.0,
        };
        assert!(tone_map(&f, &params).is_err());
    }

    #[test]
    fn test_bad_gamma_rejected() {
        let f = field(&[0.5]);
        for gamma in [0.0, -2.0, f64::NAN] {
            let params = ToneParams {
                tone_gamma: gamma,
                ..ToneParams::default()
            };
            assert!(tone_map(&f, &params).is_err(), "gamma {gamma} accepted");
        }
    }

    #[test]
    fn test_neutral_gamma_is_identity_clip() {
        let f = field(&[-0.2, 0.0, 0.25, 0.5, 1.0, 1.3]);
        let out = tone_map(&f, &ToneParams::default()).unwrap();
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.25, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_window_rescales() {
        let f = field(&[0.1, 0.2, 0.6, 0.9]);
        let params = ToneParams {
            black_cut: 0.2,
            white_cut: 0.6,
            tone_gamma: 1.0,
        };
        let out = tone_map(&f, &params).unwrap();
        assert!(approx_eq(out.get(0, 0), 0.0));
        assert!(approx_eq(out.get(0, 1), 0.0));
        assert!(approx_eq(out.get(0, 2), 1.0));
        assert!(approx_eq(out.get(0, 3), 1.0));
    }

    #[test]
    fn test_gamma_shaping() {
        // gamma 2.0 -> exponent 0.5
        let f = field(&[0.25]);
        let params = ToneParams {
            tone_gamma: 2.0,
            ..ToneParams::default()
        };
        let out = tone_map(&f, &params).unwrap();
        assert!(approx_eq(out.get(0, 0), 0.5));
    }

    #[test]
    fn test_monotonic_nondecreasing() {
        let inputs: Vec<f32> = (0..=50).map(|k| k as f32 / 50.0).collect();
        let f = field(&inputs);
        let params = ToneParams {
            black_cut: 0.1,
            white_cut: 0.9,
            tone_gamma: 1.15,
        };
        let out = tone_map(&f, &params).unwrap();
        for pair in out.as_slice().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        for &v in out.as_slice() {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
