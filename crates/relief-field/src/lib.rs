//! Calibrated relief height field synthesis from images.
//!
//! This crate turns a decoded sRGB image into a thickness-in-millimeters
//! scalar field suitable for driving a printable relief solid:
//!
//! 1. **Luminance**: piecewise sRGB linearization and Rec.709 weighting
//!    produce relative luminance in linear light.
//! 2. **Tone mapping**: a black/white cut window and an optional gamma
//!    curve reshape luminance into a normalized [0, 1] relief signal.
//! 3. **Thickness**: base and relief heights (and an invert flag for
//!    backlit viewing) calibrate the signal to millimeters; mirror/rotate
//!    orientation is applied to this field so every derived artifact
//!    (preview image, raw array, mesh) agrees on orientation.
//!
//! # Units
//!
//! Thickness fields are in millimeters. [`pixel_scale`] converts a physical
//! target width plus the raster width into the mm-per-sample factor used by
//! mesh generation.
//!
//! # Quick Start
//!
//! ```no_run
//! use relief_field::{ReliefBuilder, ReliefParams, ToneParams};
//!
//! let image = image::open("photo.jpg").unwrap().to_rgb8();
//!
//! let thickness = ReliefBuilder::new(&image)
//!     .tone(ToneParams { black_cut: 0.02, white_cut: 0.98, tone_gamma: 1.15 })
//!     .relief(ReliefParams::new(0.8, 1.5, true))
//!     .build()
//!     .unwrap();
//!
//! relief_field::io::save_heightmap_png16(&thickness, "preview.png".as_ref()).unwrap();
//! relief_field::io::save_field_npy(&thickness, "thickness.npy".as_ref()).unwrap();
//! ```
//!
//! All stages are pure functions over immutable inputs; parameter errors are
//! reported before any per-pixel work starts. Per-pixel loops parallelize
//! over rows with rayon.

mod builder;
mod error;
mod field;
pub mod io;
mod luminance;
mod thickness;
mod tone;

pub use builder::ReliefBuilder;
pub use error::{FieldError, FieldErrorCode, FieldResult};
pub use field::ScalarField;
pub use luminance::{luminance_of, srgb_to_linear};
pub use thickness::{pixel_scale, thickness_from_relief, Orientation, ReliefParams};
pub use tone::{tone_map, ToneParams};
