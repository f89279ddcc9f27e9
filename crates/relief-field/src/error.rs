//! Error types for height field synthesis.
//!
//! Codes follow the pattern `FIELD-XXXX`:
//! - 1xxx = parameter validation errors
//! - 2xxx = input errors
//! - 3xxx = export errors

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Machine-readable error codes for field operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldErrorCode {
    /// FIELD-1001: tone window is empty (white cut <= black cut)
    ToneWindowEmpty = 1001,
    /// FIELD-1002: a scalar parameter is out of its domain
    InvalidParam = 1002,
    /// FIELD-2001: input raster has no pixels
    EmptyInput = 2001,
    /// FIELD-3001: failed to write an export file
    IoWrite = 3001,
    /// FIELD-3002: image encoding failed
    ImageEncode = 3002,
}

impl FieldErrorCode {
    /// Returns the error code as a string in the format `FIELD-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldErrorCode::ToneWindowEmpty => "FIELD-1001",
            FieldErrorCode::InvalidParam => "FIELD-1002",
            FieldErrorCode::EmptyInput => "FIELD-2001",
            FieldErrorCode::IoWrite => "FIELD-3001",
            FieldErrorCode::ImageEncode => "FIELD-3002",
        }
    }
}

impl std::fmt::Display for FieldErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while synthesizing or exporting a height field.
#[derive(Debug, Error, Diagnostic)]
pub enum FieldError {
    /// The tone window selects nothing.
    #[error("tone window is empty: white cut {white_cut} must be greater than black cut {black_cut}")]
    #[diagnostic(
        code(field::tone::window),
        help("Pick cuts with black < white, e.g. --black 0.02 --white 0.98")
    )]
    ToneWindowEmpty { black_cut: f64, white_cut: f64 },

    /// A scalar parameter is outside its valid domain.
    #[error("invalid parameter {name} = {value}: {details}")]
    #[diagnostic(code(field::params::invalid))]
    InvalidParam {
        name: &'static str,
        value: f64,
        details: String,
    },

    /// The input raster is empty.
    #[error("input raster is empty ({width}x{height})")]
    #[diagnostic(
        code(field::input::empty),
        help("The decoded image must contain at least one pixel")
    )]
    EmptyInput { width: u32, height: u32 },

    /// Failed to write an export file.
    #[error("failed to write {path}")]
    #[diagnostic(code(field::io::write))]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image encoding failed.
    #[error("failed to encode image {path}: {details}")]
    #[diagnostic(
        code(field::io::encode),
        help("Check that the output extension is a supported image format")
    )]
    ImageEncode { path: PathBuf, details: String },
}

impl FieldError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> FieldErrorCode {
        match self {
            FieldError::ToneWindowEmpty { .. } => FieldErrorCode::ToneWindowEmpty,
            FieldError::InvalidParam { .. } => FieldErrorCode::InvalidParam,
            FieldError::EmptyInput { .. } => FieldErrorCode::EmptyInput,
            FieldError::IoWrite { .. } => FieldErrorCode::IoWrite,
            FieldError::ImageEncode { .. } => FieldErrorCode::ImageEncode,
        }
    }

    /// Create an InvalidParam error.
    pub fn invalid_param(name: &'static str, value: f64, details: impl Into<String>) -> Self {
        FieldError::InvalidParam {
            name,
            value,
            details: details.into(),
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FieldError::IoWrite {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = FieldError::ToneWindowEmpty {
            black_cut: 0.5,
            white_cut: 0.2,
        };
        assert_eq!(err.code(), FieldErrorCode::ToneWindowEmpty);
        assert_eq!(err.code().as_str(), "FIELD-1001");
    }

    #[test]
    fn test_error_display() {
        let err = FieldError::invalid_param("base_mm", -1.0, "must be positive");
        let display = format!("{}", err);
        assert!(display.contains("base_mm"));
        assert!(display.contains("-1"));
    }
}
