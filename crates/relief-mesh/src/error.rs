//! Error types for solid mesh generation and export.
//!
//! Codes follow the pattern `SOLID-XXXX`:
//! - 1xxx = input validation errors
//! - 2xxx = export errors

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Machine-readable error codes for mesh operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshErrorCode {
    /// SOLID-1001: height field too small to triangulate
    InsufficientResolution = 1001,
    /// SOLID-1002: invalid parameter (pixel scale, thickness values)
    InvalidParam = 1002,
    /// SOLID-2001: requested output format is not supported
    UnsupportedFormat = 2001,
    /// SOLID-2002: failed to write the mesh file
    IoWrite = 2002,
}

impl MeshErrorCode {
    /// Returns the error code as a string in the format `SOLID-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeshErrorCode::InsufficientResolution => "SOLID-1001",
            MeshErrorCode::InvalidParam => "SOLID-1002",
            MeshErrorCode::UnsupportedFormat => "SOLID-2001",
            MeshErrorCode::IoWrite => "SOLID-2002",
        }
    }
}

impl std::fmt::Display for MeshErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while building or exporting a solid mesh.
#[derive(Debug, Error, Diagnostic)]
pub enum MeshError {
    /// The height field cannot form a single triangle.
    #[error("height field {height}x{width} is too small to mesh; at least 2x2 samples are required")]
    #[diagnostic(
        code(solid::grid::resolution),
        help("Increase the raster width so the resampled image keeps at least two rows and two columns")
    )]
    InsufficientResolution { height: usize, width: usize },

    /// A scalar parameter is outside its valid domain.
    #[error("invalid parameter {name} = {value}: {details}")]
    #[diagnostic(code(solid::params::invalid))]
    InvalidParam {
        name: &'static str,
        value: f64,
        details: String,
    },

    /// The mesh exporter cannot serialize the requested format.
    #[error("unsupported mesh format: {extension:?}")]
    #[diagnostic(
        code(solid::format::unsupported),
        help("Supported mesh formats: STL, OBJ")
    )]
    UnsupportedFormat { extension: Option<String> },

    /// Failed to write the mesh file.
    #[error("failed to write mesh to {path}")]
    #[diagnostic(
        code(solid::io::write),
        help("Check that the directory exists and is writable")
    )]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MeshError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> MeshErrorCode {
        match self {
            MeshError::InsufficientResolution { .. } => MeshErrorCode::InsufficientResolution,
            MeshError::InvalidParam { .. } => MeshErrorCode::InvalidParam,
            MeshError::UnsupportedFormat { .. } => MeshErrorCode::UnsupportedFormat,
            MeshError::IoWrite { .. } => MeshErrorCode::IoWrite,
        }
    }

    /// Returns a short recovery suggestion.
    pub fn suggestion(&self) -> &'static str {
        match self {
            MeshError::InsufficientResolution { .. } => {
                "Raise the target raster width (--px) so the field is at least 2x2"
            }
            MeshError::InvalidParam { .. } => "Check the parameter value against its documented domain",
            MeshError::UnsupportedFormat { .. } => "Use an .stl or .obj output path",
            MeshError::IoWrite { .. } => "Check the output directory and its permissions",
        }
    }

    /// Create an InvalidParam error.
    pub fn invalid_param(name: &'static str, value: f64, details: impl Into<String>) -> Self {
        MeshError::InvalidParam {
            name,
            value,
            details: details.into(),
        }
    }

    /// Create an IoWrite error.
    pub fn io_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MeshError::IoWrite {
            path: path.into(),
            source,
        }
    }
}
