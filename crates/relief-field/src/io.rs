//! Height field export: 16-bit PNG preview and lossless NumPy array.
//!
//! The PNG is normalized to the full 16-bit range and is visual-only; the
//! `.npy` file carries the raw millimeter values and is the authoritative
//! record of the field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Luma};
use tracing::info;

use crate::error::{FieldError, FieldResult};
use crate::field::ScalarField;

/// Denominator floor for preview normalization of near-constant fields.
const NORM_MIN_SPAN: f32 = 1e-9;

/// Normalize a field to the full u16 range.
///
/// `round(((v - min) / max(1e-9, max - min)) * 65535)` per sample. Lossy by
/// construction; a constant field maps to all zeros.
pub fn normalized_u16(field: &ScalarField) -> Vec<u16> {
    let (min, max) = field.min_max().unwrap_or((0.0, 0.0));
    let span = (max - min).max(NORM_MIN_SPAN);
    field
        .as_slice()
        .iter()
        .map(|&v| ((v - min) / span * 65535.0 + 0.5) as u16)
        .collect()
}

/// Save the normalized 16-bit grayscale preview image.
pub fn save_heightmap_png16(field: &ScalarField, path: &Path) -> FieldResult<()> {
    let pixels = normalized_u16(field);
    let image: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(field.width() as u32, field.height() as u32, pixels)
            .expect("pixel buffer sized from field dimensions");

    image.save(path).map_err(|e| FieldError::ImageEncode {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    info!(path = %path.display(), "Saved 16-bit heightmap preview");
    Ok(())
}

/// Save the raw field as a NumPy `.npy` v1.0 file.
///
/// Little-endian `<f4`, C order, shape `(rows, cols)`: readable with
/// `numpy.load` and lossless with respect to the in-memory field.
pub fn save_field_npy(field: &ScalarField, path: &Path) -> FieldResult<()> {
    let file = File::create(path).map_err(|e| FieldError::io_write(path, e))?;
    let mut writer = BufWriter::new(file);

    write_npy(field, &mut writer).map_err(|e| FieldError::io_write(path, e))?;
    writer.flush().map_err(|e| FieldError::io_write(path, e))?;

    info!(
        path = %path.display(),
        rows = field.height(),
        cols = field.width(),
        "Saved raw thickness array"
    );
    Ok(())
}

fn write_npy<W: Write>(field: &ScalarField, writer: &mut W) -> std::io::Result<()> {
    let dict = format!(
        "{{'descr': '<f4', 'fortran_order': False, 'shape': ({}, {}), }}",
        field.height(),
        field.width()
    );

    // Total header (magic + version + length + dict + padding + newline)
    // must be a multiple of 64 bytes.
    let unpadded = 6 + 2 + 2 + dict.len() + 1;
    let padded = unpadded.div_ceil(64) * 64;
    let header_len = (padded - 10) as u16;

    writer.write_all(b"\x93NUMPY")?;
    writer.write_all(&[0x01, 0x00])?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(dict.as_bytes())?;
    for _ in 0..(padded - unpadded) {
        writer.write_all(b" ")?;
    }
    writer.write_all(b"\n")?;

    for &v in field.as_slice() {
        writer.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}
