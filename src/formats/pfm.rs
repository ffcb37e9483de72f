use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ImageError;

use super::ImageBuffer;

/// Netpbm float (PFM): ASCII header with a negative scale (little-endian),
/// then bottom-up RGB `f32` triples, per spec.md §6. Carries linear radiance
/// untouched by the gamma curve `to_bytes()` applies for the 8-bit formats.
pub fn write(path: &Path, image: &ImageBuffer) -> Result<(), ImageError> {
    let mut out = BufWriter::new(File::create(path)?);

    write!(out, "PF\n{} {}\n-1.0\n", image.width, image.height)?;

    for y in (0..image.height).rev() {
        for pixel in image.row(y) {
            out.write_all(&(pixel.r as f32).to_le_bytes())?;
            out.write_all(&(pixel.g as f32).to_le_bytes())?;
            out.write_all(&(pixel.b as f32).to_le_bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}
