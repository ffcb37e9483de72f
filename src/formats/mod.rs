//! Image encoders for the output formats this crate writes directly,
//! dispatched by file extension per spec.md §6. None of these formats are
//! decoded anywhere in this crate; `image` (the teacher's existing
//! dependency) still handles the PNG preview path in `system.rs`.

mod exr;
mod pfm;
mod ppm;
mod tga;

use std::path::Path;

use crate::color::Color;
use crate::error::ImageError;

/// A rendered capture as linear-RGB floats, row-major, row 0 at the top of
/// the frame — the shape every encoder in this module consumes.
pub struct ImageBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> ImageBuffer {
        assert_eq!(width * height, pixels.len());
        ImageBuffer { width, height, pixels }
    }

    fn row(&self, y: usize) -> &[Color] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }
}

/// Writes `image` to `path`, picking a codec by the path's extension.
/// `.tga`/`.ppm`/`.pfm`/`.exr` are hand-rolled here per spec.md §6/§6.1;
/// anything else falls through to the `image` crate's encoders (so `.png`
/// and `.jpg` previews keep working without a dedicated module).
pub fn write_image(path: &Path, image: &ImageBuffer) -> Result<(), ImageError> {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("tga") => tga::write(path, image),
        Some("ppm") => ppm::write(path, image),
        Some("pfm") => pfm::write(path, image),
        Some("exr") => exr::write(path, image),
        Some("png") | Some("jpg") | Some("jpeg") | Some("bmp") => write_via_image_crate(path, image),
        other => Err(ImageError::UnknownFormat(other.map(String::from).unwrap_or_default())),
    }
}

fn write_via_image_crate(path: &Path, image_buf: &ImageBuffer) -> Result<(), ImageError> {
    let mut rgb = image::RgbImage::new(image_buf.width as u32, image_buf.height as u32);
    for y in 0..image_buf.height {
        for x in 0..image_buf.width {
            let bytes = image_buf.pixels[y * image_buf.width + x].to_bytes();
            rgb.put_pixel(x as u32, y as u32, image::Rgb(bytes));
        }
    }
    rgb.save(path)?;
    Ok(())
}
