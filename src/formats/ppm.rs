use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ImageError;

use super::ImageBuffer;

/// Netpbm P6 binary: ASCII header, then top-down RGB bytes, per spec.md §6.
pub fn write(path: &Path, image: &ImageBuffer) -> Result<(), ImageError> {
    let mut out = BufWriter::new(File::create(path)?);

    write!(out, "P6\n{} {}\n255\n", image.width, image.height)?;

    for y in 0..image.height {
        for pixel in image.row(y) {
            out.write_all(&pixel.to_bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::io::Read;

    #[test]
    fn header_matches_netpbm_p6_format() {
        let image = ImageBuffer::new(1, 1, vec![Color::white()]);
        let path = std::env::temp_dir().join("raytrace_ppm_test.ppm");
        write(&path, &image).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(bytes.starts_with(b"P6\n1 1\n255\n"));
        assert_eq!(&[255, 255, 255], &bytes[bytes.len() - 3..]);
    }
}
