use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use half::f16;

use crate::error::ImageError;

use super::ImageBuffer;

const MAGIC: u32 = 0x0131_2F76;
const VERSION: u32 = 2; // version 2, all flag bits (tiled/long-names/non-image/multipart) clear

/// A minimal single-part, uncompressed, half-float scanline OpenEXR writer
/// covering exactly the attribute set and scanline layout spec.md §6.1
/// enumerates. No tiling, compression, or deep-data support — those are out
/// of scope for this subset.
pub fn write(path: &Path, image: &ImageBuffer) -> Result<(), ImageError> {
    let mut out = BufWriter::new(File::create(path)?);

    let header = build_header(image.width, image.height);
    let offset_table_size = 8 * image.height;
    let pixel_data_start = 4 + 4 + header.len() + offset_table_size;

    let scanline_size = 4 + 4 + 2 * image.width * 3;
    let mut offsets = Vec::with_capacity(image.height);
    let mut offset = pixel_data_start as u64;
    for _ in 0..image.height {
        offsets.push(offset);
        offset += scanline_size as u64;
    }

    out.write_all(&MAGIC.to_le_bytes())?;
    out.write_all(&VERSION.to_le_bytes())?;
    out.write_all(&header)?;
    for o in &offsets {
        out.write_all(&o.to_le_bytes())?;
    }

    for y in 0..image.height {
        out.write_all(&(y as u32).to_le_bytes())?;
        out.write_all(&((2 * image.width * 3) as u32).to_le_bytes())?;
        for channel in [ChannelSelect::R, ChannelSelect::G, ChannelSelect::B] {
            for pixel in image.row(y) {
                let value = match channel {
                    ChannelSelect::R => pixel.r,
                    ChannelSelect::G => pixel.g,
                    ChannelSelect::B => pixel.b,
                };
                out.write_all(&f16::from_f64(value).to_le_bytes())?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[derive(Clone, Copy)]
enum ChannelSelect {
    R,
    G,
    B,
}

fn build_header(width: usize, height: usize) -> Vec<u8> {
    let mut h = Vec::new();
    write_channels_attr(&mut h);
    write_attr(&mut h, "compression", "compression", &[0u8]);
    write_box2i_attr(&mut h, "dataWindow", width, height);
    write_box2i_attr(&mut h, "displayWindow", width, height);
    write_attr(&mut h, "lineOrder", "lineOrder", &[0u8]); // increasing_y
    write_attr(&mut h, "pixelAspectRatio", "float", &1.0f32.to_le_bytes());
    write_attr(&mut h, "screenWindowCenter", "v2f", &concat_bytes(&0.5f32.to_le_bytes(), &0.5f32.to_le_bytes()));
    write_attr(&mut h, "screenWindowWidth", "float", &1.0f32.to_le_bytes());
    h.push(0); // end of header attribute list
    h
}

fn write_channels_attr(h: &mut Vec<u8>) {
    let mut data = Vec::new();
    for name in ["R", "G", "B"] {
        data.extend_from_slice(name.as_bytes());
        data.push(0);
        data.extend_from_slice(&1i32.to_le_bytes()); // pixelType: HALF
        data.push(1); // pLinear
        data.extend_from_slice(&[0u8, 0, 0]); // reserved
        data.extend_from_slice(&1i32.to_le_bytes()); // xSampling
        data.extend_from_slice(&1i32.to_le_bytes()); // ySampling
    }
    data.push(0); // end of channel list

    write_attr(h, "channels", "chlist", &data);
}

fn write_box2i_attr(h: &mut Vec<u8>, name: &str, width: usize, height: usize) {
    let mut data = Vec::new();
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&((width as i32) - 1).to_le_bytes());
    data.extend_from_slice(&((height as i32) - 1).to_le_bytes());
    write_attr(h, name, "box2i", &data);
}

fn write_attr(h: &mut Vec<u8>, name: &str, type_name: &str, data: &[u8]) {
    h.extend_from_slice(name.as_bytes());
    h.push(0);
    h.extend_from_slice(type_name.as_bytes());
    h.push(0);
    h.extend_from_slice(&(data.len() as i32).to_le_bytes());
    h.extend_from_slice(data);
}

fn concat_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut v = Vec::with_capacity(a.len() + b.len());
    v.extend_from_slice(a);
    v.extend_from_slice(b);
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::io::Read;

    #[test]
    fn starts_with_magic_and_version() {
        let image = ImageBuffer::new(1, 1, vec![Color::white()]);
        let path = std::env::temp_dir().join("raytrace_exr_test.exr");
        write(&path, &image).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(MAGIC, u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]));
        assert_eq!(VERSION, u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]));
    }

    #[test]
    fn one_by_one_image_has_expected_total_size() {
        let image = ImageBuffer::new(1, 1, vec![Color::white()]);
        let header = build_header(1, 1);
        let path = std::env::temp_dir().join("raytrace_exr_test2.exr");
        write(&path, &image).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        std::fs::remove_file(&path).unwrap();

        let offset_table_size = 8;
        let scanline_size = 4 + 4 + 2 * 1 * 3;
        let expected = 4 + 4 + header.len() + offset_table_size + scanline_size;
        assert_eq!(expected, bytes.len());
    }
}
