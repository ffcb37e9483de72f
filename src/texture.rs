use image::{Pixel, RgbImage};

use crate::color::Color;
use crate::point::Point;
use crate::vector::Vector2;

/// A color lookup keyed on both the 3-D (object/volumetric) point and its
/// reduced (u,v) surface coordinate, so a pattern can pick whichever is more
/// natural: `Checkerboard`/`Stripes`/`Perlin` want the 3-D point,
/// `Image`/`Grid` want (u,v).
pub trait ColorSource: Send + Sync {
    fn color_at(&self, point: Point, uv: Vector2) -> Color;
}

/// A medium's color input: either a flat color or a procedural/image
/// pattern. Grounded on this crate's `texture::Texture`, extended with the
/// pattern set the design names.
#[derive(Clone)]
pub enum Texture {
    Solid(Color),
    Pattern(Pattern),
    Image(RgbImage),
}

impl ColorSource for Texture {
    fn color_at(&self, point: Point, uv: Vector2) -> Color {
        match self {
            Texture::Solid(c) => *c,
            Texture::Pattern(p) => p.color_at(point, uv),
            Texture::Image(i) => i.color_at(point, uv),
        }
    }
}

impl From<Color> for Texture {
    fn from(c: Color) -> Texture {
        Texture::Solid(c)
    }
}

fn mix(a: Color, b: Color, v: f64) -> Color {
    a * (1.0 - v) + b * v
}

/// Procedural patterns, grounded on this crate's `texture::Pattern`
/// (`Checkerboard`) plus the `stripes`/`dots`/`grid`/`perlin` supplements
/// named in the design.
#[derive(Clone)]
pub enum Pattern {
    Checkerboard(Color, Color, f64),
    Stripes(Color, Color, f64),
    Dots(Color, Color, f64),
    Grid(Color, Color, f64, f64),
    Perlin(Color, Color, f64),
}

impl ColorSource for Pattern {
    fn color_at(&self, point: Point, uv: Vector2) -> Color {
        match self {
            Pattern::Checkerboard(c1, c2, scale) => {
                let n = (point.x * scale).floor() as i64
                    + (point.y * scale).floor() as i64
                    + (point.z * scale).floor() as i64;
                if n.rem_euclid(2) == 0 { *c1 } else { *c2 }
            }
            Pattern::Stripes(c1, c2, scale) => {
                let n = (point.x * scale).floor() as i64;
                if n.rem_euclid(2) == 0 { *c1 } else { *c2 }
            }
            Pattern::Dots(c1, c2, scale) => {
                let cx = (point.x * scale).floor() / scale + 0.5 / scale;
                let cy = (point.y * scale).floor() / scale + 0.5 / scale;
                let cz = (point.z * scale).floor() / scale + 0.5 / scale;
                let dx = point.x - cx;
                let dy = point.y - cy;
                let dz = point.z - cz;
                let d2 = dx * dx + dy * dy + dz * dz;
                if d2 < 0.25 / (scale * scale) { *c1 } else { *c2 }
            }
            Pattern::Grid(c1, c2, scale, line_width) => {
                let fu = (uv.0 * scale).fract().abs();
                let fv = (uv.1 * scale).fract().abs();
                if fu < *line_width || fv < *line_width { *c1 } else { *c2 }
            }
            Pattern::Perlin(c1, c2, scale) => {
                let n = perlin_noise(point.x * scale, point.y * scale, point.z * scale);
                mix(*c1, *c2, (n + 1.0) * 0.5)
            }
        }
    }
}

impl ColorSource for RgbImage {
    fn color_at(&self, _point: Point, uv: Vector2) -> Color {
        let x = ((uv.0.rem_euclid(1.0)) * (self.width() as f64)) as u32;
        let y = ((uv.1.rem_euclid(1.0)) * (self.height() as f64)) as u32;
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        let p = self.get_pixel(x, y);
        let c = p.channels();
        Color::new((c[0] as f64) / 255.0, (c[1] as f64) / 255.0, (c[2] as f64) / 255.0)
    }
}

/// A minimal classic-Perlin-style gradient noise: deterministic hashed
/// lattice gradients plus smootherstep interpolation. Grounded on
/// `original_source`'s `mediums/perlin.hpp` gradient-lattice approach;
/// deterministic (no external RNG) so renders stay reproducible.
fn hash(x: i64, y: i64, z: i64) -> u32 {
    let mut h = (x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263) ^ z.wrapping_mul(2_147_483_647)) as u64;
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    (h ^ (h >> 16)) as u32
}

fn gradient(ix: i64, iy: i64, iz: i64, dx: f64, dy: f64, dz: f64) -> f64 {
    let h = hash(ix, iy, iz) & 15;
    let (u, v) = if h < 8 { (dx, dy) } else { (dy, dz) };
    let a = if h & 1 == 0 { u } else { -u };
    let b = if h & 2 == 0 { v } else { -v };
    a + b
}

fn smootherstep(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn perlin_noise(x: f64, y: f64, z: f64) -> f64 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let z0 = z.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;
    let fz = z - z0 as f64;

    let mut total = 0.0;
    for dz in 0..2i64 {
        for dy in 0..2i64 {
            for dx in 0..2i64 {
                let weight = (if dx == 0 { 1.0 - smootherstep(fx) } else { smootherstep(fx) })
                    * (if dy == 0 { 1.0 - smootherstep(fy) } else { smootherstep(fy) })
                    * (if dz == 0 { 1.0 - smootherstep(fz) } else { smootherstep(fz) });
                total += weight
                    * gradient(x0 + dx, y0 + dy, z0 + dz, fx - dx as f64, fy - dy as f64, fz - dz as f64);
            }
        }
    }
    total.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let p = Pattern::Checkerboard(Color::black(), Color::white(), 1.0);
        let a = p.color_at(Point::new(0.25, 0.0, 0.0), Vector2::zero());
        let b = p.color_at(Point::new(1.25, 0.0, 0.0), Vector2::zero());
        assert_ne!(a, b);
    }

    #[test]
    fn perlin_is_bounded() {
        for i in 0..50 {
            let n = perlin_noise(i as f64 * 0.37, i as f64 * 0.11, i as f64 * 0.91);
            assert!(n >= -1.0 && n <= 1.0);
        }
    }

    #[test]
    fn solid_texture_ignores_point() {
        let t = Texture::Solid(Color::red());
        assert_eq!(Color::red(), t.color_at(Point::zero(), Vector2::zero()));
        assert_eq!(Color::red(), t.color_at(Point::new(5.0, 5.0, 5.0), Vector2::zero()));
    }
}
