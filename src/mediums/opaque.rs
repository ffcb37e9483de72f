use crate::color::Color;
use crate::medium::Medium;
use crate::point::Point;
use crate::texture::{ColorSource, Texture};
use crate::vector::Vector2;

/// A non-transmissive surface shaded with Blinn-Phong diffuse/specular
/// terms, grounded on this crate's `materials::lambertian` combined with
/// `shader::Shader::DiffuseSpecular`. Never refracts; `smoothness` splits
/// its reflected energy between the direct specular highlight and a
/// traced mirror bounce the way the design describes.
pub struct Opaque {
    pub diffuse: Texture,
    pub specular_color: Color,
    pub emissive: Option<Texture>,
    pub ambient_scale: f64,
    pub smoothness: f64,
    pub tightness: f64,
}

impl Opaque {
    pub fn new(diffuse: Texture) -> Opaque {
        Opaque {
            diffuse,
            specular_color: Color::white(),
            emissive: None,
            ambient_scale: 0.1,
            smoothness: 0.0,
            tightness: 32.0,
        }
    }

    pub fn with_specular(mut self, color: Color, tightness: f64) -> Opaque {
        self.specular_color = color;
        self.tightness = tightness;
        self
    }

    pub fn with_smoothness(mut self, smoothness: f64) -> Opaque {
        self.smoothness = smoothness.clamp(0.0, 1.0);
        self
    }

    pub fn with_emissive(mut self, emissive: Texture) -> Opaque {
        self.emissive = Some(emissive);
        self
    }
}

impl Default for Opaque {
    fn default() -> Opaque {
        Opaque::new(Texture::Solid(Color::white()))
    }
}

impl Medium for Opaque {
    fn ambient(&self, point: Point, uv: Vector2) -> Color {
        self.diffuse.color_at(point, uv)
    }

    fn ambient_scale(&self) -> f64 {
        self.ambient_scale
    }

    fn diffuse(&self, point: Point, uv: Vector2) -> Color {
        self.diffuse.color_at(point, uv)
    }

    fn specular(&self, _point: Point, _uv: Vector2, cos_theta: f64, light_color: Color) -> Color {
        self.specular_color * light_color * cos_theta.max(0.0).powf(self.tightness)
    }

    fn emissive(&self, point: Point, uv: Vector2) -> Color {
        match &self.emissive {
            Some(t) => t.color_at(point, uv),
            None => Color::black(),
        }
    }

    fn smoothness(&self, _point: Point) -> f64 {
        self.smoothness
    }

    fn radiosity(&self, _point: Point, _eta_incoming: f64, _theta_i: f64, _theta_t: Option<f64>) -> (f64, f64, f64) {
        (0.0, self.smoothness, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fully_diffuse() {
        let m = Opaque::default();
        assert_eq!(0.0, m.smoothness(Point::zero()));
        let (e, r, t) = m.radiosity(Point::zero(), 1.0, 0.0, None);
        assert_eq!((0.0, 0.0, 0.0), (e, r, t));
    }

    #[test]
    fn specular_falls_off_with_angle() {
        let m = Opaque::default().with_specular(Color::white(), 32.0);
        let head_on = m.specular(Point::zero(), Vector2::zero(), 1.0, Color::white());
        let grazing = m.specular(Point::zero(), Vector2::zero(), 0.2, Color::white());
        assert!(head_on.r > grazing.r);
    }

    #[test]
    fn smoothness_feeds_reflected_fraction() {
        let m = Opaque::default().with_smoothness(0.6);
        let (_, reflected, transmitted) = m.radiosity(Point::zero(), 1.0, 0.0, None);
        assert_eq!(0.6, reflected);
        assert_eq!(0.0, transmitted);
    }
}
