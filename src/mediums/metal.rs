use crate::color::Color;
use crate::medium::{schlick_reflectance, Medium};
use crate::point::Point;
use crate::vector::Vector2;

/// A conductor: almost-pure specular reflectance tinted by the metal's
/// characteristic color, with no transmission. Grounded on this crate's
/// `materials::metal`, using Schlick's approximation with the tint's own
/// components as the normal-incidence reflectance `r0` in place of an
/// index-of-refraction ratio, since conductors don't have a single real
/// eta the way dielectrics do.
pub struct Metal {
    pub tint: Color,
    pub roughness: f64,
}

impl Metal {
    pub fn new(tint: Color) -> Metal {
        Metal { tint, roughness: 0.0 }
    }

    pub fn with_roughness(mut self, roughness: f64) -> Metal {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    fn r0_channel(&self, channel: f64, cos_theta: f64) -> f64 {
        schlick_reflectance(channel, cos_theta)
    }
}

impl Medium for Metal {
    fn ambient(&self, _point: Point, _uv: Vector2) -> Color {
        self.tint
    }

    fn ambient_scale(&self) -> f64 {
        0.05
    }

    fn diffuse(&self, _point: Point, _uv: Vector2) -> Color {
        Color::black()
    }

    fn specular(&self, _point: Point, _uv: Vector2, cos_theta: f64, light_color: Color) -> Color {
        self.tint * light_color * cos_theta.max(0.0).powf(256.0)
    }

    fn smoothness(&self, _point: Point) -> f64 {
        1.0 - self.roughness
    }

    fn radiosity(&self, _point: Point, _eta_incoming: f64, cos_theta_i: f64, _cos_theta_t: Option<f64>) -> (f64, f64, f64) {
        let cos_theta = cos_theta_i;
        let r = Color::new(
            self.r0_channel(self.tint.r, cos_theta),
            self.r0_channel(self.tint.g, cos_theta),
            self.r0_channel(self.tint.b, cos_theta),
        );
        let reflected = (r.r + r.g + r.b) / 3.0;
        (0.0, reflected * self.smoothness(Point::zero()), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rough_metal_reflects_less_than_polished() {
        let polished = Metal::new(Color::new(0.9, 0.7, 0.3));
        let rough = Metal::new(Color::new(0.9, 0.7, 0.3)).with_roughness(0.8);
        let (_, rp, _) = polished.radiosity(Point::zero(), 1.0, 0.3, None);
        let (_, rr, _) = rough.radiosity(Point::zero(), 1.0, 0.3, None);
        assert!(rp > rr);
    }

    #[test]
    fn never_transmits() {
        let m = Metal::new(Color::white());
        let (_, _, transmitted) = m.radiosity(Point::zero(), 1.0, 0.5, None);
        assert_eq!(0.0, transmitted);
    }
}
