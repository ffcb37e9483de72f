use crate::color::Color;
use crate::medium::{schlick_r0, schlick_reflectance, Medium};
use crate::point::Point;
use crate::vector::Vector2;

/// A dielectric (glass, water) medium: transmits and refracts per Snell's
/// law, reflecting the Fresnel fraction Schlick's approximation predicts.
/// Grounded on this crate's `materials::dielectric` plus the design's
/// absorbance rule. The near-zero self-intersection contract in
/// `object.rs` relies on `refractive_index` being nonzero to let a ray
/// continue through its own exit point instead of bouncing.
pub struct Transparent {
    pub tint: Color,
    pub refractive_index: f64,
    pub fade: f64,
}

impl Transparent {
    pub fn new(refractive_index: f64) -> Transparent {
        Transparent { tint: Color::white(), refractive_index, fade: 0.0 }
    }

    pub fn glass() -> Transparent {
        Transparent::new(1.5)
    }

    pub fn with_tint(mut self, tint: Color) -> Transparent {
        self.tint = tint;
        self
    }

    pub fn with_fade(mut self, fade: f64) -> Transparent {
        self.fade = fade;
        self
    }
}

impl Medium for Transparent {
    fn ambient(&self, _point: Point, _uv: Vector2) -> Color {
        Color::black()
    }

    fn ambient_scale(&self) -> f64 {
        0.0
    }

    fn diffuse(&self, _point: Point, _uv: Vector2) -> Color {
        self.tint
    }

    fn specular(&self, _point: Point, _uv: Vector2, cos_theta: f64, light_color: Color) -> Color {
        light_color * cos_theta.max(0.0).powf(128.0)
    }

    fn smoothness(&self, _point: Point) -> f64 {
        1.0
    }

    fn refractive_index(&self, _point: Point) -> f64 {
        self.refractive_index
    }

    fn fade(&self) -> f64 {
        self.fade
    }

    fn absorbance(&self, distance: f64, incoming: Color) -> Color {
        let k = |c: f64| (-self.fade * distance * (1.0 - c)).exp();
        Color::new(incoming.r * k(self.tint.r), incoming.g * k(self.tint.g), incoming.b * k(self.tint.b))
    }

    fn radiosity(&self, _point: Point, eta_incoming: f64, cos_theta_i: f64, cos_theta_t: Option<f64>) -> (f64, f64, f64) {
        match cos_theta_t {
            None => (0.0, 1.0, 0.0),
            Some(_) => {
                let r0 = schlick_r0(eta_incoming, self.refractive_index);
                let reflectance = schlick_reflectance(r0, cos_theta_i);
                (0.0, reflectance, 1.0 - reflectance)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_internal_reflection_reflects_fully() {
        let m = Transparent::glass();
        let (e, r, t) = m.radiosity(Point::zero(), 1.5, 0.5, None);
        assert_eq!((0.0, 1.0, 0.0), (e, r, t));
    }

    #[test]
    fn normal_incidence_splits_by_schlick() {
        let m = Transparent::glass();
        let (_, reflected, transmitted) = m.radiosity(Point::zero(), 1.0, 1.0, Some(1.0));
        let expected_r0 = schlick_r0(1.0, 1.5);
        assert!((reflected - expected_r0).abs() < 1e-9);
        assert!((reflected + transmitted - 1.0).abs() < 1e-9);
    }

    #[test]
    fn grazing_incidence_reflects_almost_fully() {
        let m = Transparent::glass();
        let (_, reflected, _) = m.radiosity(Point::zero(), 1.0, 0.01, Some(0.9999));
        assert!(reflected > 0.9);
    }

    #[test]
    fn absorbance_attenuates_over_distance() {
        let m = Transparent::glass().with_tint(Color::new(0.9, 0.9, 0.9)).with_fade(1.0);
        let near = m.absorbance(0.1, Color::white());
        let far = m.absorbance(10.0, Color::white());
        assert!(far.r < near.r);
    }
}
