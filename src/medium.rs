use crate::color::Color;
use crate::point::Point;
use crate::vector::{Vector, Vector2};

/// Shading material capability set, grounded on the design and the
/// teacher's `shader::Shader`/`materials::Material` split, unified here into
/// a single trait instead of two. A `Medium` answers both "what color does
/// this point scatter" (ambient/diffuse/specular/emissive) and "how does
/// energy split between emission, reflection, and transmission at this
/// angle" (`radiosity`), which the recursive integrator in `system.rs` uses
/// to weight its reflected/refracted rays.
pub trait Medium: Send + Sync {
    fn ambient(&self, point: Point, uv: Vector2) -> Color;

    /// Scale applied to `ambient()` before adding it to the shaded result;
    /// kept separate from the color itself so a medium can darken ambient
    /// contribution without darkening the surface's intrinsic hue.
    fn ambient_scale(&self) -> f64;

    fn diffuse(&self, point: Point, uv: Vector2) -> Color;

    /// Computes the full Blinn-Phong specular term: the medium's specular
    /// tint, multiplied by `light_color`, multiplied by
    /// `cos_theta.max(0.0).powf(self.tightness())`, where `cos_theta` is
    /// `dot(N, H)` for the halfway vector `H`.
    fn specular(&self, point: Point, uv: Vector2, cos_theta: f64, light_color: Color) -> Color;

    fn emissive(&self, _point: Point, _uv: Vector2) -> Color {
        Color::black()
    }

    /// Mirror fraction in `[0,1]`; `1 - smoothness` is the diffuse fraction
    /// the direct-lighting term uses.
    fn smoothness(&self, point: Point) -> f64;

    /// Blinn-Phong exponent, `≥ 1`.
    fn tightness(&self) -> f64 {
        1.0
    }

    /// `0.0` signals "not refractive" (the t=0 self-intersection contract in
    /// `object.rs` uses this, not a physical index of 1.0, to decide whether
    /// a near-zero entering hit should be treated as a genuine surface or
    /// let the ray continue through). Real transparent/metal media that
    /// participate in Snell refraction return their index, `≥ 1`.
    fn refractive_index(&self, _point: Point) -> f64 {
        0.0
    }

    /// Beer's-law absorption coefficient per unit distance, `≥ 0`.
    fn fade(&self) -> f64 {
        0.0
    }

    /// Beer's-law attenuation of light travelling `distance` through this
    /// medium: `incoming · exp(−fade·distance·(1−diffuse))`, componentwise.
    /// Opaque media never transmit light through their volume so the
    /// default is a no-op; transparent media override it.
    fn absorbance(&self, _distance: f64, incoming: Color) -> Color {
        incoming
    }

    /// The local energy partition `(emitted, reflected, transmitted)`, each
    /// `≥ 0` and summing to `≤ 1 + 1e-9`. `cos_theta_i` is `cos(theta_i)`,
    /// not the angle itself — callers (`shader::trace`) already have the
    /// cosine from the surface-normal dot product and never recover the
    /// angle, so implementations should feed it straight into Schlick's
    /// formula rather than calling `.cos()` on it. `cos_theta_t` is `None`
    /// under total internal reflection.
    fn radiosity(&self, point: Point, eta_incoming: f64, cos_theta_i: f64, cos_theta_t: Option<f64>) -> (f64, f64, f64);

    /// Normal-perturbation vector for bump mapping; zero (no perturbation)
    /// by default.
    fn perturbation(&self, _point: Point) -> Vector {
        Vector::zero()
    }
}

/// Schlick's approximation to the Fresnel reflectance at normal-to-grazing
/// incidence, grounded on the design.
pub fn schlick_r0(eta1: f64, eta2: f64) -> f64 {
    ((eta1 - eta2) / (eta1 + eta2)).powi(2)
}

pub fn schlick_reflectance(r0: f64, cos_theta: f64) -> f64 {
    r0 + (1.0 - r0) * (1.0 - cos_theta).max(0.0).powi(5)
}

/// The medium a primary ray starts in before it hits anything: refractive
/// index 1.0 (so Snell's law at the first surface behaves like air-to-glass
/// rather than glass-to-glass), no absorbance, no surface response of its
/// own (it is never the medium of a hit object, only the `incoming_medium`
/// argument to the top-level `trace` call).
pub struct Vacuum;

impl Medium for Vacuum {
    fn ambient(&self, _point: Point, _uv: Vector2) -> Color {
        Color::black()
    }

    fn ambient_scale(&self) -> f64 {
        0.0
    }

    fn diffuse(&self, _point: Point, _uv: Vector2) -> Color {
        Color::black()
    }

    fn specular(&self, _point: Point, _uv: Vector2, _cos_theta: f64, _light_color: Color) -> Color {
        Color::black()
    }

    fn smoothness(&self, _point: Point) -> f64 {
        0.0
    }

    fn refractive_index(&self, _point: Point) -> f64 {
        1.0
    }

    fn radiosity(&self, _point: Point, _eta_incoming: f64, _theta_i: f64, _theta_t: Option<f64>) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schlick_is_monotonic_in_theta() {
        let r0 = schlick_r0(1.0, 1.5);
        let mut prev = schlick_reflectance(r0, 1.0);
        let mut theta = 0.0f64;
        while theta < std::f64::consts::FRAC_PI_2 {
            let cos_theta = theta.cos();
            let r = schlick_reflectance(r0, cos_theta);
            assert!(r >= prev - 1e-9, "R(theta) should be non-decreasing as theta increases");
            prev = r;
            theta += 0.05;
        }
    }

    #[test]
    fn schlick_at_normal_incidence_is_r0() {
        let r0 = schlick_r0(1.0, 1.5);
        assert!((schlick_reflectance(r0, 1.0) - r0).abs() < 1e-9);
    }
}
