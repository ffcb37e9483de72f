use crate::color::Color;
use crate::medium::{schlick_r0, schlick_reflectance, Medium};
use crate::point::Point;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::vector::{Dot, Vector, Vector2};

/// Reflection/refraction secondary rays are offset along the surface normal
/// by this much to avoid immediately re-hitting the surface they spawned
/// from, per spec.md §4.10.3's note that the epsilon offset is essential.
const EPSILON: f64 = 1e-4;

/// Tunables the recursive integrator needs beyond the scene geometry
/// itself; split out of `RenderOptions` so `trace` doesn't depend on the
/// image-dimension/sample-count fields it never reads.
#[derive(Debug, Clone, Copy)]
pub struct ShadingOptions {
    pub max_depth: u16,
    pub adaptive_reflection_threshold: f64,
}

/// The recursive Whitted-style integrator: finds the nearest hit, splits
/// its energy into emissive/reflective/transmissive fractions via the hit
/// medium's `radiosity`, accumulates direct (shadowed, Blinn-Phong) light
/// contribution, and recurses on reflection/refraction rays until depth or
/// contribution cuts the branch. Transcribed from spec.md §4.10.3's
/// pseudocode, generalized from the teacher's `Shader::shade_point` /
/// `materials::dielectric` reflect/refract/Fresnel math to the `Medium`
/// trait.
pub fn trace<'a>(ray: &Ray, scene: &'a Scene, incoming_medium: &'a dyn Medium, depth: u16, contribution: f64, options: &ShadingOptions) -> Color {
    trace_with_stack(ray, scene, &[incoming_medium], depth, contribution, options)
}

/// `medium_stack` is the nest of media the ray has entered so far, base to
/// tip, mirroring spec.md §4.10.3's `incoming_medium_stack`: its last
/// element is the medium the ray currently travels through (what `trace`
/// used to call `incoming_medium`). Entering a surface pushes that
/// surface's medium; exiting pops back to whatever enclosed it before —
/// the scene's ambient medium at the base, or an outer transparent object
/// for nested media. Using a fixed `incoming_medium` for every exit (the
/// previous behavior) made `eta1 == eta2` at an exit whenever the ray had
/// entered only one surface deep, silently cancelling Snell bending and
/// making total internal reflection at a back face unreachable.
fn trace_with_stack<'a>(ray: &Ray, scene: &'a Scene, medium_stack: &[&'a dyn Medium], depth: u16, contribution: f64, options: &ShadingOptions) -> Color {
    if contribution < options.adaptive_reflection_threshold {
        return Color::black();
    }

    let incoming_medium = *medium_stack.last().expect("medium_stack always carries at least the ambient medium");

    let (object, hit) = match scene.nearest_hit(ray) {
        Some(x) => x,
        None => return scene.background(ray),
    };

    let p = hit.point(ray);
    let (mut n, cos_i, ray_is_inside) = {
        let cos_incident = -ray.direction.dot(hit.n);
        if cos_incident < 0.0 {
            (hit.n * -1.0, -cos_incident, true)
        } else {
            (hit.n, cos_incident, false)
        }
    };
    n = n.normalize();

    let medium = object.medium.as_ref();
    // On exit, the medium the ray transmits into is whatever enclosed the
    // surface being left — one level below the top of the stack — not the
    // medium of the surface itself.
    let outside_medium = medium_stack.len().checked_sub(2).map_or(incoming_medium, |i| medium_stack[i]);
    let (eta1, eta2) = refraction_indices(ray_is_inside, medium, incoming_medium, outside_medium, p);

    let theta_t = snell_cos_theta_t(eta1, eta2, cos_i);
    let (e, r, t) = medium.radiosity(p, eta1, cos_i, theta_t);

    let mut color = medium.emissive(p, hit.uv) * e;
    color += direct_shading(scene, medium, p, n, hit.uv, ray);

    if depth < options.max_depth {
        if r > 0.0 {
            let reflected_dir = ray.direction.reflect(n);
            let reflected_origin = p + n * EPSILON;
            let reflected_ray = Ray::primary(reflected_origin, reflected_dir, depth + 1);
            color += trace_with_stack(&reflected_ray, scene, medium_stack, depth + 1, contribution * r, options) * r;
        }
        if t > 0.0 {
            if let Some(theta_t) = theta_t {
                let refracted_dir = refract(ray.direction, n, eta1, eta2, cos_i, theta_t);
                let refracted_origin = p - n * EPSILON;
                let refracted_ray = Ray::primary(refracted_origin, refracted_dir, depth + 1);
                color += if ray_is_inside {
                    let mut popped = medium_stack.to_vec();
                    if popped.len() > 1 {
                        popped.pop();
                    }
                    trace_with_stack(&refracted_ray, scene, &popped, depth + 1, contribution * t, options) * t
                } else {
                    let mut pushed = medium_stack.to_vec();
                    pushed.push(medium);
                    trace_with_stack(&refracted_ray, scene, &pushed, depth + 1, contribution * t, options) * t
                };
            }
        }
    }

    incoming_medium.absorbance(hit.t.abs(), color)
}

/// The (eta1, eta2) pair Snell's law and `radiosity` see at a hit: entering
/// a surface, light travels from whatever medium it already carried into
/// the hit surface's own medium; exiting, it travels from the surface's
/// medium into whatever encloses it from outside (`outside_medium`, one
/// level below the top of the medium stack — the scene's ambient medium
/// for an object floating in open space, or an enclosing transparent
/// object's medium when nested). Split out of `trace_with_stack` so the
/// entering/exiting branch is directly testable without a full scene.
fn refraction_indices(ray_is_inside: bool, medium: &dyn Medium, incoming_medium: &dyn Medium, outside_medium: &dyn Medium, p: Point) -> (f64, f64) {
    if ray_is_inside {
        (medium.refractive_index(p).max(1.0), outside_medium.refractive_index(p).max(1.0))
    } else {
        (incoming_medium.refractive_index(p).max(1.0), medium.refractive_index(p).max(1.0))
    }
}

/// Blinn-Phong direct lighting, summed over every light and every sample
/// within it, attenuated by the shadow ray's transmittance toward that
/// sample.
fn direct_shading(scene: &Scene, medium: &dyn Medium, p: Point, n: Vector, uv: Vector2, incident: &Ray) -> Color {
    let mut total = Color::black();

    for light in &scene.lights {
        let mut light_contribution = Color::black();
        let samples = light.sample_count().max(1);

        for i in 0..samples {
            let sample = light.sample(i, p);
            if sample.direction.length_squared() == 0.0 {
                continue;
            }

            let shadow_ray = Ray::shadow(p + n * EPSILON, sample.direction, 0);
            let transmittance = scene.shadow_transmittance(&shadow_ray, sample.distance);
            if transmittance <= 0.0 {
                continue;
            }

            let n_dot_l = n.dot(sample.direction).max(0.0);
            if n_dot_l <= 0.0 {
                continue;
            }

            let intensity = light.intensity_at(sample.distance, sample.direction);
            let diffuse = medium.diffuse(p, uv) * sample.color * n_dot_l;

            let halfway = (sample.direction - incident.direction).normalize();
            let cos_theta = n.dot(halfway).max(0.0);
            let specular = medium.specular(p, uv, cos_theta, sample.color);

            light_contribution += (diffuse + specular) * intensity * transmittance;
        }

        total += light_contribution / samples as f64;
    }

    total += medium.ambient(p, uv) * medium.ambient_scale();
    total
}

/// Snell's law: returns `cos(theta_t)` or `None` under total internal
/// reflection (`sin(theta_t) > 1`).
fn snell_cos_theta_t(eta1: f64, eta2: f64, cos_theta_i: f64) -> Option<f64> {
    let eta_ratio = eta1 / eta2;
    let sin2_theta_t = eta_ratio.powi(2) * (1.0 - cos_theta_i.powi(2)).max(0.0);
    if sin2_theta_t > 1.0 {
        None
    } else {
        Some((1.0 - sin2_theta_t).sqrt())
    }
}

/// The refracted direction, given the incident direction, the (outward,
/// already depth-corrected) surface normal, the two indices, and their
/// already-computed cosines.
fn refract(incident: Vector, n: Vector, eta1: f64, eta2: f64, cos_theta_i: f64, cos_theta_t: f64) -> Vector {
    let eta_ratio = eta1 / eta2;
    incident * eta_ratio + n * (eta_ratio * cos_theta_i - cos_theta_t)
}

/// Fresnel reflectance for a transparent medium at this incidence, via
/// Schlick's approximation. Exposed for `mediums::transparent` and for
/// tests; identical math to `medium::schlick_reflectance`, parameterized on
/// the two indices directly.
pub fn fresnel_reflectance(eta1: f64, eta2: f64, cos_theta: f64) -> f64 {
    schlick_reflectance(schlick_r0(eta1, eta2), cos_theta)
}
