use crate::color::Color;
use crate::lights::{Distant, Light};
use crate::mediums::Metal;
use crate::object::Object;
use crate::point::Point;
use crate::ray::Ray;
use crate::scene::SceneBuilder;
use crate::shapes::Sphere;
use crate::vector::{Dot, Vector};

/// A central sphere surrounded by a halo of smaller metal spheres spread
/// evenly over a containing sphere via a golden-ratio (Fibonacci) mapping,
/// lit by a single distant sun. Grounded on
/// `original_source/raytrace/demo/world_spheres2.cpp`'s `Spheres2World`.
#[derive(Clone, Copy)]
pub struct Spheres {
    pub look_from: Point,
    pub look_at: Point,
    pub halo_count: usize,
    pub halo_radius: f64,
    pub sub_sphere_radius: f64,
}

impl Default for Spheres {
    fn default() -> Spheres {
        Spheres {
            look_from: Point::new(20.0, 0.0, 20.0),
            look_at: Point::zero(),
            halo_count: 128,
            halo_radius: 6.0,
            sub_sphere_radius: 0.4,
        }
    }
}

/// A deterministic point on the unit sphere for index `i` of `n`, spaced by
/// the golden angle so consecutive indices land far apart; used instead of
/// `rand` so a demo's layout is reproducible across runs.
fn golden_ratio_mapper(i: usize, n: usize) -> Vector {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
    let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
    let radius_at_y = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f64;
    Vector::new(theta.cos() * radius_at_y, y, theta.sin() * radius_at_y)
}

const METAL_TINTS: [Color; 10] = [
    Color { r: 0.91, g: 0.92, b: 0.92 }, // aluminum
    Color { r: 0.71, g: 0.65, b: 0.26 }, // brass
    Color { r: 0.80, g: 0.50, b: 0.20 }, // bronze
    Color { r: 0.55, g: 0.56, b: 0.55 }, // chrome
    Color { r: 0.72, g: 0.45, b: 0.20 }, // copper
    Color { r: 0.83, g: 0.69, b: 0.22 }, // gold
    Color { r: 0.75, g: 0.75, b: 0.75 }, // silver
    Color { r: 0.62, g: 0.63, b: 0.63 }, // stainless
    Color { r: 0.56, g: 0.57, b: 0.58 }, // steel
    Color { r: 0.65, g: 0.65, b: 0.68 }, // tin
];

impl SceneBuilder for Spheres {
    fn window_name(&self) -> &str {
        "Spheres"
    }

    fn output_filename(&self) -> &str {
        "world_spheres.tga"
    }

    fn looking_from(&self) -> Point {
        self.look_from
    }

    fn looking_at(&self) -> Point {
        self.look_at
    }

    fn background(&self, ray: &Ray) -> Color {
        let cos_theta = ray.direction.dot(Vector::new(0.0, 0.0, 1.0)).clamp(-1.0, 1.0);
        let a = cos_theta.acos() / std::f64::consts::PI;
        Color::new(0.8 * a, 0.8 * a, 0.8 * a)
    }

    fn add_to(&self, objects: &mut Vec<Object>, lights: &mut Vec<Box<dyn Light>>) {
        objects.push(Object::new("center", Box::new(Sphere::new(self.look_at, 4.5)), Box::new(Metal::new(METAL_TINTS[0]))));

        for i in 0..self.halo_count {
            let direction = golden_ratio_mapper(i, self.halo_count);
            let center = self.look_at + direction * self.halo_radius;
            let tint = METAL_TINTS[i % METAL_TINTS.len()];
            let name = format!("halo-{i}");
            objects.push(Object::new(&name, Box::new(Sphere::new(center, self.sub_sphere_radius)), Box::new(Metal::new(tint))));
        }

        lights.push(Box::new(Distant::new(Vector::new(-2.0, 2.0, -1.0), Color::white(), 5.0)));
    }

    fn get_anchors(&self) -> Vec<(String, Point)> {
        vec![("look_from".to_string(), self.look_from), ("look_at".to_string(), self.look_at)]
    }
}
