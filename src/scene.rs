use crate::bounds::Bounds;
use crate::camera::Camera;
use crate::color::Color;
use crate::error::SceneError;
use crate::lights::Light;
use crate::medium::{Medium, Vacuum};
use crate::object::Object;
use crate::octree::Octree;
use crate::point::Point;
use crate::ray::{Intersectable, Intersection, Ray};

/// A world ready to render: a camera, lights, the finite/infinite object
/// partition `trace` walks, and a background functor for rays that hit
/// nothing. Grounded on the teacher's `sdl::Scene` result shape (camera +
/// lights + objects), restructured around the explicit octree/infinite-list
/// partition.
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Box<dyn Light>>,
    finite_objects: Vec<Object>,
    infinite_objects: Vec<Object>,
    octree: Octree,
    background: Box<dyn Fn(&Ray) -> Color + Send + Sync>,
    /// Scene-wide medium (e.g. an earth-atmosphere haze) that energy
    /// travelling between surfaces passes through; `Vacuum` (no absorbance,
    /// index 1.0) unless overridden with `with_ambient_medium`. This is what
    /// `system::render` hands `shader::trace` as the top-level
    /// `incoming_medium` for primary rays, per spec.md §3's scene
    /// `ambient_medium` field.
    ambient_medium: Box<dyn Medium>,
}

impl Scene {
    /// Partitions `objects` into finite and infinite-extent groups, builds
    /// an octree over the finite ones' enclosing AABB, and keeps the
    /// infinite ones (planes, walls, ...) in a flat list tested directly.
    pub fn new(camera: Camera, lights: Vec<Box<dyn Light>>, objects: Vec<Object>, background: Box<dyn Fn(&Ray) -> Color + Send + Sync>) -> Scene {
        let (infinite_objects, finite_objects): (Vec<Object>, Vec<Object>) =
            objects.into_iter().partition(|o| o.is_along_infinite_extent());

        let world_bounds = finite_objects.iter().fold(None, |acc: Option<Bounds>, o| {
            let b = o.world_bounds();
            Some(match acc {
                Some(mut a) => {
                    a.grow(&b);
                    a
                }
                None => b,
            })
        }).unwrap_or_else(|| Bounds::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0)));

        let octree = Octree::build(&finite_objects, world_bounds);

        Scene { camera, lights, finite_objects, infinite_objects, octree, background, ambient_medium: Box::new(Vacuum) }
    }

    /// Replaces the scene-wide ambient medium (e.g. a fade/absorption haze)
    /// that primary and secondary rays start out travelling through.
    pub fn with_ambient_medium(mut self, medium: Box<dyn Medium>) -> Scene {
        self.ambient_medium = medium;
        self
    }

    pub fn ambient_medium(&self) -> &dyn Medium {
        self.ambient_medium.as_ref()
    }

    pub fn background(&self, ray: &Ray) -> Color {
        (self.background)(ray)
    }

    /// Nearest intersection across both the octree-accelerated finite
    /// objects and the flat infinite-object list, per spec.md §4.10.1's
    /// `hits = octree.intersects(ray) ∪ for o in infinite_objects: o.intersect(ray)`.
    pub fn nearest_hit<'a>(&'a self, ray: &Ray) -> Option<(&'a Object, Intersection)> {
        let from_octree = self.octree.query(ray).into_iter()
            .filter_map(|i| self.finite_objects[i].intersect(ray).map(|hit| (&self.finite_objects[i], hit)));
        let from_infinite = self.infinite_objects.iter()
            .filter_map(|o| o.intersect(ray).map(|hit| (o, hit)));

        from_octree.chain(from_infinite)
            .min_by(|(_, a), (_, b)| a.t.partial_cmp(&b.t).unwrap())
    }

    /// Multiplicative shadow-ray transmittance toward a light at
    /// `max_distance`: `1.0` with no occluder, `0.0` behind any opaque hit,
    /// otherwise the product of `1 - fade*distance` (clamped) across every
    /// transparent occluder nearer than `max_distance`, per spec.md
    /// §4.10.3's shadow-ray accumulation rule.
    pub fn shadow_transmittance(&self, ray: &Ray, max_distance: f64) -> f64 {
        let mut transmittance = 1.0;
        for (object, hit) in self.all_hits(ray) {
            if hit.t <= 0.0 || hit.t >= max_distance {
                continue;
            }
            let fade = object.medium.fade();
            if fade <= 0.0 {
                return 0.0;
            }
            transmittance *= (1.0 - fade * hit.t).max(0.0);
            if transmittance <= 0.0 {
                return 0.0;
            }
        }
        transmittance
    }

    fn all_hits<'a>(&'a self, ray: &Ray) -> Vec<(&'a Object, Intersection)> {
        let mut hits: Vec<(&Object, Intersection)> = self.octree.query(ray).into_iter()
            .filter_map(|i| self.finite_objects[i].intersect(ray).map(|hit| (&self.finite_objects[i], hit)))
            .collect();
        hits.extend(self.infinite_objects.iter().filter_map(|o| o.intersect(ray).map(|hit| (o, hit))));
        hits
    }
}

/// The capability a scene-construction crate implements to hand a finished
/// world to the renderer, mirroring the teacher's `sdl::Scene`/`sdl::parse`
/// builder result and `original_source/.../demo/world.hpp`'s per-world
/// builder-function idiom, but as a plain Rust trait object instead of a
/// textual DSL or a `dlopen`-loaded symbol (both out of scope).
pub trait SceneBuilder {
    fn window_name(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn looking_from(&self) -> Point;
    fn looking_at(&self) -> Point;

    /// Populates the object and light lists that make up this world.
    fn add_to(&self, objects: &mut Vec<Object>, lights: &mut Vec<Box<dyn Light>>);

    /// Background color seen by rays that hit nothing; solid sky-blue by
    /// default.
    fn background(&self, _ray: &Ray) -> Color {
        Color::new(0.1, 0.15, 0.3)
    }

    /// Named world-space anchor points (e.g. animation targets); empty by
    /// default.
    fn get_anchors(&self) -> Vec<(String, Point)> {
        Vec::new()
    }
}

/// Assembles a `Scene` from a `SceneBuilder`: constructs the camera via
/// `looking_from`/`looking_at`, then lets the builder populate objects and
/// lights. Takes ownership of `builder` (rather than borrowing it) so the
/// returned `Scene`'s background closure can move it in and call
/// `builder.background(ray)` for every ray the renderer casts, instead of
/// sampling it once at scene-build time.
pub fn build_scene<B: SceneBuilder + Send + Sync + 'static>(builder: B, width: usize, height: usize, hfov_degrees: f64) -> Result<Scene, SceneError> {
    let camera = Camera::new(width, height, hfov_degrees, builder.looking_from(), builder.looking_at())?;

    let mut objects = Vec::new();
    let mut lights: Vec<Box<dyn Light>> = Vec::new();
    builder.add_to(&mut objects, &mut lights);

    let background_fn = move |ray: &Ray| builder.background(ray);

    Ok(Scene::new(camera, lights, objects, Box::new(background_fn)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediums::Opaque;
    use crate::shapes::Sphere;
    use crate::vector::Vector;

    fn empty_background(_ray: &Ray) -> Color {
        Color::black()
    }

    #[test]
    fn nearest_hit_finds_closest_of_several() {
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let objects = vec![
            Object::new("near", Box::new(Sphere::new(Point::new(0.0, 0.0, 5.0), 1.0)), Box::new(Opaque::default())),
            Object::new("far", Box::new(Sphere::new(Point::new(0.0, 0.0, -5.0), 1.0)), Box::new(Opaque::default())),
        ];
        let scene = Scene::new(camera, Vec::new(), objects, Box::new(empty_background));
        let ray = Ray::primary(Point::new(0.0, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0), 0);
        let (object, _hit) = scene.nearest_hit(&ray).expect("expected a hit");
        assert_eq!("near", object.name);
    }

    #[test]
    fn ray_through_empty_space_hits_nothing() {
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let scene = Scene::new(camera, Vec::new(), Vec::new(), Box::new(empty_background));
        let ray = Ray::primary(Point::new(0.0, 0.0, 10.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert!(scene.nearest_hit(&ray).is_none());
    }

    #[test]
    fn shadow_transmittance_is_one_with_no_occluder() {
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let scene = Scene::new(camera, Vec::new(), Vec::new(), Box::new(empty_background));
        let ray = Ray::shadow(Point::zero(), Vector::new(0.0, 1.0, 0.0), 0);
        assert_eq!(1.0, scene.shadow_transmittance(&ray, 100.0));
    }

    #[test]
    fn shadow_transmittance_is_zero_behind_opaque_occluder() {
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let objects = vec![Object::new("blocker", Box::new(Sphere::new(Point::new(0.0, 5.0, 0.0), 1.0)), Box::new(Opaque::default()))];
        let scene = Scene::new(camera, Vec::new(), objects, Box::new(empty_background));
        let ray = Ray::shadow(Point::zero(), Vector::new(0.0, 1.0, 0.0), 0);
        assert_eq!(0.0, scene.shadow_transmittance(&ray, 100.0));
    }

    struct DirectionTintedBuilder;

    impl SceneBuilder for DirectionTintedBuilder {
        fn window_name(&self) -> &str {
            "direction-tinted"
        }

        fn output_filename(&self) -> &str {
            "direction-tinted.tga"
        }

        fn looking_from(&self) -> Point {
            Point::new(0.0, 0.0, 10.0)
        }

        fn looking_at(&self) -> Point {
            Point::zero()
        }

        fn add_to(&self, _objects: &mut Vec<Object>, _lights: &mut Vec<Box<dyn Light>>) {}

        fn background(&self, ray: &Ray) -> Color {
            Color::new(ray.direction.x, ray.direction.y, ray.direction.z)
        }
    }

    #[test]
    fn build_scene_background_tracks_the_actual_ray_not_a_sampled_constant() {
        let scene = build_scene(DirectionTintedBuilder, 16, 16, 60.0).unwrap();
        let up = Ray::primary(Point::zero(), Vector::new(0.0, 1.0, 0.0), 0);
        let down = Ray::primary(Point::zero(), Vector::new(0.0, -1.0, 0.0), 0);
        assert_ne!(scene.background(&up), scene.background(&down));
        assert_eq!(Color::new(0.0, 1.0, 0.0), scene.background(&up));
    }

    #[test]
    fn default_ambient_medium_is_vacuum() {
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let scene = Scene::new(camera, Vec::new(), Vec::new(), Box::new(empty_background));
        assert_eq!(1.0, scene.ambient_medium().refractive_index(Point::zero()));
        assert_eq!(Color::red(), scene.ambient_medium().absorbance(10.0, Color::red()));
    }

    #[test]
    fn with_ambient_medium_overrides_absorbance() {
        use crate::mediums::Transparent;
        let camera = Camera::new(100, 100, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let haze = Transparent::new(1.0).with_fade(0.1);
        let scene = Scene::new(camera, Vec::new(), Vec::new(), Box::new(empty_background)).with_ambient_medium(Box::new(haze));
        let dimmed = scene.ambient_medium().absorbance(10.0, Color::white());
        assert!(dimmed.r < 1.0);
    }
}
