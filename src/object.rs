use crate::bounds::Bounds;
use crate::matrix::Matrix44f;
use crate::medium::Medium;
use crate::point::Point;
use crate::ray::{Intersectable, Intersection, Ray, Transformable};
use crate::shapes::Shape;
use crate::vector::Dot;

/// Composed object<->world transform pair plus the normal transform
/// (inverse-transpose of rotation), kept in sync on every `transform` call.
#[derive(Clone)]
pub struct Transformation {
    pub object_to_world: Matrix44f,
    pub world_to_object: Matrix44f,
}

impl Transformation {
    pub fn new() -> Transformation {
        Transformation {
            object_to_world: Matrix44f::identity(),
            world_to_object: Matrix44f::identity(),
        }
    }

    pub fn position(&self) -> Point {
        self.object_to_world.position()
    }
}

impl Default for Transformation {
    fn default() -> Transformation {
        Transformation::new()
    }
}

impl Transformable for Transformation {
    fn transform(&mut self, m: Matrix44f) {
        self.object_to_world = self.object_to_world * m;
        self.world_to_object = self.object_to_world.inverse();
    }
}

/// An entity in the scene: a `Shape` (local-space geometry), a `Medium`
/// (surface/volume shading response), and the transform placing it in world
/// space. Mirrors `raytrace::objects::object` in the original C++: the object
/// is both the geometric and material unit the renderer reasons about.
pub struct Object {
    pub name: String,
    pub shape: Box<dyn Shape>,
    pub medium: Box<dyn Medium>,
    pub tx: Transformation,
}

impl Object {
    pub fn new(name: &str, shape: Box<dyn Shape>, medium: Box<dyn Medium>) -> Object {
        Object { name: String::from(name), shape, medium, tx: Transformation::new() }
    }

    pub fn positioned_at(mut self, m: Matrix44f) -> Object {
        self.transform(m);
        self
    }

    /// Raw, unfiltered collisions along the ray, transformed into world
    /// space but not yet reduced to "the" intersection. Used by CSG overlap
    /// composition, which needs every crossing, not just the nearest one.
    pub fn collisions_along(&self, world_ray: &Ray) -> Vec<Intersection> {
        let object_ray = world_ray.to_object(&self.tx);
        self.shape
            .collisions_along(&object_ray)
            .into_iter()
            .map(|i| i.to_world(world_ray, &object_ray, &self.tx))
            .collect()
    }

    /// True when `world_point` is strictly outside the object's volume;
    /// used by CSG inclusive/exclusive composition to classify points that
    /// lie on only one operand's surface.
    pub fn is_outside(&self, world_point: Point) -> bool {
        let object_point = world_point * self.tx.world_to_object;
        self.shape.is_outside(object_point)
    }

    pub fn is_closed_surface(&self) -> bool {
        self.shape.is_closed_surface()
    }

    pub fn world_bounds(&self) -> Bounds {
        let local = self.shape.bounds();
        if local.is_infinite() {
            return local;
        }
        // Transform all 8 corners and take their AABB; cheap and correct
        // for the affine (rotation+scale+translation) transforms in play.
        let corners = [
            Point::new(local.min.x, local.min.y, local.min.z),
            Point::new(local.min.x, local.min.y, local.max.z),
            Point::new(local.min.x, local.max.y, local.min.z),
            Point::new(local.min.x, local.max.y, local.max.z),
            Point::new(local.max.x, local.min.y, local.min.z),
            Point::new(local.max.x, local.min.y, local.max.z),
            Point::new(local.max.x, local.max.y, local.min.z),
            Point::new(local.max.x, local.max.y, local.max.z),
        ];
        let mut out = Bounds::new(corners[0] * self.tx.object_to_world, corners[0] * self.tx.object_to_world);
        for c in &corners[1..] {
            let p = *c * self.tx.object_to_world;
            out.grow(&Bounds::new(p, p));
        }
        out
    }

    pub fn is_along_infinite_extent(&self) -> bool {
        self.shape.bounds().is_infinite()
    }
}

impl Transformable for Object {
    fn transform(&mut self, m: Matrix44f) {
        self.tx.transform(m);
    }
}

impl Intersectable for Object {
    /// Finds the nearest valid intersection, applying the t=0
    /// self-intersection rule transcribed from `objects/object.hpp`: a
    /// near-zero hit is a genuine re-entry collision only if the ray is
    /// exiting the surface there, or if the medium is refractive (in which
    /// case the ray is allowed to continue through the near-zero point
    /// rather than bouncing off it).
    fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let object_ray = ray.to_object(&self.tx);
        self.shape
            .collisions_along(&object_ray)
            .into_iter()
            .filter(|hit| {
                if hit.t < 0.0 {
                    return false;
                }
                if hit.is_near_zero() {
                    return hit.is_exiting(object_ray.direction) || self.medium.refractive_index(hit.point(&object_ray)) > 0.0;
                }
                true
            })
            .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap())
            .map(|i| i.to_world(ray, &object_ray, &self.tx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediums::Opaque;
    use crate::shapes::Sphere;
    use crate::vector::Vector;

    #[test]
    fn sphere_object_intersects_along_axis() {
        let o = Object::new("s", Box::new(Sphere::new(Point::zero(), 1.0)), Box::new(Opaque::default()));
        let r = Ray::primary(Point::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hit = o.intersect(&r).expect("expected a hit");
        assert!((hit.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn translated_sphere_moves_with_object() {
        let o = Object::new("s", Box::new(Sphere::new(Point::zero(), 1.0)), Box::new(Opaque::default()))
            .positioned_at(Matrix44f::translation(Vector::new(5.0, 0.0, 0.0)));
        let r = Ray::primary(Point::new(5.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert!(o.intersect(&r).is_some());
        let miss = Ray::primary(Point::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert!(miss.to_object(&o.tx).direction.length_squared() > 0.0);
    }
}
