use std::cmp;

use crate::matrix::Matrix44f;
use crate::object::Transformation;
use crate::point::Point;
use crate::vector::{Dot, Vector, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayKind {
    Normal,
    Shadow,
}

/// A parameterized line `origin + t*direction`, carrying the recursion depth
/// and precomputed slab-test helpers (`inverse_direction`/`sign`) so every
/// bounds check along the way can reuse them.
#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub kind: RayKind,
    pub origin: Point,
    pub direction: Vector,
    pub depth: u16,
    pub inverse_direction: Vector,
    pub sign: [usize; 3],
}

impl Ray {
    pub fn primary(origin: Point, direction: Vector, depth: u16) -> Ray {
        Ray::new(RayKind::Normal, origin, direction, depth)
    }

    pub fn shadow(origin: Point, direction: Vector, depth: u16) -> Ray {
        Ray::new(RayKind::Shadow, origin, direction, depth)
    }

    fn new(kind: RayKind, origin: Point, direction: Vector, depth: u16) -> Ray {
        let inverse_direction = 1.0 / direction;
        Ray {
            kind,
            origin,
            direction,
            depth,
            inverse_direction,
            sign: inverse_direction.sign(),
        }
    }

    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    pub fn to_object(&self, tx: &Transformation) -> Ray {
        let mut object_ray = *self;
        object_ray.transform(tx.world_to_object);
        object_ray
    }
}

impl Transformable for Ray {
    fn transform(&mut self, m: Matrix44f) {
        self.origin = self.origin * m;
        self.direction = (self.direction * m).normalize();
        self.inverse_direction = 1.0 / self.direction;
        self.sign = self.inverse_direction.sign();
    }
}

/// A single collision of a ray with a shape's surface, in the space the
/// shape computed it (object space until `to_world` is applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub n: Vector,
    pub uv: Vector2,
}

impl Intersection {
    pub fn point(&self, ray: &Ray) -> Point {
        ray.at(self.t)
    }

    pub fn to_world(&self, world_ray: &Ray, object_ray: &Ray, tx: &Transformation) -> Intersection {
        let object_hit_point = self.point(object_ray);
        let world_hit_point = object_hit_point * tx.object_to_world;
        let tsign = self.t.signum();
        Intersection {
            t: tsign * (world_hit_point - world_ray.origin).length(),
            n: (self.n * tx.object_to_world.inverse().transposed()).normalize(),
            uv: self.uv,
        }
    }

    /// The near-zero self-intersection test: true when this hit is close
    /// enough to the ray origin to be a re-entry/exit collision rather than a
    /// genuine new surface crossing.
    pub fn is_near_zero(&self) -> bool {
        self.t.abs() < 1e-9
    }

    /// True when the ray is exiting the surface at this hit (normal and
    /// incident direction point the same way).
    pub fn is_exiting(&self, incident_direction: Vector) -> bool {
        self.n.dot(incident_direction) >= 0.0
    }
}

impl cmp::PartialOrd for Intersection {
    fn partial_cmp(&self, other: &Intersection) -> Option<cmp::Ordering> {
        self.t.partial_cmp(&other.t)
    }
}

pub trait Intersectable {
    fn intersect(&self, ray: &Ray) -> Option<Intersection>;
}

pub trait Transformable {
    fn transform(&mut self, m: Matrix44f);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_at_parameter_zero_is_origin() {
        let r = Ray::primary(Point::new(1.0, 2.0, 3.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert_eq!(Point::new(1.0, 2.0, 3.0), r.at(0.0));
    }

    #[test]
    fn near_zero_threshold() {
        let hit = Intersection { t: 1e-12, n: Vector::new(0.0, 0.0, 1.0), uv: Vector2::zero() };
        assert!(hit.is_near_zero());
        let hit = Intersection { t: 0.5, n: Vector::new(0.0, 0.0, 1.0), uv: Vector2::zero() };
        assert!(!hit.is_near_zero());
    }
}
