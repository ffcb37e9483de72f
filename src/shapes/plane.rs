use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Dot, Vector, Vector2};

pub fn plane_uv(n: Vector) -> (Vector, Vector) {
    let mut u = n.cross(Vector::new(1.0, 0.0, 0.0));
    if u.length_squared() < 1e-6 {
        u = n.cross(Vector::new(0.0, 1.0, 0.0));
    }
    if u.length_squared() < 1e-6 {
        u = n.cross(Vector::new(0.0, 0.0, 1.0));
    }
    u = u.normalize();
    let v = n.cross(u);

    (u, v)
}

pub fn plane_intersect(o: Point, n: Vector, ray: &Ray) -> Option<f64> {
    let denom = ray.direction.dot(n);
    if denom.abs() > 1e-9 {
        let w = o - ray.origin;
        Some(w.dot(n) / denom)
    } else {
        None
    }
}

/// An infinite, unbounded flat surface. The building block for the bounded
/// square/cuboid/pyramid/wall primitives, which clip its intersection to a
/// local-space region.
pub struct Plane {
    pub origin: Point,
    pub normal: Vector,
    reverse_normal: Vector,
    uv: (Vector, Vector),
    reverse_uv: (Vector, Vector),
}

impl Plane {
    pub fn new(origin: Point, normal: Vector) -> Plane {
        let normal = normal.normalize();
        let reverse_normal = normal * -1.0;
        let uv = plane_uv(normal);
        let reverse_uv = plane_uv(reverse_normal);
        Plane { origin, normal, reverse_normal, uv, reverse_uv }
    }

    pub fn collisions_with_bounds<F>(&self, ray: &Ray, out_of_bounds: F) -> Vec<Intersection>
    where
        F: FnOnce(Point) -> bool,
    {
        let mut n = self.normal;
        let mut uv = self.uv;
        let t = match plane_intersect(self.origin, n, ray) {
            Some(t) => t,
            None => return Vec::with_capacity(0),
        };

        if ray.direction.dot(self.normal) > 0.0 {
            n = self.reverse_normal;
            uv = self.reverse_uv;
        }
        let p = ray.origin + ray.direction * t;
        if out_of_bounds(p) {
            return Vec::with_capacity(0);
        }
        let op = p - self.origin;
        let uv = Vector2(uv.0.dot(op), uv.1.dot(op));
        vec![Intersection { t, n, uv }]
    }
}

impl Shape for Plane {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        self.collisions_with_bounds(ray, |_| false)
    }

    fn bounds(&self) -> Bounds {
        Bounds::infinite()
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        (point - self.origin).dot(self.normal) > 0.0
    }
}
