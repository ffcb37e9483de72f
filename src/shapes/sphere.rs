use std::f64;
use std::mem;

use crate::algebra::solve_quadratic_real;
use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Dot, Vector2};

/// A sphere of fixed radius about a local-space origin. Grounded on the
/// teacher's `shapes::Sphere`, with the `a,b,c` quadratic now solved via the
/// numerically stable `solve_quadratic_real` instead of the textbook form.
pub struct Sphere {
    origin: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(origin: Point, radius: f64) -> Sphere {
        Sphere { origin, radius }
    }

    fn intersection_for_t(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let n = (p - self.origin).normalize();
        let u = (1.0 - n.z.atan2(n.x) / f64::consts::PI) * 0.5;
        let v = n.y.acos() / f64::consts::PI;

        Intersection { t, n, uv: Vector2(u, v) }
    }
}

impl Shape for Sphere {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let l = ray.origin - self.origin;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(l);
        let c = l.dot(l) - self.radius * self.radius;

        if let Some((mut t0, mut t1)) = solve_quadratic_real(a, b, c) {
            if t0 > t1 {
                mem::swap(&mut t0, &mut t1);
            }
            vec![self.intersection_for_t(ray, t0), self.intersection_for_t(ray, t1)]
        } else {
            Vec::with_capacity(0)
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            self.origin - crate::vector::Vector::new(self.radius, self.radius, self.radius),
            self.origin + crate::vector::Vector::new(self.radius, self.radius, self.radius),
        )
    }

    fn is_outside(&self, point: Point) -> bool {
        (point - self.origin).length_squared() > self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::vector::Vector;

    #[test]
    pub fn outside_intersection() {
        let s = Sphere::new(Point::zero(), 1.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 2.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = s.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        let normals: Vec<Vector> = hits.iter().map(|i| i.n).collect();
        assert_approx_eq!(&distances, &vec![1.0, 3.0]);
        assert_approx_eq!(&normals, &vec![Vector::new(0.0, 0.0, 1.0), Vector::new(0.0, 0.0, -1.0)]);
    }

    #[test]
    pub fn coincident_intersection() {
        let s = Sphere::new(Point::zero(), 1.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 1.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = s.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![0.0, 2.0]);
    }

    #[test]
    pub fn inside_intersection() {
        let s = Sphere::new(Point::zero(), 1.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 0.9), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = s.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![-0.1, 1.9]);
    }

    #[test]
    pub fn is_outside_classifies_correctly() {
        let s = Sphere::new(Point::zero(), 1.0);
        assert!(s.is_outside(Point::new(2.0, 0.0, 0.0)));
        assert!(!s.is_outside(Point::new(0.5, 0.0, 0.0)));
    }
}
