use std::f64;
use std::mem;

use crate::algebra::solve_quadratic_real;
use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Dot, Vector, Vector2};

/// An axis-aligned ellipsoid centered at the local-space origin:
/// `(x/a)²+(y/b)²+(z/c)²=1`. Grounded on `shapes::Sphere`'s quadratic
/// structure, generalized to per-axis radii by scaling the ray into the
/// ellipsoid's unit-sphere frame before solving.
pub struct Ellipsoid {
    radii: Vector,
}

impl Ellipsoid {
    pub fn new(a: f64, b: f64, c: f64) -> Ellipsoid {
        Ellipsoid { radii: Vector::new(a, b, c) }
    }

    fn scaled(&self, v: Vector) -> Vector {
        Vector::new(v.x / self.radii.x, v.y / self.radii.y, v.z / self.radii.z)
    }

    fn intersection_for(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let g = Vector::new(
            p.x / (self.radii.x * self.radii.x),
            p.y / (self.radii.y * self.radii.y),
            p.z / (self.radii.z * self.radii.z),
        );
        let n = g.normalize();
        let u = (1.0 - n.z.atan2(n.x) / f64::consts::PI) * 0.5;
        let v = n.y.acos() / f64::consts::PI;

        Intersection { t, n, uv: Vector2(u, v) }
    }
}

impl Shape for Ellipsoid {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let o = self.scaled(ray.origin.to_vector());
        let d = self.scaled(ray.direction);
        let a = d.dot(d);
        let b = 2.0 * d.dot(o);
        let c = o.dot(o) - 1.0;

        if let Some((mut t0, mut t1)) = solve_quadratic_real(a, b, c) {
            if t0 > t1 {
                mem::swap(&mut t0, &mut t1);
            }
            vec![self.intersection_for(ray, t0), self.intersection_for(ray, t1)]
        } else {
            Vec::with_capacity(0)
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(Point::zero() - self.radii, Point::zero() + self.radii)
    }

    fn is_outside(&self, point: Point) -> bool {
        self.scaled(point.to_vector()).length_squared() > 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn axis_aligned_intersection() {
        let s = Ellipsoid::new(2.0, 1.0, 1.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 3.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = s.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![2.0, 4.0]);
    }

    #[test]
    pub fn is_outside_classifies_correctly() {
        let s = Ellipsoid::new(2.0, 1.0, 1.0);
        assert!(!s.is_outside(Point::new(1.5, 0.0, 0.0)));
        assert!(s.is_outside(Point::new(0.0, 1.5, 0.0)));
    }
}
