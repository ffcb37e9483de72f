use std::mem;

use crate::algebra::solve_quadratic_real;
use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Vector, Vector2};

/// A general second-order implicit surface in local space:
/// `Ax²+By²+Cz²+Dxy+Eyz+Fxz+Gx+Hy+Iz+J=0` (paraboloids, hyperboloids,
/// elliptic/parabolic cylinders, and other quadric sections the named
/// primitives don't cover). Grounded on `shapes::Sphere`'s quadratic
/// structure, with the `a,b,c` ray coefficients derived from the general
/// quadric form rather than specialized to a sphere.
pub struct Quadratic {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
    extent: f64,
}

impl Quadratic {
    #[allow(clippy::too_many_arguments)]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64, g: f64, h: f64, i: f64, j: f64, extent: f64) -> Quadratic {
        Quadratic { a, b, c, d, e, f, g, h, i, j, extent }
    }

    fn gradient(&self, p: Point) -> Vector {
        Vector::new(
            2.0 * self.a * p.x + self.d * p.y + self.f * p.z + self.g,
            2.0 * self.b * p.y + self.d * p.x + self.e * p.z + self.h,
            2.0 * self.c * p.z + self.e * p.y + self.f * p.x + self.i,
        )
    }

    fn intersection_for(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let n = self.gradient(p).normalize();
        Intersection { t, n, uv: Vector2(0.0, 0.0) }
    }
}

impl Shape for Quadratic {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let o = ray.origin;
        let d = ray.direction;

        let a = self.a * d.x * d.x + self.b * d.y * d.y + self.c * d.z * d.z
            + self.d * d.x * d.y + self.e * d.y * d.z + self.f * d.x * d.z;
        let b = 2.0 * self.a * o.x * d.x + 2.0 * self.b * o.y * d.y + 2.0 * self.c * o.z * d.z
            + self.d * (o.x * d.y + o.y * d.x)
            + self.e * (o.y * d.z + o.z * d.y)
            + self.f * (o.x * d.z + o.z * d.x)
            + self.g * d.x + self.h * d.y + self.i * d.z;
        let c = self.a * o.x * o.x + self.b * o.y * o.y + self.c * o.z * o.z
            + self.d * o.x * o.y + self.e * o.y * o.z + self.f * o.x * o.z
            + self.g * o.x + self.h * o.y + self.i * o.z
            + self.j;

        if a.abs() < 1e-12 {
            if b.abs() < 1e-12 {
                return Vec::with_capacity(0);
            }
            return vec![self.intersection_for(ray, -c / b)];
        }

        match solve_quadratic_real(a, b, c) {
            Some((mut t0, mut t1)) => {
                if t0 > t1 {
                    mem::swap(&mut t0, &mut t1);
                }
                vec![self.intersection_for(ray, t0), self.intersection_for(ray, t1)]
            }
            None => Vec::with_capacity(0),
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(-self.extent, -self.extent, -self.extent),
            Point::new(self.extent, self.extent, self.extent),
        )
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        let v = self.a * point.x * point.x + self.b * point.y * point.y + self.c * point.z * point.z
            + self.d * point.x * point.y + self.e * point.y * point.z + self.f * point.x * point.z
            + self.g * point.x + self.h * point.y + self.i * point.z
            + self.j;
        v > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn sphere_equivalent_intersection() {
        // A=B=C=1, D=E=F=G=H=I=0, J=-1 is the unit sphere.
        let q = Quadratic::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 10.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 2.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = q.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![1.0, 3.0]);
    }

    #[test]
    pub fn is_outside_classifies_correctly() {
        let q = Quadratic::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 10.0);
        assert!(!q.is_outside(Point::zero()));
        assert!(q.is_outside(Point::new(5.0, 0.0, 0.0)));
    }
}
