use std::f64;

use crate::algebra::solve_quartic_f64;
use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Dot, Vector, Vector2};

/// A torus with its major circle in the xy plane and tube axis along z.
/// Grounded on this crate's `shapes::Torus` (itself transcribed from Don
/// Cross's `rtsource.zip`), flattened to `Shape::collisions_along`'s flat
/// hit list instead of this crate's `Interval` pairing.
pub struct Torus {
    radius1: f64,
    radius2: f64,
}

impl Torus {
    pub fn new(radius1: f64, radius2: f64) -> Torus {
        Torus { radius1, radius2 }
    }

    fn intersection_for(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let a = 1.0 - (self.radius1 / (p.x * p.x + p.y * p.y).sqrt());
        let n = Vector::new(a * p.x, a * p.y, p.z).normalize();

        Intersection { t, n, uv: Vector2(0.0, 0.0) }
    }
}

impl Shape for Torus {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let o = ray.origin;
        let d = ray.direction;

        let r = self.radius1;
        let s = self.radius2;

        let big_t = 4.0 * r * r;
        let g = big_t * (d.x * d.x + d.y * d.y);
        let h = 2.0 * big_t * (o.x * d.x + o.y * d.y);
        let i = big_t * (o.x * o.x + o.y * o.y);
        let j = d.length_squared();
        let k = 2.0 * o.to_vector().dot(d);
        let l = o.to_vector().length_squared() + r * r - s * s;

        let mut roots: Vec<f64> =
            solve_quartic_f64(j * j, 2.0 * j * k, 2.0 * j * l + k * k - g, 2.0 * k * l - h, l * l - i)
                .into_iter()
                .collect();

        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        roots.into_iter().map(|t| self.intersection_for(ray, t)).collect()
    }

    fn bounds(&self) -> Bounds {
        let outer = self.radius1 + self.radius2;
        Bounds::new(
            Point::new(-outer, -outer, -self.radius2),
            Point::new(outer, outer, self.radius2),
        )
    }

    fn is_outside(&self, point: Point) -> bool {
        let d = (point.x * point.x + point.y * point.y).sqrt() - self.radius1;
        d * d + point.z * point.z > self.radius2 * self.radius2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn front_orthogonal_intersection() {
        let t = Torus::new(1.0, 0.1);
        let r = Ray::primary(Point::new(0.0, 1.0, 1.0), Vector::new(0.0, 0.0, -1.0), 0);
        let is = t.collisions_along(&r);
        let distances: Vec<f64> = is.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![0.9, 1.1]);
    }

    #[test]
    pub fn top_lateral_intersection() {
        let t = Torus::new(1.0, 0.1);
        let r = Ray::primary(Point::new(0.0, 2.0, 0.0), Vector::new(0.0, -1.0, 0.0), 0);
        let is = t.collisions_along(&r);
        let distances: Vec<f64> = is.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![0.9, 1.1, 2.9, 3.1]);
    }

    #[test]
    pub fn is_outside_classifies_correctly() {
        let t = Torus::new(1.0, 0.1);
        assert!(!t.is_outside(Point::new(1.0, 0.0, 0.0)));
        assert!(t.is_outside(Point::zero()));
    }
}
