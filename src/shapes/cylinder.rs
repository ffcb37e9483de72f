use std::f64;
use std::mem;

use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Vector, Vector2};

/// An open (cap-less) circular cylinder of `radius` and half-height `h`,
/// centered on the local-space origin with its axis along z:
/// `x²+y²=r², −h≤z≤h`. Grounded on this crate's `shapes::Cylinder`
/// quadratic, rotated onto the design's z-axis convention and stripped of the
/// teacher's end caps (this primitive is open-ended; `Ring` covers capped
/// disks).
pub struct Cylinder {
    radius: f64,
    half_height: f64,
}

impl Cylinder {
    pub fn new(radius: f64, half_height: f64) -> Cylinder {
        Cylinder { radius, half_height }
    }

    fn intersection_for(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let n = Vector::new(p.x, p.y, 0.0).normalize();
        let u = p.y.atan2(p.x) / (2.0 * f64::consts::PI);
        let v = (p.z + self.half_height) / (2.0 * self.half_height);

        Intersection { t, n, uv: Vector2(u, v) }
    }
}

impl Shape for Cylinder {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let o = ray.origin;
        let d = ray.direction;
        let a = d.x * d.x + d.y * d.y;
        let b = 2.0 * (o.x * d.x + o.y * d.y);
        let c = o.x * o.x + o.y * o.y - self.radius * self.radius;

        if a.abs() < 1e-12 {
            return Vec::with_capacity(0);
        }

        let discr = b * b - 4.0 * a * c;
        if discr < 0.0 {
            return Vec::with_capacity(0);
        }

        let sqrt = discr.sqrt();
        let mut t0 = (-b + sqrt) / (2.0 * a);
        let mut t1 = (-b - sqrt) / (2.0 * a);
        if t0 > t1 {
            mem::swap(&mut t0, &mut t1);
        }

        [t0, t1]
            .into_iter()
            .filter(|&t| {
                let z = o.z + t * d.z;
                z >= -self.half_height && z <= self.half_height
            })
            .map(|t| self.intersection_for(ray, t))
            .collect()
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(-self.radius, -self.radius, -self.half_height),
            Point::new(self.radius, self.radius, self.half_height),
        )
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        point.z < -self.half_height || point.z > self.half_height || point.x * point.x + point.y * point.y > self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn side_intersection() {
        let c = Cylinder::new(1.0, 2.0);
        let r = Ray::primary(Point::new(0.0, 2.0, 0.0), Vector::new(0.0, -1.0, 0.0), 0);
        let hits = c.collisions_along(&r);
        let mut distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_approx_eq!(&distances, &vec![1.0, 3.0]);
    }

    #[test]
    pub fn misses_beyond_open_end() {
        let c = Cylinder::new(1.0, 2.0);
        let r = Ray::primary(Point::new(0.0, 2.0, 5.0), Vector::new(0.0, -1.0, 0.0), 0);
        assert!(c.collisions_along(&r).is_empty());
    }

    #[test]
    pub fn miss() {
        let c = Cylinder::new(1.0, 2.0);
        let r = Ray::primary(Point::new(5.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert!(c.collisions_along(&r).is_empty());
    }
}
