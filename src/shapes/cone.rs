use std::f64;

use crate::algebra::solve_quadratic_real;
use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;
use crate::vector::{Vector, Vector2};

/// A right circular cone with its apex at the local-space origin, opening
/// upward along z: `x²+y² = (z·tanα)², 0≤z≤h`. Grounded on this crate's
/// `shapes::Cylinder` quadratic structure, generalized per the design's
/// implicit equation and z-clip; the normal is the gradient of that implicit
/// surface rather than the cylinder's constant radial direction.
pub struct Cone {
    half_angle: f64,
    height: f64,
}

impl Cone {
    pub fn new(half_angle_degrees: f64, height: f64) -> Cone {
        Cone { half_angle: half_angle_degrees.to_radians(), height }
    }

    fn tan2(&self) -> f64 {
        self.half_angle.tan().powi(2)
    }

    fn intersection_for(&self, ray: &Ray, t: f64) -> Intersection {
        let p = ray.origin + ray.direction * t;
        let n = Vector::new(p.x, p.y, -p.z * self.tan2()).normalize();
        let u = p.y.atan2(p.x) / (2.0 * f64::consts::PI);
        let v = p.z / self.height;

        Intersection { t, n, uv: Vector2(u, v) }
    }
}

impl Shape for Cone {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let o = ray.origin;
        let d = ray.direction;
        let tan2 = self.tan2();
        let a = d.x * d.x + d.y * d.y - d.z * d.z * tan2;
        let b = 2.0 * (o.x * d.x + o.y * d.y - o.z * d.z * tan2);
        let c = o.x * o.x + o.y * o.y - o.z * o.z * tan2;

        let roots = if a.abs() < 1e-12 {
            if b.abs() < 1e-12 {
                return Vec::with_capacity(0);
            }
            let t = -c / b;
            vec![t]
        } else {
            match solve_quadratic_real(a, b, c) {
                Some((t0, t1)) => vec![t0, t1],
                None => Vec::with_capacity(0),
            }
        };

        roots
            .into_iter()
            .filter(|&t| {
                let z = o.z + t * d.z;
                z >= 0.0 && z <= self.height
            })
            .map(|t| self.intersection_for(ray, t))
            .collect()
    }

    fn bounds(&self) -> Bounds {
        let r = self.height * self.half_angle.tan();
        Bounds::new(Point::new(-r, -r, 0.0), Point::new(r, r, self.height))
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        if point.z < 0.0 || point.z > self.height {
            return true;
        }
        let radial2 = point.x * point.x + point.y * point.y;
        radial2 > point.z * point.z * self.tan2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn side_intersection() {
        let c = Cone::new(45.0, 2.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 1.0), Vector::new(1.0, 0.0, 0.0), 0);
        let hits = c.collisions_along(&r);
        assert!(!hits.is_empty());
        for i in &hits {
            assert_approx_eq!(i.t, 1.0);
        }
    }

    #[test]
    pub fn misses_beyond_apex_extension() {
        let c = Cone::new(45.0, 2.0);
        let r = Ray::primary(Point::new(0.0, 0.0, -5.0), Vector::new(1.0, 0.0, 0.0), 0);
        assert!(c.collisions_along(&r).is_empty());
    }

    #[test]
    pub fn is_outside_classifies_correctly() {
        let c = Cone::new(45.0, 2.0);
        assert!(!c.is_outside(Point::new(0.1, 0.0, 1.0)));
        assert!(c.is_outside(Point::new(5.0, 0.0, 1.0)));
    }
}
