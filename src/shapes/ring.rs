use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::Plane;
use crate::shapes::Shape;
use crate::vector::{Dot, Vector};

/// A flat annulus in the local-space xy plane (normal +z): a `Plane`
/// intersection bounded by `rᵢ² ≤ x²+y² ≤ rₒ²`. Mirrors `Square`'s pattern
/// of clipping an underlying infinite `Plane`.
pub struct Ring {
    plane: Plane,
    inner_radius: f64,
    outer_radius: f64,
}

impl Ring {
    pub fn new(origin: Point, normal: Vector, inner_radius: f64, outer_radius: f64) -> Ring {
        Ring { plane: Plane::new(origin, normal), inner_radius, outer_radius }
    }

    fn out_of_bounds(&self, p: Point) -> bool {
        let op = p - self.plane.origin;
        let radial2 = op.length_squared() - (op.dot(self.plane.normal)).powi(2);
        radial2 < self.inner_radius * self.inner_radius || radial2 > self.outer_radius * self.outer_radius
    }
}

impl Shape for Ring {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        self.plane.collisions_with_bounds(ray, |p| self.out_of_bounds(p))
    }

    fn bounds(&self) -> Bounds {
        let r = self.outer_radius + 1e-6;
        Bounds::new(
            self.plane.origin - Vector::new(r, r, r),
            self.plane.origin + Vector::new(r, r, r),
        )
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        self.plane.is_outside(point)
    }
}
