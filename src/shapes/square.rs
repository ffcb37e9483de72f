use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::{plane_uv, Plane};
use crate::shapes::Shape;
use crate::vector::{Dot, Vector};

/// A bounded flat square, the generalization of this crate's axis-aligned
/// `XYRectangle`/`XZRectangle`/`ZYRectangle` to an arbitrary normal. Clips
/// the underlying infinite `Plane` to the `[-side/2, side/2]` region of its
/// own (u, v) basis.
pub struct Square {
    plane: Plane,
    side: f64,
    uv_basis: (Vector, Vector),
}

impl Square {
    pub fn new(origin: Point, normal: Vector, side: f64) -> Square {
        let normal = normal.normalize();
        Square { plane: Plane::new(origin, normal), side, uv_basis: plane_uv(normal) }
    }

    fn out_of_bounds(&self, p: Point) -> bool {
        let op = p - self.plane.origin;
        let u = self.uv_basis.0.dot(op);
        let v = self.uv_basis.1.dot(op);
        let half = self.side / 2.0;
        u.abs() > half || v.abs() > half
    }
}

impl Shape for Square {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        self.plane.collisions_with_bounds(ray, |p| self.out_of_bounds(p))
    }

    fn bounds(&self) -> Bounds {
        let half = self.side / 2.0 + 1e-6;
        let u = self.uv_basis.0 * half;
        let v = self.uv_basis.1 * half;
        let extent = Vector::new(u.x.abs() + v.x.abs(), u.y.abs() + v.y.abs(), u.z.abs() + v.z.abs());
        Bounds::new(self.plane.origin - extent, self.plane.origin + extent)
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        self.plane.is_outside(point)
    }
}
