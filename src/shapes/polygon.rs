use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::Plane;
use crate::shapes::Shape;
use crate::vector::{Dot, Vector};

/// A planar, convex N-gon: a `Plane` intersection bounded by N signed
/// scalar-triple tests against the polygon's edges, per the design.
/// Vertices must be coplanar, wound consistently (counter-clockwise viewed
/// against `normal`), and are given in local space.
pub struct Polygon {
    plane: Plane,
    vertices: Vec<Point>,
    normal: Vector,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Polygon {
        assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");
        let origin = vertices[0];
        let normal = (vertices[1] - vertices[0]).cross(vertices[2] - vertices[0]).normalize();
        Polygon { plane: Plane::new(origin, normal), vertices, normal }
    }

    fn out_of_bounds(&self, p: Point) -> bool {
        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let edge = b - a;
            let to_point = p - a;
            if edge.cross(to_point).dot(self.normal) < 0.0 {
                return true;
            }
        }
        false
    }
}

impl Shape for Polygon {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        self.plane.collisions_with_bounds(ray, |p| self.out_of_bounds(p))
    }

    fn bounds(&self) -> Bounds {
        let mut b = Bounds::new(self.vertices[0], self.vertices[0]);
        for v in &self.vertices[1..] {
            b.grow(&Bounds::new(*v, *v));
        }
        // widen a hair so a coplanar polygon still has a non-degenerate AABB
        let pad = Vector::new(1e-6, 1e-6, 1e-6);
        Bounds::new(b.min - pad, b.max + pad)
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        self.plane.is_outside(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(-1.0, -1.0, 0.0),
            Point::new(1.0, -1.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(-1.0, 1.0, 0.0),
        ])
    }

    #[test]
    pub fn hits_inside_convex_hull() {
        let p = unit_square();
        let r = Ray::primary(Point::new(0.0, 0.0, 1.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hit = p.collisions_along(&r).pop().unwrap();
        assert_approx_eq!(hit.t, 1.0);
    }

    #[test]
    pub fn misses_outside_convex_hull() {
        let p = unit_square();
        let r = Ray::primary(Point::new(5.0, 5.0, 1.0), Vector::new(0.0, 0.0, -1.0), 0);
        assert!(p.collisions_along(&r).is_empty());
    }
}
