use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::Plane;
use crate::shapes::Shape;
use crate::vector::Vector;

/// A slab bounded by two parallel planes offset `±thickness/2` along local
/// +z, infinite in x and y. Grounded on the design's `Wall` row; built the
/// same way `Cuboid` assembles axis planes, but only one axis is bounded.
pub struct Wall {
    thickness: f64,
    front: Plane,
    back: Plane,
}

impl Wall {
    pub fn new(thickness: f64) -> Wall {
        assert!(thickness > 0.0, "wall thickness must be positive");
        let half = thickness / 2.0;
        Wall {
            thickness,
            front: Plane::new(Point::new(0.0, 0.0, half), Vector::new(0.0, 0.0, 1.0)),
            back: Plane::new(Point::new(0.0, 0.0, -half), Vector::new(0.0, 0.0, -1.0)),
        }
    }
}

impl Shape for Wall {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits = self.front.collisions_along(ray);
        hits.extend(self.back.collisions_along(ray));
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
        hits
    }

    fn bounds(&self) -> Bounds {
        let half = self.thickness / 2.0;
        Bounds::new(
            Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, -half),
            Point::new(f64::INFINITY, f64::INFINITY, half),
        )
    }

    fn is_closed_surface(&self) -> bool {
        false
    }

    fn is_outside(&self, point: Point) -> bool {
        point.z.abs() > self.thickness / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    pub fn passes_through_both_faces() {
        let w = Wall::new(2.0);
        let r = Ray::primary(Point::new(0.0, 0.0, 5.0), Vector::new(0.0, 0.0, -1.0), 0);
        let hits = w.collisions_along(&r);
        let distances: Vec<f64> = hits.iter().map(|i| i.t).collect();
        assert_approx_eq!(&distances, &vec![4.0, 6.0]);
    }

    #[test]
    pub fn is_outside_classifies_by_thickness() {
        let w = Wall::new(2.0);
        assert!(!w.is_outside(Point::new(0.0, 0.0, 0.5)));
        assert!(w.is_outside(Point::new(0.0, 0.0, 5.0)));
    }
}
