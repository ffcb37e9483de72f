use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::Plane;
use crate::shapes::Shape;
use crate::vector::{Dot, Vector};

/// A right pyramid over a square base centered at the local-space origin
/// (`z=0`, half-width `half_base`) rising to an apex at `(0,0,height)`.
/// Assembled as a convex polyhedron of 5 half-spaces the way `Cuboid`
/// assembles 6, grounded on the same bounded-plane idiom.
pub struct Pyramid {
    half_base: f64,
    height: f64,
    faces: Vec<Plane>,
}

impl Pyramid {
    pub fn new(half_base: f64, height: f64) -> Pyramid {
        assert!(half_base > 0.0 && height > 0.0, "pyramid dimensions must be positive");
        let apex = Point::new(0.0, 0.0, height);
        let corners = [
            Point::new(half_base, half_base, 0.0),
            Point::new(-half_base, half_base, 0.0),
            Point::new(-half_base, -half_base, 0.0),
            Point::new(half_base, -half_base, 0.0),
        ];

        let mut faces = Vec::with_capacity(5);
        faces.push(Plane::new(Point::new(0.0, 0.0, 0.0), Vector::new(0.0, 0.0, -1.0)));
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            let normal = (b - a).cross(apex - a).normalize();
            faces.push(Plane::new(a, normal));
        }

        Pyramid { half_base, height, faces }
    }

    fn outside_half_spaces(&self, p: Point) -> bool {
        const EPS: f64 = 1e-9;
        self.faces.iter().any(|f| (p - f.origin).dot(f.normal) > EPS)
    }
}

impl Shape for Pyramid {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self
            .faces
            .iter()
            .flat_map(|face| face.collisions_with_bounds(ray, |p| self.outside_half_spaces(p)))
            .collect();
        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
        hits
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            Point::new(-self.half_base, -self.half_base, 0.0),
            Point::new(self.half_base, self.half_base, self.height),
        )
    }

    fn is_outside(&self, point: Point) -> bool {
        self.outside_half_spaces(point)
    }
}
