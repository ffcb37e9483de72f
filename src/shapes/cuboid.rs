use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::plane::Plane;
use crate::shapes::Shape;
use crate::vector::Vector;

/// An axis-aligned rectangular box, assembled from six bounded planar faces,
/// the way this crate's `Cube` assembles six `XYRectangle`/`XZRectangle`/
/// `ZYRectangle` faces.
pub struct Cuboid {
    min: Point,
    max: Point,
}

impl Cuboid {
    pub fn new(p1: Point, p2: Point) -> Cuboid {
        Cuboid {
            min: Point::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            max: Point::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    fn faces(&self) -> Vec<Plane> {
        let c = Point::centroid(self.min, self.max);
        vec![
            Plane::new(Point::new(self.min.x, c.y, c.z), Vector::new(-1.0, 0.0, 0.0)),
            Plane::new(Point::new(self.max.x, c.y, c.z), Vector::new(1.0, 0.0, 0.0)),
            Plane::new(Point::new(c.x, self.min.y, c.z), Vector::new(0.0, -1.0, 0.0)),
            Plane::new(Point::new(c.x, self.max.y, c.z), Vector::new(0.0, 1.0, 0.0)),
            Plane::new(Point::new(c.x, c.y, self.min.z), Vector::new(0.0, 0.0, -1.0)),
            Plane::new(Point::new(c.x, c.y, self.max.z), Vector::new(0.0, 0.0, 1.0)),
        ]
    }
}

impl Shape for Cuboid {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let (min, max) = (self.min, self.max);
        let mut hits: Vec<Intersection> = self
            .faces()
            .iter()
            .flat_map(|plane| {
                plane.collisions_with_bounds(ray, |p| {
                    p.x < min.x - 1e-9 || p.x > max.x + 1e-9
                        || p.y < min.y - 1e-9 || p.y > max.y + 1e-9
                        || p.z < min.z - 1e-9 || p.z > max.z + 1e-9
                })
            })
            .collect();

        hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap());
        hits.truncate(2);
        hits
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.min, self.max)
    }

    fn is_outside(&self, point: Point) -> bool {
        point.x < self.min.x || point.x > self.max.x
            || point.y < self.min.y || point.y > self.max.y
            || point.z < self.min.z || point.z > self.max.z
    }
}
