mod cone;
mod cuboid;
mod cylinder;
mod ellipsoid;
mod plane;
mod polygon;
mod pyramid;
mod quadratic;
mod ring;
mod sphere;
mod square;
mod torus;
mod wall;

pub use self::cone::Cone;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::ellipsoid::Ellipsoid;
pub use self::plane::Plane;
pub use self::polygon::Polygon;
pub use self::pyramid::Pyramid;
pub use self::quadratic::Quadratic;
pub use self::ring::Ring;
pub use self::sphere::Sphere;
pub use self::square::Square;
pub use self::torus::Torus;
pub use self::wall::Wall;

use crate::bounds::Bounds;
use crate::point::Point;
use crate::ray::{Intersection, Ray};

/// Local-space geometry. An `Object` wraps a `Shape` with a `Medium` and a
/// world transform; shapes themselves never know about world space.
///
/// `collisions_along` returns every crossing of the ray with the surface,
/// unsorted-by-caller-contract (implementations sort), so CSG overlap
/// composition can reason about entry/exit pairs; `Object::intersect`
/// reduces this to the nearest valid hit per the t=0 contract.
pub trait Shape: Send + Sync {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection>;

    /// Local-space axis-aligned bounds, or `Bounds::infinite()` for
    /// unbounded shapes (plane, wall). Infinite-extent objects are excluded
    /// from the octree and tested directly by the renderer.
    fn bounds(&self) -> Bounds;

    /// Whether a ray starting inside the shape and pointed outward will
    /// cross the surface exactly once (closed, e.g. sphere/cuboid) or an
    /// even/variable number of times (open, e.g. plane/square/ring). CSG
    /// overlap composition branches on this per `overlap.cpp`.
    fn is_closed_surface(&self) -> bool {
        true
    }

    /// Point-containment test in local space, used by CSG overlap
    /// composition (`is_outside`) to classify single-operand hits.
    fn is_outside(&self, point: Point) -> bool;
}

pub fn first_positive_collision(collisions: Vec<Intersection>) -> Option<Intersection> {
    collisions.into_iter().filter(|i| i.t >= 0.0).min_by(|a, b| a.t.partial_cmp(&b.t).unwrap())
}
