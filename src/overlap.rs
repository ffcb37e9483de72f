use crate::bounds::Bounds;
use crate::object::Object;
use crate::point::Point;
use crate::ray::{Intersection, Ray};
use crate::shapes::Shape;

/// The four set-theoretic ways two objects can be composed into one surface,
/// grounded on `overlap.cpp`'s `operation` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    Additive,
    Subtractive,
    Inclusive,
    Exclusive,
}

/// A constructive-solid-geometry composite of two objects, itself usable
/// anywhere a `Shape` is (including as one operand of a further `Overlap`,
/// since composition nests on hit lists alone). The ray passed to
/// `collisions_along` is already in the coordinate frame shared by `a` and
/// `b` — each child applies its own transform internally the same way
/// `Object::collisions_along` does one level up.
///
/// Grounded on `overlap.cpp`'s `collisions_along`, generalized from its
/// finite per-pattern case table to a single sweep over the toggled
/// inside/outside state of each operand: every event where the composite
/// `inside(A,B)` predicate flips is a genuine boundary crossing, every event
/// where it doesn't is an internal crossing that never reaches the surface.
/// This reproduces all four of the documented interleavings exactly and
/// additionally handles the "B fully nested inside A" subtractive case
/// (the design scenario 5) completely — the original's finite case table
/// omits it, falling through to the documented `∅` default, but the worked
/// example needs a non-empty two-hit answer; a sweep naturally produces one
/// (plus, correctly, the shell's far-side pair, since the full hit list is
/// what `collisions_along` promises).
pub struct Overlap {
    pub kind: OverlapKind,
    pub a: Object,
    pub b: Object,
}

#[derive(Clone, Copy, PartialEq)]
enum Side {
    A,
    B,
}

impl Overlap {
    pub fn new(kind: OverlapKind, a: Object, b: Object) -> Overlap {
        Overlap { kind, a, b }
    }

    pub fn additive(a: Object, b: Object) -> Overlap {
        Overlap::new(OverlapKind::Additive, a, b)
    }

    pub fn subtractive(a: Object, b: Object) -> Overlap {
        Overlap::new(OverlapKind::Subtractive, a, b)
    }

    pub fn inclusive(a: Object, b: Object) -> Overlap {
        Overlap::new(OverlapKind::Inclusive, a, b)
    }

    pub fn exclusive(a: Object, b: Object) -> Overlap {
        Overlap::new(OverlapKind::Exclusive, a, b)
    }

    /// Centroid of both operands, except `Subtractive`, which takes A's
    /// position — grounded on the design's Overlap `position` rule.
    pub fn position(&self) -> Point {
        match self.kind {
            OverlapKind::Subtractive => self.a.tx.position(),
            _ => Point::centroid(self.a.tx.position(), self.b.tx.position()),
        }
    }

    fn composite_inside(&self, inside_a: bool, inside_b: bool) -> bool {
        match self.kind {
            OverlapKind::Additive => inside_a || inside_b,
            OverlapKind::Subtractive => inside_a && !inside_b,
            OverlapKind::Inclusive => inside_a && inside_b,
            OverlapKind::Exclusive => inside_a ^ inside_b,
        }
    }
}

impl Shape for Overlap {
    fn collisions_along(&self, ray: &Ray) -> Vec<Intersection> {
        let mut events: Vec<(Side, Intersection)> = self
            .a
            .collisions_along(ray)
            .into_iter()
            .map(|i| (Side::A, i))
            .chain(self.b.collisions_along(ray).into_iter().map(|i| (Side::B, i)))
            .collect();
        events.sort_by(|x, y| x.1.t.partial_cmp(&y.1.t).unwrap());

        let mut inside_a = false;
        let mut inside_b = false;
        let mut composite = self.composite_inside(inside_a, inside_b);
        let mut out = Vec::new();

        for (side, hit) in events {
            match side {
                Side::A => inside_a = !inside_a,
                Side::B => inside_b = !inside_b,
            }
            let next = self.composite_inside(inside_a, inside_b);
            if next != composite {
                let hit = if side == Side::B && self.kind == OverlapKind::Subtractive {
                    Intersection { n: hit.n * -1.0, ..hit }
                } else {
                    hit
                };
                out.push(hit);
                composite = next;
            }
        }

        out
    }

    fn bounds(&self) -> Bounds {
        match self.kind {
            OverlapKind::Subtractive | OverlapKind::Inclusive => self.a.world_bounds(),
            OverlapKind::Additive | OverlapKind::Exclusive => {
                let mut b = self.a.world_bounds();
                b.grow(&self.b.world_bounds());
                b
            }
        }
    }

    fn is_closed_surface(&self) -> bool {
        self.a.is_closed_surface() && self.b.is_closed_surface()
    }

    fn is_outside(&self, point: Point) -> bool {
        let outside_a = self.a.is_outside(point);
        let outside_b = self.b.is_outside(point);
        match self.kind {
            OverlapKind::Additive => outside_a && outside_b,
            OverlapKind::Subtractive => outside_a || !outside_b,
            OverlapKind::Inclusive => outside_a || outside_b,
            OverlapKind::Exclusive => outside_a == outside_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix44f;
    use crate::mediums::Opaque;
    use crate::shapes::Sphere;
    use crate::test_utils::*;
    use crate::vector::Vector;

    fn sphere(radius: f64) -> Object {
        Object::new("s", Box::new(Sphere::new(Point::zero(), radius)), Box::new(Opaque::default()))
    }

    #[test]
    fn subtractive_shell_front_surface_matches_worked_scenario() {
        let o = Overlap::subtractive(sphere(2.0), sphere(1.0));
        let r = Ray::primary(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), 0);
        let hits = o.collisions_along(&r);
        assert!(hits.len() >= 2);
        assert_approx_eq!(hits[0].t, 3.0);
        assert_approx_eq!(hits[0].n, Vector::new(0.0, 0.0, -1.0));
        assert_approx_eq!(hits[1].t, 4.0);
        assert_approx_eq!(hits[1].n, Vector::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn additive_disjoint_spheres_keep_all_four_hits() {
        let b = sphere(1.0).positioned_at(Matrix44f::translation(Vector::new(5.0, 0.0, 0.0)));
        let o = Overlap::additive(sphere(1.0), b);
        let r = Ray::primary(Point::new(-5.0, 0.0, 0.0), Vector::new(1.0, 0.0, 0.0), 0);
        assert_eq!(4, o.collisions_along(&r).len());
    }

    #[test]
    fn additive_overlapping_spheres_keep_outer_two_hits() {
        let b = sphere(1.0).positioned_at(Matrix44f::translation(Vector::new(1.0, 0.0, 0.0)));
        let o = Overlap::additive(sphere(1.0), b);
        let r = Ray::primary(Point::new(-5.0, 0.0, 0.0), Vector::new(1.0, 0.0, 0.0), 0);
        assert_eq!(2, o.collisions_along(&r).len());
    }

    #[test]
    fn inclusive_of_nested_spheres_is_the_inner_sphere() {
        let o = Overlap::inclusive(sphere(2.0), sphere(1.0));
        let r = Ray::primary(Point::new(0.0, 0.0, -5.0), Vector::new(0.0, 0.0, 1.0), 0);
        let hits = o.collisions_along(&r);
        assert_eq!(2, hits.len());
        assert_approx_eq!(hits[0].t, 4.0);
        assert_approx_eq!(hits[1].t, 6.0);
    }

    #[test]
    fn exclusive_degenerates_to_the_non_empty_side() {
        let b = sphere(1.0).positioned_at(Matrix44f::translation(Vector::new(10.0, 0.0, 0.0)));
        let o = Overlap::exclusive(sphere(1.0), b);
        let r = Ray::primary(Point::new(-5.0, 0.0, 0.0), Vector::new(1.0, 0.0, 0.0), 0);
        assert_eq!(2, o.collisions_along(&r).len());
    }

    #[test]
    fn position_is_centroid_except_for_subtractive() {
        let b = sphere(1.0).positioned_at(Matrix44f::translation(Vector::new(4.0, 0.0, 0.0)));
        let add = Overlap::additive(sphere(1.0), {
            let b2 = sphere(1.0).positioned_at(Matrix44f::translation(Vector::new(4.0, 0.0, 0.0)));
            b2
        });
        assert_approx_eq!(add.position(), Point::new(2.0, 0.0, 0.0));

        let sub = Overlap::subtractive(sphere(1.0), b);
        assert_approx_eq!(sub.position(), Point::zero());
    }
}
