use crate::color::Color;
use crate::lights::{Light, LightSample};
use crate::point::Point;
use crate::vector::Vector;

/// A directional beam with no position, such as sunlight: every surface
/// point sees the same incoming direction and an unattenuated, constant
/// intensity. Grounded on this crate's `lights::distant::Distant`.
pub struct Distant {
    pub direction: Vector,
    pub color: Color,
    pub intensity: f64,
}

impl Distant {
    /// `direction` is the direction the light travels (from light toward
    /// the scene); the ray-facing sample direction is its negation.
    pub fn new(direction: Vector, color: Color, intensity: f64) -> Distant {
        Distant { direction: direction.normalize(), color, intensity }
    }
}

impl Light for Distant {
    fn sample(&self, _index: usize, _surface_point: Point) -> LightSample {
        LightSample { direction: self.direction * -1.0, color: self.color, distance: f64::INFINITY }
    }

    fn intensity_at(&self, _distance: f64, _direction: Vector) -> f64 {
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn sample_direction_is_opposite_travel_direction() {
        let l = Distant::new(Vector::new(0.0, -1.0, 0.0), Color::white(), 1.0);
        let s = l.sample(0, Point::zero());
        assert_approx_eq!(s.direction, Vector::new(0.0, 1.0, 0.0));
        assert!(s.distance.is_infinite());
    }

    #[test]
    fn intensity_is_constant() {
        let l = Distant::new(Vector::new(0.0, -1.0, 0.0), Color::white(), 2.5);
        assert_approx_eq!(l.intensity_at(1.0, Vector::zero()), l.intensity_at(1000.0, Vector::zero()));
    }
}
