use std::f64::consts::PI;

use crate::color::Color;
use crate::lights::{Light, LightSample};
use crate::point::Point;
use crate::vector::{Dot, Vector};

/// A point light with a cosine-lobe cutoff about a fixed axis. The teacher
/// has no spotlight; this is new code written in the `PointLight`/`Distant`
/// file style.
pub struct Spot {
    pub origin: Point,
    pub axis: Vector,
    pub color: Color,
    pub intensity: f64,
    /// Half-angle of the cone, in radians.
    pub cutoff: f64,
    /// Exponent shaping the falloff within the cone; higher is tighter.
    pub exponent: f64,
}

impl Spot {
    pub fn new(origin: Point, axis: Vector, color: Color, intensity: f64, cutoff_degrees: f64, exponent: f64) -> Spot {
        Spot { origin, axis: axis.normalize(), color, intensity, cutoff: cutoff_degrees.to_radians(), exponent }
    }
}

impl Light for Spot {
    fn sample(&self, _index: usize, surface_point: Point) -> LightSample {
        let delta = self.origin - surface_point;
        let distance = delta.length();
        let direction = if distance > 0.0 { delta / distance } else { Vector::zero() };
        LightSample { direction, color: self.color, distance }
    }

    fn intensity_at(&self, distance: f64, direction: Vector) -> f64 {
        let cos_angle = self.axis.dot(direction * -1.0);
        let cutoff_cos = self.cutoff.cos();
        if cos_angle < cutoff_cos {
            return 0.0;
        }
        let base = self.intensity / (4.0 * PI * distance.max(1e-6).powi(2));
        base * cos_angle.max(0.0).powf(self.exponent)
    }
}
