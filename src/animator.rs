//! Keyframed camera animation. The teacher has no animator; this is new
//! code grounded on `original_source/projects/raytrace/include/raytrace/animator.hpp`
//! and `animator.cpp`: a sequence of `(from, at, fov)` attribute keyframes,
//! each holding for `duration` seconds, interpolated linearly between
//! consecutive keyframes by default.

use crate::point::Point;

/// One named pose the camera should occupy at a point in the animation
/// timeline, held for `duration` seconds before blending into the next.
#[derive(Debug, Clone, Copy)]
pub struct Keyframe {
    pub from: Point,
    pub at: Point,
    pub fov_degrees: f64,
    pub duration: f64,
}

impl Keyframe {
    pub fn new(from: Point, at: Point, fov_degrees: f64, duration: f64) -> Keyframe {
        Keyframe { from, at, fov_degrees, duration }
    }
}

/// The camera attributes produced for a single rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAttributes {
    pub from: Point,
    pub at: Point,
    pub fov_degrees: f64,
}

fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A mapper reshapes the normalized `[0,1]` segment position before the
/// linear blend is applied; `linear` (the default) is the identity mapper.
/// Per-attribute mappers let a caller ease one attribute (e.g. fov) without
/// affecting the others.
pub type Mapper = fn(f64) -> f64;

pub fn linear(t: f64) -> f64 {
    t
}

pub fn ease_in_out(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Interpolates camera attributes across a sequence of keyframes, grounded
/// on `original_source`'s `animator::Animator`: `get_anchors()` in
/// `scene::SceneBuilder` supplies the named world points a scene's
/// keyframes reference, and an `Animator` walks its keyframe list by
/// elapsed time rather than by frame index, so frame rate and animation
/// length are independent.
pub struct Animator {
    keyframes: Vec<Keyframe>,
    mapper: Mapper,
}

impl Animator {
    pub fn new(keyframes: Vec<Keyframe>) -> Animator {
        Animator { keyframes, mapper: linear }
    }

    pub fn with_mapper(mut self, mapper: Mapper) -> Animator {
        self.mapper = mapper;
        self
    }

    pub fn total_duration(&self) -> f64 {
        self.keyframes.iter().map(|k| k.duration).sum()
    }

    /// Attributes at `time` seconds into the animation, or `None` once
    /// `time` has run past the last keyframe (the keyframe list is
    /// exhausted).
    pub fn attributes_at(&self, time: f64) -> Option<CameraAttributes> {
        if self.keyframes.is_empty() || time < 0.0 {
            return None;
        }
        if self.keyframes.len() == 1 {
            let k = self.keyframes[0];
            return Some(CameraAttributes { from: k.from, at: k.at, fov_degrees: k.fov_degrees });
        }

        let mut elapsed = 0.0;
        for window in self.keyframes.windows(2) {
            let (start, end) = (window[0], window[1]);
            if time < elapsed + start.duration || start.duration <= 0.0 {
                let t = if start.duration > 0.0 {
                    ((time - elapsed) / start.duration).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let t = (self.mapper)(t);
                return Some(CameraAttributes {
                    from: lerp_point(start.from, end.from, t),
                    at: lerp_point(start.at, end.at, t),
                    fov_degrees: lerp(start.fov_degrees, end.fov_degrees, t),
                });
            }
            elapsed += start.duration;
        }

        if time <= self.total_duration() {
            let last = *self.keyframes.last().unwrap();
            return Some(CameraAttributes { from: last.from, at: last.at, fov_degrees: last.fov_degrees });
        }

        None
    }

    /// Produces one attribute set per frame at `fps` frames per second
    /// until the keyframe list is exhausted.
    pub fn frames(&self, fps: f64) -> Vec<CameraAttributes> {
        let dt = 1.0 / fps;
        let mut out = Vec::new();
        let mut t = 0.0;
        while let Some(attrs) = self.attributes_at(t) {
            out.push(attrs);
            t += dt;
        }
        out
    }
}
