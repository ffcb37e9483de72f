use image::RgbImage;

use crate::error::SceneError;
use crate::point::Point;
use crate::ray::Ray;
use crate::vector::{Dot, Vector};

const WORLD_UP: Vector = Vector { x: 0.0, y: 0.0, z: 1.0 };

/// A pinhole camera: intrinsics (focal scaling + principal point) derived
/// from image size and horizontal field of view, plus the world-space
/// basis `forward`/`up`/`right` used to rotate a camera-space ray into
/// world space. Grounded on this crate's `system::Camera` basis
/// construction (`zaxis = (origin - look_at).normalize()`, cross products
/// for `xaxis`/`yaxis`), extended with the explicit intrinsics matrix
/// `original_source/raytrace/camera.hpp` exposes via `intrinsics()`.
pub struct Camera {
    pub position: Point,
    pub look_at: Point,
    width: usize,
    height: usize,
    hfov: f64,
    scale: f64,
    forward: Vector,
    up: Vector,
    right: Vector,
}

impl Camera {
    pub fn new(width: usize, height: usize, hfov_degrees: f64, position: Point, look_at: Point) -> Result<Camera, SceneError> {
        let mut camera = Camera {
            position,
            look_at,
            width,
            height,
            hfov: hfov_degrees.to_radians(),
            scale: 0.0,
            forward: Vector::new(0.0, 0.0, 1.0),
            up: Vector::new(0.0, 1.0, 0.0),
            right: Vector::new(1.0, 0.0, 0.0),
        };
        camera.move_to(position, look_at)?;
        Ok(camera)
    }

    /// Recomputes `forward`/`up`/`right` and the pixel scale for a new
    /// position/look-at pair, matching this crate's `Camera::look_at`
    /// basis construction. Rejects a zero-length or reference-axis-parallel
    /// look vector at construction time.
    pub fn move_to(&mut self, position: Point, look_at: Point) -> Result<(), SceneError> {
        let delta = look_at - position;
        let distance = delta.length();
        if distance < 1e-9 {
            return Err(SceneError::DegenerateCameraLook);
        }
        let forward = delta / distance;
        if forward.dot(WORLD_UP).abs() > 0.999_999 {
            return Err(SceneError::DegenerateCameraLook);
        }
        let right = forward.cross(WORLD_UP).normalize();
        let up = right.cross(forward).normalize();

        self.position = position;
        self.look_at = look_at;
        self.forward = forward;
        self.right = right;
        self.up = up;
        self.scale = 2.0 * distance * (self.hfov / 2.0).tan() / self.width as f64;
        Ok(())
    }

    /// The 3x3 intrinsics matrix `K`: focal scaling `s` on the diagonal,
    /// principal point offset in the third column, and the look-distance
    /// `d` in the bottom-right. Kept as a
    /// `[[f64;3];3]` rather than reusing `Matrix44f`/`Matrix3`, since it
    /// operates on homogeneous image-plane coordinates, not object-space
    /// points or pure rotations.
    pub fn intrinsics(&self) -> [[f64; 3]; 3] {
        let s = self.scale;
        let d = (self.look_at - self.position).length();
        [
            [s, 0.0, -(self.width as f64 / 2.0) * s],
            [0.0, s, -(self.height as f64 / 2.0) * s],
            [0.0, 0.0, d],
        ]
    }

    /// Casts a ray through image-plane coordinates `(u,v)` (pixel-space,
    /// not necessarily integral — sub-pixel samples pass fractional
    /// coordinates). Homogenizes `(u,v,1)` through `intrinsics()` to get a
    /// camera-space point, then rotates it into world space via the
    /// `right`/`up`/`forward` basis (camera `-y` is world `up`, matching
    /// image row 0 at the top of the frame).
    pub fn cast(&self, u: f64, v: f64) -> Ray {
        let k = self.intrinsics();
        let x = k[0][0] * u + k[0][2];
        let y = k[1][1] * v + k[1][2];
        let z = k[2][2];

        let world_point = self.position + self.right * x - self.up * y + self.forward * z;
        let direction = (world_point - self.position).normalize();
        Ray::primary(self.position, direction, 0)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

/// Two cameras separated by a baseline along the right vector, both toed-in
/// to the same look-at point — grounded on
/// `original_source/raytrace/stereocamera.hpp`.
pub struct StereoCamera {
    pub left: Camera,
    pub right: Camera,
}

impl StereoCamera {
    pub fn new(width: usize, height: usize, hfov_degrees: f64, position: Point, look_at: Point, baseline: f64) -> Result<StereoCamera, SceneError> {
        let center = Camera::new(width, height, hfov_degrees, position, look_at)?;
        let offset = center.right * (baseline / 2.0);
        let left = Camera::new(width, height, hfov_degrees, position - offset, look_at)?;
        let right = Camera::new(width, height, hfov_degrees, position + offset, look_at)?;
        Ok(StereoCamera { left, right })
    }
}

/// Concatenates two equally-sized captures side-by-side, matching the
/// common stereo-pair viewing layout; `merge_images_vertically` provides
/// the alternative top-bottom layout.
pub fn merge_images_horizontally(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let (w, h) = left.dimensions();
    let mut out = RgbImage::new(w * 2, h);
    for y in 0..h {
        for x in 0..w {
            out.put_pixel(x, y, *left.get_pixel(x, y));
            out.put_pixel(x + w, y, *right.get_pixel(x, y));
        }
    }
    out
}

pub fn merge_images_vertically(top: &RgbImage, bottom: &RgbImage) -> RgbImage {
    let (w, h) = top.dimensions();
    let mut out = RgbImage::new(w, h * 2);
    for y in 0..h {
        for x in 0..w {
            out.put_pixel(x, y, *top.get_pixel(x, y));
            out.put_pixel(x, y + h, *bottom.get_pixel(x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn center_pixel_points_at_look_at() {
        let camera = Camera::new(100, 100, 90.0, Point::zero(), Point::new(1.0, 0.0, 0.0)).unwrap();
        let ray = camera.cast(50.0, 50.0);
        assert_approx_eq!(ray.direction, Vector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_zero_length_look_vector() {
        assert!(Camera::new(100, 100, 90.0, Point::zero(), Point::zero()).is_err());
    }

    #[test]
    fn rejects_look_parallel_to_world_up() {
        assert!(Camera::new(100, 100, 90.0, Point::zero(), Point::new(0.0, 0.0, 5.0)).is_err());
    }

    #[test]
    fn move_to_updates_basis() {
        let mut camera = Camera::new(100, 100, 90.0, Point::zero(), Point::new(1.0, 0.0, 0.0)).unwrap();
        camera.move_to(Point::zero(), Point::new(0.0, 1.0, 0.0)).unwrap();
        let ray = camera.cast(50.0, 50.0);
        assert_approx_eq!(ray.direction, Vector::new(0.0, 1.0, 0.0));
    }
}
