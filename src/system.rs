//! The render entry point: turns a `Scene` plus `RenderOptions` into a
//! `RenderBuffer` of averaged per-pixel color, driving `shader::trace` one
//! row at a time across a `rayon` thread pool. Restructured from the
//! teacher's single-threaded-sample-accumulation loop (`render`/`cast`
//! above) into a row-parallel per-pixel loop matching spec.md §4.10.2/§5:
//! each worker owns disjoint rows, stratified sub-samples are cast and
//! averaged within a pixel rather than accumulated across whole-image
//! sample passes.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rand::Rng;
use rayon::prelude::*;

use crate::camera::{Camera, StereoCamera};
use crate::color::Color;
use crate::scene::Scene;
use crate::shader::{self, ShadingOptions};

/// Tunables for a single `render` call; every field has a spec-mandated
/// meaning, none are renderer-internal state.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub samples_per_pixel: u32,
    pub max_depth: u16,
    pub adaptive_reflection_threshold: f64,
    /// 0-255; variance above this re-renders a pixel at `4x` samples.
    /// `255` disables adaptive anti-aliasing entirely.
    pub aaa_threshold: u8,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            samples_per_pixel: 4,
            max_depth: 5,
            adaptive_reflection_threshold: 0.01,
            aaa_threshold: 255,
        }
    }
}

/// Render-time counters, grounded on the teacher's scattered `stats::`
/// globals (dot/cross/intersection/shadow-ray tallies), collapsed here into
/// atomics reconciled once at the end of `render` rather than a process-wide
/// singleton.
#[derive(Debug, Default)]
pub struct Statistics {
    pub pixels_rendered: AtomicU64,
    pub samples_cast: AtomicU64,
    pub supersampled_pixels: AtomicU64,
}

impl Statistics {
    fn new() -> Statistics {
        Statistics::default()
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            pixels_rendered: self.pixels_rendered.load(Ordering::Relaxed),
            samples_cast: self.samples_cast.load(Ordering::Relaxed),
            supersampled_pixels: self.supersampled_pixels.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsSnapshot {
    pub pixels_rendered: u64,
    pub samples_cast: u64,
    pub supersampled_pixels: u64,
}

/// Callbacks invoked from whatever worker thread finished the work; must not
/// block, per spec.md §5's non-blocking row-complete contract.
pub trait RenderProgress: Send + Sync {
    fn render_started(&self, _width: usize, _height: usize) {}
    fn row_complete(&self, _row: usize) {}
    fn render_finished(&self, _stats: &StatisticsSnapshot) {}
}

/// A progress sink that does nothing; the default for callers that don't
/// care to observe rendering as it happens.
pub struct NullProgress;

impl RenderProgress for NullProgress {}

/// The finished capture: averaged linear-RGB color per pixel plus a
/// variance mask recording which pixels were adaptively supersampled.
pub struct RenderBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
    pub variance_mask: Vec<bool>,
}

impl RenderBuffer {
    fn new(width: usize, height: usize) -> RenderBuffer {
        RenderBuffer {
            width,
            height,
            pixels: vec![Color::black(); width * height],
            variance_mask: vec![false; width * height],
        }
    }
}

/// Renders `scene` through its own camera, returning the finished buffer and
/// the counters accumulated along the way.
pub fn render(scene: &Scene, options: &RenderOptions, progress: &dyn RenderProgress, cancel: &AtomicBool) -> (RenderBuffer, StatisticsSnapshot) {
    render_with_camera(scene, &scene.camera, options, progress, cancel)
}

/// Renders a left/right stereo pair through the same scene, reusing its
/// lights/objects/octree but substituting each `StereoCamera` half in turn.
/// Grounded on `original_source/raytrace/stereocamera.hpp`'s toed-in pair and
/// `camera::merge_images_horizontally` for recombining the two captures.
pub fn render_stereo(scene: &Scene, stereo: &StereoCamera, options: &RenderOptions, progress: &dyn RenderProgress, cancel: &AtomicBool) -> ((RenderBuffer, StatisticsSnapshot), (RenderBuffer, StatisticsSnapshot)) {
    let left = render_with_camera(scene, &stereo.left, options, progress, cancel);
    let right = render_with_camera(scene, &stereo.right, options, progress, cancel);
    (left, right)
}

fn render_with_camera(scene: &Scene, camera: &Camera, options: &RenderOptions, progress: &dyn RenderProgress, cancel: &AtomicBool) -> (RenderBuffer, StatisticsSnapshot) {
    let width = camera.width();
    let height = camera.height();
    let stats = Statistics::new();
    let mut buffer = RenderBuffer::new(width, height);

    progress.render_started(width, height);

    let shading_options = ShadingOptions {
        max_depth: options.max_depth,
        adaptive_reflection_threshold: options.adaptive_reflection_threshold,
    };

    let row_stride = width;
    let rows: Vec<(&mut [Color], &mut [bool])> = buffer
        .pixels
        .chunks_mut(row_stride)
        .zip(buffer.variance_mask.chunks_mut(row_stride))
        .collect();

    rows.into_par_iter().enumerate().for_each(|(row, (pixel_row, mask_row))| {
        if cancel.load(Ordering::Relaxed) {
            return;
        }

        let mut rng = rand::thread_rng();
        for col in 0..width {
            let (color, supersampled, samples) = render_pixel(camera, scene, col, row, options, &shading_options, &mut rng);
            pixel_row[col] = color;
            mask_row[col] = supersampled;
            stats.pixels_rendered.fetch_add(1, Ordering::Relaxed);
            stats.samples_cast.fetch_add(samples as u64, Ordering::Relaxed);
            if supersampled {
                stats.supersampled_pixels.fetch_add(1, Ordering::Relaxed);
            }
        }

        progress.row_complete(row);
    });

    let snapshot = stats.snapshot();
    progress.render_finished(&snapshot);
    (buffer, snapshot)
}

/// Casts `samples_per_pixel` stratified sub-samples within a unit square
/// around the pixel center, averages them, and — unless adaptive
/// anti-aliasing is disabled (`aaa_threshold == 255`) — re-renders at `4x`
/// the sample count when the per-sample luminance variance exceeds the
/// configured threshold, per spec.md §4.10.2.
fn render_pixel(camera: &Camera, scene: &Scene, col: usize, row: usize, options: &RenderOptions, shading_options: &ShadingOptions, rng: &mut impl Rng) -> (Color, bool, u32) {
    let (color, variance) = cast_samples(camera, scene, col, row, options.samples_per_pixel, shading_options, rng);

    if options.aaa_threshold < 255 && variance > (options.aaa_threshold as f64 / 255.0) {
        let (supersampled_color, _) = cast_samples(camera, scene, col, row, options.samples_per_pixel * 4, shading_options, rng);
        (supersampled_color, true, options.samples_per_pixel * 4)
    } else {
        (color, false, options.samples_per_pixel)
    }
}

/// Stratified jittered sampling within an `n x n` grid covering the unit
/// pixel square (n chosen as the integer square root of the sample count, so
/// samples spread over both axes rather than clustering along one).
/// Returns the averaged color and the luminance variance across samples,
/// used to decide whether to re-render with more samples.
fn cast_samples(camera: &Camera, scene: &Scene, col: usize, row: usize, n: u32, shading_options: &ShadingOptions, rng: &mut impl Rng) -> (Color, f64) {
    let grid = (n as f64).sqrt().ceil() as u32;
    let mut total = Color::black();
    let mut luminances = Vec::with_capacity(n as usize);
    let mut cast = 0u32;

    'outer: for gy in 0..grid {
        for gx in 0..grid {
            if cast >= n {
                break 'outer;
            }
            let jitter_x: f64 = rng.gen_range(0.0..1.0);
            let jitter_y: f64 = rng.gen_range(0.0..1.0);
            let u = col as f64 + (gx as f64 + jitter_x) / grid as f64;
            let v = row as f64 + (gy as f64 + jitter_y) / grid as f64;

            let ray = camera.cast(u, v);
            let color = shader::trace(&ray, scene, scene.ambient_medium(), 1, 1.0, shading_options);
            luminances.push(luminance(color));
            total += color;
            cast += 1;
        }
    }

    let average = total / cast as f64;
    (average, variance(&luminances))
}

fn luminance(c: Color) -> f64 {
    0.2126 * c.r + 0.7152 * c.g + 0.0722 * c.b
}

fn variance(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediums::Opaque;
    use crate::object::Object;
    use crate::point::Point;
    use crate::shapes::Sphere;

    fn flat_background(_ray: &crate::ray::Ray) -> Color {
        Color::new(0.1, 0.2, 0.4)
    }

    fn empty_scene(width: usize, height: usize) -> Scene {
        let camera = Camera::new(width, height, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        Scene::new(camera, Vec::new(), Vec::new(), Box::new(flat_background))
    }

    #[test]
    fn render_fills_every_pixel_with_background_when_nothing_is_hit() {
        let scene = empty_scene(4, 4);
        let options = RenderOptions::default();
        let cancel = AtomicBool::new(false);
        let (buffer, stats) = render(&scene, &options, &NullProgress, &cancel);

        assert_eq!(16, buffer.pixels.len());
        assert_eq!(16, stats.pixels_rendered);
        for pixel in &buffer.pixels {
            assert!((pixel.r - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn cancelling_before_render_leaves_rows_untouched() {
        let scene = empty_scene(4, 4);
        let options = RenderOptions::default();
        let cancel = AtomicBool::new(true);
        let (buffer, stats) = render(&scene, &options, &NullProgress, &cancel);

        assert_eq!(0, stats.pixels_rendered);
        for pixel in &buffer.pixels {
            assert_eq!(Color::black(), *pixel);
        }
    }

    #[test]
    fn lit_sphere_scene_renders_without_panicking() {
        let camera = Camera::new(8, 8, 60.0, Point::new(0.0, 0.0, 10.0), Point::zero()).unwrap();
        let objects = vec![Object::new("s", Box::new(Sphere::new(Point::zero(), 2.0)), Box::new(Opaque::default()))];
        let lights: Vec<Box<dyn crate::lights::Light>> = vec![Box::new(crate::lights::PointLight::new(Point::new(0.0, 10.0, 10.0), Color::white(), 500.0))];
        let scene = Scene::new(camera, lights, objects, Box::new(flat_background));
        let options = RenderOptions { samples_per_pixel: 1, ..RenderOptions::default() };
        let cancel = AtomicBool::new(false);
        let (buffer, stats) = render(&scene, &options, &NullProgress, &cancel);

        assert_eq!(64, stats.pixels_rendered);
        assert!(buffer.pixels.iter().any(|p| p.r + p.g + p.b > 0.0));
    }
}
