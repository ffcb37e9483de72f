use std::io::Stdout;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use log::info;
use pbr::ProgressBar;
use rayon::ThreadPoolBuilder;

use raytrace::animator::{Animator, Keyframe};
use raytrace::camera::StereoCamera;
use raytrace::demos::Spheres;
use raytrace::formats::{write_image, ImageBuffer};
use raytrace::scene::{build_scene, SceneBuilder};
use raytrace::system::{render, render_stereo, RenderBuffer, RenderOptions, RenderProgress, StatisticsSnapshot};

#[derive(Parser)]
#[command(version = "0.1.0", author = "Gordon Tyler <gordon@doxxx.net>", about = "Simple ray tracer")]
struct CommandLineOptions {
    /// Image dimension preset, or explicit WIDTHxHEIGHT
    #[arg(long, default_value = "VGA")]
    dimensions: DimensionPreset,

    /// Samples per pixel before adaptive supersampling kicks in
    #[arg(short('s'), long, default_value_t = 4)]
    samples: u32,

    /// Maximum recursive reflection/refraction depth
    #[arg(short('d'), long, default_value_t = 5)]
    depth: u16,

    /// Horizontal field of view, in degrees
    #[arg(long, default_value_t = 55.0)]
    hfov: f64,

    /// Adaptive anti-aliasing variance mask threshold, 0-255; 255 disables
    #[arg(long, default_value_t = 255)]
    aaa_threshold: u8,

    /// Stereo baseline separation; omit for a single non-stereo capture
    #[arg(long)]
    stereo_separation: Option<f64>,

    /// Number of render threads; defaults to available hardware parallelism
    #[arg(short('t'), long)]
    threads: Option<usize>,

    /// Output image path; format is inferred from the extension
    #[arg(short('o'), long, default_value = "out.tga")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy)]
enum DimensionPreset {
    Qvga,
    Vga,
    Hd1080,
    Custom(usize, usize),
}

impl std::str::FromStr for DimensionPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<DimensionPreset, String> {
        match s.to_ascii_uppercase().as_str() {
            "QVGA" => Ok(DimensionPreset::Qvga),
            "VGA" => Ok(DimensionPreset::Vga),
            "1080P" => Ok(DimensionPreset::Hd1080),
            other => {
                let (w, h) = other.split_once('X').ok_or_else(|| format!("unrecognized dimension preset: {other}"))?;
                let width = w.parse::<usize>().map_err(|e| e.to_string())?;
                let height = h.parse::<usize>().map_err(|e| e.to_string())?;
                Ok(DimensionPreset::Custom(width, height))
            }
        }
    }
}

impl DimensionPreset {
    fn dimensions(&self) -> (usize, usize) {
        match self {
            DimensionPreset::Qvga => (320, 240),
            DimensionPreset::Vga => (640, 480),
            DimensionPreset::Hd1080 => (1920, 1080),
            DimensionPreset::Custom(w, h) => (*w, *h),
        }
    }
}

fn main() {
    env_logger::init();

    let opts = CommandLineOptions::parse();
    let (width, height) = opts.dimensions.dimensions();

    if let Some(threads) = opts.threads {
        ThreadPoolBuilder::new().num_threads(threads).build_global().expect("could not configure threadpool");
    }

    let demo = Spheres::default();
    let scene = build_scene(demo, width, height, opts.hfov).expect("could not build scene");

    let render_options = RenderOptions {
        samples_per_pixel: opts.samples,
        max_depth: opts.depth,
        aaa_threshold: opts.aaa_threshold,
        ..RenderOptions::default()
    };

    info!(
        "rendering {}x{}, {} samples/px, depth {}, aaa threshold {}",
        width, height, opts.samples, opts.depth, opts.aaa_threshold
    );

    let cancel = AtomicBool::new(false);
    let progress = CliRenderProgress::new(width, height);

    let exit_code = if let Some(separation) = opts.stereo_separation {
        let stereo = StereoCamera::new(width, height, opts.hfov, demo.looking_from(), demo.looking_at(), separation).expect("could not build stereo camera");
        let ((left, left_stats), (right, right_stats)) = render_stereo(&scene, &stereo, &render_options, &progress, &cancel);
        progress.finish(&left_stats);
        progress.finish(&right_stats);
        write_stereo_pair(&opts.output, &left, &right)
    } else {
        let (buffer, stats) = render(&scene, &render_options, &progress, &cancel);
        progress.finish(&stats);
        write_capture(&opts.output, &buffer)
    };

    drive_animation_preview(&demo, width, height, opts.hfov);

    std::process::exit(exit_code);
}

/// Walks the demo's anchors through a one-keyframe still-frame animator;
/// real animated sequences would supply more than one keyframe and write a
/// frame per tick, but this crate's CLI only ever renders a single capture.
fn drive_animation_preview(demo: &Spheres, _width: usize, _height: usize, hfov: f64) {
    let animator = Animator::new(vec![Keyframe::new(demo.looking_from(), demo.looking_at(), hfov, 1.0)]);
    if animator.attributes_at(0.0).is_none() {
        log::warn!("animator produced no frames for a single-keyframe timeline");
    }
}

fn write_capture(path: &std::path::Path, buffer: &RenderBuffer) -> i32 {
    let image = ImageBuffer::new(buffer.width, buffer.height, buffer.pixels.clone());
    match write_image(path, &image) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("could not write {}: {}", path.display(), e);
            1
        }
    }
}

fn write_stereo_pair(path: &std::path::Path, left: &RenderBuffer, right: &RenderBuffer) -> i32 {
    let merged_width = left.width + right.width;
    let mut pixels = Vec::with_capacity(merged_width * left.height);
    for y in 0..left.height {
        pixels.extend_from_slice(&left.pixels[y * left.width..(y + 1) * left.width]);
        pixels.extend_from_slice(&right.pixels[y * right.width..(y + 1) * right.width]);
    }
    let image = ImageBuffer::new(merged_width, left.height, pixels);
    match write_image(path, &image) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("could not write {}: {}", path.display(), e);
            1
        }
    }
}

/// Progress reporting for the CLI: a `pbr` bar ticked once per completed
/// row. Grounded on the teacher's `CliRenderProgress`, adapted from its
/// mutex-guarded sample-pass ticker to the interior-mutability-free
/// `RenderProgress` contract `system::render` now drives directly from
/// worker threads.
struct CliRenderProgress {
    start_time: time::Tm,
    steady_start_time: time::SteadyTime,
    bar: std::sync::Mutex<ProgressBar<Stdout>>,
}

impl CliRenderProgress {
    fn new(_width: usize, height: usize) -> CliRenderProgress {
        let mut bar = ProgressBar::new(height as u64);
        bar.message("Rows: ");
        CliRenderProgress {
            start_time: time::now(),
            steady_start_time: time::SteadyTime::now(),
            bar: std::sync::Mutex::new(bar),
        }
    }

    fn finish(&self, stats: &StatisticsSnapshot) {
        let elapsed = time::SteadyTime::now() - self.steady_start_time;
        let mut bar = self.bar.lock().unwrap();
        bar.finish_println(&format!(
            "Finished at {} ({}); {} pixels, {} samples, {} supersampled",
            time::now().rfc822(),
            format_duration(elapsed),
            stats.pixels_rendered,
            stats.samples_cast,
            stats.supersampled_pixels
        ));
    }
}

impl RenderProgress for CliRenderProgress {
    fn render_started(&self, width: usize, height: usize) {
        println!("Rendering {width}x{height}.");
        println!("Started at {}", self.start_time.rfc822());
    }

    fn row_complete(&self, _row: usize) {
        self.bar.lock().unwrap().inc();
    }

    fn render_finished(&self, _stats: &StatisticsSnapshot) {}
}

fn format_duration(mut d: time::Duration) -> String {
    let mut s = String::new();
    let hours = d.num_hours();
    d = d - time::Duration::hours(hours);
    if hours > 0 {
        s += &format!("{hours}h ");
    }
    let minutes = d.num_minutes();
    d = d - time::Duration::minutes(minutes);
    if minutes > 0 {
        s += &format!("{minutes}m ");
    }
    let seconds = d.num_seconds();
    d = d - time::Duration::seconds(seconds);
    let milliseconds = d.num_milliseconds();
    s += &format!("{seconds}.{milliseconds:03}s");
    s
}
