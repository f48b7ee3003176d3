//! Headless Burning-Bush Renderer
//!
//! Runs the animation against a manual frame scheduler with a synthetic clock
//! and writes the frames as a PNG sequence.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --package demo-headless -- --frames 120 --output frames
//! RUST_LOG=debug cargo run --package demo-headless -- --seed 7 --stride 10
//! ```

use anyhow::{bail, Context, Result};
use bush_sim_core::{
    Animation, BushSimulation, Canvas, FieldTuning, FrameClock, Framebuffer, ManualScheduler,
};
use clap::Parser;
use image::{RgbImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Render the burning-bush particle field to a PNG sequence
#[derive(Parser, Debug)]
#[command(name = "bush-sim-headless")]
#[command(about = "Burning-bush particle field, rendered offline", long_about = None)]
struct Args {
    /// Canvas width in pixels (height is width × 1.41)
    #[arg(short, long, default_value_t = 430.0)]
    size: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Random seed (omit for an entropy-seeded run)
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second of the synthetic clock
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Directory receiving frame_NNNNN.png
    #[arg(short, long, default_value = "bush-frames")]
    output: PathBuf,

    /// JSON file overriding the default tuning
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Flame particle count (overrides the tuning file)
    #[arg(long)]
    flames: Option<usize>,

    /// Skeleton particle count (overrides the tuning file)
    #[arg(long)]
    skeleton: Option<usize>,

    /// Save every n-th frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    stride: u32,

    /// Composite onto black instead of writing a transparent background
    #[arg(long)]
    opaque: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be a positive number, got {}", args.fps);
    }
    if !(args.size.is_finite() && args.size >= 1.0) {
        bail!("--size must be at least 1 pixel, got {}", args.size);
    }

    let tuning = load_tuning(&args)?;
    let canvas = Canvas::from_size(args.size);
    let simulation = match args.seed {
        Some(seed) => BushSimulation::new(canvas, tuning, seed)?,
        None => BushSimulation::from_entropy(canvas, tuning)?,
    };
    info!("Rendering {} frames with seed {}", args.frames, simulation.seed());

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    let mut scheduler = ManualScheduler::new();
    let mut animation = Animation::mount(simulation, &mut scheduler);
    let mut framebuffer = Framebuffer::for_canvas(&canvas);
    let frame_ms = 1000.0 / args.fps;
    let mut clock = FrameClock::default();
    let mut saved = 0u32;

    for index in 0..args.frames {
        let Some(request) = animation.scheduler_mut().take_pending() else {
            bail!("animation stopped requesting frames at frame {index}");
        };
        clock = clock.advanced_by(frame_ms);
        if let Some(report) = animation.on_frame(request, clock, &mut framebuffer) {
            debug!(
                "Frame {}: {} expired, {} escaped",
                index, report.expired, report.escaped
            );
        }

        if index % args.stride == 0 {
            let path = args.output.join(format!("frame_{index:05}.png"));
            save_frame(&framebuffer, &path, args.opaque)?;
            saved += 1;
        }
    }

    let timer = animation.timer().clone();
    let respawns = animation.simulation().respawn_count();
    animation.unmount();

    info!(
        "Saved {} frames to {} (mean {:.2}ms/frame, {} respawns, {} frame requests, {} cancelled)",
        saved,
        args.output.display(),
        timer.mean_frame_time_ms(),
        respawns,
        scheduler.requested(),
        scheduler.cancelled()
    );
    Ok(())
}

fn load_tuning(args: &Args) -> Result<FieldTuning> {
    let tuning = match &args.tuning {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading tuning file {}", path.display()))?;
            serde_json::from_str::<FieldTuning>(&text)
                .with_context(|| format!("parsing tuning file {}", path.display()))?
        }
        None => FieldTuning::default(),
    };
    let flames = args.flames.unwrap_or(tuning.flame_count);
    let skeleton = args.skeleton.unwrap_or(tuning.skeleton.count);
    Ok(tuning.with_counts(flames, skeleton))
}

fn save_frame(framebuffer: &Framebuffer, path: &Path, opaque: bool) -> Result<()> {
    let width = framebuffer.width() as u32;
    let height = framebuffer.height() as u32;
    if opaque {
        let mut bytes = Vec::with_capacity(framebuffer.width() * framebuffer.height() * 3);
        for y in 0..framebuffer.height() {
            for x in 0..framebuffer.width() {
                bytes.extend_from_slice(&framebuffer.rgb_over_black(x, y));
            }
        }
        let image = RgbImage::from_raw(width, height, bytes)
            .context("framebuffer size does not match its pixel data")?;
        image
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        let image = RgbaImage::from_raw(width, height, framebuffer.to_rgba8())
            .context("framebuffer size does not match its pixel data")?;
        image
            .save(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
