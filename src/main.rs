//! # gridtracer 🔬
//!
//! A grid-accelerated, recursive ray tracer that renders 3D scenes directly
//! in your terminal using Unicode braille patterns and ANSI true-color escape
//! codes.
//!
//! ## Architecture
//!
//! - **Acceleration structure**: a uniform 32×32×32 grid over the scene,
//!   traversed with a 3D DDA per ray.
//! - **Primitives**: sphere, plane, box, and triangle (mesh) intersection.
//! - **Shading**: recursive Phong shading with mirror reflection, glass-style
//!   refraction with Beer's-law absorption, and area-light soft shadows.
//! - **Camera**: a pinhole eye-and-screen-rectangle model.
//! - **Output modes**: Braille (2×4 subpixel), TrueColor, HalfBlock, ASCII.
//!
//! ## Cooperative rendering
//!
//! [`tracer::Engine::render`] processes scanlines until a wall-clock budget
//! elapses, then returns so the caller can report progress between passes —
//! the same checkpoint/resume contract the reference engine's `Engine::render`
//! gives a host UI that can't afford to block on a whole frame at once.

use std::time::{Duration, Instant};

use clap::Parser;
use gridtracer::presets::ScenePreset;
use gridtracer::renderer::{display_framebuffer, Framebuffer, OutputMode, ProgressBar, RenderStats};
use gridtracer::tracer::Engine;

/// gridtracer — render 3D scenes in your terminal
#[derive(Parser, Debug)]
#[command(
    name = "gridtracer",
    version,
    about = "A grid-accelerated recursive ray tracer, rendered right in your terminal 🦀",
    long_about = "Renders 3D scenes with a uniform-grid-accelerated recursive ray tracer \
                  directly in your terminal. Supports multiple output modes from high-res \
                  braille patterns to simple ASCII art.",
    after_help = "EXAMPLES:\n  \
                  gridtracer --scene showcase --mode halfblock\n  \
                  gridtracer --scene cornell --trace-depth 4\n  \
                  gridtracer --scene minimal --width 240 --height 120 --mode braille\n  \
                  gridtracer --scene stress --samples 2"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = ScenePreset::Showcase)]
    scene: ScenePreset,

    /// Output width in characters (actual pixel width depends on mode)
    #[arg(short = 'W', long, default_value_t = 120)]
    width: u32,

    /// Output height in characters
    #[arg(short = 'H', long, default_value_t = 60)]
    height: u32,

    /// Maximum recursion depth for reflection/refraction rays (1-6)
    #[arg(long, default_value_t = 6)]
    trace_depth: u32,

    /// Side length of the adaptive supersampling grid used for area-light
    /// shadows and glossy reflection cones (1-8)
    #[arg(long, default_value_t = 4)]
    samples: usize,

    /// Terminal output encoding mode
    #[arg(short, long, value_enum, default_value_t = CliOutputMode::Halfblock)]
    mode: CliOutputMode,

    /// Write the final frame to a PPM file instead of (or in addition to)
    /// displaying it in the terminal
    #[arg(long)]
    ppm: Option<String>,

    /// Suppress the terminal display — useful with --ppm for headless runs
    #[arg(long)]
    no_display: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputMode {
    /// Unicode braille patterns — highest effective resolution (2×4 subpixel)
    Braille,
    /// Full-block characters with 24-bit true color
    Truecolor,
    /// Half-block characters (▀) — 2 vertical pixels per cell
    Halfblock,
    /// ASCII grayscale density ramp
    Ascii,
}

impl From<CliOutputMode> for OutputMode {
    fn from(m: CliOutputMode) -> Self {
        match m {
            CliOutputMode::Braille => OutputMode::Braille,
            CliOutputMode::Truecolor => OutputMode::TrueColor,
            CliOutputMode::Halfblock => OutputMode::HalfBlock,
            CliOutputMode::Ascii => OutputMode::Ascii,
        }
    }
}

fn print_header(scene_name: &str, width: u32, height: u32, mode: OutputMode, trace_depth: u32, samples: usize) {
    let mode_name = match mode {
        OutputMode::Braille => "Braille (2×4 subpixel)",
        OutputMode::TrueColor => "TrueColor (24-bit)",
        OutputMode::HalfBlock => "HalfBlock (2× vertical)",
        OutputMode::Ascii => "ASCII grayscale",
    };
    eprintln!();
    eprintln!("  ╔═══════════════════════════════════════════════╗");
    eprintln!("  ║  gridtracer 🔬  Terminal Ray Tracer            ║");
    eprintln!("  ╚═══════════════════════════════════════════════╝");
    eprintln!();
    eprintln!("  Scene:      {scene_name}");
    eprintln!("  Resolution: {width}×{height} ({mode_name})");
    eprintln!("  Trace depth: {trace_depth}");
    eprintln!("  Samples:    {samples}×{samples} adaptive");
    eprintln!();
}

/// Budget handed to [`Engine::render`] per cooperative pass — the same
/// ~100ms slice the reference engine's host loop gives `Engine::render`
/// before it has to return control to the rest of the UI.
const RENDER_PASS_BUDGET: Duration = Duration::from_millis(100);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let desc = cli.scene.build();
    let scene_name = desc.name;
    let output_mode: OutputMode = cli.mode.into();

    print_header(scene_name, cli.width, cli.height, output_mode, cli.trace_depth, cli.samples);

    let aspect = cli.width as f64 / cli.height as f64;
    let camera = desc.camera.build(aspect);

    let mut engine = Engine::new(camera, cli.width, cli.height);
    engine.set_trace_depth(cli.trace_depth);
    engine.set_regular_sample_size(cli.samples);

    let mut framebuffer = Framebuffer::new(cli.width, cli.height);
    let mut progress = ProgressBar::new(cli.height);
    let start = Instant::now();

    let mut passes = 0u32;
    loop {
        passes += 1;
        let done = engine.render(&desc.scene, &desc.assets, &mut framebuffer, RENDER_PASS_BUDGET);
        progress.update(engine.current_line().min(cli.height));
        if done {
            break;
        }
    }
    progress.finish();

    let stats = RenderStats {
        elapsed_secs: start.elapsed().as_secs_f64(),
        width: cli.width,
        height: cli.height,
        passes,
    };
    stats.print_summary();

    if let Some(path) = &cli.ppm {
        if let Err(err) = framebuffer.write_ppm(path) {
            eprintln!("  Failed to write {path}: {err}");
        } else {
            eprintln!("  Wrote {path}");
        }
    }

    if !cli.no_display {
        eprintln!();
        display_framebuffer(&framebuffer, output_mode);
    }

    eprintln!();
    eprintln!("  Rendered with gridtracer v{}", env!("CARGO_PKG_VERSION"));
}
