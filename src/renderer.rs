//! Ambient rendering-harness layer: the framebuffer, render statistics,
//! progress reporting, and terminal display backends. None of this changes
//! from the teacher's `photon-cli` — only the integrator feeding the
//! framebuffer (now [`crate::tracer::Engine`]) is new.

use crossterm::style::{self, Stylize};
use std::io::{self, Write};

use crate::math::Color;
use crate::tracer::PixelSink;

// ─── Output Mode ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    /// Unicode braille patterns (2x4 dots per cell) with ANSI true-color.
    Braille,
    /// ANSI 24-bit true-color using full-block characters.
    TrueColor,
    /// Half-block rendering with separate fg/bg colors — 2 vertical pixels per cell.
    HalfBlock,
    /// ASCII grayscale density ramp.
    Ascii,
}

// ─── Framebuffer ────────────────────────────────────────────────────────────

pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zero(); (width * height) as usize],
        }
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Export the framebuffer as a PPM (Portable Pixmap) image file.
    /// PPM P6 binary format: RGB triplets, one byte per channel, no compression.
    pub fn write_ppm(&self, path: &str) -> io::Result<()> {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        write!(file, "P6\n{} {}\n255\n", self.width, self.height)?;
        for pixel in &self.pixels {
            let c = pixel.saturate();
            let r = (c.x * 255.999) as u8;
            let g = (c.y * 255.999) as u8;
            let b = (c.z * 255.999) as u8;
            file.write_all(&[r, g, b])?;
        }
        file.flush()?;
        Ok(())
    }
}

impl PixelSink for Framebuffer {
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        self.set(x, y, color);
    }
}

// ─── Render Statistics ──────────────────────────────────────────────────────

/// Aggregate statistics collected across the cooperative render passes.
pub struct RenderStats {
    pub elapsed_secs: f64,
    pub width: u32,
    pub height: u32,
    pub passes: u32,
}

impl RenderStats {
    pub fn print_summary(&self) {
        let bar_width = 30;
        let fill = "━".repeat(bar_width);
        eprintln!("  {fill}");
        eprintln!("  Time:     {:.2}s", self.elapsed_secs);
        eprintln!("  Passes:   {} (~100ms time slices)", self.passes);
        eprintln!("  Image:    {}×{}", self.width, self.height);
        eprintln!("  {fill}");
    }
}

// ─── Progress Reporter ──────────────────────────────────────────────────────

/// A Unicode progress bar that renders to stderr, driven by scanlines
/// completed rather than samples — matches the cooperative renderer's
/// checkpoint-per-scanline granularity.
pub struct ProgressBar {
    total: u32,
    last_pct: u32,
    start: std::time::Instant,
}

impl ProgressBar {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            last_pct: 0,
            start: std::time::Instant::now(),
        }
    }

    pub fn update(&mut self, done: u32) {
        let pct = done * 100 / self.total.max(1);
        if pct != self.last_pct {
            let elapsed = self.start.elapsed().as_secs_f64();
            let rate = done as f64 / elapsed.max(1e-9);
            let remaining = (self.total - done) as f64 / rate.max(1e-9);
            let bar_width = 24;
            let filled = (pct as usize * bar_width) / 100;
            let empty = bar_width - filled;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));
            eprint!("\r  Rendering: │{bar}│ {pct:3}%  ETA {:.0}s   ", remaining);
            self.last_pct = pct;
        }
    }

    pub fn finish(&self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        let bar = "█".repeat(24);
        eprintln!("\r  Rendering: │{bar}│ 100%  {:.2}s       ", elapsed);
    }
}

// ─── Terminal Display Engine ────────────────────────────────────────────────

pub fn display_framebuffer(fb: &Framebuffer, mode: OutputMode) {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match mode {
        OutputMode::TrueColor => display_truecolor(&mut out, fb),
        OutputMode::HalfBlock => display_halfblock(&mut out, fb),
        OutputMode::Ascii => display_ascii(&mut out, fb),
        OutputMode::Braille => display_braille(&mut out, fb),
    }
    let _ = out.flush();
}

fn display_truecolor(out: &mut impl Write, fb: &Framebuffer) {
    for y in 0..fb.height {
        for x in 0..fb.width {
            let (r, g, b) = fb.get(x, y).to_rgb8();
            let _ = write!(out, "{}", "█".with(style::Color::Rgb { r, g, b }));
        }
        let _ = writeln!(out);
    }
}

fn display_halfblock(out: &mut impl Write, fb: &Framebuffer) {
    let rows = fb.height / 2;
    for row in 0..rows {
        for x in 0..fb.width {
            let (tr, tg, tb) = fb.get(x, row * 2).to_rgb8();
            let (br, bg, bb) = fb.get(x, row * 2 + 1).to_rgb8();
            let _ = write!(
                out,
                "{}",
                "▀"
                    .with(style::Color::Rgb {
                        r: tr,
                        g: tg,
                        b: tb
                    })
                    .on(style::Color::Rgb {
                        r: br,
                        g: bg,
                        b: bb
                    })
            );
        }
        let _ = writeln!(out);
    }
}

fn display_ascii(out: &mut impl Write, fb: &Framebuffer) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    for y in 0..fb.height {
        for x in 0..fb.width {
            let c = fb.get(x, y);
            let lum = 0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z;
            let idx = (lum.clamp(0.0, 0.999) * RAMP.len() as f64) as usize;
            let _ = write!(out, "{}", RAMP[idx] as char);
        }
        let _ = writeln!(out);
    }
}

/// Braille pattern rendering — each Unicode braille char (U+2800..U+28FF) encodes
/// a 2x4 dot matrix, achieving 2× horizontal and 4× vertical subpixel resolution.
///
/// Dot-to-bit mapping (Unicode standard):
///   ┌───┐
///   │ 0 3 │    Bits 0-5 → dots 0-5
///   │ 1 4 │    Bit 6   → dot 6
///   │ 2 5 │    Bit 7   → dot 7
///   │ 6 7 │
///   └───┘
fn display_braille(out: &mut impl Write, fb: &Framebuffer) {
    let cell_w = 2u32;
    let cell_h = 4u32;
    let cols = fb.width / cell_w;
    let rows = fb.height / cell_h;

    for row in 0..rows {
        for col in 0..cols {
            let bx = col * cell_w;
            let by = row * cell_h;

            let mut pattern: u8 = 0;
            let mut avg_color = Color::zero();
            let mut lit_count = 0u32;

            let offsets: [(u32, u32, u8); 8] = [
                (0, 0, 0),
                (0, 1, 1),
                (0, 2, 2),
                (1, 0, 3),
                (1, 1, 4),
                (1, 2, 5),
                (0, 3, 6),
                (1, 3, 7),
            ];

            for &(dx, dy, bit) in &offsets {
                let px = bx + dx;
                let py = by + dy;
                if px < fb.width && py < fb.height {
                    let c = fb.get(px, py);
                    let lum = 0.2126 * c.x + 0.7152 * c.y + 0.0722 * c.z;
                    if lum > 0.15 {
                        pattern |= 1 << bit;
                        avg_color += c;
                        lit_count += 1;
                    }
                }
            }

            if lit_count > 0 {
                avg_color /= lit_count as f64;
            }

            let braille_char = char::from_u32(0x2800 + pattern as u32).unwrap_or(' ');
            let (r, g, b) = avg_color.to_rgb8();
            let _ = write!(
                out,
                "{}",
                braille_char.to_string().with(style::Color::Rgb { r, g, b })
            );
        }
        let _ = writeln!(out);
    }
}
