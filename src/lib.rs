//! Grid-accelerated recursive ray tracer core, usable as a library by a host
//! that wants to drive [`tracer::Engine`] itself (a GUI, a batch renderer, an
//! integration test) rather than going through the `gridtracer` binary's CLI.
//!
//! The binary (`main.rs`) is a thin consumer of this crate — scene presets,
//! terminal display, and argument parsing sit on top, the same way
//! `photon-cli`'s `main.rs`/`presets.rs`/`renderer.rs` sit on top of its core
//! tracing types rather than being folded into them.

pub mod camera;
pub mod light;
pub mod material;
pub mod math;
pub mod presets;
pub mod primitive;
pub mod renderer;
pub mod scene;
pub mod tracer;
pub mod twister;
