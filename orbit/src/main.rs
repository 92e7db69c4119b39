//! # Orbit
//!
//! Entry point for the orbit ray marcher.
//!
//! Opens a window that sphere-traces an infinitely repeated primitive and lets
//! the user tumble the camera by dragging. With `--snapshot` the same image is
//! rendered on the CPU and written to disk instead, which needs no GPU.

mod app;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use march::Primitive;

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "orbit", version, about)]
pub struct Args {
    /// Shape repeated across space: sphere, cuboid, cylinder or mandelbulb
    #[arg(long, default_value = "sphere")]
    pub primitive: Primitive,

    /// Disable the step-count glow added to every pixel
    #[arg(long)]
    pub no_highlights: bool,

    /// Load the shader body from this WGSL file and reload it when it changes
    #[arg(long, value_name = "PATH")]
    pub shader: Option<PathBuf>,

    /// Render one frame on the CPU to this PNG and exit
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Animation frame to render with `--snapshot`
    #[arg(long, default_value_t = 0)]
    pub frame: u64,
}

fn main() -> Result<()> {
    app::run(Args::parse())
}
