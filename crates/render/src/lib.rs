//! # Render
//!
//! The host side of the ray marcher: a wgpu pipeline drawing one full-screen
//! quad whose fragment program sphere-traces the scene, the winit loop that
//! feeds it fresh uniforms every frame, and a CPU fallback that renders the
//! same image from the `march` crate for headless snapshots.

use std::path::PathBuf;

use march::SceneConfig;

pub mod gpu_types;
pub mod input;
pub mod pipeline;
pub mod run;
pub mod shader;
pub mod software;
pub mod state;
pub mod watcher;

pub use gpu_types::FrameUniforms;
pub use run::run;
pub use shader::{SdfShader, ShaderError};
pub use software::{render_image, write_snapshot};

/// Startup options for a rendering session.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub scene: SceneConfig,
    /// Load the shader body from this file and hot-reload it on change.
    pub shader: Option<PathBuf>,
    /// Window size in logical pixels, or snapshot size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            shader: None,
            width: 800,
            height: 600,
        }
    }
}
