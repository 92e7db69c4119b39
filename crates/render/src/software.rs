//! CPU reference renderer
//!
//! Runs [`march::shade_pixel`] for every pixel of an image, one pixel at a
//! time on the calling thread. Output matches the GPU path up to floating
//! point differences and needs no adapter.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use march::{shade_pixel, FrameCounter, RenderState, SceneConfig, UniformSnapshot, Vec2, Vec4};
use tracing::info;

/// Centre of pixel `(x, y)` in NDC, `+y` up, as the quad interpolation gives.
#[must_use]
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32 * 2.0 - 1.0,
        1.0 - (y as f32 + 0.5) / height as f32 * 2.0,
    )
}

/// Clamp to `[0, 1]` and quantise, as the display would.
#[must_use]
pub fn to_rgba8(color: Vec4) -> Rgba<u8> {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
    Rgba([
        c.x.round() as u8,
        c.y.round() as u8,
        c.z.round() as u8,
        c.w.round() as u8,
    ])
}

/// Render one frame of `config` as seen through `uniforms`.
#[must_use]
pub fn render_image(uniforms: &UniformSnapshot, config: &SceneConfig) -> RgbaImage {
    let width = uniforms.resolution.x as u32;
    let height = uniforms.resolution.y as u32;
    RgbaImage::from_fn(width, height, |x, y| {
        to_rgba8(shade_pixel(pixel_to_ndc(x, y, width, height), uniforms, config))
    })
}

/// Render frame `frame` at `width`x`height` with an untouched camera and save
/// it as an image at `path`.
///
/// # Errors
///
/// Fails if the image cannot be encoded or written.
pub fn write_snapshot(
    path: &Path,
    config: &SceneConfig,
    width: u32,
    height: u32,
    frame: u64,
) -> Result<()> {
    let mut state = RenderState::new(width.max(1), height.max(1));
    state.frame = FrameCounter::new(frame);

    let start = Instant::now();
    let image = render_image(&state.snapshot(), config);
    info!(
        "Rendered {}x{} {} snapshot in {:?}",
        image.width(),
        image.height(),
        config.primitive,
        start.elapsed()
    );

    image
        .save(path)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    info!("Snapshot written to {:?}", path);
    Ok(())
}
