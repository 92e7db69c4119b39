//! Session setup: logging, scene selection and the choice between the live
//! window and a one-off CPU snapshot.

use anyhow::{ensure, Result};
use march::SceneConfig;
use render::RunOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::Args;

/// Install the log subscriber and run the session described by `args`.
///
/// # Errors
///
/// Returns any error from window or GPU setup, shader compilation or snapshot
/// output.
pub fn run(args: Args) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    ensure!(
        args.width > 0 && args.height > 0,
        "image size must be non-zero, got {}x{}",
        args.width,
        args.height
    );

    let options = options_from(&args);
    info!(
        "Scene: {} primitive, highlights {}",
        options.scene.primitive,
        if options.scene.highlights { "on" } else { "off" }
    );

    match &args.snapshot {
        Some(path) => {
            render::write_snapshot(path, &options.scene, options.width, options.height, args.frame)
        }
        None => render::run(&options),
    }
}

fn options_from(args: &Args) -> RunOptions {
    RunOptions {
        scene: SceneConfig {
            primitive: args.primitive,
            highlights: !args.no_highlights,
        },
        shader: args.shader.clone(),
        width: args.width,
        height: args.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use march::Primitive;

    #[test]
    fn defaults_match_a_plain_launch() {
        let args = Args::try_parse_from(["orbit"]).unwrap();
        let options = options_from(&args);
        assert_eq!(options.scene, SceneConfig::default());
        assert_eq!((options.width, options.height), (800, 600));
        assert!(options.shader.is_none());
        assert!(args.snapshot.is_none());
        assert_eq!(args.frame, 0);
    }

    #[test]
    fn flags_reach_the_scene() {
        let args = Args::try_parse_from([
            "orbit",
            "--primitive",
            "Mandelbulb",
            "--no-highlights",
            "--shader",
            "body.wgsl",
            "--width",
            "320",
        ])
        .unwrap();
        let options = options_from(&args);
        assert_eq!(options.scene.primitive, Primitive::Mandelbulb);
        assert!(!options.scene.highlights);
        assert_eq!(options.shader.as_deref(), Some(std::path::Path::new("body.wgsl")));
        assert_eq!(options.width, 320);
    }

    #[test]
    fn unknown_primitive_is_rejected() {
        assert!(Args::try_parse_from(["orbit", "--primitive", "torus"]).is_err());
    }
}
