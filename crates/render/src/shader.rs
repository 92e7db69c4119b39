//! WGSL assembly and validation
//!
//! The fragment program is specialised for one [`SceneConfig`] by prepending a
//! short prelude, so the primitive choice costs nothing per pixel. Every
//! assembled module is run through `naga` before it reaches the device, which
//! turns a bad shader into a readable diagnostic instead of a device error.

use std::fs;
use std::path::Path;

use march::{Primitive, SceneConfig};
use thiserror::Error;

/// The built-in fragment program body.
pub const SDF_SHADER: &str = include_str!("sdf.wgsl");

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("WGSL parse error:\n{0}")]
    Parse(String),
    #[error("WGSL validation error:\n{0}")]
    Validation(String),
}

fn primitive_fn(primitive: Primitive) -> &'static str {
    match primitive {
        Primitive::Sphere => "sphere_dist",
        Primitive::Cuboid => "cuboid_dist",
        Primitive::Cylinder => "cylinder_dist",
        Primitive::Mandelbulb => "mandelbulb_dist",
    }
}

/// Constants and the primitive selector for `config`.
#[must_use]
pub fn prelude(config: &SceneConfig) -> String {
    format!(
        "const HIGHLIGHTS: bool = {};\n\
         fn primitive_dist(p: vec3<f32>) -> f32 {{ return {}(p); }}\n\n",
        config.highlights,
        primitive_fn(config.primitive),
    )
}

/// Prelude plus `body`.
#[must_use]
pub fn assemble(body: &str, config: &SceneConfig) -> String {
    let mut source = prelude(config);
    source.push_str(body);
    source
}

/// Parse and validate WGSL, rendering any error against the source.
pub fn validate(source: &str) -> Result<naga::Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::Parse(e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator
        .validate(&module)
        .map_err(|e| ShaderError::Validation(e.emit_to_string(source)))?;

    Ok(module)
}

/// A validated fragment program ready for `create_shader_module`.
#[derive(Debug, Clone)]
pub struct SdfShader {
    pub source: String,
}

impl SdfShader {
    /// Specialise `body` for `config` and validate the result.
    pub fn build(body: &str, config: &SceneConfig) -> Result<Self, ShaderError> {
        let source = assemble(body, config);
        validate(&source)?;
        Ok(Self { source })
    }

    pub fn builtin(config: &SceneConfig) -> Result<Self, ShaderError> {
        Self::build(SDF_SHADER, config)
    }

    /// Read a body from disk, as used for hot reloading.
    pub fn load(path: &Path, config: &SceneConfig) -> Result<Self, ShaderError> {
        let body = fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::build(&body, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_names_the_selected_primitive() {
        let config = SceneConfig {
            primitive: Primitive::Cylinder,
            highlights: false,
        };
        let p = prelude(&config);
        assert!(p.contains("const HIGHLIGHTS: bool = false;"));
        assert!(p.contains("return cylinder_dist(p);"));
    }

    #[test]
    fn builtin_shader_validates_for_every_primitive() {
        for primitive in Primitive::ALL {
            for highlights in [true, false] {
                let config = SceneConfig { primitive, highlights };
                if let Err(e) = SdfShader::builtin(&config) {
                    panic!("{primitive} (highlights {highlights}) failed:\n{e}");
                }
            }
        }
    }

    #[test]
    fn body_without_prelude_does_not_validate() {
        assert!(validate(SDF_SHADER).is_err());
    }

    #[test]
    fn broken_body_reports_a_parse_error() {
        let err = SdfShader::build("fn broken( {", &SceneConfig::default()).unwrap_err();
        assert!(matches!(err, ShaderError::Parse(_)), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("definitely/not/here.wgsl");
        let err = SdfShader::load(path, &SceneConfig::default()).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("here.wgsl"));
    }
}
