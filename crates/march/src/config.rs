//! Scene selection resolved once at startup.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown primitive '{0}' (expected sphere, cuboid, cylinder or mandelbulb)")]
    UnknownPrimitive(String),
}

/// The single distance-field primitive tiled through the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Primitive {
    /// Sphere at the origin whose radius pulses with the frame counter.
    #[default]
    Sphere,
    /// Axis-aligned box with half extent 0.3 and no rounding.
    Cuboid,
    /// Y-aligned capped cylinder, radius 0.2 and half height 0.6.
    Cylinder,
    /// Power 8 mandelbulb distance estimate.
    Mandelbulb,
}

impl Primitive {
    pub const ALL: [Primitive; 4] = [
        Primitive::Sphere,
        Primitive::Cuboid,
        Primitive::Cylinder,
        Primitive::Mandelbulb,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Sphere => "sphere",
            Primitive::Cuboid => "cuboid",
            Primitive::Cylinder => "cylinder",
            Primitive::Mandelbulb => "mandelbulb",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Primitive::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPrimitive(s.to_string()))
    }
}

/// Build-time choices for the fragment program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneConfig {
    pub primitive: Primitive,
    /// Brighten every resolved pixel by `steps / 150` to visualise march cost.
    pub highlights: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            primitive: Primitive::Sphere,
            highlights: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_primitive_name() {
        for p in Primitive::ALL {
            assert_eq!(p.name().parse::<Primitive>(), Ok(p));
        }
        assert_eq!(" Mandelbulb ".parse::<Primitive>(), Ok(Primitive::Mandelbulb));
    }

    #[test]
    fn rejects_unknown_primitive() {
        let err = "torus".parse::<Primitive>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownPrimitive("torus".into()));
        assert!(err.to_string().contains("torus"));
    }

    #[test]
    fn defaults_match_the_demo_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.primitive, Primitive::Sphere);
        assert!(config.highlights);
    }
}
