#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]
//! # March
//!
//! The per-pixel sphere tracing core and the host-side state that feeds it.
//!
//! Everything in this crate is plain `f32` math over [`glam`] types so the
//! exact same routines that the WGSL fragment program runs on the GPU can be
//! exercised on the CPU, either from tests or from the reference renderer in
//! the `render` crate.
//!
//! ## Key Components
//!
//! -   **Distance field:** [`sdf::Scene`] evaluates the active [`Primitive`]
//!     tiled through space by domain repetition.
//! -   **Lighting:** [`normal::estimate`] and [`shading::shade`] turn a hit
//!     point into a colour.
//! -   **Marching:** [`march::march`] steps a [`camera::Ray`] until it hits,
//!     escapes or runs out of steps; [`march::shade_pixel`] is the whole
//!     per-pixel program.
//! -   **Host state:** [`interaction::Interaction`] turns pointer events into
//!     an orbit rotation and [`frame::RenderState`] bundles everything the
//!     frame driver uploads each frame.

pub mod camera;
pub mod config;
pub mod frame;
pub mod interaction;
pub mod march;
pub mod normal;
pub mod sdf;
pub mod shading;

pub use camera::Ray;
pub use config::{ConfigError, Primitive, SceneConfig};
pub use frame::{FrameCounter, RenderState, UniformSnapshot};
pub use interaction::{Interaction, PointerEvent, PointerState, ViewState};
pub use march::{march, shade_pixel, MarchOutcome};
pub use sdf::{Scene, SignedDistance};

pub use glam::{Mat4, Vec2, Vec3, Vec4};
