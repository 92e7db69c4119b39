//! GPU-compatible type definitions for rendering
//!
//! Layouts here must match the WGSL declarations in `sdf.wgsl` byte for byte.

use bytemuck::{Pod, Zeroable};
use march::UniformSnapshot;

/// The per-frame uniform block (`Uniforms` in WGSL).
///
/// `view` comes first so the `vec2` members fall on their natural 8 byte
/// alignment without padding; the trailing `pad` rounds the block to 96 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub mouse: [f32; 2],
    pub mouse_delta: [f32; 2],
    pub frame: f32,
    pub pad: f32,
}

impl From<&UniformSnapshot> for FrameUniforms {
    fn from(snapshot: &UniformSnapshot) -> Self {
        Self {
            view: snapshot.view.to_cols_array_2d(),
            resolution: snapshot.resolution.to_array(),
            mouse: snapshot.mouse.to_array(),
            mouse_delta: snapshot.mouse_delta.to_array(),
            frame: snapshot.frame,
            pad: 0.0,
        }
    }
}

/// One corner of the full-screen quad (`position` at location 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Corners of the viewport in clip space.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [-1.0, 1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
];

/// Two triangles over [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 2, 3];
