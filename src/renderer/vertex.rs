//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for scene decoration (entity base colors live in `sim::palette`)
pub mod colors {
    /// Gray-900 (#1a202c)
    pub const BACKGROUND: [f32; 4] = [0.102, 0.125, 0.173, 1.0];
    pub const BEVEL_LIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
    pub const BEVEL_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.2];
    pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EYE_PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Coin rim (#fef08a)
    pub const COIN_RIM: [f32; 4] = [0.996, 0.941, 0.541, 1.0];
    /// Flag red (#ef4444)
    pub const FLAG: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    /// Pole cap (#eab308)
    pub const POLE_CAP: [f32; 4] = [0.918, 0.702, 0.031, 1.0];
}
