//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
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

/// Colors for track elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.86, 0.86, 0.86, 1.0];
    pub const GRID: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const BOUNDARY: [f32; 4] = [0.39, 0.39, 0.39, 1.0];
    pub const START_LINE: [f32; 4] = [0.0, 0.78, 0.0, 1.0];
    pub const CONTROL_POINT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PLAYER_LINE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const IDEAL_LINE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}
