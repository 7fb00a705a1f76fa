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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const PLAYER: [f32; 4] = [0.0, 0.902, 0.776, 1.0]; // #00e6c6
    pub const SHIELD_RING: [f32; 4] = [0.4, 0.75, 1.0, 0.7];
    pub const OBSTACLE_TOP: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE_BOTTOM: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const POWERUP_SHIELD: [f32; 4] = [0.3, 0.6, 1.0, 1.0];
    pub const POWERUP_SLOW: [f32; 4] = [0.45, 0.85, 0.3, 1.0];
    pub const POWERUP_BOMB: [f32; 4] = [0.12, 0.12, 0.14, 1.0];
    pub const BOMB_FUSE: [f32; 4] = [1.0, 0.3, 0.1, 1.0];
    pub const POWERUP_CORE: [f32; 4] = [1.0, 1.0, 1.0, 0.85];
    pub const PARTICLE: [f32; 4] = [1.0, 0.541, 0.396, 1.0]; // #ff8a65
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
}
