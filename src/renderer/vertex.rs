//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for backdrop elements (entities and characters carry their own
/// palettes in the sprite catalog)
pub mod colors {
    pub const SKY_CITY: [f32; 4] = [0.47, 0.65, 0.90, 1.0];
    pub const SKY_FIELDS: [f32; 4] = [0.55, 0.75, 0.95, 1.0];
    pub const SKY_BEACH: [f32; 4] = [0.40, 0.72, 0.98, 1.0];

    pub const BACKDROP_BUILDINGS: [f32; 4] = [0.30, 0.34, 0.45, 1.0];
    pub const BACKDROP_HILLS: [f32; 4] = [0.35, 0.60, 0.35, 1.0];
    pub const BACKDROP_SEA: [f32; 4] = [0.15, 0.45, 0.70, 1.0];
    pub const WINDOW_LIT: [f32; 4] = [0.95, 0.85, 0.45, 1.0];

    pub const GROUND_ROAD: [f32; 4] = [0.25, 0.25, 0.28, 1.0];
    pub const GROUND_DIRT: [f32; 4] = [0.45, 0.33, 0.20, 1.0];
    pub const GROUND_SAND: [f32; 4] = [0.88, 0.78, 0.55, 1.0];

    pub const MARKING_PAINT: [f32; 4] = [0.9, 0.9, 0.85, 1.0];
    pub const MARKING_RUT: [f32; 4] = [0.35, 0.26, 0.16, 1.0];
    pub const MARKING_FOAM: [f32; 4] = [0.95, 0.92, 0.80, 1.0];
}
