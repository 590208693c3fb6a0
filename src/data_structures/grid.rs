use wgpu::util::DeviceExt;

use crate::data_structures::{geometry::Vertex, material::srgb_hex_to_linear};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex for LineVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Square reference grid lying on the XZ ground plane, centred on the origin.
///
/// `divisions + 1` lines run along each axis. The lines through the origin use
/// `center_color` and all others use `grid_color` (both `0xRRGGBB`).
#[derive(Debug)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub center_color: u32,
    pub grid_color: u32,
    buffer: Option<wgpu::Buffer>,
}

impl GridHelper {
    pub fn new(size: f32, divisions: u32, center_color: u32, grid_color: u32) -> Self {
        Self {
            size,
            divisions: divisions.max(1),
            center_color,
            grid_color,
            buffer: None,
        }
    }

    pub fn vertices(&self) -> Vec<LineVertex> {
        // with an odd count no line passes through the origin
        let center = (self.divisions % 2 == 0).then_some(self.divisions / 2);
        let step = self.size / self.divisions as f32;
        let half = self.size / 2.0;
        let center_color = srgb_hex_to_linear(self.center_color);
        let grid_color = srgb_hex_to_linear(self.grid_color);

        let mut vertices = Vec::with_capacity((self.divisions as usize + 1) * 4);
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let color = if Some(i) == center { center_color } else { grid_color };
            vertices.push(LineVertex { position: [-half, 0.0, k], color });
            vertices.push(LineVertex { position: [half, 0.0, k], color });
            vertices.push(LineVertex { position: [k, 0.0, -half], color });
            vertices.push(LineVertex { position: [k, 0.0, half], color });
        }
        vertices
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    pub fn vertex_count(&self) -> u32 {
        (self.divisions + 1) * 4
    }

    pub fn upload(&mut self, device: &wgpu::Device) {
        if self.buffer.is_some() {
            return;
        }
        self.buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lines_per_division_step() {
        let grid = GridHelper::new(10.0, 10, 0x444444, 0x888888);
        let vertices = grid.vertices();
        assert_eq!(vertices.len(), 44);
        assert_eq!(grid.vertex_count() as usize, vertices.len());
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
        assert!(vertices.iter().all(|v| v.position[0].abs() <= 5.0 && v.position[2].abs() <= 5.0));
    }

    #[test]
    fn only_the_centre_lines_use_the_centre_colour() {
        let grid = GridHelper::new(10.0, 10, 0x444444, 0x888888);
        let center = srgb_hex_to_linear(0x444444);
        let centred: Vec<_> = grid.vertices().into_iter().filter(|v| v.color == center).collect();
        assert_eq!(centred.len(), 4);
        assert!(centred.iter().any(|v| v.position == [-5.0, 0.0, 0.0]));
        assert!(centred.iter().any(|v| v.position == [0.0, 0.0, 5.0]));
    }

    #[test]
    fn odd_divisions_have_no_centre_line() {
        let grid = GridHelper::new(10.0, 5, 0x444444, 0x888888);
        let center = srgb_hex_to_linear(0x444444);
        assert!(grid.vertices().iter().all(|v| v.color != center));
        assert!(!grid.vertices().iter().any(|v| v.position == [-5.0, 0.0, 0.0]));
    }
}
