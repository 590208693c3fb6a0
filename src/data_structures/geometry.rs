//! CPU-side geometry: vertex layouts and the subdivided plane.
//!
//! Geometry is built on the CPU and only uploaded to the GPU lazily when a
//! mesh is first drawn, which keeps scene construction independent of a
//! device.

/// Describes how a vertex type is laid out in a GPU vertex buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
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
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// A flat rectangle in the XY plane facing +Z, split into a grid of quads.
///
/// The layout matches the usual web-engine plane: vertices are emitted row by
/// row starting at the top-left corner, `v` runs from 1 at the top to 0 at the
/// bottom, and every grid cell is two counter-clockwise triangles.
///
/// Width and height are taken as given. Zero or negative extents produce a
/// degenerate or mirrored plane rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
    vertices: Vec<ModelVertex>,
    indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;

        let width_half = width / 2.0;
        let height_half = height / 2.0;
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;

        let mut vertices = Vec::with_capacity(grid_x1 as usize * grid_y1 as usize);
        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_width - width_half;
                vertices.push(ModelVertex {
                    position: [x, -y, 0.0],
                    normal: [0.0, 0.0, 1.0],
                    tex_coords: [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity(grid_x as usize * grid_y as usize * 6);
        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = (ix + 1) + grid_x1 * (iy + 1);
                let d = (ix + 1) + grid_x1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            width,
            height,
            width_segments: grid_x,
            height_segments: grid_y,
            vertices,
            indices,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    pub fn vertices(&self) -> &[ModelVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of grid cells (quads), not triangles.
    pub fn face_count(&self) -> u64 {
        Self::faces_for(self.width_segments, self.height_segments)
    }

    /// Cell count of a `width_segments` x `height_segments` plane, without building it.
    pub fn faces_for(width_segments: u32, height_segments: u32) -> u64 {
        u64::from(width_segments) * u64::from(height_segments)
    }

    pub fn triangle_count(&self) -> u64 {
        self.indices.len() as u64 / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quad_layout() {
        let plane = PlaneGeometry::new(2.0, 2.0, 1, 1);
        let positions: Vec<[f32; 3]> = plane.vertices().iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                [-1.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [-1.0, -1.0, 0.0],
                [1.0, -1.0, 0.0],
            ]
        );
        assert_eq!(plane.indices(), &[0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn triangles_wind_towards_positive_z() {
        let plane = PlaneGeometry::new(3.0, 4.0, 2, 3);
        for tri in plane.indices().chunks(3) {
            let p = |i: u32| cgmath::Vector3::from(plane.vertices()[i as usize].position);
            let normal = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(normal.z > 0.0, "triangle {:?} faces away", tri);
        }
    }

    #[test]
    fn zero_segments_are_raised_to_one() {
        let plane = PlaneGeometry::new(1.0, 1.0, 0, 0);
        assert_eq!(plane.width_segments(), 1);
        assert_eq!(plane.height_segments(), 1);
        assert_eq!(plane.vertices().len(), 4);
    }

    #[test]
    fn face_count_does_not_wrap_for_huge_planes() {
        assert_eq!(PlaneGeometry::faces_for(65536, 65536), 1 << 32);
        assert_eq!(PlaneGeometry::faces_for(u32::MAX, 2), u64::from(u32::MAX) * 2);
    }
}
