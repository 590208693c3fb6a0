use wgpu::util::DeviceExt;

use crate::data_structures::{geometry::PlaneGeometry, material::StandardMaterial};

/// GPU resources backing a [`Mesh`]. Created on first upload.
#[derive(Debug)]
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub material_buffer: wgpu::Buffer,
    pub material_bind_group: wgpu::BindGroup,
}

/// A geometry/material pair that can be placed in a scene.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub geometry: PlaneGeometry,
    pub material: StandardMaterial,
    pub receive_shadow: bool,
    pub cast_shadow: bool,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    pub fn new(name: &str, geometry: PlaneGeometry, material: StandardMaterial) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            receive_shadow: false,
            cast_shadow: false,
            buffers: None,
        }
    }

    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.buffers.is_some()
    }

    /// Creates the vertex, index and material buffers if they don't exist yet.
    pub fn upload(&mut self, device: &wgpu::Device, material_layout: &wgpu::BindGroupLayout) {
        if self.buffers.is_some() {
            return;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&self.label("Vertex Buffer")),
            contents: bytemuck::cast_slice(self.geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&self.label("Index Buffer")),
            contents: bytemuck::cast_slice(self.geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&self.label("Material Buffer")),
            contents: bytemuck::cast_slice(&[self.material.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: material_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: material_buffer.as_entire_binding(),
            }],
            label: Some(&self.label("Material Bind Group")),
        });
        log::debug!(
            "uploaded mesh {:?}: {} vertices, {} triangles",
            self.name,
            self.geometry.vertices().len(),
            self.geometry.triangle_count()
        );
        self.buffers = Some(MeshBuffers {
            vertex_buffer,
            index_buffer,
            num_elements: self.geometry.indices().len() as u32,
            material_buffer,
            material_bind_group,
        });
    }

    fn label(&self, part: &str) -> String {
        format!("{} {}", self.name, part)
    }

    /// Releases the GPU memory held by this mesh.
    ///
    /// A mesh that was never drawn has nothing to release.
    pub fn dispose(self) {
        if let Some(buffers) = self.buffers {
            buffers.vertex_buffer.destroy();
            buffers.index_buffer.destroy();
            buffers.material_buffer.destroy();
            log::debug!("disposed GPU buffers of mesh {:?}", self.name);
        }
    }
}
