//! Render pipelines.
//!
//! - `basic` draws lit meshes, one pipeline per face-culling mode
//! - `line` draws unlit helpers such as the ground grid
//! - `light` packs the scene lights into a uniform

pub mod basic;
pub mod light;
pub mod line;

use crate::data_structures::material::Side;

/// Every pipeline the frame loop binds.
#[derive(Debug)]
pub struct Pipelines {
    pub front: wgpu::RenderPipeline,
    pub back: wgpu::RenderPipeline,
    pub double: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
        material_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let mk = |side: Side| {
            basic::mk_basic_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
                material_bind_group_layout,
                side,
            )
        };
        Self {
            front: mk(Side::Front),
            back: mk(Side::Back),
            double: mk(Side::Double),
            lines: line::mk_line_pipeline(device, config, camera_bind_group_layout),
        }
    }

    pub fn for_side(&self, side: Side) -> &wgpu::RenderPipeline {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
            Side::Double => &self.double,
        }
    }
}
