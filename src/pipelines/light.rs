use wgpu::util::DeviceExt;

use crate::data_structures::scene_graph::Scene;

pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl std::fmt::Debug for LightResources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightResources")
            .field("uniform", &self.uniform)
            .finish_non_exhaustive()
    }
}

/// Hemisphere plus directional light, as the fragment shader sees it.
///
/// A scene without one of the lights gets zero intensity for it.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub sky_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub ground_color: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
    pub direction: [f32; 3],
    pub directional_intensity: f32,
    pub color: [f32; 3],
    _padding2: u32,
}

impl LightUniform {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniform = Self::default();
        if let Some(hemisphere) = scene.hemisphere_light() {
            uniform.sky_color = hemisphere.sky_color;
            uniform.ground_color = hemisphere.ground_color;
            uniform.hemisphere_intensity = hemisphere.intensity;
        }
        if let Some(directional) = scene.directional_light() {
            uniform.direction = directional.direction().into();
            uniform.color = directional.color;
            uniform.directional_intensity = directional.intensity;
        }
        uniform
    }
}

impl LightResources {
    pub fn new(uniform: LightUniform, device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("light_bind_group_layout"),
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("light_bind_group"),
        });
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Re-reads the lights from the scene and uploads them if they changed.
    pub fn write_to_buffer(&mut self, scene: &Scene, queue: &wgpu::Queue) {
        let uniform = LightUniform::from_scene(scene);
        if uniform != self.uniform {
            self.uniform = uniform;
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;

    #[test]
    fn uniform_is_a_multiple_of_16_bytes() {
        assert_eq!(std::mem::size_of::<LightUniform>() % 16, 0);
    }

    #[test]
    fn empty_scene_is_dark() {
        assert_eq!(LightUniform::from_scene(&Scene::new()), LightUniform::default());
    }

    #[test]
    fn picks_up_both_lights() {
        let config = SceneConfig::default();
        let mut scene = Scene::new();
        scene.add(config.hemisphere);
        scene.add(config.directional);
        let uniform = LightUniform::from_scene(&scene);
        assert_eq!(uniform.hemisphere_intensity, 0.7);
        assert_eq!(uniform.directional_intensity, 1.0);
        assert!(uniform.direction[1] > 0.0);
    }
}
