//! Scene lights.
//!
//! Colours are linear RGB. Lights are plain data; the renderer reads them from
//! the scene every frame and packs them into a single uniform.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::camera::OPENGL_TO_WGPU_MATRIX;

/// Ambient light that fades from `ground_color` below to `sky_color` above.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub intensity: f32,
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self {
            sky_color: [1.0, 1.0, 1.0],
            ground_color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Orthographic volume in which a directional light computes shadows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowCamera {
    pub map_size: [u32; 2],
    pub near: f32,
    pub far: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            map_size: [512, 512],
            near: 0.5,
            far: 500.0,
            left: -5.0,
            right: 5.0,
            top: 5.0,
            bottom: -5.0,
        }
    }
}

/// Parallel light shining from `position` towards `target`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub cast_shadow: bool,
    pub shadow: ShadowCamera,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface towards the light.
    pub fn direction(&self) -> Vector3<f32> {
        (self.position - self.target).normalize()
    }

    /// View-projection of the shadow frustum, in wgpu clip space.
    pub fn shadow_view_proj(&self) -> cgmath::Matrix4<f32> {
        let up = if self.direction().y.abs() > 0.999 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        let view = cgmath::Matrix4::look_at_rh(self.position, self.target, up);
        let proj = cgmath::ortho(
            self.shadow.left,
            self.shadow.right,
            self.shadow.bottom,
            self.shadow.top,
            self.shadow.near,
            self.shadow.far,
        );
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            position: Point3::new(0.0, 1.0, 0.0),
            target: Point3::origin(),
            cast_shadow: false,
            shadow: ShadowCamera::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    #[test]
    fn origin_projects_inside_the_shadow_frustum() {
        let light = DirectionalLight {
            position: Point3::new(5.0, 10.0, 7.0),
            shadow: ShadowCamera {
                map_size: [1024, 1024],
                near: 0.5,
                far: 50.0,
                left: -10.0,
                right: 10.0,
                top: 10.0,
                bottom: -10.0,
            },
            ..Default::default()
        };
        let clip = light.shadow_view_proj() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-4);
        assert!(clip.z > 0.0 && clip.z < 1.0, "depth {} outside 0..1", clip.z);
    }

    #[test]
    fn direction_points_at_the_light() {
        let light = DirectionalLight {
            position: Point3::new(0.0, 10.0, 0.0),
            ..Default::default()
        };
        assert_relative_eq!(light.direction().y, 1.0);
    }
}
