//! Camera, projection and the damped orbit controller.
//!
//! The camera is a plain look-at camera. [`OrbitController`] moves it on a
//! sphere around its target: pointer input accumulates pending rotation, zoom
//! and pan, and [`OrbitController::update`] applies a fraction of it every
//! frame so that motion eases out.

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Point3, Rad, Vector3, Zero};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use crate::config::OrbitConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

// keeps the polar angle away from the poles where look_at degenerates
const EPS: f32 = 0.000001;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new<P: Into<Point3<f32>>>(position: P, target: P) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
        }
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// Angle between the up axis and the camera offset, in radians.
    pub fn polar_angle(&self) -> f32 {
        Spherical::from_offset(self.position - self.target).phi
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> cgmath::Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: the uniform and its bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Spherical coordinates with +Y up: `theta` around Y starting at +Z, `phi` from +Y.
#[derive(Copy, Clone, Debug)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vector3<f32>) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

/// Damped orbit controls around [`Camera::target`].
///
/// Left drag rotates, right drag pans and the wheel zooms. Distance and polar
/// angle are clamped on every [`update`](Self::update).
#[derive(Debug)]
pub struct OrbitController {
    pub config: OrbitConfig,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vector3<f32>,
    drag: Option<Drag>,
    cursor: Option<PhysicalPosition<f64>>,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self {
            config,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vector3::zero(),
            drag: None,
            cursor: None,
        }
    }

    /// Feeds pointer input. `viewport_height` scales drags so that one
    /// screen height of drag is a full turn.
    pub fn handle_window_events(
        &mut self,
        event: &WindowEvent,
        camera: &Camera,
        projection: &Projection,
        viewport_height: u32,
    ) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.drag = match (button, state) {
                    (MouseButton::Left, ElementState::Pressed) => Some(Drag::Rotate),
                    (MouseButton::Right, ElementState::Pressed) => Some(Drag::Pan),
                    (_, ElementState::Released) => None,
                    _ => self.drag,
                };
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(drag), Some(last)) = (self.drag, self.cursor) {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    match drag {
                        Drag::Rotate => self.handle_rotate(dx, dy, viewport_height),
                        Drag::Pan => self.handle_pan(dx, dy, camera, projection, viewport_height),
                    }
                }
                self.cursor = Some(*position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.handle_zoom(scroll);
            }
            _ => (),
        }
    }

    /// Queues a rotation for a drag of `dx`/`dy` pixels.
    pub fn handle_rotate(&mut self, dx: f32, dy: f32, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.delta_theta -= TAU * dx / height * self.config.rotate_speed;
        self.delta_phi -= TAU * dy / height * self.config.rotate_speed;
    }

    /// Queues a zoom. Positive `scroll` moves the camera towards the target.
    pub fn handle_zoom(&mut self, scroll: f32) {
        let zoom_scale = 0.95_f32.powf(self.config.zoom_speed);
        if scroll > 0.0 {
            self.scale *= zoom_scale;
        } else if scroll < 0.0 {
            self.scale /= zoom_scale;
        }
    }

    /// Queues a pan for a drag of `dx`/`dy` pixels.
    pub fn handle_pan(
        &mut self,
        dx: f32,
        dy: f32,
        camera: &Camera,
        projection: &Projection,
        viewport_height: u32,
    ) {
        let height = viewport_height.max(1) as f32;
        // world units covered by half the screen height at the target's depth
        let target_distance = camera.distance() * (projection.fovy.0 / 2.0).tan();
        let forward = camera.target - camera.position;
        let right = forward.cross(camera.up);
        if right.magnitude2() == 0.0 {
            return;
        }
        let right = right.normalize();
        let up = if self.config.screen_space_panning {
            right.cross(forward).normalize()
        } else {
            camera.up.cross(right).normalize()
        };
        let left_distance = 2.0 * dx * target_distance / height * self.config.pan_speed;
        let up_distance = 2.0 * dy * target_distance / height * self.config.pan_speed;
        self.pan_offset += right * -left_distance + up * up_distance;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Applies pending input to the camera and decays it.
    ///
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - camera.target);

        let factor = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.delta_theta * factor;
        spherical.phi += self.delta_phi * factor;

        // keep theta in (-PI, PI] so repeated orbiting doesn't grow without bound
        if spherical.theta > PI {
            spherical.theta -= TAU;
        } else if spherical.theta < -PI {
            spherical.theta += TAU;
        }

        // f32::clamp panics on an inverted range
        spherical.phi = spherical
            .phi
            .max(self.config.min_polar_angle)
            .min(self.config.max_polar_angle)
            .max(EPS)
            .min(PI - EPS);
        spherical.radius = (spherical.radius * self.scale)
            .max(self.config.min_distance)
            .min(self.config.max_distance);

        camera.target += self.pan_offset * factor;
        camera.position = camera.target + spherical.to_offset();

        if self.config.enable_damping {
            self.delta_theta *= 1.0 - factor;
            self.delta_phi *= 1.0 - factor;
            self.pan_offset *= 1.0 - factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vector3::zero();
        }
        self.scale = 1.0;

        (camera.position - before).magnitude2() > EPS * EPS
    }

    /// True while queued motion is still large enough to be visible.
    pub fn is_settling(&self) -> bool {
        self.delta_theta.abs() > EPS
            || self.delta_phi.abs() > EPS
            || self.pan_offset.magnitude2() > EPS * EPS
    }
}
