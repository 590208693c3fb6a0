//! The composition root: everything on screen that doesn't touch the GPU.
//!
//! [`SceneRoot`] builds the camera, orbit controls, lights, grid and paper
//! from a [`SceneConfig`] and owns the scene graph they live in. The GPU side
//! ([`Context`](crate::context::Context)) only reads from it, which keeps the
//! root constructible and testable without a device.

use winit::{
    event::{ElementState, WindowEvent},
    keyboard::Key,
};

use crate::{
    camera::{Camera, OrbitController, Projection},
    config::SceneConfig,
    data_structures::{grid::GridHelper, scene_graph::{NodeId, Scene}},
    observer::PaperObserver,
    paper::PaperModel,
};

/// Size of the render target in physical pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug)]
pub struct SceneRoot {
    pub scene: Scene,
    pub camera: Camera,
    pub projection: Projection,
    pub controller: OrbitController,
    pub paper: PaperModel,
    viewport: Viewport,
    lights: [NodeId; 2],
    grid: NodeId,
}

impl SceneRoot {
    pub fn new(
        config: &SceneConfig,
        width: u32,
        height: u32,
        observer: Option<Box<dyn PaperObserver>>,
    ) -> Self {
        let viewport = Viewport {
            width: width.max(1),
            height: height.max(1),
        };
        let camera = Camera::new(config.camera.position, config.camera.target);
        let projection = Projection::new(
            viewport.width,
            viewport.height,
            cgmath::Deg(config.camera.fovy),
            config.camera.znear,
            config.camera.zfar,
        );
        let controller = OrbitController::new(config.controls.clone());

        let mut scene = Scene::new();
        let mut paper = PaperModel::with_observer(
            &mut scene,
            config.paper.width,
            config.paper.height,
            config.paper.segments_x,
            config.paper.segments_y,
            observer,
        );
        paper.set_receive_shadow(&mut scene, config.paper.receive_shadow);

        let lights = [scene.add(config.hemisphere), scene.add(config.directional)];
        let grid = scene.add(GridHelper::new(
            config.grid.size,
            config.grid.divisions,
            config.grid.center_color,
            config.grid.grid_color,
        ));
        log::debug!(
            "scene root ready: {} nodes, viewport {}x{}",
            scene.len(),
            viewport.width,
            viewport.height
        );

        Self {
            scene,
            camera,
            projection,
            controller,
            paper,
            viewport,
            lights,
            grid,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Handles of the hemisphere and directional light, in that order.
    pub fn lights(&self) -> [NodeId; 2] {
        self.lights
    }

    pub fn grid(&self) -> NodeId {
        self.grid
    }

    /// Follows a window resize. Zero-sized windows (minimised) are ignored.
    ///
    /// Returns whether anything changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.viewport = Viewport { width, height };
        self.projection.resize(width, height);
        true
    }

    /// Routes input to the orbit controls. `R` resets the paper.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            self.handle_key(&event.logical_key, event.state, event.repeat);
            return;
        }
        self.controller.handle_window_events(
            event,
            &self.camera,
            &self.projection,
            self.viewport.height,
        );
    }

    /// Reacts to a key press. Only a fresh press of `r` or `R` does anything.
    ///
    /// Returns whether the paper was reset.
    pub fn handle_key(&mut self, key: &Key, state: ElementState, repeat: bool) -> bool {
        if state != ElementState::Pressed || repeat {
            return false;
        }
        match key {
            Key::Character(c) if c.eq_ignore_ascii_case("r") => {
                self.reset_paper();
                true
            }
            _ => false,
        }
    }

    pub fn reset_paper(&mut self) {
        self.paper.reset(&mut self.scene);
    }

    /// Advances the orbit damping by one frame.
    pub fn update(&mut self) -> bool {
        self.controller.update(&mut self.camera)
    }
}
