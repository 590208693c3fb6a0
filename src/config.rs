//! Scene configuration.
//!
//! There is no configuration file: every tunable lives in [`SceneConfig`] and
//! its `Default` reproduces the stock scene. Colours are `0xRRGGBB` sRGB.

use std::f32::consts::FRAC_PI_2;

use cgmath::Point3;

use crate::data_structures::light::{DirectionalLight, HemisphereLight, ShadowCamera};
use crate::data_structures::material::srgb_hex_to_linear;

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Orbit controls. Angles are radians, distances world units.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Pan in screen space instead of along the ground plane.
    pub screen_space_panning: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 3.0,
            max_distance: 10.0,
            min_polar_angle: 0.0,
            // keep the camera above the ground plane
            max_polar_angle: FRAC_PI_2,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            screen_space_panning: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaperConfig {
    pub width: f32,
    pub height: f32,
    /// 0 selects the default segment count.
    pub segments_x: u32,
    pub segments_y: u32,
    pub receive_shadow: bool,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 4.0,
            segments_x: 20,
            segments_y: 20,
            receive_shadow: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub divisions: u32,
    pub center_color: u32,
    pub grid_color: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            divisions: 10,
            center_color: 0x444444,
            grid_color: 0x888888,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    /// Id of the canvas element the renderer draws into on the web.
    pub canvas_id: String,
    pub clear_colour: u32,
    pub camera: CameraConfig,
    pub controls: OrbitConfig,
    pub paper: PaperConfig,
    pub hemisphere: HemisphereLight,
    pub directional: DirectionalLight,
    pub grid: GridConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "paperfold".to_string(),
            canvas_id: "container".to_string(),
            clear_colour: 0x333333,
            camera: CameraConfig::default(),
            controls: OrbitConfig::default(),
            paper: PaperConfig::default(),
            hemisphere: HemisphereLight {
                sky_color: srgb_hex_to_linear(0xffffff),
                ground_color: srgb_hex_to_linear(0x444444),
                intensity: 0.7,
            },
            directional: DirectionalLight {
                color: srgb_hex_to_linear(0xffffff),
                intensity: 1.0,
                position: Point3::new(5.0, 10.0, 7.0),
                target: Point3::new(0.0, 0.0, 0.0),
                cast_shadow: true,
                shadow: ShadowCamera {
                    map_size: [1024, 1024],
                    near: 0.5,
                    far: 50.0,
                    left: -10.0,
                    right: 10.0,
                    top: 10.0,
                    bottom: -10.0,
                },
            },
            grid: GridConfig::default(),
        }
    }
}
