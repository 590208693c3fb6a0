use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use paperfold::{
    SceneConfig, SceneRoot,
    data_structures::scene_graph::SceneNode,
    observer::PaperEvent,
};
use winit::{
    dpi::PhysicalPosition,
    event::{DeviceId, ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent},
    keyboard::{Key, NamedKey},
};

use crate::common::test_utils::RecordingObserver;

mod common;

fn root(width: u32, height: u32) -> SceneRoot {
    SceneRoot::new(&SceneConfig::default(), width, height, None)
}

fn device() -> DeviceId {
    // SAFETY: the id is only compared, never handed to the platform
    unsafe { DeviceId::dummy() }
}

fn press(button: MouseButton) -> WindowEvent {
    WindowEvent::MouseInput {
        device_id: device(),
        state: ElementState::Pressed,
        button,
    }
}

fn release(button: MouseButton) -> WindowEvent {
    WindowEvent::MouseInput {
        device_id: device(),
        state: ElementState::Released,
        button,
    }
}

fn cursor(x: f64, y: f64) -> WindowEvent {
    WindowEvent::CursorMoved {
        device_id: device(),
        position: PhysicalPosition::new(x, y),
    }
}

fn wheel(lines: f32) -> WindowEvent {
    WindowEvent::MouseWheel {
        device_id: device(),
        delta: MouseScrollDelta::LineDelta(0.0, lines),
        phase: TouchPhase::Moved,
    }
}

fn settle(root: &mut SceneRoot) {
    for _ in 0..2000 {
        root.update();
    }
}

#[test]
fn default_config_matches_stock_scene() {
    let config = SceneConfig::default();

    assert_eq!(config.camera.fovy, 75.0);
    assert_eq!(config.camera.znear, 0.1);
    assert_eq!(config.camera.zfar, 1000.0);
    assert_eq!(config.clear_colour, 0x333333);
    assert_eq!(config.canvas_id, "container");
    assert!(config.controls.enable_damping);
    assert_eq!(config.controls.damping_factor, 0.05);
    assert_eq!(config.controls.min_distance, 3.0);
    assert_eq!(config.controls.max_distance, 10.0);
    assert_eq!(config.controls.max_polar_angle, FRAC_PI_2);
    assert_eq!(config.hemisphere.intensity, 0.7);
    assert_eq!(config.directional.intensity, 1.0);
    assert!(config.directional.cast_shadow);
    assert_eq!(config.directional.shadow.map_size, [1024, 1024]);
    assert_eq!(config.grid.size, 10.0);
    assert_eq!(config.grid.divisions, 10);
}

#[test]
fn builds_the_stock_scene() {
    let root = root(800, 600);

    let mut meshes = 0;
    let mut grids = 0;
    let mut hemispheres = 0;
    let mut directionals = 0;
    for (_, node) in root.scene.iter() {
        match node {
            SceneNode::Mesh(_) => meshes += 1,
            SceneNode::Grid(_) => grids += 1,
            SceneNode::HemisphereLight(_) => hemispheres += 1,
            SceneNode::DirectionalLight(_) => directionals += 1,
        }
    }
    assert_eq!((meshes, grids, hemispheres, directionals), (1, 1, 1, 1));

    let [hemisphere, directional] = root.lights();
    assert!(matches!(root.scene.get(hemisphere), Some(SceneNode::HemisphereLight(_))));
    assert!(matches!(root.scene.get(directional), Some(SceneNode::DirectionalLight(_))));
    assert!(matches!(root.scene.get(root.grid()), Some(SceneNode::Grid(_))));

    let paper = root.scene.mesh(root.paper.mesh()).expect("paper mesh is in the scene");
    assert_eq!(paper.geometry.width(), 3.0);
    assert_eq!(paper.geometry.height(), 4.0);
    assert_eq!(paper.geometry.face_count(), 400);
    assert!(paper.receive_shadow);
}

#[test]
fn camera_starts_in_front_of_the_paper() {
    let root = root(800, 600);

    assert_relative_eq!(root.camera.position.z, 5.0);
    assert_relative_eq!(root.camera.distance(), 5.0);
    assert_relative_eq!(root.projection.aspect(), 800.0 / 600.0);
}

#[test]
fn resize_updates_aspect_and_viewport() {
    let mut root = root(800, 600);

    assert!(root.resize(1920, 1080));

    assert_relative_eq!(root.projection.aspect(), 1920.0 / 1080.0);
    let viewport = root.viewport();
    assert_eq!((viewport.width, viewport.height), (1920, 1080));
}

#[test]
fn zero_sized_resize_is_ignored() {
    let mut root = root(800, 600);

    assert!(!root.resize(0, 600));
    assert!(!root.resize(800, 0));

    assert_relative_eq!(root.projection.aspect(), 800.0 / 600.0);
    assert_eq!(root.viewport().width, 800);
    assert_eq!(root.viewport().height, 600);
}

#[test]
fn zoom_stays_within_distance_limits() {
    let mut root = root(800, 600);

    for _ in 0..200 {
        root.handle_window_event(&wheel(1.0));
        root.update();
    }
    assert!(root.camera.distance() >= 3.0 - 1e-4);
    assert_relative_eq!(root.camera.distance(), 3.0, epsilon = 1e-4);

    for _ in 0..200 {
        root.handle_window_event(&wheel(-1.0));
        root.update();
    }
    assert!(root.camera.distance() <= 10.0 + 1e-4);
    assert_relative_eq!(root.camera.distance(), 10.0, epsilon = 1e-4);
}

#[test]
fn camera_never_goes_below_the_ground() {
    let mut root = root(800, 600);

    // drag downwards and upwards by several screen heights
    for dy in [3000.0, -3000.0, 3000.0] {
        root.handle_window_event(&cursor(400.0, 300.0));
        root.handle_window_event(&press(MouseButton::Left));
        root.handle_window_event(&cursor(400.0, 300.0 + dy));
        root.handle_window_event(&release(MouseButton::Left));
        for _ in 0..500 {
            root.update();
            assert!(root.camera.polar_angle() <= FRAC_PI_2 + 1e-4);
            assert!(root.camera.position.y >= -1e-4);
        }
    }
}

#[test]
fn rotation_eases_out() {
    let mut root = root(800, 600);

    root.handle_window_event(&cursor(400.0, 300.0));
    root.handle_window_event(&press(MouseButton::Left));
    root.handle_window_event(&cursor(500.0, 300.0));
    root.handle_window_event(&release(MouseButton::Left));

    let mut previous = root.camera.position;
    let mut last_step = f32::MAX;
    for _ in 0..50 {
        assert!(root.update());
        let step = (root.camera.position - previous).x.abs()
            + (root.camera.position - previous).z.abs();
        assert!(step < last_step);
        last_step = step;
        previous = root.camera.position;
    }

    settle(&mut root);
    assert!(!root.controller.is_settling());
    // the full drag has been applied, the distance is unchanged
    assert_relative_eq!(root.camera.distance(), 5.0, epsilon = 1e-3);
}

#[test]
fn moving_the_cursor_without_a_button_does_nothing() {
    let mut root = root(800, 600);
    settle(&mut root);
    let before = root.camera.clone();

    root.handle_window_event(&cursor(10.0, 10.0));
    root.handle_window_event(&cursor(700.0, 500.0));
    settle(&mut root);

    assert_eq!(root.camera, before);
}

#[test]
fn right_drag_pans_the_target() {
    let mut root = root(800, 600);

    root.handle_window_event(&cursor(400.0, 300.0));
    root.handle_window_event(&press(MouseButton::Right));
    assert!(root.controller.is_dragging());
    root.handle_window_event(&cursor(300.0, 300.0));
    root.handle_window_event(&release(MouseButton::Right));
    settle(&mut root);

    assert!(root.camera.target.x.abs() > 0.1);
    assert_relative_eq!(root.camera.distance(), 5.0, epsilon = 1e-3);
}

#[test]
fn reset_paper_swaps_the_mesh_and_keeps_the_rest() {
    let recorder = RecordingObserver::new();
    let mut root = SceneRoot::new(&SceneConfig::default(), 800, 600, recorder.boxed());
    let old = root.paper.mesh();
    let nodes = root.scene.len();
    recorder.clear();

    root.reset_paper();

    assert!(!root.scene.contains(old));
    assert!(root.scene.contains(root.paper.mesh()));
    assert_eq!(root.scene.len(), nodes);
    assert!(root.scene.contains(root.grid()));
    assert!(matches!(
        recorder.events().first(),
        Some(PaperEvent::MeshReleased { node }) if *node == old
    ));
}

#[test]
fn r_key_resets_the_paper_in_either_case() {
    let mut root = root(800, 600);

    for key in ["r", "R"] {
        let old = root.paper.mesh();
        assert!(root.handle_key(&Key::Character(key.into()), ElementState::Pressed, false));
        assert_ne!(root.paper.mesh(), old);
        assert!(!root.scene.contains(old));
        assert_eq!(root.scene.meshes().count(), 1);
    }
}

#[test]
fn repeats_releases_and_other_keys_leave_the_paper_alone() {
    let mut root = root(800, 600);
    let mesh = root.paper.mesh();

    assert!(!root.handle_key(&Key::Character("r".into()), ElementState::Pressed, true));
    assert!(!root.handle_key(&Key::Character("r".into()), ElementState::Released, false));
    assert!(!root.handle_key(&Key::Character("t".into()), ElementState::Pressed, false));
    assert!(!root.handle_key(&Key::Named(NamedKey::Escape), ElementState::Pressed, false));

    assert_eq!(root.paper.mesh(), mesh);
    assert!(root.scene.contains(mesh));
}
