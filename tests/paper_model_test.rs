use paperfold::{
    data_structures::{material::Side, scene_graph::Scene},
    observer::PaperEvent,
    paper::{DEFAULT_SEGMENTS, PaperModel},
};

use crate::common::test_utils::RecordingObserver;

mod common;

fn paper_meshes(scene: &Scene) -> usize {
    scene.meshes().filter(|(_, mesh)| mesh.name == "paper").count()
}

#[test]
fn construct_adds_exactly_one_mesh() {
    let mut scene = Scene::new();
    let paper = PaperModel::new(&mut scene, 3.0, 4.0, 20, 20);

    assert_eq!(paper_meshes(&scene), 1);
    assert!(scene.contains(paper.mesh()));
    assert_eq!(scene.len(), 1);
}

#[test]
fn mesh_matches_requested_dimensions() {
    let mut scene = Scene::new();
    let paper = PaperModel::new(&mut scene, 3.0, 4.0, 20, 20);
    let mesh = scene.mesh(paper.mesh()).expect("paper mesh is in the scene");

    assert_eq!(mesh.geometry.width(), 3.0);
    assert_eq!(mesh.geometry.height(), 4.0);
    assert_eq!(mesh.geometry.width_segments(), 20);
    assert_eq!(mesh.geometry.height_segments(), 20);
    assert_eq!(mesh.geometry.face_count(), 400);
    assert_eq!(mesh.geometry.vertices().len(), 21 * 21);
    assert_eq!(mesh.material.side, Side::Double);
    assert!(!mesh.is_uploaded());
}

#[test]
fn zero_segments_fall_back_to_default() {
    let mut scene = Scene::new();
    let paper = PaperModel::new(&mut scene, 2.0, 2.0, 0, 0);

    assert_eq!(paper.segments(), (DEFAULT_SEGMENTS, DEFAULT_SEGMENTS));
    let mesh = scene.mesh(paper.mesh()).expect("paper mesh is in the scene");
    assert_eq!(mesh.geometry.width_segments(), 10);
    assert_eq!(mesh.geometry.height_segments(), 10);
}

#[test]
fn one_axis_can_default_independently() {
    let mut scene = Scene::new();
    let paper = PaperModel::new(&mut scene, 2.0, 2.0, 4, 0);

    assert_eq!(paper.segments(), (4, DEFAULT_SEGMENTS));
}

#[test]
fn reset_replaces_the_mesh() {
    let mut scene = Scene::new();
    let mut paper = PaperModel::new(&mut scene, 3.0, 4.0, 20, 20);
    let before = paper.mesh();

    paper.reset(&mut scene);

    assert_ne!(paper.mesh(), before);
    assert!(!scene.contains(before));
    assert!(scene.contains(paper.mesh()));
    assert_eq!(paper_meshes(&scene), 1);
}

#[test]
fn repeated_resets_keep_one_mesh_with_the_same_shape() {
    let mut scene = Scene::new();
    let mut paper = PaperModel::new(&mut scene, 1.5, 2.5, 7, 3);

    for _ in 0..25 {
        paper.reset(&mut scene);
        assert_eq!(paper_meshes(&scene), 1);
    }

    let mesh = scene.mesh(paper.mesh()).expect("paper mesh is in the scene");
    assert_eq!(mesh.geometry.width(), 1.5);
    assert_eq!(mesh.geometry.height(), 2.5);
    assert_eq!(mesh.geometry.width_segments(), 7);
    assert_eq!(mesh.geometry.height_segments(), 3);
    assert_eq!(scene.len(), 1);
}

#[test]
fn reset_leaves_other_nodes_alone() {
    let mut scene = Scene::new();
    let mut paper = PaperModel::new(&mut scene, 3.0, 4.0, 20, 20);
    let light = scene.add(paperfold::data_structures::light::HemisphereLight::default());

    paper.reset(&mut scene);

    assert!(scene.contains(light));
    assert_eq!(scene.len(), 2);
}

#[test]
fn reset_recovers_when_the_mesh_was_removed_externally() {
    let mut scene = Scene::new();
    let mut paper = PaperModel::new(&mut scene, 3.0, 4.0, 2, 2);
    scene.remove(paper.mesh());
    assert_eq!(paper_meshes(&scene), 0);

    paper.reset(&mut scene);

    assert_eq!(paper_meshes(&scene), 1);
    assert!(scene.contains(paper.mesh()));
}

#[test]
fn observer_sees_construction_in_order() {
    let recorder = RecordingObserver::new();
    let mut scene = Scene::new();
    let paper = PaperModel::with_observer(&mut scene, 3.0, 4.0, 0, 5, recorder.boxed());

    assert_eq!(
        recorder.events(),
        vec![
            PaperEvent::ConstructStart {
                width: 3.0,
                height: 4.0,
                segments_x: DEFAULT_SEGMENTS,
                segments_y: 5,
            },
            PaperEvent::MeshBuilt { faces: 50 },
            PaperEvent::MeshAttached { node: paper.mesh() },
        ]
    );
}

#[test]
fn observer_sees_release_before_attach_on_reset() {
    let recorder = RecordingObserver::new();
    let mut scene = Scene::new();
    let mut paper = PaperModel::with_observer(&mut scene, 3.0, 4.0, 20, 20, recorder.boxed());
    let old = paper.mesh();
    recorder.clear();

    paper.reset(&mut scene);

    assert_eq!(
        recorder.events(),
        vec![
            PaperEvent::MeshReleased { node: old },
            PaperEvent::MeshBuilt { faces: 400 },
            PaperEvent::MeshAttached { node: paper.mesh() },
        ]
    );
}

#[test]
fn receive_shadow_survives_reset() {
    let mut scene = Scene::new();
    let mut paper = PaperModel::new(&mut scene, 3.0, 4.0, 20, 20);
    paper.set_receive_shadow(&mut scene, true);

    paper.reset(&mut scene);

    assert!(paper.receive_shadow());
    let mesh = scene.mesh(paper.mesh()).expect("paper mesh is in the scene");
    assert!(mesh.receive_shadow);
    assert!(!mesh.cast_shadow);
}
