//! The sheet of paper: a subdivided plane that owns exactly one mesh in the scene.

use std::fmt;

use crate::{
    data_structures::{
        geometry::PlaneGeometry,
        material::{Side, StandardMaterial, srgb_hex_to_linear},
        mesh::Mesh,
        scene_graph::{NodeId, Scene},
    },
    observer::{PaperEvent, PaperObserver},
};

/// Segment count used when 0 is passed for either axis.
pub const DEFAULT_SEGMENTS: u32 = 10;
pub const PAPER_COLOUR: u32 = 0xff0000;
pub const PAPER_ROUGHNESS: f32 = 0.8;
pub const PAPER_METALNESS: f32 = 0.1;

/// A flat sheet whose mesh lives in a [`Scene`] the caller owns.
///
/// From construction on, exactly one mesh belonging to the model is in the
/// scene. [`reset`](Self::reset) swaps it for a fresh one of the same size,
/// removing the old mesh before the new one goes in.
pub struct PaperModel {
    width: f32,
    height: f32,
    segments_x: u32,
    segments_y: u32,
    receive_shadow: bool,
    mesh: NodeId,
    observer: Option<Box<dyn PaperObserver>>,
}

impl PaperModel {
    pub fn new(scene: &mut Scene, width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        Self::with_observer(scene, width, height, segments_x, segments_y, None)
    }

    pub fn with_observer(
        scene: &mut Scene,
        width: f32,
        height: f32,
        segments_x: u32,
        segments_y: u32,
        mut observer: Option<Box<dyn PaperObserver>>,
    ) -> Self {
        let segments_x = if segments_x == 0 { DEFAULT_SEGMENTS } else { segments_x };
        let segments_y = if segments_y == 0 { DEFAULT_SEGMENTS } else { segments_y };
        if let Some(observer) = observer.as_mut() {
            observer.notify(&PaperEvent::ConstructStart {
                width,
                height,
                segments_x,
                segments_y,
            });
        }

        let faces = PlaneGeometry::faces_for(segments_x, segments_y);
        let mesh = build_mesh(width, height, segments_x, segments_y, false);
        if let Some(observer) = observer.as_mut() {
            observer.notify(&PaperEvent::MeshBuilt { faces });
        }
        let mut paper = Self {
            width,
            height,
            segments_x,
            segments_y,
            receive_shadow: false,
            mesh: scene.add(mesh),
            observer,
        };
        paper.notify(PaperEvent::MeshAttached { node: paper.mesh });
        log::info!("paper initialized with {} faces", faces);
        paper
    }

    /// Handle of the mesh currently in the scene.
    pub fn mesh(&self) -> NodeId {
        self.mesh
    }

    /// Restores the unfolded sheet.
    ///
    /// The current mesh is removed from `scene` and its GPU buffers are
    /// destroyed before a new mesh with the stored dimensions is inserted.
    pub fn reset(&mut self, scene: &mut Scene) {
        match scene.remove_mesh(self.mesh) {
            Some(mesh) => {
                mesh.dispose();
                self.notify(PaperEvent::MeshReleased { node: self.mesh });
            }
            None => log::warn!("paper: mesh {} was already gone from the scene", self.mesh),
        }

        let mesh = build_mesh(
            self.width,
            self.height,
            self.segments_x,
            self.segments_y,
            self.receive_shadow,
        );
        self.notify(PaperEvent::MeshBuilt {
            faces: PlaneGeometry::faces_for(self.segments_x, self.segments_y),
        });
        self.mesh = scene.add(mesh);
        self.notify(PaperEvent::MeshAttached { node: self.mesh });
        log::info!("paper reset to unfolded state");
    }

    /// Whether the sheet receives shadows. Kept across [`reset`](Self::reset).
    pub fn set_receive_shadow(&mut self, scene: &mut Scene, receive_shadow: bool) {
        self.receive_shadow = receive_shadow;
        if let Some(mesh) = scene.mesh_mut(self.mesh) {
            mesh.receive_shadow = receive_shadow;
        }
    }

    pub fn receive_shadow(&self) -> bool {
        self.receive_shadow
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// `(segments_x, segments_y)` after defaulting.
    pub fn segments(&self) -> (u32, u32) {
        (self.segments_x, self.segments_y)
    }

    fn notify(&mut self, event: PaperEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(&event);
        }
    }
}

impl fmt::Debug for PaperModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaperModel")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("segments_x", &self.segments_x)
            .field("segments_y", &self.segments_y)
            .field("receive_shadow", &self.receive_shadow)
            .field("mesh", &self.mesh)
            .finish_non_exhaustive()
    }
}

fn build_mesh(
    width: f32,
    height: f32,
    segments_x: u32,
    segments_y: u32,
    receive_shadow: bool,
) -> Mesh {
    let geometry = PlaneGeometry::new(width, height, segments_x, segments_y);
    let material = StandardMaterial {
        color: srgb_hex_to_linear(PAPER_COLOUR),
        roughness: PAPER_ROUGHNESS,
        metalness: PAPER_METALNESS,
        side: Side::Double,
    };
    let mut mesh = Mesh::new("paper", geometry, material);
    mesh.receive_shadow = receive_shadow;
    mesh
}
