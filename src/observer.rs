//! Lifecycle notifications for the paper model.
//!
//! Instead of printing from inside construction, [`PaperModel`](crate::paper::PaperModel)
//! reports what it does to an optional [`PaperObserver`].

use crate::data_structures::scene_graph::NodeId;

#[derive(Clone, Debug, PartialEq)]
pub enum PaperEvent {
    /// Construction began with the effective (defaulted) dimensions.
    ConstructStart {
        width: f32,
        height: f32,
        segments_x: u32,
        segments_y: u32,
    },
    /// A fresh mesh was built but is not in the scene yet.
    MeshBuilt { faces: u64 },
    /// The mesh was inserted into the scene.
    MeshAttached { node: NodeId },
    /// The previous mesh was removed from the scene and its resources released.
    MeshReleased { node: NodeId },
}

pub trait PaperObserver {
    fn notify(&mut self, event: &PaperEvent);
}

/// Forwards every event to the `log` facade at debug level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl PaperObserver for LogObserver {
    fn notify(&mut self, event: &PaperEvent) {
        match event {
            PaperEvent::ConstructStart {
                width,
                height,
                segments_x,
                segments_y,
            } => log::debug!(
                "paper: constructing {}x{} sheet with {}x{} segments",
                width,
                height,
                segments_x,
                segments_y
            ),
            PaperEvent::MeshBuilt { faces } => log::debug!("paper: mesh built with {} faces", faces),
            PaperEvent::MeshAttached { node } => log::debug!("paper: mesh {} added to scene", node),
            PaperEvent::MeshReleased { node } => log::debug!("paper: mesh {} released", node),
        }
    }
}
