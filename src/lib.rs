//! paperfold
//!
//! A paper-folding playground: a subdivided sheet of paper lying in a lit
//! scene, viewed through a damped orbit camera. Runs natively through winit
//! or in the browser on WebGL.
//!
//! High-level modules
//! - `scene_root`: the composition root that builds camera, controls, lights, grid and paper
//! - `paper`: the paper model and its reset
//! - `camera`: camera, projection and the orbit controller
//! - `config`: scene configuration and its defaults
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: geometry, materials, meshes, lights and the scene graph
//! - `flow`: the winit event loop
//! - `observer`: lifecycle notifications from the paper model
//! - `pipelines`: render pipelines and shaders
//! - `render`: render composition for pipeline batching
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod logging;
pub mod observer;
pub mod paper;
pub mod pipelines;
pub mod render;
pub mod scene_root;

// Re-exports commonly used types for convenience in downstream code.
pub use config::SceneConfig;
pub use flow::run;
pub use paper::PaperModel;
pub use scene_root::SceneRoot;
pub use winit::event::WindowEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point on the web: renders the default scene into `#container`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run(SceneConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
