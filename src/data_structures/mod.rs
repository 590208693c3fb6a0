//! Engine data structures: geometry, materials, meshes, lights and the scene graph.
//!
//! - `geometry` holds vertex layouts and the subdivided plane
//! - `material` holds surface materials and colour conversion
//! - `mesh` pairs a geometry with a material and owns its GPU buffers
//! - `light` holds the hemisphere and directional lights
//! - `grid` is the ground reference grid helper
//! - `scene_graph` is the explicitly owned scene container
//! - `texture` wraps the depth attachment

pub mod geometry;
pub mod grid;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene_graph;
pub mod texture;
