//! Render composition and pipeline batching.
//!
//! This module defines the [`Render`] enum, which the scene graph uses to say
//! what should be drawn this frame. The frame loop sorts the entries into
//! batches, one per pipeline, so that each pipeline is bound only once.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Drawn<'a>`] is an indexed, lit mesh with its material bind group
//! - [`Lines<'a>`] is an unlit line list (helpers such as the ground grid)
//!

use crate::data_structures::material::Side;

/// An indexed mesh: vertex and index buffers plus its material bind group.
#[derive(Clone)]
pub struct Drawn<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub group: &'a wgpu::BindGroup,
    pub amount: u32,
    pub side: Side,
}

/// A non-indexed line list with per-vertex colours.
#[derive(Clone)]
pub struct Lines<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Specifies how a scene object should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Mesh(Drawn)` renders a lit mesh with the pipeline matching its `Side`
/// - `Lines(Lines)` renders an unlit line list
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
///
pub enum Render<'a> {
    None,
    Mesh(Drawn<'a>),
    Lines(Lines<'a>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(self, meshes: &mut Vec<Drawn<'a>>, lines: &mut Vec<Lines<'a>>) {
        match self {
            Render::Mesh(drawn) => meshes.push(drawn),
            Render::Lines(line) => lines.push(line),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(meshes, lines)),
            Render::None => (),
        }
    }
}
