//! Scene graph and scene organization.
//!
//! The [`Scene`] is an explicitly owned container of renderable leaves hanging
//! off an implicit root. Whoever owns the `Scene` is the only one who can
//! mutate it; components that need to insert or remove nodes take `&mut Scene`
//! as an argument instead of holding on to it.

use std::fmt;

use crate::{
    data_structures::{
        grid::GridHelper,
        light::{DirectionalLight, HemisphereLight},
        mesh::Mesh,
    },
    render::{Drawn, Lines, Render},
};

/// Stable handle to a node in a [`Scene`]. Ids are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum SceneNode {
    Mesh(Mesh),
    Grid(GridHelper),
    HemisphereLight(HemisphereLight),
    DirectionalLight(DirectionalLight),
}

impl SceneNode {
    pub fn kind(&self) -> &'static str {
        match self {
            SceneNode::Mesh(_) => "mesh",
            SceneNode::Grid(_) => "grid",
            SceneNode::HemisphereLight(_) => "hemisphere light",
            SceneNode::DirectionalLight(_) => "directional light",
        }
    }
}

impl From<Mesh> for SceneNode {
    fn from(mesh: Mesh) -> Self {
        SceneNode::Mesh(mesh)
    }
}

impl From<GridHelper> for SceneNode {
    fn from(grid: GridHelper) -> Self {
        SceneNode::Grid(grid)
    }
}

impl From<HemisphereLight> for SceneNode {
    fn from(light: HemisphereLight) -> Self {
        SceneNode::HemisphereLight(light)
    }
}

impl From<DirectionalLight> for SceneNode {
    fn from(light: DirectionalLight) -> Self {
        SceneNode::DirectionalLight(light)
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<(NodeId, SceneNode)>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under the root and returns its handle.
    pub fn add(&mut self, node: impl Into<SceneNode>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let node = node.into();
        log::trace!("scene: added {} {}", node.kind(), id);
        self.nodes.push((id, node));
        id
    }

    /// Detaches the node from the scene and hands it back to the caller.
    ///
    /// GPU resources are not released here; that is up to whoever receives the
    /// node (see [`Mesh::dispose`]).
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let idx = self.nodes.iter().position(|(node_id, _)| *node_id == id)?;
        let (_, node) = self.nodes.remove(idx);
        log::trace!("scene: removed {} {}", node.kind(), id);
        Some(node)
    }

    /// Like [`remove`](Self::remove), but only detaches meshes. Any other
    /// node under `id` stays where it is.
    pub fn remove_mesh(&mut self, id: NodeId) -> Option<Mesh> {
        self.mesh(id)?;
        match self.remove(id) {
            Some(SceneNode::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|(node_id, _)| *node_id == id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes
            .iter_mut()
            .find(|(node_id, _)| *node_id == id)
            .map(|(_, node)| node)
    }

    pub fn mesh(&self, id: NodeId) -> Option<&Mesh> {
        match self.get(id) {
            Some(SceneNode::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn mesh_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        match self.get_mut(id) {
            Some(SceneNode::Mesh(mesh)) => Some(mesh),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.iter().filter_map(|(id, node)| match node {
            SceneNode::Mesh(mesh) => Some((id, mesh)),
            _ => None,
        })
    }

    /// The first hemisphere light in the scene, if any.
    pub fn hemisphere_light(&self) -> Option<&HemisphereLight> {
        self.iter().find_map(|(_, node)| match node {
            SceneNode::HemisphereLight(light) => Some(light),
            _ => None,
        })
    }

    /// The first directional light in the scene, if any.
    pub fn directional_light(&self) -> Option<&DirectionalLight> {
        self.iter().find_map(|(_, node)| match node {
            SceneNode::DirectionalLight(light) => Some(light),
            _ => None,
        })
    }

    /// Uploads every node that has no GPU resources yet.
    pub fn write_to_buffers(
        &mut self,
        device: &wgpu::Device,
        material_layout: &wgpu::BindGroupLayout,
    ) {
        for (_, node) in self.nodes.iter_mut() {
            match node {
                SceneNode::Mesh(mesh) => mesh.upload(device, material_layout),
                SceneNode::Grid(grid) => grid.upload(device),
                SceneNode::HemisphereLight(_) | SceneNode::DirectionalLight(_) => (),
            }
        }
    }

    /// Collects everything drawable. Nodes that were not uploaded yet are skipped.
    pub fn get_render(&self) -> Render<'_> {
        let renders = self
            .nodes
            .iter()
            .map(|(_, node)| match node {
                SceneNode::Mesh(mesh) => match mesh.buffers() {
                    Some(buffers) => Render::Mesh(Drawn {
                        vertex: &buffers.vertex_buffer,
                        index: &buffers.index_buffer,
                        group: &buffers.material_bind_group,
                        amount: buffers.num_elements,
                        side: mesh.material.side,
                    }),
                    None => Render::None,
                },
                SceneNode::Grid(grid) => match grid.buffer() {
                    Some(vertex) => Render::Lines(Lines {
                        vertex,
                        amount: grid.vertex_count(),
                    }),
                    None => Render::None,
                },
                SceneNode::HemisphereLight(_) | SceneNode::DirectionalLight(_) => Render::None,
            })
            .collect();
        Render::Composed(renders)
    }
}
