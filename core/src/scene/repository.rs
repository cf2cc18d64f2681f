use crate::error::{Result, SnsimError};
use crate::types::VolumeGeometry;
use log::debug;
use nalgebra::Matrix4;
use std::collections::{HashMap, HashSet};

/// Payload of a scene node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Linear transform relative to the parent
    Transform { matrix: Matrix4<f64> },
    /// CT or DRR volume
    Volume { geometry: VolumeGeometry },
    /// Surface model display settings
    Model {
        color: [f64; 3],
        opacity: f64,
        visible: bool,
    },
}

impl NodeKind {
    /// Identity transform payload
    pub fn identity_transform() -> Self {
        NodeKind::Transform {
            matrix: Matrix4::identity(),
        }
    }

    /// Short name of the kind, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Transform { .. } => "transform",
            NodeKind::Volume { .. } => "volume",
            NodeKind::Model { .. } => "model",
        }
    }
}

/// Named scene node with an optional parent transform
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<String>,
}

impl SceneNode {
    /// Creates a new SceneNode without a parent
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
        }
    }

    /// Local matrix if this node is a transform
    pub fn matrix(&self) -> Option<&Matrix4<f64>> {
        match &self.kind {
            NodeKind::Transform { matrix } => Some(matrix),
            _ => None,
        }
    }
}

/// Named node registry
///
/// Lookups return `Option` instead of failing, and `create_or_get` makes the
/// get-or-create pattern explicit. The provided methods implement transform
/// tree queries on top of the four required ones.
pub trait SceneRepository {
    /// Looks up a node by name
    fn find(&self, name: &str) -> Option<&SceneNode>;

    /// Looks up a node by name for modification
    fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode>;

    /// Returns the named node, inserting `default` first if it is missing
    fn create_or_get(&mut self, name: &str, default: NodeKind) -> &mut SceneNode;

    /// Removes a node, returning it if it existed
    fn remove(&mut self, name: &str) -> Option<SceneNode>;

    /// Returns the named transform, creating an identity transform if missing
    fn get_or_create_transform(&mut self, name: &str) -> &mut SceneNode {
        self.create_or_get(name, NodeKind::identity_transform())
    }

    /// Returns whether a node exists
    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Observes `parent` from `child`, or detaches `child` when `parent` is `None`
    ///
    /// # Errors
    ///
    /// Fails if either node is missing or the parent is not a transform
    fn set_parent(&mut self, child: &str, parent: Option<&str>) -> Result<()> {
        if let Some(parent_name) = parent {
            let parent_node = self
                .find(parent_name)
                .ok_or_else(|| SnsimError::NodeNotFound(parent_name.to_string()))?;
            if parent_node.matrix().is_none() {
                return Err(SnsimError::NodeKindMismatch {
                    name: parent_name.to_string(),
                    expected: "transform",
                });
            }
        }

        let node = self
            .find_mut(child)
            .ok_or_else(|| SnsimError::NodeNotFound(child.to_string()))?;
        node.parent = parent.map(str::to_string);
        Ok(())
    }

    /// Local matrix of a transform node
    fn local_matrix(&self, name: &str) -> Result<Matrix4<f64>> {
        let node = self
            .find(name)
            .ok_or_else(|| SnsimError::NodeNotFound(name.to_string()))?;
        node.matrix()
            .copied()
            .ok_or_else(|| SnsimError::NodeKindMismatch {
                name: name.to_string(),
                expected: "transform",
            })
    }

    /// Replaces the local matrix of a transform node
    fn set_matrix(&mut self, name: &str, matrix: Matrix4<f64>) -> Result<()> {
        let node = self
            .find_mut(name)
            .ok_or_else(|| SnsimError::NodeNotFound(name.to_string()))?;
        match &mut node.kind {
            NodeKind::Transform { matrix: current } => {
                *current = matrix;
                Ok(())
            }
            _ => Err(SnsimError::NodeKindMismatch {
                name: name.to_string(),
                expected: "transform",
            }),
        }
    }

    /// Resets a transform node to identity
    fn make_identity(&mut self, name: &str) -> Result<()> {
        self.set_matrix(name, Matrix4::identity())
    }

    /// Transform from the node's frame to world coordinates
    ///
    /// Transforms contribute their own matrix; other nodes inherit their
    /// parent's world matrix, or identity at the root.
    ///
    /// # Errors
    ///
    /// Fails on missing nodes or a parent cycle
    fn world_matrix(&self, name: &str) -> Result<Matrix4<f64>> {
        let mut visited = HashSet::new();
        let mut world = Matrix4::identity();
        let mut current = Some(name.to_string());

        while let Some(node_name) = current {
            if !visited.insert(node_name.clone()) {
                return Err(SnsimError::TransformCycle(node_name));
            }
            let node = self
                .find(&node_name)
                .ok_or_else(|| SnsimError::NodeNotFound(node_name.clone()))?;
            if let Some(matrix) = node.matrix() {
                world = matrix * world;
            }
            current = node.parent.clone();
        }

        Ok(world)
    }

    /// Bakes the world matrix into a transform node and detaches it
    fn harden(&mut self, name: &str) -> Result<()> {
        let world = self.world_matrix(name)?;
        self.set_matrix(name, world)?;
        self.set_parent(name, None)
    }

    /// Geometry of a volume node
    fn volume_geometry(&self, name: &str) -> Result<VolumeGeometry> {
        match self.find(name).map(|node| &node.kind) {
            Some(NodeKind::Volume { geometry }) => Ok(*geometry),
            Some(_) => Err(SnsimError::NodeKindMismatch {
                name: name.to_string(),
                expected: "volume",
            }),
            None => Err(SnsimError::NodeNotFound(name.to_string())),
        }
    }
}

/// In-process scene registry
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    nodes: HashMap<String, SceneNode>,
}

impl InMemoryScene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a node, returning the previous one
    pub fn insert(&mut self, node: SceneNode) -> Option<SceneNode> {
        self.nodes.insert(node.name.clone(), node)
    }

    /// Node names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneRepository for InMemoryScene {
    fn find(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.get(name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.get_mut(name)
    }

    fn create_or_get(&mut self, name: &str, default: NodeKind) -> &mut SceneNode {
        self.nodes.entry(name.to_string()).or_insert_with(|| {
            debug!("Node {} not found, creating {}", name, default.kind_name());
            SceneNode::new(name, default)
        })
    }

    fn remove(&mut self, name: &str) -> Option<SceneNode> {
        self.nodes.remove(name)
    }
}
