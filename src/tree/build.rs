use glam::{Mat4, Quat, Vec3};

use crate::tree::transform::NodeTransform;

/// Authoring-time node of a by-pointer hierarchy.
///
/// Trees built from these nodes carry no skinning data. The hierarchy is
/// flattened depth-first, parents before children, when the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildNode {
    pub name: String,
    pub transform: NodeTransform,
    pub children: Vec<BuildNode>,
}

impl BuildNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: NodeTransform::IDENTITY,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: BuildNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(BuildNode::subtree_len).sum::<usize>()
    }
}

/// Node of a flattened joint list used for skinning-capable trees.
///
/// Order and indices are preserved when the tree is built, so joint `i` of
/// the mesh skin is node `i` of the tree. Every child index must be greater
/// than the index of the node that lists it.
#[derive(Debug, Clone, PartialEq)]
pub struct JointBuildNode {
    pub name: String,
    pub transform: NodeTransform,

    /// Transform from model space into the joint's local space
    /// (the inverse bind matrix).
    pub to_node_local_space: Mat4,

    pub children: Vec<usize>,
}

impl JointBuildNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: NodeTransform::IDENTITY,
            to_node_local_space: Mat4::IDENTITY,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_to_node_local_space(mut self, matrix: Mat4) -> Self {
        self.to_node_local_space = matrix;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = usize>) -> Self {
        self.children.extend(children);
        self
    }
}
