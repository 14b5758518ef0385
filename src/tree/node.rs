use glam::{Affine3A, Mat4};
use smallvec::SmallVec;

use crate::tree::transform::NodeTransform;
use crate::utils::interner::{self, Symbol};

/// Child index list. Most skeleton joints have at most a few children.
pub type ChildIndices = SmallVec<[usize; 4]>;

/// A node in an [`AnimationTree`](crate::tree::AnimationTree).
///
/// # Hierarchy
///
/// Parent and children are plain indices into the tree's node array. A child
/// index is always greater than its parent's index.
///
/// # Transform
///
/// - `transform`: the local pose, written by the mixer every frame
/// - `matrix`: cached composed transform relative to the tree root, refreshed
///   by [`AnimationTree::update_transforms`](crate::tree::AnimationTree::update_transforms)
#[derive(Debug, Clone)]
pub struct AnimationNode {
    pub(crate) name: Symbol,

    /// Local scale, rotation and translation.
    pub transform: NodeTransform,

    pub(crate) matrix: Affine3A,
    pub(crate) parent: Option<usize>,
    pub(crate) children: ChildIndices,
}

impl AnimationNode {
    pub(crate) fn new(
        name: Symbol,
        transform: NodeTransform,
        parent: Option<usize>,
        children: ChildIndices,
    ) -> Self {
        Self {
            name,
            transform,
            matrix: Affine3A::IDENTITY,
            parent,
            children,
        }
    }

    /// Returns the interned name identifier.
    #[inline]
    #[must_use]
    pub fn name_id(&self) -> Symbol {
        self.name
    }

    /// Returns the node name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        interner::resolve(self.name)
    }

    /// Returns the parent index, or `None` for root nodes.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Returns the cached composed matrix.
    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &Affine3A {
        &self.matrix
    }

    #[inline]
    #[must_use]
    pub fn matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.matrix)
    }
}
