use glam::{Mat3, Mat4};
use uuid::Uuid;

use crate::errors::{AnimationError, Result};
use crate::tree::build::{BuildNode, JointBuildNode};
use crate::tree::name_table::NodeNameTable;
use crate::tree::node::{AnimationNode, ChildIndices};
use crate::utils::interner::{self, Symbol};

/// Identity token of an [`AnimationTree`].
///
/// A fresh token is generated for every build and copied on clone. Node maps
/// record the token of the tree they were resolved against, so a map made for
/// one tree is never used for another tree of identical shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(Uuid);

impl TreeId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// Skinning transform for one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTransform {
    /// `node matrix * to_node_local_space`.
    pub transform: Mat4,
    /// Inverse transpose of the upper 3x3 of `transform`, for normals.
    pub inverse_transpose: Mat3,
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        transform: Mat4::IDENTITY,
        inverse_transpose: Mat3::IDENTITY,
    };
}

#[derive(Debug, Clone)]
struct JointData {
    to_node_local_space: Vec<Mat4>,
    joint_transforms: Vec<JointTransform>,
}

/// Hierarchy of animated nodes stored in a single contiguous array.
///
/// The shape (names, parents, children) is fixed at build time. Node poses are
/// mutated every frame by [`AnimationMixer::apply`](crate::animation::AnimationMixer::apply).
///
/// # Invariants
///
/// - Every child index is greater than its parent's index, so iterating the
///   node array in order visits parents before children.
/// - Node names are unique within a tree.
#[derive(Debug, Clone)]
pub struct AnimationTree {
    id: TreeId,
    nodes: Vec<AnimationNode>,
    root_nodes: Vec<usize>,
    name_table: NodeNameTable,
    joints: Option<JointData>,
}

impl AnimationTree {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Builds a tree from by-pointer authoring nodes.
    ///
    /// Nodes are flattened depth-first with parents before children. The
    /// resulting tree cannot be used for skinning.
    pub fn from_build_nodes(roots: &[BuildNode]) -> Result<Self> {
        if roots.is_empty() {
            return Err(AnimationError::InvalidArgument(
                "animation tree requires at least one root node".to_string(),
            ));
        }

        let node_count = roots.iter().map(BuildNode::subtree_len).sum();
        let mut nodes = Vec::with_capacity(node_count);
        let mut name_table = NodeNameTable::with_capacity(node_count);
        let mut root_nodes = Vec::with_capacity(roots.len());

        for root in roots {
            let index = flatten_build_node(root, None, &mut nodes, &mut name_table)?;
            root_nodes.push(index);
        }

        Ok(Self {
            id: TreeId::generate(),
            nodes,
            root_nodes,
            name_table,
            joints: None,
        })
    }

    /// Builds a skinning-capable tree from a flattened joint list.
    ///
    /// Node `i` of the tree is joint `i` of the input. Parents are derived from
    /// the child lists; nodes without a parent become roots.
    pub fn from_joints(joints: &[JointBuildNode]) -> Result<Self> {
        if joints.is_empty() {
            return Err(AnimationError::InvalidArgument(
                "animation tree requires at least one joint".to_string(),
            ));
        }

        let node_count = joints.len();
        let mut parents: Vec<Option<usize>> = vec![None; node_count];
        for (index, joint) in joints.iter().enumerate() {
            if joint.name.is_empty() {
                return Err(AnimationError::InvalidArgument(format!(
                    "joint {index} has an empty name"
                )));
            }

            for &child in &joint.children {
                if child >= node_count {
                    return Err(malformed(format!(
                        "child index {child} of joint '{}' is out of range (joint count {node_count})",
                        joint.name
                    )));
                }

                if child <= index {
                    return Err(malformed(format!(
                        "child '{}' must come after its parent '{}'",
                        joints[child].name, joint.name
                    )));
                }

                if parents[child].is_some() {
                    return Err(malformed(format!(
                        "multiple parents for animation joint '{}'",
                        joints[child].name
                    )));
                }

                parents[child] = Some(index);
            }
        }

        let mut nodes = Vec::with_capacity(node_count);
        let mut name_table = NodeNameTable::with_capacity(node_count);
        let mut root_nodes = Vec::new();
        for (index, (joint, parent)) in joints.iter().zip(parents).enumerate() {
            let name = interner::intern(&joint.name);
            if !name_table.insert(name, index) {
                return Err(malformed(format!(
                    "animation tree has multiple nodes named '{}'",
                    joint.name
                )));
            }

            if parent.is_none() {
                root_nodes.push(index);
            }

            let children: ChildIndices = joint.children.iter().copied().collect();
            nodes.push(AnimationNode::new(name, joint.transform, parent, children));
        }

        let joints = JointData {
            to_node_local_space: joints.iter().map(|j| j.to_node_local_space).collect(),
            joint_transforms: vec![JointTransform::IDENTITY; node_count],
        };

        Ok(Self {
            id: TreeId::generate(),
            nodes,
            root_nodes,
            name_table,
            joints: Some(joints),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn id(&self) -> TreeId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[AnimationNode] {
        &self.nodes
    }

    /// Mutable access to the node array.
    ///
    /// Only the local transforms are writable; the shape of the tree cannot be
    /// changed after it is built.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [AnimationNode] {
        &mut self.nodes
    }

    #[inline]
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&AnimationNode> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn node_mut(&mut self, index: usize) -> Option<&mut AnimationNode> {
        self.nodes.get_mut(index)
    }

    #[inline]
    #[must_use]
    pub fn root_nodes(&self) -> &[usize] {
        &self.root_nodes
    }

    #[inline]
    #[must_use]
    pub fn name_table(&self) -> &NodeNameTable {
        &self.name_table
    }

    /// Whether the tree was built from joints and carries skinning data.
    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.joints.is_some()
    }

    /// Inverse bind matrices, parallel to the node array. Joint trees only.
    #[must_use]
    pub fn to_node_local_space(&self) -> Option<&[Mat4]> {
        self.joints.as_ref().map(|j| j.to_node_local_space.as_slice())
    }

    /// Skinning transforms, parallel to the node array. Joint trees only.
    #[must_use]
    pub fn joint_transforms(&self) -> Option<&[JointTransform]> {
        self.joints.as_ref().map(|j| j.joint_transforms.as_slice())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Finds a node index by name. Unknown names return `None`.
    #[inline]
    #[must_use]
    pub fn find_node_index(&self, name: &str) -> Option<usize> {
        self.name_table.find(name)
    }

    /// Finds a node index by interned name identifier.
    #[inline]
    #[must_use]
    pub fn find_node_index_by_id(&self, name: Symbol) -> Option<usize> {
        self.name_table.get(name)
    }

    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<&AnimationNode> {
        self.find_node_index(name).map(|index| &self.nodes[index])
    }

    pub fn find_node_mut(&mut self, name: &str) -> Option<&mut AnimationNode> {
        let index = self.find_node_index(name)?;
        self.nodes.get_mut(index)
    }

    // ========================================================================
    // Transform propagation
    // ========================================================================

    /// Recomputes every node's composed matrix from the local poses.
    ///
    /// For joint trees the skinning transforms are refreshed as well. A joint
    /// whose matrix is singular (e.g. scaled to zero) keeps its previous
    /// normals matrix.
    pub fn update_transforms(&mut self) {
        for index in 0..self.nodes.len() {
            let local = self.nodes[index].transform.local_matrix();
            let matrix = match self.nodes[index].parent {
                Some(parent) => self.nodes[parent].matrix * local,
                None => local,
            };
            self.nodes[index].matrix = matrix;
        }

        if let Some(JointData {
            to_node_local_space,
            joint_transforms,
        }) = &mut self.joints
        {
            for ((joint, node), to_local) in joint_transforms
                .iter_mut()
                .zip(&self.nodes)
                .zip(to_node_local_space.iter())
            {
                let transform = node.matrix_as_mat4() * *to_local;
                joint.transform = transform;

                // Zero-scaled joints have no inverse; keep the last normals matrix.
                let linear = Mat3::from_mat4(transform);
                if linear.determinant().abs() > f32::MIN_POSITIVE {
                    joint.inverse_transpose = linear.inverse().transpose();
                }
            }
        }
    }
}

fn malformed(message: String) -> AnimationError {
    log::error!("Rejected animation hierarchy: {message}");
    AnimationError::MalformedHierarchy(message)
}

fn flatten_build_node(
    build: &BuildNode,
    parent: Option<usize>,
    nodes: &mut Vec<AnimationNode>,
    name_table: &mut NodeNameTable,
) -> Result<usize> {
    if build.name.is_empty() {
        return Err(AnimationError::InvalidArgument(
            "animation build node has an empty name".to_string(),
        ));
    }

    let index = nodes.len();
    let name = interner::intern(&build.name);
    if !name_table.insert(name, index) {
        return Err(malformed(format!(
            "animation tree has multiple nodes named '{}'",
            build.name
        )));
    }

    nodes.push(AnimationNode::new(
        name,
        build.transform,
        parent,
        ChildIndices::with_capacity(build.children.len()),
    ));

    for child in &build.children {
        let child_index = flatten_build_node(child, Some(index), nodes, name_table)?;
        nodes[index].children.push(child_index);
    }

    Ok(index)
}
