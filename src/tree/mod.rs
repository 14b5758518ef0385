//! Animation Hierarchy
//!
//! Arena-based node hierarchy that the mixer writes blended poses into.
//!
//! - [`AnimationTree`]: contiguous node array with a name table and identity token
//! - [`AnimationNode`]: local transform, cached composed matrix, parent/children indices
//! - [`BuildNode`] / [`JointBuildNode`]: authoring inputs for the two build paths
//!
//! ```rust,ignore
//! use posemix::tree::{AnimationTree, BuildNode};
//!
//! let tree = AnimationTree::from_build_nodes(&[
//!     BuildNode::new("root").with_child(BuildNode::new("arm")),
//! ])?;
//! assert_eq!(tree.find_node_index("arm"), Some(1));
//! ```

pub mod animation_tree;
pub mod build;
pub mod name_table;
pub mod node;
pub mod transform;

pub use animation_tree::{AnimationTree, JointTransform, TreeId};
pub use build::{BuildNode, JointBuildNode};
pub use name_table::NodeNameTable;
pub use node::AnimationNode;
pub use transform::NodeTransform;
