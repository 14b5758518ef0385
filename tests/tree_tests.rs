//! Animation Tree Tests
//!
//! Tests for:
//! - Flattening by-pointer build nodes (pre-order, parents before children)
//! - Joint list validation (ordering, ranges, parents, names)
//! - Name lookup and tree identity
//! - Transform propagation and joint transforms

use std::f32::consts::FRAC_PI_2;

use glam::{Affine3A, Mat3, Mat4, Quat, Vec3};

use posemix::errors::AnimationError;
use posemix::tree::{AnimationTree, BuildNode, JointBuildNode, NodeTransform};

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

/// root
/// ├── spine
/// │   └── head
/// └── hips
fn humanoid() -> Vec<BuildNode> {
    vec![
        BuildNode::new("tree_root")
            .with_child(BuildNode::new("tree_spine").with_child(BuildNode::new("tree_head")))
            .with_child(BuildNode::new("tree_hips")),
    ]
}

// ============================================================================
// Build nodes
// ============================================================================

#[test]
fn build_nodes_flatten_in_pre_order() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&humanoid())?;

    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.root_nodes(), &[0]);
    assert_eq!(tree.find_node_index("tree_root"), Some(0));
    assert_eq!(tree.find_node_index("tree_spine"), Some(1));
    assert_eq!(tree.find_node_index("tree_head"), Some(2));
    assert_eq!(tree.find_node_index("tree_hips"), Some(3));

    assert_eq!(tree.nodes()[0].children(), &[1, 3]);
    assert_eq!(tree.nodes()[1].children(), &[2]);
    assert_eq!(tree.nodes()[2].parent(), Some(1));
    assert_eq!(tree.nodes()[3].parent(), Some(0));
    assert!(!tree.is_skinned());
    Ok(())
}

#[test]
fn build_nodes_parents_precede_children() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&humanoid())?;

    for (index, node) in tree.nodes().iter().enumerate() {
        if let Some(parent) = node.parent() {
            assert!(parent < index);
        }
        for &child in node.children() {
            assert!(child > index);
            assert_eq!(tree.nodes()[child].parent(), Some(index));
        }
    }
    Ok(())
}

#[test]
fn build_nodes_multiple_roots() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&[
        BuildNode::new("multi_a").with_child(BuildNode::new("multi_a_child")),
        BuildNode::new("multi_b"),
    ])?;

    assert_eq!(tree.root_nodes(), &[0, 2]);
    assert_eq!(tree.nodes()[2].parent(), None);
    Ok(())
}

#[test]
fn build_nodes_keep_authored_transforms() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&[BuildNode::new("authored")
        .with_translation(Vec3::new(1.0, 2.0, 3.0))
        .with_scale(Vec3::splat(2.0))])?;

    let node = &tree.nodes()[0];
    assert_eq!(node.name(), "authored");
    assert_eq!(node.transform.translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(node.transform.scale, Vec3::splat(2.0));
    assert_eq!(node.transform.rotation, Quat::IDENTITY);
    Ok(())
}

#[test]
fn build_nodes_empty_input_is_invalid() {
    let err = AnimationTree::from_build_nodes(&[]).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidArgument(_)));
}

#[test]
fn build_nodes_empty_name_is_invalid() {
    let err = AnimationTree::from_build_nodes(&[BuildNode::new("")]).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidArgument(_)));
}

#[test]
fn build_nodes_duplicate_names_are_rejected() {
    let roots = [BuildNode::new("dup_root").with_child(BuildNode::new("dup_root"))];
    let err = AnimationTree::from_build_nodes(&roots).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

// ============================================================================
// Joint lists
// ============================================================================

fn joint_chain() -> Vec<JointBuildNode> {
    vec![
        JointBuildNode::new("joint_pelvis").with_children([1, 3]),
        JointBuildNode::new("joint_spine").with_children([2]),
        JointBuildNode::new("joint_neck"),
        JointBuildNode::new("joint_thigh"),
    ]
}

#[test]
fn joints_preserve_order_and_derive_parents() -> anyhow::Result<()> {
    let tree = AnimationTree::from_joints(&joint_chain())?;

    assert!(tree.is_skinned());
    assert_eq!(tree.node_count(), 4);
    assert_eq!(tree.root_nodes(), &[0]);
    assert_eq!(tree.find_node_index("joint_neck"), Some(2));
    assert_eq!(tree.nodes()[2].parent(), Some(1));
    assert_eq!(tree.nodes()[3].parent(), Some(0));
    assert_eq!(tree.to_node_local_space().map(<[Mat4]>::len), Some(4));
    assert_eq!(tree.joint_transforms().map(<[_]>::len), Some(4));
    Ok(())
}

#[test]
fn joints_unparented_nodes_become_roots() -> anyhow::Result<()> {
    let tree = AnimationTree::from_joints(&[
        JointBuildNode::new("loose_a"),
        JointBuildNode::new("loose_b"),
    ])?;
    assert_eq!(tree.root_nodes(), &[0, 1]);
    Ok(())
}

#[test]
fn joints_child_before_parent_is_rejected() {
    let joints = [
        JointBuildNode::new("order_child"),
        JointBuildNode::new("order_parent").with_children([0]),
    ];
    let err = AnimationTree::from_joints(&joints).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

#[test]
fn joints_self_parent_is_rejected() {
    let joints = [JointBuildNode::new("self_parent").with_children([0])];
    let err = AnimationTree::from_joints(&joints).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

#[test]
fn joints_child_out_of_range_is_rejected() {
    let joints = [JointBuildNode::new("range_root").with_children([5])];
    let err = AnimationTree::from_joints(&joints).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

#[test]
fn joints_multiple_parents_are_rejected() {
    let joints = [
        JointBuildNode::new("mp_a").with_children([2]),
        JointBuildNode::new("mp_b").with_children([2]),
        JointBuildNode::new("mp_shared"),
    ];
    let err = AnimationTree::from_joints(&joints).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

#[test]
fn joints_duplicate_names_are_rejected() {
    let joints = [
        JointBuildNode::new("joint_twin").with_children([1]),
        JointBuildNode::new("joint_twin"),
    ];
    let err = AnimationTree::from_joints(&joints).unwrap_err();
    assert!(matches!(err, AnimationError::MalformedHierarchy(_)));
}

#[test]
fn joints_empty_input_is_invalid() {
    let err = AnimationTree::from_joints(&[]).unwrap_err();
    assert!(matches!(err, AnimationError::InvalidArgument(_)));
}

// ============================================================================
// Lookup and identity
// ============================================================================

#[test]
fn find_node_unknown_name_returns_none() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&humanoid())?;

    assert_eq!(tree.find_node_index("lookup_name_nobody_uses"), None);
    assert!(tree.find_node("lookup_name_nobody_uses").is_none());
    // Lookups must not grow the interner.
    assert!(posemix::interner::get("lookup_name_nobody_uses").is_none());
    Ok(())
}

#[test]
fn find_node_returns_named_node() -> anyhow::Result<()> {
    let mut tree = AnimationTree::from_build_nodes(&humanoid())?;

    for node in tree.nodes() {
        assert_eq!(tree.find_node_index(node.name()).map(|i| tree.nodes()[i].name()), Some(node.name()));
    }

    let head = tree.find_node_mut("tree_head").ok_or_else(|| anyhow::anyhow!("missing head"))?;
    head.transform.translation = Vec3::X;
    assert_eq!(tree.nodes()[2].transform.translation, Vec3::X);
    Ok(())
}

#[test]
fn clone_keeps_identity_rebuild_does_not() -> anyhow::Result<()> {
    let tree = AnimationTree::from_build_nodes(&humanoid())?;
    let clone = tree.clone();
    let rebuilt = AnimationTree::from_build_nodes(&humanoid())?;

    assert_eq!(tree.id(), clone.id());
    assert_ne!(tree.id(), rebuilt.id());
    Ok(())
}

// ============================================================================
// Transform propagation
// ============================================================================

#[test]
fn update_transforms_composes_parent_first() -> anyhow::Result<()> {
    let mut tree = AnimationTree::from_build_nodes(&[BuildNode::new("xf_root")
        .with_translation(Vec3::new(1.0, 0.0, 0.0))
        .with_rotation(Quat::from_rotation_z(FRAC_PI_2))
        .with_child(BuildNode::new("xf_child").with_translation(Vec3::new(2.0, 0.0, 0.0)))])?;

    tree.update_transforms();

    let child_world = tree.nodes()[1].matrix().translation;
    // Rotating (2, 0, 0) by 90° around Z gives (0, 2, 0), then offset by (1, 0, 0).
    assert!(vec3_approx(child_world.into(), Vec3::new(1.0, 2.0, 0.0)));
    Ok(())
}

#[test]
fn update_transforms_reflects_pose_changes() -> anyhow::Result<()> {
    let mut tree = AnimationTree::from_build_nodes(&humanoid())?;
    tree.update_transforms();
    assert_eq!(*tree.nodes()[2].matrix(), Affine3A::IDENTITY);

    tree.nodes_mut()[0].transform = NodeTransform::from_translation(Vec3::Y);
    tree.update_transforms();

    let head: Vec3 = tree.nodes()[2].matrix().translation.into();
    assert!(vec3_approx(head, Vec3::Y));
    Ok(())
}

#[test]
fn joint_transforms_apply_to_node_local_space() -> anyhow::Result<()> {
    let inverse_bind = Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0));
    let mut tree = AnimationTree::from_joints(&[
        JointBuildNode::new("skin_root")
            .with_transform(NodeTransform::from_translation(Vec3::new(0.0, 1.0, 0.0)))
            .with_to_node_local_space(inverse_bind)
            .with_children([1]),
        JointBuildNode::new("skin_tip").with_transform(NodeTransform {
            scale: Vec3::new(2.0, 1.0, 1.0),
            ..NodeTransform::IDENTITY
        }),
    ])?;

    tree.update_transforms();
    let joints = tree.joint_transforms().ok_or_else(|| anyhow::anyhow!("not skinned"))?;

    // The bind pose cancels out for the root.
    assert!(joints[0].transform.abs_diff_eq(Mat4::IDENTITY, EPSILON));
    assert!(joints[0].inverse_transpose.abs_diff_eq(Mat3::IDENTITY, EPSILON));

    let expected = Mat3::from_diagonal(Vec3::new(0.5, 1.0, 1.0));
    assert!(joints[1].inverse_transpose.abs_diff_eq(expected, EPSILON));
    Ok(())
}

#[test]
fn zero_scaled_joint_keeps_finite_normals_matrix() -> anyhow::Result<()> {
    let mut tree = AnimationTree::from_joints(&[
        JointBuildNode::new("hidden_root").with_children([1]),
        JointBuildNode::new("hidden_limb").with_transform(NodeTransform {
            scale: Vec3::ZERO,
            ..NodeTransform::IDENTITY
        }),
    ])?;

    tree.update_transforms();
    let joints = tree.joint_transforms().ok_or_else(|| anyhow::anyhow!("not skinned"))?;
    assert!(joints[1].inverse_transpose.is_finite());
    assert_eq!(joints[1].inverse_transpose, Mat3::IDENTITY);

    // Scaling back up refreshes the normals matrix again.
    tree.nodes_mut()[1].transform.scale = Vec3::new(4.0, 1.0, 1.0);
    tree.update_transforms();
    let joints = tree.joint_transforms().ok_or_else(|| anyhow::anyhow!("not skinned"))?;
    let expected = Mat3::from_diagonal(Vec3::new(0.25, 1.0, 1.0));
    assert!(joints[1].inverse_transpose.abs_diff_eq(expected, EPSILON));
    Ok(())
}

#[test]
fn node_transform_matrix_roundtrip() {
    let transform = NodeTransform::new(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_rotation_y(0.7),
        Vec3::new(-4.0, 5.0, 6.0),
    );
    let decomposed = NodeTransform::from_matrix(&transform.local_matrix());

    assert!(vec3_approx(decomposed.scale, transform.scale));
    assert!(vec3_approx(decomposed.translation, transform.translation));
    assert!(decomposed.rotation.abs_diff_eq(transform.rotation, EPSILON));
}

#[test]
fn node_transform_look_at_collinear_up_is_noop() {
    let mut transform = NodeTransform::IDENTITY;
    transform.look_at(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
    assert_eq!(transform.rotation, Quat::IDENTITY);
}
