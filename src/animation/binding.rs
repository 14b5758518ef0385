use uuid::Uuid;

use crate::animation::clip::KeyframeAnimation;
use crate::animation::direct::DirectAnimation;
use crate::tree::{AnimationTree, TreeId};

/// The component of a node transform a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationComponent {
    Translation,
    /// Quaternion stored as `(x, y, z, w)`.
    Rotation,
    Scale,
}

/// Identity of a prepared animation asset.
///
/// Generated once per asset and copied on clone, like [`TreeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(Uuid);

impl AnimationId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

/// Channel → node index mapping of one [`KeyframeAnimation`] for one tree.
///
/// Mirrors the asset layout: one slice per keyframe group, one slot per
/// channel. `None` marks a channel whose node does not exist in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframeNodeMap {
    animation: AnimationId,
    tree: TreeId,
    groups: Vec<Vec<Option<usize>>>,
    mapped: usize,
}

impl KeyframeNodeMap {
    /// Resolves every channel of `animation` against `tree`.
    #[must_use]
    pub fn resolve(animation: &KeyframeAnimation, tree: &AnimationTree) -> Self {
        let groups: Vec<Vec<Option<usize>>> = animation
            .keyframes()
            .iter()
            .map(|group| {
                group
                    .channels()
                    .iter()
                    .map(|channel| tree.find_node_index_by_id(channel.node_id()))
                    .collect()
            })
            .collect();
        let mapped = groups.iter().flatten().filter(|slot| slot.is_some()).count();

        Self {
            animation: animation.id(),
            tree: tree.id(),
            groups,
            mapped,
        }
    }

    #[inline]
    #[must_use]
    pub fn animation_id(&self) -> AnimationId {
        self.animation
    }

    #[inline]
    #[must_use]
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    /// Node slots for the channels of keyframe group `group`.
    #[inline]
    #[must_use]
    pub fn channel_nodes(&self, group: usize) -> &[Option<usize>] {
        self.groups.get(group).map_or(&[], Vec::as_slice)
    }

    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        self.mapped
    }

    #[must_use]
    pub fn unmapped_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum::<usize>() - self.mapped
    }
}

/// Channel → node index mapping of one [`DirectAnimation`] for one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectNodeMap {
    animation: AnimationId,
    tree: TreeId,
    channel_nodes: Vec<Option<usize>>,
    mapped: usize,
}

impl DirectNodeMap {
    #[must_use]
    pub fn resolve(animation: &DirectAnimation, tree: &AnimationTree) -> Self {
        let channel_nodes: Vec<Option<usize>> = animation
            .channels()
            .iter()
            .map(|channel| tree.find_node_index_by_id(channel.node_id()))
            .collect();
        let mapped = channel_nodes.iter().filter(|slot| slot.is_some()).count();

        Self {
            animation: animation.id(),
            tree: tree.id(),
            channel_nodes,
            mapped,
        }
    }

    #[inline]
    #[must_use]
    pub fn animation_id(&self) -> AnimationId {
        self.animation
    }

    #[inline]
    #[must_use]
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    #[inline]
    #[must_use]
    pub fn channel_nodes(&self) -> &[Option<usize>] {
        &self.channel_nodes
    }

    #[inline]
    #[must_use]
    pub fn mapped_count(&self) -> usize {
        self.mapped
    }

    #[must_use]
    pub fn unmapped_count(&self) -> usize {
        self.channel_nodes.len() - self.mapped
    }
}
