use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::animation::binding::{AnimationId, DirectNodeMap, KeyframeNodeMap};
use crate::animation::clip::KeyframeAnimation;
use crate::animation::direct::DirectAnimation;
use crate::tree::{AnimationTree, TreeId};

type MapKey = (TreeId, AnimationId);

/// Cache of resolved node maps, keyed by (tree identity, asset identity).
///
/// Resolving a name per channel per frame is replaced by one lookup the first
/// time an asset meets a tree. Maps are built outside the lock and published
/// whole, so readers never see a partially resolved map. Two threads racing on
/// the same pair both compute the same map; the first one published is kept.
///
/// Cloned trees share their identity, so every instance cloned from one
/// template reuses the same maps.
#[derive(Debug, Default)]
pub struct NodeMapCache {
    keyframe_maps: RwLock<FxHashMap<MapKey, Arc<KeyframeNodeMap>>>,
    direct_maps: RwLock<FxHashMap<MapKey, Arc<DirectNodeMap>>>,
}

impl NodeMapCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node map of `animation` for `tree`, resolving it on first use.
    pub fn resolve_keyframe(
        &self,
        tree: &AnimationTree,
        animation: &KeyframeAnimation,
    ) -> Arc<KeyframeNodeMap> {
        let key = (tree.id(), animation.id());
        if let Some(map) = self.keyframe_maps.read().get(&key) {
            return Arc::clone(map);
        }

        let map = KeyframeNodeMap::resolve(animation, tree);
        log_resolution(animation.name(), map.mapped_count(), map.unmapped_count());

        let mut maps = self.keyframe_maps.write();
        Arc::clone(maps.entry(key).or_insert_with(|| Arc::new(map)))
    }

    /// Returns the node map of `animation` for `tree`, resolving it on first use.
    pub fn resolve_direct(
        &self,
        tree: &AnimationTree,
        animation: &DirectAnimation,
    ) -> Arc<DirectNodeMap> {
        let key = (tree.id(), animation.id());
        if let Some(map) = self.direct_maps.read().get(&key) {
            return Arc::clone(map);
        }

        let map = DirectNodeMap::resolve(animation, tree);
        log_resolution(animation.name(), map.mapped_count(), map.unmapped_count());

        let mut maps = self.direct_maps.write();
        Arc::clone(maps.entry(key).or_insert_with(|| Arc::new(map)))
    }

    /// Looks up an already resolved keyframe map without resolving.
    #[must_use]
    pub fn get_keyframe(&self, tree: TreeId, animation: AnimationId) -> Option<Arc<KeyframeNodeMap>> {
        self.keyframe_maps.read().get(&(tree, animation)).cloned()
    }

    /// Looks up an already resolved direct map without resolving.
    #[must_use]
    pub fn get_direct(&self, tree: TreeId, animation: AnimationId) -> Option<Arc<DirectNodeMap>> {
        self.direct_maps.read().get(&(tree, animation)).cloned()
    }

    /// Drops every map resolved for `tree`. Returns how many were removed.
    ///
    /// Mixers holding a map keep their `Arc` alive until they release it.
    pub fn remove_tree(&self, tree: TreeId) -> usize {
        let mut removed = 0;

        let mut keyframe_maps = self.keyframe_maps.write();
        let before = keyframe_maps.len();
        keyframe_maps.retain(|(tree_id, _), _| *tree_id != tree);
        removed += before - keyframe_maps.len();
        drop(keyframe_maps);

        let mut direct_maps = self.direct_maps.write();
        let before = direct_maps.len();
        direct_maps.retain(|(tree_id, _), _| *tree_id != tree);
        removed += before - direct_maps.len();

        removed
    }

    /// Drops every map resolved for `animation`. Returns how many were removed.
    pub fn remove_animation(&self, animation: AnimationId) -> usize {
        let mut removed = 0;

        let mut keyframe_maps = self.keyframe_maps.write();
        let before = keyframe_maps.len();
        keyframe_maps.retain(|(_, animation_id), _| *animation_id != animation);
        removed += before - keyframe_maps.len();
        drop(keyframe_maps);

        let mut direct_maps = self.direct_maps.write();
        let before = direct_maps.len();
        direct_maps.retain(|(_, animation_id), _| *animation_id != animation);
        removed += before - direct_maps.len();

        removed
    }

    /// Total number of cached maps (keyframe and direct).
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframe_maps.read().len() + self.direct_maps.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.keyframe_maps.write().clear();
        self.direct_maps.write().clear();
    }
}

fn log_resolution(animation: &str, mapped: usize, unmapped: usize) {
    if mapped == 0 && unmapped > 0 {
        log::warn!("Animation '{animation}' targets none of the nodes in the tree ({unmapped} channels)");
    } else {
        log::debug!("Resolved node map for '{animation}': {mapped} mapped, {unmapped} unmapped");
    }
}
