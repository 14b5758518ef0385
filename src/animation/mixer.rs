use std::sync::Arc;

use glam::{Quat, Vec4};

use crate::animation::action::{DirectEntry, KeyframeEntry, WrapMode};
use crate::animation::binder::NodeMapCache;
use crate::animation::binding::{AnimationComponent, AnimationId, DirectNodeMap, KeyframeNodeMap};
use crate::animation::clip::KeyframeAnimation;
use crate::animation::direct::DirectAnimation;
use crate::errors::{AnimationError, Result};
use crate::settings::AnimationSettings;
use crate::tree::{AnimationTree, NodeTransform, TreeId};

/// Running per-component sums for one node during an apply.
#[derive(Debug, Clone, Copy, Default)]
struct WeightedTransform {
    translation: Vec4,
    rotation: Vec4,
    scale: Vec4,
    translation_weight: f32,
    rotation_weight: f32,
    scale_weight: f32,
}

impl WeightedTransform {
    #[inline]
    fn accumulate(&mut self, component: AnimationComponent, value: Vec4, weight: f32) {
        let weighted = value * weight;
        match component {
            AnimationComponent::Translation => {
                self.translation += weighted;
                self.translation_weight += weight;
            }
            AnimationComponent::Rotation => {
                self.rotation += weighted;
                self.rotation_weight += weight;
            }
            AnimationComponent::Scale => {
                self.scale += weighted;
                self.scale_weight += weight;
            }
        }
    }

    /// Writes the weighted averages of every component that received any weight.
    fn write_to(&self, transform: &mut NodeTransform) {
        if self.translation_weight > 0.0 {
            transform.translation = (self.translation / self.translation_weight).truncate();
        }

        if self.rotation_weight > 0.0 {
            let average = self.rotation / self.rotation_weight;
            // Opposite quaternions can cancel out; keep the previous rotation then.
            if let Some(unit) = average.try_normalize() {
                transform.rotation = Quat::from_vec4(unit);
            }
        }

        if self.scale_weight > 0.0 {
            transform.scale = (self.scale / self.scale_weight).truncate();
        }
    }
}

#[inline]
fn contributes(weight: f32) -> bool {
    weight > 0.0
}

/// Blends any number of keyframe and direct animations into one tree.
///
/// A mixer is bound to the identity of the tree it was created for. Every frame:
///
/// 1. [`update`](Self::update) advances each keyframe entry's clock.
/// 2. [`apply`](Self::apply) evaluates all entries, averages their values per
///    node and per component by weight, and writes the result into the tree.
///
/// Entry order carries no meaning; only the weights matter.
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    tree: TreeId,
    settings: AnimationSettings,
    keyframe_entries: Vec<KeyframeEntry>,
    direct_entries: Vec<DirectEntry>,
    scratch: Vec<WeightedTransform>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(tree: &AnimationTree) -> Self {
        Self::with_settings(tree, AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(tree: &AnimationTree, settings: AnimationSettings) -> Self {
        Self {
            tree: tree.id(),
            keyframe_entries: Vec::with_capacity(settings.entry_capacity),
            direct_entries: Vec::with_capacity(settings.entry_capacity),
            scratch: Vec::with_capacity(tree.node_count()),
            settings,
        }
    }

    /// Identity of the tree this mixer is bound to.
    #[inline]
    #[must_use]
    pub fn tree_id(&self) -> TreeId {
        self.tree
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AnimationSettings) {
        self.settings = settings;
    }

    // ========================================================================
    // Keyframe entries
    // ========================================================================

    /// Adds a keyframe animation with an already resolved node map.
    ///
    /// Fails with [`AnimationError::InvalidBinding`] if the node map belongs to
    /// another animation or tree, and with [`AnimationError::DuplicateEntry`]
    /// if the animation is already present.
    pub fn add_keyframe_entry(
        &mut self,
        animation: Arc<KeyframeAnimation>,
        node_map: Arc<KeyframeNodeMap>,
        weight: f32,
        time: f64,
        time_scale: f64,
        wrap: WrapMode,
    ) -> Result<()> {
        if node_map.animation_id() != animation.id() {
            return Err(AnimationError::InvalidBinding(format!(
                "node map was resolved for a different animation than '{}'",
                animation.name()
            )));
        }
        if node_map.tree_id() != self.tree {
            return Err(AnimationError::InvalidBinding(format!(
                "node map for '{}' was resolved against a different tree",
                animation.name()
            )));
        }
        if self.find_keyframe_entry(animation.id()).is_some() {
            return Err(AnimationError::DuplicateEntry(format!(
                "keyframe animation '{}' is already in the mixer",
                animation.name()
            )));
        }

        self.keyframe_entries.push(KeyframeEntry::new(
            animation, node_map, weight, time, time_scale, wrap,
        ));
        Ok(())
    }

    /// Resolves the node map through `cache` and adds the animation.
    pub fn add_keyframe_animation(
        &mut self,
        cache: &NodeMapCache,
        tree: &AnimationTree,
        animation: Arc<KeyframeAnimation>,
        weight: f32,
        time: f64,
        time_scale: f64,
        wrap: WrapMode,
    ) -> Result<()> {
        self.check_bound_tree(tree)?;
        if self.find_keyframe_entry(animation.id()).is_some() {
            return Err(AnimationError::DuplicateEntry(format!(
                "keyframe animation '{}' is already in the mixer",
                animation.name()
            )));
        }

        let node_map = cache.resolve_keyframe(tree, &animation);
        self.add_keyframe_entry(animation, node_map, weight, time, time_scale, wrap)
    }

    /// Removes a keyframe animation, returning its entry.
    ///
    /// The last entry takes the removed entry's slot.
    pub fn remove_keyframe_entry(&mut self, animation: AnimationId) -> Option<KeyframeEntry> {
        let index = self
            .keyframe_entries
            .iter()
            .position(|entry| entry.animation().id() == animation)?;
        Some(self.keyframe_entries.swap_remove(index))
    }

    #[must_use]
    pub fn find_keyframe_entry(&self, animation: AnimationId) -> Option<&KeyframeEntry> {
        self.keyframe_entries
            .iter()
            .find(|entry| entry.animation().id() == animation)
    }

    pub fn find_keyframe_entry_mut(&mut self, animation: AnimationId) -> Option<&mut KeyframeEntry> {
        self.keyframe_entries
            .iter_mut()
            .find(|entry| entry.animation().id() == animation)
    }

    #[inline]
    #[must_use]
    pub fn keyframe_entries(&self) -> &[KeyframeEntry] {
        &self.keyframe_entries
    }

    #[inline]
    pub fn keyframe_entries_mut(&mut self) -> &mut [KeyframeEntry] {
        &mut self.keyframe_entries
    }

    // ========================================================================
    // Direct entries
    // ========================================================================

    /// Adds a direct animation with an already resolved node map.
    pub fn add_direct_entry(
        &mut self,
        animation: Arc<DirectAnimation>,
        node_map: Arc<DirectNodeMap>,
        weight: f32,
    ) -> Result<()> {
        if node_map.animation_id() != animation.id() {
            return Err(AnimationError::InvalidBinding(
                "node map was resolved for a different direct animation".to_string(),
            ));
        }
        if node_map.tree_id() != self.tree {
            return Err(AnimationError::InvalidBinding(
                "direct node map was resolved against a different tree".to_string(),
            ));
        }
        if self.find_direct_entry(animation.id()).is_some() {
            return Err(AnimationError::DuplicateEntry(
                "direct animation is already in the mixer".to_string(),
            ));
        }

        self.direct_entries
            .push(DirectEntry::new(animation, node_map, weight));
        Ok(())
    }

    /// Resolves the node map through `cache` and adds the direct animation.
    pub fn add_direct_animation(
        &mut self,
        cache: &NodeMapCache,
        tree: &AnimationTree,
        animation: Arc<DirectAnimation>,
        weight: f32,
    ) -> Result<()> {
        self.check_bound_tree(tree)?;
        if self.find_direct_entry(animation.id()).is_some() {
            return Err(AnimationError::DuplicateEntry(
                "direct animation is already in the mixer".to_string(),
            ));
        }

        let node_map = cache.resolve_direct(tree, &animation);
        self.add_direct_entry(animation, node_map, weight)
    }

    pub fn remove_direct_entry(&mut self, animation: AnimationId) -> Option<DirectEntry> {
        let index = self
            .direct_entries
            .iter()
            .position(|entry| entry.animation().id() == animation)?;
        Some(self.direct_entries.swap_remove(index))
    }

    #[must_use]
    pub fn find_direct_entry(&self, animation: AnimationId) -> Option<&DirectEntry> {
        self.direct_entries
            .iter()
            .find(|entry| entry.animation().id() == animation)
    }

    pub fn find_direct_entry_mut(&mut self, animation: AnimationId) -> Option<&mut DirectEntry> {
        self.direct_entries
            .iter_mut()
            .find(|entry| entry.animation().id() == animation)
    }

    #[inline]
    #[must_use]
    pub fn direct_entries(&self) -> &[DirectEntry] {
        &self.direct_entries
    }

    #[inline]
    pub fn direct_entries_mut(&mut self) -> &mut [DirectEntry] {
        &mut self.direct_entries
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframe_entries.is_empty() && self.direct_entries.is_empty()
    }

    /// Removes every entry. The referenced assets and node maps are only released.
    pub fn clear(&mut self) {
        self.keyframe_entries.clear();
        self.direct_entries.clear();
    }

    // ========================================================================
    // Per-frame
    // ========================================================================

    /// Advances every keyframe entry's clock by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        for entry in &mut self.keyframe_entries {
            entry.update(dt);
        }
    }

    /// Blends all entries and writes the result into `tree`.
    ///
    /// For each node and component, the written value is
    /// `sum(weight * value) / sum(weight)` over the entries that animate it.
    /// Rotations are re-normalised afterwards. Components no entry touched
    /// keep their current value. Entries with a weight of zero or less do not
    /// contribute.
    ///
    /// Fails with [`AnimationError::InvalidArgument`] if `tree` is not the tree
    /// (or a clone of the tree) this mixer is bound to; the tree is untouched.
    pub fn apply(&mut self, tree: &mut AnimationTree) -> Result<()> {
        if tree.id() != self.tree {
            log::warn!("Mixer bound to another tree was applied; ignoring");
            return Err(AnimationError::InvalidArgument(
                "tree does not match the tree the mixer is bound to".to_string(),
            ));
        }

        self.scratch.clear();
        self.scratch
            .resize(tree.node_count(), WeightedTransform::default());

        let search = self.settings.keyframe_search;
        let mut contributing = 0_usize;

        for entry in &self.keyframe_entries {
            if !contributes(entry.weight) {
                continue;
            }
            contributing += 1;

            let node_map = entry.node_map();
            for (group_index, group) in entry.animation().keyframes().iter().enumerate() {
                let span = group.find_span(entry.time, search);
                let nodes = node_map.channel_nodes(group_index);
                for (channel, node) in group.channels().iter().zip(nodes) {
                    let Some(slot) = node.and_then(|index| self.scratch.get_mut(index)) else {
                        continue;
                    };
                    slot.accumulate(channel.component(), channel.evaluate(span), entry.weight);
                }
            }
        }

        for entry in &self.direct_entries {
            if !contributes(entry.weight) {
                continue;
            }
            contributing += 1;

            let nodes = entry.node_map().channel_nodes();
            for (channel, node) in entry.animation().channels().iter().zip(nodes) {
                let Some(slot) = node.and_then(|index| self.scratch.get_mut(index)) else {
                    continue;
                };
                slot.accumulate(channel.component(), channel.value(), entry.weight);
            }
        }

        for (node, weighted) in tree.nodes_mut().iter_mut().zip(&self.scratch) {
            weighted.write_to(&mut node.transform);
        }

        log::trace!(
            "Applied {contributing} of {} entries to {} nodes",
            self.keyframe_entries.len() + self.direct_entries.len(),
            tree.node_count()
        );

        if self.settings.update_transforms_on_apply {
            tree.update_transforms();
        }

        Ok(())
    }

    fn check_bound_tree(&self, tree: &AnimationTree) -> Result<()> {
        if tree.id() == self.tree {
            Ok(())
        } else {
            Err(AnimationError::InvalidBinding(
                "mixer is bound to a different tree".to_string(),
            ))
        }
    }
}
