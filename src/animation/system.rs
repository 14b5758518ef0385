use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use crate::animation::action::WrapMode;
use crate::animation::binder::NodeMapCache;
use crate::animation::clip::KeyframeAnimation;
use crate::animation::direct::DirectAnimation;
use crate::animation::mixer::AnimationMixer;
use crate::errors::{AnimationError, Result};
use crate::settings::AnimationSettings;
use crate::tree::AnimationTree;

new_key_type! {
    /// Handle to an [`AnimationInstance`] inside an [`AnimationSystem`].
    pub struct InstanceKey;
}

/// A tree together with the mixer that drives it.
#[derive(Debug, Clone)]
pub struct AnimationInstance {
    tree: AnimationTree,
    mixer: AnimationMixer,
}

impl AnimationInstance {
    #[must_use]
    pub fn new(tree: AnimationTree) -> Self {
        Self::with_settings(tree, AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(tree: AnimationTree, settings: AnimationSettings) -> Self {
        let mixer = AnimationMixer::with_settings(&tree, settings);
        Self { tree, mixer }
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &AnimationTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut AnimationTree {
        &mut self.tree
    }

    #[inline]
    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[inline]
    pub fn mixer_mut(&mut self) -> &mut AnimationMixer {
        &mut self.mixer
    }

    pub fn add_keyframe_animation(
        &mut self,
        cache: &NodeMapCache,
        animation: Arc<KeyframeAnimation>,
        weight: f32,
        wrap: WrapMode,
    ) -> Result<()> {
        let time = f64::from(animation.min_time());
        self.mixer
            .add_keyframe_animation(cache, &self.tree, animation, weight, time, 1.0, wrap)
    }

    pub fn add_direct_animation(
        &mut self,
        cache: &NodeMapCache,
        animation: Arc<DirectAnimation>,
        weight: f32,
    ) -> Result<()> {
        self.mixer
            .add_direct_animation(cache, &self.tree, animation, weight)
    }

    /// Advances the mixer's clocks and writes the blended pose into the tree.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        self.mixer.update(dt);
        self.mixer.apply(&mut self.tree)
    }
}

/// Owns animation instances and the node map cache they share.
///
/// Instances created with [`instantiate`](Self::instantiate) clone a template
/// tree and keep its identity, so node maps are resolved once per template.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    cache: Arc<NodeMapCache>,
    instances: SlotMap<InstanceKey, AnimationInstance>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a cache shared with other systems or threads.
    #[must_use]
    pub fn with_cache(cache: Arc<NodeMapCache>) -> Self {
        Self {
            cache,
            instances: SlotMap::with_key(),
        }
    }

    #[inline]
    #[must_use]
    pub fn cache(&self) -> &Arc<NodeMapCache> {
        &self.cache
    }

    /// Clones `template` into a new instance.
    pub fn instantiate(&mut self, template: &AnimationTree) -> InstanceKey {
        self.insert(AnimationInstance::new(template.clone()))
    }

    pub fn insert(&mut self, instance: AnimationInstance) -> InstanceKey {
        self.instances.insert(instance)
    }

    #[must_use]
    pub fn get(&self, key: InstanceKey) -> Option<&AnimationInstance> {
        self.instances.get(key)
    }

    pub fn get_mut(&mut self, key: InstanceKey) -> Option<&mut AnimationInstance> {
        self.instances.get_mut(key)
    }

    pub fn remove(&mut self, key: InstanceKey) -> Option<AnimationInstance> {
        self.instances.remove(key)
    }

    pub fn add_keyframe_animation(
        &mut self,
        key: InstanceKey,
        animation: Arc<KeyframeAnimation>,
        weight: f32,
        wrap: WrapMode,
    ) -> Result<()> {
        let instance = self
            .instances
            .get_mut(key)
            .ok_or_else(|| AnimationError::InvalidArgument("unknown animation instance".to_string()))?;
        instance.add_keyframe_animation(&self.cache, animation, weight, wrap)
    }

    pub fn add_direct_animation(
        &mut self,
        key: InstanceKey,
        animation: Arc<DirectAnimation>,
        weight: f32,
    ) -> Result<()> {
        let instance = self
            .instances
            .get_mut(key)
            .ok_or_else(|| AnimationError::InvalidArgument("unknown animation instance".to_string()))?;
        instance.add_direct_animation(&self.cache, animation, weight)
    }

    /// Advances and applies every instance.
    pub fn update(&mut self, dt: f64) {
        for (key, instance) in &mut self.instances {
            if let Err(err) = instance.advance(dt) {
                log::error!("Failed to apply animations to instance {key:?}: {err}");
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceKey, &AnimationInstance)> {
        self.instances.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
