use glam::{Quat, Vec3, Vec4};

use crate::animation::binding::{AnimationComponent, AnimationId};
use crate::utils::interner::{self, Symbol};

/// A fixed value for one component of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectChannel {
    node: Symbol,
    component: AnimationComponent,
    value: Vec4,
}

impl DirectChannel {
    #[must_use]
    pub fn new(node: &str, component: AnimationComponent, value: Vec4) -> Self {
        Self {
            node: interner::intern(node),
            component,
            value,
        }
    }

    #[must_use]
    pub fn translation(node: &str, translation: Vec3) -> Self {
        Self::new(node, AnimationComponent::Translation, translation.extend(0.0))
    }

    #[must_use]
    pub fn rotation(node: &str, rotation: Quat) -> Self {
        Self::new(node, AnimationComponent::Rotation, Vec4::from(rotation))
    }

    #[must_use]
    pub fn scale(node: &str, scale: Vec3) -> Self {
        Self::new(node, AnimationComponent::Scale, scale.extend(0.0))
    }

    #[inline]
    #[must_use]
    pub fn node_id(&self) -> Symbol {
        self.node
    }

    #[inline]
    #[must_use]
    pub fn node_name(&self) -> &'static str {
        interner::resolve(self.node)
    }

    #[inline]
    #[must_use]
    pub fn component(&self) -> AnimationComponent {
        self.component
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Vec4 {
        self.value
    }
}

/// Time-independent pose override, e.g. a procedural aim offset layered on
/// top of keyframed motion.
#[derive(Debug, Clone)]
pub struct DirectAnimation {
    id: AnimationId,
    name: String,
    channels: Vec<DirectChannel>,
}

impl DirectAnimation {
    #[must_use]
    pub fn new(name: impl Into<String>, channels: Vec<DirectChannel>) -> Self {
        Self {
            id: AnimationId::generate(),
            name: name.into(),
            channels,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[DirectChannel] {
        &self.channels
    }
}
