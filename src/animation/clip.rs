use glam::{Quat, Vec3, Vec4};

use crate::animation::binding::{AnimationComponent, AnimationId};
use crate::animation::tracks::{Interpolation, KeyframeChannel, Keyframes};
use crate::errors::{AnimationError, Result};
use crate::utils::interner;

/// An authored channel, before preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeChannelDesc {
    pub node: String,
    pub component: AnimationComponent,
    pub interpolation: Interpolation,
    /// One value per keyframe for step/linear channels; three per keyframe
    /// (in-tangent, value, out-tangent) for cubic channels.
    pub values: Vec<Vec4>,
}

impl KeyframeChannelDesc {
    #[must_use]
    pub fn translation(
        node: impl Into<String>,
        interpolation: Interpolation,
        values: impl IntoIterator<Item = Vec3>,
    ) -> Self {
        Self {
            node: node.into(),
            component: AnimationComponent::Translation,
            interpolation,
            values: values.into_iter().map(|v| v.extend(0.0)).collect(),
        }
    }

    #[must_use]
    pub fn rotation(
        node: impl Into<String>,
        interpolation: Interpolation,
        values: impl IntoIterator<Item = Quat>,
    ) -> Self {
        Self {
            node: node.into(),
            component: AnimationComponent::Rotation,
            interpolation,
            values: values.into_iter().map(Vec4::from).collect(),
        }
    }

    #[must_use]
    pub fn scale(
        node: impl Into<String>,
        interpolation: Interpolation,
        values: impl IntoIterator<Item = Vec3>,
    ) -> Self {
        Self {
            node: node.into(),
            component: AnimationComponent::Scale,
            interpolation,
            values: values.into_iter().map(|v| v.extend(0.0)).collect(),
        }
    }
}

/// An authored keyframe group: shared times plus the channels using them.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesDesc {
    pub times: Vec<f32>,
    pub channels: Vec<KeyframeChannelDesc>,
}

impl KeyframesDesc {
    #[must_use]
    pub fn new(times: Vec<f32>, channels: Vec<KeyframeChannelDesc>) -> Self {
        Self { times, channels }
    }
}

/// A prepared, immutable keyframe animation.
///
/// Share it behind an `Arc` between any number of mixers. Cubic channels are
/// converted to per-segment coefficients once, here, and never per frame.
#[derive(Debug, Clone)]
pub struct KeyframeAnimation {
    id: AnimationId,
    name: String,
    min_time: f32,
    max_time: f32,
    keyframes: Vec<Keyframes>,
}

impl KeyframeAnimation {
    /// Validates and prepares authored keyframe groups.
    ///
    /// - Keyframe times must be finite and sorted in ascending order.
    /// - Value counts must match the keyframe count (×3 for cubic).
    /// - Channels with a single keyframe become step channels.
    pub fn new(name: impl Into<String>, keyframes: Vec<KeyframesDesc>) -> Result<Self> {
        let name = name.into();
        if keyframes.is_empty() {
            return Err(AnimationError::InvalidArgument(format!(
                "keyframe animation '{name}' has no keyframe groups"
            )));
        }

        let mut min_time = f32::INFINITY;
        let mut max_time = f32::NEG_INFINITY;
        let mut prepared = Vec::with_capacity(keyframes.len());
        for (group_index, group) in keyframes.into_iter().enumerate() {
            validate_times(&name, group_index, &group.times)?;
            min_time = min_time.min(group.times[0]);
            max_time = max_time.max(group.times[group.times.len() - 1]);

            let channels = group
                .channels
                .into_iter()
                .map(|channel| prepare_channel(&name, channel, &group.times))
                .collect::<Result<Vec<_>>>()?;
            prepared.push(Keyframes::from_prepared(group.times, channels));
        }

        Ok(Self {
            id: AnimationId::generate(),
            name,
            min_time,
            max_time,
            keyframes: prepared,
        })
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

    /// Earliest keyframe time across all groups.
    #[inline]
    #[must_use]
    pub fn min_time(&self) -> f32 {
        self.min_time
    }

    /// Latest keyframe time across all groups.
    #[inline]
    #[must_use]
    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.max_time - self.min_time
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframes] {
        &self.keyframes
    }

    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.keyframes.iter().map(|k| k.channels().len()).sum()
    }
}

fn validate_times(name: &str, group_index: usize, times: &[f32]) -> Result<()> {
    if times.is_empty() {
        return Err(AnimationError::InvalidArgument(format!(
            "keyframe group {group_index} of '{name}' has no keyframes"
        )));
    }

    if times.iter().any(|t| !t.is_finite()) {
        return Err(AnimationError::InvalidArgument(format!(
            "keyframe group {group_index} of '{name}' has non-finite times"
        )));
    }

    if times.windows(2).any(|w| w[1] < w[0]) {
        return Err(AnimationError::InvalidArgument(format!(
            "keyframe times of group {group_index} in '{name}' are not sorted"
        )));
    }

    Ok(())
}

fn prepare_channel(
    name: &str,
    desc: KeyframeChannelDesc,
    times: &[f32],
) -> Result<KeyframeChannel> {
    if desc.node.is_empty() {
        return Err(AnimationError::InvalidArgument(format!(
            "channel in '{name}' has an empty node name"
        )));
    }

    let keyframe_count = times.len();
    let expected = match desc.interpolation {
        Interpolation::Cubic => keyframe_count * 3,
        Interpolation::Step | Interpolation::Linear => keyframe_count,
    };
    if desc.values.len() != expected {
        return Err(AnimationError::InvalidArgument(format!(
            "channel '{}' in '{name}' has {} values, expected {expected}",
            desc.node,
            desc.values.len()
        )));
    }

    let node = interner::intern(&desc.node);
    let (interpolation, values) = if keyframe_count == 1 {
        let value = match desc.interpolation {
            Interpolation::Cubic => desc.values[1],
            Interpolation::Step | Interpolation::Linear => desc.values[0],
        };
        (Interpolation::Step, vec![value])
    } else {
        match desc.interpolation {
            Interpolation::Cubic => (Interpolation::Cubic, hermite_segments(&desc.values)),
            other => (other, desc.values),
        }
    };

    Ok(KeyframeChannel::from_prepared(
        node,
        desc.component,
        interpolation,
        values,
    ))
}

/// Converts `[in-tangent, value, out-tangent]` triples into four coefficients
/// per segment. Tangents are stored as authored.
fn hermite_segments(values: &[Vec4]) -> Vec<Vec4> {
    let segment_count = values.len() / 3 - 1;
    let mut segments = Vec::with_capacity(segment_count * 4);
    for index in 0..segment_count {
        let start = index * 3;
        let end = start + 3;

        segments.extend_from_slice(&[
            values[start + 1],
            values[start + 2],
            values[end + 1],
            values[end],
        ]);
    }
    segments
}
