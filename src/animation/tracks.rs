use glam::Vec4;

use crate::animation::binding::AnimationComponent;
use crate::animation::values::{HermiteBasis, interpolate_linear};
use crate::settings::KeyframeSearch;
use crate::utils::interner::{self, Symbol};

/// How values are interpolated from one keyframe to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// Hold the start keyframe's value until the next keyframe.
    Step,
    /// Straight blend between keyframes; rotations use slerp.
    Linear,
    /// Cubic Hermite spline.
    Cubic,
}

/// The pair of keyframes bounding a query time.
///
/// At or outside the keyframe range both indices point at the boundary
/// keyframe and `t` is zero, so curves never extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeSpan {
    pub start: usize,
    pub end: usize,
    /// Fraction of the way from `start` to `end`, in `[0, 1)`.
    pub t: f32,
}

impl KeyframeSpan {
    /// A span pinned to a single keyframe.
    #[inline]
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            start: index,
            end: index,
            t: 0.0,
        }
    }
}

/// A prepared animation channel targeting one component of one node.
///
/// Value layout depends on the interpolation:
/// - `Step` / `Linear`: one value per keyframe
/// - `Cubic`: four values per segment,
///   `[start value, start out-tangent, end value, end in-tangent]`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeChannel {
    node: Symbol,
    component: AnimationComponent,
    interpolation: Interpolation,
    values: Vec<Vec4>,
}

impl KeyframeChannel {
    pub(crate) fn from_prepared(
        node: Symbol,
        component: AnimationComponent,
        interpolation: Interpolation,
        values: Vec<Vec4>,
    ) -> Self {
        Self {
            node,
            component,
            interpolation,
            values,
        }
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
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Raw prepared values (see the type docs for the layout).
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Vec4] {
        &self.values
    }

    /// The channel's value exactly at keyframe `index`.
    #[must_use]
    pub fn keyframe_value(&self, index: usize) -> Vec4 {
        match self.interpolation {
            Interpolation::Cubic => {
                let segment_count = self.values.len() / 4;
                if index < segment_count {
                    self.values[index * 4]
                } else {
                    self.values[(index - 1) * 4 + 2]
                }
            }
            Interpolation::Step | Interpolation::Linear => self.values[index],
        }
    }

    /// Evaluates the channel over a span found by [`Keyframes::find_span`].
    ///
    /// Pure function of the span: the same input always gives the same bits.
    #[must_use]
    pub fn evaluate(&self, span: KeyframeSpan) -> Vec4 {
        if span.start == span.end {
            return self.keyframe_value(span.start);
        }

        match self.interpolation {
            Interpolation::Step => self.values[span.start],
            Interpolation::Linear => interpolate_linear(
                self.component,
                self.values[span.start],
                self.values[span.end],
                span.t,
            ),
            Interpolation::Cubic => {
                let base = span.start * 4;
                let segment = [
                    self.values[base],
                    self.values[base + 1],
                    self.values[base + 2],
                    self.values[base + 3],
                ];
                let value = HermiteBasis::new(span.t).evaluate(&segment);
                match self.component {
                    AnimationComponent::Rotation => value.try_normalize().unwrap_or(value),
                    AnimationComponent::Translation | AnimationComponent::Scale => value,
                }
            }
        }
    }
}

/// A group of channels sharing one ascending array of keyframe times.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    times: Vec<f32>,
    channels: Vec<KeyframeChannel>,
}

impl Keyframes {
    /// `times` must be non-empty and sorted; checked during asset preparation.
    pub(crate) fn from_prepared(times: Vec<f32>, channels: Vec<KeyframeChannel>) -> Self {
        debug_assert!(!times.is_empty());
        Self { times, channels }
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[KeyframeChannel] {
        &self.channels
    }

    #[inline]
    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Finds the keyframes bounding `time`.
    ///
    /// Times at or before the first keyframe pin to the first keyframe, times
    /// at or after the last pin to the last one. NaN pins to the first keyframe.
    #[must_use]
    pub fn find_span(&self, time: f64, search: KeyframeSearch) -> KeyframeSpan {
        let last = self.times.len() - 1;
        if time.is_nan() || time <= f64::from(self.times[0]) {
            return KeyframeSpan::at(0);
        }
        if time >= f64::from(self.times[last]) {
            return KeyframeSpan::at(last);
        }

        let end = match search {
            KeyframeSearch::Linear => self
                .times
                .iter()
                .position(|&t| f64::from(t) > time)
                .unwrap_or(last),
            KeyframeSearch::Binary => self.times.partition_point(|&t| f64::from(t) <= time),
        };
        let start = end - 1;

        let start_time = self.times[start];
        let end_time = self.times[end];
        let t = (time - f64::from(start_time)) as f32 / (end_time - start_time);

        KeyframeSpan { start, end, t }
    }

    /// Evaluates channel `channel` at `time`, or `None` if the index is out of range.
    #[must_use]
    pub fn sample(&self, channel: usize, time: f64) -> Option<Vec4> {
        let channel = self.channels.get(channel)?;
        Some(channel.evaluate(self.find_span(time, KeyframeSearch::Linear)))
    }
}
