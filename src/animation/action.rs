use std::sync::Arc;

use crate::animation::binding::{DirectNodeMap, KeyframeNodeMap};
use crate::animation::clip::KeyframeAnimation;
use crate::animation::direct::DirectAnimation;

/// What happens when an entry's clock leaves the animation's time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    /// Leave the clock alone; evaluation holds the boundary keyframes.
    #[default]
    Clamp,
    /// Cycle the clock within `[min_time, max_time)`.
    Wrap,
}

/// A keyframe animation bound into a mixer, with its own clock and weight.
#[derive(Debug, Clone)]
pub struct KeyframeEntry {
    animation: Arc<KeyframeAnimation>,
    node_map: Arc<KeyframeNodeMap>,

    /// Current time in seconds. Double precision so long sessions do not drift.
    pub time: f64,
    pub time_scale: f64,
    pub wrap: WrapMode,
    pub weight: f32,
}

impl KeyframeEntry {
    pub(crate) fn new(
        animation: Arc<KeyframeAnimation>,
        node_map: Arc<KeyframeNodeMap>,
        weight: f32,
        time: f64,
        time_scale: f64,
        wrap: WrapMode,
    ) -> Self {
        Self {
            animation,
            node_map,
            time,
            time_scale,
            wrap,
            weight,
        }
    }

    #[inline]
    #[must_use]
    pub fn animation(&self) -> &Arc<KeyframeAnimation> {
        &self.animation
    }

    #[inline]
    #[must_use]
    pub fn node_map(&self) -> &Arc<KeyframeNodeMap> {
        &self.node_map
    }

    /// Advances the clock by `dt * time_scale`.
    ///
    /// A non-finite step leaves the clock where it is.
    pub fn update(&mut self, dt: f64) {
        let step = dt * self.time_scale;
        if !step.is_finite() {
            log::warn!(
                "Ignoring non-finite clock step for '{}' (dt {dt}, time scale {})",
                self.animation.name(),
                self.time_scale
            );
            return;
        }
        self.time += step;

        if self.wrap == WrapMode::Wrap {
            self.time = wrap_time(
                self.time,
                f64::from(self.animation.min_time()),
                f64::from(self.animation.max_time()),
            );
        }
    }
}

/// A direct animation bound into a mixer.
#[derive(Debug, Clone)]
pub struct DirectEntry {
    animation: Arc<DirectAnimation>,
    node_map: Arc<DirectNodeMap>,
    pub weight: f32,
}

impl DirectEntry {
    pub(crate) fn new(
        animation: Arc<DirectAnimation>,
        node_map: Arc<DirectNodeMap>,
        weight: f32,
    ) -> Self {
        Self {
            animation,
            node_map,
            weight,
        }
    }

    #[inline]
    #[must_use]
    pub fn animation(&self) -> &Arc<DirectAnimation> {
        &self.animation
    }

    #[inline]
    #[must_use]
    pub fn node_map(&self) -> &Arc<DirectNodeMap> {
        &self.node_map
    }
}

/// Wraps `time` into `[min, max)`. An empty range collapses to `min`.
fn wrap_time(time: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range <= 0.0 {
        return min;
    }

    let wrapped = min + (time - min).rem_euclid(range);
    if wrapped >= max { min } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::wrap_time;

    #[test]
    fn wrap_time_cycles_both_directions() {
        assert!((wrap_time(2.5, 0.0, 2.0) - 0.5).abs() < 1e-12);
        assert!((wrap_time(-0.5, 0.0, 2.0) - 1.5).abs() < 1e-12);
        assert!((wrap_time(3.0, 1.0, 2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_time_empty_range() {
        assert_eq!(wrap_time(5.0, 1.0, 1.0), 1.0);
    }
}
