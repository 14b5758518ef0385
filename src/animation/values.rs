use glam::{Quat, Vec4};

use crate::animation::binding::AnimationComponent;

/// Cubic Hermite blending weights for one interpolation factor.
///
/// Applied to a prepared segment laid out as
/// `[start value, start out-tangent, end value, end in-tangent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HermiteBasis {
    start_value: f32,
    start_tangent: f32,
    end_value: f32,
    end_tangent: f32,
}

impl HermiteBasis {
    #[inline]
    pub(crate) fn new(t: f32) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;

        Self {
            start_value: 2.0 * t3 - 3.0 * t2 + 1.0,
            start_tangent: t3 - 2.0 * t2 + t,
            end_value: -2.0 * t3 + 3.0 * t2,
            end_tangent: t3 - t2,
        }
    }

    #[inline]
    pub(crate) fn evaluate(&self, segment: &[Vec4; 4]) -> Vec4 {
        segment[0] * self.start_value
            + segment[1] * self.start_tangent
            + segment[2] * self.end_value
            + segment[3] * self.end_tangent
    }
}

/// Linear interpolation for a channel value.
///
/// Rotations take the shortest arc between the two quaternions; translation
/// and scale interpolate per component.
#[inline]
pub(crate) fn interpolate_linear(
    component: AnimationComponent,
    start: Vec4,
    end: Vec4,
    t: f32,
) -> Vec4 {
    match component {
        AnimationComponent::Rotation => {
            Vec4::from(Quat::from_vec4(start).slerp(Quat::from_vec4(end), t))
        }
        AnimationComponent::Translation | AnimationComponent::Scale => start.lerp(end, t),
    }
}
