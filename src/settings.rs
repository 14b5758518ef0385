//! Mixer Settings
//!
//! Configuration is passed explicitly when an [`AnimationMixer`] or
//! [`AnimationInstance`] is created. There is no process-wide state.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use posemix::{AnimationMixer, AnimationSettings, KeyframeSearch};
//!
//! // Default: linear keyframe scan, matrices recomputed after every apply
//! let mixer = AnimationMixer::new(&tree);
//!
//! // Long clips with hundreds of keys per group
//! let settings = AnimationSettings {
//!     keyframe_search: KeyframeSearch::Binary,
//!     ..Default::default()
//! };
//! let mixer = AnimationMixer::with_settings(&tree, settings);
//! ```
//!
//! [`AnimationMixer`]: crate::animation::AnimationMixer
//! [`AnimationInstance`]: crate::animation::AnimationInstance

// ---------------------------------------------------------------------------
// KeyframeSearch
// ---------------------------------------------------------------------------

/// Strategy used to locate the pair of keyframes that bound a query time.
///
/// Both strategies return the same span for every input.
///
/// | Strategy  | Cost      | Best for                              |
/// |-----------|-----------|---------------------------------------|
/// | `Linear`  | O(n)      | Typical clips (a handful of keys)     |
/// | `Binary`  | O(log n)  | Baked clips with many keys per group  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyframeSearch {
    /// Forward scan for the first keyframe later than the query time.
    #[default]
    Linear,
    /// Partition-point search over the sorted keyframe times.
    Binary,
}

// ---------------------------------------------------------------------------
// AnimationSettings
// ---------------------------------------------------------------------------

/// Settings for a single mixer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSettings {
    /// How keyframe spans are searched during evaluation.
    pub keyframe_search: KeyframeSearch,

    /// Recompute composed node matrices (and joint transforms for skinning
    /// trees) at the end of every successful apply.
    ///
    /// Turn this off when an external stage propagates transforms.
    pub update_transforms_on_apply: bool,

    /// Initial capacity reserved for each of the mixer's entry lists.
    pub entry_capacity: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            keyframe_search: KeyframeSearch::Linear,
            update_transforms_on_apply: true,
            entry_capacity: 4,
        }
    }
}
