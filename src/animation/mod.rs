//! Animation Blending
//!
//! - [`KeyframeAnimation`]: prepared, shareable keyframe curves
//! - [`DirectAnimation`]: fixed per-node values
//! - [`NodeMapCache`]: channel → node index maps per (tree, asset)
//! - [`AnimationMixer`]: weighted blending of many entries into one tree
//! - [`AnimationSystem`]: instances cloned from template trees, one shared cache

mod values;
pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod direct;
pub mod mixer;
pub mod system;
pub mod tracks;

pub use action::{DirectEntry, KeyframeEntry, WrapMode};
pub use binder::NodeMapCache;
pub use binding::{AnimationComponent, AnimationId, DirectNodeMap, KeyframeNodeMap};
pub use clip::{KeyframeAnimation, KeyframeChannelDesc, KeyframesDesc};
pub use direct::{DirectAnimation, DirectChannel};
pub use mixer::AnimationMixer;
pub use system::{AnimationInstance, AnimationSystem, InstanceKey};
pub use tracks::{Interpolation, KeyframeChannel, KeyframeSpan, Keyframes};
