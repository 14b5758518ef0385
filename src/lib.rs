#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod errors;
pub mod settings;
pub mod tree;
pub mod utils;

pub use animation::{
    AnimationComponent, AnimationId, AnimationInstance, AnimationMixer, AnimationSystem,
    DirectAnimation, DirectChannel, InstanceKey, Interpolation, KeyframeAnimation,
    KeyframeChannelDesc, KeyframesDesc, NodeMapCache, WrapMode,
};
pub use errors::{AnimationError, Result};
pub use settings::{AnimationSettings, KeyframeSearch};
pub use tree::{AnimationTree, BuildNode, JointBuildNode, NodeTransform, TreeId};
pub use utils::interner;
