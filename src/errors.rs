//! Error Types
//!
//! This module defines the error type shared by every fallible operation in
//! the crate.
//!
//! # Overview
//!
//! [`AnimationError`] has four variants:
//! - Missing or malformed input (including rejected asset data)
//! - An asset or node map bound against the wrong tree
//! - An asset added twice to the same mixer
//! - A hierarchy whose topology cannot be flattened
//!
//! Failures are reported where the call happens and leave all existing state
//! unchanged. Two situations are *not* errors: channels naming nodes that do
//! not exist in a tree (they are skipped), and pose components that no entry
//! contributed to (the previous pose is kept).
//!
//! # Usage
//!
//! ```rust,ignore
//! use posemix::errors::{AnimationError, Result};
//!
//! fn bind() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type for animation trees, assets and mixers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// A required input was missing, empty or structurally invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An asset or node map does not belong to the tree a mixer is bound to.
    #[error("Invalid binding: {0}")]
    InvalidBinding(String),

    /// The asset is already present in the mixer.
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// The node list violates the hierarchy rules (ordering, parents, names).
    #[error("Malformed hierarchy: {0}")]
    MalformedHierarchy(String),
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
