//! Utility Module
//!
//! - [`interner`]: string interning for node names
//!
//! # String Interning
//!
//! Node names are interned once, when a tree is built or an animation asset is
//! prepared. The resulting [`Symbol`]s can be hashed and compared in O(1).
//!
//! ```rust,ignore
//! use posemix::utils::interner;
//!
//! let a = interner::intern("head");
//! let b = interner::intern("head");
//! assert_eq!(a, b);
//! ```

pub mod interner;

pub use interner::Symbol;
