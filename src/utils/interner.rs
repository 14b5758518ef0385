//! Global String Interner
//!
//! Converts node names into compact integer [`Symbol`]s. Trees and animation
//! channels store symbols, so hashing and comparing names never touches the
//! string data after the asset is prepared.

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Stable identifier for an interned node name.
///
/// Equal names always map to the same symbol for the lifetime of the process.
pub type Symbol = Spur;

/// Interns a string, returning its symbol.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Returns the symbol of an already interned string.
///
/// Never allocates: a string that was never interned yields `None`.
#[inline]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
pub fn resolve(sym: Symbol) -> &'static str {
    INTERNER.resolve(&sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let s1 = intern("pelvis");
        let s2 = intern("pelvis");
        let s3 = intern("spine_01");

        assert_eq!(s1, s2);
        assert_ne!(s1, s3);

        assert_eq!(resolve(s1), "pelvis");
        assert_eq!(resolve(s3), "spine_01");
    }

    #[test]
    fn test_get() {
        let _ = intern("existing_bone");

        assert!(get("existing_bone").is_some());
        assert!(get("bone_that_was_never_interned").is_none());
    }
}
