use rustc_hash::FxHashMap;

use crate::utils::interner::{self, Symbol};

/// Hash lookup from node name identifier to node index.
///
/// Owned by a single [`AnimationTree`](crate::tree::AnimationTree) and rebuilt
/// together with it.
#[derive(Debug, Clone, Default)]
pub struct NodeNameTable {
    indices: FxHashMap<Symbol, usize>,
}

impl NodeNameTable {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Registers `name` for `index`. Returns `false` if the name is taken.
    pub(crate) fn insert(&mut self, name: Symbol, index: usize) -> bool {
        match self.indices.entry(name) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(index);
                true
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: Symbol) -> Option<usize> {
        self.indices.get(&name).copied()
    }

    /// Looks a node up by string without interning it.
    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        interner::get(name).and_then(|sym| self.get(sym))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let mut table = NodeNameTable::with_capacity(2);
        let hip = interner::intern("name_table_hip");

        assert!(table.insert(hip, 0));
        assert!(!table.insert(hip, 1));
        assert_eq!(table.get(hip), Some(0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn find_does_not_intern_unknown_names() {
        let table = NodeNameTable::default();
        assert_eq!(table.find("name_table_never_seen"), None);
        assert!(interner::get("name_table_never_seen").is_none());
    }
}
