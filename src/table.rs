//! Container strategies under comparison, behind the minimal associative
//! contract the harness needs.
//!
//! The codec, corpus, and runner are generic over [`HeaderTable`] plus a
//! no-argument factory closure, so adding a strategy touches nothing else.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

/// Two-method associative contract: `put` inserts (last write wins when the
/// container deduplicates), `get` probes.
pub trait HeaderTable<K> {
    /// Insert, returning the previous value when the container tracks one.
    fn put(&mut self, key: K, value: Vec<u8>) -> Option<Vec<u8>>;

    /// Look up a key decoded earlier in the same trial.
    fn get(&self, key: &K) -> Option<&[u8]>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-table strategy (`std::collections::HashMap`).
pub struct HashTable<K> {
    inner: HashMap<K, Vec<u8>>,
}

impl<K: Eq + Hash> HashTable<K> {
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Pre-sized variant: measures whether reserving up front beats growing
    /// from empty for small header sets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: HashMap::with_capacity(capacity),
        }
    }
}

impl<K: Eq + Hash> Default for HashTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> HeaderTable<K> for HashTable<K> {
    fn put(&mut self, key: K, value: Vec<u8>) -> Option<Vec<u8>> {
        self.inner.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&[u8]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Ordered-table strategy (`std::collections::BTreeMap`).
pub struct SortedTable<K> {
    inner: BTreeMap<K, Vec<u8>>,
}

impl<K: Ord> SortedTable<K> {
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Default for SortedTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> HeaderTable<K> for SortedTable<K> {
    fn put(&mut self, key: K, value: Vec<u8>) -> Option<Vec<u8>> {
        self.inner.insert(key, value)
    }

    fn get(&self, key: &K) -> Option<&[u8]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Linear-scan strategy: append-only vector of entries.
///
/// `put` never deduplicates and never reports a previous value; `get` scans
/// backwards so the most recent `put` for a key wins. `len` counts appended
/// entries, duplicates included — the decoded-count verification in the
/// runner is only meaningful because corpus catalogues are duplicate-free.
pub struct ScanTable<K> {
    entries: Vec<(K, Vec<u8>)>,
}

impl<K: PartialEq> ScanTable<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Default for ScanTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> HeaderTable<K> for ScanTable<K> {
    fn put(&mut self, key: K, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.push((key, value));
        None
    }

    fn get(&self, key: &K) -> Option<&[u8]> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// String canonicalization hook invoked by the decode path when requested.
///
/// The decoder forwards each decoded key through the collaborator and uses
/// the returned string; it does not interpret what "canonical" means.
pub trait KeyInterner {
    fn intern(&self, key: String) -> String;
}

/// Interner backed by a pool of previously seen keys, so repeated decodes of
/// the same catalogue resolve to one canonical spelling per key.
pub struct CachingInterner {
    pool: RefCell<HashSet<String>>,
}

impl CachingInterner {
    pub fn new() -> Self {
        Self {
            pool: RefCell::new(HashSet::new()),
        }
    }

    /// Number of distinct keys interned so far.
    pub fn len(&self) -> usize {
        self.pool.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CachingInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInterner for CachingInterner {
    fn intern(&self, key: String) -> String {
        let mut pool = self.pool.borrow_mut();
        match pool.get(&key) {
            Some(canonical) => canonical.clone(),
            None => {
                pool.insert(key.clone());
                key
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_table_last_put_wins() {
        let mut table = ScanTable::new();
        table.put("k".to_string(), b"first".to_vec());
        table.put("k".to_string(), b"second".to_vec());
        assert_eq!(table.get(&"k".to_string()), Some(&b"second"[..]));
        // Duplicates are not collapsed.
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn scan_table_miss_returns_none() {
        let mut table = ScanTable::new();
        table.put(1i32, vec![]);
        assert_eq!(table.get(&2), None);
    }

    #[test]
    fn hash_table_reports_previous_value() {
        let mut table = HashTable::new();
        assert_eq!(table.put(7i32, b"a".to_vec()), None);
        assert_eq!(table.put(7i32, b"b".to_vec()), Some(b"a".to_vec()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn sorted_table_put_get() {
        let mut table = SortedTable::new();
        table.put("alpha".to_string(), b"1".to_vec());
        table.put("beta".to_string(), b"2".to_vec());
        assert_eq!(table.get(&"alpha".to_string()), Some(&b"1"[..]));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn caching_interner_pools_distinct_keys() {
        let interner = CachingInterner::new();
        let a = interner.intern("key".to_string());
        let b = interner.intern("key".to_string());
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
        interner.intern("other".to_string());
        assert_eq!(interner.len(), 2);
    }
}
