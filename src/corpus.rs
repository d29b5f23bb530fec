//! Workload corpus: key catalogues and the rotated serialized-buffer pools
//! built from them.
//!
//! Slot i of a corpus encodes the catalogue cyclically shifted by i, so
//! across the K slots every key appears at every buffer position exactly
//! once. Trials rotate through the slots round-robin, which keeps any one
//! key from always sitting at the same decode offset and being flattered by
//! branch prediction. Slots are built once, before any timed work, and are
//! immutable afterwards apart from cursor rewinds.

use crate::wire::{self, ByteCursor};
use anyhow::{ensure, Result};

/// Hand-authored catalogue of 20 representative header names. Lengths vary
/// deliberately — terse labels through over-long dotted namespaces — to
/// stress both short and long key encodings.
pub fn default_catalogue() -> Vec<String> {
    [
        "content-router.class",
        "relay.feature.compact",
        "relay.feature.batched",
        "Pipeline.group.id",
        "Pipeline.schema.fingerprint",
        "edge.gateway.annotations.very.long.namespace.qualifier",
        "totally.unrelated.diagnostic.channel",
        "plain label",
        "org.example.transport.far.too.verbose.header.name",
        "Pipeline.priority",
        "Pipeline.extra-key",
        "header-11",
        "header-12a",
        "header-13aa",
        "header-14",
        "header-15",
        "header-16aaa",
        "header-17",
        "header-18",
        "header-19",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// 20 distinct integer keys mixing small, large, and negative values, so
/// decode cost is not an artifact of one magnitude class.
pub fn default_int_catalogue() -> Vec<i32> {
    (0..20)
        .map(|i| if i % 2 == 0 { 100_000 + i } else { i - 10 })
        .collect()
}

/// Pre-built corpus: the catalogue in declaration order plus one serialized
/// slot per rotation.
pub struct Corpus<K> {
    keys: Vec<K>,
    slots: Vec<ByteCursor>,
}

impl<K> Corpus<K> {
    /// Catalogue size K (also the slot count).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    /// Round-robin slot access: the index is taken modulo the slot count.
    /// Mutable because decoding advances the slot's cursor; callers rewind
    /// before each reuse.
    pub fn slot_mut(&mut self, index: usize) -> &mut ByteCursor {
        let count = self.slots.len();
        &mut self.slots[index % count]
    }
}

fn all_distinct<K: PartialEq>(keys: &[K]) -> bool {
    keys.iter()
        .enumerate()
        .all(|(i, key)| !keys[..i].contains(key))
}

/// Build a string-keyed corpus: one slot per rotation, every entry carrying
/// `value`. Buffers are sized exactly; a slot that does not come out full is
/// a configuration fault.
pub fn build_string_corpus(keys: Vec<String>, value: &[u8]) -> Result<Corpus<String>> {
    ensure!(!keys.is_empty(), "catalogue is empty");
    ensure!(
        all_distinct(&keys),
        "catalogue contains duplicate keys; rotation slots would decode short"
    );

    let capacity: usize = keys
        .iter()
        .map(|key| wire::string_entry_len(key, value))
        .sum();
    let count = keys.len();
    let mut slots = Vec::with_capacity(count);
    for slot_index in 0..count {
        let mut cursor = ByteCursor::with_capacity(capacity);
        for key_index in 0..count {
            let key = &keys[(key_index + slot_index) % count];
            wire::encode_string_entry(&mut cursor, key, value);
        }
        ensure!(
            cursor.position() == cursor.capacity(),
            "slot {slot_index} under-filled: wrote {} of {} bytes",
            cursor.position(),
            cursor.capacity()
        );
        cursor.rewind();
        slots.push(cursor);
    }
    log::debug!("built {count} string slots of {capacity} bytes each");
    Ok(Corpus { keys, slots })
}

/// Build an integer-keyed corpus; same rotation scheme as the string corpus.
pub fn build_int_corpus(keys: Vec<i32>, value: &[u8]) -> Result<Corpus<i32>> {
    ensure!(!keys.is_empty(), "catalogue is empty");
    ensure!(
        all_distinct(&keys),
        "catalogue contains duplicate keys; rotation slots would decode short"
    );

    let capacity = keys.len() * wire::int_entry_len(value);
    let count = keys.len();
    let mut slots = Vec::with_capacity(count);
    for slot_index in 0..count {
        let mut cursor = ByteCursor::with_capacity(capacity);
        for key_index in 0..count {
            wire::encode_int_entry(&mut cursor, keys[(key_index + slot_index) % count], value);
        }
        ensure!(
            cursor.position() == cursor.capacity(),
            "slot {slot_index} under-filled: wrote {} of {} bytes",
            cursor.position(),
            cursor.capacity()
        );
        cursor.rewind();
        slots.push(cursor);
    }
    log::debug!("built {count} int slots of {capacity} bytes each");
    Ok(Corpus { keys, slots })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HashTable, HeaderTable};
    use crate::wire::decode_string_headers;

    #[test]
    fn default_catalogues_are_distinct() {
        assert!(all_distinct(&default_catalogue()));
        assert!(all_distinct(&default_int_catalogue()));
        assert_eq!(default_catalogue().len(), 20);
        assert_eq!(default_int_catalogue().len(), 20);
    }

    #[test]
    fn string_slots_come_out_exactly_full() {
        let mut corpus = build_string_corpus(default_catalogue(), b"v").unwrap();
        for i in 0..corpus.len() {
            let slot = corpus.slot_mut(i);
            assert_eq!(slot.position(), 0);
            assert_eq!(slot.remaining(), slot.capacity());
        }
    }

    #[test]
    fn slot_one_starts_with_second_key() {
        let keys = vec!["aa".to_string(), "bb".to_string(), "cc".to_string()];
        let mut corpus = build_string_corpus(keys, &[]).unwrap();

        let mut table = HashTable::new();
        let slot = corpus.slot_mut(1);
        decode_string_headers(slot, &mut table, 1, None);
        assert!(table.get(&"bb".to_string()).is_some());
    }

    #[test]
    fn slot_index_wraps_round_robin() {
        let mut corpus = build_int_corpus(vec![1, 2, 3], &[]).unwrap();
        let capacity = corpus.slot_mut(0).capacity();
        assert_eq!(corpus.slot_mut(3).capacity(), capacity);
    }

    #[test]
    fn duplicate_catalogue_is_rejected() {
        let keys = vec!["same".to_string(), "same".to_string()];
        assert!(build_string_corpus(keys, &[]).is_err());
        assert!(build_int_corpus(vec![5, 5], &[]).is_err());
    }

    #[test]
    fn empty_catalogue_is_rejected() {
        assert!(build_string_corpus(Vec::new(), &[]).is_err());
        assert!(build_int_corpus(Vec::new(), &[]).is_err());
    }
}
