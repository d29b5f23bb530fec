//! Trial runner and measurement loop.
//!
//! One trial = decode a rotated corpus slot into a fresh container, verify
//! the decoded count, then probe the container once per catalogue key in
//! permuted order and verify something was found. Invariant violations panic
//! immediately: a benchmark whose workload checks fail produces meaningless
//! timings, so masking them would be worse than crashing.

use crate::corpus::Corpus;
use crate::report::{SizeSample, SuiteResult};
use crate::shuffle::PermutationPool;
use crate::table::{HeaderTable, KeyInterner};
use crate::wire;
use std::time::Instant;

/// Drives decode + lookup trials.
///
/// Owns the two round-robin counters — one for corpus-slot selection, one
/// for permutation selection — so slot choice and probe order vary
/// independently across trials instead of cycling in lockstep.
pub struct TrialRunner {
    slot_counter: usize,
    perm_counter: usize,
}

impl TrialRunner {
    pub fn new() -> Self {
        Self {
            slot_counter: 0,
            perm_counter: 0,
        }
    }

    fn next_slot(&mut self) -> usize {
        let slot = self.slot_counter;
        self.slot_counter = self.slot_counter.wrapping_add(1);
        slot
    }

    fn next_permutation(&mut self) -> usize {
        let perm = self.perm_counter;
        self.perm_counter = self.perm_counter.wrapping_add(1);
        perm
    }

    /// One decode + permuted-lookup trial against a string-keyed corpus,
    /// decoding at most `item_count` entries.
    pub fn run_string_trial<T, F>(
        &mut self,
        corpus: &mut Corpus<String>,
        pool: &PermutationPool,
        item_count: usize,
        make_table: &F,
        interner: Option<&dyn KeyInterner>,
    ) where
        T: HeaderTable<String>,
        F: Fn() -> T,
    {
        let mut table = make_table();
        let slot = self.next_slot();
        let parsed = {
            let cursor = corpus.slot_mut(slot);
            cursor.rewind();
            wire::decode_string_headers(cursor, &mut table, item_count, interner)
        };
        assert_eq!(
            parsed, item_count,
            "decoded {parsed} header entries, expected {item_count}"
        );

        let permutation = pool.get(self.next_permutation());
        let mut found = false;
        for &key_index in permutation {
            found |= table.get(corpus.key(key_index)).is_some();
        }
        assert!(found, "permuted lookup sweep found no decoded keys");
    }

    /// One decode + permuted-lookup trial against an integer-keyed corpus.
    pub fn run_int_trial<T, F>(
        &mut self,
        corpus: &mut Corpus<i32>,
        pool: &PermutationPool,
        item_count: usize,
        make_table: &F,
    ) where
        T: HeaderTable<i32>,
        F: Fn() -> T,
    {
        let mut table = make_table();
        let slot = self.next_slot();
        let parsed = {
            let cursor = corpus.slot_mut(slot);
            cursor.rewind();
            wire::decode_int_headers(cursor, &mut table, item_count)
        };
        assert_eq!(
            parsed, item_count,
            "decoded {parsed} header entries, expected {item_count}"
        );

        let permutation = pool.get(self.next_permutation());
        let mut found = false;
        for &key_index in permutation {
            found |= table.get(corpus.key(key_index)).is_some();
        }
        assert!(found, "permuted lookup sweep found no decoded keys");
    }

    /// Full-catalogue trial where every permuted lookup must hit; used when
    /// a trial decodes the whole slot, so a single miss indicates a codec or
    /// container bug rather than a partial decode.
    pub fn run_string_trial_all_hits<T, F>(
        &mut self,
        corpus: &mut Corpus<String>,
        pool: &PermutationPool,
        make_table: &F,
        interner: Option<&dyn KeyInterner>,
    ) where
        T: HeaderTable<String>,
        F: Fn() -> T,
    {
        let catalogue_len = corpus.len();
        let mut table = make_table();
        let slot = self.next_slot();
        let parsed = {
            let cursor = corpus.slot_mut(slot);
            cursor.rewind();
            wire::decode_string_headers(cursor, &mut table, catalogue_len, interner)
        };
        assert_eq!(
            parsed, catalogue_len,
            "decoded {parsed} header entries, expected the full catalogue of {catalogue_len}"
        );

        let permutation = pool.get(self.next_permutation());
        for &key_index in permutation {
            assert!(
                table.get(corpus.key(key_index)).is_some(),
                "catalogue key {key_index} missing after a full decode"
            );
        }
    }
}

impl Default for TrialRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Time `trials` back-to-back string-keyed trials for every item count in
/// `1..=max_items`, returning average milliseconds per trial per size.
#[allow(clippy::too_many_arguments)]
pub fn measure_string<T, F>(
    label: &str,
    runner: &mut TrialRunner,
    corpus: &mut Corpus<String>,
    pool: &PermutationPool,
    trials: u32,
    max_items: usize,
    make_table: &F,
    interner: Option<&dyn KeyInterner>,
) -> SuiteResult
where
    T: HeaderTable<String>,
    F: Fn() -> T,
{
    let mut result = SuiteResult::new(label);
    for item_count in 1..=max_items {
        let start = Instant::now();
        for _ in 0..trials {
            runner.run_string_trial(corpus, pool, item_count, make_table, interner);
        }
        let elapsed = start.elapsed();
        result.push(SizeSample {
            item_count,
            millis_per_trial: elapsed.as_secs_f64() * 1e3 / trials as f64,
        });
    }
    result
}

/// Integer-keyed counterpart of [`measure_string`].
pub fn measure_int<T, F>(
    label: &str,
    runner: &mut TrialRunner,
    corpus: &mut Corpus<i32>,
    pool: &PermutationPool,
    trials: u32,
    max_items: usize,
    make_table: &F,
) -> SuiteResult
where
    T: HeaderTable<i32>,
    F: Fn() -> T,
{
    let mut result = SuiteResult::new(label);
    for item_count in 1..=max_items {
        let start = Instant::now();
        for _ in 0..trials {
            runner.run_int_trial(corpus, pool, item_count, make_table);
        }
        let elapsed = start.elapsed();
        result.push(SizeSample {
            item_count,
            millis_per_trial: elapsed.as_secs_f64() * 1e3 / trials as f64,
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{build_int_corpus, build_string_corpus, default_catalogue};
    use crate::shuffle::SHUFFLE_SEED;
    use crate::table::{HashTable, ScanTable, SortedTable};

    fn string_fixture() -> (Corpus<String>, PermutationPool) {
        let corpus = build_string_corpus(default_catalogue(), &[]).unwrap();
        let pool = PermutationPool::build(corpus.len(), 5, SHUFFLE_SEED).unwrap();
        (corpus, pool)
    }

    #[test]
    fn string_trials_run_for_every_size() {
        let (mut corpus, pool) = string_fixture();
        let mut runner = TrialRunner::new();
        for item_count in 1..=corpus.len() {
            runner.run_string_trial(&mut corpus, &pool, item_count, &HashTable::new, None);
        }
    }

    #[test]
    fn int_trials_run_for_every_size() {
        let mut corpus = build_int_corpus(vec![500, -3, 7, 100_000], &[]).unwrap();
        let pool = PermutationPool::build(corpus.len(), 3, SHUFFLE_SEED).unwrap();
        let mut runner = TrialRunner::new();
        for item_count in 1..=corpus.len() {
            runner.run_int_trial(&mut corpus, &pool, item_count, &SortedTable::new);
        }
    }

    #[test]
    fn full_sweep_hits_every_key_in_every_slot() {
        let (mut corpus, pool) = string_fixture();
        let mut runner = TrialRunner::new();
        // One pass per slot: the runner's counter visits each rotation.
        for _ in 0..corpus.len() {
            runner.run_string_trial_all_hits(&mut corpus, &pool, &ScanTable::new, None);
        }
    }

    #[test]
    #[should_panic(expected = "expected 21")]
    fn oversized_item_count_aborts() {
        let (mut corpus, pool) = string_fixture();
        let count = corpus.len() + 1;
        TrialRunner::new().run_string_trial(&mut corpus, &pool, count, &HashTable::new, None);
    }

    #[test]
    fn measure_returns_one_sample_per_size() {
        let (mut corpus, pool) = string_fixture();
        let mut runner = TrialRunner::new();
        let result = measure_string(
            "String-Hash",
            &mut runner,
            &mut corpus,
            &pool,
            10,
            4,
            &HashTable::new,
            None,
        );
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.samples[0].item_count, 1);
        assert_eq!(result.samples[3].item_count, 4);
        for sample in &result.samples {
            assert!(sample.millis_per_trial >= 0.0);
        }
    }
}
