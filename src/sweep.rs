//! Key-length sweep: measures how string key length — and a shared prefix
//! that forces comparisons deeper into the key — affects decode + lookup
//! cost for one container strategy.
//!
//! Each test case gets a fresh catalogue of generated keys (shared prefix
//! plus distinct suffixes), its own rotated corpus, and its own permutation
//! pool, then times full-decode trials where every permuted lookup must hit.

use crate::corpus::build_string_corpus;
use crate::keygen::KeyStringGenerator;
use crate::report::SweepSample;
use crate::runner::TrialRunner;
use crate::shuffle::PermutationPool;
use crate::table::ScanTable;
use anyhow::{ensure, Result};
use std::time::Instant;

/// Fixed parameters shared by every case of one sweep.
pub struct SweepConfig {
    /// Keys per catalogue (also entries decoded per trial).
    pub header_count: usize,
    /// Lookup-order pool size.
    pub permutation_count: usize,
    /// Base seed for each case's permutation pool; mixed with the key
    /// length so cases probe in different (but reproducible) orders.
    pub shuffle_seed: u64,
}

/// Build and time one sweep case; returns the `prefix,total,ms` sample.
///
/// `prefix_len` must be shorter than `total_len` — a key that is all prefix
/// leaves no room for the distinct suffixes that keep catalogue keys unique.
pub fn run_case(
    config: &SweepConfig,
    generator: &mut KeyStringGenerator,
    prefix_len: usize,
    total_len: usize,
    trials: u32,
) -> Result<SweepSample> {
    ensure!(
        prefix_len < total_len,
        "prefix length {prefix_len} must be shorter than total key length {total_len}"
    );

    let prefix = if prefix_len > 0 {
        generator.generate(1, prefix_len)?.remove(0)
    } else {
        String::new()
    };
    let suffixes = generator.generate(config.header_count, total_len - prefix_len)?;
    let keys: Vec<String> = suffixes
        .into_iter()
        .map(|suffix| format!("{prefix}{suffix}"))
        .collect();

    let mut corpus = build_string_corpus(keys, &[])?;
    let pool = PermutationPool::build(
        config.header_count,
        config.permutation_count,
        config.shuffle_seed ^ total_len as u64,
    )?;
    let mut runner = TrialRunner::new();

    let start = Instant::now();
    for _ in 0..trials {
        runner.run_string_trial_all_hits(&mut corpus, &pool, &ScanTable::new, None);
    }
    let elapsed = start.elapsed();

    Ok(SweepSample {
        prefix_len,
        total_len,
        millis_per_trial: elapsed.as_secs_f64() * 1e3 / trials as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SweepConfig {
        SweepConfig {
            header_count: 8,
            permutation_count: 5,
            shuffle_seed: 42,
        }
    }

    fn generator() -> KeyStringGenerator {
        KeyStringGenerator::new(('a'..='h').collect(), StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn case_runs_and_reports_lengths() {
        let sample = run_case(&config(), &mut generator(), 1, 6, 25).unwrap();
        assert_eq!(sample.prefix_len, 1);
        assert_eq!(sample.total_len, 6);
        assert!(sample.millis_per_trial >= 0.0);
    }

    #[test]
    fn zero_prefix_case_runs() {
        let sample = run_case(&config(), &mut generator(), 0, 3, 10).unwrap();
        assert_eq!(sample.prefix_len, 0);
    }

    #[test]
    fn prefix_not_shorter_than_total_is_rejected() {
        assert!(run_case(&config(), &mut generator(), 4, 4, 1).is_err());
        assert!(run_case(&config(), &mut generator(), 5, 4, 1).is_err());
    }
}
