//! Decode-benchmark driver: measures header-set decode + permuted lookup
//! cost for every container strategy and key kind, printing one CSV block
//! (`item_count,millis_per_trial`) per suite.
//!
//! Usage:
//!   cargo run --release
//!   RUST_LOG=info cargo run --release   # progress on stderr

use header_bench::corpus::{
    build_int_corpus, build_string_corpus, default_catalogue, default_int_catalogue,
};
use header_bench::report::print_suite;
use header_bench::runner::{measure_int, measure_string, TrialRunner};
use header_bench::shuffle::{PermutationPool, SHUFFLE_SEED};
use header_bench::table::{CachingInterner, HashTable, ScanTable, SortedTable};

const MAX_ITEMS: usize = 20;
const TRIALS: u32 = 1_000_000;
const WARMUP_TRIALS: u32 = 100_000;
const WARMUP_ITEMS: usize = 12;
const PERMUTATION_COUNT: usize = 31;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut string_corpus = build_string_corpus(default_catalogue(), &[])?;
    let mut int_corpus = build_int_corpus(default_int_catalogue(), &[])?;
    anyhow::ensure!(
        string_corpus.len() == MAX_ITEMS && int_corpus.len() == MAX_ITEMS,
        "catalogues must hold exactly {MAX_ITEMS} keys to cover every trial size"
    );
    let pool = PermutationPool::build(MAX_ITEMS, PERMUTATION_COUNT, SHUFFLE_SEED)?;
    let mut runner = TrialRunner::new();

    log::info!(
        "corpus ready: {} string slots, {} int slots, {} permutations",
        string_corpus.len(),
        int_corpus.len(),
        pool.len()
    );

    // Untimed pass over every container/key-kind combination before any
    // timed batch; results are discarded.
    log::info!("warmup: {WARMUP_TRIALS} trials per combination");
    for _ in 0..WARMUP_TRIALS {
        runner.run_int_trial(&mut int_corpus, &pool, WARMUP_ITEMS, &SortedTable::new);
        runner.run_int_trial(&mut int_corpus, &pool, WARMUP_ITEMS, &HashTable::new);
        runner.run_int_trial(&mut int_corpus, &pool, WARMUP_ITEMS, &ScanTable::new);
        runner.run_string_trial(&mut string_corpus, &pool, WARMUP_ITEMS, &SortedTable::new, None);
        runner.run_string_trial(&mut string_corpus, &pool, WARMUP_ITEMS, &HashTable::new, None);
        runner.run_string_trial(&mut string_corpus, &pool, WARMUP_ITEMS, &ScanTable::new, None);
    }
    log::info!("warmup complete");

    log::info!("measuring integer-keyed suites");
    print_suite(&measure_int(
        "Int-Sorted",
        &mut runner,
        &mut int_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &SortedTable::new,
    ));
    print_suite(&measure_int(
        "Int-Hash",
        &mut runner,
        &mut int_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &HashTable::new,
    ));
    print_suite(&measure_int(
        "Int-Scan",
        &mut runner,
        &mut int_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &ScanTable::new,
    ));

    log::info!("measuring string-keyed suites");
    print_suite(&measure_string(
        "String-Sorted",
        &mut runner,
        &mut string_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &SortedTable::new,
        None,
    ));
    print_suite(&measure_string(
        "String-Hash",
        &mut runner,
        &mut string_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &HashTable::new,
        None,
    ));
    print_suite(&measure_string(
        "String-Hash-pre10",
        &mut runner,
        &mut string_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &|| HashTable::with_capacity(10),
        None,
    ));
    let interner = CachingInterner::new();
    print_suite(&measure_string(
        "String-Hash-interned",
        &mut runner,
        &mut string_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &HashTable::new,
        Some(&interner),
    ));
    print_suite(&measure_string(
        "String-Scan",
        &mut runner,
        &mut string_corpus,
        &pool,
        TRIALS,
        MAX_ITEMS,
        &ScanTable::new,
        None,
    ));

    log::info!("all suites complete");
    Ok(())
}
