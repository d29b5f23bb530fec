//! Key-length sweep driver: for each total key length, measure full-decode
//! plus all-hits lookup cost against the linear-scan strategy, with a shared
//! prefix of a tenth of the key forcing comparisons past the first bytes.
//!
//! Output: one `prefix_len,total_len,millis_per_trial` CSV line per length.
//!
//! Usage: cargo run --release --bin key_length_sweep

use anyhow::Result;
use header_bench::keygen::KeyStringGenerator;
use header_bench::report::print_sweep_sample;
use header_bench::sweep::{run_case, SweepConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

const HEADER_COUNT: usize = 20;
const PERMUTATION_COUNT: usize = 71;
const TRIALS: u32 = 1_000_000;
const WARMUP_TRIALS: u32 = 100_000;
const MAX_KEY_LEN: usize = 128;

/// Seed for the key-string generator; fixed so every run sweeps the same
/// catalogues.
const KEYGEN_SEED: u64 = 948_676_238_753;

fn main() -> Result<()> {
    env_logger::init();

    let config = SweepConfig {
        header_count: HEADER_COUNT,
        permutation_count: PERMUTATION_COUNT,
        shuffle_seed: header_bench::shuffle::SHUFFLE_SEED,
    };
    // One distinct character per catalogue key, starting at 'a'.
    let alphabet: Vec<char> = ('a'..)
        .take(HEADER_COUNT)
        .collect();
    let mut generator = KeyStringGenerator::new(alphabet, StdRng::seed_from_u64(KEYGEN_SEED))?;

    log::info!("warmup: {WARMUP_TRIALS} trials");
    run_case(&config, &mut generator, 1, 2, WARMUP_TRIALS)?;
    log::info!("warmup complete");

    for total_len in 1..MAX_KEY_LEN {
        let prefix_len = total_len / 10;
        let sample = run_case(&config, &mut generator, prefix_len, total_len, TRIALS)?;
        print_sweep_sample(&sample);
    }

    log::info!("sweep complete");
    Ok(())
}
