//! Header-Set Decode Latency Benchmark
//!
//! Measures the cost of decoding a compact, length-prefixed binary header
//! format (string- or integer-keyed) into different associative container
//! strategies, then probing the result in randomized key order — the access
//! pattern of a hot message-processing path that parses 1–20 header entries
//! per message at high call volume.
//!
//! The workload is pre-built once: serialized buffers holding rotations of a
//! fixed key catalogue, and a pool of deterministic lookup permutations.
//! Buffers and permutations are handed out round-robin across trials so that
//! neither encoding cost nor a fixed probe order leaks into the timings.
//!
//! Run the size suites: `cargo run --release`
//! Run the key-length sweep: `cargo run --release --bin key_length_sweep`
//! Run criterion benches: `cargo bench`

pub mod corpus;
pub mod keygen;
pub mod report;
pub mod runner;
pub mod shuffle;
pub mod sweep;
pub mod table;
pub mod wire;
