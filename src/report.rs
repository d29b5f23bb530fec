//! Suite results and CSV emission.
//!
//! The CSV blocks on stdout are the benchmark's only artifact (they feed
//! straight into plotting); progress and diagnostics go through `log` on
//! stderr so the stream stays machine-readable.

/// One measured configuration of a size suite: input size and average cost.
#[derive(Debug, Clone)]
pub struct SizeSample {
    pub item_count: usize,
    pub millis_per_trial: f64,
}

/// All samples for one container/key-kind combination.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub label: String,
    pub samples: Vec<SizeSample>,
}

impl SuiteResult {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            samples: Vec::new(),
        }
    }

    pub fn push(&mut self, sample: SizeSample) {
        self.samples.push(sample);
    }
}

/// One key-length sweep measurement.
#[derive(Debug, Clone)]
pub struct SweepSample {
    pub prefix_len: usize,
    pub total_len: usize,
    pub millis_per_trial: f64,
}

/// Print a suite as a labelled CSV block: heading line, then
/// `item_count,millis_per_trial` per size.
pub fn print_suite(result: &SuiteResult) {
    println!("{}", result.label);
    for sample in &result.samples {
        println!("{},{}", sample.item_count, sample.millis_per_trial);
    }
}

/// Print one sweep line: `prefix_len,total_len,millis_per_trial`.
pub fn print_sweep_sample(sample: &SweepSample) {
    println!(
        "{},{},{}",
        sample.prefix_len, sample.total_len, sample.millis_per_trial
    );
}
