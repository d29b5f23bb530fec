//! Random fixed-length key generation for the key-length sweep.
//!
//! Builds sets of distinct keys of an exact length from a small alphabet.
//! Each character position draws from its own independently shuffled copy of
//! the alphabet, so two generated keys differ at every position — which also
//! caps how many keys one call can produce at the alphabet size.

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, VecDeque};

/// Seeded generator of distinct fixed-length key strings.
pub struct KeyStringGenerator {
    alphabet: Vec<char>,
    rng: StdRng,
}

impl KeyStringGenerator {
    /// The alphabet must not contain repeated characters.
    pub fn new(alphabet: Vec<char>, rng: StdRng) -> Result<Self> {
        ensure!(!alphabet.is_empty(), "alphabet is empty");
        let distinct: BTreeSet<char> = alphabet.iter().copied().collect();
        ensure!(
            distinct.len() == alphabet.len(),
            "alphabet contains repeated characters"
        );
        Ok(Self { alphabet, rng })
    }

    /// Generate `count` distinct strings of exactly `length` characters,
    /// returned in sorted order.
    pub fn generate(&mut self, count: usize, length: usize) -> Result<Vec<String>> {
        ensure!(length > 0, "key length must be positive");
        ensure!(
            count <= self.alphabet.len(),
            "cannot draw {count} distinct keys from an alphabet of {} characters",
            self.alphabet.len()
        );

        let mut remaining: Vec<VecDeque<char>> = Vec::with_capacity(length);
        for _ in 0..length {
            let mut shuffled = self.alphabet.clone();
            shuffled.shuffle(&mut self.rng);
            remaining.push(shuffled.into());
        }

        let mut generated = BTreeSet::new();
        for _ in 0..count {
            let mut key = String::with_capacity(length);
            for position in remaining.iter_mut() {
                // Deques hold one char per alphabet member; the count bound
                // above guarantees a pop never comes up empty.
                key.push(position.pop_front().expect("alphabet deque exhausted"));
            }
            generated.insert(key);
        }
        ensure!(
            generated.len() == count,
            "generated {} distinct keys, expected {count}",
            generated.len()
        );
        Ok(generated.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generator(seed: u64) -> KeyStringGenerator {
        KeyStringGenerator::new(('a'..='t').collect(), StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn generates_exact_count_and_length() {
        let keys = generator(1).generate(20, 9).unwrap();
        assert_eq!(keys.len(), 20);
        for key in &keys {
            assert_eq!(key.chars().count(), 9);
        }
    }

    #[test]
    fn keys_are_distinct_and_sorted() {
        let keys = generator(2).generate(10, 4).unwrap();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, keys);
    }

    #[test]
    fn same_seed_reproduces_keys() {
        let a = generator(7).generate(8, 6).unwrap();
        let b = generator(7).generate(8, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_request_is_rejected() {
        assert!(generator(0).generate(21, 5).is_err());
    }

    #[test]
    fn zero_length_is_rejected() {
        assert!(generator(0).generate(1, 0).is_err());
    }

    #[test]
    fn repeated_alphabet_is_rejected() {
        assert!(KeyStringGenerator::new(vec!['a', 'a'], StdRng::seed_from_u64(0)).is_err());
    }
}
