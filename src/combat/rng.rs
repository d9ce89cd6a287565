//! Deterministic randomness for combat resolution. Uses SplitMix64 for throughput and good
//! statistical quality. Same seed produces the same sequence. Not cryptographically secure.

use std::collections::VecDeque;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// Seed used by the match runner when none is supplied.
pub const DEFAULT_SEED: u64 = 56;

/// The only randomness the engine consumes: a biased coin expressed in percent.
pub trait RngSource {
    /// Returns true with probability `probability_percent / 100`. Values outside `[0, 100]`
    /// behave like the nearest bound.
    fn bernoulli(&mut self, probability_percent: f64) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform sample in `[0, 1)` built from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() called with empty range");
        (self.next_u64() % len as u64) as usize
    }

    /// Fisher-Yates shuffle driven by this generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let swap_index = self.index(index + 1);
            items.swap(index, swap_index);
        }
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RngSource for Rng {
    fn bernoulli(&mut self, probability_percent: f64) -> bool {
        self.next_f64() < probability_percent / 100.0
    }
}

/// Replays a fixed sequence of outcomes, then keeps answering `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    outcomes: VecDeque<bool>,
    fallback: bool,
    draws: usize,
}

impl ScriptedRng {
    pub fn new(outcomes: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            fallback,
            draws: 0,
        }
    }

    /// Every draw answers `outcome`.
    pub fn always(outcome: bool) -> Self {
        Self::new([], outcome)
    }

    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RngSource for ScriptedRng {
    fn bernoulli(&mut self, _probability_percent: f64) -> bool {
        self.draws += 1;
        self.outcomes.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn splitmix64_different_seeds_differ() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn bernoulli_respects_bounds() {
        let mut rng = Rng::new(11);
        for _ in 0..1000 {
            assert!(!rng.bernoulli(0.0));
            assert!(rng.bernoulli(100.0));
        }
    }

    #[test]
    fn bernoulli_frequency_tracks_probability() {
        let mut rng = Rng::new(3);
        let hits = (0..20_000).filter(|_| rng.bernoulli(25.0)).count();
        let rate = hits as f64 / 20_000.0;
        assert!((rate - 0.25).abs() < 0.02, "observed rate {rate}");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Rng::new(5);
        let mut values: Vec<u32> = (0..10).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn scripted_rng_replays_then_falls_back() {
        let mut rng = ScriptedRng::new([true, false], true);
        assert!(rng.bernoulli(0.0));
        assert!(!rng.bernoulli(100.0));
        assert!(rng.bernoulli(0.0));
        assert_eq!(rng.draws(), 3);
    }
}
