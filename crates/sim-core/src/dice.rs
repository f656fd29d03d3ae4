//! Seedable random source threaded through every stochastic operation.
//!
//! The simulation never touches ambient randomness: each draw goes through a
//! [`Dice`] value owned by the orchestrator, so a run is fully reproducible
//! from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic random source backed by a ChaCha8 stream cipher.
///
/// The generator state serializes with the rest of the game, so a loaded
/// save continues the exact random sequence it was saved with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform float in [0, 1).
    pub fn roll(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// True with probability `p`. Values outside [0, 1] clamp to never/always.
    pub fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() on empty range");
        self.rng.gen_range(0..len)
    }

    /// Uniform integer in `min..=max`.
    pub fn between(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max);
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `min..max`.
    pub fn between_f64(&mut self, min: f64, max: f64) -> f64 {
        debug_assert!(min <= max);
        self.rng.gen_range(min..max)
    }

    /// Uniform pick from a slice; `None` when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.index(items.len());
        Some(&items[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Dice::from_seed(42);
        let mut b = Dice::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.roll().to_bits(), b.roll().to_bits());
        }
    }

    #[test]
    fn between_is_inclusive() {
        let mut dice = Dice::from_seed(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..10_000 {
            let v = dice.between(1, 3);
            assert!((1..=3).contains(&v));
            seen_min |= v == 1;
            seen_max |= v == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn serde_roundtrip_continues_stream() {
        let mut dice = Dice::from_seed(99);
        let _ = dice.roll();
        let json = serde_json::to_string(&dice).unwrap();
        let mut restored: Dice = serde_json::from_str(&json).unwrap();
        assert_eq!(dice.roll().to_bits(), restored.roll().to_bits());
    }

    #[test]
    fn chance_statistics() {
        let mut dice = Dice::from_seed(1234);
        let hits = (0..10_000).filter(|_| dice.chance(0.3)).count();
        let rate = hits as f64 / 10_000.0;
        assert!((rate - 0.3).abs() < 0.02, "observed {rate}");
    }
}
