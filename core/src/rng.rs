//! Deterministic random number generation.
//!
//! RULE: Nothing in the model may call any platform RNG.
//! Each scenario gets its own stream, seeded from the scenario's
//! stable index. Same inputs always reproduce the same rows — the
//! display layer can recompute freely without churn-selection jitter.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A per-scenario deterministic RNG.
///
/// Only used to pick WHICH cohort entry is removed when units churn
/// in a month. The churn COUNT is computed separately, so this never
/// changes active counts — only which ages remain for ramp math.
pub struct ScenarioRng {
    inner: Pcg64Mcg,
}

impl ScenarioRng {
    /// Derive the stream for a scenario from its stable index.
    /// The index must never change once a scenario is created.
    pub fn for_scenario(scenario_index: usize) -> Self {
        Self::from_seed_value(scenario_index as u64 * 7919 + 42)
    }

    pub fn from_seed_value(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0) from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll an index in [0, len). Panics if len is 0 — callers check
    /// for an empty cohort before drawing.
    pub fn index_below(&mut self, len: usize) -> usize {
        assert!(len > 0, "index_below called with empty range");
        let idx = (self.next_f64() * len as f64) as usize;
        // next_f64 < 1.0 guarantees idx < len, but keep the clamp as
        // the invariant the cohort code relies on.
        idx.min(len - 1)
    }
}
