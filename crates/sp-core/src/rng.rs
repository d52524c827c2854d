//! Deterministic per-drone and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! The field's spawn draws come from one [`SimRng`] seeded with the config
//! seed.  Each drone owns an [`AgentRng`] for its measurement noise, seeded
//! by:
//!
//!   seed = global_seed XOR (drone_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio, so
//! consecutive ids land far apart in seed space.  Drones never share RNG
//! state, which keeps the per-drone update order-independent and lets the
//! `parallel` feature reproduce the sequential run exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::DroneId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-drone deterministic RNG.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a drone id.
    pub fn new(global_seed: u64, drone: DroneId) -> Self {
        let seed = global_seed ^ (drone.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Symmetric noise in `[-amplitude / 2, amplitude / 2)`.
    #[inline]
    pub fn noise(&mut self, amplitude: f64) -> f64 {
        (self.0.r#gen::<f64>() - 0.5) * amplitude
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global draws (anomaly spawning).
///
/// Used only from the single-threaded part of the tick.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Bernoulli draw: `true` when a fresh uniform `[0, 1)` sample is below
    /// `p`.  Unlike `Rng::gen_bool`, out-of-range `p` is not an error: `p <= 0`
    /// never fires and `p >= 1` always does.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.0.r#gen::<f64>() < p
    }
}
