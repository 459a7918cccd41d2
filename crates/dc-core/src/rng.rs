//! Deterministic per-person and run-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each sampled person gets a fresh `SmallRng` seeded by:
//!
//!   seed = base_seed XOR (person_seed * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive person seeds uniformly across the seed space.
//! This means:
//!
//! - A person's draw depends only on the engine's base seed and the person's
//!   own stable seed, never on batch composition or processing order.
//! - Re-running a calibration with the same population and base seed
//!   reproduces every assignment exactly.
//! - No RNG state is shared between workers; no synchronisation needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── PersonRng ─────────────────────────────────────────────────────────────────

/// Per-person deterministic RNG.
///
/// Created on demand by the sampler; it lives only for the duration of one
/// draw, so there is nothing to store alongside the population.
pub struct PersonRng(SmallRng);

impl PersonRng {
    /// Seed deterministically from the engine's base seed and a person seed.
    pub fn new(base_seed: u64, person_seed: u64) -> Self {
        let seed = base_seed ^ person_seed.wrapping_mul(MIXING_CONSTANT);
        PersonRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform variate in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── SeedRng ───────────────────────────────────────────────────────────────────

/// Run-level RNG for synthesizing inputs (test populations, per-person seeds).
///
/// Used only in single-threaded contexts.  Give each thread its own child
/// via [`SeedRng::child`] if parallel generation is needed.
pub struct SeedRng(SmallRng);

impl SeedRng {
    pub fn new(seed: u64) -> Self {
        SeedRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SeedRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SeedRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SeedRng(SmallRng::seed_from_u64(child_seed))
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

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
