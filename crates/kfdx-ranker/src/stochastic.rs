//! Source of the bounded stochastic scoring term.
//!
//! The ranker never touches ambient randomness: every run receives a
//! `StochasticSource` explicitly, so a fixed seed reproduces a run exactly
//! and tests can freeze the term altogether.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lower bound of the stochastic term.
pub const STOCHASTIC_MIN: f64 = 0.4;
/// Upper bound of the stochastic term.
pub const STOCHASTIC_MAX: f64 = 0.6;

/// Trait for drawing the per-target stochastic score.
///
/// Implementations must return values in `[STOCHASTIC_MIN, STOCHASTIC_MAX]`.
pub trait StochasticSource {
    /// Draw one value. Called once per target, in input order.
    fn draw(&mut self) -> f64;

    /// Seed that reproduces this source, if it has one.
    fn seed(&self) -> Option<u64> {
        None
    }
}

// ── Seeded uniform generator ────────────────────────────────────────────────

/// Uniform draws over `[STOCHASTIC_MIN, STOCHASTIC_MAX]` from a seeded `StdRng`.
pub struct SeededUniform {
    rng: StdRng,
    dist: Uniform<f64>,
    seed: u64,
}

impl SeededUniform {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: Uniform::new_inclusive(STOCHASTIC_MIN, STOCHASTIC_MAX),
            seed,
        }
    }

    /// Pick a fresh seed from OS entropy. The chosen seed is still exposed
    /// through `seed()` so the run can be replayed.
    pub fn from_entropy() -> Self {
        let seed = StdRng::from_entropy().gen::<u64>();
        Self::new(seed)
    }

    /// Use `seed` if given, otherwise fall back to entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }
}

impl StochasticSource for SeededUniform {
    fn draw(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

// ── Fixed source for testing ────────────────────────────────────────────────

/// Always returns the same value. Freezes the stochastic term in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedStochastic(pub f64);

impl FixedStochastic {
    /// Midpoint of the stochastic range.
    pub fn midpoint() -> Self {
        Self((STOCHASTIC_MIN + STOCHASTIC_MAX) / 2.0)
    }
}

impl StochasticSource for FixedStochastic {
    fn draw(&mut self) -> f64 {
        self.0
    }
}
