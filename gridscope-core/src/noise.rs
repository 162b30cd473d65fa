//! Noise sources for signal synthesis
//!
//! Synthesis draws uniform samples in `[0, 1)` from a `NoiseSource` it is
//! handed, never from a global generator. That keeps every waveform
//! reproducible when a seeded source is injected:
//! - `SeededNoise`: `StdRng` from an explicit seed or OS entropy
//! - `FixedNoise`: constant output for tests (0.5 cancels all noise terms)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random source consumed by the synthesis engine
///
/// Implementations must be `Send` so the engine can hand one to each worker.
/// Sources are never shared between concurrent sensor computations.
pub trait NoiseSource: Send {
    /// Next uniform sample in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Restart the sequence from `seed`
    fn reseed(&mut self, seed: u64);
}

/// Pseudo-random noise backed by `StdRng`
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Deterministic source: the same seed always yields the same sequence
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Constant noise source for testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise {
    value: f64,
}

impl FixedNoise {
    /// Source that returns `value` forever
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Returns 0.5 forever, which zeroes every `(uniform - 0.5)` noise term
    pub fn centered() -> Self {
        Self::new(0.5)
    }
}

impl NoiseSource for FixedNoise {
    fn uniform(&mut self) -> f64 {
        self.value
    }

    fn reseed(&mut self, _seed: u64) {}
}

/// How the engine seeds per-sensor noise each recompute cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoisePolicy {
    /// Each sensor gets `SeededNoise::new(seed + sensor index)`
    Seeded(u64),
    /// Each sensor gets a fresh entropy-seeded source
    #[default]
    Entropy,
}

impl NoisePolicy {
    /// Build the source for the sensor at `index`
    pub fn source_for(&self, index: usize) -> SeededNoise {
        match *self {
            NoisePolicy::Seeded(seed) => SeededNoise::new(seed.wrapping_add(index as u64)),
            NoisePolicy::Entropy => SeededNoise::from_entropy(),
        }
    }
}
