//! Injectable randomness.
//!
//! Every random draw the engine makes goes through [`RandomSource`], so a
//! palette is a pure function of its request and the sequence of values the
//! source hands out. Production code uses [`ThreadRandom`]; reproducible runs
//! use [`Xorshift32`]; tests script the exact sequence with [`ScriptedRandom`].

use rand::Rng;
use rand::rngs::ThreadRng;

/// A uniform source of `f64` values in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[lo, lo + span)`, as `f32`.
    fn range(&mut self, lo: f32, span: f32) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let t = self.next_f64() as f32;
        span.mul_add(t, lo)
    }

    /// Uniform hue angle in `[0, 360)`.
    fn hue(&mut self) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let h = (self.next_f64() * 360.0) as f32;
        // f64 → f32 rounding can land exactly on 360.0.
        if h >= 360.0 { 0.0 } else { h }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

// ---------------------------------------------------------------------------
// ThreadRandom
// ---------------------------------------------------------------------------

/// The process's thread-local RNG from `rand`.
#[derive(Debug, Clone, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::thread_rng() }
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

// ---------------------------------------------------------------------------
// Xorshift32 — a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal seedable PRNG.
///
/// The sequence for a given seed never changes between releases, so a seed
/// printed today reproduces the same palette tomorrow.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// A zero seed would lock the generator at zero; it is bumped to 1.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomSource for Xorshift32 {
    fn next_f64(&mut self) -> f64 {
        // Divide by 2^32 so u32::MAX maps below 1.0.
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

// ---------------------------------------------------------------------------
// ScriptedRandom
// ---------------------------------------------------------------------------

/// Replays a fixed list of values, cycling when it runs out (or settling on
/// a constant tail, see [`ScriptedRandom::then_constant`]).
///
/// Counts every draw so callers can assert how much randomness was used.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    tail: Option<f64>,
    draws: usize,
}

impl ScriptedRandom {
    /// Script the given values. An empty script replays `0.0`.
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        Self { values, tail: None, draws: 0 }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Replay `prefix` once, then return `tail` forever.
    #[must_use]
    pub fn then_constant(prefix: &[f64], tail: f64) -> Self {
        Self {
            values: prefix.to_vec(),
            tail: Some(tail),
            draws: 0,
        }
    }

    /// Number of values handed out so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let v = match (self.values.get(self.draws), self.tail) {
            (Some(&v), _) => v,
            (None, Some(tail)) => tail,
            (None, None) => self.values[self.draws % self.values.len()],
        };
        self.draws += 1;
        v
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
