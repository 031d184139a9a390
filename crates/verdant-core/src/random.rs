//! Injectable randomness for particle attribute generation.
//!
//! Every random draw the engines make goes through [`RandomSource`], so a
//! seeded generator reproduces a run bit-for-bit and tests can script exact
//! attribute values with [`ScriptedRandom`].

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform sample in `[base, base + span)`.
    #[inline]
    fn range(&mut self, base: f64, span: f64) -> f64 {
        base + self.unit() * span
    }

    /// Uniform index in `0..len`; `len` must be non-zero.
    #[inline]
    fn index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values outside `[0, 1)` are clamped into it.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let mut values: Vec<f64> = values.into();
        if values.is_empty() {
            values.push(0.0);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0 - f64::EPSILON);
        }
        Self { values, cursor: 0 }
    }

    /// Number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
