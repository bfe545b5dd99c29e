use rand::Rng;
use rand::rngs::{StdRng, ThreadRng};

/// Source of uniform random indices for food placement.
///
/// Implemented for the `rand` generators used at runtime and for
/// [`ScriptedRandom`], which replays a fixed sequence.
pub trait RandomSource {
    /// Returns an index in `0..upper`. Callers never pass `upper == 0`.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl RandomSource for StdRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

impl RandomSource for ThreadRng {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// Deterministic source that cycles through a fixed list of values.
///
/// Each value is reduced modulo the requested upper bound, so `0` always picks
/// the first free cell in row-major order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }

        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value % upper
    }
}
