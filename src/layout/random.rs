use rand::{Rng, SeedableRng, rngs::StdRng};

/// Injectable source of randomness for template picks, decoration colors and noise.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform byte in `0..upper`.
    fn byte_below(&mut self, upper: u8) -> u8;
}

/// [`RandomSource`] backed by a `StdRng`, reproducible when seeded.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source for tests and reproducible runs.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn byte_below(&mut self, upper: u8) -> u8 {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// Always returns the first choice; noise comes out flat.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChoice;

impl RandomSource for FirstChoice {
    fn index(&mut self, _len: usize) -> usize {
        0
    }

    fn byte_below(&mut self, _upper: u8) -> u8 {
        0
    }
}
