//! Driven port for randomness used by ids, tracking numbers, delivery
//! estimates and example data.

use std::sync::{Mutex, PoisonError};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Source of uniform random values.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..bound`. A zero bound yields zero.
    fn below(&self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn unit(&self) -> f64;
}

/// Lowercase base36 string of `len` characters drawn from `random`.
///
/// # Examples
/// ```
/// use evo_backend::domain::ports::{SeededRandomSource, base36};
///
/// let suffix = base36(&SeededRandomSource::new(7), 7);
/// assert_eq!(suffix.len(), 7);
/// assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
/// ```
pub fn base36<R: RandomSource + ?Sized>(random: &R, len: usize) -> String {
    let bound = u32::try_from(BASE36.len()).unwrap_or(u32::MAX);
    (0..len)
        .map(|_| {
            let index = usize::try_from(random.below(bound)).unwrap_or_default();
            char::from(BASE36.get(index).copied().unwrap_or(b'0'))
        })
        .collect()
}

/// Process randomness backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomSource;

impl RandomSource for ThreadRandomSource {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }

    fn unit(&self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

/// Reproducible randomness from a fixed seed.
#[derive(Debug)]
pub struct SeededRandomSource(Mutex<SmallRng>);

impl SeededRandomSource {
    /// Create a generator that replays the same sequence for `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(SmallRng::seed_from_u64(seed)))
    }
}

impl RandomSource for SeededRandomSource {
    fn below(&self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }

    fn unit(&self) -> f64 {
        let mut rng = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        rng.r#gen::<f64>()
    }
}
