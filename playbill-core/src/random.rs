//! Random source used to draw quiz questions
//!
//! Production draws from the thread-local RNG; tests inject a fixed index
//! so a selection can be asserted exactly.

use rand::Rng;

/// Picks an index in `0..len`.
pub trait RandomSource: Send + Sync {
    /// `len` is always greater than zero.
    fn index(&self, len: usize) -> usize;
}

/// Uniform draw from `rand::thread_rng`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Always picks the same position, clamped to the last element
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn index(&self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_random_stays_in_range() {
        let rng = ThreadRandom;
        for len in 1..50 {
            assert!(rng.index(len) < len);
        }
    }

    #[test]
    fn fixed_index_clamps() {
        assert_eq!(FixedIndex(2).index(5), 2);
        assert_eq!(FixedIndex(9).index(3), 2);
        assert_eq!(FixedIndex(0).index(1), 0);
    }
}
