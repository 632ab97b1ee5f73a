//! Construction parameters of a skiplist.

use crate::{
    error::SkipListError,
    level_generator::{
        Geometric,
        geometric::{DEFAULT_LEVELS, DEFAULT_PROBABILITY},
    },
};

/// Number of levels needed for a list expected to hold `n` elements, that is
/// `ceil(log2(n)) + 1`.
///
/// A list expected to hold a single element needs a single level, in which
/// case the skiplist degenerates into a sorted linked list.
#[must_use]
pub fn levels_required(n: usize) -> usize {
    // `n - 1` has `ceil(log2(n))` significant bits.
    let mut levels = 1;
    let mut rest = n.saturating_sub(1);
    while rest > 0 {
        rest >>= 1;
        levels += 1;
    }
    levels
}

/// The parameters fixed when a [`SkipList`](crate::SkipList) is created.
///
/// Neither can be changed afterwards: the number of levels is derived from
/// `expected_size` once, and every tower is drawn with the same promotion
/// probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The number of elements the list is expected to hold.
    pub expected_size: usize,
    /// The probability that a node is promoted to the next level.
    pub probability: f64,
}

impl Config {
    /// Create a configuration for a list of `expected_size` elements using
    /// promotion probability `probability`.
    #[inline]
    #[must_use]
    pub fn new(expected_size: usize, probability: f64) -> Self {
        Config {
            expected_size,
            probability,
        }
    }

    /// The number of levels the list will use.
    ///
    /// # Errors
    ///
    /// Fails with [`SkipListError::ZeroExpectedSize`] if `expected_size` is 0.
    #[inline]
    pub fn max_level(&self) -> Result<usize, SkipListError> {
        if self.expected_size == 0 {
            return Err(SkipListError::ZeroExpectedSize);
        }
        Ok(levels_required(self.expected_size))
    }

    /// Build the level generator described by this configuration.
    ///
    /// # Errors
    ///
    /// Fails if `expected_size` is 0 or `probability` is outside `(0, 1)`.
    #[inline]
    pub fn level_generator(&self) -> Result<Geometric, SkipListError> {
        Ok(Geometric::new(self.max_level()?, self.probability)?)
    }
}

impl Default for Config {
    /// Sized so that the list gets 16 levels with `p = 1/2`.
    #[inline]
    fn default() -> Self {
        Config {
            expected_size: 1 << (DEFAULT_LEVELS - 1),
            probability: DEFAULT_PROBABILITY,
        }
    }
}
