//! Geometric level generator.

use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::level_generator::{LevelGenerator, UniformSource};

/// Number of levels used by [`Geometric::default`].
pub const DEFAULT_LEVELS: usize = 16;

/// Promotion probability used by [`Geometric::default`].
pub const DEFAULT_PROBABILITY: f64 = 0.5;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when creating a [`Geometric`] level generator.
#[expect(
    clippy::module_name_repetitions,
    reason = "Using 'Error' would be too generic and may cause confusion."
)]
#[non_exhaustive]
pub enum GeometricError {
    /// The maximum number of levels must be non-zero.
    #[error("max must be non-zero.")]
    ZeroMax,
    /// The probability `p` must be in the range `(0, 1)`.
    #[error("p must be in (0, 1).")]
    InvalidProbability,
}

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `n`,
/// then the probability that it is present at level `n + 1` is some constant
/// `p` in `(0, 1)`. This produces a geometric distribution, albeit truncated
/// at the maximum number of levels allowed, so that
/// `P(height >= k) = p^(k - 1)` for every `k` below the maximum.
#[derive(Debug, Clone)]
pub struct Geometric<U = SmallRng> {
    /// The total number of levels that are assumed to exist.
    total: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The uniform source driving the promotions.
    source: U,
}

impl Geometric {
    /// Create a new geometric level generator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// The generator is driven by a [`SmallRng`] seeded from the thread-local
    /// generator.
    ///
    /// # Errors
    ///
    /// `p` must be in `(0, 1)` and `total` must be greater or equal to 1.
    #[inline]
    pub fn new(total: usize, p: f64) -> Result<Self, GeometricError> {
        Self::with_source(total, p, SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<U> Geometric<U> {
    /// Create a new geometric level generator drawing from `source`.
    ///
    /// # Errors
    ///
    /// `p` must be in `(0, 1)` and `total` must be greater or equal to 1.
    #[inline]
    pub fn with_source(total: usize, p: f64, source: U) -> Result<Self, GeometricError> {
        if total == 0 {
            return Err(GeometricError::ZeroMax);
        }
        if !(0.0 < p && p < 1.0) {
            return Err(GeometricError::InvalidProbability);
        }
        Ok(Geometric { total, p, source })
    }

    /// The probability that a node is promoted to the next level.
    #[inline]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    /// A generator with 16 levels and `p = 1/2`.
    #[inline]
    fn default() -> Self {
        Geometric {
            total: DEFAULT_LEVELS,
            p: DEFAULT_PROBABILITY,
            source: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl<U> LevelGenerator for Geometric<U>
where
    U: UniformSource,
{
    #[inline]
    fn total(&self) -> usize {
        self.total
    }

    /// Generate a height by repeated coin flips.
    ///
    /// Starting from a height of 1, the tower grows by one level for as long
    /// as a uniform draw lands below `p`, and never beyond the total number
    /// of levels. A draw is taken before the bound is checked, so a tower that
    /// reaches the top consumes one more draw than its height suggests.
    #[inline]
    fn height(&mut self) -> usize {
        let mut height = 1;
        while self.source.sample() < self.p && height < self.total {
            height += 1;
        }
        height
    }
}
