//! Skiplists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n - 1`
//! (with `0 < p < 1`).
//!
//! It is very unlikely that this will need to be changed as the default should
//! suffice, but if need be custom level generators can be implemented.

pub mod geometric;

use rand::{
    Rng,
    rngs::{SmallRng, StdRng, ThreadRng},
};

pub use geometric::{Geometric, GeometricError};

// ////////////////////////////////////////////////////////////////////////////
// Level Generator
// ////////////////////////////////////////////////////////////////////////////

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a [`LevelGenerator`].
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist.
    #[must_use]
    fn total(&self) -> usize;

    /// Generate the tower height for a new node in the range `[1, total]`.
    ///
    /// A node of height `h` is linked into levels `0..h`. This function should
    /// _never_ return `0` or a height greater than
    /// [`total`][LevelGenerator::total].
    #[must_use]
    fn height(&mut self) -> usize;
}

// ////////////////////////////////////////////////////////////////////////////
// Uniform Source
// ////////////////////////////////////////////////////////////////////////////

/// A source of uniformly distributed numbers in `[0, 1)`.
///
/// The level generators only ever need a single uniform draw at a time, which
/// keeps them independent of any particular random number generator and allows
/// deterministic sources to be injected in tests.
pub trait UniformSource {
    /// Draw the next number in `[0, 1)`.
    fn sample(&mut self) -> f64;
}

impl UniformSource for SmallRng {
    #[inline]
    fn sample(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl UniformSource for StdRng {
    #[inline]
    fn sample(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl UniformSource for ThreadRng {
    #[inline]
    fn sample(&mut self) -> f64 {
        self.random::<f64>()
    }
}
