//! A skiplist is a way of storing elements in such a way that elements can be
//! efficiently found, inserted and removed, all in `O(log(n))` on average and
//! without any rebalancing.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ----------> <tail>
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ----------> <tail>
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] -> <tail>
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] -> <tail>
//! ```
//!
//! where each node `[x]` has a randomly sized tower of links to nodes further
//! down the list, allowing searches to skip ahead. Every level starts at the
//! `<head>` sentinel and is terminated by the single `<tail>` sentinel, which
//! orders after every key, so walks never need to check for the end of a
//! level.
//!
//! The [`SkipList`] keeps its keys ordered by a [`Comparator`], which **must**
//! be well-behaved. Given some ordering function `f(a, b)`, it must satisfy:
//!
//! - Be well defined: `f(a, b)` should always return the same value
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and `f(a, b)
//!   == Equal == f(b, a)`.
//! - Be transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then `f(a,
//!   c) == Greater`.
//!
//! A misbehaving comparator cannot cause undefined behaviour (nodes are linked
//! by index, not by pointer), but the ordering of the list is then
//! unspecified.
//!
//! ```
//! use sentinel_skiplist::{Config, SkipList};
//!
//! let mut list = SkipList::with_config(Config::new(16, 0.5))?;
//! list.extend([5, 3, 8, 1]);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
//!
//! assert!(list.delete(&3));
//! assert!(!list.delete(&3));
//! assert_eq!(list.len(), 3);
//! # Ok::<(), sentinel_skiplist::SkipListError>(())
//! ```

mod arena;
pub mod comparator;
pub mod config;
pub mod error;
pub mod level_generator;
pub mod skiplist;
mod skipnode;

pub use comparator::{Comparator, NaturalOrder};
pub use config::Config;
pub use error::SkipListError;
pub use level_generator::{Geometric, GeometricError, LevelGenerator, UniformSource};
pub use skiplist::SkipList;
