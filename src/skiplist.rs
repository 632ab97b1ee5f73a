//! An always-ordered skiplist with head and tail sentinels.

use std::{cmp::Ordering, fmt, hash, hash::Hash, iter};

use tracing::{debug, trace, warn};

use crate::{
    arena::NodeArena,
    comparator::{Comparator, NaturalOrder},
    config::Config,
    error::SkipListError,
    level_generator::{Geometric, LevelGenerator},
    skipnode::{HEAD, SkipNode, TAIL},
};

pub use crate::skipnode::{IntoIter, Iter, LevelIter};

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist stores keys such that they are always sorted, and provides an
/// efficient way to insert, remove and look them up, all in `O(log n)` on
/// average.
///
/// The list tolerates duplicates: equal keys are kept in insertion order, and
/// [`remove`](Self::remove) takes out the earliest inserted one first.
///
/// Every node gets a random tower height from the level generator `G` when it
/// is inserted, and keeps it until it is removed. The number of levels is fixed
/// when the list is created (see [`Config`]).
///
/// The list has no internal synchronisation. Sharing it between threads
/// requires an external lock around every operation, including iteration.
#[derive(Clone)]
pub struct SkipList<T, C = NaturalOrder, G = Geometric> {
    // Owns every node, sentinels included.
    nodes: NodeArena<T>,
    // Scratch space for `locate`, one entry per level.
    update: Box<[usize]>,
    len: usize,
    comparator: C,
    level_generator: G,
}

/// How far `locate` walks along each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    /// Stop before the first key greater than or equal to the target.
    Before,
    /// Stop before the first key strictly greater than the target.
    Through,
}

impl Walk {
    #[inline]
    fn proceeds(self, ordering: Ordering) -> bool {
        match self {
            Walk::Before => ordering == Ordering::Less,
            Walk::Through => ordering != Ordering::Greater,
        }
    }
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T>
where
    T: Ord,
{
    /// Create a new skiplist ordered by `T`'s [`Ord`] implementation, with the
    /// default 16 levels and `p = 1/2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist: SkipList<i64> = SkipList::new();
    /// assert_eq!(skiplist.max_level(), 16);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Geometric::default(), NaturalOrder)
    }

    /// Constructs a new, empty skiplist with the number of levels suited to
    /// `expected_size` elements, `ceil(log2(expected_size)) + 1`,
    /// and `p = 1/2`.
    ///
    /// # Errors
    ///
    /// Fails if `expected_size` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::with_capacity(100)?;
    /// skiplist.extend(0..100);
    /// assert_eq!(skiplist.max_level(), 8);
    /// # Ok::<(), sentinel_skiplist::SkipListError>(())
    /// ```
    #[inline]
    pub fn with_capacity(expected_size: usize) -> Result<Self, SkipListError> {
        Self::with_config(Config {
            expected_size,
            ..Config::default()
        })
    }

    /// Constructs a new, empty skiplist from `config`.
    ///
    /// # Errors
    ///
    /// Fails if the expected size is 0 or the probability is outside
    /// `(0, 1)`. No list is created in that case.
    #[inline]
    pub fn with_config(config: Config) -> Result<Self, SkipListError> {
        Self::with_comparator(config, NaturalOrder)
    }
}

impl<T, C> SkipList<T, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty skiplist from `config` ordered by `comparator`.
    ///
    /// # Errors
    ///
    /// Fails if the expected size is 0 or the probability is outside
    /// `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::{Config, SkipList};
    ///
    /// // Store even numbers before odd ones and sort as usual within same parity group.
    /// let mut skiplist = SkipList::with_comparator(Config::new(64, 0.25), |a: &u64, b: &u64| {
    ///     (a % 2).cmp(&(b % 2)).then(a.cmp(b))
    /// })?;
    /// skiplist.extend(0..6);
    /// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [0, 2, 4, 1, 3, 5]);
    /// # Ok::<(), sentinel_skiplist::SkipListError>(())
    /// ```
    #[inline]
    pub fn with_comparator(config: Config, comparator: C) -> Result<Self, SkipListError> {
        let level_generator = config.level_generator()?;
        debug!(
            expected_size = config.expected_size,
            probability = config.probability,
            "configured skiplist"
        );
        Self::with_level_generator(level_generator, comparator)
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    /// Constructs a new, empty skiplist drawing tower heights from
    /// `level_generator` and ordered by `comparator`.
    ///
    /// The list uses as many levels as the generator reports through
    /// [`LevelGenerator::total`].
    ///
    /// # Errors
    ///
    /// Fails with [`SkipListError::ZeroLevels`] if the generator reports no
    /// levels.
    #[inline]
    pub fn with_level_generator(level_generator: G, comparator: C) -> Result<Self, SkipListError> {
        if level_generator.total() == 0 {
            return Err(SkipListError::ZeroLevels);
        }
        Ok(Self::from_parts(level_generator, comparator))
    }

    fn from_parts(level_generator: G, comparator: C) -> Self {
        let levels = level_generator.total();
        debug!(levels, "created skiplist");
        SkipList {
            nodes: NodeArena::new(levels),
            update: vec![HEAD; levels].into_boxed_slice(),
            len: 0,
            comparator,
            level_generator,
        }
    }

    /// Insert the key into the skiplist, after any keys equal to it.
    ///
    /// Like the standard collections, this aborts if memory for the new node
    /// cannot be allocated; see [`try_insert`](Self::try_insert) for a fallible
    /// version.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    ///
    /// skiplist.insert(5);
    /// skiplist.insert(0);
    /// skiplist.insert(5);
    /// assert_eq!(skiplist.len(), 3);
    /// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [0, 5, 5]);
    /// ```
    pub fn insert(&mut self, key: T) {
        let height = self.random_height();
        self.link(key, vec![TAIL; height].into_boxed_slice());
    }

    /// Insert the key into the skiplist, after any keys equal to it, reporting
    /// allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Fails with [`SkipListError::AllocationFailure`] if memory for the new
    /// node cannot be reserved. The list is left untouched in that case, and
    /// the level generator is only consulted once the arena slot is secured.
    ///
    /// Towers never exceed [`max_level`](Self::max_level) links, and the head
    /// already holds that many, so in practice only an exhausted allocator can
    /// make this fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.try_insert("b")?;
    /// skiplist.try_insert("a")?;
    /// assert_eq!(skiplist.first(), Some(&"a"));
    /// # Ok::<(), sentinel_skiplist::SkipListError>(())
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<(), SkipListError> {
        if let Err(err) = self.nodes.try_reserve() {
            warn!(%err, "failed to allocate skiplist slot");
            return Err(err.into());
        }
        let height = self.random_height();
        let mut links = Vec::new();
        if let Err(err) = links.try_reserve_exact(height) {
            warn!(%err, height, "failed to allocate skiplist tower");
            return Err(err.into());
        }
        links.resize(height, TAIL);
        self.link(key, links.into_boxed_slice());
        Ok(())
    }

    /// Draw the height of a new tower.
    fn random_height(&mut self) -> usize {
        let height = self.level_generator.height();
        debug_assert!(
            (1..=self.max_level()).contains(&height),
            "level generator produced height {height} outside [1, {}]",
            self.max_level()
        );
        height.clamp(1, self.max_level())
    }

    /// Splice a new node holding `key` with the tower `links` after the last
    /// node less than or equal to `key`, on every level of the tower.
    ///
    /// Nothing in here allocates except the arena slot, which `try_insert`
    /// reserves beforehand.
    fn link(&mut self, key: T, mut links: Box<[usize]>) {
        self.locate(&key, Walk::Through);
        for (level, link) in links.iter_mut().enumerate() {
            *link = self.nodes.get(self.update[level]).links[level];
        }
        let height = links.len();
        let index = self.nodes.insert(SkipNode::new(key, links));
        for (level, &prev) in self.update.iter().enumerate().take(height) {
            self.nodes.get_mut(prev).links[level] = index;
        }
        self.len += 1;
        trace!(height, len = self.len, "inserted node");
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Comparator<T>,
{
    /// Returns `true` if the skiplist contains a key equal to the one given.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert!(skiplist.contains(&4));
    /// assert!(!skiplist.contains(&15));
    /// ```
    #[inline]
    pub fn contains(&self, key: &T) -> bool {
        self.get(key).is_some()
    }

    /// Returns a reference to the earliest inserted key equal to the one given,
    /// or `None` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::{Config, SkipList};
    ///
    /// let by_id = |a: &(u32, &str), b: &(u32, &str)| a.0.cmp(&b.0);
    /// let mut skiplist = SkipList::with_comparator(Config::default(), by_id)?;
    /// skiplist.insert((1, "first"));
    /// skiplist.insert((1, "second"));
    /// assert_eq!(skiplist.get(&(1, "")), Some(&(1, "first")));
    /// assert_eq!(skiplist.get(&(2, "")), None);
    /// # Ok::<(), sentinel_skiplist::SkipListError>(())
    /// ```
    pub fn get(&self, key: &T) -> Option<&T> {
        let mut current = HEAD;
        for level in (0..self.max_level()).rev() {
            current = self.nodes.advance_while_at_level(current, level, |next| {
                Walk::Before.proceeds(self.comparator.compare(next, key))
            });
        }
        let candidate = self.nodes.get(current).links[0];
        self.nodes
            .key(candidate)
            .filter(|found| self.comparator.compare(found, key) == Ordering::Equal)
    }

    /// Removes the earliest inserted key equal to the one given and returns
    /// it, or returns `None` if there is no such key.
    ///
    /// To remove every occurrence of a duplicated key, call this until it
    /// returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend([4, 4, 7]);
    ///
    /// assert_eq!(skiplist.remove(&4), Some(4));
    /// assert_eq!(skiplist.remove(&4), Some(4));
    /// assert_eq!(skiplist.remove(&4), None);
    /// assert_eq!(skiplist.len(), 1);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.locate(key, Walk::Before);
        let candidate = self.nodes.get(self.update[0]).links[0];
        match self.nodes.key(candidate) {
            Some(found) if self.comparator.compare(found, key) == Ordering::Equal => {}
            _ => {
                trace!(len = self.len, "key not found");
                return None;
            }
        }
        // Towers are contiguous, so the first level not pointing at the
        // candidate is where its tower ends.
        for (level, &prev) in self.update.iter().enumerate() {
            if self.nodes.get(prev).links[level] != candidate {
                break;
            }
            let next = self.nodes.get(candidate).links[level];
            self.nodes.get_mut(prev).links[level] = next;
        }
        self.len -= 1;
        let node = self.nodes.remove(candidate);
        trace!(height = node.height(), len = self.len, "removed node");
        node.key
    }

    /// Removes the earliest inserted key equal to the one given, returning
    /// `true` if there was one.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend([1, 3, 5, 8]);
    /// assert!(skiplist.delete(&3));
    /// assert!(!skiplist.delete(&3));
    /// ```
    #[inline]
    pub fn delete(&mut self, key: &T) -> bool {
        self.remove(key).is_some()
    }

    /// Walk from the head down every level, recording in `update` the last
    /// node visited on each level before descending.
    fn locate(&mut self, key: &T, walk: Walk) {
        let SkipList {
            nodes,
            update,
            comparator,
            ..
        } = self;
        let mut current = HEAD;
        for (level, slot) in update.iter_mut().enumerate().rev() {
            current = nodes.advance_while_at_level(current, level, |next| {
                walk.proceeds(comparator.compare(next, key))
            });
            *slot = current;
        }
    }

    /// Checks the integrity of the skiplist.
    #[cfg(test)]
    pub(crate) fn check(&self) {
        let chain = |level: usize| -> Vec<usize> {
            let mut indices = Vec::new();
            let mut current = self.nodes.get(HEAD).links[level];
            while current != TAIL {
                assert!(indices.len() < self.len, "level {level} does not end at the tail");
                indices.push(current);
                current = self.nodes.get(current).links[level];
            }
            indices
        };

        assert_eq!(self.nodes.get(HEAD).height(), self.max_level());
        let base = chain(0);
        assert_eq!(base.len(), self.len);
        for pair in base.windows(2) {
            let (a, b) = (self.nodes.key(pair[0]), self.nodes.key(pair[1]));
            let (Some(a), Some(b)) = (a, b) else {
                panic!("a live node has no key");
            };
            assert_ne!(self.comparator.compare(a, b), Ordering::Greater);
        }
        for &index in &base {
            assert!((1..=self.max_level()).contains(&self.nodes.get(index).height()));
        }
        for level in 1..self.max_level() {
            let expected: Vec<usize> = base
                .iter()
                .copied()
                .filter(|&index| self.nodes.get(index).height() > level)
                .collect();
            assert_eq!(chain(level), expected, "level {level} is not a tower-closed subsequence");
        }
    }
}

impl<T, C, G> SkipList<T, C, G> {
    /// Clears the skiplist, removing all keys. The configuration is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// skiplist.clear();
    /// assert!(skiplist.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.nodes.clear();
    }

    /// Returns the number of keys in the skiplist.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend(0..10);
    /// assert_eq!(skiplist.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// assert!(skiplist.is_empty());
    ///
    /// skiplist.insert(1);
    /// assert!(!skiplist.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels of the skiplist, fixed at creation.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.update.len()
    }

    /// Provides a reference to the smallest key, or `None` if the skiplist is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// assert!(skiplist.first().is_none());
    ///
    /// skiplist.insert(2);
    /// skiplist.insert(1);
    /// assert_eq!(skiplist.first(), Some(&1));
    /// ```
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.nodes.key(self.nodes.get(HEAD).links[0])
    }

    /// Provides a reference to the largest key, or `None` if the skiplist is
    /// empty. Among equal keys, this is the latest inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// assert!(skiplist.last().is_none());
    ///
    /// skiplist.insert(1);
    /// skiplist.insert(2);
    /// assert_eq!(skiplist.last(), Some(&2));
    /// ```
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.nodes.key(self.nodes.last(HEAD))
    }

    /// Creates an iterator over the keys of the skiplist, in ascending order.
    ///
    /// Each call starts a fresh walk from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let mut skiplist = SkipList::new();
    /// skiplist.extend([3, 1, 2]);
    /// for key in skiplist.iter() {
    ///     println!("Key: {}", key);
    /// }
    /// assert_eq!(skiplist.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.nodes.get(HEAD).links[0],
            size: self.len,
        }
    }

    /// Creates an iterator over the keys linked into `level`, in ascending
    /// order, or `None` if the skiplist has no such level.
    ///
    /// Level 0 holds every key, and every level holds a subsequence of the
    /// keys of the level below.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_skiplist::SkipList;
    ///
    /// let skiplist: SkipList<u32> = (0..1000).collect();
    /// let upper: Vec<_> = skiplist.iter_level(3).into_iter().flatten().collect();
    /// assert!(upper.len() < 1000);
    /// assert!(skiplist.iter_level(skiplist.max_level()).is_none());
    /// ```
    #[inline]
    pub fn iter_level(&self, level: usize) -> Option<LevelIter<'_, T>> {
        (level < self.max_level()).then(|| LevelIter {
            nodes: &self.nodes,
            level,
            next: self.nodes.get(HEAD).links[level],
        })
    }

    /// The tower heights of the nodes, in list order.
    #[cfg(test)]
    pub(crate) fn heights(&self) -> Vec<usize> {
        let mut heights = Vec::with_capacity(self.len);
        let mut current = self.nodes.get(HEAD).links[0];
        while current != TAIL {
            let node = self.nodes.get(current);
            heights.push(node.height());
            current = node.links[0];
        }
        heights
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SkipList<T>
where
    T: Ord,
{
    #[inline]
    fn default() -> SkipList<T> {
        SkipList::new()
    }
}

/// This implementation of `PartialEq` only checks that the *keys* are equal;
/// it does not check for equivalence of other features (such as the ordering
/// function and the node heights). Furthermore, this uses `T`'s implementation
/// of `PartialEq` and *does not* use the skiplist's comparator.
impl<A, B, C1, G1, C2, G2> PartialEq<SkipList<B, C2, G2>> for SkipList<A, C1, G1>
where
    A: PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &SkipList<B, C2, G2>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C, G> Eq for SkipList<T, C, G> where T: Eq {}

impl<T, C, G> Hash for SkipList<T, C, G>
where
    T: Hash,
{
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for key in self {
            key.hash(state);
        }
    }
}

impl<T, C, G> Extend<T> for SkipList<T, C, G>
where
    C: Comparator<T>,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        for key in iterable {
            self.insert(key);
        }
    }
}

impl<T> iter::FromIterator<T> for SkipList<T>
where
    T: Ord,
{
    #[inline]
    fn from_iter<I>(iter: I) -> SkipList<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut skiplist = SkipList::new();
        skiplist.extend(iter);
        skiplist
    }
}

impl<T, C, G> fmt::Debug for SkipList<T, C, G>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, G> fmt::Display for SkipList<T, C, G>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;

        for (i, key) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, "]")
    }
}

impl<T, C, G> iter::IntoIterator for SkipList<T, C, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let SkipList { nodes, len, .. } = self;
        let next = nodes.get(HEAD).links[0];
        IntoIter {
            nodes,
            next,
            size: len,
        }
    }
}

impl<'a, T, C, G> iter::IntoIterator for &'a SkipList<T, C, G> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::{
        cmp::Ordering,
        collections::{VecDeque, hash_map::DefaultHasher},
        hash::{Hash, Hasher},
    };

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::SkipList;
    use crate::{
        Config, Geometric, LevelGenerator, NaturalOrder, SkipListError, UniformSource,
    };

    /// Hands out a fixed sequence of tower heights, then height 1.
    #[derive(Debug)]
    struct Heights {
        total: usize,
        heights: VecDeque<usize>,
    }

    impl Heights {
        fn new(total: usize, heights: impl IntoIterator<Item = usize>) -> Self {
            Heights {
                total,
                heights: heights.into_iter().collect(),
            }
        }
    }

    impl LevelGenerator for Heights {
        fn total(&self) -> usize {
            self.total
        }

        fn height(&mut self) -> usize {
            self.heights.pop_front().unwrap_or(1)
        }
    }

    /// Replays a fixed list of uniform draws.
    struct Draws(VecDeque<f64>);

    impl UniformSource for Draws {
        fn sample(&mut self) -> f64 {
            self.0.pop_front().unwrap_or(0.99)
        }
    }

    fn keys<C, G>(sl: &SkipList<i32, C, G>) -> Vec<i32> {
        sl.iter().copied().collect()
    }

    #[test]
    fn scripted_heights() -> Result<()> {
        let generator = Heights::new(5, [1, 3, 1, 2, 1, 4, 1, 2]);
        let mut sl = SkipList::with_level_generator(generator, NaturalOrder)?;
        assert_eq!(sl.max_level(), 5);
        for key in [5, 3, 8, 1] {
            sl.insert(key);
            sl.check();
        }
        assert_eq!(keys(&sl), vec![1, 3, 5, 8]);
        assert_eq!(sl.len(), 4);
        assert_eq!(sl.heights(), vec![2, 3, 1, 1]);

        assert!(sl.delete(&3));
        sl.check();
        assert_eq!(keys(&sl), vec![1, 5, 8]);
        assert_eq!(sl.len(), 3);
        assert_eq!(sl.heights(), vec![2, 1, 1]);

        assert!(!sl.delete(&3));
        sl.check();
        assert_eq!(keys(&sl), vec![1, 5, 8]);
        assert_eq!(sl.len(), 3);
        Ok(())
    }

    #[test]
    fn scripted_draws() -> Result<()> {
        // Heights 1, 3, 1, 2 with p = 1/2 and 5 levels.
        let draws = Draws(VecDeque::from([0.7, 0.1, 0.3, 0.9, 0.5, 0.2, 0.6]));
        let generator = Geometric::with_source(Config::new(16, 0.5).max_level()?, 0.5, draws)?;
        let mut sl = SkipList::with_level_generator(generator, NaturalOrder)?;
        sl.extend([5, 3, 8, 1]);
        sl.check();
        assert_eq!(keys(&sl), vec![1, 3, 5, 8]);
        assert_eq!(sl.heights(), vec![2, 3, 1, 1]);
        Ok(())
    }

    #[test]
    fn duplicates() -> Result<()> {
        let mut sl = SkipList::with_config(Config::new(16, 0.5))?;
        sl.extend([4, 4, 4]);
        sl.check();
        assert_eq!(sl.len(), 3);
        assert_eq!(keys(&sl), vec![4, 4, 4]);
        for remaining in (0..3).rev() {
            assert!(sl.delete(&4));
            assert_eq!(sl.len(), remaining);
            sl.check();
        }
        assert!(!sl.delete(&4));
        assert!(sl.is_empty());
        Ok(())
    }

    #[test]
    fn duplicates_are_removed_first_in_first_out() -> Result<()> {
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        let generator = Heights::new(4, [2, 4, 1, 3, 1]);
        let mut sl = SkipList::with_level_generator(generator, by_key)?;
        sl.extend([(4, 'a'), (9, 'z'), (4, 'b'), (1, 'y'), (4, 'c')]);
        sl.check();
        assert_eq!(
            sl.iter().map(|&(_, c)| c).collect::<String>(),
            "yabcz"
        );
        assert_eq!(sl.get(&(4, '?')), Some(&(4, 'a')));
        assert_eq!(sl.remove(&(4, '?')), Some((4, 'a')));
        assert_eq!(sl.remove(&(4, '?')), Some((4, 'b')));
        assert_eq!(sl.remove(&(4, '?')), Some((4, 'c')));
        assert_eq!(sl.remove(&(4, '?')), None);
        sl.check();
        assert_eq!(sl.iter().map(|&(_, c)| c).collect::<String>(), "yz");
        Ok(())
    }

    #[rstest]
    #[case(0, 0.5, SkipListError::ZeroExpectedSize)]
    #[case(16, 0.0, SkipListError::Geometric(crate::GeometricError::InvalidProbability))]
    #[case(16, 1.0, SkipListError::Geometric(crate::GeometricError::InvalidProbability))]
    fn invalid_configuration(
        #[case] expected_size: usize,
        #[case] p: f64,
        #[case] expected: SkipListError,
    ) {
        let err = SkipList::<i32>::with_config(Config::new(expected_size, p))
            .err()
            .map(|err| (err.is_configuration(), err));
        assert_eq!(err, Some((true, expected)));
    }

    #[test]
    fn zero_levels() {
        let err = SkipList::<i32, _, _>::with_level_generator(Heights::new(0, []), NaturalOrder).err();
        assert_eq!(err, Some(SkipListError::ZeroLevels));
    }

    #[test]
    fn single_level() -> Result<()> {
        let mut sl = SkipList::with_capacity(1)?;
        assert_eq!(sl.max_level(), 1);
        sl.extend([3, 1, 2, 1]);
        sl.check();
        assert_eq!(keys(&sl), vec![1, 1, 2, 3]);
        assert_eq!(sl.heights(), vec![1, 1, 1, 1]);
        assert!(sl.delete(&1));
        assert!(sl.delete(&3));
        sl.check();
        assert_eq!(keys(&sl), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn try_insert() -> Result<()> {
        let mut sl = SkipList::with_capacity(8)?;
        for key in [3, 1, 2] {
            sl.try_insert(key)?;
        }
        sl.check();
        assert_eq!(keys(&sl), vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn try_insert_draws_one_height_per_key() -> Result<()> {
        let generator = Heights::new(4, [2, 4, 1, 3]);
        let mut sl = SkipList::with_level_generator(generator, NaturalOrder)?;
        for key in [10, 40, 20, 30] {
            sl.try_insert(key)?;
            sl.check();
        }
        assert_eq!(keys(&sl), vec![10, 20, 30, 40]);
        assert_eq!(sl.heights(), vec![2, 1, 3, 4]);

        // Slots freed by a deletion are reused without disturbing the draws.
        assert!(sl.delete(&20));
        sl.try_insert(25)?;
        sl.check();
        assert_eq!(keys(&sl), vec![10, 25, 30, 40]);
        assert_eq!(sl.heights(), vec![2, 1, 3, 4]);
        assert!(sl.level_generator.heights.is_empty());
        Ok(())
    }

    #[test]
    fn basic_small() {
        let mut sl: SkipList<i64> = SkipList::new();
        sl.check();
        sl.insert(1);
        sl.check();
        assert_eq!(sl.remove(&1), Some(1));
        sl.check();
        sl.insert(1);
        sl.check();
        sl.insert(2);
        sl.check();
        assert_eq!(sl.remove(&1), Some(1));
        sl.check();
        assert_eq!(sl.remove(&2), Some(2));
        sl.check();
        assert!(sl.is_empty());
    }

    #[test]
    fn basic_large() -> Result<()> {
        let size = 500;
        let mut sl = SkipList::with_capacity(size)?;
        assert!(sl.is_empty());

        for i in (0..size).rev() {
            sl.insert(i);
            assert_eq!(sl.len(), size - i);
        }
        sl.check();

        for i in 0..size {
            assert_eq!(sl.remove(&i), Some(i));
            assert_eq!(sl.len(), size - i - 1);
        }
        sl.check();
        assert!(sl.is_empty());
        Ok(())
    }

    #[test]
    fn remove_rand() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let mut sl = SkipList::with_capacity(1000)?;
        let mut model: Vec<u16> = Vec::new();
        for _ in 0..1000 {
            let key = rng.random_range(0..200);
            sl.insert(key);
            let at = model.partition_point(|&k| k <= key);
            model.insert(at, key);
        }
        sl.check();
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), model);

        for _ in 0..2000 {
            let key = rng.random_range(0..220);
            let expected = model.binary_search(&key).is_ok();
            if expected {
                let at = model.partition_point(|&k| k < key);
                model.remove(at);
            }
            assert_eq!(sl.delete(&key), expected);
        }
        sl.check();
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), model);
        assert_eq!(sl.len(), model.len());
        Ok(())
    }

    #[test]
    fn contains() {
        let (min, max) = (25, 75);
        let sl: SkipList<_> = (min..max).collect();

        for i in 0..100 {
            assert_eq!(sl.contains(&i), (min..max).contains(&i));
        }
    }

    #[test]
    fn insert_then_delete_restores() -> Result<()> {
        let mut sl = SkipList::with_capacity(64)?;
        sl.extend((0..64).map(|i| i * 2));
        let before = keys(&sl);
        for k in [-1, 31, 63, 200] {
            sl.insert(k);
            assert!(sl.contains(&k));
            assert!(sl.delete(&k));
            sl.check();
            assert_eq!(keys(&sl), before);
            assert_eq!(sl.len(), before.len());
        }
        Ok(())
    }

    #[test]
    fn first_last() {
        let mut sl = SkipList::new();
        assert_eq!(sl.first(), None);
        assert_eq!(sl.last(), None);
        for i in 0..100 {
            sl.insert(i);
            assert_eq!(sl.first(), Some(&0));
            assert_eq!(sl.last(), Some(&i));
        }
        for i in 1..100 {
            sl.insert(-i);
            assert_eq!(sl.first(), Some(&-i));
            assert_eq!(sl.last(), Some(&99));
        }
    }

    #[test]
    fn clear() {
        let mut sl: SkipList<i64> = (0..100).collect();
        assert_eq!(sl.len(), 100);
        sl.clear();
        sl.check();
        assert!(sl.is_empty());
        assert_eq!(sl.iter().next(), None);
        sl.extend([2, 1]);
        sl.check();
        assert_eq!(sl.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn iter() {
        let size = 10_000;
        let sl: SkipList<_> = (0..size).rev().collect();

        fn test<T>(size: usize, mut iter: T)
        where
            T: Iterator<Item = usize>,
        {
            for i in 0..size {
                assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
                assert_eq!(iter.next(), Some(i));
            }
            assert_eq!(iter.size_hint(), (0, Some(0)));
            assert!(iter.next().is_none());
        }
        test(size, sl.iter().copied());
        test(size, sl.iter().copied());
        test(size, sl.into_iter());
    }

    #[test]
    fn iter_level() {
        let sl: SkipList<u32> = (0..2000).collect();
        let mut below: Vec<u32> = sl.iter().copied().collect();
        for level in 0..sl.max_level() {
            let Some(level_iter) = sl.iter_level(level) else {
                panic!("level {level} should exist");
            };
            let current: Vec<u32> = level_iter.copied().collect();
            assert!(current.windows(2).all(|w| w[0] < w[1]));
            assert!(current.iter().all(|k| below.binary_search(k).is_ok()));
            below = current;
        }
        assert!(sl.iter_level(sl.max_level()).is_none());
    }

    #[test]
    fn reverse_comparator() -> Result<()> {
        let mut sl = SkipList::with_comparator(Config::new(128, 0.25), |a: &i32, b: &i32| b.cmp(a))?;
        sl.extend(0..100);
        sl.check();
        assert_eq!(keys(&sl), (0..100).rev().collect::<Vec<_>>());
        assert!(sl.contains(&42));
        assert!(sl.delete(&42));
        assert!(!sl.contains(&42));
        sl.check();
        Ok(())
    }

    #[test]
    fn borrowed_keys() {
        let mut sl = SkipList::new();
        sl.extend(["pear", "apple", "fig"]);
        assert_eq!(sl.first(), Some(&"apple"));
        assert!(sl.contains(&"fig"));
        assert_eq!(sl.remove(&"pear"), Some("pear"));
        assert_eq!(sl.len(), 2);
    }

    #[test]
    fn debug_display() {
        let sl: SkipList<_> = [5, 3, 8, 1].into_iter().collect();
        insta::assert_snapshot!(format!("{sl:?}"), @"[1, 3, 5, 8]");
        insta::assert_snapshot!(sl.to_string(), @"[1, 3, 5, 8]");

        let empty: SkipList<i32> = SkipList::new();
        insta::assert_snapshot!(empty.to_string(), @"[]");
    }

    #[test]
    fn equality() {
        let a: SkipList<i64> = (0..100).collect();
        let b: SkipList<i64> = (0..100).rev().collect();
        let c: SkipList<i64> = (0..10).collect();
        let d: SkipList<i64> = (100..200).collect();
        let e: SkipList<i64> = (0..100).chain(0..1).collect();

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(a, e);
        assert_ne!(c, d);
        assert_ne!(d, e);
    }

    #[test]
    fn hash() {
        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }
        let a: SkipList<i64> = (0..100).collect();
        let b: SkipList<i64> = (0..100).rev().collect();
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn clone_is_independent() {
        let mut a: SkipList<i32> = (0..10).collect();
        let b = a.clone();
        assert!(a.delete(&5));
        assert_eq!(b.len(), 10);
        assert!(b.contains(&5));
        b.check();
        a.check();
    }

    #[test]
    fn comparator_ordering_is_used_for_equality() -> Result<()> {
        let case_insensitive =
            |a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase());
        let mut sl = SkipList::with_comparator(Config::default(), case_insensitive)?;
        sl.extend(["Beta".to_owned(), "alpha".to_owned()]);
        assert_eq!(sl.get(&"BETA".to_owned()).map(String::as_str), Some("Beta"));
        assert_eq!(
            case_insensitive(&"ALPHA".to_owned(), &"alpha".to_owned()),
            Ordering::Equal
        );
        assert_eq!(sl.remove(&"ALPHA".to_owned()), Some("alpha".to_owned()));
        Ok(())
    }
}
