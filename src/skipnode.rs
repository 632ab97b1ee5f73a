//! Nodes of the skiplist and the iterators walking them.

use std::iter::FusedIterator;

use crate::arena::NodeArena;

/// Arena index of the head sentinel.
pub(crate) const HEAD: usize = 0;
/// Arena index of the tail sentinel.
pub(crate) const TAIL: usize = 1;

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the SkipList. All nodes, including the two sentinels, are
/// owned by the list's [`NodeArena`] and refer to each other by index.
///
/// A node of height `h` has `h` links to next nodes, one per level `0..h`. The
/// links are stored in a boxed slice so that the height of a node, once
/// chosen, can never change.
#[derive(Clone, Debug)]
pub(crate) struct SkipNode<T> {
    // The key is `None` only for the sentinels and for vacant arena slots.
    pub key: Option<T>,
    // Arena index of the next node at each level. Every level ends at `TAIL`.
    pub links: Box<[usize]>,
}

impl<T> SkipNode<T> {
    /// Create a new head node, present at all `total_levels` levels.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            key: None,
            links: vec![TAIL; total_levels].into_boxed_slice(),
        }
    }

    /// Create the tail node. It has no links since nothing follows it.
    pub fn tail() -> Self {
        SkipNode {
            key: None,
            links: Box::default(),
        }
    }

    /// Create a node holding `key` with a tower made of `links`.
    pub fn new(key: T, links: Box<[usize]>) -> Self {
        SkipNode {
            key: Some(key),
            links,
        }
    }

    /// The number of levels this node is linked into.
    pub fn height(&self) -> usize {
        self.links.len()
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////

/// Iterator over the keys of a skiplist, in ascending order.
///
/// Created by [`SkipList::iter`](crate::SkipList::iter).
pub struct Iter<'a, T> {
    pub(crate) nodes: &'a NodeArena<T>,
    pub(crate) next: usize,
    pub(crate) size: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next);
        // Only the tail has no key on a live chain.
        let key = node.key.as_ref()?;
        self.next = node.links[0];
        self.size -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Iterator over the keys linked into one level of a skiplist.
///
/// Created by [`SkipList::iter_level`](crate::SkipList::iter_level). Level 0
/// yields every key; each higher level yields a subsequence of the level below.
pub struct LevelIter<'a, T> {
    pub(crate) nodes: &'a NodeArena<T>,
    pub(crate) level: usize,
    pub(crate) next: usize,
}

impl<'a, T> Iterator for LevelIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next);
        let key = node.key.as_ref()?;
        self.next = node.links[self.level];
        Some(key)
    }
}

impl<T> FusedIterator for LevelIter<'_, T> {}

/// Consuming iterator over the keys of a skiplist, in ascending order.
pub struct IntoIter<T> {
    pub(crate) nodes: NodeArena<T>,
    pub(crate) next: usize,
    pub(crate) size: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.nodes.get_mut(self.next);
        let key = node.key.take()?;
        self.next = node.links[0];
        self.size -= 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
