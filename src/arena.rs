//! Index-addressed storage for the nodes of a skiplist.
//!
//! The arena owns every node by value. Links between nodes are indices into
//! the arena, so a node can be referenced from several levels at once without
//! shared ownership, and a removed node cannot be reached through a stale
//! pointer. Slots freed by a removal are recycled by later insertions.

use std::{collections::TryReserveError, mem};

use crate::skipnode::{HEAD, SkipNode, TAIL};

#[derive(Clone, Debug)]
pub(crate) struct NodeArena<T> {
    // Slot `HEAD` and slot `TAIL` always hold the sentinels.
    slots: Vec<SkipNode<T>>,
    // Stack of vacant slots.
    free: Vec<usize>,
}

impl<T> NodeArena<T> {
    /// Create an arena holding only the sentinels, with a head reaching
    /// `total_levels` levels.
    pub fn new(total_levels: usize) -> Self {
        let mut slots = Vec::with_capacity(2);
        slots.push(SkipNode::head(total_levels));
        slots.push(SkipNode::tail());
        debug_assert_eq!(slots.len(), TAIL + 1);
        NodeArena {
            slots,
            free: Vec::new(),
        }
    }

    /// The node stored at `index`.
    ///
    /// Indices only ever come from links, which always point at live nodes.
    #[inline]
    pub fn get(&self, index: usize) -> &SkipNode<T> {
        &self.slots[index]
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut SkipNode<T> {
        &mut self.slots[index]
    }

    /// The key stored at `index`, or `None` for the sentinels.
    #[inline]
    pub fn key(&self, index: usize) -> Option<&T> {
        self.slots[index].key.as_ref()
    }

    /// Make sure the next [`insert`](Self::insert) does not need to allocate.
    pub fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if self.free.is_empty() {
            self.slots.try_reserve(1)?;
            // Keep room to recycle the slot once it is removed again.
            self.free.try_reserve(self.slots.len())?;
        }
        Ok(())
    }

    /// Store `node`, returning its index.
    pub fn insert(&mut self, node: SkipNode<T>) -> usize {
        if let Some(index) = self.free.pop() {
            self.slots[index] = node;
            index
        } else {
            self.slots.push(node);
            self.slots.len() - 1
        }
    }

    /// Take the node out of slot `index`, leaving the slot vacant.
    pub fn remove(&mut self, index: usize) -> SkipNode<T> {
        debug_assert!(index != HEAD && index != TAIL, "sentinels are never removed");
        let node = mem::replace(&mut self.slots[index], SkipNode::tail());
        self.free.push(index);
        node
    }

    /// Drop every node and reset the head to point at the tail on every level.
    pub fn clear(&mut self) {
        let total_levels = self.slots[HEAD].height();
        self.slots.truncate(TAIL + 1);
        self.slots[HEAD] = SkipNode::head(total_levels);
        self.free.clear();
    }

    /// Starting from `from`, keep moving along `level` as long as the key of
    /// the next node satisfies `pred`, and return the last node reached.
    ///
    /// The tail has no key and so stops every walk.
    pub fn advance_while_at_level(
        &self,
        from: usize,
        level: usize,
        mut pred: impl FnMut(&T) -> bool,
    ) -> usize {
        let mut current = from;
        loop {
            let next = self.slots[current].links[level];
            match self.key(next) {
                Some(key) if pred(key) => current = next,
                _ => return current,
            }
        }
    }

    /// Follow the links of `from` down from the top level, and return the last
    /// node of the list.
    pub fn last(&self, from: usize) -> usize {
        (0..self.slots[from].height())
            .rev()
            .fold(from, |node, level| {
                self.advance_while_at_level(node, level, |_| true)
            })
    }
}
