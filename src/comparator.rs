//! Total orders used to keep a [`SkipList`](crate::SkipList) sorted.

use std::cmp::Ordering;

/// A total order over `T`.
///
/// The comparator is fixed when the list is created. Closures of the form
/// `Fn(&T, &T) -> Ordering` are comparators, so a custom order rarely needs a
/// dedicated type:
///
/// ```
/// use sentinel_skiplist::{Config, SkipList};
///
/// let mut list = SkipList::with_comparator(Config::default(), |a: &i32, b: &i32| b.cmp(a))?;
/// list.extend([1, 3, 2]);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// # Ok::<(), sentinel_skiplist::SkipListError>(())
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The order given by `T`'s [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T> Comparator<T> for NaturalOrder
where
    T: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
