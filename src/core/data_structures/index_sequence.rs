/*!
 * Lazy Index Sequence
 *
 * Read-only run of consecutive positions `[start, start + len)` reported to
 * hooks after a batch insert. Nothing is materialized: lookups, membership and
 * slicing are computed from the two bounds.
 */

use crate::core::errors::{AccessorError, AccessorResult};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::ops::{Bound, Range, RangeBounds};

/// Consecutive positions starting at an offset
///
/// # Example
///
/// ```
/// use accessor_runtime::IndexSequence;
///
/// let indices = IndexSequence::new(3, 4).unwrap();
/// assert_eq!(indices.get(0), Some(3));
/// assert!(indices.contains(6));
/// assert_eq!(indices.iter().rev().collect::<Vec<_>>(), vec![6, 5, 4, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IndexBounds")]
pub struct IndexSequence {
    start: usize,
    len: usize,
}

/// Unchecked wire form, validated through [`IndexSequence::new`]
#[derive(Deserialize)]
struct IndexBounds {
    start: usize,
    len: usize,
}

impl TryFrom<IndexBounds> for IndexSequence {
    type Error = AccessorError;

    fn try_from(bounds: IndexBounds) -> AccessorResult<Self> {
        Self::new(bounds.start, bounds.len)
    }
}

impl IndexSequence {
    /// Create a sequence of `len` positions starting at `start`
    ///
    /// Fails if the last position would overflow `usize`.
    pub fn new(start: usize, len: usize) -> AccessorResult<Self> {
        match start.checked_add(len) {
            Some(_) => Ok(Self { start, len }),
            None => Err(AccessorError::InvalidIndexRange { start, len }),
        }
    }

    /// Empty sequence anchored at `start`
    #[inline]
    pub const fn empty(start: usize) -> Self {
        Self { start, len: 0 }
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last position
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position stored at `offset`
    #[inline]
    pub fn get(&self, offset: usize) -> Option<usize> {
        (offset < self.len).then(|| self.start + offset)
    }

    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.len.checked_sub(1).and_then(|offset| self.get(offset))
    }

    #[inline]
    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }

    pub fn contains_all<I>(&self, positions: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        positions.into_iter().all(|position| self.contains(position))
    }

    /// Offset of `position` within the sequence
    #[inline]
    pub fn index_of(&self, position: usize) -> Option<usize> {
        self.contains(position).then(|| position - self.start)
    }

    /// Positions are unique, so the last occurrence is the only occurrence
    #[inline]
    pub fn last_index_of(&self, position: usize) -> Option<usize> {
        self.index_of(position)
    }

    /// Sub-sequence covering the given offsets
    pub fn slice<R>(&self, range: R) -> AccessorResult<Self>
    where
        R: RangeBounds<usize>,
    {
        let from = match range.start_bound() {
            Bound::Included(&from) => from,
            Bound::Excluded(&from) => from.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(&to) => to.saturating_add(1),
            Bound::Excluded(&to) => to,
            Bound::Unbounded => self.len,
        };

        if from > to || to > self.len {
            return Err(AccessorError::InvalidIndexRange {
                start: self.start.saturating_add(from),
                len: to.saturating_sub(from),
            });
        }

        Ok(Self {
            start: self.start + from,
            len: to - from,
        })
    }

    #[inline]
    pub fn iter(&self) -> IndexIter {
        IndexIter {
            front: self.start,
            back: self.end(),
        }
    }

    /// Iterator positioned before `offset`, like a list iterator
    ///
    /// `offset == len` yields an exhausted iterator.
    pub fn iter_from(&self, offset: usize) -> AccessorResult<IndexIter> {
        Ok(self.slice(offset..)?.iter())
    }

    #[inline]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Materialize every position
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl IntoIterator for IndexSequence {
    type Item = usize;
    type IntoIter = IndexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &IndexSequence {
    type Item = usize;
    type IntoIter = IndexIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq<[usize]> for IndexSequence {
    fn eq(&self, other: &[usize]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == *b)
    }
}

impl PartialEq<Vec<usize>> for IndexSequence {
    fn eq(&self, other: &Vec<usize>) -> bool {
        *self == other[..]
    }
}

/// Double-ended iterator over an [`IndexSequence`]
#[derive(Debug, Clone)]
pub struct IndexIter {
    front: usize,
    back: usize,
}

impl Iterator for IndexIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.front < self.back {
            let position = self.front;
            self.front += 1;
            Some(position)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<usize> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for IndexIter {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.back)
        } else {
            None
        }
    }
}

impl ExactSizeIterator for IndexIter {}

impl FusedIterator for IndexIter {}
