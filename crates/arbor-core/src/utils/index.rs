// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


//! # Typed Indices
//!
//! Rerooting code juggles two index spaces at once: vertex ids and positions
//! inside a vertex's adjacency list. Both are plain `usize` at runtime, which
//! makes them trivially easy to mix up. `TypedIndex<T>` tags a `usize` with a
//! phantom type so the compiler keeps the two apart, while
//! `#[repr(transparent)]` keeps the runtime representation unchanged.
//!
//! ```rust
//! use arbor_core::utils::index::{EdgeIndex, VertexIndex};
//!
//! let v = VertexIndex::new(3);
//! let e = EdgeIndex::new(0);
//! assert_eq!(v.get(), 3);
//! assert_eq!(format!("{}", v), "VertexIndex(3)");
//! assert_eq!(format!("{:?}", e), "EdgeIndex(0)");
//! ```

use std::marker::PhantomData;

/// Names an index space for `Debug` and `Display` output.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index belonging to the index space described by `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw index.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the raw index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Iterates over the indices `0..count` of this index space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use arbor_core::utils::index::VertexIndex;
    /// let all: Vec<usize> = VertexIndex::range(3).map(|v| v.get()).collect();
    /// assert_eq!(all, vec![0, 1, 2]);
    /// ```
    #[inline]
    pub fn range(count: usize) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..count).map(Self::new)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(index: TypedIndex<T>) -> Self {
        index.index
    }
}

/// Tag for vertex ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VertexIndexTag;

impl TypedIndexTag for VertexIndexTag {
    const NAME: &'static str = "VertexIndex";
}

/// A vertex id in `0..num_vertices`.
pub type VertexIndex = TypedIndex<VertexIndexTag>;

/// Tag for positions inside a single vertex's adjacency list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeIndexTag;

impl TypedIndexTag for EdgeIndexTag {
    const NAME: &'static str = "EdgeIndex";
}

/// The position of an edge within its source vertex's adjacency list.
pub type EdgeIndex = TypedIndex<EdgeIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        assert_eq!(VertexIndex::new(10).get(), 10);
        assert_eq!(EdgeIndex::new(0).get(), 0);
    }

    #[test]
    fn test_conversions() {
        let v: VertexIndex = 42.into();
        assert_eq!(v.get(), 42);
        let raw: usize = v.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display_use_tag_name() {
        assert_eq!(format!("{}", VertexIndex::new(7)), "VertexIndex(7)");
        assert_eq!(format!("{:?}", EdgeIndex::new(2)), "EdgeIndex(2)");
    }

    #[test]
    fn test_range_is_ordered_and_exact() {
        let it = VertexIndex::range(4);
        assert_eq!(it.len(), 4);
        let rev: Vec<usize> = VertexIndex::range(4).rev().map(|v| v.get()).collect();
        assert_eq!(rev, vec![3, 2, 1, 0]);
        assert_eq!(VertexIndex::range(0).count(), 0);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(VertexIndex::new(1) < VertexIndex::new(2));
        assert_eq!(VertexIndex::new(5), VertexIndex::from(5));
    }
}
