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


//! Ready-made operation sets.
//!
//! All three merges here are associative and commutative, so their rerooted
//! answers are independent of the traversal root and of edge order.

use crate::operator::RerootingOperator;
use num_traits::PrimInt;
use std::marker::PhantomData;

/// Counts vertices. Weights of type `W` are ignored.
///
/// Rooted at `v`, the value is the size of `v`'s subtree; rerooted, every
/// vertex of a connected tree answers `num_vertices`.
#[derive(Debug, Clone, Copy)]
pub struct SubtreeSizeOperator<W> {
    _marker: PhantomData<fn() -> W>,
}

impl<W> SubtreeSizeOperator<W> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<W> Default for SubtreeSizeOperator<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> RerootingOperator for SubtreeSizeOperator<W>
where
    W: Default,
{
    type Value = usize;
    type Weight = W;

    #[inline(always)]
    fn identity(&self) -> usize {
        0
    }

    #[inline(always)]
    fn merge(&self, lhs: &usize, rhs: &usize, _weight: &W) -> usize {
        lhs + rhs
    }

    #[inline(always)]
    fn add_root(&self, value: &usize) -> usize {
        value + 1
    }

    #[inline(always)]
    fn weight_identity(&self) -> W {
        W::default()
    }
}

/// Sums weighted distances.
///
/// Values are `(distance_sum, vertex_count)` pairs. Rerooted, the first
/// component of a vertex's answer is the sum of the weighted distances from
/// that vertex to every other vertex.
#[derive(Debug, Clone, Copy)]
pub struct DistanceSumOperator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> DistanceSumOperator<T> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DistanceSumOperator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RerootingOperator for DistanceSumOperator<T>
where
    T: PrimInt,
{
    type Value = (T, T);
    type Weight = T;

    #[inline(always)]
    fn identity(&self) -> (T, T) {
        (T::zero(), T::zero())
    }

    /// Every vertex behind the edge is `weight` further away.
    #[inline(always)]
    fn merge(&self, lhs: &(T, T), rhs: &(T, T), weight: &T) -> (T, T) {
        (lhs.0 + rhs.0 + *weight * rhs.1, lhs.1 + rhs.1)
    }

    #[inline(always)]
    fn add_root(&self, value: &(T, T)) -> (T, T) {
        (value.0, value.1 + T::one())
    }

    #[inline(always)]
    fn weight_identity(&self) -> T {
        T::zero()
    }
}

/// Farthest weighted distance.
///
/// Rerooted, a vertex's answer is its eccentricity. Weights must be
/// non-negative.
#[derive(Debug, Clone, Copy)]
pub struct EccentricityOperator<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EccentricityOperator<T> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EccentricityOperator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RerootingOperator for EccentricityOperator<T>
where
    T: PrimInt,
{
    type Value = T;
    type Weight = T;

    #[inline(always)]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline(always)]
    fn merge(&self, lhs: &T, rhs: &T, weight: &T) -> T {
        (*lhs).max(*rhs + *weight)
    }

    #[inline(always)]
    fn add_root(&self, value: &T) -> T {
        *value
    }

    #[inline(always)]
    fn weight_identity(&self) -> T {
        T::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_size_operations() {
        let op = SubtreeSizeOperator::<u8>::new();
        assert_eq!(op.identity(), 0);
        assert_eq!(op.merge(&2, &3, &9), 5);
        assert_eq!(op.add_root(&5), 6);
        assert_eq!(op.weight_identity(), 0u8);
    }

    #[test]
    fn test_distance_sum_weights_the_far_side() {
        let op = DistanceSumOperator::<i64>::new();
        // A child subtree of 3 vertices whose distances to the child sum to 2,
        // reached over an edge of weight 5.
        assert_eq!(op.merge(&(1, 1), &(2, 3), &5), (1 + 2 + 15, 4));
        assert_eq!(op.add_root(&(18, 4)), (18, 5));
        assert_eq!(op.merge(&(4, 2), &(6, 3), &op.weight_identity()), (10, 5));
    }

    #[test]
    fn test_eccentricity_takes_the_farther_branch() {
        let op = EccentricityOperator::<u32>::new();
        assert_eq!(op.merge(&7, &3, &2), 7);
        assert_eq!(op.merge(&4, &3, &2), 5);
        assert_eq!(op.add_root(&5), 5);
        assert_eq!(op.identity(), 0);
    }
}
