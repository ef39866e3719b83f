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


//! The operation set driving tree DP.
//!
//! A tree DP is described by four pure functions:
//!
//! - `identity`: the neutral value of `merge`, used as the starting
//!   accumulator and as the pre-build result.
//! - `merge(acc, child, weight)`: folds one child's value into an
//!   accumulator across an edge of the given weight. It must be associative
//!   but need not be commutative; engines always fold children left to
//!   right in edge insertion order.
//! - `add_root(acc)`: turns the merged children of a vertex into the value
//!   of the subtree rooted at that vertex.
//! - `weight_identity`: the edge weight used when rerooting combines the
//!   prefix and suffix of a vertex's edge values, i.e. a weight that leaves
//!   already-weighted values unchanged.
//!
//! `RerootingOperator` is the seam the engines are generic over.
//! `FnOperator` builds one from four closures, which is the usual way to
//! describe a one-off DP.

/// The operation set of a tree DP over values `Value` and edge weights
/// `Weight`.
pub trait RerootingOperator {
    /// The aggregate stored per vertex and per edge.
    type Value: Clone;
    /// The weight carried by each directed edge.
    type Weight;

    /// Returns the neutral element of [`RerootingOperator::merge`].
    fn identity(&self) -> Self::Value;

    /// Folds `rhs` into `lhs` across an edge of weight `weight`.
    fn merge(&self, lhs: &Self::Value, rhs: &Self::Value, weight: &Self::Weight) -> Self::Value;

    /// Converts the merged children of a vertex into its subtree value.
    fn add_root(&self, value: &Self::Value) -> Self::Value;

    /// Returns the weight used to join prefix and suffix merges.
    fn weight_identity(&self) -> Self::Weight;
}

impl<O> RerootingOperator for &O
where
    O: RerootingOperator + ?Sized,
{
    type Value = O::Value;
    type Weight = O::Weight;

    #[inline(always)]
    fn identity(&self) -> Self::Value {
        (**self).identity()
    }

    #[inline(always)]
    fn merge(&self, lhs: &Self::Value, rhs: &Self::Value, weight: &Self::Weight) -> Self::Value {
        (**self).merge(lhs, rhs, weight)
    }

    #[inline(always)]
    fn add_root(&self, value: &Self::Value) -> Self::Value {
        (**self).add_root(value)
    }

    #[inline(always)]
    fn weight_identity(&self) -> Self::Weight {
        (**self).weight_identity()
    }
}

/// A `RerootingOperator` assembled from four closures.
///
/// # Examples
///
/// ```rust
/// # use arbor_tree::operator::{FnOperator, RerootingOperator};
/// // Height of the subtree in edges, weighted.
/// let height = FnOperator::new(
///     |acc: &i64, child: &i64, w: &i64| (*acc).max(child + w),
///     || 0i64,
///     |acc: &i64| *acc,
///     || 0i64,
/// );
/// assert_eq!(height.merge(&3, &4, &2), 6);
/// assert_eq!(height.add_root(&6), 6);
/// ```
#[derive(Clone, Copy)]
pub struct FnOperator<S, W, M, E, R, C> {
    merge: M,
    identity: E,
    add_root: R,
    weight_identity: C,
    _marker: std::marker::PhantomData<fn() -> (S, W)>,
}

impl<S, W, M, E, R, C> FnOperator<S, W, M, E, R, C>
where
    S: Clone,
    M: Fn(&S, &S, &W) -> S,
    E: Fn() -> S,
    R: Fn(&S) -> S,
    C: Fn() -> W,
{
    /// Creates an operator from `merge`, `identity`, `add_root` and
    /// `weight_identity`.
    #[inline]
    pub fn new(merge: M, identity: E, add_root: R, weight_identity: C) -> Self {
        Self {
            merge,
            identity,
            add_root,
            weight_identity,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<S, W, M, E, R, C> RerootingOperator for FnOperator<S, W, M, E, R, C>
where
    S: Clone,
    M: Fn(&S, &S, &W) -> S,
    E: Fn() -> S,
    R: Fn(&S) -> S,
    C: Fn() -> W,
{
    type Value = S;
    type Weight = W;

    #[inline(always)]
    fn identity(&self) -> S {
        (self.identity)()
    }

    #[inline(always)]
    fn merge(&self, lhs: &S, rhs: &S, weight: &W) -> S {
        (self.merge)(lhs, rhs, weight)
    }

    #[inline(always)]
    fn add_root(&self, value: &S) -> S {
        (self.add_root)(value)
    }

    #[inline(always)]
    fn weight_identity(&self) -> W {
        (self.weight_identity)()
    }
}

impl<S, W, M, E, R, C> std::fmt::Debug for FnOperator<S, W, M, E, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FnOperator<{}, {}>",
            std::any::type_name::<S>(),
            std::any::type_name::<W>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat() -> impl RerootingOperator<Value = String, Weight = char> {
        FnOperator::new(
            |a: &String, b: &String, w: &char| format!("{a}{w}{b}"),
            String::new,
            |s: &String| format!("({s})"),
            || '_',
        )
    }

    #[test]
    fn test_fn_operator_forwards_closures() {
        let op = concat();
        assert_eq!(op.identity(), "");
        assert_eq!(op.merge(&"a".to_string(), &"b".to_string(), &'+'), "a+b");
        assert_eq!(op.add_root(&"x".to_string()), "(x)");
        assert_eq!(op.weight_identity(), '_');
    }

    #[test]
    fn test_reference_is_an_operator() {
        let op = concat();
        let by_ref = &op;
        assert_eq!(
            RerootingOperator::merge(&by_ref, &"l".to_string(), &"r".to_string(), &'-'),
            "l-r"
        );
        assert_eq!(RerootingOperator::weight_identity(&by_ref), '_');
    }

    #[test]
    fn test_debug_names_types() {
        let op = FnOperator::new(
            |a: &u32, b: &u32, _: &()| a + b,
            || 0u32,
            |a: &u32| *a,
            || (),
        );
        assert_eq!(format!("{:?}", op), "FnOperator<u32, ()>");
    }
}
