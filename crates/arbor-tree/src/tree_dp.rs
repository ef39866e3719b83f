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


//! Single-root tree DP.
//!
//! `TreeDp<O>` runs only the accumulation pass of rerooting: for a fixed
//! root, every vertex gets `add_root(merge(...merge(identity, c0, w0)...,
//! ck, wk))` over its children in edge insertion order. It is the reference
//! a rerooted answer must agree with when recomputed root by root.
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::utils::index::VertexIndex;
//! use arbor_tree::{graph::Tree, operators::SubtreeSizeOperator, tree_dp::TreeDp};
//!
//! let tree = Tree::from_undirected_edges(4, [(0, 1, ()), (1, 2, ()), (1, 3, ())]);
//! let mut dp = TreeDp::from_tree(tree, SubtreeSizeOperator::new());
//! dp.build(VertexIndex::new(0));
//! assert_eq!(dp.values(), &[4, 3, 1, 1]);
//! ```

use crate::{
    error::TreeError,
    graph::Tree,
    monitor::{
        no_op::NoOperationMonitor,
        traversal_monitor::{TraversalMonitor, TraversalPhase},
    },
    operator::RerootingOperator,
    stats::TraversalStatistics,
};
use arbor_core::utils::index::VertexIndex;
use std::time::Instant;

struct Frame<S> {
    vertex: usize,
    parent: Option<usize>,
    cursor: usize,
    acc: S,
}

/// Rooted tree DP engine over the operation set `O`.
pub struct TreeDp<O>
where
    O: RerootingOperator,
{
    tree: Tree<O::Weight>,
    operator: O,
    values: Vec<O::Value>,
    statistics: TraversalStatistics,
    built: bool,
}

impl<O> TreeDp<O>
where
    O: RerootingOperator,
{
    /// Creates an engine over `num_vertices` isolated vertices. Every value
    /// starts out as `operator.identity()`.
    pub fn new(num_vertices: usize, operator: O) -> Self {
        Self::from_tree(Tree::new(num_vertices), operator)
    }

    /// Creates an engine over an existing tree.
    pub fn from_tree(tree: Tree<O::Weight>, operator: O) -> Self {
        let mut values = Vec::with_capacity(tree.num_vertices());
        values.resize_with(tree.num_vertices(), || operator.identity());
        Self {
            tree,
            operator,
            values,
            statistics: TraversalStatistics::default(),
            built: false,
        }
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not a vertex.
    #[inline]
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex, weight: O::Weight) -> &mut Self {
        self.tree.add_edge(from, to, weight);
        self
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.tree.num_vertices()
    }

    #[inline]
    pub fn tree(&self) -> &Tree<O::Weight> {
        &self.tree
    }

    #[inline]
    pub fn operator(&self) -> &O {
        &self.operator
    }

    #[inline]
    pub fn statistics(&self) -> &TraversalStatistics {
        &self.statistics
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Returns the subtree value of `vertex` under the last build's root.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..num_vertices()`.
    #[inline]
    pub fn value(&self, vertex: VertexIndex) -> &O::Value {
        let index = vertex.get();
        debug_assert!(
            index < self.num_vertices(),
            "called `TreeDp::value` with vertex out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            index
        );

        &self.values[index]
    }

    /// Returns all subtree values indexed by vertex id.
    #[inline]
    pub fn values(&self) -> &[O::Value] {
        &self.values
    }

    /// Computes the subtree value of every vertex reachable from `root`.
    /// Unreachable vertices keep their previous value.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not in `0..num_vertices()`.
    #[inline]
    pub fn build(&mut self, root: VertexIndex) {
        let mut monitor = NoOperationMonitor::new();
        self.build_with_monitor(root, &mut monitor);
    }

    /// Validates the tree and `root`, then builds.
    pub fn try_build(&mut self, root: VertexIndex) -> Result<(), TreeError> {
        self.tree.validate()?;
        if root.get() >= self.num_vertices() {
            return Err(TreeError::VertexOutOfBounds {
                vertex: root,
                num_vertices: self.num_vertices(),
            });
        }

        self.build(root);
        Ok(())
    }

    /// Computes the subtree values, reporting progress to `monitor`.
    pub fn build_with_monitor<M>(&mut self, root: VertexIndex, monitor: &mut M)
    where
        M: TraversalMonitor<O::Value> + ?Sized,
    {
        debug_assert!(
            root.get() < self.num_vertices(),
            "called `TreeDp::build` with root out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            root.get()
        );

        let start = Instant::now();
        self.statistics.reset();
        self.built = false;
        monitor.on_enter_build(root, self.num_vertices(), &self.statistics);
        monitor.on_enter_phase(TraversalPhase::Accumulate, &self.statistics);

        let Self {
            tree,
            operator,
            values,
            statistics,
            ..
        } = self;
        let (tree, operator) = (&*tree, &*operator);

        let mut stack: Vec<Frame<O::Value>> = vec![Frame {
            vertex: root.get(),
            parent: None,
            cursor: 0,
            acc: operator.identity(),
        }];

        while let Some(mut frame) = stack.pop() {
            let edges = tree.edges(VertexIndex::new(frame.vertex));
            if let Some(edge) = edges.get(frame.cursor) {
                let child = edge.to().get();
                let parent = frame.vertex;
                let skip = Some(child) == frame.parent;
                if skip {
                    frame.cursor += 1;
                }
                stack.push(frame);
                if !skip {
                    statistics.on_depth_update(stack.len() as u64);
                    stack.push(Frame {
                        vertex: child,
                        parent: Some(parent),
                        cursor: 0,
                        acc: operator.identity(),
                    });
                }
                continue;
            }

            values[frame.vertex] = operator.add_root(&frame.acc);
            statistics.on_root_transform();
            statistics.on_vertex_accumulated();
            monitor.on_vertex_finalized(
                TraversalPhase::Accumulate,
                VertexIndex::new(frame.vertex),
                stack.len(),
                &values[frame.vertex],
                statistics,
            );

            if let Some(parent) = stack.last_mut() {
                let weight = tree.edges(VertexIndex::new(parent.vertex))[parent.cursor].weight();
                parent.acc = operator.merge(&parent.acc, &values[frame.vertex], weight);
                statistics.on_merges(1);
                parent.cursor += 1;
            }
        }

        self.statistics.set_total_time(start.elapsed());
        self.built = true;
        monitor.on_exit_build(&self.statistics);
    }
}

impl<O> TreeDp<O>
where
    O: RerootingOperator,
    O::Weight: Clone,
{
    /// Appends `a -> b` followed by `b -> a`, both with `weight`.
    #[inline]
    pub fn add_undirected_edge(&mut self, a: VertexIndex, b: VertexIndex, weight: O::Weight) -> &mut Self {
        self.tree.add_undirected_edge(a, b, weight);
        self
    }
}

impl<O> std::ops::Index<VertexIndex> for TreeDp<O>
where
    O: RerootingOperator,
{
    type Output = O::Value;

    #[inline]
    fn index(&self, vertex: VertexIndex) -> &Self::Output {
        self.value(vertex)
    }
}

impl<O> std::ops::Index<usize> for TreeDp<O>
where
    O: RerootingOperator,
{
    type Output = O::Value;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.value(VertexIndex::new(index))
    }
}

impl<O> std::fmt::Debug for TreeDp<O>
where
    O: RerootingOperator + std::fmt::Debug,
    O::Value: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeDp")
            .field("num_vertices", &self.num_vertices())
            .field("num_edges", &self.tree.num_edges())
            .field("operator", &self.operator)
            .field("built", &self.built)
            .field("values", &self.values)
            .finish()
    }
}

/// Writes the values separated by single spaces.
impl<O> std::fmt::Display for TreeDp<O>
where
    O: RerootingOperator,
    O::Value: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        operator::FnOperator,
        operators::{DistanceSumOperator, SubtreeSizeOperator},
    };

    fn vi(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    /// Records the fold order: `acc` then `[w:child]` for each child.
    fn order_operator() -> impl RerootingOperator<Value = String, Weight = u32> {
        FnOperator::new(
            |acc: &String, child: &String, w: &u32| format!("{acc}[{w}:{child}]"),
            String::new,
            |acc: &String| format!("<{acc}>"),
            || 0u32,
        )
    }

    #[test]
    fn test_values_before_build_are_identity() {
        let dp = TreeDp::new(3, SubtreeSizeOperator::<()>::new());
        assert!(!dp.is_built());
        assert_eq!(dp.values(), &[0, 0, 0]);
    }

    #[test]
    fn test_subtree_sizes_depend_on_root() {
        let tree = Tree::from_undirected_edges(5, [(0, 1, ()), (0, 2, ()), (2, 3, ()), (2, 4, ())]);
        let mut dp = TreeDp::from_tree(tree, SubtreeSizeOperator::new());

        dp.build(vi(0));
        assert_eq!(dp.values(), &[5, 1, 3, 1, 1]);

        dp.build(vi(3));
        assert_eq!(dp.values(), &[2, 1, 4, 5, 1]);
        assert_eq!(dp[vi(2)], 4);
        assert!(dp.is_built());
    }

    #[test]
    fn test_index_by_raw_vertex_id() {
        let tree = Tree::from_undirected_edges(5, [(0, 1, ()), (0, 2, ()), (2, 3, ()), (2, 4, ())]);
        let mut dp = TreeDp::from_tree(tree, SubtreeSizeOperator::new());
        dp.build(vi(0));
        assert_eq!(dp[2usize], 3);
        assert_eq!(dp[0usize], dp[vi(0)]);
    }

    #[test]
    fn test_children_fold_in_insertion_order() {
        let mut dp = TreeDp::new(4, order_operator());
        dp.add_undirected_edge(vi(0), vi(2), 2)
            .add_undirected_edge(vi(0), vi(1), 1)
            .add_undirected_edge(vi(0), vi(3), 3);
        dp.build(vi(0));
        assert_eq!(dp.value(vi(0)), "<[2:<>][1:<>][3:<>]>");
        assert_eq!(dp.value(vi(1)), "<>");
    }

    #[test]
    fn test_unreachable_vertices_keep_previous_value() {
        let mut dp = TreeDp::new(3, SubtreeSizeOperator::<()>::new());
        dp.add_undirected_edge(vi(0), vi(1), ());
        dp.build(vi(0));
        assert_eq!(dp.values(), &[2, 1, 0]);
    }

    #[test]
    fn test_distance_sum_from_root() {
        let tree = Tree::from_undirected_edges(4, [(0, 1, 2i64), (1, 2, 3), (0, 3, 10)]);
        let mut dp = TreeDp::from_tree(tree, DistanceSumOperator::new());
        dp.build(vi(0));
        // 0->1: 2, 0->2: 5, 0->3: 10
        assert_eq!(dp.value(vi(0)).0, 17);
        assert_eq!(dp.value(vi(0)).1, 4);
    }

    #[test]
    fn test_statistics_count_every_vertex() {
        let tree = Tree::from_undirected_edges(4, [(0, 1, ()), (1, 2, ()), (2, 3, ())]);
        let mut dp = TreeDp::from_tree(tree, SubtreeSizeOperator::new());
        dp.build(vi(0));
        let stats = dp.statistics();
        assert_eq!(stats.vertices_accumulated, 4);
        assert_eq!(stats.vertices_rerooted, 0);
        assert_eq!(stats.merges, 3);
        assert_eq!(stats.root_transforms, 4);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_try_build_rejects_bad_root() {
        let mut dp = TreeDp::from_tree(
            Tree::from_undirected_edges(2, [(0, 1, ())]),
            SubtreeSizeOperator::new(),
        );
        assert_eq!(
            dp.try_build(vi(2)),
            Err(TreeError::VertexOutOfBounds {
                vertex: vi(2),
                num_vertices: 2
            })
        );
        assert!(!dp.is_built());
        assert_eq!(dp.try_build(vi(1)), Ok(()));
        assert_eq!(dp.values(), &[1, 2]);
    }

    #[test]
    fn test_display_joins_with_spaces() {
        let mut dp = TreeDp::from_tree(
            Tree::from_undirected_edges(3, [(0, 1, ()), (0, 2, ())]),
            SubtreeSizeOperator::new(),
        );
        dp.build(vi(0));
        assert_eq!(format!("{}", dp), "3 1 1");
    }

    #[test]
    fn test_deep_path_does_not_overflow() {
        let n = 200_000;
        let tree = Tree::from_undirected_edges(n, (0..n - 1).map(|v| (v, v + 1, ())));
        let mut dp = TreeDp::from_tree(tree, SubtreeSizeOperator::new());
        dp.build(vi(0));
        assert_eq!(*dp.value(vi(0)), n);
        assert_eq!(*dp.value(vi(n - 1)), 1);
    }
}
