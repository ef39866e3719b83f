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


//! All-roots tree DP (rerooting).
//!
//! `Rerooting<O>` computes, for every vertex of a tree, the value a rooted
//! tree DP described by `O` would produce if that vertex were the root, in
//! time linear in the number of edges.
//!
//! A build runs two passes from a chosen root:
//!
//! 1. **Accumulate** (post-order). Every vertex folds the subtree values of
//!    its children into an accumulator, left to right in edge insertion
//!    order, and hands `add_root(acc)` to its parent. The value received over
//!    each child edge is kept in a per-edge table.
//! 2. **Reroot** (pre-order). Every vertex first stores the value inherited
//!    from its parent on its parent edge, so its table now describes all of
//!    its neighbours. Prefix merges (left to right) and suffix merges (right
//!    to left) over that table give the answer, `add_root(prefix[deg])`, and
//!    for every child edge `i` the value that child inherits:
//!    `add_root(merge(prefix[i], suffix[i + 1], weight_identity))`.
//!
//! Both passes use explicit stacks, so deep trees do not exhaust the call
//! stack. Children are visited in insertion order, exactly as a recursive
//! implementation would.
//!
//! The answers do not depend on the root passed to `build` as long as the
//! merge is associative and commutative. For non-commutative merges the
//! fold order above is the contract.
//!
//! # Examples
//!
//! ```rust
//! use arbor_core::utils::index::VertexIndex;
//! use arbor_tree::{operators::DistanceSumOperator, rerooting::Rerooting};
//!
//! // 0 - 1 - 2 - 3 with unit weights.
//! let mut dp = Rerooting::new(4, DistanceSumOperator::<i64>::new());
//! for v in 0..3 {
//!     dp.add_undirected_edge(VertexIndex::new(v), VertexIndex::new(v + 1), 1);
//! }
//! dp.build(VertexIndex::new(0));
//!
//! let sums: Vec<i64> = dp.answers().iter().map(|&(sum, _)| sum).collect();
//! assert_eq!(sums, vec![6, 4, 4, 6]);
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

/// A pending vertex of the accumulation pass.
struct AccumulateFrame<S> {
    vertex: usize,
    parent: Option<usize>,
    cursor: usize,
    acc: S,
}

/// A pending vertex of the rerooting pass.
struct RerootFrame<S> {
    vertex: usize,
    parent: Option<usize>,
    from_parent: S,
    depth: usize,
}

/// Rerooting DP engine over the operation set `O`.
pub struct Rerooting<O>
where
    O: RerootingOperator,
{
    tree: Tree<O::Weight>,
    operator: O,
    edge_values: Vec<Vec<O::Value>>,
    answers: Vec<O::Value>,
    statistics: TraversalStatistics,
    built: bool,
}

impl<O> Rerooting<O>
where
    O: RerootingOperator,
{
    /// Creates an engine over `num_vertices` isolated vertices.
    ///
    /// Every answer starts out as `operator.identity()`.
    pub fn new(num_vertices: usize, operator: O) -> Self {
        Self::from_tree(Tree::new(num_vertices), operator)
    }

    /// Creates an engine over an existing tree.
    pub fn from_tree(tree: Tree<O::Weight>, operator: O) -> Self {
        let num_vertices = tree.num_vertices();
        let mut edge_values = Vec::with_capacity(num_vertices);
        edge_values.resize_with(num_vertices, Vec::new);
        let mut answers = Vec::with_capacity(num_vertices);
        answers.resize_with(num_vertices, || operator.identity());

        Self {
            tree,
            operator,
            edge_values,
            answers,
            statistics: TraversalStatistics::default(),
            built: false,
        }
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// Rerooting needs both directions of every tree edge; the caller adds
    /// the reverse edge (usually with the same weight) or uses
    /// [`Rerooting::add_undirected_edge`].
    ///
    /// # Panics
    ///
    /// Panics if `from` is not a vertex.
    #[inline]
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex, weight: O::Weight) -> &mut Self {
        self.tree.add_edge(from, to, weight);
        self
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.tree.num_vertices()
    }

    /// Returns the underlying tree.
    #[inline]
    pub fn tree(&self) -> &Tree<O::Weight> {
        &self.tree
    }

    /// Returns the operation set.
    #[inline]
    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Returns the statistics of the last build.
    #[inline]
    pub fn statistics(&self) -> &TraversalStatistics {
        &self.statistics
    }

    /// Returns `true` once a build has completed.
    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Returns the answer for `vertex`: the DP value of the whole tree
    /// rooted at `vertex`. Before a build this is the identity.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..num_vertices()`.
    #[inline]
    pub fn answer(&self, vertex: VertexIndex) -> &O::Value {
        let index = vertex.get();
        debug_assert!(
            index < self.num_vertices(),
            "called `Rerooting::answer` with vertex out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            index
        );

        &self.answers[index]
    }

    /// Returns all answers indexed by vertex id.
    #[inline]
    pub fn answers(&self) -> &[O::Value] {
        &self.answers
    }

    /// Consumes the engine and returns the answers.
    #[inline]
    pub fn into_answers(self) -> Vec<O::Value> {
        self.answers
    }

    /// Returns the per-edge values of `vertex`, aligned with
    /// `tree().edges(vertex)`.
    ///
    /// After a build, entry `i` is the DP value of the component behind edge
    /// `i` as seen from `vertex`: a child subtree value, or for the parent
    /// edge, the value inherited from the parent.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..num_vertices()`.
    #[inline]
    pub fn edge_values(&self, vertex: VertexIndex) -> &[O::Value] {
        &self.edge_values[vertex.get()]
    }

    /// Computes every answer, traversing from `root`.
    ///
    /// The input must be a tree with both directions of every edge present;
    /// this is not checked (see [`Rerooting::try_build`]). Calling `build`
    /// again recomputes everything from scratch.
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
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use arbor_core::utils::index::VertexIndex;
    /// # use arbor_tree::{error::TreeError, operators::SubtreeSizeOperator, rerooting::Rerooting};
    /// let mut dp = Rerooting::new(3, SubtreeSizeOperator::<()>::new());
    /// dp.add_undirected_edge(VertexIndex::new(0), VertexIndex::new(1), ());
    /// assert_eq!(
    ///     dp.try_build(VertexIndex::new(0)),
    ///     Err(TreeError::EdgeCount { expected: 4, actual: 2 })
    /// );
    /// dp.add_undirected_edge(VertexIndex::new(1), VertexIndex::new(2), ());
    /// assert_eq!(dp.try_build(VertexIndex::new(0)), Ok(()));
    /// assert_eq!(dp.answers(), &[3, 3, 3]);
    /// ```
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

    /// Computes every answer, reporting progress to `monitor`.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not in `0..num_vertices()`.
    pub fn build_with_monitor<M>(&mut self, root: VertexIndex, monitor: &mut M)
    where
        M: TraversalMonitor<O::Value> + ?Sized,
    {
        debug_assert!(
            root.get() < self.num_vertices(),
            "called `Rerooting::build` with root out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            root.get()
        );

        let start = Instant::now();
        self.statistics.reset();
        self.built = false;
        monitor.on_enter_build(root, self.num_vertices(), &self.statistics);

        monitor.on_enter_phase(TraversalPhase::Accumulate, &self.statistics);
        self.accumulate(root.get(), monitor);

        monitor.on_enter_phase(TraversalPhase::Reroot, &self.statistics);
        self.reroot(root.get(), monitor);

        self.statistics.set_total_time(start.elapsed());
        self.built = true;
        monitor.on_exit_build(&self.statistics);
    }

    /// Post-order pass: fills the child-edge entries of `edge_values` for
    /// every vertex reachable from `root`. Parent-edge entries stay identity.
    fn accumulate<M>(&mut self, root: usize, monitor: &mut M)
    where
        M: TraversalMonitor<O::Value> + ?Sized,
    {
        let Self {
            tree,
            operator,
            edge_values,
            statistics,
            ..
        } = self;
        let (tree, operator) = (&*tree, &*operator);

        let mut stack: Vec<AccumulateFrame<O::Value>> = Vec::new();
        reset_edge_values(operator, &mut edge_values[root], tree.degree(VertexIndex::new(root)));
        stack.push(AccumulateFrame {
            vertex: root,
            parent: None,
            cursor: 0,
            acc: operator.identity(),
        });

        while let Some(mut frame) = stack.pop() {
            let edges = tree.edges(VertexIndex::new(frame.vertex));
            if let Some(edge) = edges.get(frame.cursor) {
                let child = edge.to().get();
                if Some(child) == frame.parent {
                    frame.cursor += 1;
                    stack.push(frame);
                    continue;
                }

                let parent = frame.vertex;
                stack.push(frame);
                reset_edge_values(operator, &mut edge_values[child], tree.degree(edge.to()));
                statistics.on_depth_update(stack.len() as u64);
                stack.push(AccumulateFrame {
                    vertex: child,
                    parent: Some(parent),
                    cursor: 0,
                    acc: operator.identity(),
                });
                continue;
            }

            let value = operator.add_root(&frame.acc);
            statistics.on_root_transform();
            statistics.on_vertex_accumulated();
            monitor.on_vertex_finalized(
                TraversalPhase::Accumulate,
                VertexIndex::new(frame.vertex),
                stack.len(),
                &value,
                statistics,
            );

            if let Some(parent) = stack.last_mut() {
                let index = parent.cursor;
                let weight = tree.edges(VertexIndex::new(parent.vertex))[index].weight();
                parent.acc = operator.merge(&parent.acc, &value, weight);
                statistics.on_merges(1);
                edge_values[parent.vertex][index] = value;
                parent.cursor += 1;
            }
        }
    }

    /// Pre-order pass: finalizes `answers` for every vertex reachable from
    /// `root`.
    fn reroot<M>(&mut self, root: usize, monitor: &mut M)
    where
        M: TraversalMonitor<O::Value> + ?Sized,
    {
        let Self {
            tree,
            operator,
            edge_values,
            answers,
            statistics,
            ..
        } = self;
        let (tree, operator) = (&*tree, &*operator);

        let weight_identity = operator.weight_identity();
        let mut prefix: Vec<O::Value> = Vec::new();
        let mut suffix: Vec<O::Value> = Vec::new();
        let mut stack: Vec<RerootFrame<O::Value>> = Vec::new();
        stack.push(RerootFrame {
            vertex: root,
            parent: None,
            from_parent: operator.identity(),
            depth: 0,
        });

        while let Some(frame) = stack.pop() {
            let RerootFrame {
                vertex,
                parent,
                from_parent,
                depth,
            } = frame;
            let edges = tree.edges(VertexIndex::new(vertex));
            let values = &mut edge_values[vertex];
            let degree = edges.len();

            for (value, edge) in values.iter_mut().zip(edges) {
                if Some(edge.to().get()) == parent {
                    *value = from_parent.clone();
                }
            }

            prefix.clear();
            prefix.push(operator.identity());
            for (i, (value, edge)) in values.iter().zip(edges).enumerate() {
                let next = operator.merge(&prefix[i], value, edge.weight());
                prefix.push(next);
            }

            suffix.clear();
            suffix.resize_with(degree + 1, || operator.identity());
            for i in (0..degree).rev() {
                suffix[i] = operator.merge(&suffix[i + 1], &values[i], edges[i].weight());
            }
            statistics.on_merges(2 * degree as u64);

            answers[vertex] = operator.add_root(&prefix[degree]);
            statistics.on_root_transform();
            statistics.on_vertex_rerooted();
            statistics.on_depth_update(depth as u64);
            monitor.on_vertex_finalized(
                TraversalPhase::Reroot,
                VertexIndex::new(vertex),
                depth,
                &answers[vertex],
                statistics,
            );

            // Reverse push keeps children popping in insertion order.
            for i in (0..degree).rev() {
                let child = edges[i].to().get();
                if Some(child) == parent {
                    continue;
                }

                let rest = operator.merge(&prefix[i], &suffix[i + 1], &weight_identity);
                statistics.on_merges(1);
                let inherited = operator.add_root(&rest);
                statistics.on_root_transform();
                stack.push(RerootFrame {
                    vertex: child,
                    parent: Some(vertex),
                    from_parent: inherited,
                    depth: depth + 1,
                });
            }
        }
    }
}

impl<O> Rerooting<O>
where
    O: RerootingOperator,
    O::Weight: Clone,
{
    /// Appends `a -> b` followed by `b -> a`, both with `weight`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is not a vertex.
    #[inline]
    pub fn add_undirected_edge(&mut self, a: VertexIndex, b: VertexIndex, weight: O::Weight) -> &mut Self {
        self.tree.add_undirected_edge(a, b, weight);
        self
    }
}

/// Replaces `values` by `degree` fresh identities.
#[inline]
fn reset_edge_values<O>(operator: &O, values: &mut Vec<O::Value>, degree: usize)
where
    O: RerootingOperator,
{
    values.clear();
    values.resize_with(degree, || operator.identity());
}

impl<O> std::ops::Index<VertexIndex> for Rerooting<O>
where
    O: RerootingOperator,
{
    type Output = O::Value;

    #[inline]
    fn index(&self, vertex: VertexIndex) -> &Self::Output {
        self.answer(vertex)
    }
}

impl<O> std::ops::Index<usize> for Rerooting<O>
where
    O: RerootingOperator,
{
    type Output = O::Value;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.answer(VertexIndex::new(index))
    }
}

impl<O> std::fmt::Debug for Rerooting<O>
where
    O: RerootingOperator + std::fmt::Debug,
    O::Value: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rerooting")
            .field("num_vertices", &self.num_vertices())
            .field("num_edges", &self.tree.num_edges())
            .field("operator", &self.operator)
            .field("built", &self.built)
            .field("answers", &self.answers)
            .finish()
    }
}

/// Writes the answers separated by single spaces.
impl<O> std::fmt::Display for Rerooting<O>
where
    O: RerootingOperator,
    O::Value: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, answer) in self.answers.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", answer)?;
        }
        Ok(())
    }
}
