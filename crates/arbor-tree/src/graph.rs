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


//! Adjacency-list trees.
//!
//! `Tree<W>` stores, per vertex, the directed edges leaving it in insertion
//! order. Insertion order is significant: the DP engines visit children and
//! merge their values strictly in this order, which matters whenever the
//! merge operation is not commutative.
//!
//! Nothing here enforces the tree shape while edges are added. Call
//! [`Tree::validate`] when the input is not trusted.

use crate::error::TreeError;
use arbor_core::utils::index::{EdgeIndex, VertexIndex};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

/// A directed edge carrying a caller-defined weight.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Edge<W> {
    to: VertexIndex,
    weight: W,
}

impl<W> Edge<W> {
    /// Creates an edge pointing at `to`.
    #[inline(always)]
    pub const fn new(to: VertexIndex, weight: W) -> Self {
        Self { to, weight }
    }

    /// Returns the destination vertex.
    #[inline(always)]
    pub const fn to(&self) -> VertexIndex {
        self.to
    }

    /// Returns the edge weight.
    #[inline(always)]
    pub const fn weight(&self) -> &W {
        &self.weight
    }
}

impl<W> std::fmt::Display for Edge<W>
where
    W: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge(to: {}, weight: {})", self.to.get(), self.weight)
    }
}

/// A directed adjacency structure over vertices `0..num_vertices`.
///
/// # Examples
///
/// ```rust
/// # use arbor_tree::graph::Tree;
/// # use arbor_core::utils::index::VertexIndex;
/// let mut tree = Tree::new(3);
/// tree.add_undirected_edge(VertexIndex::new(0), VertexIndex::new(1), 5u32)
///     .add_undirected_edge(VertexIndex::new(0), VertexIndex::new(2), 7u32);
/// assert_eq!(tree.num_edges(), 4);
/// assert_eq!(tree.degree(VertexIndex::new(0)), 2);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tree<W> {
    adjacency: Vec<Vec<Edge<W>>>,
    num_edges: usize,
}

impl<W> Default for Tree<W> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<W> Tree<W> {
    /// Creates a tree with `num_vertices` vertices and no edges.
    pub fn new(num_vertices: usize) -> Self {
        let mut adjacency = Vec::with_capacity(num_vertices);
        adjacency.resize_with(num_vertices, Vec::new);
        Self {
            adjacency,
            num_edges: 0,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of directed edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns `true` if the tree has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Appends the directed edge `from -> to`.
    ///
    /// The reverse edge is not added; rerooting needs both directions.
    ///
    /// # Panics
    ///
    /// Panics if `from` is not in `0..num_vertices()`. `to` is not checked;
    /// see [`Tree::validate`].
    #[inline]
    pub fn add_edge(&mut self, from: VertexIndex, to: VertexIndex, weight: W) -> &mut Self {
        let index = from.get();
        debug_assert!(
            index < self.num_vertices(),
            "called `Tree::add_edge` with source vertex out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            index
        );

        self.adjacency[index].push(Edge::new(to, weight));
        self.num_edges += 1;
        self
    }

    /// Returns the outgoing edges of `vertex` in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is not in `0..num_vertices()`.
    #[inline]
    pub fn edges(&self, vertex: VertexIndex) -> &[Edge<W>] {
        let index = vertex.get();
        debug_assert!(
            index < self.num_vertices(),
            "called `Tree::edges` with vertex out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            index
        );

        &self.adjacency[index]
    }

    /// Returns the `edge`-th outgoing edge of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn edge(&self, vertex: VertexIndex, edge: EdgeIndex) -> &Edge<W> {
        &self.edges(vertex)[edge.get()]
    }

    /// Returns the number of outgoing edges of `vertex`.
    #[inline]
    pub fn degree(&self, vertex: VertexIndex) -> usize {
        self.edges(vertex).len()
    }

    /// Checks that the edges form an undirected tree.
    ///
    /// Checks run in this order and the first violation is returned:
    /// the tree is non-empty, every endpoint is a vertex, there are no
    /// self-loops, there are exactly `2 * (n - 1)` directed edges, every
    /// directed edge has a matching reverse edge, and every vertex is
    /// reachable from vertex `0`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use arbor_tree::{error::TreeError, graph::Tree};
    /// # use arbor_core::utils::index::VertexIndex;
    /// let mut tree = Tree::new(2);
    /// tree.add_edge(VertexIndex::new(0), VertexIndex::new(1), ());
    /// assert_eq!(
    ///     tree.validate(),
    ///     Err(TreeError::EdgeCount { expected: 2, actual: 1 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), TreeError> {
        let num_vertices = self.num_vertices();
        if num_vertices == 0 {
            return Err(TreeError::Empty);
        }

        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                let to = edge.to.get();
                if to >= num_vertices {
                    return Err(TreeError::VertexOutOfBounds {
                        vertex: edge.to,
                        num_vertices,
                    });
                }
                if to == from {
                    return Err(TreeError::SelfLoop { vertex: edge.to });
                }
            }
        }

        let expected = 2 * (num_vertices - 1);
        if self.num_edges != expected {
            return Err(TreeError::EdgeCount {
                expected,
                actual: self.num_edges,
            });
        }

        let mut multiplicity: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                *multiplicity.entry((from, edge.to.get())).or_insert(0) += 1;
            }
        }
        for (from, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                let to = edge.to.get();
                let forward = multiplicity.get(&(from, to)).copied().unwrap_or(0);
                let backward = multiplicity.get(&(to, from)).copied().unwrap_or(0);
                if forward > backward {
                    return Err(TreeError::MissingReverseEdge {
                        from: VertexIndex::new(from),
                        to: edge.to,
                    });
                }
            }
        }

        let mut visited = FixedBitSet::with_capacity(num_vertices);
        let mut stack = Vec::with_capacity(num_vertices);
        visited.insert(0);
        stack.push(0usize);
        while let Some(vertex) = stack.pop() {
            for edge in &self.adjacency[vertex] {
                let to = edge.to.get();
                if !visited.put(to) {
                    stack.push(to);
                }
            }
        }
        if let Some(vertex) = VertexIndex::range(num_vertices).find(|v| !visited.contains(v.get())) {
            return Err(TreeError::Disconnected { vertex });
        }

        Ok(())
    }
}

impl<W> Tree<W>
where
    W: Clone,
{
    /// Appends `a -> b` followed by `b -> a`, both with `weight`.
    #[inline]
    pub fn add_undirected_edge(&mut self, a: VertexIndex, b: VertexIndex, weight: W) -> &mut Self {
        self.add_edge(a, b, weight.clone());
        self.add_edge(b, a, weight)
    }

    /// Builds a tree from undirected `(a, b, weight)` triples, inserting each
    /// as `a -> b` then `b -> a`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use arbor_tree::graph::Tree;
    /// # use arbor_core::utils::index::VertexIndex;
    /// let tree = Tree::from_undirected_edges(3, [(0, 1, 1i64), (1, 2, 4)]);
    /// assert_eq!(tree.edges(VertexIndex::new(1)).len(), 2);
    /// ```
    pub fn from_undirected_edges<I>(num_vertices: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut tree = Self::new(num_vertices);
        for (a, b, weight) in edges {
            tree.add_undirected_edge(VertexIndex::new(a), VertexIndex::new(b), weight);
        }
        tree
    }
}

impl<W> std::fmt::Display for Tree<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tree(vertices: {}, directed edges: {})",
            self.num_vertices(),
            self.num_edges
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vi(i: usize) -> VertexIndex {
        VertexIndex::new(i)
    }

    #[test]
    fn test_new_has_no_edges() {
        let tree: Tree<u32> = Tree::new(4);
        assert_eq!(tree.num_vertices(), 4);
        assert_eq!(tree.num_edges(), 0);
        assert!(!tree.is_empty());
        assert!(Tree::<u32>::default().is_empty());
        assert_eq!(format!("{}", tree), "Tree(vertices: 4, directed edges: 0)");
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let mut tree = Tree::new(4);
        tree.add_edge(vi(0), vi(3), 30)
            .add_edge(vi(0), vi(1), 10)
            .add_edge(vi(0), vi(2), 20);
        let targets: Vec<usize> = tree.edges(vi(0)).iter().map(|e| e.to().get()).collect();
        assert_eq!(targets, vec![3, 1, 2]);
        assert_eq!(*tree.edge(vi(0), EdgeIndex::new(1)).weight(), 10);
        assert_eq!(tree.degree(vi(1)), 0);
    }

    #[test]
    fn test_undirected_edge_adds_both_directions() {
        let mut tree = Tree::new(2);
        tree.add_undirected_edge(vi(0), vi(1), 'w');
        assert_eq!(tree.edges(vi(0)), &[Edge::new(vi(1), 'w')]);
        assert_eq!(tree.edges(vi(1)), &[Edge::new(vi(0), 'w')]);
        assert_eq!(tree.num_edges(), 2);
    }

    #[test]
    fn test_validate_accepts_trees() {
        let single: Tree<()> = Tree::new(1);
        assert_eq!(single.validate(), Ok(()));

        let star = Tree::from_undirected_edges(5, [(0, 1, ()), (0, 2, ()), (0, 3, ()), (0, 4, ())]);
        assert_eq!(star.validate(), Ok(()));

        let path = Tree::from_undirected_edges(4, [(2, 3, 1), (1, 2, 1), (0, 1, 1)]);
        assert_eq!(path.validate(), Ok(()));
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(Tree::<()>::new(0).validate(), Err(TreeError::Empty));
    }

    #[test]
    fn test_validate_out_of_bounds() {
        let mut tree = Tree::new(2);
        tree.add_edge(vi(0), vi(5), ());
        assert_eq!(
            tree.validate(),
            Err(TreeError::VertexOutOfBounds {
                vertex: vi(5),
                num_vertices: 2
            })
        );
    }

    #[test]
    fn test_validate_self_loop() {
        let mut tree = Tree::new(2);
        tree.add_undirected_edge(vi(1), vi(1), ());
        assert_eq!(tree.validate(), Err(TreeError::SelfLoop { vertex: vi(1) }));
    }

    #[test]
    fn test_validate_edge_count() {
        let tree = Tree::from_undirected_edges(3, [(0, 1, ())]);
        assert_eq!(
            tree.validate(),
            Err(TreeError::EdgeCount {
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_validate_missing_reverse_edge() {
        let mut tree = Tree::new(3);
        tree.add_undirected_edge(vi(0), vi(1), ())
            .add_edge(vi(1), vi(2), ())
            .add_edge(vi(0), vi(2), ());
        assert_eq!(
            tree.validate(),
            Err(TreeError::MissingReverseEdge {
                from: vi(0),
                to: vi(2)
            })
        );
    }

    #[test]
    fn test_validate_disconnected_with_duplicate_edge() {
        let tree = Tree::from_undirected_edges(3, [(0, 1, ()), (1, 0, ())]);
        assert_eq!(tree.validate(), Err(TreeError::Disconnected { vertex: vi(2) }));
    }
}
