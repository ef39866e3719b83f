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


//! Structural errors reported by tree validation.
//!
//! The DP engines never validate on their own; `Tree::validate` and the
//! `try_build` entry points report the first violation they find as a
//! `TreeError`.

use arbor_core::utils::index::VertexIndex;

/// The reason a directed adjacency structure is not an undirected tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has no vertices, so there is nothing to root.
    Empty,
    /// An edge endpoint or the requested root is not a vertex of the tree.
    VertexOutOfBounds {
        /// The offending vertex id.
        vertex: VertexIndex,
        /// The number of vertices in the tree.
        num_vertices: usize,
    },
    /// A vertex has an edge to itself.
    SelfLoop {
        /// The vertex carrying the loop.
        vertex: VertexIndex,
    },
    /// The number of directed edges is not `2 * (num_vertices - 1)`.
    EdgeCount {
        /// The directed edge count a tree of this size must have.
        expected: usize,
        /// The directed edge count actually present.
        actual: usize,
    },
    /// A directed edge `from -> to` has no matching `to -> from` edge.
    MissingReverseEdge {
        /// Source of the unmatched edge.
        from: VertexIndex,
        /// Destination of the unmatched edge.
        to: VertexIndex,
    },
    /// A vertex cannot be reached from vertex `0`.
    Disconnected {
        /// The first unreachable vertex.
        vertex: VertexIndex,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Tree has no vertices"),
            Self::VertexOutOfBounds {
                vertex,
                num_vertices,
            } => write!(
                f,
                "Vertex {} is out of bounds for a tree with {} vertices",
                vertex.get(),
                num_vertices
            ),
            Self::SelfLoop { vertex } => write!(f, "Vertex {} has a self-loop", vertex.get()),
            Self::EdgeCount { expected, actual } => write!(
                f,
                "Expected {} directed edges but found {}",
                expected, actual
            ),
            Self::MissingReverseEdge { from, to } => write!(
                f,
                "Edge {} -> {} has no matching reverse edge",
                from.get(),
                to.get()
            ),
            Self::Disconnected { vertex } => {
                write!(f, "Vertex {} is not reachable from vertex 0", vertex.get())
            }
        }
    }
}

impl std::error::Error for TreeError {}
