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


//! # Arbor Tree
//!
//! Dynamic programming on trees: a single-root engine (`TreeDp`) and an
//! all-roots rerooting engine (`Rerooting`) that reports, for every vertex,
//! the value the single-root DP would produce with that vertex as root.
//!
//! ## Modules
//!
//! - `graph`: adjacency-list `Tree<W>` with insertion-ordered edges and
//!   opt-in structural validation.
//! - `operator`: the `RerootingOperator` trait (`identity`, `merge`,
//!   `add_root`, `weight_identity`) and the closure-backed `FnOperator`.
//! - `operators`: stock operation sets (subtree size, distance sums,
//!   eccentricity).
//! - `rerooting`: the two-pass all-roots engine.
//! - `tree_dp`: the single-root engine.
//! - `monitor`: build observers, including a `log`-backed reporter.
//! - `stats`: counters gathered during a build.
//! - `error`: `TreeError`, returned by validation.
//!
//! ## Usage
//!
//! ```rust
//! use arbor_core::utils::index::VertexIndex;
//! use arbor_tree::{operator::FnOperator, rerooting::Rerooting};
//!
//! // Number of vertices within the subtree, counted per root.
//! let size = FnOperator::new(
//!     |acc: &u32, child: &u32, _: &()| acc + child,
//!     || 0u32,
//!     |acc: &u32| acc + 1,
//!     || (),
//! );
//! let mut dp = Rerooting::new(3, size);
//! dp.add_undirected_edge(VertexIndex::new(0), VertexIndex::new(1), ())
//!     .add_undirected_edge(VertexIndex::new(1), VertexIndex::new(2), ());
//! dp.build(VertexIndex::new(0));
//! assert_eq!(dp.answers(), &[3, 3, 3]);
//! ```

pub mod error;
pub mod graph;
pub mod monitor;
pub mod operator;
pub mod operators;
pub mod rerooting;
pub mod stats;
pub mod tree_dp;
