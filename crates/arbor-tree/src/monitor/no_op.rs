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


use crate::{
    monitor::traversal_monitor::{TraversalMonitor, TraversalPhase},
    stats::TraversalStatistics,
};
use arbor_core::utils::index::VertexIndex;

/// A monitor that ignores every event.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl<S> TraversalMonitor<S> for NoOperationMonitor {
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_build(
        &mut self,
        _root: VertexIndex,
        _num_vertices: usize,
        _statistics: &TraversalStatistics,
    ) {
    }

    #[inline(always)]
    fn on_enter_phase(&mut self, _phase: TraversalPhase, _statistics: &TraversalStatistics) {}

    #[inline(always)]
    fn on_vertex_finalized(
        &mut self,
        _phase: TraversalPhase,
        _vertex: VertexIndex,
        _depth: usize,
        _value: &S,
        _statistics: &TraversalStatistics,
    ) {
    }

    #[inline(always)]
    fn on_exit_build(&mut self, _statistics: &TraversalStatistics) {}
}
