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


//! Traversal monitoring interface
//!
//! A build runs `enter → phase(Accumulate) → vertex* → phase(Reroot) →
//! vertex* → exit`. Single-root engines skip the `Reroot` phase. Every
//! callback receives the engine's running `TraversalStatistics`.

use crate::stats::TraversalStatistics;
use arbor_core::utils::index::VertexIndex;

/// The traversal pass an event belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TraversalPhase {
    /// Post-order pass computing each vertex's value below a fixed root.
    Accumulate,
    /// Pre-order pass pushing parent-side values down and finalizing answers.
    Reroot,
}

impl std::fmt::Display for TraversalPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalPhase::Accumulate => write!(f, "Accumulate"),
            TraversalPhase::Reroot => write!(f, "Reroot"),
        }
    }
}

/// Receives events from a tree DP build over values of type `S`.
pub trait TraversalMonitor<S> {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before any traversal starts.
    fn on_enter_build(
        &mut self,
        root: VertexIndex,
        num_vertices: usize,
        statistics: &TraversalStatistics,
    );
    /// Called when a traversal pass starts.
    fn on_enter_phase(&mut self, phase: TraversalPhase, statistics: &TraversalStatistics);
    /// Called when a vertex's value for `phase` is final. In the
    /// `Accumulate` phase `value` is the subtree value handed to the parent;
    /// in the `Reroot` phase it is the vertex's answer.
    fn on_vertex_finalized(
        &mut self,
        phase: TraversalPhase,
        vertex: VertexIndex,
        depth: usize,
        value: &S,
        statistics: &TraversalStatistics,
    );
    /// Called once after the build completes.
    fn on_exit_build(&mut self, statistics: &TraversalStatistics);
}

impl<S> std::fmt::Debug for dyn TraversalMonitor<S> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TraversalMonitor({})", self.name())
    }
}

impl<S> std::fmt::Display for dyn TraversalMonitor<S> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TraversalMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;

    #[test]
    fn test_phase_display() {
        assert_eq!(TraversalPhase::Accumulate.to_string(), "Accumulate");
        assert_eq!(TraversalPhase::Reroot.to_string(), "Reroot");
    }

    #[test]
    fn test_dyn_monitor_formatting() {
        let monitor = NoOperationMonitor::new();
        let dyn_monitor: &dyn TraversalMonitor<u32> = &monitor;
        assert_eq!(format!("{:?}", dyn_monitor), "TraversalMonitor(NoOperationMonitor)");
        assert_eq!(format!("{}", dyn_monitor), "TraversalMonitor(NoOperationMonitor)");
    }
}
