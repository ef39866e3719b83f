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


//! Fan-out monitoring
//!
//! `CompositeTraversalMonitor` forwards every event to each child monitor in
//! insertion order, so logging and custom inspection can be combined for a
//! single build.

use crate::{
    monitor::traversal_monitor::{TraversalMonitor, TraversalPhase},
    stats::TraversalStatistics,
};
use arbor_core::utils::index::VertexIndex;

/// A monitor forwarding every event to all of its children.
pub struct CompositeTraversalMonitor<'a, S> {
    monitors: Vec<Box<dyn TraversalMonitor<S> + 'a>>,
}

impl<'a, S> Default for CompositeTraversalMonitor<'a, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> CompositeTraversalMonitor<'a, S> {
    /// Creates an empty composite.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates an empty composite with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor; it receives events after all previously added ones.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TraversalMonitor<S> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds an already boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TraversalMonitor<S> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the child monitors in dispatch order.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TraversalMonitor<S> + 'a>] {
        &self.monitors
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no child monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Removes all child monitors.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

impl<'a, S> TraversalMonitor<S> for CompositeTraversalMonitor<'a, S> {
    fn name(&self) -> &str {
        "CompositeTraversalMonitor"
    }

    fn on_enter_build(
        &mut self,
        root: VertexIndex,
        num_vertices: usize,
        statistics: &TraversalStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_build(root, num_vertices, statistics);
        }
    }

    fn on_enter_phase(&mut self, phase: TraversalPhase, statistics: &TraversalStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_phase(phase, statistics);
        }
    }

    fn on_vertex_finalized(
        &mut self,
        phase: TraversalPhase,
        vertex: VertexIndex,
        depth: usize,
        value: &S,
        statistics: &TraversalStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_vertex_finalized(phase, vertex, depth, value, statistics);
        }
    }

    fn on_exit_build(&mut self, statistics: &TraversalStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_build(statistics);
        }
    }
}

impl<'a, S> std::fmt::Debug for CompositeTraversalMonitor<'a, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.monitors.iter().map(|m| m.name()).collect();
        f.debug_struct("CompositeTraversalMonitor")
            .field("monitors", &names)
            .finish()
    }
}
