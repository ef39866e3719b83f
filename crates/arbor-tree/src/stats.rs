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


use arbor_core::num::saturating::SaturatingCounter;
use std::time::Duration;

/// Counters collected while a tree DP engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalStatistics {
    /// Vertices finalized by the rooted accumulation (post-order) pass.
    pub vertices_accumulated: u64,
    /// Vertices finalized by the rerooting (pre-order) pass.
    pub vertices_rerooted: u64,
    /// Calls to the merge operation.
    pub merges: u64,
    /// Calls to the root transform.
    pub root_transforms: u64,
    /// The deepest vertex reached, with the root at depth 0.
    pub max_depth: u64,
    /// Wall-clock time spent in the last build.
    pub time_total: Duration,
}

impl TraversalStatistics {
    #[inline]
    pub fn on_vertex_accumulated(&mut self) {
        self.vertices_accumulated = self.vertices_accumulated.saturating_inc();
    }

    #[inline]
    pub fn on_vertex_rerooted(&mut self) {
        self.vertices_rerooted = self.vertices_rerooted.saturating_inc();
    }

    #[inline]
    pub fn on_merges(&mut self, count: u64) {
        self.merges = self.merges.saturating_add_val(count);
    }

    #[inline]
    pub fn on_root_transform(&mut self) {
        self.root_transforms = self.root_transforms.saturating_inc();
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Clears every counter.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for TraversalStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tree DP Statistics:")?;
        writeln!(f, "  Vertices accumulated: {}", self.vertices_accumulated)?;
        writeln!(f, "  Vertices rerooted:    {}", self.vertices_rerooted)?;
        writeln!(f, "  Merges:               {}", self.merges)?;
        writeln!(f, "  Root transforms:      {}", self.root_transforms)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_reset() {
        let mut stats = TraversalStatistics::default();
        stats.on_vertex_accumulated();
        stats.on_vertex_accumulated();
        stats.on_vertex_rerooted();
        stats.on_merges(5);
        stats.on_root_transform();
        stats.on_depth_update(3);
        stats.on_depth_update(1);
        assert_eq!(stats.vertices_accumulated, 2);
        assert_eq!(stats.vertices_rerooted, 1);
        assert_eq!(stats.merges, 5);
        assert_eq!(stats.root_transforms, 1);
        assert_eq!(stats.max_depth, 3);

        stats.reset();
        assert_eq!(stats, TraversalStatistics::default());
    }

    #[test]
    fn test_merges_saturate() {
        let mut stats = TraversalStatistics {
            merges: u64::MAX - 1,
            ..Default::default()
        };
        stats.on_merges(10);
        assert_eq!(stats.merges, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = TraversalStatistics {
            vertices_accumulated: 4,
            ..Default::default()
        };
        let text = format!("{}", stats);
        assert!(text.starts_with("Tree DP Statistics:"));
        assert!(text.contains("Vertices accumulated: 4"));
    }
}
