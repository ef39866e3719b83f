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
use log::Level;
use std::time::Instant;

/// Reports build progress through the `log` facade.
///
/// Build and phase boundaries are emitted at `level`. Per-vertex events are
/// emitted at `Level::Trace` when `log_vertices` is enabled, which is only
/// sensible for small trees.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    level: Level,
    log_vertices: bool,
    start_time: Instant,
    phase_start_time: Instant,
    current_phase: Option<TraversalPhase>,
}

impl LogMonitor {
    /// Creates a monitor logging build and phase boundaries at `level`.
    pub fn new(level: Level) -> Self {
        let now = Instant::now();
        Self {
            level,
            log_vertices: false,
            start_time: now,
            phase_start_time: now,
            current_phase: None,
        }
    }

    /// Also log every finalized vertex at `Level::Trace`.
    pub fn with_vertex_events(mut self, enabled: bool) -> Self {
        self.log_vertices = enabled;
        self
    }

    /// Returns the level used for build and phase boundaries.
    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns `true` if per-vertex events are logged.
    #[inline]
    pub fn logs_vertices(&self) -> bool {
        self.log_vertices
    }

    /// Logs how long the running phase took, if any, and clears it.
    fn finish_phase(&mut self, now: Instant) {
        if let Some(phase) = self.current_phase.take() {
            log::log!(
                self.level,
                "{} phase finished in {:.2?}",
                phase,
                now.duration_since(self.phase_start_time)
            );
        }
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(level: {}, log_vertices: {})",
            self.level, self.log_vertices
        )
    }
}

impl<S> TraversalMonitor<S> for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_build(
        &mut self,
        root: VertexIndex,
        num_vertices: usize,
        _statistics: &TraversalStatistics,
    ) {
        self.start_time = Instant::now();
        self.phase_start_time = self.start_time;
        self.current_phase = None;
        log::log!(
            self.level,
            "building tree DP over {} vertices from root {}",
            num_vertices,
            root.get()
        );
    }

    fn on_enter_phase(&mut self, phase: TraversalPhase, statistics: &TraversalStatistics) {
        let now = Instant::now();
        self.finish_phase(now);
        log::log!(
            self.level,
            "entering {} phase after {:.2?} ({} vertices accumulated so far)",
            phase,
            now.duration_since(self.start_time),
            statistics.vertices_accumulated
        );
        self.phase_start_time = now;
        self.current_phase = Some(phase);
    }

    fn on_vertex_finalized(
        &mut self,
        phase: TraversalPhase,
        vertex: VertexIndex,
        depth: usize,
        _value: &S,
        _statistics: &TraversalStatistics,
    ) {
        if self.log_vertices {
            log::trace!("{} finalized vertex {} at depth {}", phase, vertex.get(), depth);
        }
    }

    fn on_exit_build(&mut self, statistics: &TraversalStatistics) {
        self.finish_phase(Instant::now());
        log::log!(
            self.level,
            "tree DP built in {:.2?}: {} accumulated, {} rerooted, {} merges, max depth {}",
            self.start_time.elapsed(),
            statistics.vertices_accumulated,
            statistics.vertices_rerooted,
            statistics.merges,
            statistics.max_depth
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{LevelFilter, Log, Metadata, Record};
    use std::sync::Mutex;

    struct CaptureLogger {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if record.target().starts_with("arbor_tree::monitor::log") {
                self.lines
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_defaults_and_display() {
        let monitor = LogMonitor::default();
        assert_eq!(monitor.level(), Level::Debug);
        assert!(!monitor.logs_vertices());
        assert_eq!(
            format!("{}", monitor.with_vertex_events(true)),
            "LogMonitor(level: DEBUG, log_vertices: true)"
        );
    }

    #[test]
    fn test_emits_boundaries_and_vertex_events() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Trace);

        let mut monitor = LogMonitor::new(Level::Info).with_vertex_events(true);
        let mut stats = TraversalStatistics::default();
        TraversalMonitor::<u32>::on_enter_build(&mut monitor, VertexIndex::new(2), 5, &stats);
        TraversalMonitor::<u32>::on_enter_phase(&mut monitor, TraversalPhase::Accumulate, &stats);
        stats.on_vertex_accumulated();
        monitor.on_vertex_finalized(
            TraversalPhase::Accumulate,
            VertexIndex::new(4),
            1,
            &7u32,
            &stats,
        );
        TraversalMonitor::<u32>::on_enter_phase(&mut monitor, TraversalPhase::Reroot, &stats);
        TraversalMonitor::<u32>::on_exit_build(&mut monitor, &stats);

        let lines = LOGGER.lines.lock().unwrap();
        assert!(lines.iter().any(|(level, text)| *level == Level::Info
            && text == "building tree DP over 5 vertices from root 2"));
        assert!(lines.iter().any(|(level, text)| *level == Level::Info
            && text.starts_with("entering Accumulate phase")));
        assert!(lines.iter().any(|(level, text)| *level == Level::Trace
            && text == "Accumulate finalized vertex 4 at depth 1"));
        assert!(lines.iter().any(|(level, text)| *level == Level::Info
            && text.contains("1 accumulated, 0 rerooted")));

        let finished: Vec<&str> = lines
            .iter()
            .filter(|(_, text)| text.contains("phase finished in"))
            .map(|(_, text)| text.as_str())
            .collect();
        assert_eq!(finished.len(), 2);
        assert!(finished[0].starts_with("Accumulate phase finished in"));
        assert!(finished[1].starts_with("Reroot phase finished in"));
    }
}
