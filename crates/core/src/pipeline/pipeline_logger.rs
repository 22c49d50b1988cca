use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples the use cases from specific output mechanisms so each caller
/// can observe stage timings and batch progress without changing the
/// orchestration code.
pub trait PipelineLogger: Send {
    /// Report file-level progress through a batch.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one file.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger that tracks per-stage timing and prints a summary
/// report when processing completes.
pub struct StdoutPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    total_files: usize,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            start_time: Instant::now(),
            total_files: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no stage ran.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let files = self.total_files.max(1);
        let mut lines = Vec::new();

        lines.push(format!(
            "Pipeline summary ({files} file(s), {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:8.1}ms  total {total_ms:9.0}ms  ({pct:4.1}%)"
            ));
        }

        Some(lines.join("\n"))
    }

    /// Returns the timing data for a given stage.
    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_files = total;
        if total > 0 {
            log::info!("File {current}/{total}");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("tempo", 5.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutPipelineLogger::new();
        logger.timing("tempo", 20.0);
        logger.timing("tempo", 30.0);
        logger.timing("noise", 5.0);

        let tempo = logger.timings_for("tempo").unwrap();
        assert_eq!(tempo.len(), 2);
        assert!((tempo[0] - 20.0).abs() < f64::EPSILON);
        assert!((tempo[1] - 30.0).abs() < f64::EPSILON);

        let noise = logger.timings_for("noise").unwrap();
        assert_eq!(noise.len(), 1);
    }

    #[test]
    fn test_summary_includes_each_stage() {
        let mut logger = StdoutPipelineLogger::new();
        logger.progress(1, 3);
        logger.timing("tempo", 20.0);
        logger.timing("equalize", 5.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("tempo"));
        assert!(summary.contains("equalize"));
        assert!(summary.contains("Pipeline summary (3 file(s)"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = StdoutPipelineLogger::new();
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_total() {
        let mut logger = StdoutPipelineLogger::new();
        for i in 1..=4 {
            logger.progress(i, 4);
        }
        assert_eq!(logger.total_files, 4);
    }

    #[test]
    fn test_unknown_stage_has_no_timings() {
        let logger = StdoutPipelineLogger::default();
        assert!(logger.timings_for("loop").is_none());
    }
}
