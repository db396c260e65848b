//! Reporting sinks
//!
//! Executors hand human-readable lines to a [`Reporter`]. Sinks are
//! write-only; a sink that cannot record a line drops it.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{error, info};

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Success,
    Failure,
}

/// One reported line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub level: ReportLevel,
    pub message: String,
}

/// Fire-and-forget sink for per-invocation log lines
pub trait Reporter: Send + Sync {
    fn success(&self, line: &str);
    fn failure(&self, line: &str);
}

/// Emits lines as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn success(&self, line: &str) {
        info!(target: "bookcheck::report", "{line}");
    }

    fn failure(&self, line: &str) {
        error!(target: "bookcheck::report", "{line}");
    }
}

/// Keeps every line in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<ReportLine>>,
}

impl MemoryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded lines
    #[must_use]
    pub fn lines(&self) -> Vec<ReportLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at `level`
    #[must_use]
    pub fn messages(&self, level: ReportLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.level == level)
            .map(|l| l.message)
            .collect()
    }

    fn push(&self, level: ReportLevel, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ReportLine {
                level,
                message: line.to_string(),
            });
    }
}

impl Reporter for MemoryReporter {
    fn success(&self, line: &str) {
        self.push(ReportLevel::Success, line);
    }

    fn failure(&self, line: &str) {
        self.push(ReportLevel::Failure, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_keeps_order_and_level() {
        let reporter = MemoryReporter::new();
        reporter.success("one");
        reporter.failure("two");
        reporter.success("three");

        assert_eq!(reporter.lines().len(), 3);
        assert_eq!(reporter.messages(ReportLevel::Success), vec!["one", "three"]);
        assert_eq!(reporter.messages(ReportLevel::Failure), vec!["two"]);
    }
}
