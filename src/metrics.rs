use crate::summarization::SummaryStrategy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing pipeline activity since startup.
#[derive(Default)]
pub struct PipelineMetrics {
    unsupported_uploads: AtomicU64,
    model_summaries: AtomicU64,
    heuristic_summaries: AtomicU64,
    failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document that was summarized by the given strategy.
    pub fn record_summary(&self, strategy: SummaryStrategy) {
        let counter = match strategy {
            SummaryStrategy::Model => &self.model_summaries,
            SummaryStrategy::Heuristic => &self.heuristic_summaries,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an upload that short-circuited on an unsupported format.
    pub fn record_unsupported(&self) {
        self.unsupported_uploads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a document whose processing failed.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let unsupported_uploads = self.unsupported_uploads.load(Ordering::Relaxed);
        let model_summaries = self.model_summaries.load(Ordering::Relaxed);
        let heuristic_summaries = self.heuristic_summaries.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        MetricsSnapshot {
            documents_processed: unsupported_uploads
                + model_summaries
                + heuristic_summaries
                + failures,
            unsupported_uploads,
            model_summaries,
            heuristic_summaries,
            failures,
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Uploads that entered the pipeline, whatever their outcome.
    pub documents_processed: u64,
    /// Uploads answered with the unsupported-format notice.
    pub unsupported_uploads: u64,
    /// Summaries produced by the language model.
    pub model_summaries: u64,
    /// Summaries produced by the heuristic fallback.
    pub heuristic_summaries: u64,
    /// Uploads that ended in a processing failure.
    pub failures: u64,
}
