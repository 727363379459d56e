//! In-memory record of this session's submissions

use crate::metrics::NetworkMetrics;
use crate::predictor::{Classification, Verdict};
use chrono::{DateTime, Local};

/// Maximum records kept before the oldest are dropped
pub const MAX_HISTORY: usize = 100;

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Classified(Classification),
    Error(String),
}

/// One submission with the metrics it sent
#[derive(Debug, Clone)]
pub struct PredictionRecord {
    pub metrics: NetworkMetrics,
    pub outcome: RecordOutcome,
    pub at: DateTime<Local>,
}

impl PredictionRecord {
    pub fn new(metrics: NetworkMetrics, outcome: RecordOutcome) -> Self {
        Self {
            metrics,
            outcome,
            at: Local::now(),
        }
    }

    /// One-line summary for `/history`
    pub fn summary(&self) -> String {
        let m = &self.metrics;
        let outcome = match &self.outcome {
            RecordOutcome::Classified(c) => match c.verdict() {
                Verdict::Healthy => "healthy".to_string(),
                Verdict::IssueDetected => "issue detected".to_string(),
            },
            RecordOutcome::Error(message) => format!("error: {}", message),
        };
        format!(
            "{} latency={} loss={} jitter={} bandwidth={} -> {}",
            self.at.format("%H:%M:%S"),
            m.latency_ms,
            m.packet_loss_pct,
            m.jitter_ms,
            m.bandwidth_usage_pct,
            outcome
        )
    }
}

/// Bounded submission history
#[derive(Debug, Default)]
pub struct PredictionHistory {
    records: Vec<PredictionRecord>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PredictionRecord) {
        if self.records.len() >= MAX_HISTORY {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    /// Last `n` records, oldest first
    pub fn recent(&self, n: usize) -> &[PredictionRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
