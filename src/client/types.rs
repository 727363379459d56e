//! Wire types for the classification service

use crate::metrics::MetricField;
use serde::{Deserialize, Serialize};

/// Human-readable description of each expected input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatHints {
    pub latency_ms: String,
    pub packet_loss_pct: String,
    pub jitter_ms: String,
    pub bandwidth_usage_pct: String,
}

impl FormatHints {
    pub fn get(&self, field: MetricField) -> &str {
        match field {
            MetricField::LatencyMs => &self.latency_ms,
            MetricField::PacketLossPct => &self.packet_loss_pct,
            MetricField::JitterMs => &self.jitter_ms,
            MetricField::BandwidthUsagePct => &self.bandwidth_usage_pct,
        }
    }
}

/// `GET /format` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FormatResponse {
    pub expected_format: FormatHints,
}

/// `POST /predict` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PredictResponse {
    pub prediction: Vec<f64>,
}
