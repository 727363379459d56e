//! Network metrics record
//!
//! The four numeric inputs the classifier expects, plus per-field
//! descriptors used by the input layer (labels, hints, bounds).

pub mod input;

pub use input::parse_metric_input;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four metric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    LatencyMs,
    PacketLossPct,
    JitterMs,
    BandwidthUsagePct,
}

impl MetricField {
    /// All fields in form order
    pub const ALL: [MetricField; 4] = [
        MetricField::LatencyMs,
        MetricField::PacketLossPct,
        MetricField::JitterMs,
        MetricField::BandwidthUsagePct,
    ];

    /// Wire name used in JSON bodies
    pub fn key(&self) -> &'static str {
        match self {
            MetricField::LatencyMs => "latency_ms",
            MetricField::PacketLossPct => "packet_loss_pct",
            MetricField::JitterMs => "jitter_ms",
            MetricField::BandwidthUsagePct => "bandwidth_usage_pct",
        }
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::LatencyMs => "Latency (milliseconds)",
            MetricField::PacketLossPct => "Packet Loss (percentage)",
            MetricField::JitterMs => "Jitter (milliseconds)",
            MetricField::BandwidthUsagePct => "Bandwidth Usage (percentage)",
        }
    }

    /// Label used in the format hint panel
    pub fn short_label(&self) -> &'static str {
        match self {
            MetricField::LatencyMs => "Latency",
            MetricField::PacketLossPct => "Packet Loss",
            MetricField::JitterMs => "Jitter",
            MetricField::BandwidthUsagePct => "Bandwidth Usage",
        }
    }

    /// Help text shown under the input
    pub fn description(&self) -> &'static str {
        match self {
            MetricField::LatencyMs => "Network response time in milliseconds",
            MetricField::PacketLossPct => "Percentage of packets lost during transmission",
            MetricField::JitterMs => "Variation in packet arrival times",
            MetricField::BandwidthUsagePct => "Current bandwidth utilization percentage",
        }
    }

    /// Example value
    pub fn placeholder(&self) -> &'static str {
        match self {
            MetricField::LatencyMs => "45.2",
            MetricField::PacketLossPct => "0.3",
            MetricField::JitterMs => "4.5",
            MetricField::BandwidthUsagePct => "68.0",
        }
    }

    /// Lower bound (inclusive)
    pub fn min(&self) -> f64 {
        0.0
    }

    /// Upper bound (inclusive); latency and jitter are unbounded
    pub fn max(&self) -> Option<f64> {
        match self {
            MetricField::LatencyMs | MetricField::JitterMs => None,
            MetricField::PacketLossPct | MetricField::BandwidthUsagePct => Some(100.0),
        }
    }

    /// Check a value against the input-layer bounds
    pub fn check_bounds(&self, value: f64) -> std::result::Result<(), String> {
        if value < self.min() {
            return Err(format!(
                "{} must be at least {}",
                self.short_label(),
                self.min()
            ));
        }
        if let Some(max) = self.max() {
            if value > max {
                return Err(format!("{} must be at most {}", self.short_label(), max));
            }
        }
        Ok(())
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MetricField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "latency_ms" | "latency" => Ok(MetricField::LatencyMs),
            "packet_loss_pct" | "packet_loss" | "loss" => Ok(MetricField::PacketLossPct),
            "jitter_ms" | "jitter" => Ok(MetricField::JitterMs),
            "bandwidth_usage_pct" | "bandwidth_usage" | "bandwidth" => {
                Ok(MetricField::BandwidthUsagePct)
            }
            other => Err(format!("Unknown metric field: {}", other)),
        }
    }
}

/// Metrics record submitted for classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub latency_ms: f64,
    pub packet_loss_pct: f64,
    pub jitter_ms: f64,
    pub bandwidth_usage_pct: f64,
}

impl NetworkMetrics {
    /// Build a record from explicit values
    pub fn new(latency_ms: f64, packet_loss_pct: f64, jitter_ms: f64, bandwidth_usage_pct: f64) -> Self {
        Self {
            latency_ms,
            packet_loss_pct,
            jitter_ms,
            bandwidth_usage_pct,
        }
    }

    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::LatencyMs => self.latency_ms,
            MetricField::PacketLossPct => self.packet_loss_pct,
            MetricField::JitterMs => self.jitter_ms,
            MetricField::BandwidthUsagePct => self.bandwidth_usage_pct,
        }
    }

    pub fn set(&mut self, field: MetricField, value: f64) {
        let slot = match field {
            MetricField::LatencyMs => &mut self.latency_ms,
            MetricField::PacketLossPct => &mut self.packet_loss_pct,
            MetricField::JitterMs => &mut self.jitter_ms,
            MetricField::BandwidthUsagePct => &mut self.bandwidth_usage_pct,
        };
        *slot = value;
    }

    /// Set a field from raw text; unparseable input becomes 0.
    /// Returns the stored value.
    pub fn set_from_input(&mut self, field: MetricField, raw: &str) -> f64 {
        let value = parse_metric_input(raw);
        self.set(field, value);
        value
    }

    /// Restore all fields to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
