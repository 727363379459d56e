//! netpredict - NetworkAI network health predictor
//!
//! Collects four network metrics (latency, packet loss, jitter, bandwidth
//! usage), checks that the remote classification service is awake, submits
//! the metrics and reports whether the network looks healthy.
//!
//! # Architecture
//!
//! - `metrics`: the metrics record and lenient input parsing
//! - `client`: the service boundary and its reqwest implementation
//! - `predictor`: state machine, session driver, rendering contract
//! - `repl` / `cli`: terminal front end and configuration
//! - `site`: static landing page copy

pub mod errors;
pub mod metrics;
pub mod client;
pub mod predictor;

// Re-export commonly used types
pub use errors::{PredictorError, Result};
pub use metrics::{MetricField, NetworkMetrics};
pub use client::{HttpPredictionClient, PredictionService};
pub use predictor::{PredictorSession, PredictorState, ServerStatus};

// Interface layer
pub mod cli;
pub mod repl;
pub mod site;
pub mod telemetry;
