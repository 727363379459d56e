//! Classification service boundary
//!
//! `PredictionService` is the seam between the predictor session and the
//! network; `HttpPredictionClient` is the production implementation.

pub mod http;
pub mod types;

pub use http::{HttpPredictionClient, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS};
pub use types::FormatHints;

use crate::errors::Result;
use crate::metrics::NetworkMetrics;
use async_trait::async_trait;

/// Remote classification service
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Liveness probe. `Ok` means the service answered with success.
    async fn probe(&self) -> Result<()>;

    /// Field descriptions, best effort
    async fn fetch_format(&self) -> Result<FormatHints>;

    /// Classify one metrics record, returning the raw prediction sequence
    async fn predict(&self, metrics: &NetworkMetrics) -> Result<Vec<f64>>;
}
