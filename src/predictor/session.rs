//! Predictor session
//!
//! Owns the form state and drives the wake / submit / reset protocol
//! against a `PredictionService`. Operations take `&mut self`, so a session
//! never has two requests in flight. Every network await is raced against
//! the session's cancellation token; once it fires, pending calls are
//! abandoned and the state is left untouched.

use super::state::{Classification, PredictorEvent, PredictorState, ServerStatus};
use super::view::{ResultPanel, SubmitControl};
use crate::client::{FormatHints, PredictionService};
use crate::errors::{PredictorError, Result};
use crate::metrics::{MetricField, NetworkMetrics};
use crate::telemetry::{TelemetryCollector, TelemetryEvent};
use std::future::Future;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Interactive predictor bound to one classification service
pub struct PredictorSession<S: PredictionService> {
    service: S,
    state: PredictorState,
    metrics: NetworkMetrics,
    format: Option<FormatHints>,
    cancel: CancellationToken,
    telemetry: TelemetryCollector,
}

async fn cancellable<T, F>(token: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(PredictorError::Cancelled),
        result = fut => result,
    }
}

impl<S: PredictionService> PredictorSession<S> {
    pub fn new(service: S) -> Self {
        Self::with_telemetry(service, TelemetryCollector::new())
    }

    pub fn with_telemetry(service: S, telemetry: TelemetryCollector) -> Self {
        Self {
            service,
            state: PredictorState::Idle,
            metrics: NetworkMetrics::default(),
            format: None,
            cancel: CancellationToken::new(),
            telemetry,
        }
    }

    /// Use an externally owned token, e.g. one tied to Ctrl-C
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Probe the server, then fetch format hints if it is online.
    ///
    /// Probe failures are not errors: they leave the session `Offline`.
    pub async fn wake(&mut self) -> Result<ServerStatus> {
        self.ensure_live()?;
        self.apply(PredictorEvent::Wake)?;

        let started = Instant::now();
        match cancellable(&self.cancel, self.service.probe()).await {
            Err(PredictorError::Cancelled) => return Err(PredictorError::Cancelled),
            Ok(()) => {
                self.record_probe(false, true, started);
                self.apply(PredictorEvent::ProbeSucceeded)?;
                self.refresh_format().await?;
            }
            Err(e) => {
                self.record_probe(false, false, started);
                tracing::warn!(error = %e, "server wake-up failed");
                self.apply(PredictorEvent::ProbeFailed)?;
            }
        }

        Ok(self.state.server_status())
    }

    async fn refresh_format(&mut self) -> Result<()> {
        match cancellable(&self.cancel, self.service.fetch_format()).await {
            Ok(hints) => {
                self.format = Some(hints);
                self.telemetry.record(TelemetryEvent::FormatFetched {
                    success: true,
                    timestamp: Instant::now(),
                });
            }
            Err(PredictorError::Cancelled) => return Err(PredictorError::Cancelled),
            Err(e) => {
                tracing::debug!(error = %e, "format hints unavailable");
                self.telemetry.record(TelemetryEvent::FormatFetched {
                    success: false,
                    timestamp: Instant::now(),
                });
            }
        }
        Ok(())
    }

    /// Submit the current metrics for classification.
    ///
    /// While offline, the liveness probe is retried exactly once first. On
    /// failure the error is also kept in the session state for rendering.
    pub async fn submit(&mut self) -> Result<Classification> {
        self.ensure_live()?;
        self.apply(PredictorEvent::Submit)?;

        if let PredictorState::Checking { retry: true } = self.state {
            let started = Instant::now();
            match cancellable(&self.cancel, self.service.probe()).await {
                Err(PredictorError::Cancelled) => return Err(PredictorError::Cancelled),
                Ok(()) => {
                    self.record_probe(true, true, started);
                    self.apply(PredictorEvent::ProbeSucceeded)?;
                }
                Err(e) => {
                    self.record_probe(true, false, started);
                    tracing::info!(error = %e, "retry probe failed");
                    self.apply(PredictorEvent::ProbeFailed)?;
                    return Err(PredictorError::ServerOffline);
                }
            }
        }

        let metrics = self.metrics;
        let started = Instant::now();
        let outcome = match cancellable(&self.cancel, self.service.predict(&metrics)).await {
            Err(PredictorError::Cancelled) => return Err(PredictorError::Cancelled),
            Ok(values) => match values.first() {
                Some(&value) => Ok(Classification::new(value)),
                None => Err("Prediction response contained no values".to_string()),
            },
            Err(PredictorError::PredictionFailed(message)) => Err(message),
            Err(e) => Err(e.to_string()),
        };

        self.telemetry.record(TelemetryEvent::PredictionCompleted {
            success: outcome.is_ok(),
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });

        match outcome {
            Ok(classification) => {
                tracing::info!(value = classification.value, "prediction received");
                self.apply(PredictorEvent::PredictionReceived(classification))?;
                Ok(classification)
            }
            Err(message) => {
                tracing::info!(error = %message, "prediction failed");
                self.apply(PredictorEvent::PredictionFailed(message.clone()))?;
                Err(PredictorError::PredictionFailed(message))
            }
        }
    }

    /// Zero all metrics and clear any outcome. Server status is kept.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.metrics.reset();
        self.apply(PredictorEvent::Reset)?;
        self.telemetry.record(TelemetryEvent::FormReset {
            timestamp: Instant::now(),
        });
        Ok(())
    }

    /// Set a field from raw text; unparseable input stores 0
    pub fn set_field(&mut self, field: MetricField, raw: &str) -> f64 {
        self.metrics.set_from_input(field, raw)
    }

    pub fn set_value(&mut self, field: MetricField, value: f64) {
        self.metrics.set(field, value);
    }

    pub fn set_metrics(&mut self, metrics: NetworkMetrics) {
        self.metrics = metrics;
    }

    pub fn metrics(&self) -> &NetworkMetrics {
        &self.metrics
    }

    pub fn state(&self) -> &PredictorState {
        &self.state
    }

    pub fn server_status(&self) -> ServerStatus {
        self.state.server_status()
    }

    /// Format hints, if the server provided them
    pub fn format_hints(&self) -> Option<&FormatHints> {
        self.format.as_ref()
    }

    pub fn result_panel(&self) -> ResultPanel {
        ResultPanel::for_state(&self.state)
    }

    pub fn submit_control(&self) -> SubmitControl {
        SubmitControl::for_state(&self.state)
    }

    pub fn telemetry(&self) -> &TelemetryCollector {
        &self.telemetry
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tear the session down; in-flight and later operations return `Cancelled`
    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(PredictorError::Cancelled);
        }
        Ok(())
    }

    fn apply(&mut self, event: PredictorEvent) -> Result<()> {
        let next = self.state.transition(event)?;
        if next != self.state {
            tracing::debug!(from = %self.state, to = %next, "predictor transition");
            self.telemetry.record(TelemetryEvent::StateTransition {
                from: self.state.to_string(),
                to: next.to_string(),
                timestamp: Instant::now(),
            });
        }
        self.state = next;
        Ok(())
    }

    fn record_probe(&self, retry: bool, success: bool, started: Instant) {
        self.telemetry.record(TelemetryEvent::ProbeCompleted {
            retry,
            success,
            duration_ms: started.elapsed().as_millis() as u64,
            timestamp: Instant::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::view::Tone;
    use async_trait::async_trait;
    use tokio_test::{assert_err, assert_ok, block_on};

    struct AlwaysUp;

    #[async_trait]
    impl PredictionService for AlwaysUp {
        async fn probe(&self) -> Result<()> {
            Ok(())
        }

        async fn fetch_format(&self) -> Result<FormatHints> {
            Err(PredictorError::FormatUnavailable("no format".to_string()))
        }

        async fn predict(&self, metrics: &NetworkMetrics) -> Result<Vec<f64>> {
            Ok(vec![if metrics.latency_ms > 100.0 { 1.0 } else { 0.0 }])
        }
    }

    #[test]
    fn test_cancellable_prefers_cancellation() {
        let token = CancellationToken::new();
        assert_eq!(assert_ok!(block_on(cancellable(&token, async { Ok(7) }))), 7);

        token.cancel();
        let result = block_on(cancellable(&token, async { Ok(7) }));
        assert!(matches!(result, Err(PredictorError::Cancelled)));
    }

    #[test]
    fn test_disposed_session_rejects_operations() {
        let mut session = PredictorSession::new(AlwaysUp);
        session.dispose();

        assert!(session.is_disposed());
        assert_err!(block_on(session.wake()));
        assert_err!(session.reset());
        assert_eq!(session.state(), &PredictorState::Idle);
    }

    #[test]
    fn test_wake_then_submit() {
        let mut session = PredictorSession::new(AlwaysUp);
        assert_eq!(assert_ok!(block_on(session.wake())), ServerStatus::Online);
        assert!(session.format_hints().is_none());

        session.set_field(MetricField::LatencyMs, "250");
        let classification = assert_ok!(block_on(session.submit()));
        assert_eq!(classification.value, 1.0);
        assert_eq!(session.result_panel().tone(), Tone::Danger);
    }
}
