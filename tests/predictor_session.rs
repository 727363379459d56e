//! Integration tests for the predictor session
//!
//! Drives `PredictorSession` against a scripted in-memory service, so no
//! network is needed.

use async_trait::async_trait;
use netpredict::{
    client::{FormatHints, PredictionService},
    errors::{PredictorError, Result, SERVER_OFFLINE_MESSAGE},
    predictor::{
        view::{HEALTHY_TITLE, ISSUE_TITLE},
        PredictorSession, PredictorState, ResultPanel, ServerStatus, Verdict,
    },
    MetricField, NetworkMetrics,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Script {
    /// Probe outcomes in order; an empty queue answers `true`
    probes: VecDeque<bool>,
    format: Option<FormatHints>,
    /// Predict outcomes in order; an empty queue answers `[0]`
    predictions: VecDeque<std::result::Result<Vec<f64>, String>>,
    hang_probe: bool,
    probe_calls: usize,
    format_calls: usize,
    posted: Vec<NetworkMetrics>,
}

#[derive(Clone, Default)]
struct ScriptedService {
    script: Arc<Mutex<Script>>,
}

impl ScriptedService {
    fn new() -> Self {
        Self::default()
    }

    fn probes(self, outcomes: &[bool]) -> Self {
        self.script.lock().unwrap().probes = outcomes.iter().copied().collect();
        self
    }

    fn format(self, hints: FormatHints) -> Self {
        self.script.lock().unwrap().format = Some(hints);
        self
    }

    fn predictions(self, outcomes: Vec<std::result::Result<Vec<f64>, String>>) -> Self {
        self.script.lock().unwrap().predictions = outcomes.into_iter().collect();
        self
    }

    fn hanging_probe(self) -> Self {
        self.script.lock().unwrap().hang_probe = true;
        self
    }

    fn probe_calls(&self) -> usize {
        self.script.lock().unwrap().probe_calls
    }

    fn format_calls(&self) -> usize {
        self.script.lock().unwrap().format_calls
    }

    fn posted(&self) -> Vec<NetworkMetrics> {
        self.script.lock().unwrap().posted.clone()
    }
}

#[async_trait]
impl PredictionService for ScriptedService {
    async fn probe(&self) -> Result<()> {
        let (hang, ok) = {
            let mut script = self.script.lock().unwrap();
            script.probe_calls += 1;
            (script.hang_probe, script.probes.pop_front().unwrap_or(true))
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if ok {
            Ok(())
        } else {
            Err(PredictorError::ProbeFailed("connection refused".to_string()))
        }
    }

    async fn fetch_format(&self) -> Result<FormatHints> {
        let mut script = self.script.lock().unwrap();
        script.format_calls += 1;
        script
            .format
            .clone()
            .ok_or_else(|| PredictorError::FormatUnavailable("HTTP error! status: 404".to_string()))
    }

    async fn predict(&self, metrics: &NetworkMetrics) -> Result<Vec<f64>> {
        let mut script = self.script.lock().unwrap();
        script.posted.push(*metrics);
        match script.predictions.pop_front() {
            Some(Ok(values)) => Ok(values),
            Some(Err(message)) => Err(PredictorError::PredictionFailed(message)),
            None => Ok(vec![0.0]),
        }
    }
}

fn hints() -> FormatHints {
    FormatHints {
        latency_ms: "float, milliseconds".to_string(),
        packet_loss_pct: "float, 0-100".to_string(),
        jitter_ms: "float, milliseconds".to_string(),
        bandwidth_usage_pct: "float, 0-100".to_string(),
    }
}

#[tokio::test]
async fn test_wake_online_fetches_format() {
    let service = ScriptedService::new().format(hints());
    let mut session = PredictorSession::new(service.clone());

    assert_eq!(session.server_status(), ServerStatus::Checking);
    let status = session.wake().await.unwrap();

    assert_eq!(status, ServerStatus::Online);
    assert_eq!(session.state(), &PredictorState::Online);
    assert_eq!(session.format_hints(), Some(&hints()));
    assert_eq!(service.probe_calls(), 1);
    assert!(session.submit_control().enabled);
}

#[tokio::test]
async fn test_submit_control_disabled_until_probed() {
    let service = ScriptedService::new().probes(&[true]).format(hints());
    let mut session = PredictorSession::new(service.clone());

    assert!(!session.submit_control().enabled);
    assert_eq!(session.submit_control().label, "Connecting to Server...");
    assert!(matches!(
        session.submit().await,
        Err(PredictorError::InvalidTransition { .. })
    ));
    assert!(service.posted().is_empty());

    session.wake().await.unwrap();
    assert!(session.submit_control().enabled);
}

#[tokio::test]
async fn test_wake_offline_disables_submit() {
    let service = ScriptedService::new().probes(&[false]).format(hints());
    let mut session = PredictorSession::new(service.clone());

    let status = session.wake().await.unwrap();

    assert_eq!(status, ServerStatus::Offline);
    assert!(!session.submit_control().enabled);
    assert!(session.format_hints().is_none());
    assert_eq!(service.format_calls(), 0);
    assert!(session.result_panel().is_empty());
}

#[tokio::test]
async fn test_format_failure_keeps_server_online() {
    let service = ScriptedService::new();
    let mut session = PredictorSession::new(service.clone());

    let status = session.wake().await.unwrap();

    assert_eq!(status, ServerStatus::Online);
    assert_eq!(service.format_calls(), 1);
    assert!(session.format_hints().is_none());
}

#[tokio::test]
async fn test_submit_online_posts_form_once() {
    let service = ScriptedService::new();
    let mut session = PredictorSession::new(service.clone());
    session.wake().await.unwrap();

    session.set_field(MetricField::LatencyMs, "45.2");
    session.set_field(MetricField::PacketLossPct, "0.3");
    session.set_field(MetricField::JitterMs, "4.5");
    session.set_field(MetricField::BandwidthUsagePct, "68");

    session.submit().await.unwrap();

    assert_eq!(service.posted(), vec![NetworkMetrics::new(45.2, 0.3, 4.5, 68.0)]);
    assert_eq!(service.probe_calls(), 1);
}

#[tokio::test]
async fn test_healthy_and_issue_panels() {
    let service = ScriptedService::new().predictions(vec![Ok(vec![0.0]), Ok(vec![1.0])]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();

    let first = session.submit().await.unwrap();
    assert_eq!(first.verdict(), Verdict::Healthy);
    assert_eq!(session.result_panel().title(), Some(HEALTHY_TITLE));

    let second = session.submit().await.unwrap();
    assert_eq!(second.verdict(), Verdict::IssueDetected);
    assert_eq!(session.result_panel().title(), Some(ISSUE_TITLE));
}

#[tokio::test]
async fn test_only_first_prediction_element_counts() {
    let service = ScriptedService::new().predictions(vec![Ok(vec![0.0, 1.0, 1.0])]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();

    assert_eq!(session.submit().await.unwrap().verdict(), Verdict::Healthy);
}

#[tokio::test]
async fn test_offline_submit_retries_once_then_posts() {
    let service = ScriptedService::new().probes(&[false, true]);
    let mut session = PredictorSession::new(service.clone());
    session.wake().await.unwrap();
    assert_eq!(session.server_status(), ServerStatus::Offline);

    let classification = session.submit().await.unwrap();

    assert_eq!(classification.verdict(), Verdict::Healthy);
    assert_eq!(service.probe_calls(), 2);
    assert_eq!(service.posted().len(), 1);
    assert_eq!(session.server_status(), ServerStatus::Online);
}

#[tokio::test]
async fn test_offline_submit_retry_failure_skips_post() {
    let service = ScriptedService::new().probes(&[false, false]);
    let mut session = PredictorSession::new(service.clone());
    session.wake().await.unwrap();

    let err = session.submit().await.unwrap_err();

    assert!(matches!(err, PredictorError::ServerOffline));
    assert_eq!(service.probe_calls(), 2);
    assert!(service.posted().is_empty());
    assert_eq!(session.server_status(), ServerStatus::Offline);
    assert!(!session.state().is_loading());
    assert_eq!(
        session.result_panel(),
        ResultPanel::Error {
            message: SERVER_OFFLINE_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn test_http_error_surfaces_status() {
    let service = ScriptedService::new()
        .predictions(vec![Err("HTTP error! status: 500".to_string())]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();

    let err = session.submit().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(session.server_status(), ServerStatus::Online);
    assert!(session.submit_control().enabled);
    assert_eq!(
        session.result_panel().body(),
        Some("HTTP error! status: 500")
    );
}

#[tokio::test]
async fn test_empty_prediction_is_a_failure() {
    let service = ScriptedService::new().predictions(vec![Ok(vec![])]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();

    assert!(matches!(
        session.submit().await,
        Err(PredictorError::PredictionFailed(_))
    ));
    assert!(session.state().failure().is_some());
}

#[tokio::test]
async fn test_new_submission_clears_previous_error() {
    let service = ScriptedService::new()
        .predictions(vec![Err("boom".to_string()), Ok(vec![1.0])]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();

    assert!(session.submit().await.is_err());
    session.submit().await.unwrap();

    assert!(session.state().failure().is_none());
    assert_eq!(session.result_panel().title(), Some(ISSUE_TITLE));
}

#[tokio::test]
async fn test_reset_restores_defaults_and_clears_outcome() {
    let service = ScriptedService::new().predictions(vec![Ok(vec![1.0])]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();
    session.set_metrics(NetworkMetrics::new(300.0, 12.0, 40.0, 99.0));
    session.submit().await.unwrap();

    session.reset().unwrap();

    assert_eq!(session.metrics(), &NetworkMetrics::default());
    assert!(session.result_panel().is_empty());
    assert_eq!(session.state(), &PredictorState::Online);
}

#[tokio::test]
async fn test_reset_keeps_offline_status() {
    let service = ScriptedService::new().probes(&[false, false]);
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();
    session.set_value(MetricField::JitterMs, 9.0);
    let _ = session.submit().await;

    session.reset().unwrap();

    assert_eq!(session.metrics(), &NetworkMetrics::default());
    assert!(session.result_panel().is_empty());
    assert_eq!(session.server_status(), ServerStatus::Offline);
}

#[tokio::test]
async fn test_unparseable_input_coerces_to_zero() {
    let mut session = PredictorSession::new(ScriptedService::new());
    session.set_field(MetricField::LatencyMs, "80");

    assert_eq!(session.set_field(MetricField::LatencyMs, ""), 0.0);
    assert_eq!(session.set_field(MetricField::JitterMs, "n/a"), 0.0);
    assert_eq!(session.metrics().latency_ms, 0.0);
}

#[tokio::test]
async fn test_out_of_range_values_are_sent_unchanged() {
    let service = ScriptedService::new();
    let mut session = PredictorSession::new(service.clone());
    session.wake().await.unwrap();
    session.set_value(MetricField::PacketLossPct, 250.0);

    session.submit().await.unwrap();

    assert_eq!(service.posted()[0].packet_loss_pct, 250.0);
}

#[tokio::test]
async fn test_submit_before_wake_is_rejected() {
    let service = ScriptedService::new();
    let mut session = PredictorSession::new(service.clone());

    let err = session.submit().await.unwrap_err();

    assert!(matches!(err, PredictorError::InvalidTransition { .. }));
    assert!(service.posted().is_empty());
}

#[tokio::test]
async fn test_dispose_mid_probe_leaves_state_untouched() {
    let service = ScriptedService::new().hanging_probe();
    let mut session = PredictorSession::new(service);
    let token = session.cancellation_token();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    });

    let err = session.wake().await.unwrap_err();

    assert!(matches!(err, PredictorError::Cancelled));
    assert_eq!(session.state(), &PredictorState::Checking { retry: false });
    assert!(session.is_disposed());
    assert!(matches!(session.submit().await, Err(PredictorError::Cancelled)));
    assert!(matches!(session.reset(), Err(PredictorError::Cancelled)));
}

#[tokio::test]
async fn test_telemetry_records_protocol() {
    let service = ScriptedService::new().probes(&[false, true]).format(hints());
    let mut session = PredictorSession::new(service);
    session.wake().await.unwrap();
    session.submit().await.unwrap();
    session.reset().unwrap();

    let stats = session.telemetry().get_stats();
    assert_eq!(stats.probes, 2);
    assert_eq!(stats.retry_probes, 1);
    assert_eq!(stats.probes_failed, 1);
    assert_eq!(stats.predictions_succeeded, 1);
    assert_eq!(stats.resets, 1);
    assert!(stats.state_transitions >= 5);
}
