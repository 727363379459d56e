//! Predictor state machine
//!
//! One closed set of states covers server availability, the loading phase
//! and the last outcome, so combinations such as "loading while offline"
//! cannot be represented.
//!
//! Valid transitions:
//! 1.  Idle | Online | Offline | Succeeded | Failed  → Checking   (on: Wake)
//! 2.  Checking(wake)   → Online       (on: ProbeSucceeded)
//! 3.  Checking(wake)   → Offline      (on: ProbeFailed)
//! 4.  Checking(retry)  → Submitting   (on: ProbeSucceeded)
//! 5.  Checking(retry)  → Failed       (on: ProbeFailed)
//! 6.  Online | Succeeded | Failed(prediction) → Submitting (on: Submit)
//! 7.  Offline | Failed(unreachable)           → Checking(retry) (on: Submit)
//! 8.  Submitting       → Succeeded    (on: PredictionReceived)
//! 9.  Submitting       → Failed       (on: PredictionFailed)
//! 10. Succeeded | Failed → Online or Offline (on: Reset, by server status)
//! 11. every other state → itself       (on: Reset)

use crate::errors::{PredictorError, Result, SERVER_OFFLINE_MESSAGE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary verdict derived from the first element of the prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Healthy,
    IssueDetected,
}

/// Classification returned by the service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub value: f64,
}

impl Classification {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// 0 is healthy, anything else is an issue
    pub fn verdict(&self) -> Verdict {
        if self.value == 0.0 {
            Verdict::Healthy
        } else {
            Verdict::IssueDetected
        }
    }
}

/// Which of the two user-facing error categories a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Retry probe failed; the server is offline
    ServerUnreachable,
    /// The classification request itself failed
    PredictionFailed,
}

/// Failed submission, as rendered in the error panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn server_unreachable() -> Self {
        Self {
            kind: FailureKind::ServerUnreachable,
            message: SERVER_OFFLINE_MESSAGE.to_string(),
        }
    }

    pub fn prediction_failed(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::PredictionFailed,
            message: message.into(),
        }
    }
}

/// Server availability as shown in the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerStatus {
    Checking,
    Online,
    Offline,
}

/// Predictor states
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredictorState {
    /// Created, server not probed yet
    Idle,

    /// Liveness probe in flight; `retry` is set when a submission is waiting on it
    Checking { retry: bool },

    /// Server reachable, nothing submitted (or outcome cleared)
    Online,

    /// Server unreachable
    Offline,

    /// Classification request in flight
    Submitting,

    /// Last submission produced a classification
    Succeeded(Classification),

    /// Last submission failed
    Failed(Failure),
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorEvent {
    /// Initial (or repeated) liveness probe started
    Wake,

    /// Liveness probe answered with success
    ProbeSucceeded,

    /// Liveness probe failed
    ProbeFailed,

    /// User submitted the form
    Submit,

    /// Service returned a classification
    PredictionReceived(Classification),

    /// Classification request failed
    PredictionFailed(String),

    /// User reset the form
    Reset,
}

impl PredictorEvent {
    fn name(&self) -> &'static str {
        match self {
            PredictorEvent::Wake => "Wake",
            PredictorEvent::ProbeSucceeded => "ProbeSucceeded",
            PredictorEvent::ProbeFailed => "ProbeFailed",
            PredictorEvent::Submit => "Submit",
            PredictorEvent::PredictionReceived(_) => "PredictionReceived",
            PredictorEvent::PredictionFailed(_) => "PredictionFailed",
            PredictorEvent::Reset => "Reset",
        }
    }
}

impl PredictorState {
    /// Attempt state transition with validation
    pub fn transition(&self, event: PredictorEvent) -> Result<PredictorState> {
        use PredictorEvent as E;
        use PredictorState as S;

        let next = match (self, event) {
            (S::Idle | S::Online | S::Offline | S::Succeeded(_) | S::Failed(_), E::Wake) => {
                S::Checking { retry: false }
            }

            (S::Checking { retry: false }, E::ProbeSucceeded) => S::Online,
            (S::Checking { retry: false }, E::ProbeFailed) => S::Offline,
            (S::Checking { retry: true }, E::ProbeSucceeded) => S::Submitting,
            (S::Checking { retry: true }, E::ProbeFailed) => {
                S::Failed(Failure::server_unreachable())
            }

            (S::Online | S::Succeeded(_), E::Submit) => S::Submitting,
            (S::Failed(f), E::Submit) => match f.kind {
                FailureKind::PredictionFailed => S::Submitting,
                FailureKind::ServerUnreachable => S::Checking { retry: true },
            },
            (S::Offline, E::Submit) => S::Checking { retry: true },

            (S::Submitting, E::PredictionReceived(c)) => S::Succeeded(c),
            (S::Submitting, E::PredictionFailed(msg)) => S::Failed(Failure::prediction_failed(msg)),

            (state, E::Reset) => match state.server_status() {
                _ if !state.has_outcome() => state.clone(),
                ServerStatus::Offline => S::Offline,
                _ => S::Online,
            },

            (from, event) => {
                return Err(PredictorError::InvalidTransition {
                    from: from.to_string(),
                    event: event.name().to_string(),
                    reason: format!("{} is not accepted while {}", event.name(), from),
                });
            }
        };

        Ok(next)
    }

    /// Server availability derived from the state
    pub fn server_status(&self) -> ServerStatus {
        match self {
            PredictorState::Idle | PredictorState::Checking { .. } => ServerStatus::Checking,
            PredictorState::Online | PredictorState::Submitting | PredictorState::Succeeded(_) => {
                ServerStatus::Online
            }
            PredictorState::Offline => ServerStatus::Offline,
            PredictorState::Failed(f) => match f.kind {
                FailureKind::ServerUnreachable => ServerStatus::Offline,
                FailureKind::PredictionFailed => ServerStatus::Online,
            },
        }
    }

    /// A submission is in progress (including its retry probe)
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            PredictorState::Submitting | PredictorState::Checking { retry: true }
        )
    }

    /// A network call is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, PredictorState::Submitting | PredictorState::Checking { .. })
    }

    /// Last classification, if the last submission succeeded
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            PredictorState::Succeeded(c) => Some(c),
            _ => None,
        }
    }

    /// Last failure, if the last submission failed
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            PredictorState::Failed(f) => Some(f),
            _ => None,
        }
    }

    fn has_outcome(&self) -> bool {
        matches!(self, PredictorState::Succeeded(_) | PredictorState::Failed(_))
    }

    /// Human-readable state name
    pub fn display_name(&self) -> &'static str {
        match self {
            PredictorState::Idle => "Idle",
            PredictorState::Checking { retry: false } => "Checking",
            PredictorState::Checking { retry: true } => "Checking (retry)",
            PredictorState::Online => "Online",
            PredictorState::Offline => "Offline",
            PredictorState::Submitting => "Submitting",
            PredictorState::Succeeded(_) => "Succeeded",
            PredictorState::Failed(_) => "Failed",
        }
    }
}

impl fmt::Display for PredictorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
