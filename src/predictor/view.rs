//! Rendering contract for the predictor
//!
//! Pure functions from predictor state to what the user sees. The terminal
//! layer decides colors and glyphs from `Tone` and `Icon`.

use super::state::{PredictorState, ServerStatus, Verdict};
use crate::client::FormatHints;
use crate::metrics::MetricField;

/// Visual tone of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Pending,
    Info,
}

/// Icon shown next to a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Check,
    Warning,
    Spinner,
    Activity,
    Server,
    Info,
}

pub const HEALTHY_TITLE: &str = "Network Healthy ✅";
pub const ISSUE_TITLE: &str = "Network Issue Detected ⚠️";
pub const HEALTHY_EXPLANATION: &str = "Your network metrics indicate normal operation with no predicted issues. All systems are functioning optimally.";
pub const ISSUE_EXPLANATION: &str = "Your network metrics suggest potential connectivity or performance issues that may require immediate attention to prevent service disruption.";
pub const ERROR_TITLE: &str = "Prediction Error";

impl ServerStatus {
    /// Badge text
    pub fn label(&self) -> &'static str {
        match self {
            ServerStatus::Online => "Server Online",
            ServerStatus::Offline => "Server Offline",
            ServerStatus::Checking => "Connecting to Server...",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ServerStatus::Online => Tone::Success,
            ServerStatus::Offline => Tone::Danger,
            ServerStatus::Checking => Tone::Pending,
        }
    }
}

/// Submit button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
    pub icon: Icon,
}

impl SubmitControl {
    /// Enabled only when a `Submit` event would be accepted
    pub fn for_state(state: &PredictorState) -> Self {
        let status = state.server_status();
        let enabled = !state.is_busy()
            && !matches!(state, PredictorState::Idle)
            && status != ServerStatus::Offline;

        let (label, icon) = if state.is_loading() {
            ("Analyzing Network...", Icon::Spinner)
        } else if status == ServerStatus::Checking {
            ("Connecting to Server...", Icon::Spinner)
        } else {
            ("Predict Network Health", Icon::Activity)
        };

        Self {
            enabled,
            label,
            icon,
        }
    }
}

/// The result area below the form. Exactly one variant is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel {
    /// Nothing submitted yet (or cleared)
    Empty,

    /// Last submission failed
    Error { message: String },

    /// Last submission produced a classification
    Outcome { verdict: Verdict, value: f64 },
}

impl ResultPanel {
    pub fn for_state(state: &PredictorState) -> Self {
        if let Some(failure) = state.failure() {
            return ResultPanel::Error {
                message: failure.message.clone(),
            };
        }
        match state.classification() {
            Some(c) => ResultPanel::Outcome {
                verdict: c.verdict(),
                value: c.value,
            },
            None => ResultPanel::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultPanel::Empty)
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            ResultPanel::Empty => None,
            ResultPanel::Error { .. } => Some(ERROR_TITLE),
            ResultPanel::Outcome {
                verdict: Verdict::Healthy,
                ..
            } => Some(HEALTHY_TITLE),
            ResultPanel::Outcome { .. } => Some(ISSUE_TITLE),
        }
    }

    /// Body text: the error message, or the fixed explanation for the verdict
    pub fn body(&self) -> Option<&str> {
        match self {
            ResultPanel::Empty => None,
            ResultPanel::Error { message } => Some(message),
            ResultPanel::Outcome {
                verdict: Verdict::Healthy,
                ..
            } => Some(HEALTHY_EXPLANATION),
            ResultPanel::Outcome { .. } => Some(ISSUE_EXPLANATION),
        }
    }

    /// Footnote under an outcome
    pub fn footnote(&self) -> Option<&'static str> {
        match self {
            ResultPanel::Outcome {
                verdict: Verdict::Healthy,
                ..
            } => Some("Prediction Result: No Issue (0)"),
            ResultPanel::Outcome { .. } => Some("Prediction Result: Issue Detected (1)"),
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ResultPanel::Empty => Tone::Info,
            ResultPanel::Outcome {
                verdict: Verdict::Healthy,
                ..
            } => Tone::Success,
            _ => Tone::Danger,
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        match self {
            ResultPanel::Empty => None,
            ResultPanel::Outcome {
                verdict: Verdict::Healthy,
                ..
            } => Some(Icon::Check),
            _ => Some(Icon::Warning),
        }
    }
}

/// Rows of the "Expected Input Format" panel
pub fn format_rows(hints: &FormatHints) -> Vec<(&'static str, &str)> {
    MetricField::ALL
        .iter()
        .map(|f| (f.short_label(), hints.get(*f)))
        .collect()
}
