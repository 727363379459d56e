//! Network health predictor
//!
//! State machine, session driver and rendering contract.

pub mod session;
pub mod state;
pub mod view;

pub use session::PredictorSession;
pub use state::{
    Classification, Failure, FailureKind, PredictorEvent, PredictorState, ServerStatus, Verdict,
};
pub use view::{ResultPanel, SubmitControl, Tone};
