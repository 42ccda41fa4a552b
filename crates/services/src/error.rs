//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuizReportError, SessionPhase};

/// Errors emitted by question bank providers.
///
/// All of these are recoverable by re-attempting subject selection; the
/// engine never retries on its own.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderError {
    #[error("no questions available for {subject}")]
    NotFound { subject: String },

    #[error("question provider returned status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("malformed quiz payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("question bank unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question set is empty")]
    EmptyQuestionSet,

    #[error("{operation} is not valid while the session is {phase:?}")]
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },

    #[error("{option:?} is not an option for the current question")]
    InvalidOption { option: String },

    #[error("question index {index} is out of range for {len} questions")]
    OutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Report(#[from] QuizReportError),
}

/// Errors emitted by the quiz flow orchestration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("subject selection changed while questions were loading")]
    StaleLoad,

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
