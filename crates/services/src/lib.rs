#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{LoaderError, QuizFlowError, SessionError};
pub use question_bank::{HttpQuestionBank, QuestionBank, StaticQuestionBank};

pub use sessions::{
    QuestionIndicator, QuizFlowService, QuizSession, SessionProgress, SessionView,
    SubjectSelection,
};
