use thiserror::Error;

use crate::model::QuestionError;
use crate::model::QuizReportError;
use crate::model::SubjectError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Report(#[from] QuizReportError),
    #[error(transparent)]
    Subject(#[from] SubjectError),
}
