mod ids;
mod question;
mod report;
mod status;
mod subject;

pub use ids::{AttemptId, ParseIdError, QuestionId};
pub use question::{Question, QuestionError};
pub use report::{PerformanceTier, QuizReport, QuizReportError};
pub use status::{QuestionStatus, SessionPhase};
pub use subject::{CourseId, Subject, SubjectError};
