/// Current label of a question within an attempt.
///
/// Exactly one status per question at any time; every question starts
/// `Unanswered`. `Answered` is sticky: only a new answer can replace it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuestionStatus {
    #[default]
    Unanswered,
    Answered,
    Skipped,
    MarkedForReview,
}

/// Lifecycle phase of a quiz session.
///
/// `Selecting` precedes the question load; the one transition to
/// `InProgress` happens when a non-empty question list is supplied, and
/// `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Selecting,
    InProgress,
    Finished,
}
