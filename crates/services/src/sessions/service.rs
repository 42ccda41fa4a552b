use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt;

use quiz_core::model::{
    AttemptId, Question, QuestionId, QuestionStatus, QuizReport, QuizReportError, SessionPhase,
    Subject,
};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's attempt at a quiz, from subject selection to the report.
///
/// Holds the ordered question list and steps through it under explicit
/// navigation. Statuses are mutually exclusive per question; `Answered` is
/// sticky and only a new answer replaces it, while skip/review labels apply
/// to not-yet-answered questions only. Review intent on an answered question
/// is kept as a secondary flag instead of overwriting the status.
pub struct QuizSession {
    attempt_id: AttemptId,
    subject: Subject,
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<QuestionId, String>,
    statuses: HashMap<QuestionId, QuestionStatus>,
    review_flags: HashSet<QuestionId>,
    phase: SessionPhase,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session awaiting its question list.
    #[must_use]
    pub fn new(subject: Subject) -> Self {
        Self {
            attempt_id: AttemptId::generate(),
            subject,
            questions: Vec::new(),
            current: 0,
            answers: HashMap::new(),
            statuses: HashMap::new(),
            review_flags: HashSet::new(),
            phase: SessionPhase::Selecting,
            started_at: None,
            finished_at: None,
        }
    }

    /// Supply the loaded question list and begin the attempt.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` for an empty list and
    /// `SessionError::InvalidState` when the session has already started.
    pub fn start(
        &mut self,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Selecting {
            return Err(SessionError::InvalidState {
                operation: "start",
                phase: self.phase,
            });
        }
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        self.statuses = questions
            .iter()
            .map(|q| (q.id(), QuestionStatus::Unanswered))
            .collect();
        self.answers.clear();
        self.review_flags.clear();
        self.questions = questions;
        self.current = 0;
        self.started_at = Some(started_at);
        self.phase = SessionPhase::InProgress;
        Ok(())
    }

    fn require_in_progress(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::InProgress {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                phase: self.phase,
            })
        }
    }

    // `current` stays within bounds from `start` onwards, so the error arm
    // here is unreachable; it exists to keep indexing total.
    fn question_at_cursor(&self) -> Result<&Question, SessionError> {
        self.questions
            .get(self.current)
            .ok_or(SessionError::OutOfRange {
                index: self.current,
                len: self.questions.len(),
            })
    }

    /// The question under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`; never
    /// fails while the session is in progress.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.require_in_progress("current_question")?;
        self.question_at_cursor()
    }

    /// Record an answer for the current question.
    ///
    /// The latest choice wins; the status becomes `Answered` no matter what
    /// label the question carried before. The cursor does not move:
    /// advancing is the caller's explicit navigation action.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` if `option` is not one of the
    /// current question's choices, `SessionError::InvalidState` outside
    /// `InProgress`.
    pub fn answer(&mut self, option: impl Into<String>) -> Result<(), SessionError> {
        self.require_in_progress("answer")?;
        let option = option.into();
        let question = self.question_at_cursor()?;
        if !question.has_option(&option) {
            return Err(SessionError::InvalidOption { option });
        }

        let qid = question.id();
        self.answers.insert(qid, option);
        self.statuses.insert(qid, QuestionStatus::Answered);
        Ok(())
    }

    /// Skip the current question and advance.
    ///
    /// An already-answered question keeps both its answer and its `Answered`
    /// status. At the last question the cursor stays put; finishing is
    /// always an explicit call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`.
    pub fn skip(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("skip")?;
        let qid = self.question_at_cursor()?.id();
        if self.statuses.get(&qid) != Some(&QuestionStatus::Answered) {
            self.statuses.insert(qid, QuestionStatus::Skipped);
        }
        self.advance();
        Ok(())
    }

    /// Mark the current question for review and advance.
    ///
    /// Review intent is always recorded; the visible status changes only
    /// when the question is not yet answered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`.
    pub fn mark_for_review(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("mark_for_review")?;
        let qid = self.question_at_cursor()?.id();
        self.review_flags.insert(qid);
        if self.statuses.get(&qid) != Some(&QuestionStatus::Answered) {
            self.statuses.insert(qid, QuestionStatus::MarkedForReview);
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Jump to a question by index without touching any status.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfRange` for `index >= len` (state is left
    /// unchanged), `SessionError::InvalidState` outside `InProgress`.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.require_in_progress("go_to")?;
        if index >= self.questions.len() {
            return Err(SessionError::OutOfRange {
                index,
                len: self.questions.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Move to the next question; a no-op at the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("next")?;
        self.advance();
        Ok(())
    }

    /// Move to the previous question; a no-op at the first one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.require_in_progress("previous")?;
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// End the attempt, freezing answers and statuses.
    ///
    /// Valid from any cursor position. `finished_at` should come from the
    /// services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` outside `InProgress`.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) -> Result<(), SessionError> {
        self.require_in_progress("finish")?;
        self.finished_at = Some(finished_at);
        self.phase = SessionPhase::Finished;
        Ok(())
    }

    /// Derive the immutable report from a finished attempt.
    ///
    /// Unanswered and skipped questions count as incorrect; there is no
    /// partial credit. Deterministic for a given final answer set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is
    /// `Finished`.
    pub fn build_report(&self) -> Result<QuizReport, SessionError> {
        if self.phase != SessionPhase::Finished {
            return Err(SessionError::InvalidState {
                operation: "build_report",
                phase: self.phase,
            });
        }

        let len = self.questions.len();
        let total = u32::try_from(len)
            .map_err(|_| QuizReportError::TooManyQuestions { len })?;
        let correct = self
            .questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id())
                    .is_some_and(|selected| q.is_correct(selected))
            })
            .count();
        let score =
            u32::try_from(correct).map_err(|_| QuizReportError::TooManyQuestions { len })?;

        Ok(QuizReport::from_counts(score, total)?)
    }

    // ─── READ ACCESS ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current status label for a question, or `None` for a foreign id.
    #[must_use]
    pub fn status_of(&self, id: QuestionId) -> Option<QuestionStatus> {
        self.statuses.get(&id).copied()
    }

    /// The recorded answer for a question, if any.
    #[must_use]
    pub fn selected_answer(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// Whether review intent was ever recorded for the question, even if it
    /// has since been answered.
    #[must_use]
    pub fn is_review_flagged(&self, id: QuestionId) -> bool {
        self.review_flags.contains(&id)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let mut answered = 0;
        let mut skipped = 0;
        let mut marked_for_review = 0;
        let mut unanswered = 0;
        for status in self.statuses.values() {
            match status {
                QuestionStatus::Answered => answered += 1,
                QuestionStatus::Skipped => skipped += 1,
                QuestionStatus::MarkedForReview => marked_for_review += 1,
                QuestionStatus::Unanswered => unanswered += 1,
            }
        }
        SessionProgress {
            total: self.questions.len(),
            answered,
            skipped,
            marked_for_review,
            unanswered,
            is_finished: self.is_finished(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("attempt_id", &self.attempt_id)
            .field("subject", &self.subject)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("phase", &self.phase)
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
