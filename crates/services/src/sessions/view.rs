use quiz_core::model::{QuestionId, QuestionStatus};

use super::progress::SessionProgress;
use super::service::QuizSession;

/// Indicator data for one question in the progress strip.
///
/// This is intentionally **not** a UI view-model:
/// - no colors or pre-formatted strings
/// - no styling assumptions
///
/// The UI maps statuses to whatever visual language it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionIndicator {
    pub id: QuestionId,
    pub status: QuestionStatus,
    pub review_flagged: bool,
    pub is_current: bool,
}

/// Read-only projection of a session for the view layer.
///
/// Snapshotting never mutates the session; callable at any point of an
/// attempt. A session still waiting for questions yields an empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub current_number: usize,
    pub total: usize,
    pub progress_fraction: f64,
    pub indicators: Vec<QuestionIndicator>,
    pub progress: SessionProgress,
}

impl SessionView {
    #[must_use]
    pub fn snapshot(session: &QuizSession) -> Self {
        let total = session.total_questions();
        let current_number = if total == 0 {
            0
        } else {
            session.current_index() + 1
        };

        // Question counts are bounded far below f64's exact-integer range.
        #[allow(clippy::cast_precision_loss)]
        let progress_fraction = if total == 0 {
            0.0
        } else {
            current_number as f64 / total as f64
        };

        let indicators = session
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionIndicator {
                id: question.id(),
                status: session.status_of(question.id()).unwrap_or_default(),
                review_flagged: session.is_review_flagged(question.id()),
                is_current: index == session.current_index(),
            })
            .collect();

        Self {
            current_number,
            total,
            progress_fraction,
            indicators,
            progress: session.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, Subject};
    use quiz_core::time::fixed_now;

    fn build_session(count: u64) -> QuizSession {
        let questions = (1..=count)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Q{id}"),
                    vec!["a".into(), "b".into()],
                    "a",
                )
                .unwrap()
            })
            .collect();
        let mut session = QuizSession::new(Subject::topic("Rust").unwrap());
        session.start(questions, fixed_now()).unwrap();
        session
    }

    #[test]
    fn selecting_session_yields_an_empty_view() {
        let session = QuizSession::new(Subject::topic("Rust").unwrap());
        let view = SessionView::snapshot(&session);
        assert_eq!(view.total, 0);
        assert_eq!(view.current_number, 0);
        assert!(view.indicators.is_empty());
        assert!((view.progress_fraction).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_fraction_tracks_the_cursor() {
        let mut session = build_session(4);
        let view = SessionView::snapshot(&session);
        assert_eq!(view.current_number, 1);
        assert!((view.progress_fraction - 0.25).abs() < f64::EPSILON);

        session.go_to(3).unwrap();
        let view = SessionView::snapshot(&session);
        assert_eq!(view.current_number, 4);
        assert!((view.progress_fraction - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn indicators_reflect_status_and_cursor() {
        let mut session = build_session(3);
        session.answer("a").unwrap();
        session.next().unwrap();
        session.skip().unwrap();

        let view = SessionView::snapshot(&session);
        assert_eq!(view.indicators.len(), 3);
        assert_eq!(view.indicators[0].status, QuestionStatus::Answered);
        assert_eq!(view.indicators[1].status, QuestionStatus::Skipped);
        assert_eq!(view.indicators[2].status, QuestionStatus::Unanswered);
        assert!(view.indicators[2].is_current);
        assert!(!view.indicators[0].is_current);
    }

    #[test]
    fn review_flag_shows_alongside_answered_status() {
        let mut session = build_session(2);
        session.answer("a").unwrap();
        session.mark_for_review().unwrap();

        let view = SessionView::snapshot(&session);
        assert_eq!(view.indicators[0].status, QuestionStatus::Answered);
        assert!(view.indicators[0].review_flagged);
        assert!(!view.indicators[1].review_flagged);
    }

    #[test]
    fn snapshot_does_not_mutate_the_session() {
        let mut session = build_session(2);
        session.answer("b").unwrap();
        let before = session.progress();
        let _ = SessionView::snapshot(&session);
        assert_eq!(session.progress(), before);
        assert_eq!(session.current_index(), 0);
    }
}
