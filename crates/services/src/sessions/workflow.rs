use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::seq::SliceRandom;

use quiz_core::Clock;
use quiz_core::model::{QuizReport, Subject};

use super::service::QuizSession;
use crate::error::QuizFlowError;
use crate::question_bank::QuestionBank;

/// Token tying a question load to the subject choice that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSelection {
    subject: Subject,
    seq: u64,
}

impl SubjectSelection {
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}

/// Orchestrates subject selection, question loading, and report building.
///
/// The question load is the engine's only asynchronous boundary; everything
/// after it is a synchronous state transition. Re-selecting a subject while
/// a load is in flight supersedes it, and the late result is discarded.
#[derive(Clone)]
pub struct QuizFlowService {
    clock: Clock,
    bank: Arc<dyn QuestionBank>,
    shuffle: bool,
    selection_seq: Arc<AtomicU64>,
}

impl QuizFlowService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<dyn QuestionBank>) -> Self {
        Self {
            clock,
            bank,
            shuffle: false,
            selection_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Enable or disable shuffling of the loaded question order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Register a new subject choice, superseding any in-flight load.
    #[must_use]
    pub fn select_subject(&self, subject: Subject) -> SubjectSelection {
        let seq = self.selection_seq.fetch_add(1, Ordering::SeqCst) + 1;
        SubjectSelection { subject, seq }
    }

    /// Returns true while `selection` is still the latest choice.
    #[must_use]
    pub fn is_current(&self, selection: &SubjectSelection) -> bool {
        self.selection_seq.load(Ordering::SeqCst) == selection.seq
    }

    /// Load questions for the selection and start a session.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::StaleLoad` when the selection was superseded
    /// while the load was in flight (the result must not be applied to a
    /// session meant for a different subject), and propagates loader and
    /// session-start failures.
    pub async fn start_quiz(
        &self,
        selection: &SubjectSelection,
    ) -> Result<QuizSession, QuizFlowError> {
        let mut questions = self.bank.load(selection.subject()).await?;
        if !self.is_current(selection) {
            return Err(QuizFlowError::StaleLoad);
        }

        if self.shuffle {
            questions.shuffle(&mut rand::rng());
        }

        let mut session = QuizSession::new(selection.subject().clone());
        session.start(questions, self.clock.now())?;
        Ok(session)
    }

    /// End the attempt and derive its immutable report.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Session` when the session is not in
    /// progress.
    pub fn finish_quiz(&self, session: &mut QuizSession) -> Result<QuizReport, QuizFlowError> {
        session.finish(self.clock.now())?;
        Ok(session.build_report()?)
    }
}
