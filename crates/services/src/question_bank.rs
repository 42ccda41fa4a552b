use std::collections::{HashMap, HashSet};
use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{Question, QuestionId, Subject};

use crate::error::LoaderError;

/// Source of question lists for a chosen subject.
///
/// Pure data acquisition: no side effects beyond the read, no automatic
/// retry. A provider validates what it returns; malformed records are
/// dropped rather than handed to the session.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Load the ordered question list for `subject`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::NotFound` when the provider has no (valid)
    /// questions for the subject, and `LoaderError::Transport` /
    /// `LoaderError::Malformed` on network or payload failures.
    async fn load(&self, subject: &Subject) -> Result<Vec<Question>, LoaderError>;
}

//
// ─── WIRE FORMAT ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    id: Option<u64>,
    question: String,
    options: Vec<String>,
    correct: String,
}

#[derive(Debug, Deserialize)]
struct QuizEnvelope {
    quiz: Vec<QuestionRecord>,
}

/// The provider emits either a flat record array or an array of
/// `{"quiz": [...]}` envelopes; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Enveloped(Vec<QuizEnvelope>),
    Flat(Vec<QuestionRecord>),
}

impl QuizPayload {
    fn into_records(self) -> Vec<QuestionRecord> {
        match self {
            QuizPayload::Enveloped(envelopes) => {
                envelopes.into_iter().flat_map(|e| e.quiz).collect()
            }
            QuizPayload::Flat(records) => records,
        }
    }
}

/// Validate provider records into domain questions.
///
/// Records without an id get their 1-based position; a record that fails
/// validation, or reuses an id already kept, is dropped. An empty result is
/// `LoaderError::NotFound`: a subject with nothing valid to ask is
/// indistinguishable from an unknown one.
fn into_questions(
    subject: &Subject,
    records: Vec<QuestionRecord>,
) -> Result<Vec<Question>, LoaderError> {
    let mut questions: Vec<Question> = Vec::with_capacity(records.len());
    let mut seen: HashSet<QuestionId> = HashSet::new();

    for (position, record) in (1_u64..).zip(records) {
        let id = QuestionId::new(record.id.unwrap_or(position));
        match Question::new(id, record.question, record.options, record.correct) {
            Ok(question) => {
                if seen.insert(question.id()) {
                    questions.push(question);
                } else {
                    tracing::warn!(%id, "dropping question with duplicate id");
                }
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "dropping malformed question record");
            }
        }
    }

    if questions.is_empty() {
        return Err(LoaderError::NotFound {
            subject: subject.to_string(),
        });
    }
    Ok(questions)
}

//
// ─── HTTP PROVIDER ─────────────────────────────────────────────────────────────
//

/// Question bank backed by the remote quiz-generation service.
///
/// Fetches `GET {base}/quiz?topic=<subject>` and parses the JSON body.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: Client,
    base_url: String,
}

impl HttpQuestionBank {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Build a provider from `QUIZ_BANK_BASE_URL`, or `None` when unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("QUIZ_BANK_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        Some(Self::new(base_url))
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn load(&self, subject: &Subject) -> Result<Vec<Question>, LoaderError> {
        let url = format!("{}/quiz", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[("topic", subject.query_value())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoaderError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let payload: QuizPayload = serde_json::from_str(&body)?;
        into_questions(subject, payload.into_records())
    }
}

//
// ─── STATIC PROVIDER ───────────────────────────────────────────────────────────
//

/// Simple in-memory question bank for testing and prototyping.
///
/// Keyed by the subject's query value, so a course and a topic with the
/// same string resolve to the same set.
#[derive(Clone, Default)]
pub struct StaticQuestionBank {
    banks: Arc<Mutex<HashMap<String, Vec<Question>>>>,
}

impl StaticQuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            banks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register the question list served for `subject`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Unavailable` if the bank's lock is poisoned.
    pub fn insert(&self, subject: &Subject, questions: Vec<Question>) -> Result<(), LoaderError> {
        let mut guard = self
            .banks
            .lock()
            .map_err(|e| LoaderError::Unavailable(e.to_string()))?;
        guard.insert(subject.query_value().to_string(), questions);
        Ok(())
    }
}

#[async_trait]
impl QuestionBank for StaticQuestionBank {
    async fn load(&self, subject: &Subject) -> Result<Vec<Question>, LoaderError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| LoaderError::Unavailable(e.to_string()))?;
        let questions = guard
            .get(subject.query_value())
            .cloned()
            .filter(|qs| !qs.is_empty())
            .ok_or_else(|| LoaderError::NotFound {
                subject: subject.to_string(),
            })?;
        Ok(questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject::topic("Rust").unwrap()
    }

    #[test]
    fn parses_flat_payload() {
        let body = r#"[
            {"id": 1, "question": "Q1", "options": ["a", "b"], "correct": "a"},
            {"id": 2, "question": "Q2", "options": ["x", "y", "z"], "correct": "z"}
        ]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let questions = into_questions(&subject(), payload.into_records()).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id(), QuestionId::new(1));
        assert_eq!(questions[1].correct_option(), "z");
    }

    #[test]
    fn parses_enveloped_payload() {
        let body = r#"[{"quiz": [
            {"question": "Q1", "options": ["a", "b"], "correct": "b"}
        ]}]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let questions = into_questions(&subject(), payload.into_records()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "Q1");
    }

    #[test]
    fn records_without_ids_get_positions() {
        let body = r#"[
            {"question": "Q1", "options": ["a", "b"], "correct": "a"},
            {"question": "Q2", "options": ["a", "b"], "correct": "b"}
        ]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let questions = into_questions(&subject(), payload.into_records()).unwrap();
        assert_eq!(questions[0].id(), QuestionId::new(1));
        assert_eq!(questions[1].id(), QuestionId::new(2));
    }

    #[test]
    fn invalid_records_are_dropped_not_fatal() {
        let body = r#"[
            {"question": "Q1", "options": ["a"], "correct": "a"},
            {"question": "Q2", "options": ["a", "b"], "correct": "nope"},
            {"question": "Q3", "options": ["a", "b"], "correct": "b"}
        ]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let questions = into_questions(&subject(), payload.into_records()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "Q3");
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let body = r#"[
            {"id": 7, "question": "Q1", "options": ["a", "b"], "correct": "a"},
            {"id": 7, "question": "Q2", "options": ["a", "b"], "correct": "b"}
        ]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let questions = into_questions(&subject(), payload.into_records()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].prompt(), "Q1");
    }

    #[test]
    fn all_invalid_records_become_not_found() {
        let body = r#"[{"question": "Q1", "options": ["a"], "correct": "a"}]"#;
        let payload: QuizPayload = serde_json::from_str(body).unwrap();
        let err = into_questions(&subject(), payload.into_records()).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound { .. }));
    }

    #[test]
    fn garbage_body_is_malformed() {
        let err = serde_json::from_str::<QuizPayload>("{\"oops\": true}").unwrap_err();
        let err: LoaderError = err.into();
        assert!(matches!(err, LoaderError::Malformed(_)));
    }

    #[tokio::test]
    async fn static_bank_serves_registered_subjects() {
        let bank = StaticQuestionBank::new();
        let subject = subject();
        let question = Question::new(
            QuestionId::new(1),
            "Q",
            vec!["a".into(), "b".into()],
            "a",
        )
        .unwrap();
        bank.insert(&subject, vec![question.clone()]).unwrap();

        let loaded = bank.load(&subject).await.unwrap();
        assert_eq!(loaded, vec![question]);

        let missing = Subject::topic("Unknown").unwrap();
        assert!(matches!(
            bank.load(&missing).await,
            Err(LoaderError::NotFound { .. })
        ));
    }
}
