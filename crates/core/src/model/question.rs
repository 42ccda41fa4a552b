use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("duplicate option: {option:?}")]
    DuplicateOption { option: String },

    #[error("correct option {option:?} is not among the question's options")]
    UnknownCorrectOption { option: String },
}

/// A single multiple-choice question.
///
/// Immutable once constructed; the session owns its questions for the
/// lifetime of one attempt and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_option: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank,
    /// `QuestionError::TooFewOptions` for fewer than two options,
    /// `QuestionError::DuplicateOption` if two options are identical, and
    /// `QuestionError::UnknownCorrectOption` if `correct_option` is not one
    /// of the options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                len: options.len(),
            });
        }

        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        let correct_option = correct_option.into();
        if !options.contains(&correct_option) {
            return Err(QuestionError::UnknownCorrectOption {
                option: correct_option,
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_option,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.correct_option
    }

    /// Returns true if `option` is one of this question's choices.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Returns true if `option` is the correct choice.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_option == option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn builds_a_valid_question() {
        let question = Question::new(
            QuestionId::new(1),
            "What is ownership?",
            options(&["a", "b", "c"]),
            "b",
        )
        .unwrap();

        assert_eq!(question.prompt(), "What is ownership?");
        assert_eq!(question.options().len(), 3);
        assert!(question.is_correct("b"));
        assert!(!question.is_correct("a"));
        assert!(question.has_option("c"));
        assert!(!question.has_option("d"));
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new(QuestionId::new(1), "  ", options(&["a", "b"]), "a").unwrap_err();
        assert!(matches!(err, QuestionError::EmptyPrompt));
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new(1), "Q", options(&["a"]), "a").unwrap_err();
        assert!(matches!(err, QuestionError::TooFewOptions { len: 1 }));
    }

    #[test]
    fn rejects_duplicate_options() {
        let err = Question::new(QuestionId::new(1), "Q", options(&["a", "b", "a"]), "b").unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateOption { .. }));
    }

    #[test]
    fn rejects_correct_option_outside_options() {
        let err = Question::new(QuestionId::new(1), "Q", options(&["a", "b"]), "z").unwrap_err();
        assert!(matches!(err, QuestionError::UnknownCorrectOption { .. }));
    }
}
