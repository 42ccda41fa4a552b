use std::fmt;
use thiserror::Error;

/// Validated course identifier (trimmed, non-empty).
///
/// Course ids come from the catalog collaborator and are opaque here; the
/// engine only forwards them to the question provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseId(String);

impl CourseId {
    /// Create a validated course id.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyCourseId` if the id is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SubjectError::EmptyCourseId);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a learner chose to be quizzed on: a catalog course or free-text topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    Course(CourseId),
    Topic(String),
}

impl Subject {
    /// Create a course-based subject.
    #[must_use]
    pub fn course(id: CourseId) -> Self {
        Self::Course(id)
    }

    /// Create a free-text topic subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::EmptyTopic` if the text is empty after trimming.
    pub fn topic(text: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SubjectError::EmptyTopic);
        }
        Ok(Self::Topic(trimmed.to_string()))
    }

    /// The string sent to the question provider as the `topic` query value.
    #[must_use]
    pub fn query_value(&self) -> &str {
        match self {
            Subject::Course(id) => id.as_str(),
            Subject::Topic(text) => text,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Course(id) => write!(f, "course {id}"),
            Subject::Topic(text) => write!(f, "topic {text:?}"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("course id cannot be empty")]
    EmptyCourseId,

    #[error("topic cannot be empty")]
    EmptyTopic,
}
