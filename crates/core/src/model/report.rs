use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizReportError {
    #[error("cannot build a report for zero questions")]
    NoQuestions,

    #[error("score ({score}) exceeds total questions ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("too many questions for a single attempt: {len}")]
    TooManyQuestions { len: usize },
}

/// Coarse performance bucket derived from the percentage score.
///
/// Ordered from worst to best so tiers can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PerformanceTier {
    NeedsImprovement,
    Average,
    Good,
    Excellent,
}

impl PerformanceTier {
    /// Map a percentage in `[0, 100]` to a tier.
    ///
    /// Thresholds are evaluated high to low, first match wins.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::Excellent
        } else if percentage >= 60.0 {
            Self::Good
        } else if percentage >= 40.0 {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }

    /// Learner-facing wording for this tier.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsImprovement => "Needs Improvement",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// Final outcome of a finished attempt.
///
/// Derived once from a finished session and never recomputed from itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizReport {
    score: u32,
    total_questions: u32,
    percentage: f64,
    tier: PerformanceTier,
}

impl QuizReport {
    /// Build a report from a correct-answer count and a question total.
    ///
    /// # Errors
    ///
    /// Returns `QuizReportError::NoQuestions` when `total_questions` is zero
    /// and `QuizReportError::ScoreExceedsTotal` when the counts do not align.
    pub fn from_counts(score: u32, total_questions: u32) -> Result<Self, QuizReportError> {
        if total_questions == 0 {
            return Err(QuizReportError::NoQuestions);
        }
        if score > total_questions {
            return Err(QuizReportError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }

        let percentage = 100.0 * f64::from(score) / f64::from(total_questions);

        Ok(Self {
            score,
            total_questions,
            percentage,
            tier: PerformanceTier::from_percentage(percentage),
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    #[must_use]
    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }
}
