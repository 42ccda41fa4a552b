/// Aggregated view of session progress, useful for UI.
///
/// The four status counts always sum to `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub skipped: usize,
    pub marked_for_review: usize,
    pub unanswered: usize,
    pub is_finished: bool,
}
