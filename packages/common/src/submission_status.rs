use serde::{Deserialize, Serialize};

/// Scoring status of a submission.
///
/// `Judged` is set as soon as the first judge scores the submission. It does
/// not mean every judge has scored it; completeness is checked separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub enum SubmissionStatus {
    /// No judge has scored yet.
    #[default]
    Pending,
    /// At least one judge has scored.
    Judged,
}
