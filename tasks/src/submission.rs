//! Proof submissions and review outcomes.

use grow_types::{BlobRef, SubmissionId, TaskId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// Evidence that a task was done.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proof {
    /// An uploaded screenshot or screen recording.
    Upload(BlobRef),
    /// A link to the published post or profile.
    Link(String),
}

impl Proof {
    pub fn validate(&self) -> Result<(), TaskError> {
        match self {
            Proof::Upload(_) => Ok(()),
            Proof::Link(url) => {
                let url = url.trim();
                if url.starts_with("https://") || url.starts_with("http://") {
                    Ok(())
                } else {
                    Err(TaskError::InvalidProof(format!("not a web link: {url:?}")))
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Pending,
    Approved,
    Rejected,
}

/// A reviewer's verdict on a pending submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewOutcome {
    Approved,
    Rejected { reason: String },
}

/// One attempt at a task.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub task_id: TaskId,
    pub proof: Proof,
    pub submitted_at: Timestamp,
    pub outcome: SubmissionOutcome,
    pub rejection_reason: Option<String>,
    /// 1 for the first attempt at a task, 2 for its first retry, and so on.
    pub attempt: u32,
    /// The rejected submission this one replaces.
    pub retry_of: Option<SubmissionId>,
    pub resolved_at: Option<Timestamp>,
}

impl Submission {
    pub fn is_pending(&self) -> bool {
        self.outcome == SubmissionOutcome::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_proof_must_be_http() {
        assert!(Proof::Link("https://instagram.com/p/abc".into()).validate().is_ok());
        assert!(Proof::Link("  ".into()).validate().is_err());
        assert!(Proof::Link("ftp://x".into()).validate().is_err());
        assert!(Proof::Upload(BlobRef::new([1; 32])).validate().is_ok());
    }
}
