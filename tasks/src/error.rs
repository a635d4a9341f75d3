use grow_ledger::LedgerError;
use grow_types::TaskId;
use thiserror::Error;

use crate::task::TaskStatus;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Unknown id, or a task that is already approved.
    #[error("{0} not found")]
    NotFound(TaskId),

    #[error("duplicate task id {0} in catalog")]
    DuplicateTask(TaskId),

    #[error("{task} is {status:?}, not available for submission")]
    NotAvailable { task: TaskId, status: TaskStatus },

    #[error("{0} has already been credited")]
    AlreadyCredited(TaskId),

    #[error("{0} has no pending submission")]
    NoPendingSubmission(TaskId),

    #[error("{0} was not rejected, nothing to retry")]
    NotRejected(TaskId),

    #[error("{task} must be watched to the end first ({percent}% watched)")]
    WatchIncomplete { task: TaskId, percent: u8 },

    #[error("{0} is not a watch task")]
    NotWatchTask(TaskId),

    #[error("{0} has no known video duration")]
    NoDuration(TaskId),

    #[error("invalid proof: {0}")]
    InvalidProof(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("task source error: {0}")]
    Source(String),
}
