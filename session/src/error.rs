use grow_ledger::{GatewayError, LedgerError};
use grow_tasks::TaskError;
use grow_types::TypesError;
use grow_verification::VerificationError;
use thiserror::Error;

use crate::view::DashboardView;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    #[error("task error: {0}")]
    Task(#[from] TaskError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("payout error: {0}")]
    Payout(#[from] GatewayError),

    #[error("{0:?} is locked until verification is approved")]
    Locked(DashboardView),

    #[error("unknown dashboard view: {0}")]
    UnknownView(String),

    #[error("invalid parameters: {0}")]
    Params(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),
}

/// How the host should treat an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid input; the action is blocked, nothing changed.
    Validation,
    /// A device capability is unavailable; offer a retry.
    Capability,
    /// A review or payout could not be completed; resubmit.
    Submission,
    /// The referenced task does not exist or is closed.
    NotFound,
    /// The feature needs an approved verification.
    Locked,
    /// Misconfiguration or a broken data source.
    Internal,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Verification(e) => match e {
                VerificationError::Capability(_) | VerificationError::CameraNotStarted => {
                    ErrorKind::Capability
                }
                VerificationError::Submission { .. } => ErrorKind::Submission,
                VerificationError::Incomplete { .. }
                | VerificationError::WrongStep(_)
                | VerificationError::File(_)
                | VerificationError::Signature(_) => ErrorKind::Validation,
            },
            SessionError::Task(e) => match e {
                TaskError::NotFound(_) => ErrorKind::NotFound,
                TaskError::DuplicateTask(_) | TaskError::Source(_) => ErrorKind::Internal,
                _ => ErrorKind::Validation,
            },
            SessionError::Ledger(_) => ErrorKind::Validation,
            SessionError::Payout(_) => ErrorKind::Submission,
            SessionError::Locked(_) => ErrorKind::Locked,
            SessionError::UnknownView(_) | SessionError::Params(_) => ErrorKind::Validation,
            SessionError::Config(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grow_types::TaskId;
    use grow_verification::CapabilityError;

    #[test]
    fn taxonomy() {
        let e: SessionError = VerificationError::Capability(CapabilityError::Denied).into();
        assert_eq!(e.kind(), ErrorKind::Capability);
        let e: SessionError = TaskError::NotFound(TaskId::new(3)).into();
        assert_eq!(e.kind(), ErrorKind::NotFound);
        let e: SessionError = LedgerError::ZeroAmount.into();
        assert_eq!(e.kind(), ErrorKind::Validation);
        let e: SessionError = GatewayError::Unavailable("down".into()).into();
        assert_eq!(e.kind(), ErrorKind::Submission);
    }
}
