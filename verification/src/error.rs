use grow_types::CaseId;
use thiserror::Error;

use crate::state::VerificationStep;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("step {step:?} is incomplete: {missing}")]
    Incomplete {
        step: VerificationStep,
        missing: &'static str,
    },

    #[error("operation not allowed in step {0:?}")]
    WrongStep(VerificationStep),

    #[error("camera has not been started")]
    CameraNotStarted,

    #[error("camera error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("file error: {0}")]
    File(#[from] FileError),

    #[error("submission of {case} failed: {reason}")]
    Submission { case: CaseId, reason: String },

    #[error("signature could not be encoded: {0}")]
    Signature(String),
}

/// Failures of the camera capability provider. All are recoverable by
/// acquiring the camera again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("camera permission denied")]
    Denied,

    #[error("no camera found")]
    NotFound,

    #[error("camera is in use by another application")]
    DeviceBusy,

    #[error("capture failed: {0}")]
    CaptureFailed(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("file is empty: {0}")]
    Empty(String),

    #[error("file could not be read: {0}")]
    Unreadable(String),
}

/// Transport-level failure of the reviewer (distinct from a rejection decision).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewerError {
    #[error("reviewer unavailable: {0}")]
    Unavailable(String),

    #[error("review timed out")]
    Timeout,
}
