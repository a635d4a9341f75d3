//! Identity verification workflow.
//!
//! A case moves through five data steps (document upload, selfie capture,
//! signature, personal details, review) and ends approved or rejected.
//! Each step's artifact must be present before the workflow advances, and a
//! rejected case can be resubmitted from Review.
//!
//! Device access, file reading and the review decision are external
//! capabilities behind traits, so hosts can plug in real providers and tests
//! can plug in deterministic ones.

pub mod capture;
pub mod error;
pub mod reviewer;
pub mod signature;
pub mod state;
pub mod workflow;

pub use capture::{CameraLease, CameraProvider, FileInput, FileProvider, StreamHandle};
pub use error::{CapabilityError, FileError, ReviewerError, VerificationError};
pub use reviewer::{ReviewDecision, VerificationReviewer};
pub use signature::{Point, SignaturePad};
pub use state::{CaseStatus, VerificationCase, VerificationStep};
pub use workflow::{Capabilities, VerificationWorkflow, WorkflowEvent};
