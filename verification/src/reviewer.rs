//! Pluggable verification reviewer.
//!
//! The workflow only needs a decision; who makes it (a manual review queue, an
//! automated document check, a simulated delay) is up to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ReviewerError;
use crate::state::VerificationCase;

/// The decision returned for a submitted case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    Approved,
    Rejected { reason: String },
}

#[async_trait]
pub trait VerificationReviewer: Send + Sync {
    /// Human-readable name of this reviewer.
    fn name(&self) -> &str;

    /// Decide on a complete case. An `Err` means no decision was made.
    async fn review(&self, case: &VerificationCase) -> Result<ReviewDecision, ReviewerError>;
}
