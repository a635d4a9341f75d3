//! Nullable verification reviewer: scripted decisions.

use async_trait::async_trait;
use grow_types::CaseId;
use grow_verification::{ReviewDecision, ReviewerError, VerificationCase, VerificationReviewer};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::lock;

/// Returns queued decisions in order, then approves everything.
#[derive(Default)]
pub struct NullReviewer {
    script: Mutex<VecDeque<Result<ReviewDecision, ReviewerError>>>,
    reviewed: Mutex<Vec<CaseId>>,
}

impl NullReviewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_decision(&self, decision: ReviewDecision) {
        lock(&self.script).push_back(Ok(decision));
    }

    pub fn push_failure(&self, error: ReviewerError) {
        lock(&self.script).push_back(Err(error));
    }

    /// Cases reviewed so far, in order.
    pub fn reviewed(&self) -> Vec<CaseId> {
        lock(&self.reviewed).clone()
    }
}

#[async_trait]
impl VerificationReviewer for NullReviewer {
    fn name(&self) -> &str {
        "null-reviewer"
    }

    async fn review(&self, case: &VerificationCase) -> Result<ReviewDecision, ReviewerError> {
        lock(&self.reviewed).push(case.id);
        lock(&self.script)
            .pop_front()
            .unwrap_or(Ok(ReviewDecision::Approved))
    }
}
