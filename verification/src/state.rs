//! Verification case state: the step the user is on and the artifacts collected.

use grow_types::{BlobRef, CaseId, Timestamp};
use serde::{Deserialize, Serialize};

/// Steps of the verification wizard, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStep {
    /// Upload an identity document.
    DocumentUpload,
    /// Take a selfie with the device camera.
    SelfieCapture,
    /// Draw a signature.
    Signature,
    /// Enter full name and date of birth.
    Details,
    /// Check everything and submit.
    Review,
    /// Terminal: verification passed.
    Approved,
    /// Verification failed; may be retried from Review.
    Rejected,
}

impl VerificationStep {
    /// The step `next()` moves to, if any. Review and the outcomes have none.
    pub fn following(&self) -> Option<Self> {
        match self {
            Self::DocumentUpload => Some(Self::SelfieCapture),
            Self::SelfieCapture => Some(Self::Signature),
            Self::Signature => Some(Self::Details),
            Self::Details => Some(Self::Review),
            Self::Review | Self::Approved | Self::Rejected => None,
        }
    }

    /// The step `back()` returns to, if any.
    pub fn preceding(&self) -> Option<Self> {
        match self {
            Self::SelfieCapture => Some(Self::DocumentUpload),
            Self::Signature => Some(Self::SelfieCapture),
            Self::Details => Some(Self::Signature),
            Self::Review => Some(Self::Details),
            Self::DocumentUpload | Self::Approved | Self::Rejected => None,
        }
    }

    pub fn is_outcome(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// 1-based position for progress indicators; outcomes count as the last step.
    pub fn position(&self) -> u8 {
        match self {
            Self::DocumentUpload => 1,
            Self::SelfieCapture => 2,
            Self::Signature => 3,
            Self::Details => 4,
            Self::Review | Self::Approved | Self::Rejected => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DocumentUpload => "Upload document",
            Self::SelfieCapture => "Take a selfie",
            Self::Signature => "Sign",
            Self::Details => "Personal details",
            Self::Review => "Review and submit",
            Self::Approved => "Verified",
            Self::Rejected => "Verification rejected",
        }
    }
}

/// Review status of a case.
///
/// Moves forward only: `Pending → Processing → Approved | Rejected`, and a
/// rejected case (or a failed review call) goes back to `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Processing,
    Approved,
    Rejected,
}

/// Everything collected for one identity verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationCase {
    pub id: CaseId,
    pub status: CaseStatus,
    pub step: VerificationStep,
    pub document_ref: Option<BlobRef>,
    pub selfie_ref: Option<BlobRef>,
    pub signature_ref: Option<BlobRef>,
    pub full_name: String,
    pub date_of_birth: String,
    /// Number of times the case has been sent for review.
    pub attempts: u32,
    /// Reason given with the latest rejection.
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub decided_at: Option<Timestamp>,
}

impl VerificationCase {
    pub fn new(id: CaseId, now: Timestamp) -> Self {
        Self {
            id,
            status: CaseStatus::Pending,
            step: VerificationStep::DocumentUpload,
            document_ref: None,
            selfie_ref: None,
            signature_ref: None,
            full_name: String::new(),
            date_of_birth: String::new(),
            attempts: 0,
            rejection_reason: None,
            created_at: now,
            decided_at: None,
        }
    }

    pub fn has_details(&self) -> bool {
        !self.full_name.trim().is_empty() && !self.date_of_birth.trim().is_empty()
    }

    /// First missing artifact across all data steps, for the review guard.
    pub fn first_missing(&self) -> Option<(VerificationStep, &'static str)> {
        if self.document_ref.is_none() {
            return Some((VerificationStep::DocumentUpload, "identity document"));
        }
        if self.selfie_ref.is_none() {
            return Some((VerificationStep::SelfieCapture, "selfie image"));
        }
        if self.signature_ref.is_none() {
            return Some((VerificationStep::Signature, "signature"));
        }
        if !self.has_details() {
            return Some((VerificationStep::Details, "full name and date of birth"));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_order_is_linear() {
        let mut step = VerificationStep::DocumentUpload;
        let mut seen = vec![step];
        while let Some(next) = step.following() {
            assert_eq!(next.preceding(), Some(step));
            step = next;
            seen.push(step);
        }
        assert_eq!(step, VerificationStep::Review);
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn outcomes_have_no_neighbours() {
        for s in [VerificationStep::Approved, VerificationStep::Rejected] {
            assert!(s.is_outcome());
            assert_eq!(s.following(), None);
            assert_eq!(s.preceding(), None);
        }
    }

    #[test]
    fn details_require_both_fields() {
        let mut case = VerificationCase::new(CaseId::new(1), Timestamp::EPOCH);
        case.full_name = "Asha Rao".into();
        case.date_of_birth = "   ".into();
        assert!(!case.has_details());
        case.date_of_birth = "1994-02-11".into();
        assert!(case.has_details());
    }
}
