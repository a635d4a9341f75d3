//! Verification workflow: drives one case through document upload, selfie,
//! signature, details and review, queueing events for the host to consume.

use grow_types::{Blob, BlobRef, CaseId, Clock};
use std::sync::Arc;

use crate::capture::{CameraLease, CameraProvider, FileInput, FileProvider};
use crate::error::VerificationError;
use crate::reviewer::{ReviewDecision, VerificationReviewer};
use crate::signature::SignaturePad;
use crate::state::{CaseStatus, VerificationCase, VerificationStep};

/// Events emitted by the workflow for the host to process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkflowEvent {
    StepChanged {
        case: CaseId,
        from: VerificationStep,
        to: VerificationStep,
    },
    CameraAcquired {
        case: CaseId,
    },
    CameraReleased {
        case: CaseId,
    },
    /// The case went out for review.
    Submitted {
        case: CaseId,
        attempt: u32,
    },
    Approved {
        case: CaseId,
    },
    Rejected {
        case: CaseId,
        reason: String,
    },
    /// The reviewer could not be reached; the case is back at Review.
    ReviewFailed {
        case: CaseId,
        error: String,
    },
    Abandoned {
        case: CaseId,
        step: VerificationStep,
    },
}

/// External capabilities the workflow depends on.
#[derive(Clone)]
pub struct Capabilities {
    pub camera: Arc<dyn CameraProvider>,
    pub files: Arc<dyn FileProvider>,
    pub reviewer: Arc<dyn VerificationReviewer>,
    pub clock: Arc<dyn Clock>,
}

pub struct VerificationWorkflow {
    case: VerificationCase,
    caps: Capabilities,
    /// Open camera stream; only ever `Some` while in SelfieCapture.
    lease: Option<CameraLease>,
    signature: SignaturePad,
    pending_events: Vec<WorkflowEvent>,
}

impl VerificationWorkflow {
    /// Open a new case at the document upload step.
    pub fn new(id: CaseId, caps: Capabilities) -> Self {
        let case = VerificationCase::new(id, caps.clock.now());
        tracing::info!(case = %id, "verification case opened");
        Self {
            case,
            caps,
            lease: None,
            signature: SignaturePad::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn case(&self) -> &VerificationCase {
        &self.case
    }

    pub fn step(&self) -> VerificationStep {
        self.case.step
    }

    pub fn status(&self) -> CaseStatus {
        self.case.status
    }

    pub fn is_approved(&self) -> bool {
        self.case.status == CaseStatus::Approved
    }

    pub fn camera_active(&self) -> bool {
        self.lease.is_some()
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Document ────────────────────────────────────────────────────────

    /// Attach an already-read document blob.
    pub fn attach_document(&mut self, blob: &Blob) -> Result<BlobRef, VerificationError> {
        self.require_step(VerificationStep::DocumentUpload)?;
        if blob.is_empty() {
            return Err(VerificationError::Incomplete {
                step: VerificationStep::DocumentUpload,
                missing: "identity document",
            });
        }
        let r = blob.reference();
        self.case.document_ref = Some(r);
        tracing::info!(case = %self.case.id, document = %r, mime = %blob.mime, "document attached");
        Ok(r)
    }

    /// Read a document through the file provider and attach it.
    pub async fn upload_document(&mut self, input: &FileInput) -> Result<BlobRef, VerificationError> {
        self.require_step(VerificationStep::DocumentUpload)?;
        let blob = self.caps.files.read_file(input).await.map_err(|e| {
            tracing::warn!(case = %self.case.id, file = %input.name, "document read failed: {e}");
            e
        })?;
        self.attach_document(&blob)
    }

    // ── Selfie ──────────────────────────────────────────────────────────

    /// Acquire the camera. Idempotent while a stream is already open.
    ///
    /// A capability error leaves the workflow unchanged; call again to retry.
    pub async fn start_camera(&mut self) -> Result<(), VerificationError> {
        self.require_step(VerificationStep::SelfieCapture)?;
        if self.lease.is_some() {
            return Ok(());
        }
        match CameraLease::acquire(self.caps.camera.clone()).await {
            Ok(lease) => {
                self.lease = Some(lease);
                self.pending_events.push(WorkflowEvent::CameraAcquired {
                    case: self.case.id,
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(case = %self.case.id, "camera unavailable: {e}");
                Err(e.into())
            }
        }
    }

    /// Capture the selfie and release the camera, on success or failure.
    pub fn capture_selfie(&mut self) -> Result<BlobRef, VerificationError> {
        self.require_step(VerificationStep::SelfieCapture)?;
        let lease = self.lease.take().ok_or(VerificationError::CameraNotStarted)?;
        let result = lease.capture_and_release();
        self.pending_events.push(WorkflowEvent::CameraReleased {
            case: self.case.id,
        });
        match result {
            Ok(image) if !image.is_empty() => {
                let r = image.reference();
                self.case.selfie_ref = Some(r);
                tracing::info!(case = %self.case.id, selfie = %r, "selfie captured");
                Ok(r)
            }
            Ok(_) => Err(VerificationError::Incomplete {
                step: VerificationStep::SelfieCapture,
                missing: "selfie image",
            }),
            Err(e) => {
                tracing::warn!(case = %self.case.id, "selfie capture failed: {e}");
                Err(e.into())
            }
        }
    }

    /// Discard the captured selfie so a new one can be taken.
    pub fn retake_selfie(&mut self) -> Result<(), VerificationError> {
        self.require_step(VerificationStep::SelfieCapture)?;
        self.case.selfie_ref = None;
        Ok(())
    }

    // ── Signature & details ─────────────────────────────────────────────

    pub fn signature_pad(&self) -> &SignaturePad {
        &self.signature
    }

    pub fn signature_pad_mut(&mut self) -> Result<&mut SignaturePad, VerificationError> {
        self.require_step(VerificationStep::Signature)?;
        Ok(&mut self.signature)
    }

    pub fn set_details(
        &mut self,
        full_name: &str,
        date_of_birth: &str,
    ) -> Result<(), VerificationError> {
        self.require_step(VerificationStep::Details)?;
        self.case.full_name = full_name.trim().to_string();
        self.case.date_of_birth = date_of_birth.trim().to_string();
        Ok(())
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Advance to the next step if the current step's artifact is present.
    ///
    /// On refusal nothing changes.
    pub fn next(&mut self) -> Result<VerificationStep, VerificationError> {
        let from = self.case.step;
        let to = from.following().ok_or(VerificationError::WrongStep(from))?;

        let missing = match from {
            VerificationStep::DocumentUpload if self.case.document_ref.is_none() => {
                Some("identity document")
            }
            VerificationStep::SelfieCapture if self.case.selfie_ref.is_none() => {
                Some("selfie image")
            }
            VerificationStep::Signature if self.signature.is_empty() => Some("signature"),
            VerificationStep::Details if !self.case.has_details() => {
                Some("full name and date of birth")
            }
            _ => None,
        };
        if let Some(missing) = missing {
            tracing::warn!(case = %self.case.id, step = ?from, missing, "next() refused");
            return Err(VerificationError::Incomplete {
                step: from,
                missing,
            });
        }

        if from == VerificationStep::Signature {
            let blob = self.signature.to_blob()?;
            self.case.signature_ref = Some(blob.reference());
        }

        self.leave_selfie_step();
        self.move_to(to);
        Ok(to)
    }

    /// Go back one data step. Collected artifacts are kept.
    pub fn back(&mut self) -> Result<VerificationStep, VerificationError> {
        let from = self.case.step;
        let to = from.preceding().ok_or(VerificationError::WrongStep(from))?;
        self.leave_selfie_step();
        self.move_to(to);
        Ok(to)
    }

    // ── Review ──────────────────────────────────────────────────────────

    /// Send the case for review and apply the decision.
    ///
    /// A rejection is a decision, returned as `Ok`; the case moves to
    /// Rejected and can be retried. A reviewer failure returns `Err` and puts
    /// the case back to pending at Review.
    pub async fn submit(&mut self) -> Result<ReviewDecision, VerificationError> {
        self.require_step(VerificationStep::Review)?;
        if let Some((step, missing)) = self.case.first_missing() {
            return Err(VerificationError::Incomplete { step, missing });
        }

        self.case.attempts += 1;
        self.pending_events.push(WorkflowEvent::Submitted {
            case: self.case.id,
            attempt: self.case.attempts,
        });
        tracing::info!(
            case = %self.case.id,
            attempt = self.case.attempts,
            reviewer = self.caps.reviewer.name(),
            "case submitted for review"
        );

        // Only the reviewer sees Processing. The stored case stays Pending
        // until a result arrives.
        let mut in_review = self.case.clone();
        in_review.status = CaseStatus::Processing;
        let reviewer = self.caps.reviewer.clone();
        match reviewer.review(&in_review).await {
            Ok(ReviewDecision::Approved) => {
                self.case.status = CaseStatus::Approved;
                self.case.rejection_reason = None;
                self.case.decided_at = Some(self.caps.clock.now());
                self.move_to(VerificationStep::Approved);
                self.pending_events.push(WorkflowEvent::Approved {
                    case: self.case.id,
                });
                tracing::info!(case = %self.case.id, "verification approved");
                Ok(ReviewDecision::Approved)
            }
            Ok(ReviewDecision::Rejected { reason }) => {
                self.case.status = CaseStatus::Rejected;
                self.case.rejection_reason = Some(reason.clone());
                self.case.decided_at = Some(self.caps.clock.now());
                self.move_to(VerificationStep::Rejected);
                self.pending_events.push(WorkflowEvent::Rejected {
                    case: self.case.id,
                    reason: reason.clone(),
                });
                tracing::warn!(case = %self.case.id, %reason, "verification rejected");
                Ok(ReviewDecision::Rejected { reason })
            }
            Err(e) => {
                self.pending_events.push(WorkflowEvent::ReviewFailed {
                    case: self.case.id,
                    error: e.to_string(),
                });
                tracing::warn!(case = %self.case.id, "review failed: {e}");
                Err(VerificationError::Submission {
                    case: self.case.id,
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Reopen a rejected case at Review so it can be resubmitted.
    pub fn retry(&mut self) -> Result<(), VerificationError> {
        self.require_step(VerificationStep::Rejected)?;
        self.case.status = CaseStatus::Pending;
        self.case.decided_at = None;
        self.move_to(VerificationStep::Review);
        Ok(())
    }

    /// Stop the workflow, releasing the camera, and hand back the case.
    pub fn abandon(mut self) -> (VerificationCase, Vec<WorkflowEvent>) {
        self.leave_selfie_step();
        let step = self.case.step;
        self.pending_events.push(WorkflowEvent::Abandoned {
            case: self.case.id,
            step,
        });
        tracing::info!(case = %self.case.id, ?step, "verification abandoned");
        let events = std::mem::take(&mut self.pending_events);
        (self.case.clone(), events)
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn require_step(&self, step: VerificationStep) -> Result<(), VerificationError> {
        if self.case.step != step {
            return Err(VerificationError::WrongStep(self.case.step));
        }
        Ok(())
    }

    fn leave_selfie_step(&mut self) {
        if self.lease.take().is_some() {
            self.pending_events.push(WorkflowEvent::CameraReleased {
                case: self.case.id,
            });
        }
    }

    fn move_to(&mut self, to: VerificationStep) {
        let from = self.case.step;
        self.case.step = to;
        self.pending_events.push(WorkflowEvent::StepChanged {
            case: self.case.id,
            from,
            to,
        });
        tracing::info!(case = %self.case.id, ?from, ?to, "step changed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::StreamHandle;
    use crate::error::{CapabilityError, FileError, ReviewerError};
    use crate::signature::Point;
    use async_trait::async_trait;
    use grow_types::Timestamp;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestCamera {
        acquired: AtomicUsize,
        released: AtomicUsize,
        acquire_errors: Mutex<VecDeque<CapabilityError>>,
        capture_error: Mutex<Option<CapabilityError>>,
    }

    #[async_trait]
    impl CameraProvider for TestCamera {
        async fn acquire(&self) -> Result<StreamHandle, CapabilityError> {
            if let Some(e) = self.acquire_errors.lock().unwrap().pop_front() {
                return Err(e);
            }
            let n = self.acquired.fetch_add(1, Ordering::SeqCst);
            Ok(StreamHandle(n as u64))
        }

        fn capture(&self, stream: &StreamHandle) -> Result<Blob, CapabilityError> {
            if let Some(e) = self.capture_error.lock().unwrap().take() {
                return Err(e);
            }
            Ok(Blob::new("image/jpeg", vec![0xff, 0xd8, stream.0 as u8]))
        }

        fn release(&self, _stream: StreamHandle) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct TestFiles;

    #[async_trait]
    impl FileProvider for TestFiles {
        async fn read_file(&self, input: &FileInput) -> Result<Blob, FileError> {
            match input.locator.as_str() {
                "missing" => Err(FileError::NotFound(input.name.clone())),
                other => Ok(Blob::new("image/png", other.as_bytes().to_vec())),
            }
        }
    }

    #[derive(Default)]
    struct TestReviewer {
        decisions: Mutex<VecDeque<Result<ReviewDecision, ReviewerError>>>,
    }

    #[async_trait]
    impl VerificationReviewer for TestReviewer {
        fn name(&self) -> &str {
            "test"
        }

        async fn review(&self, _case: &VerificationCase) -> Result<ReviewDecision, ReviewerError> {
            self.decisions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(ReviewDecision::Approved))
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            Timestamp::from_secs(1_700_000_000)
        }
    }

    fn setup() -> (VerificationWorkflow, Arc<TestCamera>, Arc<TestReviewer>) {
        let camera = Arc::new(TestCamera::default());
        let reviewer = Arc::new(TestReviewer::default());
        let caps = Capabilities {
            camera: camera.clone(),
            files: Arc::new(TestFiles),
            reviewer: reviewer.clone(),
            clock: Arc::new(FixedClock),
        };
        (VerificationWorkflow::new(CaseId::new(1), caps), camera, reviewer)
    }

    /// Helper: walk a workflow up to the Review step.
    async fn to_review(wf: &mut VerificationWorkflow) {
        wf.upload_document(&FileInput::new("id.png", "passport-bytes"))
            .await
            .unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        wf.capture_selfie().unwrap();
        wf.next().unwrap();
        let pad = wf.signature_pad_mut().unwrap();
        pad.begin_stroke(Point { x: 0.0, y: 0.0 });
        pad.line_to(Point { x: 3.0, y: 4.0 });
        wf.next().unwrap();
        wf.set_details("Asha Rao", "1994-02-11").unwrap();
        wf.next().unwrap();
        assert_eq!(wf.step(), VerificationStep::Review);
    }

    // ── Guards ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn next_without_artifact_leaves_state_unchanged() {
        let (mut wf, _, _) = setup();
        let before = wf.case().clone();
        let err = wf.next().unwrap_err();
        assert!(matches!(
            err,
            VerificationError::Incomplete {
                step: VerificationStep::DocumentUpload,
                ..
            }
        ));
        assert_eq!(wf.step(), before.step);
        assert_eq!(wf.status(), before.status);
        assert!(wf.drain_events().is_empty());
    }

    #[tokio::test]
    async fn empty_document_is_refused() {
        let (mut wf, _, _) = setup();
        let err = wf.attach_document(&Blob::new("image/png", vec![])).unwrap_err();
        assert!(matches!(err, VerificationError::Incomplete { .. }));
        assert!(wf.case().document_ref.is_none());
    }

    #[tokio::test]
    async fn missing_file_is_reported_and_recoverable() {
        let (mut wf, _, _) = setup();
        let err = wf
            .upload_document(&FileInput::new("id.png", "missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::File(FileError::NotFound(_))));
        wf.upload_document(&FileInput::new("id.png", "ok")).await.unwrap();
        assert!(wf.next().is_ok());
    }

    #[tokio::test]
    async fn empty_signature_blocks_next() {
        let (mut wf, _, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        wf.capture_selfie().unwrap();
        wf.next().unwrap();
        assert!(wf.next().is_err());
        assert_eq!(wf.step(), VerificationStep::Signature);
        assert!(wf.case().signature_ref.is_none());
    }

    #[tokio::test]
    async fn blank_details_block_next() {
        let (mut wf, _, _) = setup();
        to_review(&mut wf).await;
        wf.back().unwrap();
        wf.set_details("  ", "1994-02-11").unwrap();
        assert!(wf.next().is_err());
        assert_eq!(wf.step(), VerificationStep::Details);
    }

    #[tokio::test]
    async fn step_specific_operations_reject_other_steps() {
        let (mut wf, _, _) = setup();
        assert!(matches!(
            wf.set_details("A", "B"),
            Err(VerificationError::WrongStep(VerificationStep::DocumentUpload))
        ));
        assert!(wf.start_camera().await.is_err());
        assert!(wf.back().is_err());
    }

    // ── Camera lifecycle ────────────────────────────────────────────────

    #[tokio::test]
    async fn camera_released_after_capture() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        wf.start_camera().await.unwrap();
        assert_eq!(camera.acquired.load(Ordering::SeqCst), 1);
        wf.capture_selfie().unwrap();
        assert!(!wf.camera_active());
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn camera_released_on_back_navigation() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        wf.back().unwrap();
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
        assert!(wf
            .drain_events()
            .contains(&WorkflowEvent::CameraReleased { case: CaseId::new(1) }));
    }

    #[tokio::test]
    async fn camera_released_on_capture_error_and_can_retry() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        *camera.capture_error.lock().unwrap() = Some(CapabilityError::CaptureFailed("x".into()));
        assert!(wf.capture_selfie().is_err());
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
        assert!(wf.case().selfie_ref.is_none());

        wf.start_camera().await.unwrap();
        wf.capture_selfie().unwrap();
        assert_eq!(camera.released.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn denied_camera_is_recoverable() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        camera
            .acquire_errors
            .lock()
            .unwrap()
            .push_back(CapabilityError::Denied);
        let err = wf.start_camera().await.unwrap_err();
        assert!(matches!(err, VerificationError::Capability(CapabilityError::Denied)));
        assert_eq!(wf.step(), VerificationStep::SelfieCapture);
        assert!(!wf.camera_active());
        wf.start_camera().await.unwrap();
        assert!(wf.camera_active());
    }

    #[tokio::test]
    async fn capture_without_camera_fails() {
        let (mut wf, _, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        assert!(matches!(
            wf.capture_selfie(),
            Err(VerificationError::CameraNotStarted)
        ));
    }

    #[tokio::test]
    async fn abandon_releases_camera() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        let (case, events) = wf.abandon();
        assert_eq!(case.step, VerificationStep::SelfieCapture);
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
        assert!(matches!(events.last(), Some(WorkflowEvent::Abandoned { .. })));
    }

    #[tokio::test]
    async fn dropping_workflow_releases_camera() {
        let (mut wf, camera, _) = setup();
        wf.attach_document(&Blob::new("image/png", vec![1])).unwrap();
        wf.next().unwrap();
        wf.start_camera().await.unwrap();
        drop(wf);
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
    }

    // ── Review ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn approved_submission_is_terminal() {
        let (mut wf, _, _) = setup();
        to_review(&mut wf).await;
        let decision = wf.submit().await.unwrap();
        assert_eq!(decision, ReviewDecision::Approved);
        assert!(wf.is_approved());
        assert_eq!(wf.step(), VerificationStep::Approved);
        assert!(wf.case().decided_at.is_some());
        assert!(wf.next().is_err());
        assert!(wf.back().is_err());
        assert!(wf.retry().is_err());
        assert!(wf
            .drain_events()
            .contains(&WorkflowEvent::Approved { case: CaseId::new(1) }));
    }

    #[tokio::test]
    async fn rejected_submission_can_be_retried() {
        let (mut wf, _, reviewer) = setup();
        to_review(&mut wf).await;
        reviewer
            .decisions
            .lock()
            .unwrap()
            .push_back(Ok(ReviewDecision::Rejected {
                reason: "document blurry".into(),
            }));

        let decision = wf.submit().await.unwrap();
        assert!(matches!(decision, ReviewDecision::Rejected { .. }));
        assert_eq!(wf.status(), CaseStatus::Rejected);
        assert_eq!(wf.case().rejection_reason.as_deref(), Some("document blurry"));

        wf.retry().unwrap();
        assert_eq!(wf.step(), VerificationStep::Review);
        assert_eq!(wf.status(), CaseStatus::Pending);

        wf.submit().await.unwrap();
        assert!(wf.is_approved());
        assert_eq!(wf.case().attempts, 2);
        assert_eq!(wf.case().rejection_reason, None);
    }

    #[tokio::test]
    async fn reviewer_failure_returns_case_to_pending() {
        let (mut wf, _, reviewer) = setup();
        to_review(&mut wf).await;
        reviewer
            .decisions
            .lock()
            .unwrap()
            .push_back(Err(ReviewerError::Timeout));

        let err = wf.submit().await.unwrap_err();
        assert!(matches!(err, VerificationError::Submission { .. }));
        assert_eq!(wf.status(), CaseStatus::Pending);
        assert_eq!(wf.step(), VerificationStep::Review);

        wf.submit().await.unwrap();
        assert!(wf.is_approved());
    }

    /// Records what it was shown, then never answers.
    #[derive(Default)]
    struct StalledReviewer {
        seen: Mutex<Option<CaseStatus>>,
    }

    #[async_trait]
    impl VerificationReviewer for StalledReviewer {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn review(&self, case: &VerificationCase) -> Result<ReviewDecision, ReviewerError> {
            *self.seen.lock().unwrap() = Some(case.status);
            std::future::pending::<()>().await;
            Ok(ReviewDecision::Approved)
        }
    }

    #[tokio::test]
    async fn cancelled_review_leaves_case_pending() {
        let reviewer = Arc::new(StalledReviewer::default());
        let caps = Capabilities {
            camera: Arc::new(TestCamera::default()),
            files: Arc::new(TestFiles),
            reviewer: reviewer.clone(),
            clock: Arc::new(FixedClock),
        };
        let mut wf = VerificationWorkflow::new(CaseId::new(2), caps);
        to_review(&mut wf).await;

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), wf.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(*reviewer.seen.lock().unwrap(), Some(CaseStatus::Processing));
        assert_eq!(wf.status(), CaseStatus::Pending);
        assert_eq!(wf.step(), VerificationStep::Review);
        assert!(wf.case().decided_at.is_none());
    }

    #[tokio::test]
    async fn submit_outside_review_is_refused() {
        let (mut wf, _, _) = setup();
        assert!(matches!(
            wf.submit().await,
            Err(VerificationError::WrongStep(VerificationStep::DocumentUpload))
        ));
        assert_eq!(wf.case().attempts, 0);
    }

    #[tokio::test]
    async fn back_keeps_collected_artifacts() {
        let (mut wf, _, _) = setup();
        to_review(&mut wf).await;
        let selfie = wf.case().selfie_ref;
        wf.back().unwrap();
        wf.back().unwrap();
        wf.back().unwrap();
        assert_eq!(wf.step(), VerificationStep::SelfieCapture);
        assert_eq!(wf.case().selfie_ref, selfie);
        assert!(wf.next().is_ok());
    }
}
