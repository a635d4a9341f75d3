//! The per-user session.
//!
//! Owns the verification workflow, the task workflow and the coin ledger, and
//! keeps tasks and the wallet locked until verification is approved.

use grow_ledger::{
    rank, CoinLedger, Exchange, LeaderboardEntry, PayoutGateway, PayoutRequest, RankedEntry,
};
use grow_tasks::{
    Proof, ReviewOutcome, Submission, Task, TaskError, TaskSource, TaskStatus, TaskSummary,
    TaskWorkflow,
};
use grow_types::{
    Blob, BlobRef, CaseId, Category, Clock, Coins, LinkOpener, NotificationSink, NotifyLevel,
    Platform, TaskId, WorkflowParams,
};
use grow_verification::{
    Capabilities, FileInput, ReviewDecision, SignaturePad, VerificationCase, VerificationError,
    VerificationStep, VerificationWorkflow, WorkflowEvent,
};
use std::sync::Arc;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::view::DashboardView;

/// Everything the session talks to outside itself.
#[derive(Clone)]
pub struct SessionDeps {
    pub capabilities: Capabilities,
    pub notifier: Arc<dyn NotificationSink>,
    pub links: Arc<dyn LinkOpener>,
    pub payouts: Arc<dyn PayoutGateway>,
    pub clock: Arc<dyn Clock>,
}

pub struct Session {
    user: String,
    params: WorkflowParams,
    bank_link_url: String,
    verification: VerificationWorkflow,
    tasks: TaskWorkflow,
    ledger: CoinLedger,
    view: DashboardView,
    notifier: Arc<dyn NotificationSink>,
    links: Arc<dyn LinkOpener>,
    payouts: Arc<dyn PayoutGateway>,
    clock: Arc<dyn Clock>,
}

/// Turn a workflow event into a host notification, if it warrants one.
fn notify_event(notifier: &dyn NotificationSink, event: WorkflowEvent) {
    match event {
        WorkflowEvent::Submitted { attempt, .. } => notifier.notify(
            &format!("Verification submitted for review (attempt {attempt})"),
            NotifyLevel::Info,
        ),
        WorkflowEvent::Approved { .. } => notifier.notify(
            "Identity verified. Tasks and wallet are now unlocked.",
            NotifyLevel::Success,
        ),
        WorkflowEvent::Rejected { reason, .. } => notifier.notify(
            &format!("Verification rejected: {reason}"),
            NotifyLevel::Error,
        ),
        WorkflowEvent::ReviewFailed { .. } => notifier.notify(
            "Verification service is unavailable, please submit again",
            NotifyLevel::Warning,
        ),
        other => tracing::debug!(event = ?other, "workflow event"),
    }
}

impl Session {
    pub fn new(
        user: impl Into<String>,
        case: CaseId,
        config: &SessionConfig,
        source: &dyn TaskSource,
        deps: SessionDeps,
    ) -> Result<Self, SessionError> {
        let user = user.into();
        let params = config.params()?;
        let tasks = TaskWorkflow::new(source)?;
        let verification = VerificationWorkflow::new(case, deps.capabilities);
        tracing::info!(%user, %case, "session opened");
        Ok(Self {
            user,
            params,
            bank_link_url: config.bank_link_url.clone(),
            verification,
            tasks,
            ledger: CoinLedger::new(),
            view: DashboardView::Overview,
            notifier: deps.notifier,
            links: deps.links,
            payouts: deps.payouts,
            clock: deps.clock,
        })
    }

    /// Start from existing balances instead of an empty ledger.
    pub fn with_ledger(mut self, ledger: CoinLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn params(&self) -> &WorkflowParams {
        &self.params
    }

    pub fn verification(&self) -> &VerificationWorkflow {
        &self.verification
    }

    pub fn tasks(&self) -> &TaskWorkflow {
        &self.tasks
    }

    pub fn ledger(&self) -> &CoinLedger {
        &self.ledger
    }

    pub fn view(&self) -> DashboardView {
        self.view
    }

    /// True once verification has been approved.
    pub fn is_unlocked(&self) -> bool {
        self.verification.is_approved()
    }

    fn require_unlocked(&self, view: DashboardView) -> Result<(), SessionError> {
        if view.requires_verification() && !self.is_unlocked() {
            tracing::warn!(user = %self.user, %view, "view locked until verification");
            return Err(SessionError::Locked(view));
        }
        Ok(())
    }

    /// Switch the dashboard to `view`. Gated views stay shut until approval.
    pub fn open_view(&mut self, view: DashboardView) -> Result<DashboardView, SessionError> {
        self.require_unlocked(view)?;
        if self.view != view {
            tracing::info!(user = %self.user, from = %self.view, to = %view, "view changed");
            self.view = view;
        }
        Ok(view)
    }

    fn flush_events(&mut self) {
        for event in self.verification.drain_events() {
            notify_event(self.notifier.as_ref(), event);
        }
    }

    // ── Verification ────────────────────────────────────────────────────

    pub fn attach_document(&mut self, blob: &Blob) -> Result<BlobRef, SessionError> {
        Ok(self.verification.attach_document(blob)?)
    }

    pub async fn upload_document(&mut self, input: &FileInput) -> Result<BlobRef, SessionError> {
        let result = self.verification.upload_document(input).await;
        if let Err(e) = &result {
            self.notifier
                .notify(&format!("Could not read {}: {e}", input.name), NotifyLevel::Warning);
        }
        Ok(result?)
    }

    /// Acquire the camera for the selfie step; call again after a refusal.
    pub async fn start_camera(&mut self) -> Result<(), SessionError> {
        let result = self.verification.start_camera().await;
        self.flush_events();
        if let Err(VerificationError::Capability(e)) = &result {
            self.notifier.notify(
                &format!("Camera unavailable ({e}). Allow access and try again."),
                NotifyLevel::Warning,
            );
        }
        Ok(result?)
    }

    pub fn capture_selfie(&mut self) -> Result<BlobRef, SessionError> {
        let result = self.verification.capture_selfie();
        self.flush_events();
        Ok(result?)
    }

    pub fn retake_selfie(&mut self) -> Result<(), SessionError> {
        Ok(self.verification.retake_selfie()?)
    }

    pub fn signature_pad_mut(&mut self) -> Result<&mut SignaturePad, SessionError> {
        Ok(self.verification.signature_pad_mut()?)
    }

    pub fn set_details(&mut self, full_name: &str, date_of_birth: &str) -> Result<(), SessionError> {
        Ok(self.verification.set_details(full_name, date_of_birth)?)
    }

    /// Advance the verification wizard.
    ///
    /// Entering the selfie step opens the camera. If the camera is refused
    /// the step change still stands; the host is notified and can retry
    /// with [`Session::start_camera`].
    pub async fn next_step(&mut self) -> Result<VerificationStep, SessionError> {
        let step = self.verification.next();
        self.flush_events();
        let step = step?;
        self.enter_step(step).await;
        Ok(step)
    }

    pub async fn previous_step(&mut self) -> Result<VerificationStep, SessionError> {
        let step = self.verification.back();
        self.flush_events();
        let step = step?;
        self.enter_step(step).await;
        Ok(step)
    }

    async fn enter_step(&mut self, step: VerificationStep) {
        if step == VerificationStep::SelfieCapture && self.verification.case().selfie_ref.is_none()
        {
            if let Err(e) = self.start_camera().await {
                tracing::debug!(user = %self.user, "camera not started on selfie step: {e}");
            }
        }
    }

    /// Send the case for review. On approval tasks and the wallet unlock.
    pub async fn submit_verification(&mut self) -> Result<ReviewDecision, SessionError> {
        let decision = self.verification.submit().await;
        self.flush_events();
        let decision = decision?;
        if decision == ReviewDecision::Approved {
            tracing::info!(user = %self.user, "session unlocked");
        }
        Ok(decision)
    }

    pub fn retry_verification(&mut self) -> Result<(), SessionError> {
        let result = self.verification.retry();
        self.flush_events();
        Ok(result?)
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    pub fn list_tasks(
        &self,
        category: Option<Category>,
        platform: Option<Platform>,
    ) -> Result<Vec<&Task>, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        Ok(self.tasks.list_tasks(category, platform))
    }

    pub fn select_task(&mut self, id: TaskId) -> Result<&Task, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        Ok(self.tasks.select_task(id)?)
    }

    /// Open the task's platform page outside the app.
    pub fn open_task_link(&mut self, id: TaskId) -> Result<(), SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        let url = match self.tasks.task(id) {
            Some(task) if task.status != TaskStatus::Approved => task.def.url.clone(),
            _ => return Err(TaskError::NotFound(id).into()),
        };
        self.links.open_external(&url);
        Ok(())
    }

    pub fn record_watch_progress(&mut self, id: TaskId, percent: u8) -> Result<u8, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        Ok(self.tasks.record_progress(id, percent)?)
    }

    pub fn advance_playback(&mut self, id: TaskId, secs: u32) -> Result<u8, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        Ok(self.tasks.advance_playback(id, secs)?)
    }

    pub fn submit_proof(&mut self, id: TaskId, proof: Proof) -> Result<Submission, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        let now = self.clock.now();
        let submission = self.tasks.submit_proof(id, proof, now)?.clone();
        self.notifier.notify(
            &format!("Proof for {id} submitted, awaiting review"),
            NotifyLevel::Info,
        );
        Ok(submission)
    }

    pub fn retry_task(&mut self, id: TaskId) -> Result<&Task, SessionError> {
        self.require_unlocked(DashboardView::Tasks)?;
        Ok(self.tasks.retry(id)?)
    }

    pub fn task_summary(&self) -> TaskSummary {
        self.tasks.summary()
    }

    // ── Admin review desk ───────────────────────────────────────────────

    /// Submissions waiting for a reviewer, oldest first.
    pub fn pending_reviews(&self) -> Vec<&Submission> {
        self.tasks.pending_submissions()
    }

    /// Approve or reject a task's pending submission. Approval credits the
    /// ledger exactly once.
    pub fn resolve_review(
        &mut self,
        id: TaskId,
        outcome: ReviewOutcome,
    ) -> Result<Submission, SessionError> {
        let now = self.clock.now();
        let submission = self
            .tasks
            .resolve_submission(id, outcome.clone(), &mut self.ledger, now)?
            .clone();
        match outcome {
            ReviewOutcome::Approved => {
                let reward = self.tasks.task(id).map(Task::reward).unwrap_or(Coins::ZERO);
                self.notifier.notify(
                    &format!("{id} approved: +{reward} (total {})", self.ledger.total()),
                    NotifyLevel::Success,
                );
            }
            ReviewOutcome::Rejected { reason } => self.notifier.notify(
                &format!("{id} rejected: {reason}. You can retry it."),
                NotifyLevel::Warning,
            ),
        }
        Ok(submission)
    }

    // ── Wallet ──────────────────────────────────────────────────────────

    /// Gross, TDS and net for converting `coins` at the session's rates.
    pub fn quote(&self, coins: Coins) -> Result<Exchange, SessionError> {
        self.require_unlocked(DashboardView::Wallet)?;
        Ok(Exchange::quote(coins, &self.params)?)
    }

    /// Validate a cash-out, hand it to the gateway and flag it pending.
    ///
    /// Balances are not decremented. A refused request changes nothing.
    pub async fn request_payout(&mut self, coins: Coins) -> Result<PayoutRequest, SessionError> {
        self.require_unlocked(DashboardView::Wallet)?;
        let quote = self
            .ledger
            .validate_payout(coins, &self.params)
            .inspect_err(|e| tracing::warn!(user = %self.user, %coins, "payout refused: {e}"))?;

        let now = self.clock.now();
        let request = PayoutRequest {
            coins,
            quote,
            requested_at: now,
        };
        if let Err(e) = self.payouts.submit(&request).await {
            tracing::warn!(user = %self.user, %coins, "payout gateway failed: {e}");
            self.notifier
                .notify(&format!("Payout could not be sent: {e}"), NotifyLevel::Error);
            return Err(e.into());
        }

        let request = self.ledger.request_payout(coins, &self.params, now)?;
        self.notifier.notify(
            &format!(
                "Payout of {} requested for {coins} (TDS {})",
                request.quote.net, request.quote.tds
            ),
            NotifyLevel::Success,
        );
        Ok(request)
    }

    /// Drop the pending payout flag once it has been settled upstream.
    pub fn settle_payout(&mut self) -> Option<PayoutRequest> {
        let settled = self.ledger.clear_payout();
        if let Some(request) = &settled {
            tracing::info!(user = %self.user, coins = %request.coins, "payout settled");
        }
        settled
    }

    pub fn open_bank_link(&self) -> Result<(), SessionError> {
        self.require_unlocked(DashboardView::Wallet)?;
        self.links.open_external(&self.bank_link_url);
        Ok(())
    }

    // ── Leaderboard ─────────────────────────────────────────────────────

    /// Rank this user among `others` by total coins.
    pub fn leaderboard(
        &self,
        others: impl IntoIterator<Item = LeaderboardEntry>,
    ) -> Vec<RankedEntry> {
        let me = LeaderboardEntry {
            name: self.user.clone(),
            coins: self.ledger.total(),
        };
        rank(
            others
                .into_iter()
                .filter(|e| e.name != self.user)
                .chain(std::iter::once(me)),
        )
    }

    /// End the session, releasing any held camera, and return the case.
    pub fn close(self) -> VerificationCase {
        let (case, events) = self.verification.abandon();
        for event in events {
            notify_event(self.notifier.as_ref(), event);
        }
        tracing::info!(user = %self.user, case = %case.id, "session closed");
        case
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grow_nullables::NullNotifier;

    #[test]
    fn approval_and_rejection_events_reach_the_host() {
        let notifier = NullNotifier::new();
        let case = CaseId::new(1);
        notify_event(&notifier, WorkflowEvent::Approved { case });
        notify_event(
            &notifier,
            WorkflowEvent::Rejected {
                case,
                reason: "blurry".into(),
            },
        );
        notify_event(&notifier, WorkflowEvent::CameraReleased { case });

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, NotifyLevel::Success);
        assert_eq!(sent[1], ("Verification rejected: blurry".to_string(), NotifyLevel::Error));
    }
}
