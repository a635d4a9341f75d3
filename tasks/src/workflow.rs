//! Task workflow: catalog browsing, proof submission, review resolution and retry.

use grow_ledger::CoinLedger;
use grow_types::{Category, Coins, Platform, SubmissionId, TaskId, Timestamp};
use std::collections::HashMap;

use crate::error::TaskError;
use crate::progress::WatchProgress;
use crate::source::TaskSource;
use crate::submission::{Proof, ReviewOutcome, Submission, SubmissionOutcome};
use crate::task::{Task, TaskDefinition, TaskStatus};

/// Counts for the task overview cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub available: usize,
    pub submitted: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Sum of rewards of approved tasks.
    pub earned: Coins,
}

pub struct TaskWorkflow {
    /// Catalog in source order.
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
    submissions: Vec<Submission>,
    progress: HashMap<TaskId, WatchProgress>,
    selected: Option<TaskId>,
    next_submission: SubmissionId,
}

impl TaskWorkflow {
    /// Load the catalog from a task source.
    pub fn new(source: &dyn TaskSource) -> Result<Self, TaskError> {
        let defs = source.load()?;
        tracing::info!(source = source.name(), tasks = defs.len(), "task catalog loaded");
        Self::from_definitions(defs)
    }

    pub fn from_definitions(defs: Vec<TaskDefinition>) -> Result<Self, TaskError> {
        let mut tasks = Vec::with_capacity(defs.len());
        let mut index = HashMap::with_capacity(defs.len());
        for def in defs {
            if index.insert(def.id, tasks.len()).is_some() {
                return Err(TaskError::DuplicateTask(def.id));
            }
            tasks.push(Task::new(def));
        }
        Ok(Self {
            tasks,
            index,
            submissions: Vec::new(),
            progress: HashMap::new(),
            selected: None,
            next_submission: SubmissionId::new(1),
        })
    }

    // ── Catalog ─────────────────────────────────────────────────────────

    /// Tasks matching the filters, in catalog order. `None` means "all".
    pub fn list_tasks(&self, category: Option<Category>, platform: Option<Platform>) -> Vec<&Task> {
        let found: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| category.map_or(true, |c| t.def.category == c))
            .filter(|t| platform.map_or(true, |p| t.def.platform == p))
            .collect();
        tracing::debug!(?category, ?platform, found = found.len(), "tasks listed");
        found
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    /// Open a task. Approved tasks cannot be opened again.
    pub fn select_task(&mut self, id: TaskId) -> Result<&Task, TaskError> {
        let i = self.open_index(id)?;
        if self.tasks[i].is_watch() {
            let duration = self.tasks[i].def.duration_secs;
            self.progress
                .entry(id)
                .or_insert_with(|| WatchProgress::new(duration));
        }
        self.selected = Some(id);
        tracing::debug!(task = %id, "task selected");
        Ok(&self.tasks[i])
    }

    pub fn selected(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.task(id))
    }

    // ── Watch progress ──────────────────────────────────────────────────

    /// Record a playback percentage reported by the player.
    pub fn record_progress(&mut self, id: TaskId, percent: u8) -> Result<u8, TaskError> {
        let progress = self.watch_progress_mut(id)?;
        let now = progress.record_percent(percent);
        tracing::debug!(task = %id, percent = now, "watch progress");
        Ok(now)
    }

    /// Add watched seconds; needs the task's video duration.
    pub fn advance_playback(&mut self, id: TaskId, secs: u32) -> Result<u8, TaskError> {
        let progress = self.watch_progress_mut(id)?;
        let now = progress.advance_secs(secs).ok_or(TaskError::NoDuration(id))?;
        tracing::debug!(task = %id, percent = now, "watch progress");
        Ok(now)
    }

    pub fn progress(&self, id: TaskId) -> Option<u8> {
        self.progress.get(&id).map(|p| p.percent())
    }

    // ── Submission lifecycle ────────────────────────────────────────────

    /// Create a pending submission. The ledger is not touched until review.
    pub fn submit_proof(
        &mut self,
        id: TaskId,
        proof: Proof,
        now: Timestamp,
    ) -> Result<&Submission, TaskError> {
        let i = self.open_index(id)?;
        let status = self.tasks[i].status;
        if status != TaskStatus::Available {
            return Err(TaskError::NotAvailable { task: id, status });
        }
        if self.tasks[i].is_watch() {
            let percent = self.progress(id).unwrap_or(0);
            if percent < 100 {
                return Err(TaskError::WatchIncomplete { task: id, percent });
            }
        }
        proof.validate()?;

        let previous = self.submissions.iter().rev().find(|s| s.task_id == id);
        let attempt = previous.map_or(1, |s| s.attempt + 1);
        let retry_of = previous
            .filter(|s| s.outcome == SubmissionOutcome::Rejected)
            .map(|s| s.id);

        let submission = Submission {
            id: self.next_submission,
            task_id: id,
            proof,
            submitted_at: now,
            outcome: SubmissionOutcome::Pending,
            rejection_reason: None,
            attempt,
            retry_of,
            resolved_at: None,
        };
        self.next_submission = self.next_submission.next();
        self.tasks[i].status = TaskStatus::Submitted;
        tracing::info!(task = %id, submission = %submission.id, attempt, "proof submitted");
        self.submissions.push(submission);
        Ok(&self.submissions[self.submissions.len() - 1])
    }

    /// Apply a review verdict to the task's pending submission.
    ///
    /// Approval credits the ledger and makes the task terminal. A second
    /// approval of the same task is refused and leaves the ledger alone.
    pub fn resolve_submission(
        &mut self,
        id: TaskId,
        outcome: ReviewOutcome,
        ledger: &mut CoinLedger,
        now: Timestamp,
    ) -> Result<&Submission, TaskError> {
        let i = *self.index.get(&id).ok_or(TaskError::NotFound(id))?;
        match self.tasks[i].status {
            TaskStatus::Approved => return Err(TaskError::AlreadyCredited(id)),
            TaskStatus::Submitted => {}
            TaskStatus::Available | TaskStatus::Rejected => {
                return Err(TaskError::NoPendingSubmission(id))
            }
        }
        let s = self
            .submissions
            .iter()
            .rposition(|s| s.task_id == id && s.is_pending())
            .ok_or(TaskError::NoPendingSubmission(id))?;

        match outcome {
            ReviewOutcome::Approved => {
                ledger.credit_task(id, self.tasks[i].reward(), now)?;
                self.tasks[i].status = TaskStatus::Approved;
                self.tasks[i].rejection_reason = None;
                self.submissions[s].outcome = SubmissionOutcome::Approved;
                tracing::info!(task = %id, reward = %self.tasks[i].reward(), "submission approved");
            }
            ReviewOutcome::Rejected { reason } => {
                self.tasks[i].status = TaskStatus::Rejected;
                self.tasks[i].rejection_reason = Some(reason.clone());
                self.submissions[s].outcome = SubmissionOutcome::Rejected;
                tracing::warn!(task = %id, %reason, "submission rejected");
                self.submissions[s].rejection_reason = Some(reason);
            }
        }
        self.submissions[s].resolved_at = Some(now);
        Ok(&self.submissions[s])
    }

    /// Reopen a rejected task for a fresh submission.
    pub fn retry(&mut self, id: TaskId) -> Result<&Task, TaskError> {
        let i = *self.index.get(&id).ok_or(TaskError::NotFound(id))?;
        if self.tasks[i].status != TaskStatus::Rejected {
            return Err(TaskError::NotRejected(id));
        }
        self.tasks[i].status = TaskStatus::Available;
        self.tasks[i].rejection_reason = None;
        tracing::info!(task = %id, "task reopened for retry");
        Ok(&self.tasks[i])
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Submissions awaiting review, oldest first.
    pub fn pending_submissions(&self) -> Vec<&Submission> {
        self.submissions.iter().filter(|s| s.is_pending()).collect()
    }

    /// All attempts at a task, oldest first.
    pub fn submissions_for(&self, id: TaskId) -> Vec<&Submission> {
        self.submissions.iter().filter(|s| s.task_id == id).collect()
    }

    pub fn summary(&self) -> TaskSummary {
        let mut summary = TaskSummary::default();
        for task in &self.tasks {
            match task.status {
                TaskStatus::Available => summary.available += 1,
                TaskStatus::Submitted => summary.submitted += 1,
                TaskStatus::Approved => {
                    summary.approved += 1;
                    summary.earned = summary.earned + task.reward();
                }
                TaskStatus::Rejected => summary.rejected += 1,
            }
        }
        summary
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Index of a task that exists and is not yet approved.
    fn open_index(&self, id: TaskId) -> Result<usize, TaskError> {
        match self.index.get(&id) {
            Some(&i) if self.tasks[i].status != TaskStatus::Approved => Ok(i),
            _ => Err(TaskError::NotFound(id)),
        }
    }

    fn watch_progress_mut(&mut self, id: TaskId) -> Result<&mut WatchProgress, TaskError> {
        let i = self.open_index(id)?;
        if !self.tasks[i].is_watch() {
            return Err(TaskError::NotWatchTask(id));
        }
        let duration = self.tasks[i].def.duration_secs;
        Ok(self
            .progress
            .entry(id)
            .or_insert_with(|| WatchProgress::new(duration)))
    }
}
