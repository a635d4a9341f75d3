//! Reward tasks: browse the catalog, submit proof, get reviewed, get credited.
//!
//! The catalog comes from an injected [`TaskSource`]. Each task is credited to
//! the session ledger at most once; a rejected submission can be retried with
//! a fresh submission for the same task. Watch tasks gate proof submission on
//! playback progress reaching 100%.

pub mod error;
pub mod progress;
pub mod source;
pub mod submission;
pub mod task;
pub mod workflow;

pub use error::TaskError;
pub use progress::WatchProgress;
pub use source::{JsonTaskSource, StaticTaskSource, TaskSource};
pub use submission::{Proof, ReviewOutcome, Submission, SubmissionOutcome};
pub use task::{Task, TaskDefinition, TaskStatus};
pub use workflow::{TaskSummary, TaskWorkflow};
