//! Fundamental types for the Grow workflows.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identifiers, coin and money amounts, timestamps, blob references, task kinds,
//! the tunable workflow parameters and the host notification/link hooks.

pub mod amount;
pub mod blob;
pub mod error;
pub mod host;
pub mod ids;
pub mod kind;
pub mod params;
pub mod time;

pub use amount::{Coins, Money};
pub use blob::{Blob, BlobRef};
pub use error::TypesError;
pub use host::{LinkOpener, NotificationSink, NotifyLevel};
pub use ids::{CaseId, SubmissionId, TaskId};
pub use kind::{Category, Platform};
pub use params::WorkflowParams;
pub use time::{Clock, SystemClock, Timestamp};
