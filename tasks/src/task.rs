//! Catalog tasks.

use grow_types::{Category, Coins, Platform, TaskId};
use serde::{Deserialize, Serialize};

/// A task as supplied by the task source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: TaskId,
    pub category: Category,
    pub platform: Platform,
    pub title: String,
    /// Coins credited once the proof is approved.
    pub reward: Coins,
    /// What the proof must show, e.g. "Screenshot of the followed profile".
    pub proof_requirement: String,
    /// Link to the account, video or post on the platform.
    pub url: String,
    /// Video length for watch tasks.
    #[serde(default)]
    pub duration_secs: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Available,
    Submitted,
    /// Terminal: reward credited.
    Approved,
    Rejected,
}

/// A task together with its state in this session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub def: TaskDefinition,
    pub status: TaskStatus,
    /// Reason from the latest rejection, until the task is retried.
    pub rejection_reason: Option<String>,
}

impl Task {
    pub fn new(def: TaskDefinition) -> Self {
        Self {
            def,
            status: TaskStatus::Available,
            rejection_reason: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.def.id
    }

    pub fn reward(&self) -> Coins {
        self.def.reward
    }

    pub fn is_watch(&self) -> bool {
        self.def.category == Category::Watch
    }
}
