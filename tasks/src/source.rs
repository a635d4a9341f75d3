//! Task sources: where the catalog comes from.

use std::path::{Path, PathBuf};

use crate::error::TaskError;
use crate::task::TaskDefinition;

/// Supplies the task catalog for a session.
pub trait TaskSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn load(&self) -> Result<Vec<TaskDefinition>, TaskError>;
}

/// An in-memory catalog.
#[derive(Clone, Debug, Default)]
pub struct StaticTaskSource {
    tasks: Vec<TaskDefinition>,
}

impl StaticTaskSource {
    pub fn new(tasks: Vec<TaskDefinition>) -> Self {
        Self { tasks }
    }
}

impl TaskSource for StaticTaskSource {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> Result<Vec<TaskDefinition>, TaskError> {
        Ok(self.tasks.clone())
    }
}

/// A catalog read from a JSON fixture file (an array of task definitions).
#[derive(Clone, Debug)]
pub struct JsonTaskSource {
    path: PathBuf,
}

impl JsonTaskSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(json: &str) -> Result<Vec<TaskDefinition>, TaskError> {
        serde_json::from_str(json).map_err(|e| TaskError::Source(e.to_string()))
    }
}

impl TaskSource for JsonTaskSource {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<Vec<TaskDefinition>, TaskError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| TaskError::Source(format!("{}: {e}", self.path.display())))?;
        Self::parse(&content)
    }
}
