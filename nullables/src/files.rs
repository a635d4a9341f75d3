//! Nullable file provider: serves blobs from memory.

use async_trait::async_trait;
use grow_types::Blob;
use grow_verification::{FileError, FileInput, FileProvider};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::lock;

#[derive(Default)]
pub struct NullFiles {
    files: Mutex<HashMap<String, Blob>>,
    reads: Mutex<Vec<String>>,
}

impl NullFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `blob` for inputs whose locator is `locator`.
    pub fn insert(&self, locator: impl Into<String>, blob: Blob) {
        lock(&self.files).insert(locator.into(), blob);
    }

    /// Locators read so far, in order.
    pub fn reads(&self) -> Vec<String> {
        lock(&self.reads).clone()
    }
}

#[async_trait]
impl FileProvider for NullFiles {
    async fn read_file(&self, input: &FileInput) -> Result<Blob, FileError> {
        lock(&self.reads).push(input.locator.clone());
        match lock(&self.files).get(&input.locator) {
            Some(blob) if blob.is_empty() => Err(FileError::Empty(input.name.clone())),
            Some(blob) => Ok(blob.clone()),
            None => Err(FileError::NotFound(input.name.clone())),
        }
    }
}
