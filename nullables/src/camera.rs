//! Nullable camera: scripted failures and stream bookkeeping.

use async_trait::async_trait;
use grow_types::Blob;
use grow_verification::{CameraProvider, CapabilityError, StreamHandle};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use crate::lock;

/// A camera that never touches a device.
///
/// Each capture returns a small JPEG-tagged frame that differs per stream, so
/// two captures have different blob references.
#[derive(Default)]
pub struct NullCamera {
    acquire_errors: Mutex<VecDeque<CapabilityError>>,
    capture_errors: Mutex<VecDeque<CapabilityError>>,
    open: Mutex<HashSet<StreamHandle>>,
    acquired: Mutex<u64>,
    released: Mutex<u64>,
}

impl NullCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `acquire` fail with `error`.
    pub fn fail_next_acquire(&self, error: CapabilityError) {
        lock(&self.acquire_errors).push_back(error);
    }

    /// Make the next `capture` fail with `error`.
    pub fn fail_next_capture(&self, error: CapabilityError) {
        lock(&self.capture_errors).push_back(error);
    }

    pub fn acquired_count(&self) -> u64 {
        *lock(&self.acquired)
    }

    pub fn released_count(&self) -> u64 {
        *lock(&self.released)
    }

    /// Streams acquired and not yet released.
    pub fn open_streams(&self) -> usize {
        lock(&self.open).len()
    }
}

#[async_trait]
impl CameraProvider for NullCamera {
    async fn acquire(&self) -> Result<StreamHandle, CapabilityError> {
        if let Some(error) = lock(&self.acquire_errors).pop_front() {
            return Err(error);
        }
        let mut acquired = lock(&self.acquired);
        *acquired += 1;
        let handle = StreamHandle(*acquired);
        lock(&self.open).insert(handle);
        Ok(handle)
    }

    fn capture(&self, stream: &StreamHandle) -> Result<Blob, CapabilityError> {
        if !lock(&self.open).contains(stream) {
            return Err(CapabilityError::CaptureFailed("stream is not open".into()));
        }
        if let Some(error) = lock(&self.capture_errors).pop_front() {
            return Err(error);
        }
        let mut frame = vec![0xff, 0xd8, 0xff, 0xe0];
        frame.extend_from_slice(&stream.0.to_le_bytes());
        Ok(Blob::new("image/jpeg", frame))
    }

    fn release(&self, stream: StreamHandle) {
        if lock(&self.open).remove(&stream) {
            *lock(&self.released) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_failure_then_success() {
        let camera = NullCamera::new();
        camera.fail_next_acquire(CapabilityError::DeviceBusy);
        assert_eq!(camera.acquire().await, Err(CapabilityError::DeviceBusy));
        let h = camera.acquire().await.unwrap();
        assert_eq!(camera.open_streams(), 1);
        assert!(camera.capture(&h).is_ok());
        camera.release(h);
        camera.release(h);
        assert_eq!(camera.released_count(), 1);
        assert_eq!(camera.open_streams(), 0);
        assert!(camera.capture(&h).is_err());
    }
}
