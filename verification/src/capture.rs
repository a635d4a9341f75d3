//! Capability providers: the device camera and the file picker.
//!
//! Both are black boxes supplied by the host. The camera is a scoped resource:
//! a [`CameraLease`] owns the open stream and releases it when dropped, so
//! every way out of the selfie step gives the device back.

use async_trait::async_trait;
use grow_types::Blob;
use std::sync::Arc;

use crate::error::{CapabilityError, FileError};

/// Handle to an open camera stream, issued by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamHandle(pub u64);

#[async_trait]
pub trait CameraProvider: Send + Sync {
    /// Ask for camera access and open a stream.
    async fn acquire(&self) -> Result<StreamHandle, CapabilityError>;

    /// Grab one frame from an open stream.
    fn capture(&self, stream: &StreamHandle) -> Result<Blob, CapabilityError>;

    /// Stop the stream and free the device.
    fn release(&self, stream: StreamHandle);
}

/// A file chosen by the user (or pasted from the clipboard).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInput {
    /// Display name, e.g. `passport.jpg`.
    pub name: String,
    /// Provider-specific locator (a path, an object URL, a clipboard slot).
    pub locator: String,
}

impl FileInput {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

#[async_trait]
pub trait FileProvider: Send + Sync {
    async fn read_file(&self, input: &FileInput) -> Result<Blob, FileError>;
}

/// An acquired camera stream. Dropping the lease releases the stream.
pub struct CameraLease {
    provider: Arc<dyn CameraProvider>,
    handle: Option<StreamHandle>,
}

impl CameraLease {
    pub async fn acquire(provider: Arc<dyn CameraProvider>) -> Result<Self, CapabilityError> {
        let handle = provider.acquire().await?;
        tracing::debug!(stream = handle.0, "camera stream acquired");
        Ok(Self {
            provider,
            handle: Some(handle),
        })
    }

    pub fn handle(&self) -> Option<StreamHandle> {
        self.handle
    }

    /// Capture a frame, then release the stream whatever the result.
    pub fn capture_and_release(mut self) -> Result<Blob, CapabilityError> {
        let result = match &self.handle {
            Some(handle) => self.provider.capture(handle),
            None => Err(CapabilityError::CaptureFailed("stream already released".into())),
        };
        self.release_now();
        result
    }

    fn release_now(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.provider.release(handle);
            tracing::debug!(stream = handle.0, "camera stream released");
        }
    }
}

impl Drop for CameraLease {
    fn drop(&mut self) {
        self.release_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingCamera {
        released: AtomicUsize,
        fail_capture: bool,
    }

    #[async_trait]
    impl CameraProvider for CountingCamera {
        async fn acquire(&self) -> Result<StreamHandle, CapabilityError> {
            Ok(StreamHandle(7))
        }

        fn capture(&self, _stream: &StreamHandle) -> Result<Blob, CapabilityError> {
            if self.fail_capture {
                Err(CapabilityError::CaptureFailed("black frame".into()))
            } else {
                Ok(Blob::new("image/jpeg", vec![0xff, 0xd8]))
            }
        }

        fn release(&self, _stream: StreamHandle) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn drop_releases_once() {
        let camera = Arc::new(CountingCamera::default());
        let lease = CameraLease::acquire(camera.clone()).await.unwrap();
        assert_eq!(lease.handle(), Some(StreamHandle(7)));
        drop(lease);
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_capture_still_releases() {
        let camera = Arc::new(CountingCamera {
            fail_capture: true,
            ..Default::default()
        });
        let lease = CameraLease::acquire(camera.clone()).await.unwrap();
        assert!(lease.capture_and_release().is_err());
        assert_eq!(camera.released.load(Ordering::SeqCst), 1);
    }
}
