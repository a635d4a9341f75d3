//! Simulated providers for demos and local runs.
//!
//! Each one implements a port trait with a `tokio::time::sleep` standing in
//! for real latency, so a production backend can replace it one-for-one.

use async_trait::async_trait;
use grow_ledger::{GatewayError, PayoutGateway, PayoutRequest};
use grow_types::{Blob, LinkOpener, NotificationSink, NotifyLevel, SystemClock};
use grow_verification::{
    Capabilities, CameraProvider, CapabilityError, FileError, FileInput, FileProvider,
    ReviewDecision, ReviewerError, StreamHandle, VerificationCase, VerificationReviewer,
};
use rand::Rng;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::SessionConfig;
use crate::session::SessionDeps;

const REJECTION_REASONS: [&str; 3] = [
    "document photo is blurry",
    "selfie does not match the document",
    "date of birth does not match the document",
];

/// Up to ±20% random spread around `base`.
fn jittered(base: Duration) -> Duration {
    let millis = base.as_millis() as u64;
    if millis == 0 {
        return base;
    }
    let spread = millis / 5;
    let low = millis.saturating_sub(spread);
    Duration::from_millis(rand::thread_rng().gen_range(low..=millis + spread))
}

/// Camera that opens numbered streams and returns a synthetic JPEG frame.
pub struct SimulatedCamera {
    latency: Duration,
    next_stream: AtomicU64,
}

impl SimulatedCamera {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            next_stream: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl CameraProvider for SimulatedCamera {
    async fn acquire(&self) -> Result<StreamHandle, CapabilityError> {
        tokio::time::sleep(jittered(self.latency)).await;
        let handle = StreamHandle(self.next_stream.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(stream = handle.0, "simulated camera opened");
        Ok(handle)
    }

    fn capture(&self, stream: &StreamHandle) -> Result<Blob, CapabilityError> {
        let mut frame = vec![0u8; 64];
        rand::thread_rng().fill(&mut frame[..]);
        frame[..2].copy_from_slice(&[0xff, 0xd8]);
        tracing::debug!(stream = stream.0, "simulated frame captured");
        Ok(Blob::new("image/jpeg", frame))
    }

    fn release(&self, stream: StreamHandle) {
        tracing::debug!(stream = stream.0, "simulated camera closed");
    }
}

/// Reads files from the local disk, typing them by extension.
#[derive(Default)]
pub struct DiskFileProvider;

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl FileProvider for DiskFileProvider {
    async fn read_file(&self, input: &FileInput) -> Result<Blob, FileError> {
        let path = Path::new(&input.locator);
        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound(input.name.clone()),
            _ => FileError::Unreadable(format!("{}: {e}", input.name)),
        })?;
        if bytes.is_empty() {
            return Err(FileError::Empty(input.name.clone()));
        }
        Ok(Blob::new(mime_for(path), bytes))
    }
}

/// Approves after a delay, or rejects with a canned reason when
/// auto-approval is off.
pub struct SimulatedReviewer {
    latency: Duration,
    auto_approve: bool,
}

impl SimulatedReviewer {
    pub fn new(latency: Duration, auto_approve: bool) -> Self {
        Self {
            latency,
            auto_approve,
        }
    }
}

#[async_trait]
impl VerificationReviewer for SimulatedReviewer {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn review(&self, case: &VerificationCase) -> Result<ReviewDecision, ReviewerError> {
        tokio::time::sleep(jittered(self.latency)).await;
        if self.auto_approve {
            return Ok(ReviewDecision::Approved);
        }
        let pick = rand::thread_rng().gen_range(0..REJECTION_REASONS.len());
        tracing::debug!(case = %case.id, "simulated reviewer rejecting");
        Ok(ReviewDecision::Rejected {
            reason: REJECTION_REASONS[pick].to_string(),
        })
    }
}

/// Accepts every payout after a delay.
pub struct SimulatedPayoutGateway {
    latency: Duration,
}

impl SimulatedPayoutGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PayoutGateway for SimulatedPayoutGateway {
    async fn submit(&self, request: &PayoutRequest) -> Result<(), GatewayError> {
        tokio::time::sleep(jittered(self.latency)).await;
        tracing::info!(coins = %request.coins, net = %request.quote.net, "payout accepted by gateway");
        Ok(())
    }
}

/// Writes notifications to the log.
#[derive(Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, level: NotifyLevel) {
        match level {
            NotifyLevel::Info | NotifyLevel::Success => {
                tracing::info!(kind = %level, "{message}")
            }
            NotifyLevel::Warning => tracing::warn!(kind = %level, "{message}"),
            NotifyLevel::Error => tracing::error!(kind = %level, "{message}"),
        }
    }
}

/// Logs external links instead of opening them.
#[derive(Default)]
pub struct TracingLinkOpener;

impl LinkOpener for TracingLinkOpener {
    fn open_external(&self, url: &str) {
        tracing::info!(%url, "opening external link");
    }
}

/// Wire every port to its simulated provider.
pub fn simulated_deps(config: &SessionConfig) -> SessionDeps {
    let clock = Arc::new(SystemClock);
    SessionDeps {
        capabilities: Capabilities {
            camera: Arc::new(SimulatedCamera::new(config.camera_latency())),
            files: Arc::new(DiskFileProvider),
            reviewer: Arc::new(SimulatedReviewer::new(
                config.review_latency(),
                config.auto_approve_reviews,
            )),
            clock: clock.clone(),
        },
        notifier: Arc::new(TracingNotifier),
        links: Arc::new(TracingLinkOpener),
        payouts: Arc::new(SimulatedPayoutGateway::new(config.payout_latency())),
        clock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grow_types::{CaseId, Timestamp};
    use std::io::Write;

    #[test]
    fn jitter_stays_within_a_fifth() {
        for _ in 0..100 {
            let d = jittered(Duration::from_millis(1000));
            assert!(d >= Duration::from_millis(800) && d <= Duration::from_millis(1200));
        }
        assert_eq!(jittered(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn mime_types_follow_the_extension() {
        assert_eq!(mime_for(Path::new("id.JPG")), "image/jpeg");
        assert_eq!(mime_for(Path::new("scan.pdf")), "application/pdf");
        assert_eq!(mime_for(Path::new("README")), "application/octet-stream");
    }

    #[tokio::test]
    async fn disk_provider_reads_and_classifies_failures() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG").unwrap();
        let input = FileInput::new("id.png", file.path().to_str().unwrap());
        let blob = DiskFileProvider.read_file(&input).await.unwrap();
        assert_eq!(blob.mime, "image/png");

        let empty = tempfile::NamedTempFile::new().unwrap();
        let input = FileInput::new("empty", empty.path().to_str().unwrap());
        assert!(matches!(
            DiskFileProvider.read_file(&input).await,
            Err(FileError::Empty(_))
        ));

        let input = FileInput::new("gone", "/nonexistent/gone.jpg");
        assert!(matches!(
            DiskFileProvider.read_file(&input).await,
            Err(FileError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn simulated_camera_issues_distinct_streams() {
        let camera = SimulatedCamera::new(Duration::ZERO);
        let a = camera.acquire().await.unwrap();
        let b = camera.acquire().await.unwrap();
        assert_ne!(a, b);
        let frame = camera.capture(&a).unwrap();
        assert_eq!(&frame.bytes[..2], &[0xff, 0xd8]);
    }

    #[tokio::test]
    async fn reviewer_honours_auto_approve() {
        let case = VerificationCase::new(CaseId::new(1), Timestamp::from_secs(1));
        let approve = SimulatedReviewer::new(Duration::ZERO, true);
        assert_eq!(approve.review(&case).await.unwrap(), ReviewDecision::Approved);

        let reject = SimulatedReviewer::new(Duration::ZERO, false);
        assert!(matches!(
            reject.review(&case).await.unwrap(),
            ReviewDecision::Rejected { .. }
        ));
    }
}
