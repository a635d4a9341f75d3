//! Nullable infrastructure for deterministic testing.
//!
//! Every external capability the workflows use (clock, camera, file picker,
//! reviewer, notifications, external links, payout gateway) is abstracted
//! behind a trait. This crate provides test-friendly implementations that:
//! - Return scripted, deterministic results
//! - Record what they were asked to do, for assertions
//! - Never touch devices, the filesystem or the network
//!
//! Usage: swap real providers for nullables in tests and demos.

pub mod camera;
pub mod clock;
pub mod files;
pub mod host;
pub mod reviewer;

pub use camera::NullCamera;
pub use clock::NullClock;
pub use files::NullFiles;
pub use host::{NullLinks, NullNotifier, NullPayoutGateway};
pub use reviewer::NullReviewer;

use std::sync::{Mutex, MutexGuard};

/// Lock ignoring poisoning: a panicking test must not cascade into others.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
