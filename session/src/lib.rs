//! A user's session on the reward platform.
//!
//! The session owns one verification workflow, one task workflow and one coin
//! ledger. Tasks and the wallet stay locked until verification is approved.
//! Workflow events are turned into host notifications, and every external
//! effect (camera, files, reviews, links, payouts) goes through an injected
//! provider.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod simulated;
pub mod view;

pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError};
pub use logging::{init_logging, LogFormat};
pub use session::{Session, SessionDeps};
pub use view::DashboardView;
