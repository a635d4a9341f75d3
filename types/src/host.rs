//! Fire-and-forget hooks into the host application.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Success => "success",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        })
    }
}

/// Toasts and banners shown by the host. No acknowledgement is expected.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, level: NotifyLevel);
}

/// Opens bank, affiliate and platform links outside the app.
pub trait LinkOpener: Send + Sync {
    fn open_external(&self, url: &str);
}
