//! Session configuration with TOML file support.

use grow_types::{Coins, WorkflowParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::logging::LogFormat;
use crate::SessionError;

/// Configuration for a user session and its simulated providers.
///
/// Can be loaded from a TOML file via [`SessionConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Coins per one major unit of the payout currency.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: u64,

    /// Tax deducted at source, in basis points.
    #[serde(default = "default_tds_bps")]
    pub tds_bps: u32,

    /// Smallest payout request accepted, in coins.
    #[serde(default = "default_min_withdrawal")]
    pub min_withdrawal: u64,

    /// Simulated verification review latency.
    #[serde(default = "default_review_latency_ms")]
    pub review_latency_ms: u64,

    /// Simulated camera start-up latency.
    #[serde(default = "default_camera_latency_ms")]
    pub camera_latency_ms: u64,

    /// Simulated payout gateway latency.
    #[serde(default = "default_payout_latency_ms")]
    pub payout_latency_ms: u64,

    /// Whether the simulated reviewer approves every case.
    #[serde(default = "default_true")]
    pub auto_approve_reviews: bool,

    /// Where "go to bank" sends the user.
    #[serde(default = "default_bank_link_url")]
    pub bank_link_url: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_exchange_rate() -> u64 {
    100
}

fn default_tds_bps() -> u32 {
    1500
}

fn default_min_withdrawal() -> u64 {
    500
}

fn default_review_latency_ms() -> u64 {
    1500
}

fn default_camera_latency_ms() -> u64 {
    300
}

fn default_payout_latency_ms() -> u64 {
    800
}

fn default_true() -> bool {
    true
}

fn default_bank_link_url() -> String {
    "https://bank.example.com/withdraw".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SessionConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, SessionError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SessionError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SessionError> {
        toml::from_str(s).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SessionError> {
        toml::to_string_pretty(self).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// The workflow parameters, validated.
    pub fn params(&self) -> Result<WorkflowParams, SessionError> {
        let params = WorkflowParams {
            exchange_rate: self.exchange_rate,
            tds_bps: self.tds_bps,
            min_withdrawal: Coins::new(self.min_withdrawal),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn log_format(&self) -> Result<LogFormat, SessionError> {
        self.log_format.parse()
    }

    pub fn review_latency(&self) -> Duration {
        Duration::from_millis(self.review_latency_ms)
    }

    pub fn camera_latency(&self) -> Duration {
        Duration::from_millis(self.camera_latency_ms)
    }

    pub fn payout_latency(&self) -> Duration {
        Duration::from_millis(self.payout_latency_ms)
    }

    /// Zero latencies, for tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            review_latency_ms: 0,
            camera_latency_ms: 0,
            payout_latency_ms: 0,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            exchange_rate: default_exchange_rate(),
            tds_bps: default_tds_bps(),
            min_withdrawal: default_min_withdrawal(),
            review_latency_ms: default_review_latency_ms(),
            camera_latency_ms: default_camera_latency_ms(),
            payout_latency_ms: default_payout_latency_ms(),
            auto_approve_reviews: default_true(),
            bank_link_url: default_bank_link_url(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SessionConfig::default();
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = SessionConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = SessionConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.exchange_rate, 100);
        assert_eq!(config.tds_bps, 1500);
        assert_eq!(config.min_withdrawal, 500);
        assert!(config.auto_approve_reviews);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            exchange_rate = 50
            review_latency_ms = 10
            auto_approve_reviews = false
        "#;
        let config = SessionConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.exchange_rate, 50);
        assert_eq!(config.review_latency(), Duration::from_millis(10));
        assert!(!config.auto_approve_reviews);
        assert_eq!(config.tds_bps, 1500); // default
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_withdrawal = 1000\nlog_format = \"json\"").unwrap();
        let config = SessionConfig::from_toml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.params().unwrap().min_withdrawal, Coins::new(1000));
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = SessionConfig::from_toml_file("/nonexistent/grow.toml").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn invalid_params_are_refused() {
        let config = SessionConfig {
            exchange_rate: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(config.params(), Err(SessionError::Params(_))));
    }
}
