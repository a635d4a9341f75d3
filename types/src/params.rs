//! Workflow parameters: the exchange rate, TDS rate and withdrawal floor.

use crate::amount::Coins;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};

/// Basis points in one whole (100%).
pub const BPS_SCALE: u32 = 10_000;

/// Tunable values shared by the ledger and the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowParams {
    /// Coins per one major unit of the payout currency. Default: 100.
    pub exchange_rate: u64,

    /// Tax deducted at source, in basis points (1500 = 15%).
    pub tds_bps: u32,

    /// Smallest payout request accepted. Default: 500 coins.
    pub min_withdrawal: Coins,
}

impl WorkflowParams {
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.exchange_rate == 0 {
            return Err(TypesError::InvalidParams(
                "exchange_rate must be positive".into(),
            ));
        }
        if self.tds_bps > BPS_SCALE {
            return Err(TypesError::InvalidParams(format!(
                "tds_bps {} exceeds {BPS_SCALE}",
                self.tds_bps
            )));
        }
        Ok(())
    }
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            exchange_rate: 100,
            tds_bps: 1500,
            min_withdrawal: Coins::new(500),
        }
    }
}
