//! Payout requests: validation and the settlement gateway.

use async_trait::async_trait;
use grow_types::{Coins, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LedgerError;
use crate::exchange::Exchange;

/// A cash-out request awaiting settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub coins: Coins,
    pub quote: Exchange,
    pub requested_at: Timestamp,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("payout gateway unavailable: {0}")]
    Unavailable(String),

    #[error("payout refused: {0}")]
    Refused(String),
}

/// Where accepted payout requests are sent for settlement.
#[async_trait]
pub trait PayoutGateway: Send + Sync {
    async fn submit(&self, request: &PayoutRequest) -> Result<(), GatewayError>;
}

/// A request is allowed only if `0 < coins ≤ eligible` and `coins ≥ minimum`.
pub fn check_payout(coins: Coins, eligible: Coins, minimum: Coins) -> Result<(), LedgerError> {
    if coins.is_zero() {
        return Err(LedgerError::ZeroAmount);
    }
    if coins > eligible {
        return Err(LedgerError::InsufficientEligible {
            requested: coins,
            eligible,
        });
    }
    if coins < minimum {
        return Err(LedgerError::BelowMinimum {
            requested: coins,
            minimum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_eligible_is_rejected() {
        let err = check_payout(Coins::new(1200), Coins::new(1000), Coins::new(500)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientEligible { .. }));
    }

    #[test]
    fn below_minimum_is_rejected() {
        let err = check_payout(Coins::new(100), Coins::new(1000), Coins::new(500)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BelowMinimum {
                requested: Coins::new(100),
                minimum: Coins::new(500)
            }
        );
    }

    #[test]
    fn zero_is_rejected_even_with_zero_minimum() {
        assert_eq!(
            check_payout(Coins::ZERO, Coins::new(10), Coins::ZERO),
            Err(LedgerError::ZeroAmount)
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(check_payout(Coins::new(500), Coins::new(500), Coins::new(500)).is_ok());
    }
}
