//! Coin-to-money exchange with tax deducted at source.
//!
//! `gross = coins / rate`, `tds = gross × tds_bps / 10_000`, `net = gross − tds`.
//! Money is in hundredths; division rounds down, and TDS rounds down so
//! `gross == tds + net` holds exactly.

use grow_types::params::BPS_SCALE;
use grow_types::{Coins, Money, WorkflowParams};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub coins: Coins,
    pub gross: Money,
    pub tds: Money,
    pub net: Money,
}

impl Exchange {
    /// Quote using the configured rate and TDS.
    pub fn quote(coins: Coins, params: &WorkflowParams) -> Result<Self, LedgerError> {
        compute_exchange(coins, params.exchange_rate, params.tds_bps)
    }
}

/// Convert `coins` at `rate` coins per currency unit, deducting `tds_bps`.
pub fn compute_exchange(coins: Coins, rate: u64, tds_bps: u32) -> Result<Exchange, LedgerError> {
    if rate == 0 {
        return Err(LedgerError::InvalidRate);
    }
    if tds_bps > BPS_SCALE {
        return Err(LedgerError::InvalidTds(tds_bps));
    }
    let gross = coins.raw() as u128 * grow_types::amount::MONEY_SCALE as u128 / rate as u128;
    let gross = u64::try_from(gross).map_err(|_| LedgerError::ExchangeOverflow(coins))?;
    // tds <= gross, so both fit once gross does.
    let tds = (gross as u128 * tds_bps as u128 / BPS_SCALE as u128) as u64;
    Ok(Exchange {
        coins,
        gross: Money::from_hundredths(gross),
        tds: Money::from_hundredths(tds),
        net: Money::from_hundredths(gross - tds),
    })
}
