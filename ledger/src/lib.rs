//! Coin bookkeeping for a user session.
//!
//! - [`CoinLedger`]: total and eligible coins, credited once per task.
//! - [`compute_exchange`]: the derived cash-out view (gross, TDS, net).
//! - [`check_payout`]: payout request validation.
//! - [`rank`]: leaderboard ordering.

pub mod error;
pub mod exchange;
pub mod leaderboard;
pub mod ledger;
pub mod payout;

pub use error::LedgerError;
pub use exchange::{compute_exchange, Exchange};
pub use leaderboard::{rank, LeaderboardEntry, RankedEntry};
pub use ledger::{CoinLedger, LedgerEntry};
pub use payout::{check_payout, GatewayError, PayoutGateway, PayoutRequest};
