use grow_types::{Coins, TaskId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{0} has already been credited")]
    AlreadyCredited(TaskId),

    #[error("balance overflow")]
    Overflow,

    #[error("eligible balance {eligible} exceeds total {total}")]
    EligibleExceedsTotal { eligible: Coins, total: Coins },

    #[error("payout amount must be positive")]
    ZeroAmount,

    #[error("requested {requested} but only {eligible} are eligible")]
    InsufficientEligible { requested: Coins, eligible: Coins },

    #[error("requested {requested} is below the minimum withdrawal of {minimum}")]
    BelowMinimum { requested: Coins, minimum: Coins },

    #[error("a payout request is already pending")]
    PayoutPending,

    #[error("exchange rate must be positive")]
    InvalidRate,

    #[error("tds of {0} bps exceeds 100%")]
    InvalidTds(u32),

    #[error("exchange of {0} does not fit in a money amount")]
    ExchangeOverflow(Coins),
}
