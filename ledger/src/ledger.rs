//! Per-session coin ledger.
//!
//! `eligible ≤ total` always holds. Coins enter only through approved task
//! credits, and each task can be credited once. A payout request flags the
//! ledger as pending but does not debit it.

use grow_types::{Coins, TaskId, Timestamp, WorkflowParams};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::LedgerError;
use crate::exchange::Exchange;
use crate::payout::{check_payout, PayoutRequest};

/// One credit applied to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub task: TaskId,
    pub amount: Coins,
    pub at: Timestamp,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CoinLedger {
    total: Coins,
    eligible: Coins,
    credited: HashSet<TaskId>,
    entries: Vec<LedgerEntry>,
    pending_payout: Option<PayoutRequest>,
}

impl CoinLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a ledger with an existing balance (e.g. carried over from a fixture).
    pub fn with_balances(total: Coins, eligible: Coins) -> Result<Self, LedgerError> {
        if eligible > total {
            return Err(LedgerError::EligibleExceedsTotal { eligible, total });
        }
        Ok(Self {
            total,
            eligible,
            ..Self::default()
        })
    }

    pub fn total(&self) -> Coins {
        self.total
    }

    pub fn eligible(&self) -> Coins {
        self.eligible
    }

    /// Coins counted in the total but not yet withdrawable.
    pub fn locked(&self) -> Coins {
        self.total.saturating_sub(self.eligible)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_credited(&self, task: TaskId) -> bool {
        self.credited.contains(&task)
    }

    pub fn pending_payout(&self) -> Option<&PayoutRequest> {
        self.pending_payout.as_ref()
    }

    /// Credit an approved task's reward to both balances.
    pub fn credit_task(
        &mut self,
        task: TaskId,
        amount: Coins,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        if self.credited.contains(&task) {
            return Err(LedgerError::AlreadyCredited(task));
        }
        let total = self.total.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let eligible = self
            .eligible
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total = total;
        self.eligible = eligible;
        self.credited.insert(task);
        self.entries.push(LedgerEntry {
            task,
            amount,
            at: now,
        });
        tracing::info!(%task, %amount, total = %self.total, eligible = %self.eligible, "task credited");
        Ok(())
    }

    /// Validate a payout without changing anything, returning its quote.
    pub fn validate_payout(
        &self,
        coins: Coins,
        params: &WorkflowParams,
    ) -> Result<Exchange, LedgerError> {
        if self.pending_payout.is_some() {
            return Err(LedgerError::PayoutPending);
        }
        check_payout(coins, self.eligible, params.min_withdrawal)?;
        Exchange::quote(coins, params)
    }

    /// Validate and flag a payout as pending. Balances are left untouched.
    pub fn request_payout(
        &mut self,
        coins: Coins,
        params: &WorkflowParams,
        now: Timestamp,
    ) -> Result<PayoutRequest, LedgerError> {
        let quote = self.validate_payout(coins, params)?;
        let request = PayoutRequest {
            coins,
            quote,
            requested_at: now,
        };
        self.pending_payout = Some(request.clone());
        tracing::info!(%coins, net = %quote.net, "payout requested");
        Ok(request)
    }

    /// Drop the pending flag (settled or cancelled upstream).
    pub fn clear_payout(&mut self) -> Option<PayoutRequest> {
        self.pending_payout.take()
    }
}
