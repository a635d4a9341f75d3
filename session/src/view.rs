//! Dashboard views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    Overview,
    Verification,
    Tasks,
    Wallet,
    Leaderboard,
    Admin,
}

impl DashboardView {
    pub const ALL: [DashboardView; 6] = [
        DashboardView::Overview,
        DashboardView::Verification,
        DashboardView::Tasks,
        DashboardView::Wallet,
        DashboardView::Leaderboard,
        DashboardView::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardView::Overview => "overview",
            DashboardView::Verification => "verification",
            DashboardView::Tasks => "tasks",
            DashboardView::Wallet => "wallet",
            DashboardView::Leaderboard => "leaderboard",
            DashboardView::Admin => "admin",
        }
    }

    pub fn requires_verification(&self) -> bool {
        match self {
            DashboardView::Tasks | DashboardView::Wallet => true,
            DashboardView::Overview
            | DashboardView::Verification
            | DashboardView::Leaderboard
            | DashboardView::Admin => false,
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardView {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" | "dashboard" | "home" => Ok(DashboardView::Overview),
            "verification" | "verify" | "kyc" => Ok(DashboardView::Verification),
            "tasks" => Ok(DashboardView::Tasks),
            "wallet" | "earnings" | "payouts" => Ok(DashboardView::Wallet),
            "leaderboard" => Ok(DashboardView::Leaderboard),
            "admin" => Ok(DashboardView::Admin),
            other => Err(SessionError::UnknownView(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for view in DashboardView::ALL {
            assert_eq!(view.as_str().parse::<DashboardView>().unwrap(), view);
        }
        assert_eq!("Earnings".parse::<DashboardView>().unwrap(), DashboardView::Wallet);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!(
            "settings".parse::<DashboardView>(),
            Err(SessionError::UnknownView(_))
        ));
    }

    #[test]
    fn only_tasks_and_wallet_are_gated() {
        let gated: Vec<_> = DashboardView::ALL
            .into_iter()
            .filter(|v| v.requires_verification())
            .collect();
        assert_eq!(gated, vec![DashboardView::Tasks, DashboardView::Wallet]);
    }
}
