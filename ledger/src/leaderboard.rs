//! Leaderboard ranking by total coins.

use grow_types::Coins;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub coins: Coins,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based; equal coin totals share a rank ("1, 1, 3").
    pub rank: u32,
    pub name: String,
    pub coins: Coins,
}

/// Order entries by coins (highest first), ties by name.
pub fn rank(entries: impl IntoIterator<Item = LeaderboardEntry>) -> Vec<RankedEntry> {
    let mut sorted: Vec<LeaderboardEntry> = entries.into_iter().collect();
    sorted.sort_by(|a, b| b.coins.cmp(&a.coins).then_with(|| a.name.cmp(&b.name)));

    let mut ranked = Vec::with_capacity(sorted.len());
    let mut previous: Option<(Coins, u32)> = None;
    for (i, entry) in sorted.into_iter().enumerate() {
        let rank = match previous {
            Some((coins, rank)) if coins == entry.coins => rank,
            _ => i as u32 + 1,
        };
        previous = Some((entry.coins, rank));
        ranked.push(RankedEntry {
            rank,
            name: entry.name,
            coins: entry.coins,
        });
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(name: &str, coins: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.into(),
            coins: Coins::new(coins),
        }
    }

    #[test]
    fn ties_share_rank_and_sort_by_name() {
        let ranked = rank(vec![e("zoe", 300), e("amy", 500), e("bob", 500), e("cat", 100)]);
        let view: Vec<(u32, &str)> = ranked.iter().map(|r| (r.rank, r.name.as_str())).collect();
        assert_eq!(view, vec![(1, "amy"), (1, "bob"), (3, "zoe"), (4, "cat")]);
    }

    #[test]
    fn empty_input() {
        assert!(rank(Vec::new()).is_empty());
    }
}
