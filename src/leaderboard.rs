//! Leaderboard projection.
//!
//! Players rank by kills (descending), then points (descending), then id
//! (ascending) so equal records always come out in the same order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::core::Player;

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub kills: u32,
    pub points: u64,
}

impl From<&Player> for LeaderboardEntry {
    fn from(player: &Player) -> Self {
        Self {
            username: player.username.clone(),
            kills: player.kills,
            points: player.points,
        }
    }
}

/// Rank `players` and keep the first `n`.
pub fn top(mut players: Vec<Player>, n: usize) -> Vec<LeaderboardEntry> {
    players.sort_by_key(|p| (Reverse(p.kills), Reverse(p.points), p.id));
    players.iter().take(n).map(LeaderboardEntry::from).collect()
}
