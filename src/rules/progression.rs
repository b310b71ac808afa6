//! Level and prestige progression.
//!
//! Points earned by actions are spent on advancement:
//!
//! - Below `MAX_LEVEL` a level costs `level * 100 * (1 + level / 10)` points,
//!   which is exactly `10 * level * (10 + level)`. Leveling up fully heals.
//! - At `MAX_LEVEL` a prestige tier costs `42_000 * 2^prestige` points and
//!   leaves health alone.
//!
//! At most one advancement happens per call. Points left over past a second
//! threshold wait for the next call.

use serde::{Deserialize, Serialize};

use crate::core::{Player, MAX_LEVEL};

/// Cost of the first prestige tier: the level-60 formula, `60*100*(1+60/10)`.
pub const PRESTIGE_BASE_COST: u64 = 42_000;

/// What a progression step did to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advancement {
    /// Not enough points.
    None,
    /// Reached a new level.
    LevelUp { level: u32 },
    /// Gained a prestige tier.
    Prestige { prestige: u32 },
}

impl Advancement {
    /// True if anything changed.
    #[must_use]
    pub fn advanced(self) -> bool {
        !matches!(self, Advancement::None)
    }
}

/// Points needed to leave `level`. Only meaningful below `MAX_LEVEL`.
///
/// ```
/// use mob_engine::rules::level_threshold;
///
/// assert_eq!(level_threshold(1), 110);
/// assert_eq!(level_threshold(2), 240);
/// assert_eq!(level_threshold(10), 2000);
/// ```
#[must_use]
pub const fn level_threshold(level: u32) -> u64 {
    let level = level as u64;
    10 * level * (10 + level)
}

/// Points needed to gain the next prestige tier at `MAX_LEVEL`.
///
/// Saturates at `u64::MAX` once the doubling overflows.
#[must_use]
pub fn prestige_threshold(prestige: u32) -> u64 {
    1u64.checked_shl(prestige)
        .and_then(|factor| PRESTIGE_BASE_COST.checked_mul(factor))
        .unwrap_or(u64::MAX)
}

/// Points needed for the player's next advancement, whichever kind it is.
#[must_use]
pub fn next_threshold(player: &Player) -> u64 {
    if player.level < MAX_LEVEL {
        level_threshold(player.level)
    } else {
        prestige_threshold(player.prestige)
    }
}

/// Points still missing before the next advancement.
#[must_use]
pub fn points_to_next(player: &Player) -> u64 {
    next_threshold(player).saturating_sub(player.points)
}

/// Apply one progression step in place.
pub fn apply_progression(player: &mut Player) -> Advancement {
    let needed = next_threshold(player);
    if player.points < needed {
        return Advancement::None;
    }

    player.points -= needed;
    if player.level < MAX_LEVEL {
        player.level += 1;
        player.restore_health();
        Advancement::LevelUp { level: player.level }
    } else {
        player.prestige += 1;
        Advancement::Prestige { prestige: player.prestige }
    }
}

/// Pure form of [`apply_progression`]: returns the progressed record.
#[must_use]
pub fn progressed(mut player: Player) -> Player {
    apply_progression(&mut player);
    player
}
