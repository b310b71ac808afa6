//! Player identification and the durable player record.
//!
//! ## PlayerId
//!
//! Store-assigned identifier. `PlayerId` is totally ordered; that order is
//! the global lock order used by the engine.
//!
//! ## Player
//!
//! One record per registered participant. Records are plain values: the
//! resolver takes them by reference and hands back updated copies, and the
//! store commits those copies.

use serde::{Deserialize, Serialize};

/// Highest reachable level. Progress past it accrues prestige instead.
pub const MAX_LEVEL: u32 = 60;

/// Health of a level 1 player.
pub const BASE_HEALTH: i32 = 100;

/// Extra maximum health granted per level above 1.
pub const HEALTH_PER_LEVEL: i32 = 10;

/// Money a freshly registered player starts with.
pub const STARTING_MONEY: i64 = 1000;

/// Maximum health for a level: `100 + (level - 1) * 10`.
///
/// ```
/// use mob_engine::core::max_health;
///
/// assert_eq!(max_health(1), 100);
/// assert_eq!(max_health(2), 110);
/// assert_eq!(max_health(60), 690);
/// ```
#[must_use]
pub const fn max_health(level: u32) -> i32 {
    let level = if level == 0 { 1 } else { level };
    BASE_HEALTH + (level as i32 - 1) * HEALTH_PER_LEVEL
}

/// Player identifier assigned by the store at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A durable player record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Immutable identifier.
    pub id: PlayerId,

    /// Unique display name, immutable after creation.
    pub username: String,

    /// Current health in `[0, max_health(level)]`. Zero means incapacitated.
    pub health: i32,

    /// Cash on hand. Theft can push this below zero.
    pub money: i64,

    /// Level in `[1, MAX_LEVEL]`.
    pub level: u32,

    /// Unspent progression points.
    pub points: u64,

    /// Number of players this player has knocked out.
    pub kills: u32,

    /// Post-max-level progression tier.
    pub prestige: u32,

    /// Opaque avatar reference (URL or path). Never read by the engine.
    pub avatar: Option<String>,

    /// Items owned by this player.
    pub items: Vec<String>,
}

impl Player {
    /// Create a player with registration defaults.
    pub fn new(id: PlayerId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            health: BASE_HEALTH,
            money: STARTING_MONEY,
            level: 1,
            points: 0,
            kills: 0,
            prestige: 0,
            avatar: None,
            items: Vec::new(),
        }
    }

    /// Maximum health at the player's current level.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        max_health(self.level)
    }

    /// True when health has reached zero.
    #[must_use]
    pub fn is_incapacitated(&self) -> bool {
        self.health <= 0
    }

    /// Change health by `delta`, clamping into `[0, max_health]`.
    ///
    /// Returns the health actually gained (negative when lost).
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        let before = self.health;
        self.health = before.saturating_add(delta).clamp(0, self.max_health());
        self.health - before
    }

    /// Restore health to the level maximum.
    pub fn restore_health(&mut self) {
        self.health = self.max_health();
    }
}
