//! Engine configuration.
//!
//! `EngineConfig` holds the tunables of action resolution and the engine's
//! concurrency bounds. `EngineConfig::default()` reproduces the standard
//! rules; callers adjust individual values with the `with_*` builders.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// An inclusive integer range `[low, high]` for a random draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRange {
    pub low: i64,
    pub high: i64,
}

impl RollRange {
    /// Create a new inclusive range.
    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Check whether a value lies inside the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

/// Engine configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long an action waits for its player locks before giving up
    /// with a transient contention error.
    pub lock_timeout: Duration,

    /// Points granted for a successful attack or job.
    pub action_points: u64,

    /// Damage an actor takes when attacking or running a job.
    pub self_damage: RollRange,

    /// Fixed damage dealt to an attack target.
    pub attack_damage: i32,

    /// Money taken from the victim of a job.
    pub steal_amount: RollRange,

    /// Probability that healing finds food.
    pub food_chance: f64,

    /// Health restored when food is found.
    pub heal_amount: RollRange,

    /// Health at which a healed player is told they can act again.
    /// Purely informational: only zero health blocks actions.
    pub revive_threshold: i32,

    /// Number of entries a leaderboard page shows.
    pub leaderboard_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_millis(500),
            action_points: 10,
            self_damage: RollRange::new(5, 15),
            attack_damage: 10,
            steal_amount: RollRange::new(10, 100),
            food_chance: 0.5,
            heal_amount: RollRange::new(10, 30),
            revive_threshold: 50,
            leaderboard_size: 10,
        }
    }
}

impl EngineConfig {
    /// Set the lock acquisition timeout.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Set the points granted per successful action.
    pub fn with_action_points(mut self, points: u64) -> Self {
        self.action_points = points;
        self
    }

    /// Set the self-damage range.
    pub fn with_self_damage(mut self, low: i64, high: i64) -> Self {
        self.self_damage = RollRange::new(low, high);
        self
    }

    /// Set the fixed attack damage.
    pub fn with_attack_damage(mut self, damage: i32) -> Self {
        self.attack_damage = damage;
        self
    }

    /// Set the steal range.
    pub fn with_steal_amount(mut self, low: i64, high: i64) -> Self {
        self.steal_amount = RollRange::new(low, high);
        self
    }

    /// Set the chance of finding food while healing.
    pub fn with_food_chance(mut self, chance: f64) -> Self {
        self.food_chance = chance;
        self
    }

    /// Set the heal range.
    pub fn with_heal_amount(mut self, low: i64, high: i64) -> Self {
        self.heal_amount = RollRange::new(low, high);
        self
    }

    /// Set the leaderboard page size.
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }
}
