//! Action results.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerId};
use crate::rules::Advancement;

/// What an action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The actor hit the target.
    Attacked {
        target: PlayerId,
        self_damage: i32,
        /// The hit took the target from positive health to zero.
        knocked_out: bool,
        points: u64,
        advancement: Advancement,
    },
    /// The target was already at zero health. Nothing changed.
    TargetAlreadyDead { target: PlayerId },
    /// The actor robbed a victim.
    Stole {
        victim: PlayerId,
        amount: i64,
        self_damage: i32,
        points: u64,
        advancement: Advancement,
    },
    /// The job's self damage was lethal. Only the damage sticks.
    DiedOnJob { self_damage: i32 },
    /// The actor found food.
    Healed {
        amount: i32,
        /// Resulting health reached the revive threshold.
        can_act: bool,
    },
    /// The actor found no food. Nothing changed.
    FoundNothing,
}

impl Outcome {
    /// True if the action changed any record.
    #[must_use]
    pub fn mutates(&self) -> bool {
        !matches!(self, Outcome::TargetAlreadyDead { .. } | Outcome::FoundNothing)
    }
}

/// Updated records and the outcome of one resolved action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The actor after the action.
    pub actor: Player,

    /// The second record touched, if any.
    pub target: Option<Player>,

    pub outcome: Outcome,

    /// Human-readable summary.
    pub message: String,
}

impl Resolution {
    /// Records that must be committed together for this resolution.
    ///
    /// Empty when the outcome left everything unchanged.
    #[must_use]
    pub fn changed_records(&self) -> SmallVec<[&Player; 2]> {
        let mut records = SmallVec::new();
        if self.outcome.mutates() {
            records.push(&self.actor);
            if let Some(target) = &self.target {
                records.push(target);
            }
        }
        records
    }
}
