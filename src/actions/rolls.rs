//! Random draws consumed by each action.
//!
//! Every action draws its randomness up front into a roll struct, in a
//! fixed order, so the resolution itself is a pure function of the records
//! and the rolls.

use serde::{Deserialize, Serialize};

use crate::core::{ActionRng, EngineConfig, RollRange};

fn draw(rng: &mut impl ActionRng, range: RollRange) -> i64 {
    rng.roll(range.low, range.high)
}

fn to_health(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Draws for an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRolls {
    pub self_damage: i32,
}

impl AttackRolls {
    pub fn draw(rng: &mut impl ActionRng, config: &EngineConfig) -> Self {
        Self {
            self_damage: to_health(draw(rng, config.self_damage)),
        }
    }
}

/// Draws for a job: self damage, then the victim index, then the take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRolls {
    pub self_damage: i32,
    /// Index into the candidate victims. `None` when there were none.
    pub victim: Option<usize>,
    pub stolen: i64,
}

impl JobRolls {
    /// Draw job rolls against `candidates` possible victims.
    pub fn draw(rng: &mut impl ActionRng, config: &EngineConfig, candidates: usize) -> Self {
        let self_damage = to_health(draw(rng, config.self_damage));
        let victim = (candidates > 0).then(|| rng.pick(candidates));
        let stolen = draw(rng, config.steal_amount);
        Self {
            self_damage,
            victim,
            stolen,
        }
    }
}

/// Draws for a heal: the food coin flip, then the amount if food was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealRolls {
    pub found_food: bool,
    pub amount: i32,
}

impl HealRolls {
    pub fn draw(rng: &mut impl ActionRng, config: &EngineConfig) -> Self {
        let found_food = rng.chance(config.food_chance);
        let amount = if found_food {
            to_health(draw(rng, config.heal_amount))
        } else {
            0
        };
        Self { found_food, amount }
    }
}
