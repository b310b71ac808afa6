//! Action resolution: attack, job and heal.
//!
//! Actions are resolved in three steps:
//!
//! 1. Preconditions are checked against the records (`ActorIncapacitated`,
//!    `SelfTarget`, an already dead target).
//! 2. Randomness is drawn into a roll struct (`AttackRolls`, `JobRolls`,
//!    `HealRolls`) in a fixed order.
//! 3. `ActionResolver` computes the updated records and a `Resolution`.
//!
//! Nothing here touches the store; see `engine` for locking and commits.

pub mod rolls;
pub mod outcome;
pub mod resolver;

pub use rolls::{AttackRolls, HealRolls, JobRolls};
pub use outcome::{Outcome, Resolution};
pub use resolver::ActionResolver;
