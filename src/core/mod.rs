//! Core engine types: players, RNG, configuration.
//!
//! This module contains the building blocks shared by the rules, the action
//! resolver, the store and the engine facade.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{max_health, Player, PlayerId, BASE_HEALTH, HEALTH_PER_LEVEL, MAX_LEVEL, STARTING_MONEY};
pub use rng::{ActionRng, GameRng};
pub use config::{EngineConfig, RollRange};
