//! # mob-engine
//!
//! Progression and action-resolution engine for a persistent multiplayer
//! mob game. Players earn money, points, levels and prestige by attacking,
//! robbing and healing; the engine decides how each action changes the
//! records involved and keeps concurrent actions from corrupting them.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: progression and action resolution are functions of
//!    records plus injected randomness. No globals, no I/O.
//!
//! 2. **Injected randomness**: every action takes an `ActionRng`. Production
//!    callers pass a `GameRng`; tests pass a `ScriptedRng`.
//!
//! 3. **Atomic actions**: the engine locks every player an action touches in
//!    ascending id order with a bounded wait, and commits all changed records
//!    in one store call.
//!
//! ## Modules
//!
//! - `core`: Player records, ids, RNG, configuration
//! - `rules`: Level and prestige progression
//! - `actions`: Attack, job and heal resolution
//! - `store`: The `PlayerStore` contract and an in-memory implementation
//! - `engine`: The `GameEngine` facade with locking and commits
//! - `leaderboard`: Kills/points ranking
//! - `testing`: Scripted randomness for deterministic tests
//!
//! ## Example
//!
//! ```
//! use mob_engine::{GameEngine, MemoryStore, ScriptedRng};
//!
//! let engine = GameEngine::new(MemoryStore::new());
//! let vito = engine.register("vito").unwrap();
//! let sonny = engine.register("sonny").unwrap();
//!
//! // self damage 5
//! let mut rng = ScriptedRng::new([5]);
//! let res = engine.resolve_attack(vito.id, sonny.id, &mut rng).unwrap();
//!
//! assert_eq!(res.actor.health, 95);
//! assert_eq!(res.actor.points, 10);
//! assert_eq!(engine.get_player(sonny.id).unwrap().health, 90);
//! ```

pub mod core;
pub mod rules;
pub mod actions;
pub mod store;
pub mod engine;
pub mod leaderboard;
pub mod error;
pub mod testing;

// Re-export commonly used types
pub use crate::core::{
    max_health, ActionRng, EngineConfig, GameRng, Player, PlayerId, RollRange, MAX_LEVEL,
};

pub use crate::rules::{apply_progression, progressed, Advancement};

pub use crate::actions::{ActionResolver, AttackRolls, HealRolls, JobRolls, Outcome, Resolution};

pub use crate::store::{MemoryStore, PlayerStore, StoreError};

pub use crate::engine::{GameEngine, LockTable};

pub use crate::leaderboard::LeaderboardEntry;

pub use crate::error::{EngineError, Result};

pub use crate::testing::ScriptedRng;
