//! The engine facade: store access, locking and atomic commits.
//!
//! `GameEngine` is what the outer layer (HTTP handlers, a CLI, tests) calls.
//! Every mutating action follows the same sequence:
//!
//! 1. Lock every player the action touches, in ascending id order, with a
//!    bounded wait (`EngineConfig::lock_timeout`).
//! 2. Re-read the locked records from the store.
//! 3. Resolve the action with `ActionResolver`.
//! 4. Commit all changed records in one `PlayerStore::commit` call.
//! 5. Release the locks (guard drop).
//!
//! A job's victim is drawn from the set of ids before locking, since the
//! choice does not depend on any record's contents.

pub mod locks;

use tracing::{debug, info, warn};

use crate::actions::{ActionResolver, JobRolls, Resolution};
use crate::core::{ActionRng, EngineConfig, Player, PlayerId};
use crate::error::{EngineError, Result};
use crate::leaderboard::{self, LeaderboardEntry};
use crate::store::{PlayerStore, StoreError};

pub use locks::{LockGuard, LockSet, LockTable, LockTimeout};

/// Progression and action-resolution engine over a player store.
pub struct GameEngine<S> {
    store: S,
    config: EngineConfig,
    locks: LockTable,
}

impl<S: PlayerStore> GameEngine<S> {
    /// Create an engine with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            locks: LockTable::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the lock table.
    pub fn locks(&self) -> &LockTable {
        &self.locks
    }

    fn lock(&self, ids: &[PlayerId]) -> Result<LockGuard<'_>> {
        self.locks.acquire(ids, self.config.lock_timeout).map_err(|LockTimeout| {
            warn!(?ids, timeout = ?self.config.lock_timeout, "timed out waiting for player locks");
            EngineError::TransientContention
        })
    }

    fn commit(&self, resolution: &Resolution) -> Result<()> {
        let records: Vec<Player> = resolution.changed_records().into_iter().cloned().collect();
        if records.is_empty() {
            return Ok(());
        }
        self.store.commit(&records)?;
        Ok(())
    }

    // === Players ===

    /// Register a new player with default stats.
    pub fn register(&self, username: &str) -> Result<Player> {
        let player = self.store.insert(username).map_err(|err| match err {
            StoreError::DuplicateUsername(name) => EngineError::UsernameTaken(name),
            other => EngineError::Store(other),
        })?;
        info!(id = player.id.raw(), username, "registered player");
        Ok(player)
    }

    /// Get a player by id.
    pub fn get_player(&self, id: PlayerId) -> Result<Player> {
        self.store.get(id)?.ok_or(EngineError::PlayerNotFound(id))
    }

    /// Get a player by username.
    pub fn find_by_username(&self, username: &str) -> Result<Player> {
        self.store
            .find_by_username(username)?
            .ok_or_else(|| EngineError::UsernameNotFound(username.to_string()))
    }

    /// List every player, ordered by id.
    pub fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.store.get_all()?)
    }

    /// Replace a player's avatar reference.
    pub fn set_avatar(&self, id: PlayerId, avatar: Option<String>) -> Result<Player> {
        let _guard = self.lock(&[id])?;
        let mut player = self.get_player(id)?;
        player.avatar = avatar;
        self.store.commit(std::slice::from_ref(&player))?;
        debug!(id = id.raw(), "updated avatar");
        Ok(player)
    }

    // === Actions ===

    /// Attack `target_id` as `actor_id`.
    pub fn resolve_attack(
        &self,
        actor_id: PlayerId,
        target_id: PlayerId,
        rng: &mut impl ActionRng,
    ) -> Result<Resolution> {
        if actor_id == target_id {
            self.get_player(actor_id)?;
            return Err(EngineError::SelfTarget(actor_id));
        }

        let _guard = self.lock(&[actor_id, target_id])?;
        let actor = self.get_player(actor_id)?;
        let target = self.get_player(target_id)?;

        let resolution = ActionResolver::attack(&actor, &target, rng, &self.config).inspect_err(|err| {
            debug!(actor = actor_id.raw(), target = target_id.raw(), %err, "attack rejected");
        })?;
        self.commit(&resolution)?;

        info!(
            actor = actor_id.raw(),
            target = target_id.raw(),
            outcome = ?resolution.outcome,
            "resolved attack"
        );
        Ok(resolution)
    }

    /// Run a job as `actor_id`, robbing a random other player.
    pub fn resolve_job(&self, actor_id: PlayerId, rng: &mut impl ActionRng) -> Result<Resolution> {
        let actor = self.get_player(actor_id)?;
        if actor.is_incapacitated() {
            debug!(actor = actor_id.raw(), "job rejected: actor incapacitated");
            return Err(EngineError::ActorIncapacitated(actor_id));
        }

        let candidates: Vec<PlayerId> = self
            .store
            .ids()?
            .into_iter()
            .filter(|id| *id != actor_id)
            .collect();
        let rolls = JobRolls::draw(rng, &self.config, candidates.len());
        let victim_id = rolls.victim.and_then(|index| candidates.get(index).copied());

        let mut involved = vec![actor_id];
        involved.extend(victim_id);
        let _guard = self.lock(&involved)?;

        // Re-read under the lock: the unlocked reads above may be stale.
        let actor = self.get_player(actor_id)?;
        let victim = victim_id.map(|id| self.get_player(id)).transpose()?;

        let resolution = ActionResolver::job_with_rolls(&actor, victim.as_ref(), &rolls, &self.config)
            .inspect_err(|err| debug!(actor = actor_id.raw(), %err, "job rejected"))?;
        self.commit(&resolution)?;

        info!(
            actor = actor_id.raw(),
            victim = ?victim_id,
            outcome = ?resolution.outcome,
            "resolved job"
        );
        Ok(resolution)
    }

    /// Look for food as `actor_id`.
    pub fn resolve_heal(&self, actor_id: PlayerId, rng: &mut impl ActionRng) -> Result<Resolution> {
        let _guard = self.lock(&[actor_id])?;
        let actor = self.get_player(actor_id)?;

        let resolution = ActionResolver::heal(&actor, rng, &self.config);
        self.commit(&resolution)?;

        info!(actor = actor_id.raw(), outcome = ?resolution.outcome, "resolved heal");
        Ok(resolution)
    }

    // === Views ===

    /// Top `n` players by kills, then points.
    pub fn leaderboard_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>> {
        Ok(leaderboard::top(self.store.get_all()?, n))
    }

    /// The configured leaderboard page.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.leaderboard_top(self.config.leaderboard_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::ScriptedRng;
    use std::time::Duration;

    fn engine() -> GameEngine<MemoryStore> {
        GameEngine::with_config(
            MemoryStore::new(),
            EngineConfig::default().with_lock_timeout(Duration::from_millis(20)),
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let engine = engine();
        let vito = engine.register("vito").unwrap();

        assert_eq!(engine.get_player(vito.id).unwrap(), vito);
        assert_eq!(engine.find_by_username("vito").unwrap(), vito);
        assert_eq!(
            engine.register("vito").unwrap_err(),
            EngineError::UsernameTaken("vito".into())
        );
    }

    #[test]
    fn test_missing_players() {
        let engine = engine();
        let a = engine.register("a").unwrap();
        let ghost = PlayerId::new(42);
        let mut rng = ScriptedRng::new([5, 0, 50]);

        assert!(engine.get_player(ghost).unwrap_err().is_not_found());
        assert!(engine.find_by_username("ghost").unwrap_err().is_not_found());
        assert_eq!(
            engine.resolve_attack(a.id, ghost, &mut rng).unwrap_err(),
            EngineError::PlayerNotFound(ghost)
        );
        assert_eq!(
            engine.resolve_attack(ghost, ghost, &mut rng).unwrap_err(),
            EngineError::PlayerNotFound(ghost)
        );
        assert_eq!(
            engine.resolve_job(ghost, &mut rng).unwrap_err(),
            EngineError::PlayerNotFound(ghost)
        );
        assert_eq!(
            engine.resolve_heal(ghost, &mut rng).unwrap_err(),
            EngineError::PlayerNotFound(ghost)
        );
    }

    #[test]
    fn test_attack_commits_both_records() {
        let engine = engine();
        let a = engine.register("a").unwrap();
        let b = engine.register("b").unwrap();
        let mut rng = ScriptedRng::new([12]);

        let res = engine.resolve_attack(a.id, b.id, &mut rng).unwrap();

        assert_eq!(engine.get_player(a.id).unwrap(), res.actor);
        assert_eq!(engine.get_player(b.id).unwrap().health, 90);
        assert_eq!(engine.get_player(a.id).unwrap().health, 88);
    }

    #[test]
    fn test_attack_self_rejected() {
        let engine = engine();
        let a = engine.register("a").unwrap();
        let mut rng = ScriptedRng::default();

        assert_eq!(
            engine.resolve_attack(a.id, a.id, &mut rng).unwrap_err(),
            EngineError::SelfTarget(a.id)
        );
    }

    #[test]
    fn test_locked_player_yields_transient_error() {
        let engine = engine();
        let a = engine.register("a").unwrap();
        let b = engine.register("b").unwrap();
        let mut rng = ScriptedRng::new([5]);

        let _held = engine.locks().acquire(&[b.id], Duration::from_millis(20)).unwrap();
        let err = engine.resolve_attack(a.id, b.id, &mut rng).unwrap_err();

        assert!(err.is_transient());
        assert_eq!(engine.get_player(a.id).unwrap(), a);
        assert!(!engine.locks().is_locked(a.id));
    }

    #[test]
    fn test_set_avatar() {
        let engine = engine();
        let a = engine.register("a").unwrap();

        let updated = engine
            .set_avatar(a.id, Some("/static/uploads/0_avatar.png".into()))
            .unwrap();
        assert_eq!(updated.avatar.as_deref(), Some("/static/uploads/0_avatar.png"));
        assert_eq!(engine.get_player(a.id).unwrap().avatar, updated.avatar);
    }

    #[test]
    fn test_job_lone_player() {
        let engine = engine();
        let a = engine.register("a").unwrap();
        let mut rng = ScriptedRng::new([5, 50]);

        assert_eq!(
            engine.resolve_job(a.id, &mut rng).unwrap_err(),
            EngineError::NoTargetsAvailable
        );
        assert_eq!(engine.get_player(a.id).unwrap(), a);
    }

    #[test]
    fn test_leaderboard_page_size() {
        let engine = GameEngine::with_config(
            MemoryStore::new(),
            EngineConfig::default().with_leaderboard_size(2),
        );
        for name in ["a", "b", "c"] {
            engine.register(name).unwrap();
        }

        assert_eq!(engine.config().leaderboard_size, 2);
        assert_eq!(engine.leaderboard().unwrap().len(), 2);
        assert_eq!(engine.leaderboard_top(10).unwrap().len(), 3);
    }
}
