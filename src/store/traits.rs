use crate::core::{Player, PlayerId};

use super::StoreResult;

/// Keyed storage of player records.
///
/// The engine only needs point reads, a full scan, registration, and an
/// all-or-nothing commit of several records. Implementations must be safe to
/// share across threads; serializing concurrent actions is the engine's job,
/// not the store's.
pub trait PlayerStore: Send + Sync {
    /// Load one record.
    fn get(&self, id: PlayerId) -> StoreResult<Option<Player>>;

    /// Load every record, ordered by id.
    fn get_all(&self) -> StoreResult<Vec<Player>>;

    /// Load a record by its unique username.
    fn find_by_username(&self, username: &str) -> StoreResult<Option<Player>>;

    /// Create a record with registration defaults and a fresh id.
    fn insert(&self, username: &str) -> StoreResult<Player>;

    /// Replace existing records. Either every record is written or none is.
    fn commit(&self, records: &[Player]) -> StoreResult<()>;

    /// All ids, ascending.
    fn ids(&self) -> StoreResult<Vec<PlayerId>> {
        Ok(self.get_all()?.into_iter().map(|player| player.id).collect())
    }
}
