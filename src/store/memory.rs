//! In-memory PlayerStore implementation for tests and local runs.

use std::sync::RwLock;

use im::OrdMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId};

use super::{PlayerStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    players: OrdMap<PlayerId, Player>,
    usernames: FxHashMap<String, PlayerId>,
    next_id: u32,
}

/// Serialized form of a `MemoryStore`.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    next_id: u32,
    players: Vec<Player>,
}

/// In-memory implementation of PlayerStore.
///
/// Records live in a persistent `OrdMap`. A commit clones the map in O(1),
/// applies every update to the clone and swaps it in, so readers never see a
/// half-applied commit.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored players.
    pub fn len(&self) -> StoreResult<usize> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.players.len())
    }

    /// True if no player has registered.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Serialize every record with bincode.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        let snapshot = Snapshot {
            next_id: tables.next_id,
            players: tables.players.values().cloned().collect(),
        };
        bincode::serialize(&snapshot).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    /// Rebuild a store from `to_bytes` output.
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        let snapshot: Snapshot =
            bincode::deserialize(bytes).map_err(|e| StoreError::Snapshot(e.to_string()))?;

        let mut tables = Tables {
            next_id: snapshot.next_id,
            ..Tables::default()
        };
        for player in snapshot.players {
            if tables.players.contains_key(&player.id) {
                return Err(StoreError::DuplicateId(player.id));
            }
            if tables.usernames.insert(player.username.clone(), player.id).is_some() {
                return Err(StoreError::DuplicateUsername(player.username));
            }
            if player.id.raw() >= tables.next_id {
                tables.next_id = player.id.raw() + 1;
            }
            tables.players.insert(player.id, player);
        }

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

impl PlayerStore for MemoryStore {
    fn get(&self, id: PlayerId) -> StoreResult<Option<Player>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.players.get(&id).cloned())
    }

    fn get_all(&self) -> StoreResult<Vec<Player>> {
        let players = {
            let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
            tables.players.clone()
        };
        Ok(players.into_iter().map(|(_, player)| player).collect())
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<Player>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables
            .usernames
            .get(username)
            .and_then(|id| tables.players.get(id))
            .cloned())
    }

    fn insert(&self, username: &str) -> StoreResult<Player> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if tables.usernames.contains_key(username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let id = PlayerId::new(tables.next_id);
        tables.next_id += 1;

        let player = Player::new(id, username);
        tables.usernames.insert(player.username.clone(), id);
        tables.players.insert(id, player.clone());
        Ok(player)
    }

    fn commit(&self, records: &[Player]) -> StoreResult<()> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        let mut next = tables.players.clone();
        for record in records {
            let existing = next.get(&record.id).ok_or(StoreError::MissingRecord(record.id))?;
            if existing.username != record.username {
                return Err(StoreError::UsernameChanged(record.id));
            }
            next.insert(record.id, record.clone());
        }

        tables.players = next;
        Ok(())
    }

    fn ids(&self) -> StoreResult<Vec<PlayerId>> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.players.keys().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        let a = store.insert("vito").unwrap();
        let b = store.insert("michael").unwrap();

        assert_eq!(a.id, PlayerId::new(0));
        assert_eq!(b.id, PlayerId::new(1));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        store.insert("vito").unwrap();

        let err = store.insert("vito").unwrap_err();
        assert_eq!(err, StoreError::DuplicateUsername("vito".into()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_find_by_username() {
        let store = MemoryStore::new();
        let sonny = store.insert("sonny").unwrap();

        assert_eq!(store.find_by_username("sonny").unwrap(), Some(sonny));
        assert_eq!(store.find_by_username("fredo").unwrap(), None);
    }

    #[test]
    fn test_commit_writes_all_records() {
        let store = MemoryStore::new();
        let mut a = store.insert("a").unwrap();
        let mut b = store.insert("b").unwrap();

        a.money += 50;
        b.money -= 50;
        store.commit(&[a.clone(), b.clone()]).unwrap();

        assert_eq!(store.get(a.id).unwrap().unwrap().money, 1050);
        assert_eq!(store.get(b.id).unwrap().unwrap().money, 950);
    }

    #[test]
    fn test_commit_is_all_or_nothing() {
        let store = MemoryStore::new();
        let mut a = store.insert("a").unwrap();
        a.money = 5;
        let ghost = Player::new(PlayerId::new(99), "ghost");

        let err = store.commit(&[a.clone(), ghost]).unwrap_err();
        assert_eq!(err, StoreError::MissingRecord(PlayerId::new(99)));
        assert_eq!(store.get(a.id).unwrap().unwrap().money, 1000);
    }

    #[test]
    fn test_commit_rejects_username_change() {
        let store = MemoryStore::new();
        let mut a = store.insert("a").unwrap();
        a.username = "z".into();

        assert_eq!(store.commit(&[a.clone()]), Err(StoreError::UsernameChanged(a.id)));
    }

    #[test]
    fn test_get_all_and_ids_ordered() {
        let store = MemoryStore::new();
        for name in ["c", "a", "b"] {
            store.insert(name).unwrap();
        }

        let names: Vec<_> = store.get_all().unwrap().into_iter().map(|p| p.username).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(
            store.ids().unwrap(),
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]
        );
    }

    #[test]
    fn test_snapshot_restores_records_and_ids() {
        let store = MemoryStore::new();
        let mut a = store.insert("a").unwrap();
        store.insert("b").unwrap();
        a.kills = 3;
        store.commit(&[a.clone()]).unwrap();

        let bytes = store.to_bytes().unwrap();
        let restored = MemoryStore::from_bytes(&bytes).unwrap();

        assert_eq!(restored.get_all().unwrap(), store.get_all().unwrap());
        assert_eq!(restored.find_by_username("a").unwrap().unwrap().kills, 3);
        assert_eq!(restored.insert("c").unwrap().id, PlayerId::new(2));
    }

    #[test]
    fn test_snapshot_rejects_duplicate_ids() {
        let snapshot = Snapshot {
            next_id: 1,
            players: vec![
                Player::new(PlayerId::new(0), "a"),
                Player::new(PlayerId::new(0), "b"),
            ],
        };
        let bytes = bincode::serialize(&snapshot).unwrap();

        assert_eq!(
            MemoryStore::from_bytes(&bytes).err(),
            Some(StoreError::DuplicateId(PlayerId::new(0)))
        );
    }

    #[test]
    fn test_snapshot_rejects_duplicate_usernames() {
        let snapshot = Snapshot {
            next_id: 2,
            players: vec![
                Player::new(PlayerId::new(0), "a"),
                Player::new(PlayerId::new(1), "a"),
            ],
        };
        let bytes = bincode::serialize(&snapshot).unwrap();

        assert_eq!(
            MemoryStore::from_bytes(&bytes).err(),
            Some(StoreError::DuplicateUsername("a".into()))
        );
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(matches!(
            MemoryStore::from_bytes(&[0xff, 0x01]),
            Err(StoreError::Snapshot(_))
        ));
    }
}
