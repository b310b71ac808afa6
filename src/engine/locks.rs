//! Per-player exclusive locks with a bounded wait.
//!
//! An action locks every player it touches before reading them. Locks are
//! taken one at a time in ascending `PlayerId` order, so two actions naming
//! the same pair in opposite roles always contend on the lower id first and
//! cannot deadlock. Each wait is bounded by a deadline; on timeout the
//! partially acquired set is released.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::PlayerId;

/// Ids held by one action. Actions touch at most two players.
pub type LockSet = SmallVec<[PlayerId; 2]>;

/// Lock acquisition timed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockTimeout;

/// Table of currently locked player ids.
#[derive(Default)]
pub struct LockTable {
    held: Mutex<FxHashSet<PlayerId>>,
    released: Condvar,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    // The set is only ever mutated by insert/remove of whole ids, so a
    // poisoned guard still holds a consistent set.
    fn held(&self) -> MutexGuard<'_, FxHashSet<PlayerId>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock `ids` (duplicates allowed) waiting at most `timeout` overall.
    pub fn acquire(&self, ids: &[PlayerId], timeout: Duration) -> Result<LockGuard<'_>, LockTimeout> {
        let mut ordered: LockSet = ids.iter().copied().collect();
        ordered.sort_unstable();
        ordered.dedup();

        let deadline = Instant::now() + timeout;
        let mut guard = LockGuard {
            table: self,
            ids: LockSet::new(),
        };

        let mut held = self.held();
        for id in ordered {
            while held.contains(&id) {
                let now = Instant::now();
                if now >= deadline {
                    drop(held);
                    // `guard` releases whatever was acquired so far.
                    return Err(LockTimeout);
                }
                held = self
                    .released
                    .wait_timeout(held, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner)
                    .0;
            }
            held.insert(id);
            guard.ids.push(id);
        }

        Ok(guard)
    }

    /// True if `id` is currently locked.
    pub fn is_locked(&self, id: PlayerId) -> bool {
        self.held().contains(&id)
    }

    fn release(&self, ids: &[PlayerId]) {
        if ids.is_empty() {
            return;
        }
        let mut held = self.held();
        for id in ids {
            held.remove(id);
        }
        drop(held);
        self.released.notify_all();
    }
}

/// Holds a set of player locks until dropped.
pub struct LockGuard<'a> {
    table: &'a LockTable,
    ids: LockSet,
}

impl LockGuard<'_> {
    /// The locked ids, ascending.
    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.table.release(&self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(20);

    #[test]
    fn test_acquire_orders_and_dedups() {
        let table = LockTable::new();
        let ids = [PlayerId::new(5), PlayerId::new(2), PlayerId::new(5)];

        let guard = table.acquire(&ids, SHORT).unwrap();
        assert_eq!(guard.ids(), &[PlayerId::new(2), PlayerId::new(5)]);
        assert!(table.is_locked(PlayerId::new(2)));
        assert!(table.is_locked(PlayerId::new(5)));
    }

    #[test]
    fn test_drop_releases() {
        let table = LockTable::new();
        {
            let _guard = table.acquire(&[PlayerId::new(1)], SHORT).unwrap();
            assert!(table.is_locked(PlayerId::new(1)));
        }
        assert!(!table.is_locked(PlayerId::new(1)));
    }

    #[test]
    fn test_contention_times_out_and_rolls_back() {
        let table = LockTable::new();
        let _held = table.acquire(&[PlayerId::new(2)], SHORT).unwrap();

        let result = table.acquire(&[PlayerId::new(1), PlayerId::new(2)], SHORT);
        assert!(matches!(result, Err(LockTimeout)));
        // Player 1 was acquired first and must have been released.
        assert!(!table.is_locked(PlayerId::new(1)));
    }

    #[test]
    fn test_waiter_wakes_on_release() {
        let table = Arc::new(LockTable::new());
        let guard = table.acquire(&[PlayerId::new(1)], SHORT).unwrap();

        let waiter = {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                table
                    .acquire(&[PlayerId::new(1)], Duration::from_secs(5))
                    .map(|guard| guard.ids().to_vec())
            })
        };

        thread::sleep(Duration::from_millis(10));
        drop(guard);

        assert_eq!(waiter.join().unwrap(), Ok(vec![PlayerId::new(1)]));
    }

    #[test]
    fn test_opposite_order_pairs_do_not_deadlock() {
        let table = Arc::new(LockTable::new());
        let mut handles = Vec::new();

        for flip in [false, true] {
            let table = Arc::clone(&table);
            handles.push(thread::spawn(move || {
                let pair = if flip {
                    [PlayerId::new(2), PlayerId::new(1)]
                } else {
                    [PlayerId::new(1), PlayerId::new(2)]
                };
                for _ in 0..200 {
                    let guard = table.acquire(&pair, Duration::from_secs(5)).unwrap();
                    assert_eq!(guard.ids(), &[PlayerId::new(1), PlayerId::new(2)]);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
