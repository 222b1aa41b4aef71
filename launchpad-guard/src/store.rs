//! Keyed counter storage with expiry.
//!
//! The guard never touches a map directly. It reads a value, computes the
//! successor, and writes it back with [`CounterStore::compare_and_swap`], so
//! any store that can do an atomic conditional write per key can back it.
//! [`MemoryStore`] is the process-local implementation; its state is lost on
//! restart.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::types::Result;

/// Storage for per-key counter records.
///
/// Entries whose expiry is at or before `now` read as absent.
pub trait CounterStore<V>: Send + Sync {
    /// Current live value for `key`.
    fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<V>>;

    /// Unconditionally write `value`.
    fn set(&self, key: &str, value: V, expires_at: DateTime<Utc>) -> Result<()>;

    /// Write `new` only if the live value equals `expected` (`None` meaning
    /// absent or expired). Returns whether the write happened.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&V>,
        new: V,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Drop `key` if present.
    fn remove(&self, key: &str) -> Result<()>;

    /// Drop every expired entry, returning how many were dropped.
    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize>;
}

#[derive(Debug, Clone)]
struct Stored<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

impl<V> Stored<V> {
    fn live(&self, now: DateTime<Utc>) -> Option<&V> {
        (self.expires_at > now).then_some(&self.value)
    }
}

/// In-memory [`CounterStore`] over a sharded concurrent map.
///
/// Compare-and-swap holds the shard lock for the key between the comparison
/// and the write.
#[derive(Debug)]
pub struct MemoryStore<V> {
    entries: DashMap<String, Stored<V>>,
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> CounterStore<V> for MemoryStore<V>
where
    V: Clone + PartialEq + Send + Sync,
{
    fn get(&self, key: &str, now: DateTime<Utc>) -> Result<Option<V>> {
        Ok(self
            .entries
            .get(key)
            .and_then(|stored| stored.live(now).cloned()))
    }

    fn set(&self, key: &str, value: V, expires_at: DateTime<Utc>) -> Result<()> {
        self.entries
            .insert(key.to_string(), Stored { value, expires_at });
        Ok(())
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&V>,
        new: V,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let stored = Stored {
            value: new,
            expires_at,
        };
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().live(now) != expected {
                    return Ok(false);
                }
                occupied.insert(stored);
                Ok(true)
            }
            Entry::Vacant(vacant) => {
                if expected.is_some() {
                    return Ok(false);
                }
                vacant.insert(stored);
                Ok(true)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let mut removed = 0;
        self.entries.retain(|_, stored| {
            let keep = stored.expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
