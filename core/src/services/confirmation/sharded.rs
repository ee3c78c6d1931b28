//! String-keyed map split across independently locked shards.
//!
//! Every operation on one key runs under that key's shard lock, so per-key
//! read-modify-write sequences are linearisable while unrelated keys rarely
//! contend. Locks are plain `std` mutexes: no critical section awaits.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) const DEFAULT_SHARDS: usize = 16;

pub(crate) struct ShardedMap<V> {
    shards: Vec<Mutex<HashMap<String, V>>>,
}

impl<V> ShardedMap<V> {
    pub(crate) fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn shard_for(&self, key: &str) -> MutexGuard<'_, HashMap<String, V>> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let index = (hasher.finish() as usize) % self.shards.len();
        // Entries are replaced whole, so a poisoned shard is still consistent
        self.shards[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the shard holding `key`
    pub(crate) fn with_shard<R>(&self, key: &str, f: impl FnOnce(&mut HashMap<String, V>) -> R) -> R {
        let mut shard = self.shard_for(key);
        f(&mut shard)
    }

    /// Visit every entry shard by shard, dropping those for which `keep`
    /// returns false. Returns the number of entries removed.
    pub(crate) fn retain(&self, mut keep: impl FnMut(&str, &mut V) -> bool) -> usize {
        let mut removed = 0;
        for shard in &self.shards {
            let mut shard = shard.lock().unwrap_or_else(PoisonError::into_inner);
            let before = shard.len();
            shard.retain(|k, v| keep(k, v));
            removed += before - shard.len();
        }
        removed
    }

    pub(crate) fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }
}
