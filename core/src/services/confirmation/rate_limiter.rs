//! Sliding-window send limiter.
//!
//! Remembers when each key last asked for a code. A key may send while
//! fewer than `max_attempts` timestamps fall inside the trailing window.
//! Every read and write prunes the key's history first and drops keys whose
//! history becomes empty.
//!
//! `try_acquire` checks and records in one critical section of the key's
//! shard, so concurrent requests for one key never admit more than
//! `max_attempts` sends per window. `can_send` and `record_attempt` are
//! separate critical sections and only suit callers that serialise per key.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use super::clock::Clock;
use super::sharded::{ShardedMap, DEFAULT_SHARDS};

pub struct SlidingWindowLimiter {
    attempts: ShardedMap<VecDeque<DateTime<Utc>>>,
    window: Duration,
    max_attempts: usize,
    clock: Arc<dyn Clock>,
}

/// Drop timestamps at or before `cutoff`. Timestamps are appended in
/// clock order, so the stale ones sit at the front.
fn prune(history: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
    while history.front().is_some_and(|t| *t <= cutoff) {
        history.pop_front();
    }
}

/// Prune `key` in place and return its remaining history length
fn prune_key(
    map: &mut HashMap<String, VecDeque<DateTime<Utc>>>,
    key: &str,
    cutoff: DateTime<Utc>,
) -> usize {
    let Some(history) = map.get_mut(key) else {
        return 0;
    };
    prune(history, cutoff);
    let len = history.len();
    if len == 0 {
        map.remove(key);
    }
    len
}

impl SlidingWindowLimiter {
    pub fn new(window: Duration, max_attempts: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            attempts: ShardedMap::new(DEFAULT_SHARDS),
            window,
            max_attempts,
            clock,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    fn cutoff(&self) -> DateTime<Utc> {
        self.clock.now() - self.window
    }

    /// Whether `key` may be sent another code now
    pub fn can_send(&self, key: &str) -> bool {
        let cutoff = self.cutoff();
        self.attempts
            .with_shard(key, |map| prune_key(map, key, cutoff) < self.max_attempts)
    }

    /// Reserve a send for `key` if the window has room
    ///
    /// Prunes, checks and records under one shard lock. Returns `false`
    /// without recording when the key is at its limit.
    pub fn try_acquire(&self, key: &str) -> bool {
        let now = self.clock.now();
        let cutoff = now - self.window;
        self.attempts.with_shard(key, |map| {
            if prune_key(map, key, cutoff) >= self.max_attempts {
                return false;
            }
            map.entry(key.to_string()).or_default().push_back(now);
            true
        })
    }

    /// Record a send for `key`
    pub fn record_attempt(&self, key: &str) {
        let now = self.clock.now();
        let cutoff = now - self.window;
        self.attempts.with_shard(key, |map| {
            let history = map.entry(key.to_string()).or_default();
            history.push_back(now);
            prune(history, cutoff);
        });
    }

    /// In-window sends recorded for `key`
    pub fn attempts(&self, key: &str) -> usize {
        let cutoff = self.cutoff();
        self.attempts.with_shard(key, |map| prune_key(map, key, cutoff))
    }

    /// How long until `key` may send again, or `None` if it may send now
    pub fn retry_after(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        let cutoff = now - self.window;
        self.attempts.with_shard(key, |map| {
            if prune_key(map, key, cutoff) < self.max_attempts {
                return None;
            }
            // The oldest in-window send leaves the window first
            map.get(key)
                .and_then(|history| history.front())
                .map(|oldest| (*oldest + self.window - now).max(Duration::zero()))
        })
    }

    /// Prune every key and drop keys left without history. Returns the
    /// number of keys removed.
    pub fn purge(&self) -> usize {
        let cutoff = self.cutoff();
        self.attempts.retain(|_, history| {
            prune(history, cutoff);
            !history.is_empty()
        })
    }

    /// Number of keys with in-memory history, stale or not
    pub fn tracked_keys(&self) -> usize {
        self.attempts.len()
    }
}
