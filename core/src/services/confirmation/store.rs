//! Pending confirmation codes keyed by identifier.
//!
//! Each key moves through `Absent -> Pending -> {Confirmed, Expired,
//! Superseded}`. Every reader goes through [`observe`], so "expired" means
//! the same thing to confirmation, state queries and the sweep.

use chrono::Duration;
use std::sync::Arc;

use crate::domain::entities::PendingCode;
use crate::errors::AuthError;

use super::clock::Clock;
use super::sharded::{ShardedMap, DEFAULT_SHARDS};

/// What a key currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeState {
    Absent,
    Pending(PendingCode),
    /// Past its expiry but not yet removed
    Expired(PendingCode),
}

impl CodeState {
    pub fn is_pending(&self) -> bool {
        matches!(self, CodeState::Pending(_))
    }
}

fn observe(entry: Option<&PendingCode>, now: chrono::DateTime<chrono::Utc>) -> CodeState {
    match entry {
        None => CodeState::Absent,
        Some(pending) if pending.is_expired_at(now) => CodeState::Expired(pending.clone()),
        Some(pending) => CodeState::Pending(pending.clone()),
    }
}

pub struct CodeStore {
    entries: ShardedMap<PendingCode>,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl CodeStore {
    pub fn new(lifetime: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: ShardedMap::new(DEFAULT_SHARDS),
            lifetime,
            clock,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a fresh code for `key`, replacing any code already pending
    pub fn issue(&self, key: &str) -> PendingCode {
        let pending = PendingCode::issue(self.clock.now(), self.lifetime);
        self.entries.with_shard(key, |map| {
            map.insert(key.to_string(), pending.clone());
        });
        pending
    }

    pub fn state(&self, key: &str) -> CodeState {
        let now = self.clock.now();
        self.entries.with_shard(key, |map| observe(map.get(key), now))
    }

    /// Check `code` against the entry for `key`
    ///
    /// # Returns
    /// * `Ok(PendingCode)` - The code matches; the entry stays until
    ///   [`consume`](Self::consume) is called
    /// * `Err(AuthError::CodeNotFound)` - Nothing pending for `key`
    /// * `Err(AuthError::CodeExpired)` - Past expiry; the entry is removed
    /// * `Err(AuthError::InvalidCode)` - Wrong code; the entry is untouched
    pub fn verify(&self, key: &str, code: &str) -> Result<PendingCode, AuthError> {
        let now = self.clock.now();
        self.entries.with_shard(key, |map| match observe(map.get(key), now) {
            CodeState::Absent => Err(AuthError::CodeNotFound),
            CodeState::Expired(_) => {
                map.remove(key);
                Err(AuthError::CodeExpired)
            }
            CodeState::Pending(pending) if pending.matches(code) => Ok(pending),
            CodeState::Pending(_) => Err(AuthError::InvalidCode),
        })
    }

    /// Remove the entry for `key` if it still holds `code`. A code issued
    /// after verification supersedes the verified one and is left alone.
    pub fn consume(&self, key: &str, code: &str) -> bool {
        self.entries.with_shard(key, |map| {
            if map.get(key).is_some_and(|p| p.matches(code)) {
                map.remove(key);
                true
            } else {
                false
            }
        })
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .retain(|_, pending| !matches!(observe(Some(pending), now), CodeState::Expired(_)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
