//! Process-wide confirmation state: pending codes and send history for
//! registration and password reset.

use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

use ph_shared::config::{CodePolicy, ConfirmationConfig};

use crate::domain::entities::CodeKind;

use super::clock::{Clock, SystemClock};
use super::rate_limiter::SlidingWindowLimiter;
use super::store::CodeStore;

/// Pending codes and send limiters for both confirmation flows
pub struct ConfirmationEngine {
    registration_codes: CodeStore,
    reset_codes: CodeStore,
    registration_limiter: SlidingWindowLimiter,
    reset_limiter: SlidingWindowLimiter,
}

impl ConfirmationEngine {
    pub fn new(config: &ConfirmationConfig, clock: Arc<dyn Clock>) -> Self {
        let codes = |policy: &CodePolicy| {
            CodeStore::new(Duration::minutes(policy.lifetime_minutes), clock.clone())
        };
        let limiter = |policy: &CodePolicy| {
            SlidingWindowLimiter::new(
                Duration::minutes(policy.window_minutes),
                policy.max_attempts,
                clock.clone(),
            )
        };

        Self {
            registration_codes: codes(&config.registration),
            reset_codes: codes(&config.password_reset),
            registration_limiter: limiter(&config.registration),
            reset_limiter: limiter(&config.password_reset),
        }
    }

    pub fn with_system_clock(config: &ConfirmationConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn codes(&self, kind: CodeKind) -> &CodeStore {
        match kind {
            CodeKind::Registration => &self.registration_codes,
            CodeKind::PasswordReset => &self.reset_codes,
        }
    }

    pub fn limiter(&self, kind: CodeKind) -> &SlidingWindowLimiter {
        match kind {
            CodeKind::Registration => &self.registration_limiter,
            CodeKind::PasswordReset => &self.reset_limiter,
        }
    }

    /// Remove expired codes and stale send history across all maps
    pub fn sweep(&self) -> SweepReport {
        let report = SweepReport {
            expired_registrations: self.registration_codes.purge_expired(),
            expired_resets: self.reset_codes.purge_expired(),
            registration_keys_pruned: self.registration_limiter.purge(),
            reset_keys_pruned: self.reset_limiter.purge(),
        };
        debug!(
            expired_registrations = report.expired_registrations,
            expired_resets = report.expired_resets,
            registration_keys_pruned = report.registration_keys_pruned,
            reset_keys_pruned = report.reset_keys_pruned,
            "Confirmation sweep finished"
        );
        report
    }
}

/// What one sweep removed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub expired_registrations: usize,
    pub expired_resets: usize,
    /// Limiter keys dropped because their whole history left the window
    pub registration_keys_pruned: usize,
    pub reset_keys_pruned: usize,
}

impl SweepReport {
    pub fn total_removed(&self) -> usize {
        self.expired_registrations
            + self.expired_resets
            + self.registration_keys_pruned
            + self.reset_keys_pruned
    }
}
