//! Confirmation code and send-throttling configuration

use serde::{Deserialize, Serialize};

/// Lifetime and send limits for one kind of confirmation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodePolicy {
    /// How long an issued code stays valid
    pub lifetime_minutes: i64,

    /// Sliding window over which sends are counted
    pub window_minutes: i64,

    /// Maximum sends per identifier inside the window
    pub max_attempts: usize,
}

impl CodePolicy {
    pub fn new(lifetime_minutes: i64, window_minutes: i64, max_attempts: usize) -> Self {
        Self {
            lifetime_minutes,
            window_minutes,
            max_attempts,
        }
    }

    /// Registration codes: valid 40 minutes, 3 sends per 15 minutes
    pub fn registration() -> Self {
        Self::new(40, 15, 3)
    }

    /// Password reset codes: valid 3 minutes, 2 sends per 30 minutes
    pub fn password_reset() -> Self {
        Self::new(3, 30, 2)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub registration: CodePolicy,
    pub password_reset: CodePolicy,

    /// Interval of the background sweep that drops expired codes and stale
    /// send history
    pub sweep_interval_minutes: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            registration: CodePolicy::registration(),
            password_reset: CodePolicy::password_reset(),
            sweep_interval_minutes: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let config = ConfirmationConfig::default();
        assert_eq!(config.registration, CodePolicy::new(40, 15, 3));
        assert_eq!(config.password_reset, CodePolicy::new(3, 30, 2));
        assert_eq!(config.sweep_interval_minutes, 16);
    }
}
