//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session token signing and password hashing
//! - `confirmation` - confirmation code lifetimes and send limits
//! - `environment` - environment detection and logging configuration
//! - `notification` - email (SMTP) and SMS (Twilio) delivery
//! - `server` - HTTP server and CORS

pub mod auth;
pub mod confirmation;
pub mod environment;
pub mod notification;
pub mod server;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use confirmation::{CodePolicy, ConfirmationConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{NotificationConfig, NotificationProvider, SmtpConfig, TwilioConfig};
pub use server::{CorsConfig, ServerConfig};

/// Prefix of environment variables overriding configuration values,
/// e.g. `PETHOME__SERVER__PORT=9000` or `PETHOME__AUTH__JWT__SECRET=...`
pub const ENV_PREFIX: &str = "PETHOME";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub auth: AuthConfig,
    pub confirmation: ConfirmationConfig,
    pub notification: NotificationConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            environment: env,
            logging: LoggingConfig::for_environment(env),
            ..Default::default()
        }
    }

    /// Load configuration from `.env`, the optional per-environment TOML
    /// file and `PETHOME__*` environment variables, in increasing priority.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development
        let _ = dotenvy::dotenv();

        let env = Environment::from_env();
        let defaults = Self::for_environment(env);

        Config::builder()
            .add_source(Config::try_from(&defaults)?)
            .add_source(File::new(env.config_file(), FileFormat::Toml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_environment_sets_logging() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.confirmation.registration.lifetime_minutes, 40);
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "server": { "port": 9000 } }"#).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.confirmation.password_reset.max_attempts, 2);
        assert_eq!(config.notification.provider, NotificationProvider::Mock);
    }
}
