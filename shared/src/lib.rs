//! Shared utilities and common types for the PetHome server
//!
//! - Configuration types and loading
//! - Identifier classification and password rules
//! - Error response and pagination structures

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::{
    AppConfig, AuthConfig, CodePolicy, ConfirmationConfig, CorsConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, NotificationConfig, NotificationProvider, ServerConfig, SmtpConfig,
    TwilioConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse, PageRequest, PagedResponse};
pub use utils::identifier::{self, classify, IdentifierKind};
