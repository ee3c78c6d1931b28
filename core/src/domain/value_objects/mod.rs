//! Value objects representing immutable domain concepts.

pub mod auth_response;

pub use auth_response::{AccountSummary, AuthResponse, CodeDispatch};
