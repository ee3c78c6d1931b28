//! Authentication service module
//!
//! - Registration with an emailed or texted confirmation code
//! - Password reset through the account's contact method
//! - Login and logout with session tokens

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
