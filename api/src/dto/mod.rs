pub mod auth;
pub mod hotel;

pub use auth::*;
pub use hotel::*;
