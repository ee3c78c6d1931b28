//! Identity store implementations

mod in_memory;

#[cfg(test)]
mod tests;

pub use in_memory::{InMemoryAccountRepository, RESET_TOKEN_LIFETIME_MINUTES};
