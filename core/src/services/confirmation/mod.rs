//! Confirmation codes and send throttling for registration and password
//! reset.
//!
//! - `store` - pending codes with expiry
//! - `rate_limiter` - sliding-window send limits
//! - `engine` - one store and one limiter per flow
//! - `sweeper` - periodic removal of expired state

pub mod clock;
pub mod engine;
pub mod rate_limiter;
mod sharded;
pub mod store;
pub mod sweeper;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{ConfirmationEngine, SweepReport};
pub use rate_limiter::SlidingWindowLimiter;
pub use store::{CodeState, CodeStore};
pub use sweeper::ConfirmationSweeper;
