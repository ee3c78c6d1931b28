//! Business services containing domain logic and use cases.

pub mod auth;
pub mod confirmation;
pub mod hotel;
pub mod notification;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use confirmation::{
    Clock, CodeState, CodeStore, ConfirmationEngine, ConfirmationSweeper, ManualClock,
    SlidingWindowLimiter, SweepReport, SystemClock,
};
pub use hotel::{HotelQuery, HotelService, HotelStats, SortBy};
pub use notification::{EmailSender, SmsSender};
pub use token::TokenService;
