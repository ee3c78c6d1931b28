//! # PetHome Core
//!
//! Business logic for the PetHome backend: domain entities, the
//! confirmation code engine, authentication, session tokens and the hotel
//! catalog. Storage and delivery are reached only through the repository
//! and sender traits defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, CatalogHotel, Claims, CodeKind, Contact, Hotel, HotelDetails, NewAccount, NewHotel,
    PendingCode, PetsAllowed, SessionToken, TagType,
};
pub use domain::value_objects::{AccountSummary, AuthResponse, CodeDispatch};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{AccountRepository, HotelRepository};
pub use services::{
    AuthService, ConfirmationEngine, ConfirmationSweeper, EmailSender, HotelQuery, HotelService,
    HotelStats, SmsSender, SortBy, TokenService,
};
