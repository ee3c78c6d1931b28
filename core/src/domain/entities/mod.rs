//! Domain entities representing core business objects.

pub mod account;
pub mod confirmation;
pub mod hotel;
pub mod token;


pub use account::{Account, NewAccount, DEFAULT_AVATAR_URL};
pub use confirmation::{generate_code, CodeKind, Contact, PendingCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use hotel::{
    CatalogHotel, Hotel, HotelDetails, NewHotel, NewReview, PetsAllowed, RatingSummary, Review,
    TagType,
};
pub use token::{Claims, SessionToken};
