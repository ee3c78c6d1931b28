pub mod account;
pub mod hotel;

pub use account::AccountRepository;
pub use hotel::HotelRepository;
