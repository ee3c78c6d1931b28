pub mod auth;
pub mod hotels;
