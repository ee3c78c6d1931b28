//! Hotel catalog service module
//!
//! - Listing maintenance (create, update, delete)
//! - Catalog filtering, sorting and paging
//! - Rating and tag statistics

mod query;
mod service;

#[cfg(test)]
mod tests;

pub use query::{HotelQuery, HotelStats, SortBy};
pub use service::HotelService;
