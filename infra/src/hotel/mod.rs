//! Hotel listing storage

mod in_memory;

pub use in_memory::InMemoryHotelRepository;
