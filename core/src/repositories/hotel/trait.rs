//! Hotel listing storage interface.

use async_trait::async_trait;

use crate::domain::entities::Hotel;
use crate::errors::DomainError;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Store a new hotel. The `id` of the argument is ignored; the stored
    /// hotel carries the id assigned by the repository.
    async fn create(&self, hotel: Hotel) -> Result<Hotel, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>, DomainError>;

    /// Replace a stored hotel. Returns `DomainError::NotFound` if no hotel
    /// has `hotel.id`.
    async fn update(&self, hotel: Hotel) -> Result<Hotel, DomainError>;

    /// Returns `true` if a hotel was removed
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// All hotels in insertion order
    async fn list(&self) -> Result<Vec<Hotel>, DomainError>;
}
