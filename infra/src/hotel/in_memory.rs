//! In-memory hotel repository with sequential ids

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use ph_core::domain::entities::Hotel;
use ph_core::errors::DomainError;
use ph_core::repositories::HotelRepository;

/// Hotels keyed by id. Ids increase monotonically, so map order is
/// insertion order.
pub struct InMemoryHotelRepository {
    hotels: RwLock<BTreeMap<i64, Hotel>>,
    next_id: AtomicI64,
}

impl InMemoryHotelRepository {
    pub fn new() -> Self {
        Self {
            hotels: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryHotelRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    async fn create(&self, mut hotel: Hotel) -> Result<Hotel, DomainError> {
        hotel.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.hotels.write().await.insert(hotel.id, hotel.clone());
        debug!(hotel_id = hotel.id, "Hotel stored");
        Ok(hotel)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>, DomainError> {
        Ok(self.hotels.read().await.get(&id).cloned())
    }

    async fn update(&self, hotel: Hotel) -> Result<Hotel, DomainError> {
        let mut hotels = self.hotels.write().await;
        match hotels.get_mut(&hotel.id) {
            Some(slot) => {
                *slot = hotel.clone();
                Ok(hotel)
            }
            None => Err(DomainError::not_found(format!("Hotel {}", hotel.id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.hotels.write().await.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Hotel>, DomainError> {
        Ok(self.hotels.read().await.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ph_core::domain::entities::{HotelDetails, PetsAllowed, RatingSummary};

    fn hotel(name: &str) -> Hotel {
        Hotel {
            id: 0,
            details: HotelDetails {
                name: name.to_string(),
                location: "Odesa".to_string(),
                pets_allowed: PetsAllowed::Dogs,
                price_per_night: 30.0,
                available_places: 4,
                occupied_places: 0,
                free_cancellation: true,
                no_prepayment: true,
                photo_urls: vec![],
                large_logo_url: None,
                small_logo_url: None,
                discount_percentage: 0,
                extra_option: None,
                description: None,
                groomer_price: 0.0,
                vet_price: 0.0,
                cctv_price: 0.0,
                tags: vec![],
                custom_tags: vec![],
            },
            date_added: Utc::now(),
            rating: RatingSummary::default(),
            reviews: vec![],
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let repo = InMemoryHotelRepository::new();
        let first = repo.create(hotel("A")).await.unwrap();
        let second = repo.create(hotel("B")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        assert!(repo.delete(2).await.unwrap());
        assert!(!repo.delete(2).await.unwrap());
        let third = repo.create(hotel("C")).await.unwrap();
        assert_eq!(third.id, 3);

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.details.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_update_missing_hotel() {
        let repo = InMemoryHotelRepository::new();
        let mut h = hotel("Ghost");
        h.id = 42;
        assert!(matches!(repo.update(h).await, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_hotel() {
        let repo = InMemoryHotelRepository::new();
        let mut stored = repo.create(hotel("Old")).await.unwrap();
        stored.details.name = "New".to_string();
        repo.update(stored).await.unwrap();
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().details.name, "New");
    }
}
