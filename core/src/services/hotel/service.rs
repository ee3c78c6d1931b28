//! Hotel catalog service implementation

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use ph_shared::PagedResponse;

use crate::domain::entities::{CatalogHotel, Hotel, HotelDetails, NewHotel, RatingSummary};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::HotelRepository;

use super::query::{HotelQuery, HotelStats};

pub struct HotelService {
    hotels: Arc<dyn HotelRepository>,
}

impl HotelService {
    pub fn new(hotels: Arc<dyn HotelRepository>) -> Self {
        Self { hotels }
    }

    pub async fn get(&self, id: i64) -> DomainResult<Hotel> {
        self.hotels
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Hotel {}", id)))
    }

    /// Create a listing. Rating figures are computed from the supplied
    /// reviews; reviews without a date are stamped with the current time.
    pub async fn create(&self, new_hotel: NewHotel) -> DomainResult<Hotel> {
        let details = new_hotel.details.normalize();
        details.validate()?;

        let now = Utc::now();
        let reviews: Vec<_> = new_hotel
            .reviews
            .into_iter()
            .map(|r| r.into_review(now))
            .collect();
        for review in &reviews {
            review.validate()?;
        }

        let hotel = self
            .hotels
            .create(Hotel {
                id: 0,
                details,
                date_added: now,
                rating: RatingSummary::from_reviews(&reviews),
                reviews,
            })
            .await?;

        info!(hotel_id = hotel.id, name = %hotel.details.name, "Hotel created");
        Ok(hotel)
    }

    /// Replace the editable fields; id, date added and reviews are kept
    pub async fn update(&self, id: i64, details: HotelDetails) -> DomainResult<Hotel> {
        let details = details.normalize();
        details.validate()?;

        let mut hotel = self.get(id).await?;
        hotel.details = details;
        let hotel = self.hotels.update(hotel).await?;

        info!(hotel_id = id, "Hotel updated");
        Ok(hotel)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.hotels.delete(id).await? {
            return Err(DomainError::not_found(format!("Hotel {}", id)));
        }
        info!(hotel_id = id, "Hotel deleted");
        Ok(())
    }

    /// Filter, order and page the catalog
    pub async fn catalog(&self, query: &HotelQuery) -> DomainResult<PagedResponse<CatalogHotel>> {
        let parsed_tags = query.parsed_tags();
        if parsed_tags.len() < query.tags.len() {
            debug!(
                requested = query.tags.len(),
                recognised = parsed_tags.len(),
                "Ignoring unrecognised catalog tags"
            );
        }

        let mut hotels: Vec<Hotel> = self
            .hotels
            .list()
            .await?
            .into_iter()
            .filter(|h| query.matches(h, &parsed_tags))
            .collect();
        hotels.sort_by(|a, b| query.sort_by.compare(a, b));

        let page = PagedResponse::from_vec(hotels, query.page);
        Ok(page.map(|h| CatalogHotel::from(&h)))
    }

    pub async fn stats(&self) -> DomainResult<HotelStats> {
        let hotels = self.hotels.list().await?;
        Ok(HotelStats::from_hotels(&hotels))
    }
}
