//! Tests for hotel maintenance, catalog queries and statistics

use chrono::{Duration, Utc};
use std::sync::Arc;

use ph_shared::{PageRequest, PagedResponse};

use super::mocks::MockHotelRepository;
use crate::domain::entities::{CatalogHotel, HotelDetails, NewHotel, NewReview, PetsAllowed, TagType};
use crate::errors::{DomainError, ValidationError};
use crate::services::hotel::{HotelQuery, HotelService, SortBy};

fn details(name: &str, price: f64, pets: PetsAllowed, tags: Vec<TagType>) -> HotelDetails {
    HotelDetails {
        name: name.to_string(),
        location: "Lviv".to_string(),
        pets_allowed: pets,
        price_per_night: price,
        available_places: 12,
        occupied_places: 5,
        free_cancellation: false,
        no_prepayment: true,
        photo_urls: vec![format!("https://img/{}.jpg", name)],
        large_logo_url: None,
        small_logo_url: None,
        discount_percentage: 0,
        extra_option: None,
        description: Some("Cosy rooms".to_string()),
        groomer_price: 0.0,
        vet_price: 0.0,
        cctv_price: 0.0,
        tags,
        custom_tags: vec![],
    }
}

fn review(rating: u8) -> NewReview {
    NewReview {
        user_id: None,
        username: "guest".to_string(),
        avatar_url: None,
        rating,
        text: "Nice stay".to_string(),
        date_added: None,
    }
}

fn service() -> HotelService {
    HotelService::new(Arc::new(MockHotelRepository::default()))
}

/// Three hotels:
/// 1. "Cat Castle": cats, 50, Vet, ratings [5, 4] (avg 4.5, 2 reviews)
/// 2. "Dog Den": dogs, 20, NearSea + custom "Pool", ratings [3] (1 review)
/// 3. "Pet Palace": both, 90, Vet + Groomer, ratings [5, 5, 2] (avg 4, 3 reviews)
async fn seeded() -> HotelService {
    let service = service();
    service
        .create(NewHotel {
            details: details("Cat Castle", 50.0, PetsAllowed::Cats, vec![TagType::Vet]),
            reviews: vec![review(5), review(4)],
        })
        .await
        .unwrap();

    let mut dog_den = details("Dog Den", 20.0, PetsAllowed::Dogs, vec![TagType::NearSea]);
    dog_den.custom_tags = vec!["Pool".to_string()];
    service
        .create(NewHotel {
            details: dog_den,
            reviews: vec![review(3)],
        })
        .await
        .unwrap();

    service
        .create(NewHotel {
            details: details(
                "Pet Palace",
                90.0,
                PetsAllowed::Both,
                vec![TagType::Vet, TagType::Groomer],
            ),
            reviews: vec![review(5), review(5), review(2)],
        })
        .await
        .unwrap();
    service
}

fn names(page: &PagedResponse<CatalogHotel>) -> Vec<&str> {
    page.items.iter().map(|h| h.name.as_str()).collect()
}

#[tokio::test]
async fn test_create_computes_rating_summary() {
    let service = service();
    let hotel = service
        .create(NewHotel {
            details: details("Paws", 40.0, PetsAllowed::Both, vec![]),
            reviews: vec![review(5), review(4), review(4), review(1)],
        })
        .await
        .unwrap();

    assert_eq!(hotel.id, 1);
    assert_eq!(hotel.rating.review_count, 4);
    assert!((hotel.rating.average_rating - 3.5).abs() < f64::EPSILON);
    assert!((hotel.rating.percentage_4_star - 50.0).abs() < f64::EPSILON);
    assert!((hotel.rating.percentage_1_star - 25.0).abs() < f64::EPSILON);
    assert!(hotel.reviews.iter().all(|r| r.date_added <= Utc::now()));
}

#[tokio::test]
async fn test_create_truncates_custom_tags() {
    let service = service();
    let mut d = details("Paws", 40.0, PetsAllowed::Both, vec![]);
    d.custom_tags = (1..=7).map(|i| format!("tag{}", i)).collect();

    let hotel = service
        .create(NewHotel {
            details: d,
            reviews: vec![],
        })
        .await
        .unwrap();

    assert_eq!(hotel.details.custom_tags.len(), 5);
    assert_eq!(hotel.details.custom_tags[4], "tag5");
}

#[tokio::test]
async fn test_create_rejects_invalid_listing() {
    let service = service();

    let err = service
        .create(NewHotel {
            details: details("Cheap", 5.0, PetsAllowed::Cats, vec![]),
            reviews: vec![],
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::OutOfRange { ref field, .. }) if field == "price_per_night"
    ));

    let err = service
        .create(NewHotel {
            details: details("Fine", 50.0, PetsAllowed::Cats, vec![]),
            reviews: vec![review(6)],
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(_)));
}

#[tokio::test]
async fn test_update_keeps_reviews_and_id() {
    let service = seeded().await;
    let before = service.get(1).await.unwrap();

    let updated = service
        .update(1, details("Cat Kingdom", 60.0, PetsAllowed::Cats, vec![]))
        .await
        .unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.details.name, "Cat Kingdom");
    assert_eq!(updated.reviews, before.reviews);
    assert_eq!(updated.rating, before.rating);
    assert_eq!(updated.date_added, before.date_added);
}

#[tokio::test]
async fn test_missing_hotel_is_not_found() {
    let service = seeded().await;

    assert!(matches!(service.get(99).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(
        service
            .update(99, details("X", 50.0, PetsAllowed::Cats, vec![]))
            .await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(service.delete(99).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_removes_hotel() {
    let service = seeded().await;
    service.delete(2).await.unwrap();
    assert!(service.get(2).await.is_err());
    assert_eq!(service.catalog(&HotelQuery::default()).await.unwrap().total_count, 2);
}

#[tokio::test]
async fn test_catalog_default_sort_is_best_selling() {
    let service = seeded().await;
    let page = service.catalog(&HotelQuery::default()).await.unwrap();

    assert_eq!(names(&page), vec!["Pet Palace", "Cat Castle", "Dog Den"]);
    assert_eq!(page.page_size, 8);
    assert_eq!(page.total_pages, 1);

    let palace = &page.items[0];
    assert_eq!(palace.available_places, 7);
    assert_eq!(palace.photo_url.as_deref(), Some("https://img/Pet Palace.jpg"));
}

async fn sorted(service: &HotelService, sort_by: SortBy) -> PagedResponse<CatalogHotel> {
    let query = HotelQuery {
        sort_by,
        ..Default::default()
    };
    service.catalog(&query).await.unwrap()
}

#[tokio::test]
async fn test_catalog_sort_orders() {
    let service = seeded().await;
    assert_eq!(names(&sorted(&service, SortBy::NameDesc).await), vec!["Pet Palace", "Dog Den", "Cat Castle"]);
    assert_eq!(names(&sorted(&service, SortBy::PriceAsc).await), vec!["Dog Den", "Cat Castle", "Pet Palace"]);
    assert_eq!(names(&sorted(&service, SortBy::DateOldNew).await), vec!["Cat Castle", "Dog Den", "Pet Palace"]);
}

#[tokio::test]
async fn test_catalog_filters() {
    let service = seeded().await;

    let cats = HotelQuery {
        pets_allowed: Some(PetsAllowed::Cats),
        ..Default::default()
    };
    assert_eq!(
        names(&service.catalog(&cats).await.unwrap()),
        vec!["Pet Palace", "Cat Castle"]
    );

    let rated = HotelQuery {
        min_rating: Some(4.2),
        ..Default::default()
    };
    assert_eq!(names(&service.catalog(&rated).await.unwrap()), vec!["Cat Castle"]);

    let priced = HotelQuery {
        price_min: Some(20.0),
        price_max: Some(50.0),
        sort_by: SortBy::NameAsc,
        ..Default::default()
    };
    assert_eq!(
        names(&service.catalog(&priced).await.unwrap()),
        vec!["Cat Castle", "Dog Den"]
    );

    let search = HotelQuery {
        search: Some("pALAce".to_string()),
        ..Default::default()
    };
    assert_eq!(names(&service.catalog(&search).await.unwrap()), vec!["Pet Palace"]);
}

#[tokio::test]
async fn test_catalog_tag_filter() {
    let service = seeded().await;

    let vet = HotelQuery {
        tags: vec!["vet".to_string()],
        ..Default::default()
    };
    assert_eq!(
        names(&service.catalog(&vet).await.unwrap()),
        vec!["Pet Palace", "Cat Castle"]
    );

    // A custom tag matches once any value parses as a fixed tag
    let groomer_or_pool = HotelQuery {
        tags: vec!["Groomer".to_string(), "Pool".to_string()],
        ..Default::default()
    };
    assert_eq!(
        names(&service.catalog(&groomer_or_pool).await.unwrap()),
        vec!["Pet Palace", "Dog Den"]
    );

    // No value parses: the tag filter is skipped entirely
    let unknown = HotelQuery {
        tags: vec!["Pool".to_string(), "Jacuzzi".to_string()],
        ..Default::default()
    };
    assert_eq!(service.catalog(&unknown).await.unwrap().total_count, 3);
}

#[tokio::test]
async fn test_catalog_paging() {
    let service = seeded().await;
    let query = HotelQuery {
        page: PageRequest::new(Some(2), Some(2)),
        ..Default::default()
    };

    let page = service.catalog(&query).await.unwrap();
    assert_eq!(names(&page), vec!["Dog Den"]);
    assert_eq!(page.page_index, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn test_stats() {
    let service = seeded().await;
    let stats = service.stats().await.unwrap();

    assert_eq!(stats.hotels_with_rating_1_or_above, 3);
    assert_eq!(stats.hotels_with_rating_3_or_above, 3);
    assert_eq!(stats.hotels_with_rating_4_or_above, 2);
    assert_eq!(stats.tag_counts["Vet"], 2);
    assert_eq!(stats.tag_counts["Near_Sea"], 1);
    assert_eq!(stats.tag_counts["CCTV_Cameras"], 0);
    assert_eq!(stats.tag_counts.len(), TagType::ALL.len());
}

#[test]
fn test_sort_by_parsing() {
    assert_eq!(SortBy::parse_or_default(Some("PRICE_DESC")), SortBy::PriceDesc);
    assert_eq!(SortBy::parse_or_default(Some("random")), SortBy::BestSelling);
    assert_eq!(SortBy::parse_or_default(None), SortBy::BestSelling);
}

#[test]
fn test_review_dates_default_to_now() {
    let before = Utc::now() - Duration::seconds(1);
    let review = review(4).into_review(Utc::now());
    assert!(review.date_added > before);
}
