#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

fn hotel(name: &str, pets: u8, price: f64, tags: &[&str], ratings: &[u8]) -> Value {
    let reviews: Vec<Value> = ratings
        .iter()
        .map(|r| json!({ "username": "guest", "rating": r, "text": "Nice stay" }))
        .collect();
    json!({
        "name": name,
        "location": "Kyiv",
        "pets_allowed": pets,
        "price_per_night": price,
        "available_places": 10,
        "occupied_places": 4,
        "photo_urls": ["https://img.example.com/1.jpg", "https://img.example.com/2.jpg"],
        "tags": tags,
        "reviews": reviews
    })
}

#[actix_web::test]
async fn test_hotel_crud() {
    let ctx = common::context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/hotels")
        .set_json(hotel("Cat Castle", 0, 50.0, &["Vet"], &[5, 4]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["review_count"], 2);
    assert_eq!(created["average_rating"], 4.5);
    assert_eq!(created["percentage_5_star"], 50.0);

    let req = test::TestRequest::get().uri(&format!("/api/hotels/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "Cat Castle");

    let mut update = hotel("Cat Castle Deluxe", 2, 75.0, &["Vet", "Groomer"], &[]);
    update.as_object_mut().unwrap().remove("reviews");
    let req = test::TestRequest::put()
        .uri(&format!("/api/hotels/{}", id))
        .set_json(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["name"], "Cat Castle Deluxe");
    assert_eq!(updated["pets_allowed"], 2);
    assert_eq!(updated["review_count"], 2);

    let req = test::TestRequest::delete().uri(&format!("/api/hotels/{}", id)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&format!("/api/hotels/{}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");

    let req = test::TestRequest::delete().uri(&format!("/api/hotels/{}", id)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_rejects_invalid_price() {
    let ctx = common::context();
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/hotels")
        .set_json(hotel("Too Cheap", 1, 5.0, &[], &[]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_catalog_filters_sorts_and_pages() {
    let ctx = common::context();
    let app = init_app!(ctx);

    for payload in [
        hotel("Cat Castle", 0, 50.0, &["Vet"], &[5, 4]),
        hotel("Dog Den", 1, 20.0, &["Near_Sea"], &[3]),
        hotel("Pet Palace", 2, 90.0, &["Vet", "Groomer"], &[5, 5, 2]),
    ] {
        let req = test::TestRequest::post().uri("/api/hotels").set_json(payload).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    // Best selling first: most reviews
    let req = test::TestRequest::get().uri("/api/hotels/catalog").to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total_count"], 3);
    assert_eq!(page["items"][0]["name"], "Pet Palace");
    assert_eq!(page["items"][0]["available_places"], 6);
    assert_eq!(page["items"][0]["photo_url"], "https://img.example.com/1.jpg");

    let req = test::TestRequest::get()
        .uri("/api/hotels/catalog?tags=vet&sort_by=price_asc")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cat Castle", "Pet Palace"]);

    let req = test::TestRequest::get()
        .uri("/api/hotels/catalog?pets_allowed=1&search_term=DEN")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["name"], "Dog Den");

    let req = test::TestRequest::get()
        .uri("/api/hotels/catalog?sort_by=name_asc&page_number=2&page_size=2")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["page_index"], 2);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["name"], "Pet Palace");
}

#[actix_web::test]
async fn test_stats_count_ratings_and_tags() {
    let ctx = common::context();
    let app = init_app!(ctx);

    for payload in [
        hotel("Cat Castle", 0, 50.0, &["Vet"], &[5, 4]),
        hotel("Dog Den", 1, 20.0, &["Near_Sea"], &[3]),
    ] {
        let req = test::TestRequest::post().uri("/api/hotels").set_json(payload).to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/hotels/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["hotels_with_rating_3_or_above"], 2);
    assert_eq!(stats["hotels_with_rating_4_or_above"], 1);
    assert_eq!(stats["tag_counts"]["Vet"], 1);
    assert_eq!(stats["tag_counts"]["Near_Sea"], 1);
    assert_eq!(stats["tag_counts"]["Groomer"], 0);
}

#[actix_web::test]
async fn test_health_and_unknown_route() {
    let ctx = common::context();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
