use actix_web::{web, HttpResponse};

use ph_core::domain::entities::{HotelDetails, NewHotel};

use crate::app::AppState;
use crate::handlers::ApiError;

/// Handler for GET /api/hotels/{id}
pub async fn get_hotel(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let hotel = state.hotel_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

/// Handler for POST /api/hotels
///
/// Ratings are computed from the reviews in the payload.
pub async fn create_hotel(
    state: web::Data<AppState>,
    request: web::Json<NewHotel>,
) -> Result<HttpResponse, ApiError> {
    let hotel = state.hotel_service.create(request.into_inner()).await?;

    log::info!("Hotel {} created", hotel.id);
    Ok(HttpResponse::Created().json(hotel))
}

/// Handler for PUT /api/hotels/{id}
///
/// Replaces the editable fields. Reviews and ratings are kept.
pub async fn update_hotel(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    request: web::Json<HotelDetails>,
) -> Result<HttpResponse, ApiError> {
    let hotel = state
        .hotel_service
        .update(path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(hotel))
}

/// Handler for DELETE /api/hotels/{id}
pub async fn delete_hotel(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.hotel_service.delete(id).await?;

    log::info!("Hotel {} deleted", id);
    Ok(HttpResponse::NoContent().finish())
}
