use actix_web::{web, HttpResponse};

use ph_core::services::hotel::HotelQuery;

use crate::app::AppState;
use crate::dto::CatalogParams;
use crate::handlers::ApiError;

/// Handler for GET /api/hotels/catalog
///
/// Example: `/api/hotels/catalog?tags=Vet,Pool&pets_allowed=0&sort_by=price_asc&page_number=2`
pub async fn catalog(
    state: web::Data<AppState>,
    params: web::Query<CatalogParams>,
) -> Result<HttpResponse, ApiError> {
    let query = HotelQuery::from(params.into_inner());
    let page = state.hotel_service.catalog(&query).await?;

    log::debug!(
        "Catalog page {} of {} ({} hotels match)",
        page.page_index,
        page.total_pages,
        page.total_count
    );
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/hotels/stats
pub async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let stats = state.hotel_service.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
