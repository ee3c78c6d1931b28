use actix_web::{web, HttpResponse};

use ph_shared::MessageResponse;

use crate::app::AppState;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for POST /api/auth/logout
///
/// Revokes the bearer token used for this request. Requires
/// `Authorization: Bearer {token}`.
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError> {
    state.auth_service.logout(&auth.claims).await?;

    log::info!("Account {} logged out", auth.account_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully.")))
}
