use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::LoginRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/login
///
/// Accepts a phone number, email address or nickname with the password and
/// returns a bearer session token.
///
/// ## Errors
/// - 400 Bad Request: missing fields, malformed identifier or unknown user
/// - 401 Unauthorized: wrong password
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = state
        .auth_service
        .login(&request.identifier, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
