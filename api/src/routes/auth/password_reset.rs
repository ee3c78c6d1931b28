use actix_web::{web, HttpResponse};
use validator::Validate;

use ph_shared::MessageResponse;

use crate::app::AppState;
use crate::dto::{PasswordResetRequest, ResetPasswordRequest};
use crate::handlers::ApiError;

/// Handler for POST /api/auth/request-password-reset
///
/// The identifier may be a nickname, email address or phone number. The
/// code goes to the account's email address, or its phone number when it
/// has no email. The response names the address to use when confirming.
pub async fn request_password_reset(
    state: web::Data<AppState>,
    request: web::Json<PasswordResetRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let dispatch = state
        .auth_service
        .request_password_reset(&request.identifier)
        .await?;

    Ok(HttpResponse::Ok().json(dispatch))
}

/// Handler for POST /api/auth/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    state
        .auth_service
        .reset_password(&request.identifier, &request.code, &request.new_password)
        .await?;

    log::info!("Password reset completed");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password has been reset successfully.")))
}
