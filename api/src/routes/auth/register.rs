use actix_web::{web, HttpResponse};
use validator::Validate;

use ph_core::domain::value_objects::AccountSummary;

use crate::app::AppState;
use crate::dto::{ConfirmRegistrationRequest, RegisterRequest, RegistrationConfirmed};
use crate::handlers::ApiError;

/// Handler for POST /api/auth/register
///
/// Validates the registration data and sends a confirmation code to the
/// email address or phone number given as identifier.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Check your email for confirmation.",
///     "identifier": "user@test.com",
///     "channel": "email"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid identifier, nickname or weak password
/// - 409 Conflict: identifier or nickname already taken
/// - 429 Too Many Requests: too many codes sent to this identifier
/// - 503 Service Unavailable: the code could not be delivered
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let dispatch = state
        .auth_service
        .register(&request.identifier, &request.nickname, &request.password)
        .await?;

    log::info!("Registration code dispatched via {}", dispatch.channel);
    Ok(HttpResponse::Ok().json(dispatch))
}

/// Handler for POST /api/auth/confirm-registration
///
/// Checks the code and creates the account. A wrong code leaves the pending
/// registration in place so the user can retry.
pub async fn confirm_registration(
    state: web::Data<AppState>,
    request: web::Json<ConfirmRegistrationRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;

    let account = state
        .auth_service
        .confirm_registration(
            &request.identifier,
            &request.nickname,
            &request.password,
            &request.confirmation_code,
        )
        .await?;

    log::info!("Account {} registered", account.id);
    Ok(HttpResponse::Created().json(RegistrationConfirmed {
        message: "Registration successful.".to_string(),
        account: AccountSummary::from(&account),
    }))
}
