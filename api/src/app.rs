//! Application state and factory
//!
//! Wires the services together from configuration and builds the actix
//! application. Tests build the same application with in-process senders
//! through [`AppState::with_senders`].

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use ph_core::repositories::{AccountRepository, HotelRepository};
use ph_core::services::notification::{EmailSender, SmsSender};
use ph_core::services::{AuthService, ConfirmationEngine, HotelService, TokenService};
use ph_infra::{create_senders, InMemoryAccountRepository, InMemoryHotelRepository, InfrastructureError};
use ph_shared::{error_codes, AppConfig, CorsConfig, Environment, ErrorResponse, HealthResponse};

use crate::middleware::create_cors;
use crate::routes;

/// Services shared by all workers
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub hotel_service: Arc<HotelService>,
    pub token_service: Arc<TokenService>,
    pub engine: Arc<ConfirmationEngine>,
}

impl AppState {
    /// Build the state with the senders selected by `notification.provider`
    pub fn from_config(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let senders = create_senders(&config.notification)?;
        Ok(Self::with_senders(config, senders.email, senders.sms))
    }

    pub fn with_senders(
        config: &AppConfig,
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
    ) -> Self {
        let accounts: Arc<dyn AccountRepository> =
            Arc::new(InMemoryAccountRepository::new(config.auth.password_hash_cost));
        let hotels: Arc<dyn HotelRepository> = Arc::new(InMemoryHotelRepository::new());

        let engine = Arc::new(ConfirmationEngine::with_system_clock(&config.confirmation));
        let token_service = Arc::new(TokenService::new(config.auth.jwt.clone()));

        let auth_service = Arc::new(AuthService::new(
            accounts,
            Arc::clone(&engine),
            email,
            sms,
            Arc::clone(&token_service),
        ));

        Self {
            auth_service,
            hotel_service: Arc::new(HotelService::new(hotels)),
            token_service,
            engine,
        }
    }
}

/// Create the application with all routes and middleware
pub fn create_app(
    state: web::Data<AppState>,
    cors: &CorsConfig,
    environment: Environment,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(web::JsonConfig::default().limit(max_payload_size))
        .wrap(Logger::default())
        .wrap(create_cors(cors, environment))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .configure(routes::auth::configure)
                .configure(routes::hotels::configure),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy("pethome-api", env!("CARGO_PKG_VERSION")))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
