//! CORS configuration for browser clients.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ph_shared::{CorsConfig, Environment};

/// Build the CORS middleware
///
/// Development, or an empty or `*` origin list, allows any origin. Otherwise
/// only the configured origins are accepted.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if environment.is_development() || config.allows_any_origin() {
        log::info!("Configuring CORS to allow any origin");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .fold(cors, |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}
