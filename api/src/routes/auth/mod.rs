//! Authentication endpoints
//!
//! - `POST /api/auth/register` and `POST /api/auth/confirm-registration`
//! - `POST /api/auth/request-password-reset` and `POST /api/auth/reset-password`
//! - `POST /api/auth/login` and `POST /api/auth/logout`

pub mod login;
pub mod logout;
pub mod password_reset;
pub mod register;

use actix_web::web;

use crate::middleware::JwtAuth;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register::register))
            .route(
                "/confirm-registration",
                web::post().to(register::confirm_registration),
            )
            .route(
                "/request-password-reset",
                web::post().to(password_reset::request_password_reset),
            )
            .route(
                "/reset-password",
                web::post().to(password_reset::reset_password),
            )
            .route("/login", web::post().to(login::login))
            .service(
                web::resource("/logout")
                    .wrap(JwtAuth::new())
                    .route(web::post().to(logout::logout)),
            ),
    );
}
