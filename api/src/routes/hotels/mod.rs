//! Hotel catalog and management endpoints

pub mod catalog;
pub mod manage;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/hotels")
            .route("", web::post().to(manage::create_hotel))
            .route("/catalog", web::get().to(catalog::catalog))
            .route("/stats", web::get().to(catalog::stats))
            .route("/{id}", web::get().to(manage::get_hotel))
            .route("/{id}", web::put().to(manage::update_hotel))
            .route("/{id}", web::delete().to(manage::delete_hotel)),
    );
}
