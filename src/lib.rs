use actix_web::{web, HttpResponse};

pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/property-view")
            .route("/hotels", web::get().to(handlers::hotels::get_hotels))
            .route("/hotels", web::post().to(handlers::hotels::create_hotel))
            .route("/hotels/{id}", web::get().to(handlers::hotels::get_hotel_by_id))
            .route(
                "/hotels/{id}/amenities",
                web::post().to(handlers::hotels::add_amenities),
            )
            .route("/search", web::get().to(handlers::hotels::search_hotels))
            .route(
                "/histogram/{param}",
                web::get().to(handlers::hotels::get_histogram),
            ),
    );
}

/// Malformed JSON bodies answer with the same `{"error": ...}` shape as
/// the rest of the error taxonomy.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
