use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::ApiError;
use crate::models::requests::CreateHotelRequest;
use crate::service;

#[derive(Debug, Deserialize)]
pub struct HotelSearchQuery {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub amenities: Option<String>,
}

pub async fn get_hotels(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let hotels = service::list_hotels(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(hotels))
}

pub async fn get_hotel_by_id(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let hotel = service::get_hotel(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

pub async fn search_hotels(
    pool: web::Data<SqlitePool>,
    params: web::Query<HotelSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let params = params.into_inner();
    // Comma-separated list on the wire; the service applies only the first.
    let amenities = params
        .amenities
        .map(|raw| raw.split(',').map(str::to_string).collect::<Vec<_>>());

    let hotels = service::search_hotels(
        pool.get_ref(),
        params.name,
        params.brand,
        params.city,
        params.county,
        amenities,
    )
    .await?;
    Ok(HttpResponse::Ok().json(hotels))
}

pub async fn create_hotel(
    pool: web::Data<SqlitePool>,
    body: web::Json<CreateHotelRequest>,
) -> Result<HttpResponse, ApiError> {
    let created = service::create_hotel(pool.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

pub async fn add_amenities(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    body: web::Json<Vec<String>>,
) -> Result<HttpResponse, ApiError> {
    service::add_amenities(pool.get_ref(), path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Created().finish())
}

pub async fn get_histogram(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let histogram = service::histogram(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(histogram))
}
