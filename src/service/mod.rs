use std::collections::HashMap;

use chrono::NaiveTime;
use sqlx::SqlitePool;
use validator::Validate;

use crate::error::ApiError;
use crate::models::hotel::{CONTACT_TYPE_EMAIL, CONTACT_TYPE_PHONE};
use crate::models::requests::CreateHotelRequest;
use crate::models::responses::{HotelDetailed, HotelSummary};
use crate::repository::hotels::{
    NewAddress, NewArrivalTime, NewContact, NewHotel, SearchFilters,
};
use crate::repository::{amenities, hotels};

pub async fn list_hotels(pool: &SqlitePool) -> Result<Vec<HotelSummary>, ApiError> {
    log::info!("Getting all hotels");
    let aggregates = hotels::fetch_all(pool).await?;
    Ok(aggregates.iter().map(HotelSummary::from).collect())
}

pub async fn get_hotel(pool: &SqlitePool, id: i64) -> Result<HotelDetailed, ApiError> {
    log::info!("Getting hotel by id: {id}");
    hotels::fetch_by_id(pool, id)
        .await?
        .map(|aggregate| HotelDetailed::from(&aggregate))
        .ok_or(ApiError::HotelNotFound(id))
}

pub async fn search_hotels(
    pool: &SqlitePool,
    name: Option<String>,
    brand: Option<String>,
    city: Option<String>,
    county: Option<String>,
    amenities: Option<Vec<String>>,
) -> Result<Vec<HotelSummary>, ApiError> {
    log::info!(
        "Searching hotels with filters - name: {name:?}, brand: {brand:?}, city: {city:?}, \
         county: {county:?}, amenities: {amenities:?}"
    );

    // Only the first requested amenity is applied as a filter.
    let amenity = amenities.and_then(|list| list.into_iter().next());

    let filters = SearchFilters {
        name,
        brand,
        city,
        county,
        amenity,
    };
    let aggregates = hotels::search(pool, &filters).await?;
    Ok(aggregates.iter().map(HotelSummary::from).collect())
}

pub async fn create_hotel(
    pool: &SqlitePool,
    request: CreateHotelRequest,
) -> Result<HotelSummary, ApiError> {
    log::info!("Creating new hotel: {}", request.name);
    request.validate()?;

    let arrival_time = request
        .arrival_time
        .as_ref()
        .map(|arrival| -> Result<NewArrivalTime, ApiError> {
            Ok(NewArrivalTime {
                check_in: parse_time(&arrival.check_in)?,
                check_out: arrival
                    .check_out
                    .as_deref()
                    .map(parse_time)
                    .transpose()?,
            })
        })
        .transpose()?;

    let mut contacts = vec![NewContact {
        contact_type: CONTACT_TYPE_PHONE,
        contact_value: &request.contacts.phone,
    }];
    if let Some(email) = &request.contacts.email {
        contacts.push(NewContact {
            contact_type: CONTACT_TYPE_EMAIL,
            contact_value: email,
        });
    }

    let new_hotel = NewHotel {
        name: &request.name,
        description: request.description.as_deref(),
        brand: request.brand.as_deref(),
        address: NewAddress {
            house_number: request.address.house_number.as_deref(),
            street: &request.address.street,
            city: &request.address.city,
            county: request.address.county.as_deref(),
            post_code: request.address.post_code.as_deref(),
        },
        contacts,
        arrival_time,
    };

    let id = hotels::insert(pool, &new_hotel).await?;
    log::info!("Hotel created with id: {id}");

    let aggregate = hotels::fetch_by_id(pool, id)
        .await?
        .ok_or(ApiError::HotelNotFound(id))?;
    Ok(HotelSummary::from(&aggregate))
}

pub async fn add_amenities(
    pool: &SqlitePool,
    hotel_id: i64,
    names: Vec<String>,
) -> Result<(), ApiError> {
    log::info!("Adding amenities to hotel {hotel_id}: {names:?}");

    if !hotels::exists(pool, hotel_id).await? {
        return Err(ApiError::HotelNotFound(hotel_id));
    }

    let created = amenities::add_to_hotel(pool, hotel_id, &names).await?;
    if created > 0 {
        log::info!("Successfully added {created} amenities to hotel {hotel_id}");
    } else {
        log::info!("No new amenities to add for hotel {hotel_id} (all already exist)");
    }
    Ok(())
}

pub async fn histogram(pool: &SqlitePool, param: &str) -> Result<HashMap<String, i64>, ApiError> {
    log::info!("Getting histogram for parameter: {param}");

    let rows = match param.to_lowercase().as_str() {
        "brand" => hotels::histogram_by_brand(pool).await?,
        "city" => hotels::histogram_by_city(pool).await?,
        "county" => hotels::histogram_by_county(pool).await?,
        "amenities" => hotels::histogram_by_amenities(pool).await?,
        _ => {
            return Err(ApiError::InvalidArgument(format!(
                "Unsupported histogram parameter: {param}"
            )))
        }
    };
    Ok(rows.into_iter().collect())
}

/// Accepts "HH:MM" first, then falls back to a full time literal.
fn parse_time(value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S%.f"))
        .map_err(|_| ApiError::InvalidArgument(format!("Invalid time value: {value}")))
}
