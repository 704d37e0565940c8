use std::collections::HashMap;

use chrono::NaiveTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::models::hotel::{Address, ArrivalTime, Contact, Hotel, HotelAggregate};

/// Optional search filters, combined as a conjunction. Absent or blank
/// values are skipped entirely. Only a single amenity name is supported.
#[derive(Debug, Default)]
pub struct SearchFilters {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub amenity: Option<String>,
}

pub struct NewHotel<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub address: NewAddress<'a>,
    pub contacts: Vec<NewContact<'a>>,
    pub arrival_time: Option<NewArrivalTime>,
}

pub struct NewAddress<'a> {
    pub house_number: Option<&'a str>,
    pub street: &'a str,
    pub city: &'a str,
    pub county: Option<&'a str>,
    pub post_code: Option<&'a str>,
}

pub struct NewContact<'a> {
    pub contact_type: &'a str,
    pub contact_value: &'a str,
}

pub struct NewArrivalTime {
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
}

pub async fn fetch_all(pool: &SqlitePool) -> Result<Vec<HotelAggregate>, sqlx::Error> {
    let hotels =
        sqlx::query_as::<_, Hotel>("SELECT id, name, description, brand FROM hotels ORDER BY id")
            .fetch_all(pool)
            .await?;
    hydrate(pool, hotels).await
}

pub async fn fetch_by_id(pool: &SqlitePool, id: i64) -> Result<Option<HotelAggregate>, sqlx::Error> {
    let hotel =
        sqlx::query_as::<_, Hotel>("SELECT id, name, description, brand FROM hotels WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    match hotel {
        Some(hotel) => Ok(hydrate(pool, vec![hotel]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let found: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

/// Composes the conjunctive filter query. All string comparisons are
/// case-insensitive; DISTINCT guards against fan-out from the address and
/// amenity joins.
pub async fn search(
    pool: &SqlitePool,
    filters: &SearchFilters,
) -> Result<Vec<HotelAggregate>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(
        "SELECT DISTINCT h.id, h.name, h.description, h.brand FROM hotels h \
         LEFT JOIN addresses a ON a.hotel_id = h.id \
         LEFT JOIN hotel_amenities ha ON ha.hotel_id = h.id \
         LEFT JOIN amenities am ON am.id = ha.amenity_id \
         WHERE 1=1",
    );

    if let Some(name) = non_blank(&filters.name) {
        builder
            .push(" AND LOWER(h.name) LIKE ")
            .push_bind(format!("%{}%", name.to_lowercase()));
    }
    if let Some(brand) = non_blank(&filters.brand) {
        builder
            .push(" AND LOWER(h.brand) = LOWER(")
            .push_bind(brand.to_string())
            .push(")");
    }
    if let Some(city) = non_blank(&filters.city) {
        builder
            .push(" AND LOWER(a.city) = LOWER(")
            .push_bind(city.to_string())
            .push(")");
    }
    if let Some(county) = non_blank(&filters.county) {
        builder
            .push(" AND LOWER(a.county) = LOWER(")
            .push_bind(county.to_string())
            .push(")");
    }
    if let Some(amenity) = non_blank(&filters.amenity) {
        builder
            .push(" AND LOWER(am.name) = LOWER(")
            .push_bind(amenity.to_string())
            .push(")");
    }
    builder.push(" ORDER BY h.id");

    let hotels = builder.build_query_as::<Hotel>().fetch_all(pool).await?;
    hydrate(pool, hotels).await
}

pub async fn histogram_by_brand(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as("SELECT brand, COUNT(*) FROM hotels WHERE brand IS NOT NULL GROUP BY brand")
        .fetch_all(pool)
        .await
}

pub async fn histogram_by_city(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT a.city, COUNT(h.id) FROM hotels h \
         JOIN addresses a ON a.hotel_id = h.id \
         GROUP BY a.city",
    )
    .fetch_all(pool)
    .await
}

pub async fn histogram_by_county(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT a.county, COUNT(h.id) FROM hotels h \
         JOIN addresses a ON a.hotel_id = h.id \
         WHERE a.county IS NOT NULL \
         GROUP BY a.county",
    )
    .fetch_all(pool)
    .await
}

/// Left-joins from the amenities side so amenities with no hotel links
/// still appear with a zero count.
pub async fn histogram_by_amenities(pool: &SqlitePool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT a.name, COUNT(ha.hotel_id) FROM amenities a \
         LEFT JOIN hotel_amenities ha ON ha.amenity_id = a.id \
         GROUP BY a.id, a.name \
         ORDER BY a.name",
    )
    .fetch_all(pool)
    .await
}

/// Inserts a hotel and all of its owned records as one transaction.
pub async fn insert(pool: &SqlitePool, hotel: &NewHotel<'_>) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let id: i64 =
        sqlx::query_scalar("INSERT INTO hotels (name, description, brand) VALUES (?, ?, ?) RETURNING id")
            .bind(hotel.name)
            .bind(hotel.description)
            .bind(hotel.brand)
            .fetch_one(&mut *tx)
            .await?;

    sqlx::query(
        "INSERT INTO addresses (hotel_id, house_number, street, city, county, post_code) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(hotel.address.house_number)
    .bind(hotel.address.street)
    .bind(hotel.address.city)
    .bind(hotel.address.county)
    .bind(hotel.address.post_code)
    .execute(&mut *tx)
    .await?;

    for contact in &hotel.contacts {
        sqlx::query("INSERT INTO contacts (hotel_id, contact_type, contact_value) VALUES (?, ?, ?)")
            .bind(id)
            .bind(contact.contact_type)
            .bind(contact.contact_value)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(arrival) = &hotel.arrival_time {
        sqlx::query("INSERT INTO arrival_times (hotel_id, check_in, check_out) VALUES (?, ?, ?)")
            .bind(id)
            .bind(arrival.check_in)
            .bind(arrival.check_out)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(id)
}

pub async fn delete_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for table in [
        "hotel_amenities",
        "contacts",
        "addresses",
        "arrival_times",
        "hotels",
        "amenities",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

#[derive(Debug, sqlx::FromRow)]
struct AmenityLink {
    hotel_id: i64,
    name: String,
}

/// Batch-loads every owned and linked record for the given hotels and
/// assembles fully populated aggregates, preserving input order.
async fn hydrate(
    pool: &SqlitePool,
    hotels: Vec<Hotel>,
) -> Result<Vec<HotelAggregate>, sqlx::Error> {
    if hotels.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = hotels.iter().map(|hotel| hotel.id).collect();

    let mut addresses: HashMap<i64, Address> = fetch_for_hotels::<Address>(
        pool,
        "SELECT hotel_id, house_number, street, city, county, post_code \
         FROM addresses WHERE hotel_id IN ",
        &ids,
        "",
    )
    .await?
    .into_iter()
    .map(|address| (address.hotel_id, address))
    .collect();

    let mut arrival_times: HashMap<i64, ArrivalTime> = fetch_for_hotels::<ArrivalTime>(
        pool,
        "SELECT hotel_id, check_in, check_out FROM arrival_times WHERE hotel_id IN ",
        &ids,
        "",
    )
    .await?
    .into_iter()
    .map(|arrival| (arrival.hotel_id, arrival))
    .collect();

    let mut contacts: HashMap<i64, Vec<Contact>> = HashMap::new();
    for contact in fetch_for_hotels::<Contact>(
        pool,
        "SELECT hotel_id, contact_type, contact_value FROM contacts WHERE hotel_id IN ",
        &ids,
        " ORDER BY id",
    )
    .await?
    {
        contacts.entry(contact.hotel_id).or_default().push(contact);
    }

    let mut amenities: HashMap<i64, Vec<String>> = HashMap::new();
    for link in fetch_for_hotels::<AmenityLink>(
        pool,
        "SELECT ha.hotel_id, a.name FROM hotel_amenities ha \
         JOIN amenities a ON a.id = ha.amenity_id WHERE ha.hotel_id IN ",
        &ids,
        " ORDER BY a.id",
    )
    .await?
    {
        amenities.entry(link.hotel_id).or_default().push(link.name);
    }

    Ok(hotels
        .into_iter()
        .map(|hotel| {
            let id = hotel.id;
            HotelAggregate {
                hotel,
                address: addresses.remove(&id),
                contacts: contacts.remove(&id).unwrap_or_default(),
                arrival_time: arrival_times.remove(&id),
                amenities: amenities.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

async fn fetch_for_hotels<T>(
    pool: &SqlitePool,
    prefix: &str,
    ids: &[i64],
    suffix: &str,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let mut builder = QueryBuilder::<Sqlite>::new(prefix);
    builder.push("(");
    {
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
    }
    builder.push(suffix);
    builder.build_query_as::<T>().fetch_all(pool).await
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::non_blank;

    #[test]
    fn blank_filters_are_skipped() {
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&Some(" Minsk ".to_string())), Some("Minsk"));
    }
}
