use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::models::amenity::Amenity;

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Amenity>, sqlx::Error> {
    sqlx::query_as("SELECT id, name FROM amenities WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn names_for_hotel(pool: &SqlitePool, hotel_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT a.name FROM amenities a \
         JOIN hotel_amenities ha ON ha.amenity_id = a.id \
         WHERE ha.hotel_id = ? ORDER BY a.id",
    )
    .bind(hotel_id)
    .fetch_all(pool)
    .await
}

/// Links the given amenity names to a hotel inside one transaction,
/// creating amenity rows on first reference. Names already linked (and
/// duplicates within the request) are skipped, so the operation is
/// idempotent per name. Returns how many links were created.
pub async fn add_to_hotel(
    pool: &SqlitePool,
    hotel_id: i64,
    names: &[String],
) -> Result<usize, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let linked: Vec<String> = sqlx::query_scalar(
        "SELECT a.name FROM amenities a \
         JOIN hotel_amenities ha ON ha.amenity_id = a.id \
         WHERE ha.hotel_id = ?",
    )
    .bind(hotel_id)
    .fetch_all(&mut *tx)
    .await?;
    let linked: HashSet<String> = linked.into_iter().collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut created = 0usize;
    for name in names {
        if !seen.insert(name.as_str()) || linked.contains(name.as_str()) {
            continue;
        }

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM amenities WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;
        let amenity_id = match existing {
            Some(id) => id,
            None => {
                sqlx::query_scalar("INSERT INTO amenities (name) VALUES (?) RETURNING id")
                    .bind(name)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        sqlx::query("INSERT OR IGNORE INTO hotel_amenities (hotel_id, amenity_id) VALUES (?, ?)")
            .bind(hotel_id)
            .bind(amenity_id)
            .execute(&mut *tx)
            .await?;
        created += 1;
    }

    tx.commit().await?;
    Ok(created)
}
