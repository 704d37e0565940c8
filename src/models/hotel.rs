use chrono::NaiveTime;

pub const CONTACT_TYPE_PHONE: &str = "PHONE";
pub const CONTACT_TYPE_EMAIL: &str = "EMAIL";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Address {
    pub hotel_id: i64,
    pub house_number: Option<String>,
    pub street: String,
    pub city: String,
    pub county: Option<String>,
    pub post_code: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Contact {
    pub hotel_id: i64,
    pub contact_type: String,
    pub contact_value: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArrivalTime {
    pub hotel_id: i64,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
}

/// A hotel together with every owned and linked record. The repository
/// always returns these fully populated, so callers never have to guess
/// whether an empty collection is genuine or just unloaded.
#[derive(Debug, Clone)]
pub struct HotelAggregate {
    pub hotel: Hotel,
    pub address: Option<Address>,
    pub contacts: Vec<Contact>,
    pub arrival_time: Option<ArrivalTime>,
    pub amenities: Vec<String>,
}
