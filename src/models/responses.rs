use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::models::hotel::{
    Address, Contact, HotelAggregate, CONTACT_TYPE_EMAIL, CONTACT_TYPE_PHONE,
};

/// Summary projection: list/search/create responses.
#[derive(Debug, Serialize)]
pub struct HotelSummary {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<&HotelAggregate> for HotelSummary {
    fn from(aggregate: &HotelAggregate) -> Self {
        Self {
            id: aggregate.hotel.id,
            name: aggregate.hotel.name.clone(),
            description: aggregate.hotel.description.clone(),
            address: aggregate.address.as_ref().map(format_address),
            phone: first_contact(&aggregate.contacts, CONTACT_TYPE_PHONE),
        }
    }
}

/// Detailed projection: single-hotel responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDetailed {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub address: Option<AddressDto>,
    pub contacts: Option<ContactsDto>,
    pub arrival_time: Option<ArrivalTimeDto>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub house_number: Option<String>,
    pub street: String,
    pub city: String,
    pub county: Option<String>,
    pub post_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactsDto {
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalTimeDto {
    pub check_in: String,
    pub check_out: Option<String>,
}

impl From<&HotelAggregate> for HotelDetailed {
    fn from(aggregate: &HotelAggregate) -> Self {
        Self {
            id: aggregate.hotel.id,
            name: aggregate.hotel.name.clone(),
            brand: aggregate.hotel.brand.clone(),
            address: aggregate.address.as_ref().map(|address| AddressDto {
                house_number: address.house_number.clone(),
                street: address.street.clone(),
                city: address.city.clone(),
                county: address.county.clone(),
                post_code: address.post_code.clone(),
            }),
            contacts: extract_contacts(&aggregate.contacts),
            arrival_time: aggregate.arrival_time.as_ref().map(|arrival| ArrivalTimeDto {
                check_in: format_time(arrival.check_in),
                check_out: arrival.check_out.map(format_time),
            }),
            amenities: aggregate.amenities.clone(),
        }
    }
}

/// Renders the single-line address. Absent optional fields come out as the
/// literal text "null", matching the established wire format.
fn format_address(address: &Address) -> String {
    format!(
        "{} {}, {}, {}, {}",
        field_or_null(address.house_number.as_deref()),
        address.street,
        address.city,
        field_or_null(address.county.as_deref()),
        field_or_null(address.post_code.as_deref()),
    )
}

fn field_or_null(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

fn first_contact(contacts: &[Contact], contact_type: &str) -> Option<String> {
    contacts
        .iter()
        .find(|contact| contact.contact_type == contact_type)
        .map(|contact| contact.contact_value.clone())
}

fn extract_contacts(contacts: &[Contact]) -> Option<ContactsDto> {
    if contacts.is_empty() {
        return None;
    }
    Some(ContactsDto {
        phone: first_contact(contacts, CONTACT_TYPE_PHONE),
        email: first_contact(contacts, CONTACT_TYPE_EMAIL),
    })
}

fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 && time.nanosecond() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}
