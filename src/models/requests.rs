use serde::Deserialize;
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[validate(custom(function = "not_blank", message = "Hotel name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    #[validate]
    pub address: AddressRequest,
    #[validate]
    pub contacts: ContactsRequest,
    #[validate]
    pub arrival_time: Option<ArrivalTimeRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub house_number: Option<String>,
    #[validate(custom(function = "not_blank", message = "Street is required"))]
    pub street: String,
    #[validate(custom(function = "not_blank", message = "City is required"))]
    pub city: String,
    pub county: Option<String>,
    pub post_code: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactsRequest {
    #[validate(custom(function = "not_blank", message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalTimeRequest {
    #[validate(custom(function = "not_blank", message = "Check-in time is required"))]
    pub check_in: String,
    pub check_out: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateHotelRequest {
        CreateHotelRequest {
            name: "DoubleTree by Hilton Minsk".to_string(),
            description: None,
            brand: Some("Hilton".to_string()),
            address: AddressRequest {
                house_number: Some("9".to_string()),
                street: "Pobediteley Avenue".to_string(),
                city: "Minsk".to_string(),
                county: Some("Belarus".to_string()),
                post_code: Some("220004".to_string()),
            },
            contacts: ContactsRequest {
                phone: "+375 17 309-80-00".to_string(),
                email: Some("doubletreeminsk.info@hilton.com".to_string()),
            },
            arrival_time: None,
        }
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let mut request = valid_request();
        request.name = "   ".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("name"));
    }

    #[test]
    fn rejects_blank_nested_city() {
        let mut request = valid_request();
        request.address.city = String::new();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("address"));
    }

    #[test]
    fn rejects_malformed_email() {
        let mut request = valid_request();
        request.contacts.email = Some("not-an-email".to_string());
        assert!(request.validate().is_err());
    }
}
