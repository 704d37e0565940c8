pub mod amenity;
pub mod hotel;
pub mod requests;
pub mod responses;
