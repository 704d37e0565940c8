pub mod amenities;
pub mod hotels;
