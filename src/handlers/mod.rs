pub mod hotels;
