pub mod connection;
pub mod districts;
pub mod executors;
pub mod prices;
pub mod requests;
pub mod reviews;
