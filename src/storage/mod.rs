pub mod connection;
pub mod entity;
pub mod error;
pub mod repository;

pub use connection::establish_connection;
pub use error::StoreError;
