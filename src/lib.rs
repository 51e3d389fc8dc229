#![doc = "The `mintodo` library crate."]
#![doc = ""]
#![doc = "A token-authenticated Todo service: domain models, the persistence gateway"]
#![doc = "(PostgreSQL and in-memory backends), the identity endpoints, the bearer-token"]
#![doc = "gate, the route table and error handling. The binary (`main.rs`) only loads"]
#![doc = "configuration, prepares the store and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod responses;
pub mod routes;
pub mod store;

pub use error::AppError;
pub use routes::AppServices;
