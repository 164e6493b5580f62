// staywire-api: Async Rust client for the hotel-distribution API
// (search, live-offer pricing, content lookup).

pub mod auth;
pub mod client;
pub mod enrich;
pub mod error;
pub mod ratecodes;
pub mod transport;
pub mod types;

pub use auth::{ClientCredentials, Environment, TokenManager};
pub use client::{ClientConfig, HotelClient};
pub use error::Error;
pub use ratecodes::{RateCodeEntry, RateCodeRegistry};
pub use transport::TransportConfig;
