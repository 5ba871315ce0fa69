// fluxprov-api: Async Rust client for the InfluxDB v2 administrative API
// (public `/api/v2` + private `/private` legacy surface)

pub mod auth;
pub mod error;
pub mod legacy;
mod rest;
pub mod transport;
pub mod types;
pub mod v2;

pub use auth::{ApiSurface, token_headers};
pub use error::Error;
pub use legacy::LegacyClient;
pub use transport::{TlsMode, TransportConfig};
pub use v2::ApiClient;
