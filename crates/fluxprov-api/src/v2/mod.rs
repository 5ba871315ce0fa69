// Public `/api/v2` client
//
// `client` holds the transport mechanics; every other module adds
// endpoint methods to `ApiClient` as inherent impls.

pub mod authorizations;
pub mod buckets;
pub mod client;
pub mod dbrps;
pub mod health;
pub mod orgs;
pub mod scrapers;

pub use client::ApiClient;
