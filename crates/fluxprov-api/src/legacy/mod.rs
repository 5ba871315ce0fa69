// Private (legacy) API client
//
// The `/private/legacy/authorizations` surface backs 1.x-compatible
// username/password authorizations. It is not part of the documented
// public API, so it gets its own client rooted at `/private`.

pub mod authorizations;
pub mod client;
pub mod models;

pub use client::LegacyClient;
