//! Resource mappers and connection bootstrap for managing InfluxDB v2
//! declaratively.
//!
//! This crate sits between `fluxprov-api` and whatever drives the
//! reconciliation (an IaC host, or the `fluxprov` CLI):
//!
//! - **[`Connection`]**: built from a [`ProviderConfig`]; health-checks the server
//!   (`/ready` or `/ping`) and holds the public and legacy API clients.
//!
//! - **[`Resource`]**: one stateless mapper per managed type (bucket,
//!   organization, authorization, legacy authorization, DBRP mapping,
//!   scraper), translating typed attributes into API calls.
//!
//! - **[`Instance`]**: the lifecycle driver owning a managed object's id.
//!   It refreshes after create and update, clears the id when a read finds
//!   nothing, and rejects force-new changes before any remote call.
//!
//! - **[`DataSource`]**: read-only lookups (`ready`, organization and
//!   bucket by name).
//!
//! - **[`schema`]** / **[`provider`]**: static attribute tables and the
//!   catalog of registered `influxdb-v2_*` types.

pub mod config;
pub mod connection;
pub mod convert;
pub mod data;
pub mod error;
pub mod lifecycle;
pub mod provider;
pub mod resource;
pub mod resources;
pub mod schema;
mod secret;
pub mod shard;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_URL, HealthCheck, ProviderConfig, TlsVerification};
pub use connection::Connection;
pub use error::CoreError;
pub use lifecycle::{Instance, create_with_rollback};
pub use provider::{Catalog, SchemaKind, catalog};
pub use resource::{DataSource, DataState, Resource, decode_attrs};
pub use schema::{Attribute, AttributeKind, Presence, ResourceSchema};
pub use shard::{ShardGroupDuration, default_shard_group_duration};
