// ── Mapper contracts ──
//
// Each managed object type implements `Resource`; each read-only lookup
// implements `DataSource`. The attribute types are plain serde structs, so
// the host exchanges JSON objects and the mappers work with typed values.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::connection::Connection;
use crate::error::CoreError;
use crate::schema::ResourceSchema;

/// CRUD mapping between declared attributes and one remote object type.
///
/// `read` returning `Ok(None)` means the object no longer exists; the
/// lifecycle driver then clears the local identity. Mappers never hold
/// state of their own: everything they need arrives as arguments.
pub trait Resource: Send + Sync {
    type Attrs: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync;

    fn schema(&self) -> &'static ResourceSchema;

    /// Local checks beyond what decoding already enforces.
    fn validate(&self, _attrs: &Self::Attrs) -> Result<(), CoreError> {
        Ok(())
    }

    /// Create the remote object and return its server-assigned id.
    fn create(
        &self,
        conn: &Connection,
        attrs: &Self::Attrs,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Fetch the remote object and project it onto the attribute shape.
    ///
    /// `prior` is the last known state; mappers use it for values the
    /// server never returns (passwords) or only returns in a normalized
    /// form (shard-group durations, permission sets).
    fn read(
        &self,
        conn: &Connection,
        id: &str,
        prior: &Self::Attrs,
    ) -> impl Future<Output = Result<Option<Self::Attrs>, CoreError>> + Send;

    /// Push the mutable attributes of `attrs` to the server.
    fn update(
        &self,
        conn: &Connection,
        id: &str,
        attrs: &Self::Attrs,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete(
        &self,
        conn: &Connection,
        id: &str,
        attrs: &Self::Attrs,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// A read-only lookup.
pub trait DataSource: Send + Sync {
    type Query: fmt::Debug + DeserializeOwned + Send + Sync;
    type Output: fmt::Debug + Serialize + Send;

    fn schema(&self) -> &'static ResourceSchema;

    fn read(
        &self,
        conn: &Connection,
        query: &Self::Query,
    ) -> impl Future<Output = Result<DataState<Self::Output>, CoreError>> + Send;
}

/// Result of a data-source read: the identity the host records plus the
/// computed attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataState<T> {
    pub id: String,
    #[serde(flatten)]
    pub attrs: T,
}

/// Decode host-supplied JSON into a mapper's attribute type.
pub fn decode_attrs<T: DeserializeOwned>(
    resource_type: &'static str,
    value: Value,
) -> Result<T, CoreError> {
    serde_json::from_value(value).map_err(|e| CoreError::InvalidAttributes {
        resource_type,
        message: e.to_string(),
    })
}

/// `true` when a remote error renders exactly as `expected`.
///
/// The server reports most missing objects through its generic error body;
/// mappers recognise their own "not found" by the full rendered text.
pub(crate) fn is_gone(err: &fluxprov_api::Error, expected: &str) -> bool {
    err.to_string() == expected
}
