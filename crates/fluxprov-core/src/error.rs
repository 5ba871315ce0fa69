// ── Core error types ──
//
// Errors surfaced to the host driving the mappers. Remote failures keep the
// underlying `fluxprov_api::Error` as their source and carry the operation
// that failed ("error creating bucket", "error getting organization", ...).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    /// The bootstrap health check failed. Fatal for the whole session.
    #[error("error pinging server on {endpoint}: {source}")]
    ConnectionFailed {
        endpoint: &'static str,
        #[source]
        source: fluxprov_api::Error,
    },

    /// An HTTP client could not be constructed (bad TLS material, token).
    #[error("error creating {client} client: {source}")]
    ClientSetup {
        client: &'static str,
        #[source]
        source: fluxprov_api::Error,
    },

    #[error("server is not ready: {source}")]
    NotReady {
        #[source]
        source: fluxprov_api::Error,
    },

    // ── Remote operation errors ──────────────────────────────────────
    /// A create/read/update/delete call failed on the server.
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: fluxprov_api::Error,
    },

    /// A data-source lookup matched nothing.
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    // ── Local state errors ───────────────────────────────────────────
    #[error("invalid {resource_type} attributes: {message}")]
    InvalidAttributes {
        resource_type: &'static str,
        message: String,
    },

    /// A force-new attribute changed; the object must be destroyed and
    /// recreated instead of updated.
    #[error("changing {} on {resource_type} requires replacement", .attributes.join(", "))]
    RequiresReplacement {
        resource_type: &'static str,
        attributes: Vec<&'static str>,
    },

    /// The instance has no remote identity yet (or lost it on read).
    #[error("{resource_type} is not present; nothing to {operation}")]
    NotPresent {
        resource_type: &'static str,
        operation: &'static str,
    },

    #[error("{resource_type} already exists with id {id}")]
    AlreadyPresent { resource_type: &'static str, id: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a remote failure with the operation that produced it.
    pub fn remote(context: impl Into<String>, source: fluxprov_api::Error) -> Self {
        Self::Remote {
            context: context.into(),
            source,
        }
    }

    /// The wrapped API error, if this failure came from the server.
    pub fn api_error(&self) -> Option<&fluxprov_api::Error> {
        match self {
            Self::ConnectionFailed { source, .. }
            | Self::ClientSetup { source, .. }
            | Self::NotReady { source }
            | Self::Remote { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Internal(format!("attribute encoding failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found(message: &str) -> fluxprov_api::Error {
        fluxprov_api::Error::Api {
            status: 404,
            code: Some("not found".into()),
            message: message.into(),
        }
    }

    #[test]
    fn remote_error_prefixes_context() {
        let err = CoreError::remote("error getting bucket", not_found("bucket not found"));
        assert_eq!(
            err.to_string(),
            "error getting bucket: not found: bucket not found"
        );
        assert!(err.api_error().is_some_and(fluxprov_api::Error::is_not_found));
    }

    #[test]
    fn health_check_failure_names_endpoint() {
        let err = CoreError::ConnectionFailed {
            endpoint: "/ping",
            source: not_found("no route"),
        };
        assert_eq!(
            err.to_string(),
            "error pinging server on /ping: not found: no route"
        );
    }

    #[test]
    fn replacement_lists_attributes() {
        let err = CoreError::RequiresReplacement {
            resource_type: "influxdb-v2_bucket",
            attributes: vec!["org_id", "rp"],
        };
        assert_eq!(
            err.to_string(),
            "changing org_id, rp on influxdb-v2_bucket requires replacement"
        );
    }
}
