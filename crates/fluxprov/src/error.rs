//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use fluxprov_config::ConfigError;
use fluxprov_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the server")]
    #[diagnostic(
        code(fluxprov::connection_failed),
        help(
            "Check the URL and that the server is running.\n\
             Set it with --url, INFLUXDB_V2_URL, or `url` in the [provider] table.\n\
             Try --health-check ping for servers without /ready."
        )
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("The server rejected the token")]
    #[diagnostic(
        code(fluxprov::auth_failed),
        help("Set a valid token with --token or INFLUXDB_V2_TOKEN.")
    )]
    AuthFailed {
        #[source]
        source: CoreError,
    },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{entity_type} '{identifier}' not found")]
    #[diagnostic(code(fluxprov::not_found))]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Unknown {kind} type '{type_name}'")]
    #[diagnostic(
        code(fluxprov::unknown_type),
        help("Available: {available}")
    )]
    UnknownType {
        kind: &'static str,
        type_name: String,
        available: String,
    },

    #[error(transparent)]
    #[diagnostic(
        code(fluxprov::replacement_required),
        help("Delete the resource and create it again with the new attributes.")
    )]
    ReplacementRequired(CoreError),

    #[error(transparent)]
    #[diagnostic(code(fluxprov::state))]
    State(CoreError),

    // ── API ──────────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(fluxprov::api_error))]
    Api(CoreError),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fluxprov::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(
        code(fluxprov::config),
        help(
            "Provider settings come from CLI flags, the [provider] table in the \
             config file, then INFLUXDB_V2_URL / INFLUXDB_V2_TOKEN / \
             INFLUXDB_SKIP_SSL_VERIFY."
        )
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    #[diagnostic(code(fluxprov::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::ReplacementRequired(_) | Self::State(_) => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::UnknownType { .. }
            | Self::Config(_)
            | Self::Json(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let unauthorized = err
            .api_error()
            .is_some_and(|e| e.status() == Some(401));

        match err {
            _ if unauthorized => CliError::AuthFailed { source: err },

            CoreError::ConnectionFailed { .. }
            | CoreError::ClientSetup { .. }
            | CoreError::NotReady { .. } => CliError::ConnectionFailed { source: err },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                entity_type: entity_type.into(),
                identifier,
            },

            CoreError::InvalidAttributes {
                resource_type,
                message,
            } => CliError::Validation {
                field: format!("{resource_type} attributes"),
                reason: message,
            },

            CoreError::RequiresReplacement { .. } => CliError::ReplacementRequired(err),

            CoreError::NotPresent { .. } | CoreError::AlreadyPresent { .. } => {
                CliError::State(err)
            }

            CoreError::Remote { .. } | CoreError::Internal(_) => CliError::Api(err),
        }
    }
}
