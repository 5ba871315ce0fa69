use thiserror::Error;

/// Top-level error type for the `fluxprov-api` crate.
///
/// Covers every failure mode across both API surfaces: transport, TLS,
/// structured errors from the public `/api/v2` and private `/private`
/// endpoints, and response decoding. `fluxprov-core` wraps these with the
/// operation that failed.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The token was rejected (HTTP 401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The token could not be encoded as a header value.
    #[error("invalid token header value: {0}")]
    InvalidToken(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error body returned by the server.
    ///
    /// Rendered as `<code>: <message>` (e.g. `not found: bucket not found`),
    /// the same shape the official clients produce, so callers can match
    /// on the exact text.
    #[error("{}", render_api_error(.code.as_deref(), .message))]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The server answered with a success status other than the one the
    /// endpoint documents (e.g. 200 where 201 is expected).
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn render_api_error(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) if !code.is_empty() => format!("{code}: {message}"),
        _ => message.to_owned(),
    }
}

impl Error {
    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
